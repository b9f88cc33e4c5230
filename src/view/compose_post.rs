// SPDX-License-Identifier: MPL-2.0

use crate::api::ThinkifyClient;
use crate::compose::PostDraft;
use crate::view::Notice;

/// Publish `draft`. The draft is cleared only once the server accepts it.
pub async fn publish_post(client: &ThinkifyClient, draft: &mut PostDraft) -> Notice {
    let body = match draft.to_new_post() {
        Ok(body) => body,
        Err(e) => return Notice::error(e.to_string()),
    };

    match client.create_post(&body).await {
        Ok(message) => {
            draft.reset();
            Notice::success(message)
        }
        Err(e) => Notice::from_client_error(&e, "Something Went Wrong"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_server::serve;

    #[tokio::test]
    async fn test_invalid_draft_is_not_sent() {
        let client = ThinkifyClient::with_endpoint("http://127.0.0.1:9/api").unwrap();
        let mut draft = PostDraft {
            title: "Rooftop gardens".to_string(),
            description: " ".to_string(),
        };
        let notice = publish_post(&client, &mut draft).await;
        assert_eq!(notice, Notice::error("Description is required"));
        assert_eq!(draft.title, "Rooftop gardens");
    }

    #[tokio::test]
    async fn test_publish_resets_only_on_success() {
        let (endpoint, requests) = serve(vec![
            (200, r#"{"status": false, "message": "Title already used"}"#),
            (200, r#"{"status": true, "message": "Post created"}"#),
        ]);
        let client = ThinkifyClient::with_endpoint(&endpoint).unwrap();
        client.set_token("t");
        let mut draft = PostDraft {
            title: "Rooftop gardens".to_string(),
            description: "Grow *food* up top\n".to_string(),
        };

        let notice = publish_post(&client, &mut draft).await;
        assert_eq!(notice, Notice::error("Title already used"));
        assert_eq!(draft.title, "Rooftop gardens");

        let notice = publish_post(&client, &mut draft).await;
        assert_eq!(notice, Notice::success("Post created"));
        assert!(draft.title.is_empty());
        assert!(draft.description.is_empty());

        let seen = requests.recv().unwrap();
        assert_eq!(seen.url, "/api/posts");
        let body: serde_json::Value = serde_json::from_str(&seen.body).unwrap();
        assert_eq!(body["description"], "Grow *food* up top");
    }
}
