// SPDX-License-Identifier: MPL-2.0

use crate::api::NewPost;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    #[error("Title is required")]
    TitleRequired,
    #[error("Description is required")]
    DescriptionRequired,
}

/// A new idea post being written. The description is markdown.
#[derive(Debug, Clone, Default)]
pub struct PostDraft {
    pub title: String,
    pub description: String,
}

impl PostDraft {
    /// Validate and build the request body. The description is sent trimmed.
    pub fn to_new_post(&self) -> Result<NewPost, DraftError> {
        if self.title.is_empty() {
            return Err(DraftError::TitleRequired);
        }
        let description = self.description.trim();
        if description.is_empty() {
            return Err(DraftError::DescriptionRequired);
        }
        Ok(NewPost {
            title: self.title.clone(),
            description: description.to_string(),
        })
    }

    pub fn reset(&mut self) {
        self.title.clear();
        self.description.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_draft_trims_description() {
        let draft = PostDraft {
            title: "Bike lanes".to_string(),
            description: "\n  # Why\nSafer streets  \n".to_string(),
        };
        let post = draft.to_new_post().unwrap();
        assert_eq!(post.title, "Bike lanes");
        assert_eq!(post.description, "# Why\nSafer streets");
    }

    #[test]
    fn test_missing_fields() {
        let mut draft = PostDraft::default();
        assert_eq!(draft.to_new_post(), Err(DraftError::TitleRequired));

        draft.title = "t".to_string();
        draft.description = "   ".to_string();
        assert_eq!(draft.to_new_post(), Err(DraftError::DescriptionRequired));
        assert_eq!(
            DraftError::DescriptionRequired.to_string(),
            "Description is required"
        );
    }
}
