// SPDX-License-Identifier: MPL-2.0

use crate::api::{
    ClientError, Comment, CommentMention, Post, ReactionKind, Segment, ThinkifyClient, User,
    render_comment,
};
use crate::compose::MentionComposer;
use crate::state::{InFlight, reactions};
use crate::view::Notice;
use chrono::{DateTime, Local, TimeZone, Utc};
use std::fmt;
use std::sync::Arc;

/// `MMM d, yyyy h:mm a`, e.g. "Mar 2, 2024 9:30 AM".
pub fn format_timestamp<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    at.format("%b %-d, %Y %-I:%M %p").to_string()
}

/// Everything needed to draw one comment.
#[derive(Debug, Clone)]
pub struct CommentView<'a> {
    pub comment: &'a Comment,
    /// `None` when the author is not in the loaded user directory
    pub author: Option<&'a User>,
    pub segments: Vec<Segment>,
    /// Labels for the "Mentioned:" chips, one per stored mention
    pub mention_labels: Vec<&'a str>,
    /// `None` when the server stored no creation time
    pub timestamp: Option<String>,
}

/// A single post page: the post, the user directory, the signed-in viewer
/// and the viewer's comment draft.
pub struct PostView {
    client: Arc<ThinkifyClient>,
    post: Post,
    users: Vec<User>,
    viewer: Option<User>,
    composer: MentionComposer,
    in_flight: InFlight,
}

impl PostView {
    pub fn new(
        client: Arc<ThinkifyClient>,
        post: Post,
        users: Vec<User>,
        viewer: Option<User>,
    ) -> Self {
        Self {
            client,
            post,
            composer: MentionComposer::new(users.clone()),
            users,
            viewer,
            in_flight: InFlight::default(),
        }
    }

    /// Fetch the post, then the user directory and the viewer when signed
    /// in. Only a failure to fetch the post itself is fatal.
    pub async fn load(client: Arc<ThinkifyClient>, post_id: &str) -> Result<Self, Notice> {
        let post = client.get_post(post_id).await.map_err(|e| {
            tracing::warn!(post_id, "failed to load post: {e}");
            Notice::from_client_error(&e, "Something Went Wrong")
        })?;

        let mut users = Vec::new();
        let mut viewer = None;
        if client.is_authenticated() {
            match client.mention_candidates().await {
                Ok(found) => users = found,
                Err(e) => tracing::warn!("could not fetch users for mentions: {e}"),
            }
            match client.current_user().await {
                Ok(user) => viewer = Some(user),
                Err(e) => tracing::warn!("could not fetch current user: {e}"),
            }
        }

        Ok(Self::new(client, post, users, viewer))
    }

    /// Share the reaction guard with other views of the same posts.
    pub fn with_in_flight(mut self, in_flight: InFlight) -> Self {
        self.in_flight = in_flight;
        self
    }

    pub fn post(&self) -> &Post {
        &self.post
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn viewer(&self) -> Option<&User> {
        self.viewer.as_ref()
    }

    pub fn composer(&self) -> &MentionComposer {
        &self.composer
    }

    pub fn composer_mut(&mut self) -> &mut MentionComposer {
        &mut self.composer
    }

    /// The comment box is only offered to a signed-in viewer.
    pub fn can_comment(&self) -> bool {
        self.viewer.is_some()
    }

    pub fn reaction_counts(&self) -> [(ReactionKind, usize); 3] {
        reactions::tally(&self.post.reactions)
    }

    pub fn viewer_reaction(&self) -> Option<ReactionKind> {
        let viewer = self.viewer.as_ref()?;
        reactions::reaction_of(&self.post.reactions, &viewer.id)
    }

    /// True while a reaction request for this post is outstanding.
    pub fn is_reacting(&self) -> bool {
        self.in_flight.is_pending(&self.post.id)
    }

    /// React to the post with `kind` ("like", "love" or "angry").
    ///
    /// The local reaction set is reconciled only after the server accepts,
    /// against whatever the set is when the response arrives.
    pub async fn react(&mut self, kind: &str) -> Notice {
        let kind = match kind.parse::<ReactionKind>() {
            Ok(kind) => kind,
            Err(e) => return Notice::error(e.to_string()),
        };
        let Some(reactor_id) = self.viewer.as_ref().map(|v| v.id.clone()) else {
            if self.client.is_authenticated() {
                return Notice::error("Your profile could not be loaded, reload the page to react");
            }
            return Notice::from_client_error(&ClientError::NotAuthenticated, "");
        };
        let Some(_ticket) = self.in_flight.try_begin(&self.post.id) else {
            return Notice::warning("Your previous reaction is still being sent");
        };

        match self.client.submit_reaction(&self.post.id, kind).await {
            Ok(message) => {
                let step = reactions::reconcile(&self.post.reactions, &reactor_id, kind);
                tracing::debug!(post_id = %self.post.id, change = ?step.change, "reaction applied");
                self.post.reactions = step.reactions;
                Notice::success(message)
            }
            Err(e) => Notice::from_client_error(&e, "Something Went Wrong"),
        }
    }

    /// Send the composer's draft as a new comment.
    ///
    /// Returns `None` without any request when the trimmed draft is empty. On
    /// success the comment is appended locally and the draft cleared; on
    /// failure the draft is kept so it can be sent again.
    pub async fn submit_comment(&mut self) -> Option<Notice> {
        let body = self.composer.prepare_submission()?;

        let notice = match self.client.submit_comment(&self.post.id, &body).await {
            Ok(message) => {
                self.post.comments.push(Comment {
                    text: body.text,
                    mentions: body.mentions.into_iter().map(CommentMention::Id).collect(),
                    author_id: self.viewer.as_ref().map(|v| v.id.clone()),
                    created_at: Some(Utc::now()),
                });
                self.composer.reset();
                Notice::success(message)
            }
            Err(e) => Notice::from_client_error(&e, "Failed to add comment"),
        };
        Some(notice)
    }

    pub fn comment_count_label(&self) -> String {
        match self.post.comments.len() {
            1 => "1 Comment".to_string(),
            n => format!("{n} Comments"),
        }
    }

    pub fn comments(&self) -> Vec<CommentView<'_>> {
        self.post
            .comments
            .iter()
            .map(|comment| CommentView {
                comment,
                author: comment
                    .author_id
                    .as_deref()
                    .and_then(|id| self.find_user(id)),
                segments: render_comment(comment, &self.users),
                mention_labels: comment
                    .mentions
                    .iter()
                    .map(|mention| self.mention_label(mention))
                    .collect(),
                timestamp: comment
                    .created_at
                    .map(|at| format_timestamp(&at.with_timezone(&Local))),
            })
            .collect()
    }

    fn find_user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    fn mention_label<'a>(&'a self, mention: &'a CommentMention) -> &'a str {
        match mention {
            CommentMention::Id(id) => self
                .find_user(id)
                .and_then(User::display_name)
                .unwrap_or(id.as_str()),
            CommentMention::User(_) => mention.label(),
        }
    }
}
