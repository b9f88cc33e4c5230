// SPDX-License-Identifier: MPL-2.0

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// An entry from the user directory. Used both as a mention candidate and
/// to resolve authors and mentions when rendering comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub profile_picture: Option<String>,
}

impl User {
    /// The display name, or `None` when the directory entry has none.
    /// An empty name counts as missing.
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }
}

/// A stored mention on a comment. The server returns either the bare user id
/// or the populated user document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommentMention {
    Id(String),
    User(User),
}

impl CommentMention {
    pub fn user_id(&self) -> &str {
        match self {
            CommentMention::Id(id) => id,
            CommentMention::User(user) => &user.id,
        }
    }

    /// Chip label: the populated name when there is one, else the raw id.
    pub fn label(&self) -> &str {
        match self {
            CommentMention::Id(id) => id,
            CommentMention::User(user) => user.display_name().unwrap_or(&user.id),
        }
    }
}

/// A comment as persisted by the server. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(rename = "comment")]
    pub text: String,
    #[serde(default)]
    pub mentions: Vec<CommentMention>,
    #[serde(rename = "userId", default)]
    pub author_id: Option<String>,
    /// Missing on some legacy comments
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// The fixed set of reactions a post accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionKind {
    Like,
    Love,
    Angry,
}

impl ReactionKind {
    pub const ALL: [ReactionKind; 3] = [ReactionKind::Like, ReactionKind::Love, ReactionKind::Angry];

    pub fn as_str(self) -> &'static str {
        match self {
            ReactionKind::Like => "like",
            ReactionKind::Love => "love",
            ReactionKind::Angry => "angry",
        }
    }
}

impl std::fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One user's reaction to a post. A post holds at most one per reactor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reaction {
    pub reactor_id: String,
    #[serde(rename = "reaction")]
    pub kind: ReactionKind,
}

/// Lifecycle stage of an idea post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdeaStatus {
    #[default]
    Brainstorm,
    Planning,
    InProgress,
    Completed,
    Archived,
}

impl IdeaStatus {
    pub const ALL: [IdeaStatus; 5] = [
        IdeaStatus::Brainstorm,
        IdeaStatus::Planning,
        IdeaStatus::InProgress,
        IdeaStatus::Completed,
        IdeaStatus::Archived,
    ];

    pub fn key(self) -> &'static str {
        match self {
            IdeaStatus::Brainstorm => "brainstorm",
            IdeaStatus::Planning => "planning",
            IdeaStatus::InProgress => "in-progress",
            IdeaStatus::Completed => "completed",
            IdeaStatus::Archived => "archived",
        }
    }

    /// Unknown keys fall back to [`IdeaStatus::Brainstorm`].
    pub fn from_key(key: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|status| status.key() == key)
            .unwrap_or_default()
    }

    pub fn label(self) -> &'static str {
        match self {
            IdeaStatus::Brainstorm => "💡 Brainstorm",
            IdeaStatus::Planning => "📋 Planning",
            IdeaStatus::InProgress => "🚀 In Progress",
            IdeaStatus::Completed => "✅ Completed",
            IdeaStatus::Archived => "📦 Archived",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            IdeaStatus::Brainstorm => "Initial idea phase",
            IdeaStatus::Planning => "Planning phase",
            IdeaStatus::InProgress => "Currently being worked on",
            IdeaStatus::Completed => "Idea completed",
            IdeaStatus::Archived => "Archived idea",
        }
    }
}

fn lenient_status<'de, D>(deserializer: D) -> Result<IdeaStatus, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().map(IdeaStatus::from_key).unwrap_or_default())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    /// Markdown source; rendering happens outside this crate.
    #[serde(default)]
    pub description: String,
    /// Author display name as sent by the server
    #[serde(default)]
    pub author: Option<String>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub reactions: Vec<Reaction>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default, deserialize_with = "lenient_status")]
    pub status: IdeaStatus,
}

/// Body of the submit-comment call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewComment {
    #[serde(rename = "comment")]
    pub text: String,
    pub mentions: Vec<String>,
}

/// Body of the create-post call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewPost {
    pub title: String,
    pub description: String,
}
