// SPDX-License-Identifier: MPL-2.0

//! Mention rendering for persisted comment text.
//!
//! Splits text into plain and mention segments for display. Concatenating
//! the text of every segment always reproduces the input.

use crate::api::types::{Comment, CommentMention, User};
use regex::Regex;
use std::sync::LazyLock;

/// `@` followed by one or more ASCII word characters.
static MENTION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"@[A-Za-z0-9_]+").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Mention {
        /// The literal token, including the leading `@`
        text: String,
        /// Display name the token refers to (the token minus `@`)
        name: String,
        /// `None` when no known user matched; shown highlighted but unlinked
        user_id: Option<String>,
    },
}

impl Segment {
    pub fn as_str(&self) -> &str {
        match self {
            Segment::Text(text) => text,
            Segment::Mention { text, .. } => text,
        }
    }

    pub fn is_mention(&self) -> bool {
        matches!(self, Segment::Mention { .. })
    }
}

/// A user the comment itself claims to mention.
struct StoredMention<'a> {
    user_id: &'a str,
    name: &'a str,
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Render text resolving each `@name` token by exact display-name match
/// against `known`. The first matching user wins.
pub fn render_mentions(text: &str, known: &[User]) -> Vec<Segment> {
    tokenize(text, &[], known)
}

/// Render a persisted comment.
///
/// Mentions are resolved through the comment's stored identifiers first: at
/// each `@`, the longest stored display name the text continues with claims
/// the span, which also covers names containing spaces. Tokens that match no
/// stored mention fall back to [`render_mentions`] name matching.
pub fn render_comment(comment: &Comment, known: &[User]) -> Vec<Segment> {
    let stored: Vec<StoredMention<'_>> = comment
        .mentions
        .iter()
        .filter_map(|mention| {
            let user = match mention {
                CommentMention::User(user) => user,
                CommentMention::Id(id) => known.iter().find(|u| &u.id == id)?,
            };
            Some(StoredMention {
                user_id: &user.id,
                name: user.display_name()?,
            })
        })
        .collect();

    tokenize(&comment.text, &stored, known)
}

fn tokenize(text: &str, stored: &[StoredMention<'_>], known: &[User]) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut last = 0;

    while let Some(m) = MENTION_RE.find_at(text, last) {
        let start = m.start();
        let after_at = &text[start + 1..];

        let stored_hit = stored
            .iter()
            .filter(|s| {
                after_at.starts_with(s.name)
                    && after_at
                        .as_bytes()
                        .get(s.name.len())
                        .is_none_or(|&b| !is_word_byte(b))
            })
            .max_by_key(|s| s.name.len());

        let (end, name, user_id) = match stored_hit {
            Some(hit) => (
                start + 1 + hit.name.len(),
                hit.name.to_string(),
                Some(hit.user_id.to_string()),
            ),
            None => {
                let name = &text[start + 1..m.end()];
                let user_id = known
                    .iter()
                    .find(|u| u.display_name() == Some(name))
                    .map(|u| u.id.clone());
                (m.end(), name.to_string(), user_id)
            }
        };

        if start > last {
            segments.push(Segment::Text(text[last..start].to_string()));
        }
        segments.push(Segment::Mention {
            text: text[start..end].to_string(),
            name,
            user_id,
        });
        last = end;
    }

    if last < text.len() {
        segments.push(Segment::Text(text[last..].to_string()));
    }

    segments
}
