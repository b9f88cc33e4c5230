// SPDX-License-Identifier: MPL-2.0

//! Comment composition with `@`-mention suggestions.
//!
//! The composer owns the draft text and the mentions picked so far. Only the
//! last `@` in the buffer can be an active query; typing a space after it
//! closes the query.

use crate::api::{NewComment, User};

/// A user picked from the suggestion list, with the name shown at the time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentionReference {
    pub user_id: String,
    pub display_name: String,
}

/// Outcome of [`MentionComposer::select`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Reference recorded and the query replaced by `@name `.
    Added,
    /// User was already mentioned; text and references are unchanged.
    AlreadyMentioned,
    /// No active query, or the user has no display name.
    Ignored,
}

/// The active query: text after the last `@`, unless it contains a space.
/// Returns the byte offset of that `@` and the query.
pub fn detect_query(text: &str) -> Option<(usize, &str)> {
    let at = text.rfind('@')?;
    let tail = &text[at + 1..];
    if tail.contains(' ') {
        return None;
    }
    Some((at, tail))
}

/// Candidates whose display name contains `query` case-insensitively and who
/// are not mentioned yet. Candidates without a display name never match.
pub fn filter_candidates<'a>(
    candidates: &'a [User],
    query: &str,
    mentioned: &[MentionReference],
) -> Vec<&'a User> {
    let query = query.to_lowercase();
    candidates
        .iter()
        .filter(|user| {
            user.display_name()
                .is_some_and(|name| name.to_lowercase().contains(&query))
        })
        .filter(|user| !mentioned.iter().any(|m| m.user_id == user.id))
        .collect()
}

/// `text[..at] + "@" + name + " " + text[at + 1 + query_len..]`
pub fn splice_mention(text: &str, at: usize, query_len: usize, name: &str) -> String {
    let rest = text.get(at + 1 + query_len..).unwrap_or("");
    let mut spliced = String::with_capacity(text.len() + name.len() + 2);
    spliced.push_str(&text[..at]);
    spliced.push('@');
    spliced.push_str(name);
    spliced.push(' ');
    spliced.push_str(rest);
    spliced
}

/// Draft comment state for one comment box.
#[derive(Debug, Clone, Default)]
pub struct MentionComposer {
    candidates: Vec<User>,
    text: String,
    mentions: Vec<MentionReference>,
    suggestions: Vec<User>,
}

impl MentionComposer {
    pub fn new(candidates: Vec<User>) -> Self {
        Self {
            candidates,
            ..Self::default()
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn mentions(&self) -> &[MentionReference] {
        &self.mentions
    }

    pub fn suggestions(&self) -> &[User] {
        &self.suggestions
    }

    pub fn is_suggesting(&self) -> bool {
        !self.suggestions.is_empty()
    }

    /// The active query for the current text, if any.
    pub fn query(&self) -> Option<&str> {
        detect_query(&self.text).map(|(_, query)| query)
    }

    /// Whether the submit control should be enabled.
    pub fn can_submit(&self) -> bool {
        !self.text.trim().is_empty()
    }

    /// Replace the candidate list, e.g. once the user directory has loaded.
    pub fn set_candidates(&mut self, candidates: Vec<User>) {
        self.candidates = candidates;
        self.refresh_suggestions();
    }

    /// Called on every edit with the full new buffer.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.refresh_suggestions();
    }

    fn refresh_suggestions(&mut self) {
        self.suggestions = match detect_query(&self.text) {
            Some((_, query)) => filter_candidates(&self.candidates, query, &self.mentions)
                .into_iter()
                .cloned()
                .collect(),
            None => Vec::new(),
        };
    }

    /// Commit a suggestion. Suggestions are closed whatever the outcome.
    pub fn select(&mut self, user: &User) -> Selection {
        self.suggestions.clear();

        let Some(name) = user.display_name() else {
            return Selection::Ignored;
        };
        if self.mentions.iter().any(|m| m.user_id == user.id) {
            return Selection::AlreadyMentioned;
        }
        let Some((at, query)) = detect_query(&self.text) else {
            return Selection::Ignored;
        };

        self.text = splice_mention(&self.text, at, query.len(), name);
        self.mentions.push(MentionReference {
            user_id: user.id.clone(),
            display_name: name.to_string(),
        });
        Selection::Added
    }

    /// Drop a mention reference. The `@name` text stays in the buffer.
    pub fn remove_mention(&mut self, user_id: &str) -> bool {
        let before = self.mentions.len();
        self.mentions.retain(|m| m.user_id != user_id);
        self.mentions.len() != before
    }

    /// The request body for the current draft, or `None` when the trimmed text
    /// is empty (nothing should be sent). Does not reset the draft.
    pub fn prepare_submission(&self) -> Option<NewComment> {
        let text = self.text.trim();
        if text.is_empty() {
            return None;
        }
        Some(NewComment {
            text: text.to_string(),
            mentions: self.mentions.iter().map(|m| m.user_id.clone()).collect(),
        })
    }

    /// Clear text, mentions and suggestions. Candidates are kept.
    pub fn reset(&mut self) {
        self.text.clear();
        self.mentions.clear();
        self.suggestions.clear();
    }
}
