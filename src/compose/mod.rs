// SPDX-License-Identifier: MPL-2.0

pub mod composer;
mod post_draft;

pub use composer::{MentionComposer, MentionReference, Selection};
pub use post_draft::{DraftError, PostDraft};
