// SPDX-License-Identifier: MPL-2.0

mod client;
pub mod mentions;
mod types;

#[cfg(test)]
pub(crate) use client::test_server;
pub use client::{ClientError, ThinkifyClient};
pub use mentions::{Segment, render_comment, render_mentions};
pub use types::{
    Comment, CommentMention, IdeaStatus, NewComment, NewPost, Post, Reaction, ReactionKind, User,
};
