// SPDX-License-Identifier: MPL-2.0

mod compose_post;
mod notice;
mod post_view;

pub use compose_post::publish_post;
pub use notice::{Notice, Severity};
pub use post_view::{CommentView, PostView, format_timestamp};
