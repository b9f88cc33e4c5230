// SPDX-License-Identifier: MPL-2.0

pub const APP_ID: &str = "io.github.thinkify.Client";
pub const APP_NAME: &str = "Thinkify";

pub const DEFAULT_ENDPOINT: &str = "https://thinkify-server.vercel.app/api/";

/// Overrides the persisted server endpoint when set.
pub const ENDPOINT_ENV: &str = "THINKIFY_SERVER_ENDPOINT";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
