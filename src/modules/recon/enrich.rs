//! Per-platform adapters mapping structured API bodies to `extra` metadata.
//!
//! Only the listed fields are copied; absent or null fields are skipped.
//! `None` means the body itself says there is no such account.

use serde_json::{Map, Value};

use crate::config::Enricher;

const GITHUB_FIELDS: &[(&str, &str)] = &[
    ("public_repos", "/public_repos"),
    ("followers", "/followers"),
    ("created_at", "/created_at"),
    ("bio", "/bio"),
];

const REDDIT_FIELDS: &[(&str, &str)] = &[
    ("comment_karma", "/data/comment_karma"),
    ("link_karma", "/data/link_karma"),
    ("created_utc", "/data/created_utc"),
];

const TWITCH_FIELDS: &[(&str, &str)] = &[
    ("id", "/data/0/id"),
    ("display_name", "/data/0/display_name"),
    ("broadcaster_type", "/data/0/broadcaster_type"),
    ("created_at", "/data/0/created_at"),
];

pub fn enrich(enricher: Enricher, body: &Value) -> Option<Map<String, Value>> {
    match enricher {
        Enricher::Github => Some(pick(body, GITHUB_FIELDS)),
        Enricher::Reddit => Some(pick(body, REDDIT_FIELDS)),
        // Helix answers 200 with an empty `data` list for unknown logins
        Enricher::Twitch => body
            .pointer("/data/0")
            .filter(|user| user.is_object())
            .map(|_| pick(body, TWITCH_FIELDS)),
        Enricher::None => Some(Map::new()),
    }
}

fn pick(body: &Value, fields: &[(&str, &str)]) -> Map<String, Value> {
    fields
        .iter()
        .filter_map(|(key, pointer)| {
            body.pointer(pointer)
                .filter(|v| !v.is_null())
                .map(|v| (key.to_string(), v.clone()))
        })
        .collect()
}
