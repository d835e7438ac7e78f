//! Avatar URL resolution.
//!
//! Pure data: works out which URLs a front-end should try, in order, and the
//! glyph to show if all of them fail. No requests are made here.

use reqwest::Url;
use serde::Serialize;

use crate::core::PlayerRecord;

/// Placeholder images tried, in order, when the player's own avatar fails
pub const PLACEHOLDER_CANDIDATES: [&str; 4] = [
    "placeholder.jpg",
    "placeholder.jpeg",
    "placeholder.webp",
    "placeholder.png",
];

/// Ordered avatar candidates for one player
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvatarPlan {
    /// The player's own image, if one can be resolved
    pub primary: Option<String>,

    /// Placeholder URLs to try after `primary`
    pub fallbacks: Vec<String>,

    /// Shown when every URL fails
    pub initial: char,
}

impl AvatarPlan {
    /// Every URL to try, in order
    pub fn candidates(&self) -> impl Iterator<Item = &str> {
        self.primary
            .iter()
            .chain(self.fallbacks.iter())
            .map(String::as_str)
    }
}

fn has_http_scheme(s: &str) -> bool {
    let lower = s.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Well-formed absolute http(s) URL
pub fn is_http_url(s: &str) -> bool {
    has_http_scheme(s)
        && Url::parse(s)
            .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
            .unwrap_or(false)
}

/// Normalize a configured base URL: scheme defaults to https, always ends in `/`.
pub fn sanitize_base(base: &str) -> Option<String> {
    let base = base.trim();
    if base.is_empty() {
        return None;
    }

    let mut url = if has_http_scheme(base) {
        base.to_string()
    } else {
        format!("https://{}", base)
    };
    if !url.ends_with('/') {
        url.push('/');
    }
    Some(url)
}

/// Join a bare filename onto a sanitized base, URL-encoding it
fn join_file(base: &str, file: &str) -> String {
    format!("{}{}", base, urlencoding::encode(file))
}

/// First ASCII letter or digit of the nickname, upper-cased
pub fn initial_glyph(nickname: &str) -> char {
    nickname
        .chars()
        .find(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_uppercase())
        .unwrap_or('?')
}

/// Work out the avatar candidates for a player
pub fn resolve_avatar(record: &PlayerRecord, avatar_base: Option<&str>) -> AvatarPlan {
    let base = avatar_base.and_then(sanitize_base);

    let primary = if is_http_url(&record.avatar_url_absolute) {
        Some(record.avatar_url_absolute.clone())
    } else {
        let file = if record.avatar_file.is_empty() {
            record.avatar_url_absolute.as_str()
        } else {
            record.avatar_file.as_str()
        };

        if file.is_empty() {
            None
        } else if is_http_url(file) {
            Some(file.to_string())
        } else {
            base.as_deref().map(|b| join_file(b, file))
        }
    };

    let fallbacks = base
        .as_deref()
        .map(|b| {
            PLACEHOLDER_CANDIDATES
                .iter()
                .map(|name| join_file(b, name))
                .collect()
        })
        .unwrap_or_default();

    AvatarPlan {
        primary,
        fallbacks,
        initial: initial_glyph(&record.nickname),
    }
}
