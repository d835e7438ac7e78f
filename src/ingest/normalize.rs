use serde_json::{Number, Value};

use crate::core::{PlayerRecord, RawRecord};

// Aliases in resolution order: the first present, non-empty value wins.
const NICKNAME_KEYS: &[&str] = &["nickname", "nick", "name"];
const AVATAR_FILE_KEYS: &[&str] = &["img_url", "image", "photo", "pic", "avatar", "img"];
const AVATAR_URL_KEYS: &[&str] = &["img_url_original", "image_url", "photo_url", "pic_url"];
const LEVEL_KEYS: &[&str] = &["livello", "level"];
const EXPERIENCE_KEYS: &[&str] = &["esperienza", "experience"];
const KILLS_KEYS: &[&str] = &["kill", "kills"];
const DEATHS_KEYS: &[&str] = &["morti", "deaths"];
const WINS_KEYS: &[&str] = &["vittorie", "wins"];

/// Map a raw feed object onto the canonical record shape.
///
/// Total: absent or unusable fields take their defaults (level 1, everything
/// else 0 or empty), so the result never carries NaN or infinities.
pub fn normalize_record(raw: &RawRecord) -> PlayerRecord {
    PlayerRecord {
        nickname: text_field(raw, NICKNAME_KEYS),
        avatar_file: text_field(raw, AVATAR_FILE_KEYS),
        avatar_url_absolute: text_field(raw, AVATAR_URL_KEYS),
        level: level_field(raw),
        experience: counter_field(raw, EXPERIENCE_KEYS),
        kills: counter_field(raw, KILLS_KEYS),
        deaths: counter_field(raw, DEATHS_KEYS),
        wins: counter_field(raw, WINS_KEYS),
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// First alias carrying a non-null, non-blank value
fn first_present<'a>(raw: &'a RawRecord, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| raw.get(*key))
        .find(|value| !is_blank(value))
}

/// Scalars rendered as text; integral numbers drop the fractional part (`1.0` -> `"1"`)
fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(number_text(n)),
        _ => None,
    }
}

fn number_text(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

fn text_field(raw: &RawRecord, keys: &[&str]) -> String {
    first_present(raw, keys)
        .and_then(as_text)
        .unwrap_or_default()
}

/// Coerce a JSON value to a finite number
pub fn coerce_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        _ => return None,
    };
    n.is_finite().then_some(n)
}

fn numeric_field(raw: &RawRecord, keys: &[&str]) -> Option<f64> {
    first_present(raw, keys).and_then(coerce_number)
}

fn counter_field(raw: &RawRecord, keys: &[&str]) -> f64 {
    match numeric_field(raw, keys) {
        Some(n) if n > 0.0 => n,
        _ => 0.0,
    }
}

fn level_field(raw: &RawRecord) -> u32 {
    numeric_field(raw, LEVEL_KEYS)
        .map(|n| n.trunc().clamp(1.0, u32::MAX as f64) as u32)
        .unwrap_or(1)
}
