use serde::Serialize;
use serde_json::Value;
use unicode_normalization::UnicodeNormalization;

use rand::Rng;

/// Attribute keys that are noise in a metadata dump: availability flags,
/// cover art urls and other fields the player never acts on.
const DUMP_IGNORED: [&str; 9] = [
    "available",
    "availableForMobile",
    "availableForPremiumUsers",
    "cover",
    "coverUri",
    "downloadInfo",
    "ogImage",
    "previewDurationMs",
    "storageDir",
];

/// Filesystem-reserved device stems that must not start a path component.
const RESERVED_NAMES: [&str; 24] = [
    "CON", "CONIN$", "CONOUT$", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5",
    "COM6", "COM7", "COM8", "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7",
    "LPT8", "LPT9",
];

/// Turns arbitrary track/album/artist metadata into a safe path component.
///
/// Applies canonical composed Unicode normalization, trims the ends,
/// collapses internal whitespace runs to a single space, replaces
/// characters that are illegal in file names (control characters and
/// `" * / : < > ? | \`) with underscores, and prefixes reserved device
/// names (`CON`, `NUL`, `COM1`…, optionally followed by an extension)
/// with an underscore.
///
/// The output is a pure function of the input: identical metadata always
/// maps to the identical component, which is what makes the audio cache
/// reusable across runs.
pub fn slugify(value: &str) -> String {
    let normalized: String = value.nfc().collect();
    let trimmed = normalized.trim();

    let mut out = String::with_capacity(trimmed.len());
    let mut in_whitespace = false;
    for ch in trimmed.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                out.push(' ');
                in_whitespace = true;
            }
            continue;
        }
        in_whitespace = false;
        if ch <= '\u{1F}'
            || ch == '\u{7F}'
            || matches!(ch, '"' | '*' | '/' | ':' | '<' | '>' | '?' | '|' | '\\')
        {
            out.push('_');
        } else {
            out.push(ch);
        }
    }

    if has_reserved_stem(&out) {
        out.insert(0, '_');
    }
    out
}

fn has_reserved_stem(name: &str) -> bool {
    let stem = name.split('.').next().unwrap_or(name).trim();
    RESERVED_NAMES
        .iter()
        .any(|reserved| stem.eq_ignore_ascii_case(reserved))
}

/// Formats a millisecond duration as `m:ss` (or `h:mm:ss` past the hour
/// mark). Unknown or zero durations render as `-:--`.
pub fn duration_str(duration_ms: Option<u64>) -> String {
    match duration_ms {
        Some(ms) if ms > 0 => {
            let sec = ms / 1000;
            let min = sec / 60;
            if min > 60 {
                format!("{}:{:02}:{:02}", min / 60, min % 60, sec % 60)
            } else {
                format!("{}:{:02}", min, sec % 60)
            }
        }
        _ => String::from("-:--"),
    }
}

pub fn plural(count: usize) -> &'static str {
    if count != 1 { "s" } else { "" }
}

/// Generates an opaque play-session id for the play-status report.
pub fn generate_play_id() -> String {
    let mut rng = rand::rng();
    format!(
        "{}-{}-{}",
        rng.random_range(0..1000),
        rng.random_range(0..1000),
        rng.random_range(0..1000)
    )
}

/// Pretty-prints every meaningful attribute of an API object.
///
/// Serializes the object to JSON, prunes empty values (nulls, `false`,
/// zeros, empty strings, arrays and maps) along with the fixed ignore
/// list of noisy fields, and prints the rest. Backs the `dump` command.
pub fn show_attributes<T: Serialize>(object: &T) {
    match serde_json::to_value(object) {
        Ok(value) => match prune_attributes(value) {
            Some(pruned) => match serde_json::to_string_pretty(&pruned) {
                Ok(rendered) => println!("{rendered}"),
                Err(err) => println!("unprintable object: {err}"),
            },
            None => println!("None"),
        },
        Err(err) => println!("unprintable object: {err}"),
    }
}

fn prune_attributes(value: Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::String(s) if s.is_empty() => None,
        Value::Array(items) => {
            let pruned: Vec<Value> = items.into_iter().filter_map(prune_attributes).collect();
            if pruned.is_empty() {
                None
            } else {
                Some(Value::Array(pruned))
            }
        }
        Value::Object(map) => {
            let pruned: serde_json::Map<String, Value> = map
                .into_iter()
                .filter(|(key, _)| !DUMP_IGNORED.contains(&key.as_str()))
                .filter_map(|(key, value)| prune_attributes(value).map(|v| (key, v)))
                .collect();
            if pruned.is_empty() {
                None
            } else {
                Some(Value::Object(pruned))
            }
        }
        other => Some(other),
    }
}
