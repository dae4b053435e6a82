//! Notification classification.
//!
//! Turns a raw `bridge.account_notifications` record into a [`NotificationSummary`]:
//! who triggered it, a short description of what happened and when. Upstream messages
//! are free English text, so matching is best-effort and anything unrecognised falls
//! back to the raw message or to [`NOT_AVAILABLE`].

use {
    crate::history::RawRecord,
    chrono::{DateTime, NaiveDateTime, Utc},
    serde::Serialize,
    serde_json::Value,
    std::fmt,
};

/// Placeholder for a field that could not be determined.
pub const NOT_AVAILABLE: &str = "N/A";

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Notification type tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationKind {
    Vote,
    Mention,
    Reply,
    Reblog,
    /// Any other tag (follow, transfer, ...), kept verbatim
    Other(String),
}

impl From<&str> for NotificationKind {
    fn from(tag: &str) -> Self {
        match tag {
            "vote" => Self::Vote,
            "mention" => Self::Mention,
            "reply" => Self::Reply,
            "reblog" => Self::Reblog,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vote => write!(f, "vote"),
            Self::Mention => write!(f, "mention"),
            Self::Reply => write!(f, "reply"),
            Self::Reblog => write!(f, "reblog"),
            Self::Other(tag) => write!(f, "{tag}"),
        }
    }
}

/// One display row derived from a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationSummary {
    /// 1-based position in the listing
    pub index: usize,
    #[serde(rename = "type")]
    pub kind: String,
    pub sender: String,
    pub description: String,
    pub date: String,
}

/// Classifies one notification into a display row.
///
/// # Arguments
///
/// * `index` - 1-based position in the listing
/// * `notification` - Raw bridge notification (`type`, `msg`, `url`, `date`)
///
/// # Returns
///
/// A `NotificationSummary` with `"N/A"` in every field that could not be determined.
/// Never fails.
pub fn classify(index: usize, notification: &RawRecord) -> NotificationSummary {
    let msg = str_field(notification, "msg");
    let url = str_field(notification, "url");
    let tag = str_field(notification, "type");

    NotificationSummary {
        index,
        kind: if tag.is_empty() {
            NOT_AVAILABLE.to_string()
        } else {
            tag.to_string()
        },
        sender: extract_sender(msg, url).unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        description: describe(&NotificationKind::from(tag), msg, url)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        date: render_date(notification.get("date")),
    }
}

/// Classifies a whole listing, numbering from 1.
pub fn classify_all(notifications: &[RawRecord]) -> Vec<NotificationSummary> {
    notifications
        .iter()
        .enumerate()
        .map(|(i, n)| classify(i + 1, n))
        .collect()
}

fn str_field<'a>(record: &'a RawRecord, key: &str) -> &'a str {
    record.get(key).and_then(Value::as_str).unwrap_or("")
}

fn extract_sender(msg: &str, url: &str) -> Option<String> {
    msg.split_whitespace()
        .find(|token| token.starts_with('@') && token.chars().count() > 1)
        .or_else(|| {
            url.starts_with('@')
                .then(|| url.split('/').next().unwrap_or(url))
        })
        .map(str::to_string)
}

fn describe(kind: &NotificationKind, msg: &str, url: &str) -> Option<String> {
    if !msg.is_empty() {
        let description = match kind {
            NotificationKind::Vote if msg.contains("voted on your post") => {
                match between(msg, "($", ")") {
                    Some(amount) if msg.contains(')') => format!("voted {amount} on your post"),
                    _ => "voted on your post".to_string(),
                }
            }
            NotificationKind::Mention if msg.contains("mentioned you") => {
                match between(msg, "and ", " others") {
                    Some(count) if msg.contains("others") => {
                        format!("mentioned you and {count} others")
                    }
                    _ => "mentioned you".to_string(),
                }
            }
            NotificationKind::Reply if msg.contains("replied to your") => {
                "replied to your post".to_string()
            }
            NotificationKind::Reply if msg.contains("replied to you") => {
                "replied to you".to_string()
            }
            NotificationKind::Reblog if msg.contains("reblogged your post") => {
                "reblogged your post".to_string()
            }
            _ => msg.to_string(),
        };
        return Some(description);
    }

    url.split_once('/')
        .map(|(_, rest)| format!("re: {rest}"))
}

/// Text after the first `start`, up to the next `end` (or the end of `text`).
fn between<'a>(text: &'a str, start: &str, end: &str) -> Option<&'a str> {
    let (_, rest) = text.split_once(start)?;
    Some(rest.split_once(end).map_or(rest, |(inner, _)| inner))
}

fn render_date(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => NOT_AVAILABLE.to_string(),
        Some(Value::String(s)) => parse_date(s)
            .map(|dt| dt.format(DATE_FORMAT).to_string())
            .unwrap_or_else(|| s.clone()),
        Some(other) => other.to_string(),
    }
}

fn parse_date(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc).naive_utc());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}
