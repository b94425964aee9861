//! Page→host message model
//!
//! Messages are flat JSON objects with a `type` discriminant. Missing or
//! wrong-typed fields default to empty string / zero rather than failing
//! the dispatch; unknown types are dropped.

use serde_json::Value;

/// A link hover transition; an empty URL means "no link hovered"
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HoverEvent {
    pub url: String,
}

/// Current unread-mail count plus the newest unread message's metadata
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnreadSnapshot {
    pub count: u32,
    pub subject: String,
    pub from: String,
}

/// An RFC 5322 Message-ID extracted from the page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageIdEvent {
    pub value: String,
}

/// A parsed page→host message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeMessage {
    LinkHover(HoverEvent),
    UnreadCount(UnreadSnapshot),
    MessageId(MessageIdEvent),
}

impl BridgeMessage {
    /// Parse a raw message body. Returns None for malformed JSON, non-object
    /// bodies, a missing `type` field, or an unknown discriminant.
    pub fn parse(raw: &str) -> Option<Self> {
        let value: Value = match serde_json::from_str(raw) {
            Ok(v) => v,
            Err(e) => {
                tracing::debug!("Dropping malformed bridge message: {}", e);
                return None;
            }
        };
        let message_type = value.get("type")?.as_str()?;

        match message_type {
            "linkHover" => Some(BridgeMessage::LinkHover(HoverEvent {
                url: string_field(&value, "url"),
            })),
            "unreadCount" => Some(BridgeMessage::UnreadCount(UnreadSnapshot {
                count: count_field(&value, "count"),
                subject: string_field(&value, "subject"),
                from: string_field(&value, "from"),
            })),
            "messageId" => Some(BridgeMessage::MessageId(MessageIdEvent {
                value: string_field(&value, "value"),
            })),
            other => {
                tracing::debug!("Dropping bridge message of unknown type '{}'", other);
                None
            }
        }
    }
}

fn string_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn count_field(value: &Value, key: &str) -> u32 {
    value
        .get(key)
        .and_then(Value::as_i64)
        .map(|n| n.clamp(0, u32::MAX as i64) as u32)
        .unwrap_or(0)
}
