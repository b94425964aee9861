//! Message dispatcher
//!
//! Single ingress point for raw bridge messages. Demultiplexes by message
//! type and forwards to one registered callback per type; all business
//! logic lives in the callbacks.

use crate::{BridgeMessage, UnreadSnapshot};

type HoverCallback = Box<dyn Fn(&str) + Send + Sync>;
type UnreadCallback = Box<dyn Fn(&UnreadSnapshot) + Send + Sync>;
type MessageIdCallback = Box<dyn Fn(&str) + Send + Sync>;

/// Routes parsed bridge messages to typed callbacks
#[derive(Default)]
pub struct BridgeDispatcher {
    on_link_hover: Option<HoverCallback>,
    on_unread_count: Option<UnreadCallback>,
    on_message_id: Option<MessageIdCallback>,
}

impl BridgeDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called with the hovered URL, or "" when no link is hovered
    pub fn set_on_link_hover(&mut self, callback: impl Fn(&str) + Send + Sync + 'static) {
        self.on_link_hover = Some(Box::new(callback));
    }

    /// Called with each unread snapshot reported by the page
    pub fn set_on_unread_count(
        &mut self,
        callback: impl Fn(&UnreadSnapshot) + Send + Sync + 'static,
    ) {
        self.on_unread_count = Some(Box::new(callback));
    }

    /// Called with the Message-ID extracted from the page
    pub fn set_on_message_id(&mut self, callback: impl Fn(&str) + Send + Sync + 'static) {
        self.on_message_id = Some(Box::new(callback));
    }

    /// Parse and route one raw message. Unknown or malformed messages
    /// invoke nothing.
    pub fn dispatch(&self, raw: &str) {
        let Some(message) = BridgeMessage::parse(raw) else {
            return;
        };
        match message {
            BridgeMessage::LinkHover(hover) => {
                if let Some(callback) = &self.on_link_hover {
                    callback(&hover.url);
                }
            }
            BridgeMessage::UnreadCount(snapshot) => {
                if let Some(callback) = &self.on_unread_count {
                    callback(&snapshot);
                }
            }
            BridgeMessage::MessageId(event) => {
                if let Some(callback) = &self.on_message_id {
                    callback(&event.value);
                }
            }
        }
    }
}
