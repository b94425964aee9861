//! Bridge between the embedded mailbox.org page and the host shell
//!
//! The page side posts flat JSON messages to the `mailport` message
//! handler; this crate parses them, routes them to typed callbacks, and
//! owns the scripts the host injects back into the page.

mod dispatcher;
mod message;
pub mod scripts;

pub use dispatcher::BridgeDispatcher;
pub use message::{BridgeMessage, HoverEvent, MessageIdEvent, UnreadSnapshot};
