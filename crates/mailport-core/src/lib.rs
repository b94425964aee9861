//! Core building blocks for Mailport
//!
//! Provides the settings store, navigation policy, mailto: parsing,
//! and the tracker blocklist model shared by the other crates.

mod blocklist;
mod constants;
mod error;
mod mailto;
mod navigation;
mod settings;

pub use blocklist::{BlockAction, BlockRule, BlockTrigger, Blocklist};
pub use constants::{APP_NAME, BASE_URL, HOST_SUFFIX, SERVICE_NAME};
pub use error::{CoreError, CoreResult};
pub use mailto::MailtoParams;
pub use navigation::{decide, response_decision, session_expired, Decision, NavigationKind};
pub use settings::{AppSettings, SettingsStore};
