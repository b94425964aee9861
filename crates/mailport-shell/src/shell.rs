//! Shell runtime
//!
//! A command/event loop between the native window and the embedded page.
//! The window forwards raw bridge messages and user actions as commands;
//! the shell answers with scripts to inject, status text, and state
//! changes to apply natively.

use crate::{clipboard, Debouncer, LinkPreview};
use mailport_bridge::{scripts, BridgeDispatcher, BridgeMessage, HoverEvent, MessageIdEvent};
use mailport_core::{session_expired, AppSettings, MailtoParams, SettingsStore};
use mailport_notify::NotificationService;
use mailport_resolver::LinkResolve;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};
use url::Url;

/// Debounce window for host-forwarded mutation bursts, matching the
/// page-side observer.
const DEBOUNCE_QUIET: Duration = Duration::from_millis(1500);

/// Interval of the host-driven unread poll. Duplicates the page's own
/// interval because page timers are throttled while the window is hidden.
const POLL_INTERVAL: Duration = Duration::from_secs(30);

const ZOOM_MIN: f64 = 0.5;
const ZOOM_MAX: f64 = 3.0;
const ZOOM_STEP: f64 = 0.1;

/// Commands sent from the window to the shell
#[derive(Debug, Clone)]
pub enum ShellCommand {
    /// A raw message posted by the page to the bridge handler
    BridgeRaw(String),
    /// A navigation finished at this URL
    PageLoaded { url: String },
    /// A DOM mutation burst was observed natively; debounce then re-read
    MutationBurst,
    SetZoom(f64),
    ZoomIn,
    ZoomOut,
    ZoomReset,
    /// Open the compose screen, prefilled from a mailto: URL
    OpenCompose(MailtoParams),
    FindInPage(String),
    ClearSelection,
    /// Stop the shell
    Shutdown,
}

/// Events sent from the shell to the window
#[derive(Debug, Clone, PartialEq)]
pub enum ShellEvent {
    /// Evaluate this script in the page
    InjectScript(String),
    /// Show this text in the status bar; None clears it
    StatusText(Option<String>),
    /// The unread count changed; update badge/dock
    UnreadChanged(u32),
    /// Apply this zoom factor to the webview
    ZoomChanged(f64),
    /// A Message-ID was copied to the clipboard
    MessageIdCopied(String),
    /// The page landed back on the login screen
    SessionExpired,
}

/// Shell runtime that runs in a background tokio task
pub struct Shell<R> {
    resolver: Arc<R>,
    notifications: NotificationService,
    settings_store: SettingsStore,
    settings: AppSettings,
    event_tx: mpsc::Sender<ShellEvent>,
    poll_interval: Duration,
}

impl<R: LinkResolve + 'static> Shell<R> {
    /// Create a new shell; settings load once, a corrupt file degrades to
    /// defaults.
    pub fn new(
        resolver: Arc<R>,
        notifications: NotificationService,
        settings_store: SettingsStore,
        event_tx: mpsc::Sender<ShellEvent>,
    ) -> Self {
        let settings = settings_store.load().unwrap_or_else(|e| {
            warn!("Failed to load settings, using defaults: {}", e);
            AppSettings::default()
        });
        Self {
            resolver,
            notifications,
            settings_store,
            settings,
            event_tx,
            poll_interval: POLL_INTERVAL,
        }
    }

    /// Override the host poll interval
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Run the shell loop until Shutdown or command-channel close.
    pub async fn run(mut self, mut command_rx: mpsc::Receiver<ShellCommand>) {
        info!("Shell started");

        // Bridge callbacks forward into the loop as parsed messages
        let (bridge_tx, mut bridge_rx) = mpsc::unbounded_channel::<BridgeMessage>();
        let mut dispatcher = BridgeDispatcher::new();
        let tx = bridge_tx.clone();
        dispatcher.set_on_link_hover(move |link_url| {
            let _ = tx.send(BridgeMessage::LinkHover(HoverEvent {
                url: link_url.to_string(),
            }));
        });
        let tx = bridge_tx.clone();
        dispatcher.set_on_unread_count(move |snapshot| {
            let _ = tx.send(BridgeMessage::UnreadCount(snapshot.clone()));
        });
        let tx = bridge_tx.clone();
        dispatcher.set_on_message_id(move |value| {
            let _ = tx.send(BridgeMessage::MessageId(MessageIdEvent {
                value: value.to_string(),
            }));
        });
        drop(bridge_tx);

        let (preview, mut status_rx) = LinkPreview::new(Arc::clone(&self.resolver));
        let (debouncer, mut debounce_fired) = Debouncer::spawn(DEBOUNCE_QUIET);

        let mut poll = tokio::time::interval_at(
            tokio::time::Instant::now() + self.poll_interval,
            self.poll_interval,
        );
        poll.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                command = command_rx.recv() => {
                    match command {
                        None | Some(ShellCommand::Shutdown) => break,
                        Some(command) => {
                            self.handle_command(command, &dispatcher, &debouncer).await;
                        }
                    }
                }
                Some(message) = bridge_rx.recv() => {
                    self.handle_bridge(message, &preview).await;
                }
                Some(status) = status_rx.recv() => {
                    self.emit(ShellEvent::StatusText(status)).await;
                }
                Some(()) = debounce_fired.recv() => {
                    debug!("Mutation burst settled, polling unread state");
                    self.emit(ShellEvent::InjectScript(scripts::UNREAD_POLL.to_string()))
                        .await;
                }
                _ = poll.tick() => {
                    self.emit(ShellEvent::InjectScript(scripts::UNREAD_POLL.to_string()))
                        .await;
                }
            }
        }

        info!("Shell stopped");
    }

    async fn handle_command(
        &mut self,
        command: ShellCommand,
        dispatcher: &BridgeDispatcher,
        debouncer: &Debouncer,
    ) {
        match command {
            ShellCommand::BridgeRaw(raw) => dispatcher.dispatch(&raw),
            ShellCommand::PageLoaded { url } => self.on_page_loaded(&url).await,
            ShellCommand::MutationBurst => debouncer.trigger(),
            ShellCommand::SetZoom(level) => self.set_zoom(level).await,
            ShellCommand::ZoomIn => {
                self.set_zoom(self.settings.effective_zoom() + ZOOM_STEP).await
            }
            ShellCommand::ZoomOut => {
                self.set_zoom(self.settings.effective_zoom() - ZOOM_STEP).await
            }
            ShellCommand::ZoomReset => self.set_zoom(1.0).await,
            ShellCommand::OpenCompose(params) => {
                self.emit(ShellEvent::InjectScript(scripts::open_compose(&params)))
                    .await;
            }
            ShellCommand::FindInPage(query) => {
                self.emit(ShellEvent::InjectScript(scripts::find_in_page(&query)))
                    .await;
            }
            ShellCommand::ClearSelection => {
                self.emit(ShellEvent::InjectScript(scripts::clear_selection()))
                    .await;
            }
            // Consumed by the run loop
            ShellCommand::Shutdown => {}
        }
    }

    /// Re-install page scripts and custom CSS/JS after each navigation,
    /// restore zoom, and detect an expired session.
    async fn on_page_loaded(&mut self, url: &str) {
        self.emit(ShellEvent::InjectScript(scripts::LINK_HOVER.to_string()))
            .await;
        self.emit(ShellEvent::InjectScript(scripts::UNREAD_OBSERVER.to_string()))
            .await;
        if !self.settings.custom_css.is_empty() {
            self.emit(ShellEvent::InjectScript(scripts::inject_css(
                &self.settings.custom_css,
            )))
            .await;
        }
        if !self.settings.custom_js.is_empty() {
            self.emit(ShellEvent::InjectScript(self.settings.custom_js.clone()))
                .await;
        }
        self.emit(ShellEvent::ZoomChanged(self.settings.effective_zoom()))
            .await;

        if let Ok(parsed) = Url::parse(url) {
            if session_expired(&parsed) {
                debug!("Session expired at {}", url);
                self.emit(ShellEvent::SessionExpired).await;
            }
        }
    }

    async fn handle_bridge(&mut self, message: BridgeMessage, preview: &LinkPreview<R>) {
        match message {
            BridgeMessage::LinkHover(hover) => preview.hover(&hover.url),
            BridgeMessage::UnreadCount(snapshot) => {
                self.emit(ShellEvent::UnreadChanged(snapshot.count)).await;
                self.notifications
                    .on_snapshot(
                        &snapshot,
                        self.settings.notifications_enabled,
                        &self.settings.notification_sound,
                    )
                    .await;
            }
            BridgeMessage::MessageId(event) => {
                clipboard::copy_to_clipboard(&event.value);
                self.emit(ShellEvent::MessageIdCopied(event.value)).await;
            }
        }
    }

    async fn set_zoom(&mut self, level: f64) {
        let level = level.clamp(ZOOM_MIN, ZOOM_MAX);
        self.settings.zoom_level = level;
        if let Err(e) = self.settings_store.save(&self.settings) {
            warn!("Failed to persist zoom level: {}", e);
        }
        self.emit(ShellEvent::ZoomChanged(level)).await;
    }

    async fn emit(&self, event: ShellEvent) {
        let _ = self.event_tx.send(event).await;
    }
}
