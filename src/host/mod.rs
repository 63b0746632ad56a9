//! Host surface integration.
//!
//! The navigator never opens links itself: it hands every URL to the host
//! surface it was given at startup. Which surface that is gets decided
//! once, at initialization, by [`select`]:
//!
//! - [`DesktopHost`] - structured link opening through the system opener,
//!   with an optional instant-view viewer command
//! - [`TtyHost`] - reduced surface for headless terminals; falls back to
//!   direct navigation by writing the URL to stdout
//!
//! Keeping the choice behind one trait means the navigation flow has a
//! single code path regardless of what the environment supports.

use std::io::Write;

use clap::ValueEnum;
use serde::Deserialize;
use thiserror::Error;

use crate::util::{self, UrlValidationError};

/// Errors that can occur handing a link to the host.
#[derive(Debug, Error)]
pub enum HostError {
    /// The URL was refused before reaching any opener.
    #[error("Refusing to open URL: {0}")]
    Rejected(#[from] UrlValidationError),
    /// The system opener or stdout write failed.
    #[error("Failed to open link: {0}")]
    Io(#[from] std::io::Error),
}

/// Display options for an opened link.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkOptions {
    /// Prefer an inline instant-view rendering when the host supports one.
    pub instant_view: bool,
}

/// The surface the navigator is embedded in.
pub trait Host: Send {
    /// Identifier for logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Startup handshake. Called once, before the first frame is drawn.
    fn ready(&self);

    /// Ask the host to dismiss the navigator's surface. Called before
    /// [`Host::open_link`] when a post is activated.
    fn close(&self);

    /// Navigate to `url`.
    fn open_link(&self, url: &str, options: LinkOptions) -> Result<(), HostError>;
}

/// How post links leave the navigator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OpenMode {
    /// Probe the environment and pick [`DesktopHost`] when an opener is
    /// likely to work, [`TtyHost`] otherwise.
    #[default]
    Auto,
    /// Always use the system opener.
    Browser,
    /// Always print URLs to stdout.
    Print,
}

/// Rich host: structured link opening through the system opener.
pub struct DesktopHost {
    /// Command to hand instant-view links to, when configured.
    viewer_command: Option<String>,
}

impl DesktopHost {
    pub fn new(viewer_command: Option<String>) -> Self {
        Self { viewer_command }
    }
}

impl Host for DesktopHost {
    fn name(&self) -> &'static str {
        "desktop"
    }

    fn ready(&self) {
        tracing::debug!(viewer = ?self.viewer_command, "Desktop host ready");
    }

    fn close(&self) {
        // A terminal window has no detachable surface to dismiss; the UI
        // loop tears down the alternate screen. Embedded hosts would close
        // their webview here.
        tracing::debug!("Host close requested");
    }

    fn open_link(&self, url: &str, options: LinkOptions) -> Result<(), HostError> {
        // Validate before open::that() so only http/https reaches the
        // system's protocol handlers.
        let url = util::validate_url(url)?;

        match &self.viewer_command {
            Some(viewer) if options.instant_view && !viewer.is_empty() => {
                tracing::info!(url = %url, viewer = %viewer, "Opening link in instant viewer");
                open::with(url.as_str(), viewer.as_str())?;
            }
            _ => {
                tracing::info!(url = %url, "Opening link in system handler");
                open::that(url.as_str())?;
            }
        }
        Ok(())
    }
}

/// Minimal host: no structured opener available.
///
/// Its `open_link` is the direct-navigation fallback: the URL is written
/// to stdout for the user to follow by hand. A reduced surface must never
/// make navigation silently fail.
pub struct TtyHost;

impl Host for TtyHost {
    fn name(&self) -> &'static str {
        "tty"
    }

    fn ready(&self) {
        tracing::debug!("Tty host ready");
    }

    fn close(&self) {
        tracing::debug!("Host close requested");
    }

    fn open_link(&self, url: &str, _options: LinkOptions) -> Result<(), HostError> {
        let url = util::validate_url(url)?;
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", url)?;
        stdout.flush()?;
        Ok(())
    }
}

/// Picks a host implementation at initialization.
///
/// `Browser` and `Print` pin an implementation; `Auto` probes the
/// environment. The rich host is preferred whenever the structured
/// capability is available.
pub fn select(mode: OpenMode, viewer_command: Option<String>) -> Box<dyn Host> {
    let host: Box<dyn Host> = if choose_rich(mode, opener_available()) {
        Box::new(DesktopHost::new(viewer_command))
    } else {
        Box::new(TtyHost)
    };
    tracing::info!(host = host.name(), ?mode, "Selected host");
    host
}

/// Pure selection policy, split out so it can be tested without touching
/// the process environment.
fn choose_rich(mode: OpenMode, opener_available: bool) -> bool {
    match mode {
        OpenMode::Browser => true,
        OpenMode::Print => false,
        OpenMode::Auto => opener_available,
    }
}

/// Capability probe for [`OpenMode::Auto`].
///
/// macOS and Windows always have a registered opener. On other Unixes a
/// graphical session or an explicit $BROWSER is the best signal available
/// without actually spawning anything.
fn opener_available() -> bool {
    if cfg!(target_os = "macos") || cfg!(windows) {
        return true;
    }
    std::env::var_os("DISPLAY").is_some()
        || std::env::var_os("WAYLAND_DISPLAY").is_some()
        || std::env::var_os("BROWSER").is_some()
}
