//! Pixgrid: a Zellij plugin for searching and browsing Pixabay images.
//!
//! Pixgrid is a terminal multiplexer plugin that provides:
//! - Keyword search against the Pixabay API with page-by-page "load more"
//! - A navigable grid of result tiles with query match highlighting
//! - A modal overlay with full-size image details, openable on the host
//! - Toast notifications for result counts and failures

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Search session and pagination                    │
//! │  - Event handling / action dispatching              │
//! │  - Modal overlay, notifications, view models        │
//! └─────────────────────────────────────────────────────┘
//!         │                                     │
//! ┌───────────────┐                     ┌───────────────┐
//! │ UI Layer      │                     │ API Layer     │
//! │ (ui/)         │                     │ (api/)        │
//! │ - Rendering   │                     │ - Request URL │
//! │ - Theming     │                     │ - JSON decode │
//! │ - Layout      │                     │ - Fetch errors│
//! └───────────────┘                     └───────────────┘
//!         │                                     │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Platform paths (infrastructure/)                 │
//! │  - Error types (domain/error)                       │
//! │  - Image model (domain/image)                       │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry tracing                            │
//! │  - File-based OTLP export                           │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/pixgrid.wasm" {
//!         api_key "<your pixabay key>"
//!         theme "catppuccin-mocha"
//!         open_command "xdg-open"
//!         toast_timeout "4"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Request Flow
//!
//! 1. `Enter` in the search bar submits the query to the [`app::SearchSession`]
//! 2. The handler turns the session's fetch request into [`Action::FetchPage`]
//! 3. The shim issues `web_request` with the request id in its context
//! 4. `WebRequestResult` is parsed by [`api::parse_page`] and fed back as
//!    [`Event::PageFetched`]; responses for superseded requests are dropped
//!
//! # Example
//!
//! ```rust
//! use pixgrid::{initialize, handle_event, Config, Event};
//!
//! let config = Config {
//!     api_key: Some("test-key".to_string()),
//!     ..Default::default()
//! };
//! let mut state = initialize(&config);
//!
//! for c in "cats".chars() {
//!     handle_event(&mut state, &Event::Char(c))?;
//! }
//! let (_render, actions) = handle_event(&mut state, &Event::SubmitSearch)?;
//! assert_eq!(actions.len(), 1);
//! # Ok::<(), pixgrid::GalleryError>(())
//! ```
//!
//! # Platform Support
//!
//! - **Target**: `wasm32-wasip1` (Zellij WASM runtime)
//! - **Terminal**: Any ANSI-capable terminal emulator

pub mod api;
pub mod app;
pub mod domain;
pub mod infrastructure;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode};
pub use domain::{GalleryError, ImageRecord, Result};
pub use ui::Theme;

use api::{SearchEndpoint, DEFAULT_ENDPOINT};
use app::Toasts;
use std::collections::BTreeMap;

const DEFAULT_OPEN_COMMAND: &str = "xdg-open";
const DEFAULT_TOAST_TIMEOUT_SECS: u32 = 4;

/// Plugin configuration parsed from Zellij's configuration system.
///
/// # Example
///
/// ```kdl
/// plugin location="file:/path/to/pixgrid.wasm" {
///     api_key "0123456789abcdef"
///     endpoint "https://pixabay.com/api/"
///     theme "catppuccin-latte"
///     theme_file "/path/to/theme.toml"
///     trace_level "debug"
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Pixabay API key. Searches fail with a notification while unset.
    pub api_key: Option<String>,

    /// Base URL of the search endpoint. Default: [`DEFAULT_ENDPOINT`]
    pub endpoint: String,

    /// Built-in theme name to use.
    ///
    /// Options: `catppuccin-mocha`, `catppuccin-latte`, `catppuccin-frappe`,
    /// `catppuccin-macchiato`. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file; `~` maps to the sandbox's `/host`.
    ///
    /// Takes precedence over `theme_name`. See [`ui::theme`] for format.
    pub theme_file: Option<String>,

    /// Tracing level for OpenTelemetry spans.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,

    /// Host command used to open full-size images. Default: `xdg-open`
    pub open_command: String,

    /// Seconds a toast stays on screen. Default: 4
    pub toast_timeout: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            theme_name: None,
            theme_file: None,
            trace_level: None,
            open_command: DEFAULT_OPEN_COMMAND.to_string(),
            toast_timeout: DEFAULT_TOAST_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// # Parsing Rules
    ///
    /// - `api_key`: trimmed; blank counts as unset
    /// - `endpoint`, `open_command`: blank values fall back to the defaults
    /// - `toast_timeout`: String → `u32` seconds (falls back to 4 on parse error or 0)
    /// - `theme`, `theme_file`, `trace_level`: taken as is
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use pixgrid::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("api_key".to_string(), "abc".to_string());
    /// map.insert("toast_timeout".to_string(), "7".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.api_key.as_deref(), Some("abc"));
    /// assert_eq!(config.toast_timeout, 7);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let non_blank = |key: &str| {
            config
                .get(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let toast_timeout = config
            .get("toast_timeout")
            .and_then(|s| s.trim().parse::<u32>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TOAST_TIMEOUT_SECS);

        Self {
            api_key: non_blank("api_key"),
            endpoint: non_blank("endpoint").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            theme_name: config.get("theme").cloned(),
            theme_file: config.get("theme_file").cloned(),
            trace_level: config.get("trace_level").cloned(),
            open_command: non_blank("open_command")
                .unwrap_or_else(|| DEFAULT_OPEN_COMMAND.to_string()),
            toast_timeout,
        }
    }

    /// Loads the configured theme: file first, then built-in name, then the default.
    ///
    /// Failures are logged and fall back to the default theme.
    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme_file.as_ref().map_or_else(
            || {
                self.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
                    Theme::from_name(theme_name).unwrap_or_else(|| {
                        let available: Vec<&str> = Theme::builtin_names().collect();
                        tracing::warn!(theme_name = %theme_name, available = ?available, "unknown theme, using default");
                        Theme::default()
                    })
                })
            },
            |theme_file| {
                Theme::from_file(infrastructure::expand_tilde(theme_file)).unwrap_or_else(|e| {
                    tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                    Theme::default()
                })
            },
        )
    }
}

/// Initializes the plugin state from configuration.
///
/// Creates a new `AppState` with the configured endpoint, theme, opener and
/// toast timeout. Nothing is fetched until the first query is submitted.
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(
        endpoint = %config.endpoint,
        has_api_key = config.api_key.is_some(),
        "initializing pixgrid plugin"
    );

    let endpoint = SearchEndpoint::new(config.endpoint.clone(), config.api_key.clone());
    if !endpoint.has_api_key() {
        tracing::warn!("no api_key configured; searches will fail");
    }

    let mut state = AppState::new(endpoint, config.theme());
    state.open_command.clone_from(&config.open_command);
    state.toasts = Toasts::new(chrono::Duration::seconds(i64::from(config.toast_timeout)));
    state
}
