//! Zellij plugin wrapper and entry point.
//!
//! This module provides the thin integration layer between the Pixgrid library
//! and the Zellij plugin system. It implements the `ZellijPlugin` trait, maps
//! host events to library events and executes the resulting actions.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Subscribe**: Register for Key, Mouse, `WebRequestResult`, Timer events
//! 3. **Update**: Handle events, delegate to library layer
//! 4. **Render**: Record the viewport, call library render function
//!
//! # Web Requests
//!
//! Page fetches go through the host's `web_request`. The request id travels in
//! the request context and comes back with `WebRequestResult`, where the body
//! is decoded by [`parse_page`] into an [`Event::PageFetched`].
//!
//! # Keybindings
//!
//! In the search bar:
//! - Characters / `Backspace`: Edit the query
//! - `Enter`: Search
//! - `Esc`: Back to the grid
//!
//! In the grid:
//! - `h`/`j`/`k`/`l` or arrows: Move selection
//! - `Enter`: Open the selected image
//! - `m`: Load more
//! - `/`: Focus the search bar
//! - `x`: Dismiss the newest notification
//! - `q`: Close plugin
//!
//! With the modal open:
//! - `Esc` or click outside: Close
//! - `o`: Open the full-size image with the configured command

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use pixgrid::api::parse_page;
use pixgrid::{handle_event, Action, Config, Event, InputMode};

/// Context key carrying the request generation through `web_request`.
const REQUEST_ID_KEY: &str = "request_id";

register_plugin!(State);

/// Plugin state wrapper.
struct State {
    /// Core application state from library layer.
    app: pixgrid::app::AppState,
}

impl Default for State {
    fn default() -> Self {
        let default_config = Config::default();
        Self {
            app: pixgrid::initialize(&default_config),
        }
    }
}

impl ZellijPlugin for State {
    /// Initializes the plugin on load.
    ///
    /// # Permissions
    ///
    /// Requests:
    /// - `WebAccess`: Query the search endpoint
    /// - `RunCommands`: Launch the image opener on the host
    /// - `ReadApplicationState`: Receive mouse and timer events
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        pixgrid::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(endpoint = %config.endpoint, theme = ?config.theme_name, "parsed configuration");
        self.app = pixgrid::initialize(&config);

        request_permission(&[
            PermissionType::WebAccess,
            PermissionType::RunCommands,
            PermissionType::ReadApplicationState,
        ]);

        subscribe(&[
            EventType::Key,
            EventType::Mouse,
            EventType::WebRequestResult,
            EventType::Timer,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Handles incoming Zellij events.
    ///
    /// Returns `true` if the plugin UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span_name = format!("plugin_update::{event_name}");
        let span = tracing::debug_span!("plugin_update_event", otel.name = %span_name, event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::Mouse(mouse) => match self.map_mouse_event(mouse) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match Self::map_web_request_result(status, &body, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::Timer(_elapsed) => Event::Tick,
            zellij_tile::prelude::Event::PermissionRequestResult(status) => {
                Event::PermissionsResult {
                    granted: matches!(status, PermissionStatus::Granted),
                }
            }
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                for a in actions {
                    Self::execute_action(&a);
                }
                should_render
            }
            Err(e) => {
                tracing::error!(error = %e, "error handling event");
                false
            }
        }
    }

    /// Renders the plugin UI.
    ///
    /// The viewport is remembered so navigation and mouse hit-testing use the
    /// same geometry as the last frame.
    fn render(&mut self, rows: usize, cols: usize) {
        self.app.viewport = (rows, cols);
        pixgrid::ui::render(&self.app, rows, cols);
    }
}

impl State {
    /// Gets a string name for a Zellij event for logging purposes.
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::Mouse(..) => "Mouse".to_string(),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::Timer(..) => "Timer".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::trace!(bare_key = ?key.bare_key, "key event");

        if key.bare_key == BareKey::Char('c') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::CloseFocus);
        }

        if self.app.modal.is_some() {
            return match key.bare_key {
                BareKey::Esc => Some(Event::Escape),
                BareKey::Char('o') => Some(Event::OpenExternal),
                BareKey::Char('x') => Some(Event::DismissNotification),
                BareKey::Char('q') => Some(Event::CloseFocus),
                _ => None,
            };
        }

        Some(match self.app.input_mode {
            InputMode::Search => match key.bare_key {
                BareKey::Enter => Event::SubmitSearch,
                BareKey::Esc => Event::Escape,
                BareKey::Backspace => Event::Backspace,
                BareKey::Char(c) => Event::Char(c),
                _ => return None,
            },
            InputMode::Normal => match key.bare_key {
                BareKey::Left | BareKey::Char('h') => Event::MoveLeft,
                BareKey::Right | BareKey::Char('l') => Event::MoveRight,
                BareKey::Up | BareKey::Char('k') => Event::MoveUp,
                BareKey::Down | BareKey::Char('j') => Event::MoveDown,
                BareKey::Enter => Event::OpenSelected,
                BareKey::Char('m') => Event::LoadMore,
                BareKey::Char('/') => Event::FocusSearch,
                BareKey::Char('x') => Event::DismissNotification,
                BareKey::Char('q') => Event::CloseFocus,
                BareKey::Esc => Event::Escape,
                _ => return None,
            },
        })
    }

    /// Maps mouse events to application events.
    ///
    /// Zellij reports 0-based coordinates; the library uses 1-based cells.
    /// Scrolling is ignored while the modal covers the grid.
    fn map_mouse_event(&self, mouse: Mouse) -> Option<Event> {
        match mouse {
            Mouse::LeftClick(line, col) => {
                let line = usize::try_from(line).ok()?;
                Some(Event::ClickAt {
                    line: line + 1,
                    col: col + 1,
                })
            }
            Mouse::ScrollUp(_) if self.app.modal.is_none() => Some(Event::MoveUp),
            Mouse::ScrollDown(_) if self.app.modal.is_none() => Some(Event::MoveDown),
            _ => None,
        }
    }

    /// Maps a completed web request to a `PageFetched` event.
    ///
    /// Results without a request id in their context were not issued by this
    /// plugin and are ignored.
    fn map_web_request_result(
        status: u16,
        body: &[u8],
        context: &BTreeMap<String, String>,
    ) -> Option<Event> {
        let Some(request_id) = context
            .get(REQUEST_ID_KEY)
            .and_then(|id| id.parse::<u64>().ok())
        else {
            tracing::debug!(status = status, "ignoring web response without request id");
            return None;
        };

        tracing::debug!(
            request_id = request_id,
            status = status,
            body_len = body.len(),
            "web request completed"
        );

        Some(Event::PageFetched {
            request_id,
            outcome: parse_page(status, body),
        })
    }

    /// Executes an action returned from event handling.
    ///
    /// Translates library actions to Zellij API calls.
    #[tracing::instrument(level = "debug")]
    fn execute_action(action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::FetchPage { url, request_id } => {
                let mut headers = BTreeMap::new();
                headers.insert("Accept".to_string(), "application/json".to_string());

                let mut context = BTreeMap::new();
                context.insert(REQUEST_ID_KEY.to_string(), request_id.to_string());

                web_request(url, HttpVerb::Get, headers, vec![], context);
            }
            Action::OpenUrl { command, url } => {
                tracing::debug!(command = %command, url = %url, "opening url on host");
                run_command(&[command.as_str(), url.as_str()], BTreeMap::new());
            }
            Action::ScheduleTick(secs) => {
                set_timeout(*secs);
            }
        }
    }
}
