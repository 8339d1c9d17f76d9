//! Event handling and state transition logic.
//!
//! This module implements the core event handler that processes user input and
//! host events, translating them into state changes and action sequences. It is
//! the only place where the search session, the modal and the toast stack are
//! driven from.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the plugin runtime (keys, mouse, web responses, timers)
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `AppState` and `SearchSession` methods
//! 4. Actions are collected and returned for execution
//!
//! # Event Types
//!
//! - **Search bar**: `Char`, `Backspace`, `FocusSearch`, `SubmitSearch`, `Escape`
//! - **Grid**: `MoveLeft`, `MoveRight`, `MoveUp`, `MoveDown`, `OpenSelected`, `LoadMore`
//! - **Modal**: `ClickAt`, `OpenExternal` (and `Escape` through its key subscription)
//! - **System**: `PageFetched`, `Tick`, `PermissionsResult`, `CloseFocus`
//!
//! # Example
//!
//! ```rust
//! use pixgrid::app::{AppState, Event, handle_event};
//! use pixgrid::ui::theme::Theme;
//!
//! let mut state = AppState::new(Default::default(), Theme::default());
//! let (should_render, _actions) = handle_event(&mut state, &Event::Char('c'))?;
//! assert!(should_render);
//! # Ok::<(), pixgrid::GalleryError>(())
//! ```

use super::modes::InputMode;
use super::notifications::{NotificationKind, NotificationSink};
use super::overlay::KeyTarget;
use super::session::FetchRequest;
use crate::api::{FetchError, SearchPage, PAGE_SIZE};
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::ui::layout;

/// Message shown when the host refuses the permissions the plugin needs.
pub const PERMISSION_DENIED_MESSAGE: &str =
    "Web access was not granted. Searches will fail until the plugin is reloaded.";

/// Events triggered by user input or the plugin host.
///
/// Each event represents a discrete occurrence that may cause state changes
/// and action emissions. The event handler processes these sequentially,
/// ensuring deterministic state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Appends a character to the draft query (search mode only).
    Char(char),
    /// Removes the last character from the draft query (search mode only).
    Backspace,
    /// Moves keyboard focus into the search bar.
    FocusSearch,
    /// Submits the draft query.
    SubmitSearch,
    /// Routed to the topmost key listener, otherwise leaves the search bar.
    Escape,

    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,

    /// Opens the modal for the selected tile.
    OpenSelected,
    /// Requests the next page when more results are available.
    LoadMore,
    /// Opens the full-size image of the mounted modal on the host.
    OpenExternal,
    /// Removes the newest toast.
    DismissNotification,

    /// Left click at 1-indexed terminal cell `(line, col)`.
    ///
    /// Outside a mounted modal it closes the modal; on a tile it opens that tile.
    ClickAt {
        line: usize,
        col: usize,
    },

    /// Completion of a page request issued through [`Action::FetchPage`].
    PageFetched {
        /// Generation id echoed back from the request.
        request_id: u64,
        /// Normalized page or the failure that prevented it.
        outcome: std::result::Result<SearchPage, FetchError>,
    },

    /// Toast expiry timer fired.
    Tick,

    /// Reports whether the host granted the requested permissions.
    PermissionsResult {
        granted: bool,
    },

    /// Closes the floating pane and hides the plugin UI.
    CloseFocus,
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// Returns whether the UI needs a re-render together with the actions to run
/// in order. Whenever toasts are on screen and no expiry tick is pending, an
/// [`Action::ScheduleTick`] timed to the oldest toast's expiry is appended.
///
/// # Errors
///
/// Currently every event is handled infallibly; the `Result` keeps the
/// signature stable for handlers that touch the host.
///
/// # Tracing
///
/// Each call creates a debug-level span with the event type.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    let (should_render, mut actions) = match event {
        Event::Char(c) => {
            if state.input_mode != InputMode::Search {
                return Ok((false, vec![]));
            }
            state.search_input.push(*c);
            tracing::trace!(query = %state.search_input, char = %c, "search input updated");
            (true, vec![])
        }
        Event::Backspace => {
            if state.input_mode != InputMode::Search {
                return Ok((false, vec![]));
            }
            state.search_input.pop();
            (true, vec![])
        }
        Event::FocusSearch => {
            state.input_mode = InputMode::Search;
            (true, vec![])
        }
        Event::SubmitSearch => {
            let draft = state.search_input.clone();
            match state.session.submit_query(&draft, &mut state.toasts) {
                Some(request) => {
                    state.selected_index = 0;
                    state.input_mode = InputMode::Normal;
                    (true, issue_fetch(state, &request))
                }
                None => {
                    if !draft.trim().is_empty() {
                        state.input_mode = InputMode::Normal;
                    }
                    state.search_input = state.session.query().to_string();
                    (true, vec![])
                }
            }
        }
        Event::Escape => match state.key_listeners.topmost() {
            Some(KeyTarget::Modal) => (state.close_modal(), vec![]),
            None if state.input_mode == InputMode::Search => {
                tracing::debug!(draft = %state.search_input, "leaving search bar");
                state.input_mode = InputMode::Normal;
                state.search_input = state.session.query().to_string();
                (true, vec![])
            }
            None => (false, vec![]),
        },
        Event::MoveLeft | Event::MoveRight | Event::MoveUp | Event::MoveDown
            if state.modal.is_some() =>
        {
            (false, vec![])
        }
        Event::MoveLeft => (state.move_selection(0, -1), vec![]),
        Event::MoveRight => (state.move_selection(0, 1), vec![]),
        Event::MoveUp => (state.move_selection(-1, 0), vec![]),
        Event::MoveDown => (state.move_selection(1, 0), vec![]),
        Event::OpenSelected => match state.selected_image().cloned() {
            Some(image) => {
                state.open_modal(image);
                (true, vec![])
            }
            None => (false, vec![]),
        },
        Event::LoadMore => {
            if state.session.can_load_more() {
                let request = state.session.load_more();
                (true, issue_fetch(state, &request))
            } else {
                tracing::debug!(status = ?state.session.status(), "no more pages to load");
                (false, vec![])
            }
        }
        Event::OpenExternal => state.modal.as_ref().map_or_else(
            || (false, vec![]),
            |modal| {
                tracing::debug!(url = %modal.image.full_size_url, "opening full-size image");
                (
                    false,
                    vec![Action::OpenUrl {
                        command: state.open_command.clone(),
                        url: modal.image.full_size_url.clone(),
                    }],
                )
            },
        ),
        Event::DismissNotification => (state.toasts.dismiss_latest(), vec![]),
        Event::ClickAt { line, col } => (handle_click(state, *line, *col), vec![]),
        Event::PageFetched {
            request_id,
            outcome,
        } => {
            let applied =
                state
                    .session
                    .complete_fetch(*request_id, outcome.clone(), &mut state.toasts);
            if applied {
                state.clamp_selection();
            }
            (applied, vec![])
        }
        Event::Tick => {
            state.tick_scheduled = false;
            (state.toasts.expire(chrono::Utc::now()), vec![])
        }
        Event::PermissionsResult { granted } => {
            if *granted {
                (false, vec![])
            } else {
                tracing::warn!("permissions denied by host");
                state
                    .toasts
                    .notify(PERMISSION_DENIED_MESSAGE, NotificationKind::Error);
                (true, vec![])
            }
        }
        Event::CloseFocus => return Ok((false, vec![Action::CloseFocus])),
    };

    if !state.tick_scheduled {
        if let Some(secs) = state.toasts.next_expiry_secs(chrono::Utc::now()) {
            state.tick_scheduled = true;
            actions.push(Action::ScheduleTick(secs));
        }
    }

    Ok((should_render, actions))
}

/// Turns a session fetch request into a `FetchPage` action.
///
/// When no URL can be built the request completes immediately with the error,
/// so the session never stays pending.
fn issue_fetch(state: &mut AppState, request: &FetchRequest) -> Vec<Action> {
    match state
        .endpoint
        .page_url(&request.query, request.page, PAGE_SIZE)
    {
        Ok(url) => vec![Action::FetchPage {
            url,
            request_id: request.request_id,
        }],
        Err(e) => {
            tracing::warn!(error = %e, "cannot build search request");
            state
                .session
                .complete_fetch(request.request_id, Err(e), &mut state.toasts);
            vec![]
        }
    }
}

/// Applies a left click. Returns `true` if anything changed.
fn handle_click(state: &mut AppState, line: usize, col: usize) -> bool {
    let (rows, cols) = state.viewport;

    if state.modal.is_some() {
        if layout::modal_rect(rows, cols).contains(line, col) {
            return false;
        }
        return state.close_modal();
    }

    let columns = layout::grid_columns(cols);
    let start = state.window_start(rows, cols);

    for tile_row in 0..layout::visible_tile_rows(rows) {
        for tile_col in 0..columns {
            if !layout::tile_rect(tile_row, tile_col).contains(line, col) {
                continue;
            }
            let index = start + tile_row * columns + tile_col;
            let Some(image) = state.session.results().get(index).cloned() else {
                return false;
            };
            state.selected_index = index;
            state.open_modal(image);
            return true;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::SearchEndpoint;
    use crate::app::session::{RequestStatus, NO_RESULTS_MESSAGE};
    use crate::domain::ImageRecord;
    use crate::ui::theme::Theme;

    fn state() -> AppState {
        AppState::new(
            SearchEndpoint::new("https://pixabay.com/api/", Some("test-key".to_string())),
            Theme::default(),
        )
    }

    fn image(id: u64) -> ImageRecord {
        ImageRecord {
            id,
            thumbnail_url: format!("https://cdn.example/{id}_640.jpg"),
            full_size_url: format!("https://cdn.example/{id}_1280.jpg"),
            tags: "cat, pet".to_string(),
            width: 640,
            height: 480,
            user: "ann".to_string(),
        }
    }

    fn page(ids: std::ops::Range<u64>, total: u32) -> SearchPage {
        SearchPage {
            records: ids.map(image).collect(),
            total_available: total,
        }
    }

    fn type_query(state: &mut AppState, text: &str) {
        for c in text.chars() {
            handle_event(state, &Event::Char(c)).unwrap();
        }
    }

    fn fetch_id(actions: &[Action]) -> u64 {
        actions
            .iter()
            .find_map(|action| match action {
                Action::FetchPage { request_id, .. } => Some(*request_id),
                _ => None,
            })
            .expect("expected a fetch action")
    }

    #[test]
    fn test_search_resolves_first_page() {
        let mut state = state();
        type_query(&mut state, "cats");

        let (render, actions) = handle_event(&mut state, &Event::SubmitSearch).unwrap();
        assert!(render);
        assert_eq!(state.session.status(), RequestStatus::Pending);
        assert_eq!(state.input_mode, InputMode::Normal);
        let Action::FetchPage { url, .. } = &actions[0] else {
            panic!("expected fetch, got {actions:?}");
        };
        assert!(url.contains("q=cats&page=1"));

        let request_id = fetch_id(&actions);
        let (render, actions) = handle_event(
            &mut state,
            &Event::PageFetched {
                request_id,
                outcome: Ok(page(0..12, 500)),
            },
        )
        .unwrap();

        assert!(render);
        assert_eq!(state.session.results().len(), 12);
        assert_eq!(state.session.status(), RequestStatus::Resolved);
        assert!(state.session.can_load_more());
        assert_eq!(
            state.toasts.iter().last().map(|t| t.message.as_str()),
            Some("Hooray! We found 500 images.")
        );
        assert!(
            matches!(actions.as_slice(), [Action::ScheduleTick(secs)] if *secs > 3.9 && *secs <= 4.0),
            "{actions:?}"
        );
    }

    #[test]
    fn test_load_more_appends_and_stops_at_total() {
        let mut state = state();
        type_query(&mut state, "cats");
        let (_, actions) = handle_event(&mut state, &Event::SubmitSearch).unwrap();
        handle_event(
            &mut state,
            &Event::PageFetched {
                request_id: fetch_id(&actions),
                outcome: Ok(page(0..12, 20)),
            },
        )
        .unwrap();

        let (_, actions) = handle_event(&mut state, &Event::LoadMore).unwrap();
        assert!(matches!(&actions[0], Action::FetchPage { url, .. } if url.ends_with("page=2")));
        handle_event(
            &mut state,
            &Event::PageFetched {
                request_id: fetch_id(&actions),
                outcome: Ok(page(12..24, 20)),
            },
        )
        .unwrap();

        assert_eq!(state.session.results().len(), 20);
        assert!(!state.session.can_load_more());

        let (render, actions) = handle_event(&mut state, &Event::LoadMore).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
    }

    #[test]
    fn test_load_more_ignored_while_pending() {
        let mut state = state();
        type_query(&mut state, "cats");
        handle_event(&mut state, &Event::SubmitSearch).unwrap();

        let (render, actions) = handle_event(&mut state, &Event::LoadMore).unwrap();
        assert!(!render);
        assert!(!actions.iter().any(|a| matches!(a, Action::FetchPage { .. })));
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut state = state();
        type_query(&mut state, "cats");
        let (_, first) = handle_event(&mut state, &Event::SubmitSearch).unwrap();

        handle_event(&mut state, &Event::FocusSearch).unwrap();
        state.search_input.clear();
        type_query(&mut state, "dogs");
        let (_, second) = handle_event(&mut state, &Event::SubmitSearch).unwrap();

        let (render, _) = handle_event(
            &mut state,
            &Event::PageFetched {
                request_id: fetch_id(&first),
                outcome: Ok(page(0..12, 100)),
            },
        )
        .unwrap();
        assert!(!render);
        assert!(state.session.results().is_empty());
        assert_eq!(state.session.status(), RequestStatus::Pending);

        handle_event(
            &mut state,
            &Event::PageFetched {
                request_id: fetch_id(&second),
                outcome: Ok(page(100..103, 3)),
            },
        )
        .unwrap();
        assert_eq!(state.session.results()[0].id, 100);
        assert_eq!(state.session.query(), "dogs");
    }

    #[test]
    fn test_blank_query_notifies_and_keeps_focus() {
        let mut state = state();
        type_query(&mut state, "   ");

        let (_, actions) = handle_event(&mut state, &Event::SubmitSearch).unwrap();
        assert!(!actions.iter().any(|a| matches!(a, Action::FetchPage { .. })));
        assert_eq!(state.input_mode, InputMode::Search);
        assert_eq!(state.toasts.len(), 1);
    }

    #[test]
    fn test_resubmitting_same_query_is_noop() {
        let mut state = state();
        type_query(&mut state, "cats");
        handle_event(&mut state, &Event::SubmitSearch).unwrap();
        let request_id = state.session.request_id();

        handle_event(&mut state, &Event::FocusSearch).unwrap();
        type_query(&mut state, " ");
        let (_, actions) = handle_event(&mut state, &Event::SubmitSearch).unwrap();

        assert_eq!(state.session.request_id(), request_id);
        assert!(!actions.iter().any(|a| matches!(a, Action::FetchPage { .. })));
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_missing_api_key_rejects_without_request() {
        let mut state = AppState::new(SearchEndpoint::default(), Theme::default());
        type_query(&mut state, "cats");

        let (_, actions) = handle_event(&mut state, &Event::SubmitSearch).unwrap();
        assert!(!actions.iter().any(|a| matches!(a, Action::FetchPage { .. })));
        assert_eq!(state.session.status(), RequestStatus::Rejected);
        assert_eq!(
            state.toasts.iter().last().map(|t| t.message.clone()),
            Some(FetchError::MissingApiKey.to_string())
        );
    }

    #[test]
    fn test_failed_fetch_notifies_error() {
        let mut state = state();
        type_query(&mut state, "cats");
        let (_, actions) = handle_event(&mut state, &Event::SubmitSearch).unwrap();

        handle_event(
            &mut state,
            &Event::PageFetched {
                request_id: fetch_id(&actions),
                outcome: Err(FetchError::status(500, b"")),
            },
        )
        .unwrap();

        assert_eq!(state.session.status(), RequestStatus::Rejected);
        let last = state.toasts.iter().last().unwrap();
        assert_eq!(last.kind, NotificationKind::Error);
        assert!(last.message.contains("500"));
    }

    #[test]
    fn test_empty_page_reports_no_results() {
        let mut state = state();
        type_query(&mut state, "zzqx");
        let (_, actions) = handle_event(&mut state, &Event::SubmitSearch).unwrap();

        handle_event(
            &mut state,
            &Event::PageFetched {
                request_id: fetch_id(&actions),
                outcome: Ok(SearchPage::default()),
            },
        )
        .unwrap();

        assert_eq!(state.session.status(), RequestStatus::Rejected);
        assert_eq!(
            state.toasts.iter().last().map(|t| t.message.as_str()),
            Some(NO_RESULTS_MESSAGE)
        );
    }

    #[test]
    fn test_escape_closes_modal_exactly_once() {
        let mut state = state();
        type_query(&mut state, "cats");
        let (_, actions) = handle_event(&mut state, &Event::SubmitSearch).unwrap();
        handle_event(
            &mut state,
            &Event::PageFetched {
                request_id: fetch_id(&actions),
                outcome: Ok(page(0..3, 3)),
            },
        )
        .unwrap();

        handle_event(&mut state, &Event::OpenSelected).unwrap();
        assert!(state.modal.is_some());
        assert_eq!(state.key_listeners.len(), 1);

        let (render, _) = handle_event(&mut state, &Event::Escape).unwrap();
        assert!(render);
        assert!(state.modal.is_none());
        assert!(state.key_listeners.is_empty());

        let toasts_before = state.toasts.len();
        let (render, actions) = handle_event(&mut state, &Event::Escape).unwrap();
        assert!(!render);
        assert!(!actions.iter().any(|a| matches!(a, Action::CloseFocus)));
        assert_eq!(state.toasts.len(), toasts_before);
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_escape_in_search_restores_active_query() {
        let mut state = state();
        type_query(&mut state, "cats");
        handle_event(&mut state, &Event::SubmitSearch).unwrap();

        handle_event(&mut state, &Event::FocusSearch).unwrap();
        type_query(&mut state, " and dogs");
        handle_event(&mut state, &Event::Escape).unwrap();

        assert_eq!(state.search_input, "cats");
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_click_outside_modal_closes_it() {
        let mut state = state();
        state.viewport = (24, 80);
        state.open_modal(image(7));

        let (render, _) = handle_event(&mut state, &Event::ClickAt { line: 12, col: 40 }).unwrap();
        assert!(!render);
        assert!(state.modal.is_some());

        let (render, _) = handle_event(&mut state, &Event::ClickAt { line: 1, col: 1 }).unwrap();
        assert!(render);
        assert!(state.modal.is_none());
        assert!(state.key_listeners.is_empty());
    }

    #[test]
    fn test_click_on_tile_opens_modal() {
        let mut state = state();
        state.viewport = (24, 80);
        type_query(&mut state, "cats");
        let (_, actions) = handle_event(&mut state, &Event::SubmitSearch).unwrap();
        handle_event(
            &mut state,
            &Event::PageFetched {
                request_id: fetch_id(&actions),
                outcome: Ok(page(0..6, 6)),
            },
        )
        .unwrap();

        let rect = layout::tile_rect(1, 1);
        let (render, _) = handle_event(
            &mut state,
            &Event::ClickAt {
                line: rect.row + 1,
                col: rect.col + 2,
            },
        )
        .unwrap();

        assert!(render);
        assert_eq!(state.selected_index, 4);
        assert_eq!(state.modal.as_ref().map(|m| m.image.id), Some(4));
    }

    #[test]
    fn test_open_external_uses_configured_command() {
        let mut state = state();
        state.open_command = "open".to_string();

        let (_, actions) = handle_event(&mut state, &Event::OpenExternal).unwrap();
        assert!(actions.is_empty());

        state.open_modal(image(3));
        let (_, actions) = handle_event(&mut state, &Event::OpenExternal).unwrap();
        assert_eq!(
            actions,
            vec![Action::OpenUrl {
                command: "open".to_string(),
                url: "https://cdn.example/3_1280.jpg".to_string(),
            }]
        );
    }

    #[test]
    fn test_tick_expires_toasts_and_reschedules() {
        let mut state = state();
        let old = chrono::Utc::now() - chrono::Duration::seconds(60);
        state.toasts.push_at("old", NotificationKind::Info, old);
        state.tick_scheduled = true;

        let (render, actions) = handle_event(&mut state, &Event::Tick).unwrap();
        assert!(render);
        assert!(state.toasts.is_empty());
        assert!(actions.is_empty());
        assert!(!state.tick_scheduled);
    }

    #[test]
    fn test_tick_reschedules_for_younger_toast() {
        let mut state = state();
        let now = chrono::Utc::now();
        state
            .toasts
            .push_at("first", NotificationKind::Info, now - chrono::Duration::seconds(4));
        state.toasts.push_at(
            "second",
            NotificationKind::Info,
            now - chrono::Duration::milliseconds(3900),
        );
        state.tick_scheduled = true;

        let (render, actions) = handle_event(&mut state, &Event::Tick).unwrap();

        assert!(render);
        let messages: Vec<&str> = state.toasts.iter().map(|t| t.message.as_str()).collect();
        assert_eq!(messages, vec!["second"]);
        assert!(
            matches!(actions.as_slice(), [Action::ScheduleTick(secs)] if *secs <= 0.1),
            "{actions:?}"
        );
        assert!(state.tick_scheduled);
    }

    #[test]
    fn test_tick_scheduled_once_while_toasts_visible() {
        let mut state = state();
        let (_, first) = handle_event(&mut state, &Event::PermissionsResult { granted: false }).unwrap();
        let (_, second) = handle_event(&mut state, &Event::DismissNotification).unwrap();

        assert!(matches!(first.as_slice(), [Action::ScheduleTick(_)]), "{first:?}");
        assert!(second.is_empty());
        assert!(state.toasts.is_empty());
    }

    #[test]
    fn test_selection_frozen_while_modal_open() {
        let mut state = state();
        type_query(&mut state, "cats");
        let (_, actions) = handle_event(&mut state, &Event::SubmitSearch).unwrap();
        handle_event(
            &mut state,
            &Event::PageFetched {
                request_id: fetch_id(&actions),
                outcome: Ok(page(0..9, 9)),
            },
        )
        .unwrap();
        handle_event(&mut state, &Event::OpenSelected).unwrap();

        let (render, _) = handle_event(&mut state, &Event::MoveDown).unwrap();
        assert!(!render);
        assert_eq!(state.selected_index, 0);
        assert_eq!(state.modal.as_ref().map(|m| m.image.id), Some(0));

        handle_event(&mut state, &Event::Escape).unwrap();
        handle_event(&mut state, &Event::MoveDown).unwrap();
        assert_eq!(state.selected_index, 3);
    }

    #[test]
    fn test_typing_ignored_outside_search_mode() {
        let mut state = state();
        state.input_mode = InputMode::Normal;

        let (render, _) = handle_event(&mut state, &Event::Char('x')).unwrap();
        assert!(!render);
        assert!(state.search_input.is_empty());
    }
}
