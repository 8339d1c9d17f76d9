//! Application layer coordinating state, events, and actions.
//!
//! This module defines the core application logic layer, sitting between the
//! plugin runtime (main.rs) and the api/domain layers. It implements the
//! event-driven architecture that powers the interactive gallery.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └──────── Web Responses ───────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`modes`]: Input mode type
//! - [`notifications`]: Notification sink trait and the toast stack
//! - [`overlay`]: Modal overlay and scoped key listeners
//! - [`session`]: Search and pagination state machine
//! - [`state`]: Central application state container and view model computation
//!
//! # Example
//!
//! ```rust
//! use pixgrid::app::{AppState, Event, handle_event};
//! use pixgrid::ui::theme::Theme;
//!
//! let mut state = AppState::new(Default::default(), Theme::default());
//! let (_render, actions) = handle_event(&mut state, &Event::MoveDown)?;
//! assert!(actions.is_empty());
//! # Ok::<(), pixgrid::GalleryError>(())
//! ```

pub mod actions;
pub mod handler;
pub mod modes;
pub mod notifications;
pub mod overlay;
pub mod session;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::InputMode;
pub use notifications::{NotificationKind, NotificationSink, Toasts};
pub use overlay::{KeyListeners, Modal};
pub use session::{FetchRequest, RequestStatus, SearchSession};
pub use state::AppState;
