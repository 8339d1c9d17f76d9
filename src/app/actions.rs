//! Actions representing side effects to be executed by the plugin runtime.
//!
//! This module defines the [`Action`] type, which represents imperative commands
//! produced by the event handler after processing user input or host events.
//! Actions bridge pure state transformations and effectful operations like web
//! requests, timers, and launching the image opener.
//!
//! # Architecture
//!
//! The event handler returns a `Vec<Action>` after processing each event, allowing
//! multiple side effects to be queued atomically. The plugin runtime executes
//! these actions in sequence.
//!
//! # Example
//!
//! ```rust
//! use pixgrid::app::Action;
//!
//! let actions = vec![
//!     Action::FetchPage { url: "https://pixabay.com/api/?q=cats".into(), request_id: 1 },
//!     Action::ScheduleTick(4.0),
//! ];
//! ```

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Closes the focused floating pane, hiding the plugin UI.
    CloseFocus,

    /// Issues a GET request for one page of search results.
    ///
    /// The runtime must echo `request_id` back in [`Event::PageFetched`] so
    /// stale responses can be recognized.
    ///
    /// [`Event::PageFetched`]: crate::app::Event::PageFetched
    FetchPage {
        /// Fully built request URL.
        url: String,
        /// Generation id of the request.
        request_id: u64,
    },

    /// Opens a URL with the configured opener command on the host.
    OpenUrl {
        /// Opener executable (e.g. `xdg-open`).
        command: String,
        /// URL to open.
        url: String,
    },

    /// Requests a `Tick` event after the given number of seconds.
    ///
    /// Used to expire toasts.
    ScheduleTick(f64),
}
