//! Connection panel for ws-echo.
//!
//! [`ConnectionPanel`] owns exactly one [`Transport`](echo_transport::Transport)
//! and mirrors it into three pieces of view state:
//!
//! - the status indicator, derived from the lifecycle events it has seen
//! - the append-only [`DisplayLog`] of sent and received messages
//! - the [`ComposeField`] the user types into
//!
//! Handlers run on whichever thread calls [`ConnectionPanel::pump`]; the
//! front end calls it from its event loop so every update happens on one
//! thread, in delivery order.
//!
//! # Example
//!
//! ```
//! use echo_panel::ConnectionPanel;
//! use echo_transport::LoopbackTransport;
//!
//! let mut panel = ConnectionPanel::initialize(LoopbackTransport::new("ws://echo.test"));
//! panel.pump();
//!
//! panel.compose_mut().set("hello");
//! panel.submit();
//! panel.pump();
//!
//! let lines: Vec<String> = panel.log().iter().map(|e| e.display_line()).collect();
//! assert_eq!(lines, ["Sent: hello", "Received: hello"]);
//! ```

mod compose;
mod log;
mod panel;

pub use compose::ComposeField;
pub use log::DisplayLog;
pub use panel::ConnectionPanel;
