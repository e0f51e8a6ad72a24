//! TUI application state and key handling.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use echo_panel::ConnectionPanel;
use echo_transport::Transport;
use tracing::debug;

/// Lines moved by PageUp / PageDown.
pub const PAGE_SIZE: usize = 10;

/// TUI application state.
///
/// Everything about the connection lives in the panel; the app only adds
/// what the terminal needs on top of it.
pub struct App<T: Transport> {
    /// The connection panel being displayed
    pub panel: ConnectionPanel<T>,
    /// Scroll offset for the message list (0 = bottom)
    pub scroll_offset: usize,
    /// Whether the app should quit
    pub should_quit: bool,
}

impl<T: Transport> App<T> {
    /// Create a new App around an initialized panel.
    pub fn new(panel: ConnectionPanel<T>) -> Self {
        Self {
            panel,
            scroll_offset: 0,
            should_quit: false,
        }
    }

    /// Handle connection events that arrived since the last tick.
    pub fn tick(&mut self) -> usize {
        let handled = self.panel.pump();
        if handled > 0 {
            debug!(handled, "events handled");
        }
        handled
    }

    /// Dispatch one key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => self.should_quit = true,
                KeyCode::Char('x') => self.panel.request_close(),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Enter => {
                self.panel.submit();
                self.scroll_to_bottom();
                return;
            }
            KeyCode::PageUp => {
                self.scroll_page_up(PAGE_SIZE);
                return;
            }
            KeyCode::PageDown => {
                self.scroll_page_down(PAGE_SIZE);
                return;
            }
            KeyCode::Esc => {
                self.should_quit = true;
                return;
            }
            _ => {}
        }

        let compose = self.panel.compose_mut();
        match key.code {
            KeyCode::Char(c) => compose.insert_char(c),
            KeyCode::Backspace => compose.backspace(),
            KeyCode::Delete => compose.delete(),
            KeyCode::Left => compose.move_left(),
            KeyCode::Right => compose.move_right(),
            KeyCode::Home => compose.move_home(),
            KeyCode::End => compose.move_end(),
            KeyCode::Up => compose.history_prev(),
            KeyCode::Down => compose.history_next(),
            _ => {}
        }
    }

    /// Request close and wait up to `grace` for the close event.
    ///
    /// Returns whether the panel saw the connection close.
    pub fn shutdown(&mut self, grace: Duration) -> bool {
        if !self.panel.is_closed() {
            self.panel.request_close();
        }

        let deadline = Instant::now() + grace;
        while !self.panel.is_closed() {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            self.panel.pump_timeout(deadline - now);
        }
        self.panel.is_closed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use echo_models::{MessageDirection, StatusClass};
    use echo_transport::LoopbackTransport;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn open_app(peer: &LoopbackTransport) -> App<LoopbackTransport> {
        let mut app = App::new(ConnectionPanel::initialize(peer.clone()));
        app.tick();
        app
    }

    fn type_text(app: &mut App<LoopbackTransport>, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_typing_and_enter_sends() {
        let peer = LoopbackTransport::new("ws://echo.test");
        let mut app = open_app(&peer);

        type_text(&mut app, "hi");
        app.handle_key(key(KeyCode::Enter));
        app.tick();

        assert_eq!(peer.sent(), vec!["hi".to_string()]);
        assert_eq!(
            app.panel.log().summary(),
            vec![(MessageDirection::Sent, "hi"), (MessageDirection::Received, "hi")]
        );
        assert!(app.panel.compose().is_empty());
    }

    #[test]
    fn test_editing_keys() {
        let peer = LoopbackTransport::new("ws://echo.test");
        let mut app = open_app(&peer);

        type_text(&mut app, "abd");
        app.handle_key(key(KeyCode::Left));
        app.handle_key(key(KeyCode::Char('c')));
        app.handle_key(key(KeyCode::Home));
        app.handle_key(key(KeyCode::Delete));
        app.handle_key(key(KeyCode::End));
        app.handle_key(key(KeyCode::Backspace));

        assert_eq!(app.panel.compose().text(), "bc");
    }

    #[test]
    fn test_ctrl_x_requests_close_without_quitting() {
        let peer = LoopbackTransport::new("ws://echo.test");
        let mut app = open_app(&peer);

        app.handle_key(ctrl('x'));
        assert_eq!(peer.close_requests(), 1);
        assert!(!app.should_quit);
        assert_eq!(app.panel.status().class, StatusClass::Open);

        app.tick();
        assert_eq!(app.panel.status().class, StatusClass::Closed);
    }

    #[test]
    fn test_ctrl_c_and_esc_quit() {
        let peer = LoopbackTransport::new("ws://echo.test");
        let mut app = open_app(&peer);
        app.handle_key(ctrl('c'));
        assert!(app.should_quit);
        assert!(app.panel.compose().is_empty(), "ctrl chords are not typed");

        let mut app = open_app(&LoopbackTransport::new("ws://echo.test"));
        app.handle_key(key(KeyCode::Esc));
        assert!(app.should_quit);
    }

    #[test]
    fn test_up_recalls_last_message() {
        let peer = LoopbackTransport::new("ws://echo.test").without_echo();
        let mut app = open_app(&peer);

        type_text(&mut app, "again");
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Up));
        assert_eq!(app.panel.compose().text(), "again");

        app.handle_key(key(KeyCode::Down));
        assert!(app.panel.compose().is_empty());
    }

    #[test]
    fn test_page_keys_scroll_without_editing() {
        let peer = LoopbackTransport::new("ws://echo.test");
        let mut app = open_app(&peer);
        for i in 0..15 {
            app.panel.on_message(format!("m{}", i));
        }

        app.handle_key(key(KeyCode::PageUp));
        assert_eq!(app.scroll_offset, PAGE_SIZE);
        app.handle_key(key(KeyCode::PageDown));
        assert_eq!(app.scroll_offset, 0);
        assert!(app.panel.compose().is_empty());
    }

    #[test]
    fn test_shutdown_closes_connection() {
        let peer = LoopbackTransport::new("ws://echo.test");
        let mut app = open_app(&peer);

        assert!(app.shutdown(Duration::from_millis(100)));
        assert_eq!(peer.close_requests(), 1);

        // Already closed: no second request
        assert!(app.shutdown(Duration::from_millis(10)));
        assert_eq!(peer.close_requests(), 1);
    }
}
