//! Behavioral tests for ConnectionPanel, driven through a loopback peer.

use echo_models::{ConnectionState, MessageDirection, StatusClass, DISCONNECTED_LABEL};
use echo_panel::ConnectionPanel;
use echo_transport::{LoopbackTransport, Transport};

const ADDRESS: &str = "ws://echo.websocket.org";

fn open_panel(peer: &LoopbackTransport) -> ConnectionPanel<LoopbackTransport> {
    let mut panel = ConnectionPanel::initialize(peer.clone());
    panel.pump();
    assert_eq!(panel.status().class, StatusClass::Open);
    panel
}

fn submit(panel: &mut ConnectionPanel<LoopbackTransport>, text: &str) {
    panel.compose_mut().set(text);
    panel.submit();
}

#[test]
fn test_received_messages_logged_in_order() {
    let peer = LoopbackTransport::new(ADDRESS);
    let mut panel = open_panel(&peer);

    let payloads = ["first", "", "<script>x</script>", "first", "ünïcödé"];
    for p in payloads {
        peer.inject_message(p);
    }
    assert_eq!(panel.pump(), payloads.len());

    let expected: Vec<_> = payloads
        .iter()
        .map(|p| (MessageDirection::Received, *p))
        .collect();
    assert_eq!(panel.log().summary(), expected);
}

#[test]
fn test_on_message_called_directly_appends_each_payload() {
    let peer = LoopbackTransport::new(ADDRESS);
    let mut panel = open_panel(&peer);

    for i in 0..50 {
        panel.on_message(format!("m{}", i));
    }

    assert_eq!(panel.log().len(), 50);
    for (i, entry) in panel.log().iter().enumerate() {
        assert_eq!(entry.direction, MessageDirection::Received);
        assert_eq!(entry.text, format!("m{}", i));
    }
}

#[test]
fn test_submit_while_open_transmits_once_and_clears_input() {
    let peer = LoopbackTransport::new(ADDRESS).without_echo();
    let mut panel = open_panel(&peer);

    submit(&mut panel, "hello there");

    assert_eq!(peer.sent(), vec!["hello there".to_string()]);
    assert_eq!(
        panel.log().summary(),
        vec![(MessageDirection::Sent, "hello there")]
    );
    assert!(panel.compose().is_empty());
    assert_eq!(panel.compose().cursor(), 0);
}

#[test]
fn test_empty_submit_is_sent() {
    let peer = LoopbackTransport::new(ADDRESS).without_echo();
    let mut panel = open_panel(&peer);

    panel.submit();

    assert_eq!(peer.sent(), vec![String::new()]);
    assert_eq!(panel.log().summary(), vec![(MessageDirection::Sent, "")]);
}

// Known gap: the sent log is not a delivery record.
#[test]
fn test_submit_after_close_still_logs_sent_entry() {
    let peer = LoopbackTransport::new(ADDRESS);
    let mut panel = open_panel(&peer);

    peer.peer_close();
    panel.pump();
    assert!(panel.is_closed());

    submit(&mut panel, "into the void");

    assert!(peer.sent().is_empty(), "nothing may be transmitted once closed");
    assert_eq!(
        panel.log().summary(),
        vec![(MessageDirection::Sent, "into the void")]
    );
    assert!(panel.compose().is_empty());
}

// Known gap: same as above, before the handshake completes.
#[test]
fn test_submit_before_open_is_not_queued() {
    let peer = LoopbackTransport::new(ADDRESS).hold_handshake();
    let mut panel = ConnectionPanel::initialize(peer.clone());

    submit(&mut panel, "too early");
    peer.complete_handshake();
    panel.pump();

    assert!(peer.sent().is_empty());
    assert_eq!(panel.log().summary(), vec![(MessageDirection::Sent, "too early")]);
}

#[test]
fn test_open_then_close_ends_closed_despite_errors() {
    let peer = LoopbackTransport::new(ADDRESS);
    let mut panel = open_panel(&peer);

    peer.inject_error("first failure");
    peer.inject_error("second failure");
    peer.peer_close();
    panel.pump();

    let status = panel.status();
    assert_eq!(status.class, StatusClass::Closed);
    assert_eq!(status.label, DISCONNECTED_LABEL);
}

#[test]
fn test_error_alone_leaves_status_unchanged() {
    let peer = LoopbackTransport::new(ADDRESS);
    let mut panel = open_panel(&peer);
    let before = panel.status();

    peer.inject_error("transient");
    panel.pump();

    assert_eq!(panel.status(), before);
    assert!(panel.log().is_empty(), "errors never reach the message list");
}

#[test]
fn test_error_while_connecting_leaves_connecting_status() {
    let peer = LoopbackTransport::new(ADDRESS).hold_handshake();
    let mut panel = ConnectionPanel::initialize(peer.clone());

    peer.inject_error("handshake trouble");
    panel.pump();

    assert_eq!(panel.status().class, StatusClass::Connecting);
}

#[test]
fn test_request_close_waits_for_close_event() {
    let peer = LoopbackTransport::new(ADDRESS);
    let mut panel = open_panel(&peer);
    let before = panel.status();

    panel.request_close();

    assert_eq!(peer.close_requests(), 1);
    assert_eq!(panel.connection_state(), ConnectionState::Closed);
    assert_eq!(panel.status(), before, "status must not move before the close event");

    panel.pump();
    assert_eq!(panel.status().class, StatusClass::Closed);
}

#[test]
fn test_close_is_terminal() {
    let peer = LoopbackTransport::new(ADDRESS);
    let mut panel = open_panel(&peer);

    panel.request_close();
    panel.pump();
    panel.request_close();
    peer.inject_message("ghost");
    assert_eq!(panel.pump(), 0);

    assert_eq!(panel.status().class, StatusClass::Closed);
    assert!(panel.log().is_empty());
}

#[test]
fn test_echo_scenario() {
    let peer = LoopbackTransport::new(ADDRESS).without_echo();
    let mut panel = ConnectionPanel::initialize(peer.clone());
    assert_eq!(panel.status().class, StatusClass::Connecting);

    panel.pump();
    assert_eq!(
        panel.status().label,
        "Connected to: ws://echo.websocket.org/"
    );

    submit(&mut panel, "hello");
    peer.inject_message("hello");
    panel.pump();

    panel.request_close();
    panel.pump();

    assert_eq!(
        panel.log().summary(),
        vec![
            (MessageDirection::Sent, "hello"),
            (MessageDirection::Received, "hello"),
        ]
    );
    assert_eq!(panel.status().class, StatusClass::Closed);
    assert_eq!(panel.status().label, DISCONNECTED_LABEL);
    assert_eq!(panel.transport().state(), ConnectionState::Closed);
}

#[test]
fn test_additional_listener_sees_panel_traffic() {
    let peer = LoopbackTransport::new(ADDRESS);
    let observer = peer.subscribe();
    let mut panel = open_panel(&peer);

    submit(&mut panel, "observed");
    panel.pump();

    let kinds: Vec<_> = std::iter::from_fn(|| observer.try_recv())
        .map(|e| e.kind())
        .collect();
    assert_eq!(kinds, ["opened", "message"]);
    assert_eq!(panel.log().len(), 2);
}

#[test]
fn test_submitted_text_can_be_recalled() {
    let peer = LoopbackTransport::new(ADDRESS).without_echo();
    let mut panel = open_panel(&peer);

    submit(&mut panel, "again");
    panel.compose_mut().history_prev();
    assert_eq!(panel.compose().text(), "again");

    panel.submit();
    assert_eq!(peer.sent(), vec!["again".to_string(), "again".to_string()]);
}
