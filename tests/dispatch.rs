//! Operation surface.

mod common;

use common::{recording_factory, TestSession};
use lobby_sp::{LobbyOperation, LobbyServiceProvider, Payload, ProviderConfig, Status, IID_LOBBY_SP};

#[test]
fn test_every_operation_succeeds_without_side_effects() {
    let (factory, heap) = recording_factory();
    let session = TestSession::new();
    let provider = factory.create(&IID_LOBBY_SP, &session).unwrap();

    let events_before = heap.events();
    let payloads = [
        Payload::new(),
        Payload::from_static(b"\x00\x01\x02"),
        Payload::from(vec![0xff; 4096]),
    ];

    for op in LobbyOperation::ALL {
        for payload in &payloads {
            let result = provider.dispatch(op, payload);
            assert_eq!(Status::from_result(&result), Status::Ok, "{} failed", op);
        }
    }

    assert_eq!(provider.ref_count(), 1);
    assert_eq!(provider.lock_label().as_deref(), Some("test.lock"));
    assert_eq!(
        provider.session().map(|s| s.session_id()),
        Some(session.session_id())
    );
    assert_eq!(heap.events(), events_before);

    provider.release();
}

#[test]
fn test_direct_calls_match_dispatch() {
    let (factory, _heap) = recording_factory();
    let provider = factory.create(&IID_LOBBY_SP, &TestSession::new()).unwrap();
    let payload = Payload::from_static(b"hello lobby");

    assert!(provider.add_group_to_group(&payload).is_ok());
    assert!(provider.add_player_to_group(&payload).is_ok());
    assert!(provider.create_group(&payload).is_ok());
    assert!(provider.create_group_in_group(&payload).is_ok());
    assert!(provider.delete_group_from_group(&payload).is_ok());
    assert!(provider.delete_player_from_group(&payload).is_ok());
    assert!(provider.destroy_group(&payload).is_ok());
    assert!(provider.enum_sessions_response(&payload).is_ok());
    assert!(provider.get_sp_data_pointer(&payload).is_ok());
    assert!(provider.handle_message(&payload).is_ok());
    assert!(provider.send_chat_message(&payload).is_ok());
    assert!(provider.set_group_name(&payload).is_ok());
    assert!(provider.set_player_name(&payload).is_ok());
    assert!(provider.set_session_desc(&payload).is_ok());
    assert!(provider.set_sp_data_pointer(&payload).is_ok());
    assert!(provider.start_session(&payload).is_ok());

    provider.release();
}

#[test]
fn test_silenced_stub_logging_still_succeeds() {
    let (factory, _heap) = recording_factory();
    let factory = factory.with_config(ProviderConfig::new().with_log_stub_calls(false));
    let provider = factory.create(&IID_LOBBY_SP, &TestSession::new()).unwrap();

    assert!(provider
        .dispatch(LobbyOperation::HandleMessage, &Payload::new())
        .is_ok());
    provider.release();
}
