//! Integration tests for the event system

use kiln_events::{channel, AppEvent, BuildEvent, EventEmitter, EventSender, GeneralEvent};
use kiln_types::Version;

#[tokio::test]
async fn test_channel_delivers_events() {
    let (tx, mut rx) = channel();
    tx.emit(AppEvent::Build(BuildEvent::Started {
        package: "lama_launcher".into(),
        version: Version::new(0, 1, 0),
        cache_key: "linux-gcc-13-release-x86_64".into(),
    }));

    match rx.recv().await {
        Some(AppEvent::Build(BuildEvent::Started { package, .. })) => {
            assert_eq!(package, "lama_launcher");
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn test_emit_ignores_dropped_receiver() {
    let (tx, rx) = channel();
    drop(rx);
    // Must not panic or error
    tx.emit(AppEvent::General(GeneralEvent::DebugLog {
        message: "after receiver drop".into(),
    }));
}

#[test]
fn test_optional_sender_is_a_no_op() {
    let none: Option<EventSender> = None;
    none.emit_warning("nobody listening");
}
