use better_find_buffer::telemetry::{LogMessage, init, log_with_context};
use log::Level;
use serial_test::serial;

// Log output is not captured here; these tests make sure initialization and
// logging behave and never panic.

#[test]
#[serial]
fn test_telemetry_init() {
    let result = init();
    assert!(result.is_ok(), "Telemetry initialization failed: {:?}", result);
}

#[test]
#[serial]
fn test_multiple_init_calls() {
    // Only the first call installs the logger
    assert!(init().is_ok());
    assert!(init().is_ok());
}

#[test]
#[serial]
fn test_log_with_context_basic() {
    init().ok();

    log_with_context(Level::Info, LogMessage::new("telemetry_test", "Plain message"));
}

#[test]
#[serial]
fn test_log_with_context_at_every_level() {
    init().ok();

    for level in [
        Level::Error,
        Level::Warn,
        Level::Info,
        Level::Debug,
        Level::Trace,
    ] {
        log_with_context(
            level,
            LogMessage::new("telemetry_test", "Moved to match")
                .with("caret", 12)
                .with("target", 40)
                .with("path", "/tmp/project/src/main.rs"),
        );
    }
}

#[test]
#[serial]
fn test_log_message_builder_collects_pairs() {
    let msg = LogMessage::new("jump", "Moved to file header")
        .with("caret", 0)
        .with("target", 57);

    assert_eq!(msg.module, "jump");
    assert_eq!(msg.message, "Moved to file header");
    assert_eq!(
        msg.context,
        Some(vec![("caret", "0".to_string()), ("target", "57".to_string())])
    );
}
