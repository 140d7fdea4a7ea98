//! Logging setup using env_logger.
//!
//! Commands report their outcome through [`log_with_context`], which renders
//! the message followed by `key=value` pairs so a session log shows which
//! caret, target and view a jump touched.

use anyhow::Result;
use log::{Level, info};
use std::sync::Once;

static INIT: Once = Once::new();

/// Log message with context
pub struct LogMessage {
    /// The message to log
    pub message: String,

    /// The module where the log originated
    pub module: &'static str,

    /// Optional key-value pairs of additional context
    pub context: Option<Vec<(&'static str, String)>>,
}

impl LogMessage {
    /// Creates a message without context.
    pub fn new(module: &'static str, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            module,
            context: None,
        }
    }

    /// Appends one `key=value` pair.
    pub fn with(mut self, key: &'static str, value: impl ToString) -> Self {
        self.context
            .get_or_insert_with(Vec::new)
            .push((key, value.to_string()));
        self
    }
}

/// Initialize env_logger-based logging with stderr output.
///
/// The level defaults to `info` and can be overridden with `RUST_LOG`.
/// Calling this more than once is harmless.
///
/// # Returns
///
/// A Result indicating success or failure of the initialization
pub fn init() -> Result<()> {
    let mut result = Ok(());

    INIT.call_once(|| match setup_logger() {
        Ok(()) => info!("Logging initialized with stderr output"),
        Err(e) => {
            // Cannot use logging yet since it failed to initialize
            eprintln!("Failed to initialize logging: {}", e);
            result = Err(e);
        }
    });

    result
}

/// Log a message with the given level and context
///
/// # Example
///
/// ```
/// use better_find_buffer::telemetry::{log_with_context, LogMessage};
/// use log::Level;
///
/// log_with_context(
///     Level::Debug,
///     LogMessage::new("jump", "Moved to next file")
///         .with("caret", 12)
///         .with("target", 40),
/// );
/// ```
pub fn log_with_context(level: Level, msg: LogMessage) {
    log::log!(target: msg.module, level, "{}", format_context(&msg));
}

/// Format a log message with its context for display
fn format_context(msg: &LogMessage) -> String {
    match &msg.context {
        Some(context) if !context.is_empty() => {
            let context_str = context
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect::<Vec<_>>()
                .join(", ");

            format!("{} [{}]", msg.message, context_str)
        }
        _ => msg.message.clone(),
    }
}

fn setup_logger() -> Result<()> {
    env_logger::Builder::new()
        .filter(None, log::LevelFilter::Info)
        .parse_env("RUST_LOG")
        .format_timestamp(None)
        .format_target(true)
        .format_module_path(false)
        .try_init()?;

    Ok(())
}
