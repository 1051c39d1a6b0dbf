/// Who produced a message. Anything else still counts toward the message
/// total but carries no token attribution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// One classified line from a log source.
///
/// Session-file logs produce the first three variants in sequence order;
/// per-day logs produce self-contained `Usage` events.
#[derive(Clone, Debug, PartialEq)]
pub enum LogRecord {
    SessionStart {
        id: String,
        timestamp: String,
    },
    ModelChange {
        model: String,
    },
    Message {
        role: Option<Role>,
        tokens: u64,
        timestamp: Option<String>,
    },
    Usage(UsageEvent),
}

/// A per-day log line after field extraction. Unlike the session-file
/// variants it carries everything needed for attribution on its own.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UsageEvent {
    pub timestamp: String,
    pub model: Option<String>,
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub session: Option<String>,
}
