// src/core/messages.rs
//
// The gate only constructs message payloads; rendering them is the host's
// concern. A sink receives payloads in the order the checks emit them.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// The named subject is older than the required bound.
    VersionRequired { subject: String, required: String },

    /// The named subject is running a version this build does not support.
    VersionIncompatible { subject: String, version: String },

    /// Plain console text, advisory only.
    Plain(String),
}

pub trait ConsoleSink {
    fn emit(&mut self, message: Message);
}

/// Sink that logs each payload through tracing. Used by the preflight binary;
/// a plugin host would supply its own sink instead.
#[derive(Debug, Default)]
pub struct LogSink;

impl ConsoleSink for LogSink {
    fn emit(&mut self, message: Message) {
        match &message {
            Message::VersionRequired { subject, required } => {
                tracing::warn!(%subject, %required, "version required");
            }
            Message::VersionIncompatible { subject, version } => {
                tracing::warn!(%subject, %version, "incompatible version");
            }
            Message::Plain(text) => {
                tracing::info!("{}", text);
            }
        }
    }
}

/// Sink that records payloads in order, for tests and callers that render
/// messages themselves after the gate returns.
#[derive(Debug, Default)]
pub struct RecordingSink {
    messages: Vec<Message>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }
}

impl ConsoleSink for RecordingSink {
    fn emit(&mut self, message: Message) {
        self.messages.push(message);
    }
}
