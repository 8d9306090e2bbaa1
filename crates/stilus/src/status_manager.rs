use std::time::{Duration, Instant};

/// How long a status message stays visible.
const MESSAGE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct StatusMessage {
    content: String,
    created_at: Instant,
}

impl StatusMessage {
    fn new(content: String) -> Self {
        Self {
            content,
            created_at: Instant::now(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() > MESSAGE_TIMEOUT
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Holds the single transient status message. A new message overwrites the
/// old one; messages are never queued.
#[derive(Default)]
pub struct StatusManager {
    current_message: Option<StatusMessage>,
}

impl StatusManager {
    pub fn new() -> Self {
        Self {
            current_message: None,
        }
    }

    pub fn set(&mut self, message: impl Into<String>) {
        self.current_message = Some(StatusMessage::new(message.into()));
    }

    /// Drops the message once it has outlived its five seconds. Called
    /// lazily, once per loop iteration.
    pub fn update(&mut self) {
        if let Some(ref message) = self.current_message {
            if message.is_expired() {
                self.current_message = None;
            }
        }
    }

    pub fn current(&self) -> Option<&StatusMessage> {
        self.current_message
            .as_ref()
            .filter(|message| !message.is_expired())
    }

    pub fn has_message(&self) -> bool {
        self.current().is_some()
    }
}
