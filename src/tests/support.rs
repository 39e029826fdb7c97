//! In-memory fakes shared by the unit and flow tests.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::commands::CommandHandler;
use crate::config::BotConfig;
use crate::dispatch::{Author, IncomingMessage, ReplyError, Session};

/// A message that records replies instead of sending them.
pub struct FakeMessage {
    author: Author,
    content: String,
    replies: Mutex<Vec<String>>,
    attempts: AtomicUsize,
    fail_replies: bool,
}

impl FakeMessage {
    pub fn new(author: Author, content: &str) -> Self {
        Self {
            author,
            content: content.to_string(),
            replies: Mutex::new(Vec::new()),
            attempts: AtomicUsize::new(0),
            fail_replies: false,
        }
    }

    pub fn from_user(content: &str) -> Self {
        Self::new(Author::user("1001", "tester#1001"), content)
    }

    /// Every reply attempt fails with a delivery error.
    pub fn failing_replies(mut self) -> Self {
        self.fail_replies = true;
        self
    }

    pub fn replies(&self) -> Vec<String> {
        self.replies.lock().expect("replies lock").clone()
    }

    pub fn reply_attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IncomingMessage for FakeMessage {
    fn author(&self) -> &Author {
        &self.author
    }

    fn content(&self) -> &str {
        &self.content
    }

    async fn reply(&self, text: &str) -> Result<(), ReplyError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail_replies {
            return Err(ReplyError::Delivery("network unreachable".to_string()));
        }
        self.replies
            .lock()
            .expect("replies lock")
            .push(text.to_string());
        Ok(())
    }
}

/// Records the arguments of every call and succeeds.
#[derive(Default)]
pub struct RecordingHandler {
    calls: Mutex<Vec<Vec<String>>>,
}

impl RecordingHandler {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().expect("calls lock").clone()
    }
}

#[async_trait]
impl CommandHandler for RecordingHandler {
    async fn execute(
        &self,
        _event: &dyn IncomingMessage,
        args: &[String],
        _session: &Session,
        _config: &BotConfig,
    ) -> anyhow::Result<()> {
        self.calls.lock().expect("calls lock").push(args.to_vec());
        Ok(())
    }
}

/// Fails every call, either with an error or by panicking.
pub struct FailingHandler {
    message: String,
    panics: bool,
}

impl FailingHandler {
    pub fn error(message: &str) -> Self {
        Self {
            message: message.to_string(),
            panics: false,
        }
    }

    pub fn panic(message: &str) -> Self {
        Self {
            message: message.to_string(),
            panics: true,
        }
    }
}

#[async_trait]
impl CommandHandler for FailingHandler {
    #[allow(clippy::panic)]
    async fn execute(
        &self,
        _event: &dyn IncomingMessage,
        _args: &[String],
        _session: &Session,
        _config: &BotConfig,
    ) -> anyhow::Result<()> {
        if self.panics {
            panic!("{}", self.message);
        }
        anyhow::bail!("{}", self.message)
    }
}
