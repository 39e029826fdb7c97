//! Dispatch Flow Tests
//!
//! Events are handled independently: a slow handler does not hold up other
//! messages, and a failed one does not poison later ones.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

use crate::commands::{CommandHandler, CommandModule, Registry, StaticSource};
use crate::config::BotConfig;
use crate::dispatch::{DispatchOutcome, Dispatcher, IncomingMessage, Session};
use crate::tests::support::{FailingHandler, FakeMessage, RecordingHandler};

/// Blocks until released, announcing when it has started.
struct GateHandler {
    entered: Arc<Notify>,
    release: Arc<Notify>,
}

#[async_trait]
impl CommandHandler for GateHandler {
    async fn execute(
        &self,
        _event: &dyn IncomingMessage,
        _args: &[String],
        _session: &Session,
        _config: &BotConfig,
    ) -> anyhow::Result<()> {
        self.entered.notify_one();
        self.release.notified().await;
        Ok(())
    }
}

fn dispatcher(modules: Vec<CommandModule>) -> Dispatcher {
    let registry = Registry::build(&StaticSource::new(modules)).expect("static source");
    Dispatcher::new(registry, BotConfig::new("token"))
}

#[tokio::test]
async fn test_slow_handler_does_not_block_others() {
    let entered = Arc::new(Notify::new());
    let release = Arc::new(Notify::new());
    let ping = RecordingHandler::new();

    let d = dispatcher(vec![
        CommandModule::new("t").name("slow").handler(Arc::new(GateHandler {
            entered: entered.clone(),
            release: release.clone(),
        })),
        CommandModule::new("t").name("ping").handler(ping.clone()),
    ]);

    let slow = d.spawn(Arc::new(FakeMessage::from_user("!slow")));
    entered.notified().await;

    let fast = d.spawn(Arc::new(FakeMessage::from_user("!ping")));
    let fast_outcome = tokio::time::timeout(Duration::from_secs(5), fast)
        .await
        .expect("ping finished while slow was still running")
        .expect("task completes");
    assert!(matches!(fast_outcome, DispatchOutcome::Executed { .. }));
    assert!(!slow.is_finished());

    release.notify_one();
    let slow_outcome = tokio::time::timeout(Duration::from_secs(5), slow)
        .await
        .expect("slow finished after release")
        .expect("task completes");
    assert_eq!(
        slow_outcome,
        DispatchOutcome::Executed {
            command: "slow".to_string()
        }
    );
}

#[tokio::test]
async fn test_failures_are_isolated_per_message() {
    let ping = RecordingHandler::new();
    let d = dispatcher(vec![
        CommandModule::new("t")
            .name("broken")
            .handler(Arc::new(FailingHandler::error("handler blew up"))),
        CommandModule::new("t")
            .name("explode")
            .handler(Arc::new(FailingHandler::panic("handler panicked hard"))),
        CommandModule::new("t").name("ping").handler(ping.clone()),
    ]);

    let messages: Vec<Arc<FakeMessage>> = ["!broken", "!explode", "!ping", "!broken", "!ping"]
        .iter()
        .map(|c| Arc::new(FakeMessage::from_user(c)))
        .collect();

    let handles: Vec<_> = messages
        .iter()
        .map(|m| d.spawn(m.clone() as Arc<dyn IncomingMessage>))
        .collect();

    let mut failed = 0;
    let mut executed = 0;
    for handle in handles {
        match handle.await.expect("task never dies") {
            DispatchOutcome::Failed { .. } => failed += 1,
            DispatchOutcome::Executed { .. } => executed += 1,
            other => unreachable!("unexpected outcome {:?}", other),
        }
    }

    assert_eq!(failed, 3);
    assert_eq!(executed, 2);
    assert_eq!(ping.calls().len(), 2);
    // One failure notice per failed message, nothing for successful ones
    for (message, expected) in messages.iter().zip([1, 1, 0, 1, 0]) {
        assert_eq!(message.replies().len(), expected);
    }
}
