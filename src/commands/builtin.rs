//! Built-in handler kinds.

use async_trait::async_trait;
use std::sync::Arc;

use super::catalog::HandlerCatalog;
use super::command::CommandHandler;
use crate::config::BotConfig;
use crate::dispatch::{IncomingMessage, Session};
use crate::utils::split_message;

/// Discord rejects messages longer than this.
pub const MAX_REPLY_LEN: usize = 2000;

pub(super) fn register_all(catalog: &mut HandlerCatalog) {
    catalog.register("ping", |_| Ok(Arc::new(PingHandler) as Arc<dyn CommandHandler>));
    catalog.register("echo", |_| Ok(Arc::new(EchoHandler) as Arc<dyn CommandHandler>));
    catalog.register("help", |_| Ok(Arc::new(HelpHandler) as Arc<dyn CommandHandler>));
    catalog.register("uptime", |_| Ok(Arc::new(UptimeHandler) as Arc<dyn CommandHandler>));
    catalog.register("reply", |manifest| {
        let template = manifest
            .response
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| "a non-empty \"response\" is required".to_string())?;
        Ok(Arc::new(ReplyHandler::new(template)) as Arc<dyn CommandHandler>)
    });
}

/// Replies `Pong!`.
pub struct PingHandler;

#[async_trait]
impl CommandHandler for PingHandler {
    async fn execute(
        &self,
        event: &dyn IncomingMessage,
        _args: &[String],
        _session: &Session,
        _config: &BotConfig,
    ) -> anyhow::Result<()> {
        event.reply("Pong!").await?;
        Ok(())
    }
}

/// Repeats its arguments back.
pub struct EchoHandler;

#[async_trait]
impl CommandHandler for EchoHandler {
    async fn execute(
        &self,
        event: &dyn IncomingMessage,
        args: &[String],
        _session: &Session,
        config: &BotConfig,
    ) -> anyhow::Result<()> {
        let text = if args.is_empty() {
            format!("Nothing to echo. Try `{}echo hello`.", config.prefix())
        } else {
            args.join(" ")
        };
        event.reply(&text).await?;
        Ok(())
    }
}

/// Replies a fixed template with `{args}`, `{author}` and `{prefix}` filled in.
pub struct ReplyHandler {
    template: String,
}

impl ReplyHandler {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn render(&self, author: &str, args: &[String], prefix: &str) -> String {
        self.template
            .replace("{args}", &args.join(" "))
            .replace("{author}", author)
            .replace("{prefix}", prefix)
    }
}

#[async_trait]
impl CommandHandler for ReplyHandler {
    async fn execute(
        &self,
        event: &dyn IncomingMessage,
        args: &[String],
        _session: &Session,
        config: &BotConfig,
    ) -> anyhow::Result<()> {
        let text = self.render(&event.author().tag, args, config.prefix());
        event.reply(&text).await?;
        Ok(())
    }
}

/// Lists registered commands, or details one command when given its name.
pub struct HelpHandler;

impl HelpHandler {
    fn describe(prefix: &str, command: &super::Command) -> String {
        let mut line = format!("`{}{}`", prefix, command.name());
        if !command.aliases().is_empty() {
            line.push_str(&format!(" (aliases: {})", command.aliases().join(", ")));
        }
        if let Some(description) = command.description() {
            line.push_str(&format!(" - {}", description));
        }
        line
    }

    pub fn render(session: &Session, prefix: &str, args: &[String]) -> String {
        let registry = session.registry();

        if let Some(wanted) = args.first() {
            return match registry.resolve(&wanted.to_lowercase()) {
                Some(command) => Self::describe(prefix, command),
                None => format!("No command named `{}`.", wanted),
            };
        }

        if registry.is_empty() {
            return "No commands are registered.".to_string();
        }

        let mut out = String::from("Available commands:\n");
        for command in registry.iter() {
            out.push_str(&Self::describe(prefix, command));
            out.push('\n');
        }
        out
    }
}

#[async_trait]
impl CommandHandler for HelpHandler {
    async fn execute(
        &self,
        event: &dyn IncomingMessage,
        args: &[String],
        session: &Session,
        config: &BotConfig,
    ) -> anyhow::Result<()> {
        let text = Self::render(session, config.prefix(), args);
        for chunk in split_message(&text, MAX_REPLY_LEN) {
            event.reply(&chunk).await?;
        }
        Ok(())
    }
}

/// Replies how long the session has been up.
pub struct UptimeHandler;

/// Format a duration as `1d 2h 3m 4s`, dropping leading zero units.
pub fn format_uptime(elapsed: chrono::TimeDelta) -> String {
    let total = elapsed.num_seconds().max(0);
    let (days, rem) = (total / 86_400, total % 86_400);
    let (hours, rem) = (rem / 3_600, rem % 3_600);
    let (minutes, seconds) = (rem / 60, rem % 60);

    let mut parts = Vec::new();
    if days > 0 {
        parts.push(format!("{}d", days));
    }
    if days > 0 || hours > 0 {
        parts.push(format!("{}h", hours));
    }
    if days > 0 || hours > 0 || minutes > 0 {
        parts.push(format!("{}m", minutes));
    }
    parts.push(format!("{}s", seconds));
    parts.join(" ")
}

#[async_trait]
impl CommandHandler for UptimeHandler {
    async fn execute(
        &self,
        event: &dyn IncomingMessage,
        _args: &[String],
        session: &Session,
        _config: &BotConfig,
    ) -> anyhow::Result<()> {
        let text = format!(
            "Up for {} (modbot v{})",
            format_uptime(session.uptime()),
            crate::VERSION
        );
        event.reply(&text).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{CommandModule, Registry, StaticSource};
    use crate::tests::support::FakeMessage;
    use rstest::rstest;

    fn session_with(modules: Vec<CommandModule>) -> Session {
        let registry = Registry::build(&StaticSource::new(modules)).expect("static source");
        Session::new(Arc::new(registry))
    }

    #[tokio::test]
    async fn test_ping_replies_pong() {
        let event = FakeMessage::from_user("!ping");
        let session = session_with(vec![]);
        PingHandler
            .execute(&event, &[], &session, &BotConfig::new("t"))
            .await
            .expect("ping");
        assert_eq!(event.replies(), vec!["Pong!".to_string()]);
    }

    #[tokio::test]
    async fn test_echo_joins_args() {
        let event = FakeMessage::from_user("!echo a  b");
        let session = session_with(vec![]);
        let args = vec!["a".to_string(), "b".to_string()];
        EchoHandler
            .execute(&event, &args, &session, &BotConfig::new("t"))
            .await
            .expect("echo");
        assert_eq!(event.replies(), vec!["a b".to_string()]);
    }

    #[tokio::test]
    async fn test_echo_without_args_hints_usage() {
        let event = FakeMessage::from_user("?echo");
        let session = session_with(vec![]);
        EchoHandler
            .execute(&event, &[], &session, &BotConfig::new("t").with_prefix("?"))
            .await
            .expect("echo");
        assert_eq!(
            event.replies(),
            vec!["Nothing to echo. Try `?echo hello`.".to_string()]
        );
    }

    #[tokio::test]
    async fn test_reply_propagates_delivery_failure() {
        let event = FakeMessage::from_user("!ping").failing_replies();
        let session = session_with(vec![]);
        let result = PingHandler
            .execute(&event, &[], &session, &BotConfig::new("t"))
            .await;
        assert!(result.is_err());
    }

    #[test]
    fn test_reply_template_render() {
        let handler = ReplyHandler::new("Hi {author}! You said: {args}. Prefix is {prefix}");
        let rendered = handler.render("user#1", &["x".to_string(), "y".to_string()], "!");
        assert_eq!(rendered, "Hi user#1! You said: x y. Prefix is !");
    }

    #[test]
    fn test_help_lists_in_registration_order() {
        let session = session_with(vec![
            CommandModule::new("a")
                .name("ping")
                .alias("p")
                .description("Check that the bot is alive")
                .handler(Arc::new(PingHandler)),
            CommandModule::new("b").name("echo").handler(Arc::new(EchoHandler)),
        ]);

        let text = HelpHandler::render(&session, "!", &[]);
        assert_eq!(
            text,
            "Available commands:\n`!ping` (aliases: p) - Check that the bot is alive\n`!echo`\n"
        );

        let single = HelpHandler::render(&session, "!", &["P".to_string()]);
        assert_eq!(single, "`!ping` (aliases: p) - Check that the bot is alive");

        let missing = HelpHandler::render(&session, "!", &["nope".to_string()]);
        assert_eq!(missing, "No command named `nope`.");
    }

    #[test]
    fn test_help_with_empty_registry() {
        let session = session_with(vec![]);
        assert_eq!(
            HelpHandler::render(&session, "!", &[]),
            "No commands are registered."
        );
    }

    #[tokio::test]
    async fn test_long_help_is_sent_in_chunks() {
        let description = "d".repeat(90);
        let modules = (0..60)
            .map(|i| {
                CommandModule::new(format!("m{}", i))
                    .name(format!("command{:02}", i))
                    .description(description.clone())
                    .handler(Arc::new(PingHandler))
            })
            .collect();
        let session = session_with(modules);
        let event = FakeMessage::from_user("!help");

        HelpHandler
            .execute(&event, &[], &session, &BotConfig::new("t"))
            .await
            .expect("help");

        let replies = event.replies();
        assert!(replies.len() > 1);
        assert!(replies.iter().all(|r| r.len() <= MAX_REPLY_LEN));
        let joined = replies.join("\n");
        assert!(joined.starts_with("Available commands:"));
        assert!(joined.contains("`!command00`"));
        assert!(joined.contains("`!command59`"));
    }

    #[rstest]
    #[case(0, "0s")]
    #[case(59, "59s")]
    #[case(61, "1m 1s")]
    #[case(3_600, "1h 0m 0s")]
    #[case(90_061, "1d 1h 1m 1s")]
    #[case(-5, "0s")]
    fn test_format_uptime(#[case] seconds: i64, #[case] expected: &str) {
        assert_eq!(format_uptime(chrono::TimeDelta::seconds(seconds)), expected);
    }
}
