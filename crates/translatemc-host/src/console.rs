//! Line-oriented operator console
//!
//! Each input line is one command. The console acts as a single player with
//! reload permission so the full `translate` flow can be exercised from a
//! terminal.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;
use translatemc_commands::{
    first_join_prompt, strip_color_codes, CommandOutcome, Player, Requester, SelectorView,
    COMMAND_NAME, RELOAD_PERMISSION,
};
use translatemc_common::UserId;

use crate::error::HostResult;
use crate::host::TranslateHost;

const HELP: &[&str] = &[
    "translate [code|reload]   run the translate command",
    "complete [prefix]         tab-complete the first argument",
    "select <slot>             click a slot in the language selector",
    "join                      simulate joining the server",
    "placeholder <text>        expand %langs_...% placeholders",
    "user [uuid]               show or switch the acting user",
    "status                    show catalog and cache state",
    "quit                      leave the console",
];

/// Result of one console line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsoleReply {
    /// Output lines, color codes removed.
    pub lines: Vec<String>,
    /// Whether the console should exit.
    pub quit: bool,
}

impl ConsoleReply {
    fn lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            lines: lines
                .into_iter()
                .map(|l| strip_color_codes(l.as_ref()))
                .collect(),
            quit: false,
        }
    }

    fn line(text: impl AsRef<str>) -> Self {
        Self::lines([text])
    }
}

/// Console state: the host and the user the console acts as.
pub struct ConsoleSession<'a> {
    host: &'a TranslateHost,
    player: Player,
}

impl<'a> ConsoleSession<'a> {
    /// Creates a session acting as `user`.
    pub fn new(host: &'a TranslateHost, user: UserId) -> Self {
        Self {
            host,
            player: operator(user),
        }
    }

    /// The user the console acts as.
    pub const fn user(&self) -> UserId {
        self.player.id()
    }

    /// Handles one input line.
    pub async fn handle_line(&mut self, line: &str) -> ConsoleReply {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return ConsoleReply::default();
        };
        let args: Vec<&str> = words.collect();
        debug!(command = head, ?args, "Console input");

        match head {
            COMMAND_NAME => self.translate(&args).await,
            "complete" => {
                let prefix = args.first().copied().unwrap_or("");
                let completions = self.host.command().complete(&self.player, &[prefix]);
                ConsoleReply::line(completions.join(" "))
            }
            "select" => self.select(args.first().copied()),
            "join" => self.join().await,
            "placeholder" => {
                let text = line.trim_start()[head.len()..].trim_start();
                let expanded = self
                    .host
                    .expander()
                    .expand_text(Requester::Online(self.user()), text)
                    .await;
                ConsoleReply::line(expanded)
            }
            "user" => self.switch_user(args.first().copied()),
            "status" => self.status(),
            "help" => ConsoleReply::lines(HELP),
            "quit" | "exit" => ConsoleReply {
                lines: Vec::new(),
                quit: true,
            },
            other => ConsoleReply::line(format!("Unknown command '{other}', try 'help'")),
        }
    }

    async fn translate(&self, args: &[&str]) -> ConsoleReply {
        match self.host.command().execute(&self.player, args).await {
            CommandOutcome::OpenSelector => self.selector(),
            CommandOutcome::Reply(lines) => ConsoleReply::lines(lines),
        }
    }

    fn selector(&self) -> ConsoleReply {
        let config = self.host.config().get();
        let view = SelectorView::build(self.host.service(), &config.gui, &self.user());

        let mut lines = vec![view.title.clone()];
        lines.extend(view.entries.iter().map(|entry| {
            let marker = if entry.is_current { "*" } else { " " };
            let lore: Vec<String> = entry.lore().into_iter().filter(|l| !l.is_empty()).collect();
            format!(
                "{marker} [{}] {} ({})",
                entry.slot,
                entry.language.display_name(),
                lore.join(", ")
            )
        }));
        if view.entries.is_empty() {
            lines.push("No languages available".to_string());
        }
        ConsoleReply::lines(lines)
    }

    fn select(&self, slot: Option<&str>) -> ConsoleReply {
        let Some(slot) = slot.and_then(|s| s.parse::<usize>().ok()) else {
            return ConsoleReply::line("Usage: select <slot>");
        };

        let config = self.host.config().get();
        let view = SelectorView::build(self.host.service(), &config.gui, &self.user());
        match view.code_at(slot) {
            Some(code) => ConsoleReply::lines(
                self.host
                    .command()
                    .select_language(self.user(), code)
                    .lines(),
            ),
            None => ConsoleReply::line(format!("Slot {slot} is empty")),
        }
    }

    async fn join(&self) -> ConsoleReply {
        let config = self.host.config().get();
        match first_join_prompt(self.host.service(), &config, &self.user()) {
            Some(prompt) => {
                tokio::time::sleep(prompt.delay).await;
                let mut reply = ConsoleReply::line(&prompt.message);
                reply.lines.extend(self.selector().lines);
                reply
            }
            None => ConsoleReply::line("Welcome back"),
        }
    }

    fn switch_user(&mut self, raw: Option<&str>) -> ConsoleReply {
        match raw.map(str::parse::<UserId>) {
            None => ConsoleReply::line(format!("Acting as {}", self.user())),
            Some(Ok(user)) => {
                self.player = operator(user);
                ConsoleReply::line(format!("Now acting as {user}"))
            }
            Some(Err(e)) => ConsoleReply::line(format!("Invalid user id: {e}")),
        }
    }

    fn status(&self) -> ConsoleReply {
        let service = self.host.service();
        let age = service.last_refresh().map_or_else(
            || "never".to_string(),
            |at| format!("{}s ago", at.elapsed().as_secs()),
        );

        ConsoleReply::lines([
            format!("Freshness: {:?}", service.freshness()),
            format!("Last refresh: {age}"),
            format!("Languages: {}", service.language_codes().join(", ")),
            format!("Keys: {}", service.keys().len()),
            format!("Users with a selection: {}", service.selected_user_count()),
            format!("Default language: {}", service.default_language_code()),
            format!("Up since: {}", self.host.started_at().to_rfc3339()),
        ])
    }
}

fn operator(user: UserId) -> Player {
    Player::new(user).with_permission(RELOAD_PERMISSION)
}

/// Reads lines from `reader` until end of input or `quit`, writing replies to
/// `writer`.
pub async fn run<R, W>(session: &mut ConsoleSession<'_>, reader: R, mut writer: W) -> HostResult<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();

    writer.write_all(b"Type 'help' for commands\n").await?;
    writer.flush().await?;

    while let Some(line) = lines.next_line().await? {
        let reply = session.handle_line(&line).await;
        for out in &reply.lines {
            writer.write_all(out.as_bytes()).await?;
            writer.write_all(b"\n").await?;
        }
        writer.flush().await?;
        if reply.quit {
            break;
        }
    }

    debug!("Console closed");
    Ok(())
}
