//! Terminal frontend for the spell duel.
//!
//! # Architecture
//!
//! ```text
//! Client (composition root)
//!   ├─→ DuelRuntime (rules, pacing, opponent)
//!   ├─→ TextPresenter (cast animations)
//!   └─→ Renderer (events → stdout lines)
//! ```
//!
//! The client only talks to the runtime through [`DuelHandle`]: spell names
//! typed on stdin become declarations, and everything shown on screen comes
//! from the event bus.

pub mod config;
pub mod input;
pub mod logging;
pub mod presenter;
pub mod render;

pub use config::{ClientConfig, EventFormat};
pub use input::Command;
pub use presenter::TextPresenter;
pub use render::Renderer;

use anyhow::Result;
use duel_core::Side;
use duel_runtime::{DuelHandle, DuelRuntime, Event, Topic};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, info, warn};

/// Top-level client container: one runtime plus the text renderer.
pub struct Client {
    runtime: DuelRuntime,
    renderer: Renderer,
}

impl Client {
    pub fn new(runtime: DuelRuntime, renderer: Renderer) -> Self {
        Self { runtime, renderer }
    }

    /// Run until `quit` or end of input, then shut the runtime down.
    pub async fn run<I, O>(mut self, input: I, mut output: O) -> Result<()>
    where
        I: AsyncBufRead + Unpin,
        O: AsyncWrite + Unpin,
    {
        let handle = self.runtime.handle();
        let mut combat = handle.subscribe(Topic::Combat);
        let mut matches = handle.subscribe(Topic::Match);
        let mut lines = input.lines();

        let snapshot = handle.query_state().await?;
        self.write_snapshot(&mut output, &snapshot).await?;
        self.notice(&mut output, input::HELP).await?;

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        debug!("Input closed");
                        break;
                    };
                    let Some(command) = Command::parse(&line) else {
                        continue;
                    };
                    if command == Command::Quit {
                        break;
                    }
                    self.execute(&handle, command, &mut output).await?;
                }
                event = next_event(&mut combat) => match event {
                    Some(event) => self.write_event(&mut output, &event).await?,
                    None => break,
                },
                event = next_event(&mut matches) => match event {
                    Some(event) => self.write_event(&mut output, &event).await?,
                    None => break,
                },
            }
        }

        output.flush().await?;
        drop(handle);
        info!("Client shutting down");
        self.runtime.shutdown().await?;
        Ok(())
    }

    async fn execute<O>(&mut self, handle: &DuelHandle, command: Command, output: &mut O) -> Result<()>
    where
        O: AsyncWrite + Unpin,
    {
        match command {
            Command::Cast(name) => {
                if let Err(error) = handle.declare_named(Side::Player, &name).await {
                    // Rule rejections come back through the event bus.
                    if error.illegal_action().is_none() {
                        warn!(input = %name, error = %error, "Declaration failed");
                        self.notice(output, &format!("{error}. {}", input::HELP))
                            .await?;
                    }
                }
            }
            Command::Reset => {
                handle.reset().await?;
            }
            Command::Status => {
                let snapshot = handle.query_state().await?;
                self.write_snapshot(output, &snapshot).await?;
                let ready = handle.legal_actions(Side::Player).await?;
                if !ready.is_empty() && self.renderer.format() == EventFormat::Text {
                    let ready = ready.iter().map(ToString::to_string).collect::<Vec<_>>();
                    write_line(output, &format!("ready: {}", ready.join(", "))).await?;
                }
            }
            Command::Help => self.notice(output, input::HELP).await?,
            Command::Quit => {}
        }
        Ok(())
    }

    async fn write_event<O>(&mut self, output: &mut O, event: &Event) -> Result<()>
    where
        O: AsyncWrite + Unpin,
    {
        for line in self.renderer.render(event)? {
            write_line(output, &line).await?;
        }
        Ok(())
    }

    async fn write_snapshot<O>(
        &self,
        output: &mut O,
        snapshot: &duel_core::MatchSnapshot,
    ) -> Result<()>
    where
        O: AsyncWrite + Unpin,
    {
        match self.renderer.format() {
            EventFormat::Text => {
                for line in render::header(snapshot) {
                    write_line(output, &line).await?;
                }
            }
            EventFormat::Json => write_line(output, &serde_json::to_string(snapshot)?).await?,
        }
        Ok(())
    }

    /// Feedback for the human; kept off stdout when it carries JSON.
    async fn notice<O>(&self, output: &mut O, message: &str) -> Result<()>
    where
        O: AsyncWrite + Unpin,
    {
        match self.renderer.format() {
            EventFormat::Text => write_line(output, message).await,
            EventFormat::Json => {
                eprintln!("{message}");
                Ok(())
            }
        }
    }
}

async fn write_line<O>(output: &mut O, line: &str) -> Result<()>
where
    O: AsyncWrite + Unpin,
{
    output.write_all(line.as_bytes()).await?;
    output.write_all(b"\n").await?;
    output.flush().await?;
    Ok(())
}

/// Next event from `rx`, skipping over lag; `None` once the bus is gone.
async fn next_event(rx: &mut broadcast::Receiver<Event>) -> Option<Event> {
    loop {
        match rx.recv().await {
            Ok(event) => return Some(event),
            Err(RecvError::Lagged(skipped)) => {
                warn!(skipped, "Renderer lagged behind the event bus");
            }
            Err(RecvError::Closed) => return None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duel_core::ScriptedRng;
    use duel_runtime::{RuntimeConfig, ScriptedProvider};
    use std::time::Duration;

    async fn transcript(input: &str) -> String {
        let config = RuntimeConfig {
            opponent_delay: Duration::from_secs(60),
            seed: Some(11),
            ..RuntimeConfig::default()
        };
        let runtime = DuelRuntime::builder()
            .config(config)
            .rng(ScriptedRng::always_hit())
            .opponent_provider(ScriptedProvider::new([]))
            .build();
        let client = Client::new(runtime, Renderer::new(EventFormat::Text, "Player", "Opponent"));

        let mut output = Vec::new();
        client
            .run(tokio::io::BufReader::new(input.as_bytes()), &mut output)
            .await
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[tokio::test]
    async fn prints_header_and_help_on_start() {
        let text = transcript("quit\n").await;
        assert!(text.starts_with("== Turn 1 | Player to act =="));
        assert!(text.contains(input::HELP));
    }

    #[tokio::test]
    async fn unknown_spell_is_reported() {
        let text = transcript("meteor\nquit\n").await;
        assert!(text.contains("meteor"));
    }

    #[tokio::test]
    async fn status_lists_ready_spells() {
        let text = transcript("status\nquit\n").await;
        assert!(text.contains("ready: fireball, zap, poison, heal"));
    }
}
