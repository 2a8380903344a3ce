//! Terminal stand-in for cast animations.
use std::time::Duration;

use async_trait::async_trait;
use duel_core::CastRequest;
use duel_runtime::PresentationPort;
use tracing::debug;

/// Simulates an animation by waiting a fixed time.
///
/// Nothing is drawn here: the cast line and its flourish come from the
/// [`Renderer`](crate::Renderer) reacting to `CastRequested`, so every line
/// reaches the same writer.
#[derive(Clone, Debug)]
pub struct TextPresenter {
    duration: Duration,
}

impl TextPresenter {
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }
}

#[async_trait]
impl PresentationPort for TextPresenter {
    async fn play_cast(&self, request: CastRequest) {
        debug!(
            side = %request.side,
            spell = %request.spell,
            duration_ms = self.duration.as_millis() as u64,
            "Playing cast animation"
        );
        tokio::time::sleep(self.duration).await;
    }
}
