//! Presentation port: where cast animations are played.
use async_trait::async_trait;
use duel_core::CastRequest;

/// Plays cast animations for a frontend.
///
/// [`play_cast`](PresentationPort::play_cast) is the only suspension point in
/// a turn: the simulation worker resolves the cast once the returned future
/// completes, however many visual steps the frontend runs internally. State
/// changes reach the frontend through the event bus, not through this trait.
#[async_trait]
pub trait PresentationPort: Send + Sync {
    async fn play_cast(&self, request: CastRequest);
}

/// Completes every animation immediately.
#[derive(Clone, Copy, Debug, Default)]
pub struct InstantPresenter;

#[async_trait]
impl PresentationPort for InstantPresenter {
    async fn play_cast(&self, _request: CastRequest) {}
}
