//! Simulation worker that owns the authoritative [`duel_core::TurnController`].
//!
//! Receives commands from [`DuelHandle`](crate::DuelHandle), hands accepted
//! casts to the [`PresentationPort`], resolves them once the animation
//! completes, drives the non-human side, and publishes events to the EventBus.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use duel_core::{
    Declaration, DuelEvent, MatchSnapshot, Phase, RngSource, Side, SpellId, TurnController,
    TurnReport,
};

use crate::api::{ActionProvider, PresentationPort, Result};
use crate::events::{Event, EventBus, MatchEvent};

/// Commands that can be sent to the simulation worker
pub enum Command {
    /// Declare a spell. Replies once the declaration is accepted or rejected.
    DeclareAction {
        side: Side,
        spell: SpellId,
        reply: oneshot::Sender<Result<()>>,
    },
    /// Start a fresh match; replies with its snapshot.
    Reset { reply: oneshot::Sender<MatchSnapshot> },
    /// Spells the side may declare right now.
    LegalActions {
        side: Side,
        reply: oneshot::Sender<Vec<SpellId>>,
    },
    /// Apply the stun status to a side.
    Stun {
        side: Side,
        reply: oneshot::Sender<Result<()>>,
    },
    /// Query the current match (read-only).
    QueryState { reply: oneshot::Sender<MatchSnapshot> },
}

/// Something the worker is waiting on besides commands.
enum Wake {
    /// The presenter finished the pending cast animation.
    CastAnimated,
    /// The opponent's pacing delay elapsed.
    OpponentDue,
    /// The opponent provider answered.
    OpponentChose(Result<Option<SpellId>>),
}

type PendingWake = Pin<Box<dyn Future<Output = Wake> + Send>>;

/// Controller with a type-erased random source, so tests can script rolls.
pub type DuelController = TurnController<Box<dyn RngSource + Send>>;

/// Background task that processes duel commands.
///
/// Exactly one future (a cast animation or the opponent's pacing delay) is
/// pending at a time. Commands keep flowing while it runs, so a concurrent
/// declaration reaches the controller and is rejected there rather than
/// queued behind the animation.
pub struct SimulationWorker {
    controller: DuelController,
    presenter: Arc<dyn PresentationPort>,
    opponent: Arc<dyn ActionProvider>,
    opponent_delay: Duration,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
    pending: Option<PendingWake>,
}

impl SimulationWorker {
    /// Creates a new simulation worker.
    pub fn new(
        controller: DuelController,
        presenter: Arc<dyn PresentationPort>,
        opponent: Arc<dyn ActionProvider>,
        opponent_delay: Duration,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            controller,
            presenter,
            opponent,
            opponent_delay,
            command_rx,
            event_bus,
            pending: None,
        }
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        let state = self.controller.state();
        info!(
            player = %state.player.name,
            opponent = %state.opponent.name,
            "Duel started"
        );
        self.publish_state();
        self.advance();

        loop {
            tokio::select! {
                command = self.command_rx.recv() => match command {
                    Some(command) => self.handle_command(command),
                    None => break,
                },
                wake = next_wake(&mut self.pending) => {
                    self.pending = None;
                    self.handle_wake(wake);
                }
            }
        }

        debug!("Command channel closed, simulation worker stopping");
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::DeclareAction { side, spell, reply } => {
                let result = self.declare(side, spell);
                if reply.send(result).is_err() {
                    debug!("DeclareAction reply channel closed (caller dropped)");
                }
            }
            Command::Reset { reply } => {
                let snapshot = self.reset();
                if reply.send(snapshot).is_err() {
                    debug!("Reset reply channel closed (caller dropped)");
                }
            }
            Command::LegalActions { side, reply } => {
                if reply.send(self.controller.legal_actions(side)).is_err() {
                    debug!("LegalActions reply channel closed (caller dropped)");
                }
            }
            Command::Stun { side, reply } => {
                let result = self.stun(side);
                if reply.send(result).is_err() {
                    debug!("Stun reply channel closed (caller dropped)");
                }
            }
            Command::QueryState { reply } => {
                if reply.send(self.controller.snapshot()).is_err() {
                    debug!("QueryState reply channel closed (caller dropped)");
                }
            }
        }
    }

    fn handle_wake(&mut self, wake: Wake) {
        match wake {
            Wake::CastAnimated => match self.controller.complete_cast() {
                Ok(report) => {
                    debug!(
                        side = %report.side,
                        turn = report.snapshot.turn_count,
                        "Cast resolved"
                    );
                    self.publish_report(&report);
                    self.advance();
                }
                Err(error) => warn!(error = %error, "Animation completed with no cast pending"),
            },
            Wake::OpponentDue => self.opponent_turn(),
            Wake::OpponentChose(Ok(Some(spell))) => {
                // Rejections are already logged and published by `declare`.
                let _ = self.declare(Side::Opponent, spell);
            }
            Wake::OpponentChose(Ok(None)) => {
                warn!("Opponent has no ready spell; waiting for the next state change");
            }
            Wake::OpponentChose(Err(error)) => {
                warn!(error = %error, "Opponent provider failed");
            }
        }
    }

    fn declare(&mut self, side: Side, spell: SpellId) -> Result<()> {
        match self.controller.declare_action(side, spell) {
            Ok(Declaration::Cast(request)) => {
                debug!(side = %side, spell = %spell, "Declaration accepted, animating");
                self.event_bus.publish(Event::Combat(request.event()));
                self.publish_state();

                let presenter = Arc::clone(&self.presenter);
                self.pending = Some(Box::pin(async move {
                    presenter.play_cast(request).await;
                    Wake::CastAnimated
                }));
                Ok(())
            }
            Ok(Declaration::Skipped(report)) => {
                debug!(side = %side, "Stunned caster lost the turn");
                self.publish_report(&report);
                self.advance();
                Ok(())
            }
            Err(error) => {
                warn!(side = %side, spell = %spell, error = %error, "Declaration rejected");
                if let Some(reason) = error.reason() {
                    self.event_bus.publish(Event::Match(MatchEvent::rejected(
                        side,
                        Some(spell),
                        reason,
                    )));
                }
                Err(error.into())
            }
        }
    }

    fn reset(&mut self) -> MatchSnapshot {
        self.pending = None;
        for event in self.controller.reset() {
            self.event_bus.publish(Event::Combat(event));
        }
        info!("Match reset");
        self.publish_state();
        self.advance();
        self.controller.snapshot()
    }

    fn stun(&mut self, side: Side) -> Result<()> {
        match self.controller.stun(side) {
            Ok(events) => {
                debug!(side = %side, "Stun applied");
                for event in events {
                    self.event_bus.publish(Event::Combat(event));
                }
                self.publish_state();
                self.advance();
                Ok(())
            }
            Err(error) => {
                warn!(side = %side, error = %error, "Stun rejected");
                Err(error.into())
            }
        }
    }

    /// Moves the match forward until it needs outside input.
    ///
    /// Forfeits the human side's turn while it is stunned (no spell is legal
    /// for it) and schedules the non-human side when it is on turn.
    fn advance(&mut self) {
        loop {
            let phase = self.controller.phase();
            if let Phase::MatchOver(outcome) = phase {
                info!(outcome = %outcome, "Match ended");
                return;
            }
            let Some(side) = phase.awaiting() else {
                return;
            };

            if !side.is_human() {
                if self.pending.is_none() {
                    self.schedule_opponent(side);
                }
                return;
            }
            if !self.controller.state().combatant(side).is_stunned() || !self.forfeit(side) {
                return;
            }
        }
    }

    fn schedule_opponent(&mut self, side: Side) {
        let delay = self.opponent_delay;
        debug!(side = %side, delay_ms = delay.as_millis() as u64, "Scheduling opponent turn");

        self.pending = Some(Box::pin(async move {
            tokio::time::sleep(delay).await;
            Wake::OpponentDue
        }));
    }

    /// The opponent is due: a stun is consumed before the provider is asked,
    /// the same order the controller's own opponent turn uses.
    fn opponent_turn(&mut self) {
        let side = Side::Opponent;
        if self.controller.phase().awaiting() != Some(side) {
            return;
        }
        if self.controller.state().combatant(side).is_stunned() {
            if self.forfeit(side) {
                self.advance();
            }
            return;
        }

        let provider = Arc::clone(&self.opponent);
        let snapshot = self.controller.snapshot();
        self.pending = Some(Box::pin(async move {
            Wake::OpponentChose(provider.provide_action(side, &snapshot).await)
        }));
    }

    fn forfeit(&mut self, side: Side) -> bool {
        match self.controller.skip_stunned_turn(side) {
            Ok(report) => {
                debug!(side = %side, "Forfeited stunned turn");
                self.publish_report(&report);
                true
            }
            Err(error) => {
                warn!(side = %side, error = %error, "Failed to forfeit stunned turn");
                false
            }
        }
    }

    fn publish_report(&self, report: &TurnReport) {
        for event in &report.events {
            if let DuelEvent::MatchEnded { outcome } = event {
                self.event_bus
                    .publish(Event::Match(MatchEvent::MatchEnded { outcome: *outcome }));
            }
            self.event_bus.publish(Event::Combat(event.clone()));
        }
        self.event_bus
            .publish(Event::Match(MatchEvent::StateChanged(Box::new(
                report.snapshot.clone(),
            ))));
    }

    fn publish_state(&self) {
        self.event_bus
            .publish(Event::Match(MatchEvent::StateChanged(Box::new(
                self.controller.snapshot(),
            ))));
    }
}

async fn next_wake(pending: &mut Option<PendingWake>) -> Wake {
    match pending {
        Some(future) => future.await,
        None => std::future::pending().await,
    }
}
