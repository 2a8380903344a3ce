//! Turns runtime events into lines for the terminal.

use duel_core::{
    Combatant, DuelEvent, MatchSnapshot, Outcome, Side, SpellCatalog, SpellKind, StatusKind,
};
use duel_runtime::{Event, MatchEvent};

use crate::config::EventFormat;

/// Stateful event renderer.
///
/// Keeps the combatant names from the latest snapshot so combat events,
/// which only carry a [`Side`], read naturally.
pub struct Renderer {
    format: EventFormat,
    catalog: SpellCatalog,
    player: String,
    opponent: String,
}

impl Renderer {
    pub fn new(format: EventFormat, player: impl Into<String>, opponent: impl Into<String>) -> Self {
        Self {
            format,
            catalog: SpellCatalog::standard(),
            player: player.into(),
            opponent: opponent.into(),
        }
    }

    pub fn format(&self) -> EventFormat {
        self.format
    }

    /// Lines to print for `event`; empty when the event is not shown.
    pub fn render(&mut self, event: &Event) -> serde_json::Result<Vec<String>> {
        if let Event::Match(MatchEvent::StateChanged(snapshot)) = event {
            self.player.clone_from(&snapshot.player.name);
            self.opponent.clone_from(&snapshot.opponent.name);
        }

        match self.format {
            EventFormat::Json => Ok(vec![serde_json::to_string(event)?]),
            EventFormat::Text => Ok(match event {
                Event::Combat(event) => self.combat_lines(event),
                Event::Match(event) => self.match_lines(event),
            }),
        }
    }

    fn name(&self, side: Side) -> &str {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }

    fn combat_lines(&self, event: &DuelEvent) -> Vec<String> {
        let line = match *event {
            DuelEvent::CastRequested { side, spell } => {
                let mut lines = vec![format!("{} casts {}...", self.name(side), spell)];
                if let Ok(spell) = self.catalog.get(spell) {
                    lines.push(flourish(spell.kind).to_owned());
                }
                return lines;
            }
            DuelEvent::SpellMissed { side, spell } => {
                format!("{}'s {} missed!", self.name(side), spell)
            }
            DuelEvent::DamageDealt {
                target,
                spell,
                amount,
                hp,
            } => format!(
                "{} takes {} damage from {} ({} hp left)",
                self.name(target),
                amount,
                spell,
                hp
            ),
            DuelEvent::HealApplied {
                side,
                amount,
                hp,
                potions_left,
            } => format!(
                "{} heals {} hp ({} hp, {} potions left)",
                self.name(side),
                amount,
                hp,
                potions_left
            ),
            DuelEvent::HealFizzled { side } => {
                format!("{} has no potions left!", self.name(side))
            }
            DuelEvent::StatusApplied {
                side,
                status: StatusKind::Poisoned,
                turns,
            } => format!(
                "{} is poisoned for {} turns",
                self.name(side),
                turns.unwrap_or_default()
            ),
            DuelEvent::StatusApplied {
                side,
                status: StatusKind::Stunned,
                ..
            } => format!("{} is stunned!", self.name(side)),
            DuelEvent::StatusExpired { side, status } => {
                format!("{} is no longer {}", self.name(side), status)
            }
            DuelEvent::PoisonTicked {
                side, amount, hp, ..
            } => format!(
                "{} takes {} poison damage ({} hp left)",
                self.name(side),
                amount,
                hp
            ),
            DuelEvent::TurnSkipped { side } => {
                format!("{} is stunned and loses the turn", self.name(side))
            }
            DuelEvent::TurnChanged { owner, turn_count } => {
                format!("-- turn {}: {} --", turn_count, self.name(owner))
            }
            DuelEvent::MatchEnded { outcome } => match outcome.winner() {
                Some(winner) => format!("{} won the duel!", self.name(winner)),
                None => return Vec::new(),
            },
            DuelEvent::MatchReset => "The duel has restarted!".to_owned(),
        };
        vec![line]
    }

    fn match_lines(&self, event: &MatchEvent) -> Vec<String> {
        match event {
            // Only redraw the header when the human has to decide something.
            MatchEvent::StateChanged(snapshot)
                if snapshot.phase.awaiting() == Some(Side::Player) || snapshot.phase.is_over() =>
            {
                header(snapshot)
            }
            MatchEvent::StateChanged(_) => Vec::new(),
            // Already announced through the combat topic.
            MatchEvent::MatchEnded { .. } => Vec::new(),
            MatchEvent::ActionRejected { side, reason, .. } if side.is_human() => {
                vec![format!("Cannot do that: {reason}")]
            }
            MatchEvent::ActionRejected { .. } => Vec::new(),
        }
    }
}

/// One-line stand-in for a spell's animation.
pub fn flourish(kind: SpellKind) -> &'static str {
    match kind {
        SpellKind::Fire => "   ~~~~)))  *FWOOSH*",
        SpellKind::Lightning => "   -/\\/\\/->  *CRACK*",
        SpellKind::Poison => "   ~o~o~o~  *hiss*",
        SpellKind::Heal => "   + + + +  *glow*",
    }
}

/// Status block: turn line plus one line per combatant.
pub fn header(snapshot: &MatchSnapshot) -> Vec<String> {
    let turn = match snapshot.outcome {
        Outcome::InProgress => format!(
            "== Turn {} | {} to act ==",
            snapshot.turn_count,
            snapshot.combatant(snapshot.turn_owner).name
        ),
        outcome => format!("== Turn {} | {} ==", snapshot.turn_count, outcome),
    };
    vec![
        turn,
        combatant_line(&snapshot.player),
        combatant_line(&snapshot.opponent),
    ]
}

fn combatant_line(combatant: &Combatant) -> String {
    let cooldowns = combatant
        .cooldowns()
        .iter()
        .map(|entry| format!("{} {}", entry.spell, entry.remaining))
        .collect::<Vec<_>>();
    let cooldowns = if cooldowns.is_empty() {
        "-".to_owned()
    } else {
        cooldowns.join(", ")
    };

    let mut status = Vec::new();
    if combatant.status().is_poisoned() {
        status.push(format!("poisoned({})", combatant.status().poison_turns()));
    }
    if combatant.is_stunned() {
        status.push("stunned".to_owned());
    }
    let status = if status.is_empty() {
        "-".to_owned()
    } else {
        status.join(", ")
    };

    format!(
        "{:<10} {:>3}/{} hp | potions {} | cooldowns: {} | status: {}",
        combatant.name,
        combatant.hp(),
        combatant.max_hp(),
        combatant.potions(),
        cooldowns,
        status
    )
}
