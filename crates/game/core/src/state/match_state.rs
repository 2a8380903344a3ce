use std::collections::VecDeque;

use strum::{Display, EnumIter, IntoStaticStr};

use super::Combatant;
use crate::config::DuelConfig;

/// Which participant a value refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    /// Human-controlled side.
    Player,
    /// Scripted side driven by the opponent policy.
    Opponent,
}

impl Side {
    pub const fn other(self) -> Self {
        match self {
            Self::Player => Self::Opponent,
            Self::Opponent => Self::Player,
        }
    }

    pub const fn is_human(self) -> bool {
        matches!(self, Self::Player)
    }
}

/// Match result. Terminal once it leaves `InProgress`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    #[default]
    InProgress,
    PlayerVictory,
    PlayerDefeat,
}

impl Outcome {
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::InProgress)
    }

    /// Outcome in which `side` won.
    pub const fn victory_for(side: Side) -> Self {
        match side {
            Side::Player => Self::PlayerVictory,
            Side::Opponent => Self::PlayerDefeat,
        }
    }

    /// Outcome in which `side` lost.
    pub const fn defeat_for(side: Side) -> Self {
        Self::victory_for(side.other())
    }

    pub const fn winner(self) -> Option<Side> {
        match self {
            Self::InProgress => None,
            Self::PlayerVictory => Some(Side::Player),
            Self::PlayerDefeat => Some(Side::Opponent),
        }
    }
}

/// Bounded display log; the oldest entry is dropped first.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchLog {
    entries: VecDeque<String>,
    capacity: usize,
}

impl MatchLog {
    pub fn new(capacity: usize) -> Self {
        let bounded_capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(bounded_capacity + 1),
            capacity: bounded_capacity,
        }
    }

    pub fn with_entry(capacity: usize, message: impl Into<String>) -> Self {
        let mut log = Self::new(capacity);
        log.push(message);
        log
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.entries.push_back(message.into());
        self.trim();
    }

    /// Drops entries beyond capacity, oldest first.
    pub fn trim(&mut self) {
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn latest(&self) -> Option<&str> {
        self.entries.back().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Canonical state of one match.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchState {
    pub player: Combatant,
    pub opponent: Combatant,
    pub turn_owner: Side,
    /// Starts at 1; incremented each time a resolved turn hands over ownership.
    pub turn_count: u32,
    pub outcome: Outcome,
    pub log: MatchLog,
}

impl MatchState {
    pub const OPENING_MESSAGE: &'static str = "The duel has begun!";
    pub const RESTART_MESSAGE: &'static str = "The duel has restarted!";

    /// Fresh match with default stats, the player to act first.
    pub fn new(config: &DuelConfig) -> Self {
        Self::with_log_entry(config, Self::OPENING_MESSAGE)
    }

    /// Fresh match whose log starts with the restart notice.
    pub fn restarted(config: &DuelConfig) -> Self {
        Self::with_log_entry(config, Self::RESTART_MESSAGE)
    }

    fn with_log_entry(config: &DuelConfig, message: &str) -> Self {
        Self {
            player: Combatant::new(config.player_name.clone()),
            opponent: Combatant::new(config.opponent_name.clone()),
            turn_owner: Side::Player,
            turn_count: 1,
            outcome: Outcome::InProgress,
            log: MatchLog::with_entry(config.log_capacity, message),
        }
    }

    pub fn combatant(&self, side: Side) -> &Combatant {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }

    pub fn combatant_mut(&mut self, side: Side) -> &mut Combatant {
        match side {
            Side::Player => &mut self.player,
            Side::Opponent => &mut self.opponent,
        }
    }

    /// Mutable access to `(caster, target)` for the given acting side.
    pub fn pair_mut(&mut self, caster: Side) -> (&mut Combatant, &mut Combatant) {
        match caster {
            Side::Player => (&mut self.player, &mut self.opponent),
            Side::Opponent => (&mut self.opponent, &mut self.player),
        }
    }

    pub fn is_in_progress(&self) -> bool {
        !self.outcome.is_terminal()
    }

    /// Hands the turn to the other side and advances the turn counter.
    pub fn switch_turn(&mut self) {
        self.turn_owner = self.turn_owner.other();
        self.turn_count += 1;
    }
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new(&DuelConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_drops_oldest_entries() {
        let mut log = MatchLog::new(4);
        for i in 0..6 {
            log.push(format!("event {i}"));
        }
        let entries: Vec<_> = log.iter().collect();
        assert_eq!(entries, vec!["event 2", "event 3", "event 4", "event 5"]);
        assert_eq!(log.latest(), Some("event 5"));
    }

    #[test]
    fn new_match_starts_with_player_on_turn_one() {
        let state = MatchState::default();
        assert_eq!(state.turn_owner, Side::Player);
        assert_eq!(state.turn_count, 1);
        assert_eq!(state.outcome, Outcome::InProgress);
        assert_eq!(state.log.latest(), Some(MatchState::OPENING_MESSAGE));
        assert_eq!(state.player.name, "Player");
        assert_eq!(state.opponent.name, "Opponent");
    }

    #[test]
    fn outcome_helpers() {
        assert_eq!(Outcome::victory_for(Side::Opponent), Outcome::PlayerDefeat);
        assert_eq!(Outcome::defeat_for(Side::Opponent), Outcome::PlayerVictory);
        assert_eq!(Outcome::PlayerDefeat.winner(), Some(Side::Opponent));
        assert!(!Outcome::InProgress.is_terminal());
    }

    #[test]
    fn switch_turn_flips_owner_and_counts() {
        let mut state = MatchState::default();
        state.switch_turn();
        assert_eq!(state.turn_owner, Side::Opponent);
        assert_eq!(state.turn_count, 2);
    }
}
