/// Duel configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DuelConfig {
    /// Display name of the human-controlled combatant.
    pub player_name: String,
    /// Display name of the scripted combatant.
    pub opponent_name: String,
    /// Number of entries kept in the match log.
    pub log_capacity: usize,
}

impl DuelConfig {
    // ===== fixed rules =====
    pub const MAX_HP: u32 = 100;
    pub const STARTING_POTIONS: u8 = 3;
    /// Turns of poison applied by a successful Poison cast (overwrites, never stacks).
    pub const POISON_DURATION: u8 = 3;
    /// Damage dealt by each poison tick.
    pub const POISON_TICK_DAMAGE: u32 = 8;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_LOG_CAPACITY: usize = 4;
    pub const DEFAULT_PLAYER_NAME: &'static str = "Player";
    pub const DEFAULT_OPPONENT_NAME: &'static str = "Opponent";

    pub fn new() -> Self {
        Self {
            player_name: Self::DEFAULT_PLAYER_NAME.to_owned(),
            opponent_name: Self::DEFAULT_OPPONENT_NAME.to_owned(),
            log_capacity: Self::DEFAULT_LOG_CAPACITY,
        }
    }

    pub fn with_names(player_name: impl Into<String>, opponent_name: impl Into<String>) -> Self {
        Self {
            player_name: player_name.into(),
            opponent_name: opponent_name.into(),
            ..Self::new()
        }
    }

    pub fn with_log_capacity(mut self, log_capacity: usize) -> Self {
        self.log_capacity = log_capacity.max(1);
        self
    }
}

impl Default for DuelConfig {
    fn default() -> Self {
        Self::new()
    }
}
