use crate::combat::{EffectKind, EffectOutcome, resolve};
use crate::config::DuelConfig;
use crate::env::{PcgRng, RngSource};
use crate::error::ErrorContext;
use crate::policy;
use crate::spell::{SpellCatalog, SpellId};
use crate::state::{MatchState, Outcome, Side, StatusKind};

use super::{
    CastRequest, Declaration, DuelEvent, ExecuteError, IllegalAction, MatchSnapshot, Phase,
    TurnReport,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct PendingCast {
    side: Side,
    spell: SpellId,
}

/// Owns the match and sequences every turn.
///
/// The controller is the only mutator of [`MatchState`] during play. A turn is
/// declared with [`declare_action`](Self::declare_action), which moves the
/// machine into [`Phase::Animating`]; the presentation layer then calls
/// [`complete_cast`](Self::complete_cast) once its animation has finished and
/// the cast resolves atomically. Any declaration made while a cast is pending
/// is rejected, never queued.
///
/// [`play_turn`](Self::play_turn) collapses both steps for drivers that do not
/// animate.
#[derive(Clone, Debug)]
pub struct TurnController<R = PcgRng> {
    catalog: SpellCatalog,
    config: DuelConfig,
    state: MatchState,
    rng: R,
    pending: Option<PendingCast>,
}

impl TurnController<PcgRng> {
    /// Standard catalog, default config, seeded generator.
    pub fn seeded(seed: u64) -> Self {
        Self::new(SpellCatalog::standard(), DuelConfig::default(), PcgRng::new(seed))
    }
}

impl<R: RngSource> TurnController<R> {
    pub fn new(catalog: SpellCatalog, config: DuelConfig, rng: R) -> Self {
        let state = MatchState::new(&config);
        Self::from_state(catalog, config, state, rng)
    }

    /// Resumes from an arbitrary state, with no cast pending.
    pub fn from_state(catalog: SpellCatalog, config: DuelConfig, state: MatchState, rng: R) -> Self {
        Self {
            catalog,
            config,
            state,
            rng,
            pending: None,
        }
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn catalog(&self) -> &SpellCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &DuelConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        if self.state.outcome.is_terminal() {
            return Phase::MatchOver(self.state.outcome);
        }
        match self.pending {
            Some(PendingCast { side, spell }) => Phase::Animating { side, spell },
            None => Phase::AwaitingAction(self.state.turn_owner),
        }
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot::capture(&self.state, self.phase())
    }

    /// Spells `side` may declare right now.
    ///
    /// Empty unless the match is running, nothing is animating, `side` owns
    /// the turn and is not stunned.
    pub fn legal_actions(&self, side: Side) -> Vec<SpellId> {
        if self.phase() != Phase::AwaitingAction(side) {
            return Vec::new();
        }
        let caster = self.state.combatant(side);
        self.catalog
            .iter()
            .filter(|spell| caster.can_cast(spell))
            .map(|spell| spell.id)
            .collect()
    }

    /// Validates and accepts a declaration.
    ///
    /// A stunned caster loses the turn instead of casting: the stun is
    /// consumed, no cooldown starts, and the turn passes immediately.
    pub fn declare_action(&mut self, side: Side, spell: SpellId) -> Result<Declaration, ExecuteError> {
        self.ensure_can_act(side)?;

        let definition = self.catalog.get(spell)?;
        let caster = self.state.combatant(side);
        if let Some(remaining) = caster.cooldown(spell) {
            return Err(self.reject(side, IllegalAction::OnCooldown { spell, remaining }));
        }

        if caster.is_stunned() {
            return self.forfeit(side).map(Declaration::Skipped);
        }

        // The scripted side may waste a turn on an empty pouch; the human may not.
        if side.is_human() && definition.kind.is_heal() && caster.potions() == 0 {
            return Err(self.reject(side, IllegalAction::NoPotionsLeft { side }));
        }

        let request = CastRequest {
            side,
            spell,
            kind: definition.kind,
            caster: caster.clone(),
            target: self.state.combatant(side.other()).clone(),
        };
        self.pending = Some(PendingCast { side, spell });
        Ok(Declaration::Cast(request))
    }

    /// Completion signal for the pending cast animation; resolves the turn.
    pub fn complete_cast(&mut self) -> Result<TurnReport, ExecuteError> {
        let Some(PendingCast { side, spell: spell_id }) = self.pending else {
            return Err(ExecuteError::illegal(
                IllegalAction::NotAnimating,
                ErrorContext::new(self.state.turn_count)
                    .with_message("completion signal without a pending cast"),
            ));
        };
        let spell = self.catalog.get(spell_id)?;
        self.pending = None;

        let target_side = side.other();
        let mut events = Vec::new();

        let (caster, target) = self.state.pair_mut(side);
        let effect = resolve(spell, caster, target, &mut self.rng);
        events.extend(effect_events(side, &effect, caster.hp(), target.hp()));
        let mut messages = vec![effect.message.clone()];
        caster.apply_cooldown(spell.id, spell.cooldown);

        if let Some(tick) = target.tick_poison(DuelConfig::POISON_TICK_DAMAGE) {
            messages.push(format!("{} took {} poison damage!", target.name, tick.damage));
            events.push(DuelEvent::PoisonTicked {
                side: target_side,
                amount: tick.damage,
                hp: target.hp(),
                turns_remaining: tick.turns_remaining,
            });
            if tick.expired {
                events.push(DuelEvent::StatusExpired {
                    side: target_side,
                    status: StatusKind::Poisoned,
                });
            }
        }

        // The fresh cooldown is ticked too, so it reads one less after the
        // caster's own turn.
        caster.tick_cooldowns();
        target.tick_cooldowns();
        caster.clamp_hp();
        target.clamp_hp();

        let outcome = if target.is_defeated() {
            Outcome::victory_for(side)
        } else if caster.is_defeated() {
            Outcome::defeat_for(side)
        } else {
            Outcome::InProgress
        };

        for message in messages {
            self.state.log.push(message);
        }
        self.finish_turn(outcome, &mut events);

        Ok(TurnReport {
            side,
            effect: Some(effect),
            events,
            snapshot: self.snapshot(),
        })
    }

    /// Declares and resolves in one step, skipping the animation wait.
    pub fn play_turn(&mut self, side: Side, spell: SpellId) -> Result<TurnReport, ExecuteError> {
        match self.declare_action(side, spell)? {
            Declaration::Cast(_) => self.complete_cast(),
            Declaration::Skipped(report) => Ok(report),
        }
    }

    /// Lets the non-human side act with the built-in policy.
    ///
    /// Returns `Ok(None)` when no spell is ready; the side then passes until
    /// the controller is driven again.
    pub fn play_opponent_turn(&mut self) -> Result<Option<TurnReport>, ExecuteError> {
        let side = Side::Opponent;
        self.ensure_can_act(side)?;
        if self.state.opponent.is_stunned() {
            return self.forfeit(side).map(Some);
        }
        match self.choose_opponent_action() {
            Some(spell) => self.play_turn(side, spell).map(Some),
            None => Ok(None),
        }
    }

    /// Draws the non-human side's pick from the controller's own random source.
    pub fn choose_opponent_action(&mut self) -> Option<SpellId> {
        policy::choose_action(&self.state.opponent, &self.catalog, &mut self.rng)
    }

    /// Forfeits a stunned side's turn without naming a spell.
    pub fn skip_stunned_turn(&mut self, side: Side) -> Result<TurnReport, ExecuteError> {
        self.ensure_can_act(side)?;
        if !self.state.combatant(side).is_stunned() {
            return Err(self.reject(side, IllegalAction::NotStunned { side }));
        }
        self.forfeit(side)
    }

    /// Stuns `side`; its next action attempt is lost.
    pub fn stun(&mut self, side: Side) -> Result<Vec<DuelEvent>, ExecuteError> {
        if self.state.outcome.is_terminal() {
            let outcome = self.state.outcome;
            return Err(self.reject(side, IllegalAction::MatchOver { outcome }));
        }
        let combatant = self.state.combatant_mut(side);
        combatant.stun();
        let message = format!("{} is stunned!", combatant.name);
        self.state.log.push(message);
        Ok(vec![DuelEvent::StatusApplied {
            side,
            status: StatusKind::Stunned,
            turns: None,
        }])
    }

    /// Discards the match and starts a fresh one. Any pending cast is dropped.
    pub fn reset(&mut self) -> Vec<DuelEvent> {
        self.state = MatchState::restarted(&self.config);
        self.pending = None;
        vec![
            DuelEvent::MatchReset,
            DuelEvent::TurnChanged {
                owner: self.state.turn_owner,
                turn_count: self.state.turn_count,
            },
        ]
    }

    fn ensure_can_act(&self, side: Side) -> Result<(), ExecuteError> {
        match self.phase() {
            Phase::MatchOver(outcome) => Err(self.reject(side, IllegalAction::MatchOver { outcome })),
            Phase::Animating { side: active, .. } => {
                Err(self.reject(side, IllegalAction::ResolutionInProgress { side: active }))
            }
            Phase::AwaitingAction(owner) if owner != side => {
                Err(self.reject(side, IllegalAction::NotYourTurn { side, owner }))
            }
            Phase::AwaitingAction(_) => Ok(()),
        }
    }

    /// Consumes the stun and hands over the turn. Cooldowns do not tick on a
    /// lost turn.
    fn forfeit(&mut self, side: Side) -> Result<TurnReport, ExecuteError> {
        let combatant = self.state.combatant_mut(side);
        if !combatant.consume_stun() {
            return Err(self.reject(side, IllegalAction::NotStunned { side }));
        }
        let message = format!("{} was stunned and lost the turn!", combatant.name);
        self.state.log.push(message);
        self.state.switch_turn();

        let events = vec![
            DuelEvent::TurnSkipped { side },
            DuelEvent::StatusExpired {
                side,
                status: StatusKind::Stunned,
            },
            DuelEvent::TurnChanged {
                owner: self.state.turn_owner,
                turn_count: self.state.turn_count,
            },
        ];
        Ok(TurnReport {
            side,
            effect: None,
            events,
            snapshot: self.snapshot(),
        })
    }

    fn finish_turn(&mut self, outcome: Outcome, events: &mut Vec<DuelEvent>) {
        if let Some(winner) = outcome.winner() {
            self.state.outcome = outcome;
            let message = format!("{} won the duel!", self.state.combatant(winner).name);
            self.state.log.push(message);
            events.push(DuelEvent::MatchEnded { outcome });
        } else {
            self.state.switch_turn();
            events.push(DuelEvent::TurnChanged {
                owner: self.state.turn_owner,
                turn_count: self.state.turn_count,
            });
        }
        self.state.log.trim();
    }

    fn reject(&self, side: Side, reason: IllegalAction) -> ExecuteError {
        let context = ErrorContext::new(self.state.turn_count).with_side(side);
        ExecuteError::illegal(reason, context)
    }
}

fn effect_events(side: Side, effect: &EffectOutcome, caster_hp: u32, target_hp: u32) -> Vec<DuelEvent> {
    let target = side.other();
    let spell = effect.spell;
    match effect.kind {
        EffectKind::Miss => vec![DuelEvent::SpellMissed { side, spell }],
        EffectKind::Healed {
            amount,
            potions_left,
        } => vec![DuelEvent::HealApplied {
            side,
            amount,
            hp: caster_hp,
            potions_left,
        }],
        EffectKind::HealFizzled => vec![DuelEvent::HealFizzled { side }],
        EffectKind::Poisoned { damage, turns } => vec![
            DuelEvent::DamageDealt {
                target,
                spell,
                amount: damage,
                hp: target_hp,
            },
            DuelEvent::StatusApplied {
                side: target,
                status: StatusKind::Poisoned,
                turns: Some(turns),
            },
        ],
        EffectKind::Damaged { damage } => vec![DuelEvent::DamageDealt {
            target,
            spell,
            amount: damage,
            hp: target_hp,
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::ScriptedRng;
    use crate::error::GameError;

    fn controller(rng: ScriptedRng) -> TurnController<ScriptedRng> {
        TurnController::new(SpellCatalog::standard(), DuelConfig::default(), rng)
    }

    fn controller_with(state: MatchState, rng: ScriptedRng) -> TurnController<ScriptedRng> {
        TurnController::from_state(SpellCatalog::standard(), DuelConfig::default(), state, rng)
    }

    fn reason(error: ExecuteError) -> IllegalAction {
        error.reason().cloned().unwrap()
    }

    #[test]
    fn fireball_hit_passes_turn_and_starts_cooldown() {
        let mut duel = controller(ScriptedRng::always_hit());

        let report = duel.play_turn(Side::Player, SpellId::Fireball).unwrap();

        let state = duel.state();
        assert_eq!(state.opponent.hp(), 70);
        assert_eq!(state.player.cooldown(SpellId::Fireball), Some(2));
        assert_eq!(state.turn_owner, Side::Opponent);
        assert_eq!(state.turn_count, 2);
        assert_eq!(duel.phase(), Phase::AwaitingAction(Side::Opponent));
        assert_eq!(
            report.events,
            vec![
                DuelEvent::DamageDealt {
                    target: Side::Opponent,
                    spell: SpellId::Fireball,
                    amount: 30,
                    hp: 70
                },
                DuelEvent::TurnChanged {
                    owner: Side::Opponent,
                    turn_count: 2
                },
            ]
        );
    }

    #[test]
    fn heal_scenario_spends_last_potion() {
        let mut state = MatchState::default();
        state.player = state.player.clone().with_hp(10).with_potions(1);
        let mut duel = controller_with(state, ScriptedRng::always_hit());

        duel.play_turn(Side::Player, SpellId::Heal).unwrap();

        assert_eq!(duel.state().player.hp(), 35);
        assert_eq!(duel.state().player.potions(), 0);
        assert_eq!(duel.state().turn_owner, Side::Opponent);
    }

    #[test]
    fn miss_only_sets_cooldown() {
        let mut duel = controller(ScriptedRng::always_miss());

        let report = duel.play_turn(Side::Player, SpellId::Poison).unwrap();

        let state = duel.state();
        assert_eq!(state.opponent.hp(), 100);
        assert!(!state.opponent.status().is_poisoned());
        assert_eq!(state.player.potions(), 3);
        assert_eq!(state.player.cooldown(SpellId::Poison), Some(3));
        assert!(report.effect.unwrap().kind.is_miss());
        assert_eq!(state.log.latest(), Some("Player missed Poison!"));
    }

    #[test]
    fn poison_ticks_three_times_then_clears() {
        let mut duel = controller(ScriptedRng::always_hit());

        // Cast turn: 12 impact plus the first tick.
        duel.play_turn(Side::Player, SpellId::Poison).unwrap();
        assert_eq!(duel.state().opponent.hp(), 80);
        assert_eq!(duel.state().opponent.status().poison_turns(), 2);

        duel.play_turn(Side::Opponent, SpellId::Heal).unwrap();
        assert_eq!(duel.state().opponent.status().poison_turns(), 2);

        duel.play_turn(Side::Player, SpellId::Zap).unwrap();
        assert_eq!(duel.state().opponent.hp(), 72);
        assert_eq!(duel.state().opponent.status().poison_turns(), 1);

        duel.play_turn(Side::Opponent, SpellId::Zap).unwrap();
        let report = duel.play_turn(Side::Player, SpellId::Fireball).unwrap();
        assert_eq!(duel.state().opponent.status().poison_turns(), 0);
        assert!(report.events.contains(&DuelEvent::StatusExpired {
            side: Side::Opponent,
            status: StatusKind::Poisoned
        }));
    }

    #[test]
    fn poison_with_one_turn_left_ticks_and_clears() {
        let mut state = MatchState::default();
        state.opponent = state.opponent.clone().with_poison(1);
        let mut duel = controller_with(state, ScriptedRng::always_miss());

        duel.play_turn(Side::Player, SpellId::Zap).unwrap();

        let opponent = &duel.state().opponent;
        assert_eq!(opponent.hp(), 92);
        assert!(opponent.status().is_empty());
        assert_eq!(duel.state().log.latest(), Some("Opponent took 8 poison damage!"));
    }

    #[test]
    fn poison_ticks_on_heal_turns_too() {
        let mut state = MatchState::default();
        state.opponent = state.opponent.clone().with_poison(2);
        state.player = state.player.clone().with_hp(50);
        let mut duel = controller_with(state, ScriptedRng::always_hit());

        duel.play_turn(Side::Player, SpellId::Heal).unwrap();

        assert_eq!(duel.state().player.hp(), 75);
        assert_eq!(duel.state().opponent.hp(), 92);
    }

    #[test]
    fn cooldowns_tick_on_both_sides_every_turn() {
        let mut duel = controller(ScriptedRng::always_hit());

        duel.play_turn(Side::Player, SpellId::Fireball).unwrap();
        assert_eq!(duel.state().player.cooldown(SpellId::Fireball), Some(2));

        duel.play_turn(Side::Opponent, SpellId::Heal).unwrap();
        assert_eq!(duel.state().player.cooldown(SpellId::Fireball), Some(1));
        assert_eq!(duel.state().opponent.cooldown(SpellId::Heal), Some(4));

        let err = duel.play_turn(Side::Player, SpellId::Fireball).unwrap_err();
        assert_eq!(
            reason(err),
            IllegalAction::OnCooldown {
                spell: SpellId::Fireball,
                remaining: 1
            }
        );

        duel.play_turn(Side::Player, SpellId::Zap).unwrap();
        assert!(duel.state().player.is_ready(SpellId::Fireball));
        assert_eq!(duel.state().opponent.cooldown(SpellId::Heal), Some(3));
    }

    #[test]
    fn zap_can_be_recast_every_own_turn() {
        let mut duel = controller(ScriptedRng::always_hit());

        duel.play_turn(Side::Player, SpellId::Zap).unwrap();
        assert_eq!(duel.state().player.cooldown(SpellId::Zap), Some(1));
        duel.play_turn(Side::Opponent, SpellId::Fireball).unwrap();
        assert!(duel.state().player.is_ready(SpellId::Zap));

        duel.play_turn(Side::Player, SpellId::Zap).unwrap();
        assert_eq!(duel.state().opponent.hp(), 60);
        assert_eq!(duel.state().turn_count, 4);
    }

    #[test]
    fn rejected_declarations_do_not_mutate_state() {
        let mut duel = controller(ScriptedRng::always_hit());
        let before = duel.state().clone();

        let err = duel.declare_action(Side::Opponent, SpellId::Zap).unwrap_err();
        assert_eq!(
            reason(err),
            IllegalAction::NotYourTurn {
                side: Side::Opponent,
                owner: Side::Player
            }
        );
        assert_eq!(duel.state(), &before);
    }

    #[test]
    fn declaration_while_animating_is_rejected() {
        let mut duel = controller(ScriptedRng::always_hit());

        let declaration = duel.declare_action(Side::Player, SpellId::Fireball).unwrap();
        let Declaration::Cast(request) = declaration else {
            panic!("unstunned caster should start animating");
        };
        assert_eq!(request.kind, crate::spell::SpellKind::Fire);
        assert_eq!(request.target.hp(), 100);
        assert_eq!(
            request.event(),
            DuelEvent::CastRequested {
                side: Side::Player,
                spell: SpellId::Fireball
            }
        );
        assert_eq!(
            duel.phase(),
            Phase::Animating {
                side: Side::Player,
                spell: SpellId::Fireball
            }
        );
        assert!(duel.legal_actions(Side::Player).is_empty());

        let err = duel.declare_action(Side::Player, SpellId::Zap).unwrap_err();
        assert_eq!(
            reason(err),
            IllegalAction::ResolutionInProgress { side: Side::Player }
        );
        // Nothing resolves before the completion signal.
        assert_eq!(duel.state().opponent.hp(), 100);

        duel.complete_cast().unwrap();
        assert_eq!(duel.state().opponent.hp(), 70);
    }

    #[test]
    fn completion_without_pending_cast_is_rejected() {
        let mut duel = controller(ScriptedRng::always_hit());
        duel.declare_action(Side::Player, SpellId::Zap).unwrap();
        duel.reset();

        let err = duel.complete_cast().unwrap_err();
        assert_eq!(
            err.context().and_then(|context| context.message),
            Some("completion signal without a pending cast")
        );
        assert_eq!(reason(err), IllegalAction::NotAnimating);
        assert_eq!(duel.state().opponent.hp(), 100);
    }

    #[test]
    fn human_cannot_heal_without_potions_but_opponent_can_fizzle() {
        let mut state = MatchState::default();
        state.player = state.player.clone().with_potions(0);
        state.opponent = state.opponent.clone().with_potions(0).with_hp(40);
        let mut duel = controller_with(state, ScriptedRng::always_hit());

        let err = duel.declare_action(Side::Player, SpellId::Heal).unwrap_err();
        assert_eq!(reason(err), IllegalAction::NoPotionsLeft { side: Side::Player });
        assert!(!duel.legal_actions(Side::Player).contains(&SpellId::Heal));

        duel.play_turn(Side::Player, SpellId::Zap).unwrap();
        let report = duel.play_turn(Side::Opponent, SpellId::Heal).unwrap();

        let opponent = &duel.state().opponent;
        assert_eq!(opponent.hp(), 20);
        assert_eq!(opponent.potions(), 0);
        assert_eq!(opponent.cooldown(SpellId::Heal), Some(4));
        assert!(report.events.contains(&DuelEvent::HealFizzled { side: Side::Opponent }));
    }

    #[test]
    fn stun_skips_exactly_one_turn_without_cooldown() {
        let mut duel = controller(ScriptedRng::always_hit());
        duel.stun(Side::Player).unwrap();
        assert!(duel.legal_actions(Side::Player).is_empty());

        let declaration = duel.declare_action(Side::Player, SpellId::Fireball).unwrap();
        let Declaration::Skipped(report) = declaration else {
            panic!("stunned caster should lose the turn");
        };
        assert!(report.was_skipped());

        let state = duel.state();
        assert!(state.player.cooldowns().is_empty());
        assert!(!state.player.is_stunned());
        assert_eq!(state.opponent.hp(), 100);
        assert_eq!(state.turn_owner, Side::Opponent);
        assert_eq!(state.turn_count, 2);
        assert_eq!(state.log.latest(), Some("Player was stunned and lost the turn!"));

        duel.play_turn(Side::Opponent, SpellId::Zap).unwrap();
        duel.play_turn(Side::Player, SpellId::Fireball).unwrap();
        assert_eq!(duel.state().opponent.hp(), 70);
    }

    #[test]
    fn stunned_opponent_forfeits_before_the_policy_draws() {
        let mut duel = controller(ScriptedRng::new([ScriptedRng::HIT, 0.5]));
        duel.play_turn(Side::Player, SpellId::Zap).unwrap();
        duel.stun(Side::Opponent).unwrap();

        let report = duel.play_opponent_turn().unwrap().unwrap();

        assert!(report.was_skipped());
        assert_eq!(
            report.events,
            vec![
                DuelEvent::TurnSkipped {
                    side: Side::Opponent
                },
                DuelEvent::StatusExpired {
                    side: Side::Opponent,
                    status: StatusKind::Stunned
                },
                DuelEvent::TurnChanged {
                    owner: Side::Player,
                    turn_count: 3
                },
            ]
        );
        let state = duel.state();
        assert!(state.opponent.cooldowns().is_empty());
        assert_eq!(state.player.hp(), 100);
        assert_eq!(state.turn_owner, Side::Player);
        // The policy never drew its pick.
        assert_eq!(duel.rng.remaining(), 1);
    }

    #[test]
    fn skip_stunned_turn_requires_a_stun() {
        let mut duel = controller(ScriptedRng::always_hit());
        let err = duel.skip_stunned_turn(Side::Player).unwrap_err();
        assert_eq!(reason(err), IllegalAction::NotStunned { side: Side::Player });

        duel.stun(Side::Player).unwrap();
        let report = duel.skip_stunned_turn(Side::Player).unwrap();
        assert_eq!(report.snapshot.turn_owner, Side::Opponent);
        assert_eq!(report.events[0], DuelEvent::TurnSkipped { side: Side::Player });
    }

    #[test]
    fn lethal_hit_ends_match_and_freezes_turn_count() {
        let mut state = MatchState::default();
        state.opponent = state.opponent.clone().with_hp(25);
        let mut duel = controller_with(state, ScriptedRng::always_hit());

        let report = duel.play_turn(Side::Player, SpellId::Fireball).unwrap();

        assert_eq!(report.outcome(), Outcome::PlayerVictory);
        assert_eq!(duel.state().opponent.hp(), 0);
        assert_eq!(duel.state().turn_count, 1);
        assert_eq!(duel.phase(), Phase::MatchOver(Outcome::PlayerVictory));
        assert_eq!(duel.state().log.latest(), Some("Player won the duel!"));
        assert!(report.events.contains(&DuelEvent::MatchEnded {
            outcome: Outcome::PlayerVictory
        }));

        let err = duel.declare_action(Side::Opponent, SpellId::Zap).unwrap_err();
        assert!(matches!(reason(err), IllegalAction::MatchOver { .. }));
        assert!(duel.stun(Side::Opponent).is_err());
        assert_eq!(duel.state().turn_count, 1);
    }

    #[test]
    fn target_defeat_wins_the_tie_when_both_fall() {
        let mut state = MatchState::default();
        state.player = state.player.clone().with_hp(0);
        state.opponent = state.opponent.clone().with_hp(10);
        let mut duel = controller_with(state, ScriptedRng::always_hit());

        let report = duel.play_turn(Side::Player, SpellId::Zap).unwrap();

        assert_eq!(report.outcome(), Outcome::PlayerVictory);
        assert_eq!(duel.state().player.hp(), 0);
        assert_eq!(duel.state().opponent.hp(), 0);
        assert_eq!(duel.state().log.latest(), Some("Player won the duel!"));
    }

    #[test]
    fn fallen_caster_loses_when_the_target_survives() {
        let mut state = MatchState::default();
        state.player = state.player.clone().with_hp(0);
        let mut duel = controller_with(state, ScriptedRng::always_hit());

        let report = duel.play_turn(Side::Player, SpellId::Zap).unwrap();

        assert_eq!(report.outcome(), Outcome::PlayerDefeat);
        assert_eq!(duel.state().opponent.hp(), 80);
        assert_eq!(duel.state().turn_count, 1);
        assert_eq!(duel.phase(), Phase::MatchOver(Outcome::PlayerDefeat));
        assert_eq!(duel.state().log.latest(), Some("Opponent won the duel!"));
    }

    #[test]
    fn poison_tick_can_finish_the_target() {
        let mut state = MatchState::default();
        state.player = state.player.clone().with_hp(5).with_poison(2);
        state.turn_owner = Side::Opponent;
        let mut duel = controller_with(state, ScriptedRng::always_miss());

        let report = duel.play_turn(Side::Opponent, SpellId::Zap).unwrap();

        assert_eq!(report.outcome(), Outcome::PlayerDefeat);
        assert_eq!(duel.state().player.hp(), 0);
    }

    #[test]
    fn log_keeps_only_the_latest_entries() {
        let mut duel = controller(ScriptedRng::always_miss());
        for _ in 0..3 {
            duel.play_turn(Side::Player, SpellId::Fireball).ok();
            duel.play_turn(Side::Opponent, SpellId::Zap).ok();
            duel.play_turn(Side::Player, SpellId::Zap).ok();
            duel.play_turn(Side::Opponent, SpellId::Poison).ok();
        }
        assert_eq!(duel.state().log.len(), DuelConfig::DEFAULT_LOG_CAPACITY);
        assert!(duel.state().log.iter().all(|line| line != MatchState::OPENING_MESSAGE));
    }

    #[test]
    fn reset_restores_a_fresh_match() {
        let mut duel = controller(ScriptedRng::always_hit());
        duel.play_turn(Side::Player, SpellId::Poison).unwrap();
        duel.play_turn(Side::Opponent, SpellId::Heal).unwrap();
        duel.stun(Side::Player).unwrap();

        let events = duel.reset();

        assert_eq!(events[0], DuelEvent::MatchReset);
        let state = duel.state();
        for side in [Side::Player, Side::Opponent] {
            let mage = state.combatant(side);
            assert_eq!(mage.hp(), 100);
            assert_eq!(mage.potions(), 3);
            assert!(mage.cooldowns().is_empty());
            assert!(mage.status().is_empty());
        }
        assert_eq!(state.turn_count, 1);
        assert_eq!(state.turn_owner, Side::Player);
        assert_eq!(state.outcome, Outcome::InProgress);
        assert_eq!(state.log.iter().collect::<Vec<_>>(), vec![MatchState::RESTART_MESSAGE]);
    }

    #[test]
    fn legal_actions_track_turn_and_readiness() {
        let mut duel = controller(ScriptedRng::always_hit());
        assert_eq!(duel.legal_actions(Side::Player).len(), 4);
        assert!(duel.legal_actions(Side::Opponent).is_empty());

        duel.play_turn(Side::Player, SpellId::Fireball).unwrap();
        duel.play_turn(Side::Opponent, SpellId::Zap).unwrap();

        assert_eq!(
            duel.legal_actions(Side::Player),
            vec![SpellId::Zap, SpellId::Poison, SpellId::Heal]
        );
    }

    #[test]
    fn opponent_turn_uses_policy_pick() {
        let mut duel = controller(ScriptedRng::always_hit());
        duel.play_turn(Side::Player, SpellId::Zap).unwrap();

        // pick_index draws 0.0 -> first ready spell; the accuracy roll hits.
        let report = duel.play_opponent_turn().unwrap().unwrap();

        assert_eq!(report.effect.unwrap().spell, SpellId::Fireball);
        assert_eq!(duel.state().player.hp(), 70);
        assert_eq!(duel.state().turn_owner, Side::Player);
    }

    #[test]
    fn opponent_with_nothing_ready_passes() {
        let mut state = MatchState::default();
        state.turn_owner = Side::Opponent;
        state.opponent = state
            .opponent
            .clone()
            .with_cooldown(SpellId::Fireball, 1)
            .with_cooldown(SpellId::Zap, 1)
            .with_cooldown(SpellId::Poison, 1)
            .with_cooldown(SpellId::Heal, 1);
        let mut duel = controller_with(state, ScriptedRng::always_hit());

        assert_eq!(duel.play_opponent_turn().unwrap(), None);
        assert_eq!(duel.state().turn_owner, Side::Opponent);
    }

    #[test]
    fn seeded_matches_are_reproducible() {
        let play = |seed| {
            let mut duel = TurnController::seeded(seed);
            let spells = [SpellId::Fireball, SpellId::Zap, SpellId::Poison];
            let mut turn = 0;
            while duel.state().is_in_progress() && turn < 40 {
                let side = duel.state().turn_owner;
                let spell = if side.is_human() {
                    duel.legal_actions(side).into_iter().find(|id| spells.contains(id))
                } else {
                    duel.choose_opponent_action()
                };
                match spell {
                    Some(spell) => {
                        duel.play_turn(side, spell).unwrap();
                    }
                    None => break,
                }
                turn += 1;
            }
            duel.snapshot()
        };

        assert_eq!(play(7), play(7));
    }
}
