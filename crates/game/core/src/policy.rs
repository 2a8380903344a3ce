//! Spell selection for the non-human side.

use crate::env::RngSource;
use crate::spell::{SpellCatalog, SpellId};
use crate::state::Combatant;

/// Decides which spell the non-human side declares.
///
/// Returning `None` means "no action available"; a policy never fails.
pub trait OpponentPolicy {
    fn choose(
        &mut self,
        opponent: &Combatant,
        catalog: &SpellCatalog,
        rng: &mut dyn RngSource,
    ) -> Option<SpellId>;
}

/// Picks uniformly among spells whose cooldown has expired.
///
/// Readiness is the only filter: Heal stays eligible with an empty potion
/// pouch and fizzles when cast.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RandomReadyPolicy;

impl OpponentPolicy for RandomReadyPolicy {
    fn choose(
        &mut self,
        opponent: &Combatant,
        catalog: &SpellCatalog,
        rng: &mut dyn RngSource,
    ) -> Option<SpellId> {
        choose_action(opponent, catalog, rng)
    }
}

/// Uniform pick among the ready spells, drawing one value from `rng` when at
/// least one spell is ready and none otherwise.
pub fn choose_action(
    opponent: &Combatant,
    catalog: &SpellCatalog,
    mut rng: impl RngSource,
) -> Option<SpellId> {
    let ready: Vec<SpellId> = catalog.ids().filter(|id| opponent.is_ready(*id)).collect();
    if ready.is_empty() {
        return None;
    }
    Some(ready[rng.pick_index(ready.len())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    use crate::env::{PcgRng, ScriptedRng};

    #[test]
    fn picks_only_ready_spells() {
        let catalog = SpellCatalog::standard();
        let opponent = Combatant::new("Opponent")
            .with_cooldown(SpellId::Fireball, 2)
            .with_cooldown(SpellId::Poison, 1);
        let mut rng = PcgRng::new(11);
        for _ in 0..200 {
            let pick = choose_action(&opponent, &catalog, &mut rng).unwrap();
            assert!(matches!(pick, SpellId::Zap | SpellId::Heal));
        }
    }

    #[test]
    fn heal_is_eligible_without_potions() {
        let catalog = SpellCatalog::standard();
        let opponent = Combatant::new("Opponent")
            .with_potions(0)
            .with_cooldown(SpellId::Fireball, 1)
            .with_cooldown(SpellId::Zap, 1)
            .with_cooldown(SpellId::Poison, 1);

        let pick = choose_action(&opponent, &catalog, ScriptedRng::always_hit());
        assert_eq!(pick, Some(SpellId::Heal));
    }

    #[test]
    fn no_ready_spell_yields_none_without_drawing() {
        let catalog = SpellCatalog::standard();
        let opponent = SpellId::iter().fold(Combatant::new("Opponent"), |mage, id| {
            mage.with_cooldown(id, 2)
        });
        let mut rng = ScriptedRng::new([0.5]);

        assert_eq!(choose_action(&opponent, &catalog, &mut rng), None);
        assert_eq!(rng.remaining(), 1);
    }

    #[test]
    fn selection_is_uniform_over_scripted_rolls() {
        let catalog = SpellCatalog::standard();
        let opponent = Combatant::new("Opponent");
        let mut rng = ScriptedRng::new([0.0, 0.3, 0.6, 0.9]);
        let picks: Vec<_> = (0..4)
            .filter_map(|_| choose_action(&opponent, &catalog, &mut rng))
            .collect();
        assert_eq!(
            picks,
            vec![SpellId::Fireball, SpellId::Zap, SpellId::Poison, SpellId::Heal]
        );
    }

    #[test]
    fn trait_object_delegates_to_uniform_pick() {
        let catalog = SpellCatalog::standard();
        let opponent = Combatant::new("Opponent");
        let mut policy = RandomReadyPolicy;
        let mut rng = ScriptedRng::new([0.9]);
        assert_eq!(
            policy.choose(&opponent, &catalog, &mut rng),
            Some(SpellId::Heal)
        );
    }
}
