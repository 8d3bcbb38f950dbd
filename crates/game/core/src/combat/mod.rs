//! Fighter rules: effective stats, damage and death.
mod death;

pub use death::{Death, resolve_deaths};

use crate::state::{EntitiesState, EntityId};

/// Result of one melee exchange.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackOutcome {
    pub attacker: EntityId,
    pub target: EntityId,
    /// Damage dealt; zero means the blow glanced off.
    pub damage: i32,
}

/// Damage of a blow: power minus defense, never negative.
pub fn melee_damage(power: i32, defense: i32) -> i32 {
    (power - defense).max(0)
}

/// Base power plus bonuses of every worn item.
pub fn effective_power(entities: &EntitiesState, actor: EntityId) -> Option<i32> {
    let state = entities.actor(actor)?;
    Some(state.fighter.power + equipment_bonus(entities, actor, |e| e.power_bonus))
}

/// Base defense plus bonuses of every worn item.
pub fn effective_defense(entities: &EntitiesState, actor: EntityId) -> Option<i32> {
    let state = entities.actor(actor)?;
    Some(state.fighter.defense + equipment_bonus(entities, actor, |e| e.defense_bonus))
}

fn equipment_bonus(
    entities: &EntitiesState,
    actor: EntityId,
    bonus: impl Fn(&crate::state::Equippable) -> i32,
) -> i32 {
    let Some(state) = entities.actor(actor) else {
        return 0;
    };
    state
        .equipment
        .worn()
        .filter_map(|item| entities.item(item)?.equippable)
        .map(|equippable| bonus(&equippable))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{
        ActorState, Ai, Blueprint, EquipSlot, Equippable, Fighter, ItemState, Position, Rgb,
    };

    #[test]
    fn damage_is_power_minus_defense() {
        assert_eq!(melee_damage(5, 2), 3);
        assert_eq!(melee_damage(2, 5), 0);
        assert_eq!(melee_damage(4, 4), 0);
    }

    #[test]
    fn worn_items_add_to_effective_stats() {
        let mut entities = EntitiesState::new();
        let hero = entities.spawn(
            Blueprint::actor(
                "Player",
                '@',
                Rgb::WHITE,
                ActorState::new(Fighter::new(30, 1, 2), 26, Ai::Player),
            ),
            Position::new(1, 1),
        );
        let sword = entities.spawn(
            Blueprint::item(
                "Sword",
                '/',
                Rgb(0, 191, 255),
                ItemState::equippable(Equippable {
                    slot: EquipSlot::Weapon,
                    power_bonus: 4,
                    defense_bonus: 0,
                }),
            ),
            Position::new(1, 1),
        );
        entities.pick_up(hero, sword).unwrap();
        assert_eq!(effective_power(&entities, hero), Some(2));

        entities.actor_mut(hero).unwrap().equipment.equip(EquipSlot::Weapon, sword);
        assert_eq!(effective_power(&entities, hero), Some(6));
        assert_eq!(effective_defense(&entities, hero), Some(1));
    }
}
