//! Item capabilities.
use super::EquipSlot;

/// One-shot effect triggered by consuming an item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Consumable {
    Healing { amount: i32 },
    Lightning { damage: i32, maximum_range: u32 },
    Confusion { turns: u32 },
    Fireball { damage: i32, radius: u32 },
}

impl Consumable {
    /// Whether activation needs a target tile picked by the user.
    pub fn requires_target(&self) -> bool {
        matches!(self, Consumable::Confusion { .. } | Consumable::Fireball { .. })
    }
}

/// Gear that can be worn in a slot for flat stat bonuses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Equippable {
    pub slot: EquipSlot,
    pub power_bonus: i32,
    pub defense_bonus: i32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemState {
    pub consumable: Option<Consumable>,
    pub equippable: Option<Equippable>,
}

impl ItemState {
    pub fn consumable(consumable: Consumable) -> Self {
        Self {
            consumable: Some(consumable),
            equippable: None,
        }
    }

    pub fn equippable(equippable: Equippable) -> Self {
        Self {
            consumable: None,
            equippable: Some(equippable),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_area_and_single_target_spells_need_a_target() {
        assert!(!Consumable::Healing { amount: 4 }.requires_target());
        assert!(
            !Consumable::Lightning {
                damage: 20,
                maximum_range: 5
            }
            .requires_target()
        );
        assert!(Consumable::Confusion { turns: 10 }.requires_target());
        assert!(
            Consumable::Fireball {
                damage: 12,
                radius: 3
            }
            .requires_target()
        );
    }
}
