use crate::state::types::EntityId;

/// Body slot an equippable item occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum EquipSlot {
    Weapon,
    Armor,
}

/// Items currently worn. Each id also sits in the owner's inventory.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Equipment {
    pub weapon: Option<EntityId>,
    pub armor: Option<EntityId>,
}

impl Equipment {
    pub fn slot(&self, slot: EquipSlot) -> Option<EntityId> {
        match slot {
            EquipSlot::Weapon => self.weapon,
            EquipSlot::Armor => self.armor,
        }
    }

    fn slot_mut(&mut self, slot: EquipSlot) -> &mut Option<EntityId> {
        match slot {
            EquipSlot::Weapon => &mut self.weapon,
            EquipSlot::Armor => &mut self.armor,
        }
    }

    pub fn is_equipped(&self, item: EntityId) -> bool {
        self.weapon == Some(item) || self.armor == Some(item)
    }

    /// Puts `item` in `slot`, returning whatever was there before.
    pub fn equip(&mut self, slot: EquipSlot, item: EntityId) -> Option<EntityId> {
        self.slot_mut(slot).replace(item)
    }

    /// Clears whichever slot holds `item`. Returns the freed slot.
    pub fn unequip(&mut self, item: EntityId) -> Option<EquipSlot> {
        let slot = [EquipSlot::Weapon, EquipSlot::Armor]
            .into_iter()
            .find(|slot| self.slot(*slot) == Some(item))?;
        *self.slot_mut(slot) = None;
        Some(slot)
    }

    pub fn worn(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.weapon.into_iter().chain(self.armor)
    }
}
