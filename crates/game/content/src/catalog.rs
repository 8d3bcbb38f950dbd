//! Entity templates and the built-in catalog.

use std::collections::BTreeMap;

use game_core::{
    ActorState, Ai, Blueprint, Consumable, EquipSlot, Equippable, Fighter, GameConfig, ItemState,
    NORMAL_SPEED, Rgb,
};

/// Behavior an actor template starts with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AiSpec {
    Player,
    Hostile,
}

impl From<AiSpec> for Ai {
    fn from(spec: AiSpec) -> Self {
        match spec {
            AiSpec::Player => Ai::Player,
            AiSpec::Hostile => Ai::Hostile,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FighterSpec {
    pub hp: i32,
    pub defense: i32,
    pub power: i32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorTemplate {
    pub name: String,
    pub glyph: char,
    pub color: Rgb,
    pub fighter: FighterSpec,
    pub ai: AiSpec,
    /// Falls back to [`GameConfig::inventory_capacity`].
    #[cfg_attr(feature = "serde", serde(default))]
    pub inventory_capacity: Option<usize>,
    #[cfg_attr(feature = "serde", serde(default = "normal_speed"))]
    pub speed: u32,
}

#[cfg(feature = "serde")]
fn normal_speed() -> u32 {
    NORMAL_SPEED
}

impl ActorTemplate {
    pub fn blueprint(&self, config: &GameConfig) -> Blueprint {
        let fighter = Fighter::new(self.fighter.hp, self.fighter.defense, self.fighter.power);
        let capacity = self.inventory_capacity.unwrap_or(config.inventory_capacity);
        let actor = ActorState::new(fighter, capacity, self.ai.into()).with_speed(self.speed);
        Blueprint::actor(self.name.clone(), self.glyph, self.color, actor)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemTemplate {
    pub name: String,
    pub glyph: char,
    pub color: Rgb,
    #[cfg_attr(feature = "serde", serde(default))]
    pub consumable: Option<Consumable>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub equippable: Option<Equippable>,
}

impl ItemTemplate {
    pub fn blueprint(&self) -> Blueprint {
        let item = ItemState {
            consumable: self.consumable,
            equippable: self.equippable,
        };
        Blueprint::item(self.name.clone(), self.glyph, self.color, item)
    }
}

/// Named actor and item templates.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityCatalog {
    #[cfg_attr(feature = "serde", serde(default))]
    pub actors: BTreeMap<String, ActorTemplate>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub items: BTreeMap<String, ItemTemplate>,
}

impl EntityCatalog {
    pub const PLAYER: &'static str = "player";

    /// Blueprint for a catalog id, looking at actors first.
    pub fn blueprint(&self, id: &str, config: &GameConfig) -> Option<Blueprint> {
        self.actors
            .get(id)
            .map(|actor| actor.blueprint(config))
            .or_else(|| self.items.get(id).map(ItemTemplate::blueprint))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.actors.contains_key(id) || self.items.contains_key(id)
    }

    /// The standard monsters, potions, scrolls and gear.
    pub fn builtin() -> Self {
        let actor = |name: &str, glyph, color, (hp, defense, power), ai, capacity| ActorTemplate {
            name: name.to_owned(),
            glyph,
            color,
            fighter: FighterSpec { hp, defense, power },
            ai,
            inventory_capacity: capacity,
            speed: NORMAL_SPEED,
        };
        let consumable = |name: &str, glyph, color, consumable| ItemTemplate {
            name: name.to_owned(),
            glyph,
            color,
            consumable: Some(consumable),
            equippable: None,
        };
        let weapon_color = Rgb(0, 191, 255);
        let armor_color = Rgb(139, 69, 19);
        let gear = |name: &str, glyph, color, slot, power_bonus, defense_bonus| ItemTemplate {
            name: name.to_owned(),
            glyph,
            color,
            consumable: None,
            equippable: Some(Equippable {
                slot,
                power_bonus,
                defense_bonus,
            }),
        };

        let actors = [
            (
                "player",
                actor("Player", '@', Rgb::WHITE, (30, 2, 5), AiSpec::Player, Some(26)),
            ),
            (
                "orc",
                actor("Orc", 'o', Rgb(63, 127, 63), (10, 0, 3), AiSpec::Hostile, Some(0)),
            ),
            (
                "troll",
                actor("Troll", 'T', Rgb(0, 127, 0), (16, 1, 4), AiSpec::Hostile, Some(0)),
            ),
        ];
        let items = [
            (
                "health_potion",
                consumable(
                    "Health Potion",
                    '!',
                    Rgb(127, 0, 255),
                    Consumable::Healing { amount: 4 },
                ),
            ),
            (
                "lightning_scroll",
                consumable(
                    "Lightning Scroll",
                    '~',
                    Rgb(255, 255, 0),
                    Consumable::Lightning {
                        damage: 20,
                        maximum_range: 5,
                    },
                ),
            ),
            (
                "confusion_scroll",
                consumable(
                    "Confusion Scroll",
                    '~',
                    Rgb(207, 63, 255),
                    Consumable::Confusion { turns: 10 },
                ),
            ),
            (
                "fireball_scroll",
                consumable(
                    "Fireball Scroll",
                    '~',
                    Rgb(255, 0, 0),
                    Consumable::Fireball {
                        damage: 12,
                        radius: 3,
                    },
                ),
            ),
            (
                "dagger",
                gear("Dagger", '/', weapon_color, EquipSlot::Weapon, 2, 0),
            ),
            (
                "sword",
                gear("Sword", '/', weapon_color, EquipSlot::Weapon, 4, 0),
            ),
            (
                "leather_armor",
                gear("Leather Armor", '[', armor_color, EquipSlot::Armor, 0, 1),
            ),
            (
                "chain_mail",
                gear("Chain Mail", '[', armor_color, EquipSlot::Armor, 0, 3),
            ),
        ];

        Self {
            actors: actors
                .into_iter()
                .map(|(id, template)| (id.to_owned(), template))
                .collect(),
            items: items
                .into_iter()
                .map(|(id, template)| (id.to_owned(), template))
                .collect(),
        }
    }
}
