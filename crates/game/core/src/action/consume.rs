use crate::action::ActionTransition;
use crate::action::inventory::carries;
use crate::env::GameEnv;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{Consumable, EntityId, GameState, InventoryError, Position};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConsumeError {
    #[error("You are not carrying that.")]
    NotCarried { item: EntityId },

    #[error("That cannot be used.")]
    NotConsumable { item: EntityId },

    #[error("Select a target location.")]
    MissingTarget { item: EntityId },

    #[error("Your health is already full.")]
    AlreadyFullHealth,

    #[error("No enemy is close enough to strike.")]
    NoEnemyInRange,

    #[error("You cannot target an area that you cannot see.")]
    TargetNotVisible { target: Position },

    #[error("You must select an enemy to target.")]
    NoActorAtTarget { target: Position },

    #[error("You cannot confuse yourself!")]
    TargetIsSelf,

    #[error("There are no targets in the radius.")]
    NoTargetsInRadius { target: Position },

    #[error("actor {0} not found")]
    ActorNotFound(EntityId),

    #[error("inventory bookkeeping failed: {0}")]
    Inventory(#[from] InventoryError),
}

impl GameError for ConsumeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ConsumeError::ActorNotFound(_) | ConsumeError::Inventory(_) => ErrorSeverity::Internal,
            _ => ErrorSeverity::Impossible,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ConsumeError::NotCarried { .. } => "CONSUME_NOT_CARRIED",
            ConsumeError::NotConsumable { .. } => "CONSUME_NOT_CONSUMABLE",
            ConsumeError::MissingTarget { .. } => "CONSUME_MISSING_TARGET",
            ConsumeError::AlreadyFullHealth => "CONSUME_FULL_HEALTH",
            ConsumeError::NoEnemyInRange => "CONSUME_NO_ENEMY_IN_RANGE",
            ConsumeError::TargetNotVisible { .. } => "CONSUME_TARGET_NOT_VISIBLE",
            ConsumeError::NoActorAtTarget { .. } => "CONSUME_NO_ACTOR_AT_TARGET",
            ConsumeError::TargetIsSelf => "CONSUME_TARGET_IS_SELF",
            ConsumeError::NoTargetsInRadius { .. } => "CONSUME_NO_TARGETS_IN_RADIUS",
            ConsumeError::ActorNotFound(_) => "CONSUME_ACTOR_NOT_FOUND",
            ConsumeError::Inventory(_) => "CONSUME_INVENTORY_DESYNC",
        }
    }
}

/// What a consumed item did.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemEffect {
    Healed { amount: i32 },
    Lightning { target: EntityId, damage: i32 },
    Confused { target: EntityId, turns: u32 },
    Fireball { hits: Vec<EntityId>, damage: i32 },
}

/// Activation report: the effect plus the name the item had, since the item
/// itself no longer exists afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Consumed {
    pub item: EntityId,
    pub item_name: String,
    pub effect: ItemEffect,
}

/// Use up a carried consumable.
///
/// Targeted consumables (see [`Consumable::requires_target`]) need `target`;
/// choosing it is the caller's business.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConsumeAction {
    pub actor: EntityId,
    pub item: EntityId,
    pub target: Option<Position>,
}

impl ConsumeAction {
    pub fn new(actor: EntityId, item: EntityId) -> Self {
        Self {
            actor,
            item,
            target: None,
        }
    }

    pub fn at(actor: EntityId, item: EntityId, target: Position) -> Self {
        Self {
            actor,
            item,
            target: Some(target),
        }
    }

    fn consumable(&self, state: &GameState) -> Result<Consumable, ConsumeError> {
        state
            .entities
            .item(self.item)
            .and_then(|item| item.consumable)
            .ok_or(ConsumeError::NotConsumable { item: self.item })
    }

    fn origin(&self, state: &GameState) -> Result<Position, ConsumeError> {
        state
            .entities
            .position(self.actor)
            .ok_or(ConsumeError::ActorNotFound(self.actor))
    }

    fn visible_target(&self, state: &GameState) -> Result<Position, ConsumeError> {
        let target = self
            .target
            .ok_or(ConsumeError::MissingTarget { item: self.item })?;
        if !state.world.is_visible(target) {
            return Err(ConsumeError::TargetNotVisible { target });
        }
        Ok(target)
    }

    /// Closest visible living actor other than the user, strictly nearer than
    /// `maximum_range + 1`. Ties go to the lowest id.
    fn lightning_target(
        &self,
        state: &GameState,
        maximum_range: u32,
    ) -> Result<EntityId, ConsumeError> {
        let origin = self.origin(state)?;
        let mut closest = None;
        let mut closest_distance = f64::from(maximum_range) + 1.0;

        for entity in state.entities.living_actors() {
            let Some(position) = entity.position() else {
                continue;
            };
            if entity.id == self.actor || !state.world.is_visible(position) {
                continue;
            }
            let distance = origin.distance(position);
            if distance < closest_distance {
                closest = Some(entity.id);
                closest_distance = distance;
            }
        }
        closest.ok_or(ConsumeError::NoEnemyInRange)
    }

    fn confusion_target(&self, state: &GameState) -> Result<EntityId, ConsumeError> {
        let target = self.visible_target(state)?;
        let victim = state
            .entities
            .actor_at(target)
            .ok_or(ConsumeError::NoActorAtTarget { target })?;
        if victim.id == self.actor {
            return Err(ConsumeError::TargetIsSelf);
        }
        Ok(victim.id)
    }

    /// Every living actor within `radius` of the target tile, user included.
    fn fireball_targets(&self, state: &GameState, radius: u32) -> Result<Vec<EntityId>, ConsumeError> {
        let target = self.visible_target(state)?;
        let hits: Vec<EntityId> = state
            .entities
            .living_actors()
            .filter(|entity| {
                entity
                    .position()
                    .is_some_and(|position| position.distance(target) <= f64::from(radius))
            })
            .map(|entity| entity.id)
            .collect();
        if hits.is_empty() {
            return Err(ConsumeError::NoTargetsInRadius { target });
        }
        Ok(hits)
    }

    fn damage(state: &mut GameState, target: EntityId, amount: i32) -> Result<(), ConsumeError> {
        state
            .entities
            .actor_mut(target)
            .ok_or(ConsumeError::ActorNotFound(target))?
            .fighter
            .take_damage(amount);
        Ok(())
    }
}

impl ActionTransition for ConsumeAction {
    type Error = ConsumeError;
    type Result = Consumed;

    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        if !carries(state, self.actor, self.item) {
            return Err(ConsumeError::NotCarried { item: self.item });
        }

        match self.consumable(state)? {
            Consumable::Healing { .. } => {
                let actor = state
                    .entities
                    .actor(self.actor)
                    .ok_or(ConsumeError::ActorNotFound(self.actor))?;
                if actor.fighter.is_full_health() {
                    return Err(ConsumeError::AlreadyFullHealth);
                }
            }
            Consumable::Lightning { maximum_range, .. } => {
                self.lightning_target(state, maximum_range)?;
            }
            Consumable::Confusion { .. } => {
                self.confusion_target(state)?;
            }
            Consumable::Fireball { radius, .. } => {
                self.fireball_targets(state, radius)?;
            }
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, _env: &GameEnv<'_>) -> Result<Self::Result, Self::Error> {
        let effect = match self.consumable(state)? {
            Consumable::Healing { amount } => {
                let actor = state
                    .entities
                    .actor_mut(self.actor)
                    .ok_or(ConsumeError::ActorNotFound(self.actor))?;
                ItemEffect::Healed {
                    amount: actor.fighter.heal(amount),
                }
            }
            Consumable::Lightning {
                damage,
                maximum_range,
            } => {
                let target = self.lightning_target(state, maximum_range)?;
                Self::damage(state, target, damage)?;
                ItemEffect::Lightning { target, damage }
            }
            Consumable::Confusion { turns } => {
                let target = self.confusion_target(state)?;
                let actor = state
                    .entities
                    .actor_mut(target)
                    .ok_or(ConsumeError::ActorNotFound(target))?;
                actor.ai = std::mem::replace(&mut actor.ai, crate::state::Ai::Dead).confused(turns);
                ItemEffect::Confused { target, turns }
            }
            Consumable::Fireball { damage, radius } => {
                let hits = self.fireball_targets(state, radius)?;
                for target in &hits {
                    Self::damage(state, *target, damage)?;
                }
                ItemEffect::Fireball { hits, damage }
            }
        };

        let removed = state.entities.destroy_carried(self.actor, self.item)?;
        Ok(Consumed {
            item: self.item,
            item_name: removed.name,
            effect,
        })
    }
}
