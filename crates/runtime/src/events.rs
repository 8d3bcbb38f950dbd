//! Game events raised by the session and their log narration.
//!
//! Events are recorded in the order they happen within one submission. The
//! session narrates each one right away, while entity names still describe
//! the world as it was when the event fired (before corpse renames).
use game_core::{ActionResult, Death, EntityId, EquipChange, GameState, ItemEffect, Tick};

use crate::messages::{MessageLevel, MessageLog};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    /// An actor's turn came up in the queue.
    TurnStarted { actor: EntityId, clock: Tick },
    /// An action went through and cost its actor `cost` ticks.
    ActionPerformed {
        actor: EntityId,
        result: ActionResult,
        cost: u64,
    },
    /// An action's precondition failed; nothing changed.
    ActionRejected { actor: EntityId, reason: String },
    ConfusionEnded { actor: EntityId },
    Died(Death),
    /// A targeted item wants a location before it can be used.
    TargetRequested { item: EntityId },
    GameOver,
}

impl GameEvent {
    /// Writes the log line for this event, if it has one.
    pub fn narrate(&self, state: &GameState, log: &mut MessageLog) {
        match self {
            GameEvent::TurnStarted { .. } => {}
            GameEvent::ActionPerformed { actor, result, .. } => {
                narrate_result(state, *actor, result, log);
            }
            GameEvent::ActionRejected { actor, reason } => {
                if *actor == state.player {
                    log.push(reason.clone(), MessageLevel::Impossible);
                }
            }
            GameEvent::ConfusionEnded { actor } => {
                log.push(
                    format!("The {} is no longer confused.", name(state, *actor)),
                    MessageLevel::StatusEffect,
                );
            }
            GameEvent::Died(death) if death.was_player => {
                log.push("You died!", MessageLevel::PlayerDeath);
            }
            GameEvent::Died(death) => {
                log.push(
                    format!("{} is dead!", capitalize(&death.name)),
                    MessageLevel::EnemyDeath,
                );
            }
            GameEvent::TargetRequested { .. } => {
                log.push("Select a target location.", MessageLevel::Info);
            }
            GameEvent::GameOver => {}
        }
    }
}

fn narrate_result(state: &GameState, actor: EntityId, result: &ActionResult, log: &mut MessageLog) {
    let by_player = actor == state.player;
    match result {
        ActionResult::Waited | ActionResult::Moved { .. } | ActionResult::Escaped => {}
        ActionResult::Attacked(outcome) => {
            let description = format!(
                "{} attacks {}",
                capitalize(&name(state, outcome.attacker)),
                name(state, outcome.target)
            );
            let level = if by_player {
                MessageLevel::PlayerAttack
            } else {
                MessageLevel::EnemyAttack
            };
            if outcome.damage > 0 {
                log.push(
                    format!("{description} for {} hit points.", outcome.damage),
                    level,
                );
            } else {
                log.push(format!("{description} but does no damage."), level);
            }
        }
        ActionResult::PickedUp { item } => {
            log.push(
                format!("{} picked up the {}!", subject(state, actor), name(state, *item)),
                MessageLevel::Info,
            );
        }
        ActionResult::Dropped { item, .. } => {
            log.push(
                format!("{} dropped the {}.", subject(state, actor), name(state, *item)),
                MessageLevel::Info,
            );
        }
        ActionResult::Equipment(EquipChange::Equipped { item, replaced, .. }) => {
            if let Some(replaced) = replaced {
                log.push(
                    format!("{} remove the {}.", subject(state, actor), name(state, *replaced)),
                    MessageLevel::Info,
                );
            }
            log.push(
                format!("{} equip the {}.", subject(state, actor), name(state, *item)),
                MessageLevel::Info,
            );
        }
        ActionResult::Equipment(EquipChange::Unequipped { item, .. }) => {
            log.push(
                format!("{} remove the {}.", subject(state, actor), name(state, *item)),
                MessageLevel::Info,
            );
        }
        ActionResult::Consumed(consumed) => match &consumed.effect {
            ItemEffect::Healed { amount } => {
                log.push(
                    format!(
                        "{} consume the {}, and recover {} HP!",
                        subject(state, actor),
                        consumed.item_name,
                        amount
                    ),
                    MessageLevel::HealthRecovered,
                );
            }
            ItemEffect::Lightning { target, damage } => {
                log.push(
                    format!(
                        "A lighting bolt strikes the {} with a loud thunder, for {} damage!",
                        name(state, *target),
                        damage
                    ),
                    MessageLevel::PlayerAttack,
                );
            }
            ItemEffect::Confused { target, .. } => {
                log.push(
                    format!(
                        "The eyes of the {} look vacant, as it starts to stumble around!",
                        name(state, *target)
                    ),
                    MessageLevel::StatusEffect,
                );
            }
            ItemEffect::Fireball { hits, damage } => {
                for target in hits {
                    log.push(
                        format!(
                            "The {} is engulfed in a fiery explosion, taking {} damage!",
                            name(state, *target),
                            damage
                        ),
                        MessageLevel::PlayerAttack,
                    );
                }
            }
        },
    }
}

fn name(state: &GameState, entity: EntityId) -> String {
    state
        .entities
        .name(entity)
        .map_or_else(|| entity.to_string(), str::to_owned)
}

/// "You" for the player, the capitalized name otherwise.
fn subject(state: &GameState, actor: EntityId) -> String {
    if actor == state.player {
        "You".to_owned()
    } else {
        capitalize(&name(state, actor))
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalizes_first_letter_only() {
        assert_eq!(capitalize("remains of Orc"), "Remains of Orc");
        assert_eq!(capitalize(""), "");
    }
}
