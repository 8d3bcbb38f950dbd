use crate::state::{Ai, EntityId, GameState, RenderOrder, Rgb};

/// An actor that died during the last death pass.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Death {
    pub entity: EntityId,
    /// Name before the corpse rename.
    pub name: String,
    pub was_player: bool,
}

pub const CORPSE_GLYPH: char = '%';

/// Turns every actor at `hp <= 0` that is not yet dead into a corpse.
///
/// Corpses keep their position, stop blocking movement, and draw beneath
/// items. Non-player corpses are renamed `remains of <name>`. Returns the new
/// deaths in id order; calling it again without further damage returns none.
pub fn resolve_deaths(state: &mut GameState) -> Vec<Death> {
    let player = state.player;
    let dying: Vec<EntityId> = state
        .entities
        .iter()
        .filter(|entity| {
            entity
                .as_actor()
                .is_some_and(|actor| !actor.ai.is_dead() && actor.fighter.is_dead())
        })
        .map(|entity| entity.id)
        .collect();

    let mut deaths = Vec::with_capacity(dying.len());
    for id in dying {
        let Some(entity) = state.entities.get_mut(id) else {
            continue;
        };
        let was_player = id == player;
        let name = entity.name.clone();

        entity.glyph = CORPSE_GLYPH;
        entity.color = Rgb::CORPSE;
        entity.blocks_movement = false;
        entity.render_order = RenderOrder::Corpse;
        if !was_player {
            entity.name = format!("remains of {name}");
        }
        if let Some(actor) = entity.as_actor_mut() {
            actor.ai = Ai::Dead;
        }

        deaths.push(Death {
            entity: id,
            name,
            was_player,
        });
    }
    deaths
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ActorState, Blueprint, EntitiesState, Fighter, Position};

    fn state_with_orc() -> (GameState, EntityId) {
        let mut entities = EntitiesState::new();
        let player = entities.spawn(
            Blueprint::actor(
                "Player",
                '@',
                Rgb::WHITE,
                ActorState::new(Fighter::new(30, 2, 5), 26, Ai::Player),
            ),
            Position::new(5, 5),
        );
        let orc = entities.spawn(
            Blueprint::actor(
                "Orc",
                'o',
                Rgb(63, 127, 63),
                ActorState::new(Fighter::new(10, 0, 3), 0, Ai::Hostile),
            ),
            Position::new(6, 5),
        );
        (GameState::new(1, entities, player), orc)
    }

    #[test]
    fn dead_orc_becomes_a_corpse() {
        let (mut state, orc) = state_with_orc();
        state.entities.actor_mut(orc).unwrap().fighter.take_damage(12);

        let deaths = resolve_deaths(&mut state);
        assert_eq!(
            deaths,
            vec![Death {
                entity: orc,
                name: "Orc".into(),
                was_player: false
            }]
        );

        let corpse = state.entities.get(orc).unwrap();
        assert_eq!(corpse.name, "remains of Orc");
        assert_eq!(corpse.glyph, CORPSE_GLYPH);
        assert!(!corpse.blocks_movement);
        assert_eq!(corpse.render_order, RenderOrder::Corpse);
        assert!(state.entities.living_actors().all(|e| e.id != orc));
        assert!(resolve_deaths(&mut state).is_empty());
    }

    #[test]
    fn player_death_keeps_the_name() {
        let (mut state, _) = state_with_orc();
        let player = state.player;
        state.entities.actor_mut(player).unwrap().fighter.hp = 0;

        let deaths = resolve_deaths(&mut state);
        assert!(deaths[0].was_player);
        assert_eq!(state.player_entity().unwrap().name, "Player");
        assert!(!state.is_player_alive());
    }
}
