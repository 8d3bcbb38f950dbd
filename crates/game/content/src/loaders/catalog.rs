//! Entity catalog loader.

use std::path::Path;

use crate::EntityCatalog;

use super::{LoadResult, read_file};

/// Loader for [`EntityCatalog`] from RON files.
pub struct CatalogLoader;

impl CatalogLoader {
    pub fn load(path: &Path) -> LoadResult<EntityCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<EntityCatalog> {
        let catalog: EntityCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse catalog RON: {}", e))?;

        if !catalog.actors.contains_key(EntityCatalog::PLAYER) {
            anyhow::bail!("Catalog is missing the `{}` actor", EntityCatalog::PLAYER);
        }
        if let Some(id) = catalog.items.keys().find(|id| catalog.actors.contains_key(*id)) {
            anyhow::bail!("Catalog id `{}` names both an actor and an item", id);
        }

        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"(
        actors: {
            "player": (
                name: "Player",
                glyph: '@',
                color: (255, 255, 255),
                fighter: (hp: 30, defense: 2, power: 5),
                ai: Player,
            ),
        },
    )"#;

    #[test]
    fn optional_fields_default() {
        let catalog = CatalogLoader::parse(MINIMAL).unwrap();
        let player = &catalog.actors["player"];

        assert_eq!(player.inventory_capacity, None);
        assert_eq!(player.speed, game_core::NORMAL_SPEED);
        assert!(catalog.items.is_empty());
    }

    #[test]
    fn requires_a_player() {
        let err = CatalogLoader::parse("(actors: {}, items: {})").unwrap_err();
        assert!(err.to_string().contains("player"));
    }

    #[test]
    fn reports_syntax_errors() {
        let err = CatalogLoader::parse("(actors: {").unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse catalog RON"));
    }
}
