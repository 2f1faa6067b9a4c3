//! Dungeon layout loader.
//!
//! A layout is the grid size, the wall tiles and every starting entity with an
//! explicit id, so scripts and saved queues can refer to entities by number.

use std::collections::BTreeSet;
use std::path::Path;

use game_core::{EntityId, Position, World};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};
use crate::world::{Dungeon, DungeonEntity, Location};

/// Dungeon data structure for RON files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DungeonSpec {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub walls: Vec<(i32, i32)>,
    #[serde(default)]
    pub entities: Vec<EntitySpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySpec {
    pub id: u32,
    pub name: String,
    pub kind: EntityKindSpec,
    pub at: LocationSpec,
    #[serde(default)]
    pub wielded: bool,
    #[serde(default)]
    pub worn: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKindSpec {
    Actor {
        hp: u32,
        #[serde(default)]
        hostile: bool,
        #[serde(default = "default_mobile")]
        mobile: bool,
    },
    Item {
        #[serde(default = "default_stack")]
        stack: u32,
        /// `Some(filled)` marks a liquid carrier.
        #[serde(default)]
        liquid: Option<bool>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationSpec {
    Tile(i32, i32),
    Held(u32),
    Limbo,
}

fn default_mobile() -> bool {
    true
}

fn default_stack() -> u32 {
    1
}

impl DungeonSpec {
    /// Converts the layout into a live [`Dungeon`], checking references.
    pub fn build(&self) -> LoadResult<Dungeon> {
        let mut dungeon = Dungeon::new(self.width, self.height);
        for &(x, y) in &self.walls {
            dungeon.add_wall(Position::new(x, y));
        }

        let mut seen = BTreeSet::new();
        for spec in &self.entities {
            if !seen.insert(spec.id) {
                anyhow::bail!("Duplicate entity id {} ('{}')", spec.id, spec.name);
            }
        }

        for spec in &self.entities {
            let location = match spec.at {
                LocationSpec::Tile(x, y) => {
                    let tile = Position::new(x, y);
                    if !dungeon.is_passable(tile) {
                        anyhow::bail!("Entity '{}' placed on blocked tile {}", spec.name, tile);
                    }
                    Location::Tile(tile)
                }
                LocationSpec::Held(holder) => {
                    if !seen.contains(&holder) || holder == spec.id {
                        anyhow::bail!(
                            "Entity '{}' is held by unknown entity {}",
                            spec.name,
                            holder
                        );
                    }
                    Location::Held(EntityId(holder))
                }
                LocationSpec::Limbo => Location::Limbo,
            };

            let entity = match spec.kind {
                EntityKindSpec::Actor {
                    hp,
                    hostile,
                    mobile,
                } => {
                    let mut actor = DungeonEntity::actor(spec.name.clone(), Position::ORIGIN, hp);
                    actor.location = location;
                    if hostile {
                        actor = actor.hostile();
                    }
                    if !mobile {
                        actor = actor.immobile();
                    }
                    actor
                }
                EntityKindSpec::Item { stack, liquid } => {
                    let mut item =
                        DungeonEntity::item(spec.name.clone(), location).stacked(stack);
                    if let Some(filled) = liquid {
                        item = item.liquid_carrier(filled);
                    }
                    item
                }
            };
            dungeon.insert(EntityId(spec.id), entity);
        }

        for spec in &self.entities {
            if holds_itself(&dungeon, EntityId(spec.id), self.entities.len()) {
                anyhow::bail!("Entity '{}' ends up holding itself", spec.name);
            }
        }

        for spec in &self.entities {
            let id = EntityId(spec.id);
            let holder = dungeon.holder_of(id);
            let equip_by = holder.filter(|&actor| dungeon.is_sapient(actor));
            if (spec.wielded || spec.worn) && equip_by.is_none() {
                anyhow::bail!(
                    "Entity '{}' is equipped but not carried by a creature",
                    spec.name
                );
            }
            if spec.wielded {
                dungeon.set_wielded(id, equip_by);
            }
            if spec.worn {
                dungeon.set_worn(id, equip_by);
            }
        }

        Ok(dungeon)
    }
}

/// Walks at most `limit` holders up from `entity` looking for `entity` again.
fn holds_itself(dungeon: &Dungeon, entity: EntityId, limit: usize) -> bool {
    let mut current = entity;
    for _ in 0..limit {
        match dungeon.holder_of(current) {
            Some(holder) if holder == entity => return true,
            Some(holder) => current = holder,
            None => return false,
        }
    }
    false
}

/// Loader for dungeon layouts from RON files.
pub struct DungeonLoader;

impl DungeonLoader {
    /// Load and build a dungeon from a RON file containing a [`DungeonSpec`].
    pub fn load(path: &Path) -> LoadResult<Dungeon> {
        Self::load_spec(path)?.build()
    }

    pub fn load_spec(path: &Path) -> LoadResult<DungeonSpec> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<DungeonSpec> {
        ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse dungeon RON: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const LAYOUT: &str = r#"(
        width: 6,
        height: 4,
        walls: [(3, 0), (3, 1)],
        entities: [
            (id: 1, name: "hero", kind: Actor(hp: 12), at: Tile(1, 1)),
            (id: 2, name: "goblin", kind: Actor(hp: 3, hostile: true), at: Tile(4, 1)),
            (id: 3, name: "sword", kind: Item(stack: 1), at: Held(1), wielded: true),
            (id: 4, name: "flask", kind: Item(liquid: Some(true)), at: Held(1)),
            (id: 5, name: "arrow", kind: Item(stack: 12), at: Tile(2, 2)),
        ],
    )"#;

    #[test]
    fn builds_entities_with_their_ids_and_equipment() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(LAYOUT.as_bytes()).unwrap();

        let dungeon = DungeonLoader::load(file.path()).unwrap();
        let (hero, goblin, sword, flask, arrow) =
            (EntityId(1), EntityId(2), EntityId(3), EntityId(4), EntityId(5));

        assert_eq!(dungeon.name_of(hero), "hero");
        assert!(dungeon.is_hostile(goblin, hero));
        assert!(dungeon.is_wielded(sword, hero));
        assert!(dungeon.is_liquid_carrier(flask));
        assert!(!dungeon.is_empty(flask));
        assert_eq!(dungeon.stack_size(arrow), 12);
        assert!(!dungeon.is_passable(Position::new(3, 1)));
        assert_eq!(dungeon.actors().collect::<Vec<_>>(), vec![hero, goblin]);
    }

    #[test]
    fn unknown_holder_is_rejected() {
        let spec = DungeonLoader::parse(
            r#"(width: 3, height: 3, entities: [
                (id: 1, name: "ring", kind: Item(stack: 1), at: Held(9)),
            ])"#,
        )
        .unwrap();
        let error = spec.build().unwrap_err();
        assert!(error.to_string().contains("unknown entity 9"));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let spec = DungeonLoader::parse(
            r#"(width: 3, height: 3, entities: [
                (id: 1, name: "hero", kind: Actor(hp: 1), at: Tile(0, 0)),
                (id: 1, name: "twin", kind: Actor(hp: 1), at: Tile(1, 0)),
            ])"#,
        )
        .unwrap();
        assert!(spec.build().is_err());
    }

    #[test]
    fn equipment_on_the_floor_is_rejected() {
        let spec = DungeonLoader::parse(
            r#"(width: 3, height: 3, entities: [
                (id: 1, name: "axe", kind: Item(stack: 1), at: Tile(0, 0), wielded: true),
            ])"#,
        )
        .unwrap();
        assert!(spec.build().is_err());
    }

    #[test]
    fn holding_cycles_are_rejected() {
        let spec = DungeonLoader::parse(
            r#"(width: 3, height: 3, entities: [
                (id: 1, name: "box", kind: Item(stack: 1), at: Held(3)),
                (id: 2, name: "crate", kind: Item(stack: 1), at: Held(1)),
                (id: 3, name: "chest", kind: Item(stack: 1), at: Held(2)),
            ])"#,
        )
        .unwrap();
        let error = spec.build().unwrap_err();
        assert!(error.to_string().contains("'box' ends up holding itself"));
    }

    #[test]
    fn malformed_ron_reports_a_parse_error() {
        let error = DungeonLoader::parse("(width: ").unwrap_err();
        assert!(error.to_string().contains("Failed to parse dungeon RON"));
    }
}
