//! In-memory world used by the client, the runtime tests and the scenarios.
//!
//! Entities live in a single `BTreeMap` keyed by id, so iteration (and with it
//! every "first match" query) is deterministic.

use std::collections::{BTreeMap, BTreeSet};

use bitflags::bitflags;
use game_core::{EntityId, Position, World};

bitflags! {
    /// Static properties of a dungeon entity.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct EntityFlags: u16 {
        const ACTOR          = 1 << 0;
        const ITEM           = 1 << 1;
        const MOBILE         = 1 << 2;
        const LIQUID_CARRIER = 1 << 3;
        /// Liquid carrier currently holds liquid.
        const FULL           = 1 << 4;
        /// Member of the monster faction; hostile towards everyone else.
        const HOSTILE        = 1 << 5;
    }
}

/// Where an entity currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Location {
    Tile(Position),
    Held(EntityId),
    Limbo,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DungeonEntity {
    pub name: String,
    pub location: Location,
    pub flags: EntityFlags,
    pub hp: u32,
    pub stack: u32,
    pub wielded_by: Option<EntityId>,
    pub worn_by: Option<EntityId>,
}

impl DungeonEntity {
    pub fn actor(name: impl Into<String>, at: Position, hp: u32) -> Self {
        Self {
            name: name.into(),
            location: Location::Tile(at),
            flags: EntityFlags::ACTOR | EntityFlags::MOBILE,
            hp,
            stack: 1,
            wielded_by: None,
            worn_by: None,
        }
    }

    pub fn item(name: impl Into<String>, location: Location) -> Self {
        Self {
            name: name.into(),
            location,
            flags: EntityFlags::ITEM,
            hp: 1,
            stack: 1,
            wielded_by: None,
            worn_by: None,
        }
    }

    pub fn hostile(mut self) -> Self {
        self.flags |= EntityFlags::HOSTILE;
        self
    }

    pub fn immobile(mut self) -> Self {
        self.flags.remove(EntityFlags::MOBILE);
        self
    }

    pub fn liquid_carrier(mut self, filled: bool) -> Self {
        self.flags |= EntityFlags::LIQUID_CARRIER;
        self.flags.set(EntityFlags::FULL, filled);
        self
    }

    pub fn stacked(mut self, count: u32) -> Self {
        self.stack = count.max(1);
        self
    }
}

/// Bounded grid with walls and a flat entity table.
#[derive(Clone, Debug, Default)]
pub struct Dungeon {
    width: u32,
    height: u32,
    walls: BTreeSet<Position>,
    entities: BTreeMap<EntityId, DungeonEntity>,
    next_id: u32,
}

impl Dungeon {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            walls: BTreeSet::new(),
            entities: BTreeMap::new(),
            next_id: 1,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn add_wall(&mut self, position: Position) {
        self.walls.insert(position);
    }

    pub fn is_wall(&self, position: Position) -> bool {
        self.walls.contains(&position)
    }

    pub fn in_bounds(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && (position.x as u32) < self.width
            && (position.y as u32) < self.height
    }

    /// Adds an entity under the next free id.
    pub fn spawn(&mut self, entity: DungeonEntity) -> EntityId {
        while self.entities.contains_key(&EntityId(self.next_id)) {
            self.next_id += 1;
        }
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.entities.insert(id, entity);
        id
    }

    /// Adds an entity under a fixed id, replacing any previous occupant of it.
    pub fn insert(&mut self, id: EntityId, entity: DungeonEntity) -> Option<DungeonEntity> {
        self.entities.insert(id, entity)
    }

    pub fn entity(&self, id: EntityId) -> Option<&DungeonEntity> {
        self.entities.get(&id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut DungeonEntity> {
        self.entities.get_mut(&id)
    }

    pub fn entities(&self) -> impl Iterator<Item = (EntityId, &DungeonEntity)> {
        self.entities.iter().map(|(&id, entity)| (id, entity))
    }

    /// Actors in id order.
    pub fn actors(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities()
            .filter(|(_, entity)| entity.flags.contains(EntityFlags::ACTOR))
            .map(|(id, _)| id)
    }

    /// Entities directly held by `holder`, in id order.
    pub fn inventory_of(&self, holder: EntityId) -> Vec<EntityId> {
        self.entities()
            .filter(|(_, entity)| entity.location == Location::Held(holder))
            .map(|(id, _)| id)
            .collect()
    }

    /// Items lying on `position`.
    pub fn items_at(&self, position: Position) -> Vec<EntityId> {
        self.entities()
            .filter(|(_, entity)| {
                entity.flags.contains(EntityFlags::ITEM)
                    && entity.location == Location::Tile(position)
            })
            .map(|(id, _)| id)
            .collect()
    }

    pub fn find_by_name(&self, name: &str) -> Option<EntityId> {
        self.entities()
            .find(|(_, entity)| entity.name == name)
            .map(|(id, _)| id)
    }

    fn has(&self, id: EntityId, flag: EntityFlags) -> bool {
        self.entity(id).is_some_and(|entity| entity.flags.contains(flag))
    }

    /// Detaches `entity` from wielder and wearer before it changes location.
    fn release(&mut self, entity: EntityId) {
        if let Some(record) = self.entities.get_mut(&entity) {
            record.wielded_by = None;
            record.worn_by = None;
        }
    }

    fn holds_transitively(&self, holder: EntityId, entity: EntityId) -> bool {
        let mut current = Some(holder);
        while let Some(id) = current {
            if id == entity {
                return true;
            }
            current = match self.entity(id).map(|record| record.location) {
                Some(Location::Held(parent)) => Some(parent),
                _ => None,
            };
        }
        false
    }
}

impl World for Dungeon {
    fn exists(&self, entity: EntityId) -> bool {
        self.entities.contains_key(&entity)
    }

    fn name_of(&self, entity: EntityId) -> String {
        self.entity(entity)
            .map(|record| record.name.clone())
            .unwrap_or_else(|| "something".to_string())
    }

    fn is_sapient(&self, entity: EntityId) -> bool {
        self.has(entity, EntityFlags::ACTOR)
    }

    fn position_of(&self, entity: EntityId) -> Option<Position> {
        let mut current = entity;
        // Bounded by the number of entities; `move_into` refuses cycles.
        for _ in 0..=self.entities.len() {
            match self.entity(current)?.location {
                Location::Tile(position) => return Some(position),
                Location::Held(holder) => current = holder,
                Location::Limbo => return None,
            }
        }
        None
    }

    fn holder_of(&self, entity: EntityId) -> Option<EntityId> {
        match self.entity(entity)?.location {
            Location::Held(holder) => Some(holder),
            _ => None,
        }
    }

    fn is_wielded(&self, item: EntityId, by: EntityId) -> bool {
        self.entity(item)
            .is_some_and(|record| record.wielded_by == Some(by))
    }

    fn is_worn(&self, item: EntityId, by: EntityId) -> bool {
        self.entity(item).is_some_and(|record| record.worn_by == Some(by))
    }

    fn wielded_by(&self, actor: EntityId) -> Option<EntityId> {
        self.entities()
            .find(|(_, record)| record.wielded_by == Some(actor))
            .map(|(id, _)| id)
    }

    fn is_liquid_carrier(&self, entity: EntityId) -> bool {
        self.has(entity, EntityFlags::LIQUID_CARRIER)
    }

    fn is_empty(&self, entity: EntityId) -> bool {
        if self.is_liquid_carrier(entity) {
            return !self.has(entity, EntityFlags::FULL);
        }
        self.inventory_of(entity).is_empty()
    }

    fn can_move(&self, entity: EntityId) -> bool {
        self.entity(entity).is_some_and(|record| {
            record.flags.contains(EntityFlags::ACTOR | EntityFlags::MOBILE) && record.hp > 0
        })
    }

    fn is_passable(&self, position: Position) -> bool {
        self.in_bounds(position) && !self.is_wall(position)
    }

    fn occupant_at(&self, position: Position) -> Option<EntityId> {
        self.entities()
            .find(|(_, record)| {
                record.flags.contains(EntityFlags::ACTOR)
                    && record.location == Location::Tile(position)
            })
            .map(|(id, _)| id)
    }

    fn is_hostile(&self, entity: EntityId, towards: EntityId) -> bool {
        if !self.is_sapient(entity) || !self.is_sapient(towards) || entity == towards {
            return false;
        }
        self.has(entity, EntityFlags::HOSTILE) != self.has(towards, EntityFlags::HOSTILE)
    }

    fn stack_size(&self, entity: EntityId) -> u32 {
        self.entity(entity).map_or(0, |record| record.stack)
    }

    fn move_into(&mut self, entity: EntityId, container: EntityId) -> bool {
        if !self.exists(entity) || !self.exists(container) {
            return false;
        }
        if self.holds_transitively(container, entity) {
            return false;
        }
        self.release(entity);
        if let Some(record) = self.entities.get_mut(&entity) {
            record.location = Location::Held(container);
        }
        true
    }

    fn place_at(&mut self, entity: EntityId, position: Position) -> bool {
        if !self.is_passable(position) || !self.exists(entity) {
            return false;
        }
        self.release(entity);
        if let Some(record) = self.entities.get_mut(&entity) {
            record.location = Location::Tile(position);
        }
        true
    }

    fn destroy(&mut self, entity: EntityId) -> bool {
        let fallen_at = self.position_of(entity);
        if self.entities.remove(&entity).is_none() {
            return false;
        }

        let drop_to = fallen_at.map_or(Location::Limbo, Location::Tile);
        for record in self.entities.values_mut() {
            if record.location == Location::Held(entity) {
                record.location = drop_to;
            }
            if record.wielded_by == Some(entity) {
                record.wielded_by = None;
            }
            if record.worn_by == Some(entity) {
                record.worn_by = None;
            }
        }
        true
    }

    fn set_wielded(&mut self, item: EntityId, by: Option<EntityId>) -> bool {
        if let Some(actor) = by
            && self.holder_of(item) != Some(actor)
        {
            return false;
        }
        match self.entities.get_mut(&item) {
            Some(record) => {
                record.wielded_by = by;
                true
            }
            None => false,
        }
    }

    fn set_worn(&mut self, item: EntityId, by: Option<EntityId>) -> bool {
        if let Some(actor) = by
            && self.holder_of(item) != Some(actor)
        {
            return false;
        }
        match self.entities.get_mut(&item) {
            Some(record) => {
                record.worn_by = by;
                true
            }
            None => false,
        }
    }

    fn split_stack(&mut self, entity: EntityId, amount: u32) -> Option<EntityId> {
        let record = self.entities.get_mut(&entity)?;
        if amount == 0 || amount >= record.stack {
            return None;
        }
        record.stack -= amount;

        let mut split = record.clone();
        split.stack = amount;
        split.wielded_by = None;
        split.worn_by = None;
        Some(self.spawn(split))
    }

    fn set_filled(&mut self, container: EntityId, filled: bool) -> bool {
        match self.entities.get_mut(&container) {
            Some(record) if record.flags.contains(EntityFlags::LIQUID_CARRIER) => {
                record.flags.set(EntityFlags::FULL, filled);
                true
            }
            _ => false,
        }
    }

    fn damage(&mut self, entity: EntityId, amount: u32) -> u32 {
        match self.entities.get_mut(&entity) {
            Some(record) => {
                record.hp = record.hp.saturating_sub(amount);
                record.hp
            }
            None => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dungeon() -> (Dungeon, EntityId, EntityId) {
        let mut dungeon = Dungeon::new(8, 8);
        let hero = dungeon.spawn(DungeonEntity::actor("hero", Position::new(1, 1), 10));
        let bag = dungeon.spawn(DungeonEntity::item("bag", Location::Held(hero)));
        (dungeon, hero, bag)
    }

    #[test]
    fn carried_items_follow_their_holder() {
        let (mut dungeon, hero, bag) = dungeon();
        let coin = dungeon.spawn(DungeonEntity::item("coin", Location::Held(bag)));

        assert_eq!(dungeon.position_of(coin), Some(Position::new(1, 1)));
        assert!(dungeon.is_in_inventory(bag, hero));
        assert!(!dungeon.is_in_inventory(coin, hero));
        assert!(dungeon.is_within_reach(bag, hero));
        assert!(!dungeon.is_empty(bag));
    }

    #[test]
    fn containers_cannot_swallow_their_holders() {
        let (mut dungeon, hero, bag) = dungeon();
        assert!(!dungeon.move_into(hero, bag));
        assert!(!dungeon.move_into(bag, bag));
    }

    #[test]
    fn moving_an_item_drops_it_from_the_hand() {
        let (mut dungeon, hero, bag) = dungeon();
        assert!(dungeon.set_wielded(bag, Some(hero)));
        assert_eq!(dungeon.wielded_by(hero), Some(bag));

        assert!(dungeon.place_at(bag, Position::new(2, 2)));
        assert_eq!(dungeon.wielded_by(hero), None);
        assert!(!dungeon.set_wielded(bag, Some(hero)));
    }

    #[test]
    fn walls_and_bounds_are_impassable() {
        let (mut dungeon, hero, _) = dungeon();
        dungeon.add_wall(Position::new(2, 1));

        assert!(!dungeon.is_passable(Position::new(2, 1)));
        assert!(!dungeon.is_passable(Position::new(-1, 0)));
        assert!(!dungeon.is_passable(Position::new(8, 0)));
        assert!(!dungeon.place_at(hero, Position::new(2, 1)));
    }

    #[test]
    fn hostility_is_a_faction_difference() {
        let (mut dungeon, hero, _) = dungeon();
        let goblin = dungeon.spawn(DungeonEntity::actor("goblin", Position::new(2, 1), 3).hostile());
        let orc = dungeon.spawn(DungeonEntity::actor("orc", Position::new(3, 1), 3).hostile());

        assert!(dungeon.is_hostile(goblin, hero));
        assert!(dungeon.is_hostile(hero, goblin));
        assert!(!dungeon.is_hostile(goblin, orc));
    }

    #[test]
    fn split_stack_leaves_the_remainder_in_place() {
        let (mut dungeon, hero, _) = dungeon();
        let arrows = dungeon.spawn(DungeonEntity::item("arrow", Location::Held(hero)).stacked(10));

        let split = dungeon.split_stack(arrows, 3).unwrap();

        assert_eq!(dungeon.stack_size(arrows), 7);
        assert_eq!(dungeon.stack_size(split), 3);
        assert!(dungeon.is_in_inventory(split, hero));
        assert_eq!(dungeon.split_stack(arrows, 7), None);
    }

    #[test]
    fn destroyed_actor_drops_its_inventory() {
        let (mut dungeon, hero, bag) = dungeon();
        assert!(dungeon.destroy(hero));
        assert_eq!(
            dungeon.entity(bag).map(|record| record.location),
            Some(Location::Tile(Position::new(1, 1)))
        );
    }
}
