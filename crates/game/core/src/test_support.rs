//! Minimal in-memory world shared by unit tests.

use std::collections::BTreeMap;

use crate::action::{Action, ReasonBool};
use crate::env::World;
use crate::state::{EntityId, Position};

pub(crate) const HERO: EntityId = EntityId(1);

#[derive(Clone, Debug, Default)]
pub(crate) struct TestEntity {
    pub name: String,
    pub sapient: bool,
    pub position: Option<Position>,
    pub holder: Option<EntityId>,
    pub wielder: Option<EntityId>,
}

#[derive(Clone, Debug, Default)]
pub(crate) struct TestWorld {
    pub entities: BTreeMap<EntityId, TestEntity>,
    next_id: u32,
}

impl TestWorld {
    pub fn with_hero() -> Self {
        let mut world = Self {
            entities: BTreeMap::new(),
            next_id: 100,
        };
        world.add_actor(HERO, "hero", Position::ORIGIN);
        world
    }

    pub fn add_actor(&mut self, id: EntityId, name: &str, position: Position) {
        self.entities.insert(
            id,
            TestEntity {
                name: name.into(),
                sapient: true,
                position: Some(position),
                ..TestEntity::default()
            },
        );
    }

    pub fn add_item(&mut self, name: &str, holder: EntityId) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.entities.insert(
            id,
            TestEntity {
                name: name.into(),
                holder: Some(holder),
                ..TestEntity::default()
            },
        );
        id
    }

    pub fn wield(&mut self, item: EntityId, by: EntityId) {
        if let Some(entity) = self.entities.get_mut(&item) {
            entity.wielder = Some(by);
        }
    }
}

impl World for TestWorld {
    fn exists(&self, entity: EntityId) -> bool {
        self.entities.contains_key(&entity)
    }

    fn name_of(&self, entity: EntityId) -> String {
        self.entities
            .get(&entity)
            .map(|e| e.name.clone())
            .unwrap_or_else(|| "thing".into())
    }

    fn is_sapient(&self, entity: EntityId) -> bool {
        self.entities.get(&entity).is_some_and(|e| e.sapient)
    }

    fn position_of(&self, entity: EntityId) -> Option<Position> {
        let record = self.entities.get(&entity)?;
        match record.holder {
            Some(holder) => self.position_of(holder),
            None => record.position,
        }
    }

    fn holder_of(&self, entity: EntityId) -> Option<EntityId> {
        self.entities.get(&entity)?.holder
    }

    fn is_wielded(&self, item: EntityId, by: EntityId) -> bool {
        self.entities
            .get(&item)
            .is_some_and(|e| e.wielder == Some(by))
    }

    fn is_worn(&self, _item: EntityId, _by: EntityId) -> bool {
        false
    }

    fn wielded_by(&self, actor: EntityId) -> Option<EntityId> {
        self.entities
            .iter()
            .find(|(_, e)| e.wielder == Some(actor))
            .map(|(&id, _)| id)
    }

    fn is_liquid_carrier(&self, _entity: EntityId) -> bool {
        false
    }

    fn is_empty(&self, _entity: EntityId) -> bool {
        true
    }

    fn can_move(&self, entity: EntityId) -> bool {
        self.is_sapient(entity)
    }

    fn is_passable(&self, _position: Position) -> bool {
        true
    }

    fn occupant_at(&self, position: Position) -> Option<EntityId> {
        self.entities
            .iter()
            .find(|(_, e)| e.sapient && e.position == Some(position))
            .map(|(&id, _)| id)
    }

    fn is_hostile(&self, _entity: EntityId, _towards: EntityId) -> bool {
        false
    }

    fn stack_size(&self, _entity: EntityId) -> u32 {
        1
    }

    fn move_into(&mut self, entity: EntityId, container: EntityId) -> bool {
        match self.entities.get_mut(&entity) {
            Some(record) => {
                record.holder = Some(container);
                record.position = None;
                true
            }
            None => false,
        }
    }

    fn place_at(&mut self, entity: EntityId, position: Position) -> bool {
        match self.entities.get_mut(&entity) {
            Some(record) => {
                record.holder = None;
                record.position = Some(position);
                true
            }
            None => false,
        }
    }

    fn destroy(&mut self, entity: EntityId) -> bool {
        self.entities.remove(&entity).is_some()
    }

    fn set_wielded(&mut self, item: EntityId, by: Option<EntityId>) -> bool {
        match self.entities.get_mut(&item) {
            Some(record) => {
                record.wielder = by;
                true
            }
            None => false,
        }
    }

    fn set_worn(&mut self, _item: EntityId, _by: Option<EntityId>) -> bool {
        false
    }

    fn split_stack(&mut self, _entity: EntityId, _amount: u32) -> Option<EntityId> {
        None
    }

    fn set_filled(&mut self, _container: EntityId, _filled: bool) -> bool {
        false
    }

    fn damage(&mut self, _entity: EntityId, _amount: u32) -> u32 {
        0
    }
}

pub(crate) fn allow_any_subject(_action: &Action, _world: &dyn World) -> ReasonBool {
    ReasonBool::yes()
}

pub(crate) fn allow_any_object(
    _action: &Action,
    _object: EntityId,
    _world: &dyn World,
) -> ReasonBool {
    ReasonBool::yes()
}
