use crate::engine::errors::SchedulerError;
use crate::engine::queue::Sapience;
use crate::state::EntityId;

/// One scheduled actor.
#[derive(Clone, Debug)]
pub struct ActorSlot {
    pub id: EntityId,
    pub sapience: Sapience,
}

/// Scheduled actors in registration order.
///
/// The scheduler visits actors in exactly this order every tick; ids carry no
/// priority of their own.
#[derive(Clone, Debug, Default)]
pub struct ActorRoster {
    slots: Vec<ActorSlot>,
}

impl ActorRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an actor with an empty queue.
    pub fn add(&mut self, id: EntityId) -> Result<&mut Sapience, SchedulerError> {
        if self.contains(id) {
            return Err(SchedulerError::DuplicateActor(id));
        }
        self.slots.push(ActorSlot {
            id,
            sapience: Sapience::new(),
        });
        let index = self.slots.len() - 1;
        Ok(&mut self.slots[index].sapience)
    }

    pub fn remove(&mut self, id: EntityId) -> Option<Sapience> {
        let index = self.slots.iter().position(|slot| slot.id == id)?;
        Some(self.slots.remove(index).sapience)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.slots.iter().any(|slot| slot.id == id)
    }

    pub fn get(&self, id: EntityId) -> Option<&Sapience> {
        self.slots
            .iter()
            .find(|slot| slot.id == id)
            .map(|slot| &slot.sapience)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Sapience> {
        self.slots
            .iter_mut()
            .find(|slot| slot.id == id)
            .map(|slot| &mut slot.sapience)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActorSlot> {
        self.slots.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut ActorSlot> {
        self.slots.iter_mut()
    }

    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.slots.iter().map(|slot| slot.id)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_registration_order_and_rejects_duplicates() {
        let mut roster = ActorRoster::new();
        roster.add(EntityId(7)).unwrap();
        roster.add(EntityId(2)).unwrap();
        roster.add(EntityId(5)).unwrap();

        assert_eq!(
            roster.add(EntityId(2)).unwrap_err(),
            SchedulerError::DuplicateActor(EntityId(2))
        );
        assert_eq!(
            roster.ids().collect::<Vec<_>>(),
            vec![EntityId(7), EntityId(2), EntityId(5)]
        );

        assert!(roster.remove(EntityId(2)).is_some());
        assert_eq!(
            roster.ids().collect::<Vec<_>>(),
            vec![EntityId(7), EntityId(5)]
        );
        assert!(roster.get(EntityId(2)).is_none());
    }
}
