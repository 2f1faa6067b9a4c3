//! Core action types: identity, lifecycle state, and the persisted record.

use crate::action::error::ActionError;
use crate::action::spec::ActionSpec;
use crate::action::traits::ActionTraits;
use crate::state::{EntityId, Position};

// ============================================================================
// Direction
// ============================================================================

/// Direction an action may be aimed at.
///
/// Coordinate system: Y-axis increases upward (north), X-axis increases
/// rightward (east). `Up`, `Down` and `Here` do not change the tile.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
    Up,
    Down,
    Here,
}

impl Direction {
    /// Returns the tile offset (dx, dy) for this direction.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::South => (0, -1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::NorthEast => (1, 1),
            Direction::NorthWest => (-1, 1),
            Direction::SouthEast => (1, -1),
            Direction::SouthWest => (-1, -1),
            Direction::Up | Direction::Down | Direction::Here => (0, 0),
        }
    }

    /// Returns true if moving this way leaves the current tile.
    pub fn is_planar(self) -> bool {
        self.offset() != (0, 0)
    }

    /// Position one step from `origin` in this direction.
    pub fn step_from(self, origin: Position) -> Position {
        let (dx, dy) = self.offset();
        origin.offset(dx, dy)
    }
}

// ============================================================================
// Lifecycle State
// ============================================================================

/// Position of an action in its lifecycle.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ActionState {
    /// Constructed, not yet scheduled.
    #[default]
    Pending,
    /// Reaction-time gate; validation and precondition checks run here.
    PreBegin,
    /// The main effect runs on the next step.
    InProgress,
    /// Abort requested while in progress; the abort hook runs next.
    Interrupted,
    /// Recovery period; the finish hook runs next.
    PostFinish,
    /// Terminal; the owning queue pops the action.
    Processed,
}

impl ActionState {
    /// Returns true for every state in which the action counts as active.
    pub const fn is_active(self) -> bool {
        !matches!(self, ActionState::Pending | ActionState::Processed)
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, ActionState::Processed)
    }

    /// Ordinal in the lifecycle; visited states are strictly increasing.
    ///
    /// `Interrupted` ranks between `InProgress` and `PostFinish` because it is
    /// only ever entered from `InProgress`.
    pub const fn rank(self) -> u8 {
        match self {
            ActionState::Pending => 0,
            ActionState::PreBegin => 1,
            ActionState::InProgress => 2,
            ActionState::Interrupted => 3,
            ActionState::PostFinish => 4,
            ActionState::Processed => 5,
        }
    }
}

// ============================================================================
// Construction Arguments
// ============================================================================

/// Optional identity fields supplied when creating an action.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActionArgs {
    pub objects: Vec<EntityId>,
    pub target_entity: Option<EntityId>,
    pub target_direction: Option<Direction>,
    pub quantity: u32,
}

impl ActionArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn object(mut self, object: EntityId) -> Self {
        self.objects.push(object);
        self
    }

    pub fn objects(mut self, objects: impl IntoIterator<Item = EntityId>) -> Self {
        self.objects.extend(objects);
        self
    }

    pub fn target(mut self, target: EntityId) -> Self {
        self.target_entity = Some(target);
        self
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.target_direction = Some(direction);
        self
    }

    pub fn quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }
}

// ============================================================================
// Action
// ============================================================================

/// A command instance moving through the lifecycle state machine.
///
/// Actions are only built by [`ActionRegistry`](crate::ActionRegistry). The
/// subject is fixed at construction; the remaining identity fields can be
/// filled in while the action is `Pending` or being resolved in `PreBegin`,
/// and are frozen from `InProgress` on.
#[derive(Clone, Debug)]
pub struct Action {
    key: &'static str,
    spec: ActionSpec,
    subject: EntityId,
    objects: Vec<EntityId>,
    target_entity: Option<EntityId>,
    target_direction: Option<Direction>,
    quantity: u32,
    pub(crate) state: ActionState,
}

impl Action {
    pub(crate) fn new(
        key: &'static str,
        spec: ActionSpec,
        subject: EntityId,
        args: ActionArgs,
    ) -> Self {
        Self {
            key,
            spec,
            subject,
            objects: args.objects,
            target_entity: args.target_entity,
            target_direction: args.target_direction,
            quantity: args.quantity,
            state: ActionState::Pending,
        }
    }

    /// Registry key of this action's type.
    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn subject(&self) -> EntityId {
        self.subject
    }

    pub fn objects(&self) -> &[EntityId] {
        &self.objects
    }

    /// First direct object, if any.
    pub fn object(&self) -> Option<EntityId> {
        self.objects.first().copied()
    }

    pub fn target_entity(&self) -> Option<EntityId> {
        self.target_entity
    }

    pub fn target_direction(&self) -> Option<Direction> {
        self.target_direction
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn state(&self) -> ActionState {
        self.state
    }

    /// Trait set declared by this action's type.
    pub fn traits(&self) -> ActionTraits {
        self.spec.traits()
    }

    pub(crate) fn spec(&self) -> &ActionSpec {
        &self.spec
    }

    /// Returns true while identity fields may still be changed.
    pub fn is_identity_open(&self) -> bool {
        matches!(self.state, ActionState::Pending | ActionState::PreBegin)
    }

    fn ensure_identity_open(&self) -> Result<(), ActionError> {
        if self.is_identity_open() {
            Ok(())
        } else {
            Err(ActionError::IdentityFrozen {
                key: self.key.to_string(),
                state: self.state,
            })
        }
    }

    /// Appends a direct object.
    pub fn add_object(&mut self, object: EntityId) -> Result<(), ActionError> {
        self.ensure_identity_open()?;
        self.objects.push(object);
        Ok(())
    }

    /// Sets the target entity, for example once a UI target selection completes.
    pub fn set_target_entity(&mut self, target: Option<EntityId>) -> Result<(), ActionError> {
        self.ensure_identity_open()?;
        self.target_entity = target;
        Ok(())
    }

    pub fn set_target_direction(
        &mut self,
        direction: Option<Direction>,
    ) -> Result<(), ActionError> {
        self.ensure_identity_open()?;
        self.target_direction = direction;
        Ok(())
    }

    pub fn set_quantity(&mut self, quantity: u32) -> Result<(), ActionError> {
        self.ensure_identity_open()?;
        self.quantity = quantity;
        Ok(())
    }

    /// Flat record of this action's data fields, suitable for persistence.
    pub fn to_record(&self) -> ActionRecord {
        ActionRecord {
            key: self.key.to_string(),
            subject: self.subject,
            objects: self.objects.clone(),
            target_entity: self.target_entity,
            target_direction: self.target_direction,
            quantity: self.quantity,
            state: self.state,
        }
    }
}

// ============================================================================
// Persisted Record
// ============================================================================

/// Persisted layout of an action: its data fields without the hook table.
///
/// Rebuilt into an [`Action`] by
/// [`ActionRegistry::restore`](crate::ActionRegistry::restore). The optional
/// target fields serialize as explicit `null` and are required on input, so
/// "no target" is never confused with "field missing".
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionRecord {
    pub key: String,
    pub subject: EntityId,
    pub objects: Vec<EntityId>,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "required_option"))]
    pub target_entity: Option<EntityId>,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "required_option"))]
    pub target_direction: Option<Direction>,
    pub quantity: u32,
    pub state: ActionState,
}

/// Deserializes an `Option` field without serde's implicit "missing means None".
#[cfg(feature = "serde")]
fn required_option<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::Deserialize<'de>,
{
    <Option<T> as serde::Deserialize>::deserialize(deserializer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn direction_keys_parse_case_insensitively() {
        assert_eq!("north_east".parse::<Direction>(), Ok(Direction::NorthEast));
        assert_eq!("WEST".parse::<Direction>(), Ok(Direction::West));
        assert_eq!(Direction::SouthWest.to_string(), "south_west");
    }

    #[test]
    fn only_compass_directions_change_tile() {
        let planar: Vec<_> = Direction::iter().filter(|d| d.is_planar()).collect();
        assert_eq!(planar.len(), 8);
        assert_eq!(
            Direction::North.step_from(Position::ORIGIN),
            Position::new(0, 1)
        );
        assert_eq!(Direction::Here.step_from(Position::ORIGIN), Position::ORIGIN);
    }

    #[test]
    fn state_ranks_are_strictly_ordered() {
        let ranks: Vec<u8> = ActionState::iter().map(ActionState::rank).collect();
        assert!(ranks.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(!ActionState::Pending.is_active());
        assert!(ActionState::Interrupted.is_active());
        assert!(!ActionState::Processed.is_active());
    }
}
