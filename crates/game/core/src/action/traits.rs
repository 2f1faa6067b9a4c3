use bitflags::bitflags;

bitflags! {
    /// Capability and precondition tags declared once per action type.
    ///
    /// Two independent readers consume the set: the validation pipeline (which
    /// gates on the object and subject requirements) and command parsers/UIs
    /// (which read the shape flags to decide what follow-up input to request).
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ActionTraits: u32 {
        // ----- syntactic shapes -----
        const SUBJECT_ONLY                       = 1 << 0;
        const SUBJECT_OBJECT                     = 1 << 1;
        const SUBJECT_DIRECTION                  = 1 << 2;
        const SUBJECT_OBJECTS                    = 1 << 3;
        const SUBJECT_OBJECT_PREPOSITION_TARGET    = 1 << 4;
        const SUBJECT_OBJECT_PREPOSITION_DIRECTION = 1 << 5;
        const SUBJECT_OBJECT_PREPOSITION_BODYPART  = 1 << 6;
        const CAN_TAKE_A_QUANTITY                = 1 << 7;

        // ----- object requirements -----
        const OBJECT_MUST_BE_IN_INVENTORY        = 1 << 8;
        const OBJECT_MUST_BE_WIELDED             = 1 << 9;
        const OBJECT_MUST_BE_WORN                = 1 << 10;
        const OBJECT_MUST_NOT_BE_WIELDED         = 1 << 11;
        const OBJECT_MUST_NOT_BE_WORN            = 1 << 12;
        const OBJECT_CAN_BE_OUT_OF_REACH         = 1 << 13;
        const OBJECT_CAN_BE_SELF                 = 1 << 14;
        const OBJECT_MUST_BE_EMPTY               = 1 << 15;
        const OBJECT_MUST_NOT_BE_EMPTY           = 1 << 16;
        const OBJECT_MUST_BE_LIQUID_CARRIER      = 1 << 17;

        // ----- subject requirements -----
        const SUBJECT_CAN_BE_IN_LIMBO            = 1 << 18;
        const SUBJECT_MUST_BE_ABLE_TO_MOVE       = 1 << 19;

        /// Every shape that names at least one direct object.
        const ANY_OBJECT_SHAPE = Self::SUBJECT_OBJECT.bits()
            | Self::SUBJECT_OBJECTS.bits()
            | Self::SUBJECT_OBJECT_PREPOSITION_TARGET.bits()
            | Self::SUBJECT_OBJECT_PREPOSITION_DIRECTION.bits()
            | Self::SUBJECT_OBJECT_PREPOSITION_BODYPART.bits();
    }
}

impl ActionTraits {
    /// Returns true if the type takes one or more direct objects.
    pub fn takes_object(self) -> bool {
        self.intersects(Self::ANY_OBJECT_SHAPE)
    }

    /// Returns true if the type accepts more than one direct object.
    pub fn takes_many_objects(self) -> bool {
        self.contains(Self::SUBJECT_OBJECTS)
    }

    /// Returns true if the type needs a direction before it can run.
    pub fn takes_direction(self) -> bool {
        self.intersects(Self::SUBJECT_DIRECTION | Self::SUBJECT_OBJECT_PREPOSITION_DIRECTION)
    }

    /// Returns true if the type needs a target entity before it can run.
    pub fn takes_target(self) -> bool {
        self.intersects(
            Self::SUBJECT_OBJECT_PREPOSITION_TARGET | Self::SUBJECT_OBJECT_PREPOSITION_BODYPART,
        )
    }
}
