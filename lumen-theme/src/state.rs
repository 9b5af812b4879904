use bitflags::bitflags;

bitflags! {
    /// Snapshot of a widget's interaction flags.
    ///
    /// Style derivation consumes this value; the live, observable flags are
    /// owned by each widget.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct StateFlags: u8 {
        /// Pointer is over the widget.
        const HOVER = 0b0000_0001;
        /// Pointer button is held down on the widget.
        const PRESSED = 0b0000_0010;
        /// Widget is checked/on.
        const SELECTED = 0b0000_0100;
        /// Widget is partially checked.
        const INDETERMINATE = 0b0000_1000;
        /// Widget ignores interaction.
        const DISABLED = 0b0001_0000;
        /// Widget content failed validation.
        const INVALID = 0b0010_0000;
    }
}

impl StateFlags {
    /// Resolve the selected/indeterminate pair so both are never set.
    /// Indeterminate wins.
    pub fn normalized(self) -> Self {
        if self.contains(Self::INDETERMINATE) {
            self.difference(Self::SELECTED)
        } else {
            self
        }
    }

    /// Selected or indeterminate.
    pub fn is_active(self) -> bool {
        self.intersects(Self::SELECTED | Self::INDETERMINATE)
    }

    /// Whether the widget is disabled.
    pub fn is_disabled(self) -> bool {
        self.contains(Self::DISABLED)
    }

    /// Whether hover feedback should be drawn.
    pub fn shows_hover(self) -> bool {
        self.contains(Self::HOVER) && !self.is_disabled()
    }

    /// Whether pressed feedback should be drawn.
    pub fn shows_pressed(self) -> bool {
        self.contains(Self::PRESSED) && !self.is_disabled()
    }
}

/// Which state axis decides the color roles of a widget.
///
/// Ordered from strongest to weakest: a disabled widget is muted regardless
/// of anything else, an invalid one shows the error role even when selected,
/// and selection beats the idle look. Hover and pressed never appear here;
/// they only add opacity or elevation on top of the chosen roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StateTier {
    /// [StateFlags::DISABLED] is set.
    Disabled,
    /// [StateFlags::INVALID] is set.
    Invalid,
    /// Selected or indeterminate.
    Active,
    /// None of the above.
    Idle,
}

impl StateTier {
    /// Pick the tier for a set of flags.
    pub fn of(flags: StateFlags) -> Self {
        if flags.is_disabled() {
            StateTier::Disabled
        } else if flags.contains(StateFlags::INVALID) {
            StateTier::Invalid
        } else if flags.is_active() {
            StateTier::Active
        } else {
            StateTier::Idle
        }
    }
}
