/// Logical lamp brightness in percent (0-100)
///
/// Every constructor clamps, so a value of this type is always in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Brightness(u8);

impl Brightness {
    /// Lamp fully off
    pub const OFF: Self = Self(0);
    /// Lamp fully on
    pub const FULL: Self = Self(100);

    /// Create brightness from a percentage, clamping to 0-100
    pub const fn new(percent: u8) -> Self {
        if percent > 100 { Self::FULL } else { Self(percent) }
    }

    /// Create brightness from a signed value, clamping to 0-100
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub const fn clamped(value: i32) -> Self {
        if value < 0 {
            Self::OFF
        } else if value > 100 {
            Self::FULL
        } else {
            Self(value as u8)
        }
    }

    /// Raw percentage
    pub const fn percent(self) -> u8 {
        self.0
    }

    /// The opposite extreme: `FULL` for `OFF`, `OFF` for anything else
    pub const fn opposite_extreme(self) -> Self {
        if self.0 == 0 { Self::FULL } else { Self::OFF }
    }

    /// Step by `delta` percent, clamped
    pub const fn step(self, delta: i32) -> Self {
        Self::clamped(self.0 as i32 + delta)
    }

    /// Absolute distance to `other` in percent
    pub const fn distance(self, other: Self) -> u8 {
        self.0.abs_diff(other.0)
    }
}

impl From<u8> for Brightness {
    fn from(value: u8) -> Self {
        Self::new(value)
    }
}

impl From<Brightness> for u8 {
    fn from(value: Brightness) -> Self {
        value.0
    }
}

