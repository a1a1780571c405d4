//! Explicit rounding direction for integer division.

/// Rounding direction for every division in the engine.
///
/// Division always takes an explicit `Rounding` so that each call site
/// states who absorbs the dust.  The convention is to round against the
/// caller: amounts paid out round [`Down`](Rounding::Down), amounts the
/// caller must supply round [`Up`](Rounding::Up).
///
/// # Examples
///
/// ```
/// use qite_dex::domain::Rounding;
///
/// assert!(Rounding::Up.is_up());
/// assert!(Rounding::Down.is_down());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rounding {
    /// Round towards positive infinity (ceiling).
    Up,
    /// Round towards zero (floor).
    Down,
}

impl Rounding {
    /// Returns `true` if this is [`Rounding::Up`].
    #[must_use]
    pub const fn is_up(&self) -> bool {
        matches!(self, Self::Up)
    }

    /// Returns `true` if this is [`Rounding::Down`].
    #[must_use]
    pub const fn is_down(&self) -> bool {
        matches!(self, Self::Down)
    }
}
