//! Control identifiers and control shapes.
//!
//! A [`ControlId`] names a control by a stable symbolic string (`"cutoff"`,
//! `"attack"`, `"delay"`) instead of a numeric widget tag, so two front ends
//! can never collide on a magic number. Identifiers known at compile time are
//! `const` and allocation free; identifiers read from a configuration file
//! own their string.

use alloc::borrow::Cow;
use alloc::string::String;
use core::borrow::Borrow;
use core::fmt;

/// A stable symbolic control identifier.
///
/// Equality, ordering, and hashing all follow the underlying string, and the
/// type borrows as `&str`, so maps keyed by `ControlId` can be queried with a
/// plain string slice.
///
/// # Example
///
/// ```rust
/// use keyroute_core::ControlId;
///
/// const CUTOFF: ControlId = ControlId::from_static("cutoff");
/// let parsed = ControlId::new(String::from("cutoff"));
///
/// assert_eq!(CUTOFF, parsed);
/// assert_eq!(CUTOFF.as_str(), "cutoff");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ControlId(Cow<'static, str>);

impl ControlId {
    /// Creates an identifier from a string literal without allocating.
    #[inline]
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Creates an identifier that owns its name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    /// Returns the identifier as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ControlId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for ControlId {
    fn from(name: &'static str) -> Self {
        Self::from_static(name)
    }
}

impl From<String> for ControlId {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for ControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Shape of an input control.
///
/// All continuous controls report a normalized position in `0.0..=1.0`.
/// Toggles report `0.0` (off) or `1.0` (on). Segmented selectors report the
/// index of the chosen segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlType {
    /// Rotary knob with continuous value (0.0 to 1.0).
    Knob,
    /// Vertical slider with continuous value (0.0 to 1.0).
    Slider,
    /// Two-way on/off switch.
    Toggle,
    /// Segmented selector with the given number of segments.
    Segmented(u8),
}

impl ControlType {
    /// Returns the number of discrete positions for this control type.
    ///
    /// Returns `None` for continuous controls (Knob, Slider).
    ///
    /// ```rust
    /// use keyroute_core::ControlType;
    ///
    /// assert_eq!(ControlType::Toggle.discrete_positions(), Some(2));
    /// assert_eq!(ControlType::Segmented(4).discrete_positions(), Some(4));
    /// assert_eq!(ControlType::Knob.discrete_positions(), None);
    /// ```
    #[inline]
    pub const fn discrete_positions(&self) -> Option<u8> {
        match self {
            ControlType::Knob | ControlType::Slider => None,
            ControlType::Toggle => Some(2),
            ControlType::Segmented(n) => Some(*n),
        }
    }

    /// Returns true for knobs and sliders.
    #[inline]
    pub const fn is_continuous(&self) -> bool {
        self.discrete_positions().is_none()
    }
}
