use std::fmt;

pub use kurbo::{Affine, Point, Rect, Size, Vec2};

/// Stable string key identifying a tagged on-screen element.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct TagKey(String);

impl TagKey {
    /// Create a tag key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Borrow the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TagKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for TagKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for TagKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque tag naming one step of a scripted timeline.
///
/// Phases are unique within a script; their order is the order of the script's steps.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct Phase(String);

impl Phase {
    /// Create a phase tag.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Borrow the phase name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Phase {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Phase {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of one playthrough, unique per controller.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct RunId(pub u64);

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "run#{}", self.0)
    }
}

/// Normalise a rectangle so that `x0 <= x1` and `y0 <= y1`.
pub(crate) fn normalized(rect: Rect) -> Rect {
    rect.abs()
}

/// `true` when every coordinate of the rectangle is finite.
pub(crate) fn is_finite_rect(rect: Rect) -> bool {
    rect.x0.is_finite() && rect.y0.is_finite() && rect.x1.is_finite() && rect.y1.is_finite()
}
