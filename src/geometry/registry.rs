//! Live geometry lookup for tagged elements.
//!
//! The presentation layer registers one rectangle source per [`TagKey`]; the engine only
//! ever reads through [`GeometryProvider`]. Reads are synchronous and must be idempotent
//! within a tick.

use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::{Arc, RwLock};

use crate::foundation::core::{Rect, TagKey, is_finite_rect, normalized};
use crate::foundation::error::{ChoreoError, ChoreoResult};
use crate::placement::anchor::Anchor;

/// Source of live rectangles for tagged elements.
pub trait GeometryProvider: Send + Sync {
    /// Current bounding rectangle of the element carrying `tag`, or `None` when it is not
    /// rendered.
    fn rect_of(&self, tag: &TagKey) -> Option<Rect>;

    /// Measure `tag` relative to the `container` element.
    ///
    /// Returns `None` if either element is absent or its geometry is not finite.
    fn measure(&self, tag: &TagKey, container: &TagKey) -> Option<Anchor> {
        let element = self.rect_of(tag)?;
        let frame = self.rect_of(container)?;
        Anchor::from_rects(tag.clone(), element, frame)
    }
}

type RectSource = Arc<dyn Fn() -> Option<Rect> + Send + Sync>;

/// Registry of rectangle sources populated by the presentation layer.
#[derive(Default)]
pub struct TagRegistry {
    sources: RwLock<HashMap<TagKey, RectSource>>,
}

impl TagRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a live rectangle source for `tag`.
    pub fn register<F>(&self, tag: impl Into<TagKey>, source: F)
    where
        F: Fn() -> Option<Rect> + Send + Sync + 'static,
    {
        let mut sources = self.sources.write().unwrap_or_else(|e| e.into_inner());
        sources.insert(tag.into(), Arc::new(source));
    }

    /// Register a fixed rectangle for `tag`.
    pub fn register_rect(&self, tag: impl Into<TagKey>, rect: Rect) {
        self.register(tag, move || Some(rect));
    }

    /// Remove the source for `tag`. Returns `true` if one was registered.
    pub fn unregister(&self, tag: &TagKey) -> bool {
        let mut sources = self.sources.write().unwrap_or_else(|e| e.into_inner());
        sources.remove(tag).is_some()
    }

    /// Whether a source is registered for `tag` (it may still report `None`).
    pub fn contains(&self, tag: &TagKey) -> bool {
        let sources = self.sources.read().unwrap_or_else(|e| e.into_inner());
        sources.contains_key(tag)
    }

    /// Number of registered sources.
    pub fn len(&self) -> usize {
        let sources = self.sources.read().unwrap_or_else(|e| e.into_inner());
        sources.len()
    }

    /// Whether the registry has no sources.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl GeometryProvider for TagRegistry {
    fn rect_of(&self, tag: &TagKey) -> Option<Rect> {
        // The source runs outside the lock so it may itself consult the registry.
        let source = {
            let sources = self.sources.read().unwrap_or_else(|e| e.into_inner());
            sources.get(tag).cloned()
        }?;
        source()
    }
}

/// Fixed set of rectangles, typically loaded from JSON.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StaticLayout {
    /// Rectangles by tag, in container-independent page coordinates.
    pub rects: BTreeMap<TagKey, Rect>,
}

impl StaticLayout {
    /// Create an empty layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a rectangle.
    #[must_use]
    pub fn with(mut self, tag: impl Into<TagKey>, rect: Rect) -> Self {
        self.rects.insert(tag.into(), rect);
        self
    }

    /// Add or replace a rectangle in place.
    pub fn insert(&mut self, tag: impl Into<TagKey>, rect: Rect) {
        self.rects.insert(tag.into(), rect);
    }

    /// Validate that every rectangle is finite.
    pub fn validate(&self) -> ChoreoResult<()> {
        for (tag, rect) in &self.rects {
            if !is_finite_rect(*rect) {
                return Err(ChoreoError::validation(format!(
                    "layout rect for '{tag}' must be finite"
                )));
            }
        }
        Ok(())
    }

    /// Parse a layout from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ChoreoResult<Self> {
        let layout: Self = serde_json::from_reader(r)
            .map_err(|e| ChoreoError::serde(format!("parse layout JSON: {e}")))?;
        layout.validate()?;
        Ok(layout)
    }

    /// Parse a layout from a JSON file on disk.
    #[tracing::instrument]
    pub fn from_path(path: &Path) -> ChoreoResult<Self> {
        let f = File::open(path).map_err(|e| {
            ChoreoError::validation(format!("open layout JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }
}

impl GeometryProvider for StaticLayout {
    fn rect_of(&self, tag: &TagKey) -> Option<Rect> {
        self.rects.get(tag).copied().map(normalized)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/registry.rs"]
mod tests;
