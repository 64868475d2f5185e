use std::fmt;

use egui::Pos2;
use uuid::Uuid;

use crate::geometry::Rectangle;
use crate::geometry::hit_testing::nearest_containing;

/// Identity of a committed region. Two regions with the same geometry
/// committed separately carry different ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeId(Uuid);

impl ShapeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ShapeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A committed, blacked-out rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaskedRegion {
    pub id: ShapeId,
    pub rect: Rectangle,
}

impl MaskedRegion {
    pub fn new(rect: Rectangle) -> Self {
        Self {
            id: ShapeId::new(),
            rect,
        }
    }
}

/// Committed regions in history order.
#[derive(Debug, Default, Clone)]
pub struct ShapeRegistry {
    regions: Vec<MaskedRegion>,
}

impl ShapeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `region` unless a region with the same id is already present.
    /// Returns whether the registry changed.
    pub fn commit(&mut self, region: MaskedRegion) -> bool {
        if self.contains(region.id) {
            log::debug!("Region {} already committed, skipping", region.id);
            return false;
        }
        self.regions.push(region);
        true
    }

    pub fn remove(&mut self, id: ShapeId) -> Option<MaskedRegion> {
        let index = self.regions.iter().position(|region| region.id == id)?;
        Some(self.regions.remove(index))
    }

    /// Empties the registry, returning the removed regions in history order.
    pub fn clear_all(&mut self) -> Vec<MaskedRegion> {
        std::mem::take(&mut self.regions)
    }

    /// The region containing `point` whose center is nearest to it.
    pub fn hit_test(&self, point: Pos2) -> Option<&MaskedRegion> {
        nearest_containing(point, self.regions.iter().map(|region| (region, region.rect)))
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.regions.iter().any(|region| region.id == id)
    }

    pub fn get(&self, id: ShapeId) -> Option<&MaskedRegion> {
        self.regions.iter().find(|region| region.id == id)
    }

    /// Most recently committed region.
    pub fn last(&self) -> Option<&MaskedRegion> {
        self.regions.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MaskedRegion> {
        self.regions.iter()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}
