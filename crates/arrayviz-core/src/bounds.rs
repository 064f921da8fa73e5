use glam::Vec3;

/// Axis-aligned bounding volume, grown one box at a time.
///
/// A fresh `Aabb` is inverted (min > max) and reports `is_empty()` until the
/// first box is added.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub const EMPTY: Aabb = Aabb {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    pub fn from_center_extents(center: Vec3, extents: Vec3) -> Self {
        let half = extents * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    pub fn expand(&mut self, other: &Aabb) {
        if other.is_empty() {
            return;
        }
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    pub fn union(mut self, other: &Aabb) -> Self {
        self.expand(other);
        self
    }

    pub fn size(&self) -> Vec3 {
        if self.is_empty() {
            Vec3::ZERO
        } else {
            self.max - self.min
        }
    }

    pub fn center(&self) -> Vec3 {
        if self.is_empty() {
            Vec3::ZERO
        } else {
            (self.min + self.max) * 0.5
        }
    }

    #[inline]
    pub fn max_extent(&self) -> f32 {
        self.size().max_element()
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl FromIterator<Aabb> for Aabb {
    fn from_iter<I: IntoIterator<Item = Aabb>>(iter: I) -> Self {
        iter.into_iter().fold(Aabb::EMPTY, |acc, b| acc.union(&b))
    }
}
