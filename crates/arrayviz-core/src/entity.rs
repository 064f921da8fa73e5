//! Positionable, resizable box volumes.
//!
//! Depth runs along x, width along y and height along z (z is up). Every
//! dimension change regenerates the box outline in the same call, so the
//! wireframe a renderer draws can never lag behind the filled volume.

use crate::bounds::Aabb;
use crate::constants::OUTLINE_LIGHTEN;
use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dimension {
    Depth,
    Width,
    Height,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Box extents. All three values are strictly positive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dimensions {
    pub height: f32,
    pub width: f32,
    pub depth: f32,
}

impl Dimensions {
    /// Build from depth, width and height (x, y, z order). Any value that is not
    /// strictly positive falls back to 1.
    pub fn new(depth: f32, width: f32, height: f32) -> Self {
        Self {
            depth: positive_or_one(depth),
            width: positive_or_one(width),
            height: positive_or_one(height),
        }
    }

    pub fn get(&self, which: Dimension) -> f32 {
        match which {
            Dimension::Depth => self.depth,
            Dimension::Width => self.width,
            Dimension::Height => self.height,
        }
    }

    /// Extents in world axes: x = depth, y = width, z = height.
    #[inline]
    pub fn extents(&self) -> Vec3 {
        Vec3::new(self.depth, self.width, self.height)
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }
}

#[inline]
fn positive_or_one(v: f32) -> f32 {
    if v.is_finite() && v > 0.0 {
        v
    } else {
        1.0
    }
}

/// The twelve edges of a box, in box-local space (centered on the origin).
#[derive(Clone, Debug, PartialEq)]
pub struct Outline {
    pub segments: [[Vec3; 2]; 12],
}

impl Outline {
    pub fn for_dimensions(dimensions: &Dimensions) -> Self {
        let h = dimensions.extents() * 0.5;
        let c = |sx: f32, sy: f32, sz: f32| Vec3::new(sx * h.x, sy * h.y, sz * h.z);
        let corners = [
            c(-1.0, -1.0, -1.0),
            c(1.0, -1.0, -1.0),
            c(1.0, 1.0, -1.0),
            c(-1.0, 1.0, -1.0),
            c(-1.0, -1.0, 1.0),
            c(1.0, -1.0, 1.0),
            c(1.0, 1.0, 1.0),
            c(-1.0, 1.0, 1.0),
        ];
        const EDGES: [(usize, usize); 12] = [
            (0, 1),
            (1, 2),
            (2, 3),
            (3, 0),
            (4, 5),
            (5, 6),
            (6, 7),
            (7, 4),
            (0, 4),
            (1, 5),
            (2, 6),
            (3, 7),
        ];
        let mut segments = [[Vec3::ZERO; 2]; 12];
        for (seg, (a, b)) in segments.iter_mut().zip(EDGES) {
            *seg = [corners[a], corners[b]];
        }
        Self { segments }
    }

    /// Largest absolute local coordinate per axis, i.e. the half extents the
    /// outline was built for.
    pub fn half_extents(&self) -> Vec3 {
        self.segments
            .iter()
            .flatten()
            .fold(Vec3::ZERO, |acc, p| acc.max(p.abs()))
    }
}

#[derive(Clone, Debug)]
pub struct BoxEntity {
    dimensions: Dimensions,
    position: Vec3,
    color: [f32; 3],
    outline_color: [f32; 3],
    opacity: f32,
    outline: Outline,
    revision: u64,
}

impl BoxEntity {
    pub fn new(position: Vec3, color: [f32; 3], dimensions: Dimensions, opacity: f32) -> Self {
        Self {
            outline: Outline::for_dimensions(&dimensions),
            outline_color: lighten(color, OUTLINE_LIGHTEN),
            dimensions,
            position,
            color,
            opacity: opacity.clamp(0.0, 1.0),
            revision: 0,
        }
    }

    /// Set one dimension. Non-positive or non-finite values are ignored and
    /// `false` is returned.
    pub fn set_dimension(&mut self, which: Dimension, value: f32) -> bool {
        if !value.is_finite() || value <= 0.0 {
            return false;
        }
        match which {
            Dimension::Depth => self.dimensions.depth = value,
            Dimension::Width => self.dimensions.width = value,
            Dimension::Height => self.dimensions.height = value,
        }
        self.regenerate();
        true
    }

    /// Replace all three dimensions; each one goes through `set_dimension`.
    pub fn set_dimensions(&mut self, dimensions: Dimensions) {
        self.set_dimension(Dimension::Depth, dimensions.depth);
        self.set_dimension(Dimension::Width, dimensions.width);
        self.set_dimension(Dimension::Height, dimensions.height);
    }

    /// Set one coordinate of the box center. `None` leaves the box in place.
    ///
    /// For `Axis::Y` the caller passes the distance to the near face and the
    /// stored center is offset by half the current width.
    pub fn set_axis(&mut self, which: Axis, value: Option<f32>) {
        let Some(v) = value.filter(|v| v.is_finite()) else {
            return;
        };
        match which {
            Axis::X => self.position.x = v,
            Axis::Y => self.position.y = v + self.dimensions.width / 2.0,
            Axis::Z => self.position.z = v,
        }
    }

    /// Rest the bottom face at `bottom`. Unset and zero elevations are ignored.
    pub fn set_z_from_bottom(&mut self, bottom: Option<f32>) {
        match bottom {
            Some(b) if b.is_finite() && b != 0.0 => {
                self.position.z = b + self.dimensions.height / 2.0;
            }
            _ => {}
        }
    }

    pub fn mirror_across_y(&mut self) {
        self.position.y = -self.position.y;
    }

    /// Move the box center to `position` verbatim.
    pub fn place_at(&mut self, position: Vec3) {
        if position.is_finite() {
            self.position = position;
        }
    }

    pub fn dimensions(&self) -> &Dimensions {
        &self.dimensions
    }

    pub fn position(&self) -> &Vec3 {
        &self.position
    }

    pub fn color(&self) -> [f32; 3] {
        self.color
    }

    pub fn outline_color(&self) -> [f32; 3] {
        self.outline_color
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn is_translucent(&self) -> bool {
        self.opacity < 1.0
    }

    pub fn outline(&self) -> &Outline {
        &self.outline
    }

    /// Bumped every time the geometry is regenerated.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_center_extents(self.position, self.dimensions.extents())
    }

    fn regenerate(&mut self) {
        self.outline = Outline::for_dimensions(&self.dimensions);
        self.revision = self.revision.wrapping_add(1);
    }
}

/// Raise HSL lightness by `amount`, keeping hue and saturation.
pub fn lighten(rgb: [f32; 3], amount: f32) -> [f32; 3] {
    let (h, s, l) = rgb_to_hsl(rgb);
    hsl_to_rgb(h, s, (l + amount).clamp(0.0, 1.0))
}

fn rgb_to_hsl([r, g, b]: [f32; 3]) -> (f32, f32, f32) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;
    if max == min {
        return (0.0, 0.0, l);
    }
    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };
    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };
    (h / 6.0, s, l)
}

fn hsl_to_rgb(h: f32, s: f32, l: f32) -> [f32; 3] {
    if s == 0.0 {
        return [l, l, l];
    }
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    let hue = |mut t: f32| {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 0.5 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * (2.0 / 3.0 - t) * 6.0
        } else {
            p
        }
    };
    [hue(h + 1.0 / 3.0), hue(h), hue(h - 1.0 / 3.0)]
}
