//! A single hand-drawn slope
//!
//! A segment is a polyline in screen space, points appended left to right
//! while the player drags. The whole polyline scrolls left each frame.
//! Queries scan point pairs from the newest (rightmost) backward so that a
//! stroke that loops over itself resolves to its most recent geometry.

use glam::Vec2;
use serde::{Deserialize, Deserializer, Serialize, de};

use crate::lerp;

/// Stable identifier of a segment within a [`super::Terrain`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SegmentId(pub u32);

/// One user-drawn polyline
#[derive(Debug, Clone, Serialize)]
pub struct TerrainSegment {
    pub id: SegmentId,
    points: Vec<Vec2>,
    /// Still being drawn (pointer held since this segment was started)
    active: bool,
}

impl TerrainSegment {
    /// Start a new active segment at `first`
    pub fn start(id: SegmentId, first: Vec2) -> Self {
        Self {
            id,
            points: vec![first],
            active: true,
        }
    }

    /// Build an inactive segment from existing points
    ///
    /// Returns `None` for an empty point list.
    pub fn from_points(id: SegmentId, points: Vec<Vec2>) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        Some(Self {
            id,
            points,
            active: false,
        })
    }

    /// Points in draw order
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Stop accepting points
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Append a point; ignored once the stroke has ended
    pub fn append(&mut self, point: Vec2) {
        if self.active {
            self.points.push(point);
        }
    }

    /// Move every point left by `delta`
    pub fn scroll(&mut self, delta: f32) {
        for p in &mut self.points {
            p.x -= delta;
        }
    }

    /// Rightmost (most recently drawn) point
    pub fn last_point(&self) -> Vec2 {
        // Never empty: constructors guarantee at least one point
        self.points[self.points.len() - 1]
    }

    /// Fully scrolled past the left edge
    pub fn is_offscreen_left(&self) -> bool {
        self.last_point().x < 0.0
    }

    /// Surface height at screen column `x`, `None` where the segment has no surface
    pub fn height_at(&self, x: f32) -> Option<f32> {
        if self.last_point().x < x {
            return None;
        }
        for pair in self.points.windows(2).rev() {
            let (p1, p2) = (pair[0], pair[1]);
            if p1.x == x {
                return Some(p1.y);
            }
            if p2.x == x {
                return Some(p2.y);
            }
            if p1.x <= x && p2.x >= x {
                let t = (x - p1.x) / (p2.x - p1.x);
                return Some(lerp(p1.y, p2.y, t));
            }
        }
        None
    }

    /// Surface angle (radians, positive = downhill) at `x`; 0 where undefined
    pub fn angle_at(&self, x: f32) -> f32 {
        self.containing_pair(x)
            .map(|(p1, p2)| {
                let d = p2 - p1;
                if d.x == 0.0 { 0.0 } else { d.y.atan2(d.x) }
            })
            .unwrap_or(0.0)
    }

    fn containing_pair(&self, x: f32) -> Option<(Vec2, Vec2)> {
        self.points
            .windows(2)
            .rev()
            .find(|pair| pair[0].x <= x && pair[1].x >= x)
            .map(|pair| (pair[0], pair[1]))
    }
}

// Goes through `from_points` so a loaded segment is never empty
impl<'de> Deserialize<'de> for TerrainSegment {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            id: SegmentId,
            points: Vec<Vec2>,
            active: bool,
        }

        let raw = Raw::deserialize(deserializer)?;
        let mut segment = Self::from_points(raw.id, raw.points)
            .ok_or_else(|| de::Error::custom(format!("segment {} has no points", raw.id.0)))?;
        segment.active = raw.active;
        Ok(segment)
    }
}
