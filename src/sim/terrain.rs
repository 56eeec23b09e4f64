//! The mountain: every live slope segment, newest on top
//!
//! Segments are kept in creation order. Queries walk them newest first so a
//! fresh stroke overrides whatever it overlaps, which is how the player
//! redraws a bad slope.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::segment::{SegmentId, TerrainSegment};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Draw-button state for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PointerInput {
    /// Pointer position in screen space
    pub pos: Vec2,
    /// Button went down this frame
    pub pressed: bool,
    /// Button is held
    pub down: bool,
    /// Button went up this frame
    pub released: bool,
}

impl PointerInput {
    pub fn in_viewport(&self) -> bool {
        (0.0..=SCREEN_WIDTH).contains(&self.pos.x) && (0.0..=SCREEN_HEIGHT).contains(&self.pos.y)
    }
}

/// Ordered collection of segments
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Terrain {
    segments: Vec<TerrainSegment>,
    next_id: u32,
}

impl Terrain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Live segments in creation order
    pub fn segments(&self) -> &[TerrainSegment] {
        &self.segments
    }

    /// Look up a segment; `None` once it has been pruned
    pub fn segment(&self, id: SegmentId) -> Option<&TerrainSegment> {
        self.segments.iter().find(|s| s.id == id)
    }

    /// Insert a finished segment (newest on top). Returns `None` for no points.
    pub fn push_points(&mut self, points: Vec<Vec2>) -> Option<SegmentId> {
        let id = self.allocate_id();
        let segment = TerrainSegment::from_points(id, points)?;
        self.segments.push(segment);
        Some(id)
    }

    fn allocate_id(&mut self) -> SegmentId {
        let id = SegmentId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Scroll, apply drawing input and prune
    ///
    /// Returns the id of a segment started this frame, if any.
    pub fn update(&mut self, pointer: &PointerInput, scroll_speed: f32) -> Option<SegmentId> {
        for segment in &mut self.segments {
            segment.scroll(scroll_speed);
        }

        let mut started = None;
        if pointer.in_viewport() {
            let terrain_exists = self.height_at(pointer.pos.x).is_some();

            if pointer.pressed && !terrain_exists {
                let id = self.allocate_id();
                self.segments.push(TerrainSegment::start(id, pointer.pos));
                log::debug!("Segment {:?} started at {:?}", id, pointer.pos);
                started = Some(id);
            }

            if pointer.down && !terrain_exists {
                if let Some(last) = self.segments.last_mut() {
                    if last.is_active() && pointer.pos.x > last.last_point().x {
                        last.append(pointer.pos);
                    }
                }
            }

            if pointer.released {
                if let Some(last) = self.segments.last_mut() {
                    last.deactivate();
                }
            }
        }

        let before = self.segments.len();
        self.segments.retain(|s| !s.is_offscreen_left());
        if self.segments.len() != before {
            log::debug!("Pruned {} segment(s)", before - self.segments.len());
        }

        started
    }

    /// Surface height at `x` from the newest segment that covers it
    pub fn height_at(&self, x: f32) -> Option<(f32, SegmentId)> {
        self.segments
            .iter()
            .rev()
            .find_map(|s| s.height_at(x).map(|h| (h, s.id)))
    }

    /// Surface angle at `x` from the newest segment that covers it; 0 if none
    pub fn angle_at(&self, x: f32) -> f32 {
        self.height_at(x)
            .and_then(|(_, id)| self.segment(id))
            .map(|s| s.angle_at(x))
            .unwrap_or(0.0)
    }

    /// Drop every segment (run restart)
    pub fn clear(&mut self) {
        self.segments.clear();
    }
}
