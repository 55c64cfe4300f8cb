//! Paint-ball projectiles and where they land on the canvas.
//!
//! The physics engine that flies the ball is an outside collaborator; this
//! module only turns its impact reports into canvas pixel coordinates.
//!
//! # Surface orientation
//!
//! The painting surface lies in the world XZ plane. World X maps to canvas
//! `x`, world Z maps to canvas `y`, and both axes are inverted:
//!
//! ```text
//! canvas_x = width  - (world.x - world_min) / (world_max - world_min) * width
//! canvas_y = height - (world.z - world_min) / (world_max - world_min) * height
//! ```
//!
//! With the default extent of [-5, 5], world (5, _, 5) is canvas (0, 0) and
//! world (-5, _, -5) sits just past the far corner.

use std::fmt;

use egui::{Pos2, pos2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::SurfaceExtent;

/// A position in the 3D scene
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl WorldPoint {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectileId(Uuid);

impl ProjectileId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ProjectileId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProjectileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What kind of object hit the canvas. Only color balls leave paint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileTag {
    ColorBall,
    Other(String),
}

/// Contact report delivered by the physics collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileImpact {
    pub id: ProjectileId,
    pub tag: ProjectileTag,
    pub point: WorldPoint,
}

impl ProjectileImpact {
    pub fn color_ball(point: WorldPoint) -> Self {
        Self {
            id: ProjectileId::new(),
            tag: ProjectileTag::ColorBall,
            point,
        }
    }
}

/// Affine map between the painting surface and canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceMapping {
    extent: SurfaceExtent,
    width: u32,
    height: u32,
}

impl SurfaceMapping {
    pub fn new(extent: SurfaceExtent, width: u32, height: u32) -> Self {
        Self {
            extent,
            width,
            height,
        }
    }

    fn span(&self) -> f32 {
        self.extent.world_max - self.extent.world_min
    }

    /// Canvas position of a world impact, without range checks.
    pub fn project(&self, point: WorldPoint) -> Pos2 {
        let (w, h) = (self.width as f32, self.height as f32);
        let u = (point.x - self.extent.world_min) / self.span();
        let v = (point.z - self.extent.world_min) / self.span();
        pos2(w - u * w, h - v * h)
    }

    /// Canvas position of a world impact, or `None` when it misses the canvas.
    ///
    /// Impacts off the surface are rejected rather than clamped so they never
    /// smear onto the border.
    pub fn world_to_canvas(&self, point: WorldPoint) -> Option<Pos2> {
        let canvas = self.project(point);
        let inside = canvas.x.is_finite()
            && canvas.y.is_finite()
            && canvas.x >= 0.0
            && canvas.y >= 0.0
            && canvas.x < self.width as f32
            && canvas.y < self.height as f32;
        inside.then_some(canvas)
    }

    /// Inverse of [`Self::project`], with the surface at height `y`.
    pub fn canvas_to_world(&self, canvas: Pos2, y: f32) -> WorldPoint {
        let (w, h) = (self.width as f32, self.height as f32);
        let u = (w - canvas.x) / w;
        let v = (h - canvas.y) / h;
        WorldPoint::new(
            self.extent.world_min + u * self.span(),
            y,
            self.extent.world_min + v * self.span(),
        )
    }
}
