//! Collision detection and response between bubbles and the viewport
//!
//! The response is intentionally one-sided: only the bubble being updated
//! moves. Its partner gets its own correction when its turn comes.

use glam::Vec2;

use crate::consts::DEGENERATE_DISTANCE;
use crate::{Viewport, angle_between, unit};

/// Overlap between two circles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Direction from the other circle toward the acting one (radians)
    pub angle: f32,
    /// How far the circles interpenetrate
    pub overlap: f32,
}

impl Contact {
    /// Displacement that moves the acting circle half the overlap away
    pub fn separation(&self) -> Vec2 {
        unit(self.angle) * (self.overlap / 2.0)
    }
}

/// Check whether circle `a` overlaps circle `b`
///
/// Touching circles (distance == sum of radii) do not collide. Coincident
/// centres have no defined direction; the acting circle is pushed straight up.
pub fn circle_contact(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> Option<Contact> {
    let reach = a_radius + b_radius;
    let distance = a_pos.distance(b_pos);
    if !(distance < reach) {
        return None;
    }

    let angle = if distance < DEGENERATE_DISTANCE {
        -std::f32::consts::FRAC_PI_2
    } else {
        angle_between(b_pos, a_pos)
    };

    Some(Contact {
        angle,
        overlap: reach - distance,
    })
}

/// Bounce response: rotate the velocity components by the contact angle
///
/// `x' = cos(a)·vx + cos(a + π/2)·vy`, `y' = sin(a)·vx + sin(a + π/2)·vy`.
/// Not momentum conserving; it only has to look like a bounce.
#[inline]
pub fn bounce_velocity(vel: Vec2, angle: f32) -> Vec2 {
    let along = unit(angle);
    let across = unit(angle + std::f32::consts::FRAC_PI_2);
    along * vel.x + across * vel.y
}

/// Which viewport walls a circle touches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallContact {
    /// Left or right edge
    pub side: bool,
    pub top: bool,
}

/// Check a circle against the left, right and top walls
///
/// There is no bottom wall: bubbles enter from below.
pub fn wall_contact(pos: Vec2, radius: f32, viewport: Viewport) -> WallContact {
    WallContact {
        side: pos.x + radius >= viewport.width || pos.x - radius <= 0.0,
        top: pos.y - radius <= 0.0,
    }
}

/// True once a circle is entirely above the top edge or beyond a side edge
pub fn has_exited(pos: Vec2, radius: f32, viewport: Viewport) -> bool {
    pos.y + radius < 0.0 || pos.x - radius > viewport.width || pos.x + radius < 0.0
}

/// Check whether a point lies inside (or on) a circle
#[inline]
pub fn contains_point(center: Vec2, radius: f32, point: Vec2) -> bool {
    center.distance(point) <= radius
}
