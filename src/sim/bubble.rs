//! Bubble entity and its per-frame update

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{bounce_velocity, circle_contact, contains_point, has_exited, wall_contact};
use super::oscillator::Oscillator;
use crate::renderer::RenderSurface;
use crate::settings::Style;
use crate::{Color, Viewport};

/// Where the stroke color currently comes from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Stroke {
    /// The palette bound at spawn (kept for the bubble's whole life)
    Spawn,
    /// A collision palette, replaced on every new hit
    Collision(Oscillator<Color>),
}

/// Why a bubble left the population
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Removal {
    /// Picked by the pointer
    Popped,
    /// Drifted out of the viewport
    Escaped,
}

/// A numbered, rising circle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bubble {
    pub id: u32,
    pub pos: Vec2,
    /// Pixels per frame; `vel.y` is never positive after an update
    pub vel: Vec2,
    radius: f32,
    label: String,
    spawn_color: Oscillator<Color>,
    stroke: Stroke,
    removal: Option<Removal>,
}

impl Bubble {
    pub fn new(
        id: u32,
        pos: Vec2,
        radius: f32,
        vel: Vec2,
        label: impl Into<String>,
        spawn_palette: (Color, Color),
    ) -> Self {
        Self {
            id,
            pos,
            vel,
            radius,
            label: label.into(),
            spawn_color: Oscillator::from_pair(spawn_palette),
            stroke: Stroke::Spawn,
            removal: None,
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn stroke(&self) -> &Stroke {
        &self.stroke
    }

    pub fn is_colliding_palette(&self) -> bool {
        matches!(self.stroke, Stroke::Collision(_))
    }

    pub fn is_removed(&self) -> bool {
        self.removal.is_some()
    }

    pub fn removal(&self) -> Option<Removal> {
        self.removal
    }

    /// Flag for removal. The first reason sticks; the flag never clears.
    pub fn mark_removed(&mut self, reason: Removal) {
        if self.removal.is_none() {
            self.removal = Some(reason);
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        contains_point(self.pos, self.radius, point)
    }

    /// Advance one frame: draw, then move and resolve collisions
    pub fn update<'a, S: RenderSurface>(
        &mut self,
        others: impl IntoIterator<Item = &'a Bubble>,
        viewport: Viewport,
        style: &Style,
        surface: &mut S,
    ) {
        self.draw(style, surface);
        self.step(others, viewport, style);
    }

    /// Outline plus centred label; consumes one stroke color
    pub fn draw<S: RenderSurface>(&mut self, style: &Style, surface: &mut S) {
        let color = self.next_stroke_color();
        surface.stroke_circle(self.pos, self.radius, color, style.line_width);
        surface.draw_text(&self.label, self.pos, &style.text);
    }

    fn next_stroke_color(&mut self) -> Color {
        match &mut self.stroke {
            Stroke::Spawn => self.spawn_color.next(),
            Stroke::Collision(osc) => osc.next(),
        }
    }

    /// Physics only: integrate, collide, bounce off walls, check exit
    pub fn step<'a>(
        &mut self,
        others: impl IntoIterator<Item = &'a Bubble>,
        viewport: Viewport,
        style: &Style,
    ) {
        self.pos += self.vel;

        for other in others {
            if other.id != self.id {
                self.resolve_collision(other, style.collision_palette);
            }
        }

        let walls = wall_contact(self.pos, self.radius, viewport);
        if walls.side {
            self.vel.x = -self.vel.x;
            self.stroke = Stroke::Spawn;
        }
        if walls.top {
            self.vel.y = -self.vel.y;
        }

        if has_exited(self.pos, self.radius, viewport) {
            self.mark_removed(Removal::Escaped);
        }

        // Bubbles only ever rise
        if self.vel.y > 0.0 {
            self.vel.y = -self.vel.y;
        }
    }

    /// Push this bubble out of `other` and bend its velocity.
    /// Returns whether they overlapped. `other` is left untouched.
    pub fn resolve_collision(&mut self, other: &Bubble, palette: (Color, Color)) -> bool {
        let Some(contact) = circle_contact(self.pos, self.radius, other.pos, other.radius) else {
            return false;
        };

        self.pos += contact.separation();
        self.vel = bounce_velocity(self.vel, contact.angle);
        self.stroke = Stroke::Collision(Oscillator::from_pair(palette));
        true
    }
}
