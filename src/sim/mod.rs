//! Deterministic simulation module
//!
//! All bubble logic lives here. This module must stay pure:
//! - One step per frame, velocities in pixels per frame
//! - Seeded RNG only
//! - Drawing goes through `RenderSurface`, never a platform API

pub mod bubble;
pub mod collision;
pub mod oscillator;
pub mod tick;
pub mod wave;

pub use bubble::{Bubble, Removal, Stroke};
pub use collision::{Contact, WallContact, bounce_velocity, circle_contact, has_exited, wall_contact};
pub use oscillator::Oscillator;
pub use tick::{SimEvent, SimStats, Simulation};
pub use wave::WaveController;
