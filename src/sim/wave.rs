//! Wave controller: how many bubbles to spawn and where
//!
//! A wave ends when the population is empty. The next wave is one bubble
//! larger and is spawned all at once, labelled `1..=size`.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::bubble::Bubble;
use crate::{Color, Viewport};
use crate::settings::{SpawnSettings, Style};

#[derive(Debug, Clone)]
pub struct WaveController {
    rng: Pcg32,
    wave_size: u32,
    /// Label of the next bubble in this wave
    sequence: u32,
    spawn: SpawnSettings,
    spawn_palette: (Color, Color),
}

impl WaveController {
    pub fn new(seed: u64, spawn: &SpawnSettings, style: &Style) -> Self {
        let wave_size = spawn.initial_wave_size.max(1);
        Self {
            rng: Pcg32::seed_from_u64(seed),
            wave_size,
            sequence: 1,
            spawn: spawn.clone(),
            spawn_palette: style.spawn_palette,
        }
    }

    pub fn wave_size(&self) -> u32 {
        self.wave_size
    }

    /// Spawn the whole current wave (used once before the loop starts)
    pub fn spawn_wave(
        &mut self,
        viewport: Viewport,
        next_id: &mut impl FnMut() -> u32,
    ) -> Vec<Bubble> {
        self.sequence = 1;
        (0..self.wave_size)
            .map(|_| self.spawn_one(viewport, next_id()))
            .collect()
    }

    /// Grow the wave by one and spawn it. Call only with an empty population.
    pub fn advance(&mut self, viewport: Viewport, next_id: &mut impl FnMut() -> u32) -> Vec<Bubble> {
        self.wave_size += 1;
        let wave = self.spawn_wave(viewport, next_id);
        log::info!("Wave {} spawned ({} bubbles)", self.wave_size, wave.len());
        wave
    }

    /// Create one bubble just below the bottom edge
    pub fn spawn_one(&mut self, viewport: Viewport, id: u32) -> Bubble {
        let (min, max) = (self.spawn.min_radius, self.spawn.max_radius);
        let radius = if min < max {
            self.rng.random_range(min..max)
        } else {
            min.max(1)
        } as f32;

        let span = viewport.width - 2.0 * radius;
        let x = if span > 0.0 {
            (self.rng.random::<f32>() * span + radius).clamp(radius, viewport.width - radius)
        } else {
            // Narrower than the bubble: centre it
            viewport.width / 2.0
        };
        let pos = Vec2::new(x, viewport.height + radius);

        let label = self.sequence.to_string();
        self.sequence += 1;

        let (vx, vy) = self.spawn.velocity;
        Bubble::new(id, pos, radius, Vec2::new(vx, vy), label, self.spawn_palette)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEW: Viewport = Viewport::new(800.0, 600.0);

    fn controller(seed: u64) -> WaveController {
        WaveController::new(seed, &SpawnSettings::default(), &Style::default())
    }

    fn ids() -> impl FnMut() -> u32 {
        let mut next = 0;
        move || {
            next += 1;
            next
        }
    }

    #[test]
    fn test_initial_wave_single_bubble() {
        let mut waves = controller(1);
        assert_eq!(waves.wave_size(), 1);
        let wave = waves.spawn_wave(VIEW, &mut ids());
        assert_eq!(wave.len(), 1);
        assert_eq!(wave[0].label(), "1");
        assert_eq!(wave[0].vel, Vec2::new(2.0, -2.0));
    }

    #[test]
    fn test_advance_grows_by_one() {
        let mut waves = controller(2);
        let mut next_id = ids();
        for k in 1..6u32 {
            let wave = waves.advance(VIEW, &mut next_id);
            assert_eq!(waves.wave_size(), k + 1);
            let labels: Vec<_> = wave.iter().map(|b| b.label().to_string()).collect();
            let expected: Vec<_> = (1..=k + 1).map(|n| n.to_string()).collect();
            assert_eq!(labels, expected);
        }
    }

    #[test]
    fn test_spawn_placement() {
        let mut waves = controller(3);
        let mut next_id = ids();
        for _ in 0..200 {
            let b = waves.spawn_one(VIEW, next_id());
            let r = b.radius();
            assert!((35.0..95.0).contains(&r));
            assert_eq!(r.fract(), 0.0);
            assert!(b.pos.x >= r && b.pos.x <= VIEW.width - r);
            assert_eq!(b.pos.y, VIEW.height + r);
        }
    }

    #[test]
    fn test_narrow_viewport_centres_bubble() {
        let mut waves = controller(4);
        let b = waves.spawn_one(Viewport::new(50.0, 100.0), 1);
        assert_eq!(b.pos.x, 25.0);
        assert!(b.pos.x.is_finite());
    }

    #[test]
    fn test_empty_radius_range_does_not_panic() {
        let spawn = SpawnSettings {
            min_radius: 50,
            max_radius: 50,
            ..SpawnSettings::default()
        };
        let mut waves = WaveController::new(5, &spawn, &Style::default());
        let wave = waves.advance(VIEW, &mut ids());
        assert_eq!(wave.len(), 2);
        assert!(wave.iter().all(|b| b.radius() == 50.0));
    }

    #[test]
    fn test_same_seed_same_waves() {
        let mut a = controller(99);
        let mut b = controller(99);
        let wa = a.advance(VIEW, &mut ids());
        let wb = b.advance(VIEW, &mut ids());
        for (x, y) in wa.iter().zip(&wb) {
            assert_eq!(x.pos, y.pos);
            assert_eq!(x.radius(), y.radius());
        }
    }
}
