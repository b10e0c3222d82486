//! Per-frame simulation tick
//!
//! Clear, update every bubble, drop the removed ones, and start the next
//! wave once the screen is empty.

use glam::Vec2;

use super::bubble::{Bubble, Removal};
use super::wave::WaveController;
use crate::Viewport;
use crate::platform::Flow;
use crate::renderer::RenderSurface;
use crate::settings::{Settings, Style};

/// Something the host may want to react to (HUD, sound, logging)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimEvent {
    Popped { id: u32 },
    Escaped { id: u32 },
    WaveStarted { wave_size: u32 },
}

/// Running totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimStats {
    pub popped: u64,
    pub escaped: u64,
    pub waves_cleared: u32,
    pub ticks: u64,
}

/// Owns the population and drives it frame by frame
#[derive(Debug)]
pub struct Simulation {
    bubbles: Vec<Bubble>,
    waves: WaveController,
    style: Style,
    stats: SimStats,
    events: Vec<SimEvent>,
    next_id: u32,
    /// Initial wave could not be placed (degenerate viewport at start)
    initial_wave_pending: bool,
    running: bool,
}

impl Simulation {
    /// Create a simulation with the first wave already on its way up
    pub fn new(settings: &Settings, seed: u64, viewport: Viewport) -> Self {
        let mut sim = Self::empty(settings, seed);
        if viewport.is_degenerate() {
            log::warn!("Viewport {viewport:?} unusable, deferring first wave");
            sim.initial_wave_pending = true;
        } else {
            sim.spawn_initial_wave(viewport);
        }
        log::info!("Simulation started (seed {seed}, wave size {})", sim.wave_size());
        sim
    }

    /// Create a simulation around an explicit population (no initial spawn)
    pub fn with_bubbles(settings: &Settings, seed: u64, bubbles: Vec<Bubble>) -> Self {
        let mut sim = Self::empty(settings, seed);
        sim.next_id = bubbles.iter().map(|b| b.id + 1).max().unwrap_or(1);
        sim.bubbles = bubbles;
        sim
    }

    fn empty(settings: &Settings, seed: u64) -> Self {
        Self {
            bubbles: Vec::new(),
            waves: WaveController::new(seed, &settings.spawn, &settings.style),
            style: settings.style.clone(),
            stats: SimStats::default(),
            events: Vec::new(),
            next_id: 1,
            initial_wave_pending: false,
            running: true,
        }
    }

    pub fn bubbles(&self) -> &[Bubble] {
        &self.bubbles
    }

    pub fn wave_size(&self) -> u32 {
        self.waves.wave_size()
    }

    pub fn stats(&self) -> SimStats {
        self.stats
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    /// Ask the loop to end; the next tick returns `Flow::Stop`
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Advance one frame
    pub fn tick<S: RenderSurface>(&mut self, viewport: Viewport, surface: &mut S) -> Flow {
        if !self.running {
            return Flow::Stop;
        }
        if viewport.is_degenerate() {
            log::debug!("Skipping tick, degenerate viewport {viewport:?}");
            return Flow::Continue;
        }

        surface.clear(viewport.rect());
        self.stats.ticks += 1;

        for i in 0..self.bubbles.len() {
            let (before, rest) = self.bubbles.split_at_mut(i);
            let Some((current, after)) = rest.split_first_mut() else {
                break;
            };
            current.update(
                before.iter().chain(after.iter()),
                viewport,
                &self.style,
                &mut *surface,
            );
        }

        self.remove_marked();

        if self.bubbles.is_empty() {
            if self.initial_wave_pending {
                self.spawn_initial_wave(viewport);
            } else {
                self.advance_wave(viewport);
            }
        }

        Flow::Continue
    }

    /// Pop the first bubble containing `point`. Call between ticks.
    ///
    /// Overlapping bubbles resolve in population order. A bubble already
    /// popped since the last tick still shadows the ones behind it, so a
    /// repeated click on the same spot changes nothing.
    pub fn pick(&mut self, point: Vec2) -> Option<u32> {
        let bubble = self.bubbles.iter_mut().find(|b| b.contains(point))?;
        bubble.mark_removed(Removal::Popped);
        log::debug!("Popped bubble {} (label {})", bubble.id, bubble.label());
        Some(bubble.id)
    }

    fn remove_marked(&mut self) {
        for bubble in &self.bubbles {
            match bubble.removal() {
                Some(Removal::Popped) => {
                    self.stats.popped += 1;
                    self.events.push(SimEvent::Popped { id: bubble.id });
                }
                Some(Removal::Escaped) => {
                    self.stats.escaped += 1;
                    self.events.push(SimEvent::Escaped { id: bubble.id });
                }
                None => {}
            }
        }
        self.bubbles.retain(|b| !b.is_removed());
    }

    fn spawn_initial_wave(&mut self, viewport: Viewport) {
        let next_id = &mut self.next_id;
        let wave = self.waves.spawn_wave(viewport, &mut || {
            let id = *next_id;
            *next_id += 1;
            id
        });
        self.initial_wave_pending = false;
        self.start_wave(wave);
    }

    fn advance_wave(&mut self, viewport: Viewport) {
        self.stats.waves_cleared += 1;
        log::info!(
            "Wave {} cleared (popped {}, escaped {})",
            self.waves.wave_size(),
            self.stats.popped,
            self.stats.escaped
        );

        let next_id = &mut self.next_id;
        let wave = self.waves.advance(viewport, &mut || {
            let id = *next_id;
            *next_id += 1;
            id
        });
        self.start_wave(wave);
    }

    fn start_wave(&mut self, wave: Vec<Bubble>) {
        self.events.push(SimEvent::WaveStarted {
            wave_size: self.waves.wave_size(),
        });
        self.bubbles = wave;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SPAWN_PALETTE;
    use crate::renderer::{DrawCommand, RecordingSurface};

    const VIEW: Viewport = Viewport::new(800.0, 600.0);

    fn bubble(id: u32, x: f32, y: f32, r: f32) -> Bubble {
        Bubble::new(id, Vec2::new(x, y), r, Vec2::new(2.0, -2.0), id.to_string(), SPAWN_PALETTE)
    }

    #[test]
    fn test_new_spawns_first_wave() {
        let sim = Simulation::new(&Settings::default(), 12345, VIEW);
        assert_eq!(sim.wave_size(), 1);
        assert_eq!(sim.bubbles().len(), 1);
        let b = &sim.bubbles()[0];
        assert_eq!(b.label(), "1");
        assert_eq!(b.pos.y, VIEW.height + b.radius());
    }

    #[test]
    fn test_tick_draws_every_bubble() {
        let bubbles = vec![bubble(1, 100.0, 300.0, 40.0), bubble(2, 500.0, 300.0, 40.0)];
        let mut sim = Simulation::with_bubbles(&Settings::default(), 1, bubbles);
        let mut surface = RecordingSurface::new();

        assert_eq!(sim.tick(VIEW, &mut surface), Flow::Continue);
        assert_eq!(surface.commands()[0], DrawCommand::Clear(VIEW.rect()));
        assert_eq!(surface.circles().count(), 2);
        assert_eq!(surface.labels().collect::<Vec<_>>(), vec!["1", "2"]);
        assert_eq!(sim.stats().ticks, 1);
    }

    #[test]
    fn test_escaped_bubble_triggers_next_wave() {
        let bubbles = vec![bubble(1, 400.0, -39.0, 40.0)];
        let mut sim = Simulation::with_bubbles(&Settings::default(), 7, bubbles);
        let mut surface = RecordingSurface::new();

        sim.tick(VIEW, &mut surface);
        assert_eq!(sim.wave_size(), 2);
        let labels: Vec<_> = sim.bubbles().iter().map(|b| b.label()).collect();
        assert_eq!(labels, vec!["1", "2"]);
        assert!(sim.bubbles().iter().all(|b| b.id >= 2));
        assert_eq!(
            sim.drain_events(),
            vec![SimEvent::Escaped { id: 1 }, SimEvent::WaveStarted { wave_size: 2 }]
        );
        assert_eq!(sim.stats().escaped, 1);
        assert_eq!(sim.stats().waves_cleared, 1);
    }

    #[test]
    fn test_pick_marks_first_containing() {
        let bubbles = vec![
            bubble(1, 100.0, 300.0, 40.0),
            bubble(2, 130.0, 300.0, 40.0),
            bubble(3, 600.0, 300.0, 40.0),
        ];
        let mut sim = Simulation::with_bubbles(&Settings::default(), 1, bubbles);

        // Inside both 1 and 2: population order wins
        assert_eq!(sim.pick(Vec2::new(120.0, 300.0)), Some(1));
        let removed: Vec<_> = sim.bubbles().iter().map(|b| b.is_removed()).collect();
        assert_eq!(removed, vec![true, false, false]);

        assert_eq!(sim.pick(Vec2::new(400.0, 50.0)), None);
        // Second click on the overlap hits bubble 1 again; bubble 2 survives
        assert_eq!(sim.pick(Vec2::new(120.0, 300.0)), Some(1));
        let removed: Vec<_> = sim.bubbles().iter().map(|b| b.is_removed()).collect();
        assert_eq!(removed, vec![true, false, false]);

        let mut surface = RecordingSurface::new();
        sim.tick(VIEW, &mut surface);
        let ids: Vec<_> = sim.bubbles().iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![2, 3]);
        assert_eq!(sim.stats().popped, 1);
    }

    #[test]
    fn test_degenerate_viewport_skips_tick() {
        let bubbles = vec![bubble(1, 400.0, 300.0, 40.0)];
        let mut sim = Simulation::with_bubbles(&Settings::default(), 1, bubbles);
        let mut surface = RecordingSurface::new();

        assert_eq!(sim.tick(Viewport::new(0.0, 0.0), &mut surface), Flow::Continue);
        assert_eq!(surface.frames(), 0);
        assert_eq!(sim.bubbles()[0].pos, Vec2::new(400.0, 300.0));
        assert_eq!(sim.wave_size(), 1);
    }

    #[test]
    fn test_deferred_initial_wave() {
        let mut sim = Simulation::new(&Settings::default(), 5, Viewport::new(-1.0, 600.0));
        assert!(sim.bubbles().is_empty());

        let mut surface = RecordingSurface::new();
        sim.tick(VIEW, &mut surface);
        assert_eq!(sim.wave_size(), 1);
        assert_eq!(sim.bubbles().len(), 1);
    }

    #[test]
    fn test_stop_signal() {
        let mut sim = Simulation::new(&Settings::default(), 1, VIEW);
        let mut surface = RecordingSurface::new();
        sim.stop();
        assert!(!sim.is_running());
        assert_eq!(sim.tick(VIEW, &mut surface), Flow::Stop);
        assert_eq!(surface.frames(), 0);
    }
}
