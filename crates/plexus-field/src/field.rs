//! Particle field state and per-frame update.

use std::time::Instant;

use log::debug;
use plexus_core::Variant;
use plexus_core::tuning::{
    ADSORB_DEAD_ZONE, ADSORPTION_RATE, CONNECT_DISTANCE, CONNECTION_DIM, MOUSE_DISTANCE,
    POINTER_LINE_ALPHA, PRESS_COOLDOWN, REPULSION_RADIUS, REPULSION_STRENGTH,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::particle::{Particle, falloff_alpha, particle_count};
use crate::pointer::PointerState;
use crate::scene::Scene;

/// The particle field.
///
/// Owns every particle and the pointer state. All event handlers take
/// `&mut self` and must not be called re-entrantly.
#[derive(Debug)]
pub struct ParticleField {
    variant: Variant,
    /// Particle states, replaced wholesale on rebuild.
    particles: Vec<Particle>,
    /// Count computed by the last resize.
    count: usize,
    /// Bumped every time the collection is rebuilt.
    generation: u64,
    pointer: PointerState,
    scene: Scene,
    rng: StdRng,
}

impl ParticleField {
    /// Create an empty field. Particles appear on the first [`resize`](Self::resize).
    pub fn new(variant: Variant, rng: StdRng) -> Self {
        Self {
            variant,
            particles: Vec::new(),
            count: 0,
            generation: 0,
            pointer: PointerState::new(PRESS_COOLDOWN),
            scene: Scene::default(),
            rng,
        }
    }

    /// Create an empty field seeded from the operating system.
    pub fn from_os_rng(variant: Variant) -> Self {
        Self::new(variant, StdRng::from_os_rng())
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn width(&self) -> f64 {
        self.scene.width()
    }

    pub fn height(&self) -> f64 {
        self.scene.height()
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    /// The surface as drawn by the last [`frame`](Self::frame).
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Match the surface to the viewport. Returns whether particles were rebuilt.
    pub fn resize(&mut self, width: f64, height: f64) -> bool {
        let width = width.max(0.0);
        let height = height.max(0.0);
        self.scene.resize(width, height);

        let count = particle_count(width, height);
        let rebuild = match self.variant {
            Variant::Simple => count != self.count || self.particles.is_empty(),
            Variant::Interactive => true,
        };
        self.count = count;
        if rebuild {
            self.rebuild();
        }
        rebuild
    }

    /// Switch variant, rebuilding the particles at the current size.
    pub fn set_variant(&mut self, variant: Variant) {
        if variant == self.variant {
            return;
        }
        self.variant = variant;
        self.pointer.reset();
        self.rebuild();
    }

    fn rebuild(&mut self) {
        let (width, height) = (self.scene.width(), self.scene.height());
        self.particles = (0..self.count)
            .map(|_| Particle::spawn(&mut self.rng, width, height))
            .collect();
        self.generation += 1;
        debug!(
            "rebuilt {} particles for {width}x{height} (generation {})",
            self.count, self.generation
        );
    }

    /// Pointer moved to surface coordinates `(x, y)`.
    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        if self.variant.is_interactive() {
            self.pointer.move_to(x, y);
        }
    }

    /// Pointer left the surface.
    pub fn pointer_left(&mut self) {
        self.pointer.leave();
    }

    /// Push nearby particles away from a press at `(x, y)`.
    pub fn press(&mut self, x: f64, y: f64, now: Instant) {
        if !self.variant.is_interactive() {
            return;
        }
        let mut pushed = 0;
        for p in &mut self.particles {
            let dx = p.x - x;
            let dy = p.y - y;
            let distance = (dx * dx + dy * dy).sqrt();
            if distance < REPULSION_RADIUS && distance > 0.0 {
                let force = (REPULSION_RADIUS - distance) / REPULSION_RADIUS;
                p.vx += dx / distance * force * REPULSION_STRENGTH;
                p.vy += dy / distance * force * REPULSION_STRENGTH;
                pushed += 1;
            }
        }
        self.pointer.start_repelling(now);
        debug!("press at ({x:.0}, {y:.0}) pushed {pushed} particles");
    }

    /// Advance one display refresh and redraw the surface.
    pub fn frame(&mut self, now: Instant) -> &Scene {
        self.pointer.tick(now);
        self.scene.clear();
        let (width, height) = (self.scene.width(), self.scene.height());
        let interactive = self.variant.is_interactive();

        for p in &mut self.particles {
            if interactive {
                p.apply_friction();
            }
            p.advance();
            p.bounce(width, height);
            self.scene.fill_circle(p.x, p.y, p.size, p.alpha);
        }

        self.draw_connections();

        if interactive
            && !self.pointer.is_repelling()
            && let Some(pointer) = self.pointer.position()
        {
            self.attract_to(pointer);
        }

        &self.scene
    }

    fn draw_connections(&mut self) {
        let threshold_sq = CONNECT_DISTANCE * CONNECT_DISTANCE;
        let dim = match self.variant {
            Variant::Simple => 1.0,
            Variant::Interactive => CONNECTION_DIM,
        };
        for (i, a) in self.particles.iter().enumerate() {
            for b in &self.particles[i + 1..] {
                let distance_sq = a.distance_sq(b.x, b.y);
                if distance_sq < threshold_sq {
                    let alpha = falloff_alpha(distance_sq, threshold_sq) * dim;
                    self.scene.stroke_line((a.x, a.y), (b.x, b.y), alpha);
                }
            }
        }
    }

    fn attract_to(&mut self, (px, py): (f64, f64)) {
        let threshold_sq = MOUSE_DISTANCE * MOUSE_DISTANCE;
        let dead_zone_sq = ADSORB_DEAD_ZONE * ADSORB_DEAD_ZONE;
        for p in &mut self.particles {
            let distance_sq = p.distance_sq(px, py);
            if distance_sq >= threshold_sq {
                continue;
            }
            if distance_sq > dead_zone_sq {
                p.x += (px - p.x) * ADSORPTION_RATE;
                p.y += (py - p.y) * ADSORPTION_RATE;
            }
            let alpha = falloff_alpha(distance_sq, threshold_sq) * POINTER_LINE_ALPHA;
            self.scene.stroke_line((p.x, p.y), (px, py), alpha);
        }
    }
}
