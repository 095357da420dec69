//! A single drifting particle.

use plexus_core::tuning::{
    ALPHA_RANGE, DENSITY_FACTOR, FRICTION, MAX_PARTICLES, MIN_ALPHA, MIN_PARTICLES, MIN_SIZE,
    SIZE_RANGE, SPEED,
};
use rand::Rng;

/// State of one particle, in surface pixel coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    /// Per-frame displacement.
    pub vx: f64,
    pub vy: f64,
    /// Resting velocity captured at creation.
    pub ovx: f64,
    pub ovy: f64,
    /// Radius in pixels.
    pub size: f64,
    /// Base opacity.
    pub alpha: f64,
}

impl Particle {
    /// Create a particle at a random spot inside a `width` x `height` surface.
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, width: f64, height: f64) -> Self {
        let x = rng.random::<f64>() * width;
        let y = rng.random::<f64>() * height;
        let vx = (rng.random::<f64>() - 0.5) * SPEED;
        let vy = (rng.random::<f64>() - 0.5) * SPEED;
        Self {
            x,
            y,
            vx,
            vy,
            ovx: vx,
            ovy: vy,
            size: rng.random::<f64>() * SIZE_RANGE + MIN_SIZE,
            alpha: rng.random::<f64>() * ALPHA_RANGE + MIN_ALPHA,
        }
    }

    /// Slow down velocity components that exceed their resting magnitude.
    pub fn apply_friction(&mut self) {
        if self.vx.abs() > self.ovx.abs() {
            self.vx *= FRICTION;
        }
        if self.vy.abs() > self.ovy.abs() {
            self.vy *= FRICTION;
        }
    }

    /// Move by one frame's worth of velocity.
    pub fn advance(&mut self) {
        self.x += self.vx;
        self.y += self.vy;
    }

    /// Reverse velocity on any axis where the particle left `[0, width] x [0, height]`.
    ///
    /// Position is not clamped, so a particle can sit outside the surface for a frame.
    pub fn bounce(&mut self, width: f64, height: f64) {
        if self.x < 0.0 || self.x > width {
            self.vx = -self.vx;
        }
        if self.y < 0.0 || self.y > height {
            self.vy = -self.vy;
        }
    }

    pub fn distance_sq(&self, x: f64, y: f64) -> f64 {
        let dx = self.x - x;
        let dy = self.y - y;
        dx * dx + dy * dy
    }
}

/// Number of particles for a surface of the given size.
pub fn particle_count(width: f64, height: f64) -> usize {
    let calculated = (width * height * DENSITY_FACTOR).floor().max(0.0) as usize;
    calculated.clamp(MIN_PARTICLES, MAX_PARTICLES)
}

/// Opacity of a line between two points `distance_sq` apart, fading linearly to
/// zero at `threshold_sq`.
pub fn falloff_alpha(distance_sq: f64, threshold_sq: f64) -> f64 {
    1.0 - distance_sq / threshold_sq
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn still(x: f64, y: f64) -> Particle {
        Particle {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            ovx: 0.0,
            ovy: 0.0,
            size: 1.0,
            alpha: 1.0,
        }
    }

    #[test]
    fn test_particle_count_example() {
        assert_eq!(particle_count(800.0, 600.0), 86);
    }

    #[test]
    fn test_particle_count_is_clamped() {
        assert_eq!(particle_count(0.0, 0.0), MIN_PARTICLES);
        assert_eq!(particle_count(100.0, 100.0), MIN_PARTICLES);
        assert_eq!(particle_count(5000.0, 5000.0), MAX_PARTICLES);
        for (w, h) in [(1.0, 1.0), (640.0, 384.0), (1920.0, 1080.0), (3840.0, 2160.0)] {
            let count = particle_count(w, h);
            assert!((MIN_PARTICLES..=MAX_PARTICLES).contains(&count));
        }
    }

    #[test]
    fn test_spawn_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let p = Particle::spawn(&mut rng, 320.0, 200.0);
            assert!((0.0..320.0).contains(&p.x));
            assert!((0.0..200.0).contains(&p.y));
            assert!((-SPEED / 2.0..SPEED / 2.0).contains(&p.vx));
            assert!((-SPEED / 2.0..SPEED / 2.0).contains(&p.vy));
            assert!((1.0..3.0).contains(&p.size));
            assert!((0.5..1.0).contains(&p.alpha));
            assert_eq!((p.ovx, p.ovy), (p.vx, p.vy));
        }
    }

    #[test]
    fn test_spawn_on_empty_surface() {
        let mut rng = StdRng::seed_from_u64(1);
        let p = Particle::spawn(&mut rng, 0.0, 0.0);
        assert_eq!((p.x, p.y), (0.0, 0.0));
    }

    #[test]
    fn test_advance_adds_velocity() {
        let mut p = still(10.0, 20.0);
        p.vx = 0.2;
        p.vy = -0.1;
        p.advance();
        assert_eq!(p.x, 10.0 + 0.2);
        assert_eq!(p.y, 20.0 - 0.1);
    }

    #[test]
    fn test_bounce_flips_sign_without_clamping() {
        let mut p = still(-0.5, 50.0);
        p.vx = -0.2;
        p.vy = 0.1;
        p.bounce(100.0, 100.0);
        assert_eq!(p.vx, 0.2);
        assert_eq!(p.vy, 0.1);
        assert_eq!(p.x, -0.5);

        let mut p = still(50.0, 100.5);
        p.vy = 0.3;
        p.bounce(100.0, 100.0);
        assert_eq!(p.vy, -0.3);
    }

    #[test]
    fn test_bounce_exactly_on_edge_keeps_velocity() {
        let mut p = still(100.0, 0.0);
        p.vx = 0.2;
        p.vy = -0.2;
        p.bounce(100.0, 100.0);
        assert_eq!((p.vx, p.vy), (0.2, -0.2));
    }

    #[test]
    fn test_friction_only_above_rest() {
        let mut p = still(0.0, 0.0);
        p.ovx = 0.1;
        p.ovy = 0.1;
        p.vx = 2.0;
        p.vy = -0.05;
        p.apply_friction();
        assert_eq!(p.vx, 2.0 * FRICTION);
        assert_eq!(p.vy, -0.05);
    }

    #[test]
    fn test_falloff_alpha() {
        let threshold_sq = 150.0 * 150.0;
        assert_eq!(falloff_alpha(0.0, threshold_sq), 1.0);
        assert_eq!(falloff_alpha(threshold_sq, threshold_sq), 0.0);
        let mut last = f64::INFINITY;
        for d in 0..=150 {
            let d = d as f64;
            let alpha = falloff_alpha(d * d, threshold_sq);
            assert!(alpha < last);
            last = alpha;
        }
    }
}
