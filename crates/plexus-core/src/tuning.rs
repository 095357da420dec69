//! Compile-time constants of the particle field.
//!
//! Distances are in virtual pixels. A terminal cell counts as
//! [`CELL_WIDTH_PX`] x [`CELL_HEIGHT_PX`] pixels.

use std::time::Duration;

/// Horizontal pixels per terminal cell.
pub const CELL_WIDTH_PX: f64 = 8.0;
/// Vertical pixels per terminal cell.
pub const CELL_HEIGHT_PX: f64 = 16.0;

/// Particles per square pixel.
pub const DENSITY_FACTOR: f64 = 0.00018;
pub const MIN_PARTICLES: usize = 60;
pub const MAX_PARTICLES: usize = 150;

/// Maximum distance at which two particles are connected.
pub const CONNECT_DISTANCE: f64 = 150.0;

/// Base color of particles and lines (white).
pub const BASE_COLOR: (u8, u8, u8) = (255, 255, 255);

/// Width of the symmetric velocity range, per component.
pub const SPEED: f64 = 0.5;
pub const MIN_SIZE: f64 = 1.0;
pub const SIZE_RANGE: f64 = 2.0;
pub const MIN_ALPHA: f64 = 0.5;
pub const ALPHA_RANGE: f64 = 0.5;

/// Radius around the pointer within which particles are attracted.
pub const MOUSE_DISTANCE: f64 = 200.0;
/// Particles closer than this to the pointer are left alone.
pub const ADSORB_DEAD_ZONE: f64 = 20.0;
/// Fraction of the way toward the pointer moved per frame.
pub const ADSORPTION_RATE: f64 = 0.02;
/// Scale applied to particle-to-pointer line opacity.
pub const POINTER_LINE_ALPHA: f64 = 0.5;
/// Scale applied to connection opacity in the interactive variant.
pub const CONNECTION_DIM: f64 = 0.6;

pub const REPULSION_RADIUS: f64 = 250.0;
pub const REPULSION_STRENGTH: f64 = 12.0;
/// Per-frame decay of velocity components above their resting speed.
pub const FRICTION: f64 = 0.95;
/// How long a press suppresses pointer attraction.
pub const PRESS_COOLDOWN: Duration = Duration::from_millis(300);

/// Line and dot opacity below which the renderer draws nothing.
pub const MIN_VISIBLE_ALPHA: f64 = 0.02;

pub const DEFAULT_FRAME_RATE: u32 = 60;
pub const MAX_FRAME_RATE: u32 = 240;
