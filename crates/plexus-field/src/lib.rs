//! Particle field effect for the plexus terminal background.
//!
//! Dots drift across the surface, draw connecting lines when close to each
//! other, and in the interactive variant react to the pointer. The simulation
//! ([`ParticleField`]) writes a [`Scene`] each frame and [`FieldWidget`]
//! turns that scene into braille on a ratatui buffer.

mod activation;
mod color;
mod field;
mod particle;
mod pointer;
mod render;
mod scene;

pub use activation::ActivationGuard;
pub use color::blend;
pub use field::ParticleField;
pub use particle::{Particle, falloff_alpha, particle_count};
pub use pointer::{Cooldown, PointerState};
pub use render::FieldWidget;
pub use scene::{DrawCommand, Scene};
