//! Color utility functions for the field renderer.

use ratatui::style::Color;

/// Composite `fg` over `bg` at the given opacity.
///
/// Terminals have no alpha channel, so translucency is approximated by
/// mixing toward the color underneath.
pub fn blend(fg: (u8, u8, u8), bg: (u8, u8, u8), alpha: f64) -> Color {
    let alpha = alpha.clamp(0.0, 1.0);
    let mix = |f: u8, b: u8| (b as f64 + (f as f64 - b as f64) * alpha).round() as u8;
    Color::Rgb(mix(fg.0, bg.0), mix(fg.1, bg.1), mix(fg.2, bg.2))
}
