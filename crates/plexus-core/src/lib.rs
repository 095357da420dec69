//! Core types shared by the plexus crates.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

pub mod tuning;

/// Which flavour of the particle field to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    /// Drifting dots and connection lines only.
    #[default]
    Simple,
    /// Adds pointer attraction, press repulsion and friction.
    Interactive,
}

impl Variant {
    /// Toggle between the simple and interactive variants.
    pub fn toggle(self) -> Self {
        match self {
            Variant::Simple => Variant::Interactive,
            Variant::Interactive => Variant::Simple,
        }
    }

    /// Whether pointer events affect this variant.
    pub fn is_interactive(self) -> bool {
        self == Variant::Interactive
    }

    /// Z-order used when the user has not picked one.
    pub fn default_layer(self) -> Layer {
        match self {
            Variant::Simple => Layer::AboveBackdrop,
            Variant::Interactive => Layer::Back,
        }
    }

    /// Display name for status lines.
    pub fn label(self) -> &'static str {
        match self {
            Variant::Simple => "simple",
            Variant::Interactive => "interactive",
        }
    }
}

/// Where the field sits in the paint order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Layer {
    /// Painted straight onto the terminal background, below everything.
    Back,
    /// Painted over the themed backdrop but below the content.
    AboveBackdrop,
}

/// Color theme for particles and lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorTheme {
    #[default]
    White,
    Cyan,
    Green,
    Magenta,
    Yellow,
    Red,
    Blue,
}

impl ColorTheme {
    /// Cycle to the next color theme.
    pub fn next(self) -> Self {
        match self {
            ColorTheme::White => ColorTheme::Cyan,
            ColorTheme::Cyan => ColorTheme::Green,
            ColorTheme::Green => ColorTheme::Magenta,
            ColorTheme::Magenta => ColorTheme::Yellow,
            ColorTheme::Yellow => ColorTheme::Red,
            ColorTheme::Red => ColorTheme::Blue,
            ColorTheme::Blue => ColorTheme::White,
        }
    }

    /// Base color of particles and lines as RGB components.
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            ColorTheme::White => tuning::BASE_COLOR,
            ColorTheme::Cyan => (100, 255, 218),
            ColorTheme::Green => (120, 230, 140),
            ColorTheme::Magenta => (230, 120, 230),
            ColorTheme::Yellow => (250, 220, 110),
            ColorTheme::Red => (250, 110, 110),
            ColorTheme::Blue => (110, 160, 250),
        }
    }

    /// Backdrop painted behind the field when it is layered above the backdrop.
    pub fn backdrop_rgb(self) -> (u8, u8, u8) {
        (12, 14, 22)
    }

    /// Convert theme to Ratatui Color.
    pub fn color(self) -> Color {
        let (r, g, b) = self.rgb();
        Color::Rgb(r, g, b)
    }
}
