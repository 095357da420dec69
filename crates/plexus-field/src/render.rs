//! Rendering a [`Scene`] onto a ratatui buffer.

use plexus_core::tuning::{CELL_WIDTH_PX, MIN_VISIBLE_ALPHA};
use plexus_core::{ColorTheme, Layer};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Color,
    symbols::Marker,
    widgets::{
        Widget,
        canvas::{Canvas, Line as CanvasLine, Painter, Shape},
    },
};

use crate::color::blend;
use crate::scene::{DrawCommand, Scene};

/// Distance between two braille dots, in surface pixels.
const DOT_PX: f64 = CELL_WIDTH_PX / 2.0;

/// Filled circle approximated by braille dots.
struct Disc {
    x: f64,
    y: f64,
    radius: f64,
    color: Color,
}

impl Shape for Disc {
    fn draw(&self, painter: &mut Painter) {
        let reach = (self.radius / DOT_PX).floor() as i32;
        let radius_sq = self.radius * self.radius;
        for dy in -reach..=reach {
            for dx in -reach..=reach {
                let ox = dx as f64 * DOT_PX;
                let oy = dy as f64 * DOT_PX;
                if ox * ox + oy * oy > radius_sq {
                    continue;
                }
                if let Some((px, py)) = painter.get_point(self.x + ox, self.y + oy) {
                    painter.paint(px, py, self.color);
                }
            }
        }
    }
}

/// Widget drawing the particle field.
///
/// Lines go in a lower layer so that dots stay visible where they cross.
#[derive(Debug, Clone, Copy)]
pub struct FieldWidget<'a> {
    scene: &'a Scene,
    theme: ColorTheme,
    layer: Layer,
}

impl<'a> FieldWidget<'a> {
    pub fn new(scene: &'a Scene, theme: ColorTheme, layer: Layer) -> Self {
        Self {
            scene,
            theme,
            layer,
        }
    }
}

impl Widget for FieldWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }

        let base = self.theme.rgb();
        let (backdrop, background_color) = match self.layer {
            Layer::AboveBackdrop => {
                let (r, g, b) = self.theme.backdrop_rgb();
                ((r, g, b), Color::Rgb(r, g, b))
            }
            // Unknown terminal background; assume dark.
            Layer::Back => ((0, 0, 0), Color::Reset),
        };
        let scene = self.scene;
        let height = scene.height();

        Canvas::default()
            .marker(Marker::Braille)
            .background_color(background_color)
            .x_bounds([0.0, scene.width()])
            .y_bounds([0.0, height])
            .paint(|ctx| {
                // Canvas y grows upward, surface y grows downward.
                for command in scene.lines() {
                    if let DrawCommand::Line {
                        x1,
                        y1,
                        x2,
                        y2,
                        alpha,
                    } = *command
                        && alpha > MIN_VISIBLE_ALPHA
                    {
                        ctx.draw(&CanvasLine::new(
                            x1,
                            height - y1,
                            x2,
                            height - y2,
                            blend(base, backdrop, alpha),
                        ));
                    }
                }
                ctx.layer();
                for command in scene.dots() {
                    if let DrawCommand::Dot {
                        x,
                        y,
                        radius,
                        alpha,
                    } = *command
                        && alpha > MIN_VISIBLE_ALPHA
                    {
                        ctx.draw(&Disc {
                            x,
                            y: height - y,
                            radius,
                            color: blend(base, backdrop, alpha),
                        });
                    }
                }
            })
            .render(area, buf);
    }
}
