use std::io::stdout;
use std::path::PathBuf;
use std::time::Instant;

use crossterm::event::{
    self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture, Event,
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use log::{info, warn};
use plexus_config::Config;
use plexus_core::tuning::{CELL_HEIGHT_PX, CELL_WIDTH_PX};
use plexus_field::{ActivationGuard, FieldWidget, ParticleField};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Alignment, Constraint, Layout},
    style::{Style, Stylize},
    text::Line,
    widgets::Paragraph,
};

mod logging;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    logging::init();

    let Some(_active) = ActivationGuard::acquire() else {
        warn!("particle field already active, not starting another");
        return Ok(());
    };

    let config_path = Config::path()?;
    let config = Config::load_from(&config_path)?;

    let terminal = ratatui::init();
    let result =
        enable_pointer().and_then(|()| App::new(config, Some(config_path)).run(terminal));
    if let Err(err) = disable_pointer() {
        warn!("failed to release pointer capture: {err:#}");
    }
    ratatui::restore();
    result
}

fn enable_pointer() -> color_eyre::Result<()> {
    execute!(stdout(), EnableMouseCapture, EnableFocusChange)?;
    Ok(())
}

fn disable_pointer() -> color_eyre::Result<()> {
    execute!(stdout(), DisableMouseCapture, DisableFocusChange)?;
    Ok(())
}

/// Surface size in pixels of a terminal with the given cell dimensions.
fn viewport_px(columns: u16, rows: u16) -> (f64, f64) {
    (columns as f64 * CELL_WIDTH_PX, rows as f64 * CELL_HEIGHT_PX)
}

/// Surface position of the center of a terminal cell.
fn cell_center_px(column: u16, row: u16) -> (f64, f64) {
    (
        (column as f64 + 0.5) * CELL_WIDTH_PX,
        (row as f64 + 0.5) * CELL_HEIGHT_PX,
    )
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// User settings.
    config: Config,
    /// Where settings are saved on change; `None` disables saving.
    config_path: Option<PathBuf>,
    /// The particle field behind the content.
    field: ParticleField,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: Config, config_path: Option<PathBuf>) -> Self {
        let field = ParticleField::from_os_rng(config.variant);
        Self {
            running: false,
            config,
            config_path,
            field,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;

        // The terminal is ready once we are here; size the field for the first time.
        let size = terminal.size()?;
        self.on_resize(size.width, size.height);
        info!(
            "started {} field at {}x{} cells",
            self.config.variant.label(),
            size.width,
            size.height
        );

        let frame_interval = self.config.frame_interval();
        let mut next_frame = Instant::now();
        while self.running {
            let now = Instant::now();
            self.field.frame(now);
            terminal.draw(|frame| self.render(frame))?;

            next_frame += frame_interval;
            if next_frame < now {
                // Fell behind; don't try to catch up with a burst of frames.
                next_frame = now + frame_interval;
            }
            self.handle_crossterm_events(next_frame)?;
        }
        Ok(())
    }

    /// Renders the user interface.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let theme = self.config.color_theme;
        let color = theme.color();

        frame.render_widget(
            FieldWidget::new(self.field.scene(), theme, self.config.effective_layer()),
            area,
        );

        let chunks = Layout::vertical([
            Constraint::Fill(1),   // Top padding
            Constraint::Length(1), // Title
            Constraint::Length(1), // Status
            Constraint::Fill(1),   // Bottom padding
            Constraint::Length(1), // Help text
        ])
        .split(area);

        let title = Paragraph::new("plexus".bold())
            .style(Style::new().fg(color))
            .alignment(Alignment::Center);
        frame.render_widget(title, chunks[1]);

        let status = Line::from(format!(
            "{} particles · {}",
            self.field.particles().len(),
            self.config.variant.label()
        ))
        .dark_gray()
        .centered();
        frame.render_widget(status, chunks[2]);

        if self.config.show_help {
            let help = Line::from(vec![
                "q".bold().fg(color),
                " quit  ".dark_gray(),
                "v".bold().fg(color),
                " variant  ".dark_gray(),
                "c".bold().fg(color),
                " cycle color  ".dark_gray(),
                "h".bold().fg(color),
                " hide help".dark_gray(),
            ])
            .centered();
            frame.render_widget(help, chunks[4]);
        }
    }

    /// Reads the crossterm events until `deadline` and updates the state of [`App`].
    fn handle_crossterm_events(&mut self, deadline: Instant) -> color_eyre::Result<()> {
        while self.running {
            let timeout = deadline.saturating_duration_since(Instant::now());
            if !event::poll(timeout)? {
                break;
            }
            let event = event::read()?;
            self.on_event(event, Instant::now());
        }
        Ok(())
    }

    /// Dispatches a single terminal event.
    fn on_event(&mut self, event: Event, now: Instant) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
            Event::Mouse(mouse) => self.on_mouse_event(mouse, now),
            Event::FocusLost => self.field.pointer_left(),
            Event::Resize(columns, rows) => self.on_resize(columns, rows),
            _ => {}
        }
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('v')) => self.toggle_variant(),
            (_, KeyCode::Char('c')) => self.cycle_color_theme(),
            (_, KeyCode::Char('h')) => self.toggle_help(),
            _ => {}
        }
    }

    /// Forwards pointer movement and presses to the field.
    fn on_mouse_event(&mut self, mouse: MouseEvent, now: Instant) {
        let (x, y) = cell_center_px(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => self.field.pointer_moved(x, y),
            MouseEventKind::Down(MouseButton::Left) => {
                self.field.pointer_moved(x, y);
                self.field.press(x, y, now);
            }
            _ => {}
        }
    }

    fn on_resize(&mut self, columns: u16, rows: u16) {
        let (width, height) = viewport_px(columns, rows);
        self.field.resize(width, height);
    }

    fn toggle_variant(&mut self) {
        self.config.variant = self.config.variant.toggle();
        self.field.set_variant(self.config.variant);
        info!("switched to {} variant", self.config.variant.label());
        self.save_config();
    }

    /// Cycle through available color themes.
    fn cycle_color_theme(&mut self) {
        self.config.color_theme = self.config.color_theme.next();
        info!("switched to {:?} theme", self.config.color_theme);
        self.save_config();
    }

    fn toggle_help(&mut self) {
        self.config.show_help = !self.config.show_help;
        self.save_config();
    }

    fn save_config(&self) {
        if let Some(path) = &self.config_path
            && let Err(err) = self.config.save_to(path)
        {
            warn!("failed to save config: {err:#}");
        }
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plexus_core::{ColorTheme, Variant};
    use ratatui::{Terminal, backend::TestBackend};

    fn new_app(variant: Variant) -> App {
        let config = Config {
            variant,
            ..Config::default()
        };
        let mut app = App::new(config, None);
        app.running = true;
        app.on_resize(100, 40);
        app
    }

    fn rows(terminal: &Terminal<TestBackend>) -> Vec<String> {
        let buffer = terminal.backend().buffer();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect()
            })
            .collect()
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_viewport_px() {
        assert_eq!(viewport_px(100, 40), (800.0, 640.0));
        assert_eq!(viewport_px(0, 0), (0.0, 0.0));
    }

    #[test]
    fn test_cell_center_px() {
        assert_eq!(cell_center_px(0, 0), (4.0, 8.0));
        assert_eq!(cell_center_px(10, 2), (84.0, 40.0));
    }

    #[test]
    fn test_resize_event_sizes_field() {
        let mut app = new_app(Variant::Simple);
        assert_eq!(app.field.width(), 800.0);
        app.on_event(Event::Resize(200, 50), Instant::now());
        assert_eq!(app.field.width(), 1600.0);
        assert_eq!(app.field.height(), 800.0);
        assert_eq!(app.field.count(), 150);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = new_app(Variant::Simple);
        app.on_event(key(KeyCode::Char('q')), Instant::now());
        assert!(!app.running);

        let mut app = new_app(Variant::Simple);
        app.on_event(
            Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Instant::now(),
        );
        assert!(!app.running);
    }

    #[test]
    fn test_keys_toggle_settings() {
        let mut app = new_app(Variant::Simple);
        let generation = app.field.generation();
        app.on_event(key(KeyCode::Char('v')), Instant::now());
        assert_eq!(app.config.variant, Variant::Interactive);
        assert_eq!(app.field.variant(), Variant::Interactive);
        assert_eq!(app.field.generation(), generation + 1);

        app.on_event(key(KeyCode::Char('c')), Instant::now());
        assert_eq!(app.config.color_theme, ColorTheme::Cyan);

        app.on_event(key(KeyCode::Char('h')), Instant::now());
        assert!(!app.config.show_help);
        assert!(app.running);
    }

    #[test]
    fn test_mouse_events_reach_field() {
        let mut app = new_app(Variant::Interactive);
        let now = Instant::now();
        app.on_event(mouse(MouseEventKind::Moved, 10, 2), now);
        assert_eq!(app.field.pointer().position(), Some((84.0, 40.0)));

        app.on_event(mouse(MouseEventKind::Down(MouseButton::Left), 10, 2), now);
        assert!(app.field.pointer().is_repelling());

        app.on_event(Event::FocusLost, now);
        assert_eq!(app.field.pointer().position(), None);
    }

    #[test]
    fn test_simple_variant_ignores_mouse() {
        let mut app = new_app(Variant::Simple);
        let now = Instant::now();
        app.on_event(mouse(MouseEventKind::Down(MouseButton::Left), 10, 2), now);
        assert_eq!(app.field.pointer().position(), None);
        assert!(!app.field.pointer().is_repelling());
    }

    #[test]
    fn test_render_shows_title_and_help() {
        // No frame has run yet, so the scene is empty and only the overlay draws.
        let app = new_app(Variant::Simple);
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        let lines = rows(&terminal);
        assert!(lines.iter().any(|line| line.contains("plexus")));
        assert!(lines.iter().any(|line| line.contains("92 particles · simple")));
        let help = &lines[39];
        assert!(help.contains("quit") && help.contains("hide help"));
    }

    #[test]
    fn test_help_key_blanks_help_row() {
        let mut app = new_app(Variant::Simple);
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        app.on_event(key(KeyCode::Char('h')), Instant::now());
        terminal.draw(|frame| app.render(frame)).unwrap();
        let lines = rows(&terminal);
        assert!(lines.iter().any(|line| line.contains("plexus")));
        let help = lines[39].trim_matches(|c: char| c == ' ' || c == '\u{2800}');
        assert!(help.is_empty(), "help row not blank: {help:?}");
    }

    #[test]
    fn test_setting_changes_are_saved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut app = App::new(Config::default(), Some(path.clone()));
        app.running = true;
        app.on_event(key(KeyCode::Char('v')), Instant::now());
        app.on_event(key(KeyCode::Char('c')), Instant::now());

        let saved = Config::load_from(&path).unwrap();
        assert_eq!(saved.variant, Variant::Interactive);
        assert_eq!(saved.color_theme, ColorTheme::Cyan);
        assert!(saved.show_help);

        app.on_event(key(KeyCode::Char('h')), Instant::now());
        assert!(!Config::load_from(&path).unwrap().show_help);
    }
}
