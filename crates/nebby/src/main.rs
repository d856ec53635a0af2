mod logging;

use std::mem;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use nebby_config::{Config, ConfigError};
use nebby_core::{CancellationToken, FrameScheduler, SimState, SystemClock, advance};
use nebby_scene::{SceneState, viewport_for_area};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Alignment, Rect},
    style::{Color, Stylize},
    text::Line,
    widgets::Paragraph,
};

const HELP_KEY: Color = Color::Rgb(180, 120, 255);

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Err(err) = logging::init() {
        eprintln!("nebby: logging disabled: {err}");
    }
    let (config, config_path) = config_or_default(Config::load(), Config::default_path().ok())?;
    tracing::info!(?config, ?config_path, "starting");

    let terminal = ratatui::init();
    let result = App::new(config, config_path).run(terminal);
    ratatui::restore();
    result
}

/// Without a config directory the defaults are used and never saved.
fn config_or_default(
    loaded: Result<Config, ConfigError>,
    path: Option<PathBuf>,
) -> Result<(Config, Option<PathBuf>), ConfigError> {
    match loaded {
        Ok(config) => Ok((config, path)),
        Err(ConfigError::NoConfigDir) => Ok((Config::default(), None)),
        Err(err) => Err(err),
    }
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Loaded settings; `show_hud` is kept in sync with the toggle.
    config: Config,
    /// Where to persist settings. `None` keeps changes in memory.
    config_path: Option<PathBuf>,
    /// Stops the frame scheduler.
    token: CancellationToken,
    /// Pixel canvas carried between frames.
    scene: SceneState,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: Config, config_path: Option<PathBuf>) -> Self {
        Self {
            config,
            config_path,
            token: CancellationToken::new(),
            scene: SceneState::new(),
        }
    }

    /// Run the frame loop until a quit key is pressed.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        let size = terminal.size()?;
        let viewport = viewport_for_area(size.width, size.height, self.config.pixel_ratio);
        let mut state = SimState::new(
            self.config.cycle(),
            viewport,
            self.config.star_count,
            &mut rand::thread_rng(),
        );

        let scheduler = FrameScheduler::new(
            SystemClock::new(self.config.speed_multiplier),
            self.token.clone(),
            self.config.target_fps,
        );
        let report = scheduler.run(|now| -> color_eyre::Result<()> {
            state = self.handle_crossterm_events(mem::take(&mut state))?;
            state = advance(mem::take(&mut state), now);
            terminal.draw(|frame| self.render(frame, &state))?;
            Ok(())
        })?;

        tracing::info!(frames = report.frames, overruns = report.overruns, "stopped");
        Ok(())
    }

    /// Renders the scene, the HUD and the key help line.
    fn render(&mut self, frame: &mut Frame, state: &SimState) {
        self.scene
            .render(frame, &state.snapshot(), self.config.show_hud);

        let area = frame.area();
        if area.height == 0 {
            return;
        }
        let help = Line::from(vec![
            "q".bold().fg(HELP_KEY),
            " quit  ".dark_gray(),
            "h".bold().fg(HELP_KEY),
            " hud".dark_gray(),
        ]);
        let bottom = Rect {
            y: area.bottom() - 1,
            height: 1,
            ..area
        };
        frame.render_widget(Paragraph::new(help).alignment(Alignment::Right), bottom);
    }

    /// Drains pending events without blocking the frame.
    fn handle_crossterm_events(&mut self, mut state: SimState) -> color_eyre::Result<SimState> {
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Resize(width, height) => state = self.on_resize(state, width, height),
                _ => {}
            }
        }
        Ok(state)
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('h')) => self.toggle_hud(),
            _ => {}
        }
    }

    /// Rescale the simulation to a new terminal size.
    fn on_resize(&self, state: SimState, width: u16, height: u16) -> SimState {
        let viewport = viewport_for_area(width, height, self.config.pixel_ratio);
        tracing::info!(width, height, "terminal resized");
        state.resized(viewport)
    }

    /// Show or hide the HUD and persist the choice.
    fn toggle_hud(&mut self) {
        self.config.show_hud = !self.config.show_hud;
        let Some(path) = &self.config_path else {
            return;
        };
        if let Err(err) = self.config.save_to(path) {
            tracing::warn!(%err, "failed to save config");
        }
    }

    /// Cancel the scheduler to quit the application.
    fn quit(&mut self) {
        self.token.cancel();
    }
}
