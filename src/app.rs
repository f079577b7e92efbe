use anyhow::{Context, Result};
use crossterm::event::{
    self, Event, KeyCode, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Position, Rect},
    Terminal,
};
use std::io;
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::tour::{
    LifecycleEvent, LifecycleKind, Navigator, Page, TourController, TourDefinition,
};
use crate::ui::terminal_guard::{install_panic_hook, TerminalGuard};
use crate::ui::{Screen, ScreenNavigator, ScreenPage, TourLauncher, TourOverlay};

/// Embedded default walkthrough, used when no definition file is configured.
const ONBOARDING_TOUR: &str = include_str!("tours/onboarding.json");

pub struct App {
    config: Config,
    controller: TourController,
    navigator: ScreenNavigator,
    launcher: TourLauncher,
    overlay: TourOverlay,
    screen: Screen,
    scroll: u16,
    should_quit: bool,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let definition = match &config.tour.definition {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read tour definition {path}"))?;
                TourDefinition::from_json(&json)
                    .with_context(|| format!("Invalid tour definition {path}"))?
            }
            None => TourDefinition::from_json(ONBOARDING_TOUR)
                .context("Invalid embedded onboarding tour")?,
        };
        tracing::info!(
            name = definition.name.as_deref().unwrap_or("unnamed"),
            steps = definition.steps.len(),
            "tour loaded"
        );

        let navigator = ScreenNavigator::new(format!("{}home", config.tour.base_path));
        let controller = TourController::new(
            definition,
            config.tour.base_path.clone(),
            Duration::from_millis(config.tour.advance_delay_ms),
        );

        Ok(Self {
            config,
            controller,
            navigator,
            launcher: TourLauncher::new(),
            overlay: TourOverlay::new(),
            screen: Screen::Home,
            scroll: 0,
            should_quit: false,
        })
    }

    pub fn run(&mut self) -> Result<()> {
        install_panic_hook();
        let _guard = TerminalGuard::new()?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(self.config.ui.refresh_rate_ms);

        while !self.should_quit {
            // The screen follows the navigator; switching resets the scroll
            let screen =
                Screen::for_path(self.navigator.current_path(), &self.config.tour.base_path);
            if screen != self.screen {
                self.screen = screen;
                self.scroll = 0;
            }

            let size = terminal.size()?;
            let viewport = Rect::new(0, 0, size.width, size.height);
            let mut page = ScreenPage::build(self.screen, viewport, self.scroll);
            self.launcher.layout(viewport);

            terminal.draw(|frame| {
                page.render(frame);
                self.launcher.render(frame);
                if let Some(step) = self.controller.current_step() {
                    if let Some(region) = page.locate(&step.target) {
                        self.overlay.render(
                            frame,
                            step,
                            region,
                            self.controller.state().step_index,
                            self.controller.step_count(),
                        );
                    }
                }
            })?;

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.handle_key(key.code);
                    }
                    Event::Mouse(mouse) => self.handle_mouse(mouse, &page),
                    _ => {}
                }
            }

            let now = Instant::now();
            self.controller.tick(now, &mut page, &mut self.navigator);
            self.pump_target_checks(&page, now);
            self.scroll = page.scroll();
        }

        Ok(())
    }

    fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc => {
                if self.controller.is_running() {
                    let index = self.controller.state().step_index;
                    self.controller.handle_lifecycle(
                        LifecycleEvent {
                            kind: LifecycleKind::TourFinished,
                            index,
                        },
                        Instant::now(),
                        &mut self.navigator,
                    );
                } else {
                    self.should_quit = true;
                }
            }
            KeyCode::Enter | KeyCode::Char('n') => {
                // Steps that demand an in-place click can't be skipped with Next
                let advanceable = self
                    .controller
                    .current_step()
                    .is_some_and(|step| !step.click_required());
                if advanceable {
                    let index = self.controller.state().step_index;
                    self.controller.handle_lifecycle(
                        LifecycleEvent {
                            kind: LifecycleKind::StepCompleted,
                            index,
                        },
                        Instant::now(),
                        &mut self.navigator,
                    );
                }
            }
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, page: &ScreenPage) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let position = Position::new(mouse.column, mouse.row);
        if self.launcher.hit(position) {
            self.controller.start();
            return;
        }
        self.controller
            .handle_click(position, Instant::now(), page, &mut self.navigator);
    }

    /// The overlay's lookup side: when the running step's target is absent
    /// from the active screen and nothing is settling, report it so the
    /// controller can skip forward.
    fn pump_target_checks(&mut self, page: &ScreenPage, now: Instant) {
        if self.controller.has_pending_advance() {
            return;
        }
        let missing = self
            .controller
            .current_step()
            .is_some_and(|step| page.locate(&step.target).is_none());
        if missing {
            let index = self.controller.state().step_index;
            self.controller.handle_lifecycle(
                LifecycleEvent {
                    kind: LifecycleKind::TargetNotFound,
                    index,
                },
                now,
                &mut self.navigator,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_tour_parses() {
        let definition = TourDefinition::from_json(ONBOARDING_TOUR).unwrap();
        assert_eq!(definition.steps.len(), 3);
        assert!(definition.steps[0].click_required());
    }

    #[test]
    fn test_app_new_with_defaults() {
        let app = App::new(Config::default()).unwrap();
        assert!(!app.controller.is_running());
        assert_eq!(app.navigator.current_path(), "/app/home");
        assert_eq!(app.screen, Screen::Home);
    }

    #[test]
    fn test_app_new_rejects_missing_definition_file() {
        let mut config = Config::default();
        config.tour.definition = Some("/nonexistent/tour.json".to_string());
        assert!(App::new(config).is_err());
    }
}
