//! Demo application screens and their registered tour targets.
//!
//! Each screen exposes the elements a tour can address — a button carrying a
//! `data-action` attribute, a form section with an id, a cancel button with a
//! class — the same addressing surface the selectors use.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use tracing::debug;

use crate::tour::{Navigator, Page, Selector};

/// The screens the demo application can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    PatientRegistration,
}

impl Screen {
    /// Resolve a location path to a screen. Unknown routes land on Home.
    pub fn for_path(path: &str, base_path: &str) -> Self {
        match path.strip_prefix(base_path).unwrap_or(path) {
            "patient-registration" => Screen::PatientRegistration,
            _ => Screen::Home,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Screen::Home => "Patient Chart",
            Screen::PatientRegistration => "Patient Registration",
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum TargetKind {
    Button,
    Section,
}

/// One addressable element on a screen, with its content-space region.
struct ScreenTarget {
    id: Option<&'static str>,
    class: Option<&'static str>,
    attr: Option<(&'static str, &'static str)>,
    element: &'static str,
    label: &'static str,
    kind: TargetKind,
    region: Rect,
}

impl ScreenTarget {
    fn matches(&self, selector: &Selector) -> bool {
        match selector {
            Selector::Id(id) => self.id == Some(id.as_str()),
            Selector::Class(class) => self.class == Some(class.as_str()),
            Selector::Attribute { key, value } => self
                .attr
                .is_some_and(|(k, v)| k == key && v == value),
            Selector::Element(name) => self.element == name.as_str(),
        }
    }
}

/// The active screen as a queryable, scrollable surface.
pub struct ScreenPage {
    screen: Screen,
    viewport: Rect,
    scroll: u16,
    targets: Vec<ScreenTarget>,
}

impl ScreenPage {
    pub fn build(screen: Screen, viewport: Rect, scroll: u16) -> Self {
        let width = viewport.width;
        let targets = match screen {
            Screen::Home => vec![
                ScreenTarget {
                    id: None,
                    class: None,
                    attr: Some(("data-action", "add-patient")),
                    element: "button",
                    label: "[ + Add patient ]",
                    kind: TargetKind::Button,
                    region: Rect::new(2, 4, 19, 3),
                },
                ScreenTarget {
                    id: Some("patient-list"),
                    class: None,
                    attr: None,
                    element: "section",
                    label: "Recent patients",
                    kind: TargetKind::Section,
                    region: Rect::new(2, 8, width.saturating_sub(4), 10),
                },
            ],
            Screen::PatientRegistration => vec![
                ScreenTarget {
                    id: Some("demographics"),
                    class: None,
                    attr: None,
                    element: "section",
                    label: "Demographics",
                    kind: TargetKind::Section,
                    region: Rect::new(2, 4, width.saturating_sub(4), 10),
                },
                ScreenTarget {
                    id: None,
                    class: Some("btn-primary"),
                    attr: None,
                    element: "button",
                    label: "[ Save ]",
                    kind: TargetKind::Button,
                    region: Rect::new(2, 15, 10, 3),
                },
                ScreenTarget {
                    id: None,
                    class: Some("btn-cancel"),
                    attr: None,
                    element: "button",
                    label: "[ Cancel ]",
                    kind: TargetKind::Button,
                    region: Rect::new(14, 15, 12, 3),
                },
            ],
        };

        Self {
            screen,
            viewport,
            scroll,
            targets,
        }
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    /// Map a content-space region to screen coordinates under the current
    /// scroll offset.
    fn to_screen(&self, region: Rect) -> Rect {
        Rect {
            x: self.viewport.x + region.x,
            y: self
                .viewport
                .y
                .saturating_add(region.y)
                .saturating_sub(self.scroll),
            ..region
        }
    }

    pub fn render(&self, frame: &mut Frame) {
        let title = Paragraph::new(Line::from(vec![
            Span::styled(
                self.screen.title(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled("q quit", Style::default().fg(Color::DarkGray)),
        ]))
        .block(Block::default().borders(Borders::BOTTOM));
        let title_area = Rect {
            height: 2.min(self.viewport.height),
            ..self.viewport
        };
        frame.render_widget(title, title_area);

        for target in &self.targets {
            let area = self.to_screen(target.region).intersection(self.viewport);
            if area.is_empty() {
                continue;
            }
            match target.kind {
                TargetKind::Button => {
                    let button = Paragraph::new(target.label)
                        .style(Style::default().fg(Color::Black).bg(Color::Gray))
                        .block(Block::default().borders(Borders::ALL));
                    frame.render_widget(button, area);
                }
                TargetKind::Section => {
                    let body = match self.screen {
                        Screen::Home => "No patients seen today.",
                        Screen::PatientRegistration => {
                            "Given name: ____________\nFamily name: ____________\nDate of birth: __/__/____\nSex: ____"
                        }
                    };
                    let section = Paragraph::new(body).wrap(Wrap { trim: false }).block(
                        Block::default()
                            .borders(Borders::ALL)
                            .title(target.label),
                    );
                    frame.render_widget(section, area);
                }
            }
        }
    }
}

impl Page for ScreenPage {
    fn locate(&self, selector: &Selector) -> Option<Rect> {
        self.targets
            .iter()
            .find(|t| t.matches(selector))
            .map(|t| self.to_screen(t.region))
    }

    fn scroll_into_view(&mut self, region: Rect) {
        // Back to content space, then center vertically in the viewport
        let content_y = region
            .y
            .saturating_add(self.scroll)
            .saturating_sub(self.viewport.y);
        let center_offset = self
            .viewport
            .height
            .saturating_sub(region.height)
            .saturating_div(2);
        self.scroll = content_y.saturating_sub(center_offset);
    }
}

/// Screen-switching navigator. Navigation requests take effect on the next
/// frame; callers never observe completion.
pub struct ScreenNavigator {
    path: String,
}

impl ScreenNavigator {
    pub fn new(initial_path: String) -> Self {
        Self { path: initial_path }
    }
}

impl Navigator for ScreenNavigator {
    fn current_path(&self) -> &str {
        &self.path
    }

    fn navigate(&mut self, path: &str) {
        debug!(from = %self.path, to = %path, "navigation requested");
        self.path = path.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::layout::Position;

    const VIEWPORT: Rect = Rect {
        x: 0,
        y: 0,
        width: 80,
        height: 24,
    };

    #[test]
    fn test_for_path_maps_routes() {
        assert_eq!(
            Screen::for_path("/app/patient-registration", "/app/"),
            Screen::PatientRegistration
        );
        assert_eq!(Screen::for_path("/app/home", "/app/"), Screen::Home);
        assert_eq!(Screen::for_path("/elsewhere", "/app/"), Screen::Home);
    }

    #[test]
    fn test_home_exposes_add_patient_target() {
        let page = ScreenPage::build(Screen::Home, VIEWPORT, 0);
        let selector: Selector = "[data-action=\"add-patient\"]".parse().unwrap();

        let region = page.locate(&selector).unwrap();
        assert!(region.contains(Position::new(region.x + 1, region.y + 1)));
    }

    #[test]
    fn test_home_has_no_demographics() {
        let page = ScreenPage::build(Screen::Home, VIEWPORT, 0);
        assert!(page.locate(&"#demographics".parse().unwrap()).is_none());
    }

    #[test]
    fn test_registration_exposes_form_targets() {
        let page = ScreenPage::build(Screen::PatientRegistration, VIEWPORT, 0);
        assert!(page.locate(&"#demographics".parse().unwrap()).is_some());
        assert!(page.locate(&".btn-cancel".parse().unwrap()).is_some());
        assert!(page.locate(&".btn-primary".parse().unwrap()).is_some());
    }

    #[test]
    fn test_locate_applies_scroll_offset() {
        let unscrolled = ScreenPage::build(Screen::PatientRegistration, VIEWPORT, 0);
        let scrolled = ScreenPage::build(Screen::PatientRegistration, VIEWPORT, 3);

        let selector: Selector = ".btn-cancel".parse().unwrap();
        let before = unscrolled.locate(&selector).unwrap();
        let after = scrolled.locate(&selector).unwrap();
        assert_eq!(after.y, before.y - 3);
    }

    #[test]
    fn test_scroll_into_view_centers_region() {
        let small = Rect::new(0, 0, 80, 10);
        let mut page = ScreenPage::build(Screen::PatientRegistration, small, 0);

        let selector: Selector = ".btn-cancel".parse().unwrap();
        let region = page.locate(&selector).unwrap();
        page.scroll_into_view(region);

        // The button sits at content row 15; a 10-row viewport centers it
        // with a scroll offset that keeps it inside the viewport.
        let region = page.locate(&selector).unwrap();
        assert!(region.y >= small.y);
        assert!(region.y < small.bottom());
    }
}
