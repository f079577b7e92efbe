//! Floating tour-launch button, anchored to the bottom-right corner.

use ratatui::{
    layout::{Alignment, Position, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const LABEL: &str = " Start tour ";
const MARGIN: u16 = 2;

pub struct TourLauncher {
    pub visible: bool,
    /// Last laid-out hit area, in screen coordinates
    area: Rect,
}

impl TourLauncher {
    pub fn new() -> Self {
        Self {
            visible: true,
            area: Rect::default(),
        }
    }

    /// Recompute the button's position for the current frame size.
    pub fn layout(&mut self, frame_area: Rect) {
        let width = (LABEL.len() as u16 + 2).min(frame_area.width);
        let height = 3.min(frame_area.height);
        self.area = Rect {
            x: frame_area.right().saturating_sub(width + MARGIN),
            y: frame_area.bottom().saturating_sub(height + MARGIN),
            width,
            height,
        };
    }

    pub fn render(&self, frame: &mut Frame) {
        if !self.visible {
            return;
        }

        frame.render_widget(Clear, self.area);
        let button = Paragraph::new(LABEL)
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(button, self.area);
    }

    /// Whether a click landed on the button.
    pub fn hit(&self, position: Position) -> bool {
        self.visible && self.area.contains(position)
    }
}

impl Default for TourLauncher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_anchors_bottom_right() {
        let mut launcher = TourLauncher::new();
        launcher.layout(Rect::new(0, 0, 80, 24));

        assert!(launcher.hit(Position::new(70, 20)));
        assert!(!launcher.hit(Position::new(0, 0)));
        assert!(!launcher.hit(Position::new(40, 12)));
    }

    #[test]
    fn test_hidden_launcher_ignores_clicks() {
        let mut launcher = TourLauncher::new();
        launcher.layout(Rect::new(0, 0, 80, 24));
        launcher.visible = false;

        assert!(!launcher.hit(Position::new(70, 20)));
    }

    #[test]
    fn test_layout_fits_tiny_frames() {
        let mut launcher = TourLauncher::new();
        launcher.layout(Rect::new(0, 0, 6, 2));
        // Degenerate, but must not underflow
        assert!(launcher.area.width <= 6);
        assert!(launcher.area.height <= 2);
    }
}
