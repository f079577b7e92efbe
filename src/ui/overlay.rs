//! Spotlight overlay: highlight border around the current step's target plus
//! an instructional tooltip.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::tour::Step;

const TOOLTIP_WIDTH: u16 = 40;

pub struct TourOverlay;

impl TourOverlay {
    pub fn new() -> Self {
        Self
    }

    /// Draw the highlight and tooltip for the running step. `region` is the
    /// located target in screen coordinates.
    pub fn render(&self, frame: &mut Frame, step: &Step, region: Rect, index: usize, total: usize) {
        let frame_area = frame.area();

        // Border one cell outside the target, where there's room
        let highlight = Rect {
            x: region.x.saturating_sub(1),
            y: region.y.saturating_sub(1),
            width: region.width.saturating_add(2),
            height: region.height.saturating_add(2),
        }
        .intersection(frame_area);
        if highlight.is_empty() {
            return;
        }
        let spotlight = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Thick)
            .border_style(Style::default().fg(Color::Yellow));
        frame.render_widget(spotlight, highlight);

        let width = TOOLTIP_WIDTH.min(frame_area.width);
        let mut lines: Vec<Line> = Vec::new();
        if let Some(title) = &step.title {
            lines.push(Line::from(Span::styled(
                title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )));
        }
        lines.push(Line::from(step.content.clone()));
        if !step.flags.hide_footer {
            let mut hints = vec![Span::styled(
                format!("Step {}/{}", index + 1, total),
                Style::default().fg(Color::DarkGray),
            )];
            if step.click_required() {
                hints.push(Span::raw("  "));
                hints.push(Span::styled(
                    "click the highlighted element",
                    Style::default().fg(Color::DarkGray),
                ));
            } else {
                hints.push(Span::raw("  "));
                hints.push(Span::styled(
                    "Enter next",
                    Style::default().fg(Color::DarkGray),
                ));
            }
            if !step.flags.hide_close_button {
                hints.push(Span::raw("  "));
                hints.push(Span::styled(
                    "Esc close",
                    Style::default().fg(Color::DarkGray),
                ));
            }
            lines.push(Line::default());
            lines.push(Line::from(hints));
        }

        let height = tooltip_height(&lines, width);
        let area = tooltip_area(highlight, frame_area, width, height);
        if area.is_empty() {
            return;
        }

        frame.render_widget(Clear, area);
        let tooltip = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );
        frame.render_widget(tooltip, area);
    }
}

impl Default for TourOverlay {
    fn default() -> Self {
        Self::new()
    }
}

/// Total tooltip height including borders, accounting for wrapped lines.
fn tooltip_height(lines: &[Line], width: u16) -> u16 {
    let inner_width = width.saturating_sub(2).max(1) as usize;
    let text_rows: usize = lines
        .iter()
        .map(|line| line.width().div_ceil(inner_width).max(1))
        .sum();
    (text_rows as u16).saturating_add(2)
}

/// Place the tooltip below the highlight when it fits, otherwise above,
/// clamped to the frame horizontally.
fn tooltip_area(highlight: Rect, frame: Rect, width: u16, height: u16) -> Rect {
    let y = if highlight.bottom().saturating_add(height) <= frame.bottom() {
        highlight.bottom()
    } else {
        highlight.y.saturating_sub(height)
    };
    let max_x = frame.right().saturating_sub(width);
    let x = highlight.x.min(max_x);
    Rect {
        x,
        y,
        width,
        height,
    }
    .intersection(frame)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Rect = Rect {
        x: 0,
        y: 0,
        width: 80,
        height: 24,
    };

    #[test]
    fn test_tooltip_goes_below_when_there_is_room() {
        let highlight = Rect::new(2, 2, 20, 3);
        let area = tooltip_area(highlight, FRAME, 40, 5);
        assert_eq!(area.y, highlight.bottom());
    }

    #[test]
    fn test_tooltip_flips_above_near_bottom_edge() {
        let highlight = Rect::new(2, 19, 20, 4);
        let area = tooltip_area(highlight, FRAME, 40, 5);
        assert_eq!(area.bottom(), highlight.y);
    }

    #[test]
    fn test_tooltip_clamped_to_right_edge() {
        let highlight = Rect::new(70, 2, 8, 3);
        let area = tooltip_area(highlight, FRAME, 40, 5);
        assert!(area.right() <= FRAME.right());
    }

    #[test]
    fn test_tooltip_height_wraps_long_content() {
        let lines = vec![Line::from("x".repeat(100))];
        // 38 usable columns -> 3 wrapped rows + 2 border rows
        assert_eq!(tooltip_height(&lines, 40), 5);
    }
}
