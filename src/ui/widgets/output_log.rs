use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Paragraph, StatefulWidget, Widget},
};

use crate::state::AppState;
use crate::console::ConsoleStateAccess;

#[derive(Default, Copy, Clone)]
pub struct OutputLogWidget {}

/// Window of `[start, end)` indices visible for a log of `total` lines when
/// scrolled `scroll` lines up from the bottom.
fn visible_range(total: usize, scroll: usize, height: usize) -> (usize, usize) {
    let end = total.saturating_sub(scroll);
    let start = end.saturating_sub(height);
    (start, end)
}

impl StatefulWidget for OutputLogWidget {
    type State = AppState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        if state.show_help {
            return;
        }
        let output = &state.console_state().output;
        let (start, end) = visible_range(output.len(), state.console_state().output_scroll, area.height as usize);

        let lines: Vec<Line> = output[start..end]
            .iter()
            .map(|line| {
                let style = if line.is_error {
                    Style::default().fg(Color::Red)
                } else {
                    Style::default().fg(Color::White)
                };
                Line::styled(line.text.clone(), style)
            })
            .collect();

        Paragraph::new(lines).render(area, buf);
    }
}
