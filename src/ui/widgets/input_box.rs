use crate::console::ConsoleStateAccess;
use crate::constants::PROMPT;
use crate::state::AppState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, StatefulWidget, Widget},
};

#[derive(Default, Copy, Clone)]
pub struct InputBoxWidget {}

impl StatefulWidget for InputBoxWidget {
    type State = AppState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        if state.show_help {
            return;
        }
        let block = Block::default().borders(Borders::TOP);
        let inner_area = block.inner(area);
        block.render(area, buf);
        if inner_area.height == 0 {
            return;
        }

        // Suggestion line above the prompt, or a usage hint when idle
        let console = state.console_state();
        let top_line = if console.suggestions.is_empty() {
            Line::styled(
                " Tab completes, Enter runs, Up/Down recall history, Esc quits",
                Style::default().fg(Color::DarkGray),
            )
        } else {
            Line::styled(
                format!(" {}", console.suggestions.join("  ")),
                Style::default().fg(Color::Cyan),
            )
        };

        let prompt = Span::styled(PROMPT, Style::default().fg(Color::Yellow));
        let input = Span::raw(console.input_buffer.as_str());
        let input_line = Line::from(vec![prompt, input]);

        Paragraph::new(vec![top_line, input_line])
            .style(Style::default().fg(Color::White))
            .render(inner_area, buf);

        // Render the cursor by inverting its cell
        if inner_area.height > 1 {
            let cursor_x =
                inner_area.x + PROMPT.len() as u16 + console.cursor_position as u16;
            let cursor_y = inner_area.y + 1;

            if cursor_x < inner_area.right() && cursor_y < buf.area().height {
                let cell = &mut buf[(cursor_x, cursor_y)];
                cell.set_bg(cell.fg);
                cell.set_fg(Color::Black);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn row(buffer: &Buffer, y: u16) -> String {
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol())
            .collect()
    }

    #[test]
    fn test_input_box_renders_prompt_and_buffer() {
        let mut state = AppState::default();
        state.console_state_mut().input_buffer = "sum 1 2".to_string();
        state.console_state_mut().cursor_position = 7;

        let backend = TestBackend::new(30, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                InputBoxWidget::default().render(area, f.buffer_mut(), &mut state);
            })
            .unwrap();

        let input_row = row(terminal.backend().buffer(), 2);
        assert_eq!(input_row, format!("{:<30}", "> sum 1 2"));
    }

    #[test]
    fn test_input_box_shows_suggestions() {
        let mut state = AppState::default();
        state.console_state_mut().input_buffer = "reload ".to_string();
        state.console_state_mut().suggestions =
            vec!["aaa".to_string(), "bbb".to_string()];

        let backend = TestBackend::new(30, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                InputBoxWidget::default().render(area, f.buffer_mut(), &mut state);
            })
            .unwrap();

        let suggestion_row = row(terminal.backend().buffer(), 1);
        assert_eq!(suggestion_row, format!("{:<30}", " aaa  bbb"));
    }
}
