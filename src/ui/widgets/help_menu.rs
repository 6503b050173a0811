use crate::state::AppState;
use ratatui::{
    prelude::{Buffer, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, StatefulWidget, Widget},
};

#[derive(Default, Copy, Clone)]
pub struct HelpMenuWidget {}

impl StatefulWidget for HelpMenuWidget {
    type State = AppState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        if !state.show_help {
            return;
        }

        // Clear the entire screen first so only the help menu is visible
        Clear.render(area, buf);

        let mut lines = vec![
            Line::from("Quarterdeck commands"),
            Line::from(""),
        ];
        for entry in &state.help_entries {
            lines.push(Line::from(format!(
                "{:<24} {}",
                entry.usage, entry.description
            )));
        }
        lines.push(Line::from(""));
        lines.push(Line::styled(
            "Up/Down scroll, any other key closes",
            Style::default().fg(Color::DarkGray),
        ));

        // Keep the scroll inside the text
        let max_scroll = lines.len().saturating_sub(1);
        if state.help_scroll > max_scroll {
            state.help_scroll = max_scroll;
        }

        Paragraph::new(lines)
            .block(Block::default().title("Help").borders(Borders::ALL))
            .style(Style::default())
            .scroll((state.help_scroll as u16, 0))
            .render(area, buf);
    }
}
