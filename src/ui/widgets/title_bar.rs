use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, StatefulWidget, Widget},
};

use crate::state::AppState;

#[derive(Default, Copy, Clone)]
pub struct TitleBarWidget {}

impl StatefulWidget for TitleBarWidget {
    type State = AppState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        if state.show_help {
            return;
        }
        let mut title = format!("Quarterdeck | {} commands", state.help_entries.len());

        if state.permissions.administrator {
            title.push_str(" | administrator");
        } else {
            let granted = state.permissions.granted().count();
            title.push_str(&format!(" | {} permissions", granted));
        }

        Paragraph::new(title)
            .block(Block::default().borders(Borders::ALL))
            .style(Style::default().fg(Color::White))
            .render(area, buf);
    }
}
