pub mod layout;
mod widgets;

use crate::state::AppState;
use widgets::{
    help_menu::HelpMenuWidget, input_box::InputBoxWidget, output_log::OutputLogWidget,
    title_bar::TitleBarWidget,
};

// Main draw function that coordinates all UI components
pub fn draw(frame: &mut ratatui::Frame<'_>, state: &mut AppState) {
    let layout = layout::create_layout(frame.area());

    frame.render_stateful_widget(TitleBarWidget::default(), layout.title, state);
    frame.render_stateful_widget(OutputLogWidget::default(), layout.output, state);
    frame.render_stateful_widget(InputBoxWidget::default(), layout.input, state);

    // Drawn last so it covers everything when open
    frame.render_stateful_widget(HelpMenuWidget::default(), frame.area(), state);
}
