pub mod help_menu;
pub mod input_box;
pub mod output_log;
pub mod title_bar;
