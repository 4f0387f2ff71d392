pub mod date_input;
pub mod detail_editor;
pub mod document_print;
pub mod filter_panel;
pub mod master_list;
pub mod status_actions;
pub mod table;
pub mod ui;
