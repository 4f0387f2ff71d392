pub mod header_form;
pub mod page;
pub mod print;
