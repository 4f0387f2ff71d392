pub mod api_utils;
pub mod catalogs;
pub mod components;
pub mod date_utils;
pub mod export;
pub mod icons;
pub mod master_detail;
pub mod modal;
pub mod number_format;
pub mod page_frame;
pub mod picker_aggregate;
