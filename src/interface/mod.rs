pub mod export;
pub mod render;

pub use export::{write_csv, write_csv_file};
pub use render::{format_day_plan, format_item_line};
