//! Output formatting module

pub mod json;
pub mod terminal;

pub use json::print_json;
pub use terminal::{
    create_progress_bar, print_cycle_summary, print_error, print_header, print_info,
    print_outcome,
};
