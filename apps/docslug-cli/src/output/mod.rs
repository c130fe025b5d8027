//! Terminal output helpers

mod printer;
pub mod table;

pub use printer::{print_failure, print_json, print_success, print_warning};
