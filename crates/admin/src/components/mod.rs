//! Reusable view components for templates.

pub mod data_table;

pub use data_table::{FilterOption, SelectFilter, TableColumn};
