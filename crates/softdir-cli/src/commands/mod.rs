//! Command implementations for the softdir CLI
//!
//! Each command lives in its own submodule.

mod generate;
mod normalize;
mod show;

pub use generate::execute as generate_catalog;
pub use normalize::execute as normalize_tree;
pub use show::execute as show_software;
