//! softdir - catalog generator for a static software-download site
//!
//! All command implementations live in the library crate.

fn main() -> anyhow::Result<()> {
    softdir_cli::run()
}
