//! Dry run example
//!
//! Previews the chaos for a file without writing anything.

use emoji_chaos::{Config, FixedConfirm, Pipeline};

fn main() -> anyhow::Result<()> {
    let config = Config::builder()
        .path("./README.md")
        .chaos_level(6)
        .dry_run(true)
        .build()?;

    let stats = Pipeline::new(config, FixedConfirm(false))?.run()?;
    stats.print_summary();

    println!("Rerun with --seed {} to get the same output", stats.seed);

    Ok(())
}
