//! Basic example of using emoji-chaos as a library
//!
//! Shows the same sentence at every chaos level with a fixed seed.

use emoji_chaos::{ChaosLevel, ChaosTransformer};

fn main() -> anyhow::Result<()> {
    let text = "Let's schedule a meeting to talk about the project.\nAny questions?";

    for level in 1..=10 {
        let transformer = ChaosTransformer::new(ChaosLevel::new(level)?);
        println!("--- level {level} ---");
        println!("{}\n", transformer.transform_seeded(text, 42));
    }

    Ok(())
}
