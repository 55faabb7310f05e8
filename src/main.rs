//! Native entry point
//!
//! Runs one simulation and prints the resulting balls as JSON. Browser
//! builds drive the engine through the `wasm` bindings instead.

#[cfg(not(target_arch = "wasm32"))]
use clap::Parser;

/// Grow tangent balls from random points and print them as JSON.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Spatial dimension of the growth domain
    dimension: usize,
    /// Number of points to drop into the unit cube
    num_points: usize,
    /// RNG seed; a fresh one is drawn and logged when omitted
    seed: Option<u64>,
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use lilypond_growth::{SimParams, simulate};

    env_logger::init();

    let args = Args::parse();
    let mut params = SimParams::new(args.dimension, args.num_points);
    if let Some(seed) = args.seed {
        params = params.with_seed(seed);
    }

    let balls = simulate(&params)?;
    println!("{}", serde_json::to_string_pretty(&balls)?);
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM builds use the `wasm` bindings; this stub satisfies the binary
    // target.
}
