use clap::Parser;

use crate::config::Config;
use crate::error::PsrsError;

// CLI surface of `spec.md` §6.1. World size is not a flag here: it comes
// from the process launcher (`Config::validate` reads `PSRS_WORLD_SIZE`).
#[derive(Parser, Debug)]
#[command(name = "psrs", about = "Parallel Sorting by Regular Sampling benchmark")]
pub struct Cli {
    /// Emit raw little-endian f64 output instead of human-readable text.
    #[arg(short = 'b', long = "binary")]
    pub binary: bool,

    /// Emit per-phase mean timings (4 values) instead of total mean + stdev.
    #[arg(short = 'p', long = "phase")]
    pub phase: bool,

    /// Array length N.
    #[arg(short = 'l', long = "length")]
    pub length: usize,

    /// Number of timed runs R.
    #[arg(short = 'r', long = "run")]
    pub run: usize,

    /// PRNG seed.
    #[arg(short = 's', long = "seed")]
    pub seed: u64,

    /// Moving-window size W (1 <= W <= R).
    #[arg(short = 'w', long = "window")]
    pub window: usize,
}

impl Cli {
    pub fn into_config(self) -> Result<Config, PsrsError> {
        Config::validate(self.length, self.run, self.seed, self.window, self.phase, self.binary)
    }
}
