use crate::error::PsrsError;
use crate::substrate::Substrate;

// Validated run configuration, built from CLI flags (`spec.md` §6.1) plus
// the world size the process launcher assigned (`SPEC_FULL.md` §2). Unlike
// the CLI's raw `Cli` struct, every field here is already known-good.
pub struct Config {
    pub world: usize,
    pub length: usize,
    pub runs: usize,
    pub seed: u64,
    pub window: usize,
    pub phase: bool,
    pub binary: bool,
}

impl Config {
    pub fn validate(
        length: usize,
        runs: usize,
        seed: u64,
        window: usize,
        phase: bool,
        binary: bool,
    ) -> Result<Config, PsrsError> {
        if length == 0 {
            return Err(PsrsError::ConfigInvalid("length must be > 0".to_string()));
        }
        if length > (i64::MAX / 8) as usize {
            return Err(PsrsError::ConfigInvalid(
                "length * sizeof(i64) would overflow".to_string(),
            ));
        }
        if runs == 0 {
            return Err(PsrsError::ConfigInvalid("runs must be > 0".to_string()));
        }
        if seed == 0 {
            return Err(PsrsError::ConfigInvalid("seed must be > 0".to_string()));
        }
        if window == 0 || window > runs {
            return Err(PsrsError::ConfigInvalid(format!(
                "window must satisfy 1 <= window <= runs ({window} vs {runs})"
            )));
        }

        let world = Substrate::world_size_from_env();
        if length < world {
            return Err(PsrsError::ConfigInvalid(format!(
                "length {length} is smaller than world size {world}"
            )));
        }

        Ok(Config {
            world,
            length,
            runs,
            seed,
            window,
            phase,
            binary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_length() {
        assert!(Config::validate(0, 1, 1, 1, false, false).is_err());
    }

    #[test]
    fn rejects_window_larger_than_runs() {
        assert!(Config::validate(100, 3, 1, 4, false, false).is_err());
    }

    #[test]
    fn rejects_zero_seed() {
        assert!(Config::validate(100, 3, 0, 1, false, false).is_err());
    }

    #[test]
    fn accepts_a_well_formed_configuration() {
        assert!(Config::validate(1000, 5, 42, 3, true, false).is_ok());
    }
}
