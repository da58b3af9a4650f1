use crate::config::Config;
use crate::error::PsrsError;
use crate::moving_window::MovingWindow;
use crate::psrs::driver::run_once as parallel_run_once;
use crate::psrs::sequential::run_once as sequential_run_once;
use crate::substrate::Substrate;

// What the output formatter receives once the bench loop's window(s) have
// filled (`spec.md` §4.8, §6.2).
pub enum Report {
    Total { mean: f64, stdev: f64 },
    Phases([f64; 4]),
}

// Runs `config.runs` independent invocations of either the sequential
// baseline (`world == 1`) or the parallel driver, pushing each run's timing
// into a MovingWindow (one window in total-time mode, four in per-phase
// mode), and returns the mean (+ stdev, total-time mode only) over the last
// `config.window` runs.
pub fn bench(config: &Config) -> Result<Report, PsrsError> {
    if config.phase {
        let mut windows = [
            MovingWindow::new(config.window)?,
            MovingWindow::new(config.window)?,
            MovingWindow::new(config.window)?,
            MovingWindow::new(config.window)?,
        ];

        for _ in 0..config.runs {
            let elapsed = run_once_phases(config)?;
            for (window, value) in windows.iter_mut().zip(elapsed) {
                window.push(value);
            }
        }

        let means = [
            windows[0].mean()?,
            windows[1].mean()?,
            windows[2].mean()?,
            windows[3].mean()?,
        ];
        Ok(Report::Phases(means))
    } else {
        let mut window = MovingWindow::new(config.window)?;

        for _ in 0..config.runs {
            let elapsed = run_once_total(config)?;
            window.push(elapsed);
        }

        Ok(Report::Total {
            mean: window.mean()?,
            stdev: window.stdev()?,
        })
    }
}

fn run_once_total(config: &Config) -> Result<f64, PsrsError> {
    if config.world == 1 {
        return sequential_run_once(config.seed, config.length);
    }

    let seed = config.seed;
    let n = config.length;
    let results = Substrate::run(config.world, move |ctx| {
        parallel_run_once(&ctx, seed, n).map(|outcome| outcome.elapsed.iter().sum::<f64>())
    })?;
    Ok(results[0])
}

fn run_once_phases(config: &Config) -> Result<[f64; 4], PsrsError> {
    if config.world == 1 {
        let elapsed = sequential_run_once(config.seed, config.length)?;
        return Ok([elapsed, 0.0, 0.0, 0.0]);
    }

    let seed = config.seed;
    let n = config.length;
    let results = Substrate::run(config.world, move |ctx| {
        parallel_run_once(&ctx, seed, n).map(|outcome| outcome.elapsed)
    })?;
    Ok(results[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(world: usize, length: usize, runs: usize, window: usize, phase: bool) -> Config {
        Config {
            world,
            length,
            runs,
            seed: 11,
            window,
            phase,
            binary: false,
        }
    }

    #[test]
    fn total_mode_reports_mean_and_stdev() {
        let report = bench(&config(1, 1, 1, 1, false)).unwrap();
        match report {
            Report::Total { mean, stdev } => {
                assert!(mean >= 0.0);
                assert_eq!(stdev, 0.0);
            }
            Report::Phases(_) => panic!("expected total report"),
        }
    }

    #[test]
    fn phase_mode_reports_four_values() {
        let report = bench(&config(4, 2000, 3, 3, true)).unwrap();
        match report {
            Report::Phases(p) => assert_eq!(p.len(), 4),
            Report::Total { .. } => panic!("expected phase report"),
        }
    }

    #[test]
    fn window_larger_than_runs_never_fills() {
        let err = bench(&config(1, 1, 1, 2, false));
        assert!(err.is_err());
    }
}
