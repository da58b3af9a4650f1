use crate::error::PsrsError;
use crate::ring::Ring;

// Wraps a `Ring<f64>` with a saturating write counter. `mean`/`stdev` are
// only defined once at least `length()` values have been pushed - mirroring
// `moving_average_calc`'s `ENOTSUP` check in the original C implementation.
pub struct MovingWindow {
    ring: Ring<f64>,
    written: u64,
}

impl MovingWindow {
    pub fn new(length: usize) -> Result<Self, PsrsError> {
        Ok(MovingWindow {
            ring: Ring::new(length)?,
            written: 0,
        })
    }

    pub fn push(&mut self, value: f64) {
        self.ring.add(value);
        self.written = self.written.saturating_add(1);
    }

    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn mean(&self) -> Result<f64, PsrsError> {
        self.require_full()?;
        let length = self.ring.length() as f64;
        Ok(self.ring.iter().sum::<f64>() / length)
    }

    // Population standard deviation of the most recent `length()` pushes.
    pub fn stdev(&self) -> Result<f64, PsrsError> {
        self.require_full()?;
        let mean = self.mean()?;
        let length = self.ring.length() as f64;
        let variance = self
            .ring
            .iter()
            .map(|x| (x - mean).powi(2))
            .sum::<f64>()
            / length;
        Ok(variance.sqrt())
    }

    fn require_full(&self) -> Result<(), PsrsError> {
        if self.written < self.ring.length() as u64 {
            return Err(PsrsError::PreconditionViolation(format!(
                "moving window has only {} of {} required pushes",
                self.written,
                self.ring.length()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_and_stdev_fail_before_window_fills() {
        let mut window = MovingWindow::new(3).unwrap();
        window.push(1.0);
        assert!(window.mean().is_err());
        assert!(window.stdev().is_err());
    }

    #[test]
    fn mean_and_stdev_match_scenario_e() {
        let mut window = MovingWindow::new(3).unwrap();
        for v in [1.0, 2.0, 3.0, 4.0, 5.0] {
            window.push(v);
        }
        assert!((window.mean().unwrap() - 4.0).abs() < 1e-12);
        assert!((window.stdev().unwrap() - (2.0_f64 / 3.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn single_run_single_window_has_zero_stdev() {
        let mut window = MovingWindow::new(1).unwrap();
        window.push(0.25);
        assert_eq!(window.mean().unwrap(), 0.25);
        assert_eq!(window.stdev().unwrap(), 0.0);
    }
}
