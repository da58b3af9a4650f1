use crate::error::PsrsError;

// w = N / P^2, the stride at which each worker samples its own sorted
// chunk (`spec.md` §3 "Samples", §4.3).
pub fn sample_stride(total_len: usize, world: usize) -> usize {
    total_len / (world * world)
}

// Up to `P` regular samples from a sorted chunk, taken at `k * stride` for
// `k = 0 .. S_max`. `S_max` is `P` for a full-size chunk and the chunk's own
// length when it is shorter than `P` (the short last worker, `spec.md` §3).
pub fn regular_samples(sorted_chunk: &[i64], world: usize, stride: usize) -> Vec<i64> {
    if sorted_chunk.is_empty() {
        return Vec::new();
    }

    let s_max = world.min(sorted_chunk.len());
    (0..s_max)
        .map(|k| {
            let idx = (k * stride).min(sorted_chunk.len() - 1);
            sorted_chunk[idx]
        })
        .collect()
}

// Picks exactly `P - 1` pivots from the sorted, gathered samples: indices
// `k*P + rho` for `k = 1 .. P-1`, `rho = floor(P/2)` (`spec.md` §4.3).
// Fails if the sample pool is too small to produce all of them - the
// pathological small-input case `spec.md` calls out explicitly.
pub fn select_pivots(sorted_samples: &[i64], world: usize) -> Result<Vec<i64>, PsrsError> {
    let rho = world / 2;
    let mut pivots = Vec::with_capacity(world.saturating_sub(1));

    for k in 1..world {
        let idx = k * world + rho;
        let &value = sorted_samples.get(idx).ok_or_else(|| {
            PsrsError::ProtocolViolation(format!(
                "only {} samples gathered, cannot select pivot at index {idx}",
                sorted_samples.len()
            ))
        })?;
        pivots.push(value);
    }

    if pivots.len() != world.saturating_sub(1) {
        return Err(PsrsError::ProtocolViolation(format!(
            "expected {} pivots, produced {}",
            world.saturating_sub(1),
            pivots.len()
        )));
    }

    debug_assert!(pivots.windows(2).all(|w| w[0] <= w[1]), "pivots must be non-decreasing");

    Ok(pivots)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regular_samples_caps_at_world_size() {
        let chunk = vec![1, 2, 3, 4, 5, 6, 7, 8];
        let samples = regular_samples(&chunk, 4, 2);
        assert_eq!(samples.len(), 4);
    }

    #[test]
    fn regular_samples_shrinks_for_a_short_chunk() {
        // scenario (b): last worker's chunk has 2 elements, P = 3.
        let chunk = vec![10, 20];
        let samples = regular_samples(&chunk, 3, 1);
        assert_eq!(samples.len(), 2);
    }

    #[test]
    fn select_pivots_produces_exactly_p_minus_one() {
        let samples: Vec<i64> = (0..40).collect();
        let pivots = select_pivots(&samples, 4).unwrap();
        assert_eq!(pivots.len(), 3);
        assert!(pivots.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn select_pivots_fails_when_sample_pool_too_small() {
        let samples = vec![1, 2, 3];
        assert!(select_pivots(&samples, 4).is_err());
    }

    #[test]
    fn single_worker_needs_no_pivots() {
        let samples: Vec<i64> = vec![];
        let pivots = select_pivots(&samples, 1).unwrap();
        assert!(pivots.is_empty());
    }
}
