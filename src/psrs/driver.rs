use crate::error::PsrsError;
use crate::generator::generate;
use crate::psrs::exchanger::exchange;
use crate::psrs::merger::merge_partitions;
use crate::psrs::partitioner::partition_by_pivots;
use crate::psrs::pivot::{regular_samples, sample_stride, select_pivots};
use crate::quick_sort::simple_quick_sort::normal_quick_sort;
use crate::substrate::RunContext;

// Either shape the bench loop can ask the driver for (`spec.md` §4.7/§4.8).
pub enum PhaseTiming {
    Total(f64),
    Phases([f64; 4]),
}

impl PhaseTiming {
    pub fn total(&self) -> f64 {
        match self {
            PhaseTiming::Total(t) => *t,
            PhaseTiming::Phases(p) => p.iter().sum(),
        }
    }
}

// Splits a length-`n` array into `world` contiguous chunks of size
// `ceil(n / world)`, the last one possibly short (`spec.md` §3 "Chunk").
pub fn split_into_chunks(array: Vec<i64>, world: usize) -> Vec<Vec<i64>> {
    let n = array.len();
    let chunk_size = n.div_ceil(world);
    let mut chunks = Vec::with_capacity(world);
    let mut rest = array;

    for _ in 0..world {
        let take = chunk_size.min(rest.len());
        let tail = rest.split_off(take);
        chunks.push(rest);
        rest = tail;
    }

    chunks
}

// One full PSRS run (`spec.md` §4.7). `ctx` is a rank's handle into the
// substrate; `seed`/`n` regenerate the input independently on every call so
// repeated runs in the bench loop are comparable. Returns per-phase elapsed
// times everywhere; only rank 0's `sorted` is populated.
//
// Every fallible substrate/algorithm call below is routed through
// `ctx.unwrap_or_abort`/`ctx.abort_group` instead of `?`. A `Result`
// propagated past a single rank's worker closure would make that rank
// return early and skip its remaining `ctx.barrier()` calls; since a
// `std::sync::Barrier` only releases once every rank arrives and is never
// poisoned by a peer that stopped participating, every other rank would
// then hang forever at the next barrier or blocking `recv()` instead of the
// run failing (`spec.md` §5 "aborts the entire collective", §7).
pub struct RunOutcome {
    pub elapsed: [f64; 4],
    pub sorted: Option<Vec<i64>>,
}

// Generates a fresh array from `(seed, n)` and runs it through PSRS.
pub fn run_once(ctx: &RunContext, seed: u64, n: usize) -> Result<RunOutcome, PsrsError> {
    let array = if ctx.is_root() { generate(seed, n) } else { Vec::new() };
    run_once_on(ctx, array, n)
}

// Runs an arbitrary array (known only at rank 0; other ranks may pass an
// empty placeholder) through PSRS. Split out from `run_once` so the same
// input - including the sorted output of a prior run - can be driven
// through the phases again, which is what `spec.md` §8 property 8
// ("idempotent re-sort") requires a test to exercise.
pub fn run_once_on(ctx: &RunContext, array: Vec<i64>, n: usize) -> Result<RunOutcome, PsrsError> {
    let world = ctx.world_size();

    ctx.barrier();
    let t0 = ctx.now();

    // Phase 1: scatter, local sort, local sampling.
    let mut chunk = if ctx.is_root() {
        let chunks = split_into_chunks(array, world);
        ctx.unwrap_or_abort(ctx.scatter_root(chunks))
    } else {
        ctx.unwrap_or_abort(ctx.scatter_follower(0))
    };

    normal_quick_sort(&mut chunk, &i64::cmp);

    let stride = sample_stride(n, world).max(1);
    let local_samples = regular_samples(&chunk, world, stride);

    // Cross-check: the number of samples gathered in Phase 2 below should
    // match what a reduce-sum of each rank's own sample count independently
    // reports (`SPEC_FULL.md` §4.10, `spec.md` §8 scenario (b)).
    let local_sample_count = local_samples.len() as i64;
    let expected_sample_total = if ctx.is_root() {
        Some(ctx.unwrap_or_abort(ctx.reduce_sum_root(local_sample_count)))
    } else {
        ctx.unwrap_or_abort(ctx.reduce_sum_follower(0, local_sample_count));
        None
    };

    ctx.barrier();
    let t1 = ctx.now();

    // Phase 2: gather samples, select pivots at root, broadcast, partition.
    let pivots = if ctx.is_root() {
        let gathered = ctx.unwrap_or_abort(ctx.gather_root(local_samples));
        let mut all_samples: Vec<i64> = gathered.into_iter().flatten().collect();
        all_samples.sort_unstable();

        if all_samples.len() as i64 != expected_sample_total.unwrap() {
            let err = PsrsError::ProtocolViolation(format!(
                "gathered {} samples but reduce-sum reported {}",
                all_samples.len(),
                expected_sample_total.unwrap()
            ));
            ctx.abort_group(&err, err.exit_code());
        }

        let pivots = ctx.unwrap_or_abort(select_pivots(&all_samples, world));
        ctx.unwrap_or_abort(ctx.bcast_root(pivots))
    } else {
        ctx.unwrap_or_abort(ctx.gather_follower(0, local_samples));
        ctx.unwrap_or_abort(ctx.bcast_follower(0))
    };

    let block = partition_by_pivots(&chunk, &pivots);

    ctx.barrier();
    let t2 = ctx.now();

    // Phase 3: all-to-all exchange.
    let exchanged = exchange(ctx, chunk, block);

    // Cross-check: the total number of elements exchanged across every
    // rank must equal `N` - exchange conservation, `spec.md` §8 property 4.
    let local_exchanged_count = exchanged.total_elements() as i64;
    if ctx.is_root() {
        let total_exchanged = ctx.unwrap_or_abort(ctx.reduce_sum_root(local_exchanged_count));
        if total_exchanged != n as i64 {
            let err = PsrsError::ProtocolViolation(format!(
                "exchange conservation failed: {total_exchanged} elements exchanged, N = {n}"
            ));
            ctx.abort_group(&err, err.exit_code());
        }
    } else {
        ctx.unwrap_or_abort(ctx.reduce_sum_follower(0, local_exchanged_count));
    }

    ctx.barrier();
    let t3 = ctx.now();

    // Phase 4: k-way merge, gather merged runs, concatenate at root.
    let merged = ctx.unwrap_or_abort(merge_partitions(exchanged));

    let sorted = if ctx.is_root() {
        let runs = ctx.unwrap_or_abort(ctx.gather_root(merged));
        Some(runs.into_iter().flatten().collect())
    } else {
        ctx.unwrap_or_abort(ctx.gather_follower(0, merged));
        None
    };

    ctx.barrier();
    let t4 = ctx.now();

    Ok(RunOutcome {
        elapsed: [t1 - t0, t2 - t1, t3 - t2, t4 - t3],
        sorted,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::substrate::Substrate;

    #[test]
    fn splits_into_chunks_of_the_expected_shape() {
        let chunks = split_into_chunks((0..10).collect(), 3);
        assert_eq!(chunks.iter().map(Vec::len).collect::<Vec<_>>(), vec![4, 4, 2]);
        assert_eq!(chunks.into_iter().flatten().count(), 10);
    }

    #[test]
    fn parallel_run_sorts_correctly_scenario_a() {
        let world = 4;
        let results = Substrate::run(world, move |ctx| run_once(&ctx, 1, 16)).unwrap();

        let mut expected = generate(1, 16);
        expected.sort_unstable();

        let sorted = results[0].sorted.as_ref().unwrap();
        assert_eq!(sorted, &expected);
        for r in &results[1..] {
            assert!(r.sorted.is_none());
        }
    }

    #[test]
    fn unequal_chunking_still_sorts_correctly_scenario_b() {
        let world = 3;
        let results = Substrate::run(world, move |ctx| run_once(&ctx, 42, 10)).unwrap();

        let mut expected = generate(42, 10);
        expected.sort_unstable();
        assert_eq!(results[0].sorted.as_ref().unwrap(), &expected);
    }

    #[test]
    fn identical_seed_and_length_is_deterministic() {
        let a = Substrate::run(4, move |ctx| run_once(&ctx, 7, 5000))
            .unwrap()
            .remove(0)
            .sorted
            .unwrap();
        let b = Substrate::run(4, move |ctx| run_once(&ctx, 7, 5000))
            .unwrap()
            .remove(0)
            .sorted
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn single_worker_world_sorts_without_point_to_point_traffic() {
        let results = Substrate::run(1, move |ctx| run_once(&ctx, 3, 37)).unwrap();
        let mut expected = generate(3, 37);
        expected.sort_unstable();
        assert_eq!(results[0].sorted.as_ref().unwrap(), &expected);
    }

    // spec.md §8 property 8: feeding a successful run's output back through
    // PSRS must yield the same sequence.
    #[test]
    fn resorting_a_sorted_array_is_idempotent() {
        let world = 4;
        let n = 777;

        let first = Substrate::run(world, move |ctx| run_once(&ctx, 9, n)).unwrap();
        let sorted_once = first[0].sorted.clone().unwrap();

        let second = Substrate::run(world, {
            let sorted_once = sorted_once.clone();
            move |ctx| {
                let array = if ctx.is_root() { sorted_once.clone() } else { Vec::new() };
                run_once_on(&ctx, array, n)
            }
        })
        .unwrap();

        assert_eq!(second[0].sorted.as_ref().unwrap(), &sorted_once);
    }
}
