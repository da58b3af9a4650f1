use crate::error::PsrsError;
use crate::generator::generate;
use crate::timing::now;

// `P == 1` baseline (`spec.md` §4.9): `R` independent sorts of a freshly
// generated array, each timed on its own. Uses the standard library's
// sort directly rather than `quick_sort::normal_quick_sort` - no
// message-passing substrate is involved on this path, so there is nothing
// to ground it against in `Substrate`/`RunContext`, and a library sort is
// exactly what the spec calls for here.
pub fn run_once(seed: u64, n: usize) -> Result<f64, PsrsError> {
    let mut array = generate(seed, n);
    let start = now();
    array.sort_unstable();
    Ok(now() - start)
}
