use crate::error::PsrsError;
use crate::psrs::partition::{Partition, PartitionBlock};

// k-way merge of the `P` owned partitions a worker received during the
// exchange, done as `P - 1` repeated pairwise merges rather than a single
// k-way pass - the merge algorithm of CME 323 Lecture 3 §2 Algorithm 2
// (`spec.md` §4.6), adapted from `merge_two_sorted_sequences` in the
// teacher's merge-sort module. Each pairwise merge allocates a fresh
// buffer sized `|A| + |B|`; the first partition's buffer is reused as the
// initial running result instead of being copied.
pub fn merge_partitions(block: PartitionBlock) -> Result<Vec<i64>, PsrsError> {
    let mut owned = block.into_inner().into_iter();

    let mut running = match owned.next() {
        Some(Partition::Owned(v)) => v,
        Some(Partition::Borrowed { .. }) => {
            return Err(PsrsError::ProtocolViolation(
                "merger requires owned partitions, got a borrowed one".to_string(),
            ))
        }
        None => return Ok(Vec::new()),
    };

    for partition in owned {
        let next = match partition {
            Partition::Owned(v) => v,
            Partition::Borrowed { .. } => {
                return Err(PsrsError::ProtocolViolation(
                    "merger requires owned partitions, got a borrowed one".to_string(),
                ))
            }
        };
        running = merge_two_sorted(&running, &next);
    }

    Ok(running)
}

fn merge_two_sorted(left: &[i64], right: &[i64]) -> Vec<i64> {
    let mut out = Vec::with_capacity(left.len() + right.len());
    let (mut l, mut r) = (0usize, 0usize);

    while l < left.len() && r < right.len() {
        if left[l] < right[r] {
            out.push(left[l]);
            l += 1;
        } else {
            out.push(right[r]);
            r += 1;
        }
    }

    out.extend_from_slice(&left[l..]);
    out.extend_from_slice(&right[r..]);
    out
}
