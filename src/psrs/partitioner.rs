use crate::psrs::partition::{Partition, PartitionBlock};

// Splits a worker's sorted chunk into `pivots.len() + 1` contiguous,
// non-overlapping partitions at the given pivots. For each pivot in order,
// an upper-bound binary search over the remaining suffix gives the
// partition boundary (first index where the element exceeds the pivot);
// the final partition is the remainder (`spec.md` §4.4).
//
// Edge case: if the search returns index 0 within the remaining suffix (no
// element so far exceeds the pivot, because every remaining element is
// already bigger than it), the partition is instead forced to contain
// exactly the first remaining element, so no partition is ever left empty
// except at the very end of the chunk.
pub fn partition_by_pivots(chunk: &[i64], pivots: &[i64]) -> PartitionBlock {
    let mut partitions = Vec::with_capacity(pivots.len() + 1);
    let mut cursor = 0usize;

    for &pivot in pivots {
        let suffix = &chunk[cursor..];
        let mut boundary = suffix.partition_point(|&x| x <= pivot);

        if boundary == 0 && !suffix.is_empty() {
            boundary = 1;
        }

        partitions.push(Partition::Borrowed {
            start: cursor,
            len: boundary,
        });
        cursor += boundary;
    }

    partitions.push(Partition::Borrowed {
        start: cursor,
        len: chunk.len() - cursor,
    });

    PartitionBlock::new(partitions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::psrs::partition::borrowed_slice;

    #[test]
    fn scenario_f_matches_the_worked_example() {
        let chunk = vec![1, 3, 5, 7, 9];
        let pivots = vec![3, 6];
        let block = partition_by_pivots(&chunk, &pivots);

        assert_eq!(block.len(), 3);
        assert_eq!(borrowed_slice(&chunk, block.get(0)), &[1, 3]);
        assert_eq!(borrowed_slice(&chunk, block.get(1)), &[5]);
        assert_eq!(borrowed_slice(&chunk, block.get(2)), &[7, 9]);
    }

    #[test]
    fn coverage_holds_for_random_pivots() {
        let chunk: Vec<i64> = (0..97).collect();
        let pivots = vec![10, 10, 50, 90, 200];
        let block = partition_by_pivots(&chunk, &pivots);
        assert!(block.validate_borrowed_covers(chunk.len()).is_ok());
    }

    #[test]
    fn no_pivots_yields_a_single_partition() {
        let chunk = vec![1, 2, 3];
        let block = partition_by_pivots(&chunk, &[]);
        assert_eq!(block.len(), 1);
        assert_eq!(borrowed_slice(&chunk, block.get(0)), &[1, 2, 3]);
    }
}
