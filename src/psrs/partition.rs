use crate::error::PsrsError;

// A contiguous run of longs. `Borrowed` references into the owner's chunk
// by offset/length (no copy); `Owned` holds a freshly allocated copy. This
// replaces the C version's boolean `clean` flag on `PartitionBlock` with a
// tagged variant per the Design Note in `spec.md` §9: destruction is now
// type-directed (an `Owned` partition's buffer drops with it; a `Borrowed`
// partition never owns anything to free) instead of being guarded by a
// flag checked at free time.
pub enum Partition {
    Borrowed { start: usize, len: usize },
    Owned(Vec<i64>),
}

impl Partition {
    pub fn len(&self) -> usize {
        match self {
            Partition::Borrowed { len, .. } => *len,
            Partition::Owned(v) => v.len(),
        }
    }
}

// Ordered sequence of exactly `P` partitions. All partitions in a block
// share the same discipline (all `Borrowed` into one chunk, or all `Owned`)
// - nothing in this type enforces that by construction, but every producer
// in this crate (`Partitioner`, `Exchanger`) only ever builds one kind at a
// time.
pub struct PartitionBlock {
    partitions: Vec<Partition>,
}

impl PartitionBlock {
    pub fn new(partitions: Vec<Partition>) -> Self {
        PartitionBlock { partitions }
    }

    pub fn len(&self) -> usize {
        self.partitions.len()
    }

    pub fn get(&self, index: usize) -> &Partition {
        &self.partitions[index]
    }

    pub fn into_inner(self) -> Vec<Partition> {
        self.partitions
    }

    pub fn total_elements(&self) -> usize {
        self.partitions.iter().map(Partition::len).sum()
    }

    // Coverage invariant of `spec.md` §3/§8 property 2: sizes sum to the
    // chunk size, and (for `Borrowed` blocks) successive bases are
    // non-decreasing.
    pub fn validate_borrowed_covers(&self, chunk_len: usize) -> Result<(), PsrsError> {
        if self.total_elements() != chunk_len {
            return Err(PsrsError::ProtocolViolation(format!(
                "partition sizes sum to {} but the chunk has {} elements",
                self.total_elements(),
                chunk_len
            )));
        }
        let mut previous_start = 0usize;
        for (i, partition) in self.partitions.iter().enumerate() {
            if let Partition::Borrowed { start, .. } = partition {
                if i > 0 && *start < previous_start {
                    return Err(PsrsError::ProtocolViolation(
                        "partition bases are not non-decreasing".to_string(),
                    ));
                }
                previous_start = *start;
            }
        }
        Ok(())
    }
}

// Views a `Borrowed` partition as a slice of the chunk it was cut from.
// Panics if called on an `Owned` partition - the two kinds are never mixed
// in practice (see the block-level comment above).
pub fn borrowed_slice<'a>(chunk: &'a [i64], partition: &Partition) -> &'a [i64] {
    match partition {
        Partition::Borrowed { start, len } => &chunk[*start..*start + *len],
        Partition::Owned(_) => panic!("borrowed_slice called on an Owned partition"),
    }
}
