use crate::error::PsrsError;
use crate::psrs::partition::{borrowed_slice, Partition, PartitionBlock};
use crate::substrate::RunContext;

// All-to-all exchange (`spec.md` §4.5): iterate `sender = 0 .. P`. When
// `sender` is this rank, send every other partition to its owning rank and
// keep this rank's own partition locally; otherwise, receive one
// size-announced partition from `sender`. A barrier after every sender's
// turn keeps sends from different senders from racing on the same
// destination, since every rank shares one rendezvous channel per ordered
// pair regardless of which phase is using it.
//
// Every fallible step goes through `ctx.unwrap_or_abort`/`ctx.abort_group`
// rather than `?`: a rank that returned `Err` here instead would skip its
// remaining barriers and leave every other rank blocked forever at the next
// one (`spec.md` §5/§7 - a fatal error here aborts the whole collective).
//
// `chunk` and `block` are consumed: by the time this returns, the
// sender-side partitions and the worker's original chunk are no longer
// needed and are dropped, matching the ownership hand-off in `spec.md` §3.
pub fn exchange(ctx: &RunContext, chunk: Vec<i64>, block: PartitionBlock) -> PartitionBlock {
    let world = ctx.world_size();
    let rank = ctx.rank();
    let mut received: Vec<Option<Vec<i64>>> = (0..world).map(|_| None).collect();

    for sender in 0..world {
        if sender == rank {
            for dest in 0..world {
                let payload = borrowed_slice(&chunk, block.get(dest)).to_vec();
                if dest == rank {
                    received[rank] = Some(payload);
                } else {
                    ctx.unwrap_or_abort(ctx.send_sized_longs(dest, payload));
                }
            }
        } else {
            received[sender] = Some(ctx.unwrap_or_abort(ctx.recv_sized_longs(sender)));
        }

        ctx.barrier();
    }

    let partitions: Vec<Vec<i64>> = received
        .into_iter()
        .enumerate()
        .map(|(i, maybe)| {
            maybe.unwrap_or_else(|| {
                let err = PsrsError::ProtocolViolation(format!(
                    "never received a partition from rank {i}"
                ));
                ctx.abort_group(&err, err.exit_code())
            })
        })
        .collect();

    PartitionBlock::new(partitions.into_iter().map(Partition::Owned).collect())
}
