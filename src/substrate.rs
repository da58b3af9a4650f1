use std::sync::{Arc, Barrier};

use crossbeam::channel::{bounded, Receiver, Sender};

use crate::error::PsrsError;
use crate::timing::now;

// Everything the driver needs from "the message-passing substrate" of
// `spec.md` §1/§6.4: rank/world size, a collective barrier, broadcast,
// scatter, gather, reduce, synchronous point-to-point send/recv, and a
// group-wide abort. There is no real job launcher here - each rank is an
// OS thread rather than a separate process - but the channel discipline
// below is exactly what a real MPI-style substrate provides: every ordered
// pair of ranks gets its own zero-capacity (rendezvous) channel, so a send
// only completes once the matching receive is posted, and messages between
// the same pair are delivered in send order.
pub enum Message {
    Scalar(i64),
    Longs(Vec<i64>),
}

pub struct Substrate {
    rank: usize,
    world: usize,
    barrier: Arc<Barrier>,
    // outgoing[j] is this rank's sender to rank j (None at j == rank).
    outgoing: Vec<Option<Sender<Message>>>,
    // incoming[i] is this rank's receiver from rank i (None at i == rank).
    incoming: Vec<Option<Receiver<Message>>>,
}

impl Substrate {
    // Reads world size the way a process launched under `mpirun -np P`
    // would read it from its environment; falls back to the number of
    // logical CPUs when no launcher set it. See `SPEC_FULL.md` §2.
    pub fn world_size_from_env() -> usize {
        std::env::var("PSRS_WORLD_SIZE")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|&n| n > 0)
            .unwrap_or_else(num_cpus::get)
    }

    // Spawns `world` ranks (as scoped threads when `world > 1`, or runs
    // directly on the caller's thread when `world == 1`) and runs `body` on
    // each, returning every rank's result ordered by rank.
    pub fn run<F, T>(world: usize, body: F) -> Result<Vec<T>, PsrsError>
    where
        F: Fn(RunContext) -> Result<T, PsrsError> + Sync,
        T: Send,
    {
        if world == 0 {
            return Err(PsrsError::ConfigInvalid(
                "world size must be at least 1".to_string(),
            ));
        }

        if world == 1 {
            let ctx = RunContext {
                rank: 0,
                world: 1,
                substrate: None,
            };
            return Ok(vec![body(ctx)?]);
        }

        let barrier = Arc::new(Barrier::new(world));
        let mut outgoing: Vec<Vec<Option<Sender<Message>>>> =
            (0..world).map(|_| (0..world).map(|_| None).collect()).collect();
        let mut incoming: Vec<Vec<Option<Receiver<Message>>>> =
            (0..world).map(|_| (0..world).map(|_| None).collect()).collect();

        for i in 0..world {
            for j in 0..world {
                if i == j {
                    continue;
                }
                let (tx, rx) = bounded::<Message>(0);
                outgoing[i][j] = Some(tx);
                incoming[j][i] = Some(rx);
            }
        }

        let substrates: Vec<Substrate> = (0..world)
            .map(|r| Substrate {
                rank: r,
                world,
                barrier: barrier.clone(),
                outgoing: std::mem::take(&mut outgoing[r]),
                incoming: std::mem::take(&mut incoming[r]),
            })
            .collect();

        let results = crossbeam::thread::scope(|scope| {
            let body_ref = &body;
            let handles: Vec<_> = substrates
                .into_iter()
                .map(|substrate| {
                    let rank = substrate.rank;
                    scope.spawn(move |_| {
                        let ctx = RunContext {
                            rank,
                            world,
                            substrate: Some(substrate),
                        };
                        body_ref(ctx)
                    })
                })
                .collect();

            handles
                .into_iter()
                .map(|h| h.join().expect("worker thread panicked"))
                .collect::<Vec<Result<T, PsrsError>>>()
        })
        .map_err(|_| PsrsError::AllocFailure("failed to join worker threads".to_string()))?;

        results.into_iter().collect()
    }
}

// Immutable per-rank handle threaded through every phase function, in place
// of the original program's file-scope globals for thread count, array
// length, and the shared barrier (see the Design Note in `spec.md` §9).
pub struct RunContext {
    rank: usize,
    world: usize,
    substrate: Option<Substrate>,
}

impl RunContext {
    pub fn rank(&self) -> usize {
        self.rank
    }

    pub fn world_size(&self) -> usize {
        self.world
    }

    pub fn is_root(&self) -> bool {
        self.rank == 0
    }

    pub fn now(&self) -> f64 {
        now()
    }

    pub fn barrier(&self) {
        if let Some(substrate) = &self.substrate {
            substrate.barrier.wait();
        }
    }

    pub fn send_sync(&self, dst: usize, msg: Message) -> Result<(), PsrsError> {
        let substrate = self.require_substrate()?;
        let sender = substrate.outgoing[dst].as_ref().ok_or_else(|| {
            PsrsError::ProtocolViolation(format!("no outgoing channel to rank {dst}"))
        })?;
        sender
            .send(msg)
            .map_err(|_| PsrsError::ProtocolViolation(format!("rank {dst} is gone")))
    }

    pub fn recv(&self, src: usize) -> Result<Message, PsrsError> {
        let substrate = self.require_substrate()?;
        let receiver = substrate.incoming[src].as_ref().ok_or_else(|| {
            PsrsError::ProtocolViolation(format!("no incoming channel from rank {src}"))
        })?;
        receiver
            .recv()
            .map_err(|_| PsrsError::ProtocolViolation(format!("rank {src} is gone")))
    }

    fn recv_longs(&self, src: usize) -> Result<Vec<i64>, PsrsError> {
        match self.recv(src)? {
            Message::Longs(v) => Ok(v),
            Message::Scalar(_) => Err(PsrsError::ProtocolViolation(
                "expected a long stream, received a scalar".to_string(),
            )),
        }
    }

    fn recv_scalar(&self, src: usize) -> Result<i64, PsrsError> {
        match self.recv(src)? {
            Message::Scalar(v) => Ok(v),
            Message::Longs(_) => Err(PsrsError::ProtocolViolation(
                "expected a scalar, received a long stream".to_string(),
            )),
        }
    }

    // Announces the element count, then the elements; the receiver's size
    // check (§4.5) happens in `recv_sized_longs`.
    pub fn send_sized_longs(&self, dst: usize, payload: Vec<i64>) -> Result<(), PsrsError> {
        let size = payload.len() as i64;
        self.send_sync(dst, Message::Scalar(size))?;
        self.send_sync(dst, Message::Longs(payload))
    }

    pub fn recv_sized_longs(&self, src: usize) -> Result<Vec<i64>, PsrsError> {
        let announced = self.recv_scalar(src)?;
        let payload = self.recv_longs(src)?;
        if payload.len() as i64 != announced {
            return Err(PsrsError::ProtocolViolation(format!(
                "rank {src} announced {announced} elements but sent {}",
                payload.len()
            )));
        }
        Ok(payload)
    }

    pub fn scatter_root(&self, mut chunks: Vec<Vec<i64>>) -> Result<Vec<i64>, PsrsError> {
        debug_assert!(self.is_root());
        let mine = std::mem::take(&mut chunks[self.rank]);
        for j in 0..self.world {
            if j == self.rank {
                continue;
            }
            let payload = std::mem::take(&mut chunks[j]);
            self.send_sync(j, Message::Longs(payload))?;
        }
        Ok(mine)
    }

    pub fn scatter_follower(&self, root: usize) -> Result<Vec<i64>, PsrsError> {
        self.recv_longs(root)
    }

    pub fn gather_root(&self, local: Vec<i64>) -> Result<Vec<Vec<i64>>, PsrsError> {
        debug_assert!(self.is_root());
        let mut out: Vec<Vec<i64>> = vec![Vec::new(); self.world];
        out[self.rank] = local;
        for j in 0..self.world {
            if j == self.rank {
                continue;
            }
            out[j] = self.recv_longs(j)?;
        }
        Ok(out)
    }

    pub fn gather_follower(&self, root: usize, local: Vec<i64>) -> Result<(), PsrsError> {
        self.send_sync(root, Message::Longs(local))
    }

    pub fn bcast_root(&self, payload: Vec<i64>) -> Result<Vec<i64>, PsrsError> {
        debug_assert!(self.is_root());
        for j in 0..self.world {
            if j == self.rank {
                continue;
            }
            self.send_sync(j, Message::Longs(payload.clone()))?;
        }
        Ok(payload)
    }

    pub fn bcast_follower(&self, root: usize) -> Result<Vec<i64>, PsrsError> {
        self.recv_longs(root)
    }

    pub fn reduce_sum_root(&self, local: i64) -> Result<i64, PsrsError> {
        debug_assert!(self.is_root());
        let mut total = local;
        for j in 0..self.world {
            if j == self.rank {
                continue;
            }
            total += self.recv_scalar(j)?;
        }
        Ok(total)
    }

    pub fn reduce_sum_follower(&self, root: usize, local: i64) -> Result<(), PsrsError> {
        self.send_sync(root, Message::Scalar(local))
    }

    // Fatal error path: any invariant violation, protocol mismatch, or
    // allocation failure aborts the whole run. There is no retry and no
    // partial result (`spec.md` §5, §7).
    pub fn abort_group(&self, err: &PsrsError, code: i32) -> ! {
        log::error!("rank {} aborting the run: {err}", self.rank);
        std::process::exit(code);
    }

    // Every fallible call on the parallel path goes through this instead of
    // `?`: a `Result` returned by one rank's worker closure would make that
    // rank return early and skip its remaining barriers, which hangs every
    // other rank at the next `barrier()`/`recv()` forever rather than
    // failing the run (`spec.md` §5 "aborts the entire collective", §7 "all
    // errors on worker-parallel paths are fatal and call group-abort").
    // `abort_group` never returns, so this collapses `Result<T, PsrsError>`
    // to a plain `T`.
    pub fn unwrap_or_abort<T>(&self, result: Result<T, PsrsError>) -> T {
        result.unwrap_or_else(|err| self.abort_group(&err, err.exit_code()))
    }

    fn require_substrate(&self) -> Result<&Substrate, PsrsError> {
        self.substrate.as_ref().ok_or_else(|| {
            PsrsError::ProtocolViolation(
                "point-to-point communication attempted with world size 1".to_string(),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_rank_runs_directly_without_spawning() {
        let results = Substrate::run(1, |ctx| {
            assert_eq!(ctx.rank(), 0);
            assert_eq!(ctx.world_size(), 1);
            Ok(42)
        })
        .unwrap();
        assert_eq!(results, vec![42]);
    }

    #[test]
    fn barrier_and_scatter_gather_round_trip() {
        let world = 4;
        let results = Substrate::run(world, |ctx| {
            ctx.barrier();
            let received = if ctx.is_root() {
                let chunks: Vec<Vec<i64>> = (0..ctx.world_size())
                    .map(|r| vec![r as i64, r as i64 * 10])
                    .collect();
                ctx.scatter_root(chunks)?
            } else {
                ctx.scatter_follower(0)?
            };
            ctx.barrier();

            let gathered = if ctx.is_root() {
                ctx.gather_root(received.clone())?
            } else {
                ctx.gather_follower(0, received.clone())?;
                Vec::new()
            };

            Ok((ctx.rank(), received, gathered))
        })
        .unwrap();

        for (rank, received, _) in &results {
            assert_eq!(received, &vec![*rank as i64, *rank as i64 * 10]);
        }

        let (_, _, gathered_at_root) = &results[0];
        for r in 0..world {
            assert_eq!(gathered_at_root[r], vec![r as i64, r as i64 * 10]);
        }
    }

    #[test]
    fn sized_longs_round_trip_detects_mismatch() {
        let results = Substrate::run(2, |ctx| {
            if ctx.is_root() {
                ctx.send_sized_longs(1, vec![1, 2, 3])?;
            } else {
                let v = ctx.recv_sized_longs(0)?;
                assert_eq!(v, vec![1, 2, 3]);
            }
            Ok(())
        });
        assert!(results.is_ok());
    }

    #[test]
    fn reduce_sum_totals_every_rank() {
        let world = 5;
        let results = Substrate::run(world, |ctx| {
            let local = ctx.rank() as i64 + 1;
            if ctx.is_root() {
                ctx.reduce_sum_root(local)
            } else {
                ctx.reduce_sum_follower(0, local)?;
                Ok(0)
            }
        })
        .unwrap();
        assert_eq!(results[0], (1..=world as i64).sum::<i64>());
    }
}
