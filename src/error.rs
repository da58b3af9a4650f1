use thiserror::Error;

// Error taxonomy for the PSRS driver. Parallel-path failures are fatal and
// routed to `Substrate::abort_group`; the sequential baseline instead
// returns these to its caller for ordinary `Result` propagation.
#[derive(Error, Debug)]
pub enum PsrsError {
    #[error("invalid configuration: {0}")]
    ConfigInvalid(String),

    #[error("allocation failure: {0}")]
    AllocFailure(String),

    #[error("protocol violation: {0}")]
    ProtocolViolation(String),

    #[error("precondition violation: {0}")]
    PreconditionViolation(String),
}

impl PsrsError {
    // The one place the exit-code scheme of `spec.md` §6.3 is decided, so
    // `main.rs` (CLI validation failures) and `Substrate::abort_group`
    // (in-run fatal aborts) always agree on the same mapping.
    pub fn exit_code(&self) -> i32 {
        match self {
            PsrsError::ConfigInvalid(_) => 1,
            PsrsError::PreconditionViolation(_) => 1,
            PsrsError::ProtocolViolation(_) => 2,
            PsrsError::AllocFailure(_) => 3,
        }
    }
}

pub type PsrsResult<T> = Result<T, PsrsError>;
