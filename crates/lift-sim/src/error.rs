use lift_core::{CoreError, ElevatorId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("building is closed for new requests")]
    Closed,

    #[error("elevator {0} was already started")]
    AlreadyStarted(ElevatorId),

    #[error("elevator {0} worker thread panicked")]
    WorkerPanicked(ElevatorId),

    #[error("request producer thread panicked")]
    ProducerPanicked,

    #[error("failed to spawn worker thread for elevator {0}: {1}")]
    Spawn(ElevatorId, #[source] std::io::Error),

    #[error("simulation configuration error: {0}")]
    Config(String),
}

pub type SimResult<T> = Result<T, SimError>;
