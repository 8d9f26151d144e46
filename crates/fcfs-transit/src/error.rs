use fcfs_core::{CoreError, PassengerId, StopIndex};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransitError {
    #[error("passenger {id} has origin and destination both at {stop}")]
    SameOriginAndDestination { id: PassengerId, stop: StopIndex },

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type TransitResult<T> = Result<T, TransitError>;
