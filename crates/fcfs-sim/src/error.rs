use fcfs_core::CoreError;
use fcfs_transit::TransitError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    /// Manual injection requested at or after the generation cutoff.  The
    /// request is declined; the simulation is unaffected.
    #[error("passenger generation closed at {cutoff_secs:.1} s (clock is {now_secs:.2} s)")]
    GenerationClosed { now_secs: f64, cutoff_secs: f64 },

    #[error("simulation configuration error: {0}")]
    Config(#[from] CoreError),

    #[error("transit error: {0}")]
    Transit(#[from] TransitError),
}

pub type SimResult<T> = Result<T, SimError>;
