//! `fcfs-core` — foundational types for the `fcfs-bus` simulation.
//!
//! Every other `fcfs-*` crate depends on this one.  It has no `fcfs-*`
//! dependencies and only `rand` and `thiserror` externally (plus optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                       |
//! |--------------|------------------------------------------------|
//! | [`ids`]      | `PassengerId`, `StopIndex`                     |
//! | [`time`]     | `Tick`, `SimClock`                             |
//! | [`config`]   | `SimConfig` and its validation                 |
//! | [`rng`]      | `SimRng` (seedable, single-threaded)           |
//! | [`error`]    | `CoreError`, `CoreResult`                      |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::SimConfig;
pub use error::{CoreError, CoreResult};
pub use ids::{PassengerId, StopIndex};
pub use rng::SimRng;
pub use time::{SimClock, Tick};
