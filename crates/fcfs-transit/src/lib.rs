//! `fcfs-transit` — the entities the bus simulation moves around.
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`passenger`]   | `Passenger`, `PassengerState` lifecycle               |
//! | [`stops`]       | `StopRegistry`: fixed cyclic list of stop positions  |
//! | [`bus`]         | `Bus`, `BusState`, `BusStep`: dwell/travel + FCFS    |
//! | [`error`]       | `TransitError`, `TransitResult`                       |
//!
//! # Completion rule
//!
//! A passenger completes only when the bus dwells at its destination stop.
//! The ride duration drawn at spawn is advisory: it counts down while the
//! passenger is onboard and drives the progress fraction, but reaching zero
//! does not drop anyone off.

pub mod bus;
pub mod error;
pub mod passenger;
pub mod stops;


pub use bus::{Bus, BusState, BusStep};
pub use error::{TransitError, TransitResult};
pub use passenger::{Passenger, PassengerState};
pub use stops::StopRegistry;
