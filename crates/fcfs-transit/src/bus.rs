//! The bus: a two-state machine (moving / loading) that owns its riders and
//! admits waiting passengers first-come-first-served.

use fcfs_core::{PassengerId, SimConfig, StopIndex, Tick};
use tracing::debug;

use crate::{Passenger, PassengerState, StopRegistry, TransitResult};

/// What the bus is doing this tick.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BusState {
    /// Travelling toward the current target stop.
    #[default]
    Moving,
    /// Dwelling at a stop: unloading and boarding every tick until the dwell
    /// timer runs out.
    Loading,
}

impl BusState {
    pub fn as_str(self) -> &'static str {
        match self {
            BusState::Moving  => "moving",
            BusState::Loading => "loading",
        }
    }
}

impl std::fmt::Display for BusState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything that happened to the bus during one [`Bus::update`].
#[derive(Debug, Default)]
pub struct BusStep {
    /// Set on the tick the bus pulls into a stop.
    pub arrived_at:    Option<StopIndex>,
    /// Passengers dropped off this tick, already `Completed`.  Ownership
    /// passes to the caller, which appends them to the history.
    pub dropped_off:   Vec<Passenger>,
    /// Passengers admitted this tick, in boarding (FCFS) order.
    pub boarded:       Vec<PassengerId>,
    /// Set on the tick the dwell timer expires.
    pub departed_from: Option<StopIndex>,
}

/// The single bus on the route.
///
/// Created heading for stop 0 from `SimConfig::bus_start_position`.
#[derive(Clone, Debug)]
pub struct Bus {
    capacity:    usize,
    speed:       f64,
    tolerance:   f64,
    dwell_ticks: u64,

    position:        f64,
    target:          f64,
    current_stop:    StopIndex,
    state:           BusState,
    dwell_remaining: u64,
    busy_ticks:      u64,
    onboard:         Vec<Passenger>,
    served:          u64,
}

impl Bus {
    pub fn new(config: &SimConfig, stops: &StopRegistry) -> TransitResult<Self> {
        let first = StopIndex(0);
        Ok(Self {
            capacity:        config.bus_capacity,
            speed:           config.bus_speed,
            tolerance:       config.arrival_tolerance,
            dwell_ticks:     config.dwell_ticks(),
            position:        config.bus_start_position,
            target:          stops.position(first)?,
            current_stop:    first,
            state:           BusState::Moving,
            dwell_remaining: 0,
            busy_ticks:      0,
            onboard:         Vec::with_capacity(config.bus_capacity),
            served:          0,
        })
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn state(&self) -> BusState {
        self.state
    }

    /// The stop the bus is heading to or dwelling at.
    pub fn current_stop(&self) -> StopIndex {
        self.current_stop
    }

    pub fn onboard(&self) -> &[Passenger] {
        &self.onboard
    }

    pub fn onboard_mut(&mut self) -> &mut [Passenger] {
        &mut self.onboard
    }

    pub fn free_seats(&self) -> usize {
        self.capacity.saturating_sub(self.onboard.len())
    }

    /// Ticks left in the current dwell; zero while moving.
    pub fn dwell_remaining(&self) -> u64 {
        self.dwell_remaining
    }

    /// Ticks spent moving since the run began.
    pub fn busy_ticks(&self) -> u64 {
        self.busy_ticks
    }

    /// Total passengers dropped off.
    pub fn served(&self) -> u64 {
        self.served
    }

    // ── State machine ─────────────────────────────────────────────────────

    /// Advance the bus by one tick.
    ///
    /// `waiting` is the simulation's waiting set.  Boarded passengers are
    /// moved out of it into the bus; its order is not meaningful.
    pub fn update(
        &mut self,
        now:       Tick,
        tick_secs: f64,
        stops:     &StopRegistry,
        waiting:   &mut Vec<Passenger>,
    ) -> TransitResult<BusStep> {
        let mut step = BusStep::default();

        match self.state {
            BusState::Moving => {
                let dx = self.target - self.position;
                if dx.abs() > self.tolerance {
                    // Never overshoot the stop, however coarse the tick.
                    let travel = (self.speed * tick_secs).min(dx.abs());
                    self.position += travel.copysign(dx);
                    self.busy_ticks += 1;
                } else {
                    self.position = self.target;
                    self.state = BusState::Loading;
                    self.dwell_remaining = self.dwell_ticks;
                    step.arrived_at = Some(self.current_stop);
                    debug!(%now, stop = %self.current_stop, onboard = self.onboard.len(), "bus arrived");
                }
            }

            BusState::Loading => {
                self.dwell_remaining = self.dwell_remaining.saturating_sub(1);

                step.dropped_off = self.unload(now);
                step.boarded = self.board(now, waiting);

                if self.dwell_remaining == 0 {
                    let from = self.current_stop;
                    self.current_stop = stops.next(from);
                    self.target = stops.position(self.current_stop)?;
                    self.state = BusState::Moving;
                    step.departed_from = Some(from);
                    debug!(%now, %from, to = %self.current_stop, onboard = self.onboard.len(), "bus departed");
                }
            }
        }

        Ok(step)
    }

    /// Drop off everyone whose destination is the current stop.
    fn unload(&mut self, now: Tick) -> Vec<Passenger> {
        let stop = self.current_stop;
        if !self.onboard.iter().any(|p| p.destination == stop) {
            return vec![];
        }

        let (mut leaving, staying): (Vec<Passenger>, Vec<Passenger>) =
            std::mem::take(&mut self.onboard)
                .into_iter()
                .partition(|p| p.destination == stop);
        self.onboard = staying;

        for p in &mut leaving {
            p.complete(now);
            debug!(%now, passenger = %p.id, %stop, "dropped off");
        }
        self.served += leaving.len() as u64;
        leaving
    }

    /// Admit waiting passengers at the current stop in `(arrival, id)` order
    /// until the bus is full.  Whoever does not fit keeps waiting for the
    /// next visit.
    fn board(&mut self, now: Tick, waiting: &mut Vec<Passenger>) -> Vec<PassengerId> {
        let free = self.free_seats();
        if free == 0 {
            return vec![];
        }

        let stop = self.current_stop;
        let mut queue: Vec<(Tick, PassengerId)> = waiting
            .iter()
            .filter(|p| p.origin == stop && p.state() == PassengerState::Waiting)
            .map(Passenger::fcfs_key)
            .collect();
        queue.sort_unstable();

        let mut boarded = Vec::with_capacity(free.min(queue.len()));
        for (_, id) in queue.into_iter().take(free) {
            let Some(pos) = waiting.iter().position(|p| p.id == id) else {
                continue;
            };
            let mut passenger = waiting.swap_remove(pos);
            passenger.board(now);
            debug!(%now, passenger = %id, %stop, "boarded");
            boarded.push(id);
            self.onboard.push(passenger);
        }
        boarded
    }
}
