//! The fixed, cyclic list of stops.

use fcfs_core::{CoreError, CoreResult, SimRng, StopIndex};

/// Stop positions along the route axis, indexed by [`StopIndex`].
///
/// After the last stop the bus returns to the first.  The registry is
/// immutable once built; it always holds at least two stops so that every
/// passenger has somewhere else to go.
#[derive(Clone, Debug, PartialEq)]
pub struct StopRegistry {
    positions: Vec<f64>,
}

impl StopRegistry {
    pub fn new(positions: Vec<f64>) -> CoreResult<Self> {
        if positions.len() < 2 {
            return Err(CoreError::Config(format!(
                "route needs at least 2 stops, got {}",
                positions.len()
            )));
        }
        if positions.len() > u16::MAX as usize {
            return Err(CoreError::Config("too many stops".into()));
        }
        Ok(Self { positions })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Position of `stop`, or an error if it is not on the route.
    pub fn position(&self, stop: StopIndex) -> CoreResult<f64> {
        self.positions
            .get(stop.index())
            .copied()
            .ok_or(CoreError::StopOutOfRange { index: stop, count: self.len() })
    }

    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    /// The stop visited after `stop`, wrapping to the first.
    #[inline]
    pub fn next(&self, stop: StopIndex) -> StopIndex {
        StopIndex(((stop.index() + 1) % self.len()) as u16)
    }

    pub fn indices(&self) -> impl Iterator<Item = StopIndex> + '_ {
        (0..self.len()).map(|i| StopIndex(i as u16))
    }

    /// Uniformly random stop.
    pub fn random_stop(&self, rng: &mut SimRng) -> StopIndex {
        StopIndex(rng.gen_range(0..self.len()) as u16)
    }

    /// Uniformly random stop other than `origin`.
    pub fn random_destination(&self, rng: &mut SimRng, origin: StopIndex) -> StopIndex {
        let others: Vec<StopIndex> = self.indices().filter(|&s| s != origin).collect();
        // At least two stops, so `others` is never empty.
        rng.choose(&others).copied().unwrap_or_else(|| self.next(origin))
    }
}
