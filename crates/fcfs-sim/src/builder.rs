//! Fluent builder for constructing a [`Simulation`].

use fcfs_core::SimConfig;

use crate::{SimResult, Simulation};

/// Fluent builder for [`Simulation`].
///
/// # Optional overrides
///
/// | Method               | Default                   |
/// |----------------------|---------------------------|
/// | `.seed(s)`           | `config.seed`             |
/// | `.auto_generate(b)`  | `config.auto_generate`    |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config)
///     .seed(7)
///     .auto_generate(false)
///     .build()?;
/// ```
pub struct SimBuilder {
    config:        SimConfig,
    seed:          Option<u64>,
    auto_generate: Option<bool>,
}

impl SimBuilder {
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            seed:          None,
            auto_generate: None,
        }
    }

    /// Override the RNG seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Start with automatic generation on or off.  Reset restores this.
    pub fn auto_generate(mut self, enabled: bool) -> Self {
        self.auto_generate = Some(enabled);
        self
    }

    /// Apply overrides, validate the configuration, and return a
    /// ready-to-run [`Simulation`] at tick 0.
    pub fn build(self) -> SimResult<Simulation> {
        let mut config = self.config;
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(enabled) = self.auto_generate {
            config.auto_generate = enabled;
        }
        Simulation::from_config(config)
    }
}
