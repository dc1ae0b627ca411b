//! Seeded sampler with bounded retries.
//!
//! Outside a `proptest!` block there is no framework to redraw rejected
//! samples, so the sampler does it explicitly: draw a candidate, check it,
//! and give up with [`Error::Exhausted`] after `max_attempts`.

use crate::delta::{delta_components, DeltaComponents};
use crate::error::{Error, Result};
use crate::instruments::{offline_instruments, online_instruments};
use crate::interval::{interval_candidate, TimeWindow};
use fido_attrs::{Attr, Time};
use proptest::strategy::{Strategy, ValueTree};
use proptest::test_runner::{Config, RngAlgorithm, TestRng, TestRunner};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace, warn};

/// Configuration for the sampler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamplerConfig {
    /// Master seed for all randomness.
    pub seed: u64,
    /// Candidates drawn per sample before giving up. Always at least 1.
    pub max_attempts: usize,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            max_attempts: 1000,
        }
    }
}

impl SamplerConfig {
    /// Creates a new config with the given seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the retry bound. Zero is raised to one.
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }
}

/// Deterministic sample source. The same seed yields the same samples.
pub struct Sampler {
    config: SamplerConfig,
    runner: TestRunner,
}

impl Sampler {
    /// Creates a sampler with the given configuration.
    #[must_use]
    pub fn new(config: SamplerConfig) -> Self {
        let mut seed = [0u8; 32];
        ChaCha8Rng::seed_from_u64(config.seed).fill_bytes(&mut seed);
        let rng = TestRng::from_seed(RngAlgorithm::ChaCha, &seed);
        let runner = TestRunner::new_with_rng(Config::default(), rng);

        debug!(
            seed = config.seed,
            max_attempts = config.max_attempts,
            "sampler created"
        );
        Self { config, runner }
    }

    /// The configuration this sampler was built with.
    pub const fn config(&self) -> &SamplerConfig {
        &self.config
    }

    fn draw<S: Strategy>(&mut self, strategy: &S) -> Result<S::Value> {
        strategy
            .new_tree(&mut self.runner)
            .map(|tree| tree.current())
            .map_err(|reason| Error::Generation(reason.to_string()))
    }

    /// Draws per-unit duration magnitudes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Generation`] if the strategy fails.
    pub fn delta(&mut self) -> Result<DeltaComponents> {
        self.draw(&delta_components())
    }

    /// Draws an instrument selector that works offline.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Generation`] if the strategy fails.
    pub fn offline_instrument(&mut self) -> Result<Attr> {
        self.draw(&offline_instruments())
    }

    /// Draws an instrument selector that needs the network.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Generation`] if the strategy fails.
    pub fn online_instrument(&mut self) -> Result<Attr> {
        self.draw(&online_instruments())
    }

    /// Draws a time attribute accepted by `window`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidWindow`] if `window` is invalid, or
    /// [`Error::Exhausted`] if every candidate within `max_attempts` was rejected.
    pub fn time(&mut self, window: &TimeWindow) -> Result<Time> {
        window.validate()?;
        let candidate = interval_candidate(window);
        let attempts = self.config.max_attempts;

        let mut last = None;
        for attempt in 1..=attempts {
            let range = self.draw(&candidate)?;
            match window.check(range.start(), range.end()) {
                Ok(()) => {
                    trace!(attempt, %range, "interval accepted");
                    return Ok(Time::from(range));
                }
                Err(rejection) => {
                    trace!(attempt, %rejection, "interval rejected");
                    last = Some(rejection);
                }
            }
        }

        match last {
            Some(last) => {
                warn!(attempts, %last, "no acceptable interval");
                Err(Error::Exhausted { attempts, last })
            }
            None => Err(Error::Generation("no attempts were made".to_string())),
        }
    }

    /// Draws a time attribute from the default window.
    ///
    /// # Errors
    ///
    /// See [`Sampler::time`].
    pub fn time_attr(&mut self) -> Result<Time> {
        self.time(&TimeWindow::default())
    }

    /// Draws a time attribute GOES can serve.
    ///
    /// # Errors
    ///
    /// See [`Sampler::time`].
    pub fn goes_time(&mut self) -> Result<Time> {
        self.time(&TimeWindow::goes())
    }

    /// Draws a time attribute RHESSI can serve.
    ///
    /// # Errors
    ///
    /// See [`Sampler::time`].
    pub fn rhessi_time(&mut self) -> Result<Time> {
        self.time(&TimeWindow::rhessi())
    }
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new(SamplerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::{goes_data_gap, rhessi_commissioned, Rejection};
    use chrono::NaiveDateTime;
    use fido_attrs::parse_time;

    fn at(s: &str) -> NaiveDateTime {
        parse_time(s).unwrap()
    }

    fn pinned() -> TimeWindow {
        TimeWindow::goes().at(at("2024-06-01T12:00:00"))
    }

    #[test]
    fn same_seed_same_samples() {
        let config = SamplerConfig::default().with_seed(7);
        let mut a = Sampler::new(config.clone());
        let mut b = Sampler::new(config);

        for _ in 0..20 {
            assert_eq!(a.time(&pinned()).unwrap(), b.time(&pinned()).unwrap());
            assert_eq!(a.offline_instrument().unwrap(), b.offline_instrument().unwrap());
            assert_eq!(a.delta().unwrap(), b.delta().unwrap());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = Sampler::new(SamplerConfig::default().with_seed(1));
        let mut b = Sampler::new(SamplerConfig::default().with_seed(2));

        let left: Vec<_> = (0..10).map(|_| a.time(&pinned()).unwrap()).collect();
        let right: Vec<_> = (0..10).map(|_| b.time(&pinned()).unwrap()).collect();
        assert_ne!(left, right);
    }

    #[test]
    fn goes_samples_avoid_the_gap() {
        let mut sampler = Sampler::default();
        for _ in 0..200 {
            let time = sampler.goes_time().unwrap();
            assert!(!time.range().contains(goes_data_gap()));
            assert!(time.start() >= at("1981-01-01"));
        }
    }

    #[test]
    fn rhessi_samples_follow_commissioning() {
        let mut sampler = Sampler::new(SamplerConfig::default().with_seed(99));
        for _ in 0..200 {
            let time = sampler.rhessi_time().unwrap();
            assert!(time.start() > rhessi_commissioned());
        }
    }

    #[test]
    fn start_limit_beyond_window_exhausts() {
        let window = TimeWindow::new(1990)
            .with_max_year(1990)
            .at(at("2100-01-01"))
            .starting_after(at("2050-01-01"));
        let mut sampler = Sampler::new(SamplerConfig::default().with_max_attempts(25));

        match sampler.time(&window) {
            Err(Error::Exhausted { attempts, last }) => {
                assert_eq!(attempts, 25);
                assert!(matches!(last, Rejection::StartTooEarly { .. }));
            }
            other => panic!("expected exhaustion, got {other:?}"),
        }
    }

    #[test]
    fn invalid_window_is_reported_not_panicked() {
        let mut sampler = Sampler::default();
        let window = TimeWindow::new(2010).with_max_year(2000);
        assert!(matches!(sampler.time(&window), Err(Error::InvalidWindow(_))));
    }

    #[test]
    fn zero_attempts_is_raised_to_one() {
        assert_eq!(SamplerConfig::default().with_max_attempts(0).max_attempts, 1);
    }

    #[test]
    fn instruments_come_from_their_lists() {
        let mut sampler = Sampler::default();
        for _ in 0..50 {
            let online = sampler.online_instrument().unwrap();
            assert_eq!(online.instruments(), vec!["rhessi"]);
            let offline = sampler.offline_instrument().unwrap();
            assert!(!offline.instruments().contains(&"rhessi"));
        }
    }
}
