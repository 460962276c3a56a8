//! Random draws consumed by the tick gate and the growth/drop policy.
//!
//! Every probabilistic decision goes through [`RandomSource`] so the same
//! seed (or the same scripted sequence) replays the same effects.

use std::collections::VecDeque;

/// Source of uniform random draws.
pub trait RandomSource {
    /// Draw a value uniformly from `[low, high)`.
    ///
    /// Implementations must return `low` when `low == high`.
    fn uniform(&mut self, low: f64, high: f64) -> f64;
}

impl RandomSource for fastrand::Rng {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        low + self.f64() * (high - low)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        (**self).uniform(low, high)
    }
}

/// Fraction used once a [`ScriptedRandom`] runs out of scripted values.
const DEFAULT_FALLBACK: f64 = 0.5;

/// Replays a fixed list of unit fractions.
///
/// Each draw takes the next fraction `f` in `[0, 1]` and maps it onto the
/// requested range as `low + f * (high - low)`. When the script is empty the
/// fallback fraction is used.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    fractions: VecDeque<f64>,
    fallback: f64,
    draws: usize,
}

impl ScriptedRandom {
    /// Create a source that replays `fractions` in order.
    pub fn new(fractions: impl IntoIterator<Item = f64>) -> Self {
        Self {
            fractions: fractions.into_iter().map(|f| f.clamp(0.0, 1.0)).collect(),
            fallback: DEFAULT_FALLBACK,
            draws: 0,
        }
    }

    /// Set the fraction returned after the script is exhausted.
    #[must_use]
    pub fn with_fallback(mut self, fallback: f64) -> Self {
        self.fallback = fallback.clamp(0.0, 1.0);
        self
    }

    /// Number of draws taken so far.
    #[must_use]
    pub fn draws(&self) -> usize {
        self.draws
    }

    /// Number of scripted fractions not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.fractions.len()
    }
}

impl RandomSource for ScriptedRandom {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        self.draws += 1;
        let fraction = self.fractions.pop_front().unwrap_or(self.fallback);
        low + fraction * (high - low)
    }
}
