//! Optional skip-unchanged-write layer for output channels.

use crate::error::SignalsError;

/// Default minimum change for a channel to be written again.
pub const DEFAULT_CACHE_TOLERANCE: f64 = 1e-6;

/// Remembers the last value written to each output channel.
///
/// Sits between a solver's output array and whatever applies the values
/// (e.g. mesh blendshape channels) so unchanged channels are not rewritten
/// every frame. Purely an optimisation: writing every channel every frame
/// gives the same visible result.
///
/// # Example
///
/// ```
/// use facerig_signals::OutputCache;
///
/// let mut cache = OutputCache::new(3);
/// let mut writes = Vec::new();
/// cache.update(&[0.0, 0.5, 1.0], |i, v| writes.push((i, v))).unwrap();
/// assert_eq!(writes.len(), 3); // first frame writes everything
///
/// writes.clear();
/// cache.update(&[0.0, 0.6, 1.0], |i, v| writes.push((i, v))).unwrap();
/// assert_eq!(writes, [(1, 0.6)]);
/// ```
#[derive(Debug, Clone)]
pub struct OutputCache {
    last: Vec<f64>,
    tolerance: f64,
    primed: bool,
}

impl OutputCache {
    /// Creates a cache for `len` channels with [`DEFAULT_CACHE_TOLERANCE`].
    pub fn new(len: usize) -> Self {
        Self {
            last: vec![0.0; len],
            tolerance: DEFAULT_CACHE_TOLERANCE,
            primed: false,
        }
    }

    /// Sets the minimum absolute change that triggers a write.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Number of channels.
    pub fn len(&self) -> usize {
        self.last.len()
    }

    /// Returns `true` if the cache tracks no channels.
    pub fn is_empty(&self) -> bool {
        self.last.is_empty()
    }

    /// Last value written per channel.
    pub fn last(&self) -> &[f64] {
        &self.last
    }

    /// Forgets the cached values so the next [`OutputCache::update`] writes every channel.
    pub fn reset(&mut self) {
        self.primed = false;
    }

    /// Calls `write(index, value)` for every channel whose value moved by more
    /// than the tolerance since it was last written, and returns how many
    /// channels were written.
    ///
    /// # Errors
    ///
    /// Returns [`SignalsError::LengthMismatch`] if `values` does not have one
    /// entry per channel.
    pub fn update<F>(&mut self, values: &[f64], mut write: F) -> Result<usize, SignalsError>
    where
        F: FnMut(usize, f64),
    {
        if values.len() != self.last.len() {
            return Err(SignalsError::LengthMismatch {
                expected: self.last.len(),
                got: values.len(),
                field: "output values",
            });
        }
        let mut written = 0;
        for (i, (&v, last)) in values.iter().zip(self.last.iter_mut()).enumerate() {
            if !self.primed || (v - *last).abs() > self.tolerance {
                write(i, v);
                *last = v;
                written += 1;
            }
        }
        self.primed = true;
        Ok(written)
    }
}
