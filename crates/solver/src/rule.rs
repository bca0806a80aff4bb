//! Rules and their tent-shaped activation response.

/// Signals within this distance of a driver's peak count as fully active.
pub const PEAK_TOLERANCE: f64 = 1e-4;

/// One driver or target contribution inside a [`Rule`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Item {
    /// Signal id (for drivers) or output id (for targets).
    pub index: usize,
    /// Peak weight (for drivers) or output weight at the peak (for targets).
    pub weight: f64,
}

impl Item {
    /// Creates an item.
    pub fn new(index: usize, weight: f64) -> Self {
        Self { index, weight }
    }

    /// Triangular response of this driver to `signal`.
    ///
    /// Rises linearly from 0 at `signal = 0` to 1 at `signal = weight`, then
    /// falls linearly to 0 at `signal = 1`. A peak at 0 or 1 makes the
    /// corresponding side a constant 1 at the boundary.
    #[inline]
    pub fn eval(&self, signal: f64) -> f64 {
        let peak = self.weight;
        if (signal - peak).abs() < PEAK_TOLERANCE {
            1.0
        } else if signal <= peak {
            if peak > 0.0 { signal / peak } else { 0.0 }
        } else if peak < 1.0 {
            (1.0 - signal) / (1.0 - peak)
        } else {
            0.0
        }
    }
}

/// "When these drivers reach these peaks, drive these targets to these weights."
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    drivers: Vec<Item>,
    targets: Vec<Item>,
}

impl Rule {
    /// Creates a rule. Parsing never produces rules with empty drivers or targets.
    pub fn new(drivers: Vec<Item>, targets: Vec<Item>) -> Self {
        Self { drivers, targets }
    }

    /// Driver items, indexed into the input signal space.
    pub fn drivers(&self) -> &[Item] {
        &self.drivers
    }

    /// Target items, indexed into the output signal space.
    pub fn targets(&self) -> &[Item] {
        &self.targets
    }

    /// Activation of this rule for a full signal vector.
    ///
    /// The product of every driver's [`Item::eval`], so all drivers must be
    /// near their peaks for the rule to be fully active.
    #[inline]
    pub fn eval(&self, signals: &[f64]) -> f64 {
        self.drivers
            .iter()
            .map(|d| d.eval(signals[d.index]))
            .product()
    }
}
