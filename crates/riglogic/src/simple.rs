//! Identity rig: every name is its own driver.

use crate::error::RigLogicError;

/// Copies driver weights straight to the outputs.
///
/// Used when a blendshape set does not follow the naming convention and
/// the solver already produces every shape directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleRigLogic {
    names: Vec<String>,
}

impl SimpleRigLogic {
    /// Uses `names` as both drivers and outputs, in order.
    pub fn new<S: AsRef<str>>(names: &[S]) -> Self {
        Self {
            names: names.iter().map(|n| n.as_ref().to_owned()).collect(),
        }
    }

    /// Driver names, identical to the output names.
    pub fn drivers(&self) -> &[String] {
        &self.names
    }

    /// Number of outputs, equal to the number of drivers.
    pub fn output_signals_count(&self) -> usize {
        self.names.len()
    }

    /// # Errors
    ///
    /// Returns [`RigLogicError::LengthMismatch`] if either slice length differs
    /// from the number of names.
    pub fn eval(&self, driver_weights: &[f64], outputs: &mut [f64]) -> Result<(), RigLogicError> {
        if driver_weights.len() != self.names.len() {
            return Err(RigLogicError::LengthMismatch {
                expected: self.names.len(),
                got: driver_weights.len(),
                field: "driver weights",
            });
        }
        if outputs.len() != self.names.len() {
            return Err(RigLogicError::LengthMismatch {
                expected: self.names.len(),
                got: outputs.len(),
                field: "outputs",
            });
        }
        outputs.copy_from_slice(driver_weights);
        Ok(())
    }
}
