//! Common interface over the two rig flavours.

use crate::error::RigLogicError;
use crate::riglogic::RigLogic;
use crate::simple::SimpleRigLogic;

/// Anything that turns driver weights into blendshape outputs.
pub trait RigEval {
    /// Driver names, in the order `eval` expects their weights.
    fn drivers(&self) -> &[String];

    /// Number of outputs written by `eval`.
    fn output_signals_count(&self) -> usize;

    /// Writes one value per output.
    ///
    /// # Errors
    ///
    /// Returns [`RigLogicError::LengthMismatch`] on wrongly sized slices.
    fn eval(&self, driver_weights: &[f64], outputs: &mut [f64]) -> Result<(), RigLogicError>;
}

impl RigEval for RigLogic {
    fn drivers(&self) -> &[String] {
        RigLogic::drivers(self)
    }

    fn output_signals_count(&self) -> usize {
        RigLogic::output_signals_count(self)
    }

    fn eval(&self, driver_weights: &[f64], outputs: &mut [f64]) -> Result<(), RigLogicError> {
        RigLogic::eval(self, driver_weights, outputs)
    }
}

impl RigEval for SimpleRigLogic {
    fn drivers(&self) -> &[String] {
        SimpleRigLogic::drivers(self)
    }

    fn output_signals_count(&self) -> usize {
        SimpleRigLogic::output_signals_count(self)
    }

    fn eval(&self, driver_weights: &[f64], outputs: &mut [f64]) -> Result<(), RigLogicError> {
        SimpleRigLogic::eval(self, driver_weights, outputs)
    }
}

/// Either a convention-driven or a pass-through rig, chosen at load time.
#[derive(Debug, Clone)]
pub enum Rig {
    /// Names classified by the naming convention.
    Convention(RigLogic),
    /// Every name is its own driver.
    PassThrough(SimpleRigLogic),
}

impl Rig {
    /// Builds a [`RigLogic`] if `use_convention` is set, otherwise a [`SimpleRigLogic`].
    pub fn new<S: AsRef<str>>(names: &[S], use_convention: bool) -> Self {
        if use_convention {
            Self::Convention(RigLogic::new(names))
        } else {
            Self::PassThrough(SimpleRigLogic::new(names))
        }
    }

    /// Output names, indexed like the outputs of `eval`.
    pub fn output_signals(&self) -> &[String] {
        match self {
            Self::Convention(r) => r.output_signals(),
            Self::PassThrough(r) => r.drivers(),
        }
    }
}

impl From<RigLogic> for Rig {
    fn from(r: RigLogic) -> Self {
        Self::Convention(r)
    }
}

impl From<SimpleRigLogic> for Rig {
    fn from(r: SimpleRigLogic) -> Self {
        Self::PassThrough(r)
    }
}

impl RigEval for Rig {
    fn drivers(&self) -> &[String] {
        match self {
            Self::Convention(r) => r.drivers(),
            Self::PassThrough(r) => r.drivers(),
        }
    }

    fn output_signals_count(&self) -> usize {
        match self {
            Self::Convention(r) => r.output_signals_count(),
            Self::PassThrough(r) => r.output_signals_count(),
        }
    }

    fn eval(&self, driver_weights: &[f64], outputs: &mut [f64]) -> Result<(), RigLogicError> {
        match self {
            Self::Convention(r) => r.eval(driver_weights, outputs),
            Self::PassThrough(r) => r.eval(driver_weights, outputs),
        }
    }
}
