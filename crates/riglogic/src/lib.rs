//! Blendshape rig logic driven by naming conventions.
//!
//! A solver produces weights for a small set of **driver** shapes. This crate
//! expands those into a full blendshape set whose extra shapes are defined
//! purely by their names:
//!
//! | Pattern | Example | Output |
//! |---|---|---|
//! | direct | `jawOpen`, `mouthSmile_L` | driver weight |
//! | in-between | `jawOpen50`, `mouthSmile25_L` | tent peaking at the encoded percent |
//! | corrective | `jawOpen_mouthSmile_L` | product of components |
//!
//! ```text
//! name       := component ("_" component)*
//! component  := head ("_" suffix)?
//! head       := [a-z][A-Za-z]+ [0-9]{0,2}
//! suffix     := [A-Z]{1,2}
//! ```
//!
//! Names that match none of these, in-betweens without a driver, and
//! correctives with an unknown component are listed in the
//! [`ClassificationReport`] and output as zero. [`RigLogic::strict`] turns
//! them into an error instead.
//!
//! # Quick start
//!
//! ```
//! use facerig_riglogic::{Rig, RigEval};
//!
//! let rig = Rig::new(&["jawOpen", "jawOpen50", "mouthSmile_L", "jawOpen_mouthSmile_L"], true);
//! assert_eq!(rig.drivers(), ["jawOpen", "mouthSmile_L"]);
//!
//! let mut out = vec![0.0; rig.output_signals_count()];
//! rig.eval(&[0.25, 1.0], &mut out).unwrap();
//! assert_eq!(out, [0.25, 0.5, 1.0, 0.25]);
//! ```

mod error;
mod grammar;
mod report;
mod rig;
mod riglogic;
mod simple;

pub use error::RigLogicError;
pub use grammar::{Component, NameClass, classify_name};
pub use report::ClassificationReport;
pub use rig::{Rig, RigEval};
pub use riglogic::{Driver, RigLogic};
pub use simple::SimpleRigLogic;
