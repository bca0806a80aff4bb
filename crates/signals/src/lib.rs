//! # facerig-signals
//!
//! Bookkeeping between named signals and the flat `f64` arrays that the
//! solvers read and write.
//!
//! | Type | Role |
//! |------|------|
//! | [`NameIndexAllocator`] | Assigns stable ids to names in first-seen order |
//! | [`NameMapper`] | Copies values between two differently ordered name lists |
//! | [`OutputCache`] | Skips writes for channels whose value did not change |
//!
//! # Quick start
//!
//! ```
//! use facerig_signals::NameMapper;
//!
//! let mapper = NameMapper::new(&["jawOpen", "blink"], &["blink", "jawOpen", "smile"]);
//! let mut dest = [0.0; 3];
//! mapper.map(&[0.4, 1.0], &mut dest).unwrap();
//! assert_eq!(dest, [1.0, 0.4, 0.0]);
//! assert_eq!(mapper.unmatched_dest(), ["smile"]);
//! ```

mod allocator;
mod cache;
mod error;
mod mapper;

pub use allocator::NameIndexAllocator;
pub use cache::{DEFAULT_CACHE_TOLERANCE, OutputCache};
pub use error::SignalsError;
pub use mapper::NameMapper;
