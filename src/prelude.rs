//! Reexports the bus trait for glob imports.
//!
//! ```
//! use i2c_fram::prelude::*;
//! ```

pub use crate::Bus as _;
