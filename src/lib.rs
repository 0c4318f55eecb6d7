//! An [`embedded-hal`]-based driver for MB85RC-series I2C FRAM chips.
//!
//! The driver detects the chip, reads and writes bytes at a 16-bit offset, and
//! reads the manufacturer/product identification of parts that support it.
//! FRAM needs no erase cycles or write delays, so every operation is a single
//! write or write-then-read bus transaction.
//!
//! Bus access goes through the [`Bus`] trait. Any `embedded-hal` I2C master
//! can be used by wrapping it in [`I2cBus`].
//!
//! [`embedded-hal`]: https://docs.rs/embedded-hal/

#![doc(html_root_url = "https://docs.rs/i2c-fram/0.1.0")]
#![warn(missing_debug_implementations, rust_2018_idioms)]
#![cfg_attr(not(test), no_std)]

#[macro_use]
mod log;
mod bus;
mod error;
pub mod mb85rc;
#[cfg(test)]
mod mock;
pub mod prelude;
mod utils;
pub mod version;

pub use crate::bus::I2cBus;
pub use crate::error::Error;

/// An I2C bus controller that the FRAM driver issues transactions on.
///
/// Addresses are 7-bit slave addresses. Implementations report a missing
/// acknowledge (and any other transport failure) through `Self::Error`.
pub trait Bus {
    /// The transport error type.
    type Error;

    /// Writes `bytes` to the device at `address` in a single transaction.
    ///
    /// An empty `bytes` slice only addresses the device, which is how
    /// presence is probed.
    fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), Self::Error>;

    /// Writes `bytes`, then issues a repeated start and reads into `buf`.
    ///
    /// Returns the number of bytes actually received, which may be less than
    /// `buf.len()` if the transfer was cut short. Only the first that many
    /// bytes of `buf` are meaningful.
    fn write_read(
        &mut self,
        address: u8,
        bytes: &[u8],
        buf: &mut [u8],
    ) -> Result<usize, Self::Error>;
}
