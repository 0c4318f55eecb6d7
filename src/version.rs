//! Packed library version numbers.
//!
//! A version is a `u32` holding `major`, `minor`, `patch` and `local` in one
//! byte each, most significant first, so versions compare with plain integer
//! comparison. Consumers can check compatibility at compile time:
//!
//! ```
//! use i2c_fram::version::{self, make_version};
//!
//! const _: () = assert!(version::VERSION >= make_version(0, 1, 0, 0));
//! ```

/// Version of this crate.
pub const VERSION: u32 = make_version(0, 1, 0, 0);

/// Packs a version number.
pub const fn make_version(major: u8, minor: u8, patch: u8, local: u8) -> u32 {
    (major as u32) << 24 | (minor as u32) << 16 | (patch as u32) << 8 | local as u32
}

pub const fn major(v: u32) -> u8 {
    (v >> 24) as u8
}

pub const fn minor(v: u32) -> u8 {
    (v >> 16) as u8
}

pub const fn patch(v: u32) -> u8 {
    (v >> 8) as u8
}

/// Local (distribution-specific) part of the version.
pub const fn local(v: u32) -> u8 {
    v as u8
}
