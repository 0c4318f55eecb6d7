//! Logging shims.
//!
//! With the `log` feature these forward to the `log` crate. Without it they
//! still type-check their arguments but emit nothing, so the driver stays
//! usable on targets without a logger.

#[cfg(feature = "log")]
macro_rules! trace {
    ($($arg:tt)+) => { ::log::trace!($($arg)+) };
}

#[cfg(feature = "log")]
macro_rules! debug {
    ($($arg:tt)+) => { ::log::debug!($($arg)+) };
}

#[cfg(feature = "log")]
macro_rules! info {
    ($($arg:tt)+) => { ::log::info!($($arg)+) };
}

#[cfg(feature = "log")]
macro_rules! warn {
    ($($arg:tt)+) => { ::log::warn!($($arg)+) };
}

#[cfg(not(feature = "log"))]
macro_rules! trace {
    ($($arg:tt)+) => {
        if false {
            let _ = format_args!($($arg)+);
        }
    };
}

#[cfg(not(feature = "log"))]
macro_rules! debug {
    ($($arg:tt)+) => { trace!($($arg)+) };
}

#[cfg(not(feature = "log"))]
macro_rules! info {
    ($($arg:tt)+) => { trace!($($arg)+) };
}

#[cfg(not(feature = "log"))]
macro_rules! warn {
    ($($arg:tt)+) => { trace!($($arg)+) };
}
