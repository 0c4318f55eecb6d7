use core::fmt::{self, Debug, Display};

mod private {
    #[derive(Debug)]
    pub enum Private {}
}

/// The error type used by this library.
///
/// This wraps the error of the underlying [`Bus`](crate::Bus) and adds the
/// driver's own failure conditions on top of that.
pub enum Error<E> {
    /// An I2C transaction failed.
    ///
    /// When probing, this is usually the chip not acknowledging its address,
    /// meaning it is absent, unpowered, or strapped to a different address.
    I2c(E),

    /// The driver has not been bound to a bus with a successful
    /// [`Fram::begin`](crate::mb85rc::Fram::begin) yet.
    NotInitialized,

    /// [`Fram::begin`](crate::mb85rc::Fram::begin) was called on a driver
    /// that is already initialized. The slave address cannot be changed
    /// afterwards.
    AlreadyInitialized,

    /// The bus delivered fewer bytes than a fixed-size reply requires.
    Truncated,

    #[doc(hidden)]
    __NonExhaustive(private::Private),
}

impl<E> From<E> for Error<E> {
    fn from(e: E) -> Self {
        Error::I2c(e)
    }
}

impl<E: Debug> Debug for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::I2c(i2c) => write!(f, "Error::I2c({:?})", i2c),
            Error::NotInitialized => f.write_str("Error::NotInitialized"),
            Error::AlreadyInitialized => f.write_str("Error::AlreadyInitialized"),
            Error::Truncated => f.write_str("Error::Truncated"),
            Error::__NonExhaustive(_) => unreachable!(),
        }
    }
}

impl<E: Display> Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::I2c(i2c) => write!(f, "I2C error: {}", i2c),
            Error::NotInitialized => f.write_str("FRAM driver used before a successful begin"),
            Error::AlreadyInitialized => f.write_str("FRAM driver is already initialized"),
            Error::Truncated => f.write_str("bus returned fewer bytes than expected"),
            Error::__NonExhaustive(_) => unreachable!(),
        }
    }
}
