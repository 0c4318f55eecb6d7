use crate::Bus;
use embedded_hal::blocking::i2c;

/// Adapts an `embedded-hal` blocking I2C master to [`Bus`].
///
/// `embedded-hal` transfers are all-or-nothing, so a successful
/// [`write_read`](Bus::write_read) always reports the full buffer as read.
#[derive(Debug)]
pub struct I2cBus<I2C> {
    i2c: I2C,
}

impl<I2C> I2cBus<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Returns the wrapped I2C master.
    pub fn free(self) -> I2C {
        self.i2c
    }
}

impl<I2C, E> Bus for I2cBus<I2C>
where
    I2C: i2c::Write<Error = E> + i2c::WriteRead<Error = E>,
{
    type Error = E;

    fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), E> {
        i2c::Write::write(&mut self.i2c, address, bytes)
    }

    fn write_read(&mut self, address: u8, bytes: &[u8], buf: &mut [u8]) -> Result<usize, E> {
        i2c::WriteRead::write_read(&mut self.i2c, address, bytes, buf)?;
        Ok(buf.len())
    }
}

impl<B: Bus + ?Sized> Bus for &mut B {
    type Error = B::Error;

    fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), Self::Error> {
        (**self).write(address, bytes)
    }

    fn write_read(
        &mut self,
        address: u8,
        bytes: &[u8],
        buf: &mut [u8],
    ) -> Result<usize, Self::Error> {
        (**self).write_read(address, bytes, buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A bare `embedded-hal` master that echoes a fixed pattern.
    #[derive(Debug, Default)]
    struct Echo {
        writes: Vec<(u8, Vec<u8>)>,
        nack: bool,
    }

    impl i2c::Write for Echo {
        type Error = ();

        fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), ()> {
            if self.nack {
                return Err(());
            }
            self.writes.push((address, bytes.to_vec()));
            Ok(())
        }
    }

    impl i2c::WriteRead for Echo {
        type Error = ();

        fn write_read(&mut self, address: u8, bytes: &[u8], buf: &mut [u8]) -> Result<(), ()> {
            i2c::Write::write(self, address, bytes)?;
            for (i, b) in buf.iter_mut().enumerate() {
                *b = i as u8;
            }
            Ok(())
        }
    }

    #[test]
    fn full_reads_and_errors() {
        let mut bus = I2cBus::new(Echo::default());
        let mut buf = [0xFF; 4];
        assert_eq!(bus.write_read(0x50, &[0x00, 0x10], &mut buf), Ok(4));
        assert_eq!(buf, [0, 1, 2, 3]);
        assert_eq!(bus.write(0x50, &[]), Ok(()));

        let echo = bus.free();
        assert_eq!(echo.writes, vec![(0x50, vec![0x00, 0x10]), (0x50, vec![])]);

        let mut bus = I2cBus::new(Echo { nack: true, ..Echo::default() });
        assert_eq!(bus.write(0x50, &[]), Err(()));
        assert_eq!(bus.write_read(0x50, &[0, 0], &mut buf), Err(()));
    }

    #[test]
    fn through_mut_ref() {
        let mut bus = I2cBus::new(Echo::default());
        {
            let mut borrowed = &mut bus;
            assert_eq!(Bus::write(&mut borrowed, 0x51, &[1, 2, 3]), Ok(()));
        }
        assert_eq!(bus.free().writes, vec![(0x51, vec![1, 2, 3])]);
    }
}
