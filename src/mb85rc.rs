//! Driver for MB85RC-series I2C FRAM chips.
//!
//! These parts address up to 64 KiB with a 16-bit offset that is sent big
//! endian after the slave address. Writes take effect immediately, there is no
//! page buffer or busy polling.

use crate::utils::{offset_bytes, HexSlice};
use crate::{Bus, Error};
use core::fmt;

/// Slave address of a chip with all address pins tied low.
pub const DEFAULT_ADDRESS: u8 = 0x50;

/// Reserved slave ID used for the device-ID query, in 8-bit (write) form.
///
/// The 7-bit address on the bus is `SLAVE_ID >> 1`.
pub const SLAVE_ID: u8 = 0xF8;

/// Manufacturer ID reported by Fujitsu parts.
pub const MANUFACTURER_FUJITSU: u16 = 0x00A;

/// Maximum number of data bytes sent in one write transaction.
const WRITE_CHUNK: usize = 32;

/// Manufacturer and product identification of an MB85RC chip.
///
/// The chip answers the device-ID query with 3 bytes: a 12-bit manufacturer
/// ID followed by a 12-bit product ID. The product ID consists of a 4-bit
/// density code and an 8-bit proprietary part code.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct DeviceInfo {
    pub manufacturer: u16,
    pub product: u16,
}

impl DeviceInfo {
    /// Decodes the raw reply to the device-ID query.
    pub fn from_id_bytes(bytes: [u8; 3]) -> Self {
        // Example reply of the MB85RC256V: 00 A5 10
        // Manufacturer 0x00A (Fujitsu), density 0x5 (256 Kbit), part 0x10
        Self {
            manufacturer: u16::from(bytes[0]) << 4 | u16::from(bytes[1] >> 4),
            product: u16::from(bytes[1] & 0x0F) << 8 | u16::from(bytes[2]),
        }
    }

    /// The density code, the upper 4 bits of the product ID.
    pub fn density(&self) -> u8 {
        (self.product >> 8) as u8 & 0x0F
    }

    /// The manufacturer-specific part code, the lower 8 bits of the product ID.
    pub fn proprietary(&self) -> u8 {
        self.product as u8
    }

    /// Capacity in bytes implied by the density code.
    ///
    /// Density 3 is a 64 Kbit part, each further step doubles it.
    pub fn capacity(&self) -> u32 {
        1 << (u32::from(self.density()) + 10)
    }

    /// Whether the chip identifies as a Fujitsu part.
    pub fn is_fujitsu(&self) -> bool {
        self.manufacturer == MANUFACTURER_FUJITSU
    }
}

impl fmt::Debug for DeviceInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceInfo")
            .field("manufacturer", &format_args!("{:#05x}", self.manufacturer))
            .field("product", &format_args!("{:#05x}", self.product))
            .finish()
    }
}

/// Driver for MB85RC I2C FRAM chips.
///
/// A driver starts out unbound. [`begin`](Fram::begin) attaches it to a bus
/// and probes the chip; all other operations fail with
/// [`Error::NotInitialized`] until that probe has succeeded.
///
/// # Type Parameters
///
/// * **`B`**: The [`Bus`] the chip is attached to. Pass `&mut bus` to keep
///   ownership of a bus shared with other devices.
#[derive(Debug)]
pub struct Fram<B: Bus> {
    bus: Option<B>,
    address: u8,
    initialized: bool,
}

impl<B: Bus> Default for Fram<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Bus> Fram<B> {
    /// Creates a driver that is not yet attached to a bus.
    pub fn new() -> Self {
        Self {
            bus: None,
            address: DEFAULT_ADDRESS,
            initialized: false,
        }
    }

    /// Attaches the driver to `bus` and probes for a chip at `address`.
    ///
    /// The probe is an empty write, which succeeds only if the chip
    /// acknowledges its address. On failure the driver stays uninitialized
    /// but keeps the bus, which can be recovered with [`free`](Fram::free).
    ///
    /// # Parameters
    ///
    /// * **`bus`**: The bus the chip is attached to.
    /// * **`address`**: The 7-bit slave address, [`DEFAULT_ADDRESS`] plus the
    ///   value of the `A0`-`A2` pins.
    pub fn begin(&mut self, mut bus: B, address: u8) -> Result<(), Error<B::Error>> {
        if self.initialized {
            return Err(Error::AlreadyInitialized);
        }

        let probe = bus.write(address, &[]);
        self.bus = Some(bus);
        self.address = address;

        match probe {
            Ok(()) => {
                info!("Fram::begin: chip found at {:#04x}", address);
                self.initialized = true;
                Ok(())
            }
            Err(e) => {
                warn!("Fram::begin: no acknowledge from {:#04x}", address);
                Err(Error::I2c(e))
            }
        }
    }

    /// Like [`begin`](Fram::begin), using [`DEFAULT_ADDRESS`].
    pub fn begin_default(&mut self, bus: B) -> Result<(), Error<B::Error>> {
        self.begin(bus, DEFAULT_ADDRESS)
    }

    /// Whether a chip has been found by [`begin`](Fram::begin).
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// The configured 7-bit slave address.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Releases the bus, if one was attached.
    pub fn free(self) -> Option<B> {
        self.bus
    }

    fn bus(&mut self) -> Result<&mut B, Error<B::Error>> {
        match &mut self.bus {
            Some(bus) if self.initialized => Ok(bus),
            _ => Err(Error::NotInitialized),
        }
    }

    /// Writes a single byte at `addr`.
    pub fn write8(&mut self, addr: u16, value: u8) -> Result<(), Error<B::Error>> {
        let [hi, lo] = offset_bytes(addr);
        let address = self.address;
        trace!("write8 {:#06x} <- {:#04x}", addr, value);
        self.bus()?.write(address, &[hi, lo, value])?;
        Ok(())
    }

    /// Writes `data` starting at `addr`.
    ///
    /// Offsets past `0xFFFF` wrap around to the start of the address space,
    /// as they do on the chip itself.
    ///
    /// Buffers longer than 32 bytes are sent as several transactions, each
    /// carrying its own offset. If the chip stops acknowledging part way, the
    /// chunks before the failing one have already been written.
    pub fn write(&mut self, addr: u16, data: &[u8]) -> Result<(), Error<B::Error>> {
        let address = self.address;
        let bus = self.bus()?;

        let mut buf = [0; WRITE_CHUNK + 2];
        for (c, chunk) in data.chunks(WRITE_CHUNK).enumerate() {
            let current_addr = addr.wrapping_add((c * WRITE_CHUNK) as u16);
            buf[..2].copy_from_slice(&offset_bytes(current_addr));
            buf[2..2 + chunk.len()].copy_from_slice(chunk);

            let msg = &buf[..2 + chunk.len()];
            trace!("write {:#06x} <- {:?}", current_addr, HexSlice(&msg[2..]));
            bus.write(address, msg)?;
        }
        Ok(())
    }

    /// Reads the byte at `addr`.
    pub fn read8(&mut self, addr: u16) -> Result<u8, Error<B::Error>> {
        let address = self.address;
        let mut buf = [0];
        let n = self
            .bus()?
            .write_read(address, &offset_bytes(addr), &mut buf)?;
        if n < 1 {
            return Err(Error::Truncated);
        }
        trace!("read8 {:#06x} -> {:#04x}", addr, buf[0]);
        Ok(buf[0])
    }

    /// Reads `buf.len()` bytes starting at `addr`.
    ///
    /// Returns the number of bytes received. This is less than `buf.len()`
    /// if the bus cut the transfer short, in which case only that many
    /// leading bytes of `buf` hold data.
    pub fn read(&mut self, addr: u16, buf: &mut [u8]) -> Result<usize, Error<B::Error>> {
        let address = self.address;
        let n = self
            .bus()?
            .write_read(address, &offset_bytes(addr), buf)?;
        // A bus cannot deliver more than was asked for.
        let n = n.min(buf.len());
        if n < buf.len() {
            debug!("read {:#06x}: got {} of {} bytes", addr, n, buf.len());
        }
        trace!("read {:#06x} -> {:?}", addr, HexSlice(&buf[..n]));
        Ok(n)
    }

    /// Reads the manufacturer and product identification.
    ///
    /// Not every MB85RC part implements the device-ID query. Those that
    /// don't will not acknowledge it, which is reported as an I2C error.
    pub fn device_id(&mut self) -> Result<DeviceInfo, Error<B::Error>> {
        let address = self.address;
        let mut buf = [0; 3];
        let n = self
            .bus()?
            .write_read(SLAVE_ID >> 1, &[address << 1], &mut buf)?;
        if n < buf.len() {
            warn!("Fram::device_id: short reply {:?}", HexSlice(&buf[..n]));
            return Err(Error::Truncated);
        }

        let info = DeviceInfo::from_id_bytes(buf);
        info!("Fram::device_id: {:?}", info);
        Ok(info)
    }
}
