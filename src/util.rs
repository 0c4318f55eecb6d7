
use log::{info, error};

use structopt::StructOpt;

pub use linux_embedded_hal::I2cdev;

use simplelog::{TermLogger, LevelFilter, TerminalMode};

use ihex::{Record, Reader};

use i2c_fram::{I2cBus, mb85rc::Fram};

#[derive(Debug, PartialEq, StructOpt)]
struct Options {
    #[structopt(subcommand)]
    operation: Operations,

    /// I2C device
    #[structopt(long, default_value="/dev/i2c-1", env = "I2C_DEV")]
    i2c_dev: String,

    /// 7-bit slave address of the FRAM in hex
    #[structopt(long, default_value = "50", env = "FRAM_ADDRESS", parse(try_from_str = parse_hex_u8))]
    address: u8,

    /// Configure log level
    #[structopt(long, default_value = "info", env="LOG_LEVEL")]
    log_level: LevelFilter,
}

#[derive(Debug, PartialEq, StructOpt)]
pub enum Operations {
    /// Read device information
    Info,
    /// Read data from the device
    Read {
        /// FRAM address for read start in hex
        #[structopt(parse(try_from_str = parse_hex))]
        address: u16,
        /// Length of read in bytes
        #[structopt()]
        length: u32,
    },
    /// Write data starting at the specified address
    Write {
        /// FRAM address for write start in hex
        #[structopt(parse(try_from_str = parse_hex))]
        address: u16,

        /// Data to write in hexadecimal
        #[structopt(long)]
        data: HexData,
    },
    /// Fill a region with a single value
    Fill {
        /// FRAM address for fill start in hex
        #[structopt(parse(try_from_str = parse_hex))]
        address: u16,

        /// Length of region in bytes
        #[structopt()]
        length: u32,

        /// Fill value in hex
        #[structopt(long, default_value="00", parse(try_from_str = parse_hex_u8))]
        value: u8,
    },
    /// Dump FRAM into a hex file
    Dump {
        /// FRAM address for read start in hex
        #[structopt(parse(try_from_str = parse_hex))]
        address: u16,

        /// Length of read in bytes
        #[structopt()]
        length: u32,

        /// Output ihex file
        #[structopt(long, default_value="dump.ihex")]
        file: String,
    },
    /// Load FRAM from a hex file
    Load {
        /// Input ihex file
        file: String,
    },
}

#[derive(Debug, PartialEq)]
pub struct HexData(Vec<u8>);

impl std::str::FromStr for HexData {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        hex::decode(s).map(HexData)
    }
}

fn parse_hex(s: &str) -> Result<u16, std::num::ParseIntError> {
    u16::from_str_radix(s.trim_start_matches("0x"), 16)
}

fn parse_hex_u8(s: &str) -> Result<u8, std::num::ParseIntError> {
    u8::from_str_radix(s.trim_start_matches("0x"), 16)
}

/// The address space is 64 KiB, longer accesses would wrap around.
fn check_length(address: u16, length: u32) -> Result<usize, Box<dyn std::error::Error>> {
    if u32::from(address).checked_add(length).map_or(true, |end| end > 0x1_0000) {
        return Err(format!("{} bytes from 0x{:04x} exceed the 64 KiB address space", length, address).into());
    }
    Ok(length as usize)
}

/// Collects the data records of an Intel HEX file as `(offset, bytes)` pairs.
fn parse_ihex(data: &str) -> Result<Vec<(u16, Vec<u8>)>, Box<dyn std::error::Error>> {
    let mut chunks = Vec::new();
    for record in Reader::new(data) {
        match record {
            Ok(Record::Data{offset, value}) => chunks.push((offset, value)),
            Ok(Record::EndOfFile) => (),
            Err(e) => return Err(format!("Reader error: {:?}", e).into()),
            Ok(record) => return Err(format!("Unrecognised record: {:?}", record).into()),
        }
    }
    Ok(chunks)
}

fn main() -> Result<(), Box<dyn std::error::Error + 'static>>{
    // Load options
    let opts = Options::from_args();

    // Setup logging
    TermLogger::init(opts.log_level, simplelog::Config::default(), TerminalMode::Mixed)?;

    // Connect I2C device
    let i2c = I2cdev::new(&opts.i2c_dev)?;

    // Probe for the chip
    let mut fram = Fram::new();
    if let Err(e) = fram.begin(I2cBus::new(i2c), opts.address) {
        error!("No FRAM at 0x{:02x} on {}: {:?}", opts.address, opts.i2c_dev, e);
        return Err(format!("no FRAM at 0x{:02x}", opts.address).into())
    }

    // Perform the requested operation
    match opts.operation {
        Operations::Info => {
            match fram.device_id() {
                Ok(id) => {
                    info!("Device ID: {:?}", id);
                    info!("Manufacturer: 0x{:03x}{}", id.manufacturer, if id.is_fujitsu() { " (Fujitsu)" } else { "" });
                    info!("Density code {}, capacity {} bytes", id.density(), id.capacity());
                },
                // Some parts don't implement the ID query, the chip is still usable.
                Err(e) => error!("Device ID read failed: {:?}", e),
            }
        },
        Operations::Read{address, length} => {
            info!("Reading {} bytes from address 0x{:04x}", length, address);

            let mut buff = vec![0u8; check_length(address, length)?];
            let n = fram.read(address, &mut buff).map_err(|e| format!("{:?}", e))?;
            if n < buff.len() {
                error!("Short read: {} of {} bytes", n, buff.len());
            }

            info!("Read: {:02x?}", &buff[..n]);
        },
        Operations::Write{address, data} => {
            info!("Writing {} bytes to address 0x{:04x}", data.0.len(), address);

            check_length(address, data.0.len() as u32)?;
            fram.write(address, &data.0).map_err(|e| format!("{:?}", e))?;

            info!("Write complete");
        },
        Operations::Fill{address, length, value} => {
            info!("Filling {} bytes from address 0x{:04x} with 0x{:02x}", length, address, value);

            let buff = vec![value; check_length(address, length)?];
            fram.write(address, &buff).map_err(|e| format!("{:?}", e))?;

            info!("Fill complete");
        },
        Operations::Dump{address, length, file} => {
            info!("Reading {} bytes from address 0x{:04x} to file {}", length, address, &file);

            let mut buff = vec![0u8; check_length(address, length)?];
            let n = fram.read(address, &mut buff).map_err(|e| format!("{:?}", e))?;
            if n < buff.len() {
                return Err(format!("short read: {} of {} bytes", n, buff.len()).into())
            }

            let mut records = Vec::new();
            for (c, chunk) in buff.chunks(32).enumerate() {
                records.push(Record::Data{ offset: address.wrapping_add((c * 32) as u16), value: chunk.to_vec() });
            }
            records.push(Record::EndOfFile);

            let data = ihex::create_object_file_representation(&records).map_err(|e| format!("{:?}", e))?;

            std::fs::write(file, data)?;

            info!("Dump complete");
        },
        Operations::Load{file} => {
            info!("Loading file {}", file);

            let data = std::fs::read_to_string(&file)?;

            for (offset, value) in parse_ihex(&data)? {
                info!("Writing {} bytes at address 0x{:04x}", value.len(), offset);
                fram.write(offset, &value).map_err(|e| format!("{:?}", e))?;
            }

            info!("Load complete");
        },
    }

    Ok(())
}
