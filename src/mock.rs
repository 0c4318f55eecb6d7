//! A simulated MB85RC chip for tests.

use crate::mb85rc::{DEFAULT_ADDRESS, SLAVE_ID};
use crate::Bus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nack;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transaction {
    Write { address: u8, bytes: Vec<u8> },
    WriteRead { address: u8, bytes: Vec<u8>, len: usize },
}

#[derive(Debug)]
pub struct MockFram {
    /// The 7-bit address the chip answers to.
    pub address: u8,
    /// Whether the chip answers at all.
    pub present: bool,
    pub memory: Vec<u8>,
    /// Reply to the device-ID query.
    pub id: [u8; 3],
    /// Cuts every read short at this many bytes.
    pub read_limit: Option<usize>,
    /// Added to every reported read count, as a misbehaving bus would.
    pub over_report: usize,
    pub log: Vec<Transaction>,
}

impl MockFram {
    pub fn new() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            present: true,
            memory: vec![0; 0x1_0000],
            // MB85RC256V
            id: [0x00, 0xA5, 0x10],
            read_limit: None,
            over_report: 0,
            log: Vec::new(),
        }
    }

    fn deliver(&self, data: &[u8], buf: &mut [u8]) -> usize {
        let n = buf.len().min(self.read_limit.unwrap_or(usize::MAX));
        buf[..n].copy_from_slice(&data[..n]);
        n + self.over_report
    }
}

impl Bus for MockFram {
    type Error = Nack;

    fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), Nack> {
        self.log.push(Transaction::Write {
            address,
            bytes: bytes.to_vec(),
        });
        if !self.present || address != self.address {
            return Err(Nack);
        }

        if bytes.len() >= 2 {
            let mut ptr = u16::from_be_bytes([bytes[0], bytes[1]]);
            for &b in &bytes[2..] {
                self.memory[usize::from(ptr)] = b;
                ptr = ptr.wrapping_add(1);
            }
        }
        Ok(())
    }

    fn write_read(&mut self, address: u8, bytes: &[u8], buf: &mut [u8]) -> Result<usize, Nack> {
        self.log.push(Transaction::WriteRead {
            address,
            bytes: bytes.to_vec(),
            len: buf.len(),
        });
        if !self.present {
            return Err(Nack);
        }

        if address == SLAVE_ID >> 1 && bytes == &[self.address << 1][..] {
            // Reads past the ID return zeroes.
            let mut data = vec![0; buf.len().max(3)];
            data[..3].copy_from_slice(&self.id);
            return Ok(self.deliver(&data, buf));
        }

        if address == self.address && bytes.len() == 2 {
            let start = u16::from_be_bytes([bytes[0], bytes[1]]);
            let data: Vec<u8> = (0..buf.len())
                .map(|i| self.memory[usize::from(start.wrapping_add(i as u16))])
                .collect();
            return Ok(self.deliver(&data, buf));
        }

        Err(Nack)
    }
}
