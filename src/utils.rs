use core::fmt;

/// Splits a memory offset into the two bytes sent on the wire, high byte
/// first.
pub fn offset_bytes(addr: u16) -> [u8; 2] {
    addr.to_be_bytes()
}

/// Formats a byte slice as a list of hex bytes, for tracing bus traffic.
pub struct HexSlice<T>(pub T)
where
    T: AsRef<[u8]>;

impl<T: AsRef<[u8]>> fmt::Debug for HexSlice<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, byte) in self.0.as_ref().iter().enumerate() {
            if i != 0 {
                f.write_str(" ")?;
            }
            write!(f, "{:02x}", byte)?;
        }
        f.write_str("]")
    }
}
