use crate::Hasher;

/// Bit-reflected IEEE polynomial.
const POLYNOMIAL: u32 = 0xEDB8_8320;

/// Incremental CRC-32 (IEEE 802.3) over byte chunks.
///
/// The register starts all-ones and is complemented on finalization, so an
/// empty input finalizes to zero.
pub struct Crc32Hasher {
    state: u32,
}

impl Crc32Hasher {
    pub fn new() -> Self { Self { state: u32::MAX } }

    /// One-shot CRC-32 of a full buffer.
    pub fn digest(data: &[u8]) -> u32 {
        let mut hasher = Self::new();
        hasher.update(data);
        hasher.value()
    }

    /// Complemented register as an unsigned 32-bit value.
    pub fn value(&self) -> u32 { self.state ^ u32::MAX }
}

impl Default for Crc32Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher for Crc32Hasher {
    fn update(&mut self, data: &[u8]) {
        for &byte in data {
            self.state ^= u32::from(byte);
            for _ in 0..8 {
                let lsb = self.state & 1;
                self.state >>= 1;
                if lsb != 0 {
                    self.state ^= POLYNOMIAL;
                }
            }
        }
    }

    fn finalize(self) -> Vec<u8> { self.value().to_be_bytes().to_vec() }
}
