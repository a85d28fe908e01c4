//! Cyclic redundancy checks over document bytes.

const CRC_TABLE: [u16; 16] = [
    0x0000, 0xCC01, 0xD801, 0x1400, 0xF001, 0x3C00, 0x2800, 0xE401, 0xA001, 0x6C00, 0x7800,
    0xB401, 0x5000, 0x9C01, 0x8801, 0x4400,
];

/// Accumulate a slice of bytes into a cyclic redundancy check value.
pub fn compute_crc(init: u16, r: &[u8]) -> u16 {
    r.iter().fold(init, |acc, b| crc_byte(acc, *b))
}

/// Accumulate a single byte, low nibble first.
fn crc_byte(crc: u16, b: u8) -> u16 {
    let crc = crc_nibble(crc, b & 0xF);
    crc_nibble(crc, b >> 4)
}

fn crc_nibble(crc: u16, nibble: u8) -> u16 {
    let tmp = CRC_TABLE[(crc & 0xF) as usize];
    ((crc >> 4) & 0x0FFF) ^ tmp ^ CRC_TABLE[nibble as usize]
}

/// A running check value, fed as bytes are consumed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Crc(u16);

impl Crc {
    pub fn new() -> Self {
        Self(0)
    }

    pub fn update(&mut self, r: &[u8]) {
        self.0 = compute_crc(self.0, r);
    }

    pub fn value(self) -> u16 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_value() {
        let bytes: [u8; 10] = [43, 23, 23, 71, 95, 21, 38, 90, 91, 32];
        assert_eq!(compute_crc(0, &bytes), 0x4EFC);
    }

    #[test]
    fn incremental_matches_whole() {
        let bytes: [u8; 10] = [43, 23, 23, 71, 95, 21, 38, 90, 91, 32];
        let mut crc = Crc::new();
        crc.update(&bytes[..3]);
        crc.update(&bytes[3..]);
        assert_eq!(crc.value(), compute_crc(0, &bytes));
    }

    #[test]
    fn single_byte_corruption_changes_value() {
        let bytes: [u8; 10] = [43, 23, 23, 71, 95, 21, 38, 90, 91, 32];
        let reference = compute_crc(0, &bytes);
        for i in 0..bytes.len() {
            let mut corrupt = bytes;
            corrupt[i] ^= 0x01;
            assert_ne!(compute_crc(0, &corrupt), reference);
        }
    }
}
