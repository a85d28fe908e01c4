//! Component expansion: bit ranges of one field decoded as other fields.

use alloc::collections::BTreeMap;

use tracing::trace;

use super::cursor::Endianness;

/// Running totals for accumulated components, keyed by global message number
/// and target field number.
///
/// Keys are seeded when a definition declares a field with an accumulated
/// component. Only seeded keys are updated by directly decoded values.
#[derive(Debug, Default, Clone)]
pub struct Accumulators {
    totals: BTreeMap<(u16, u8), u64>,
}

impl Accumulators {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking a target at zero, unless it is already tracked.
    pub fn seed(&mut self, global: u16, field: u8) {
        self.totals.entry((global, field)).or_insert(0);
    }

    pub fn contains(&self, global: u16, field: u8) -> bool {
        self.totals.contains_key(&(global, field))
    }

    pub fn get(&self, global: u16, field: u8) -> Option<u64> {
        self.totals.get(&(global, field)).copied()
    }

    /// Overwrite a tracked target with a directly decoded value. Untracked
    /// targets are ignored.
    pub fn set(&mut self, global: u16, field: u8, value: u64) {
        if let Some(total) = self.totals.get_mut(&(global, field)) {
            trace!(global, field, value, "accumulator set");
            *total = value;
        }
    }

    /// Fold a `bits`-wide chunk into the running total, assuming the chunk
    /// rolled over at most once since the previous one.
    pub fn accumulate(&mut self, global: u16, field: u8, chunk: u64, bits: u8) -> u64 {
        let mask = mask(bits) as u64;
        let total = self.totals.entry((global, field)).or_insert(0);

        let mut value = (chunk & mask).wrapping_add(*total & !mask);
        if chunk & mask < *total & mask {
            value = value.wrapping_add(1u64.checked_shl(bits.into()).unwrap_or(0));
        }

        *total = value;
        value
    }
}

/// Mask selecting the low `bits` bits.
pub fn mask(bits: u8) -> u128 {
    1u128
        .checked_shl(bits.into())
        .map_or(u128::MAX, |x| x - 1)
}

/// Concatenate the elements of a field into one integer, first element in the
/// least significant bits. Each element is read in the given byte order.
///
/// Elements beyond the 128th bit are dropped.
pub fn source_bits(r: &[u8], element_size: usize, endianness: Endianness) -> u128 {
    let mut bits = 0u128;

    for (i, element) in r.chunks_exact(element_size.max(1)).enumerate() {
        let Some(shift) = u32::try_from(i * element_size * 8)
            .ok()
            .filter(|shift| *shift < 128)
        else {
            break;
        };

        let fold = |x: u128, b: &u8| x << 8 | u128::from(*b);
        let x = match endianness {
            Endianness::Little => element.iter().rev().fold(0, fold),
            Endianness::Big => element.iter().fold(0, fold),
        };

        bits |= x << shift;
    }

    bits
}

/// Extract `bits` bits starting at `bit_offset`.
pub fn extract(source: u128, bit_offset: u8, bits: u8) -> u64 {
    (source.checked_shr(bit_offset.into()).unwrap_or(0) & mask(bits)) as u64
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    #[test]
    fn accumulates_across_rollover() {
        let mut accumulators = Accumulators::new();
        accumulators.seed(20, 19);

        let totals: Vec<u64> = [250, 5, 5, 250]
            .into_iter()
            .map(|chunk| accumulators.accumulate(20, 19, chunk, 8))
            .collect();

        assert_eq!(totals, [250, 261, 261, 506]);
    }

    #[test]
    fn direct_values_rebase_tracked_targets() {
        let mut accumulators = Accumulators::new();
        accumulators.seed(20, 19);
        accumulators.set(20, 19, 1000);
        accumulators.set(20, 5, 1000);

        assert!(!accumulators.contains(20, 5));
        assert_eq!(accumulators.accumulate(20, 19, 0xF0, 8), 1008);
        assert_eq!(accumulators.accumulate(20, 19, 0x02, 8), 1026);
    }

    #[test]
    fn seeding_keeps_running_total() {
        let mut accumulators = Accumulators::new();
        accumulators.seed(20, 19);
        accumulators.accumulate(20, 19, 7, 8);
        accumulators.seed(20, 19);
        assert_eq!(accumulators.get(20, 19), Some(7));
    }

    #[test]
    fn concatenates_elements_little_endian() {
        let r = [0x12, 0x34, 0x56];
        let source = source_bits(&r, 1, Endianness::Little);
        assert_eq!(source, 0x563412);
        assert_eq!(extract(source, 0, 12), 0x412);
        assert_eq!(extract(source, 12, 12), 0x563);

        let r = [0x12, 0x34];
        assert_eq!(source_bits(&r, 2, Endianness::Big), 0x1234);
        assert_eq!(source_bits(&r, 2, Endianness::Little), 0x3412);
    }

    #[test]
    fn out_of_range_extraction_is_zero() {
        assert_eq!(extract(u128::MAX, 200, 8), 0);
        assert_eq!(extract(u128::MAX, 0, 64), u64::MAX);
    }
}
