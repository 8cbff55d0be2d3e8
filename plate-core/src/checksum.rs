const FNV_OFFSET: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// FNV-1a over the little-endian bytes of each value.
///
/// Bit-exact: two buffers hash equal only if every cell has the same bit
/// pattern, so `0.0` and `-0.0` differ.
pub fn checksum(cells: &[f64]) -> u32 {
    let mut h = FNV_OFFSET;
    for v in cells {
        for b in v.to_le_bytes() {
            h ^= u32::from(b);
            h = h.wrapping_mul(FNV_PRIME);
        }
    }
    h
}
