use crc::{
    Crc,
    CRC_16_MCRF4XX,
};

/// The link's "X.25" accumulator: reflected CCITT, 0xffff seed, no final xor.
pub const X25: Crc<u16> = Crc::<u16>::new(&CRC_16_MCRF4XX);

pub const SIZE: usize = std::mem::size_of::<u16>();

/// Checksum over everything after the start marker, finished with the per-type seed.
#[inline]
pub fn checksum(header_tail: &[u8], payload: &[u8], crc_extra: u8) -> u16 {
    let mut digest = X25.digest();

    digest.update(header_tail);
    digest.update(payload);
    digest.update(&[crc_extra]);

    digest.finalize()
}
