use std::fmt::{
    Display,
    Formatter,
};

use bytes::{
    BufMut,
    Bytes,
    BytesMut,
};
use packed_struct::{
    PackedStruct,
    PackingResult,
};

use crate::{
    crc,
    header,
    Header,
};

pub const MAX_PAYLOAD: usize = u8::MAX as usize;
pub const MAX_FRAME: usize = header::SIZE_BYTES + MAX_PAYLOAD + crc::SIZE;

/// One checksummed, length-delimited unit of the wire protocol.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Frame {
    pub header:   Header,
    pub payload:  Bytes,
    pub checksum: u16,
}

impl Frame {
    /// Build a frame, computing its checksum with the given seed.
    pub fn seal(header: Header, payload: Bytes, crc_extra: u8) -> PackingResult<Self> {
        let checksum = Self::compute_checksum(&header, &payload, crc_extra)?;

        Ok(Self {
            header,
            payload,
            checksum,
        })
    }

    pub fn compute_checksum(header: &Header, payload: &[u8], crc_extra: u8) -> PackingResult<u16> {
        let header_bytes = header.pack()?;
        Ok(crc::checksum(&header_bytes[1..], payload, crc_extra))
    }

    #[inline]
    pub fn is_valid(&self, crc_extra: u8) -> bool {
        usize::from(self.header.len) == self.payload.len()
            && Self::compute_checksum(&self.header, &self.payload, crc_extra)
                .map(|ck| ck == self.checksum)
                .unwrap_or(false)
    }

    #[inline]
    pub fn wire_len(&self) -> usize {
        header::SIZE_BYTES + self.payload.len() + crc::SIZE
    }

    pub fn write_to(&self, dst: &mut BytesMut) -> PackingResult<()> {
        dst.reserve(self.wire_len());

        dst.put_slice(&self.header.pack()?);
        dst.put_slice(&self.payload);
        dst.put_u16_le(self.checksum);

        Ok(())
    }

    pub fn to_bytes(&self) -> PackingResult<Bytes> {
        let mut out = BytesMut::with_capacity(self.wire_len());
        self.write_to(&mut out)?;

        Ok(out.freeze())
    }
}

impl Display for Frame {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (crc: 0x{:04x})", self.header.display(), self.checksum)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Endpoint;

    fn sample() -> Frame {
        let header = Header::new(Endpoint::new(1, 1).unwrap(), 0, 0, 3);
        Frame::seal(header, Bytes::from_static(&[1, 2, 3]), 50).unwrap()
    }

    #[test]
    fn layout() {
        let frame = sample();
        let bytes = frame.to_bytes().unwrap();

        assert_eq!(bytes.len(), frame.wire_len());
        assert_eq!(&bytes[..6], &[0xfe, 3, 0, 1, 1, 0]);
        assert_eq!(&bytes[6..9], &[1, 2, 3]);
        assert_eq!(u16::from_le_bytes([bytes[9], bytes[10]]), frame.checksum);
        assert_eq!(frame.checksum, crc::checksum(&bytes[1..6], &bytes[6..9], 50));
    }

    #[test]
    fn validity_depends_on_seed() {
        let frame = sample();

        assert!(frame.is_valid(50));
        assert!(!frame.is_valid(51));
    }

    #[test]
    fn length_mismatch_is_invalid() {
        let mut frame = sample();
        frame.header.len = 4;

        assert!(!frame.is_valid(50));
    }
}
