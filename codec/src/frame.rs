use bytes::{
    Buf,
    BytesMut,
};
use message::{
    crc,
    header::{
        self,
        MARKER,
    },
    Frame,
    Header,
};
use packed_struct::PackedStructSlice;
use tokio_util::codec::{
    Decoder,
    Encoder,
};

use crate::Error;

/// Running counters for a decoder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Stats {
    /// Frames that passed validation.
    pub frames:            u64,
    pub checksum_failures: u64,
    /// Candidates whose message id has no known checksum seed.
    pub unseeded:          u64,
    /// Bytes dropped while hunting for a start marker.
    pub bytes_discarded:   u64,
    /// Valid frames that produced no message (unknown or malformed body).
    pub skipped:           u64,
}

/// Splits a byte stream into checksummed frames.
///
/// Bytes before a start marker are discarded. A candidate that fails validation
/// costs exactly one byte: the scan resumes right after its marker, so a corrupted
/// length can never swallow the frames that follow it.
#[derive(Debug, Clone, Default)]
pub struct FrameCodec {
    pub(crate) stats: Stats,
}

impl FrameCodec {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn stats(&self) -> Stats {
        self.stats
    }

    fn discard(&mut self, src: &mut BytesMut, count: usize) {
        tracing::trace!(count, bytes = %hex::encode(&src[..count]), "discarding");

        src.advance(count);
        self.stats.bytes_discarded += count as u64;
    }
}

impl Decoder for FrameCodec {
    type Error = Error;
    type Item = Frame;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        loop {
            match src.iter().position(|&b| b == MARKER) {
                Some(0) => {},
                Some(n) => self.discard(src, n),
                None => {
                    if !src.is_empty() {
                        self.discard(src, src.len());
                    }

                    return Ok(None);
                },
            }

            if src.len() < header::SIZE_BYTES {
                src.reserve(header::SIZE_BYTES - src.len());
                return Ok(None);
            }

            let payload_len = usize::from(src[1]);
            let payload_end = header::SIZE_BYTES + payload_len;
            let total = payload_end + crc::SIZE;

            if src.len() < total {
                src.reserve(total - src.len());
                return Ok(None);
            }

            let message_id = src[5];
            let crc_extra = match message::crc_extra(message_id) {
                Some(extra) => extra,
                None => {
                    tracing::trace!(message_id, "no checksum seed for message id");

                    self.stats.unseeded += 1;
                    self.discard(src, 1);
                    continue;
                },
            };

            let computed = crc::checksum(
                &src[1..header::SIZE_BYTES],
                &src[header::SIZE_BYTES..payload_end],
                crc_extra,
            );
            let received = u16::from_le_bytes([src[payload_end], src[payload_end + 1]]);

            if computed != received {
                tracing::debug!(
                    message_id,
                    computed = %format_args!("0x{:04x}", computed),
                    received = %format_args!("0x{:04x}", received),
                    "checksum mismatch",
                );

                self.stats.checksum_failures += 1;
                self.discard(src, 1);
                continue;
            }

            let mut raw = src.split_to(total);
            let header = Header::unpack_from_slice(&raw[..header::SIZE_BYTES])?;

            raw.truncate(payload_end);
            let payload = raw.split_off(header::SIZE_BYTES).freeze();

            self.stats.frames += 1;

            return Ok(Some(Frame {
                header,
                payload,
                checksum: received,
            }));
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        loop {
            if let Some(frame) = self.decode(src)? {
                return Ok(Some(frame));
            }

            if src.is_empty() {
                return Ok(None);
            }

            // The pending candidate can never complete; give up on its marker.
            self.discard(src, 1);
        }
    }
}

impl Encoder<Frame> for FrameCodec {
    type Error = Error;

    fn encode(&mut self, item: Frame, dst: &mut BytesMut) -> Result<(), Self::Error> {
        item.write_to(dst)?;
        Ok(())
    }
}
