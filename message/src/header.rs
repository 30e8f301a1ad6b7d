use packed_struct::{
    prelude::*,
    PackedStructInfo,
    PackingError,
    PackingResult,
};

use crate::Endpoint;

pub const SIZE_BYTES: usize = 6;

/// First byte of every frame.
pub const MARKER: u8 = 0xfe;

/// The start marker as a header field. Unpacking any other byte fails.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Marker;

impl PackedStruct for Marker {
    type ByteArray = [u8; 1];

    #[inline]
    fn pack(&self) -> PackingResult<Self::ByteArray> {
        Ok([MARKER])
    }

    fn unpack(src: &Self::ByteArray) -> PackingResult<Self> {
        match src[0] {
            MARKER => Ok(Self),
            got => {
                tracing::trace!(got, "not a start marker");
                Err(PackingError::InvalidValue)
            },
        }
    }
}

impl PackedStructInfo for Marker {
    #[inline]
    fn packed_bits() -> usize {
        8
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PackedStruct)]
#[packed_struct(bit_numbering = "msb0", size_bytes = "6", endian = "lsb")]
pub struct Header {
    #[packed_field(size_bytes = "1")]
    pub marker:       Marker,
    pub len:          u8,
    pub seq:          u8,
    pub system_id:    u8,
    pub component_id: u8,
    pub message_id:   u8,
}

impl Header {
    #[inline]
    pub fn new(sender: Endpoint, seq: u8, message_id: u8, len: u8) -> Self {
        Self {
            marker: Marker,
            len,
            seq,
            system_id: sender.system,
            component_id: sender.component,
            message_id,
        }
    }

    #[inline]
    pub fn sender(&self) -> Endpoint {
        Endpoint {
            system:    self.system_id,
            component: self.component_id,
        }
    }

    #[inline]
    pub fn display(&self) -> String {
        format!(
            "[seq {}] {}/{} msg {} ({}B)",
            self.seq, self.system_id, self.component_id, self.message_id, self.len
        )
    }
}

#[cfg(test)]
mod test {
    use packed_struct::PackedStructInfo;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn size_matches_layout() {
        assert_eq!(Header::packed_bits() / 8, SIZE_BYTES);
    }

    #[test]
    fn marker_only_accepts_0xfe() {
        assert_eq!(Marker.pack(), Ok([0xfe]));

        for b in 0..=u8::MAX {
            assert_eq!(Marker::unpack(&[b]).is_ok(), b == MARKER);
        }
    }

    #[test]
    fn field_order() {
        let header = Header::new(Endpoint::new(1, 50).unwrap(), 7, 76, 33);

        assert_eq!(header.pack().unwrap(), [0xfe, 33, 7, 1, 50, 76]);
    }

    proptest! {
        #[test]
        fn unpack_pack_equivalence(data in any::<[u8; 6]>()) {
            match Header::unpack(&data) {
                Ok(hdr) => {
                    prop_assert_eq!(data[0], 0xfe);
                    prop_assert_eq!(Ok(data), hdr.pack());
                },
                Err(_e) => prop_assert_ne!(data[0], 0xfe),
            }
        }
    }
}
