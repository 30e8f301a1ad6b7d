use bytes::BytesMut;
use packed_struct::PackingError;

pub mod builder;
pub mod crc;
pub mod endpoint;
mod frame;
pub mod header;
pub mod payload;

pub use endpoint::Endpoint;
pub use frame::{
    Frame,
    MAX_FRAME,
    MAX_PAYLOAD,
};
pub use header::Header;

use crate::payload::*;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("system id {0} out of range (0..=127)")]
    SystemId(u8),

    #[error("message {id}: expected {expected} payload bytes, got {got}")]
    Length {
        id:       u8,
        expected: usize,
        got:      usize,
    },

    #[error(transparent)]
    Packing(#[from] PackingError),
}

macro_rules! catalog {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        /// Every message type this session understands.
        #[derive(Debug, Copy, Clone, PartialEq)]
        pub enum Message {
            $( $variant($ty), )*
        }

        impl Message {
            #[inline]
            pub fn id(&self) -> u8 {
                match self {
                    $( Self::$variant(_) => <$ty as Payload>::ID, )*
                }
            }

            #[inline]
            pub fn name(&self) -> &'static str {
                match self {
                    $( Self::$variant(_) => stringify!($variant), )*
                }
            }

            #[inline]
            fn crc_extra(&self) -> u8 {
                match self {
                    $( Self::$variant(_) => <$ty as Payload>::CRC_EXTRA, )*
                }
            }

            fn write_payload(&self, dst: &mut BytesMut) {
                match self {
                    $( Self::$variant(p) => p.write(dst), )*
                }
            }

            fn decoded_crc_extra(id: u8) -> Option<u8> {
                $(
                    if id == <$ty as Payload>::ID {
                        return Some(<$ty as Payload>::CRC_EXTRA);
                    }
                )*

                None
            }

            fn read(id: u8, src: &[u8]) -> Option<Result<Self, Error>> {
                $(
                    if id == <$ty as Payload>::ID {
                        return Some(<$ty as Payload>::read(src).map(Self::$variant));
                    }
                )*

                None
            }
        }

        $(
            impl From<$ty> for Message {
                #[inline]
                fn from(p: $ty) -> Self {
                    Self::$variant(p)
                }
            }
        )*
    };
}

catalog! {
    Heartbeat(Heartbeat),
    Attitude(Attitude),
    LocalPositionNed(LocalPositionNed),
    CommandLong(CommandLong),
    CommandAck(CommandAck),
    SetAttitudeTarget(SetAttitudeTarget),
    SetPositionTargetLocalNed(SetPositionTargetLocalNed),
    HighresImu(HighresImu),
}

/// Seeds for frames that are validated and consumed but never decoded.
const SKIP_ONLY: &[(u8, u8)] = &[
    (1, 124),   // SYS_STATUS
    (2, 137),   // SYSTEM_TIME
    (22, 220),  // PARAM_VALUE
    (24, 24),   // GPS_RAW_INT
    (26, 170),  // SCALED_IMU
    (27, 144),  // RAW_IMU
    (29, 115),  // SCALED_PRESSURE
    (31, 246),  // ATTITUDE_QUATERNION
    (33, 104),  // GLOBAL_POSITION_INT
    (36, 222),  // SERVO_OUTPUT_RAW
    (42, 28),   // MISSION_CURRENT
    (62, 183),  // NAV_CONTROLLER_OUTPUT
    (65, 118),  // RC_CHANNELS
    (74, 20),   // VFR_HUD
    (83, 22),   // ATTITUDE_TARGET
    (85, 140),  // POSITION_TARGET_LOCAL_NED
    (87, 150),  // POSITION_TARGET_GLOBAL_INT
    (141, 47),  // ALTITUDE
    (147, 154), // BATTERY_STATUS
    (245, 130), // EXTENDED_SYS_STATE
    (253, 83),  // STATUSTEXT
];

/// Checksum seed for `id`, if the catalog knows the type at all.
pub fn crc_extra(id: u8) -> Option<u8> {
    Message::decoded_crc_extra(id).or_else(|| {
        SKIP_ONLY.iter().find(|&&(known, _)| known == id).map(|&(_, extra)| extra)
    })
}

/// Frame `msg` as sent by `sender`.
pub fn encode(sender: Endpoint, seq: u8, msg: &Message) -> Result<Frame, Error> {
    let mut payload = BytesMut::new();
    msg.write_payload(&mut payload);

    debug_assert!(payload.len() <= MAX_PAYLOAD);
    let header = Header::new(sender, seq, msg.id(), payload.len() as u8);

    Ok(Frame::seal(header, payload.freeze(), msg.crc_extra())?)
}

/// `Ok(None)` when the frame's type has no decoded variant.
pub fn decode(frame: &Frame) -> Result<Option<Message>, Error> {
    Message::read(frame.header.message_id, &frame.payload).transpose()
}
