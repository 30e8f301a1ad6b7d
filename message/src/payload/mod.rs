use bytes::{
    Buf,
    BufMut,
    BytesMut,
};

pub mod command;
pub mod setpoint;
pub mod telemetry;

pub use command::{
    CommandAck,
    CommandLong,
};
pub use setpoint::{
    SetAttitudeTarget,
    SetPositionTargetLocalNed,
};
pub use telemetry::{
    Attitude,
    Heartbeat,
    HighresImu,
    LocalPositionNed,
};

/// A fixed-layout message body, as defined by the message catalog.
pub trait Payload: Sized {
    const ID: u8;
    const CRC_EXTRA: u8;
    const LEN: usize;

    fn write(&self, dst: &mut BytesMut);
    fn read(src: &[u8]) -> Result<Self, crate::Error>;
}

/// A little-endian scalar (or array of scalars) inside a payload.
pub trait Field: Sized {
    const SIZE: usize;

    fn put(&self, dst: &mut BytesMut);
    fn get(src: &mut &[u8]) -> Self;
}

macro_rules! impl_field {
    ($ty:ty, $put:ident, $get:ident) => {
        impl Field for $ty {
            const SIZE: usize = ::std::mem::size_of::<$ty>();

            #[inline]
            fn put(&self, dst: &mut BytesMut) {
                dst.$put(*self)
            }

            #[inline]
            fn get(src: &mut &[u8]) -> Self {
                src.$get()
            }
        }
    };
}

impl_field!(u8, put_u8, get_u8);
impl_field!(u16, put_u16_le, get_u16_le);
impl_field!(u32, put_u32_le, get_u32_le);
impl_field!(u64, put_u64_le, get_u64_le);
impl_field!(f32, put_f32_le, get_f32_le);

impl<const N: usize> Field for [f32; N] {
    const SIZE: usize = N * <f32 as Field>::SIZE;

    fn put(&self, dst: &mut BytesMut) {
        self.iter().for_each(|v| v.put(dst));
    }

    fn get(src: &mut &[u8]) -> Self {
        let mut out = [0.; N];
        out.iter_mut().for_each(|v| *v = f32::get(src));

        out
    }
}

/// Declare a payload struct. Fields are listed in wire order.
#[macro_export]
macro_rules! payload {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident : id = $id:literal, crc_extra = $extra:literal {
            $( $(#[$fmeta:meta])* pub $field:ident : $ty:ty ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, PartialEq, Default)]
        $vis struct $name {
            $( $(#[$fmeta])* pub $field: $ty, )*
        }

        impl $crate::payload::Payload for $name {
            const ID: u8 = $id;
            const CRC_EXTRA: u8 = $extra;
            const LEN: usize = 0 $( + <$ty as $crate::payload::Field>::SIZE )*;

            fn write(&self, dst: &mut ::bytes::BytesMut) {
                dst.reserve(Self::LEN);
                $( $crate::payload::Field::put(&self.$field, dst); )*
            }

            fn read(src: &[u8]) -> Result<Self, $crate::Error> {
                if src.len() != Self::LEN {
                    return Err($crate::Error::Length {
                        id:       $id,
                        expected: Self::LEN,
                        got:      src.len(),
                    });
                }

                let mut src = src;

                Ok(Self {
                    $( $field: <$ty as $crate::payload::Field>::get(&mut src), )*
                })
            }
        }
    };
}
