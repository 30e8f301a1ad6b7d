pub use ::tokio_util::codec as tokio_codec;

mod error;
mod frame;
mod message_codec;

pub use self::{
    error::Error,
    frame::{
        FrameCodec,
        Stats,
    },
    message_codec::MessageCodec,
};
