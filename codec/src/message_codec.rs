use bytes::BytesMut;
use message::{
    Endpoint,
    Frame,
    Header,
    Message,
};
use tokio_util::codec::{
    Decoder,
    Encoder,
};

use crate::{
    Error,
    FrameCodec,
    Stats,
};

/// Typed messages on top of [`FrameCodec`].
///
/// Valid frames whose body is unknown to the catalog, or whose length disagrees with
/// it, are consumed and skipped. Outgoing messages are stamped with `sender` and a
/// wrapping sequence number.
#[derive(Debug, Clone)]
pub struct MessageCodec {
    frames: FrameCodec,
    sender: Endpoint,
    seq:    u8,
}

impl MessageCodec {
    #[inline]
    pub fn new(sender: Endpoint) -> Self {
        Self {
            frames: FrameCodec::new(),
            sender,
            seq: 0,
        }
    }

    #[inline]
    pub fn sender(&self) -> Endpoint {
        self.sender
    }

    #[inline]
    pub fn stats(&self) -> Stats {
        self.frames.stats()
    }

    fn accept(&mut self, frame: Frame) -> Option<(Header, Message)> {
        match message::decode(&frame) {
            Ok(Some(msg)) => Some((frame.header, msg)),
            Ok(None) => {
                tracing::trace!(%frame, "skipping unrecognized message");

                self.frames.stats.skipped += 1;
                None
            },
            Err(e) => {
                tracing::debug!(error = %e, %frame, "dropping malformed message");

                self.frames.stats.skipped += 1;
                None
            },
        }
    }
}

impl Decoder for MessageCodec {
    type Error = Error;
    type Item = (Header, Message);

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        while let Some(frame) = self.frames.decode(src)? {
            if let Some(item) = self.accept(frame) {
                return Ok(Some(item));
            }
        }

        Ok(None)
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        while let Some(frame) = self.frames.decode_eof(src)? {
            if let Some(item) = self.accept(frame) {
                return Ok(Some(item));
            }
        }

        Ok(None)
    }
}

impl<T> Encoder<T> for MessageCodec
where
    T: Into<Message>,
{
    type Error = Error;

    fn encode(&mut self, item: T, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let frame = message::encode(self.sender, self.seq, &item.into())?;
        frame.write_to(dst)?;

        self.seq = self.seq.wrapping_add(1);

        Ok(())
    }
}
