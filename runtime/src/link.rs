use bytes::BytesMut;
use codec::{
    tokio_codec::{
        Encoder,
        FramedRead,
    },
    MessageCodec,
    Stats,
};
use futures::StreamExt;
use message::{
    Endpoint,
    Header,
    Message,
    MAX_FRAME,
};
use tokio::io::{
    AsyncRead,
    AsyncWrite,
    AsyncWriteExt,
    ReadHalf,
    WriteHalf,
};

/// Framed message traffic over one byte channel.
///
/// Sends are unbuffered: each frame is written and drained before `send` returns,
/// so frames reach the wire in call order.
pub struct Link<T> {
    reader:   FramedRead<ReadHalf<T>, MessageCodec>,
    writer:   WriteHalf<T>,
    outgoing: MessageCodec,
    scratch:  BytesMut,
}

impl<T> Link<T>
where
    T: AsyncRead + AsyncWrite,
{
    pub fn new(io: T, local: Endpoint) -> Self {
        let (read, write) = tokio::io::split(io);

        Self {
            reader:   FramedRead::new(read, MessageCodec::new(local)),
            writer:   write,
            outgoing: MessageCodec::new(local),
            scratch:  BytesMut::with_capacity(MAX_FRAME),
        }
    }

    /// Next decoded message, or `None` once the peer closes the channel.
    #[inline]
    pub async fn recv(&mut self) -> Option<Result<(Header, Message), codec::Error>> {
        self.reader.next().await
    }

    /// Frame, write and drain one message. A failed send drops the frame.
    pub async fn send(&mut self, msg: impl Into<Message>) -> Result<usize, codec::Error> {
        let msg = msg.into();

        self.scratch.clear();
        self.outgoing.encode(msg, &mut self.scratch)?;

        self.writer.write_all(&self.scratch).await?;
        self.writer.flush().await?;

        tracing::trace!(message = msg.name(), len = self.scratch.len(), "sent");

        Ok(self.scratch.len())
    }

    /// Counters from the receive side.
    #[inline]
    pub fn stats(&self) -> Stats {
        self.reader.decoder().stats()
    }

    /// Shut down the write side and release the channel. The channel is released
    /// even if the shutdown fails.
    pub async fn close(mut self) -> std::io::Result<()> {
        self.writer.shutdown().await
    }
}
