#![allow(dead_code)]

use std::{
    io,
    pin::Pin,
    sync::{
        Arc,
        Mutex,
    },
    task::{
        Context,
        Poll,
    },
};

use bytes::BytesMut;
use codec::{
    tokio_codec::Encoder,
    MessageCodec,
};
use message::{
    payload::SetPositionTargetLocalNed,
    Endpoint,
    Message,
};
use tokio::io::{
    AsyncRead,
    AsyncWrite,
    ReadBuf,
};
use tracing_subscriber::EnvFilter;

use offboard_runtime::{
    Cancel,
    SessionConfig,
};

const SET_POSITION_TARGET_LOCAL_NED: u8 = 84;

pub fn trace_init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn local() -> Endpoint {
    Endpoint::new(1, 50).unwrap()
}

pub fn autopilot() -> Endpoint {
    Endpoint::new(1, 1).unwrap()
}

pub fn config() -> SessionConfig {
    SessionConfig::new(local(), Endpoint::broadcast(1).unwrap())
}

/// Bytes of `msgs` as the autopilot would send them.
pub fn from_autopilot(msgs: impl IntoIterator<Item = Message>) -> Vec<u8> {
    let mut codec = MessageCodec::new(autopilot());
    let mut buf = BytesMut::new();

    for msg in msgs {
        codec.encode(msg, &mut buf).unwrap();
    }

    buf.to_vec()
}

pub fn enable_state(msg: &Message) -> Option<bool> {
    match msg {
        Message::CommandLong(cmd) => cmd.guided_enable_state(),
        _ => None,
    }
}

pub fn is_enable(msg: &Message) -> bool {
    enable_state(msg) == Some(true)
}

pub fn is_disable(msg: &Message) -> bool {
    enable_state(msg) == Some(false)
}

pub fn position(msg: &Message) -> Option<&SetPositionTargetLocalNed> {
    match msg {
        Message::SetPositionTargetLocalNed(sp) => Some(sp),
        _ => None,
    }
}

/// Everything a [`Scripted`] channel saw, one entry per accepted write.
#[derive(Debug, Default)]
pub struct Journal {
    pub writes:   Vec<Vec<u8>>,
    pub shutdown: bool,
}

/// A byte channel that serves fixed input once, then goes quiet, and fails chosen
/// writes. It also sets `cancel` once `cancel_after` setpoint writes were attempted.
pub struct Scripted {
    incoming:     Vec<u8>,
    journal:      Arc<Mutex<Journal>>,
    fail:         Vec<usize>,
    attempts:     usize,
    setpoints:    usize,
    cancel:       Cancel,
    cancel_after: usize,
}

impl Scripted {
    pub fn new(
        incoming: Vec<u8>,
        fail: Vec<usize>,
        cancel: Cancel,
        cancel_after: usize,
    ) -> (Self, Arc<Mutex<Journal>>) {
        let journal = Arc::new(Mutex::new(Journal::default()));

        let scripted = Self {
            incoming,
            journal: journal.clone(),
            fail,
            attempts: 0,
            setpoints: 0,
            cancel,
            cancel_after,
        };

        (scripted, journal)
    }
}

impl AsyncRead for Scripted {
    fn poll_read(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        if self.incoming.is_empty() {
            return Poll::Pending;
        }

        let n = buf.remaining().min(self.incoming.len());
        let chunk = self.incoming.drain(..n).collect::<Vec<_>>();
        buf.put_slice(&chunk);

        Poll::Ready(Ok(()))
    }
}

impl AsyncWrite for Scripted {
    fn poll_write(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        let attempt = self.attempts;
        self.attempts += 1;

        if buf.get(5) == Some(&SET_POSITION_TARGET_LOCAL_NED) {
            self.setpoints += 1;

            if self.setpoints == self.cancel_after {
                self.cancel.set();
            }
        }

        if self.fail.contains(&attempt) {
            return Poll::Ready(Err(io::Error::new(io::ErrorKind::BrokenPipe, "scripted failure")));
        }

        self.journal.lock().unwrap().writes.push(buf.to_vec());
        Poll::Ready(Ok(buf.len()))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        self.journal.lock().unwrap().shutdown = true;
        Poll::Ready(Ok(()))
    }
}

/// Decode every frame the session wrote through a [`Scripted`] channel.
pub fn journal_messages(journal: &Journal) -> Vec<Message> {
    use codec::tokio_codec::Decoder;

    let mut codec = MessageCodec::new(autopilot());
    let mut buf = BytesMut::new();
    let mut out = vec![];

    for write in &journal.writes {
        buf.extend_from_slice(write);
    }

    while let Some((_, msg)) = codec.decode_eof(&mut buf).unwrap() {
        out.push(msg);
    }

    out
}
