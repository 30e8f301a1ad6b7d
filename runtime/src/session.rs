use std::time::Duration;

use codec::Stats;
use message::{
    builder::{
        self,
        AttitudeSetpoint,
        PositionSetpoint,
    },
    Endpoint,
    Message,
};
use tokio::{
    io::{
        AsyncRead,
        AsyncWrite,
    },
    time::{
        Instant,
        MissedTickBehavior,
    },
};

use crate::{
    serial::{
        self,
        SerialConfig,
    },
    Cancel,
    Link,
};

/// How often the liveness probe checks for cancellation.
const CANCEL_POLL: Duration = Duration::from_millis(50);

#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, derive_more::Display)]
pub enum State {
    Connecting,
    AwaitingFirstMessage,
    Streaming,
    Disabling,
    Closed,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Serial(#[from] serial::Error),

    #[error("link closed before the first message arrived")]
    LinkClosed,

    #[error("no message from peer within {0:?}")]
    ProbeTimeout(Duration),

    #[error("reading from link")]
    Read(#[source] codec::Error),

    #[error("sending offboard {action} command")]
    Handshake {
        action: &'static str,
        #[source]
        source: codec::Error,
    },
}

/// Everything the controller needs, fixed for the life of the session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub local:         Endpoint,
    pub target:        Endpoint,
    pub interval:      Duration,
    pub position:      PositionSetpoint,
    /// Streamed after the position setpoint on every tick when present.
    pub attitude:      Option<AttitudeSetpoint>,
    /// Ticks streamed before offboard control is requested.
    pub pre_stream:    u32,
    /// Unbounded when `None`.
    pub probe_timeout: Option<Duration>,
    /// Only a HIGHRES_IMU ends the probe; anything else is logged and ignored.
    pub require_imu:   bool,
}

impl SessionConfig {
    pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(250);
    pub const DEFAULT_ALTITUDE: f32 = 1.;

    pub fn new(local: Endpoint, target: Endpoint) -> Self {
        Self {
            local,
            target,
            interval: Self::DEFAULT_INTERVAL,
            position: PositionSetpoint::hover(Self::DEFAULT_ALTITUDE),
            attitude: None,
            pre_stream: 0,
            probe_timeout: None,
            require_imu: false,
        }
    }
}

/// Outcome of a session that shut down cleanly.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// The message that proved the link alive; `None` if cancelled first.
    pub probe:             Option<Message>,
    pub setpoints_sent:    u64,
    pub setpoint_failures: u64,
    pub stats:             Stats,
}

pub struct Session {
    config: SessionConfig,
    cancel: Cancel,
    state:  State,

    setpoints_sent:    u64,
    setpoint_failures: u64,
}

impl Session {
    pub fn new(config: SessionConfig, cancel: Cancel) -> Self {
        Self {
            config,
            cancel,
            state: State::Connecting,
            setpoints_sent: 0,
            setpoint_failures: 0,
        }
    }

    #[inline]
    pub fn state(&self) -> State {
        self.state
    }

    /// Open the serial device and run the session over it.
    pub async fn connect(self, serial: &SerialConfig) -> Result<Report, Error> {
        let port = serial::open(serial)?;
        tracing::info!(path = %serial.path, baud = serial.baud, "serial device open");

        self.run(port).await
    }

    /// Probe, enable, stream until cancelled, disable, close.
    #[tracing::instrument(skip_all, fields(local = %self.config.local, peer = %self.config.target))]
    pub async fn run<T>(mut self, io: T) -> Result<Report, Error>
    where
        T: AsyncRead + AsyncWrite,
    {
        let mut link = Link::new(io, self.config.local);
        self.transition(State::AwaitingFirstMessage);

        let probe = match self.probe(&mut link).await? {
            Some(msg) => msg,
            None => {
                tracing::info!("cancelled while waiting for the link");

                self.transition(State::Closed);
                return Ok(self.finish(link, None).await);
            },
        };

        self.transition(State::Streaming);
        let enabled = self.stream(&mut link).await?;

        self.transition(State::Disabling);
        if enabled {
            self.handshake(&mut link, false).await?;
        } else {
            tracing::info!("offboard control was never requested, skipping disable");
        }

        self.transition(State::Closed);
        Ok(self.finish(link, Some(probe)).await)
    }

    fn transition(&mut self, next: State) {
        tracing::info!(from = %self.state, to = %next, "session state transition");
        self.state = next;
    }

    /// Wait for one decoded message (a HIGHRES_IMU if `require_imu`). `Ok(None)` if
    /// cancelled first.
    async fn probe<T>(&self, link: &mut Link<T>) -> Result<Option<Message>, Error>
    where
        T: AsyncRead + AsyncWrite,
    {
        let first = async {
            loop {
                match link.recv().await {
                    Some(Ok((header, msg))) => {
                        if self.config.require_imu && !matches!(msg, Message::HighresImu(_)) {
                            tracing::debug!(
                                from = %header.sender(),
                                message = msg.name(),
                                "ignored while waiting for HIGHRES_IMU"
                            );
                            continue;
                        }

                        return Ok((header, msg));
                    },
                    Some(Err(e)) => return Err(Error::Read(e)),
                    None => return Err(Error::LinkClosed),
                }
            }
        };

        let bounded = async {
            match self.config.probe_timeout {
                Some(limit) => match tokio::time::timeout(limit, first).await {
                    Ok(result) => result,
                    Err(_elapsed) => Err(Error::ProbeTimeout(limit)),
                },
                None => first.await,
            }
        };

        tokio::select! {
            result = bounded => {
                let (header, msg) = result?;

                match msg {
                    Message::HighresImu(ref imu) => {
                        tracing::info!(from = %header.sender(), "link up: {}", imu.display());
                    },
                    ref other => {
                        tracing::info!(from = %header.sender(), message = other.name(), "link up");
                    },
                }

                Ok(Some(msg))
            },
            _ = self.cancel.wait(CANCEL_POLL) => Ok(None),
        }
    }

    /// Stream setpoints until cancelled. Returns whether offboard control was requested.
    async fn stream<T>(&mut self, link: &mut Link<T>) -> Result<bool, Error>
    where
        T: AsyncRead + AsyncWrite,
    {
        let mut enabled = false;
        if self.config.pre_stream == 0 {
            self.handshake(link, true).await?;
            enabled = true;
        }

        let mut ticker = tokio::time::interval(self.config.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let started = Instant::now();
        let mut ticks = 0u32;

        loop {
            ticker.tick().await;

            if self.cancel.is_set() {
                tracing::info!(ticks, "cancellation observed");
                return Ok(enabled);
            }

            // Wraps like the autopilot's own boot clock.
            let time_boot_ms = started.elapsed().as_millis() as u32;
            self.send_setpoints(link, time_boot_ms).await;

            ticks = ticks.saturating_add(1);

            if !enabled && ticks >= self.config.pre_stream {
                self.handshake(link, true).await?;
                enabled = true;
            }
        }
    }

    async fn send_setpoints<T>(&mut self, link: &mut Link<T>, time_boot_ms: u32)
    where
        T: AsyncRead + AsyncWrite,
    {
        let target = self.config.target;

        let position = builder::position_target(target, time_boot_ms, &self.config.position);
        let result = link.send(position).await;
        util::trace_catch!(warn: result, time_boot_ms, "sending position setpoint");
        self.count(&result);

        if let Some(ref attitude) = self.config.attitude {
            let attitude = builder::attitude_target(target, time_boot_ms, attitude);
            let result = link.send(attitude).await;
            util::trace_catch!(warn: result, time_boot_ms, "sending attitude setpoint");
            self.count(&result);
        }
    }

    #[inline]
    fn count<U, E>(&mut self, result: &Result<U, E>) {
        match result {
            Ok(_) => self.setpoints_sent += 1,
            Err(_) => self.setpoint_failures += 1,
        }
    }

    async fn handshake<T>(&self, link: &mut Link<T>, enable: bool) -> Result<(), Error>
    where
        T: AsyncRead + AsyncWrite,
    {
        let action = if enable { "enable" } else { "disable" };
        let command = builder::guided_enable(self.config.target, enable);

        link.send(command).await.map_err(|source| Error::Handshake {
            action,
            source,
        })?;

        tracing::info!(peer = %self.config.target, action, "sent offboard command");

        Ok(())
    }

    async fn finish<T>(&self, link: Link<T>, probe: Option<Message>) -> Report
    where
        T: AsyncRead + AsyncWrite,
    {
        let stats = link.stats();
        util::trace_catch!(link.close().await, "closing link");

        Report {
            probe,
            setpoints_sent: self.setpoints_sent,
            setpoint_failures: self.setpoint_failures,
            stats,
        }
    }
}
