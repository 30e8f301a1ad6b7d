use std::time::Duration;

use message::{
    builder::{
        AttitudeSetpoint,
        PositionSetpoint,
    },
    Endpoint,
};
use runtime::{
    SerialConfig,
    SessionConfig,
};
use tokio_serial::{
    DataBits,
    StopBits,
};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {which} endpoint")]
    Endpoint {
        which:  &'static str,
        #[source]
        source: message::Error,
    },

    #[error("baud rate must be positive")]
    Baud,

    #[error("unsupported data bits: {0} (expected 5 to 8)")]
    DataBits(u8),

    #[error("unsupported stop bits: {0} (expected 1 or 2)")]
    StopBits(u8),

    #[error("setpoint interval must be positive")]
    Interval,

    #[error("probe timeout must be a positive number of seconds, got {0}")]
    ProbeTimeout(f64),
}

/// Stream offboard setpoints to an autopilot over a serial link.
#[derive(Debug, Clone, PartialEq, structopt::StructOpt)]
pub struct Options {
    /// Serial device path.
    #[structopt(short, long, default_value = "/dev/ttyUSB0")]
    pub device: String,

    /// Line rate; non-standard rates are passed to the driver as-is.
    #[structopt(short, long, default_value = "57600")]
    pub baud: u32,

    #[structopt(long, default_value = "8")]
    pub data_bits: u8,

    #[structopt(long, default_value = "1")]
    pub stop_bits: u8,

    /// Even parity.
    #[structopt(long)]
    pub parity: bool,

    /// RTS/CTS hardware flow control.
    #[structopt(long)]
    pub flow_control: bool,

    #[structopt(long, default_value = "1")]
    pub sysid: u8,

    #[structopt(long, default_value = "50")]
    pub compid: u8,

    #[structopt(long, default_value = "1")]
    pub target_sysid: u8,

    /// 0 addresses every component of the target system.
    #[structopt(long, default_value = "0")]
    pub target_compid: u8,

    #[structopt(long, default_value = "250")]
    pub interval_ms: u64,

    /// Fail if the autopilot stays silent this many seconds. Waits forever if unset.
    #[structopt(long)]
    pub probe_timeout: Option<f64>,

    /// Keep probing until a HIGHRES_IMU arrives instead of accepting any message.
    #[structopt(long)]
    pub require_imu: bool,

    /// Setpoint ticks to stream before requesting offboard control.
    #[structopt(long, default_value = "0")]
    pub pre_stream: u32,

    /// Also stream a level attitude target every tick.
    #[structopt(long)]
    pub attitude: bool,

    /// Local NED target, meters.
    #[structopt(long, default_value = "0", allow_hyphen_values = true)]
    pub x: f32,

    #[structopt(long, default_value = "0", allow_hyphen_values = true)]
    pub y: f32,

    /// Down is positive: -1 holds one meter above the origin.
    #[structopt(long, default_value = "-1", allow_hyphen_values = true)]
    pub z: f32,

    /// Radians.
    #[structopt(long, default_value = "0", allow_hyphen_values = true)]
    pub yaw: f32,
}

impl Options {
    pub fn serial_config(&self) -> Result<SerialConfig, ConfigError> {
        if self.baud == 0 {
            return Err(ConfigError::Baud);
        }

        let data_bits = match self.data_bits {
            5 => DataBits::Five,
            6 => DataBits::Six,
            7 => DataBits::Seven,
            8 => DataBits::Eight,
            other => return Err(ConfigError::DataBits(other)),
        };

        let stop_bits = match self.stop_bits {
            1 => StopBits::One,
            2 => StopBits::Two,
            other => return Err(ConfigError::StopBits(other)),
        };

        Ok(SerialConfig {
            path: self.device.clone(),
            baud: self.baud,
            data_bits,
            stop_bits,
            parity: self.parity,
            hardware_flow_control: self.flow_control,
        })
    }

    pub fn session_config(&self) -> Result<SessionConfig, ConfigError> {
        let local = Endpoint::new(self.sysid, self.compid).map_err(|source| {
            ConfigError::Endpoint {
                which: "local",
                source,
            }
        })?;

        let target = Endpoint::new(self.target_sysid, self.target_compid).map_err(|source| {
            ConfigError::Endpoint {
                which: "target",
                source,
            }
        })?;

        if self.interval_ms == 0 {
            return Err(ConfigError::Interval);
        }

        let probe_timeout = self
            .probe_timeout
            .map(|secs| match Duration::try_from_secs_f64(secs) {
                Ok(limit) if !limit.is_zero() => Ok(limit),
                _ => Err(ConfigError::ProbeTimeout(secs)),
            })
            .transpose()?;

        Ok(SessionConfig {
            interval: Duration::from_millis(self.interval_ms),
            position: PositionSetpoint {
                x: self.x,
                y: self.y,
                z: self.z,
                yaw: self.yaw,
                ..Default::default()
            },
            attitude: self.attitude.then(AttitudeSetpoint::default),
            pre_stream: self.pre_stream,
            probe_timeout,
            require_imu: self.require_imu,
            ..SessionConfig::new(local, target)
        })
    }
}
