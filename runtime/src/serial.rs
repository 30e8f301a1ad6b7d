use tokio_serial::{
    DataBits,
    ErrorKind,
    FlowControl,
    Parity,
    SerialStream,
    StopBits,
};

pub const DEFAULT_PATH: &str = "/dev/ttyUSB0";
pub const DEFAULT_BAUD: u32 = 57600;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("opening serial device {path}")]
    CannotOpen {
        path:   String,
        #[source]
        source: tokio_serial::Error,
    },

    #[error("configuring serial device {path}")]
    CannotConfigure {
        path:   String,
        #[source]
        source: tokio_serial::Error,
    },
}

/// Line parameters for the byte channel. Baud is passed through as a raw rate, so
/// non-standard high speeds work wherever the driver supports them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerialConfig {
    pub path:                  String,
    pub baud:                  u32,
    pub data_bits:             DataBits,
    pub stop_bits:             StopBits,
    /// Even parity when set.
    pub parity:                bool,
    pub hardware_flow_control: bool,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            path:                  DEFAULT_PATH.to_owned(),
            baud:                  DEFAULT_BAUD,
            data_bits:             DataBits::Eight,
            stop_bits:             StopBits::One,
            parity:                false,
            hardware_flow_control: false,
        }
    }
}

impl SerialConfig {
    #[inline]
    fn parity(&self) -> Parity {
        if self.parity {
            Parity::Even
        } else {
            Parity::None
        }
    }

    #[inline]
    fn flow_control(&self) -> FlowControl {
        if self.hardware_flow_control {
            FlowControl::Hardware
        } else {
            FlowControl::None
        }
    }
}

/// Open and configure the device. Must be called from within a tokio runtime.
#[tracing::instrument(skip(config), fields(path = %config.path, baud = config.baud))]
pub fn open(config: &SerialConfig) -> Result<SerialStream, Error> {
    let builder = tokio_serial::new(&config.path, config.baud)
        .data_bits(config.data_bits)
        .stop_bits(config.stop_bits)
        .parity(config.parity())
        .flow_control(config.flow_control());

    #[cfg_attr(not(unix), allow(unused_mut))]
    let mut stream = SerialStream::open(&builder).map_err(|source| {
        let path = config.path.clone();

        match source.kind() {
            ErrorKind::InvalidInput => Error::CannotConfigure {
                path,
                source,
            },
            _ => Error::CannotOpen {
                path,
                source,
            },
        }
    })?;

    #[cfg(unix)]
    stream.set_exclusive(true).map_err(|source| Error::CannotConfigure {
        path: config.path.clone(),
        source,
    })?;

    tracing::debug!(
        data_bits = ?config.data_bits,
        stop_bits = ?config.stop_bits,
        parity = config.parity,
        flow_control = config.hardware_flow_control,
        "serial device configured"
    );

    Ok(stream)
}
