//! Error taxonomy shared by both transports.

use embedded_hal::spi::ErrorKind;

/// Transport handle that could not be resolved at initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    /// Data pin of the bit-bang transport
    Pin,
    /// Timing clock of the bit-bang transport
    Clock,
    /// SPI bus of the framed transport
    Bus,
}

/// Strip driver errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A required handle was missing at construction.
    DeviceNotFound(Handle),

    /// More pixels (or wire bytes) were requested than the configured capacity.
    CapacityExceeded { requested: usize, capacity: usize },

    /// The transport cannot express the requested update.
    Unsupported,

    /// The underlying bus write failed.
    BusFailure(ErrorKind),

    /// The timing clock could not be enabled or disabled.
    ClockControlFailure,

    /// Channel positions do not form a permutation of the pixel stride.
    InvalidChannelOrder,

    /// The driver configuration is inconsistent with its buffers or bus.
    InvalidConfig,
}

impl Error {
    /// Wrap a bus error, keeping only its portable kind
    pub fn bus<E: embedded_hal::spi::Error>(err: &E) -> Self {
        Self::BusFailure(err.kind())
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::DeviceNotFound(handle) => write!(f, "{handle:?} handle not found"),
            Error::CapacityExceeded {
                requested,
                capacity,
            } => write!(f, "{requested} requested but strip capacity is {capacity}"),
            Error::Unsupported => write!(f, "operation not supported by this transport"),
            Error::BusFailure(kind) => write!(f, "bus write failed: {kind}"),
            Error::ClockControlFailure => write!(f, "timing clock control failed"),
            Error::InvalidChannelOrder => {
                write!(f, "channel order is not a permutation of the pixel stride")
            }
            Error::InvalidConfig => write!(f, "invalid strip configuration"),
        }
    }
}

impl core::error::Error for Error {}
