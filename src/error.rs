//! Error taxonomy shared by every driver in the crate.

/// Errors returned by board-support operations.
///
/// Every failure is reported at the call boundary; nothing is retried and
/// nothing crosses an interrupt boundary. Operations that fail have no
/// hardware effect unless stated otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BspError {
    /// LED or accelerometer axis identifier is out of range.
    InvalidChannel,

    /// The sensor bus collaborator reported that a read did not complete.
    SensorReadFailure,

    /// The core was used before peripheral configuration completed, or the
    /// configuration cannot produce the required tick.
    ConfigurationPrecondition,

    /// Brightness above 100% under
    /// [`BrightnessPolicy::Reject`](crate::config::BrightnessPolicy::Reject).
    BrightnessOutOfRange(u8),

    /// A pin or PWM channel driver reported an error.
    OutputFault,

    /// The accelerometer answered with an unexpected identity byte.
    UnexpectedDevice(u8),
}

impl core::fmt::Display for BspError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BspError::InvalidChannel => write!(f, "channel identifier out of range"),
            BspError::SensorReadFailure => write!(f, "sensor bus read failed"),
            BspError::ConfigurationPrecondition => {
                write!(f, "peripheral configuration incomplete or invalid")
            }
            BspError::BrightnessOutOfRange(percent) => {
                write!(f, "brightness {}% exceeds 100%", percent)
            }
            BspError::OutputFault => write!(f, "output driver reported a fault"),
            BspError::UnexpectedDevice(id) => {
                write!(f, "unexpected device identity 0x{:02x}", id)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BspError {}
