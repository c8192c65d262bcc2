/// Errors returned by the device channel operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceError {
    /// Every admission slot is taken.
    Busy,
    /// Write payload of this many bytes does not fit the slot.
    TooLarge(usize),
    /// Release without a matching successful acquire.
    NoActiveSession,
}

impl core::fmt::Display for DeviceError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DeviceError::Busy => {
                write!(f, "too many concurrent sessions")
            }
            DeviceError::TooLarge(len) => {
                write!(f, "payload of {} bytes does not fit the slot", len)
            }
            DeviceError::NoActiveSession => {
                write!(f, "release without an active session")
            }
        }
    }
}

/// Errors returned by the text attribute endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AttrError {
    /// Input does not start with a decimal digit.
    NotANumber,
    /// Parsed value falls outside the accepted range.
    OutOfRange(u32),
    /// The attribute does not accept writes.
    ReadOnly,
}

impl core::fmt::Display for AttrError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            AttrError::NotANumber => {
                write!(f, "expected a decimal integer")
            }
            AttrError::OutOfRange(value) => {
                write!(f, "value {} is out of range", value)
            }
            AttrError::ReadOnly => {
                write!(f, "attribute is read-only")
            }
        }
    }
}
