use core::fmt::Write as _;

use embassy_sync::blocking_mutex::raw::RawMutex;
use heapless::String;

use crate::device::Mailslot;
use crate::error::AttrError;

/// Capacity for a formatted attribute value.
pub const ATTR_VALUE_CAP: usize = 8;

/// A text get/set endpoint published next to the device channel.
///
/// `show` renders the current value, `store` applies caller-supplied
/// text. Attributes that never accept writes keep the default
/// `store`, which rejects every input.
pub trait Attribute {
    /// Render the current value.
    fn show(&self) -> String<ATTR_VALUE_CAP>;

    /// Apply `input`, returning the number of bytes consumed.
    fn store(&self, input: &[u8]) -> Result<usize, AttrError> {
        let _ = input;
        Err(AttrError::ReadOnly)
    }
}

/// Read-write attribute exposing the admission limit.
pub struct MaxSessionsAttr<'a, M: RawMutex, const N: usize> {
    dev: &'a Mailslot<M, N>,
}

impl<'a, M: RawMutex, const N: usize> MaxSessionsAttr<'a, M, N> {
    pub fn new(dev: &'a Mailslot<M, N>) -> Self {
        Self { dev }
    }
}

impl<M: RawMutex, const N: usize> Attribute for MaxSessionsAttr<'_, M, N> {
    fn show(&self) -> String<ATTR_VALUE_CAP> {
        let mut out = String::new();
        let _ = write!(out, "{}", self.dev.max_sessions());
        out
    }

    /// Empty input is a no-op. Otherwise the leading decimal digits
    /// are the value and anything after them is ignored; input with
    /// no leading digit at all is rejected.
    fn store(&self, input: &[u8]) -> Result<usize, AttrError> {
        if input.is_empty() {
            return Ok(0);
        }

        let value =
            parse_leading_decimal(input).ok_or(AttrError::NotANumber)?;
        let limit =
            u8::try_from(value).map_err(|_| AttrError::OutOfRange(value))?;
        self.dev.set_max_sessions(limit)?;
        Ok(input.len())
    }
}

/// Read-only attribute exposing the live session count.
pub struct SessionCountAttr<'a, M: RawMutex, const N: usize> {
    dev: &'a Mailslot<M, N>,
}

impl<'a, M: RawMutex, const N: usize> SessionCountAttr<'a, M, N> {
    pub fn new(dev: &'a Mailslot<M, N>) -> Self {
        Self { dev }
    }
}

impl<M: RawMutex, const N: usize> Attribute for SessionCountAttr<'_, M, N> {
    fn show(&self) -> String<ATTR_VALUE_CAP> {
        let mut out = String::new();
        let _ = write!(out, "{}", self.dev.session_count());
        out
    }
}

/// Parse the decimal digits at the start of `input`, strtoul-style.
/// Returns `None` when the first byte is not a digit. Accumulation
/// saturates, which routes absurd inputs into the out-of-range path.
fn parse_leading_decimal(input: &[u8]) -> Option<u32> {
    let mut value: u32 = 0;
    let mut seen = false;
    for &b in input {
        if !b.is_ascii_digit() {
            break;
        }
        seen = true;
        value = value.saturating_mul(10).saturating_add(u32::from(b - b'0'));
    }
    seen.then_some(value)
}
