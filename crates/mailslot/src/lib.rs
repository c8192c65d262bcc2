#![no_std]
//! Single-slot mailbox device with counted session admission.
//!
//! Models a character-device style component: clients open sessions
//! against a counted admission gate, and every session shares one
//! fixed-capacity message slot. A write replaces whatever message is
//! pending, a read drains it exactly once. Byte movement across the
//! trust boundary goes through the [`ByteChannel`] seam, so transfers
//! can fail partway the same way a user-space copy can.
//!
//! The device is generic over the embassy-sync `RawMutex` flavor and
//! has a `const` constructor, so it can live in a `static` next to
//! the executor or on the stack of a host test.

mod attr;
mod channel;
mod device;
mod error;
mod registry;
mod session;
mod slot;

pub use attr::{Attribute, MaxSessionsAttr, SessionCountAttr, ATTR_VALUE_CAP};
pub use channel::{ByteChannel, Direct};
pub use device::Mailslot;
pub use error::{AttrError, DeviceError};
pub use registry::{
    register, unregister, Access, EndpointDesc, Endpoints, Namespace,
    CHANNEL_ENDPOINT, MAX_SESSIONS_ENDPOINT, SESSIONS_ENDPOINT,
};
pub use session::Session;
pub use slot::Transfer;

/// Capacity of the message slot in bytes. The largest accepted
/// payload is one byte less.
pub const SLOT_CAPACITY: usize = 1024;

/// Lowest admission limit the config attribute accepts.
pub const MIN_SESSIONS: u8 = 1;

/// Highest admission limit the config attribute accepts.
pub const MAX_SESSIONS_LIMIT: u8 = 16;

/// Admission limit a fresh device starts with.
pub const DEFAULT_MAX_SESSIONS: u8 = MAX_SESSIONS_LIMIT;
