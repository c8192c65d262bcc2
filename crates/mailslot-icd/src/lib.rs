#![cfg_attr(not(feature = "use-std"), no_std)]
//! Control-plane contract for the mailslot device.
//!
//! Shared between the device side and host tooling: value types for
//! the config/diagnostic attributes plus the postcard-rpc endpoint
//! table they are served on. Values validate against the device
//! crate's limits, so an out-of-range admission limit never crosses
//! the wire as a well-formed message.

use mailslot::{MAX_SESSIONS_LIMIT, MIN_SESSIONS, SLOT_CAPACITY};
use postcard_rpc::endpoints;
use postcard_schema::Schema;
use serde::{Deserialize, Serialize};

/// Live session count reported by the diagnostic attribute.
#[derive(Debug, PartialEq, Serialize, Deserialize, Schema, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SessionCount(pub u8);

/// Admission limit carried by the config attribute.
#[derive(Debug, PartialEq, Serialize, Deserialize, Schema, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MaxSessions(pub u8);

impl TryFrom<u8> for MaxSessions {
    type Error = &'static str;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (MIN_SESSIONS..=MAX_SESSIONS_LIMIT).contains(&value) {
            Ok(MaxSessions(value))
        } else {
            Err("admission limit out of range")
        }
    }
}

/// Snapshot of the message slot for host-side diagnostics.
#[derive(Debug, PartialEq, Serialize, Deserialize, Schema, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SlotInfo {
    /// Total slot capacity in bytes.
    pub capacity: u16,
    /// Bytes of the pending message, 0 when drained.
    pub pending: u16,
}

impl SlotInfo {
    /// Snapshot for a device with the default slot capacity.
    pub fn with_pending(pending: usize) -> Self {
        Self { capacity: SLOT_CAPACITY as u16, pending: pending as u16 }
    }
}

endpoints! {
    list = ENDPOINT_LIST;
    omit_std = true;
    | EndpointTy              | RequestTy   | ResponseTy   | Path                        |
    | ----------              | ---------   | ----------   | ----                        |
    | SessionCountEndpoint    | ()          | SessionCount | "mailslot/sessions"         |
    | MaxSessionsGetEndpoint  | ()          | MaxSessions  | "mailslot/max_sessions"     |
    | MaxSessionsSetEndpoint  | MaxSessions | bool         | "mailslot/max_sessions/set" |
    | SlotInfoEndpoint        | ()          | SlotInfo     | "mailslot/slot"             |
}
