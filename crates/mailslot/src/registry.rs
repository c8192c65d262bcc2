//! Publication of the device's endpoints into an external namespace.
//!
//! The device itself never touches the OS namespace. A composition
//! layer hands in a [`Namespace`] implementation and gets back the
//! tokens needed to withdraw everything again. Bring-up publishes
//! the device channel first and the config attribute last; any
//! failure rolls back whatever was already published, in reverse,
//! before the error is returned, so a failed bring-up leaves no
//! trace.

/// Access mode an endpoint is published with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Access {
    ReadOnly,
    ReadWrite,
}

/// What to publish: a static name and the access the namespace
/// should grant on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EndpointDesc {
    pub name: &'static str,
    pub access: Access,
}

/// The device channel clients open sessions on.
pub const CHANNEL_ENDPOINT: EndpointDesc = EndpointDesc {
    name: "mailslot",
    access: Access::ReadWrite,
};

/// Read-only diagnostic reporting the live session count.
pub const SESSIONS_ENDPOINT: EndpointDesc = EndpointDesc {
    name: "mailslot_sessions",
    access: Access::ReadOnly,
};

/// Read-write config attribute carrying the admission limit.
pub const MAX_SESSIONS_ENDPOINT: EndpointDesc = EndpointDesc {
    name: "mailslot_max_sessions",
    access: Access::ReadWrite,
};

/// An external namespace endpoints can be published into.
///
/// `Token` is whatever the namespace needs to withdraw an entry
/// again. A failed `publish` must leave the namespace unchanged.
pub trait Namespace {
    type Token;
    type Error: core::fmt::Debug;

    fn publish(
        &mut self,
        desc: EndpointDesc,
    ) -> Result<Self::Token, Self::Error>;

    fn withdraw(&mut self, token: Self::Token);
}

/// Tokens for one fully published device.
pub struct Endpoints<NS: Namespace> {
    channel: NS::Token,
    sessions: NS::Token,
    max_sessions: NS::Token,
}

/// Publish the device channel and both attributes.
pub fn register<NS: Namespace>(
    ns: &mut NS,
) -> Result<Endpoints<NS>, NS::Error> {
    let channel = ns.publish(CHANNEL_ENDPOINT)?;

    let sessions = match ns.publish(SESSIONS_ENDPOINT) {
        Ok(token) => token,
        Err(err) => {
            #[cfg(feature = "defmt")]
            defmt::error!("mailslot: diagnostic endpoint failed, rolling back");
            ns.withdraw(channel);
            return Err(err);
        }
    };

    let max_sessions = match ns.publish(MAX_SESSIONS_ENDPOINT) {
        Ok(token) => token,
        Err(err) => {
            #[cfg(feature = "defmt")]
            defmt::error!("mailslot: config endpoint failed, rolling back");
            ns.withdraw(sessions);
            ns.withdraw(channel);
            return Err(err);
        }
    };

    Ok(Endpoints { channel, sessions, max_sessions })
}

/// Withdraw everything [`register`] published: the config attribute
/// first, then the diagnostic attribute, then the device channel.
pub fn unregister<NS: Namespace>(ns: &mut NS, endpoints: Endpoints<NS>) {
    ns.withdraw(endpoints.max_sessions);
    ns.withdraw(endpoints.sessions);
    ns.withdraw(endpoints.channel);
}
