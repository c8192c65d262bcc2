use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::mutex::Mutex;
use portable_atomic::{AtomicU8, Ordering};

use crate::channel::ByteChannel;
use crate::error::{AttrError, DeviceError};
use crate::session::Session;
use crate::slot::{Slot, Transfer};
use crate::{DEFAULT_MAX_SESSIONS, MAX_SESSIONS_LIMIT, MIN_SESSIONS, SLOT_CAPACITY};

/// Single-slot mailbox device.
///
/// One shared instance serves every client: admission is a counted
/// gate up to a configurable limit, and all admitted sessions share
/// the one message slot behind a mutex. Generic over the `RawMutex`
/// flavor so the same code runs under an embedded executor or in a
/// host test, and over the slot capacity `N`.
///
/// Admission is a lock-free compare-and-swap, so [`acquire`] and
/// [`release`] are synchronous and usable from `Drop`; only the slot
/// transfers take the mutex.
///
/// [`acquire`]: Mailslot::acquire
/// [`release`]: Mailslot::release
pub struct Mailslot<M: RawMutex, const N: usize = SLOT_CAPACITY> {
    slot: Mutex<M, Slot<N>>,
    sessions: AtomicU8,
    max_sessions: AtomicU8,
}

impl<M: RawMutex, const N: usize> Mailslot<M, N> {
    /// Create an idle device: no sessions, empty slot, default limit.
    pub const fn new() -> Self {
        Self {
            slot: Mutex::new(Slot::new()),
            sessions: AtomicU8::new(0),
            max_sessions: AtomicU8::new(DEFAULT_MAX_SESSIONS),
        }
    }

    /// Admit one session, or fail with [`DeviceError::Busy`] when the
    /// limit is reached. Returns the new session count.
    ///
    /// The swap loop re-reads the limit on every retry, so two
    /// concurrent acquires can never overshoot it together.
    pub fn acquire(&self) -> Result<u8, DeviceError> {
        self.sessions
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| {
                if n < self.max_sessions.load(Ordering::Acquire) {
                    Some(n + 1)
                } else {
                    None
                }
            })
            .map(|prev| {
                let now = prev + 1;
                #[cfg(feature = "defmt")]
                defmt::debug!("mailslot: session opened, count={=u8}", now);
                now
            })
            .map_err(|_| {
                #[cfg(feature = "defmt")]
                defmt::error!("mailslot: busy, admission limit reached");
                DeviceError::Busy
            })
    }

    /// Let one session go. Returns the new session count, or
    /// [`DeviceError::NoActiveSession`] when none is open.
    pub fn release(&self) -> Result<u8, DeviceError> {
        self.sessions
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| {
                n.checked_sub(1)
            })
            .map(|prev| {
                let now = prev - 1;
                #[cfg(feature = "defmt")]
                defmt::debug!("mailslot: session closed, count={=u8}", now);
                now
            })
            .map_err(|_| DeviceError::NoActiveSession)
    }

    /// Open a session: admission plus an RAII handle that reads and
    /// writes the slot through `channel` and releases itself on drop.
    pub fn open<C: ByteChannel>(
        &self,
        channel: C,
    ) -> Result<Session<'_, M, C, N>, DeviceError> {
        self.acquire()?;
        Ok(Session::new(self, channel))
    }

    /// Sessions currently admitted (single atomic snapshot).
    pub fn session_count(&self) -> u8 {
        self.sessions.load(Ordering::Acquire)
    }

    /// Current admission limit.
    pub fn max_sessions(&self) -> u8 {
        self.max_sessions.load(Ordering::Acquire)
    }

    /// Replace the admission limit.
    ///
    /// Lowering it below the live session count does not evict
    /// anyone; the gate simply stays shut until the count drops under
    /// the new limit.
    pub fn set_max_sessions(&self, limit: u8) -> Result<(), AttrError> {
        if !(MIN_SESSIONS..=MAX_SESSIONS_LIMIT).contains(&limit) {
            return Err(AttrError::OutOfRange(limit as u32));
        }
        self.max_sessions.store(limit, Ordering::Release);
        #[cfg(feature = "defmt")]
        defmt::debug!("mailslot: admission limit set to {=u8}", limit);
        Ok(())
    }

    /// Bytes pending in the slot right now, or `None` when a
    /// transfer holds the slot (best effort, never blocks).
    pub fn pending_len(&self) -> Option<usize> {
        self.slot.try_lock().ok().map(|slot| slot.pending())
    }

    pub(crate) async fn write_slot<C: ByteChannel>(
        &self,
        channel: &mut C,
        data: &[u8],
    ) -> Result<Transfer, DeviceError> {
        let mut slot = self.slot.lock().await;
        let res = slot.store(channel, data);
        #[cfg(feature = "defmt")]
        match &res {
            Ok(t) if t.is_short() => defmt::error!(
                "mailslot: short write, {=usize} of {=usize} bytes taken",
                t.bytes(),
                data.len()
            ),
            Ok(t) => defmt::debug!("mailslot: wrote {=usize} bytes", t.bytes()),
            Err(e) => defmt::error!("mailslot: write rejected: {:?}", e),
        }
        res
    }

    pub(crate) async fn read_slot<C: ByteChannel>(
        &self,
        channel: &mut C,
        buf: &mut [u8],
    ) -> Transfer {
        let mut slot = self.slot.lock().await;
        let res = slot.drain(channel, buf);
        #[cfg(feature = "defmt")]
        if res.is_short() {
            defmt::error!(
                "mailslot: short read, {=usize} bytes delivered",
                res.bytes()
            );
        } else {
            defmt::debug!("mailslot: read {=usize} bytes", res.bytes());
        }
        res
    }
}

impl<M: RawMutex, const N: usize> Default for Mailslot<M, N> {
    fn default() -> Self {
        Self::new()
    }
}
