use embassy_sync::blocking_mutex::raw::RawMutex;

use crate::channel::ByteChannel;
use crate::device::Mailslot;
use crate::error::DeviceError;
use crate::slot::Transfer;

/// One open session on a [`Mailslot`].
///
/// Holds the admission slot it was granted and the byte channel it
/// talks to its caller through. Dropping the session gives the
/// admission slot back.
pub struct Session<'a, M: RawMutex, C: ByteChannel, const N: usize> {
    dev: &'a Mailslot<M, N>,
    channel: C,
}

impl<'a, M: RawMutex, C: ByteChannel, const N: usize> Session<'a, M, C, N> {
    pub(crate) fn new(dev: &'a Mailslot<M, N>, channel: C) -> Self {
        Self { dev, channel }
    }

    /// Read the pending message into `buf`, draining the slot.
    ///
    /// An empty slot reads as `Complete(0)`. A short transfer leaves
    /// the message pending, so the same read can be attempted again.
    pub async fn read(&mut self, buf: &mut [u8]) -> Transfer {
        self.dev.read_slot(&mut self.channel, buf).await
    }

    /// Replace the pending message with `data`, whether or not the
    /// previous one was ever read.
    pub async fn write(
        &mut self,
        data: &[u8],
    ) -> Result<Transfer, DeviceError> {
        self.dev.write_slot(&mut self.channel, data).await
    }

    /// Close the session now instead of at end of scope.
    pub fn close(self) {}
}

impl<M: RawMutex, C: ByteChannel, const N: usize> Drop
    for Session<'_, M, C, N>
{
    fn drop(&mut self) {
        // A live session always has a matching acquire, so this only
        // reports NoActiveSession if release() was called out of
        // band; nothing useful can be done with it here.
        let _ = self.dev.release();
    }
}
