use std::collections::VecDeque;

use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use mailslot::{ByteChannel, DeviceError, Direct, Mailslot, Transfer};

type TestDevice = Mailslot<NoopRawMutex>;
type TinyDevice = Mailslot<NoopRawMutex, 8>;

// ---------------------------------------------------------------------------
// Mock channel
// ---------------------------------------------------------------------------

/// Channel that follows a script: each transfer pops the number of
/// trailing bytes to drop. An empty script means full transfers.
struct ScriptedChannel {
    misses: VecDeque<usize>,
}

impl ScriptedChannel {
    fn new(misses: &[usize]) -> Self {
        Self { misses: misses.iter().copied().collect() }
    }
}

impl ByteChannel for ScriptedChannel {
    fn transfer(&mut self, src: &[u8], dst: &mut [u8]) -> usize {
        let miss = self.misses.pop_front().unwrap_or(0).min(src.len());
        let ok = src.len() - miss;
        dst[..ok].copy_from_slice(&src[..ok]);
        miss
    }
}

// ---------------------------------------------------------------------------
// Complete transfers
// ---------------------------------------------------------------------------

#[futures_test::test]
async fn write_then_read_round_trips() {
    let dev = TestDevice::new();
    let mut session = dev.open(Direct).unwrap();

    assert_eq!(session.write(b"hello").await, Ok(Transfer::Complete(5)));
    assert_eq!(dev.pending_len(), Some(5));

    let mut buf = [0u8; 10];
    assert_eq!(session.read(&mut buf).await, Transfer::Complete(5));
    assert_eq!(&buf[..5], b"hello");
}

#[futures_test::test]
async fn read_drains_exactly_once() {
    let dev = TestDevice::new();
    let mut session = dev.open(Direct).unwrap();
    session.write(b"ping").await.unwrap();

    let mut buf = [0u8; 16];
    assert_eq!(session.read(&mut buf).await, Transfer::Complete(4));
    assert_eq!(session.read(&mut buf).await, Transfer::Complete(0));
    assert_eq!(dev.pending_len(), Some(0));
}

#[futures_test::test]
async fn empty_slot_reads_zero_bytes() {
    let dev = TestDevice::new();
    let mut session = dev.open(Direct).unwrap();

    let mut buf = [0u8; 4];
    assert_eq!(session.read(&mut buf).await, Transfer::Complete(0));
}

#[futures_test::test]
async fn new_write_discards_unread_message() {
    let dev = TestDevice::new();
    let mut session = dev.open(Direct).unwrap();

    session.write(b"first message").await.unwrap();
    session.write(b"second").await.unwrap();

    let mut buf = [0u8; 32];
    assert_eq!(session.read(&mut buf).await, Transfer::Complete(6));
    assert_eq!(&buf[..6], b"second");
    assert_eq!(session.read(&mut buf).await, Transfer::Complete(0));
}

#[futures_test::test]
async fn short_reader_buffer_truncates_and_drains() {
    let dev = TestDevice::new();
    let mut session = dev.open(Direct).unwrap();
    session.write(b"hello world").await.unwrap();

    // The message is gone after a complete transfer, even when the
    // caller asked for fewer bytes than were pending.
    let mut buf = [0u8; 4];
    assert_eq!(session.read(&mut buf).await, Transfer::Complete(4));
    assert_eq!(&buf, b"hell");
    assert_eq!(session.read(&mut buf).await, Transfer::Complete(0));
}

// ---------------------------------------------------------------------------
// Capacity
// ---------------------------------------------------------------------------

#[futures_test::test]
async fn oversized_write_is_rejected_and_leaves_slot_alone() {
    let dev = TinyDevice::new();
    let mut session = dev.open(Direct).unwrap();
    session.write(b"hi").await.unwrap();

    // Exactly at capacity is already too much.
    assert_eq!(
        session.write(&[0u8; 8]).await,
        Err(DeviceError::TooLarge(8))
    );
    assert_eq!(
        session.write(&[0u8; 9]).await,
        Err(DeviceError::TooLarge(9))
    );

    let mut buf = [0u8; 8];
    assert_eq!(session.read(&mut buf).await, Transfer::Complete(2));
    assert_eq!(&buf[..2], b"hi");
}

#[futures_test::test]
async fn payload_one_under_capacity_fits() {
    let dev = TinyDevice::new();
    let mut session = dev.open(Direct).unwrap();

    assert_eq!(
        session.write(&[7u8; 7]).await,
        Ok(Transfer::Complete(7))
    );
    let mut buf = [0u8; 8];
    assert_eq!(session.read(&mut buf).await, Transfer::Complete(7));
    assert_eq!(&buf[..7], &[7u8; 7]);
}

// ---------------------------------------------------------------------------
// Short transfers
// ---------------------------------------------------------------------------

#[futures_test::test]
async fn short_write_reports_count_and_discards_slot() {
    let dev = TestDevice::new();
    let mut session = dev.open(ScriptedChannel::new(&[2])).unwrap();

    assert_eq!(session.write(b"hello").await, Ok(Transfer::Short(3)));

    // Partial messages are never retained.
    let mut buf = [0u8; 8];
    assert_eq!(session.read(&mut buf).await, Transfer::Complete(0));
}

#[futures_test::test]
async fn short_read_retains_message_for_retry() {
    let dev = TestDevice::new();
    let mut session = dev.open(ScriptedChannel::new(&[0, 2])).unwrap();
    session.write(b"hello").await.unwrap();

    let mut buf = [0u8; 8];
    let first = session.read(&mut buf).await;
    assert_eq!(first, Transfer::Short(3));
    assert_eq!(&buf[..3], b"hel");

    // The failed read did not clear the slot; the retry delivers the
    // whole message.
    assert_eq!(dev.pending_len(), Some(5));
    let mut buf = [0u8; 8];
    assert_eq!(session.read(&mut buf).await, Transfer::Complete(5));
    assert_eq!(&buf[..5], b"hello");
}

// ---------------------------------------------------------------------------
// End to end
// ---------------------------------------------------------------------------

#[futures_test::test]
async fn full_session_lifecycle() {
    let dev = TestDevice::new();

    let mut session = dev.open(Direct).unwrap();
    assert_eq!(dev.session_count(), 1);

    assert_eq!(session.write(b"hello").await, Ok(Transfer::Complete(5)));

    let mut buf = [0u8; 10];
    assert_eq!(session.read(&mut buf).await, Transfer::Complete(5));
    assert_eq!(&buf[..5], b"hello");
    assert_eq!(session.read(&mut buf).await, Transfer::Complete(0));

    session.close();
    assert_eq!(dev.session_count(), 0);
}
