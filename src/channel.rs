//! Button edge queue for `no_std` environments.
//!
//! The debounced input runs in interrupt context and publishes press and
//! release edges; the control tick drains them. Built on `critical-section`
//! and `heapless::Deque`, so it is interrupt safe without an allocator.

use core::cell::RefCell;

use critical_section::Mutex;
use embassy_time::Instant;
use heapless::Deque;

/// Edge reported by the debounced button input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEdge {
    Pressed(Instant),
    Released(Instant),
}

/// Error returned when the queue is full; carries the rejected edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrySendError(pub ButtonEdge);

/// Error returned when the queue is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TryReceiveError;

/// A bounded queue of button edges.
pub struct EdgeChannel<const SIZE: usize> {
    inner: Mutex<RefCell<Deque<ButtonEdge, SIZE>>>,
}

impl<const SIZE: usize> EdgeChannel<SIZE> {
    /// Create a new empty queue.
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Handle for the interrupt side.
    pub const fn sender(&self) -> EdgeSender<'_, SIZE> {
        EdgeSender { channel: self }
    }

    /// Handle for the control tick.
    pub const fn receiver(&self) -> EdgeReceiver<'_, SIZE> {
        EdgeReceiver { channel: self }
    }

    /// Queue an edge.
    ///
    /// The newest edge is rejected when the queue is full, so a burst of
    /// bounces never evicts an edge the tick has not seen yet.
    pub fn try_send(&self, edge: ButtonEdge) -> Result<(), TrySendError> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.push_back(edge).map_err(TrySendError)
        })
    }

    /// Take the oldest queued edge.
    pub fn try_receive(&self) -> Result<ButtonEdge, TryReceiveError> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.pop_front().ok_or(TryReceiveError)
        })
    }

    /// Number of queued edges.
    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<const SIZE: usize> Default for EdgeChannel<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// Sending handle for an [`EdgeChannel`].
#[derive(Clone, Copy)]
pub struct EdgeSender<'a, const SIZE: usize> {
    channel: &'a EdgeChannel<SIZE>,
}

impl<const SIZE: usize> EdgeSender<'_, SIZE> {
    pub fn try_send(&self, edge: ButtonEdge) -> Result<(), TrySendError> {
        self.channel.try_send(edge)
    }

    /// Report a press at `at`.
    pub fn pressed(&self, at: Instant) -> Result<(), TrySendError> {
        self.try_send(ButtonEdge::Pressed(at))
    }

    /// Report a release at `at`.
    pub fn released(&self, at: Instant) -> Result<(), TrySendError> {
        self.try_send(ButtonEdge::Released(at))
    }
}

/// Receiving handle for an [`EdgeChannel`].
#[derive(Clone, Copy)]
pub struct EdgeReceiver<'a, const SIZE: usize> {
    channel: &'a EdgeChannel<SIZE>,
}

impl<const SIZE: usize> EdgeReceiver<'_, SIZE> {
    pub fn try_receive(&self) -> Result<ButtonEdge, TryReceiveError> {
        self.channel.try_receive()
    }
}
