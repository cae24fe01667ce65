//! Handler forwarding events through a crossbeam channel

use crate::core::{Event, Handler, LoggerError, Result};
use crossbeam_channel::{bounded, unbounded, Receiver, Sender, TrySendError};

/// Forwards a copy of every event to a channel.
///
/// Sending never blocks the dispatch critical section: a full or disconnected
/// channel is reported as a handler error and the event is dropped for this
/// handler only.
#[derive(Debug, Clone)]
pub struct ChannelHandler {
    sender: Sender<Event>,
}

impl ChannelHandler {
    pub fn new(sender: Sender<Event>) -> Self {
        Self { sender }
    }

    /// Handler and receiver over an unbounded channel
    pub fn unbounded() -> (Self, Receiver<Event>) {
        let (sender, receiver) = unbounded();
        (Self::new(sender), receiver)
    }

    /// Handler and receiver over a channel holding at most `capacity` events
    pub fn bounded(capacity: usize) -> (Self, Receiver<Event>) {
        let (sender, receiver) = bounded(capacity);
        (Self::new(sender), receiver)
    }
}

impl Handler for ChannelHandler {
    fn handle(&self, event: &Event) -> Result<()> {
        match self.sender.try_send(event.clone()) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => Err(LoggerError::channel_send("channel full")),
            Err(TrySendError::Disconnected(_)) => {
                Err(LoggerError::channel_send("receiver disconnected"))
            }
        }
    }

    fn name(&self) -> &str {
        "channel"
    }
}
