use std::{collections::VecDeque, hash::Hash};

use anyhow::{Result, bail};
use tokio::sync::mpsc::{UnboundedReceiver, error::TryRecvError};

use crate::message_filter;

/// A receiver that drops superseded messages.
///
/// Every time a message is requested, all messages that are pending are pulled in and only the
/// most recent one per [`CoalescingKey`] is kept. Messages that do not have a key are never
/// dropped. The order of the remaining messages is preserved.
#[derive(Debug)]
pub struct CoalescingReceiver<T: CoalescingKey> {
    receiver: UnboundedReceiver<T>,
    pending: VecDeque<T>,
    dropped: u64,
}

pub trait CoalescingKey {
    type Key: Eq + Hash;

    fn coalescing_key(&self) -> Option<Self::Key>;
}

impl<T: CoalescingKey> CoalescingReceiver<T> {
    pub fn new(receiver: UnboundedReceiver<T>) -> Self {
        Self {
            receiver,
            pending: VecDeque::new(),
            dropped: 0,
        }
    }

    /// The number of messages dropped so far.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Receives a message and returns an error when the sender disconnects.
    ///
    /// Messages that are already pending are still delivered after the sender disconnected.
    pub async fn recv(&mut self) -> Result<T> {
        loop {
            // Pull in every message we can get.
            let mut disconnected = false;
            loop {
                match self.receiver.try_recv() {
                    Ok(message) => self.pending.push_back(message),
                    Err(TryRecvError::Disconnected) => {
                        disconnected = true;
                        break;
                    }
                    Err(TryRecvError::Empty) => {
                        break;
                    }
                }
            }

            self.coalesce();

            if let Some(pending) = self.pending.pop_front() {
                return Ok(pending);
            }

            if disconnected {
                bail!("Sender disconnected");
            }

            // No messages yet, now we wait.
            if let Some(message) = self.receiver.recv().await {
                self.pending.push_back(message);
            } else {
                bail!("Sender disconnected");
            }
        }
    }

    fn coalesce(&mut self) {
        // Robustness: Going from VecDequeue to Vec and back is a mess.
        let before = self.pending.len();
        let messages: Vec<T> =
            message_filter::keep_last_per_key(self.pending.drain(..).collect(), |message| {
                message.coalescing_key()
            });
        self.dropped += (before - messages.len()) as u64;
        self.pending = messages.into();
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::mpsc;

    use super::*;

    #[derive(Debug, PartialEq)]
    enum Event {
        Frame(u32),
        Error(u32),
    }

    impl CoalescingKey for Event {
        type Key = ();

        fn coalescing_key(&self) -> Option<()> {
            matches!(self, Event::Frame(_)).then_some(())
        }
    }

    #[tokio::test]
    async fn only_the_latest_frame_survives() {
        let (sender, receiver) = mpsc::unbounded_channel();
        let mut receiver = CoalescingReceiver::new(receiver);
        for i in 0..5 {
            sender.send(Event::Frame(i)).unwrap();
        }
        assert_eq!(receiver.recv().await.unwrap(), Event::Frame(4));
        assert_eq!(receiver.dropped(), 4);
    }

    #[tokio::test]
    async fn errors_are_never_dropped_or_reordered() {
        let (sender, receiver) = mpsc::unbounded_channel();
        let mut receiver = CoalescingReceiver::new(receiver);
        sender.send(Event::Frame(1)).unwrap();
        sender.send(Event::Error(1)).unwrap();
        sender.send(Event::Frame(2)).unwrap();
        sender.send(Event::Error(2)).unwrap();

        // Frame 1 is superseded by frame 2.
        assert_eq!(receiver.recv().await.unwrap(), Event::Error(1));

        sender.send(Event::Frame(3)).unwrap();
        // Frame 2 is superseded by frame 3, but error 2 still comes first.
        assert_eq!(receiver.recv().await.unwrap(), Event::Error(2));
        assert_eq!(receiver.recv().await.unwrap(), Event::Frame(3));
        assert_eq!(receiver.dropped(), 2);
    }

    #[tokio::test]
    async fn pending_messages_are_delivered_before_disconnect_is_reported() {
        let (sender, receiver) = mpsc::unbounded_channel();
        let mut receiver = CoalescingReceiver::new(receiver);
        sender.send(Event::Frame(1)).unwrap();
        drop(sender);
        assert_eq!(receiver.recv().await.unwrap(), Event::Frame(1));
        assert!(receiver.recv().await.is_err());
    }
}
