//! Change queue between watchers and the indexer.
//!
//! Any number of [`ChangeSender`] clones feed one [`ChangeReceiver`]. The
//! queue is unbounded: enqueueing never blocks, and events from one sender
//! come out in the order they went in.

use tokio::sync::mpsc::{self, error::TryRecvError};

use super::events::ChangeEvent;
use crate::error::WatcherError;
use crate::Result;

/// Create a connected sender/receiver pair.
#[must_use]
pub fn change_queue() -> (ChangeSender, ChangeReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ChangeSender { tx }, ChangeReceiver { rx })
}

/// Producer half, one clone per watcher.
#[derive(Debug, Clone)]
pub struct ChangeSender {
    tx: mpsc::UnboundedSender<ChangeEvent>,
}

impl ChangeSender {
    /// Append an event to the tail of the queue.
    ///
    /// # Errors
    ///
    /// Returns [`WatcherError::QueueClosed`] if the receiver was dropped.
    pub fn enqueue(&self, event: ChangeEvent) -> Result<()> {
        self.tx
            .send(event)
            .map_err(|_| WatcherError::QueueClosed.into())
    }

    /// Whether the receiver has gone away.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Consumer half, owned by the indexer.
#[derive(Debug)]
pub struct ChangeReceiver {
    rx: mpsc::UnboundedReceiver<ChangeEvent>,
}

impl ChangeReceiver {
    /// Take the head of the queue without waiting.
    pub fn try_dequeue(&mut self) -> Option<ChangeEvent> {
        match self.rx.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Wait for the next event.
    ///
    /// Returns `None` once every sender is dropped and the queue is drained.
    pub async fn dequeue(&mut self) -> Option<ChangeEvent> {
        self.rx.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::path::PathBuf;

    #[test]
    fn test_try_dequeue_empty() {
        let (_tx, mut rx) = change_queue();
        assert!(rx.try_dequeue().is_none());
    }

    #[test]
    fn test_fifo_order() {
        let (tx, mut rx) = change_queue();
        let events = vec![
            ChangeEvent::created("/a/1.txt"),
            ChangeEvent::renamed("/a/1.txt", "/a/2.txt"),
            ChangeEvent::deleted("/a/2.txt"),
        ];
        for event in &events {
            tx.enqueue(event.clone()).unwrap();
        }

        let drained: Vec<_> = std::iter::from_fn(|| rx.try_dequeue()).collect();
        assert_eq!(drained, events);
    }

    #[test]
    fn test_enqueue_after_receiver_dropped() {
        let (tx, rx) = change_queue();
        drop(rx);
        assert!(tx.is_closed());
        let err = tx.enqueue(ChangeEvent::created("/a")).unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Watcher(WatcherError::QueueClosed)
        ));
    }

    #[tokio::test]
    async fn test_dequeue_ends_when_senders_dropped() {
        let (tx, mut rx) = change_queue();
        tx.enqueue(ChangeEvent::created("/last")).unwrap();
        drop(tx);

        assert_eq!(rx.dequeue().await, Some(ChangeEvent::created("/last")));
        assert_eq!(rx.dequeue().await, None);
    }

    #[test]
    fn test_concurrent_producers_exactly_once() {
        const PER_PRODUCER: usize = 500;
        let (tx, mut rx) = change_queue();

        let handles: Vec<_> = ["/left", "/right"]
            .into_iter()
            .map(|root| {
                let tx = tx.clone();
                std::thread::spawn(move || {
                    for i in 0..PER_PRODUCER {
                        tx.enqueue(ChangeEvent::created(format!("{root}/{i}")))
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        drop(tx);

        let drained: Vec<_> = std::iter::from_fn(|| rx.try_dequeue()).collect();
        assert_eq!(drained.len(), 2 * PER_PRODUCER);

        let unique: HashSet<PathBuf> = drained.iter().map(|e| e.path().to_path_buf()).collect();
        assert_eq!(unique.len(), 2 * PER_PRODUCER);

        // Each producer's events keep their relative order.
        for root in ["/left", "/right"] {
            let seq: Vec<usize> = drained
                .iter()
                .filter_map(|e| {
                    e.path()
                        .strip_prefix(root)
                        .ok()
                        .and_then(|rest| rest.to_str())
                        .and_then(|n| n.parse().ok())
                })
                .collect();
            assert_eq!(seq, (0..PER_PRODUCER).collect::<Vec<_>>());
        }
    }
}
