//! Progress event plumbing over crossbeam-channel.
//!
//! The walker, the workers and the completion tracker all hold a clone of
//! the same sender; the CLI drains the receiver on its own thread.

use crossbeam_channel::{unbounded, Receiver, Sender};

use super::Event;

/// Pipeline side of a progress channel
#[derive(Clone)]
pub struct EventSender {
    inner: Sender<Event>,
}

impl EventSender {
    /// Emit `event`, dropping it if nobody is listening
    pub fn send(&self, event: Event) {
        let _ = self.inner.send(event);
    }
}

/// Listener side of a progress channel
pub struct EventReceiver {
    inner: Receiver<Event>,
}

impl EventReceiver {
    /// Yield events until every sender clone is gone
    pub fn iter(&self) -> impl Iterator<Item = Event> + '_ {
        self.inner.iter()
    }
}

/// Unbounded progress channel, so reporting never stalls a hashing worker
pub struct EventChannel;

impl EventChannel {
    pub fn new() -> (EventSender, EventReceiver) {
        let (inner_tx, inner_rx) = unbounded();
        (
            EventSender { inner: inner_tx },
            EventReceiver { inner: inner_rx },
        )
    }
}

/// Sender for runs nobody observes
pub fn null_sender() -> EventSender {
    EventChannel::new().0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{HashEvent, PipelineEvent, WalkEvent};
    use std::path::PathBuf;
    use std::thread;

    #[test]
    fn events_cross_threads_in_order() {
        let (sender, receiver) = EventChannel::new();

        thread::spawn(move || {
            sender.send(Event::Walk(WalkEvent::Completed { files_found: 7 }));
            sender.send(Event::Pipeline(PipelineEvent::Started { workers: 2 }));
        })
        .join()
        .unwrap();

        let events: Vec<_> = receiver.iter().collect();
        assert!(matches!(
            events.as_slice(),
            [
                Event::Walk(WalkEvent::Completed { files_found: 7 }),
                Event::Pipeline(PipelineEvent::Started { workers: 2 })
            ]
        ));
    }

    #[test]
    fn null_sender_discards_events() {
        null_sender().send(Event::Pipeline(PipelineEvent::Started { workers: 4 }));
    }

    #[test]
    fn iteration_ends_when_every_clone_drops() {
        let (sender, receiver) = EventChannel::new();
        let clone = sender.clone();

        sender.send(Event::Hash(HashEvent::WorkerFinished { worker: 0 }));
        clone.send(Event::Hash(HashEvent::FileHashed {
            worker: 1,
            path: PathBuf::from("x"),
        }));
        drop(sender);
        drop(clone);

        assert_eq!(receiver.iter().count(), 2);
    }
}
