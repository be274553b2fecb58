use std::sync::mpsc::{Receiver, Sender, channel};

/// Coarse-grained change notification emitted by root-level mutations.
/// Consumers re-read the registry they care about; derived values are plain
/// functions over current state, so there is nothing else to invalidate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    AccountsChanged,
    TabsChanged,
    FilesChanged,
    SettingsChanged,
}

/// Observer list backing [`crate::RootStore::subscribe`]. Receivers that
/// have been dropped are pruned on the next emit.
#[derive(Debug, Default)]
pub(crate) struct Subscribers {
    senders: Vec<Sender<SessionEvent>>,
}

impl Subscribers {
    pub fn subscribe(&mut self) -> Receiver<SessionEvent> {
        let (sender, receiver) = channel();
        self.senders.push(sender);
        receiver
    }

    pub fn emit(&mut self, event: SessionEvent) {
        self.senders.retain(|sender| sender.send(event).is_ok());
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.senders.len()
    }
}

#[cfg(test)]
mod tests {
    use super::{SessionEvent, Subscribers};

    #[test]
    fn emit_reaches_every_live_subscriber() {
        let mut subscribers = Subscribers::default();
        let first = subscribers.subscribe();
        let second = subscribers.subscribe();

        subscribers.emit(SessionEvent::TabsChanged);

        assert_eq!(first.try_recv().ok(), Some(SessionEvent::TabsChanged));
        assert_eq!(second.try_recv().ok(), Some(SessionEvent::TabsChanged));
    }

    #[test]
    fn dropped_receivers_are_pruned_on_emit() {
        let mut subscribers = Subscribers::default();
        let kept = subscribers.subscribe();
        drop(subscribers.subscribe());

        subscribers.emit(SessionEvent::FilesChanged);

        assert_eq!(subscribers.len(), 1);
        assert_eq!(kept.try_recv().ok(), Some(SessionEvent::FilesChanged));
    }
}
