//! Listener registration for renderers.

use std::sync::Arc;

use crate::state::SessionSnapshot;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Something a renderer paints has changed.
    StateChanged(SessionSnapshot),
    /// Hint to move input focus to the message field.
    FocusInput,
}

pub trait SessionListener: Send + Sync {
    fn on_event(&self, event: &SessionEvent);
}

impl<F> SessionListener for F
where
    F: Fn(&SessionEvent) + Send + Sync,
{
    fn on_event(&self, event: &SessionEvent) {
        self(event);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Default)]
pub(crate) struct Listeners {
    next_id: u64,
    entries: Vec<(SubscriptionId, Arc<dyn SessionListener>)>,
}

impl Listeners {
    pub(crate) fn add(&mut self, listener: Arc<dyn SessionListener>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    pub(crate) fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    /// Clone out the current listeners so they can be called unlocked.
    pub(crate) fn targets(&self) -> Vec<Arc<dyn SessionListener>> {
        self.entries
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn ids_are_unique_and_removal_is_by_id() {
        let mut listeners = Listeners::default();
        let hits = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&hits);
        let first = listeners.add(Arc::new(move |_: &SessionEvent| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));
        let second = listeners.add(Arc::new(|_: &SessionEvent| {}));
        assert_ne!(first, second);

        assert!(listeners.remove(second));
        assert!(!listeners.remove(second));
        assert_eq!(listeners.len(), 1);

        for target in listeners.targets() {
            target.on_event(&SessionEvent::FocusInput);
        }
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
