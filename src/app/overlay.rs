//! Modal overlay state and scoped key listeners.
//!
//! The modal does not read the keyboard by itself. When it mounts it acquires a
//! subscription from [`KeyListeners`]; the event handler routes `Escape` to the
//! most recent live subscription. Unmounting releases the subscription, so a
//! closed modal can never react to a later key press.

use crate::domain::ImageRecord;

/// Handle returned by [`KeyListeners::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Consumers that can own a key subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyTarget {
    /// The full-size image overlay.
    Modal,
}

/// Registry of live key subscriptions, most recent last.
#[derive(Debug, Clone, Default)]
pub struct KeyListeners {
    next_id: u64,
    active: Vec<(ListenerId, KeyTarget)>,
}

impl KeyListeners {
    /// Registers `target` and returns the handle needed to release it.
    pub fn subscribe(&mut self, target: KeyTarget) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.active.push((id, target));
        tracing::debug!(listener = self.next_id, target = ?target, "key listener registered");
        id
    }

    /// Releases a subscription. Returns `false` if it was already released.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.active.len();
        self.active.retain(|(active_id, _)| *active_id != id);
        let removed = before != self.active.len();
        if removed {
            tracing::debug!(listener = id.0, "key listener released");
        }
        removed
    }

    /// Target that should receive the next routed key, if any.
    #[must_use]
    pub fn topmost(&self) -> Option<KeyTarget> {
        self.active.last().map(|(_, target)| *target)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

/// A mounted modal showing one image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modal {
    pub image: ImageRecord,
    listener: ListenerId,
}

impl Modal {
    /// Mounts the modal for `image`, acquiring an escape-key subscription.
    pub fn mount(image: ImageRecord, listeners: &mut KeyListeners) -> Self {
        let listener = listeners.subscribe(KeyTarget::Modal);
        Self { image, listener }
    }

    /// Unmounts the modal, releasing its subscription.
    pub fn unmount(self, listeners: &mut KeyListeners) {
        listeners.unsubscribe(self.listener);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image() -> ImageRecord {
        ImageRecord {
            id: 1,
            thumbnail_url: "t".into(),
            full_size_url: "f".into(),
            tags: "a".into(),
            width: 0,
            height: 0,
            user: String::new(),
        }
    }

    #[test]
    fn test_mount_and_unmount_balance_listeners() {
        let mut listeners = KeyListeners::default();
        let modal = Modal::mount(image(), &mut listeners);
        assert_eq!(listeners.topmost(), Some(KeyTarget::Modal));
        assert_eq!(listeners.len(), 1);

        modal.unmount(&mut listeners);
        assert!(listeners.is_empty());
        assert_eq!(listeners.topmost(), None);
    }

    #[test]
    fn test_unsubscribe_twice() {
        let mut listeners = KeyListeners::default();
        let id = listeners.subscribe(KeyTarget::Modal);
        assert!(listeners.unsubscribe(id));
        assert!(!listeners.unsubscribe(id));
    }
}
