//! Change notification fan-out.
//!
//! Mutation services publish coarse change events; the WebSocket layer
//! streams them to connected clients so they can refetch their tree.

use tokio::sync::broadcast;
use tracing::debug;

use portal_core::events::ChangeEvent;

const CHANNEL_CAPACITY: usize = 256;

/// Broadcast hub for folder and file change events.
///
/// Receivers that fall behind the channel capacity miss events; that is
/// acceptable because consumers refetch on any event rather than
/// applying deltas.
#[derive(Debug, Clone)]
pub struct ChangeNotifier {
    sender: broadcast::Sender<ChangeEvent>,
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeNotifier {
    /// Creates a notifier with the default channel capacity.
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    /// Publishes a change event to all current subscribers.
    ///
    /// Publishing with no subscribers is a no-op.
    pub fn publish(&self, event: ChangeEvent) {
        debug!(client = %event.client_name, kind = ?event.kind, "Publishing change event");
        let _ = self.sender.send(event);
    }

    /// Subscribes to the event stream from this point on.
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.sender.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_core::events::ChangeKind;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_subscribers_receive_published_events() {
        let notifier = ChangeNotifier::new();
        let mut rx = notifier.subscribe();

        notifier.publish(ChangeEvent::new(
            "Acme C.A.",
            ChangeKind::FolderCreated,
            Uuid::new_v4(),
        ));

        let event = rx.recv().await.unwrap();
        assert_eq!(event.client_name, "Acme C.A.");
    }

    #[test]
    fn test_publish_without_subscribers_is_noop() {
        let notifier = ChangeNotifier::new();
        notifier.publish(ChangeEvent::new(
            "Acme C.A.",
            ChangeKind::FileDeleted,
            Uuid::new_v4(),
        ));
    }
}
