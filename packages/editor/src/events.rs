//! # Change Notifications
//!
//! Views subscribe to the specific collections they render rather than to a
//! global "something changed" signal. A layers panel listens to
//! `Topic::Document(page)`, a versions drawer to `Topic::Versions(page)`,
//! the toolbar to `Topic::Mode`.

use crate::session::BuilderMode;
use tokio::sync::mpsc;

/// What a subscriber is interested in
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Topic {
    /// Live tree of a page changed
    Document(String),
    /// Version list of a page changed
    Versions(String),
    /// Builder mode changed
    Mode,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BuilderEvent {
    DocumentChanged { page_id: String, description: String },
    VersionsChanged { page_id: String },
    ModeChanged { mode: BuilderMode },
    /// A persistence call failed; the in-memory tree is unaffected
    PersistFailed { page_id: String, message: String },
}

impl BuilderEvent {
    pub fn topic(&self) -> Topic {
        match self {
            BuilderEvent::DocumentChanged { page_id, .. }
            | BuilderEvent::PersistFailed { page_id, .. } => Topic::Document(page_id.clone()),
            BuilderEvent::VersionsChanged { page_id } => Topic::Versions(page_id.clone()),
            BuilderEvent::ModeChanged { .. } => Topic::Mode,
        }
    }
}

/// Topic-scoped subscriber registry
#[derive(Debug, Default)]
pub struct EventHub {
    subscribers: Vec<(Topic, mpsc::UnboundedSender<BuilderEvent>)>,
}

impl EventHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to one topic
    pub fn subscribe(&mut self, topic: Topic) -> mpsc::UnboundedReceiver<BuilderEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push((topic, tx));
        rx
    }

    /// Deliver to every subscriber of the event's topic. Subscribers whose
    /// receiver was dropped are forgotten.
    pub fn publish(&mut self, event: BuilderEvent) {
        let topic = event.topic();
        self.subscribers.retain(|(subscribed, tx)| {
            if *subscribed != topic {
                return !tx.is_closed();
            }
            tx.send(event.clone()).is_ok()
        });
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_are_scoped_to_topic() {
        let mut hub = EventHub::new();
        let mut home = hub.subscribe(Topic::Document("home".to_string()));
        let mut about = hub.subscribe(Topic::Document("about".to_string()));
        let mut versions = hub.subscribe(Topic::Versions("home".to_string()));

        hub.publish(BuilderEvent::DocumentChanged {
            page_id: "home".to_string(),
            description: "Added Section".to_string(),
        });

        match home.try_recv() {
            Ok(BuilderEvent::DocumentChanged { description, .. }) => {
                assert_eq!(description, "Added Section");
            }
            other => panic!("Expected DocumentChanged, got {:?}", other),
        }
        assert!(about.try_recv().is_err());
        assert!(versions.try_recv().is_err());
    }

    #[test]
    fn test_dropped_receivers_are_pruned() {
        let mut hub = EventHub::new();
        let rx = hub.subscribe(Topic::Mode);
        let _kept = hub.subscribe(Topic::Mode);
        drop(rx);

        hub.publish(BuilderEvent::ModeChanged {
            mode: BuilderMode::Previewing,
        });
        assert_eq!(hub.subscriber_count(), 1);
    }
}
