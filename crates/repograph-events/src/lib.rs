use crossbeam_channel::{Receiver, Sender, unbounded};
use repograph_core::{RepoIdentity, Theme, ViewMode};
use serde::{Deserialize, Serialize};

/// Where a selection change came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SelectionOrigin {
    /// A node clicked on the rendering surface
    Graph,
    /// Set programmatically (file tree, detail panel, CLI)
    External,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    // Data
    RepositoryLoaded {
        identity: RepoIdentity,
        entry_count: usize,
    },
    TreeReplaced {
        entry_count: usize,
    },
    LoadFailed {
        reason: String,
    },

    // View state
    ModeChanged {
        mode: ViewMode,
    },
    ThemeChanged {
        theme: Theme,
    },
    SelectionChanged {
        path: Option<String>,
        origin: SelectionOrigin,
    },

    /// A structural node was clicked and resolved to a hierarchy entry
    NodeActivated {
        path: String,
    },

    /// A fresh snapshot replaced the previous one
    GraphPublished {
        revision: u64,
        mode: ViewMode,
        node_count: usize,
        edge_count: usize,
    },

    ViewTornDown,
}

impl Event {
    /// Compact JSON form for log lines
    pub fn to_log_line(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| format!("{:?}", self))
    }
}

#[derive(Clone)]
pub struct EventBus {
    tx: Sender<Event>,
    rx: Receiver<Event>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self { tx, rx }
    }

    pub fn sender(&self) -> Sender<Event> {
        self.tx.clone()
    }

    pub fn receiver(&self) -> Receiver<Event> {
        self.rx.clone()
    }

    pub fn publish(&self, event: Event) {
        tracing::trace!(target: "repograph::events", "{}", event.to_log_line());
        let _ = self.tx.send(event);
    }

    /// Dispatch all pending events to a listener.
    /// This is useful for processing events in the UI loop.
    pub fn dispatch_to<L: EventListener>(&self, listener: &mut L) {
        while let Ok(event) = self.rx.try_recv() {
            listener.handle_event(&event);
        }
    }

    /// Take every pending event without blocking.
    pub fn drain(&self) -> Vec<Event> {
        self.rx.try_iter().collect()
    }
}

/// Trait for components that respond to events.
/// Implement this to receive events from the EventBus.
pub trait EventListener {
    fn handle_event(&mut self, event: &Event);
}
