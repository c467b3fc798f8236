//! Append-only game event log

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::types::{EventId, Tick};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    /// World lore and day narration
    Narrative,
    /// Something a settler did
    Agent,
    /// Colony mechanics: research, consumption
    System,
}

/// Title and description before the log assigns id and timestamp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventSeed {
    pub kind: EventKind,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameEvent {
    pub id: EventId,
    pub tick: Tick,
    pub kind: EventKind,
    pub title: String,
    pub description: String,
    /// True when a narrative provider wrote the text
    pub generated: bool,
}

/// Events only ever get appended; nothing edits or removes them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventLog {
    entries: Vec<GameEvent>,
}

impl EventLog {
    /// Ids come from the caller's rng so seeded runs replay identically.
    pub fn append<R: Rng>(
        &mut self,
        rng: &mut R,
        tick: Tick,
        seed: EventSeed,
        generated: bool,
    ) -> EventId {
        let id = EventId::from_rng(rng);
        self.entries.push(GameEvent {
            id,
            tick,
            kind: seed.kind,
            title: seed.title,
            description: seed.description,
            generated,
        });
        id
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[GameEvent] {
        &self.entries
    }

    /// The most recent `n` events, oldest first
    pub fn recent(&self, n: usize) -> &[GameEvent] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }
}
