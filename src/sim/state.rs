//! The single aggregate snapshot

use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::agent::Agent;
use crate::colony::{ColonyResources, CulturalValues, ResearchProgress};
use crate::core::Calendar;
use crate::sim::events::EventLog;
use crate::world::WorldData;

/// Everything the simulation knows, owned exclusively by the tick
/// function. External readers treat a snapshot as immutable; `tick`
/// returns a fresh one and the heavy immutable branches (tile grid,
/// flavor catalog) are shared between snapshots through `Arc`.
///
/// The rng rides inside the state so a snapshot fully determines every
/// later snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    pub calendar: Calendar,
    pub paused: bool,
    pub agents: Vec<Agent>,
    pub resources: ColonyResources,
    pub cultural_values: CulturalValues,
    pub world: WorldData,
    pub research: ResearchProgress,
    pub events: EventLog,
    pub rng: ChaCha8Rng,
}

impl SimulationState {
    pub fn day(&self) -> u64 {
        self.calendar.current_day()
    }

    pub fn hour(&self) -> u32 {
        self.calendar.current_hour()
    }
}
