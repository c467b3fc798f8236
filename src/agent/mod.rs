//! Settlers: the agent record, needs tracking, and the per-tick state machine

pub mod fsm;
pub mod needs;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::types::{AgentId, NodeId, Vec2};

pub use fsm::{update_agent, AgentContext, AgentOutcome, Compass};
pub use needs::Needs;

/// Fixed at genesis, read-only afterwards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Personality {
    /// Willingness to try the unfamiliar, [0,1]
    pub openness: f32,
    /// Drive to keep working, [0,1]
    pub diligence: f32,
    /// Pull toward other settlers, [0,1]
    pub sociability: f32,
}

impl Personality {
    /// Euclidean distance in trait space, used for interaction compatibility
    pub fn distance(&self, other: &Personality) -> f32 {
        let d_o = self.openness - other.openness;
        let d_d = self.diligence - other.diligence;
        let d_s = self.sociability - other.sociability;
        (d_o * d_o + d_d * d_d + d_s * d_s).sqrt()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Skills {
    pub harvesting: u8,
    pub building: u8,
    pub scavenging: u8,
}

/// Why the agent is moving; decides the state on arrival
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MovePurpose {
    Wander,
    Harvest { node: NodeId },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AgentState {
    Idle,
    Moving {
        destination: Vec2,
        purpose: MovePurpose,
    },
    Harvesting {
        node: NodeId,
    },
    Interacting {
        with: AgentId,
    },
}

impl AgentState {
    /// The node this agent has claimed, if any
    pub fn claimed_node(&self) -> Option<NodeId> {
        match self {
            AgentState::Moving {
                purpose: MovePurpose::Harvest { node },
                ..
            } => Some(*node),
            AgentState::Harvesting { node } => Some(*node),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    pub name: String,
    pub position: Vec2,
    pub state: AgentState,
    /// Ticks remaining in a timed state (interactions)
    pub state_timer: u32,
    pub needs: Needs,
    pub skills: Skills,
    pub personality: Personality,
    /// Affinity toward other settlers, 0 to 100, absent means unmet
    pub relationships: AHashMap<AgentId, u8>,
    /// Renderer-facing heading, never read back by the simulation
    pub facing: Compass,
}

/// Neutral starting affinity for a first meeting
pub const BASE_AFFINITY: u8 = 50;

impl Agent {
    pub fn new<R: rand::Rng>(
        rng: &mut R,
        name: String,
        position: Vec2,
        personality: Personality,
        skills: Skills,
    ) -> Self {
        Self {
            id: AgentId::from_rng(rng),
            name,
            position,
            state: AgentState::Idle,
            state_timer: 0,
            needs: Needs::default(),
            skills,
            personality,
            relationships: AHashMap::new(),
            facing: Compass::South,
        }
    }

    pub fn affinity_with(&self, other: AgentId) -> u8 {
        self.relationships.get(&other).copied().unwrap_or(BASE_AFFINITY)
    }

    /// Shift affinity toward `other` by `delta`, clamped to [0,100]
    pub fn adjust_affinity(&mut self, other: AgentId, delta: i16) {
        let current = self.affinity_with(other) as i16;
        let next = (current + delta).clamp(0, 100) as u8;
        self.relationships.insert(other, next);
    }
}
