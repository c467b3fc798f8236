//! Per-tick agent state machine
//!
//! Each agent is updated against the pre-tick snapshot only: the context
//! holds last tick's world and agent list, and every mutation an update
//! wants to make outside its own record (node depletion, partner affinity)
//! is returned in the outcome for the tick loop to apply once. Update order
//! therefore cannot change results beyond the rng draw sequence.

use ahash::AHashSet;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::agent::{Agent, AgentState, MovePurpose};
use crate::core::config::SimulationConfig;
use crate::core::types::{AgentId, NodeId, Vec2};
use crate::world::{ResourceKind, WorldData};

/// Chance per idle tick that a sociable settler strikes up a conversation
const SOCIAL_CHANCE: f64 = 0.01;
/// Sociability above this makes a settler seek out interactions
const SOCIABLE_THRESHOLD: f32 = 0.6;
/// Personality distance below this reads as kinship
const COMPATIBLE_DISTANCE: f32 = 0.5;

/// 8-sector heading derived from the movement vector, for renderers only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Compass {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Compass {
    pub fn from_vector(v: Vec2) -> Self {
        if v.length() < 0.0001 {
            return Compass::South;
        }
        let angle = v.y.atan2(v.x).to_degrees();
        // Sectors are 45 degrees wide, centered on the compass points.
        // Screen coordinates: +y is south.
        match ((angle + 382.5) / 45.0) as i32 % 8 {
            0 => Compass::East,
            1 => Compass::SouthEast,
            2 => Compass::South,
            3 => Compass::SouthWest,
            4 => Compass::West,
            5 => Compass::NorthWest,
            6 => Compass::North,
            _ => Compass::NorthEast,
        }
    }
}

/// Read-only view of last tick's state, shared by every agent update
pub struct AgentContext<'a> {
    pub world: &'a WorldData,
    pub agents: &'a [Agent],
    /// Nodes already claimed by some agent in the pre-tick snapshot
    pub claimed: &'a AHashSet<NodeId>,
}

/// Resources one agent pulled out of a node this tick
#[derive(Debug, Clone, PartialEq)]
pub struct Harvest {
    pub node: NodeId,
    pub kind: ResourceKind,
    pub amount: f32,
}

/// A finished conversation; affinity applies to both sides
#[derive(Debug, Clone, PartialEq)]
pub struct Interaction {
    pub partner: AgentId,
    pub delta: i16,
}

pub struct AgentOutcome {
    pub agent: Agent,
    pub harvest: Option<Harvest>,
    pub interaction: Option<Interaction>,
}

fn nearest_unclaimed_node(agent: &Agent, ctx: &AgentContext) -> Option<NodeId> {
    ctx.world
        .resource_nodes
        .iter()
        .filter(|n| !ctx.claimed.contains(&n.id))
        .min_by(|a, b| {
            let da = agent.position.distance(a.position);
            let db = agent.position.distance(b.position);
            da.total_cmp(&db)
        })
        .map(|n| n.id)
}

fn nearest_neighbor(agent: &Agent, ctx: &AgentContext, range: f32) -> Option<AgentId> {
    ctx.agents
        .iter()
        .filter(|other| other.id != agent.id)
        .filter(|other| agent.position.distance(other.position) <= range)
        .min_by(|a, b| {
            let da = agent.position.distance(a.position);
            let db = agent.position.distance(b.position);
            da.total_cmp(&db)
        })
        .map(|a| a.id)
}

fn harvest_skill(agent: &Agent, kind: ResourceKind) -> u8 {
    match kind {
        ResourceKind::FallenTree | ResourceKind::BerryBush => agent.skills.harvesting,
        ResourceKind::ScrapPile | ResourceKind::ElectronicsScrap => agent.skills.scavenging,
    }
}

/// Advance one agent by one tick against the pre-tick snapshot.
pub fn update_agent(
    agent: &Agent,
    ctx: &AgentContext,
    config: &SimulationConfig,
    rng: &mut ChaCha8Rng,
) -> AgentOutcome {
    let mut next = agent.clone();
    let mut harvest = None;
    let mut interaction = None;

    match agent.state {
        AgentState::Idle => {
            if rng.gen_bool(config.wander_chance) {
                let destination = Vec2::new(
                    rng.gen_range(0.0..ctx.world.width().max(1) as f32),
                    rng.gen_range(0.0..ctx.world.height().max(1) as f32),
                );
                next.state = AgentState::Moving {
                    destination,
                    purpose: MovePurpose::Wander,
                };
                trace!(agent = %agent.name, ?destination, "wandering off");
            } else if agent.personality.sociability > SOCIABLE_THRESHOLD
                && rng.gen_bool(SOCIAL_CHANCE)
            {
                if let Some(partner) = nearest_neighbor(agent, ctx, config.interact_range) {
                    next.state = AgentState::Interacting { with: partner };
                    next.state_timer = config.interact_duration;
                } else if let Some(node) = nearest_unclaimed_node(agent, ctx) {
                    next.state = assign_harvest(&mut next, ctx, node);
                }
            } else if let Some(node) = nearest_unclaimed_node(agent, ctx) {
                next.state = assign_harvest(&mut next, ctx, node);
            }
        }
        AgentState::Moving {
            destination,
            purpose,
        } => {
            let to_target = destination - agent.position;
            let remaining = to_target.length();
            if remaining < config.move_speed {
                next.position = destination;
                next.state = match purpose {
                    MovePurpose::Harvest { node } if ctx.world.node(node).is_some() => {
                        AgentState::Harvesting { node }
                    }
                    _ => AgentState::Idle,
                };
            } else {
                let step = to_target.normalize() * config.move_speed;
                next.position = agent.position + step;
                next.facing = Compass::from_vector(step);
            }
        }
        AgentState::Harvesting { node } => match ctx.world.node(node) {
            Some(target) => {
                let skill = harvest_skill(agent, target.kind) as f32;
                let amount = config.harvest_base * (1.0 + skill * config.harvest_skill_bonus);
                let amount = amount.min(target.remaining);
                harvest = Some(Harvest {
                    node,
                    kind: target.kind,
                    amount,
                });
                if target.remaining - amount <= 0.0 {
                    next.state = AgentState::Idle;
                }
            }
            // Node vanished under us; recover within the same tick.
            None => next.state = AgentState::Idle,
        },
        AgentState::Interacting { with } => {
            let partner = ctx.agents.iter().find(|a| a.id == with);
            match partner {
                Some(_) if next.state_timer > 1 => {
                    next.state_timer -= 1;
                }
                Some(partner) => {
                    let delta = if agent.personality.distance(&partner.personality)
                        < COMPATIBLE_DISTANCE
                    {
                        2
                    } else {
                        -1
                    };
                    next.adjust_affinity(with, delta);
                    interaction = Some(Interaction {
                        partner: with,
                        delta,
                    });
                    next.state_timer = 0;
                    next.state = AgentState::Idle;
                }
                None => {
                    next.state_timer = 0;
                    next.state = AgentState::Idle;
                }
            }
        }
    }

    next.needs.drift(&next.state, config);
    AgentOutcome {
        agent: next,
        harvest,
        interaction,
    }
}

fn assign_harvest(agent: &mut Agent, ctx: &AgentContext, node: NodeId) -> AgentState {
    let destination = ctx
        .world
        .node(node)
        .map(|n| n.position)
        .unwrap_or(agent.position);
    let heading = destination - agent.position;
    agent.facing = Compass::from_vector(heading);
    AgentState::Moving {
        destination,
        purpose: MovePurpose::Harvest { node },
    }
}
