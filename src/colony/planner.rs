//! Low-frequency colony planner
//!
//! Runs every `planner_interval` ticks rather than every tick. Pure over
//! its inputs: the caller applies the returned progress and point total.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::colony::catalog::{self, RESEARCH_TREE};
use crate::colony::ColonyResources;
use crate::core::config::SimulationConfig;
use crate::world::WorldData;

/// Mutable research state; the catalog itself is static
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResearchProgress {
    /// At most one project researches at a time
    pub active: Option<String>,
    /// Only ever grows
    pub completed: Vec<String>,
    /// Blueprints the colony may build
    pub known_blueprints: Vec<String>,
}

impl ResearchProgress {
    pub fn is_completed(&self, id: &str) -> bool {
        self.completed.iter().any(|c| c == id)
    }

    pub fn knows_blueprint(&self, id: &str) -> bool {
        self.known_blueprints.iter().any(|b| b == id)
    }

    fn prerequisites_met(&self, id: &str) -> bool {
        catalog::research_project(id)
            .map(|p| p.prerequisites.iter().all(|pre| self.is_completed(pre)))
            .unwrap_or(false)
    }

    /// First catalog entry in priority order that could start now
    pub fn next_eligible(&self) -> Option<&'static str> {
        RESEARCH_TREE
            .iter()
            .filter(|p| !self.is_completed(p.id))
            .find(|p| self.prerequisites_met(p.id))
            .map(|p| p.id)
    }
}

pub struct PlannerOutcome {
    pub research: ResearchProgress,
    /// Accrued points after this pass
    pub research_points: f32,
    /// Blueprints affordable and unbuilt; recorded, never acted on here
    pub build_intents: Vec<&'static str>,
    /// Projects completed on this pass, for the event log
    pub completed_now: Vec<&'static str>,
}

/// True when the colony has the facilities to research at all
fn can_research(world: &WorldData) -> bool {
    catalog::research_structure_ids().any(|id| world.has_completed(id))
}

pub fn run_planner(
    research: &ResearchProgress,
    resources: &ColonyResources,
    world: &WorldData,
    config: &SimulationConfig,
) -> PlannerOutcome {
    let mut next = research.clone();
    let mut points = resources.research_points;
    let mut completed_now = Vec::new();

    if can_research(world) {
        if let Some(active_id) = next.active.clone() {
            points += config.research_rate;
            let project = catalog::research_project(&active_id);
            if let Some(project) = project {
                if points >= project.cost {
                    info!(project = project.id, "research completed");
                    next.completed.push(active_id.clone());
                    if let Some(blueprint) = project.unlocks_blueprint {
                        if !next.knows_blueprint(blueprint) {
                            next.known_blueprints.push(blueprint.to_string());
                        }
                    }
                    completed_now.push(project.id);
                    next.active = None;
                    points = 0.0;
                }
            } else {
                // Unknown id in state; drop it rather than accrue forever.
                next.active = None;
            }
        }
        if next.active.is_none() {
            if let Some(id) = next.next_eligible() {
                debug!(project = id, "research activated");
                next.active = Some(id.to_string());
            }
        }
    }

    let build_intents: Vec<&'static str> = next
        .known_blueprints
        .iter()
        .filter_map(|id| catalog::structure_definition(id))
        .filter(|def| {
            !world
                .placed_structures
                .iter()
                .any(|s| s.blueprint_id == def.id)
        })
        .filter(|def| resources.can_afford(def.cost))
        .map(|def| def.id)
        .collect();
    if !build_intents.is_empty() {
        debug!(?build_intents, "affordable unbuilt blueprints");
    }

    PlannerOutcome {
        research: next,
        research_points: points,
        build_intents,
        completed_now,
    }
}
