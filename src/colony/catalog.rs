//! Static research and structure catalogs
//!
//! Referenced by id from mutable state; the definitions themselves are
//! fixed data, not part of any snapshot.

use crate::colony::Stockpile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureClass {
    Shelter,
    Storage,
    Research,
}

pub struct StructureDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub cost: &'static [(Stockpile, f32)],
    pub class: StructureClass,
}

pub struct ResearchProject {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Research points required to complete
    pub cost: f32,
    pub prerequisites: &'static [&'static str],
    pub unlocks_blueprint: Option<&'static str>,
}

/// Priority-ordered: the planner activates the first eligible entry.
pub const RESEARCH_TREE: &[ResearchProject] = &[
    ResearchProject {
        id: "basic_shelter",
        name: "Basic Shelter Construction",
        description: "Understand the fundamentals of creating simple, effective shelters from debris.",
        cost: 50.0,
        prerequisites: &[],
        unlocks_blueprint: Some("storage_1"),
    },
    ResearchProject {
        id: "communal_thinking",
        name: "Communal Thinking",
        description: "Develop a dedicated space for collaborative problem-solving and innovation.",
        cost: 100.0,
        prerequisites: &["basic_shelter"],
        unlocks_blueprint: Some("research_bench_1"),
    },
    ResearchProject {
        id: "food_preservation",
        name: "Food Preservation",
        description: "Discover methods to smoke and salt food, reducing spoilage and creating a stable food supply.",
        cost: 75.0,
        prerequisites: &["basic_shelter"],
        unlocks_blueprint: None,
    },
];

pub const STRUCTURES: &[StructureDefinition] = &[
    StructureDefinition {
        id: "shelter_1",
        name: "Makeshift Lean-To",
        description: "A simple shelter made from scavenged wood and scrap. Provides minimal protection from the elements.",
        cost: &[(Stockpile::Wood, 10.0), (Stockpile::Scrap, 5.0)],
        class: StructureClass::Shelter,
    },
    StructureDefinition {
        id: "storage_1",
        name: "Scrap Crate",
        description: "A crude wooden crate for storing excess resources.",
        cost: &[(Stockpile::Wood, 8.0)],
        class: StructureClass::Storage,
    },
    StructureDefinition {
        id: "research_bench_1",
        name: "Research Bench",
        description: "A dedicated workspace for tinkering and discovery, enabling colony research.",
        cost: &[(Stockpile::Wood, 15.0), (Stockpile::Scrap, 15.0)],
        class: StructureClass::Research,
    },
];

pub fn research_project(id: &str) -> Option<&'static ResearchProject> {
    RESEARCH_TREE.iter().find(|p| p.id == id)
}

pub fn structure_definition(id: &str) -> Option<&'static StructureDefinition> {
    STRUCTURES.iter().find(|s| s.id == id)
}

/// Blueprint ids of every Research-class structure
pub fn research_structure_ids() -> impl Iterator<Item = &'static str> {
    STRUCTURES
        .iter()
        .filter(|s| s.class == StructureClass::Research)
        .map(|s| s.id)
}
