//! World-origin and narrative providers
//!
//! Genesis runs once, before the first tick, and hands the session its
//! founding settlers, cultural values, opening narrative, and the flavor
//! catalog. A provider that fails here is fatal: no partial state ever
//! reaches the tick loop. Narrative providers are consulted again at every
//! day boundary.
//!
//! The default provider is the Markov generator; anything else (a file of
//! prewritten lore, a network service) only needs the two traits.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::agent::{Personality, Skills};
use crate::colony::{ColonyResources, CulturalValues};
use crate::core::error::Result;
use crate::sim::events::{EventKind, EventSeed, GameEvent};
use crate::text::{corpus, MarkovChain};
use crate::world::{BiomeFlavor, CreatureFlavor, FlavorCatalog, StructureFlavor, Temperament};

/// A founding settler before placement
#[derive(Debug, Clone, PartialEq)]
pub struct AgentSeed {
    pub name: String,
    pub personality: Personality,
    pub skills: Skills,
}

/// Everything genesis supplies to a new session
#[derive(Debug, Clone, PartialEq)]
pub struct GenesisBundle {
    pub agents: Vec<AgentSeed>,
    pub cultural_values: CulturalValues,
    pub opening_event: EventSeed,
    pub flavor: FlavorCatalog,
}

pub trait GenesisProvider {
    fn genesis(&mut self) -> Result<GenesisBundle>;
}

/// Consulted by the session at each day boundary
pub trait NarrativeProvider {
    fn narrative(
        &mut self,
        day: u64,
        resources: &ColonyResources,
        recent_events: &[GameEvent],
    ) -> Result<EventSeed>;
}

/// The built-in provider: two Markov models, one trained on the name
/// lists and one on the lore corpus.
pub struct MarkovGenesisProvider {
    first_names: MarkovChain,
    last_names: MarkovChain,
    narrative: MarkovChain,
    rng: ChaCha8Rng,
}

impl MarkovGenesisProvider {
    pub fn new(seed: u64) -> Self {
        // Each name is its own one-word sentence, so every name in the
        // list becomes starter material rather than only the first pair.
        let mut first_names = MarkovChain::new();
        first_names.train(&format!("{}.", corpus::FIRST_NAMES.join(". ")));
        let mut last_names = MarkovChain::new();
        last_names.train(&format!("{}.", corpus::LAST_NAMES.join(". ")));
        let mut narrative = MarkovChain::new();
        narrative.train(corpus::LORE_CORPUS);
        Self {
            first_names,
            last_names,
            narrative,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    fn settler_name(&mut self) -> String {
        let first = title_words(&self.first_names.generate(1, &mut self.rng));
        let last = title_words(&self.last_names.generate(1, &mut self.rng));
        format!("{first} {last}")
    }

    fn agent_seed(&mut self) -> AgentSeed {
        AgentSeed {
            name: self.settler_name(),
            personality: Personality {
                openness: self.rng.gen_range(0.1..1.0),
                diligence: self.rng.gen_range(0.1..1.0),
                sociability: self.rng.gen_range(0.1..1.0),
            },
            skills: Skills {
                harvesting: self.rng.gen_range(1..=5),
                building: self.rng.gen_range(1..=5),
                scavenging: self.rng.gen_range(1..=5),
            },
        }
    }

    fn flavor(&mut self) -> FlavorCatalog {
        let world_name = title_words(&self.narrative.generate(2, &mut self.rng));
        let opening_narrative = self.narrative.generate(self.rng.gen_range(15..=25), &mut self.rng);
        let biomes = (0..self.rng.gen_range(2..=3))
            .map(|_| BiomeFlavor {
                name: title_words(&self.narrative.generate(2, &mut self.rng)),
                description: self.narrative.generate(self.rng.gen_range(10..=20), &mut self.rng),
            })
            .collect();
        let structures = (0..self.rng.gen_range(1..=2))
            .map(|_| StructureFlavor {
                name: title_words(&self.narrative.generate(2, &mut self.rng)),
                description: self.narrative.generate(self.rng.gen_range(10..=20), &mut self.rng),
            })
            .collect();
        let creatures = (0..self.rng.gen_range(2..=3))
            .map(|_| CreatureFlavor {
                name: title_words(&self.narrative.generate(2, &mut self.rng)),
                description: self.narrative.generate(self.rng.gen_range(10..=20), &mut self.rng),
                temperament: match self.rng.gen_range(0..3) {
                    0 => Temperament::Docile,
                    1 => Temperament::Skittish,
                    _ => Temperament::Aggressive,
                },
            })
            .collect();
        FlavorCatalog {
            world_name,
            opening_narrative,
            biomes,
            structures,
            creatures,
        }
    }
}

impl GenesisProvider for MarkovGenesisProvider {
    fn genesis(&mut self) -> Result<GenesisBundle> {
        let agent_count = self.rng.gen_range(3..=5);
        let agents = (0..agent_count).map(|_| self.agent_seed()).collect();
        let opening_event = EventSeed {
            kind: EventKind::Narrative,
            title: title_words(&self.narrative.generate(self.rng.gen_range(3..=5), &mut self.rng)),
            description: self.narrative.generate(self.rng.gen_range(15..=25), &mut self.rng),
        };
        let cultural_values = CulturalValues {
            collectivism: self.rng.gen_range(0.4..=0.7),
            pragmatism: self.rng.gen_range(0.4..=0.7),
            spirituality: self.rng.gen_range(0.2..=0.5),
        };
        let flavor = self.flavor();
        info!(settlers = agent_count, world = %flavor.world_name, "genesis complete");
        Ok(GenesisBundle {
            agents,
            cultural_values,
            opening_event,
            flavor,
        })
    }
}

impl NarrativeProvider for MarkovGenesisProvider {
    fn narrative(
        &mut self,
        _day: u64,
        _resources: &ColonyResources,
        _recent_events: &[GameEvent],
    ) -> Result<EventSeed> {
        let kind = match self.rng.gen_range(0..3) {
            0 => EventKind::Narrative,
            1 => EventKind::Agent,
            _ => EventKind::System,
        };
        Ok(EventSeed {
            kind,
            title: title_words(&self.narrative.generate(self.rng.gen_range(4..=6), &mut self.rng)),
            description: self.narrative.generate(self.rng.gen_range(15..=25), &mut self.rng),
        })
    }
}

/// Strip terminal punctuation and capitalize each word, for names/titles
fn title_words(text: &str) -> String {
    text.trim_end_matches(['.', '?', '!'])
        .split_whitespace()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
