//! The engine object
//!
//! A session owns the authoritative snapshot, the config, and the
//! narrative provider. Construction runs worldgen, spawning, and genesis
//! to completion before the first tick; any failure there aborts the whole
//! session. The session has no timers: whoever owns it decides when to
//! call `advance`.

use std::path::Path;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::agent::Agent;
use crate::colony::{ColonyResources, ResearchProgress};
use crate::core::config::SimulationConfig;
use crate::core::error::Result;
use crate::core::types::Vec2;
use crate::core::Calendar;
use crate::genesis::{GenesisProvider, MarkovGenesisProvider, NarrativeProvider};
use crate::sim::events::EventLog;
use crate::sim::state::SimulationState;
use crate::sim::tick::{self, TickOutcome};
use crate::world::WorldData;
use crate::worldgen;

/// How many recent events a narrative provider gets to look at
const NARRATIVE_CONTEXT_EVENTS: usize = 10;

pub struct Session {
    state: SimulationState,
    config: SimulationConfig,
    narrative: Box<dyn NarrativeProvider>,
}

impl Session {
    /// Build a session from scratch: worldgen, spawning, then genesis.
    pub fn new(
        config: SimulationConfig,
        genesis: &mut dyn GenesisProvider,
        narrative: Box<dyn NarrativeProvider>,
    ) -> Result<Self> {
        config.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

        let tile_map =
            worldgen::generate_tile_map(config.world_width, config.world_height, &config, &mut rng);
        let bundle = genesis.genesis()?;
        let mut world = WorldData::new(tile_map, bundle.flavor);
        worldgen::spawn_entities(&mut world, &config, &mut rng);

        let agents = bundle
            .agents
            .into_iter()
            .map(|seed| {
                let position = Vec2::new(
                    rng.gen_range(0.0..config.world_width.max(1) as f32),
                    rng.gen_range(0.0..config.world_height.max(1) as f32),
                );
                Agent::new(&mut rng, seed.name, position, seed.personality, seed.skills)
            })
            .collect::<Vec<_>>();

        let mut events = EventLog::default();
        events.append(&mut rng, 0, bundle.opening_event, true);

        info!(
            settlers = agents.len(),
            nodes = world.resource_nodes.len(),
            world = %world.flavor.world_name,
            "session ready"
        );

        Ok(Self {
            state: SimulationState {
                calendar: Calendar::new(config.ticks_per_hour),
                paused: false,
                agents,
                resources: ColonyResources::default(),
                cultural_values: bundle.cultural_values,
                world,
                research: ResearchProgress::default(),
                events,
                rng,
            },
            config,
            narrative,
        })
    }

    /// The built-in all-Markov session
    pub fn with_markov(config: SimulationConfig) -> Result<Self> {
        let seed = config.seed;
        let mut genesis = MarkovGenesisProvider::new(seed);
        // Separate provider instance so day narration does not perturb
        // replays of the genesis stream.
        let narrative = Box::new(MarkovGenesisProvider::new(seed.wrapping_add(1)));
        Self::new(config, &mut genesis, narrative)
    }

    /// Run one tick and absorb its output. On a day boundary the
    /// narrative provider is asked for a new event.
    pub fn advance(&mut self) -> Result<()> {
        let TickOutcome {
            state, day_rolled, ..
        } = tick::tick(&self.state, &self.config);
        self.state = state;
        if day_rolled {
            let seed = self.narrative.narrative(
                self.state.day(),
                &self.state.resources,
                self.state.events.recent(NARRATIVE_CONTEXT_EVENTS),
            )?;
            let now = self.state.calendar.current_tick();
            self.state.events.append(&mut self.state.rng, now, seed, true);
        }
        Ok(())
    }

    pub fn toggle_pause(&mut self) {
        self.state.paused = !self.state.paused;
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.state)?)
    }

    pub fn save_json(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
