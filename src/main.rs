//! Havenfall - Entry Point
//!
//! Boots a session from the command-line flags (or a TOML config file)
//! and drops into a small interactive loop for stepping the simulation
//! and inspecting its state.

use havenfall::core::config::SimulationConfig;
use havenfall::core::error::Result;
use havenfall::sim::{Session, SimulationState};

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "havenfall", about = "Deterministic colony simulation engine")]
struct Args {
    /// World seed; the same seed replays the same colony
    #[arg(long)]
    seed: Option<u64>,
    /// World width in tiles
    #[arg(long)]
    width: Option<u32>,
    /// World height in tiles
    #[arg(long)]
    height: Option<u32>,
    /// TOML config file; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("havenfall=info")),
        )
        .init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => SimulationConfig::from_toml_file(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(width) = args.width {
        config.world_width = width;
    }
    if let Some(height) = args.height {
        config.world_height = height;
    }

    let mut session = Session::with_markov(config)?;
    let state = session.state();
    println!("\n=== HAVENFALL ===");
    println!("Welcome to {}.", state.world.flavor.world_name);
    if let Some(opening) = state.events.entries().first() {
        println!("{}", opening.description);
    }
    println!();
    println!("Commands:");
    println!("  tick / t     - Advance the simulation by one tick");
    println!("  run <n>      - Run n ticks");
    println!("  status / s   - Show colony status");
    println!("  events / e   - Show recent events");
    println!("  pause / p    - Toggle pause");
    println!("  save <path>  - Write the state snapshot as JSON");
    println!("  quit / q     - Exit");
    println!();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let input = input.trim();

        if input.is_empty() {
            continue;
        }
        if input == "quit" || input == "q" {
            break;
        }
        if input == "tick" || input == "t" {
            session.advance()?;
            println!("Tick {} complete.", session.state().calendar.current_tick());
            continue;
        }
        if let Some(n) = input.strip_prefix("run ") {
            if let Ok(n) = n.parse::<u64>() {
                println!("Running {n} ticks...");
                for _ in 0..n {
                    session.advance()?;
                }
                let state = session.state();
                println!(
                    "Now at tick {} (day {}, {:02}:00).",
                    state.calendar.current_tick(),
                    state.day(),
                    state.hour()
                );
            } else {
                println!("Usage: run <number>");
            }
            continue;
        }
        if input == "status" || input == "s" {
            display_status(session.state());
            continue;
        }
        if input == "events" || input == "e" {
            for event in session.state().events.recent(10) {
                println!("[tick {}] {} - {}", event.tick, event.title, event.description);
            }
            continue;
        }
        if input == "pause" || input == "p" {
            session.toggle_pause();
            let label = if session.state().paused { "paused" } else { "running" };
            println!("Simulation {label}.");
            continue;
        }
        if let Some(path) = input.strip_prefix("save ") {
            session.save_json(path.as_ref())?;
            println!("Saved to {path}.");
            continue;
        }
        println!("Unknown command: {input}");
    }

    println!("Goodbye.");
    Ok(())
}

fn display_status(state: &SimulationState) {
    println!(
        "Day {} {:02}:00 ({:?}) | tick {}",
        state.day(),
        state.hour(),
        state.calendar.current_phase(),
        state.calendar.current_tick()
    );
    let r = &state.resources;
    println!(
        "Food {:.1} | Wood {:.1} | Scrap {:.1} | Research {:.1}",
        r.food, r.wood, r.scrap, r.research_points
    );
    if let Some(active) = &state.research.active {
        println!("Researching: {active}");
    }
    println!("Settlers:");
    for agent in &state.agents {
        println!(
            "  {} at ({:.1}, {:.1}) - {:?} | hunger {:.0} mood {:.0} energy {:.0}",
            agent.name,
            agent.position.x,
            agent.position.y,
            agent.state,
            agent.needs.hunger,
            agent.needs.mood,
            agent.needs.energy
        );
    }
    println!(
        "Nodes remaining: {} | Events logged: {}",
        state.world.resource_nodes.len(),
        state.events.len()
    );
}
