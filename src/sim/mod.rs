//! Simulation core: the aggregate state, the pure tick, the event log,
//! and the session engine object

pub mod events;
pub mod session;
pub mod state;
pub mod tick;

pub use events::{EventKind, EventLog, EventSeed, GameEvent};
pub use session::Session;
pub use state::SimulationState;
pub use tick::{tick, TickOutcome};
