//! Text synthesis: bigram Markov chains and the corpora they train on

pub mod corpus;
pub mod markov;

pub use markov::{MarkovChain, UNTRAINED_FALLBACK};
