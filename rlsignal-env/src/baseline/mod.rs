mod policy;
mod runner;
mod signal_environment;

pub use policy::{BaselinePolicy, PhaseSequencePolicy, RoundRobinPolicy};
pub use runner::{run_baseline, run_episode, EpisodeReport};
pub use signal_environment::{SignalEnvironment, SignalPolicy, StepOutcome};
