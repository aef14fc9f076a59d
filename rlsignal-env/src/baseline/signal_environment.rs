use crate::EnvError;

/// result of one agent action.
#[derive(Clone, Debug, PartialEq)]
pub struct StepOutcome<O> {
    pub observation: O,
    pub reward: f64,
    /// the episode reached a terminal state
    pub terminated: bool,
    /// the episode hit its time limit
    pub truncated: bool,
}

impl<O> StepOutcome<O> {
    pub fn is_done(&self) -> bool {
        self.terminated || self.truncated
    }
}

/// a single-agent traffic signal environment. implemented by the binding to
/// the external simulator environment.
pub trait SignalEnvironment {
    type Observation;

    fn reset(&mut self, seed: Option<u64>) -> Result<Self::Observation, EnvError>;

    fn step(&mut self, action: usize) -> Result<StepOutcome<Self::Observation>, EnvError>;

    /// number of green phases the agent can choose from
    fn action_count(&self) -> usize;
}

/// chooses the next green phase.
pub trait SignalPolicy<O> {
    fn act(&mut self, observation: &O, step: usize) -> usize;

    /// called at the start of every episode, after the environment resets.
    fn reset(&mut self) {}
}
