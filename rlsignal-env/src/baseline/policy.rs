use super::SignalPolicy;
use crate::{config::AgentConfig, EnvError};

/// selects phase `step mod phases`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundRobinPolicy {
    phases: usize,
}

impl RoundRobinPolicy {
    pub fn new(phases: usize) -> Result<RoundRobinPolicy, EnvError> {
        if phases == 0 {
            return Err(EnvError::InvalidConfig(String::from(
                "round robin policy needs at least one phase",
            )));
        }
        Ok(RoundRobinPolicy { phases })
    }
}

impl<O> SignalPolicy<O> for RoundRobinPolicy {
    fn act(&mut self, _observation: &O, step: usize) -> usize {
        step % self.phases
    }
}

/// repeats a fixed phase order, e.g. `[0, 3, 1, 2]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhaseSequencePolicy {
    phases: Vec<usize>,
    position: usize,
}

impl PhaseSequencePolicy {
    pub fn new(phases: Vec<usize>) -> Result<PhaseSequencePolicy, EnvError> {
        if phases.is_empty() {
            return Err(EnvError::InvalidConfig(String::from(
                "phase sequence policy needs at least one phase",
            )));
        }
        Ok(PhaseSequencePolicy {
            phases,
            position: 0,
        })
    }
}

impl<O> SignalPolicy<O> for PhaseSequencePolicy {
    fn act(&mut self, _observation: &O, _step: usize) -> usize {
        let phase = self.phases[self.position];
        self.position = (self.position + 1) % self.phases.len();
        phase
    }

    fn reset(&mut self) {
        self.position = 0;
    }
}

/// fixed-time policies that run without training.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BaselinePolicy {
    RoundRobin(RoundRobinPolicy),
    PhaseSequence(PhaseSequencePolicy),
}

impl BaselinePolicy {
    /// the largest phase index this policy can emit.
    pub fn max_phase(&self) -> usize {
        match self {
            BaselinePolicy::RoundRobin(p) => p.phases - 1,
            BaselinePolicy::PhaseSequence(p) => p.phases.iter().copied().max().unwrap_or_default(),
        }
    }
}

impl TryFrom<&AgentConfig> for BaselinePolicy {
    type Error = EnvError;

    fn try_from(value: &AgentConfig) -> Result<Self, Self::Error> {
        match value {
            AgentConfig::RoundRobin { phases } => {
                Ok(BaselinePolicy::RoundRobin(RoundRobinPolicy::new(*phases)?))
            }
            AgentConfig::PhaseSequence { phases } => Ok(BaselinePolicy::PhaseSequence(
                PhaseSequencePolicy::new(phases.clone())?,
            )),
            other => Err(EnvError::UnsupportedAgent(other.name().to_string())),
        }
    }
}

impl<O> SignalPolicy<O> for BaselinePolicy {
    fn act(&mut self, observation: &O, step: usize) -> usize {
        match self {
            BaselinePolicy::RoundRobin(p) => p.act(observation, step),
            BaselinePolicy::PhaseSequence(p) => p.act(observation, step),
        }
    }

    fn reset(&mut self) {
        match self {
            BaselinePolicy::RoundRobin(p) => SignalPolicy::<O>::reset(p),
            BaselinePolicy::PhaseSequence(p) => SignalPolicy::<O>::reset(p),
        }
    }
}
