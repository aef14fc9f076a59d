use serde::{Deserialize, Serialize};

use super::{BaselinePolicy, SignalEnvironment, SignalPolicy};
use crate::{config::ExperimentConfig, EnvError};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct EpisodeReport {
    pub seed: Option<u64>,
    pub steps: usize,
    pub total_reward: f64,
}

/// runs one episode from reset until the environment terminates or truncates.
pub fn run_episode<E, P>(
    env: &mut E,
    policy: &mut P,
    seed: Option<u64>,
) -> Result<EpisodeReport, EnvError>
where
    E: SignalEnvironment,
    P: SignalPolicy<E::Observation>,
{
    let n_actions = env.action_count();
    let mut observation = env.reset(seed)?;
    policy.reset();
    let mut steps = 0;
    let mut total_reward = 0.0;
    loop {
        let action = policy.act(&observation, steps);
        if action >= n_actions {
            return Err(EnvError::Environment(format!(
                "policy chose action {action} but the environment has {n_actions} actions"
            )));
        }
        let outcome = env.step(action)?;
        steps += 1;
        total_reward += outcome.reward;
        if outcome.is_done() {
            break;
        }
        observation = outcome.observation;
    }
    log::info!("episode finished after {steps} steps with total reward {total_reward}");
    Ok(EpisodeReport {
        seed,
        steps,
        total_reward,
    })
}

/// runs every episode of a fixed-time baseline experiment.
pub fn run_baseline<E: SignalEnvironment>(
    env: &mut E,
    experiment: &ExperimentConfig,
) -> Result<Vec<EpisodeReport>, EnvError> {
    let mut policy = BaselinePolicy::try_from(&experiment.agent)?;
    if policy.max_phase() >= env.action_count() {
        return Err(EnvError::InvalidConfig(format!(
            "agent '{}' uses phase {} but the environment has {} phases",
            experiment.agent.name(),
            policy.max_phase(),
            env.action_count()
        )));
    }
    (0..experiment.episodes)
        .map(|episode| {
            log::info!(
                "running {} episode {}/{}",
                experiment.agent.name(),
                episode + 1,
                experiment.episodes
            );
            run_episode(env, &mut policy, experiment.episode_seed(episode))
        })
        .collect()
}
