//! Learned-policy basket controller
//!
//! A policy maps the three normalized observation inputs to one scalar.
//! Below 0.5 means left, anything else means right; the basket never idles.

use serde::{Deserialize, Serialize};

use super::{Controller, Decision, Observation};
use crate::error::{Error, Result};

/// Number of network inputs: basket x, item x, item y
pub const POLICY_INPUTS: usize = 3;

/// Output threshold separating left from right
pub const DECISION_THRESHOLD: f32 = 0.5;

/// Observation -> scalar decision function
pub trait PolicyFn {
    fn evaluate(&self, inputs: [f32; POLICY_INPUTS]) -> f32;
}

impl<F> PolicyFn for F
where
    F: Fn([f32; POLICY_INPUTS]) -> f32,
{
    fn evaluate(&self, inputs: [f32; POLICY_INPUTS]) -> f32 {
        self(inputs)
    }
}

#[inline]
fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

/// Fully connected 3 -> H -> 1 network with sigmoid activations.
///
/// With zero hidden neurons the inputs feed the output directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedForwardNetwork {
    /// Per hidden neuron: input weights followed by bias
    hidden: Vec<[f32; POLICY_INPUTS + 1]>,
    /// Output weights (one per hidden neuron, or per input when there is no
    /// hidden layer) followed by bias
    output: Vec<f32>,
}

impl FeedForwardNetwork {
    /// Flat weight count for a network with `hidden` hidden neurons
    pub fn weight_count(hidden: usize) -> usize {
        if hidden == 0 {
            POLICY_INPUTS + 1
        } else {
            hidden * (POLICY_INPUTS + 1) + hidden + 1
        }
    }

    /// Build from a flat weight vector laid out hidden layer first
    pub fn from_weights(hidden: usize, weights: &[f32]) -> Result<Self> {
        let expected = Self::weight_count(hidden);
        if weights.len() != expected {
            return Err(Error::InvalidConfig(format!(
                "network with {hidden} hidden neurons needs {expected} weights, got {}",
                weights.len()
            )));
        }

        let split = hidden * (POLICY_INPUTS + 1);
        let (hidden_weights, output) = weights.split_at(split);
        let hidden = hidden_weights
            .chunks_exact(POLICY_INPUTS + 1)
            .map(|chunk| {
                let mut neuron = [0.0; POLICY_INPUTS + 1];
                neuron.copy_from_slice(chunk);
                neuron
            })
            .collect();

        Ok(Self {
            hidden,
            output: output.to_vec(),
        })
    }

    pub fn hidden_neurons(&self) -> usize {
        self.hidden.len()
    }

    /// Forward pass, output in (0, 1)
    pub fn activate(&self, inputs: [f32; POLICY_INPUTS]) -> f32 {
        let Some((&bias, weights)) = self.output.split_last() else {
            return DECISION_THRESHOLD;
        };

        let sum = if self.hidden.is_empty() {
            weights.iter().zip(inputs).map(|(w, x)| w * x).sum::<f32>()
        } else {
            self.hidden
                .iter()
                .zip(weights)
                .map(|(neuron, w)| {
                    let pre = neuron[..POLICY_INPUTS]
                        .iter()
                        .zip(inputs)
                        .map(|(nw, x)| nw * x)
                        .sum::<f32>()
                        + neuron[POLICY_INPUTS];
                    w * sigmoid(pre)
                })
                .sum::<f32>()
        };

        sigmoid(sum + bias)
    }
}

impl PolicyFn for FeedForwardNetwork {
    fn evaluate(&self, inputs: [f32; POLICY_INPUTS]) -> f32 {
        self.activate(inputs)
    }
}

/// Controller backed by an externally trained policy
#[derive(Debug, Clone)]
pub struct LearnedPolicy<P: PolicyFn> {
    policy: P,
    speed: f32,
}

impl<P: PolicyFn> LearnedPolicy<P> {
    pub fn new(policy: P, speed: f32) -> Self {
        Self { policy, speed }
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }
}

impl<P: PolicyFn> Controller for LearnedPolicy<P> {
    fn decide(&mut self, observation: &Observation) -> Decision {
        let output = self.policy.evaluate(observation.normalized());
        if output < DECISION_THRESHOLD {
            Decision::MoveLeft
        } else {
            Decision::MoveRight
        }
    }

    fn speed(&self) -> f32 {
        self.speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observation(collector_x: f32, item_x: f32) -> Observation {
        Observation {
            collector_x,
            nearest_item_x: item_x,
            nearest_item_y: 100.0,
            arena_width: 700.0,
            arena_height: 550.0,
        }
    }

    #[test]
    fn test_threshold_mapping() {
        let mut left = LearnedPolicy::new(|_: [f32; 3]| 0.49, 150.0);
        let mut right = LearnedPolicy::new(|_: [f32; 3]| 0.51, 150.0);
        let mut exact = LearnedPolicy::new(|_: [f32; 3]| 0.5, 150.0);
        let obs = observation(0.0, 0.0);
        assert_eq!(left.decide(&obs), Decision::MoveLeft);
        assert_eq!(right.decide(&obs), Decision::MoveRight);
        // Always moving, never Hold
        assert_eq!(exact.decide(&obs), Decision::MoveRight);
        assert_eq!(left.speed(), 150.0);
    }

    #[test]
    fn test_chasing_policy_follows_item() {
        // item_x - collector_x > 0 pushes the output above 0.5
        let chase = |inputs: [f32; 3]| sigmoid(20.0 * (inputs[1] - inputs[0]));
        let mut policy = LearnedPolicy::new(chase, 150.0);
        assert_eq!(policy.decide(&observation(100.0, 500.0)), Decision::MoveRight);
        assert_eq!(policy.decide(&observation(500.0, 100.0)), Decision::MoveLeft);
    }

    #[test]
    fn test_weight_counts() {
        assert_eq!(FeedForwardNetwork::weight_count(0), 4);
        assert_eq!(FeedForwardNetwork::weight_count(4), 21);
        assert!(FeedForwardNetwork::from_weights(4, &[0.0; 20]).is_err());
        let net = FeedForwardNetwork::from_weights(4, &[0.0; 21]).unwrap();
        assert_eq!(net.hidden_neurons(), 4);
    }

    #[test]
    fn test_zero_weights_output_half() {
        let net = FeedForwardNetwork::from_weights(3, &[0.0; 16]).unwrap();
        assert!((net.activate([0.3, 0.7, 0.1]) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_direct_network() {
        // output = sigmoid(10 * (item_x - collector_x))
        let net = FeedForwardNetwork::from_weights(0, &[-10.0, 10.0, 0.0, 0.0]).unwrap();
        assert!(net.activate([0.1, 0.9, 0.0]) > 0.5);
        assert!(net.activate([0.9, 0.1, 0.0]) < 0.5);

        let mut controller = LearnedPolicy::new(net, 150.0);
        assert_eq!(controller.decide(&observation(50.0, 600.0)), Decision::MoveRight);
    }
}
