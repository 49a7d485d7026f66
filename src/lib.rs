//! A small, from-scratch neural-network toolkit.
//!
//! `backprop` implements a dense `f64` vector primitive, a topology-driven
//! multilayer perceptron with sigmoid activations trained by
//! back-propagation with momentum, a pluggable cost-function/trainer
//! abstraction, and a textual serialization format for persisting trained
//! networks. It is aimed at learners and small experiments (logic gates,
//! digit recognition, game heuristics), not production ML.
//!
//! # Design goals
//!
//! - Explicit state: a [`Network`] is a plain mutable aggregate of topology,
//!   learning rate, momentum, bound input, and per-neuron weights, momentum
//!   deltas, bias, last output, and last error signal.
//! - Deterministic construction: randomness is injected (`R: Rng` or a
//!   seed), never drawn from hidden global state.
//! - Exact persistence: the text format round-trips every `f64` bit for bit.
//! - Swappable behavior at the seams: the weight-update rule is a
//!   [`WeightUpdate`] trait object chosen at construction, and the cost
//!   policy is selected per training run.
//!
//! # Panics vs `Result`
//!
//! Every operation that can receive a wrongly-sized vector, a malformed
//! stream, or an incomplete cost selection returns [`Result`] with a typed
//! [`Error`]; a failed call leaves the network exactly as it was.
//! Out-of-bounds indexing into a [`Vector`] panics with the usual slice
//! semantics, as does [`Vector::arg_max`]'s `None` when unwrapped on an
//! empty vector; both are programmer errors, not runtime conditions.
//!
//! # Quick start
//!
//! ```
//! use backprop::{Cost, Network, Topology, Trainer, TrainingSet, Vector};
//!
//! let topology = Topology::new(vec![2, 2, 1])?;
//! let mut network = Network::new_with_seed(topology, 0.4, 0.9, 7);
//!
//! let mut xor = TrainingSet::new(2, 1)?;
//! xor.push(Vector::from(vec![0.0, 0.0]), Vector::from(vec![0.0]))?;
//! xor.push(Vector::from(vec![0.0, 1.0]), Vector::from(vec![1.0]))?;
//! xor.push(Vector::from(vec![1.0, 0.0]), Vector::from(vec![1.0]))?;
//! xor.push(Vector::from(vec![1.0, 1.0]), Vector::from(vec![0.0]))?;
//!
//! let mut trainer = Trainer::new(&mut network, 40_000, 0.01);
//! let epochs = trainer.run_training(&xor, &Cost::MeanSquared)?;
//! println!("trained for {epochs} epochs");
//!
//! network.set_input(&Vector::from(vec![1.0, 0.0]))?;
//! network.feed_forward();
//! let output = network.copy_output();
//! assert_eq!(output.len(), 1);
//! # Ok::<(), backprop::Error>(())
//! ```
//!
//! # Concurrency
//!
//! Everything is single-threaded and synchronous; training mutates the
//! network in place with no isolation. Parallel experiments should clone
//! the network (a deep value copy) per worker.
//!
//! # Features
//!
//! - `serde`: a versioned JSON snapshot of the network (the `serde_model`
//!   module). The canonical persistence format remains the text encoding in
//!   [`text_model`].

pub mod cost;
pub mod data;
pub mod error;
pub mod network;
pub mod neuron;
pub mod perceptron;
pub mod text_model;
pub mod topology;
pub mod trainer;
pub mod update;
pub mod vector;

#[cfg(feature = "serde")]
pub mod serde_model;

pub use cost::{cross_entropy, mean_squared_error, Cost, UserCostFn};
pub use data::TrainingSet;
pub use error::{Error, Result};
pub use network::{Network, DEFAULT_LEARNING_RATE, DEFAULT_MOMENTUM};
pub use neuron::{LayerInput, Neuron};
pub use perceptron::{Perceptron, DEFAULT_THRESHOLD};
pub use topology::Topology;
pub use trainer::{ProgressFn, Trainer};
pub use update::{Momentum, WeightUpdate};
pub use vector::Vector;
