//! Reward selection: a player owes a one-of-many resource choice.

mod select;

pub use select::{RewardState, SelectReward};
