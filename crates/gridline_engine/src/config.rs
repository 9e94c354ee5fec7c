//! Simulation configuration.

use gridline_foundation::Result;
use gridline_storage::{TileRewardPolicy, WorldBuilder};

use crate::moves::movement_rule;
use crate::objective::objective;

/// Named configuration for a simulation.
///
/// Rules are referred to by registry name and resolved in [`SimConfig::builder`],
/// which is where every configuration error surfaces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimConfig {
    /// Grid width in tiles.
    pub width: i32,

    /// Grid height in tiles.
    pub height: i32,

    /// Movement rule name.
    pub movement: String,

    /// Objective name.
    pub objective: String,

    /// Seed for per-turn randomness.
    pub seed: Option<u64>,

    /// When floor rewards are granted.
    pub reward_policy: TileRewardPolicy,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: 7,
            height: 7,
            movement: "default".to_string(),
            objective: "default".to_string(),
            seed: None,
            reward_policy: TileRewardPolicy::PerSubStep,
        }
    }
}

impl SimConfig {
    /// A collect-then-exit maze of the given size.
    #[must_use]
    pub fn maze(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// A box-pushing puzzle: every pushable must reach an exit.
    #[must_use]
    pub fn sokoban(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            objective: "push".to_string(),
            ..Self::default()
        }
    }

    /// A maze on a torus.
    #[must_use]
    pub fn torus(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            movement: "wrap".to_string(),
            ..Self::default()
        }
    }

    /// Builder method to set the grid size.
    #[must_use]
    pub fn with_size(mut self, width: i32, height: i32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Builder method to set the movement rule.
    #[must_use]
    pub fn with_movement(mut self, name: impl Into<String>) -> Self {
        self.movement = name.into();
        self
    }

    /// Builder method to set the objective.
    #[must_use]
    pub fn with_objective(mut self, name: impl Into<String>) -> Self {
        self.objective = name.into();
        self
    }

    /// Builder method to set the seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builder method to set the floor reward policy.
    #[must_use]
    pub fn with_reward_policy(mut self, policy: TileRewardPolicy) -> Self {
        self.reward_policy = policy;
        self
    }

    /// Resolves the named rules and returns a world builder ready for entities.
    ///
    /// # Errors
    ///
    /// Returns an error if either rule name is unknown. Grid and entity
    /// problems are reported later by [`WorldBuilder::build`].
    pub fn builder(&self) -> Result<WorldBuilder> {
        let mut builder = WorldBuilder::new(self.width, self.height)
            .movement(movement_rule(&self.movement)?)
            .objective(objective(&self.objective)?)
            .reward_policy(self.reward_policy);
        if let Some(seed) = self.seed {
            builder = builder.seed(seed);
        }
        Ok(builder)
    }
}
