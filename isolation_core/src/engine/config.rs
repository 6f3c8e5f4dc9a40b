use crate::engine::eval::Heuristic;
use serde::{Deserialize, Serialize};

/// Deepest pass the driver attempts when nothing else is configured.
pub const DEFAULT_MAX_DEPTH: u8 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub heuristic: Heuristic,
    pub max_depth: u8,
    /// Play a random legal move instead of searching on the very first ply.
    pub random_opening: bool,
    /// Seed for the opening move; entropy when absent.
    pub seed: Option<u64>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            heuristic: Heuristic::Mobility,
            max_depth: DEFAULT_MAX_DEPTH,
            random_opening: true,
            seed: None,
        }
    }
}

impl AgentConfig {
    pub fn load_from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json_str)
    }

    /// Depth ceiling actually used by the driver. A ceiling of zero would
    /// never publish, so it is raised to one.
    #[must_use]
    pub fn depth_ceiling(&self) -> u8 {
        self.max_depth.max(1)
    }
}
