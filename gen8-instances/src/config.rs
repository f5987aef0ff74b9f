use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::GenerationError;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GeneratorConfig {
    pub time_factor: f64,
    pub service_duration: i32,
    pub tw_expansion: f64,
    pub service_window: i32,
    pub demand_loc: f64,
    pub demand_scale: f64,
    pub max_demand: i32,
    pub capacities: HashMap<usize, i32>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            time_factor: 100.0,
            service_duration: 10,
            tw_expansion: 3.0,
            service_window: 1000,
            demand_loc: 15.0,
            demand_scale: 10.0,
            max_demand: 42,
            capacities: HashMap::from([(20, 70), (50, 100), (100, 200), (150, 500), (200, 700)]),
        }
    }
}

impl GeneratorConfig {
    pub fn capacity(&self, num_nodes: usize) -> Result<i32, GenerationError> {
        self.capacities
            .get(&num_nodes)
            .copied()
            .ok_or(GenerationError::UnsupportedGraphSize(num_nodes))
    }
}
