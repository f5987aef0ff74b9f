use ndarray::Array2;
use rand::{
    rngs::{SmallRng, StdRng},
    Rng, SeedableRng,
};
use serde::{Deserialize, Serialize};
use statrs::function::erf::erf_inv;

use crate::{config::GeneratorConfig, GenerationError};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Instance {
    pub seed: [u8; 32],
    pub num_nodes: usize,
    pub depot_position: (f64, f64),
    pub node_positions: Vec<(f64, f64)>,
    pub demands: Vec<i32>,
    pub max_capacity: i32,
    pub depot_time_window: (i32, i32),
    pub time_windows: Vec<(i32, i32)>,
    pub service_durations: Vec<i32>,
}

impl Instance {
    pub fn generate(
        seed: &[u8; 32],
        num_nodes: usize,
        config: &GeneratorConfig,
    ) -> Result<Self, GenerationError> {
        let max_capacity = config.capacity(num_nodes)?;
        let mut rng = SmallRng::from_seed(seed.clone());

        // Positions are sampled in the unit square and carried at time scale,
        // so travel distances and time windows share one unit.
        let depot_position = (
            rng.gen::<f64>() * config.time_factor,
            rng.gen::<f64>() * config.time_factor,
        );
        let node_positions: Vec<(f64, f64)> = (0..num_nodes)
            .map(|_| {
                (
                    rng.gen::<f64>() * config.time_factor,
                    rng.gen::<f64>() * config.time_factor,
                )
            })
            .collect();

        let mut time_windows = Vec::with_capacity(num_nodes);
        for (node, &position) in node_positions.iter().enumerate() {
            let travel = euclidean(depot_position, position);
            // Window must open after the node is reachable from the depot...
            let min_t = travel.ceil() as i32 + 1;
            // ...and close early enough to serve the node and return before
            // the service window ends.
            let max_t = (travel + config.service_duration as f64).ceil() as i32 + 1;
            let upper = config.service_window - max_t;
            if min_t >= upper {
                return Err(GenerationError::InfeasibleInstance {
                    node,
                    lower: min_t,
                    upper,
                });
            }

            let ready = rng.gen_range(min_t..upper);
            let width = normal_sample(&mut rng, 0.0, 1.0)
                .abs()
                .max(1.0 / config.time_factor);
            let due = ((ready as f64 + width * config.tw_expansion * config.time_factor) as i32)
                .min(upper);
            time_windows.push((ready, due));
        }

        let demands: Vec<i32> = (0..num_nodes)
            .map(|_| {
                let demand = normal_sample(&mut rng, config.demand_loc, config.demand_scale).abs();
                (demand as i32).clamp(1, config.max_demand)
            })
            .collect();

        let instance = Self {
            seed: seed.clone(),
            num_nodes,
            depot_position,
            node_positions,
            demands,
            max_capacity,
            depot_time_window: (0, config.service_window),
            time_windows,
            service_durations: vec![config.service_duration; num_nodes],
        };
        instance.validate(config)?;
        Ok(instance)
    }

    pub fn generate_batch(
        seed: &[u8; 32],
        num_nodes: usize,
        count: usize,
        config: &GeneratorConfig,
    ) -> Result<Vec<Self>, GenerationError> {
        let mut rng = StdRng::from_seed(seed.clone());
        (0..count)
            .map(|_| Self::generate(&rng.gen(), num_nodes, config))
            .collect()
    }

    pub fn validate(&self, config: &GeneratorConfig) -> Result<(), GenerationError> {
        let num_nodes = self.num_nodes;
        if self.node_positions.len() != num_nodes
            || self.demands.len() != num_nodes
            || self.time_windows.len() != num_nodes
            || self.service_durations.len() != num_nodes
        {
            return Err(GenerationError::ShapeMismatch(format!(
                "expected {} node positions, demands, time windows and durations, got {}/{}/{}/{}",
                num_nodes,
                self.node_positions.len(),
                self.demands.len(),
                self.time_windows.len(),
                self.service_durations.len()
            )));
        }
        for (node, (&position, &(ready, due))) in self
            .node_positions
            .iter()
            .zip(&self.time_windows)
            .enumerate()
        {
            let travel = euclidean(self.depot_position, position);
            let min_t = travel.ceil() as i32 + 1;
            let upper = config.service_window
                - ((travel + self.service_durations[node] as f64).ceil() as i32 + 1);
            if ready < min_t || due > upper || ready > due {
                return Err(GenerationError::InfeasibleInstance {
                    node,
                    lower: min_t,
                    upper,
                });
            }
        }
        Ok(())
    }

    pub fn distance_matrix(&self) -> Array2<f64> {
        let num_nodes = self.node_positions.len();
        Array2::from_shape_fn((num_nodes, num_nodes), |(from, to)| {
            euclidean(self.node_positions[from], self.node_positions[to])
        })
    }
}

fn euclidean(from: (f64, f64), to: (f64, f64)) -> f64 {
    let dx = from.0 - to.0;
    let dy = from.1 - to.1;
    dx.hypot(dy)
}

fn normal_sample<T: Rng>(rng: &mut T, mean: f64, std_dev: f64) -> f64 {
    let sample = rng.gen::<f64>();
    mean + std_dev * (2.0_f64).sqrt() * erf_inv(2.0 * sample - 1.0)
}
