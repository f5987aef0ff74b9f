use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::{cvrptw::Instance, GenerationError};

/// Substituted for feature values that would otherwise be exactly zero.
pub const FEATURE_EPSILON: f64 = 1e-7;

pub const DEFAULT_FEATURE_SCALE: f64 = 1000.0;

/// Complete directed graph over the customer nodes, self-loops included.
/// The edge at flat index `u * n + v` is the arc `v -> u` and carries
/// `distances[(u, v)]`; consumers index edges positionally.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DenseGraph {
    pub num_nodes: usize,
    pub edge_index: Vec<(usize, usize)>,
    pub node_features: Array1<f64>,
    pub edge_features: Array1<f64>,
    pub time_windows: Vec<(f64, f64)>,
    pub durations: Vec<f64>,
}

impl DenseGraph {
    pub fn from_instance(
        instance: &Instance,
        normalize: bool,
        scale: f64,
    ) -> Result<Self, GenerationError> {
        build_graph(
            &instance.demands,
            &instance.time_windows,
            &instance.service_durations,
            &instance.distance_matrix(),
            instance.max_capacity,
            normalize,
            scale,
        )
    }
}

pub fn build_graph(
    demands: &[i32],
    time_windows: &[(i32, i32)],
    durations: &[i32],
    distances: &Array2<f64>,
    max_capacity: i32,
    normalize: bool,
    scale: f64,
) -> Result<DenseGraph, GenerationError> {
    let num_nodes = demands.len();
    if time_windows.len() != num_nodes {
        return Err(GenerationError::ShapeMismatch(format!(
            "expected {} time windows, got {}",
            num_nodes,
            time_windows.len()
        )));
    }
    if durations.len() != num_nodes {
        return Err(GenerationError::ShapeMismatch(format!(
            "expected {} durations, got {}",
            num_nodes,
            durations.len()
        )));
    }
    if distances.dim() != (num_nodes, num_nodes) {
        return Err(GenerationError::ShapeMismatch(format!(
            "expected a {0}x{0} distance matrix, got {1}x{2}",
            num_nodes,
            distances.dim().0,
            distances.dim().1
        )));
    }

    let node_divisor = if normalize { max_capacity as f64 } else { 1.0 };
    let feature_divisor = if normalize { scale } else { 1.0 };

    let mut edge_index = Vec::with_capacity(num_nodes * num_nodes);
    let mut edge_features = Vec::with_capacity(num_nodes * num_nodes);
    for u in 0..num_nodes {
        for v in 0..num_nodes {
            edge_index.push((v, u));
            edge_features.push(substitute_zero(distances[(u, v)]) / feature_divisor);
        }
    }

    let node_features = demands
        .iter()
        .map(|&demand| substitute_zero(demand as f64) / node_divisor)
        .collect();

    Ok(DenseGraph {
        num_nodes,
        edge_index,
        node_features,
        edge_features: Array1::from_vec(edge_features),
        time_windows: time_windows
            .iter()
            .map(|&(ready, due)| (ready as f64 / feature_divisor, due as f64 / feature_divisor))
            .collect(),
        durations: durations
            .iter()
            .map(|&duration| duration as f64 / feature_divisor)
            .collect(),
    })
}

fn substitute_zero(value: f64) -> f64 {
    if value == 0.0 {
        FEATURE_EPSILON
    } else {
        value
    }
}
