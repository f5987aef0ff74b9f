use thiserror::Error;

pub mod config;
pub mod cvrptw;
pub mod gen8;
pub mod graph;

pub use config::GeneratorConfig;
pub use cvrptw::Instance;
pub use gen8::{save_gen8, write_gen8, VEHICLE_COUNT};
pub use graph::{build_graph, DenseGraph, DEFAULT_FEATURE_SCALE, FEATURE_EPSILON};

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("no vehicle capacity configured for graph size {0}")]
    UnsupportedGraphSize(usize),
    #[error("node {node}: feasible service horizon [{lower}, {upper}) is empty")]
    InfeasibleInstance { node: usize, lower: i32, upper: i32 },
    #[error("mismatched input shapes: {0}")]
    ShapeMismatch(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
