pub mod constants;
pub mod paths;
pub mod pool;
pub mod token_graph;
pub mod trade;
pub mod types;
