//! Result verification

pub mod correctness;

pub use self::correctness::{check_capacity_bounds, check_conservation, check_flow, net_outflow, Violation};
