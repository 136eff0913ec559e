//! Flow algorithms on residual networks
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod levels;
pub mod max_flow;
pub mod bounded_flow;
pub mod closure;

pub use self::levels::LevelAssignment;
pub use self::max_flow::{IsapSolver, IsapStats, MaxFlowResult};
pub use self::bounded_flow::{has_feasible_flow, BoundedEdge, BoundedFlowNetwork, BoundedSolution};
pub use self::closure::{max_weight_closure, Closure};
