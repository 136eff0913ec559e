//! GAPFLOW Algorithm Framework
//! Maximum flow by improved shortest augmenting paths and the reductions built on it
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod traits;
pub mod graph;
pub mod instance;

pub use self::traits::*;
pub use self::graph::*;
pub use self::instance::{BoundedInstance, FlowInstance, Instance};
