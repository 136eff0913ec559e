//! Sample driver for the ISAP engine
//!
//! Without arguments, solves the six-node textbook network and checks the
//! bounded-flow sample. With a path argument, loads a JSON instance
//! (`"kind": "max_flow"` or `"kind": "bounded"`) and solves it. Prints a
//! JSON report to stdout.

use std::env;
use std::error::Error;

use log::info;
use serde::Serialize;

use gapflow_core::validation::check_flow;
use gapflow_core::{BoundedFlowNetwork, BoundedSolution, Instance, IsapSolver, MaxFlowResult, ResidualNetwork};

#[derive(Debug, Serialize)]
struct BoundedReport {
    feasible: bool,
    solution: Option<BoundedSolution>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum Report {
    MaxFlow(MaxFlowResult),
    Bounded(BoundedReport),
}

fn bounded_report(network: &BoundedFlowNetwork) -> BoundedReport {
    let solution = network.solve();
    BoundedReport {
        feasible: solution.is_some(),
        solution,
    }
}

fn sample_reports() -> Vec<Report> {
    let mut network = ResidualNetwork::new(6);
    network.add_edge(0, 1, 16);
    network.add_edge(0, 2, 13);
    network.add_edge(1, 2, 10);
    network.add_edge(1, 3, 12);
    network.add_edge(2, 1, 4);
    network.add_edge(2, 4, 14);
    network.add_edge(3, 2, 9);
    network.add_edge(3, 5, 20);
    network.add_edge(4, 3, 7);
    network.add_edge(4, 5, 4);

    let result = IsapSolver::new().solve_with_cut(&mut network, 0, 5);
    match check_flow(&network, 0, 5) {
        Ok(value) => info!("Maximum flow: {} (verified {})", result.max_flow, value),
        Err(violation) => log::error!("Flow invariant broken: {}", violation),
    }

    let mut bounded = BoundedFlowNetwork::new(4, 0, 3);
    bounded.add_edge(0, 1, 2, 5);
    bounded.add_edge(0, 2, 1, 3);
    bounded.add_edge(1, 3, 1, 3);
    bounded.add_edge(2, 3, 2, 4);
    let bounded = bounded_report(&bounded);
    if bounded.feasible {
        info!("Sample has a feasible flow");
    } else {
        info!("Sample does not have a feasible flow");
    }

    vec![Report::MaxFlow(result), Report::Bounded(bounded)]
}

fn instance_report(path: &str) -> Result<Report, Box<dyn Error>> {
    info!("Loading instance from {}", path);
    let report = match Instance::from_path(path)? {
        Instance::MaxFlow(instance) => Report::MaxFlow(instance.solve()?),
        Instance::Bounded(instance) => Report::Bounded(bounded_report(&instance.build_network()?)),
    };
    Ok(report)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let reports = match env::args().nth(1) {
        Some(path) => vec![instance_report(&path)?],
        None => sample_reports(),
    };

    println!("{}", serde_json::to_string_pretty(&reports)?);
    Ok(())
}
