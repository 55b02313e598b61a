//! Optional hardware path for fitness evaluation.
//!
//! The device takes two operands and produces their XOR. Feeding it the
//! endpoint genes of every edge tells which edges are cut; the balance
//! penalty is always computed in software. Any device failure makes the
//! evaluator fall back to [`SoftwareEvaluator`] for that chromosome.

use std::sync::Mutex;

use crate::chromosome::Chromosome;
use crate::error::AcceleratorError;
use crate::fitness::{balance_penalty, FitnessEvaluator, SoftwareEvaluator};
use crate::graph::Graph;

/// Synchronous request/response contract of a fitness co-processor.
pub trait FitnessAccelerator: Send {
    fn write_inputs(&mut self, p1: u32, p2: u32) -> Result<(), AcceleratorError>;
    fn read_output(&mut self) -> Result<u32, AcceleratorError>;
}

pub struct AcceleratedEvaluator<A> {
    device: Option<Mutex<A>>,
    fallback: SoftwareEvaluator,
}

impl<A: FitnessAccelerator> AcceleratedEvaluator<A> {
    pub fn new(device: A) -> Self {
        Self {
            device: Some(Mutex::new(device)),
            fallback: SoftwareEvaluator,
        }
    }

    /// Evaluator with no device attached; always uses software.
    pub fn detached() -> Self {
        Self {
            device: None,
            fallback: SoftwareEvaluator,
        }
    }

    fn cut_cost_on_device(
        device: &mut A,
        graph: &Graph,
        chromosome: &Chromosome,
    ) -> Result<u64, AcceleratorError> {
        let mut cost = 0;
        for edge in graph.edge_list() {
            let p1 = chromosome.get(edge.n1) as u32;
            let p2 = chromosome.get(edge.n2) as u32;
            device.write_inputs(p1, p2)?;
            if device.read_output()? & 1 == 1 {
                cost += edge.weight as u64;
            }
        }
        Ok(cost)
    }
}

impl<A: FitnessAccelerator> FitnessEvaluator for AcceleratedEvaluator<A> {
    fn evaluate(&self, graph: &Graph, chromosome: &Chromosome) -> u64 {
        let device = match &self.device {
            Some(device) => device,
            None => return self.fallback.evaluate(graph, chromosome),
        };

        let result = match device.lock() {
            Ok(mut device) => Self::cut_cost_on_device(&mut device, graph, chromosome),
            Err(_) => Err(AcceleratorError::Unavailable),
        };

        match result {
            Ok(cut_cost) => cut_cost + balance_penalty(graph, chromosome),
            Err(error) => {
                tracing::warn!(%error, "fitness accelerator failed, using software evaluator");
                self.fallback.evaluate(graph, chromosome)
            }
        }
    }
}
