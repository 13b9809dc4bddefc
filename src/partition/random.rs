//! Randomized baseline assignment

use crate::graph::VertexId;
use crate::partition::{PartitionAssigner, PartitionId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Baseline strategy that ignores degree and load.
///
/// Each edge `(i, j)` draws a fresh uniform value `r` and goes to
/// `floor(i * j * r) mod P`. Only the statistical spread is meaningful; the
/// exact per-edge choice depends on the random stream implementation.
#[derive(Debug, Clone)]
pub struct RandomAssigner {
    seed: u64,
}

/// Per-run state of the random strategy
pub struct RandomState {
    rng: StdRng,
    num_partitions: usize,
}

impl RandomAssigner {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl PartitionAssigner for RandomAssigner {
    type State = RandomState;

    fn name(&self) -> &'static str {
        "random"
    }

    fn init_state(&self, num_partitions: usize) -> RandomState {
        RandomState {
            rng: StdRng::seed_from_u64(self.seed),
            num_partitions,
        }
    }

    fn assign(&self, state: &mut RandomState, src: VertexId, dst: VertexId) -> PartitionId {
        let draw: f64 = state.rng.gen();
        let product = (src as f64 * dst as f64 * draw) as u64;
        (product % state.num_partitions as u64) as PartitionId
    }
}
