//! Degree and load aware assignment (HDRF: High Degree Replicated First)

use crate::graph::{VertexId, VertexIndex};
use crate::partition::{PartitionAssigner, PartitionId};
use itertools::{Itertools, MinMaxResult};

/// Greedy streaming assigner scoring every partition per edge.
///
/// `Score(p) = C_rep(p) + C_bal(p)` where the replication term rewards
/// partitions already holding an endpoint (more so for the lower-degree one)
/// and the balance term, weighted by `lambda`, rewards lightly loaded ones.
#[derive(Debug, Clone)]
pub struct HdrfAssigner {
    lambda: f64,
    epsilon: f64,
}

impl HdrfAssigner {
    pub fn new(lambda: f64, epsilon: f64) -> Self {
        Self { lambda, epsilon }
    }
}

/// Heuristic scratch state of one assignment pass.
///
/// Degrees and replica membership live in flat arrays keyed by a dense
/// re-mapping of vertex ids. Replica membership is a `P`-wide row per vertex.
#[derive(Debug, Clone)]
pub struct HdrfState {
    num_partitions: usize,
    vertices: VertexIndex,
    degrees: Vec<u64>,
    replicas: Vec<bool>,
    loads: Vec<u64>,
}

impl HdrfState {
    pub fn new(num_partitions: usize) -> Self {
        Self {
            num_partitions,
            vertices: VertexIndex::default(),
            degrees: Vec::new(),
            replicas: Vec::new(),
            loads: vec![0; num_partitions],
        }
    }

    /// Count one more occurrence of `vertex`, creating its rows on first sight
    fn touch(&mut self, vertex: VertexId) -> usize {
        let (idx, inserted) = self.vertices.get_or_insert(vertex);
        if inserted {
            self.degrees.push(0);
            self.replicas
                .extend(std::iter::repeat(false).take(self.num_partitions));
        }
        let idx = idx as usize;
        self.degrees[idx] += 1;
        idx
    }

    /// Update degrees for the edge `(src, dst)` and return both dense indices
    pub fn observe(&mut self, src: VertexId, dst: VertexId) -> (usize, usize) {
        let i = self.touch(src);
        let j = self.touch(dst);
        (i, j)
    }

    /// Place an edge on `partition`: bump its load and mark both endpoints replicated there
    pub fn commit(&mut self, i: usize, j: usize, partition: PartitionId) {
        self.loads[partition] += 1;
        self.replicas[i * self.num_partitions + partition] = true;
        self.replicas[j * self.num_partitions + partition] = true;
    }

    fn replicated_at(&self, idx: usize, partition: PartitionId) -> bool {
        self.replicas[idx * self.num_partitions + partition]
    }

    pub fn num_partitions(&self) -> usize {
        self.num_partitions
    }

    pub fn loads(&self) -> &[u64] {
        &self.loads
    }

    /// Online degree of `vertex` so far
    pub fn degree_of(&self, vertex: VertexId) -> Option<u64> {
        self.vertices
            .get(vertex)
            .map(|idx| self.degrees[idx as usize])
    }

    pub fn is_replicated(&self, vertex: VertexId, partition: PartitionId) -> bool {
        self.vertices
            .get(vertex)
            .map_or(false, |idx| self.replicated_at(idx as usize, partition))
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }
}

/// Score every partition for an edge whose endpoints have dense indices `i`, `j`
pub fn hdrf_scores(state: &HdrfState, i: usize, j: usize, lambda: f64, epsilon: f64) -> Vec<f64> {
    let d_i = state.degrees[i] as f64;
    let d_j = state.degrees[j] as f64;
    let theta_i = d_i / (d_i + d_j);
    let theta_j = d_j / (d_i + d_j);

    let (min_load, max_load) = match state.loads.iter().minmax() {
        MinMaxResult::NoElements => (0, 0),
        MinMaxResult::OneElement(&load) => (load, load),
        MinMaxResult::MinMax(&min, &max) => (min, max),
    };
    let (min_load, max_load) = (min_load as f64, max_load as f64);

    (0..state.num_partitions)
        .map(|p| {
            let g_i = if state.replicated_at(i, p) { 1.0 + (1.0 - theta_i) } else { 0.0 };
            let g_j = if state.replicated_at(j, p) { 1.0 + (1.0 - theta_j) } else { 0.0 };
            let c_rep = g_i + g_j;
            let c_bal =
                lambda * (max_load - state.loads[p] as f64) / (epsilon + max_load - min_load);
            c_rep + c_bal
        })
        .collect()
}

/// Index of the highest score, lowest index on ties
pub fn best_partition(scores: &[f64]) -> PartitionId {
    let mut best = 0;
    for (p, &score) in scores.iter().enumerate().skip(1) {
        if score > scores[best] {
            best = p;
        }
    }
    best
}

impl PartitionAssigner for HdrfAssigner {
    type State = HdrfState;

    fn name(&self) -> &'static str {
        "hdrf"
    }

    fn init_state(&self, num_partitions: usize) -> HdrfState {
        HdrfState::new(num_partitions)
    }

    fn assign(&self, state: &mut HdrfState, src: VertexId, dst: VertexId) -> PartitionId {
        let (i, j) = state.observe(src, dst);
        let scores = hdrf_scores(state, i, j, self.lambda, self.epsilon);
        let partition = best_partition(&scores);
        state.commit(i, j, partition);
        partition
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_edge_goes_to_partition_zero() {
        let assigner = HdrfAssigner::new(1.0, 1.0);
        let mut state = assigner.init_state(4);
        assert_eq!(assigner.assign(&mut state, 0, 1), 0);
        assert_eq!(state.loads(), &[1, 0, 0, 0]);
        assert!(state.is_replicated(0, 0));
        assert!(state.is_replicated(1, 0));
        assert!(!state.is_replicated(1, 1));
    }

    #[test]
    fn test_tie_breaks_to_lowest_index() {
        assert_eq!(best_partition(&[1.0, 3.0, 3.0, 2.0]), 1);
        assert_eq!(best_partition(&[0.0, 0.0]), 0);
        assert_eq!(best_partition(&[5.0]), 0);
    }

    #[test]
    fn test_degrees_count_both_endpoints() {
        let assigner = HdrfAssigner::new(1.0, 1.0);
        let mut state = assigner.init_state(2);
        assigner.assign(&mut state, 0, 1);
        assigner.assign(&mut state, 0, 2);
        assigner.assign(&mut state, 3, 0);
        assert_eq!(state.degree_of(0), Some(3));
        assert_eq!(state.degree_of(2), Some(1));
        assert_eq!(state.degree_of(9), None);
        assert_eq!(state.vertex_count(), 4);
    }

    #[test]
    fn test_load_conservation() {
        let assigner = HdrfAssigner::new(1.0, 1.0);
        let mut state = assigner.init_state(3);
        for n in 0..300u64 {
            assigner.assign(&mut state, n % 17, (n * 7 + 3) % 23);
            assert_eq!(state.loads().iter().sum::<u64>(), n + 1);
        }
    }

    #[test]
    fn test_balance_term_spreads_disjoint_edges() {
        let assigner = HdrfAssigner::new(1.0, 1.0);
        let mut state = assigner.init_state(3);
        let chosen: Vec<PartitionId> = (0..6u64)
            .map(|n| assigner.assign(&mut state, 2 * n, 2 * n + 1))
            .collect();
        assert_eq!(chosen, vec![0, 1, 2, 0, 1, 2]);
    }

    #[test]
    fn test_zero_lambda_ignores_load() {
        let assigner = HdrfAssigner::new(0.0, 1.0);
        let mut state = assigner.init_state(3);

        // vertex 1 gets replicated into partition 0 only; with no balance
        // pressure every later edge touching it follows it there
        for n in 0..10u64 {
            assert_eq!(assigner.assign(&mut state, 100 + n, 1), 0);
        }
        assert_eq!(state.loads(), &[10, 0, 0]);

        let (i, j) = state.observe(200, 1);
        let scores = hdrf_scores(&state, i, j, 0.0, 1.0);
        assert_eq!(scores[1], 0.0);
        assert_eq!(scores[2], 0.0);
        assert!(scores[0] > 0.0);
    }

    #[test]
    fn test_low_degree_endpoint_preferred() {
        // hub 0 is replicated in partition 0, low-degree vertex 50 in partition 1
        let assigner = HdrfAssigner::new(0.0, 1.0);
        let mut state = HdrfState::new(2);
        for n in 1..=8u64 {
            let (i, j) = state.observe(0, n);
            state.commit(i, j, 0);
        }
        let (i, j) = state.observe(50, 51);
        state.commit(i, j, 1);

        // edge (0, 50): replicating the hub is cheaper than splitting 50
        assert_eq!(assigner.assign(&mut state, 0, 50), 1);
    }
}
