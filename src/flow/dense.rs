// Licensed under the Apache License, Version 2.0 (the "License"); you may
// not use this file except in compliance with the License. You may obtain
// a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied. See the
// License for the specific language governing permissions and limitations
// under the License.

use ndarray::Array2;
use thiserror::Error;

/// Errors reported at the fallible boundary of [`DenseFlowNetwork`].
///
/// All of these are contract violations on the caller's side; none of them
/// leaves the network in a corrupted state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FlowError {
    /// A vertex index was not below the relevant bound.
    #[error("vertex index {index} out of bound {bound}")]
    NodeOutOfBound { index: usize, bound: usize },
    /// The vertex count passed to `run` exceeds the bound fixed at
    /// construction.
    #[error("vertex count {count} exceeds the allocated bound {bound}")]
    TooManyNodes { count: usize, bound: usize },
    /// Edge capacities must be non-negative.
    #[error("edge capacity must be non-negative, got {0}")]
    NegativeCapacity(i64),
    /// Per-unit edge costs must be non-negative; Dijkstra over reduced
    /// costs relies on this.
    #[error("edge cost must be non-negative, got {0}")]
    NegativeCost(i64),
}

/// A dense flow network over vertices `0..bound`.
///
/// Capacities, per-unit costs and the residual flow are held in owned
/// `bound x bound` matrices; an adjacency list is derived from the capacity
/// matrix once per solve. Each ordered vertex pair carries at most one
/// capacity/cost value: inserting the same pair twice overwrites, it does
/// not accumulate parallel capacity.
///
/// The residual flow is stored per direction. `flow(u, v)` and
/// `flow(v, u)` can both be positive after a solve; the net flow on the
/// pair is their difference (see [`DenseFlowNetwork::net_flow`]). This is
/// deliberate: reverse residual edges are modeled implicitly by the
/// opposite matrix cell instead of separate edge bookkeeping.
pub struct DenseFlowNetwork {
    bound: usize,
    /// `cap[[u, v]]` is the capacity of the edge u -> v, 0 for no edge.
    pub(crate) cap: Array2<i64>,
    /// `cost[[u, v]]` is the cost per unit of flow on u -> v; ignored
    /// when `cap[[u, v]]` is 0.
    pub(crate) cost: Array2<i64>,
    /// Flow currently pushed along u -> v, within `0..=cap[[u, v]]`.
    pub(crate) fnet: Array2<i64>,
    /// `v` is in `adj[u]` iff `cap[[u, v]] > 0 || cap[[v, u]] > 0`.
    pub(crate) adj: Vec<Vec<usize>>,
    /// Johnson vertex potentials; live across augmenting rounds of one
    /// solve, zeroed at the start of the next.
    pub(crate) pi: Vec<i64>,
}

impl DenseFlowNetwork {
    /// Allocate a network for up to `bound` vertices.
    ///
    /// All internal storage is sized here; there is no separate allocation
    /// step and no reallocation later. Matrices start zeroed, so a query
    /// before any solve reports no flow.
    pub fn with_bound(bound: usize) -> DenseFlowNetwork {
        DenseFlowNetwork {
            bound,
            cap: Array2::zeros((bound, bound)),
            cost: Array2::zeros((bound, bound)),
            fnet: Array2::zeros((bound, bound)),
            adj: vec![Vec::new(); bound],
            pi: vec![0; bound],
        }
    }

    /// The vertex bound fixed at construction.
    pub fn bound(&self) -> usize {
        self.bound
    }

    /// Set the capacity and per-unit cost of the directed edge `u -> v`.
    ///
    /// Overwrites any previous value for the ordered pair; a capacity of 0
    /// removes the edge. Returns an error for an out-of-bound index or a
    /// negative capacity/cost, leaving the network unchanged.
    pub fn set_edge(
        &mut self,
        u: usize,
        v: usize,
        capacity: i64,
        cost: i64,
    ) -> Result<(), FlowError> {
        self.check_node(u)?;
        self.check_node(v)?;
        if capacity < 0 {
            return Err(FlowError::NegativeCapacity(capacity));
        }
        if cost < 0 {
            return Err(FlowError::NegativeCost(cost));
        }
        self.set_edge_unchecked(u, v, capacity, cost);
        Ok(())
    }

    /// `set_edge` without the precondition checks, for callers that have
    /// already validated indices and values.
    pub(crate) fn set_edge_unchecked(&mut self, u: usize, v: usize, capacity: i64, cost: i64) {
        self.cap[[u, v]] = capacity;
        self.cost[[u, v]] = cost;
    }

    /// Flow currently pushed along `u -> v`.
    ///
    /// Both `flow(u, v)` and `flow(v, u)` can be positive; take
    /// [`net_flow`](DenseFlowNetwork::net_flow) for the net amount.
    /// Indices must be below [`bound`](DenseFlowNetwork::bound).
    pub fn flow(&self, u: usize, v: usize) -> i64 {
        self.fnet[[u, v]]
    }

    /// Net flow on the vertex pair: `flow(u, v) - flow(v, u)`.
    pub fn net_flow(&self, u: usize, v: usize) -> i64 {
        self.fnet[[u, v]] - self.fnet[[v, u]]
    }

    /// Per-unit cost of the edge `u -> v`; meaningless when the edge has
    /// no capacity. Indices must be below [`bound`](DenseFlowNetwork::bound).
    pub fn unit_cost(&self, u: usize, v: usize) -> i64 {
        self.cost[[u, v]]
    }

    fn check_node(&self, index: usize) -> Result<(), FlowError> {
        if index >= self.bound {
            return Err(FlowError::NodeOutOfBound {
                index,
                bound: self.bound,
            });
        }
        Ok(())
    }

    /// Derive the adjacency list for vertices `0..n` with an O(n^2) scan.
    ///
    /// A vertex `v` is a neighbor of `u` if either direction carries
    /// capacity, so the list is symmetric and a single pass over `adj[u]`
    /// can relax both the forward edge and the reverse cancel edge.
    pub(crate) fn build_adjacency(&mut self, n: usize) {
        for neighbors in self.adj.iter_mut() {
            neighbors.clear();
        }
        for u in 0..n {
            for v in 0..n {
                if self.cap[[u, v]] > 0 || self.cap[[v, u]] > 0 {
                    self.adj[u].push(v);
                }
            }
        }
    }

    /// Zero the residual flow matrix and the vertex potentials.
    pub(crate) fn reset_residual(&mut self) {
        self.fnet.fill(0);
        self.pi.fill(0);
    }
}

#[cfg(test)]
mod tests {
    use super::{DenseFlowNetwork, FlowError};

    #[test]
    fn test_set_edge_last_write_wins() {
        let mut net = DenseFlowNetwork::with_bound(3);
        net.set_edge(0, 1, 5, 2).unwrap();
        net.set_edge(0, 1, 3, 7).unwrap();

        assert_eq!(net.cap[[0, 1]], 3);
        assert_eq!(net.unit_cost(0, 1), 7);
    }

    #[test]
    fn test_set_edge_out_of_bound() {
        let mut net = DenseFlowNetwork::with_bound(3);

        assert_eq!(
            net.set_edge(3, 1, 1, 0),
            Err(FlowError::NodeOutOfBound { index: 3, bound: 3 })
        );
        assert_eq!(
            net.set_edge(0, 7, 1, 0),
            Err(FlowError::NodeOutOfBound { index: 7, bound: 3 })
        );
        // The failed insertions left no trace.
        assert_eq!(net.cap[[0, 1]], 0);
    }

    #[test]
    fn test_set_edge_rejects_negative_values() {
        let mut net = DenseFlowNetwork::with_bound(2);

        assert_eq!(
            net.set_edge(0, 1, -4, 0),
            Err(FlowError::NegativeCapacity(-4))
        );
        assert_eq!(net.set_edge(0, 1, 4, -1), Err(FlowError::NegativeCost(-1)));
        assert_eq!(net.cap[[0, 1]], 0);
        assert_eq!(net.cost[[0, 1]], 0);
    }

    #[test]
    fn test_adjacency_is_symmetric() {
        let mut net = DenseFlowNetwork::with_bound(4);
        net.set_edge(0, 1, 1, 0).unwrap();
        net.set_edge(2, 1, 5, 3).unwrap();
        net.set_edge(3, 0, 2, 1).unwrap();
        net.build_adjacency(4);

        for u in 0..4 {
            for &v in &net.adj[u] {
                assert!(net.adj[v].contains(&u), "{v} -> {u} missing");
            }
        }
        // Reverse-only neighbors are present as well.
        assert!(net.adj[1].contains(&2));
        assert!(net.adj[0].contains(&3));
        assert!(!net.adj[0].contains(&2));
    }

    #[test]
    fn test_reset_residual_clears_state() {
        let mut net = DenseFlowNetwork::with_bound(3);
        net.fnet[[0, 1]] = 3;
        net.pi[2] = 5;
        net.reset_residual();

        assert_eq!(net.fnet[[0, 1]], 0);
        assert_eq!(net.pi, vec![0, 0, 0]);
    }

    #[test]
    fn test_queries_before_solve_report_zero_flow() {
        let mut net = DenseFlowNetwork::with_bound(2);
        net.set_edge(0, 1, 5, 1).unwrap();

        assert_eq!(net.flow(0, 1), 0);
        assert_eq!(net.net_flow(0, 1), 0);
    }
}
