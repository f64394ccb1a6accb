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

use std::hash::Hash;

use hashbrown::HashMap;
use log::debug;
use petgraph::visit::{
    EdgeCount, EdgeRef, GraphBase, IntoEdgeReferences, IntoNodeIdentifiers, NodeCount,
};

use super::dense::{DenseFlowNetwork, FlowError};
use super::dijkstra::shortest_augmenting_path;

/// The flow/cost pair computed by [`DenseFlowNetwork::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinCostFlow {
    /// Total flow pushed from source to sink.
    pub flow: i64,
    /// Total cost of that flow, summed per unit over every edge it uses.
    pub cost: i64,
}

/// The return type for [`min_cost_max_flow()`].
///
/// `flow_edges` is a two layer `HashMap` mapping each edge carrying
/// positive net flow to that amount. For example, `flow_edges[u][v]` is
/// the net flow on the edge `(u, v)`.
pub struct MCMFReturn<G: GraphBase> {
    /// Total flow pushed from source to sink.
    pub flow: i64,
    /// Total cost of that flow.
    pub cost: i64,
    /// Strictly positive net flows, keyed by endpoint pairs.
    pub flow_edges: HashMap<G::NodeId, HashMap<G::NodeId, i64>>,
}

impl DenseFlowNetwork {
    /// Compute a maximum flow of minimum total cost from `source` to
    /// `sink` over the vertices `0..n`.
    ///
    /// This is the successive shortest augmenting path algorithm: every
    /// round finds *the* cheapest residual source-to-sink path (not just
    /// any path) and pushes its bottleneck capacity, so the final flow is
    /// cost-optimal for the max-flow value reached and every intermediate
    /// flow is cost-optimal for its own value. The loop ends when the sink
    /// becomes unreachable, which is the normal termination condition and
    /// can happen immediately (flow 0, cost 0).
    ///
    /// The solve rebuilds the adjacency list and zeroes the residual state,
    /// so edges may be changed freely between runs; the residual matrix
    /// read through [`flow`](DenseFlowNetwork::flow) holds the final
    /// answer until the next run. A run never suspends and cannot be
    /// cancelled; it is CPU-bound and bounded by the number of distinct
    /// augmenting-path costs.
    ///
    /// Errors if `n` exceeds the construction bound or `source`/`sink` are
    /// not below `n`. `source == sink` yields the zero result.
    pub fn run(&mut self, n: usize, source: usize, sink: usize) -> Result<MinCostFlow, FlowError> {
        if n > self.bound() {
            return Err(FlowError::TooManyNodes {
                count: n,
                bound: self.bound(),
            });
        }
        for index in [source, sink] {
            if index >= n {
                return Err(FlowError::NodeOutOfBound { index, bound: n });
            }
        }

        self.build_adjacency(n);
        self.reset_residual();

        let mut result = MinCostFlow { flow: 0, cost: 0 };
        if source == sink {
            return Ok(result);
        }

        let mut rounds = 0usize;
        while let Some(path) = shortest_augmenting_path(self, n, source, sink) {
            let (bottleneck, path_cost) = self.apply_augmentation(&path);
            result.flow += bottleneck;
            result.cost += path_cost;
            rounds += 1;
            debug!(
                "augmenting round {rounds}: pushed {bottleneck} along {} edges for cost {path_cost}",
                path.len()
            );
        }

        Ok(result)
    }

    /// Push the bottleneck capacity of `path` through the residual
    /// matrix and return `(bottleneck, cost delta)`.
    ///
    /// An edge `(u, v)` whose opposite cell carries flow is applied as a
    /// cancel: `fnet[[v, u]]` shrinks and the cost it paid is refunded.
    /// Otherwise the forward cell grows. The same rule selects each
    /// edge's available amount, so the two passes agree on direction.
    pub(crate) fn apply_augmentation(&mut self, path: &[(usize, usize)]) -> (i64, i64) {
        let mut bottleneck = i64::MAX;
        for &(u, v) in path {
            let available = if self.fnet[[v, u]] > 0 {
                self.fnet[[v, u]]
            } else {
                self.cap[[u, v]] - self.fnet[[u, v]]
            };
            bottleneck = bottleneck.min(available);
        }

        let mut path_cost = 0;
        for &(u, v) in path {
            if self.fnet[[v, u]] > 0 {
                self.fnet[[v, u]] -= bottleneck;
                path_cost -= bottleneck * self.cost[[v, u]];
            } else {
                self.fnet[[u, v]] += bottleneck;
                path_cost += bottleneck * self.cost[[u, v]];
            }
        }

        (bottleneck, path_cost)
    }
}

/// Find a maximum flow of minimum total cost between ``source`` and ``sink``
///
/// This is the successive shortest augmenting path algorithm of Edmonds and
/// Karp: augmenting paths are found with Dijkstra's algorithm over reduced
/// costs, made valid in the presence of cost-cancelling reverse residual
/// edges by Johnson's vertex potentials [^edmondskarp] [^johnson].
///
/// ``graph`` is treated as a digraph where edges have a capacity and a cost
/// per unit of flow, both non-negative integers. Self loops and edges
/// without capacity are ignored. Parallel edges are not supported: when two
/// edges share an ordered endpoint pair the one visited last wins. The
/// graph is not mutated; the dense residual state lives and dies inside the
/// call, sized to the graph's node count, so this entry point fits
/// small-to-medium dense-ish graphs.
///
/// Note this function uses signed integers for capacities and costs even
/// though both must be non-negative; this mirrors the arithmetic of the
/// solver, which traverses cancel edges at negated cost.
///
/// [^edmondskarp]: Edmonds, J., Karp, R.
///     Theoretical Improvements in Algorithmic Efficiency for Network
///     Flow Problems.
///     Journal of the ACM 19(2):248--264. 1972.
///
/// [^johnson]: Johnson, D.
///     Efficient Algorithms for Shortest Paths in Sparse Networks.
///     Journal of the ACM 24(1):1--13. 1977.
///
/// Arguments:
///
/// * `graph` - The input graph object to run the algorithm on
/// * `source` - The node the flow starts from
/// * `sink` - The node the flow drains into
/// * `capacity` - A function which will receive a borrowed ``EdgeWeight``
///     from ``graph`` and is expected to return the capacity, or how much
///     flow the edge can support.
/// * `cost` - A function which will receive a borrowed ``EdgeWeight`` from
///     ``graph`` and is expected to return the cost incurred by sending one
///     unit of flow on the edge.
///
/// Returns `Ok(None)` when no meaningful answer exists: the graph has no
/// nodes or no edges, an endpoint is not part of the graph, or a callback
/// reports a negative capacity or cost. Callback errors are propagated
/// unchanged.
///
/// # Example
/// ```rust
/// use std::convert::Infallible;
/// use mcmf_core::petgraph;
/// use mcmf_core::flow::min_cost_max_flow;
///
/// let mut graph = petgraph::graph::DiGraph::<(), [i64; 2]>::new();
/// let s = graph.add_node(());
/// let a = graph.add_node(());
/// let b = graph.add_node(());
/// let t = graph.add_node(());
/// // Edge weights are [capacity, cost].
/// graph.add_edge(s, a, [1, 2]);
/// graph.add_edge(a, t, [1, 0]);
/// graph.add_edge(s, b, [1, 1]);
/// graph.add_edge(b, t, [1, 0]);
///
/// let result = min_cost_max_flow(
///     &graph,
///     s,
///     t,
///     |e: &[i64; 2]| Ok::<i64, Infallible>(e[0]),
///     |e: &[i64; 2]| Ok(e[1]),
/// )
/// .unwrap()
/// .unwrap();
///
/// assert_eq!(result.flow, 2);
/// assert_eq!(result.cost, 3);
/// assert_eq!(result.flow_edges[&s][&b], 1);
/// ```
pub fn min_cost_max_flow<G, C, W, E>(
    graph: G,
    source: G::NodeId,
    sink: G::NodeId,
    mut capacity: C,
    mut cost: W,
) -> Result<Option<MCMFReturn<G>>, E>
where
    G: IntoNodeIdentifiers + IntoEdgeReferences + NodeCount + EdgeCount + GraphBase,
    G::NodeId: Eq + Hash,
    C: FnMut(&G::EdgeWeight) -> Result<i64, E>,
    W: FnMut(&G::EdgeWeight) -> Result<i64, E>,
{
    let num_nodes = graph.node_count();

    // There is no flow to find in an empty network.
    if num_nodes == 0 || graph.edge_count() == 0 {
        return Ok(None);
    }

    // Look-up tables between graph node ids and dense indices.
    let node_indices: Vec<G::NodeId> = graph.node_identifiers().collect();
    let node_map: HashMap<G::NodeId, usize> = node_indices
        .iter()
        .enumerate()
        .map(|(index, val)| (*val, index))
        .collect();

    let (source_index, sink_index) = match (node_map.get(&source), node_map.get(&sink)) {
        (Some(&source_index), Some(&sink_index)) => (source_index, sink_index),
        _ => return Ok(None),
    };

    let mut net = DenseFlowNetwork::with_bound(num_nodes);
    for edge in graph.edge_references() {
        let edge_capacity = capacity(edge.weight())?;
        let edge_cost = cost(edge.weight())?;

        if edge_capacity < 0 || edge_cost < 0 {
            return Ok(None);
        }

        let u = node_map[&edge.source()];
        let v = node_map[&edge.target()];
        if u != v && edge_capacity != 0 {
            net.set_edge_unchecked(u, v, edge_capacity, edge_cost);
        }
    }

    let result = match net.run(num_nodes, source_index, sink_index) {
        Ok(result) => result,
        // Unreachable: every index fed to run was derived from node_map.
        Err(_) => return Ok(None),
    };

    let mut flow_edges: HashMap<G::NodeId, HashMap<G::NodeId, i64>> =
        HashMap::with_capacity(num_nodes);
    for u in 0..num_nodes {
        for v in 0..num_nodes {
            let net_flow = net.net_flow(u, v);
            if net_flow > 0 {
                flow_edges
                    .entry(node_indices[u])
                    .or_default()
                    .insert(node_indices[v], net_flow);
            }
        }
    }

    Ok(Some(MCMFReturn {
        flow: result.flow,
        cost: result.cost,
        flow_edges,
    }))
}
