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

//! # mcmf-core
//!
//! mcmf-core computes an exact maximum flow of minimum total cost between a
//! source and a sink in a directed graph with finite integer capacities and
//! non-negative integer per-unit costs. It is aimed at small-to-medium
//! dense-ish graphs (tens to low thousands of vertices) where an exact
//! flow/cost pair is needed rather than an approximation.
//!
//! The solver is the successive shortest augmenting path algorithm: each
//! round finds a cheapest residual source-to-sink path with a binary-heap
//! Dijkstra over reduced costs (Johnson's vertex potentials keep the search
//! weights non-negative despite cost-cancelling reverse residual edges) and
//! pushes the path's bottleneck capacity along it.
//!
//! Two entry points are provided in the [`flow`] module:
//!
//! * [`flow::DenseFlowNetwork`] — a dense matrix-backed network built edge by
//!   edge against a fixed vertex bound, solved in place with
//!   [`flow::DenseFlowNetwork::run`].
//! * [`flow::min_cost_max_flow`] — a generic function over
//!   [`petgraph`](https://crates.io/crates/petgraph) graph types with
//!   fallible capacity/cost callbacks.
//!
//! ## Example
//!
//! ```rust
//! use std::convert::Infallible;
//! use mcmf_core::petgraph;
//! use mcmf_core::flow::min_cost_max_flow;
//!
//! // Two vertex-disjoint unit paths from s to t; edge weights are
//! // [capacity, cost].
//! let mut graph = petgraph::graph::DiGraph::<(), [i64; 2]>::new();
//! let s = graph.add_node(());
//! let a = graph.add_node(());
//! let b = graph.add_node(());
//! let t = graph.add_node(());
//! graph.add_edge(s, a, [1, 2]);
//! graph.add_edge(a, t, [1, 0]);
//! graph.add_edge(s, b, [1, 1]);
//! graph.add_edge(b, t, [1, 0]);
//!
//! let result = min_cost_max_flow(
//!     &graph,
//!     s,
//!     t,
//!     |e: &[i64; 2]| Ok::<i64, Infallible>(e[0]),
//!     |e: &[i64; 2]| Ok(e[1]),
//! )
//! .unwrap()
//! .unwrap();
//!
//! assert_eq!(result.flow, 2);
//! assert_eq!(result.cost, 3);
//! ```

pub use petgraph;

pub mod flow;
