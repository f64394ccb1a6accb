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

//! Minimum-cost maximum-flow computation.
//!
//! The module is built from three pieces: [`DenseFlowNetwork`] owns the
//! capacity, cost and residual-flow matrices; a private Dijkstra variant
//! over reduced costs finds cheapest augmenting paths; and the augmentation
//! loop in [`DenseFlowNetwork::run`] drives the two until the sink becomes
//! unreachable. [`min_cost_max_flow`] wraps all of that behind a
//! petgraph-generic interface.

mod dense;
mod dijkstra;
mod min_cost_flow;

pub use dense::{DenseFlowNetwork, FlowError};
pub use min_cost_flow::{min_cost_max_flow, MinCostFlow, MCMFReturn};
