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

//! Sample usage of the dense min-cost max-flow solver.
//!
//! Builds a fixed assignment-style network: three unit supplies fan out
//! of vertex 16 into two feeder groups, the groups collect at vertices 2
//! and 12, and each collector has a single unit edge into the sink 17.
//! Only two units can therefore reach the sink, and the solver has to
//! pick the cheapest feeder of each group. Run with `RUST_LOG=debug` to
//! see the augmenting rounds.

use mcmf_core::flow::DenseFlowNetwork;

fn main() {
    env_logger::init();

    let num_vertices = 18;
    let edges = [
        // feeder group collected at vertex 2
        (0, 1, 1, 94),
        (1, 2, 1, 0),
        (0, 3, 1, 66),
        (3, 2, 1, 0),
        (0, 4, 1, 35),
        (4, 2, 1, 0),
        (0, 5, 1, 1),
        (5, 2, 1, 0),
        (0, 6, 1, 26),
        (6, 2, 1, 0),
        (7, 8, 1, 78),
        (8, 2, 1, 0),
        (7, 9, 1, 80),
        (9, 2, 1, 0),
        // feeder group collected at vertex 12
        (10, 11, 1, 87),
        (11, 12, 1, 0),
        (10, 13, 1, 41),
        (13, 12, 1, 0),
        (10, 14, 1, 68),
        (14, 12, 1, 0),
        (10, 15, 1, 59),
        (15, 12, 1, 0),
        // supplies out of the source
        (16, 0, 1, 0),
        (16, 7, 1, 0),
        (16, 10, 1, 0),
        // collector edges into the sink
        (2, 17, 1, 0),
        (12, 17, 1, 0),
    ];

    let mut net = DenseFlowNetwork::with_bound(num_vertices);
    for (u, v, capacity, cost) in edges {
        net.set_edge(u, v, capacity, cost)
            .expect("demo edges are within the vertex bound");
    }

    let result = net
        .run(num_vertices, 16, 17)
        .expect("demo endpoints are within the vertex bound");

    println!("flow: {}", result.flow);
    println!("cost: {}", result.cost);
    for u in 0..num_vertices {
        for v in 0..num_vertices {
            if net.flow(u, v) != 0 {
                println!(
                    "{u} -> {v}: {} cost: {}",
                    net.flow(u, v),
                    net.unit_cost(u, v)
                );
            }
        }
    }
}
