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

use std::cmp::Reverse;

use priority_queue::PriorityQueue;

use super::dense::DenseFlowNetwork;

/// Sentinel for vertices the current search has not reached. Kept well
/// below `i64::MAX` so relaxation arithmetic cannot wrap.
const UNREACHED: i64 = i64::MAX / 2;

/// Find a cheapest augmenting path from `source` to `sink` in the current
/// residual graph, and fold the computed distances into the vertex
/// potentials (Johnson's reweighting).
///
/// The search is a binary-heap Dijkstra over *reduced* costs
/// `cost + pi[u] - pi[v]`. For every neighbor `v` of a settled vertex `u`
/// two residual candidates are relaxed: the reverse cancel edge (spare
/// flow on `v -> u`, traversed at `-cost[[v, u]]`) and the forward edge
/// (spare capacity on `u -> v`, traversed at `+cost[[u, v]]`). The
/// potential invariant keeps both candidates non-negative after
/// reweighting, which is what makes Dijkstra valid here at all. Ties
/// between the two candidates are broken arbitrarily; they do not affect
/// optimality. O(E log V) per call.
///
/// On success the path is returned as source-to-sink `(u, v)` edge pairs.
/// `None` means the sink is unreachable, which terminates the augmentation
/// loop.
pub(crate) fn shortest_augmenting_path(
    net: &mut DenseFlowNetwork,
    n: usize,
    source: usize,
    sink: usize,
) -> Option<Vec<(usize, usize)>> {
    let mut dist = vec![UNREACHED; n];
    let mut parent: Vec<Option<usize>> = vec![None; n];
    // The queue doubles as the membership set: push inserts or
    // decreases the key of a pending vertex.
    let mut queue: PriorityQueue<usize, Reverse<i64>> = PriorityQueue::with_capacity(n);

    dist[source] = 0;
    queue.push(source, Reverse(0));

    while let Some((u, Reverse(d))) = queue.pop() {
        for &v in &net.adj[u] {
            let through = d + net.pi[u] - net.pi[v];

            // Undo flow already pushed along v -> u.
            if net.fnet[[v, u]] > 0 && through - net.cost[[v, u]] < dist[v] {
                dist[v] = through - net.cost[[v, u]];
                parent[v] = Some(u);
                queue.push(v, Reverse(dist[v]));
            }
            // Use spare capacity on u -> v.
            if net.fnet[[u, v]] < net.cap[[u, v]] && through + net.cost[[u, v]] < dist[v] {
                dist[v] = through + net.cost[[u, v]];
                parent[v] = Some(u);
                queue.push(v, Reverse(dist[v]));
            }
        }
    }

    // Reweighting step: shifting every reached potential by its distance
    // keeps all residual reduced costs non-negative for the next round.
    for (potential, d) in net.pi.iter_mut().zip(dist.iter()).take(n) {
        if *d < UNREACHED {
            *potential += d;
        }
    }

    parent[sink]?;

    let mut path = Vec::new();
    let mut v = sink;
    while v != source {
        let u = parent[v]?;
        path.push((u, v));
        v = u;
    }
    path.reverse();
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::shortest_augmenting_path;
    use crate::flow::DenseFlowNetwork;

    fn prepared(bound: usize, edges: &[(usize, usize, i64, i64)]) -> DenseFlowNetwork {
        let mut net = DenseFlowNetwork::with_bound(bound);
        for &(u, v, capacity, cost) in edges {
            net.set_edge(u, v, capacity, cost).unwrap();
        }
        net.build_adjacency(bound);
        net.reset_residual();
        net
    }

    #[test]
    fn test_picks_the_cheaper_of_two_paths() {
        let mut net = prepared(
            4,
            &[(0, 1, 1, 2), (1, 3, 1, 0), (0, 2, 1, 1), (2, 3, 1, 0)],
        );

        let path = shortest_augmenting_path(&mut net, 4, 0, 3).unwrap();
        assert_eq!(path, vec![(0, 2), (2, 3)]);
    }

    #[test]
    fn test_unreachable_sink_is_none() {
        let mut net = prepared(3, &[(0, 1, 5, 1)]);

        assert!(shortest_augmenting_path(&mut net, 3, 0, 2).is_none());
    }

    #[test]
    fn test_potentials_absorb_distances() {
        let mut net = prepared(
            4,
            &[(0, 1, 1, 2), (1, 3, 1, 0), (0, 2, 1, 1), (2, 3, 1, 0)],
        );

        shortest_augmenting_path(&mut net, 4, 0, 3).unwrap();
        // First round starts from all-zero potentials, so the potentials
        // afterwards are exactly the shortest distances.
        assert_eq!(net.pi, vec![0, 2, 1, 1]);
    }

    #[test]
    fn test_saturated_forward_edge_is_not_traversed() {
        let mut net = prepared(3, &[(0, 1, 1, 1), (1, 2, 1, 1)]);
        net.fnet[[0, 1]] = 1;

        assert!(shortest_augmenting_path(&mut net, 3, 0, 2).is_none());
    }

    #[test]
    fn test_cancel_edge_is_traversed_against_the_arrow() {
        // Only 1 -> 0 has capacity, but it already carries flow, so the
        // residual graph contains the cancel edge 0 -> 1.
        let mut net = prepared(3, &[(1, 0, 1, 4), (1, 2, 1, 0)]);
        net.fnet[[1, 0]] = 1;

        let path = shortest_augmenting_path(&mut net, 3, 0, 2).unwrap();
        assert_eq!(path, vec![(0, 1), (1, 2)]);
    }

    #[test]
    fn test_unreached_vertices_keep_their_potential() {
        let mut net = prepared(3, &[(0, 1, 1, 3)]);
        net.pi[2] = 7;

        assert!(shortest_augmenting_path(&mut net, 3, 0, 2).is_none());
        assert_eq!(net.pi, vec![0, 3, 7]);
    }
}
