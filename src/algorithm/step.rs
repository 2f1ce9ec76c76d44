use log::debug;

use crate::algorithm::token::{CostTable, VisitedSet};
use crate::graph::registry::{Edge, NodeId};

/// Outcome of one token-processing step at a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextHop {
    /// The token must be forwarded to this node next.
    Forward(NodeId),
    /// No unvisited candidate remains: the run is over and the current
    /// node's cost table is the final result.
    Finished,
}

/// One round of Dijkstra at the node currently holding the token.
///
/// Finalizes `self_id`, relaxes each of its outgoing edges against the
/// shared tables, and greedily selects the cheapest unvisited node as the
/// next token holder. Because every node is finalized at most once and
/// relaxation only considers edges out of the just-finalized node, this
/// reproduces the classic Dijkstra invariant for non-negative costs.
///
/// Ties between equal-cost candidates are broken by the lexicographically
/// smallest `NodeId`, so runs over the same graph are reproducible.
pub fn relax_and_select(
    self_id: &NodeId,
    edges: &[Edge],
    costs: &mut CostTable,
    visited: &mut VisitedSet,
) -> NextHop {
    visited.insert(self_id.clone(), true);
    let my_cost = costs.get(self_id).copied().unwrap_or(0);

    for edge in edges {
        let candidate = my_cost.saturating_add(edge.cost);
        match visited.get(&edge.remote).copied() {
            None => {
                // Newly discovered.
                visited.insert(edge.remote.clone(), false);
                costs.insert(edge.remote.clone(), candidate);
            }
            Some(true) => continue,
            Some(false) => {
                let known = costs.entry(edge.remote.clone()).or_insert(candidate);
                if candidate < *known {
                    *known = candidate;
                }
            }
        }
    }

    let best = costs
        .iter()
        .filter(|(id, _)| !visited.get(*id).copied().unwrap_or(false))
        .min_by(|a, b| (a.1, a.0).cmp(&(b.1, b.0)));

    match best {
        Some((id, cost)) => {
            debug!("{}: best next node {} at cost {}", self_id, id, cost);
            NextHop::Forward(id.clone())
        }
        None => NextHop::Finished,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(addr: &str) -> NodeId {
        NodeId::from(addr)
    }

    fn edge(addr: &str, cost: u64) -> Edge {
        Edge::new(id(addr), cost)
    }

    #[test]
    fn marks_self_visited_and_discovers_neighbors() {
        let a = id("a:1");
        let mut costs = CostTable::from([(a.clone(), 0)]);
        let mut visited = VisitedSet::new();
        let edges = [edge("b:2", 5), edge("c:3", 2)];

        let next = relax_and_select(&a, &edges, &mut costs, &mut visited);

        assert_eq!(visited[&a], true);
        assert_eq!(visited[&id("b:2")], false);
        assert_eq!(visited[&id("c:3")], false);
        assert_eq!(costs[&id("b:2")], 5);
        assert_eq!(costs[&id("c:3")], 2);
        assert_eq!(next, NextHop::Forward(id("c:3")));
    }

    #[test]
    fn improves_previously_discovered_cost() {
        let c = id("c:3");
        let mut costs = CostTable::from([(id("a:1"), 0), (id("b:2"), 5), (c.clone(), 2)]);
        let mut visited =
            VisitedSet::from([(id("a:1"), true), (id("b:2"), false), (c.clone(), false)]);
        let edges = [edge("b:2", 1)];

        let next = relax_and_select(&c, &edges, &mut costs, &mut visited);

        // 2 + 1 beats the previously known 5.
        assert_eq!(costs[&id("b:2")], 3);
        assert_eq!(next, NextHop::Forward(id("b:2")));
    }

    #[test]
    fn never_touches_finalized_costs() {
        let b = id("b:2");
        let mut costs = CostTable::from([(id("a:1"), 0), (b.clone(), 3)]);
        let mut visited = VisitedSet::from([(id("a:1"), true), (b.clone(), false)]);
        let edges = [edge("a:1", 1)];

        let next = relax_and_select(&b, &edges, &mut costs, &mut visited);

        // A cheaper path "into" the finalized source must not rewrite it.
        assert_eq!(costs[&id("a:1")], 0);
        assert_eq!(next, NextHop::Finished);
    }

    #[test]
    fn parallel_edges_prefer_the_cheaper_one() {
        let a = id("a:1");
        let mut costs = CostTable::from([(a.clone(), 0)]);
        let mut visited = VisitedSet::new();
        let edges = [edge("b:2", 10), edge("b:2", 4)];

        relax_and_select(&a, &edges, &mut costs, &mut visited);

        assert_eq!(costs[&id("b:2")], 4);
    }

    #[test]
    fn equal_cost_tie_breaks_to_smallest_id() {
        let a = id("a:1");
        let mut costs = CostTable::from([(a.clone(), 0)]);
        let mut visited = VisitedSet::new();
        let edges = [edge("z:9", 3), edge("b:2", 3)];

        let next = relax_and_select(&a, &edges, &mut costs, &mut visited);

        assert_eq!(next, NextHop::Forward(id("b:2")));
    }

    #[test]
    fn no_candidates_means_finished() {
        let a = id("a:1");
        let mut costs = CostTable::from([(a.clone(), 0)]);
        let mut visited = VisitedSet::new();

        let next = relax_and_select(&a, &[], &mut costs, &mut visited);

        assert_eq!(next, NextHop::Finished);
        assert_eq!(visited[&a], true);
    }
}
