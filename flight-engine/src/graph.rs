//! Undirected airport connectivity graph.
//!
//! Every flight contributes an edge between its origin and destination,
//! ignoring direction and time. The graph keeps connectivity only: which
//! flights produced an edge is not recorded. Outbound routes are kept
//! alongside for the one query that cares about direction,
//! [`not_directly_served_from`](ReachabilityGraph::not_directly_served_from).
//!
//! Two hop queries exist and they intentionally disagree:
//! [`neighbors_via_union_of_neighbors`](ReachabilityGraph::neighbors_via_union_of_neighbors)
//! is "anything one more flight away from a neighbour", which may include
//! direct neighbours, while
//! [`vertices_at_exact_distance`](ReachabilityGraph::vertices_at_exact_distance)
//! uses true shortest-path hop counts.

use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};

use tracing::{debug, trace};

use crate::domain::{AirportCode, FlightRecord};

/// Airport adjacency built once from a set of flights.
#[derive(Debug, Clone, Default)]
pub struct ReachabilityGraph {
    adjacency: BTreeMap<AirportCode, BTreeSet<AirportCode>>,
    /// origin -> destinations, as flown
    outbound: BTreeMap<AirportCode, BTreeSet<AirportCode>>,
}

impl ReachabilityGraph {
    /// Build the graph from flight records.
    ///
    /// Self-loops are kept. Parallel flights collapse to one edge.
    pub fn build(records: &[FlightRecord]) -> Self {
        let mut graph = Self::default();
        for record in records {
            graph.add_edge(record.origin(), record.destination());
        }

        debug!(
            airports = graph.vertex_count(),
            edges = graph.edge_count(),
            "Built reachability graph"
        );

        graph
    }

    /// Build the graph from directed (origin, destination) pairs.
    pub fn from_edges(edges: impl IntoIterator<Item = (AirportCode, AirportCode)>) -> Self {
        let mut graph = Self::default();
        for (a, b) in edges {
            graph.add_edge(a, b);
        }
        graph
    }

    fn add_edge(&mut self, origin: AirportCode, destination: AirportCode) {
        self.adjacency.entry(origin).or_default().insert(destination);
        self.adjacency.entry(destination).or_default().insert(origin);
        self.outbound.entry(origin).or_default().insert(destination);
    }

    /// Direct neighbours of `start`, not counting `start` itself when it
    /// has a self-loop. Unknown airports have none.
    ///
    /// This is exactly `vertices_at_exact_distance(start, 1)`.
    pub fn neighbors(&self, start: &AirportCode) -> BTreeSet<AirportCode> {
        let mut direct = self.adjacency.get(start).cloned().unwrap_or_default();
        direct.remove(start);
        direct
    }

    /// Union of the neighbour sets of every direct neighbour of `start`,
    /// without `start` itself.
    ///
    /// This is not "exactly two hops away": a direct neighbour that is also
    /// adjacent to another neighbour appears in the result.
    pub fn neighbors_via_union_of_neighbors(&self, start: &AirportCode) -> BTreeSet<AirportCode> {
        let Some(first) = self.adjacency.get(start) else {
            return BTreeSet::new();
        };

        let mut result: BTreeSet<AirportCode> = first
            .iter()
            .filter_map(|mid| self.adjacency.get(mid))
            .flatten()
            .copied()
            .collect();
        result.remove(start);

        trace!(start = %start, found = result.len(), "Union of neighbours");
        result
    }

    /// Shortest hop distance from `start` to every reachable airport,
    /// `start` included at distance 0.
    pub fn hop_distances(&self, start: &AirportCode) -> HashMap<AirportCode, usize> {
        self.bounded_hop_distances(start, usize::MAX)
    }

    /// BFS that stops expanding past `max_depth`.
    fn bounded_hop_distances(
        &self,
        start: &AirportCode,
        max_depth: usize,
    ) -> HashMap<AirportCode, usize> {
        let mut dist = HashMap::new();
        if !self.adjacency.contains_key(start) {
            return dist;
        }

        let mut queue = VecDeque::from([*start]);
        dist.insert(*start, 0);

        while let Some(current) = queue.pop_front() {
            let d = dist[&current];
            if d >= max_depth {
                continue;
            }
            for next in self.adjacency.get(&current).into_iter().flatten() {
                if !dist.contains_key(next) {
                    dist.insert(*next, d + 1);
                    queue.push_back(*next);
                }
            }
        }

        dist
    }

    /// Airports whose shortest hop distance from `start` is exactly `k`.
    ///
    /// `k = 0` gives `{start}` for a known airport. Unreachable airports never
    /// appear, and an unknown `start` gives the empty set.
    pub fn vertices_at_exact_distance(&self, start: &AirportCode, k: usize) -> BTreeSet<AirportCode> {
        let result: BTreeSet<AirportCode> = self
            .bounded_hop_distances(start, k)
            .into_iter()
            .filter(|&(_, d)| d == k)
            .map(|(airport, _)| airport)
            .collect();

        trace!(start = %start, k, found = result.len(), "Exact-distance query");
        result
    }

    /// Every airport in the graph other than `start` that no flight from
    /// `start` lands at.
    ///
    /// Direction matters here: an airport that only flies *into* `start` is
    /// still not served from it.
    pub fn not_directly_served_from(&self, start: &AirportCode) -> BTreeSet<AirportCode> {
        let served = self.outbound.get(start);
        self.adjacency
            .keys()
            .filter(|&a| a != start && !served.is_some_and(|d| d.contains(a)))
            .copied()
            .collect()
    }

    pub fn contains(&self, airport: &AirportCode) -> bool {
        self.adjacency.contains_key(airport)
    }

    /// All airports, in code order.
    pub fn airports(&self) -> impl Iterator<Item = &AirportCode> {
        self.adjacency.keys()
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of distinct undirected edges (a self-loop counts once).
    pub fn edge_count(&self) -> usize {
        self.adjacency
            .iter()
            .map(|(a, ns)| ns.iter().filter(|b| *b >= a).count())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CarrierCode;
    use chrono::NaiveDate;

    fn code(s: &str) -> AirportCode {
        AirportCode::parse(s).unwrap()
    }

    fn set(codes: &[&str]) -> BTreeSet<AirportCode> {
        codes.iter().map(|s| code(s)).collect()
    }

    fn graph(edges: &[(&str, &str)]) -> ReachabilityGraph {
        ReachabilityGraph::from_edges(edges.iter().map(|(a, b)| (code(a), code(b))))
    }

    /// A - B - C - D
    fn chain() -> ReachabilityGraph {
        graph(&[("AAA", "BBB"), ("BBB", "CCC"), ("CCC", "DDD")])
    }

    #[test]
    fn build_from_records_is_undirected() {
        let date = NaiveDate::from_ymd_opt(2013, 1, 1).unwrap();
        let carrier = CarrierCode::parse("DL").unwrap();
        let records = vec![
            FlightRecord::new(date, carrier, 1, code("JFK"), code("ATL"), 760),
            FlightRecord::new(date, carrier, 2, code("JFK"), code("ATL"), 760),
            FlightRecord::new(date, carrier, 3, code("ATL"), code("MCO"), 404),
        ];
        let g = ReachabilityGraph::build(&records);

        assert_eq!(g.vertex_count(), 3);
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.neighbors(&code("ATL")), set(&["JFK", "MCO"]));
        assert_eq!(g.neighbors(&code("MCO")), set(&["ATL"]));
    }

    #[test]
    fn chain_hop_queries() {
        let g = chain();
        assert_eq!(g.neighbors_via_union_of_neighbors(&code("AAA")), set(&["CCC"]));
        assert_eq!(g.vertices_at_exact_distance(&code("AAA"), 2), set(&["CCC"]));
        assert_eq!(g.vertices_at_exact_distance(&code("AAA"), 3), set(&["DDD"]));
        assert!(g.vertices_at_exact_distance(&code("AAA"), 4).is_empty());
    }

    #[test]
    fn distance_one_is_direct_neighbours() {
        let g = graph(&[
            ("EWR", "ORD"),
            ("EWR", "ATL"),
            ("ORD", "ATL"),
            ("ATL", "MIA"),
        ]);
        for airport in ["EWR", "ORD", "ATL", "MIA"] {
            let a = code(airport);
            assert_eq!(g.vertices_at_exact_distance(&a, 1), g.neighbors(&a));
        }
    }

    #[test]
    fn union_of_neighbours_can_include_direct_neighbours() {
        // Triangle: every neighbour of EWR is also a neighbour's neighbour.
        let g = graph(&[("EWR", "ORD"), ("EWR", "ATL"), ("ORD", "ATL")]);
        assert_eq!(
            g.neighbors_via_union_of_neighbors(&code("EWR")),
            set(&["ORD", "ATL"])
        );
        assert!(g.vertices_at_exact_distance(&code("EWR"), 2).is_empty());
    }

    #[test]
    fn distance_zero_is_start() {
        let g = chain();
        assert_eq!(g.vertices_at_exact_distance(&code("BBB"), 0), set(&["BBB"]));
    }

    #[test]
    fn unknown_start_gives_empty_sets() {
        let g = chain();
        let x = code("XXX");
        assert!(g.neighbors(&x).is_empty());
        assert!(g.neighbors_via_union_of_neighbors(&x).is_empty());
        assert!(g.vertices_at_exact_distance(&x, 0).is_empty());
        assert!(g.vertices_at_exact_distance(&x, 2).is_empty());
        assert!(g.hop_distances(&x).is_empty());
    }

    #[test]
    fn disconnected_component_unreachable() {
        let g = graph(&[("AAA", "BBB"), ("CCC", "DDD")]);
        let dist = g.hop_distances(&code("AAA"));
        assert_eq!(dist.len(), 2);
        assert!(!dist.contains_key(&code("CCC")));
    }

    #[test]
    fn self_loops_are_kept() {
        let g = graph(&[("AAA", "AAA"), ("AAA", "BBB")]);
        assert_eq!(g.edge_count(), 2);
        // the loop is an edge, but an airport is not its own neighbour
        assert_eq!(g.neighbors(&code("AAA")), set(&["BBB"]));
        assert_eq!(
            g.vertices_at_exact_distance(&code("AAA"), 1),
            g.neighbors(&code("AAA"))
        );
        // start is removed from the union even though it is its own neighbour,
        // while BBB comes back through the loop
        assert_eq!(g.neighbors_via_union_of_neighbors(&code("AAA")), set(&["BBB"]));
        assert_eq!(g.vertices_at_exact_distance(&code("AAA"), 1), set(&["BBB"]));
    }

    #[test]
    fn not_directly_served() {
        let g = chain();
        // BBB only flies on to CCC; AAA flies into BBB but is not served
        assert_eq!(g.not_directly_served_from(&code("BBB")), set(&["AAA", "DDD"]));
        assert_eq!(
            g.not_directly_served_from(&code("XXX")),
            set(&["AAA", "BBB", "CCC", "DDD"])
        );
    }

    #[test]
    fn inbound_only_airports_are_not_served() {
        let date = NaiveDate::from_ymd_opt(2013, 1, 1).unwrap();
        let carrier = CarrierCode::parse("AA").unwrap();
        let records = vec![
            FlightRecord::new(date, carrier, 1, code("LGA"), code("ORD"), 733),
            FlightRecord::new(date, carrier, 2, code("BOS"), code("LGA"), 184),
        ];
        let g = ReachabilityGraph::build(&records);

        // undirected for hop queries
        assert_eq!(g.neighbors(&code("LGA")), set(&["BOS", "ORD"]));
        assert_eq!(g.not_directly_served_from(&code("LGA")), set(&["BOS"]));
        assert_eq!(g.not_directly_served_from(&code("BOS")), set(&["ORD"]));
    }
}
