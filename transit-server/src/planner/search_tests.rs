//! Unit tests for the mode-penalized route search.

use super::*;
use crate::knowledge::{NetworkBuilder, default_network};

fn id(s: &str) -> StationId {
    StationId::new(s)
}

fn names(route: &Route) -> Vec<&str> {
    route.stations.iter().map(StationId::as_str).collect()
}

/// The demonstration network with reverse and transfer edges derived.
fn reconciled_network() -> KnowledgeBase {
    let mut kb = default_network();
    kb.reconcile(3.0);
    kb
}

#[test]
fn seed_network_fastest_is_metro() {
    let kb = reconciled_network();

    let route = find_route(&kb, &id("A"), &id("D"), Metric::Time, 2.0).unwrap();

    assert_eq!(names(&route), ["A", "B", "C", "D"]);
    assert_eq!(route.total, 12.0);
    assert_eq!(route.mode_switches(), 0);
    assert!(route.legs.iter().all(|leg| leg.mode.as_str() == "metro"));
    assert_eq!(route.display_path(), "A -> B -> C -> D");
    assert_eq!(route.total_display(), "12.00");
}

#[test]
fn seed_network_cheapest_walks_to_bus() {
    let kb = reconciled_network();

    let route = find_route(&kb, &id("A"), &id("D"), Metric::Cost, 2.0).unwrap();

    // Zero-cost walk transfers to P2, then one penalised bus ride
    assert_eq!(route.total, 3.0);
    assert_eq!(route.stations.first(), Some(&id("A")));
    let last = route.legs.last().unwrap();
    assert_eq!(last.from, id("P2"));
    assert_eq!(last.to, id("D"));
    assert_eq!(last.mode.as_str(), "bus");
    assert_eq!(last.penalty, 2.0);
    assert!(route.legs[..route.legs.len() - 1]
        .iter()
        .all(|leg| leg.mode.is_walk()));
}

#[test]
fn seed_network_without_transfers() {
    let mut kb = default_network();
    kb.make_bidirectional();

    let route = find_route(&kb, &id("A"), &id("D"), Metric::Cost, 2.0).unwrap();

    // Tram 1.7 + 1.6 beats metro 4.5 and bus with a switch
    assert_eq!(names(&route), ["A", "Centro", "D"]);
    assert!((route.total - 3.3).abs() < 1e-9);
}

#[test]
fn start_equals_goal() {
    let kb = reconciled_network();

    let route = find_route(&kb, &id("B"), &id("B"), Metric::Time, 2.0).unwrap();

    assert_eq!(names(&route), ["B"]);
    assert!(route.legs.is_empty());
    assert_eq!(route.total, 0.0);
}

#[test]
fn no_route_when_goal_has_no_inbound_edges() {
    let mut kb = reconciled_network();
    kb.add_edge(id("Z"), id("Y"), Mode::new("bus"), 1.0, 1.0, false);

    assert!(find_route(&kb, &id("A"), &id("Z"), Metric::Time, 2.0).is_none());
    assert!(find_route(&kb, &id("Y"), &id("A"), Metric::Time, 2.0).is_none());
}

#[test]
fn no_route_from_unknown_start() {
    let kb = reconciled_network();
    assert!(find_route(&kb, &id("Nowhere"), &id("D"), Metric::Cost, 2.0).is_none());
}

#[test]
fn first_leg_is_not_penalised() {
    let kb = NetworkBuilder::new()
        .connect("S", "G", "tram", 4.0, 1.0)
        .build();

    let route = find_route(&kb, &id("S"), &id("G"), Metric::Time, 100.0).unwrap();

    assert_eq!(route.total, 4.0);
    assert_eq!(route.legs[0].penalty, 0.0);
}

#[test]
fn penalty_favours_staying_on_one_mode() {
    // S-M-G all metro (5 + 5) vs S-N metro then bus (5 + 4)
    let kb = NetworkBuilder::new()
        .connect("S", "M", "metro", 5.0, 1.0)
        .connect("M", "G", "metro", 5.0, 1.0)
        .connect("S", "N", "metro", 5.0, 1.0)
        .connect("N", "G", "bus", 4.0, 1.0)
        .build();

    let route = find_route(&kb, &id("S"), &id("G"), Metric::Time, 2.0).unwrap();
    assert_eq!(names(&route), ["S", "M", "G"]);
    assert_eq!(route.total, 10.0);

    let route = find_route(&kb, &id("S"), &id("G"), Metric::Time, 0.0).unwrap();
    assert_eq!(names(&route), ["S", "N", "G"]);
    assert_eq!(route.total, 9.0);
}

#[test]
fn large_metric_advantage_beats_penalty() {
    let kb = NetworkBuilder::new()
        .connect("S", "M", "metro", 5.0, 1.0)
        .connect("M", "G", "metro", 20.0, 1.0)
        .connect("M", "X", "bus", 3.0, 1.0)
        .connect("X", "G", "bus", 3.0, 1.0)
        .build();

    let route = find_route(&kb, &id("S"), &id("G"), Metric::Time, 2.0).unwrap();

    assert_eq!(names(&route), ["S", "M", "X", "G"]);
    assert_eq!(route.total, 13.0);
    assert_eq!(route.mode_switches(), 1);
}

#[test]
fn arrival_mode_is_part_of_state() {
    // X is reached first by bus (1), but continuing by metro from there
    // costs the penalty. Arriving by metro (2) is better overall.
    let mut kb = KnowledgeBase::new();
    kb.add_edge(id("S"), id("X"), Mode::new("bus"), 1.0, 0.0, false);
    kb.add_edge(id("S"), id("W"), Mode::new("metro"), 1.0, 0.0, false);
    kb.add_edge(id("W"), id("X"), Mode::new("metro"), 1.0, 0.0, false);
    kb.add_edge(id("X"), id("G"), Mode::new("metro"), 1.0, 0.0, false);

    let route = find_route(&kb, &id("S"), &id("G"), Metric::Time, 5.0).unwrap();

    assert_eq!(names(&route), ["S", "W", "X", "G"]);
    assert_eq!(route.total, 3.0);
}

#[test]
fn walk_switch_is_penalised() {
    let mut kb = KnowledgeBase::new();
    kb.add_edge(id("S"), id("X"), Mode::new("metro"), 1.0, 0.0, false);
    kb.add_edge(id("X"), id("G"), Mode::walk(), 3.0, 0.0, false);

    let route = find_route(&kb, &id("S"), &id("G"), Metric::Time, 2.0).unwrap();

    assert_eq!(route.total, 6.0);
    assert_eq!(route.legs[1].penalty, 2.0);
}

#[test]
fn legs_account_for_total() {
    let kb = reconciled_network();

    for metric in [Metric::Time, Metric::Cost] {
        let route = find_route(&kb, &id("P1"), &id("Centro"), metric, 2.0).unwrap();
        let sum: f64 = route.legs.iter().map(|l| l.weight + l.penalty).sum();

        assert_eq!(route.legs.len() + 1, route.stations.len());
        assert!((sum - route.total).abs() < 1e-9);
        assert_eq!(route.metric, metric);
        for (leg, pair) in route.legs.iter().zip(route.stations.windows(2)) {
            assert_eq!(leg.from, pair[0]);
            assert_eq!(leg.to, pair[1]);
        }
    }
}

#[test]
fn search_does_not_mutate_knowledge_base() {
    let kb = reconciled_network();
    let before = kb.clone();

    let _ = find_route(&kb, &id("A"), &id("D"), Metric::Time, 2.0);

    assert_eq!(kb, before);
}

#[test]
fn queue_entries_pop_lowest_value_first() {
    let mut queue = BinaryHeap::new();
    queue.push(QueueEntry { value: 3.0, seq: 0 });
    queue.push(QueueEntry { value: 1.0, seq: 1 });
    queue.push(QueueEntry { value: 1.0, seq: 2 });
    queue.push(QueueEntry { value: 2.0, seq: 3 });

    let order: Vec<usize> = std::iter::from_fn(|| queue.pop().map(|e| e.seq)).collect();
    assert_eq!(order, [1, 2, 3, 0]);
}

#[test]
fn planner_finds_route() {
    let kb = reconciled_network();
    let config = PlannerConfig::default();
    let planner = Planner::new(&kb, &config);

    let request = RouteRequest::new(id("A"), id("D"), Metric::Time);
    let route = planner.plan(&request).unwrap();

    assert_eq!(route.total, 12.0);
}

#[test]
fn planner_uses_configured_penalty() {
    let kb = NetworkBuilder::new()
        .connect("S", "M", "metro", 5.0, 1.0)
        .connect("M", "G", "metro", 5.0, 1.0)
        .connect("S", "N", "metro", 5.0, 1.0)
        .connect("N", "G", "bus", 4.0, 1.0)
        .build();
    let config = PlannerConfig::new(3.0, 0.5);
    let planner = Planner::new(&kb, &config);

    let route = planner
        .plan(&RouteRequest::new(id("S"), id("G"), Metric::Time))
        .unwrap();

    assert_eq!(names(&route), ["S", "N", "G"]);
    assert_eq!(route.total, 9.5);
}

#[test]
fn planner_rejects_unknown_station() {
    let kb = reconciled_network();
    let config = PlannerConfig::default();
    let planner = Planner::new(&kb, &config);

    let result = planner.plan(&RouteRequest::new(id("A"), id("d"), Metric::Time));

    assert_eq!(result, Err(PlannerError::UnknownStation(id("d"))));
}

#[test]
fn planner_reports_no_route() {
    let mut kb = reconciled_network();
    kb.add_edge(id("Z"), id("Y"), Mode::new("bus"), 1.0, 1.0, false);
    let config = PlannerConfig::default();
    let planner = Planner::new(&kb, &config);

    let result = planner.plan(&RouteRequest::new(id("A"), id("Z"), Metric::Cost));

    assert_eq!(
        result,
        Err(PlannerError::NoRouteFound {
            start: id("A"),
            goal: id("Z"),
        })
    );
    assert_eq!(
        result.unwrap_err().to_string(),
        "no route from A to Z"
    );
}

#[test]
fn request_parse() {
    let request = RouteRequest::parse(" A ", "Centro", "Cost").unwrap();
    assert_eq!(request, RouteRequest::new(id("A"), id("Centro"), Metric::Cost));

    assert!(matches!(
        RouteRequest::parse("A", "D", "distance"),
        Err(PlannerError::Invalid(DomainError::InvalidMetric(_)))
    ));
    assert!(matches!(
        RouteRequest::parse("", "D", "time"),
        Err(PlannerError::Invalid(DomainError::InvalidStation(_)))
    ));
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    const STATIONS: [&str; 6] = ["A", "B", "C", "D", "E", "F"];
    const MODES: [&str; 3] = ["metro", "bus", "tram"];

    type Fact = (usize, usize, usize, u8, u8);

    fn arb_facts() -> impl Strategy<Value = Vec<Fact>> {
        prop::collection::vec((0..6usize, 0..6usize, 0..3usize, 0..20u8, 0..20u8), 0..16)
    }

    fn build(facts: &[Fact], uniform: bool) -> KnowledgeBase {
        let mut kb = KnowledgeBase::new();
        for &(u, v, m, t, c) in facts {
            let mode = if uniform { MODES[0] } else { MODES[m] };
            kb.add_edge(
                id(STATIONS[u]),
                id(STATIONS[v]),
                Mode::new(mode),
                f64::from(t),
                f64::from(c),
                false,
            );
        }
        kb
    }

    /// All-pairs shortest distances by Floyd-Warshall, ignoring modes.
    fn floyd_warshall(kb: &KnowledgeBase, metric: Metric) -> Vec<Vec<f64>> {
        let n = STATIONS.len();
        let index = |s: &StationId| STATIONS.iter().position(|x| *x == s.as_str()).unwrap();
        let mut dist = vec![vec![f64::INFINITY; n]; n];
        for (i, row) in dist.iter_mut().enumerate() {
            row[i] = 0.0;
        }
        for (u, v, edge) in kb.edges() {
            let (i, j) = (index(u), index(v));
            dist[i][j] = dist[i][j].min(edge.weight(metric));
        }
        for k in 0..n {
            for i in 0..n {
                for j in 0..n {
                    let via = dist[i][k] + dist[k][j];
                    if via < dist[i][j] {
                        dist[i][j] = via;
                    }
                }
            }
        }
        dist
    }

    /// Cheapest penalised value over all simple paths, by exhaustive search.
    fn best_simple_path(
        kb: &KnowledgeBase,
        start: &StationId,
        goal: &StationId,
        metric: Metric,
        penalty: f64,
    ) -> Option<f64> {
        fn walk(
            kb: &KnowledgeBase,
            at: &StationId,
            goal: &StationId,
            arrived_by: Option<&Mode>,
            value: f64,
            seen: &mut Vec<StationId>,
            metric: Metric,
            penalty: f64,
            best: &mut Option<f64>,
        ) {
            if at == goal {
                *best = Some(best.map_or(value, |b: f64| b.min(value)));
                return;
            }
            for (next, edge) in kb.neighbors(at) {
                if seen.contains(next) {
                    continue;
                }
                let extra = match arrived_by {
                    Some(mode) if mode != &edge.mode => penalty,
                    _ => 0.0,
                };
                seen.push(next.clone());
                walk(
                    kb,
                    next,
                    goal,
                    Some(&edge.mode),
                    value + edge.weight(metric) + extra,
                    seen,
                    metric,
                    penalty,
                    best,
                );
                seen.pop();
            }
        }

        let mut best = None;
        let mut seen = vec![start.clone()];
        walk(kb, start, goal, None, 0.0, &mut seen, metric, penalty, &mut best);
        best
    }

    fn arb_metric() -> impl Strategy<Value = Metric> {
        prop_oneof![Just(Metric::Time), Just(Metric::Cost)]
    }

    proptest! {
        /// With a single mode and no penalty the search is plain Dijkstra
        #[test]
        fn matches_plain_shortest_path(
            facts in arb_facts(),
            metric in arb_metric(),
            s in 0..6usize,
            g in 0..6usize,
        ) {
            let kb = build(&facts, true);
            let dist = floyd_warshall(&kb, metric);

            let found = find_route(&kb, &id(STATIONS[s]), &id(STATIONS[g]), metric, 0.0);
            match found {
                Some(route) => prop_assert_eq!(route.total, dist[s][g]),
                None => prop_assert!(dist[s][g].is_infinite()),
            }
        }

        /// The returned route is a real path whose legs sum to the total,
        /// and no simple path is cheaper
        #[test]
        fn route_is_optimal_and_consistent(
            facts in arb_facts(),
            metric in arb_metric(),
            penalty in 0u8..10,
            s in 0..6usize,
            g in 0..6usize,
        ) {
            let kb = build(&facts, false);
            let penalty = f64::from(penalty);
            let (start, goal) = (id(STATIONS[s]), id(STATIONS[g]));

            let found = find_route(&kb, &start, &goal, metric, penalty);
            let brute = best_simple_path(&kb, &start, &goal, metric, penalty);

            match found {
                Some(route) => {
                    prop_assert_eq!(route.stations.first(), Some(&start));
                    prop_assert_eq!(route.stations.last(), Some(&goal));

                    let mut recomputed = 0.0;
                    let mut previous: Option<&Mode> = None;
                    for leg in &route.legs {
                        let edge = kb.edge(&leg.from, &leg.to);
                        prop_assert!(edge.is_some());
                        let edge = edge.unwrap();
                        prop_assert_eq!(&edge.mode, &leg.mode);
                        prop_assert_eq!(edge.weight(metric), leg.weight);
                        let expected_penalty = match previous {
                            Some(mode) if mode != &edge.mode => penalty,
                            _ => 0.0,
                        };
                        prop_assert_eq!(leg.penalty, expected_penalty);
                        recomputed += leg.weight + leg.penalty;
                        previous = Some(&edge.mode);
                    }
                    prop_assert_eq!(recomputed, route.total);

                    let brute = brute.unwrap();
                    prop_assert!(route.total <= brute);
                }
                None => prop_assert!(brute.is_none()),
            }
        }
    }
}
