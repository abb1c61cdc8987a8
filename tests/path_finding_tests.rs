use dijkstra_ops::algorithm::traits::ShortestPathAlgorithm;
use dijkstra_ops::config::make_rng;
use dijkstra_ops::graph::generators::{generate_grid, generate_random_graph};
use dijkstra_ops::graph::{DirectedGraph, Graph};
use dijkstra_ops::{HeapDijkstra, NaiveDijkstra, Strategy};
use ordered_float::OrderedFloat;

type Weighted = DirectedGraph<usize, OrderedFloat<f64>>;

// Reference distances by repeated relaxation over every edge
fn bellman_ford(graph: &Weighted, source: usize) -> Vec<f64> {
    let n = graph.node_count();
    let mut dist = vec![f64::INFINITY; n];
    dist[source] = 0.0;
    for _ in 0..n {
        let mut changed = false;
        for (from, edge) in graph.edges() {
            let candidate = dist[from] + edge.weight.into_inner();
            if candidate < dist[edge.to] {
                dist[edge.to] = candidate;
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }
    dist
}

// Ring i -> i+1 plus one chord per node, so every node is reachable from 0
fn ring_with_chords(n: usize) -> Weighted {
    let mut graph = DirectedGraph::with_nodes(n);
    for i in 0..n {
        graph
            .add_edge_by_slot(i, (i + 1) % n, OrderedFloat((i % 5 + 1) as f64))
            .unwrap();
        graph
            .add_edge_by_slot(i, (i * 7 + 3) % n, OrderedFloat((i % 3 + 2) as f64))
            .unwrap();
    }
    graph
}

#[test]
fn test_path_finding_simple_grid() {
    let graph = generate_grid(10, 10).unwrap();
    let naive = NaiveDijkstra::new();
    let heap = HeapDijkstra::new();

    let naive_result = naive.compute_shortest_paths(&graph, 0).unwrap();
    let heap_result = heap.compute_shortest_paths(&graph, 0).unwrap();

    // Manhattan distance to the opposite corner
    assert_eq!(naive_result.distances[99], OrderedFloat(18.0));
    assert_eq!(heap_result.distances[99], OrderedFloat(18.0));

    let naive_path = ShortestPathAlgorithm::<OrderedFloat<f64>, Weighted>::get_path(&naive, &naive_result, 99).unwrap();
    let heap_path = ShortestPathAlgorithm::<OrderedFloat<f64>, Weighted>::get_path(&heap, &heap_result, 99).unwrap();
    assert_eq!(naive_path.len(), 19);
    assert_eq!(naive_path, heap_path);
    assert_eq!(naive_path.first(), Some(&0));
    assert_eq!(naive_path.last(), Some(&99));

    // Consecutive path nodes are grid neighbours
    for pair in naive_path.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        assert!(graph.out_edges(a).iter().any(|edge| edge.to == b));
    }
}

#[test]
fn test_algorithm_names() {
    assert_eq!(
        ShortestPathAlgorithm::<OrderedFloat<f64>, Weighted>::name(&NaiveDijkstra),
        "Dijkstra (linear scan)"
    );
    assert_eq!(
        ShortestPathAlgorithm::<OrderedFloat<f64>, Weighted>::strategy(&HeapDijkstra),
        Strategy::Heap
    );
}

#[test]
fn test_strategies_match_reference_on_random_graphs() {
    let mut rng = make_rng(Some(42));

    for (n, density) in [(10, 0.3), (40, 0.1), (60, 0.5), (120, 0.05)] {
        let graph = generate_random_graph(n, (1, 20), density, None, &mut rng).unwrap();
        let expected = bellman_ford(&graph, 0);

        let naive = Strategy::Naive.run(&graph, 0).unwrap();
        let heap = Strategy::Heap.run(&graph, 0).unwrap();

        // Integer weights keep every sum exact
        let naive_distances: Vec<f64> = naive.distances.iter().map(|d| d.into_inner()).collect();
        assert_eq!(naive_distances, expected, "naive, n = {}", n);
        assert_eq!(naive.distances, heap.distances, "n = {}", n);

        // Same tie-break rule, so the same tree and order
        assert_eq!(naive.predecessors, heap.predecessors);
        assert_eq!(naive.finalization_order, heap.finalization_order);
        assert_eq!(naive.counts.extractions, heap.counts.extractions);
        assert_eq!(naive.counts.relaxation_attempts, heap.counts.relaxation_attempts);
        assert_eq!(naive.counts.relaxation_successes, heap.counts.relaxation_successes);
    }
}

#[test]
fn test_shortest_path_tree_is_consistent() {
    let mut rng = make_rng(Some(7));
    let graph = generate_random_graph(80, (1, 9), 0.08, None, &mut rng).unwrap();

    for strategy in Strategy::ALL {
        let result = strategy.run(&graph, 0).unwrap();
        assert_eq!(result.predecessors[0], None);

        for node in 0..graph.node_count() {
            match result.predecessors[node] {
                Some(parent) => {
                    // dist[v] = dist[u] + w(u, v) for some edge u -> v
                    let tight = graph.out_edges(parent).iter().any(|edge| {
                        edge.to == node && result.distances[parent] + edge.weight == result.distances[node]
                    });
                    assert!(tight, "{}: edge {} -> {} is not tight", strategy, parent, node);
                }
                None if node != 0 => assert!(result.distances[node].is_infinite()),
                None => {}
            }

            if let Some(path) = result.path_to(node) {
                assert_eq!(path[0], 0);
                assert_eq!(*path.last().unwrap(), node);
            } else {
                assert!(!result.is_reachable(node));
            }
        }
    }
}

#[test]
fn test_finalization_order_is_non_decreasing() {
    let mut rng = make_rng(Some(3));
    let graph = generate_random_graph(100, (1, 50), 0.1, None, &mut rng).unwrap();

    for strategy in Strategy::ALL {
        let result = strategy.run(&graph, 0).unwrap();
        assert_eq!(result.finalization_order.len(), result.reachable_count());
        assert_eq!(result.counts.extractions as usize, result.reachable_count());

        for pair in result.finalization_order.windows(2) {
            assert!(result.distances[pair[0]] <= result.distances[pair[1]]);
        }
    }
}

#[test]
fn test_naive_comparisons_are_quadratic() {
    for n in [10, 50, 200] {
        let graph = ring_with_chords(n);
        let result = Strategy::Naive.run(&graph, 0).unwrap();

        assert_eq!(result.reachable_count(), n);
        let expected = (n * (n - 1) / 2) as u64;
        assert_eq!(result.counts.comparisons, expected, "n = {}", n);
        assert_eq!(result.counts.extractions, n as u64);
        assert_eq!(result.counts.relaxation_attempts, 2 * n as u64);
    }
}

#[test]
fn test_heap_wins_on_sparse_graphs() {
    let graph = ring_with_chords(400);

    let naive = Strategy::Naive.run(&graph, 0).unwrap();
    let heap = Strategy::Heap.run(&graph, 0).unwrap();

    assert_eq!(naive.distances, heap.distances);
    assert!(
        heap.counts.comparisons * 2 < naive.counts.comparisons,
        "heap {} vs naive {}",
        heap.counts.comparisons,
        naive.counts.comparisons
    );
    assert!(heap.counts.total() < naive.counts.total());
}

#[test]
fn test_runs_from_every_source_agree() {
    let mut rng = make_rng(Some(11));
    let graph = generate_random_graph(30, (1, 5), 0.2, None, &mut rng).unwrap();

    for source in 0..graph.node_count() {
        let naive = Strategy::Naive.run(&graph, source).unwrap();
        let heap = Strategy::Heap.run(&graph, source).unwrap();
        assert_eq!(naive.distances, heap.distances, "source {}", source);
        assert_eq!(naive.distances[source], OrderedFloat(0.0));
    }
}
