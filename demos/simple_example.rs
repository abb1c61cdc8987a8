use dijkstra_ops::graph::DirectedGraph;
use dijkstra_ops::measure::summary::{adjacency_summary, counts_summary};
use dijkstra_ops::{shortest_paths_from, Strategy};
use ordered_float::OrderedFloat;

fn main() -> Result<(), dijkstra_ops::Error> {
    // Create a small road network
    let mut graph: DirectedGraph<&str, OrderedFloat<f64>> = DirectedGraph::new();
    for city in ["Avila", "Burgos", "Cuenca", "Dos Hermanas", "Elche"] {
        graph.add_node(city)?;
    }

    let roads = [
        ("Avila", "Burgos", 10.0),
        ("Avila", "Cuenca", 5.0),
        ("Burgos", "Dos Hermanas", 1.0),
        ("Cuenca", "Burgos", 3.0),
        ("Cuenca", "Dos Hermanas", 9.0),
        ("Cuenca", "Elche", 2.0),
        ("Dos Hermanas", "Elche", 4.0),
        ("Elche", "Avila", 7.0),
        ("Elche", "Dos Hermanas", 6.0),
    ];
    for (from, to, km) in roads {
        graph.add_edge(&from, &to, OrderedFloat(km))?;
    }

    println!("--- Testing on a simple graph ---");
    print!("{}", adjacency_summary(&graph, None));

    for strategy in Strategy::ALL {
        let result = shortest_paths_from(&graph, &"Avila", strategy)?;

        println!("\n{} results:", strategy);
        for (slot, city) in graph.nodes().iter().enumerate() {
            match (result.distance(slot), result.path_to(slot)) {
                (Some(dist), Some(path)) => {
                    let names: Vec<&str> = path.iter().map(|&s| graph.nodes()[s]).collect();
                    println!("  {}: distance = {:.1}, path = {}", city, dist.into_inner(), names.join(" -> "));
                }
                _ => println!("  {}: unreachable", city),
            }
        }
        print!("{}", counts_summary(&strategy.to_string(), &result.counts));
    }

    Ok(())
}
