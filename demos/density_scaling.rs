use colored::*;
use dijkstra_ops::config::make_rng;
use dijkstra_ops::graph::generators::{generate_random_graph, Density};
use dijkstra_ops::measure::measure_graph;

fn main() -> Result<(), dijkstra_ops::Error> {
    let mut rng = make_rng(Some(7));
    let sizes = [50, 100, 200, 400, 800];
    let densities = [
        ("3 edges per node", Density::PerNode { edges: 3.0 }),
        ("ln(n)/n", Density::LogOverN { scale: 1.0 }),
        ("25%", Density::Fixed { value: 0.25 }),
        ("complete", Density::Fixed { value: 1.0 }),
    ];

    println!("{}", "Operation counts: linear scan vs binary heap".bold());

    for (label, density) in densities {
        println!("\n{}", format!("Density {}", label).cyan().bold());
        println!("{:>6} {:>9} {:>12} {:>12} {:>8}", "n", "m", "naive", "heap", "ratio");

        for n in sizes {
            let graph = generate_random_graph(n, (1, 100), density.resolve(n), None, &mut rng)?;
            let record = measure_graph(&format!("{}_{}", label, n), &graph, 0)?;
            let ratio = record.naive_ops as f64 / record.heap_ops.max(1) as f64;

            let ratio_text = format!("{:>8.2}", ratio);
            let ratio_text = if ratio >= 1.0 {
                ratio_text.green()
            } else {
                ratio_text.red()
            };
            println!(
                "{:>6} {:>9} {:>12} {:>12} {}",
                record.n, record.m, record.naive_ops, record.heap_ops, ratio_text
            );
        }
    }

    println!(
        "\n{}",
        "Ratios above 1 mean the heap did fewer primitive operations.".dimmed()
    );
    Ok(())
}
