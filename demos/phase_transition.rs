//! Sweep p across the G(n, p) threshold and watch the giant component appear

use stochastic_graphs::prelude::*;

fn main() {
    let n = 400;
    let samples = 20;
    let mut rng = seeded(2024);

    println!("=== Giant component in G({}, p) ===\n", n);
    println!("{:>8} {:>8} {:>14} {:>12}", "n*p", "p", "largest/n", "components");

    for step in 0..=12 {
        let c = step as f64 * 0.25;
        let p = c / n as f64;
        let model = ErdosRenyi::new(n, p).unwrap();

        let mut largest = 0.0;
        let mut components = 0.0;
        for _ in 0..samples {
            let graph = model.generate(&mut rng);
            largest += graph.largest_component_size() as f64 / n as f64;
            components += graph.component_count() as f64;
        }

        println!(
            "{:>8.2} {:>8.5} {:>14.3} {:>12.1}",
            c,
            p,
            largest / samples as f64,
            components / samples as f64
        );
    }
}
