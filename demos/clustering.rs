//! Normalize a small table, cluster it with both seeding strategies, and print
//! the per-iteration cluster sizes and silhouette score.

use kcluster::{
    normalize_min_max, parse_numeric_rows, Convergence, InitStrategy, Kmeans, MinMaxScaler,
    UpdateRule,
};

fn main() {
    // Raw cells as a tabular reader would hand them over (header stripped).
    let cells = vec![
        // Group A
        vec!["0.0", "120"],
        vec!["0.1", "118"],
        vec!["0.2", "125"],
        vec!["-0.1", "121"],
        // Group B
        vec!["5.0", "510"],
        vec!["5.1", "498"],
        vec!["4.9", "505"],
        vec!["5.2", "520"],
        // Group C
        vec!["10.0", "130"],
        vec!["10.1", "128"],
        vec!["9.9", "122"],
        vec!["10.2", "135"],
    ];

    let raw = parse_numeric_rows(&cells).unwrap();
    let scaler = MinMaxScaler::fit(&raw).unwrap();
    let data = normalize_min_max(&raw).unwrap();

    for (name, init, update) in [
        ("random / mean", InitStrategy::Random, UpdateRule::Mean),
        ("farthest-point / median", InitStrategy::FarthestPoint, UpdateRule::Median),
    ] {
        let fit = Kmeans::new(3)
            .with_init(init)
            .with_update(update)
            .with_max_iter(4)
            .with_convergence(Convergence::FixedIterations)
            .with_silhouette(true)
            .with_seed(42)
            .fit(&data)
            .unwrap();

        println!("=== K-means (k=3, {name}) ===");
        for (i, sizes) in fit.history.iter().enumerate() {
            println!("  iteration {} sizes {:?}", i + 1, sizes);
        }
        for (i, label) in fit.assignments.iter().enumerate() {
            println!(
                "  point {:2} ({:5.1}, {:5.1}) => cluster {}",
                i, raw[i][0], raw[i][1], label
            );
        }

        let centroids: Vec<Vec<f32>> = fit.centroids.rows().into_iter().map(|r| r.to_vec()).collect();
        for (c, center) in scaler.inverse_transform(&centroids).unwrap().iter().enumerate() {
            println!("  centroid {} ({:5.2}, {:6.1})", c, center[0], center[1]);
        }
        println!(
            "  silhouette {:.4}, stable after {:?} iterations\n",
            fit.silhouette.unwrap_or(0.0),
            fit.stable_at
        );
    }
}
