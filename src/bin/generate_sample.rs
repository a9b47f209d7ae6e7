//! Writes a deterministic synthetic `clustering_output.csv` so the dashboard
//! can be tried without the upstream pipeline's output.

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

const CATEGORIES: [&str; 8] = [
    "food", "tech", "fashion", "home", "auto", "sports", "books", "beauty",
];

/// Per-cluster feature profile: which categories a cluster's sellers lean
/// towards. Values are unnormalized weights.
fn cluster_profile(cluster: usize) -> Vec<f64> {
    CATEGORIES
        .iter()
        .enumerate()
        .map(|(i, _)| if i % 4 == cluster % 4 { 4.0 } else { 1.0 })
        .collect()
}

fn main() {
    let mut rng = StdRng::seed_from_u64(42);
    let noise = Normal::new(0.0, 0.05).unwrap();

    let dates: Vec<NaiveDate> = (1..=6)
        .map(|m| NaiveDate::from_ymd_opt(2024, m, 1).unwrap())
        .collect();
    let n_clusters = 4;
    let sellers_per_cluster = 40;

    let out_dir = std::path::Path::new("data");
    std::fs::create_dir_all(out_dir).expect("creating data directory");
    let out_path = out_dir.join("clustering_output.csv");
    let mut writer = csv::Writer::from_path(&out_path).expect("creating output CSV");

    let mut header = vec![
        "seller_id".to_string(),
        "data".to_string(),
        "cluster_id".to_string(),
    ];
    header.extend(
        CATEGORIES
            .iter()
            .map(|c| format!("recbruta_{c}_prop")),
    );
    writer.write_record(&header).expect("writing header");

    let mut rows = 0usize;
    for &date in &dates {
        for cluster in 0..n_clusters {
            let profile = cluster_profile(cluster);
            for s in 0..sellers_per_cluster {
                // A seller occasionally skips a month.
                if rng.gen_bool(0.1) {
                    continue;
                }

                let mut shares: Vec<f64> = profile
                    .iter()
                    .map(|&w| (w + noise.sample(&mut rng)).max(0.0))
                    .collect();
                let total: f64 = shares.iter().sum();
                for v in &mut shares {
                    *v /= total;
                }

                let mut record = vec![
                    format!("seller_{cluster}_{s:03}"),
                    date.to_string(),
                    cluster.to_string(),
                ];
                record.extend(shares.iter().map(|v| format!("{v:.6}")));
                writer.write_record(&record).expect("writing row");
                rows += 1;
            }
        }
    }

    writer.flush().expect("flushing CSV");
    println!(
        "Wrote {rows} rows ({} dates, {n_clusters} clusters) to {}",
        dates.len(),
        out_path.display()
    );
}
