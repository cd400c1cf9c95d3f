//! Write `sample_data.csv`, a deterministic demo table for the dashboard.

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

const ROWS: usize = 200;

fn main() -> Result<()> {
    env_logger::init();
    let mut rng = SimpleRng::new(42);

    let regions = ["North", "South", "East", "West"];
    let products = ["Widget", "Gadget", "Gizmo"];
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).context("invalid start date")?;

    let output_path = "sample_data.csv";
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;
    writer.write_record(["date", "region", "product", "units", "price", "score"])?;

    for i in 0..ROWS {
        let date = start + Duration::days(i as i64);
        let units = rng.gauss(50.0, 20.0).round().max(0.0);
        let price = (rng.gauss(20.0, 5.0).max(1.0) * 100.0).round() / 100.0;
        // roughly one score in twenty is missing
        let score = if rng.next_f64() < 0.05 {
            String::new()
        } else {
            format!("{:.1}", rng.next_f64() * 100.0)
        };

        writer.write_record([
            date.format("%Y-%m-%d").to_string(),
            rng.pick(&regions).to_string(),
            rng.pick(&products).to_string(),
            units.to_string(),
            price.to_string(),
            score,
        ])?;
    }
    writer.flush().context("flushing CSV")?;

    println!("Wrote {ROWS} rows to {output_path}");
    Ok(())
}
