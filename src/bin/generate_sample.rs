use anyhow::{Context, Result};
use serde::Serialize;

/// One output row, same columns the dashboard reads.
#[derive(Serialize)]
struct Row {
    #[serde(rename = "CustomerID")]
    customer_id: u32,
    #[serde(rename = "Recency")]
    recency: u32,
    #[serde(rename = "Frequency")]
    frequency: u32,
    #[serde(rename = "Monetary")]
    monetary: f64,
    #[serde(rename = "Segment")]
    segment: &'static str,
}

/// Per-segment shape. Pairs are (mean, standard deviation); log fields are natural logs.
struct Profile {
    name: &'static str,
    customers: usize,
    recency: (f64, f64),
    log_frequency: (f64, f64),
    log_order_value: (f64, f64),
}

const PROFILES: [Profile; 4] = [
    Profile {
        name: "Champions",
        customers: 450,
        recency: (12.0, 8.0),
        log_frequency: (2.4, 0.5),
        log_order_value: (6.0, 0.4),
    },
    Profile {
        name: "Loyal",
        customers: 900,
        recency: (45.0, 20.0),
        log_frequency: (1.5, 0.4),
        log_order_value: (5.6, 0.4),
    },
    Profile {
        name: "At Risk",
        customers: 1100,
        recency: (150.0, 50.0),
        log_frequency: (0.8, 0.4),
        log_order_value: (5.4, 0.5),
    },
    Profile {
        name: "Lost",
        customers: 1400,
        recency: (280.0, 50.0),
        log_frequency: (0.2, 0.3),
        log_order_value: (5.2, 0.6),
    },
];

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
}

fn customer(rng: &mut SimpleRng, p: &Profile) -> Row {
    let recency = rng.gauss(p.recency.0, p.recency.1).clamp(0.0, 373.0).round() as u32;
    let frequency = rng
        .gauss(p.log_frequency.0, p.log_frequency.1)
        .exp()
        .round()
        .max(1.0) as u32;
    let order_value = rng.gauss(p.log_order_value.0, p.log_order_value.1).exp();
    let monetary = (order_value * f64::from(frequency) * 100.0).round() / 100.0;

    Row {
        customer_id: 0,
        recency,
        frequency,
        monetary,
        segment: p.name,
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let mut rows: Vec<Row> = Vec::new();
    for p in &PROFILES {
        for _ in 0..p.customers {
            rows.push(customer(&mut rng, p));
        }
    }

    // Interleave segments, then number customers in file order.
    for i in (1..rows.len()).rev() {
        let j = (rng.next_u64() % (i as u64 + 1)) as usize;
        rows.swap(i, j);
    }
    for (row, id) in rows.iter_mut().zip(12346u32..) {
        row.customer_id = id;
    }

    let output_path = "rfm_clusters.csv";
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;
    for row in &rows {
        writer.serialize(row).context("writing row")?;
    }
    writer.flush().context("flushing CSV")?;

    println!(
        "Wrote {} customers in {} segments to {output_path}",
        rows.len(),
        PROFILES.len()
    );
    Ok(())
}
