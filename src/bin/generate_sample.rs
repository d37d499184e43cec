//! Writes a deterministic sample jobs CSV for manual testing of the two
//! tools: `cargo run --bin generate_sample`, then open `sample_jobs.csv`.

use std::error::Error;

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

    /// Uniform value in `[lo, hi)`.
    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let mut rng = SimpleRng::new(42);

    let sectors = ["Energy", "Water", "Transport", "Telecom"];
    let locations = ["Lagos", "Abuja", "Port Harcourt", "Kano"];
    let job_types = ["Installation", "Maintenance", "Survey", "Decommission"];
    let customers = [
        "Acme Holdings",
        "Borealis Group",
        "Corex Ltd",
        "Dynatrade",
        "Epoch Industries",
        "Fulcrum Energy",
        "Gateway Co",
    ];

    let n_rows = 500;
    let output_path = "sample_jobs.csv";
    let mut writer = csv::Writer::from_path(output_path)?;

    writer.write_record([
        "Sector Name",
        "Location",
        "Job Type",
        "Customer Name",
        "Actual Cost",
        "Actual Revenue",
        "Actual Margin %",
    ])?;

    for _ in 0..n_rows {
        let cost = rng.range(50_000.0, 5_000_000.0);
        let markup = rng.range(0.95, 1.45);
        let revenue = cost * markup;
        let margin = (revenue - cost) / revenue * 100.0;

        writer.write_record([
            rng.pick(&sectors).to_string(),
            rng.pick(&locations).to_string(),
            rng.pick(&job_types).to_string(),
            rng.pick(&customers).to_string(),
            format!("{cost:.2}"),
            format!("{revenue:.2}"),
            format!("{margin:.2}"),
        ])?;
    }

    writer.flush()?;
    println!("Wrote {n_rows} jobs to {output_path}");
    Ok(())
}
