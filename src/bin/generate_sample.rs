//! Writes a synthetic EDS line-scan export (`sample_linescan.csv` by default)
//! with the usual 14-line preamble, Latin-1 text and a Pd/Ag/Fe/Ni/Cu/Zn
//! diffusion couple profile.

use anyhow::{Context, Result};

/// Smooth step from `low` to `high` centred on `x0` with width `w`.
fn interface(x: f64, x0: f64, w: f64, low: f64, high: f64) -> f64 {
    low + (high - low) / (1.0 + (-(x - x0) / w).exp())
}

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
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
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

/// Exports come out of the instrument software as Latin-1.
fn latin1(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}

const ELEMENTS: [&str; 6] = ["PdL", "AgL", "FeK", "NiK", "CuK", "ZnK"];

fn main() -> Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_linescan.csv".to_string());
    let mut rng = SimpleRng::new(42);

    let points = 200;
    let step_um = 0.25;

    let file = std::fs::File::create(&output_path)
        .with_context(|| format!("creating {output_path}"))?;
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .terminator(csv::Terminator::CRLF)
        .from_writer(file);

    // 14 preamble lines before the header line.
    let n_points = points.to_string();
    let step = step_um.to_string();
    let preamble: [&[&str]; 14] = [
        &["Line Scan Export"],
        &["Project", "Diffusion couple"],
        &["Specimen", "Pd-Ag / Fe-Ni-Cu-Zn"],
        &["Site", "Site of interest 1"],
        &["Accelerating voltage (kV)", "20.0"],
        &["Process time", "5"],
        &["Live time (s)", "0.5"],
        &["Number of points", n_points.as_str()],
        &["Step (µm)", step.as_str()],
        &["Quantification", "Atomic %"],
        &["Detector", "SDD"],
        &["Date", "2026-01-15"],
        &[""],
        &["Data"],
    ];
    for record in preamble {
        writer.write_record(record.iter().map(|field| latin1(field)))?;
    }

    let mut header = vec!["Point", "Distance"];
    header.extend(ELEMENTS);
    header.extend(["SED", "Total"]);
    writer.write_record(&header)?;

    for i in 0..points {
        let x = i as f64 * step_um;
        let pd = interface(x, 20.0, 1.5, 60.0, 0.5);
        let ag = interface(x, 20.0, 1.5, 38.0, 0.5);
        let fe = interface(x, 20.0, 2.0, 0.2, 45.0);
        let ni = interface(x, 20.0, 2.5, 0.3, 30.0);
        let cu = interface(x, 35.0, 1.0, 15.0, 5.0) * interface(x, 20.0, 1.0, 0.0, 1.0);
        let zn = 100.0 - pd - ag - fe - ni - cu;

        let mut record = vec![(i + 1).to_string(), format!("{x:.2}")];
        for value in [pd, ag, fe, ni, cu, zn] {
            let noisy = (value + rng.gauss(0.0, 0.4)).max(0.0);
            record.push(format!("{noisy:.2}"));
        }
        record.push(format!("{:.0}", 1200.0 + rng.gauss(0.0, 25.0)));
        record.push("100.00".to_string());
        writer.write_record(&record)?;
    }
    writer.flush()?;

    println!("Wrote {points} points ({} elements) to {output_path}", ELEMENTS.len());
    Ok(())
}
