//! Write a synthetic `devices.js` / `column_map.json` pair.
//!
//! Usage: `generate_sample [OUTPUT_DIR]` (defaults to the current directory).
//! The output mimics the sensordb export: unquoted keys, `True`/`False`,
//! trailing commas and repeated models with different sample sizes.

use std::path::PathBuf;

use anyhow::{Context, Result};

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

    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

/// (raw key prefix, canonical sensor name, typical max rate in Hz)
const SENSORS: [(&str, &str, f64); 6] = [
    ("acc", "accelerometer", 500.0),
    ("gyr", "gyroscope", 500.0),
    ("mag", "magnetometer", 100.0),
    ("lin", "linear_acceleration", 400.0),
    ("prs", "pressure", 30.0),
    ("lgt", "light", 10.0),
];

const MANUFACTURERS: [(&str, &[&str]); 6] = [
    ("Apple", &["iPhone 11", "iPhone 12", "iPhone 13 mini", "iPhone SE", "iPad Air"]),
    ("samsung", &["SM-G991B", "SM-A525F", "SM-G973F", "SM-T500"]),
    ("Google", &["Pixel 6", "Pixel 7a", "Pixel 4"]),
    ("Xiaomi", &["Redmi Note 9", "Mi 11", "POCO F3"]),
    ("OnePlus", &["IN2013", "LE2123"]),
    ("Fairphone", &["FP4"]),
];

fn device_literal(rng: &mut SimpleRng, manufacturer: &str, model: &str) -> String {
    let mut line = format!(
        "{{mfr: \"{manufacturer}\", model: '{model}', n: {}",
        1 + rng.below(12)
    );
    for (raw, _, max_rate) in SENSORS {
        let available = rng.chance(0.8);
        let flag = if available { "True" } else { "False" };
        if available {
            let rate = (max_rate * (0.3 + 0.7 * rng.next_f64()) * 10.0).round() / 10.0;
            line.push_str(&format!(", {raw}_rate: {rate}"));
        } else {
            line.push_str(&format!(", {raw}_rate: null"));
        }
        line.push_str(&format!(", {raw}_avail: {flag}"));
    }
    line.push_str(",}");
    line
}

fn column_map() -> serde_json::Value {
    let mut map = serde_json::Map::new();
    map.insert("mfr".into(), "manufacturer".into());
    map.insert("n".into(), "sample_size".into());
    for (raw, sensor, _) in SENSORS {
        map.insert(format!("{raw}_rate"), format!("{sensor}_rate").into());
        map.insert(format!("{raw}_avail"), format!("{sensor}_available").into());
    }
    serde_json::Value::Object(map)
}

fn main() -> Result<()> {
    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let mut rng = SimpleRng::new(42);

    let mut js = String::from("// Synthetic sensor capabilities\nvar sensordb = [\n");
    let mut count = 0;
    for (manufacturer, models) in MANUFACTURERS {
        for model in models {
            // Some models are submitted more than once.
            let submissions = 1 + rng.below(3);
            for _ in 0..submissions {
                js.push_str("  ");
                js.push_str(&device_literal(&mut rng, manufacturer, model));
                js.push_str(",\n");
                count += 1;
            }
        }
    }
    js.push_str("];\n");

    let devices_path = out_dir.join("devices.js");
    std::fs::write(&devices_path, js)
        .with_context(|| format!("writing {}", devices_path.display()))?;

    let map_path = out_dir.join("column_map.json");
    let map_text = serde_json::to_string_pretty(&column_map()).context("serializing column map")?;
    std::fs::write(&map_path, map_text + "\n")
        .with_context(|| format!("writing {}", map_path.display()))?;

    println!(
        "Wrote {count} device entries to {} and {}",
        devices_path.display(),
        map_path.display()
    );
    Ok(())
}
