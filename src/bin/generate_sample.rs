//! Writes a synthetic `data/hack_data_clustered.csv` with two balanced
//! attacker clusters, so the report can be opened without the real dataset.

use serde::Serialize;

const OUTPUT_PATH: &str = "data/hack_data_clustered.csv";
const ROWS_PER_CLUSTER: usize = 167;

const LOCATIONS: [&str; 14] = [
    "Slovenia",
    "British Virgin Islands",
    "Tokelau",
    "Bolivia",
    "Iraq",
    "Marshall Islands",
    "Georgia",
    "Timor-Leste",
    "Palestinian Territory",
    "Bhutan",
    "Guernsey",
    "Tonga",
    "Mozambique",
    "Cote d'Ivoire",
];

#[derive(Debug, Serialize)]
struct Row {
    #[serde(rename = "Session_Connection_Time")]
    session_connection_time: f64,
    #[serde(rename = "Bytes_Transferred")]
    bytes_transferred: f64,
    #[serde(rename = "Kali_Trace_Used")]
    kali_trace_used: u8,
    #[serde(rename = "Servers_Corrupted")]
    servers_corrupted: f64,
    #[serde(rename = "Pages_Corrupted")]
    pages_corrupted: f64,
    #[serde(rename = "Location")]
    location: String,
    #[serde(rename = "WPM_Typing_Speed")]
    wpm_typing_speed: f64,
    bytes_per_min: f64,
    pages_per_min: f64,
    cluster: u8,
    #[serde(rename = "PC1")]
    pc1: f64,
    #[serde(rename = "PC2")]
    pc2: f64,
}

/// Per-cluster behaviour profile: (mean, std dev) per raw feature.
struct Profile {
    connection_time: (f64, f64),
    bytes: (f64, f64),
    servers: (f64, f64),
    pages: (f64, f64),
    wpm: (f64, f64),
    pc_center: (f64, f64),
}

const PROFILES: [Profile; 2] = [
    Profile {
        connection_time: (30.0, 13.0),
        bytes: (607.0, 285.0),
        servers: (3.0, 1.2),
        pages: (9.1, 1.3),
        wpm: (57.0, 5.2),
        pc_center: (-2.1, 0.2),
    },
    Profile {
        connection_time: (31.0, 13.5),
        bytes: (610.0, 281.0),
        servers: (7.5, 1.3),
        pages: (10.2, 1.4),
        wpm: (62.0, 5.0),
        pc_center: (2.1, -0.2),
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

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

fn sample(rng: &mut SimpleRng, cluster: u8) -> Row {
    let p = &PROFILES[cluster as usize];
    let positive = |v: f64, floor: f64| v.max(floor);

    let session_connection_time = positive(rng.gauss(p.connection_time.0, p.connection_time.1), 1.0).round();
    let bytes_transferred = round_to(positive(rng.gauss(p.bytes.0, p.bytes.1), 10.0), 2);
    let servers_corrupted = round_to(positive(rng.gauss(p.servers.0, p.servers.1), 1.0), 2);
    let pages_corrupted = positive(rng.gauss(p.pages.0, p.pages.1), 6.0).round();
    let wpm_typing_speed = round_to(rng.gauss(p.wpm.0, p.wpm.1), 2);

    Row {
        session_connection_time,
        bytes_transferred,
        kali_trace_used: (rng.next_f64() < 0.5) as u8,
        servers_corrupted,
        pages_corrupted,
        location: rng.pick(&LOCATIONS).to_string(),
        wpm_typing_speed,
        bytes_per_min: round_to(bytes_transferred / session_connection_time, 4),
        pages_per_min: round_to(pages_corrupted / session_connection_time, 4),
        cluster,
        pc1: round_to(rng.gauss(p.pc_center.0, 0.6), 4),
        pc2: round_to(rng.gauss(p.pc_center.1, 0.9), 4),
    }
}

fn main() {
    let mut rng = SimpleRng::new(42);

    std::fs::create_dir_all("data").expect("Failed to create data directory");
    let mut writer = csv::Writer::from_path(OUTPUT_PATH).expect("Failed to create output file");

    let mut rows = 0;
    for _ in 0..ROWS_PER_CLUSTER {
        for cluster in 0..PROFILES.len() as u8 {
            writer
                .serialize(sample(&mut rng, cluster))
                .expect("Failed to write row");
            rows += 1;
        }
    }
    writer.flush().expect("Failed to flush writer");

    println!(
        "Wrote {rows} sessions ({ROWS_PER_CLUSTER} per cluster) to {OUTPUT_PATH}"
    );
}
