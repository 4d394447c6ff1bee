use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;

/// Write a synthetic census extract and its code dictionary.
#[derive(Parser, Debug)]
#[command(name = "generate_sample")]
struct Args {
    /// Directory to write sample_census.csv and sample_dictionary.json into
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Number of distinct records (duplicates are appended on top)
    #[arg(long, default_value_t = 200)]
    rows: usize,

    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// Seeded splitmix64 stream.
struct SimpleRng(u64);

impl SimpleRng {
    fn new(seed: u64) -> Self {
        SimpleRng(seed)
    }

    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform integer in `lo..=hi`.
    fn range(&mut self, lo: i64, hi: i64) -> i64 {
        let span = (hi - lo + 1) as u64;
        lo + (self.next_u64() % span) as i64
    }

    /// True with probability `percent` / 100.
    fn chance(&mut self, percent: u64) -> bool {
        self.next_u64() % 100 < percent
    }
}

const HEADER: [&str; 5] = [
    "SERIAL_NUM",
    "FAMILY_TYPE",
    "SEX",
    "AGE_BAND",
    "HOURS_PER_WEEK_WORKED",
];

fn family_type(rng: &mut SimpleRng) -> String {
    // communal-establishment residents carry the "not applicable" code
    if rng.chance(8) {
        "-8".to_string()
    } else {
        rng.range(1, 4).to_string()
    }
}

fn hours(rng: &mut SimpleRng) -> String {
    match rng.range(0, 99) {
        0..=4 => String::new(),
        5..=6 => "n/a".to_string(),
        7..=9 => "-8".to_string(),
        10..=11 => rng.range(101, 168).to_string(),
        _ => rng.range(0, 60).to_string(),
    }
}

fn generate_rows(rows: usize, rng: &mut SimpleRng) -> Vec<[String; 5]> {
    let mut records: Vec<[String; 5]> = (0..rows)
        .map(|i| {
            let mut record = [
                (100_000 + i).to_string(),
                family_type(rng),
                rng.range(1, 2).to_string(),
                rng.range(1, 7).to_string(),
                hours(rng),
            ];
            // guarantee one inadmissible code and one outlier regardless of seed
            match i {
                1 => record[1] = "9".to_string(),
                2 => record[4] = "150".to_string(),
                _ => {}
            }
            record
        })
        .collect();

    // serial numbers are unique, so only these copies are duplicates
    let duplicates = rows / 10;
    for _ in 0..duplicates {
        let source = rng.range(0, rows as i64 - 1) as usize;
        records.push(records[source].clone());
    }
    records
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut rng = SimpleRng::new(args.seed);

    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;

    let records = generate_rows(args.rows, &mut rng);
    let csv_path = args.out_dir.join("sample_census.csv");
    let mut writer = csv::Writer::from_path(&csv_path)
        .with_context(|| format!("creating {}", csv_path.display()))?;
    writer.write_record(HEADER)?;
    for record in &records {
        writer.write_record(record)?;
    }
    writer.flush()?;

    let dictionary = json!({
        "FAMILY_TYPE": {
            "1": "Married or civil partnership couple family",
            "2": "Cohabiting couple family",
            "3": "Lone parent family",
            "4": "Other family type",
            "-8": "No code required (communal establishment residents)"
        },
        "SEX": {
            "1": "Male",
            "2": "Female"
        },
        "AGE_BAND": {
            "1": "Aged 15 years and under",
            "2": "Aged 16 to 24 years",
            "3": "Aged 25 to 34 years",
            "4": "Aged 35 to 44 years",
            "5": "Aged 45 to 54 years",
            "6": "Aged 55 to 64 years",
            "7": "Aged 65 years and over"
        }
    });
    let json_path = args.out_dir.join("sample_dictionary.json");
    fs::write(&json_path, serde_json::to_string_pretty(&dictionary)?)
        .with_context(|| format!("writing {}", json_path.display()))?;

    println!(
        "Wrote {} records ({} duplicates) to {} and dictionary to {}",
        records.len(),
        args.rows / 10,
        csv_path.display(),
        json_path.display()
    );
    Ok(())
}
