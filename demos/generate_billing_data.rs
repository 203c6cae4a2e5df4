use std::env;
use std::fs::{create_dir_all, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use rand::Rng;

const PROBABILITY_MALFORMED: f64 = 0.002;

struct GeneratorConfig {
    num_records: usize,
    data_year: u16,
    data_month: u8,
    malformed: bool,
    output_path: String
}

impl GeneratorConfig {
    fn from_args() -> Self {
        let args: Vec<String> = env::args().collect();
        let num_records = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(1_000_000);
        let data_year = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(2023);
        let data_month = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(1);
        let malformed = args.get(4).is_some_and(|s| s == "--malformed");

        Self {
            num_records,
            data_year,
            data_month,
            malformed,
            output_path: format!("samples/billing-{data_year}-{data_month:02}-generated.csv")
        }
    }
}

fn main() -> io::Result<()> {
    let config = GeneratorConfig::from_args();

    println!(
        "Generating {} billing records for {}-{:02} in {}...",
        config.num_records, config.data_year, config.data_month, config.output_path
    );

    if let Some(parent) = Path::new(&config.output_path).parent() {
        create_dir_all(parent)?;
    }

    let file = File::create(&config.output_path)?;
    let mut writer = BufWriter::new(file);
    let mut rng = rand::thread_rng();
    let mut malformed_count = 0usize;

    for index in 0..config.num_records {
        let account_id = 100_000_000 + index;
        let phone_number = format!(
            "{:03}-{:03}-{:04}",
            rng.gen_range(200..1000),
            rng.gen_range(200..1000),
            rng.gen_range(0..10_000)
        );

        if config.malformed && rng.gen_bool(PROBABILITY_MALFORMED) {
            malformed_count += 1;
            writeln!(writer, "{},{},{},{}", config.data_year, config.data_month, account_id, phone_number)?;
            continue;
        }

        let data_usage: f64 = rng.gen_range(0.0..5_000.0);
        let call_duration: f64 = rng.gen_range(0.0..600.0);
        let sms_count: u32 = rng.gen_range(0..250);

        writeln!(
            writer,
            "{},{},{},{},{:.2},{:.2},{}",
            config.data_year, config.data_month, account_id, phone_number, data_usage, call_duration, sms_count
        )?;
    }

    writer.flush()?;

    println!("Done. {} malformed line(s) written.", malformed_count);

    Ok(())
}
