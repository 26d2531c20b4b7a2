use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::info;

use penalty_tracker::pseudo;

const OUTPUT: &str = "data/pseudo_penalty.csv";

fn main() -> Result<()> {
    tracing_subscriber::fmt().init();

    let start = NaiveDate::from_ymd_opt(2025, 1, 1).context("invalid start date")?;
    let end = NaiveDate::from_ymd_opt(2025, 12, 31).context("invalid end date")?;

    let mut rng = rand::rng();
    let attempts = pseudo::generate(start, end, 3, &mut rng);

    fs::create_dir_all("data")?;
    pseudo::write_csv(Path::new(OUTPUT), &attempts)?;

    info!("generated {} attempts into {OUTPUT}", attempts.len());
    Ok(())
}
