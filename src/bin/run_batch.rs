//! Run benefit estimates for a whole block of person records from CSV
//!
//! Usage: run_batch <persons.csv> [params.csv] [results.json]

use std::fs::File;
use std::io::Write;
use std::time::Instant;

use anyhow::{Context, Result};
use rayon::prelude::*;

use pension_engine::config::{self, PensionParameters};
use pension_engine::person::load_persons;
use pension_engine::{PensionCalculator, PensionResult};

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let persons_path = args.next().context("usage: run_batch <persons.csv> [params.csv] [results.json]")?;
    let params_path = args.next();
    let output_path = args.next();

    let start = Instant::now();
    println!("Loading person records from {persons_path}...");
    let persons = load_persons(&persons_path)
        .map_err(|e| anyhow::anyhow!("{e}"))
        .with_context(|| format!("loading {persons_path}"))?;
    println!("Loaded {} records in {:?}", persons.len(), start.elapsed());

    let base_params = match params_path {
        Some(path) => config::load_parameters(&path)
            .map_err(|e| anyhow::anyhow!("{e}"))
            .with_context(|| format!("loading {path}"))?,
        None => PensionParameters::default(),
    };

    println!("Computing benefits...");
    let compute_start = Instant::now();

    // Each record gets its own parameter copy with its own derived dates;
    // skip records that fail validation rather than aborting the block.
    let results: Vec<(u64, PensionResult)> = persons
        .par_iter()
        .filter_map(|person| {
            let mut params = base_params.clone();
            params.update_for_birth_date(person.birth_date);
            if let Err(error) = person.validate(&params) {
                log::warn!("skipping person {}: {}", person.id, error);
                return None;
            }
            let calculator = PensionCalculator::new(params);
            Some((person.id, calculator.compute_benefit(person)))
        })
        .collect();

    println!(
        "Computed {} of {} records in {:?}\n",
        results.len(),
        persons.len(),
        compute_start.elapsed()
    );

    for (id, result) in &results {
        println!(
            "  person {:>6}: start {}, points {:>8.3}, gross {:>9.2}, net {:>9.2}, deduction {:>4.1}%",
            id,
            result.retirement_date,
            result.total_points,
            result.combined_gross_benefit,
            result.estimated_net_benefit,
            result.deduction_rate * 100.0
        );
    }

    if !results.is_empty() {
        let count = results.len() as f64;
        let total_gross: f64 = results.iter().map(|(_, r)| r.combined_gross_benefit).sum();
        let total_net: f64 = results.iter().map(|(_, r)| r.estimated_net_benefit).sum();
        let with_deduction = results.iter().filter(|(_, r)| !r.is_deduction_free()).count();

        println!("\nAggregates");
        println!("  Average gross: {:.2}", total_gross / count);
        println!("  Average net:   {:.2}", total_net / count);
        println!("  With deduction: {}", with_deduction);
    }

    if let Some(path) = output_path {
        let serializable: Vec<&PensionResult> = results.iter().map(|(_, r)| r).collect();
        let json = serde_json::to_string_pretty(&serializable)?;
        let mut file = File::create(&path).with_context(|| format!("creating {path}"))?;
        file.write_all(json.as_bytes())?;
        println!("\nWrote results to {path}");
    }

    Ok(())
}
