//! Pension Engine CLI
//!
//! Computes a benefit estimate and the standard scenario comparison for one
//! person given on the command line.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};

use pension_engine::config::{self, PensionParameters, RetirementChoice};
use pension_engine::engine::check_retirement_start;
use pension_engine::rules;
use pension_engine::scenario::{best_by_gross, Recommendation, ScenarioGenerator};
use pension_engine::{PensionCalculator, PensionResult, Person, Sex};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SexArg {
    Male,
    Female,
}

impl From<SexArg> for Sex {
    fn from(value: SexArg) -> Self {
        match value {
            SexArg::Male => Sex::Male,
            SexArg::Female => Sex::Female,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "pension_engine", about = "Statutory pension benefit estimate")]
struct Args {
    /// Birth date (YYYY-MM-DD)
    #[arg(long)]
    birth_date: NaiveDate,

    /// Sex, relevant for the historical women's early-retirement rule
    #[arg(long, value_enum, default_value = "male")]
    sex: SexArg,

    /// Current monthly gross income
    #[arg(long)]
    monthly_income: f64,

    /// Pension points accrued so far
    #[arg(long, default_value_t = 0.0)]
    accrued_points: f64,

    /// Occupational pension, monthly
    #[arg(long, default_value_t = 0.0)]
    company_pension: f64,

    /// Private pension, monthly
    #[arg(long, default_value_t = 0.0)]
    private_pension: f64,

    /// Widow/survivor pension, monthly
    #[arg(long)]
    survivor_pension: Option<f64>,

    /// Retirement start overriding the statutory date (YYYY-MM-DD)
    #[arg(long)]
    retirement_date: Option<NaiveDate>,

    /// Parameter CSV overriding the built-in statutory values
    #[arg(long)]
    params: Option<std::path::PathBuf>,

    /// Emit the result and scenarios as JSON instead of the report
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    let mut params = match &args.params {
        Some(path) => config::load_parameters(path)
            .map_err(|e| anyhow::anyhow!("{e}"))
            .with_context(|| format!("loading parameters from {}", path.display()))?,
        None => PensionParameters::default(),
    };
    params.update_for_birth_date(args.birth_date);

    if let Some(start) = args.retirement_date {
        let check = check_retirement_start(start, args.birth_date);
        if !check.is_valid {
            bail!("invalid retirement start: {}", check.warning.unwrap_or_default());
        }
        if let Some(warning) = check.warning {
            log::warn!("{warning}");
        }
        params.retirement_choice = RetirementChoice::Custom(start);
    }

    let mut person = Person::new(
        1,
        args.sex.into(),
        args.birth_date,
        args.monthly_income,
        args.accrued_points,
    );
    person.company_pension = args.company_pension;
    person.private_pension = args.private_pension;
    person.survivor_pension = args.survivor_pension;

    if let Err(error) = person.validate(&params) {
        bail!("invalid input: {error}");
    }

    let calculator = PensionCalculator::new(params.clone());
    let result = calculator.compute_benefit(&person);

    let generator = ScenarioGenerator::new(params);
    let scenarios = generator.generate(&person);

    if args.json {
        let payload = serde_json::json!({
            "result": result,
            "scenarios": scenarios,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!("Pension Engine v0.1.0");
    println!("=====================\n");

    print_report(&person, &result);

    println!("\nScenarios");
    println!("---------");
    for scenario in &scenarios {
        println!(
            "  [{}] {} ({}): gross {:>8.2}, net {:>8.2}, deduction {:>4.1}%",
            tag(scenario.recommendation),
            scenario.name,
            scenario.result.retirement_date,
            scenario.result.combined_gross_benefit,
            scenario.result.estimated_net_benefit,
            scenario.result.deduction_rate * 100.0
        );
    }

    if let Some(best) = best_by_gross(&scenarios) {
        println!("\nHighest gross benefit: {}", best.name);
    }

    Ok(())
}

fn tag(recommendation: Recommendation) -> &'static str {
    match recommendation {
        Recommendation::Favorable => "+",
        Recommendation::Neutral => "o",
        Recommendation::Unfavorable => "-",
    }
}

fn print_report(person: &Person, result: &PensionResult) {
    println!("Person: {}", person.id);
    println!("  Birth date: {}", person.birth_date);
    println!("  Monthly gross income: {:.2}", person.monthly_gross_income);
    println!("  Accrued points: {:.2}", person.accrued_points);
    println!();
    println!("Dates");
    println!("  Statutory retirement date:   {}", result.standard_retirement_date);
    println!("  Earliest deduction-free:     {}", result.earliest_deduction_free_date);
    println!(
        "  Severe-disability start:     {}",
        rules::severe_disability_retirement_date(person.birth_date)
    );
    if let Some(date) = rules::womens_early_retirement_date(person.birth_date, person.sex) {
        println!("  Women's early start:         {}", date);
    }
    println!("  Chosen retirement date:      {}", result.retirement_date);
    if result.months_before_standard_age > 0 {
        println!(
            "  {} months before the statutory date",
            result.months_before_standard_age
        );
    }
    println!();
    println!("Points");
    println!("  Accrued:    {:.4}", result.accrued_points);
    println!("  Projected:  {:.4}", result.projected_points);
    println!("  Total:      {:.4}", result.total_points);
    println!();
    println!("Benefit (monthly)");
    println!("  Theoretical gross:  {:.2}", result.theoretical_gross_benefit);
    if !result.is_deduction_free() {
        println!(
            "  Deduction ({:.1}%):  -{:.2}",
            result.deduction_rate * 100.0,
            result.deduction_amount
        );
    }
    println!("  Gross:              {:.2}", result.gross_benefit);
    if person.has_supplementary_pension() {
        println!("  Supplements:        +{:.2}", result.supplementary_pension);
        println!("  Combined gross:     {:.2}", result.combined_gross_benefit);
    }
    println!("  Social contributions: -{:.2}", result.social_contribution_deduction);
    println!("  Tax:                  -{:.2}", result.tax_deduction);
    println!("  Estimated net:        {:.2}", result.estimated_net_benefit);
}
