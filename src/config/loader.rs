//! Key/value CSV loader for pension parameters
//!
//! The file carries `parameter,value` rows; keys not present keep their
//! defaults, unknown keys are ignored so parameter files can carry extra
//! annotations.

use std::collections::HashMap;
use std::error::Error;
use std::path::Path;

use super::PensionParameters;

/// Load a parameter set from a key/value CSV file, applied over the defaults.
pub fn load_parameters<P: AsRef<Path>>(path: P) -> Result<PensionParameters, Box<dyn Error>> {
    let file = std::fs::File::open(path)?;
    load_parameters_from_reader(file)
}

/// Load a parameter set from any reader.
pub fn load_parameters_from_reader<R: std::io::Read>(
    reader: R,
) -> Result<PensionParameters, Box<dyn Error>> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let mut values: HashMap<String, f64> = HashMap::new();
    for result in csv_reader.records() {
        let record = result?;
        let key = record[0].to_string();
        let value: f64 = record[1].parse()?;
        values.insert(key, value);
    }

    let mut params = PensionParameters::default();
    if let Some(&v) = values.get("validity_year") {
        params.validity_year = v as i32;
    }
    if let Some(&v) = values.get("average_annual_wage") {
        params.average_annual_wage = v;
    }
    if let Some(&v) = values.get("pension_point_value") {
        params.pension_point_value = v;
    }
    if let Some(&v) = values.get("contribution_ceiling_annual") {
        params.contribution_ceiling_annual = v;
    }
    if let Some(&v) = values.get("tax_free_allowance_annual") {
        params.tax_free_allowance_annual = v;
    }
    if let Some(&v) = values.get("taxable_share") {
        params.taxable_share = v;
    }
    if let Some(&v) = values.get("average_tax_rate") {
        params.average_tax_rate = v;
    }
    if let Some(&v) = values.get("health_insurance_rate") {
        params.health_insurance_rate = v;
    }
    if let Some(&v) = values.get("health_insurance_extra_rate") {
        params.health_insurance_extra_rate = v;
    }
    if let Some(&v) = values.get("long_term_care_rate") {
        params.long_term_care_rate = v;
    }

    check_ranges(&params)?;
    Ok(params)
}

/// Rates must be fractions in [0, 1]; monetary amounts must be non-negative.
fn check_ranges(params: &PensionParameters) -> Result<(), Box<dyn Error>> {
    let rates = [
        ("taxable_share", params.taxable_share),
        ("average_tax_rate", params.average_tax_rate),
        ("health_insurance_rate", params.health_insurance_rate),
        ("health_insurance_extra_rate", params.health_insurance_extra_rate),
        ("long_term_care_rate", params.long_term_care_rate),
    ];
    for (name, rate) in rates {
        if !(0.0..=1.0).contains(&rate) {
            return Err(format!("{} must be a fraction in [0, 1], got {}", name, rate).into());
        }
    }

    let amounts = [
        ("average_annual_wage", params.average_annual_wage),
        ("pension_point_value", params.pension_point_value),
        ("contribution_ceiling_annual", params.contribution_ceiling_annual),
        ("tax_free_allowance_annual", params.tax_free_allowance_annual),
    ];
    for (name, amount) in amounts {
        if amount < 0.0 {
            return Err(format!("{} must not be negative, got {}", name, amount).into());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_applied_over_defaults() {
        let csv = "\
parameter,value
validity_year,2026
pension_point_value,41.50
health_insurance_extra_rate,0.017
";
        let params = load_parameters_from_reader(csv.as_bytes()).expect("load failed");
        assert_eq!(params.validity_year, 2026);
        assert_eq!(params.pension_point_value, 41.50);
        assert_eq!(params.health_insurance_extra_rate, 0.017);
        // Untouched keys keep their defaults
        assert_eq!(params.average_annual_wage, 50_493.0);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let csv = "\
parameter,value
comment_code,42
pension_point_value,39.0
";
        let params = load_parameters_from_reader(csv.as_bytes()).expect("load failed");
        assert_eq!(params.pension_point_value, 39.0);
    }

    #[test]
    fn test_rate_out_of_range_rejected() {
        let csv = "\
parameter,value
average_tax_rate,1.5
";
        assert!(load_parameters_from_reader(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_negative_amount_rejected() {
        let csv = "\
parameter,value
contribution_ceiling_annual,-1
";
        assert!(load_parameters_from_reader(csv.as_bytes()).is_err());
    }
}
