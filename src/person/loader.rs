//! Load person records from CSV files

use std::error::Error;
use std::path::Path;

use chrono::NaiveDate;
use csv::Reader;

use super::{Person, Sex};

/// Raw CSV row matching the person record columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "PersonId")]
    person_id: u64,
    #[serde(rename = "Sex")]
    sex: String,
    #[serde(rename = "BirthDate")]
    birth_date: String,
    #[serde(rename = "MonthlyGrossIncome")]
    monthly_gross_income: f64,
    #[serde(rename = "AccruedPoints")]
    accrued_points: f64,
    #[serde(rename = "CurrentPension", default)]
    current_pension: Option<f64>,
    #[serde(rename = "CompanyPension", default)]
    company_pension: f64,
    #[serde(rename = "PrivatePension", default)]
    private_pension: f64,
    #[serde(rename = "SurvivorPension", default)]
    survivor_pension: Option<f64>,
}

impl CsvRow {
    fn to_person(self) -> Result<Person, Box<dyn Error>> {
        let sex = match self.sex.as_str() {
            "Male" | "M" => Sex::Male,
            "Female" | "F" => Sex::Female,
            other => return Err(format!("Unknown Sex: {}", other).into()),
        };

        let birth_date = NaiveDate::parse_from_str(&self.birth_date, "%Y-%m-%d")?;

        Ok(Person {
            id: self.person_id,
            sex,
            birth_date,
            monthly_gross_income: self.monthly_gross_income,
            accrued_points: self.accrued_points,
            current_pension: self.current_pension,
            company_pension: self.company_pension,
            private_pension: self.private_pension,
            survivor_pension: self.survivor_pension,
        })
    }
}

/// Load all person records from a CSV file
pub fn load_persons<P: AsRef<Path>>(path: P) -> Result<Vec<Person>, Box<dyn Error>> {
    let mut reader = Reader::from_path(path)?;
    load_rows(&mut reader)
}

/// Load person records from any reader (e.g., string buffer)
pub fn load_persons_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<Person>, Box<dyn Error>> {
    let mut csv_reader = Reader::from_reader(reader);
    load_rows(&mut csv_reader)
}

fn load_rows<R: std::io::Read>(reader: &mut Reader<R>) -> Result<Vec<Person>, Box<dyn Error>> {
    let mut persons = Vec::new();
    for result in reader.deserialize() {
        let row: CsvRow = result?;
        persons.push(row.to_person()?);
    }
    Ok(persons)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
PersonId,Sex,BirthDate,MonthlyGrossIncome,AccruedPoints,CurrentPension,CompanyPension,PrivatePension,SurvivorPension
1,Male,1970-01-01,3000,20,,0,0,
2,Female,1962-09-15,4200.5,38.25,,300,150.5,120
";

    #[test]
    fn test_load_persons_from_reader() {
        let persons = load_persons_from_reader(SAMPLE.as_bytes()).expect("parse failed");
        assert_eq!(persons.len(), 2);

        let p1 = &persons[0];
        assert_eq!(p1.id, 1);
        assert_eq!(p1.sex, Sex::Male);
        assert_eq!(p1.birth_date, NaiveDate::from_ymd_opt(1970, 1, 1).unwrap());
        assert_eq!(p1.monthly_gross_income, 3000.0);
        assert_eq!(p1.total_supplementary_pension(), 0.0);

        let p2 = &persons[1];
        assert_eq!(p2.sex, Sex::Female);
        assert_eq!(p2.accrued_points, 38.25);
        assert_eq!(p2.total_supplementary_pension(), 300.0 + 150.5 + 120.0);
    }

    #[test]
    fn test_unknown_sex_rejected() {
        let bad = "\
PersonId,Sex,BirthDate,MonthlyGrossIncome,AccruedPoints,CurrentPension,CompanyPension,PrivatePension,SurvivorPension
1,Other,1970-01-01,3000,20,,0,0,
";
        assert!(load_persons_from_reader(bad.as_bytes()).is_err());
    }
}
