//! CSV dataset parsing for the company catalog.
//!
//! The dataset file starts with a human-readable title line; the real
//! column headers are on the second line.

use scout_core::error::CatalogError;
use serde::Deserialize;

/// One row of the company dataset CSV, with the original column names.
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetRecord {
    #[serde(rename = "Company Name", default)]
    pub company_name: String,

    #[serde(rename = "Company ID", default)]
    pub company_id: String,

    #[serde(rename = "City", default)]
    pub city: String,

    #[serde(rename = "Description", default)]
    pub description: String,

    #[serde(rename = "Website URL", default)]
    pub website_url: String,

    #[serde(rename = "Website Text", default)]
    pub website_text: String,
}

impl DatasetRecord {
    /// Parse the numeric company identifier.
    ///
    /// The source data mixes numeric identifiers with placeholder text,
    /// so anything that is not purely digits maps to `None`.
    pub fn parsed_company_id(&self) -> Option<i64> {
        if !self.company_id.is_empty() && self.company_id.chars().all(|c| c.is_ascii_digit()) {
            self.company_id.parse().ok()
        } else {
            None
        }
    }
}

/// Parse dataset records from raw CSV text, skipping the title line.
pub fn parse_dataset(content: &str) -> Result<Vec<DatasetRecord>, CatalogError> {
    let body = match content.split_once('\n') {
        Some((_, rest)) => rest,
        None => "",
    };

    let mut reader = csv::Reader::from_reader(body.as_bytes());
    let mut records = Vec::new();
    for result in reader.deserialize() {
        let record: DatasetRecord =
            result.map_err(|e| CatalogError::SeedFailed(format!("CSV parse: {e}")))?;
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
B2B SaaS Companies 2021-2022
Company Name,Company ID,City,Description,Website URL,Website Text
Acme Analytics,101,Boston,Data analytics for retailers,https://acme.example,We crunch numbers
Globex,not-a-number,,CRM tooling,https://globex.example,Sales pipelines
";

    #[test]
    fn skips_title_line_and_parses_rows() {
        let records = parse_dataset(SAMPLE).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].company_name, "Acme Analytics");
        assert_eq!(records[0].city, "Boston");
        assert_eq!(records[1].company_name, "Globex");
        assert_eq!(records[1].city, "");
    }

    #[test]
    fn company_id_requires_all_digits() {
        let records = parse_dataset(SAMPLE).unwrap();
        assert_eq!(records[0].parsed_company_id(), Some(101));
        assert_eq!(records[1].parsed_company_id(), None);
    }

    #[test]
    fn empty_input_yields_no_records() {
        assert!(parse_dataset("").unwrap().is_empty());
        assert!(parse_dataset("Title only\n").unwrap().is_empty());
    }

    #[test]
    fn quoted_fields_with_commas() {
        let content = "\
Title
Company Name,Company ID,City,Description,Website URL,Website Text
\"Foo, Inc\",7,\"New York\",\"Makes things, sells things\",https://foo.example,text
";
        let records = parse_dataset(content).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].company_name, "Foo, Inc");
        assert_eq!(records[0].description, "Makes things, sells things");
    }
}
