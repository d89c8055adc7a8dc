use std::{path::PathBuf, process};

use anyhow::Context;
use clap::Parser;
use indicatif::ProgressBar;
use rayon::prelude::*;
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;
use tyrespec::{OeFitment, TyreSpec};

use super::terminal::{self, Colorize};

/// Compared fields, in report order.
const FIELDS: [&str; 7] = [
    "width",
    "profile",
    "diameter",
    "speed_rating",
    "load_index",
    "pattern",
    "oe_fitment",
];

/// Mismatching records shown in full before the report is summarised.
const MAX_DETAIL: usize = 10;

#[derive(Debug, Parser)]
#[command(about = "Run the extractor against a catalogue export and report accuracy")]
pub struct Check {
    /// Path to a CSV export with description and expected field columns
    #[arg(long, value_name = "PATH")]
    file: PathBuf,

    /// Check only the first N records
    #[arg(long, value_name = "N")]
    limit: Option<usize>,

    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,

    /// Suppress all output except errors
    #[arg(long, short)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
    Summary,
}

/// One row of the catalogue export: the raw description plus the catalogued
/// values each extracted field is compared against.
#[derive(Debug, Deserialize)]
struct CheckRecord {
    description: String,
    #[serde(default)]
    width: String,
    #[serde(default)]
    profile: String,
    #[serde(default)]
    diameter: String,
    #[serde(default)]
    speed_rating: String,
    #[serde(default)]
    load_index: String,
    #[serde(default)]
    pattern: String,
    #[serde(default)]
    oe_fitment: String,
}

#[derive(Debug)]
struct RecordOutcome {
    description: String,
    extracted: bool,
    mismatches: Vec<FieldMismatch>,
}

impl RecordOutcome {
    fn is_clean(&self) -> bool {
        self.extracted && self.mismatches.is_empty()
    }
}

#[derive(Debug)]
struct FieldMismatch {
    field: &'static str,
    extracted: String,
    expected: String,
}

#[derive(Debug)]
struct Report {
    records: usize,
    extracted: usize,
    field_matches: [usize; FIELDS.len()],
}

impl Report {
    fn tally(outcomes: &[RecordOutcome]) -> Self {
        let extracted = outcomes.iter().filter(|outcome| outcome.extracted).count();
        let mut field_matches = [0; FIELDS.len()];
        for (slot, field) in field_matches.iter_mut().zip(FIELDS) {
            *slot = outcomes
                .iter()
                .filter(|outcome| {
                    outcome.extracted
                        && !outcome.mismatches.iter().any(|mismatch| mismatch.field == field)
                })
                .count();
        }
        Self {
            records: outcomes.len(),
            extracted,
            field_matches,
        }
    }

    const fn failed_extractions(&self) -> usize {
        self.records - self.extracted
    }

    fn matches(&self) -> usize {
        self.field_matches.iter().sum()
    }

    const fn comparisons(&self) -> usize {
        self.extracted * FIELDS.len()
    }

    fn is_clean(&self) -> bool {
        self.failed_extractions() == 0 && self.matches() == self.comparisons()
    }

    fn accuracy(&self) -> f64 {
        percentage(self.matches(), self.comparisons())
    }
}

impl Check {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self) -> anyhow::Result<()> {
        let records = self.read_records()?;
        if records.is_empty() {
            anyhow::bail!("No records found in {}", self.file.display());
        }

        let progress = if self.quiet {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(records.len() as u64)
        };
        let outcomes: Vec<RecordOutcome> = records
            .par_iter()
            .map(|record| {
                let outcome = check_record(record);
                progress.inc(1);
                outcome
            })
            .collect();
        progress.finish_and_clear();

        let report = Report::tally(&outcomes);
        match self.output {
            OutputFormat::Table => self.output_table(&report, &outcomes),
            OutputFormat::Json => Self::output_json(&report)?,
            OutputFormat::Summary => Self::output_summary(&report),
        }

        if !report.is_clean() {
            process::exit(2);
        }

        Ok(())
    }

    fn read_records(&self) -> anyhow::Result<Vec<CheckRecord>> {
        let mut reader = csv::Reader::from_path(&self.file)
            .with_context(|| format!("Failed to open {}", self.file.display()))?;

        let mut records = Vec::new();
        for row in reader.deserialize() {
            let record: CheckRecord = row.context("Malformed CSV record")?;
            // Rows without a description have nothing to check.
            if record.description.trim().is_empty() {
                continue;
            }
            records.push(record);
            if self.limit.is_some_and(|limit| records.len() == limit) {
                break;
            }
        }
        Ok(records)
    }

    fn output_table(&self, report: &Report, outcomes: &[RecordOutcome]) {
        if self.quiet {
            return;
        }

        println!(
            "Checked {} records from {}\n",
            report.records,
            self.file.display()
        );

        let line_width = usize::from(terminal::width().unwrap_or(80));
        let dirty: Vec<&RecordOutcome> = outcomes
            .iter()
            .filter(|outcome| !outcome.is_clean())
            .collect();
        for outcome in dirty.iter().take(MAX_DETAIL) {
            let description = truncate(&outcome.description, line_width.saturating_sub(2));
            if outcome.extracted {
                println!("{}", format!("✗ {description}").warning());
                for mismatch in &outcome.mismatches {
                    println!(
                        "    {}: extracted '{}' vs expected '{}'",
                        mismatch.field, mismatch.extracted, mismatch.expected
                    );
                }
            } else {
                println!(
                    "{}",
                    format!("✗ {description} — no tyre size recognised").warning()
                );
            }
        }
        if dirty.len() > MAX_DETAIL {
            println!("{}", format!("  … and {} more", dirty.len() - MAX_DETAIL).dim());
        }
        if !dirty.is_empty() {
            println!();
        }

        println!("{}", "Field accuracy".dim());
        for (matches, field) in report.field_matches.iter().zip(FIELDS) {
            let line = format!(
                "  {field:<13} {matches:>4}/{} ({:5.1}%)",
                report.extracted,
                percentage(*matches, report.extracted)
            );
            if *matches == report.extracted {
                println!("{}", line.success());
            } else {
                println!("{}", line.warning());
            }
        }

        if report.failed_extractions() > 0 {
            println!(
                "\n{}",
                format!(
                    "✗ {} records had no recognisable size prefix",
                    report.failed_extractions()
                )
                .warning()
            );
        }

        let summary = format!(
            "Overall accuracy: {}/{} ({:.1}%)",
            report.matches(),
            report.comparisons(),
            report.accuracy()
        );
        if report.is_clean() {
            println!("\n{}", summary.success());
        } else {
            println!("\n{}", summary.warning());
        }
    }

    fn output_json(report: &Report) -> anyhow::Result<()> {
        let fields: serde_json::Map<String, serde_json::Value> = report
            .field_matches
            .iter()
            .zip(FIELDS)
            .map(|(matches, field)| {
                (
                    field.to_string(),
                    json!({
                        "matches": matches,
                        "checked": report.extracted,
                    }),
                )
            })
            .collect();

        let output = json!({
            "status": if report.is_clean() { "clean" } else { "mismatches_found" },
            "records": report.records,
            "failed_extractions": report.failed_extractions(),
            "fields": fields,
            "summary": {
                "matches": report.matches(),
                "comparisons": report.comparisons(),
                "accuracy": report.accuracy(),
            }
        });

        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }

    fn output_summary(report: &Report) {
        println!(
            "accuracy={:.1} mismatches={} failures={}",
            report.accuracy(),
            report.comparisons() - report.matches(),
            report.failed_extractions()
        );
    }
}

fn check_record(record: &CheckRecord) -> RecordOutcome {
    let Some(spec) = tyrespec::extract(&record.description) else {
        return RecordOutcome {
            description: record.description.clone(),
            extracted: false,
            mismatches: Vec::new(),
        };
    };

    let mismatches = field_values(&spec, record)
        .into_iter()
        .filter(|(_, extracted, expected)| normalise(extracted) != normalise(expected))
        .map(|(field, extracted, expected)| FieldMismatch {
            field,
            extracted,
            expected: expected.to_string(),
        })
        .collect();

    RecordOutcome {
        description: record.description.clone(),
        extracted: true,
        mismatches,
    }
}

/// Pairs every extracted field with the catalogued value it is compared to.
fn field_values<'a>(
    spec: &TyreSpec,
    record: &'a CheckRecord,
) -> [(&'static str, String, &'a str); FIELDS.len()] {
    [
        ("width", spec.width().to_string(), record.width.as_str()),
        ("profile", spec.profile().to_string(), record.profile.as_str()),
        (
            "diameter",
            spec.diameter().to_string(),
            record.diameter.as_str(),
        ),
        (
            "speed_rating",
            spec.speed_rating()
                .map_or_else(String::new, |speed| speed.to_string()),
            record.speed_rating.as_str(),
        ),
        (
            "load_index",
            spec.load_index()
                .map_or_else(String::new, |load| load.to_string()),
            record.load_index.as_str(),
        ),
        (
            "pattern",
            spec.pattern_code().unwrap_or_default(),
            record.pattern.as_str(),
        ),
        (
            "oe_fitment",
            spec.oe_fitment().map_or("", OeFitment::as_str).to_string(),
            record.oe_fitment.as_str(),
        ),
    ]
}

/// Comparison is whitespace- and case-insensitive, matching how catalogue
/// exports vary.
fn normalise(value: &str) -> String {
    value.trim().to_uppercase()
}

#[allow(clippy::cast_precision_loss)]
fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 100.0
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{cut}…")
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn record(description: &str, expected: [&str; 7]) -> CheckRecord {
        CheckRecord {
            description: description.to_string(),
            width: expected[0].to_string(),
            profile: expected[1].to_string(),
            diameter: expected[2].to_string(),
            speed_rating: expected[3].to_string(),
            load_index: expected[4].to_string(),
            pattern: expected[5].to_string(),
            oe_fitment: expected[6].to_string(),
        }
    }

    #[test]
    fn matching_record_is_clean() {
        let record = record(
            "225/45R17 91W *MO*",
            ["225", "45", "17", "W", "91", "2254517W", "MO"],
        );
        let outcome = check_record(&record);
        assert!(outcome.is_clean());
    }

    #[test]
    fn comparison_ignores_case_and_whitespace() {
        let record = record(
            "225/45R17 91W *MO*",
            ["225", "45", "17", " w ", "91", "2254517w", "mo"],
        );
        let outcome = check_record(&record);
        assert!(outcome.is_clean());
    }

    #[test]
    fn divergent_field_is_reported() {
        let record = record(
            "225/45R17 91W",
            ["225", "45", "17", "V", "91", "2254517V", ""],
        );
        let outcome = check_record(&record);
        let fields: Vec<&str> = outcome
            .mismatches
            .iter()
            .map(|mismatch| mismatch.field)
            .collect();
        assert_eq!(fields, ["speed_rating", "pattern"]);
    }

    #[test]
    fn unparseable_description_is_a_failed_extraction() {
        let record = record("NOT A TYRE", ["", "", "", "", "", "", ""]);
        let outcome = check_record(&record);
        assert!(!outcome.extracted);
        assert!(outcome.mismatches.is_empty());
    }

    #[test]
    fn tally_counts_per_field() {
        let outcomes = vec![
            check_record(&record(
                "225/45R17 91W",
                ["225", "45", "17", "W", "91", "2254517W", ""],
            )),
            check_record(&record(
                "225/45R17 91W",
                ["225", "45", "17", "V", "91", "2254517V", ""],
            )),
            check_record(&record("NOT A TYRE", ["", "", "", "", "", "", ""])),
        ];
        let report = Report::tally(&outcomes);
        assert_eq!(report.records, 3);
        assert_eq!(report.extracted, 2);
        assert_eq!(report.failed_extractions(), 1);
        // width/profile/diameter/load_index/oe_fitment match twice,
        // speed_rating and pattern only once.
        assert_eq!(report.field_matches, [2, 2, 2, 1, 2, 1, 2]);
        assert!(!report.is_clean());
    }

    #[test]
    fn read_records_skips_blank_descriptions_and_honours_limit() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "description,width,profile,diameter,speed_rating,load_index,pattern,oe_fitment"
        )
        .unwrap();
        writeln!(file, "225/45R17 91W,225,45,17,W,91,2254517W,").unwrap();
        writeln!(file, ",,,,,,,").unwrap();
        writeln!(file, "205/55R16 91V,205,55,16,V,91,2055516V,").unwrap();
        writeln!(file, "195/65R15 91T,195,65,15,T,91,1956515T,").unwrap();
        file.flush().unwrap();

        let check = Check {
            file: file.path().to_path_buf(),
            limit: Some(2),
            output: OutputFormat::Table,
            quiet: true,
        };
        let records = check.read_records().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].description, "225/45R17 91W");
        assert_eq!(records[1].description, "205/55R16 91V");
    }

    #[test]
    fn truncate_preserves_short_text() {
        assert_eq!(truncate("short", 80), "short");
        assert_eq!(truncate("abcdef", 4), "abc…");
    }
}
