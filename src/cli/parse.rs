use std::process;

use clap::Parser;
use serde_json::json;
use tracing::instrument;
use tyrespec::{OeFitment, TyreSpec};

use super::terminal::Colorize;

#[derive(Debug, Parser)]
#[command(about = "Extract structured fields from a tyre description")]
pub struct Parse {
    /// The raw description text, e.g. "225/45R17 91W *MO*"
    description: String,

    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "pretty")]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Pretty,
    Json,
}

impl Parse {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self) -> anyhow::Result<()> {
        let Some(spec) = tyrespec::extract(&self.description) else {
            eprintln!(
                "{}",
                "No tyre size found: descriptions must start with e.g. 225/45R17".warning()
            );
            process::exit(2);
        };

        match self.output {
            OutputFormat::Pretty => Self::output_pretty(&spec),
            OutputFormat::Json => Self::output_json(&spec)?,
        }

        Ok(())
    }

    fn output_pretty(spec: &TyreSpec) {
        println!("{}", "Size".dim());
        println!("  Width:        {}", spec.width());
        println!("  Profile:      {}", spec.profile());
        println!("  Diameter:     {}", spec.diameter());
        println!("  Construction: {}", spec.size().construction());

        println!("\n{}", "Ratings".dim());
        println!(
            "  Load index:   {}",
            spec.load_index()
                .map_or_else(String::new, |load| load.to_string())
        );
        println!(
            "  Speed rating: {}",
            spec.speed_rating()
                .map_or_else(String::new, |speed| speed.to_string())
        );

        println!("\n{}", "Derived".dim());
        println!("  Pattern:    {}", spec.pattern_code().unwrap_or_default());
        println!(
            "  OE fitment: {}",
            spec.oe_fitment().map_or("", OeFitment::as_str)
        );
    }

    fn output_json(spec: &TyreSpec) -> anyhow::Result<()> {
        let output = json!({
            "width": spec.width(),
            "profile": spec.profile(),
            "diameter": spec.diameter(),
            "speed_rating": spec.speed_rating().map_or_else(String::new, |speed| speed.to_string()),
            "load_index": spec.load_index().map_or_else(String::new, |load| load.to_string()),
            "pattern": spec.pattern_code().unwrap_or_default(),
            "oe_fitment": spec.oe_fitment().map_or("", OeFitment::as_str),
        });

        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }
}
