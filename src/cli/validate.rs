use std::process;

use clap::Parser;
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, Parser)]
#[command(about = "Check a description is complete enough for product creation")]
pub struct Validate {
    /// The raw description text
    description: String,

    /// Suppress output; report through the exit status only
    #[arg(long, short)]
    quiet: bool,
}

impl Validate {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self) -> anyhow::Result<()> {
        match tyrespec::validate(&self.description) {
            Ok(()) => {
                if !self.quiet {
                    println!("{}", "✓ Description is valid".success());
                }
                Ok(())
            }
            Err(reason) => {
                if !self.quiet {
                    println!("{}", format!("✗ {reason}").warning());
                }
                process::exit(2);
            }
        }
    }
}
