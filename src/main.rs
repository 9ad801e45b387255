// Licensed under MIT. See LICENSE for details.

use std::error::Error;
use std::process;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use ropbasis::semantics::is_equivalent;
use ropbasis::{Basis, Formula};

#[derive(Parser)]
#[command(name = "opbasis")]
#[command(about = "Rewrite propositional formulas using a restricted set of connectives")]
#[command(version)]
struct Cli {
    /// Target basis: not-and-or, not-and, nand, implies-not or implies-false
    #[arg(short, long, default_value = "not-and-or")]
    basis: Basis,

    /// Compare truth tables of each formula and its conversion
    #[arg(long)]
    verify: bool,

    /// Formulas such as "((p->q)&~r)"
    #[arg(required = true)]
    formulas: Vec<String>,
}

fn run(cli: &Cli) -> Result<bool, Box<dyn Error>> {
    let mut all_equivalent = true;

    for source in &cli.formulas {
        let formula: Formula = source.parse()?;
        let converted = cli.basis.convert(&formula)?;
        println!("{}", converted);

        if cli.verify {
            if is_equivalent(&formula, &converted)? {
                info!(formula = %source, basis = %cli.basis, "truth tables match");
            } else {
                warn!(formula = %source, basis = %cli.basis, "truth tables differ");
                all_equivalent = false;
            }
        }
    }

    Ok(all_equivalent)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(err) => {
            eprintln!("error: {}", err);
            process::exit(2);
        }
    }
}
