// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{bail, Result};
use std::env;

use fiscal_panorama::{answer, FiscalData, GeneratorConfig};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let seed = parse_seed(&args)?;

    if args.len() > 1 && args[1] == "ask" {
        // One-shot question mode
        run_ask(&args, seed)?;
    } else {
        // Dashboard mode (default)
        run_ui_mode(seed)?;
    }

    Ok(())
}

/// Optional `--seed N` anywhere on the command line
fn parse_seed(args: &[String]) -> Result<u64> {
    for (i, arg) in args.iter().enumerate() {
        if arg == "--seed" {
            let Some(value) = args.get(i + 1) else {
                bail!("--seed requires a value");
            };
            return value
                .parse()
                .map_err(|_| anyhow::anyhow!("invalid seed: {}", value));
        }
    }
    Ok(2023)
}

fn run_ask(args: &[String], seed: u64) -> Result<()> {
    // Everything after "ask" is the question, minus the seed flag
    let mut parts = Vec::new();
    let mut skip_next = false;
    for arg in args.iter().skip(2) {
        if skip_next {
            skip_next = false;
            continue;
        }
        if arg == "--seed" {
            skip_next = true;
            continue;
        }
        parts.push(arg.as_str());
    }
    let question = parts.join(" ");

    if question.trim().is_empty() {
        eprintln!("❌ Nenhuma pergunta fornecida!");
        eprintln!("   Uso: fiscal-panorama ask \"Como está a execução orçamentária?\"");
        std::process::exit(1);
    }

    let data = FiscalData::generate(&GeneratorConfig::with_seed(seed));
    println!("{}", answer(&question, &data));

    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode(seed: u64) -> Result<()> {
    println!("🇦🇴 Loading Fiscal Panorama dashboard (seed {})...\n", seed);

    let data = FiscalData::generate(&GeneratorConfig::with_seed(seed));

    println!(
        "✓ Generated {} budget, {} revenue, {} debt, {} indicator records",
        data.budget.len(),
        data.revenue.len(),
        data.debt.len(),
        data.indicators.len()
    );
    println!("Starting UI... (Press 'q' to quit)\n");

    let mut app = ui::App::new(data);
    ui::run_ui(&mut app)?;

    println!("\n✅ UI closed successfully");

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_seed: u64) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or use the API: cargo run --bin fiscal-server --features server");
    std::process::exit(1);
}
