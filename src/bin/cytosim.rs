//! Interactive command-line front end for cytosim.
//!
//! Modes mirror a typical bench workflow: `simulate` draws a fresh table,
//! `visualize` renders the standard 2x2 panel for the last table,
//! `parameters` edits population parameters through the validated registry.

use std::error::Error;
use std::fs::create_dir_all;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cytosim::output::format_run;
use cytosim::plot::render_panel;
use cytosim::{CytometrySimulator, ParamField, SimulationRun};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Total number of events per simulation
    #[arg(long, default_value_t = 10_000)]
    events: usize,

    /// Deterministic seed (omit for a fresh seed per run)
    #[arg(long)]
    seed: Option<u64>,

    /// Directory for rendered plots
    #[arg(long, default_value = "target/plots")]
    out_dir: PathBuf,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let mut simulator = CytometrySimulator::new().total_events(args.events);
    if let Some(seed) = args.seed {
        simulator = simulator.seed(seed);
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut last_run: Option<SimulationRun> = None;

    loop {
        print!("\nChoose action: [simulate/visualize/parameters/quit] ");
        io::stdout().flush()?;
        let Some(line) = lines.next().transpose()? else {
            break;
        };

        match line.trim().to_ascii_lowercase().as_str() {
            "simulate" => {
                let run = simulator.run()?;
                print!("{}", format_run(&run));
                last_run = Some(run);
            }
            "visualize" => {
                let Some(run) = last_run.as_ref() else {
                    println!("{}", "Simulate data first using `simulate`.".yellow());
                    continue;
                };
                print!("Use logarithmic scale? [y/n] ");
                io::stdout().flush()?;
                let log_scale = matches!(
                    lines.next().transpose()?.as_deref().map(str::trim),
                    Some("y") | Some("Y")
                );
                create_dir_all(&args.out_dir)?;
                let path = args.out_dir.join("cytosim_panel.png");
                render_panel(run.dataset(), &path, log_scale)?;
                println!("Saved panel to {}", path.display());
            }
            "parameters" => {
                if let Err(err) = edit_parameters(&mut simulator, &mut lines) {
                    println!("{}", err.to_string().red());
                }
            }
            "quit" | "exit" => break,
            "" => {}
            other => {
                println!(
                    "Invalid option {other:?}. Please choose simulate/visualize/parameters/quit"
                );
            }
        }
    }

    Ok(())
}

/// One pass of the interactive parameter editor.
///
/// Registry validation errors are recoverable: they are reported and the
/// prior value stays in place, so a typo never corrupts the session.
fn edit_parameters(
    simulator: &mut CytometrySimulator,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> Result<(), Box<dyn Error>> {
    let names: Vec<String> = simulator
        .registry_ref()
        .list()
        .iter()
        .map(|p| p.name.clone())
        .collect();
    println!("Available populations: {}", names.join(", "));

    let Some(population) = prompt(lines, "Select population to modify: ")? else {
        return Ok(());
    };
    let spec = match simulator.registry_ref().get(&population) {
        Ok(spec) => spec.clone(),
        Err(err) => {
            println!("{}", err.to_string().red());
            return Ok(());
        }
    };

    println!("Current parameters for {}:", spec.name);
    for field in ParamField::ALL {
        println!("  {:<12} {}", field.name(), spec.get(field));
    }

    let Some(field_input) = prompt(lines, "Field to change: ")? else {
        return Ok(());
    };
    let field: ParamField = match field_input.parse() {
        Ok(field) => field,
        Err(msg) => {
            println!("{}", msg.red());
            return Ok(());
        }
    };

    let Some(value_input) = prompt(lines, "New value: ")? else {
        return Ok(());
    };
    let value: f64 = match value_input.parse() {
        Ok(value) => value,
        Err(_) => {
            println!("{}", format!("Not a number: {value_input:?}").red());
            return Ok(());
        }
    };

    match simulator.registry_mut().update(&population, field, value) {
        Ok(updated) => {
            println!(
                "{} {} of {} is now {}",
                "Updated:".green(),
                field.name(),
                updated.name,
                updated.get(field)
            );
        }
        Err(err) if err.is_recoverable() => {
            println!("{}", err.to_string().red());
        }
        Err(err) => return Err(err.into()),
    }
    Ok(())
}

fn prompt(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    message: &str,
) -> io::Result<Option<String>> {
    print!("{message}");
    io::stdout().flush()?;
    Ok(lines
        .next()
        .transpose()?
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty()))
}
