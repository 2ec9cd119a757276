//! Algorithm listing command.

#![allow(clippy::print_literal)] // Table headers use literal strings intentionally

use clap::Args;
use serde::Serialize;
use sortscope_core::Algorithm;

#[derive(Args)]
pub struct AlgorithmsArgs {
    /// Print the list as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct AlgorithmInfo {
    id: &'static str,
    name: &'static str,
    time: &'static str,
    space: &'static str,
}

pub fn run(args: AlgorithmsArgs) -> anyhow::Result<()> {
    let infos: Vec<AlgorithmInfo> = Algorithm::ALL
        .iter()
        .map(|a| AlgorithmInfo {
            id: a.id(),
            name: a.name(),
            time: a.time_complexity(),
            space: a.space_complexity(),
        })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&infos)?);
        return Ok(());
    }

    println!("Available Algorithms");
    println!("====================");
    println!();
    println!("  {:10}  {:16}  {:12}  {}", "ID", "Name", "Time", "Space");
    println!("  {:10}  {:16}  {:12}  {}", "--", "----", "----", "-----");
    for info in &infos {
        println!(
            "  {:10}  {:16}  {:12}  {}",
            info.id, info.name, info.time, info.space
        );
    }
    println!();
    println!("Run one with: sortscope run <ID>");

    Ok(())
}
