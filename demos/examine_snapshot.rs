//! Examine saved population snapshots.
//!
//! Pass a snapshot path to inspect it. With no argument, the demo breeds a
//! small population, snapshots it under the temp directory, and examines that.

#![allow(clippy::print_stdout)] // Inspection output goes to stdout

use std::cmp::Ordering;
use std::path::PathBuf;

use gens::population::{load_snapshot, save_snapshot, snapshot_path};
use gens::{
    breed_population, BreederSettings, Instruction, MutatorConfig, Population, RandomMutator,
};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let path = match args.get(1) {
        Some(arg) => PathBuf::from(arg),
        None => demo_snapshot(),
    };

    let population = load_snapshot(&path).expect("failed to load snapshot");

    println!("=== Snapshot: generation {} ===\n", population.generation());
    println!("Robots stored: {}", population.current_size());
    println!("Desired size:  {}", population.desired_size());

    let mut infos = population.robot_infos();
    infos.sort_by(|a, b| b.weight.partial_cmp(&a.weight).unwrap_or(Ordering::Equal));

    println!("\nTop robots by weight:");
    for info in infos.iter().take(5) {
        println!(
            "  robot {:>6}  weight {:>8.3}  outcomes {:>5}  predicting {}",
            info.name, info.weight, info.total_outcomes, info.is_predicting
        );
    }

    let best = infos.first().and_then(|info| population.lookup(info.name));
    if let Some(best) = best {
        println!(
            "\nBest robot program ({} instructions):",
            best.main_program().len()
        );
        for instruction in best.main_program().iter().take(20) {
            println!("  {}", format_instruction(instruction));
        }
        if best.main_program().len() > 20 {
            println!("  ...");
        }
    }
}

/// Breed a small population and snapshot it under the temp directory.
fn demo_snapshot() -> PathBuf {
    let mut population = Population::new(32);
    let mut mutator = RandomMutator::seeded(2024, MutatorConfig::default());
    breed_population(
        &mut population,
        &[],
        &BreederSettings::default(),
        &mut mutator,
    );

    let path = snapshot_path(&std::env::temp_dir(), population.generation());
    save_snapshot(&population, &path).expect("failed to write demo snapshot");
    println!("Wrote demo snapshot to {}\n", path.display());
    path
}

fn format_instruction(instruction: &Instruction) -> String {
    match instruction {
        Instruction::MoveDoubleToRegister { value, register } => {
            format!("reg[{register}] = {value:.3}")
        }
        Instruction::MoveRegisterToRegister {
            source,
            destination,
        } => format!("reg[{destination}] = reg[{source}]"),
        Instruction::SwapRegisters { first, second } => {
            format!("swap reg[{first}], reg[{second}]")
        }
        Instruction::IncrementRegister { register } => format!("reg[{register}] += 1"),
        Instruction::DecrementRegister { register } => format!("reg[{register}] -= 1"),
        Instruction::AddRegisters {
            source,
            destination,
        } => format!("reg[{destination}] += reg[{source}]"),
        Instruction::SubtractRegisters {
            source,
            destination,
        } => format!("reg[{destination}] -= reg[{source}]"),
        Instruction::MultiplyRegisters {
            source,
            destination,
        } => format!("reg[{destination}] *= reg[{source}]"),
        Instruction::DivideRegisters {
            source,
            destination,
        } => format!("reg[{destination}] /= reg[{source}]"),
        Instruction::MoveDataToRegister {
            column,
            offset,
            register,
        } => format!("reg[{register}] = data[{column}][{offset}]"),
        Instruction::ReturnRegister { register } => format!("return reg[{register}]"),
        Instruction::TerminateList => "terminate".to_string(),
    }
}
