use crate::Chemistry::atomic_weights::AtomicWeightTable;
use crate::Chemistry::balancer::balance;
use crate::Chemistry::chem_errors::ChemError;
use crate::Chemistry::molmass::Compound;
use crate::settings::{BalancerSettings, TableFormat};
use prettytable::format::consts::FORMAT_CLEAN;
use prettytable::{Cell, Row, Table};
use std::io::{self, BufRead, Write};

/// element / count / atomic mass / contribution rows plus a total row
pub fn composition_table(
    compound: &Compound,
    weights: &AtomicWeightTable,
    format: TableFormat,
) -> Result<Table, ChemError> {
    let mut table = Table::new();
    if format == TableFormat::Plain {
        table.set_format(*FORMAT_CLEAN);
    }
    table.add_row(Row::new(vec![
        Cell::new("Element"),
        Cell::new("Atoms"),
        Cell::new("Atomic mass"),
        Cell::new("Contribution"),
    ]));
    for symbol in compound.elements() {
        let element = weights
            .get(symbol)
            .ok_or_else(|| ChemError::UnknownElement(symbol.to_string()))?;
        let count = compound.count(symbol);
        table.add_row(Row::new(vec![
            Cell::new(&format!("{} ({})", symbol, element.name)),
            Cell::new(&count.to_string()),
            Cell::new(&format!("{:.4}", element.atomic_mass)),
            Cell::new(&format!("{:.4}", element.atomic_mass * count as f64)),
        ]));
    }
    let total = compound.molecular_weight(weights)?;
    table.add_row(Row::new(vec![
        Cell::new(compound.formula()),
        Cell::new(&compound.composition().total_atoms().to_string()),
        Cell::new(""),
        Cell::new(&format!("{:.4}", total)),
    ]));
    Ok(table)
}

fn composition_menu(settings: &BalancerSettings, weights: &AtomicWeightTable, input: &mut impl BufRead) {
    let Some(formula) = prompt(input, "Enter formula: ") else {
        return;
    };
    let formula = formula.trim();
    let result = Compound::new(formula)
        .and_then(|compound| composition_table(&compound, weights, settings.table_format));
    match result {
        Ok(table) => {
            table.printstd();
        }
        Err(e) => println!("\x1b[31m{}\x1b[0m", e),
    }
}

fn balance_menu(input: &mut impl BufRead) {
    let Some(equation) = prompt(input, "Enter equation (e.g. C2H4+O2=CO2+H2O): ") else {
        return;
    };
    match balance(equation.trim()) {
        Ok(balanced) => println!("\x1b[32m{}\x1b[0m", balanced),
        Err(e) => println!("\x1b[31m{}\x1b[0m", e),
    }
}

pub fn run_interactive_menu(settings: &BalancerSettings, weights: &AtomicWeightTable) {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    loop {
        show_main_menu();
        let Some(choice) = prompt(&mut input, "\x1b[36mEnter your choice: \x1b[0m") else {
            break;
        };

        match choice.trim() {
            "1" => composition_menu(settings, weights, &mut input),
            "2" => balance_menu(&mut input),
            "0" => {
                println!("Goodbye!");
                break;
            }
            _ => println!("Invalid choice. Please try again."),
        }
    }
}

/* colors
Blue (\x1b[34m) - header text
Yellow (\x1b[33m) - menu options
Cyan (\x1b[36m) - prompt
Green (\x1b[32m) / Red (\x1b[31m) - result / error
*/
fn show_main_menu() {
    println!("\x1b[34m\n Chemical formulae and equation balancing \n\x1b[0m");
    println!("\x1b[33m1. Composition and molecular weight of a formula\x1b[0m");
    println!("\x1b[33m2. Balance a chemical equation\x1b[0m");
    println!("\x1b[33m0. Exit\x1b[0m");
}

/// `None` at end of input
fn prompt(input: &mut impl BufRead, message: &str) -> Option<String> {
    print!("{}", message);
    let _ = io::stdout().flush();
    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line),
    }
}
