//! Splitting of an equation string `A+B=C+D` into reagent and product formulas.
use crate::Chemistry::chem_errors::ChemError;

/// reagent and product formulas in the order they appear in the equation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitEquation {
    pub reagents: Vec<String>,
    pub products: Vec<String>,
}

impl SplitEquation {
    /// reagents followed by products
    pub fn formulas(&self) -> impl Iterator<Item = &str> {
        self.reagents
            .iter()
            .chain(self.products.iter())
            .map(|s| s.as_str())
    }
}

/// Splits on the single `=`, then each side on `+`. Whitespace around terms is
/// ignored, and a leading integer coefficient (`3O2`) is dropped from every term.
pub fn split(equation: &str) -> Result<SplitEquation, ChemError> {
    let sides: Vec<&str> = equation.split('=').collect();
    if sides.len() != 2 {
        return Err(ChemError::MalformedEquation(format!(
            "expected exactly one '=' in \"{}\", found {}",
            equation,
            sides.len() - 1
        )));
    }
    Ok(SplitEquation {
        reagents: split_side(equation, sides[0])?,
        products: split_side(equation, sides[1])?,
    })
}

fn split_side(equation: &str, side: &str) -> Result<Vec<String>, ChemError> {
    side.split('+')
        .map(|term| {
            let formula = strip_coefficient(term.trim());
            if formula.is_empty() {
                Err(ChemError::MalformedEquation(format!(
                    "empty compound in \"{}\"",
                    equation
                )))
            } else {
                Ok(formula.to_string())
            }
        })
        .collect()
}

fn strip_coefficient(term: &str) -> &str {
    term.trim_start_matches(|c: char| c.is_ascii_digit())
        .trim_start()
}
