//! # Balancing of chemical equations
//!
//! The composition matrix M has one row per element (sorted by symbol) and one column
//! per compound, reagents first. A coefficient vector x balances the equation when
//! M·x = 0 with reagent entries of one sign and product entries of the other.
//!
//! The null space of M is read off the reduced row-echelon form of `[Mᵀ | I]`: every
//! row whose element block reduces to zero carries a null-space vector in its identity
//! block. Exactly one such row is required; its entries are cleared of denominators,
//! reduced by their gcd and split by sign into reagent and product coefficients.
//!
//! ```
//! use ChemBalance::Chemistry::balancer::balance;
//! assert_eq!(balance("C2H4+O2=CO2+H2O").unwrap(), "C2H4+3O2=2CO2+2H2O");
//! ```
use crate::Chemistry::chem_errors::ChemError;
use crate::Chemistry::equation::split;
use crate::Chemistry::molmass::Compound;
use crate::Maths::reduced_echelon::{
    augment_with_identity, is_zero_prefix, reduced_row_echelon_form,
};
use log::{debug, info};
use malachite::num::arithmetic::traits::{Gcd, Lcm};
use malachite::num::basic::traits::{One, Zero};
use malachite::{Natural, Rational};
use nalgebra::DMatrix;
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// all element symbols of the compounds, sorted
pub fn elements_in(compounds: &[Compound]) -> Vec<String> {
    let elements: BTreeSet<&str> = compounds
        .iter()
        .flat_map(|compound| compound.composition().iter().map(|(symbol, _)| symbol))
        .collect();
    elements.into_iter().map(|s| s.to_string()).collect()
}

/// element × compound matrix of atom counts
#[derive(Debug, Clone, PartialEq)]
pub struct StoichiometryMatrix {
    elements: Vec<String>,
    counts: DMatrix<usize>,
}

impl StoichiometryMatrix {
    /// Rows follow `elements_in(compounds)`, columns follow `compounds`.
    pub fn build(compounds: &[Compound]) -> Self {
        let elements = elements_in(compounds);
        let counts = DMatrix::from_fn(elements.len(), compounds.len(), |i, j| {
            compounds[j].count(&elements[i])
        });
        Self { elements, counts }
    }

    pub fn elements(&self) -> &[String] {
        &self.elements
    }

    pub fn element_count(&self) -> usize {
        self.counts.nrows()
    }

    pub fn compound_count(&self) -> usize {
        self.counts.ncols()
    }

    pub fn counts(&self) -> &DMatrix<usize> {
        &self.counts
    }

    /// the matrix with exact rational entries
    pub fn rational(&self) -> DMatrix<Rational> {
        self.counts.map(Rational::from)
    }

    pub fn to_f64(&self) -> DMatrix<f64> {
        self.counts.map(|count| count as f64)
    }
}

/// identity blocks of the rows whose first `element_count` entries are zero
pub fn null_space_rows(reduced: &DMatrix<Rational>, element_count: usize) -> Vec<Vec<Rational>> {
    (0..reduced.nrows())
        .filter(|&i| is_zero_prefix(reduced, i, element_count))
        .map(|i| {
            (element_count..reduced.ncols())
                .map(|j| reduced[(i, j)].clone())
                .collect()
        })
        .collect()
}

/// Smallest integer multiple of a rational vector: denominators are cleared with their
/// lcm, then the entries are divided by their gcd. The sign is left as is.
fn integer_multiple(raw: &[Rational]) -> Result<Vec<Rational>, ChemError> {
    let lcm = raw
        .iter()
        .fold(Natural::ONE, |acc, value| acc.lcm(value.denominator_ref()));
    let scale = Rational::from(&lcm);
    let scaled: Vec<Rational> = raw.iter().map(|value| value * &scale).collect();

    let gcd = scaled
        .iter()
        .fold(Natural::ZERO, |acc, value| acc.gcd(value.numerator_ref()));
    if gcd == Natural::ZERO {
        return Err(ChemError::NoSolution);
    }
    let divisor = Rational::from(&gcd);
    Ok(scaled.iter().map(|value| value / &divisor).collect())
}

/// Minimal positive integer coefficients, reagents first, from the reduced `[Mᵀ | I]`.
///
/// The first reagent's entry is taken as positive; reagent entries must then be
/// positive and product entries negative. Zero entries or mixed signs on one side mean
/// the equation cannot be balanced as written.
pub fn extract_coefficients(
    reduced: &DMatrix<Rational>,
    element_count: usize,
    reagent_count: usize,
) -> Result<Vec<u64>, ChemError> {
    let mut rows = null_space_rows(reduced, element_count);
    debug!("null space dimension: {}", rows.len());
    let raw = match rows.len() {
        0 => return Err(ChemError::NoSolution),
        1 => rows.remove(0),
        dimension => return Err(ChemError::Underdetermined(dimension)),
    };

    let mut vector = integer_multiple(&raw)?;
    if vector.first().is_some_and(|first| *first < Rational::ZERO) {
        vector = vector.iter().map(|value| -value).collect();
    }

    let mut coefficients = Vec::with_capacity(vector.len());
    for (index, value) in vector.iter().enumerate() {
        let is_reagent = index < reagent_count;
        if *value == Rational::ZERO || (*value > Rational::ZERO) != is_reagent {
            debug!("sign pattern {:?} does not separate reagents from products", vector);
            return Err(ChemError::NoSolution);
        }
        let magnitude = u64::try_from(value.numerator_ref())
            .map_err(|_| ChemError::CoefficientOverflow(value.to_string()))?;
        coefficients.push(magnitude);
    }
    Ok(coefficients)
}

/// Per element, Σ reagents coefficient × count equals Σ products coefficient × count.
/// `coefficients` holds the reagent coefficients followed by the product ones.
pub fn is_balanced(reagents: &[Compound], products: &[Compound], coefficients: &[u64]) -> bool {
    if coefficients.len() != reagents.len() + products.len() {
        return false;
    }
    let (reagent_coefficients, product_coefficients) = coefficients.split_at(reagents.len());
    side_totals(reagents, reagent_coefficients) == side_totals(products, product_coefficients)
}

/// atoms of every element on one side of the equation
fn side_totals<'a>(compounds: &'a [Compound], coefficients: &[u64]) -> HashMap<&'a str, u128> {
    let mut totals: HashMap<&str, u128> = HashMap::new();
    for (compound, &coefficient) in compounds.iter().zip(coefficients) {
        for (symbol, count) in compound.composition().iter() {
            *totals.entry(symbol).or_insert(0) += coefficient as u128 * count as u128;
        }
    }
    totals.retain(|_, total| *total != 0);
    totals
}

/// a balanced equation: formulas of both sides with their coefficients
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalancedEquation {
    pub reagents: Vec<(u64, String)>,
    pub products: Vec<(u64, String)>,
}

impl BalancedEquation {
    /// reagent coefficients followed by product coefficients
    pub fn coefficients(&self) -> Vec<u64> {
        self.reagents
            .iter()
            .chain(self.products.iter())
            .map(|(coefficient, _)| *coefficient)
            .collect()
    }
}

fn write_side(f: &mut fmt::Formatter<'_>, side: &[(u64, String)]) -> fmt::Result {
    for (index, (coefficient, formula)) in side.iter().enumerate() {
        if index > 0 {
            write!(f, "+")?;
        }
        if *coefficient != 1 {
            write!(f, "{}", coefficient)?;
        }
        write!(f, "{}", formula)?;
    }
    Ok(())
}

impl fmt::Display for BalancedEquation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_side(f, &self.reagents)?;
        write!(f, "=")?;
        write_side(f, &self.products)
    }
}

/// balances the equation and returns formulas with their coefficients
pub fn balance_coefficients(equation: &str) -> Result<BalancedEquation, ChemError> {
    let split_equation = split(equation)?;
    let compounds = split_equation
        .formulas()
        .map(Compound::new)
        .collect::<Result<Vec<_>, _>>()?;
    let reagent_count = split_equation.reagents.len();

    let matrix = StoichiometryMatrix::build(&compounds);
    debug!(
        "composition matrix {}x{} over elements {:?}",
        matrix.element_count(),
        matrix.compound_count(),
        matrix.elements()
    );
    let augmented = augment_with_identity(&matrix.rational().transpose());
    let reduced = reduced_row_echelon_form(&augmented);
    let coefficients = extract_coefficients(&reduced, matrix.element_count(), reagent_count)?;

    let (reagents, products) = compounds.split_at(reagent_count);
    if !is_balanced(reagents, products, &coefficients) {
        return Err(ChemError::NoSolution);
    }

    let (reagent_coefficients, product_coefficients) = coefficients.split_at(reagent_count);
    let pair = |side_coefficients: &[u64], formulas: Vec<String>| -> Vec<(u64, String)> {
        side_coefficients.iter().copied().zip(formulas).collect()
    };
    let balanced = BalancedEquation {
        reagents: pair(reagent_coefficients, split_equation.reagents),
        products: pair(product_coefficients, split_equation.products),
    };
    info!("balanced {} as {}", equation, balanced);
    Ok(balanced)
}

/// `A+B=C+D` with minimal positive integer coefficients prefixed, 1 omitted
pub fn balance(equation: &str) -> Result<String, ChemError> {
    Ok(balance_coefficients(equation)?.to_string())
}
