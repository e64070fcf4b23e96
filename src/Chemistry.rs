/// error types of parsing, weight lookup, balancing and configuration loading
pub mod chem_errors;
/// Read-only element table: symbol -> (atomic number, name, atomic mass).
/// The built-in table holds the standard atomic weights; custom tables are loaded from JSON
/// ```
/// use ChemBalance::Chemistry::atomic_weights::{AtomicMasses, AtomicWeightTable};
/// let table = AtomicWeightTable::standard();
/// assert_eq!(table.get("Fe").unwrap().atomic_number, 26);
/// assert_eq!(table.atomic_mass("O"), Some(15.999));
/// ```
pub mod atomic_weights;
/// Module to calculate the atomic composition and molecular weight of a chemical formula
///
///  # Examples
/// ```
/// use ChemBalance::Chemistry::atomic_weights::AtomicWeightTable;
/// use ChemBalance::Chemistry::molmass::{atoms_in, molecular_weight};
/// let composition = atoms_in("Na(NO3)2").unwrap();
/// assert_eq!(composition.get("O"), 6);
/// let weight = molecular_weight("H2SO4", AtomicWeightTable::standard()).unwrap();
/// println!("Molar mass: {:?} g/mol", weight);
/// ```
pub mod molmass;
/// splitting of `A+B=C+D` into reagent and product formulas
pub mod equation;
/// Balancing of chemical equations through the null space of the composition matrix.
///  # Examples
/// ```
/// use ChemBalance::Chemistry::balancer::{balance, balance_coefficients};
/// assert_eq!(balance("Fe+Cl2=FeCl3").unwrap(), "2Fe+3Cl2=2FeCl3");
/// let balanced = balance_coefficients("CH4+O2=CO2+H2O").unwrap();
/// assert_eq!(balanced.coefficients(), vec![1, 2, 1, 2]);
/// ```
pub mod balancer;
#[cfg(test)]
mod balancer_tests;
