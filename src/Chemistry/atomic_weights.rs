//! # Atomic weight table
//!
//! Read-only mapping from element symbol to atomic number, name and standard atomic
//! weight. The built-in table is created once per process and never mutated; custom
//! tables can be loaded from JSON or assembled in memory (mock tables in tests).
//!
//! Consumers take the table through the `AtomicMasses` trait, so anything that can
//! answer "what is the mass of this symbol" can stand in for it.
use crate::Chemistry::chem_errors::ConfigError;
use log::info;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

/// source of atomic masses for molecular weight calculations
pub trait AtomicMasses {
    fn atomic_mass(&self, symbol: &str) -> Option<f64>;
}

// lets a plain map of masses serve as a mock table
impl AtomicMasses for HashMap<String, f64> {
    fn atomic_mass(&self, symbol: &str) -> Option<f64> {
        self.get(symbol).copied()
    }
}

/// data stored for every element of the table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementData {
    pub atomic_number: u32,
    pub name: String,
    pub atomic_mass: f64,
}

// (symbol, atomic number, name, standard atomic weight)
// elements without stable isotopes carry the mass number of their longest-lived isotope
const STANDARD_ELEMENTS: &[(&str, u32, &str, f64)] = &[
    ("H", 1, "hydrogen", 1.008),
    ("He", 2, "helium", 4.0026),
    ("Li", 3, "lithium", 6.94),
    ("Be", 4, "beryllium", 9.0122),
    ("B", 5, "boron", 10.81),
    ("C", 6, "carbon", 12.011),
    ("N", 7, "nitrogen", 14.007),
    ("O", 8, "oxygen", 15.999),
    ("F", 9, "fluorine", 18.998),
    ("Ne", 10, "neon", 20.180),
    ("Na", 11, "sodium", 22.990),
    ("Mg", 12, "magnesium", 24.305),
    ("Al", 13, "aluminium", 26.982),
    ("Si", 14, "silicon", 28.085),
    ("P", 15, "phosphorus", 30.974),
    ("S", 16, "sulfur", 32.06),
    ("Cl", 17, "chlorine", 35.45),
    ("Ar", 18, "argon", 39.948),
    ("K", 19, "potassium", 39.098),
    ("Ca", 20, "calcium", 40.078),
    ("Sc", 21, "scandium", 44.956),
    ("Ti", 22, "titanium", 47.867),
    ("V", 23, "vanadium", 50.942),
    ("Cr", 24, "chromium", 51.996),
    ("Mn", 25, "manganese", 54.938),
    ("Fe", 26, "iron", 55.845),
    ("Co", 27, "cobalt", 58.933),
    ("Ni", 28, "nickel", 58.693),
    ("Cu", 29, "copper", 63.546),
    ("Zn", 30, "zinc", 65.38),
    ("Ga", 31, "gallium", 69.723),
    ("Ge", 32, "germanium", 72.630),
    ("As", 33, "arsenic", 74.922),
    ("Se", 34, "selenium", 78.971),
    ("Br", 35, "bromine", 79.904),
    ("Kr", 36, "krypton", 83.798),
    ("Rb", 37, "rubidium", 85.468),
    ("Sr", 38, "strontium", 87.62),
    ("Y", 39, "yttrium", 88.906),
    ("Zr", 40, "zirconium", 91.224),
    ("Nb", 41, "niobium", 92.906),
    ("Mo", 42, "molybdenum", 95.95),
    ("Tc", 43, "technetium", 98.0),
    ("Ru", 44, "ruthenium", 101.07),
    ("Rh", 45, "rhodium", 102.91),
    ("Pd", 46, "palladium", 106.42),
    ("Ag", 47, "silver", 107.87),
    ("Cd", 48, "cadmium", 112.41),
    ("In", 49, "indium", 114.82),
    ("Sn", 50, "tin", 118.71),
    ("Sb", 51, "antimony", 121.76),
    ("Te", 52, "tellurium", 127.60),
    ("I", 53, "iodine", 126.90),
    ("Xe", 54, "xenon", 131.29),
    ("Cs", 55, "caesium", 132.91),
    ("Ba", 56, "barium", 137.33),
    ("La", 57, "lanthanum", 138.91),
    ("Ce", 58, "cerium", 140.12),
    ("Pr", 59, "praseodymium", 140.91),
    ("Nd", 60, "neodymium", 144.24),
    ("Pm", 61, "promethium", 145.0),
    ("Sm", 62, "samarium", 150.36),
    ("Eu", 63, "europium", 151.96),
    ("Gd", 64, "gadolinium", 157.25),
    ("Tb", 65, "terbium", 158.93),
    ("Dy", 66, "dysprosium", 162.50),
    ("Ho", 67, "holmium", 164.93),
    ("Er", 68, "erbium", 167.26),
    ("Tm", 69, "thulium", 168.93),
    ("Yb", 70, "ytterbium", 173.05),
    ("Lu", 71, "lutetium", 174.97),
    ("Hf", 72, "hafnium", 178.49),
    ("Ta", 73, "tantalum", 180.95),
    ("W", 74, "tungsten", 183.84),
    ("Re", 75, "rhenium", 186.21),
    ("Os", 76, "osmium", 190.23),
    ("Ir", 77, "iridium", 192.22),
    ("Pt", 78, "platinum", 195.08),
    ("Au", 79, "gold", 196.97),
    ("Hg", 80, "mercury", 200.59),
    ("Tl", 81, "thallium", 204.38),
    ("Pb", 82, "lead", 207.2),
    ("Bi", 83, "bismuth", 208.98),
    ("Po", 84, "polonium", 209.0),
    ("At", 85, "astatine", 210.0),
    ("Rn", 86, "radon", 222.0),
    ("Fr", 87, "francium", 223.0),
    ("Ra", 88, "radium", 226.0),
    ("Ac", 89, "actinium", 227.0),
    ("Th", 90, "thorium", 232.04),
    ("Pa", 91, "protactinium", 231.04),
    ("U", 92, "uranium", 238.03),
    ("Np", 93, "neptunium", 237.0),
    ("Pu", 94, "plutonium", 244.0),
];

static STANDARD_TABLE: LazyLock<AtomicWeightTable> = LazyLock::new(|| {
    AtomicWeightTable::from_entries(STANDARD_ELEMENTS.iter().map(
        |&(symbol, atomic_number, name, atomic_mass)| {
            (
                symbol,
                ElementData {
                    atomic_number,
                    name: name.to_string(),
                    atomic_mass,
                },
            )
        },
    ))
});

static SYMBOL_FORM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][a-z]?$").expect("symbol pattern is valid"));

/// element symbol -> (atomic number, name, atomic mass)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AtomicWeightTable {
    elements: HashMap<String, ElementData>,
}

impl AtomicWeightTable {
    /// built-in table of standard atomic weights, shared by the whole process
    pub fn standard() -> &'static AtomicWeightTable {
        &STANDARD_TABLE
    }

    pub fn from_entries<S, I>(entries: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = (S, ElementData)>,
    {
        let elements = entries
            .into_iter()
            .map(|(symbol, data)| (symbol.into(), data))
            .collect();
        Self { elements }
    }

    /// Loads a table from a JSON object keyed by element symbol:
    /// ```json
    /// { "H": { "atomic_number": 1, "name": "hydrogen", "atomic_mass": 1.008 } }
    /// ```
    /// Every symbol must be an uppercase letter optionally followed by a lowercase one,
    /// and every mass must be a positive finite number.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        let table: AtomicWeightTable = serde_json::from_str(&content)?;
        table.validate()?;
        info!(
            "loaded atomic weight table with {} elements from {}",
            table.len(),
            path.as_ref().display()
        );
        Ok(table)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (symbol, data) in &self.elements {
            if !SYMBOL_FORM.is_match(symbol) {
                return Err(ConfigError::InvalidElement {
                    symbol: symbol.clone(),
                    reason: "symbol must be an uppercase letter optionally followed by a lowercase letter".to_string(),
                });
            }
            if !data.atomic_mass.is_finite() || data.atomic_mass <= 0.0 {
                return Err(ConfigError::InvalidElement {
                    symbol: symbol.clone(),
                    reason: format!("atomic mass {} is not a positive number", data.atomic_mass),
                });
            }
        }
        Ok(())
    }

    pub fn get(&self, symbol: &str) -> Option<&ElementData> {
        self.elements.get(symbol)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.elements.contains_key(symbol)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// symbols ordered by atomic number
    pub fn symbols(&self) -> Vec<&str> {
        let mut symbols: Vec<(&str, u32)> = self
            .elements
            .iter()
            .map(|(symbol, data)| (symbol.as_str(), data.atomic_number))
            .collect();
        symbols.sort_by_key(|&(_, atomic_number)| atomic_number);
        symbols.into_iter().map(|(symbol, _)| symbol).collect()
    }
}

impl AtomicMasses for AtomicWeightTable {
    fn atomic_mass(&self, symbol: &str) -> Option<f64> {
        self.elements.get(symbol).map(|data| data.atomic_mass)
    }
}
