//! # Atomic composition and molecular weight of a chemical formula
//!
//! A formula is a sequence of terms. A term is either an element symbol (one uppercase
//! letter, optionally one lowercase letter) followed by an optional count, or a bracketed
//! sub-formula followed by an optional multiplier: `H2SO4`, `CH3(CH2)50CH3`,
//! `K4[Fe(CN)6]`. Missing counts and multipliers mean 1.
//!
//! The tokenizer yields top-level terms only. The text inside a bracket pair is handed
//! back to the same parser, so nesting depth is bounded only by the input.
//!
//! ```
//! use ChemBalance::Chemistry::atomic_weights::AtomicWeightTable;
//! use ChemBalance::Chemistry::molmass::{Compound, atoms_in};
//!
//! let composition = atoms_in("Ca(C2H3O2)2").unwrap();
//! assert_eq!(composition.get("C"), 4);
//! let acetate = Compound::new("Ca(C2H3O2)2").unwrap();
//! let weight = acetate.molecular_weight(AtomicWeightTable::standard()).unwrap();
//! assert!((weight - 158.166).abs() < 1e-2);
//! ```
use crate::Chemistry::atomic_weights::AtomicMasses;
use crate::Chemistry::chem_errors::ChemError;
use log::{debug, warn};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

static ELEMENT_SYMBOL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][a-z]?").expect("element symbol pattern is valid"));

/// element symbol -> number of atoms
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Composition {
    counts: HashMap<String, usize>,
}

impl Composition {
    /// number of atoms of the element, 0 when absent
    pub fn get(&self, symbol: &str) -> usize {
        self.counts.get(symbol).copied().unwrap_or(0)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.counts.contains_key(symbol)
    }

    /// element symbols in alphabetical order
    pub fn elements(&self) -> Vec<&str> {
        let mut elements: Vec<&str> = self.counts.keys().map(|s| s.as_str()).collect();
        elements.sort_unstable();
        elements
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts
            .iter()
            .map(|(symbol, &count)| (symbol.as_str(), count))
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn total_atoms(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn as_map(&self) -> &HashMap<String, usize> {
        &self.counts
    }

    /// `None` on count overflow
    pub(crate) fn add(&mut self, symbol: &str, count: usize) -> Option<()> {
        let entry = self.counts.entry(symbol.to_string()).or_insert(0);
        *entry = entry.checked_add(count)?;
        Some(())
    }

    /// adds `multiplier` times every count of `other`; `None` on count overflow
    pub(crate) fn merge_scaled(&mut self, other: &Composition, multiplier: usize) -> Option<()> {
        for (symbol, &count) in &other.counts {
            self.add(symbol, count.checked_mul(multiplier)?)?;
        }
        Some(())
    }
}

/// one top-level term of a formula; positions are byte offsets within the whole formula
#[derive(Debug, Clone, PartialEq, Eq)]
enum Term<'a> {
    Element {
        symbol: &'a str,
        count: usize,
        position: usize,
    },
    Group {
        inner: &'a str,
        inner_offset: usize,
        multiplier: usize,
        multiplier_position: usize,
    },
}

/// Splits a chain of terms into top-level terms. `formula` is the full formula (used
/// in error reports), `chain` the slice being tokenized and `offset` its position
/// inside `formula`.
struct TermTokenizer<'a> {
    formula: &'a str,
    chain: &'a str,
    offset: usize,
    position: usize,
}

impl<'a> TermTokenizer<'a> {
    fn new(formula: &'a str, chain: &'a str, offset: usize) -> Self {
        Self {
            formula,
            chain,
            offset,
            position: 0,
        }
    }

    fn error(&self, position: usize, reason: impl Into<String>) -> ChemError {
        ChemError::Parse {
            formula: self.formula.to_string(),
            position: self.offset + position,
            reason: reason.into(),
        }
    }

    /// Reads the optional count starting at `start`; returns the count and the position
    /// right after its digits.
    fn count_at(&self, start: usize) -> Result<(usize, usize), ChemError> {
        let digits_len = self.chain[start..]
            .bytes()
            .take_while(u8::is_ascii_digit)
            .count();
        let end = start + digits_len;
        if digits_len == 0 {
            return Ok((1, end));
        }
        let count = self.chain[start..end]
            .parse::<usize>()
            .map_err(|_| self.error(start, "count is too large"))?;
        Ok((count, end))
    }

    /// position of the bracket closing the group opened at `start`
    fn closing_bracket(&self, start: usize) -> Result<usize, ChemError> {
        let mut expected: Vec<char> = Vec::new();
        for (index, c) in self.chain[start..].char_indices() {
            match c {
                '(' => expected.push(')'),
                '[' => expected.push(']'),
                ')' | ']' => {
                    if expected.pop() != Some(c) {
                        return Err(self.error(start + index, format!("mismatched '{}'", c)));
                    }
                    if expected.is_empty() {
                        return Ok(start + index);
                    }
                }
                _ => {}
            }
        }
        Err(self.error(start, "unclosed bracket"))
    }

    fn next_term(&mut self) -> Result<Term<'a>, ChemError> {
        let chain = self.chain;
        let start = self.position;
        let rest = &chain[start..];
        if rest.starts_with('(') || rest.starts_with('[') {
            let close = self.closing_bracket(start)?;
            let (multiplier, end) = self.count_at(close + 1)?;
            self.position = end;
            return Ok(Term::Group {
                inner: &chain[start + 1..close],
                inner_offset: self.offset + start + 1,
                multiplier,
                multiplier_position: self.offset + close + 1,
            });
        }
        if let Some(found) = ELEMENT_SYMBOL.find(rest) {
            let symbol = found.as_str();
            let (count, end) = self.count_at(start + symbol.len())?;
            self.position = end;
            return Ok(Term::Element {
                symbol,
                count,
                position: self.offset + start,
            });
        }
        let reason = match rest.chars().next() {
            Some(c) if c.is_ascii_digit() => "count without a preceding element or group".to_string(),
            Some(c @ (')' | ']')) => format!("unmatched '{}'", c),
            Some(c) => format!("unexpected character '{}'", c),
            None => "unexpected end of formula".to_string(),
        };
        Err(self.error(start, reason))
    }
}

impl<'a> Iterator for TermTokenizer<'a> {
    type Item = Result<Term<'a>, ChemError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.position >= self.chain.len() {
            return None;
        }
        let term = self.next_term();
        if term.is_err() {
            // stop after the first bad token
            self.position = self.chain.len();
        }
        Some(term)
    }
}

fn parse_chain(formula: &str, chain: &str, offset: usize) -> Result<Composition, ChemError> {
    let mut composition = Composition::default();
    let overflow = |position: usize| ChemError::Parse {
        formula: formula.to_string(),
        position,
        reason: "atom count overflow".to_string(),
    };
    for term in TermTokenizer::new(formula, chain, offset) {
        match term? {
            Term::Element {
                symbol,
                count,
                position,
            } => {
                if count == 0 {
                    warn!("element {} has zero count in formula {}", symbol, formula);
                }
                composition
                    .add(symbol, count)
                    .ok_or_else(|| overflow(position))?;
            }
            Term::Group {
                inner,
                inner_offset,
                multiplier,
                multiplier_position,
            } => {
                let group = parse_chain(formula, inner, inner_offset)?;
                composition
                    .merge_scaled(&group, multiplier)
                    .ok_or_else(|| overflow(multiplier_position))?;
            }
        }
    }
    Ok(composition)
}

/// Atomic composition of a formula. An empty formula has an empty composition.
pub fn atoms_in(formula: &str) -> Result<Composition, ChemError> {
    let composition = parse_chain(formula, formula, 0)?;
    debug!("composition of {}: {:?}", formula, composition.as_map());
    Ok(composition)
}

/// a chemical compound: its formula and the atomic composition parsed from it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compound {
    formula: String,
    composition: Composition,
}

impl Compound {
    pub fn new(formula: &str) -> Result<Self, ChemError> {
        Ok(Self {
            formula: formula.to_string(),
            composition: atoms_in(formula)?,
        })
    }

    pub fn formula(&self) -> &str {
        &self.formula
    }

    pub fn composition(&self) -> &Composition {
        &self.composition
    }

    pub fn elements(&self) -> Vec<&str> {
        self.composition.elements()
    }

    /// number of atoms of the element in one formula unit
    pub fn count(&self, symbol: &str) -> usize {
        self.composition.get(symbol)
    }

    /// Σ count × atomic mass; fails on the first element missing from the table
    pub fn molecular_weight<T: AtomicMasses + ?Sized>(&self, table: &T) -> Result<f64, ChemError> {
        let mut weight = 0.0;
        for symbol in self.composition.elements() {
            let mass = table
                .atomic_mass(symbol)
                .ok_or_else(|| ChemError::UnknownElement(symbol.to_string()))?;
            weight += mass * self.composition.get(symbol) as f64;
        }
        Ok(weight)
    }
}

/// molecular weight of a formula
pub fn molecular_weight<T: AtomicMasses + ?Sized>(
    formula: &str,
    table: &T,
) -> Result<f64, ChemError> {
    Compound::new(formula)?.molecular_weight(table)
}

/// molecular weights of several formulas, in input order
pub fn molecular_weights<T: AtomicMasses + ?Sized>(
    formulas: &[&str],
    table: &T,
) -> Result<Vec<f64>, ChemError> {
    formulas
        .iter()
        .map(|formula| molecular_weight(formula, table))
        .collect()
}
