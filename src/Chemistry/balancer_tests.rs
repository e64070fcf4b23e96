#[cfg(test)]
mod tests {
    use crate::Chemistry::atomic_weights::AtomicWeightTable;
    use crate::Chemistry::balancer::{
        BalancedEquation, StoichiometryMatrix, balance, balance_coefficients, elements_in,
        extract_coefficients, is_balanced, null_space_rows,
    };
    use crate::Chemistry::chem_errors::ChemError;
    use crate::Chemistry::equation::split;
    use crate::Chemistry::molmass::Compound;
    use crate::Maths::reduced_echelon::{augment_with_identity, reduced_row_echelon_form};
    use crate::cli::cli_main::composition_table;
    use crate::settings::TableFormat;
    use approx::assert_relative_eq;
    use nalgebra::DMatrix;

    fn compounds(formulas: &[&str]) -> Vec<Compound> {
        formulas.iter().map(|f| Compound::new(f).unwrap()).collect()
    }

    fn gcd(a: u64, b: u64) -> u64 {
        if b == 0 { a } else { gcd(b, a % b) }
    }

    const SOLVABLE: [&str; 8] = [
        "C2H4+O2=CO2+H2O",
        "Fe+Cl2=FeCl3",
        "CH4+O2=CO2+H2O",
        "C3H8+O2=CO2+H2O",
        "KMnO4+HCl=KCl+MnCl2+H2O+Cl2",
        "Ca(OH)2+H3PO4=Ca3(PO4)2+H2O",
        "K4[Fe(CN)6]+H2SO4+H2O=K2SO4+FeSO4+(NH4)2SO4+CO",
        "Al+O2=Al2O3",
    ];

    #[test]
    fn test_balance() {
        assert_eq!(balance("C2H4+O2=CO2+H2O").unwrap(), "C2H4+3O2=2CO2+2H2O");
        assert_eq!(balance("Fe+Cl2=FeCl3").unwrap(), "2Fe+3Cl2=2FeCl3");
        assert_eq!(balance("CH4+O2=CO2+H2O").unwrap(), "CH4+2O2=CO2+2H2O");
        assert_eq!(balance("C3H8+O2=CO2+H2O").unwrap(), "C3H8+5O2=3CO2+4H2O");
        assert_eq!(
            balance("KMnO4+HCl=KCl+MnCl2+H2O+Cl2").unwrap(),
            "2KMnO4+16HCl=2KCl+2MnCl2+8H2O+5Cl2"
        );
        assert_eq!(
            balance("Ca(OH)2+H3PO4=Ca3(PO4)2+H2O").unwrap(),
            "3Ca(OH)2+2H3PO4=Ca3(PO4)2+6H2O"
        );
        assert_eq!(balance("Al+O2=Al2O3").unwrap(), "4Al+3O2=2Al2O3");
    }

    #[test]
    fn test_already_balanced_input() {
        assert_eq!(balance("H2+Cl2=HCl").unwrap(), "H2+Cl2=2HCl");
        assert_eq!(balance("2H2+O2=2H2O").unwrap(), "2H2+O2=2H2O");
        assert_eq!(balance(" H2 + O2 = H2O ").unwrap(), "2H2+O2=2H2O");
        // wrong coefficients in the input are recomputed
        assert_eq!(balance("7H2+5O2=H2O").unwrap(), "2H2+O2=2H2O");
    }

    #[test]
    fn test_balance_is_idempotent() {
        for equation in SOLVABLE {
            let once = balance(equation).unwrap();
            let twice = balance(&once).unwrap();
            assert_eq!(once, twice, "{}", equation);
        }
    }

    #[test]
    fn test_coefficients_balance_every_element() {
        for equation in SOLVABLE {
            let balanced = balance_coefficients(equation).unwrap();
            let split_equation = split(equation).unwrap();
            let reagents: Vec<&str> = split_equation.reagents.iter().map(|s| s.as_str()).collect();
            let products: Vec<&str> = split_equation.products.iter().map(|s| s.as_str()).collect();
            let coefficients = balanced.coefficients();

            assert!(
                is_balanced(&compounds(&reagents), &compounds(&products), &coefficients),
                "{}",
                equation
            );
            assert!(coefficients.iter().all(|&c| c > 0), "{}", equation);
            let common = coefficients.iter().fold(0, |acc, &c| gcd(acc, c));
            assert_eq!(common, 1, "{} is not in lowest terms", equation);
        }
    }

    #[test]
    fn test_balance_coefficients() {
        let balanced = balance_coefficients("CH4+O2=CO2+H2O").unwrap();
        assert_eq!(
            balanced,
            BalancedEquation {
                reagents: vec![(1, "CH4".to_string()), (2, "O2".to_string())],
                products: vec![(1, "CO2".to_string()), (2, "H2O".to_string())],
            }
        );
        assert_eq!(balanced.to_string(), "CH4+2O2=CO2+2H2O");

        let balanced =
            balance_coefficients("K4[Fe(CN)6]+H2SO4+H2O=K2SO4+FeSO4+(NH4)2SO4+CO").unwrap();
        assert_eq!(balanced.coefficients(), vec![1, 6, 6, 2, 1, 3, 6]);
    }

    #[test]
    fn test_no_solution() {
        // only the zero vector
        assert_eq!(balance("H2=O2"), Err(ChemError::NoSolution));
        // a reagent would have to be produced
        assert_eq!(balance("H2O+H2=O2"), Err(ChemError::NoSolution));
        // He takes no part in the reaction
        assert_eq!(balance("H2+O2+He=H2O"), Err(ChemError::NoSolution));
    }

    #[test]
    fn test_underdetermined() {
        assert_eq!(
            balance("H2+O2=H2O+H2O2"),
            Err(ChemError::Underdetermined(2))
        );
    }

    #[test]
    fn test_malformed_equations() {
        assert!(matches!(
            balance("H2+O2"),
            Err(ChemError::MalformedEquation(_))
        ));
        assert!(matches!(
            balance("H2=O2=H2O"),
            Err(ChemError::MalformedEquation(_))
        ));
        assert!(matches!(
            balance("H2++O2=H2O"),
            Err(ChemError::MalformedEquation(_))
        ));
        assert!(matches!(
            balance("H2+O2="),
            Err(ChemError::MalformedEquation(_))
        ));
        assert!(matches!(
            balance("H2+o2=H2O"),
            Err(ChemError::Parse { .. })
        ));
    }

    #[test]
    fn test_split() {
        let split_equation = split("2H2 + O2 = 2 H2O").unwrap();
        assert_eq!(split_equation.reagents, vec!["H2", "O2"]);
        assert_eq!(split_equation.products, vec!["H2O"]);
        let formulas: Vec<&str> = split_equation.formulas().collect();
        assert_eq!(formulas, vec!["H2", "O2", "H2O"]);

        let err = split("A=B=C").unwrap_err();
        assert_eq!(
            err.to_string(),
            "malformed equation: expected exactly one '=' in \"A=B=C\", found 2"
        );
    }

    #[test]
    fn test_stoichiometry_matrix() {
        let matrix = StoichiometryMatrix::build(&compounds(&["C2H4", "O2", "CO2", "H2O"]));
        assert_eq!(matrix.elements(), &["C", "H", "O"]);
        assert_eq!(matrix.element_count(), 3);
        assert_eq!(matrix.compound_count(), 4);
        let expected = DMatrix::<usize>::from_row_slice(3, 4, &[2, 0, 1, 0, 4, 0, 0, 2, 0, 2, 2, 1]);
        assert_eq!(matrix.counts(), &expected);

        let as_f64 = matrix.to_f64();
        assert_relative_eq!(as_f64[(1, 0)], 4.0);
        assert_relative_eq!(as_f64[(2, 2)], 2.0);
        assert_eq!(matrix.rational()[(2, 3)], malachite::Rational::from(1));
    }

    #[test]
    fn test_elements_in() {
        let elements = elements_in(&compounds(&["K4[Fe(CN)6]", "H2SO4"]));
        assert_eq!(elements, vec!["C", "Fe", "H", "K", "N", "O", "S"]);
        assert!(elements_in(&[]).is_empty());
    }

    #[test]
    fn test_null_space_extraction() {
        let matrix = StoichiometryMatrix::build(&compounds(&["C2H4", "O2", "CO2", "H2O"]));
        let reduced = reduced_row_echelon_form(&augment_with_identity(&matrix.rational().transpose()));
        assert_eq!(reduced.shape(), (4, 7));
        assert_eq!(null_space_rows(&reduced, 3).len(), 1);
        assert_eq!(extract_coefficients(&reduced, 3, 2).unwrap(), vec![1, 3, 2, 2]);
        // the same vector cannot be split as three reagents and one product
        assert_eq!(extract_coefficients(&reduced, 3, 3), Err(ChemError::NoSolution));
    }

    #[test]
    fn test_is_balanced() {
        let reagents = compounds(&["H2", "O2"]);
        let products = compounds(&["H2O"]);
        assert!(is_balanced(&reagents, &products, &[2, 1, 2]));
        assert!(!is_balanced(&reagents, &products, &[1, 1, 1]));
        assert!(!is_balanced(&reagents, &products, &[2, 1]));
    }

    #[test]
    fn test_composition_table() {
        let compound = Compound::new("H2O").unwrap();
        let table =
            composition_table(&compound, AtomicWeightTable::standard(), TableFormat::Plain).unwrap();
        // header, two elements, total
        assert_eq!(table.len(), 4);
        let rendered = table.to_string();
        assert!(rendered.contains("H (hydrogen)"));
        assert!(rendered.contains("18.0150"));

        let unknown = Compound::new("Xx2").unwrap();
        assert_eq!(
            composition_table(&unknown, AtomicWeightTable::standard(), TableFormat::Box)
                .unwrap_err(),
            ChemError::UnknownElement("Xx".to_string())
        );
    }
}
