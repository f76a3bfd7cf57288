use std::collections::HashSet;

use itertools::Itertools;

use crate::basis::{binomial, Determinant, SlaterBasis, MAX_ORBITALS};
use crate::error::ShellModelError;
use crate::model_space::{ModelSpace, Orbital};

#[test]
fn test_basis_dimension_two_in_four() {
    let basis = SlaterBasis::new(2, 4).unwrap();
    assert_eq!(basis.dimension(), 6);
    assert_eq!(basis.n_particles(), 2);
    assert_eq!(basis.n_states(), 4);
}

#[test]
fn test_basis_enumeration_order() {
    let basis = SlaterBasis::new(2, 4).unwrap();
    let occupied = basis
        .determinants()
        .iter()
        .map(|det| det.occupied_orbitals())
        .collect_vec();
    assert_eq!(
        occupied,
        vec![
            vec![0, 1],
            vec![0, 2],
            vec![0, 3],
            vec![1, 2],
            vec![1, 3],
            vec![2, 3],
        ]
    );

    // Lexicographic subset order is not the numerical order of the raw masks: {0, 3} = 0b1001
    // precedes {1, 2} = 0b0110.
    let bits = basis.determinants().iter().map(|det| det.bits()).collect_vec();
    assert_eq!(bits, vec![0b0011, 0b0101, 0b1001, 0b0110, 0b1010, 0b1100]);
}

#[test]
fn test_basis_properties_small_grid() {
    for n_states in 0..=9 {
        for n_particles in 0..=n_states {
            let basis = SlaterBasis::new(n_particles, n_states).unwrap();
            assert_eq!(
                Some(basis.dimension()),
                binomial(n_states, n_particles),
                "C({n_states}, {n_particles})"
            );
            assert!(basis
                .determinants()
                .iter()
                .all(|det| det.n_occupied() == n_particles));
            assert!(basis
                .determinants()
                .iter()
                .all(|det| det.occupied_orbitals().iter().all(|&i| i < n_states)));
            let unique = basis.determinants().iter().collect::<HashSet<_>>();
            assert_eq!(unique.len(), basis.dimension());
            for (i, det) in basis.determinants().iter().enumerate() {
                assert_eq!(basis.index_of(det), Some(i));
                assert_eq!(basis.determinant(i), Some(det));
            }
        }
    }
}

#[test]
fn test_basis_empty_and_full() {
    let basis = SlaterBasis::new(0, 5).unwrap();
    assert_eq!(basis.dimension(), 1);
    assert_eq!(basis.determinants()[0], Determinant::vacuum());

    let basis = SlaterBasis::new(5, 5).unwrap();
    assert_eq!(basis.dimension(), 1);
    assert_eq!(basis.determinants()[0].bits(), 0b11111);

    let basis = SlaterBasis::new(0, 0).unwrap();
    assert_eq!(basis.dimension(), 1);
}

#[test]
fn test_basis_full_width() {
    let basis = SlaterBasis::new(1, MAX_ORBITALS).unwrap();
    assert_eq!(basis.dimension(), MAX_ORBITALS);
    let top = Determinant::from_occupied(&[MAX_ORBITALS - 1]).unwrap();
    assert_eq!(basis.index_of(&top), Some(MAX_ORBITALS - 1));
}

#[test]
fn test_basis_invalid_configurations() {
    assert!(matches!(
        SlaterBasis::new(1, MAX_ORBITALS + 1),
        Err(ShellModelError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        SlaterBasis::new(4, 3),
        Err(ShellModelError::InvalidConfiguration(_))
    ));
}

#[test]
fn test_basis_index_of_foreign_determinant() {
    let basis = SlaterBasis::new(2, 4).unwrap();
    let three_particles = Determinant::from_occupied(&[0, 1, 2]).unwrap();
    assert_eq!(basis.index_of(&three_particles), None);
    let outside = Determinant::from_occupied(&[0, 5]).unwrap();
    assert_eq!(basis.index_of(&outside), None);
}

#[test]
fn test_basis_from_model_space() {
    let space = ModelSpace::from_orbitals(
        (0..3).map(|i| Orbital::builder().energy(f64::from(i)).build().unwrap()),
    )
    .unwrap();
    let basis = SlaterBasis::from_model_space(2, &space).unwrap();
    assert_eq!(basis.dimension(), 3);
}

#[test]
fn test_determinant_bit_queries() {
    let det = Determinant::from_occupied(&[1, 3, 4]).unwrap();
    assert_eq!(det.bits(), 0b11010);
    assert!(det.is_occupied(3));
    assert!(!det.is_occupied(2));
    assert!(!det.is_occupied(MAX_ORBITALS + 3));
    assert_eq!(det.n_occupied(), 3);
    assert_eq!(det.n_occupied_below(0), 0);
    assert_eq!(det.n_occupied_below(3), 1);
    assert_eq!(det.n_occupied_below(4), 2);
    assert_eq!(det.n_occupied_below(MAX_ORBITALS + 1), 3);
    assert_eq!(det.occupation_string(6), "010110");
    assert_eq!(det.to_string(), "|1 3 4⟩");
    assert!(Determinant::from_occupied(&[MAX_ORBITALS]).is_err());
}

#[test]
fn test_binomial() {
    assert_eq!(binomial(4, 2), Some(6));
    assert_eq!(binomial(10, 0), Some(1));
    assert_eq!(binomial(3, 5), Some(0));
    assert_eq!(binomial(20, 10), Some(184_756));
}
