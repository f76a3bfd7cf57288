use approx::assert_abs_diff_eq;

use crate::basis::determinant::{Determinant, MAX_ORBITALS};
use crate::second_quantisation::{annihilate, apply_one_body, apply_two_body, create};

fn det(indices: &[usize]) -> Determinant {
    Determinant::from_occupied(indices).unwrap()
}

#[test]
fn test_second_quantisation_annihilate() {
    let ket = det(&[0, 2, 3]);
    let (res, phase) = annihilate(&ket, 0).unwrap();
    assert_eq!(res, det(&[2, 3]));
    assert_abs_diff_eq!(phase, 1.0);

    let (res, phase) = annihilate(&ket, 2).unwrap();
    assert_eq!(res, det(&[0, 3]));
    assert_abs_diff_eq!(phase, -1.0);

    let (res, phase) = annihilate(&ket, 3).unwrap();
    assert_eq!(res, det(&[0, 2]));
    assert_abs_diff_eq!(phase, 1.0);

    assert!(annihilate(&ket, 1).is_none());
    assert!(annihilate(&ket, MAX_ORBITALS + 2).is_none());
}

#[test]
fn test_second_quantisation_create() {
    let ket = det(&[0, 2]);
    let (res, phase) = create(&ket, 1).unwrap();
    assert_eq!(res, det(&[0, 1, 2]));
    assert_abs_diff_eq!(phase, -1.0);

    let (res, phase) = create(&ket, 5).unwrap();
    assert_eq!(res, det(&[0, 2, 5]));
    assert_abs_diff_eq!(phase, 1.0);

    assert!(create(&ket, 2).is_none());
    assert!(create(&ket, MAX_ORBITALS).is_none());
}

#[test]
fn test_second_quantisation_number_operator() {
    // a†_p a_p is diagonal with eigenvalue n_p and a trivial phase.
    let ket = det(&[1, 2, 4]);
    for p in 0..6 {
        match apply_one_body(&ket, p, p) {
            Some((res, phase)) => {
                assert!(ket.is_occupied(p));
                assert_eq!(res, ket);
                assert_abs_diff_eq!(phase, 1.0);
            }
            None => assert!(!ket.is_occupied(p)),
        }
    }
}

#[test]
fn test_second_quantisation_anticommutation() {
    // a†_a a†_b = -a†_b a†_a on every state where both are applicable.
    let vacuum_like = det(&[1]);
    let (ab, phase_ab) = create(&vacuum_like, 3)
        .and_then(|(d, p)| create(&d, 0).map(|(d2, p2)| (d2, p * p2)))
        .unwrap();
    let (ba, phase_ba) = create(&vacuum_like, 0)
        .and_then(|(d, p)| create(&d, 3).map(|(d2, p2)| (d2, p * p2)))
        .unwrap();
    assert_eq!(ab, ba);
    assert_abs_diff_eq!(phase_ab, -phase_ba);
}

#[test]
fn test_second_quantisation_one_body_hop() {
    // a†_2 a_0 |0 1⟩ = a†_2 |1⟩ = -|1 2⟩
    let (res, phase) = apply_one_body(&det(&[0, 1]), 2, 0).unwrap();
    assert_eq!(res, det(&[1, 2]));
    assert_abs_diff_eq!(phase, -1.0);

    assert!(apply_one_body(&det(&[0, 1]), 1, 0).is_none());
    assert!(apply_one_body(&det(&[0, 1]), 2, 3).is_none());
}

#[test]
fn test_second_quantisation_two_body_order() {
    let ket = det(&[0, 1]);

    // a_1 |0 1⟩ = -|0⟩, a_0 |0⟩ = |⟩, a†_1 |⟩ = |1⟩, a†_0 |1⟩ = |0 1⟩
    let (res, phase) = apply_two_body(&ket, 0, 1, 0, 1).unwrap();
    assert_eq!(res, ket);
    assert_abs_diff_eq!(phase, -1.0);

    // a_0 |0 1⟩ = |1⟩, a_1 |1⟩ = |⟩, a†_1 |⟩ = |1⟩, a†_0 |1⟩ = |0 1⟩
    let (res, phase) = apply_two_body(&ket, 0, 1, 1, 0).unwrap();
    assert_eq!(res, ket);
    assert_abs_diff_eq!(phase, 1.0);

    // a_1 |0 1⟩ = -|0⟩, a_0 |0⟩ = |⟩, a†_0 |⟩ = |0⟩, a†_1 |0⟩ = -|0 1⟩
    let (res, phase) = apply_two_body(&ket, 1, 0, 0, 1).unwrap();
    assert_eq!(res, ket);
    assert_abs_diff_eq!(phase, 1.0);

    // a_1 |0 1⟩ = -|0⟩, a_0 |0⟩ = |⟩, a†_3 |⟩ = |3⟩, a†_2 |3⟩ = |2 3⟩
    let (res, phase) = apply_two_body(&ket, 2, 3, 0, 1).unwrap();
    assert_eq!(res, det(&[2, 3]));
    assert_abs_diff_eq!(phase, -1.0);

    // a_2 finds orbital 2 empty, and a†_0 cannot occupy orbital 0 twice.
    assert!(apply_two_body(&ket, 2, 3, 0, 2).is_none());
    assert!(apply_two_body(&ket, 0, 0, 0, 1).is_none());
}
