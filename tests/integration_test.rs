use approx::assert_abs_diff_eq;
use env_logger;
use ndarray::array;

use shellmodel::basis::SlaterBasis;
use shellmodel::diagonalisation::{diagonalise, diagonalise_default};
use shellmodel::hamiltonian::HamiltonianBuilder;
use shellmodel::linalg::max_asymmetry;
use shellmodel::model_space::{ModelSpace, Orbital};
use shellmodel::observables::{build_one_body_matrix, expectation_value, transition_strength};
use shellmodel::operators::{OneBodyOperator, TwoBodyOperator};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_non_interacting_three_levels() {
    init_logger();
    let mut space = ModelSpace::new();
    for energy in [0.0, 1.0, 2.0] {
        space
            .add_orbital(
                Orbital::builder()
                    .label(format!("e={energy}"))
                    .energy(energy)
                    .build()
                    .unwrap(),
            )
            .unwrap();
    }
    let basis = SlaterBasis::new(2, 3).unwrap();
    let hmat = HamiltonianBuilder::build(&space, &basis, &TwoBodyOperator::new()).unwrap();
    let eig = diagonalise_default(&hmat).unwrap();
    assert_abs_diff_eq!(eig.eigenvalues()[0], 1.0, epsilon = 1e-10);
    assert_abs_diff_eq!(*eig.eigenvalues(), array![1.0, 2.0, 3.0], epsilon = 1e-10);
}

#[test]
fn test_p32_toy_model() {
    init_logger();
    let space = ModelSpace::from_orbitals(
        [(-3, 0.0), (-1, 0.0), (1, 1.2), (3, 1.2)]
            .into_iter()
            .map(|(two_m, energy)| Orbital::new("p3/2", 0, 1, 3, two_m, 1, energy)),
    )
    .unwrap();

    let mut interaction = TwoBodyOperator::new();
    interaction.set(0, 1, 0, 1, -1.0);
    interaction.set(1, 0, 1, 0, -1.0);
    interaction.set(2, 3, 2, 3, -0.7);
    interaction.set(3, 2, 3, 2, -0.7);
    interaction.set(0, 3, 1, 2, -0.3);
    interaction.set(1, 2, 0, 3, -0.3);

    let basis = SlaterBasis::from_model_space(2, &space).unwrap();
    assert_eq!(basis.dimension(), 6);

    let hmat = HamiltonianBuilder::build(&space, &basis, &interaction).unwrap();
    assert_eq!(max_asymmetry(&hmat.view()), 0.0);

    let eig = diagonalise(&hmat, 100, 1e-12).unwrap();
    assert!(eig.converged());
    let energies = eig.eigenvalues();
    assert_eq!(energies.len(), 6);
    assert!(energies.to_vec().windows(2).all(|w| w[0] <= w[1]));
    assert_abs_diff_eq!(
        *energies,
        array![0.5, 1.125, 1.2, 1.2, 1.275, 2.75],
        epsilon = 1e-12
    );

    let mut e2 = OneBodyOperator::new();
    for (p, v) in [(0, 2.25), (1, 0.25), (2, 0.25), (3, 2.25)] {
        e2.set(p, p, v);
    }
    e2.set(1, 2, 0.4);
    e2.set(2, 1, 0.4);
    let mut m1 = OneBodyOperator::new();
    for (p, v) in [(0, -1.5), (1, -0.5), (2, 0.5), (3, 1.5)] {
        m1.set(p, p, v);
    }
    m1.set(0, 3, 0.2);
    m1.set(3, 0, 0.2);

    let e2_mat = build_one_body_matrix(&basis, &e2);
    let m1_mat = build_one_body_matrix(&basis, &m1);
    let ground = eig.eigenvector(0).unwrap();
    let excited = eig.eigenvector(1).unwrap();

    let quadrupole = expectation_value(&ground.view(), &e2_mat.view()).unwrap();
    assert!(quadrupole.is_finite());
    assert!(quadrupole >= 0.0);
    assert_abs_diff_eq!(quadrupole, 2.5, epsilon = 1e-12);

    let dipole = expectation_value(&ground.view(), &m1_mat.view()).unwrap();
    assert_abs_diff_eq!(dipole, -2.0, epsilon = 1e-12);

    let be2 = transition_strength(&excited.view(), &ground.view(), &e2_mat.view()).unwrap();
    let bm1 = transition_strength(&excited.view(), &ground.view(), &m1_mat.view()).unwrap();
    assert!(be2.is_finite() && be2 >= 0.0);
    assert!(bm1.is_finite() && bm1 >= 0.0);
    assert_abs_diff_eq!(be2, 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(bm1, 0.0, epsilon = 1e-12);
}
