//! Driver for the exact diagonalisation of a shell-model Hamiltonian and the evaluation of
//! one-body observables in its eigenstates.

use std::fmt;

use anyhow::{self, format_err, Context};
use derive_builder::Builder;
use indexmap::IndexMap;
use itertools::Itertools;
use log;
use serde::{Deserialize, Serialize};

use crate::basis::SlaterBasis;
use crate::diagonalisation::{EigenSystem, JacobiDiagonalisable, JacobiParams};
use crate::drivers::ShellModelDriver;
use crate::error::ShellModelError;
use crate::hamiltonian::HamiltonianBuilder;
use crate::io::format::{
    log_subtitle, log_title, nice_bool, shellmodel_output, shellmodel_warn, write_subtitle,
    ShellModelOutput,
};
use crate::linalg::{max_asymmetry, Vector};
use crate::model_space::ModelSpace;
use crate::observables::{build_one_body_matrix, expectation_value, transition_strength};
use crate::operators::{OneBodyOperator, TwoBodyOperator};


// ==================
// Struct definitions
// ==================

// ----------
// Parameters
// ----------

fn default_n_reported_states() -> usize {
    10
}

fn default_transitions() -> Vec<(usize, usize)> {
    vec![(1, 0)]
}

/// A structure containing control parameters for exact diagonalisation.
#[derive(Clone, Builder, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExactDiagonalisationParams {
    /// The number of particles distributed over the model space.
    pub n_particles: usize,

    /// Control parameters for the Jacobi eigensolver.
    #[builder(default = "JacobiParams::default()")]
    #[serde(default)]
    pub jacobi: JacobiParams,

    /// The number of lowest eigenstates for which energies and expectation values are reported.
    #[builder(default = "10")]
    #[serde(default = "default_n_reported_states")]
    pub n_reported_states: usize,

    /// Pairs `(initial, final)` of eigenstate indices for which transition strengths of every
    /// observable are evaluated. Pairs referring to states beyond the basis dimension are skipped.
    #[builder(default = "vec![(1, 0)]")]
    #[serde(default = "default_transitions")]
    pub transitions: Vec<(usize, usize)>,

    /// Boolean indicating if an unconverged diagonalisation is to be treated as a failure rather
    /// than reported as a best-effort result.
    #[builder(default = "false")]
    #[serde(default)]
    pub require_convergence: bool,
}

impl ExactDiagonalisationParams {
    /// Returns a builder to construct a [`ExactDiagonalisationParams`] structure.
    pub fn builder() -> ExactDiagonalisationParamsBuilder {
        ExactDiagonalisationParamsBuilder::default()
    }
}

impl fmt::Display for ExactDiagonalisationParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Number of particles: {}", self.n_particles)?;
        write!(f, "{}", self.jacobi)?;
        writeln!(
            f,
            "Require converged eigenpairs: {}",
            nice_bool(self.require_convergence)
        )?;
        writeln!(f, "Reported eigenstates: {}", self.n_reported_states)?;
        writeln!(
            f,
            "Transitions (initial → final): {}",
            if self.transitions.is_empty() {
                "none".to_string()
            } else {
                self.transitions
                    .iter()
                    .map(|(i, j)| format!("{i} → {j}"))
                    .join(", ")
            }
        )?;
        Ok(())
    }
}

// ------
// Result
// ------

/// A structure containing the values of one one-body observable in the eigenstates of the
/// Hamiltonian.
#[derive(Clone, Debug)]
pub struct ObservableSummary {
    /// The name of the observable.
    pub name: String,

    /// The expectation values in the reported eigenstates, lowest first.
    pub expectation_values: Vec<f64>,

    /// The transition strengths $`|\braket{f | \hat{O} | i}|^2`$ keyed by `(i, f)`.
    pub transition_strengths: Vec<((usize, usize), f64)>,
}

/// A structure to contain exact-diagonalisation results.
#[derive(Clone, Builder, Debug)]
pub struct ExactDiagonalisationResult {
    /// The control parameters used to obtain this set of results.
    pub parameters: ExactDiagonalisationParams,

    /// The dimension of the many-body determinant basis.
    pub basis_dimension: usize,

    /// The eigenpairs of the many-body Hamiltonian.
    pub eigensystem: EigenSystem,

    /// The observables evaluated in the eigenstates, in the order they were supplied.
    #[builder(default = "vec![]")]
    pub observables: Vec<ObservableSummary>,
}

impl ExactDiagonalisationResult {
    /// Returns a builder to construct a new [`ExactDiagonalisationResult`].
    fn builder() -> ExactDiagonalisationResultBuilder {
        ExactDiagonalisationResultBuilder::default()
    }

    /// Returns the lowest eigenvalue, or `None` for an empty basis.
    pub fn ground_state_energy(&self) -> Option<f64> {
        self.eigensystem.eigenvalues().get(0).copied()
    }

    /// Returns the eigenvalues measured from the lowest one.
    pub fn excitation_energies(&self) -> Vector {
        let ground = self.ground_state_energy().unwrap_or(0.0);
        self.eigensystem.eigenvalues().mapv(|energy| energy - ground)
    }

    /// Returns the summary of the observable called `name`, if it has been evaluated.
    pub fn observable(&self, name: &str) -> Option<&ObservableSummary> {
        self.observables
            .iter()
            .find(|observable| observable.name == name)
    }

    fn n_reported(&self) -> usize {
        self.parameters
            .n_reported_states
            .min(self.eigensystem.eigenvalues().len())
    }
}

impl fmt::Display for ExactDiagonalisationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_subtitle(f, "Energy spectrum")?;
        writeln!(f)?;
        writeln!(f, "Basis dimension: {}", self.basis_dimension)?;
        writeln!(
            f,
            "Jacobi rotations performed: {}",
            self.eigensystem.iterations()
        )?;
        writeln!(
            f,
            "Largest remaining off-diagonal element: {:.3e}",
            self.eigensystem.max_offdiag()
        )?;
        writeln!(f, "Converged: {}", nice_bool(self.eigensystem.converged()))?;
        writeln!(f)?;

        let excitations = self.excitation_energies();
        writeln!(f, "{}", "┈".repeat(40))?;
        writeln!(f, "{:>5} {:>16} {:>16}", "State", "Energy", "Excitation")?;
        writeln!(f, "{}", "┈".repeat(40))?;
        for (k, (energy, excitation)) in self
            .eigensystem
            .eigenvalues()
            .iter()
            .zip(excitations.iter())
            .take(self.n_reported())
            .enumerate()
        {
            writeln!(f, "{k:>5} {energy:>+16.8} {excitation:>+16.8}")?;
        }
        writeln!(f, "{}", "┈".repeat(40))?;
        writeln!(f)?;

        for observable in self.observables.iter() {
            write_subtitle(f, &format!("Observable `{}`", observable.name))?;
            writeln!(f)?;
            writeln!(f, "Expectation values:")?;
            for (k, value) in observable.expectation_values.iter().enumerate() {
                writeln!(f, "  ⟨{k}|O|{k}⟩ = {value:+.8}")?;
            }
            if !observable.transition_strengths.is_empty() {
                writeln!(f, "Transition strengths:")?;
                for ((i, j), strength) in observable.transition_strengths.iter() {
                    writeln!(f, "  |⟨{j}|O|{i}⟩|² = {strength:.8e}")?;
                }
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

// ------
// Driver
// ------

/// A driver for the exact diagonalisation of a shell-model Hamiltonian.
#[derive(Clone, Builder)]
pub struct ExactDiagonalisationDriver<'a> {
    /// The control parameters for exact diagonalisation.
    parameters: &'a ExactDiagonalisationParams,

    /// The model space supplying the orbitals and single-particle energies.
    model_space: &'a ModelSpace,

    /// The two-body interaction.
    interaction: &'a TwoBodyOperator,

    /// Named one-body observables to be evaluated in the eigenstates.
    #[builder(default = "None")]
    observables: Option<&'a IndexMap<String, OneBodyOperator>>,

    /// The result of the exact diagonalisation.
    #[builder(setter(skip), default = "None")]
    result: Option<ExactDiagonalisationResult>,
}

impl<'a> ExactDiagonalisationDriver<'a> {
    /// Returns a builder to construct an [`ExactDiagonalisationDriver`] structure.
    pub fn builder() -> ExactDiagonalisationDriverBuilder<'a> {
        ExactDiagonalisationDriverBuilder::default()
    }

    /// Executes exact diagonalisation.
    fn diagonalise_model(&mut self) -> Result<(), anyhow::Error> {
        log_title("Shell-Model Exact Diagonalisation");
        shellmodel_output!("");
        let params = self.parameters;
        params.log_output_display();
        shellmodel_output!("");

        log_subtitle("Model space");
        shellmodel_output!("");
        self.model_space.log_output_display();
        shellmodel_output!("");

        let basis = SlaterBasis::from_model_space(params.n_particles, self.model_space)
            .with_context(|| {
                format!(
                    "Unable to construct the basis of {}-particle determinants.",
                    params.n_particles
                )
            })?;
        shellmodel_output!("Many-body basis dimension: {}", basis.dimension());
        shellmodel_output!(
            "Stored two-body coefficients: {}",
            self.interaction.len()
        );
        shellmodel_output!("");

        let hmat = HamiltonianBuilder::build(self.model_space, &basis, self.interaction)
            .context("Unable to build the many-body Hamiltonian.")?;
        log::debug!(
            "Largest Hamiltonian asymmetry: {:.3e}",
            max_asymmetry(&hmat.view())
        );

        let eigensystem = hmat
            .diagonalise_jacobi(&params.jacobi)
            .context("Unable to diagonalise the many-body Hamiltonian.")?;
        if !eigensystem.converged() {
            shellmodel_warn!(
                "Jacobi diagonalisation stopped after {} rotation(s) with a largest off-diagonal element of {:.3e}. Eigenpairs are approximate.",
                eigensystem.iterations(),
                eigensystem.max_offdiag()
            );
            if params.require_convergence {
                eigensystem
                    .ensure_converged()
                    .context("Converged eigenpairs have been required.")?;
            }
        }

        let dim = basis.dimension();
        params
            .transitions
            .iter()
            .filter(|&&(i, j)| i.max(j) >= dim)
            .for_each(|(i, j)| {
                shellmodel_warn!(
                    "Transition {i} → {j} skipped: the basis has only {dim} eigenstate(s)."
                );
            });

        let observables = self
            .observables
            .map(|observables| {
                observables
                    .iter()
                    .map(|(name, operator)| {
                        summarise_observable(name, operator, &basis, &eigensystem, params)
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?
            .unwrap_or_default();

        let result = ExactDiagonalisationResult::builder()
            .parameters(params.clone())
            .basis_dimension(dim)
            .eigensystem(eigensystem)
            .observables(observables)
            .build()?;
        result.log_output_display();
        self.result = Some(result);

        Ok(())
    }
}

impl ShellModelDriver for ExactDiagonalisationDriver<'_> {
    type Params = ExactDiagonalisationParams;

    type Outcome = ExactDiagonalisationResult;

    fn result(&self) -> Result<&Self::Outcome, anyhow::Error> {
        self.result
            .as_ref()
            .ok_or_else(|| format_err!("No exact-diagonalisation results found."))
    }

    fn run(&mut self) -> Result<(), anyhow::Error> {
        self.diagonalise_model()
    }
}

// =========
// Functions
// =========

/// Evaluates the expectation values and transition strengths of one observable.
fn summarise_observable(
    name: &str,
    operator: &OneBodyOperator,
    basis: &SlaterBasis,
    eigensystem: &EigenSystem,
    params: &ExactDiagonalisationParams,
) -> Result<ObservableSummary, anyhow::Error> {
    if let Some(max_index) = operator.max_index() {
        if max_index >= basis.n_states() {
            shellmodel_warn!(
                "Observable `{name}` references orbital {max_index}, which lies outside the {}-orbital model space.",
                basis.n_states()
            );
        }
    }
    let omat = build_one_body_matrix(basis, operator);
    let dim = basis.dimension();

    let expectation_values = (0..params.n_reported_states.min(dim))
        .map(|k| {
            let state = eigensystem.eigenvector(k)?;
            expectation_value(&state.view(), &omat.view())
        })
        .collect::<Result<Vec<_>, ShellModelError>>()
        .with_context(|| format!("Unable to evaluate the expectation values of `{name}`."))?;

    let transition_strengths = params
        .transitions
        .iter()
        .filter(|&&(i, j)| i.max(j) < dim)
        .map(|&(i, j)| {
            let initial_state = eigensystem.eigenvector(i)?;
            let final_state = eigensystem.eigenvector(j)?;
            let strength =
                transition_strength(&initial_state.view(), &final_state.view(), &omat.view())?;
            Ok(((i, j), strength))
        })
        .collect::<Result<Vec<_>, ShellModelError>>()
        .with_context(|| format!("Unable to evaluate the transition strengths of `{name}`."))?;

    Ok(ObservableSummary {
        name: name.to_string(),
        expectation_values,
        transition_strengths,
    })
}
