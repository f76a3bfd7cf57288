//! YAML input description of a shell-model calculation.

use anyhow::{self, Context};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::drivers::exact_diagonalisation::{
    ExactDiagonalisationDriver, ExactDiagonalisationParams, ExactDiagonalisationResult,
};
use crate::drivers::ShellModelDriver;
use crate::error::ShellModelError;
use crate::interfaces::InputHandle;
use crate::model_space::{ModelSpace, Orbital};
use crate::operators::{OneBodyOperator, TwoBodyOperator};


/// A single coefficient $`v_{abcd}`$ of a two-body interaction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TwoBodyTerm {
    /// The orbital indices $`(a, b, c, d)`$.
    pub indices: [usize; 4],

    /// The coefficient.
    pub value: f64,
}

/// A single coefficient $`o_{ab}`$ of a one-body operator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OneBodyTerm {
    /// The orbital indices $`(a, b)`$.
    pub indices: [usize; 2],

    /// The coefficient.
    pub value: f64,
}

/// A named one-body observable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObservableInput {
    /// The name under which the observable is reported.
    pub name: String,

    /// The nonzero coefficients. Every permutation required by the intended operator must be
    /// listed explicitly.
    pub terms: Vec<OneBodyTerm>,
}

/// A structure containing shell-model input parameters which can be serialised into and
/// deserialised from YAML.
///
/// Repeated index tuples within one operator are not an error: the last value wins.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShellModelInput {
    /// The orbitals of the model space, in index order.
    pub orbitals: Vec<Orbital>,

    /// The two-body interaction coefficients.
    #[serde(default)]
    pub interaction: Vec<TwoBodyTerm>,

    /// The one-body observables to evaluate in the eigenstates.
    #[serde(default)]
    pub observables: Vec<ObservableInput>,

    /// The parameters of the exact diagonalisation.
    pub exact_diagonalisation: ExactDiagonalisationParams,
}

impl ShellModelInput {
    /// Parses an input description from a YAML string.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, anyhow::Error> {
        serde_yaml::from_str(yaml).context("Unable to parse the shell-model YAML input.")
    }

    /// Serialises the input description into a YAML string.
    pub fn to_yaml_string(&self) -> Result<String, anyhow::Error> {
        serde_yaml::to_string(self).context("Unable to serialise the shell-model input to YAML.")
    }

    /// Constructs the model space from the listed orbitals.
    pub fn model_space(&self) -> Result<ModelSpace, ShellModelError> {
        ModelSpace::from_orbitals(self.orbitals.iter().cloned())
    }

    /// Constructs the two-body interaction from the listed terms.
    pub fn interaction(&self) -> TwoBodyOperator {
        self.interaction
            .iter()
            .map(|term| {
                let [a, b, c, d] = term.indices;
                ((a, b, c, d), term.value)
            })
            .collect()
    }

    /// Constructs the named one-body observables.
    ///
    /// # Errors
    ///
    /// Errors with [`ShellModelError::InvalidConfiguration`] if two observables share a name.
    pub fn observables(&self) -> Result<IndexMap<String, OneBodyOperator>, ShellModelError> {
        let mut observables = IndexMap::with_capacity(self.observables.len());
        for observable in self.observables.iter() {
            let operator = observable
                .terms
                .iter()
                .map(|term| {
                    let [a, b] = term.indices;
                    ((a, b), term.value)
                })
                .collect::<OneBodyOperator>();
            if observables
                .insert(observable.name.clone(), operator)
                .is_some()
            {
                return Err(ShellModelError::InvalidConfiguration(format!(
                    "observable `{}` is specified more than once",
                    observable.name
                )));
            }
        }
        Ok(observables)
    }

    /// Runs the exact-diagonalisation driver on this input and returns its result.
    pub fn run_exact_diagonalisation(&self) -> Result<ExactDiagonalisationResult, anyhow::Error> {
        let model_space = self
            .model_space()
            .context("Unable to construct the model space from the input orbitals.")?;
        let interaction = self.interaction();
        let observables = self
            .observables()
            .context("Unable to construct the observables from the input.")?;
        let mut driver = ExactDiagonalisationDriver::builder()
            .parameters(&self.exact_diagonalisation)
            .model_space(&model_space)
            .interaction(&interaction)
            .observables(Some(&observables))
            .build()
            .context("Unable to construct an exact-diagonalisation driver.")?;
        driver.run()?;
        Ok(driver.result()?.clone())
    }
}

impl Default for ShellModelInput {
    /// The p3/2 toy model: one shell of four magnetic substates holding two particles, with a
    /// pairing-like interaction, a quadrupole-like observable `E2` and a dipole-like
    /// observable `M1`.
    fn default() -> Self {
        let orbitals = [(-3, 0.0), (-1, 0.0), (1, 1.2), (3, 1.2)]
            .into_iter()
            .map(|(two_m, energy)| {
                Orbital::new(&format!("p3/2,m={two_m:+}/2"), 0, 1, 3, two_m, 1, energy)
            })
            .collect();
        let interaction = [
            ([0, 1, 0, 1], -1.0),
            ([1, 0, 1, 0], -1.0),
            ([2, 3, 2, 3], -0.7),
            ([3, 2, 3, 2], -0.7),
            ([0, 3, 1, 2], -0.3),
            ([1, 2, 0, 3], -0.3),
        ]
        .into_iter()
        .map(|(indices, value)| TwoBodyTerm { indices, value })
        .collect();
        let one_body_terms = |terms: &[([usize; 2], f64)]| {
            terms
                .iter()
                .map(|&(indices, value)| OneBodyTerm { indices, value })
                .collect::<Vec<_>>()
        };
        let observables = vec![
            ObservableInput {
                name: "E2".to_string(),
                terms: one_body_terms(&[
                    ([0, 0], 2.25),
                    ([1, 1], 0.25),
                    ([2, 2], 0.25),
                    ([3, 3], 2.25),
                    ([1, 2], 0.4),
                    ([2, 1], 0.4),
                ]),
            },
            ObservableInput {
                name: "M1".to_string(),
                terms: one_body_terms(&[
                    ([0, 0], -1.5),
                    ([1, 1], -0.5),
                    ([2, 2], 0.5),
                    ([3, 3], 1.5),
                    ([0, 3], 0.2),
                    ([3, 0], 0.2),
                ]),
            },
        ];
        ShellModelInput {
            orbitals,
            interaction,
            observables,
            exact_diagonalisation: ExactDiagonalisationParams {
                n_particles: 2,
                jacobi: Default::default(),
                n_reported_states: 10,
                transitions: vec![(1, 0)],
                require_convergence: false,
            },
        }
    }
}

impl InputHandle for ShellModelInput {
    /// Handles the input by running exact diagonalisation. The report is written to the
    /// `shellmodel-output` logger.
    fn handle(&self) -> Result<(), anyhow::Error> {
        self.run_exact_diagonalisation().map(|_| ())
    }
}
