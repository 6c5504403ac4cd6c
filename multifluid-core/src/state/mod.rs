//! Description of a thermodynamic state of a multi-fluid mixture.
//!
//! A state is defined by
//! * a temperature $T$ in K
//! * a molar density $\rho$ in mol/m³
//! * the mole fractions $x_i$
//!
//! The reduced variables $\tau=T_\mathrm{r}/T$ and $\delta=\rho/\rho_\mathrm{r}$ as well
//! as all contributions to the residual Helmholtz energy are evaluated once on
//! construction.
use crate::equation_of_state::{mix_pairs, AlpharDerivatives, MixtureModel};
use crate::errors::{EosError, EosResult};
use ndarray::{Array1, Array2};
use std::fmt;
use std::sync::Arc;

mod composition;
mod properties;

/// Thermodynamic state of a mixture.
///
/// `State` objects are meant to be immutable. If individual fields like `temperature`
/// are changed, the calculations are wrong as the internal fields of the state are
/// not updated.
///
/// All composition derivatives accept a [crate::CompositionConvention] that decides
/// whether the last mole fraction is treated as an independent variable.
///
/// ## Contents
///
/// + [Residual Helmholtz energy](#residual-helmholtz-energy)
/// + [Composition derivatives](#composition-derivatives)
/// + [Mole number derivatives](#mole-number-derivatives)
/// + [Pressure and partial molar volume](#pressure-and-partial-molar-volume)
/// + [Fugacity](#fugacity)
pub struct State<E> {
    /// Mixture model
    pub eos: Arc<E>,
    /// Temperature $T$
    pub temperature: f64,
    /// Molar density $\rho$
    pub density: f64,
    /// Mole fractions $x_i$
    pub molefracs: Array1<f64>,
    /// Reducing temperature $T_\mathrm{r}(\mathbf{x})$
    pub reducing_temperature: f64,
    /// Reducing density $\rho_\mathrm{r}(\mathbf{x})$
    pub reducing_density: f64,
    /// Inverse reduced temperature $\tau=\frac{T_\mathrm{r}}{T}$
    pub tau: f64,
    /// Reduced density $\delta=\frac{\rho}{\rho_\mathrm{r}}$
    pub delta: f64,
    /// Pure fluid contributions $\alpha^\mathrm{r}_{0i}$
    pure: Vec<AlpharDerivatives>,
    /// Pair contributions $F_{ij}\alpha^\mathrm{r}_{ij}$
    pairs: Array2<AlpharDerivatives>,
    /// Mixture $\alpha^\mathrm{r}$
    alphar: AlpharDerivatives,
}

impl<E> Clone for State<E> {
    fn clone(&self) -> Self {
        Self {
            eos: self.eos.clone(),
            temperature: self.temperature,
            density: self.density,
            molefracs: self.molefracs.clone(),
            reducing_temperature: self.reducing_temperature,
            reducing_density: self.reducing_density,
            tau: self.tau,
            delta: self.delta,
            pure: self.pure.clone(),
            pairs: self.pairs.clone(),
            alphar: self.alphar,
        }
    }
}

impl<E: MixtureModel> fmt::Display for State<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.eos.components() == 1 {
            write!(
                f,
                "T = {:.5} K, ρ = {:.5} mol/m³",
                self.temperature, self.density
            )
        } else {
            write!(
                f,
                "T = {:.5} K, ρ = {:.5} mol/m³, x = {:.5}",
                self.temperature, self.density, self.molefracs
            )
        }
    }
}

/// # State constructors
impl<E: MixtureModel> State<E> {
    /// Create a new state for given temperature, molar density and mole fractions.
    ///
    /// # Errors
    ///
    /// When the number of mole fractions does not match the model,
    /// the mole fractions do not sum up to one, or the temperature or
    /// density is not positive.
    pub fn new(
        eos: &Arc<E>,
        temperature: f64,
        density: f64,
        molefracs: &Array1<f64>,
    ) -> EosResult<Self> {
        Self::validate_composition("State::new", eos, molefracs)?;
        validate("State::new", "temperature", temperature)?;
        validate("State::new", "density", density)?;
        let reducing = eos.reducing_function();
        let tr = reducing.tr(molefracs);
        let rhor = reducing.rhor(molefracs);
        Ok(Self::from_reducing(
            eos,
            temperature,
            density,
            molefracs,
            tr,
            rhor,
        ))
    }

    /// Create a new state from the reduced variables $\tau$ and $\delta$.
    pub fn new_reduced(
        eos: &Arc<E>,
        tau: f64,
        delta: f64,
        molefracs: &Array1<f64>,
    ) -> EosResult<Self> {
        Self::validate_composition("State::new_reduced", eos, molefracs)?;
        validate("State::new_reduced", "tau", tau)?;
        validate("State::new_reduced", "delta", delta)?;
        let reducing = eos.reducing_function();
        let tr = reducing.tr(molefracs);
        let rhor = reducing.rhor(molefracs);
        Ok(Self::from_reducing(
            eos,
            tr / tau,
            delta * rhor,
            molefracs,
            tr,
            rhor,
        ))
    }

    fn validate_composition(
        function: &str,
        eos: &Arc<E>,
        molefracs: &Array1<f64>,
    ) -> EosResult<()> {
        let n = eos.components();
        if molefracs.len() != n {
            return Err(EosError::IncompatibleComponents(n, molefracs.len()));
        }
        let sum = molefracs.sum();
        if (sum - 1.0).abs() > 1e-10 {
            return Err(EosError::InvalidState(
                function.into(),
                "sum of mole fractions".into(),
                sum,
            ));
        }
        Ok(())
    }

    fn from_reducing(
        eos: &Arc<E>,
        temperature: f64,
        density: f64,
        molefracs: &Array1<f64>,
        tr: f64,
        rhor: f64,
    ) -> Self {
        let tau = tr / temperature;
        let delta = density / rhor;
        let pure: Vec<_> = (0..eos.components())
            .map(|i| eos.pure_fluid(i).alphar_derivatives(tau, delta))
            .collect();
        let pairs = eos.excess().pair_matrix(tau, delta);
        let alphar = pure
            .iter()
            .zip(molefracs.iter())
            .map(|(&a, &x)| a * x)
            .sum::<AlpharDerivatives>()
            + mix_pairs(&pairs, molefracs);
        Self {
            eos: eos.clone(),
            temperature,
            density,
            molefracs: molefracs.clone(),
            reducing_temperature: tr,
            reducing_density: rhor,
            tau,
            delta,
            pure,
            pairs,
            alphar,
        }
    }

    /// Molar gas constant of the model.
    pub fn gas_constant(&self) -> f64 {
        self.eos.gas_constant()
    }

    pub(crate) fn components(&self) -> usize {
        self.molefracs.len()
    }
}

fn validate(function: &str, name: &str, value: f64) -> EosResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(EosError::InvalidState(function.into(), name.into(), value))
    }
}

/// # Residual Helmholtz energy
impl<E: MixtureModel> State<E> {
    /// $\alpha^\mathrm{r}$ of the mixture and all its derivatives w.r.t. $\tau$ and $\delta$.
    pub fn alphar_derivatives(&self) -> AlpharDerivatives {
        self.alphar
    }

    /// Reduced residual Helmholtz energy: $\alpha^\mathrm{r}=\sum_ix_i\alpha^\mathrm{r}_{0i}+\sum_{i<j}x_ix_jF_{ij}\alpha^\mathrm{r}_{ij}$
    pub fn alphar(&self) -> f64 {
        self.alphar.alphar
    }

    pub fn dalphar_ddelta(&self) -> f64 {
        self.alphar.dalphar_ddelta
    }

    pub fn dalphar_dtau(&self) -> f64 {
        self.alphar.dalphar_dtau
    }

    pub fn d2alphar_ddelta2(&self) -> f64 {
        self.alphar.d2alphar_ddelta2
    }

    pub fn d2alphar_ddelta_dtau(&self) -> f64 {
        self.alphar.d2alphar_ddelta_dtau
    }

    pub fn d2alphar_dtau2(&self) -> f64 {
        self.alphar.d2alphar_dtau2
    }
}
