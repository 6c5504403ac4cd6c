use crate::errors::EosError;
use num_dual::HyperDual64;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

mod departure;
mod excess;
mod reducing;
#[cfg(test)]
pub(crate) mod test_models;
pub use departure::{DepartureFunction, DepartureRecord, GaussianTerm, PowerTerm};
pub use excess::ExcessTerm;
pub(crate) use excess::{mix_pairs, pair_row_sum};
pub use reducing::ReducingFunction;

/// Molar gas constant in J/(mol K).
pub const RGAS: f64 = 8.314462618;

/// The reduced residual Helmholtz energy $\alpha^\mathrm{r}$ and its
/// partial derivatives up to second order w.r.t. $\tau$ and $\delta$.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AlpharDerivatives {
    /// $\alpha^\mathrm{r}$
    pub alphar: f64,
    /// $\left(\frac{\partial\alpha^\mathrm{r}}{\partial\delta}\right)_\tau$
    pub dalphar_ddelta: f64,
    /// $\left(\frac{\partial\alpha^\mathrm{r}}{\partial\tau}\right)_\delta$
    pub dalphar_dtau: f64,
    /// $\left(\frac{\partial^2\alpha^\mathrm{r}}{\partial\delta^2}\right)_\tau$
    pub d2alphar_ddelta2: f64,
    /// $\frac{\partial^2\alpha^\mathrm{r}}{\partial\delta\partial\tau}$
    pub d2alphar_ddelta_dtau: f64,
    /// $\left(\frac{\partial^2\alpha^\mathrm{r}}{\partial\tau^2}\right)_\delta$
    pub d2alphar_dtau2: f64,
}

impl AlpharDerivatives {
    /// Evaluate a function of $(\tau,\delta)$ that is written generically in
    /// hyper-dual numbers and collect all derivatives up to second order.
    pub fn from_hyperdual<F>(tau: f64, delta: f64, f: F) -> Self
    where
        F: Fn(HyperDual64, HyperDual64) -> HyperDual64,
    {
        let mixed = f(
            HyperDual64::new(tau, 0.0, 1.0, 0.0),
            HyperDual64::new(delta, 1.0, 0.0, 0.0),
        );
        let delta2 = f(
            HyperDual64::from(tau),
            HyperDual64::new(delta, 1.0, 1.0, 0.0),
        );
        let tau2 = f(
            HyperDual64::new(tau, 1.0, 1.0, 0.0),
            HyperDual64::from(delta),
        );
        Self {
            alphar: mixed.re,
            dalphar_ddelta: mixed.eps1,
            dalphar_dtau: mixed.eps2,
            d2alphar_ddelta2: delta2.eps1eps2,
            d2alphar_ddelta_dtau: mixed.eps1eps2,
            d2alphar_dtau2: tau2.eps1eps2,
        }
    }
}

impl Add for AlpharDerivatives {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            alphar: self.alphar + rhs.alphar,
            dalphar_ddelta: self.dalphar_ddelta + rhs.dalphar_ddelta,
            dalphar_dtau: self.dalphar_dtau + rhs.dalphar_dtau,
            d2alphar_ddelta2: self.d2alphar_ddelta2 + rhs.d2alphar_ddelta2,
            d2alphar_ddelta_dtau: self.d2alphar_ddelta_dtau + rhs.d2alphar_ddelta_dtau,
            d2alphar_dtau2: self.d2alphar_dtau2 + rhs.d2alphar_dtau2,
        }
    }
}

impl Sub for AlpharDerivatives {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self + (-rhs)
    }
}

impl Neg for AlpharDerivatives {
    type Output = Self;

    fn neg(self) -> Self {
        self * -1.0
    }
}

impl Mul<f64> for AlpharDerivatives {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self {
            alphar: self.alphar * rhs,
            dalphar_ddelta: self.dalphar_ddelta * rhs,
            dalphar_dtau: self.dalphar_dtau * rhs,
            d2alphar_ddelta2: self.d2alphar_ddelta2 * rhs,
            d2alphar_ddelta_dtau: self.d2alphar_ddelta_dtau * rhs,
            d2alphar_dtau2: self.d2alphar_dtau2 * rhs,
        }
    }
}

impl Sum for AlpharDerivatives {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |acc, a| acc + a)
    }
}

/// Reduced residual Helmholtz energy of a pure fluid or a binary departure function.
///
/// Implementors only need to provide all derivatives at once, the single
/// derivatives are derived from that. Behavior outside of the valid range of
/// $\tau$ and $\delta$ is not checked.
pub trait ResidualHelmholtz: Send + Sync {
    /// $\alpha^\mathrm{r}$ and all its partial derivatives up to second order.
    fn alphar_derivatives(&self, tau: f64, delta: f64) -> AlpharDerivatives;

    fn alphar(&self, tau: f64, delta: f64) -> f64 {
        self.alphar_derivatives(tau, delta).alphar
    }

    fn dalphar_ddelta(&self, tau: f64, delta: f64) -> f64 {
        self.alphar_derivatives(tau, delta).dalphar_ddelta
    }

    fn dalphar_dtau(&self, tau: f64, delta: f64) -> f64 {
        self.alphar_derivatives(tau, delta).dalphar_dtau
    }

    fn d2alphar_ddelta2(&self, tau: f64, delta: f64) -> f64 {
        self.alphar_derivatives(tau, delta).d2alphar_ddelta2
    }

    fn d2alphar_ddelta_dtau(&self, tau: f64, delta: f64) -> f64 {
        self.alphar_derivatives(tau, delta).d2alphar_ddelta_dtau
    }

    fn d2alphar_dtau2(&self, tau: f64, delta: f64) -> f64 {
        self.alphar_derivatives(tau, delta).d2alphar_dtau2
    }
}

/// Treatment of the mole fractions in composition derivatives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompositionConvention {
    /// All $N$ mole fractions are independent variables.
    Independent,
    /// The last mole fraction is eliminated by $x_N=1-\sum_{i<N}x_i$.
    /// Derivatives w.r.t. $x_N$ vanish identically.
    Dependent,
}

impl CompositionConvention {
    /// Number of mole fractions that are treated as independent variables
    /// in a mixture of `components` components.
    pub fn independent_components(&self, components: usize) -> usize {
        match self {
            Self::Independent => components,
            Self::Dependent => components - 1,
        }
    }

    /// Whether `i` is the eliminated index in a mixture of `components` components.
    pub fn is_dependent_index(&self, i: usize, components: usize) -> bool {
        *self == Self::Dependent && i + 1 == components
    }
}

impl fmt::Display for CompositionConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Independent => write!(f, "independent"),
            Self::Dependent => write!(f, "dependent"),
        }
    }
}

impl FromStr for CompositionConvention {
    type Err = EosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "independent" => Ok(Self::Independent),
            "dependent" => Ok(Self::Dependent),
            _ => Err(EosError::InvalidConvention(s.to_owned())),
        }
    }
}

/// A multi-fluid mixture model.
///
/// The model combines the pure fluid contributions, the excess term and the
/// reducing function. All mixture properties are evaluated through [crate::State].
pub trait MixtureModel: Send + Sync {
    /// Return the number of components of the model.
    fn components(&self) -> usize;

    /// Molar gas constant used by the model in J/(mol K).
    fn gas_constant(&self) -> f64 {
        RGAS
    }

    /// Residual Helmholtz energy of pure component `i`.
    fn pure_fluid(&self, i: usize) -> &dyn ResidualHelmholtz;

    /// Binary departure functions.
    fn excess(&self) -> &ExcessTerm;

    /// Composition dependence of the reducing temperature and density.
    fn reducing_function(&self) -> &dyn ReducingFunction;
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;
    use num_dual::DualNum;

    #[test]
    fn convention_from_str() {
        assert_eq!(
            "independent".parse::<CompositionConvention>().unwrap(),
            CompositionConvention::Independent
        );
        assert_eq!(
            "dependent".parse::<CompositionConvention>().unwrap(),
            CompositionConvention::Dependent
        );
        assert!(matches!(
            "XN_DEPENDENT".parse::<CompositionConvention>(),
            Err(EosError::InvalidConvention(s)) if s == "XN_DEPENDENT"
        ));
    }

    #[test]
    fn convention_serde() {
        let c: CompositionConvention = serde_json::from_str("\"dependent\"").unwrap();
        assert_eq!(c, CompositionConvention::Dependent);
        assert!(serde_json::from_str::<CompositionConvention>("\"both\"").is_err());
        assert_eq!(c.to_string(), "dependent");
    }

    #[test]
    fn dependent_index() {
        let c = CompositionConvention::Dependent;
        assert!(c.is_dependent_index(2, 3));
        assert!(!c.is_dependent_index(1, 3));
        assert!(!CompositionConvention::Independent.is_dependent_index(2, 3));
        assert_eq!(c.independent_components(3), 2);
    }

    #[test]
    fn hyperdual_derivatives() {
        // a = tau^2 * delta^3
        let (tau, delta) = (1.2, 0.7);
        let a = AlpharDerivatives::from_hyperdual(tau, delta, |t, d| t * t * d.powi(3));
        assert_relative_eq!(a.alphar, tau * tau * delta.powi(3), max_relative = 1e-14);
        assert_relative_eq!(a.dalphar_dtau, 2.0 * tau * delta.powi(3), max_relative = 1e-14);
        assert_relative_eq!(a.dalphar_ddelta, 3.0 * tau * tau * delta * delta, max_relative = 1e-14);
        assert_relative_eq!(a.d2alphar_dtau2, 2.0 * delta.powi(3), max_relative = 1e-14);
        assert_relative_eq!(a.d2alphar_ddelta2, 6.0 * tau * tau * delta, max_relative = 1e-14);
        assert_relative_eq!(a.d2alphar_ddelta_dtau, 6.0 * tau * delta * delta, max_relative = 1e-14);
    }

    #[test]
    fn sum_and_scale() {
        let a = AlpharDerivatives {
            alphar: 1.0,
            dalphar_ddelta: 2.0,
            dalphar_dtau: 3.0,
            d2alphar_ddelta2: 4.0,
            d2alphar_ddelta_dtau: 5.0,
            d2alphar_dtau2: 6.0,
        };
        let s: AlpharDerivatives = [a, a * 2.0].into_iter().sum();
        assert_eq!(s, a * 3.0);
        assert_eq!(s - a * 2.0, a);
        assert_eq!(-a, a * -1.0);
    }
}
