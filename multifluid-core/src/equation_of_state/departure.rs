use super::{AlpharDerivatives, ResidualHelmholtz};
use crate::parameter::ParameterError;
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

/// Polynomial term with optional exponential damping:
/// $n\delta^d\tau^t\exp\left(-\delta^l\right)$
///
/// For $l=0$ the exponential factor is omitted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PowerTerm {
    pub n: f64,
    pub d: i32,
    pub t: f64,
    pub l: i32,
}

impl PowerTerm {
    pub fn new(n: f64, d: i32, t: f64, l: i32) -> Self {
        Self { n, d, t, l }
    }

    fn derivatives(&self, tau: f64, delta: f64) -> AlpharDerivatives {
        let (a, l_delta_l) = if self.l == 0 {
            (self.n * delta.powi(self.d) * tau.powf(self.t), 0.0)
        } else {
            let delta_l = delta.powi(self.l);
            (
                self.n * delta.powi(self.d) * tau.powf(self.t) * (-delta_l).exp(),
                self.l as f64 * delta_l,
            )
        };
        let g = self.d as f64 - l_delta_l;
        let dalphar_ddelta = a * g / delta;
        AlpharDerivatives {
            alphar: a,
            dalphar_ddelta,
            dalphar_dtau: a * self.t / tau,
            d2alphar_ddelta2: a * (g * (g - 1.0) - self.l as f64 * l_delta_l) / (delta * delta),
            d2alphar_ddelta_dtau: dalphar_ddelta * self.t / tau,
            d2alphar_dtau2: a * self.t * (self.t - 1.0) / (tau * tau),
        }
    }
}

/// Gaussian bell shaped term of the GERG-2008 departure functions:
/// $n\delta^d\tau^t\exp\left(-\eta(\delta-\varepsilon)^2-\beta(\delta-\gamma)\right)$
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GaussianTerm {
    pub n: f64,
    pub d: i32,
    pub t: f64,
    pub eta: f64,
    pub epsilon: f64,
    pub beta: f64,
    pub gamma: f64,
}

impl GaussianTerm {
    fn derivatives(&self, tau: f64, delta: f64) -> AlpharDerivatives {
        let d = self.d as f64;
        let u = -self.eta * (delta - self.epsilon).powi(2) - self.beta * (delta - self.gamma);
        let a = self.n * delta.powi(self.d) * tau.powf(self.t) * u.exp();
        let h = d / delta - 2.0 * self.eta * (delta - self.epsilon) - self.beta;
        let dalphar_ddelta = a * h;
        AlpharDerivatives {
            alphar: a,
            dalphar_ddelta,
            dalphar_dtau: a * self.t / tau,
            d2alphar_ddelta2: a * (h * h - d / (delta * delta) - 2.0 * self.eta),
            d2alphar_ddelta_dtau: dalphar_ddelta * self.t / tau,
            d2alphar_dtau2: a * self.t * (self.t - 1.0) / (tau * tau),
        }
    }
}

/// Binary departure function $\alpha^\mathrm{r}_{ij}(\tau,\delta)$.
///
/// Departure functions do not depend on composition and are symmetric
/// in the two components of the pair.
#[derive(Clone, Debug, PartialEq)]
pub enum DepartureFunction {
    /// $\alpha^\mathrm{r}_{ij}=\sum_kn_k\delta^{d_k}\tau^{t_k}\exp\left(-\delta^{l_k}\right)$
    ExponentialPower(Vec<PowerTerm>),
    /// Polynomial terms followed by Gaussian bell shaped terms (GERG-2008).
    GeneralizedExponential {
        power: Vec<PowerTerm>,
        gaussian: Vec<GaussianTerm>,
    },
}

impl DepartureFunction {
    /// Exponential-power departure function from coefficient columns.
    pub fn exponential_power(
        n: &[f64],
        d: &[i32],
        t: &[f64],
        l: &[i32],
    ) -> Result<Self, ParameterError> {
        check_lengths("exponential departure function", n.len(), &[d.len(), t.len(), l.len()])?;
        let terms = (0..n.len())
            .map(|k| PowerTerm::new(n[k], d[k], t[k], l[k]))
            .collect();
        Ok(Self::ExponentialPower(terms))
    }

    /// GERG-2008 departure function from coefficient columns.
    ///
    /// A term is a Gaussian bell shaped term if either `eta` or `beta` is non-zero
    /// and a pure polynomial term otherwise.
    pub fn generalized_exponential(
        n: &[f64],
        d: &[i32],
        t: &[f64],
        eta: &[f64],
        epsilon: &[f64],
        beta: &[f64],
        gamma: &[f64],
    ) -> Result<Self, ParameterError> {
        check_lengths(
            "GERG-2008 departure function",
            n.len(),
            &[d.len(), t.len(), eta.len(), epsilon.len(), beta.len(), gamma.len()],
        )?;
        let mut power = Vec::new();
        let mut gaussian = Vec::new();
        for k in 0..n.len() {
            if eta[k] != 0.0 || beta[k] != 0.0 {
                gaussian.push(GaussianTerm {
                    n: n[k],
                    d: d[k],
                    t: t[k],
                    eta: eta[k],
                    epsilon: epsilon[k],
                    beta: beta[k],
                    gamma: gamma[k],
                });
            } else {
                power.push(PowerTerm::new(n[k], d[k], t[k], 0));
            }
        }
        Ok(Self::GeneralizedExponential { power, gaussian })
    }

    /// Number of terms of the departure function.
    pub fn len(&self) -> usize {
        match self {
            Self::ExponentialPower(power) => power.len(),
            Self::GeneralizedExponential { power, gaussian } => power.len() + gaussian.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn check_lengths(name: &str, n: usize, others: &[usize]) -> Result<(), ParameterError> {
    if others.iter().any(|&o| o != n) {
        return Err(ParameterError::IncompatibleParameters(format!(
            "coefficient vectors of the {name} have different lengths"
        )));
    }
    Ok(())
}

impl ResidualHelmholtz for DepartureFunction {
    fn alphar_derivatives(&self, tau: f64, delta: f64) -> AlpharDerivatives {
        match self {
            Self::ExponentialPower(power) => {
                power.iter().map(|p| p.derivatives(tau, delta)).sum()
            }
            Self::GeneralizedExponential { power, gaussian } => {
                power
                    .iter()
                    .map(|p| p.derivatives(tau, delta))
                    .sum::<AlpharDerivatives>()
                    + gaussian
                        .iter()
                        .map(|g| g.derivatives(tau, delta))
                        .sum::<AlpharDerivatives>()
            }
        }
    }
}

/// Coefficients of a departure function as stored in parameter files.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type")]
pub enum DepartureRecord {
    #[serde(rename = "Exponential")]
    ExponentialPower {
        n: Vec<f64>,
        d: Vec<i32>,
        t: Vec<f64>,
        l: Vec<i32>,
    },
    #[serde(rename = "GERG-2008")]
    GeneralizedExponential {
        n: Vec<f64>,
        d: Vec<i32>,
        t: Vec<f64>,
        eta: Vec<f64>,
        epsilon: Vec<f64>,
        beta: Vec<f64>,
        gamma: Vec<f64>,
    },
}

impl TryFrom<&DepartureRecord> for DepartureFunction {
    type Error = ParameterError;

    fn try_from(record: &DepartureRecord) -> Result<Self, Self::Error> {
        match record {
            DepartureRecord::ExponentialPower { n, d, t, l } => {
                Self::exponential_power(n, d, t, l)
            }
            DepartureRecord::GeneralizedExponential {
                n,
                d,
                t,
                eta,
                epsilon,
                beta,
                gamma,
            } => Self::generalized_exponential(n, d, t, eta, epsilon, beta, gamma),
        }
    }
}

impl std::fmt::Display for DepartureRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ExponentialPower { n, .. } => write!(f, "Exponential({} terms)", n.len()),
            Self::GeneralizedExponential { n, .. } => write!(f, "GERG-2008({} terms)", n.len()),
        }
    }
}
