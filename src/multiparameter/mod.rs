//! Multiparameter equations of state of pure fluids.
//!
//! The residual Helmholtz energy is a sum of empirical terms
//! $$\alpha^\mathrm{r}_0(\tau,\delta)=\sum_kn_k\delta^{d_k}\tau^{t_k}\cdots$$
//! with $\tau=T_\mathrm{c}/T$ and $\delta=\rho/\rho_\mathrm{c}$. All terms are
//! evaluated in generalized dual numbers, so derivatives are exact.
use multifluid_core::parameter::ParameterError;
use multifluid_core::{AlpharDerivatives, ResidualHelmholtz};
use num_dual::DualNum;
use serde::{Deserialize, Serialize};
use std::fmt;

mod residual_function;
pub use residual_function::{ResidualFunction, ResidualFunctionJson};

/// Pure fluid record of a multiparameter equation of state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MultiParameterRecord {
    /// Critical temperature in K
    pub tc: f64,
    /// Critical molar density in mol/m³
    pub rhoc: f64,
    pub residual: Vec<ResidualFunctionJson>,
}

impl MultiParameterRecord {
    pub fn new(tc: f64, rhoc: f64, residual: Vec<ResidualFunctionJson>) -> Self {
        Self { tc, rhoc, residual }
    }
}

impl fmt::Display for MultiParameterRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MultiParameterRecord(tc={}, rhoc={}, blocks={})",
            self.tc,
            self.rhoc,
            self.residual.len()
        )
    }
}

/// Residual Helmholtz energy of a pure fluid.
#[derive(Clone, Debug)]
pub struct MultiParameter {
    /// Critical temperature in K
    pub tc: f64,
    /// Critical molar density in mol/m³
    pub rhoc: f64,
    terms: Vec<ResidualFunction>,
}

impl MultiParameter {
    pub fn new(tc: f64, rhoc: f64, terms: Vec<ResidualFunction>) -> Self {
        Self { tc, rhoc, terms }
    }

    pub fn terms(&self) -> &[ResidualFunction] {
        &self.terms
    }

    /// $\alpha^\mathrm{r}_0$ for arbitrary (dual) numbers.
    pub fn evaluate<D: DualNum<f64> + Copy>(&self, tau: D, delta: D) -> D {
        self.terms.iter().map(|r| r.evaluate(tau, delta)).sum()
    }
}

impl TryFrom<&MultiParameterRecord> for MultiParameter {
    type Error = ParameterError;

    fn try_from(record: &MultiParameterRecord) -> Result<Self, Self::Error> {
        let mut terms = Vec::new();
        for block in record.residual.iter() {
            terms.extend(block.expand()?);
        }
        Ok(Self::new(record.tc, record.rhoc, terms))
    }
}

impl ResidualHelmholtz for MultiParameter {
    fn alphar_derivatives(&self, tau: f64, delta: f64) -> AlpharDerivatives {
        AlpharDerivatives::from_hyperdual(tau, delta, |t, d| self.evaluate(t, d))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;
    use multifluid_core::DepartureFunction;

    const N: [f64; 12] = [
        0.97628068, -2.6905251, 0.73498222, -0.035366206, 0.084692031, 0.00024154594,
        0.23964954, -0.042780093, -0.22308832, -0.051799954, -0.027178426, 0.011246305,
    ];
    const D: [i32; 12] = [1, 1, 1, 2, 3, 7, 2, 5, 1, 4, 3, 4];
    const T: [f64; 12] = [
        0.25, 1.125, 1.5, 1.375, 0.25, 0.875, 0.625, 1.75, 3.625, 3.625, 14.5, 12.0,
    ];
    const L: [i32; 12] = [0, 0, 0, 0, 0, 0, 1, 1, 2, 2, 3, 3];

    fn ethane() -> MultiParameter {
        let record = MultiParameterRecord::new(
            305.322,
            6870.854,
            vec![serde_json::from_value(serde_json::json!({
                "type": "ResidualHelmholtzPower",
                "n": N,
                "d": D,
                "t": T,
                "l": L,
            }))
            .unwrap()],
        );
        MultiParameter::try_from(&record).unwrap()
    }

    #[test]
    fn record_expansion() {
        assert_eq!(ethane().terms().len(), 12);
    }

    #[test]
    fn hyperdual_matches_closed_form() {
        let eos = ethane();
        let reference = DepartureFunction::exponential_power(&N, &D, &T, &L).unwrap();
        for (tau, delta) in [(1.1, 0.9), (0.8, 0.05), (1.6, 2.4)] {
            let a = eos.alphar_derivatives(tau, delta);
            let b = reference.alphar_derivatives(tau, delta);
            let a = [
                a.alphar,
                a.dalphar_ddelta,
                a.dalphar_dtau,
                a.d2alphar_ddelta2,
                a.d2alphar_ddelta_dtau,
                a.d2alphar_dtau2,
            ];
            let b = [
                b.alphar,
                b.dalphar_ddelta,
                b.dalphar_dtau,
                b.d2alphar_ddelta2,
                b.d2alphar_ddelta_dtau,
                b.d2alphar_dtau2,
            ];
            for (a, b) in a.into_iter().zip(b) {
                assert_relative_eq!(a, b, max_relative = 1e-12, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn exponential_term_reduces_to_power_term() {
        let power = ResidualFunction::ResidualHelmholtzPower {
            d: 2,
            l: 1,
            n: 0.24,
            t: 0.625,
        };
        let exponential = ResidualFunction::ResidualHelmholtzExponential {
            d: 2,
            g: 1.0,
            l: 1,
            n: 0.24,
            t: 0.625,
        };
        assert_relative_eq!(
            power.evaluate(1.2, 0.7),
            exponential.evaluate(1.2, 0.7),
            max_relative = 1e-15
        );
    }

    #[test]
    fn incomplete_record() {
        let record: MultiParameterRecord = serde_json::from_str(
            r#"{"tc": 305.322, "rhoc": 6870.854, "residual": [{"type": "ResidualHelmholtzPower", "n": [0.9], "d": [1], "t": [0.25, 1.125], "l": [0]}]}"#,
        )
        .unwrap();
        assert!(MultiParameter::try_from(&record).is_err());
    }
}
