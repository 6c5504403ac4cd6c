use multifluid_core::parameter::ParameterError;
use num_dual::DualNum;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// A block of residual terms of a single type as stored in parameter files.
///
/// Every coefficient is stored as a column, entry `k` of all columns
/// belongs to the `k`-th term of the block:
/// ```json
/// {"type": "ResidualHelmholtzPower", "n": [0.97, -2.69], "d": [1, 1], "t": [0.25, 1.125], "l": [0, 0]}
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ResidualFunctionJson {
    #[serde(rename = "type")]
    ty: String,
    #[serde(flatten)]
    parameters: HashMap<String, Vec<Value>>,
}

impl ResidualFunctionJson {
    /// Split the block into individual terms.
    ///
    /// # Errors
    ///
    /// If the columns differ in length, the block contains no columns, or
    /// the type or coefficients do not describe a known term.
    pub fn expand(&self) -> Result<Vec<ResidualFunction>, ParameterError> {
        let mut lengths = self.parameters.values().map(Vec::len);
        let count = lengths
            .next()
            .ok_or(ParameterError::InsufficientInformation)?;
        if lengths.any(|l| l != count) {
            return Err(ParameterError::IncompatibleParameters(format!(
                "coefficient columns of '{}' differ in length",
                self.ty
            )));
        }
        (0..count)
            .map(|k| {
                let mut term: Map<String, Value> = self
                    .parameters
                    .iter()
                    .map(|(key, column)| (key.clone(), column[k].clone()))
                    .collect();
                term.insert("type".into(), Value::String(self.ty.clone()));
                Ok(serde_json::from_value(Value::Object(term))?)
            })
            .collect()
    }
}

/// Single term of the residual Helmholtz energy of a pure fluid.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum ResidualFunction {
    /// $n\delta^d\tau^t\exp\left(-\delta^l\right)$, without exponential for $l=0$
    ResidualHelmholtzPower { d: i32, l: i32, n: f64, t: f64 },
    /// $n\delta^d\tau^t\exp\left(-g\delta^l\right)$
    ResidualHelmholtzExponential {
        d: i32,
        g: f64,
        l: i32,
        n: f64,
        t: f64,
    },
    /// $n\delta^d\tau^t\exp\left(-\eta(\delta-\varepsilon)^2-\beta(\tau-\gamma)^2\right)$
    ResidualHelmholtzGaussian {
        d: i32,
        n: f64,
        t: f64,
        beta: f64,
        epsilon: f64,
        eta: f64,
        gamma: f64,
    },
}

impl ResidualFunction {
    pub fn evaluate<D: DualNum<f64> + Copy>(&self, tau: D, delta: D) -> D {
        match *self {
            ResidualFunction::ResidualHelmholtzPower { d, l, n, t } => {
                let mut pre = delta.powi(d) * tau.powf(t) * n;
                if l != 0 {
                    pre *= (-delta.powi(l)).exp()
                };
                pre
            }
            ResidualFunction::ResidualHelmholtzExponential { d, g, l, n, t } => {
                delta.powi(d) * tau.powf(t) * n * (-delta.powi(l) * g).exp()
            }
            ResidualFunction::ResidualHelmholtzGaussian {
                d,
                n,
                t,
                beta,
                epsilon,
                eta,
                gamma,
            } => {
                (delta.powi(d) * tau.powf(t) * n)
                    * (-(delta - epsilon).powi(2) * eta - (tau - gamma).powi(2) * beta).exp()
            }
        }
    }
}
