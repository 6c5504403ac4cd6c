use crate::multiparameter::{MultiParameter, MultiParameterRecord};
use itertools::Itertools;
use multifluid_core::parameter::{Parameter, ParameterError, PureRecord};
use multifluid_core::{DepartureFunction, DepartureRecord};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Binary interaction parameters of the GERG-2008 mixing rules.
///
/// $\beta_T$ and $\beta_v$ are asymmetric: the record of the reversed pair
/// carries the inverse values.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MultiFluidBinaryRecord {
    pub beta_t: f64,
    pub gamma_t: f64,
    pub beta_v: f64,
    pub gamma_v: f64,
    /// Weight $F_{ij}$ of the departure function
    #[serde(default)]
    pub f: f64,
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure: Option<DepartureRecord>,
}

impl Default for MultiFluidBinaryRecord {
    fn default() -> Self {
        Self::new(1.0, 1.0, 1.0, 1.0)
    }
}

impl MultiFluidBinaryRecord {
    /// Reducing function parameters without a departure function.
    pub fn new(beta_t: f64, gamma_t: f64, beta_v: f64, gamma_v: f64) -> Self {
        Self {
            beta_t,
            gamma_t,
            beta_v,
            gamma_v,
            f: 0.0,
            departure: None,
        }
    }

    /// Add a departure function with weight `f`.
    pub fn with_departure(mut self, f: f64, departure: DepartureRecord) -> Self {
        self.f = f;
        self.departure = Some(departure);
        self
    }

    /// The same interaction with the roles of both components exchanged.
    pub fn swapped(&self) -> Self {
        Self {
            beta_t: 1.0 / self.beta_t,
            beta_v: 1.0 / self.beta_v,
            ..self.clone()
        }
    }
}

impl std::fmt::Display for MultiFluidBinaryRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MultiFluidBinaryRecord(beta_t={}, gamma_t={}, beta_v={}, gamma_v={}",
            self.beta_t, self.gamma_t, self.beta_v, self.gamma_v
        )?;
        if let Some(departure) = &self.departure {
            write!(f, ", f={}, departure={}", self.f, departure)?;
        }
        write!(f, ")")
    }
}

/// Parameter set required for a multi-fluid mixture model.
pub struct MultiFluidParameters {
    /// Critical temperatures in K
    pub tc: Array1<f64>,
    /// Critical molar densities in mol/m³
    pub rhoc: Array1<f64>,
    pub beta_t: Array2<f64>,
    pub gamma_t: Array2<f64>,
    pub beta_v: Array2<f64>,
    pub gamma_v: Array2<f64>,
    /// Pure fluid equations of state
    pub pure: Vec<Arc<MultiParameter>>,
    /// Departure functions $(i,j,F_{ij},\alpha^\mathrm{r}_{ij})$ with $i<j$
    pub departures: Vec<(usize, usize, f64, DepartureFunction)>,
    pub pure_records: Vec<PureRecord<MultiParameterRecord>>,
    pub binary_records: Option<Array2<MultiFluidBinaryRecord>>,
}

impl Parameter for MultiFluidParameters {
    type Pure = MultiParameterRecord;
    type Binary = MultiFluidBinaryRecord;

    fn from_records(
        pure_records: Vec<PureRecord<Self::Pure>>,
        binary_records: Option<Array2<Self::Binary>>,
    ) -> Result<Self, ParameterError> {
        let n = pure_records.len();
        if n == 0 {
            return Err(ParameterError::InsufficientInformation);
        }

        let pure = pure_records
            .iter()
            .map(|r| MultiParameter::try_from(&r.model_record).map(Arc::new))
            .collect::<Result<Vec<_>, _>>()?;
        let tc = pure.iter().map(|p| p.tc).collect();
        let rhoc = pure.iter().map(|p| p.rhoc).collect();

        let binary = match &binary_records {
            Some(br) if br.dim() != (n, n) => {
                return Err(ParameterError::IncompatibleParameters(format!(
                    "binary records of shape {:?} for {} components",
                    br.dim(),
                    n
                )))
            }
            Some(br) => br.clone(),
            None => Array2::from_elem((n, n), MultiFluidBinaryRecord::default()),
        };

        let mut departures = Vec::new();
        for (i, j) in (0..n).tuple_combinations() {
            let br = &binary[[i, j]];
            if let Some(departure) = &br.departure {
                departures.push((i, j, br.f, DepartureFunction::try_from(departure)?));
            }
        }

        Ok(Self {
            tc,
            rhoc,
            beta_t: binary.map(|br| br.beta_t),
            gamma_t: binary.map(|br| br.gamma_t),
            beta_v: binary.map(|br| br.beta_v),
            gamma_v: binary.map(|br| br.gamma_v),
            pure,
            departures,
            pure_records,
            binary_records,
        })
    }

    fn swap_binary(binary_record: &MultiFluidBinaryRecord) -> MultiFluidBinaryRecord {
        binary_record.swapped()
    }

    fn records(
        &self,
    ) -> (
        &[PureRecord<MultiParameterRecord>],
        Option<&Array2<MultiFluidBinaryRecord>>,
    ) {
        (&self.pure_records, self.binary_records.as_ref())
    }
}

impl MultiFluidParameters {
    pub fn components(&self) -> usize {
        self.pure.len()
    }

    pub fn to_markdown(&self) -> String {
        let mut output = String::from("|component|$T_c$|$\\rho_c$|terms|\n|-|-|-|-|");
        for (i, (record, pure)) in self.pure_records.iter().zip(&self.pure).enumerate() {
            let component = record.identifier.name.clone();
            let component = component.unwrap_or(format!("Component {}", i + 1));
            output.push_str(&format!(
                "\n|{}|{}|{}|{}|",
                component,
                pure.tc,
                pure.rhoc,
                pure.terms().len()
            ));
        }
        output
    }
}

impl std::fmt::Display for MultiFluidParameters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MultiFluidParameters(")?;
        write!(f, "\n\ttc={}", self.tc)?;
        write!(f, "\n\trhoc={}", self.rhoc)?;
        write!(f, "\n\tbeta_t={}", self.beta_t)?;
        write!(f, "\n\tgamma_t={}", self.gamma_t)?;
        write!(f, "\n\tbeta_v={}", self.beta_v)?;
        write!(f, "\n\tgamma_v={}", self.gamma_v)?;
        write!(f, "\n\tdepartures={}", self.departures.len())?;
        write!(f, "\n)")
    }
}
