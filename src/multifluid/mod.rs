//! Multi-fluid mixture models with GERG-2008 type reducing functions.
//!
//! The pure fluids are described by [MultiParameter] equations of state,
//! selected pairs by binary departure functions.
use crate::multiparameter::MultiParameter;
use multifluid_core::{EosResult, ExcessTerm, MixtureModel, ReducingFunction, ResidualHelmholtz};
use std::sync::Arc;

mod parameters;
mod reducing;
pub use parameters::{MultiFluidBinaryRecord, MultiFluidParameters};
pub use reducing::GergReducing;

#[cfg(test)]
pub(crate) use parameters::utils;

/// Multi-fluid mixture model.
pub struct MultiFluid {
    pub parameters: Arc<MultiFluidParameters>,
    pure: Vec<Arc<MultiParameter>>,
    excess: ExcessTerm,
    reducing: GergReducing,
}

impl MultiFluid {
    /// Assemble the mixture model from its parameters.
    ///
    /// # Errors
    ///
    /// If a departure function refers to a component that is not part of
    /// the parameter set.
    pub fn new(parameters: Arc<MultiFluidParameters>) -> EosResult<Self> {
        let n = parameters.components();
        let mut excess = ExcessTerm::new(n);
        for (i, j, f, departure) in parameters.departures.iter() {
            excess.add_pair(*i, *j, *f, departure.clone())?;
        }
        let reducing = GergReducing::from_parameters(&parameters);
        tracing::debug!(
            components = n,
            departure_functions = excess.pairs(),
            "assembled multi-fluid model"
        );
        Ok(Self {
            pure: parameters.pure.clone(),
            excess,
            reducing,
            parameters,
        })
    }
}

impl MixtureModel for MultiFluid {
    fn components(&self) -> usize {
        self.pure.len()
    }

    fn pure_fluid(&self, i: usize) -> &dyn ResidualHelmholtz {
        self.pure[i].as_ref()
    }

    fn excess(&self) -> &ExcessTerm {
        &self.excess
    }

    fn reducing_function(&self) -> &dyn ReducingFunction {
        &self.reducing
    }
}
