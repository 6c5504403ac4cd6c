#![warn(clippy::all)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::too_many_arguments)]

//! Core traits and functionalities of multi-fluid Helmholtz energy mixture models.
//!
//! A multi-fluid mixture model combines the residual Helmholtz energies of the pure
//! components with binary departure functions, evaluated at a common reduced state
//! $(\tau,\delta)$ that is defined by a composition dependent reducing function:
//! $$\alpha^\mathrm{r}(\tau,\delta,\mathbf{x})=\sum_ix_i\alpha^\mathrm{r}_{0i}(\tau,\delta)+\sum_{i<j}x_ix_jF_{ij}\alpha^\mathrm{r}_{ij}(\tau,\delta)$$
//! with $\tau=T_\mathrm{r}(\mathbf{x})/T$ and $\delta=\rho/\rho_\mathrm{r}(\mathbf{x})$.

mod equation_of_state;
mod errors;
pub mod parameter;
mod state;

pub use equation_of_state::{
    AlpharDerivatives, CompositionConvention, DepartureFunction, DepartureRecord, ExcessTerm,
    GaussianTerm, MixtureModel, PowerTerm, ReducingFunction, ResidualHelmholtz, RGAS,
};
pub use errors::{EosError, EosResult};
pub use state::State;
