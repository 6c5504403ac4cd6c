#![warn(clippy::all)]
#![allow(clippy::too_many_arguments)]

//! Multi-fluid Helmholtz energy mixture models.
//!
//! The crate provides multiparameter equations of state of pure fluids and
//! GERG-2008 type mixtures of them. All thermodynamic properties and their
//! composition derivatives are evaluated through [State].

pub mod multifluid;
pub mod multiparameter;

pub use multifluid_core::{CompositionConvention, EosError, EosResult, State};
