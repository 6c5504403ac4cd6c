//! Pure fluid and binary records and the [Parameter] trait that combines them.

use indexmap::IndexSet;
use ndarray::{Array2, Axis};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::io;
use std::path::Path;
use thiserror::Error;

mod identifier;
mod model_record;

pub use identifier::{Identifier, IdentifierOption};
pub use model_record::{BinaryRecord, PureRecord};

/// Construction of model parameters from pure fluid records and an optional
/// matrix of binary records.
///
/// Entry `[i, j]` of a binary record matrix always describes the interaction
/// with component `i` as the first and component `j` as the second component.
pub trait Parameter
where
    Self: Sized,
{
    type Pure: Clone + DeserializeOwned;
    type Binary: Clone + DeserializeOwned + Default;

    fn from_records(
        pure_records: Vec<PureRecord<Self::Pure>>,
        binary_records: Option<Array2<Self::Binary>>,
    ) -> Result<Self, ParameterError>;

    /// Returns the binary record with the roles of the two components exchanged.
    ///
    /// The default implementation is suitable for symmetric interaction parameters.
    fn swap_binary(binary_record: &Self::Binary) -> Self::Binary {
        binary_record.clone()
    }

    /// Parameters of a single fluid.
    fn new_pure(record: PureRecord<Self::Pure>) -> Result<Self, ParameterError> {
        Self::from_records(vec![record], None)
    }

    /// Parameters of a binary mixture. `binary` describes the pair with the
    /// first record as first component.
    fn new_binary(
        records: Vec<PureRecord<Self::Pure>>,
        binary: Option<Self::Binary>,
    ) -> Result<Self, ParameterError> {
        let matrix = binary.map(|b| {
            let mut m = Array2::from_elem([2, 2], Self::Binary::default());
            m[[1, 0]] = Self::swap_binary(&b);
            m[[0, 1]] = b;
            m
        });
        Self::from_records(records, matrix)
    }

    /// Parameters from bare model records, without identifiers or binary records.
    fn from_model_records(models: Vec<Self::Pure>) -> Result<Self, ParameterError> {
        let records = models
            .into_iter()
            .map(|m| PureRecord::new(Identifier::default(), m))
            .collect();
        Self::from_records(records, None)
    }

    /// The pure and binary records the parameters were built from.
    #[allow(clippy::type_complexity)]
    fn records(&self) -> (&[PureRecord<Self::Pure>], Option<&Array2<Self::Binary>>);

    /// Arrange `binary_records` as a matrix in the order of `pure_records`.
    ///
    /// Pairs without a record get `Self::Binary::default()`. Records stored
    /// with reversed identifiers are passed through [Parameter::swap_binary].
    fn binary_matrix_from_records(
        pure_records: &[PureRecord<Self::Pure>],
        binary_records: &[BinaryRecord<Identifier, Self::Binary>],
        identifier_option: IdentifierOption,
    ) -> Result<Option<Array2<Self::Binary>>, ParameterError> {
        if binary_records.is_empty() {
            return Ok(None);
        }

        let by_pair: HashMap<(String, String), &Self::Binary> = binary_records
            .iter()
            .filter_map(|br| {
                let first = br.id1.as_string(identifier_option)?;
                let second = br.id2.as_string(identifier_option)?;
                Some(((first, second), &br.model_record))
            })
            .collect();

        let ids = pure_records
            .iter()
            .enumerate()
            .map(|(i, r)| {
                r.identifier
                    .as_string(identifier_option)
                    .ok_or(ParameterError::MissingIdentifier(i))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let n = ids.len();
        Ok(Some(Array2::from_shape_fn([n, n], |(i, j)| {
            let key = (ids[i].clone(), ids[j].clone());
            if let Some(&br) = by_pair.get(&key) {
                return br.clone();
            }
            by_pair
                .get(&(key.1, key.0))
                .map(|&br| Self::swap_binary(br))
                .unwrap_or_default()
        })))
    }

    /// Read the records of `substances` from a pure fluid json file and an
    /// optional binary json file.
    fn from_json<P>(
        substances: Vec<&str>,
        file_pure: P,
        file_binary: Option<P>,
        identifier_option: IdentifierOption,
    ) -> Result<Self, ParameterError>
    where
        P: AsRef<Path>,
    {
        Self::from_multiple_json(&[(substances, file_pure)], file_binary, identifier_option)
    }

    /// Like [Parameter::from_json] with the substances spread over several files.
    ///
    /// Components are ordered as they appear in `input`.
    fn from_multiple_json<P>(
        input: &[(Vec<&str>, P)],
        file_binary: Option<P>,
        identifier_option: IdentifierOption,
    ) -> Result<Self, ParameterError>
    where
        P: AsRef<Path>,
    {
        let requested: Vec<&str> = input
            .iter()
            .flat_map(|(substances, _)| substances.iter().copied())
            .collect();
        let unique: IndexSet<&str> = requested.iter().copied().collect();
        if unique.len() < requested.len() {
            return Err(ParameterError::IncompatibleParameters(format!(
                "duplicate substances in {:?}",
                requested
            )));
        }

        let mut records = Vec::with_capacity(requested.len());
        for (substances, file) in input {
            let file = file.as_ref();
            let found = PureRecord::<Self::Pure>::from_json(substances, file, identifier_option)?;
            tracing::debug!(
                file = %file.display(),
                substances = ?substances,
                "read pure fluid records"
            );
            records.extend(found);
        }

        let binary_records: Vec<BinaryRecord<Identifier, Self::Binary>> = file_binary
            .map(BinaryRecord::from_json)
            .transpose()?
            .unwrap_or_default();
        tracing::debug!(count = binary_records.len(), "read binary records");
        let matrix =
            Self::binary_matrix_from_records(&records, &binary_records, identifier_option)?;
        Self::from_records(records, matrix)
    }

    /// Parameters of the mixture made up of the components at the positions
    /// given in `components`, in that order.
    ///
    /// # Panics
    ///
    /// Panics if a position is out of bounds.
    fn subset(&self, components: &[usize]) -> Result<Self, ParameterError> {
        let (pure, binary) = self.records();
        let selected = components.iter().map(|&k| pure[k].clone()).collect();
        let binary = binary.map(|b| b.select(Axis(0), components).select(Axis(1), components));
        Self::from_records(selected, binary)
    }
}

/// Errors raised while reading or combining parameter records.
#[derive(Error, Debug)]
pub enum ParameterError {
    #[error(transparent)]
    FileIO(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error("Components not found: {0}")]
    ComponentsNotFound(String),
    #[error("The identifier '{0}' is not known. ['name', 'cas', 'refprop_name', 'formula']")]
    IdentifierNotFound(String),
    #[error("No identifier for the given identifier option for pure record {0}.")]
    MissingIdentifier(usize),
    #[error("Parameter information is incomplete.")]
    InsufficientInformation,
    #[error("Inconsistent parameters: {0}")]
    IncompatibleParameters(String),
}

impl std::str::FromStr for IdentifierOption {
    type Err = ParameterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" => Ok(IdentifierOption::Name),
            "cas" => Ok(IdentifierOption::Cas),
            "refprop_name" | "refpropname" => Ok(IdentifierOption::RefpropName),
            "formula" => Ok(IdentifierOption::Formula),
            _ => Err(ParameterError::IdentifierNotFound(s.to_owned())),
        }
    }
}
