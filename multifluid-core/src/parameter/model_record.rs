use super::identifier::Identifier;
use super::{IdentifierOption, ParameterError};
use indexmap::IndexSet;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Model parameters of a single fluid together with its identifier.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PureRecord<M> {
    pub identifier: Identifier,
    pub model_record: M,
}

impl<M> PureRecord<M> {
    pub fn new(identifier: Identifier, model_record: M) -> Self {
        Self {
            identifier,
            model_record,
        }
    }

    /// Read the records of `substances` from a json file containing a list of
    /// pure records.
    ///
    /// The records are returned in the order of `substances`. Names are
    /// also matched against aliases.
    pub fn from_json<P>(
        substances: &[&str],
        file: P,
        identifier_option: IdentifierOption,
    ) -> Result<Vec<Self>, ParameterError>
    where
        P: AsRef<Path>,
        M: DeserializeOwned + Clone,
    {
        let queried: IndexSet<&str> = substances.iter().copied().collect();
        if queried.len() < substances.len() {
            return Err(ParameterError::IncompatibleParameters(format!(
                "duplicate substances in {:?}",
                substances
            )));
        }

        let available: Vec<Self> = serde_json::from_reader(BufReader::new(File::open(file)?))?;
        let mut slots: Vec<Option<Self>> = vec![None; queried.len()];
        for record in available {
            // the first record matching a substance wins
            if let Some(k) = queried
                .iter()
                .position(|s| record.identifier.matches(s, identifier_option))
            {
                if slots[k].is_none() {
                    slots[k] = Some(record);
                }
            }
        }

        let missing: Vec<&str> = queried
            .iter()
            .zip(&slots)
            .filter(|(_, r)| r.is_none())
            .map(|(&s, _)| s)
            .collect();
        if missing.is_empty() {
            Ok(slots.into_iter().flatten().collect())
        } else {
            Err(ParameterError::ComponentsNotFound(missing.join(", ")))
        }
    }
}

impl<M> std::fmt::Display for PureRecord<M>
where
    M: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "PureRecord(")?;
        writeln!(f, "\tidentifier={},", self.identifier)?;
        writeln!(f, "\tmodel_record={},", self.model_record)?;
        write!(f, ")")
    }
}

/// Interaction parameters of a pair of fluids.
///
/// The order of `id1` and `id2` matters for asymmetric interaction parameters.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BinaryRecord<I, B> {
    pub id1: I,
    pub id2: I,
    pub model_record: B,
}

impl<I, B> BinaryRecord<I, B> {
    pub fn new(id1: I, id2: I, model_record: B) -> Self {
        Self {
            id1,
            id2,
            model_record,
        }
    }

    /// All binary records stored in a json file.
    pub fn from_json<P: AsRef<Path>>(file: P) -> Result<Vec<Self>, ParameterError>
    where
        I: DeserializeOwned,
        B: DeserializeOwned,
    {
        Ok(serde_json::from_reader(BufReader::new(File::open(file)?))?)
    }
}

impl<I, B> std::fmt::Display for BinaryRecord<I, B>
where
    I: std::fmt::Display,
    B: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "BinaryRecord(")?;
        writeln!(f, "\tid1={},", self.id1)?;
        writeln!(f, "\tid2={},", self.id2)?;
        writeln!(f, "\tmodel_record={},", self.model_record)?;
        write!(f, ")")
    }
}
