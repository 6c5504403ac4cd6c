use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// The field of an [Identifier] that is used to look up a fluid.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierOption {
    /// Common name of the fluid, including its aliases
    Name,
    Cas,
    /// Name of the fluid file in REFPROP
    RefpropName,
    Formula,
}

/// Names and numbers under which a fluid is known.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Identifier {
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// CAS number
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cas: Option<String>,
    /// Alternative names under which the fluid can be found
    #[serde(default)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refprop_name: Option<String>,
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
}

impl Identifier {
    /// Create a new identifier without aliases.
    ///
    /// # Examples
    ///
    /// ```
    /// # use multifluid_core::parameter::Identifier;
    /// let ethane = Identifier::new(Some("Ethane"), Some("74-84-0"), Some("ETHANE"), Some("C2H6"));
    /// assert_eq!(ethane.to_string(), "Identifier(name=Ethane, cas=74-84-0, refprop_name=ETHANE, formula=C2H6)");
    /// ```
    pub fn new(
        name: Option<&str>,
        cas: Option<&str>,
        refprop_name: Option<&str>,
        formula: Option<&str>,
    ) -> Identifier {
        Identifier {
            name: name.map(Into::into),
            cas: cas.map(Into::into),
            aliases: Vec::new(),
            refprop_name: refprop_name.map(Into::into),
            formula: formula.map(Into::into),
        }
    }

    /// Add alternative names to the identifier.
    pub fn with_aliases<I: IntoIterator<Item = S>, S: Into<String>>(mut self, aliases: I) -> Self {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    /// The primary identifier for the given option.
    pub fn as_string(&self, option: IdentifierOption) -> Option<String> {
        let field = match option {
            IdentifierOption::Name => &self.name,
            IdentifierOption::Cas => &self.cas,
            IdentifierOption::RefpropName => &self.refprop_name,
            IdentifierOption::Formula => &self.formula,
        };
        field.clone()
    }

    /// Whether the fluid is known under `key` for the given option.
    ///
    /// Names are also compared against the aliases of the fluid.
    pub fn matches(&self, key: &str, option: IdentifierOption) -> bool {
        if self.as_string(option).as_deref() == Some(key) {
            return true;
        }
        option == IdentifierOption::Name && self.aliases.iter().any(|a| a == key)
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let aliases = (!self.aliases.is_empty()).then(|| format!("[{}]", self.aliases.join(", ")));
        let fields = [
            ("name", self.name.as_ref()),
            ("cas", self.cas.as_ref()),
            ("aliases", aliases.as_ref()),
            ("refprop_name", self.refprop_name.as_ref()),
            ("formula", self.formula.as_ref()),
        ];
        let set: Vec<String> = fields
            .iter()
            .filter_map(|(key, value)| value.map(|v| format!("{key}={v}")))
            .collect();
        write!(f, "Identifier({})", set.join(", "))
    }
}

// Two identifiers describe the same fluid if name and CAS number agree.
impl PartialEq for Identifier {
    fn eq(&self, other: &Self) -> bool {
        (&self.name, &self.cas) == (&other.name, &other.cas)
    }
}

impl Eq for Identifier {}

impl Hash for Identifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (&self.name, &self.cas).hash(state);
    }
}
