use serde_json::Value;

use crate::{
    DecodeError, TargetReference,
    variant::{Keyed, VariantTable, keyed_serde, single},
};

/// Which targets gather code coverage in autogenerated schemes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeCoverageMode {
    /// Every target.
    All,
    /// Only targets with coverage enabled in at least one scheme.
    Relevant,
    /// Exactly the listed targets.
    Targets(Vec<TargetReference>),
}

impl CodeCoverageMode {
    fn variants() -> VariantTable<Self> {
        VariantTable::new("CodeCoverageMode")
            .flag("all", Self::All)
            .flag("relevant", Self::Relevant)
            .payload("targets", Self::Targets)
    }

    /// Decode from the keyed form, e.g. `{ targets = ["App"] }`.
    pub fn decode(keyed: &Keyed) -> Result<Self, DecodeError> {
        Self::variants().decode(keyed)
    }

    /// Encode into the keyed form.
    pub fn encode(&self) -> Keyed {
        match self {
            Self::All => single("all", Value::Bool(true)),
            Self::Relevant => single("relevant", Value::Bool(true)),
            Self::Targets(targets) => single(
                "targets",
                Value::Array(targets.iter().map(target_value).collect()),
            ),
        }
    }
}

keyed_serde!(CodeCoverageMode);

pub(crate) fn target_value(reference: &TargetReference) -> Value {
    match &reference.project {
        None => Value::String(reference.target.clone()),
        Some(project) => {
            let mut table = single("project", Value::String(project.clone()));
            table.insert("target".into(), Value::String(reference.target.clone()));
            Value::Object(table)
        }
    }
}
