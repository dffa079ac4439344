use crate::core::{DEFAULT_MAX_ITERATIONS, DEFAULT_PRECISION};
use crate::ui::types::choices::UIChoice;
use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use strum_macros::{Display, EnumDiscriminants, EnumIter, EnumMessage, EnumString, IntoStaticStr};

fn default_precision() -> f64 {
    DEFAULT_PRECISION
}

fn default_max_iterations() -> u32 {
    DEFAULT_MAX_ITERATIONS
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MeanParameters {
    #[schemars(title = "Data", description = "Values to average, separated by commas")]
    pub data: Vec<f64>,

    #[serde(default = "default_precision")]
    #[schemars(
        title = "Precision",
        description = "Stop once two successive estimates differ by at most this",
        extend("exclusiveMinimum" = 0.0),
        default = "default_precision"
    )]
    pub precision: f64,

    #[serde(default = "default_max_iterations")]
    #[schemars(
        title = "Max Iterations",
        description = "Give up after this many steps without convergence",
        range(min = 1),
        default = "default_max_iterations"
    )]
    pub max_iterations: u32,

    #[serde(default)]
    #[schemars(
        title = "Depth",
        description = "Run exactly this many steps instead of converging (None = converge)"
    )]
    pub depth: Option<u32>,
}

impl Default for MeanParameters {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            precision: DEFAULT_PRECISION,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            depth: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, EnumDiscriminants)]
#[serde(tag = "type", content = "params", rename_all = "kebab-case")]
#[strum_discriminants(name(MeanKind))]
#[strum_discriminants(derive(EnumIter, EnumString, Display, IntoStaticStr, EnumMessage))]
#[strum_discriminants(strum(serialize_all = "kebab-case"))]
pub enum MeanChoice {
    #[strum_discriminants(strum(
        message = "Arithmetic-Geometric Mean",
        detailed_message = "Classic AGM; non-negative data only."
    ))]
    Agm(MeanParameters),

    #[strum_discriminants(strum(
        message = "Geothdian",
        detailed_message = "Geometric, arithmetic and median values iterated together."
    ))]
    Geothdian(MeanParameters),

    #[strum_discriminants(strum(
        message = "Clocks at Sea",
        detailed_message = "Consensus mean that corrects the most divergent reading each step."
    ))]
    ClocksAtSea(MeanParameters),

    #[strum_discriminants(strum(
        message = "Extended AGM",
        detailed_message = "AGM of signed data: positive part minus negative part."
    ))]
    ExtendedAgm(MeanParameters),
}

impl MeanChoice {
    pub fn kind(&self) -> MeanKind {
        MeanKind::from(self)
    }

    pub fn params(&self) -> &MeanParameters {
        match self {
            MeanChoice::Agm(p)
            | MeanChoice::Geothdian(p)
            | MeanChoice::ClocksAtSea(p)
            | MeanChoice::ExtendedAgm(p) => p,
        }
    }

    pub fn with_params(kind: MeanKind, params: MeanParameters) -> Self {
        match kind {
            MeanKind::Agm => MeanChoice::Agm(params),
            MeanKind::Geothdian => MeanChoice::Geothdian(params),
            MeanKind::ClocksAtSea => MeanChoice::ClocksAtSea(params),
            MeanKind::ExtendedAgm => MeanChoice::ExtendedAgm(params),
        }
    }
}

impl UIChoice for MeanChoice {
    type Kind = MeanKind;

    fn schema() -> Schema {
        schema_for!(MeanChoice)
    }

    fn prompt_label() -> &'static str {
        "Choose a mean:"
    }

    fn default_params(kind: Self::Kind) -> Value {
        let sample = match kind {
            MeanKind::ExtendedAgm => vec![-3.0, -1.0, 0.0, 2.0, 4.0],
            _ => vec![1.1, 0.2, 0.3, 1.0],
        };
        json!({
            "data": sample,
            "precision": DEFAULT_PRECISION,
            "max_iterations": DEFAULT_MAX_ITERATIONS,
            "depth": null,
        })
    }
}
