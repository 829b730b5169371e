pub mod answers;
pub mod error;
pub mod priority;
pub mod questions;
pub mod rules;
pub mod simulator;
pub mod store;
pub mod tax;

use serde::{Deserialize, Serialize};

pub use answers::{parse_numeric_answer, AnswerValue, Answers};
pub use error::CoreError;
pub use priority::{prioritize, priority_rank, SortKey};
pub use rules::derive;
pub use simulator::{simulate, Levers, MonthlyPoint, SimulationSummary};
pub use store::{AdvisorSettings, Store};
pub use tax::{estimate_tax_savings, EntityType, TaxSavingsEstimate};

// --- Types ---

/// Business domain an opportunity (and the question that raised it) belongs to.
///
/// Variants are declared in questionnaire order; [`Category::ALL`] relies on it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, schemars::JsonSchema)]
pub enum Category {
    #[serde(rename = "Ingresos y Cobros")]
    Ingresos,
    #[serde(rename = "Egresos y Pagos")]
    Egresos,
    #[serde(rename = "Impuestos y Fiscalidad")]
    Impuestos,
    #[serde(rename = "Financiamiento")]
    Financiamiento,
    #[serde(rename = "Tecnología y Visualización")]
    Tecnologia,
    #[serde(rename = "Sensibilidad y Escenarios")]
    Escenarios,
    #[serde(rename = "Contratos y Legal")]
    Legal,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Ingresos,
        Category::Egresos,
        Category::Impuestos,
        Category::Financiamiento,
        Category::Tecnologia,
        Category::Escenarios,
        Category::Legal,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Ingresos => "Ingresos y Cobros",
            Category::Egresos => "Egresos y Pagos",
            Category::Impuestos => "Impuestos y Fiscalidad",
            Category::Financiamiento => "Financiamiento",
            Category::Tecnologia => "Tecnología y Visualización",
            Category::Escenarios => "Sensibilidad y Escenarios",
            Category::Legal => "Contratos y Legal",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Impact {
    Alto,
    Medio,
    Bajo,
}

impl Impact {
    pub fn label(self) -> &'static str {
        match self {
            Impact::Alto => "Alto",
            Impact::Medio => "Medio",
            Impact::Bajo => "Bajo",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Urgency {
    Alta,
    Media,
    Baja,
}

impl Urgency {
    pub fn label(self) -> &'static str {
        match self {
            Urgency::Alta => "Alta",
            Urgency::Media => "Media",
            Urgency::Baja => "Baja",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Ease {
    #[serde(rename = "Fácil")]
    Facil,
    Moderado,
    #[serde(rename = "Difícil")]
    Dificil,
}

impl Ease {
    pub fn label(self) -> &'static str {
        match self {
            Ease::Facil => "Fácil",
            Ease::Moderado => "Moderado",
            Ease::Dificil => "Difícil",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Tag {
    #[serde(rename = "Ahorro inmediato")]
    AhorroInmediato,
    #[serde(rename = "Capitalización estratégica")]
    CapitalizacionEstrategica,
    #[serde(rename = "Riesgo operativo")]
    RiesgoOperativo,
    #[serde(rename = "Eficiencia")]
    Eficiencia,
}

impl Tag {
    pub fn label(self) -> &'static str {
        match self {
            Tag::AhorroInmediato => "Ahorro inmediato",
            Tag::CapitalizacionEstrategica => "Capitalización estratégica",
            Tag::RiesgoOperativo => "Riesgo operativo",
            Tag::Eficiencia => "Eficiencia",
        }
    }
}

/// One detected issue in a company's cash flow, with a suggested remedy.
///
/// Opportunities are recomputed from [`Answers`] on demand and never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Opportunity {
    pub id: String,
    pub category: Category,
    pub title: String,
    pub description: String,
    pub recommendation: String,
    pub impact: Impact,
    pub urgency: Urgency,
    pub ease: Ease,
    pub tag: Tag,
}
