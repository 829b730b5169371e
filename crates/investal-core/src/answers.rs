//! Questionnaire answers.
//!
//! An [`Answers`] record carries one optional field per question id. Raw input
//! (a JSON object keyed by question id) is normalized at the parsing boundary:
//! unknown ids are rejected, `null` means "not answered", and numbers are kept
//! as their textual form so descriptions can quote them verbatim.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::CoreError;

/// A single answer: free text, a radio option, or a number kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AnswerValue(String);

impl AnswerValue {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AnswerValue {
    fn from(s: &str) -> Self {
        AnswerValue(s.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(s: String) -> Self {
        AnswerValue(s)
    }
}

impl<'de> Deserialize<'de> for AnswerValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => AnswerValue(s),
            Raw::Number(n) => AnswerValue(n.to_string()),
        })
    }
}

/// Coerce an answer to a number for threshold checks.
///
/// Absent, blank, non-numeric and non-finite values all read as `0`. Parsing
/// follows Rust's `f64` grammar: decimal and exponent forms only, so `"0x1F"`
/// reads as `0`, and `"inf"` or `"NaN"` in any case also read as `0`.
pub fn parse_numeric_answer(value: Option<&AnswerValue>) -> f64 {
    let Some(value) = value else {
        return 0.0;
    };
    let trimmed = value.as_str().trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => 0.0,
    }
}

macro_rules! answer_fields {
    ($($field:ident => $id:literal),+ $(,)?) => {
        /// Answers to the diagnostic questionnaire. Unanswered questions are `None`.
        #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(deny_unknown_fields)]
        pub struct Answers {
            $(
                #[serde(rename = $id, default, skip_serializing_if = "Option::is_none")]
                pub $field: Option<AnswerValue>,
            )+
        }

        impl Answers {
            /// Every question id an answer set can carry, in questionnaire order.
            pub const QUESTION_IDS: &'static [&'static str] = &[$($id),+];

            pub fn get(&self, id: &str) -> Option<&AnswerValue> {
                match id {
                    $($id => self.$field.as_ref(),)+
                    _ => None,
                }
            }

            pub fn set(&mut self, id: &str, value: Option<AnswerValue>) -> Result<(), CoreError> {
                match id {
                    $($id => self.$field = value,)+
                    _ => return Err(CoreError::UnknownQuestion { key: id.to_string() }),
                }
                Ok(())
            }
        }
    };
}

answer_fields! {
    cuentas_vencidas => "cuentasVencidas",
    dias_cobro => "diasCobro",
    clientes_concentrados => "clientesConcentrados",
    cobro_digital => "cobroDigital",
    comisiones_cobro => "comisionesCobro",
    penalizaciones => "penalizaciones",
    recordatorios_automaticos => "recordatoriosAutomaticos",
    pagos_calendarizados => "pagosCalendarizados",
    pago_adelantado => "pagoAdelantado",
    comisiones_bancarias => "comisionesBancarias",
    pagos_duplicados => "pagosDuplicados",
    pago_moneda_extranjera => "pagoMonedaExtranjera",
    cobertura_cambiaria => "coberturaCambiaria",
    pagos_recurrentes_auto => "pagosRecurrentesAuto",
    estrategia_fiscal => "estrategiaFiscal",
    porcentaje_impuestos => "porcentajeImpuestos",
    aprovecha_deducciones => "aprovechaDeducciones",
    pagos_provisionales_alineados => "pagosProvisionalesAlineados",
    creditos_activos => "creditosActivos",
    tasa_interes_promedio => "tasaInteresPromedio",
    simulado_reestructura => "simuladoReestructura",
    capital_inmovilizado => "capitalInmovilizado",
    herramientas_flujo => "herramientasFlujo",
    plataformas_integradas => "plataformasIntegradas",
    reportes_automaticos => "reportesAutomaticos",
    simulado_escenarios => "simuladoEscenarios",
    sensibilidad_ingresos => "sensibilidadIngresos",
    contratos_impacto_financiero => "contratosImpactoFinanciero",
    revision_clausulas => "revisionClausulas",
}

impl Answers {
    /// Parse a raw JSON object of `questionId -> value`.
    pub fn from_json(raw: &str) -> Result<Answers, CoreError> {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        Answers::from_value(value)
    }

    /// Normalize a raw JSON value into typed answers.
    ///
    /// Strings and numbers are accepted, `null` leaves the question unanswered,
    /// anything else is an error. Unknown question ids are rejected.
    pub fn from_value(value: serde_json::Value) -> Result<Answers, CoreError> {
        let serde_json::Value::Object(map) = value else {
            return Err(CoreError::NotAnObject);
        };

        let mut answers = Answers::default();
        for (key, raw) in map {
            let value = match raw {
                serde_json::Value::Null => None,
                serde_json::Value::String(s) => Some(AnswerValue(s)),
                serde_json::Value::Number(n) => Some(AnswerValue(n.to_string())),
                _ => return Err(CoreError::InvalidAnswerValue { key }),
            };
            answers.set(&key, value)?;
        }
        Ok(answers)
    }

    /// Numeric reading of an answer by question id (see [`parse_numeric_answer`]).
    pub fn numeric(&self, id: &str) -> f64 {
        parse_numeric_answer(self.get(id))
    }

    /// Number of answered questions.
    pub fn answered(&self) -> usize {
        Self::QUESTION_IDS
            .iter()
            .filter(|id| self.get(id).is_some())
            .count()
    }
}
