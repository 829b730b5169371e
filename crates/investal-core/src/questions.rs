//! The diagnostic questionnaire.

use serde::Serialize;

use crate::Category;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Radio,
    Number,
    Text,
}

#[derive(Debug, Clone, Serialize)]
pub struct Question {
    pub id: &'static str,
    pub category: Category,
    pub text: &'static str,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    #[serde(skip_serializing_if = "no_options")]
    pub options: &'static [&'static str],
}

fn no_options(options: &&[&str]) -> bool {
    options.is_empty()
}

const YES_NO: &[&str] = &["Sí", "No"];
const YES_NO_UNSURE: &[&str] = &["Sí", "No", "No estoy seguro"];
const YES_NO_PARTIAL: &[&str] = &["Sí", "No", "Parcialmente"];

const fn radio(
    id: &'static str,
    category: Category,
    text: &'static str,
    options: &'static [&'static str],
) -> Question {
    Question { id, category, text, kind: QuestionKind::Radio, options }
}

const fn number(id: &'static str, category: Category, text: &'static str) -> Question {
    Question { id, category, text, kind: QuestionKind::Number, options: &[] }
}

const fn text(id: &'static str, category: Category, text: &'static str) -> Question {
    Question { id, category, text, kind: QuestionKind::Text, options: &[] }
}

use Category::*;

pub static QUESTIONS: &[Question] = &[
    // Ingresos y Cobros
    radio("cuentasVencidas", Ingresos, "¿Tienes cuentas por cobrar vencidas?", YES_NO),
    number("diasCobro", Ingresos, "¿Cuántos días en promedio tardan en pagarte?"),
    radio("clientesConcentrados", Ingresos, "¿Tienes clientes que concentran más del 30% de tus ingresos?", YES_NO),
    radio("cobroDigital", Ingresos, "¿Usas plataformas de cobro digital?", YES_NO),
    number("comisionesCobro", Ingresos, "¿Cuánto pagas en comisiones por procesamiento de pagos? (%)"),
    radio("penalizaciones", Ingresos, "¿Tienes penalizaciones por pago tardío activas?", YES_NO),
    radio("recordatoriosAutomaticos", Ingresos, "¿Automatizas tus recordatorios de cobro?", YES_NO),
    // Egresos y Pagos
    radio("pagosCalendarizados", Egresos, "¿Tienes calendarizado tu flujo de pagos?", YES_NO),
    radio("pagoAdelantado", Egresos, "¿Pagas proveedores antes de cobrar a tus clientes?", YES_NO),
    number("comisionesBancarias", Egresos, "¿Cuánto pagas en comisiones bancarias al mes? (USD)"),
    radio("pagosDuplicados", Egresos, "¿Tienes pagos duplicados o sin contrato vigente?", YES_NO_UNSURE),
    radio("pagoMonedaExtranjera", Egresos, "¿Pagas en moneda extranjera?", YES_NO),
    radio("coberturaCambiaria", Egresos, "¿Tienes cobertura cambiaria?", YES_NO),
    radio("pagosRecurrentesAuto", Egresos, "¿Automatizas pagos recurrentes?", YES_NO),
    // Impuestos y Fiscalidad
    radio("estrategiaFiscal", Impuestos, "¿Tienes una estrategia fiscal activa?", YES_NO),
    number("porcentajeImpuestos", Impuestos, "¿Qué porcentaje de tus ingresos se va en impuestos?"),
    radio("aprovechaDeducciones", Impuestos, "¿Aprovechas todas las deducciones legales posibles?", YES_NO_UNSURE),
    radio("pagosProvisionalesAlineados", Impuestos, "¿Pagas provisionales alineados con tu flujo real?", YES_NO),
    // Financiamiento
    radio("creditosActivos", Financiamiento, "¿Tienes créditos activos?", YES_NO),
    number("tasaInteresPromedio", Financiamiento, "¿Cuál es tu tasa promedio de interés anual? (%)"),
    radio("simuladoReestructura", Financiamiento, "¿Has simulado escenarios de pago o reestructura?", YES_NO),
    radio("capitalInmovilizado", Financiamiento, "¿Tienes capital inmovilizado o mal asignado?", YES_NO_UNSURE),
    // Tecnología y Visualización
    text("herramientasFlujo", Tecnologia, "¿Qué herramientas usas para visualizar tu flujo? (Ej. Excel, ERP, Software especializado)"),
    radio("plataformasIntegradas", Tecnologia, "¿Tus plataformas financieras están integradas?", YES_NO_PARTIAL),
    radio("reportesAutomaticos", Tecnologia, "¿Automatizas reportes financieros?", YES_NO),
    // Sensibilidad y Escenarios
    radio("simuladoEscenarios", Escenarios, "¿Has simulado escenarios de crecimiento o contracción?", YES_NO),
    radio("sensibilidadIngresos", Escenarios, "¿Sabes cómo cambia tu flujo si tus ingresos bajan 20%?", YES_NO),
    // Contratos y Legal
    radio("contratosImpactoFinanciero", Legal, "¿Tienes contratos con impacto financiero directo?", YES_NO),
    radio("revisionClausulas", Legal, "¿Revisas cláusulas de pago, penalización o rescisión regularmente?", YES_NO),
];

/// Questions shown on one step of the questionnaire.
pub fn questions_in(category: Category) -> impl Iterator<Item = &'static Question> {
    QUESTIONS.iter().filter(move |q| q.category == category)
}

pub fn find_question(id: &str) -> Option<&'static Question> {
    QUESTIONS.iter().find(|q| q.id == id)
}
