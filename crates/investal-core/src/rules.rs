//! Opportunity rules: one independent check per detected issue.
//!
//! Rules run in table order and every matching rule contributes exactly one
//! opportunity, so the output order is fixed by this file.

use crate::answers::{parse_numeric_answer, AnswerValue};
use crate::{Answers, Category, Ease, Impact, Opportunity, Tag, Urgency};

/// Collection cycle (days) above which op2 fires.
pub const COLLECTION_DAYS_THRESHOLD: f64 = 45.0;

/// Monthly bank commissions (USD) above which op5 fires.
pub const BANK_COMMISSIONS_THRESHOLD: f64 = 100.0;

/// Average annual interest rate (%) above which op7 fires.
pub const INTEREST_RATE_THRESHOLD: f64 = 12.0;

const YES: &str = "Sí";
const NO: &str = "No";

fn is(value: &Option<AnswerValue>, expected: &str) -> bool {
    value.as_ref().is_some_and(|v| v.as_str() == expected)
}

fn raw(value: &Option<AnswerValue>) -> &str {
    value.as_ref().map(AnswerValue::as_str).unwrap_or_default()
}

struct Levels {
    impact: Impact,
    urgency: Urgency,
    ease: Ease,
    tag: Tag,
}

fn opportunity(
    id: &str,
    category: Category,
    title: &str,
    description: String,
    recommendation: &str,
    levels: Levels,
) -> Opportunity {
    Opportunity {
        id: id.to_string(),
        category,
        title: title.to_string(),
        description,
        recommendation: recommendation.to_string(),
        impact: levels.impact,
        urgency: levels.urgency,
        ease: levels.ease,
        tag: levels.tag,
    }
}

/// Derive the opportunities raised by a set of answers.
///
/// Pure and total: unanswered or malformed fields simply fail their checks.
pub fn derive(answers: &Answers) -> Vec<Opportunity> {
    let mut out = Vec::new();

    // Ingresos
    if is(&answers.cuentas_vencidas, YES) {
        out.push(opportunity(
            "op1",
            Category::Ingresos,
            "Cuentas por Cobrar Vencidas",
            "Tienes facturas que tus clientes no han pagado a tiempo.".to_string(),
            "Implementar un sistema de recordatorios automáticos y políticas de cobro más estrictas.",
            Levels { impact: Impact::Alto, urgency: Urgency::Alta, ease: Ease::Moderado, tag: Tag::AhorroInmediato },
        ));
    }
    if parse_numeric_answer(answers.dias_cobro.as_ref()) > COLLECTION_DAYS_THRESHOLD {
        out.push(opportunity(
            "op2",
            Category::Ingresos,
            "Ciclo de Cobro Extendido",
            format!(
                "Tu ciclo de cobro de {} días podría estar afectando tu liquidez.",
                raw(&answers.dias_cobro)
            ),
            "Ofrecer descuentos por pronto pago y renegociar plazos con clientes clave.",
            Levels { impact: Impact::Alto, urgency: Urgency::Media, ease: Ease::Moderado, tag: Tag::CapitalizacionEstrategica },
        ));
    }
    if is(&answers.recordatorios_automaticos, NO) {
        out.push(opportunity(
            "op3",
            Category::Ingresos,
            "Falta de Automatización en Cobros",
            "La gestión manual de recordatorios de cobro consume tiempo y es propensa a errores.".to_string(),
            "Utilizar software de contabilidad con funciones de recordatorio automático para mejorar la eficiencia y reducir el tiempo de cobro.",
            Levels { impact: Impact::Medio, urgency: Urgency::Media, ease: Ease::Facil, tag: Tag::Eficiencia },
        ));
    }

    // Egresos
    if is(&answers.pago_adelantado, YES) {
        out.push(opportunity(
            "op4",
            Category::Egresos,
            "Pago a Proveedores Acelerado",
            "Pagar a proveedores antes de cobrar a clientes puede generar un déficit de caja.".to_string(),
            "Sincronizar los plazos de pago a proveedores con los plazos de cobro de clientes.",
            Levels { impact: Impact::Alto, urgency: Urgency::Alta, ease: Ease::Moderado, tag: Tag::CapitalizacionEstrategica },
        ));
    }
    if parse_numeric_answer(answers.comisiones_bancarias.as_ref()) > BANK_COMMISSIONS_THRESHOLD {
        out.push(opportunity(
            "op5",
            Category::Egresos,
            "Altas Comisiones Bancarias",
            format!(
                "Pagas más de {} USD en comisiones al mes.",
                raw(&answers.comisiones_bancarias)
            ),
            "Negociar con tu banco o explorar otras opciones bancarias con mejores condiciones.",
            Levels { impact: Impact::Medio, urgency: Urgency::Media, ease: Ease::Facil, tag: Tag::AhorroInmediato },
        ));
    }

    // Impuestos
    if is(&answers.estrategia_fiscal, NO) {
        out.push(opportunity(
            "op6",
            Category::Impuestos,
            "Sin Estrategia Fiscal Proactiva",
            "La falta de una estrategia fiscal puede resultar en un pago de impuestos mayor al necesario.".to_string(),
            "Consultar con un asesor fiscal para desarrollar una estrategia que optimice tu carga tributaria aprovechando deducciones y beneficios.",
            Levels { impact: Impact::Alto, urgency: Urgency::Alta, ease: Ease::Moderado, tag: Tag::RiesgoOperativo },
        ));
    }

    // Financiamiento
    if parse_numeric_answer(answers.tasa_interes_promedio.as_ref()) > INTEREST_RATE_THRESHOLD {
        out.push(opportunity(
            "op7",
            Category::Financiamiento,
            "Tasas de Interés Elevadas",
            format!(
                "Tu tasa de interés promedio de {}% podría ser optimizable.",
                raw(&answers.tasa_interes_promedio)
            ),
            "Explorar opciones de refinanciamiento o consolidación de deuda para obtener mejores tasas.",
            Levels { impact: Impact::Alto, urgency: Urgency::Media, ease: Ease::Dificil, tag: Tag::AhorroInmediato },
        ));
    }
    if is(&answers.capital_inmovilizado, YES) {
        out.push(opportunity(
            "op8",
            Category::Financiamiento,
            "Capital Inmovilizado",
            "Tener capital mal asignado o inmovilizado frena el potencial de crecimiento.".to_string(),
            "Realizar un análisis de la estructura de capital para identificar y reasignar fondos a áreas de mayor rendimiento o necesidad estratégica.",
            Levels { impact: Impact::Alto, urgency: Urgency::Media, ease: Ease::Dificil, tag: Tag::CapitalizacionEstrategica },
        ));
    }

    // Tecnología: anything but an explicit "Sí", including no answer at all.
    if !is(&answers.plataformas_integradas, YES) {
        out.push(opportunity(
            "op9",
            Category::Tecnologia,
            "Falta de Integración Tecnológica",
            "Sistemas financieros no integrados generan ineficiencias y dificultan la toma de decisiones.".to_string(),
            "Invertir en un ERP o middleware que conecte tus plataformas clave (bancos, facturación, contabilidad) para tener una visión unificada.",
            Levels { impact: Impact::Medio, urgency: Urgency::Media, ease: Ease::Dificil, tag: Tag::Eficiencia },
        ));
    }

    tracing::debug!(count = out.len(), "derived opportunities");
    out
}
