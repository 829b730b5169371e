use investal_core::Opportunity;

/// Render opportunities as `"{n}. {title}: {recommendation}"` lines, numbered from 1.
pub fn opportunity_lines(opportunities: &[Opportunity]) -> String {
    opportunities
        .iter()
        .enumerate()
        .map(|(i, op)| format!("{}. {}: {}", i + 1, op.title, op.recommendation))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn system_prompt() -> String {
    "Actúa como un consultor financiero experto para una pequeña o mediana empresa.\n\
Basado en las oportunidades financieras identificadas que te compartirá el usuario, \
genera un plan de acción sugerido, conciso y práctico.\n\
El plan debe ser fácil de entender y enfocado en los próximos 90 días.\n\
Organiza el plan en pasos claros. Usa un tono profesional pero alentador."
        .to_string()
}

pub fn user_message(opportunities: &[Opportunity]) -> String {
    format!(
        "Oportunidades Identificadas:\n{}\n\nGenera el plan de acción ahora.",
        opportunity_lines(opportunities)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use investal_core::{derive, Answers};
    use pretty_assertions::assert_eq;

    #[test]
    fn lines_are_numbered_from_one() {
        let answers = Answers {
            cuentas_vencidas: Some("Sí".into()),
            plataformas_integradas: Some("No".into()),
            ..Default::default()
        };
        let lines = opportunity_lines(&derive(&answers));
        assert_eq!(
            lines,
            "1. Cuentas por Cobrar Vencidas: Implementar un sistema de recordatorios automáticos y políticas de cobro más estrictas.\n\
2. Falta de Integración Tecnológica: Invertir en un ERP o middleware que conecte tus plataformas clave (bancos, facturación, contabilidad) para tener una visión unificada."
        );
    }

    #[test]
    fn user_message_wraps_the_list() {
        let msg = user_message(&[]);
        assert!(msg.starts_with("Oportunidades Identificadas:\n"));
        assert!(msg.ends_with("Genera el plan de acción ahora."));
    }

    #[test]
    fn system_prompt_sets_the_horizon() {
        assert!(system_prompt().contains("90 días"));
    }
}
