//! Tool bodies, kept free of MCP types so they can be tested directly.
//!
//! Every function returns the text payload for a successful call, or an error
//! message to be reported back as a tool error.

use investal_core::questions::{questions_in, Question, QUESTIONS};
use investal_core::simulator::monthly_tax_savings;
use investal_core::{
    derive, estimate_tax_savings, prioritize, Answers, Category, EntityType, Levers, Opportunity,
    SimulationSummary, SortKey, Store,
};

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("Serialization error: {e}"))
}

/// Pick the answer set a tool call refers to: inline JSON or a saved diagnostic.
pub fn resolve_answers(
    store: &Store,
    answers: Option<&str>,
    diagnostic: Option<&str>,
) -> Result<Answers, String> {
    match (answers, diagnostic) {
        (Some(_), Some(_)) => Err("Provide either `answers` or `diagnostic`, not both.".to_string()),
        (Some(raw), None) => {
            Answers::from_json(raw).map_err(|e| format!("Invalid answers: {e}"))
        }
        (None, Some(name)) => store
            .read_answers(name)
            .map_err(|e| format!("Failed to read diagnostic '{name}': {e}")),
        (None, None) => Err("Provide `answers` (JSON object) or `diagnostic` (saved name).".to_string()),
    }
}

pub fn list_questions(category: Option<Category>) -> Result<String, String> {
    let questions: Vec<&Question> = match category {
        Some(c) => questions_in(c).collect(),
        None => QUESTIONS.iter().collect(),
    };
    to_json(&questions)
}

/// Derive opportunities and order them by `sort` (lenient; unknown keys keep rule order).
pub fn derive_sorted(answers: &Answers, sort: Option<&str>) -> Vec<Opportunity> {
    let key = sort.map(SortKey::parse).unwrap_or_default();
    prioritize(&derive(answers), key)
}

pub fn derive_opportunities(answers: &Answers, sort: Option<&str>) -> Result<String, String> {
    to_json(&derive_sorted(answers, sort))
}

pub fn prioritize_opportunities(raw: &str, sort: &str) -> Result<String, String> {
    let opportunities: Vec<Opportunity> =
        serde_json::from_str(raw).map_err(|e| format!("Invalid opportunities JSON: {e}"))?;
    to_json(&prioritize(&opportunities, SortKey::parse(sort)))
}

/// Start from the answers' levers (or the baseline) and apply explicit overrides.
pub fn levers_for(
    answers: Option<&Answers>,
    collection_days: Option<f64>,
    interest_rate: Option<f64>,
    tax_rate: Option<f64>,
) -> Levers {
    let base = answers.map(Levers::from_answers).unwrap_or_default();
    Levers {
        collection_days: collection_days.unwrap_or(base.collection_days),
        interest_rate: interest_rate.unwrap_or(base.interest_rate),
        tax_rate: tax_rate.unwrap_or(base.tax_rate),
    }
}

pub fn simulate_cashflow(levers: Levers) -> Result<String, String> {
    let months = levers.simulate();
    let summary = SimulationSummary::from_points(&months);
    to_json(&serde_json::json!({
        "levers": levers,
        "months": months,
        "summary": summary,
        "monthlyTaxSavings": monthly_tax_savings(levers.tax_rate).round(),
    }))
}

pub fn estimate_tax(monthly_flow: f64, entity: EntityType) -> Result<String, String> {
    if !monthly_flow.is_finite() {
        return Err("monthly_flow must be a finite number".to_string());
    }
    to_json(&estimate_tax_savings(monthly_flow, entity))
}

pub fn save_answers(store: &Store, name: &str, raw: &str) -> Result<String, String> {
    let answers = Answers::from_json(raw).map_err(|e| format!("Invalid answers: {e}"))?;
    store
        .write_answers(name, &answers)
        .map_err(|e| format!("Failed to save diagnostic '{name}': {e}"))?;
    Ok(format!(
        "Saved diagnostic '{}' ({} of {} questions answered)",
        name,
        answers.answered(),
        Answers::QUESTION_IDS.len()
    ))
}

pub fn get_answers(store: &Store, name: &str) -> Result<String, String> {
    let answers = store
        .read_answers(name)
        .map_err(|e| format!("Failed to read diagnostic '{name}': {e}"))?;
    to_json(&answers)
}

pub fn list_diagnostics(store: &Store) -> Result<String, String> {
    let names = store.list_diagnostics().map_err(|e| e.to_string())?;
    Ok(if names.is_empty() {
        "No diagnostics saved. Use save_answers to create one.".to_string()
    } else {
        names.join("\n")
    })
}

pub fn delete_answers(store: &Store, name: &str) -> Result<String, String> {
    store
        .delete_answers(name)
        .map_err(|e| format!("Failed to delete diagnostic '{name}': {e}"))?;
    Ok(format!("Deleted diagnostic '{name}'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn store() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::at(dir.path());
        (dir, store)
    }

    #[test]
    fn resolve_requires_exactly_one_source() {
        let (_dir, store) = store();
        assert!(resolve_answers(&store, None, None).is_err());
        assert!(resolve_answers(&store, Some("{}"), Some("acme")).is_err());
        assert_eq!(resolve_answers(&store, Some("{}"), None).unwrap(), Answers::default());

        let err = resolve_answers(&store, Some(r#"{"color":"red"}"#), None).unwrap_err();
        assert!(err.contains("color"), "{err}");

        let err = resolve_answers(&store, None, Some("acme")).unwrap_err();
        assert!(err.contains("not found"), "{err}");
    }

    #[test]
    fn saved_diagnostics_feed_derivation() {
        let (_dir, store) = store();
        let msg = save_answers(
            &store,
            "acme",
            r#"{"cuentasVencidas":"Sí","diasCobro":60,"recordatoriosAutomaticos":"No","plataformasIntegradas":"Sí"}"#,
        )
        .unwrap();
        assert_eq!(msg, "Saved diagnostic 'acme' (4 of 29 questions answered)");
        assert_eq!(list_diagnostics(&store).unwrap(), "acme");

        let answers = resolve_answers(&store, None, Some("acme")).unwrap();
        let ids: Vec<String> = derive_sorted(&answers, Some("ease"))
            .into_iter()
            .map(|o| o.id)
            .collect();
        assert_eq!(ids, vec!["op3", "op1", "op2"]);

        delete_answers(&store, "acme").unwrap();
        assert!(list_diagnostics(&store).unwrap().starts_with("No diagnostics"));
    }

    #[test]
    fn prioritize_round_trips_derived_json() {
        let answers = Answers::from_json(r#"{"recordatoriosAutomaticos":"No","cuentasVencidas":"Sí"}"#)
            .unwrap();
        let raw = derive_opportunities(&answers, None).unwrap();
        let sorted: Vec<Opportunity> =
            serde_json::from_str(&prioritize_opportunities(&raw, "ease").unwrap()).unwrap();
        let ids: Vec<&str> = sorted.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["op3", "op1", "op9"]);

        assert!(prioritize_opportunities("not json", "impact").is_err());
    }

    #[test]
    fn levers_merge_answers_and_overrides() {
        let answers = Answers::from_json(r#"{"diasCobro":"60","porcentajeImpuestos":"25"}"#).unwrap();
        let levers = levers_for(Some(&answers), None, Some(10.0), None);
        assert_eq!(
            levers,
            Levers { collection_days: 60.0, interest_rate: 10.0, tax_rate: 25.0 }
        );
        assert_eq!(levers_for(None, None, None, None), Levers::default());
    }

    #[test]
    fn simulation_payload_includes_summary() {
        let json: serde_json::Value =
            serde_json::from_str(&simulate_cashflow(levers_for(None, Some(30.0), None, None)).unwrap())
                .unwrap();
        assert_eq!(json["months"].as_array().unwrap().len(), 12);
        assert_eq!(json["summary"]["annualImprovement"], 50_000.0);
        assert_eq!(json["monthlyTaxSavings"], 0.0);
        assert_eq!(json["levers"]["collectionDays"], 30.0);
    }

    #[test]
    fn simulation_from_saved_diagnostic_with_huge_answers() {
        let (_dir, store) = store();
        save_answers(&store, "outlier", r#"{"diasCobro":"-1e20"}"#).unwrap();
        let answers = resolve_answers(&store, None, Some("outlier")).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&simulate_cashflow(levers_for(Some(&answers), None, None, None)).unwrap())
                .unwrap();
        let improvement = json["summary"]["annualImprovement"].as_f64().unwrap();
        assert!(improvement > 3e23, "{improvement}");
        assert_eq!(json["summary"]["totalActual"], 252_000.0);
    }

    #[test]
    fn tax_estimate_payload() {
        let json: serde_json::Value =
            serde_json::from_str(&estimate_tax(100_000.0, EntityType::Moral).unwrap()).unwrap();
        assert!((json["savings"].as_f64().unwrap() - 282_000.0).abs() < 1e-6);
        assert!(estimate_tax(f64::NAN, EntityType::Moral).is_err());
    }

    #[test]
    fn questions_filter_by_category() {
        let all: Vec<serde_json::Value> = serde_json::from_str(&list_questions(None).unwrap()).unwrap();
        assert_eq!(all.len(), 29);
        let legal: Vec<serde_json::Value> =
            serde_json::from_str(&list_questions(Some(Category::Legal)).unwrap()).unwrap();
        assert_eq!(legal.len(), 2);
        assert_eq!(legal[0]["id"], "contratosImpactoFinanciero");
    }
}
