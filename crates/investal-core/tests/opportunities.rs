use investal_core::{derive, prioritize, Answers, Category, Ease, Impact, SortKey, Tag, Urgency};
use pretty_assertions::assert_eq;

fn ids(answers: &Answers) -> Vec<String> {
    derive(answers).into_iter().map(|o| o.id).collect()
}

/// Answers that trip none of the rules.
fn quiet() -> Answers {
    Answers {
        plataformas_integradas: Some("Sí".into()),
        ..Default::default()
    }
}

#[test]
fn each_rule_fires_on_its_own() {
    let cases: Vec<(&str, &str, &str)> = vec![
        ("cuentasVencidas", "Sí", "op1"),
        ("diasCobro", "46", "op2"),
        ("recordatoriosAutomaticos", "No", "op3"),
        ("pagoAdelantado", "Sí", "op4"),
        ("comisionesBancarias", "101", "op5"),
        ("estrategiaFiscal", "No", "op6"),
        ("tasaInteresPromedio", "12.5", "op7"),
        ("capitalInmovilizado", "Sí", "op8"),
    ];

    for (question, value, expected) in cases {
        let mut answers = quiet();
        answers.set(question, Some(value.into())).unwrap();
        assert_eq!(ids(&answers), vec![expected], "{question}={value}");
    }

    let mut answers = quiet();
    answers.set("plataformasIntegradas", Some("No".into())).unwrap();
    assert_eq!(ids(&answers), vec!["op9"]);
}

#[test]
fn non_numeric_and_absent_values_read_as_zero() {
    let mut answers = quiet();
    assert!(derive(&answers).is_empty());

    answers.set("diasCobro", Some("abc".into())).unwrap();
    answers.set("comisionesBancarias", Some("".into())).unwrap();
    answers.set("tasaInteresPromedio", Some("doce".into())).unwrap();
    assert!(derive(&answers).is_empty());
}

#[test]
fn example_answer_set_derives_and_sorts_by_impact() {
    let answers = Answers::from_json(
        r#"{"cuentasVencidas":"Sí","diasCobro":"60","recordatoriosAutomaticos":"No","plataformasIntegradas":"Sí"}"#,
    )
    .unwrap();

    let derived = derive(&answers);
    let order: Vec<&str> = derived.iter().map(|o| o.id.as_str()).collect();
    assert_eq!(order, vec!["op1", "op2", "op3"]);

    let sorted = prioritize(&derived, SortKey::Impact);
    assert_eq!(sorted, derived);

    let by_ease = prioritize(&derived, SortKey::Ease);
    let order: Vec<&str> = by_ease.iter().map(|o| o.id.as_str()).collect();
    assert_eq!(order, vec!["op3", "op1", "op2"]);
}

#[test]
fn unanswered_integration_question_counts_as_not_integrated() {
    let answers =
        Answers::from_json(r#"{"cuentasVencidas":"Sí","diasCobro":"60","recordatoriosAutomaticos":"No"}"#)
            .unwrap();
    assert_eq!(ids(&answers), vec!["op1", "op2", "op3", "op9"]);

    let sorted: Vec<String> = prioritize(&derive(&answers), SortKey::Impact)
        .into_iter()
        .map(|o| o.id)
        .collect();
    assert_eq!(sorted, vec!["op1", "op2", "op3", "op9"]);
}

#[test]
fn derivation_is_deterministic() {
    let answers = Answers::from_json(
        r#"{"pagoAdelantado":"Sí","comisionesBancarias":250,"estrategiaFiscal":"No","tasaInteresPromedio":"18"}"#,
    )
    .unwrap();
    assert_eq!(derive(&answers), derive(&answers));
    assert_eq!(ids(&answers), vec!["op4", "op5", "op6", "op7", "op9"]);
}

#[test]
fn opportunity_attributes_follow_the_rule_table() {
    let answers = Answers::from_json(
        r#"{
            "cuentasVencidas": "Sí",
            "diasCobro": 90,
            "recordatoriosAutomaticos": "No",
            "pagoAdelantado": "Sí",
            "comisionesBancarias": 500,
            "estrategiaFiscal": "No",
            "tasaInteresPromedio": 20,
            "capitalInmovilizado": "Sí"
        }"#,
    )
    .unwrap();

    let derived = derive(&answers);
    let table: Vec<(&str, Category, Impact, Urgency, Ease, Tag)> = derived
        .iter()
        .map(|o| (o.id.as_str(), o.category, o.impact, o.urgency, o.ease, o.tag))
        .collect();

    use Category::*;
    use Ease::*;
    use Impact::*;
    use Tag::*;
    use Urgency::*;
    assert_eq!(
        table,
        vec![
            ("op1", Ingresos, Alto, Alta, Moderado, AhorroInmediato),
            ("op2", Ingresos, Alto, Media, Moderado, CapitalizacionEstrategica),
            ("op3", Ingresos, Medio, Media, Facil, Eficiencia),
            ("op4", Egresos, Alto, Alta, Moderado, CapitalizacionEstrategica),
            ("op5", Egresos, Medio, Media, Facil, AhorroInmediato),
            ("op6", Impuestos, Alto, Alta, Moderado, RiesgoOperativo),
            ("op7", Financiamiento, Alto, Media, Dificil, AhorroInmediato),
            ("op8", Financiamiento, Alto, Media, Dificil, CapitalizacionEstrategica),
            ("op9", Tecnologia, Medio, Media, Dificil, Eficiencia),
        ]
    );
}

#[test]
fn numeric_answers_interpolate_as_text() {
    let answers = Answers::from_json(r#"{"diasCobro":60,"plataformasIntegradas":"Sí"}"#).unwrap();
    let ops = derive(&answers);
    assert_eq!(
        ops[0].description,
        "Tu ciclo de cobro de 60 días podría estar afectando tu liquidez."
    );
}

#[test]
fn opportunities_serialize_with_spanish_labels() {
    let answers = Answers::from_json(r#"{"recordatoriosAutomaticos":"No","plataformasIntegradas":"Sí"}"#)
        .unwrap();
    let json = serde_json::to_value(derive(&answers)).unwrap();
    assert_eq!(json[0]["category"], "Ingresos y Cobros");
    assert_eq!(json[0]["impact"], "Medio");
    assert_eq!(json[0]["ease"], "Fácil");
    assert_eq!(json[0]["tag"], "Eficiencia");
}
