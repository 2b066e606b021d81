#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use tabled::{
    Table, Tabled,
    settings::{Modify, Panel, Style, Width, object::Rows},
};

use crate::{
    constants::{NO_GRADE_SENTINEL, NO_GRADE_VALUE},
    objects::{GraphicValue, ResultWithDetails, ResultWithoutDetails},
};

#[derive(Tabled, Debug, Clone)]
/// One line of the results overview.
pub struct ResultRow {
    /// Date of the evaluation, without the time part.
    #[tabled(rename = "Date")]
    date:      String,
    /// Course names.
    #[tabled(rename = "Course")]
    course:    String,
    /// Component name.
    #[tabled(rename = "Component")]
    component: String,
    /// Evaluation title.
    #[tabled(rename = "Name")]
    name:      String,
    /// Rendered score.
    #[tabled(rename = "Score")]
    score:     String,
}

#[derive(Tabled, Debug, Clone)]
/// One field of a detail record.
struct DetailRow {
    /// Field label.
    #[tabled(rename = "Field")]
    field: String,
    /// Field value.
    #[tabled(rename = "Value")]
    value: String,
}

impl DetailRow {
    /// Builds a row from a label and a value.
    fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Renders a score the way the portal shows it, preferring its own
/// description.
fn score_of(result: &ResultWithoutDetails) -> String {
    let graphic = &result.graphic;
    if let Some(description) = graphic.description.as_deref()
        && !description.is_empty()
    {
        return description.to_string();
    }

    match &graphic.value {
        GraphicValue::Number(n) if n.as_i64() == Some(NO_GRADE_VALUE) && graphic.is_percentage() => {
            NO_GRADE_SENTINEL.to_string()
        }
        GraphicValue::Number(n) if graphic.is_percentage() => format!("{n}%"),
        value => value.to_string(),
    }
}

impl From<&ResultWithoutDetails> for ResultRow {
    fn from(result: &ResultWithoutDetails) -> Self {
        Self {
            date:      result.date.split('T').next().unwrap_or_default().to_string(),
            course:    result.course_names(),
            component: result.component_name().to_string(),
            name:      result.name.clone(),
            score:     score_of(result),
        }
    }
}

/// Formats a list of results as a table.
pub fn results_table(results: &[ResultWithoutDetails]) -> String {
    let rows: Vec<ResultRow> = results.iter().map(ResultRow::from).collect();
    Table::new(&rows)
        .with(Panel::footer(format!("{} results", rows.len())))
        .with(Modify::new(Rows::new(1..)).with(Width::wrap(32).keep_words(true)))
        .with(Style::modern())
        .to_string()
}

/// Formats a single detail record as a two-column key/value table.
pub fn detail_table(result: &ResultWithDetails) -> String {
    let mut rows = vec![
        DetailRow::new("Identifier", result.identifier.as_str()),
        DetailRow::new("Name", result.name.as_str()),
        DetailRow::new("Date", result.date.as_str()),
        DetailRow::new("Course", result.course_names()),
        DetailRow::new("Component", result.component_name()),
        DetailRow::new("Score", score_of(result)),
    ];
    rows.extend(
        result
            .details
            .iter()
            .map(|(key, value)| DetailRow::new(key.as_str(), value.to_string())),
    );

    Table::new(&rows)
        .with(Modify::new(Rows::new(1..)).with(Width::wrap(60).keep_words(true)))
        .with(Style::modern())
        .to_string()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn result(graphic: serde_json::Value) -> ResultWithoutDetails {
        serde_json::from_value(json!({
            "identifier": "1",
            "name": "Toets",
            "date": "2023-10-02T00:00:00+02:00",
            "graphic": graphic,
            "component": {"name": "Wiskunde"},
            "courses": [{"name": "Wiskunde"}],
        }))
        .expect("decode")
    }

    #[test]
    fn row_prefers_portal_description() {
        let row = ResultRow::from(&result(
            json!({"type": "percentage", "value": 68, "description": "17/25"}),
        ));
        assert_eq!(row.score, "17/25");
        assert_eq!(row.date, "2023-10-02");
        assert_eq!(row.component, "Wiskunde");
    }

    #[test]
    fn ungraded_result_renders_dash() {
        let row = ResultRow::from(&result(json!({"type": "percentage", "value": -1})));
        assert_eq!(row.score, "—");
    }

    #[test]
    fn table_lists_every_result() {
        let results = vec![
            result(json!({"type": "percentage", "value": 50})),
            result(json!({"type": "value", "value": "AA"})),
        ];
        let table = results_table(&results);
        assert!(table.contains("50%"));
        assert!(table.contains("AA"));
        assert!(table.contains("2 results"));
    }
}
