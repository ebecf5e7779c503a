//! Turning an arbitrary JSON payload into something displayable.
//!
//! The payload shape is only known at runtime. It is classified once, when the
//! response arrives, into [`TabularData`]; [`render`] then picks exactly one
//! [`ResultView`] for a panel state.

use serde::Serialize;
use serde_json::Value;

/// Text shown for a column the row does not have
pub const UNDEFINED_CELL: &str = "undefined";
pub const LOADING_TEXT: &str = "Loading data...";
pub const NO_RESULTS_TEXT: &str = "No results found.";

/// Rows of an array payload, laid out against the columns of the first row.
///
/// Columns come from element 0 only, in the order the backend sent them.
/// Later rows are projected onto those columns for display: missing keys
/// become `None`, extra keys are not shown. The payload itself is kept as
/// received for machine output.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RowSet {
    columns: Vec<String>,
    rows: Vec<Vec<Option<Value>>>,
    source: Vec<Value>,
}

impl RowSet {
    pub fn from_rows(rows: Vec<Value>) -> Self {
        let columns: Vec<String> = match rows.first() {
            Some(Value::Object(first)) => first.keys().cloned().collect(),
            _ => Vec::new(),
        };

        let projected = rows
            .iter()
            .map(|row| {
                columns
                    .iter()
                    .map(|column| match row {
                        Value::Object(fields) => fields.get(column).cloned(),
                        _ => None,
                    })
                    .collect()
            })
            .collect();

        Self {
            columns,
            rows: projected,
            source: rows,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column keys as shown in a header row
    pub fn header_labels(&self) -> Vec<String> {
        self.columns.iter().map(|c| header_label(c)).collect()
    }

    /// Every row as display text, one string per column
    pub fn display_rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(|cell| cell_text(cell.as_ref())).collect())
            .collect()
    }

    /// The array exactly as the backend sent it
    pub fn to_json(&self) -> Value {
        Value::Array(self.source.clone())
    }
}

/// A response payload, classified once at receipt
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TabularData {
    /// No payload: null, a falsy scalar, an empty body, or not JSON
    #[default]
    Null,
    /// An array payload, possibly empty
    Rows(RowSet),
    /// Anything else: a single object, a scalar
    Document(Value),
}

impl TabularData {
    pub fn from_json(value: Option<Value>) -> Self {
        match value {
            None => TabularData::Null,
            Some(value) if is_falsy(&value) => TabularData::Null,
            Some(Value::Array(rows)) => TabularData::Rows(RowSet::from_rows(rows)),
            Some(other) => TabularData::Document(other),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, TabularData::Null)
    }

    /// Number of rows for array payloads
    pub fn row_count(&self) -> Option<usize> {
        match self {
            TabularData::Rows(rows) => Some(rows.len()),
            _ => None,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            TabularData::Null => Value::Null,
            TabularData::Rows(rows) => rows.to_json(),
            TabularData::Document(value) => value.clone(),
        }
    }
}

/// `null`, `false`, zero and `""` carry nothing worth showing
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// A rendered table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableView {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub footer: String,
}

/// The one thing a result panel shows
#[derive(Debug, Clone, PartialEq)]
pub enum ResultView {
    Loading,
    Error(String),
    /// Nothing to show at all
    Nothing,
    NoResults { title: String },
    Table(TableView),
    /// Pretty-printed JSON for payloads that are not arrays
    Raw { title: String, text: String },
}

impl ResultView {
    /// Plain-text form, as it would read on screen
    pub fn describe(&self) -> String {
        match self {
            ResultView::Loading => LOADING_TEXT.to_string(),
            ResultView::Error(message) => format!("Error: {}", message),
            ResultView::Nothing => String::new(),
            ResultView::NoResults { .. } => NO_RESULTS_TEXT.to_string(),
            ResultView::Table(table) => table.footer.clone(),
            ResultView::Raw { text, .. } => text.clone(),
        }
    }
}

/// Pick the view for a panel state. Priority: loading, then error, then the
/// data itself.
pub fn render(title: &str, data: &TabularData, loading: bool, error: Option<&str>) -> ResultView {
    if loading {
        return ResultView::Loading;
    }

    if let Some(message) = error.filter(|e| !e.is_empty()) {
        return ResultView::Error(message.to_string());
    }

    match data {
        TabularData::Null => ResultView::Nothing,
        TabularData::Rows(rows) if rows.is_empty() => ResultView::NoResults {
            title: title.to_string(),
        },
        TabularData::Rows(rows) => ResultView::Table(TableView {
            title: title.to_string(),
            headers: rows.header_labels(),
            rows: rows.display_rows(),
            footer: format!("{} results found", rows.len()),
        }),
        TabularData::Document(value) => ResultView::Raw {
            title: title.to_string(),
            text: serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string()),
        },
    }
}

/// `media_name` reads as `media name`
pub fn header_label(key: &str) -> String {
    key.replace('_', " ")
}

/// Display text for one cell. Nested objects and arrays are shown as compact JSON.
pub fn cell_text(value: Option<&Value>) -> String {
    match value {
        None => UNDEFINED_CELL.to_string(),
        Some(Value::Null) => "null".to_string(),
        Some(Value::String(text)) => text.clone(),
        Some(Value::Bool(flag)) => flag.to_string(),
        Some(Value::Number(number)) => match number.as_f64() {
            // 4.0 reads as 4, the way the backend's clients have always shown it
            Some(float) if number.is_f64() && float.is_finite() => float.to_string(),
            _ => number.to_string(),
        },
        Some(nested) => nested.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows(value: Value) -> TabularData {
        TabularData::from_json(Some(value))
    }

    #[test]
    fn test_headers_follow_first_row_key_order() {
        let data = rows(json!([
            {"zeta": 1, "alpha": 2, "media_name": "x"},
            {"alpha": 3, "zeta": 4, "media_name": "y"},
        ]));

        match render("Report", &data, false, None) {
            ResultView::Table(table) => {
                assert_eq!(table.headers, vec!["zeta", "alpha", "media name"]);
                assert_eq!(table.rows[1], vec!["4", "3", "y"]);
            }
            other => panic!("expected table, got {:?}", other),
        }
    }

    #[test]
    fn test_heterogeneous_rows_use_first_row_columns() {
        let data = rows(json!([
            {"a": 1, "b": 2},
            {"a": 5, "c": 9},
        ]));

        let TabularData::Rows(set) = &data else {
            panic!("expected rows");
        };
        assert_eq!(set.columns(), &["a".to_string(), "b".to_string()]);
        assert_eq!(set.display_rows()[1], vec!["5", "undefined"]);
        // Machine output keeps keys the table cannot show
        assert_eq!(data.to_json(), json!([{"a": 1, "b": 2}, {"a": 5, "c": 9}]));
    }

    #[test]
    fn test_empty_array_shows_no_results() {
        let view = render("Top Rated Media", &rows(json!([])), false, None);
        assert_eq!(
            view,
            ResultView::NoResults {
                title: "Top Rated Media".to_string()
            }
        );
        assert_eq!(view.describe(), "No results found.");
    }

    #[test]
    fn test_loading_takes_priority() {
        let data = rows(json!([{"a": 1}]));
        assert_eq!(render("t", &data, true, Some("boom")), ResultView::Loading);
        assert_eq!(render("t", &TabularData::Null, true, None), ResultView::Loading);
    }

    #[test]
    fn test_error_beats_data() {
        let data = rows(json!([{"a": 1}]));
        assert_eq!(
            render("t", &data, false, Some("Query failed")),
            ResultView::Error("Query failed".to_string())
        );
        // An empty error string is no error
        assert!(matches!(render("t", &data, false, Some("")), ResultView::Table(_)));
    }

    #[test]
    fn test_null_renders_nothing() {
        assert_eq!(render("t", &TabularData::Null, false, None), ResultView::Nothing);
        assert_eq!(TabularData::from_json(Some(Value::Null)), TabularData::Null);
    }

    #[test]
    fn test_object_payload_falls_back_to_pretty_json() {
        let data = rows(json!({"status": "ok"}));
        match render("Health", &data, false, None) {
            ResultView::Raw { title, text } => {
                assert_eq!(title, "Health");
                assert_eq!(text, "{\n  \"status\": \"ok\"\n}");
            }
            other => panic!("expected raw view, got {:?}", other),
        }
    }

    #[test]
    fn test_cell_text_variants() {
        assert_eq!(cell_text(None), "undefined");
        assert_eq!(cell_text(Some(&Value::Null)), "null");
        assert_eq!(cell_text(Some(&json!("Dune"))), "Dune");
        assert_eq!(cell_text(Some(&json!(true))), "true");
        assert_eq!(cell_text(Some(&json!(42))), "42");
        assert_eq!(cell_text(Some(&json!(4.0))), "4");
        assert_eq!(cell_text(Some(&json!(4.25))), "4.25");
        assert_eq!(cell_text(Some(&json!({"k": [1, 2]}))), r#"{"k":[1,2]}"#);
        assert_eq!(cell_text(Some(&json!(["a", "b"]))), r#"["a","b"]"#);
    }

    #[test]
    fn test_search_scenario_single_row() {
        let data = rows(json!([{"medianame": "The Matrix", "rating": 5}]));
        match render("", &data, false, None) {
            ResultView::Table(table) => {
                assert_eq!(table.headers, vec!["medianame", "rating"]);
                assert_eq!(table.rows, vec![vec!["The Matrix".to_string(), "5".to_string()]]);
                assert_eq!(table.footer, "1 results found");
            }
            other => panic!("expected table, got {:?}", other),
        }
    }

    #[test]
    fn test_non_object_first_element_has_no_columns() {
        let TabularData::Rows(set) = rows(json!([1, 2, 3])) else {
            panic!("expected rows");
        };
        assert!(set.columns().is_empty());
        assert_eq!(set.len(), 3);
        assert!(set.display_rows().iter().all(|row| row.is_empty()));
        assert_eq!(set.to_json(), json!([1, 2, 3]));
    }

    #[test]
    fn test_mixed_arrays_round_trip_unchanged() {
        let payload = json!([{"a": 1}, {"a": 2, "extra": "x"}, [3, 4], "loose"]);
        assert_eq!(rows(payload.clone()).to_json(), payload);
    }

    #[test]
    fn test_falsy_scalars_render_nothing() {
        for value in [json!(false), json!(0), json!(0.0), json!("")] {
            let data = rows(value);
            assert!(data.is_null());
            assert_eq!(render("t", &data, false, None), ResultView::Nothing);
        }
        // Truthy scalars still show as raw text
        assert!(matches!(render("t", &rows(json!(true)), false, None), ResultView::Raw { .. }));
        assert!(matches!(render("t", &rows(json!("0")), false, None), ResultView::Raw { .. }));
    }
}
