use clap::ValueEnum;
use comfy_table::{Attribute, Cell, Color, Table};
use owo_colors::OwoColorize;
use serde_json::json;
use watchlist_core::{BackendStatus, QueryResult, ResultView};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    #[value(name = "json-pretty")]
    JsonPretty,
}

pub struct Output {
    format: OutputFormat,
    quiet: bool,
}

impl Output {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn success(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }

        match self.format {
            OutputFormat::Human => {
                println!("{} {}", "✓".green(), msg.as_ref());
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({
                    "type": "success",
                    "message": msg.as_ref()
                }));
            }
        }
    }

    pub fn error(&self, msg: impl AsRef<str>) {
        // Errors should always be shown, even in quiet mode
        match self.format {
            OutputFormat::Human => {
                eprintln!("{} {}", "✗".red(), msg.as_ref());
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({
                    "type": "error",
                    "message": msg.as_ref()
                }));
            }
        }
    }

    pub fn info(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }

        match self.format {
            OutputFormat::Human => {
                println!("{}", msg.as_ref());
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({
                    "type": "info",
                    "message": msg.as_ref()
                }));
            }
        }
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }

        match self.format {
            OutputFormat::Human => {
                println!("{} {}", "⚠".yellow(), msg.as_ref());
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({
                    "type": "warning",
                    "message": msg.as_ref()
                }));
            }
        }
    }

    pub fn json(&self, data: &serde_json::Value) {
        if self.quiet && self.format != OutputFormat::Human {
            return;
        }

        self.print_json(data);
    }

    fn print_json(&self, data: &serde_json::Value) {
        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(data).unwrap_or_default());
            }
            OutputFormat::JsonPretty => {
                println!("{}", serde_json::to_string_pretty(data).unwrap_or_default());
            }
            OutputFormat::Human => {
                println!("{}", data);
            }
        }
    }

    /// Print a settled result panel. `label` is the dismissible-panel header
    /// line, if the caller has one.
    pub fn query_result(&self, result: &QueryResult, label: Option<&str>) {
        if self.format != OutputFormat::Human {
            self.json(&json!({
                "type": "result",
                "title": result.title,
                "data": result.data.to_json(),
                "row_count": result.data.row_count(),
                "error": result.error,
                "updated_at": result.updated_at.map(|t| t.to_rfc3339()),
            }));
            return;
        }

        let view = result.view();

        // Errors bypass quiet mode, everything else respects it
        if let ResultView::Error(message) = &view {
            if let Some(label) = label {
                eprintln!("{}", label.red().bold());
            }
            self.error(format!("Error: {}", message));
            return;
        }
        if self.quiet {
            return;
        }

        if let Some(label) = panel_header(result, label) {
            println!("{}", label.bright_black());
        }

        match &view {
            ResultView::Loading | ResultView::Nothing | ResultView::Error(_) => {}
            ResultView::NoResults { title } => {
                print_title(title);
                println!("{}", view.describe());
            }
            ResultView::Table(table_view) => {
                print_title(&table_view.title);

                let mut table = Table::new();
                table.set_header(
                    table_view
                        .headers
                        .iter()
                        .map(|h| Cell::new(h).add_attribute(Attribute::Bold))
                        .collect::<Vec<_>>(),
                );
                for row in &table_view.rows {
                    table.add_row(row.iter().map(Cell::new).collect::<Vec<_>>());
                }
                table.load_preset(comfy_table::presets::UTF8_FULL);
                table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
                println!("{}", table);
                println!("{}", table_view.footer.bright_black());
            }
            ResultView::Raw { title, text } => {
                print_title(title);
                println!("{}", text);
            }
        }
    }

    pub fn backend_status(&self, status: &BackendStatus) {
        if self.format != OutputFormat::Human {
            self.json(&json!({
                "type": "status",
                "api": status.api,
                "database": status.database,
            }));
            return;
        }
        if self.quiet {
            return;
        }

        let mut table = Table::new();
        table.set_header(vec![
            Cell::new("Service").fg(Color::Cyan).add_attribute(Attribute::Bold),
            Cell::new("Status").fg(Color::Cyan).add_attribute(Attribute::Bold),
        ]);
        for (name, value) in [("API", &status.api), ("Database", &status.database)] {
            let shown = if value == "ok" { value.green().to_string() } else { value.red().to_string() };
            table.add_row(vec![Cell::new(name), Cell::new(shown)]);
        }
        table.load_preset(comfy_table::presets::UTF8_FULL);
        table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
        println!("{}", table);
    }
}

/// Header of a dismissible panel, if the panel has anything to show
fn panel_header<'a>(result: &QueryResult, label: Option<&'a str>) -> Option<&'a str> {
    label.filter(|_| result.is_open())
}

fn print_title(title: &str) {
    if !title.is_empty() {
        println!("\n{}", title.bright_cyan().bold());
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use watchlist_core::TabularData;

    #[test]
    fn test_empty_success_keeps_panel_closed() {
        let mut result = QueryResult::settled("", Ok(None));
        let label = result.panel_label();
        assert_eq!(panel_header(&result, Some(&label)), None);

        result.data = TabularData::from_json(Some(serde_json::json!([])));
        let label = result.panel_label();
        assert_eq!(panel_header(&result, Some(&label)), Some("Results: 0"));
    }
}
