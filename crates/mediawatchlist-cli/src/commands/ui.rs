use crate::output::{Output, OutputFormat};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::time::Duration;
use watchlist_core::render::LOADING_TEXT;

/// Loading indicator shown while a request is in flight. Only drawn for
/// human output on a terminal; otherwise progress goes to the log.
pub struct LoadingUI {
    spinner: Option<ProgressBar>,
}

impl LoadingUI {
    pub fn start(output: &Output, what: &str) -> Self {
        if !should_draw(output) {
            tracing::debug!(operation = "loading", what, "Request started");
            return Self { spinner: None };
        }

        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
        {
            spinner.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
        }
        if what.is_empty() {
            spinner.set_message(LOADING_TEXT);
        } else {
            spinner.set_message(what.to_string());
        }
        spinner.enable_steady_tick(Duration::from_millis(80));

        Self { spinner: Some(spinner) }
    }

    pub fn finish(self) {
        if let Some(spinner) = self.spinner {
            spinner.finish_and_clear();
        }
    }
}

fn should_draw(output: &Output) -> bool {
    output.format() == OutputFormat::Human && !output.is_quiet() && is_interactive()
}

pub fn is_interactive() -> bool {
    std::io::stdout().is_terminal() && std::io::stderr().is_terminal()
}
