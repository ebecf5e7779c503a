use color_eyre::eyre::eyre;
use color_eyre::Result;
use dialoguer::{Confirm, Input, Select};

/// Label of the extra entry that switches a choice prompt to free text
const CUSTOM_LABEL: &str = "Other (type it in)";

/// Prompt for a string value with optional default
pub fn prompt_string(prompt: &str, default: Option<&str>) -> Result<String> {
    let mut input_builder = Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true);

    if let Some(default_value) = default {
        input_builder = input_builder.default(default_value.to_string());
    }

    input_builder.interact_text().map_err(|e| eyre!("Failed to read input: {}", e))
}

/// Prompt until a non-blank value is entered
pub fn prompt_required(prompt: &str) -> Result<String> {
    loop {
        let value = prompt_string(prompt, None)?;
        if !value.trim().is_empty() {
            return Ok(value);
        }
        eprintln!("{} is required.", prompt);
    }
}

/// Prompt for yes/no with optional default
pub fn prompt_yes_no(prompt: &str, default: Option<bool>) -> Result<bool> {
    let mut confirm_builder = Confirm::new().with_prompt(prompt);

    if let Some(default_value) = default {
        confirm_builder = confirm_builder.default(default_value);
    }

    confirm_builder
        .interact()
        .map_err(|e| eyre!("Failed to read confirmation: {}", e))
}

/// Pick one of `options`. Returns the index.
pub fn prompt_select(prompt: &str, options: &[&str]) -> Result<usize> {
    Select::new()
        .with_prompt(prompt)
        .items(options)
        .default(0)
        .interact()
        .map_err(|e| eyre!("Failed to read selection: {}", e))
}

/// What the user picked from a list with a free-text escape
pub enum Choice {
    Listed(&'static str),
    Custom,
}

/// Pick one of `options` or the trailing custom entry
pub fn prompt_choice(prompt: &str, options: &'static [&'static str]) -> Result<Choice> {
    let mut items: Vec<&str> = options.to_vec();
    items.push(CUSTOM_LABEL);

    let index = prompt_select(prompt, &items)?;
    Ok(options.get(index).copied().map(Choice::Listed).unwrap_or(Choice::Custom))
}
