use super::prompts::{self, Choice};
use super::ui::{is_interactive, LoadingUI};
use crate::context::AppContext;
use crate::output::{Output, OutputFormat};
use crate::SubmitArgs;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use watchlist_core::{ChoiceField, EntryField, EntryForm, EntrySubmitter, CUSTOM_SENTINEL};
use watchlist_models::MediaStatus;

pub async fn run_submit(ctx: &AppContext, args: SubmitArgs, output: &Output) -> Result<()> {
    let no_prompt = args.no_prompt;
    let mut form = form_from_args(args)?;

    let can_prompt = !no_prompt && is_interactive() && output.format() == OutputFormat::Human;
    if can_prompt {
        fill_interactively(&mut form)?;
        if !prompts::prompt_yes_no(&format!("Submit \"{}\"?", form.medianame), Some(true))? {
            output.info("Nothing submitted.");
            return Ok(());
        }
    }

    let missing = form.missing_required();
    if !missing.is_empty() {
        let flags: Vec<String> = missing.iter().map(|f| format!("--{}", f.key())).collect();
        return Err(eyre!("Missing required field(s): {}", flags.join(", ")));
    }

    let submitter = EntrySubmitter::new(ctx.client.clone());
    let loading = LoadingUI::start(output, "Saving...");
    let outcome = submitter.submit(&mut form).await;
    loading.finish();

    if outcome.is_saved() {
        output.success(outcome.message());
        Ok(())
    } else {
        output.error(outcome.message());
        Err(eyre!("Media entry was not saved"))
    }
}

fn form_from_args(args: SubmitArgs) -> Result<EntryForm> {
    let given = [
        (EntryField::FirstName, args.firstname),
        (EntryField::LastName, args.lastname),
        (EntryField::ProfileName, args.profilename),
        (EntryField::MediaType, args.mediatype),
        (EntryField::MediaName, args.medianame),
        (EntryField::Description, args.description),
        (EntryField::ReleaseYear, args.releaseyear),
        (EntryField::Genre, args.genre),
        (EntryField::Rating, args.rating),
        (EntryField::RatingText, args.ratingtext),
        (EntryField::Status, args.status),
        (EntryField::Platform, args.platform),
    ];

    let mut form = EntryForm::new();
    for (field, value) in given {
        if let Some(value) = value {
            form.set(field, value)?;
        }
    }
    Ok(form)
}

/// Ask for every field that is still blank, in form order
fn fill_interactively(form: &mut EntryForm) -> Result<()> {
    for field in EntryField::ALL {
        if !form.value(field).trim().is_empty() {
            continue;
        }

        match field {
            EntryField::MediaType => prompt_choice_field(&mut form.mediatype, field)?,
            EntryField::Genre => prompt_choice_field(&mut form.genre, field)?,
            EntryField::Platform => prompt_choice_field(&mut form.platform, field)?,
            EntryField::Status => {
                let labels: Vec<&str> = MediaStatus::ALL.iter().map(|s| s.label()).collect();
                let index = prompts::prompt_select(field.label(), &labels)?;
                form.status = MediaStatus::ALL.get(index).copied();
            }
            _ if field.is_required() => {
                let value = prompts::prompt_required(field.label())?;
                form.set(field, value)?;
            }
            _ => {
                let value = prompts::prompt_string(field.label(), None)?;
                form.set(field, value)?;
            }
        }
    }
    Ok(())
}

fn prompt_choice_field(choice: &mut ChoiceField, field: EntryField) -> Result<()> {
    match prompts::prompt_choice(field.label(), choice.options())? {
        Choice::Listed(option) => choice.select(option, field)?,
        Choice::Custom => {
            choice.select(CUSTOM_SENTINEL, field)?;
            let text = prompts::prompt_required(&format!("{} (custom)", field.label()))?;
            choice.set_custom_text(text);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_from_args_routes_unlisted_choices_to_custom() {
        let args = SubmitArgs {
            firstname: Some("Ada".to_string()),
            mediatype: Some("Movie".to_string()),
            platform: Some("Criterion Channel".to_string()),
            status: Some("havent watched".to_string()),
            rating: Some("4".to_string()),
            ..SubmitArgs::default()
        };

        let form = form_from_args(args).unwrap();
        assert_eq!(form.firstname, "Ada");
        assert!(!form.mediatype.is_custom());
        assert!(form.platform.is_custom());
        assert_eq!(form.platform.value(), "Criterion Channel");
        assert_eq!(form.status, Some(MediaStatus::HaventWatched));
        assert_eq!(form.payload().rating, Some(4));
    }

    #[test]
    fn test_form_from_args_rejects_unknown_status() {
        let args = SubmitArgs {
            status: Some("Abandoned".to_string()),
            ..SubmitArgs::default()
        };
        assert!(form_from_args(args).is_err());
    }
}
