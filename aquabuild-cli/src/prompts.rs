use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use inquire::validator::Validation;
use inquire::{CustomType, CustomUserError, Select, Text};
use std::fmt;

use aquabuild_core::{
    format_inr, Client, ClientPatch, ClientStatus, Contractor, ContractorPatch, ContractorStatus,
    DataStore, Document, DocumentPatch, DocumentType, Lead, LeadPatch, LeadStatus, NewClient,
    NewContractor, NewDocument, NewLead, NewPayment, NewProject, Payment, PaymentParty,
    PaymentPatch, PaymentStatus, Project, ProjectPatch, ProjectStatus, UNASSIGNED, ZERO_VALUE,
};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Typed at an edit prompt to clear an optional field
const CLEAR: &str = "-";

const REQUIRED: &str = "This field is required";

/// A record offered in a selection list
#[derive(Debug, Clone, PartialEq)]
struct Choice {
    id: Option<String>,
    label: String,
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            Some(id) => write!(f, "{} - {}", id, self.label),
            None => write!(f, "{}", self.label),
        }
    }
}

/// Offers a dangling reference as its own choice, so confirming the picker
/// keeps it instead of moving to the first record
fn ensure_current(choices: &mut Vec<Choice>, current: Option<&str>, missing_label: &str) {
    if let Some(id) = current {
        if !choices.iter().any(|c| c.id.as_deref() == Some(id)) {
            choices.insert(
                0,
                Choice {
                    id: Some(id.to_string()),
                    label: missing_label.to_string(),
                },
            );
        }
    }
}

fn cursor_for(choices: &[Choice], current: Option<&str>) -> usize {
    choices
        .iter()
        .position(|c| c.id.as_deref() == current)
        .unwrap_or(0)
}

fn select_record(
    message: &str,
    choices: Vec<Choice>,
    current: Option<&str>,
) -> Result<Option<String>> {
    let cursor = cursor_for(&choices, current);
    let choice = Select::new(message, choices)
        .with_starting_cursor(cursor)
        .prompt()?;
    Ok(choice.id)
}

fn client_choices(store: &DataStore) -> Vec<Choice> {
    store
        .list_clients()
        .into_iter()
        .map(|c| Choice {
            id: Some(c.id),
            label: c.name,
        })
        .collect()
}

fn contractor_choices(store: &DataStore) -> Vec<Choice> {
    let mut choices = vec![Choice {
        id: None,
        label: UNASSIGNED.to_string(),
    }];
    choices.extend(store.list_contractors().into_iter().map(|c| Choice {
        id: Some(c.id),
        label: c.name,
    }));
    choices
}

fn project_choices(store: &DataStore) -> Vec<Choice> {
    store
        .list_projects()
        .into_iter()
        .map(|p| Choice {
            id: Some(p.id),
            label: p.title,
        })
        .collect()
}

/// Selects from a fixed list of variants, starting at the current one
fn select_variant<T>(message: &str, options: &[T], current: T) -> Result<T>
where
    T: Copy + PartialEq + fmt::Display,
{
    let cursor = options.iter().position(|o| *o == current).unwrap_or(0);
    Ok(Select::new(message, options.to_vec())
        .with_starting_cursor(cursor)
        .prompt()?)
}

fn not_blank(input: &str) -> std::result::Result<Validation, CustomUserError> {
    Ok(if input.trim().is_empty() {
        Validation::Invalid(REQUIRED.into())
    } else {
        Validation::Valid
    })
}

/// How an edit prompt treats the clear marker
#[derive(Debug, Clone, Copy, PartialEq)]
enum Field {
    Required,
    /// Clearing resets the field to this value
    Clearable(&'static str),
}

/// Interprets an answer to an edit prompt. Empty or unchanged input keeps
/// the current value.
fn text_change(
    input: &str,
    current: &str,
    field: Field,
) -> std::result::Result<Option<String>, &'static str> {
    match (input.trim(), field) {
        ("", _) => Ok(None),
        (CLEAR, Field::Required) => Err("This field is required and cannot be cleared"),
        (CLEAR, Field::Clearable(cleared)) => {
            Ok((current != cleared).then(|| cleared.to_string()))
        }
        (text, _) if text == current => Ok(None),
        (text, _) => Ok(Some(text.to_string())),
    }
}

/// Asks for a replacement value. Returns `None` when the input is empty or
/// unchanged.
fn edit_text(label: &str, current: &str, field: Field) -> Result<Option<String>> {
    let prompt = match field {
        Field::Required => format!("{} [{}]:", label, current),
        Field::Clearable(_) => format!("{} [{}] (\"{}\" to clear):", label, current, CLEAR),
    };
    let shown = current.to_string();
    let validator = move |input: &str| -> std::result::Result<Validation, CustomUserError> {
        Ok(match text_change(input, &shown, field) {
            Ok(_) => Validation::Valid,
            Err(message) => Validation::Invalid(message.into()),
        })
    };
    let input = Text::new(&prompt).with_validator(validator).prompt()?;
    text_change(&input, current, field).map_err(anyhow::Error::msg)
}

/// Asks for a required value on an add form
fn required_text(message: &str) -> Result<String> {
    let input = Text::new(message).with_validator(not_blank).prompt()?;
    Ok(input.trim().to_string())
}

fn prompt_amount(message: &str, current: u64) -> Result<u64> {
    Ok(CustomType::<u64>::new(message)
        .with_default(current)
        .with_formatter(&|value: u64| format_inr(value))
        .with_error_message("Please enter a whole number of rupees")
        .prompt()?)
}

fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", input.trim()))
}

/// Asks for an optional date. Empty input means no date.
fn prompt_optional_date(label: &str) -> Result<Option<NaiveDate>> {
    let input = Text::new(&format!("{} (YYYY-MM-DD, empty for none):", label)).prompt()?;
    if input.trim().is_empty() {
        Ok(None)
    } else {
        parse_date(&input).map(Some)
    }
}

/// Edits an optional date: empty keeps it, "-" clears it
fn edit_optional_date(
    label: &str,
    current: Option<NaiveDate>,
) -> Result<Option<Option<NaiveDate>>> {
    let shown = current.map_or_else(|| "-".to_string(), |d| d.format(DATE_FORMAT).to_string());
    let input = Text::new(&format!("{} [{}] (\"-\" to clear):", label, shown)).prompt()?;
    match input.trim() {
        "" => Ok(None),
        "-" if current.is_none() => Ok(None),
        "-" => Ok(Some(None)),
        text => {
            let date = parse_date(text)?;
            Ok((Some(date) != current).then_some(Some(date)))
        }
    }
}

/// Edits an optional text field: empty keeps it, "-" clears it
fn edit_optional_text(label: &str, current: Option<&str>) -> Result<Option<Option<String>>> {
    let prompt = format!("{} [{}] (\"-\" to clear):", label, current.unwrap_or("-"));
    let input = Text::new(&prompt).prompt()?;
    match input.trim() {
        "" => Ok(None),
        "-" if current.is_none() => Ok(None),
        "-" => Ok(Some(None)),
        text if Some(text) == current => Ok(None),
        text => Ok(Some(Some(text.to_string()))),
    }
}

fn prompt_progress(current: u8) -> Result<u8> {
    Ok(CustomType::<u8>::new("Progress (0-100):")
        .with_default(current)
        .with_error_message("Please enter a whole number")
        .with_validator(|value: &u8| {
            Ok(if *value <= 100 {
                inquire::validator::Validation::Valid
            } else {
                inquire::validator::Validation::Invalid(
                    "Progress must be between 0 and 100".into(),
                )
            })
        })
        .prompt()?)
}

fn optional(input: String) -> Option<String> {
    let trimmed = input.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Prompts the user for a new client
pub fn prompt_new_client() -> Result<NewClient> {
    let name = required_text("Name:")?;
    let email = required_text("Email:")?;
    let phone = required_text("Phone:")?;
    let city = required_text("City:")?;
    let address = required_text("Address:")?;
    let status = Select::new("Status:", ClientStatus::ALL.to_vec()).prompt()?;
    let total_value = optional(Text::new("Total value (empty for ₹0):").prompt()?);

    Ok(NewClient {
        name,
        email,
        phone,
        city,
        address,
        status,
        total_value,
    })
}

/// Prompts the user for a new contractor
pub fn prompt_new_contractor() -> Result<NewContractor> {
    let name = required_text("Name:")?;
    let email = required_text("Email:")?;
    let phone = required_text("Phone:")?;
    let gst_number = required_text("GST number:")?;
    let specialization = required_text("Specialization:")?;
    let status = Select::new("Status:", ContractorStatus::ALL.to_vec()).prompt()?;

    Ok(NewContractor {
        name,
        email,
        phone,
        gst_number,
        specialization,
        status,
    })
}

/// Prompts the user for a new project
pub fn prompt_new_project(store: &DataStore) -> Result<NewProject> {
    let clients = client_choices(store);
    if clients.is_empty() {
        anyhow::bail!("Add a client before creating a project");
    }

    let title = required_text("Title:")?;
    let client_id = select_record("Client:", clients, None)?
        .context("A project needs a client")?;
    let contractor_id = select_record("Contractor:", contractor_choices(store), None)?;
    let city = Text::new("City:").prompt()?;
    let scope = required_text("Scope:")?;
    let status = Select::new("Status:", ProjectStatus::ALL.to_vec()).prompt()?;
    let progress = prompt_progress(0)?;
    let total_value = optional(Text::new("Total value:").prompt()?);
    let start_date = prompt_optional_date("Start date")?;
    let expected_completion = prompt_optional_date("Expected completion")?;

    Ok(NewProject {
        contractor_id,
        city,
        scope,
        status,
        progress,
        total_value,
        start_date,
        expected_completion,
        ..NewProject::new(title, client_id)
    })
}

/// Prompts the user for a new document
pub fn prompt_new_document(store: &DataStore) -> Result<NewDocument> {
    let projects = project_choices(store);
    if projects.is_empty() {
        anyhow::bail!("Add a project before attaching documents");
    }

    let project_id = select_record("Project:", projects, None)?
        .context("A document needs a project")?;
    let doc_type = Select::new("Type:", DocumentType::ALL.to_vec()).prompt()?;
    let name = required_text("Name:")?;
    let today = Local::now().date_naive();
    let upload_input = Text::new("Upload date (YYYY-MM-DD):")
        .with_default(&today.format(DATE_FORMAT).to_string())
        .prompt()?;
    let upload_date = parse_date(&upload_input)?;
    let size = Text::new("Size:").prompt()?;
    let format = Text::new("Format:").with_default("PDF").prompt()?;
    let url = optional(Text::new("URL (empty for none):").prompt()?);

    Ok(NewDocument {
        size,
        format,
        url,
        ..NewDocument::new(project_id, doc_type, name, upload_date)
    })
}

/// Prompts for changes to a client. Empty answers keep the current value.
pub fn prompt_edit_client(client: &Client) -> Result<ClientPatch> {
    println!("Editing client: {}", client.name);
    println!("Leave field empty to keep current value");

    let name = edit_text("Name", &client.name, Field::Required)?;
    let email = edit_text("Email", &client.email, Field::Required)?;
    let phone = edit_text("Phone", &client.phone, Field::Required)?;
    let city = edit_text("City", &client.city, Field::Required)?;
    let address = edit_text("Address", &client.address, Field::Required)?;
    let status = select_variant("Status:", &ClientStatus::ALL, client.status)?;
    let total_value = edit_text(
        "Total value",
        &client.total_value,
        Field::Clearable(ZERO_VALUE),
    )?;

    Ok(ClientPatch {
        name,
        email,
        phone,
        city,
        address,
        status: (status != client.status).then_some(status),
        total_value,
    })
}

/// Prompts for changes to a contractor, including its rating
pub fn prompt_edit_contractor(contractor: &Contractor) -> Result<ContractorPatch> {
    println!("Editing contractor: {}", contractor.name);
    println!("Leave field empty to keep current value");

    let name = edit_text("Name", &contractor.name, Field::Required)?;
    let email = edit_text("Email", &contractor.email, Field::Required)?;
    let phone = edit_text("Phone", &contractor.phone, Field::Required)?;
    let gst_number = edit_text("GST number", &contractor.gst_number, Field::Required)?;
    let specialization = edit_text(
        "Specialization",
        &contractor.specialization,
        Field::Required,
    )?;
    let status = select_variant("Status:", &ContractorStatus::ALL, contractor.status)?;
    let rating = CustomType::<f64>::new("Rating:")
        .with_default(contractor.rating)
        .with_error_message("Please enter a number")
        .prompt()?;

    Ok(ContractorPatch {
        name,
        email,
        phone,
        gst_number,
        specialization,
        status: (status != contractor.status).then_some(status),
        rating: (rating != contractor.rating).then_some(rating),
    })
}

/// Prompts for changes to a project, including reassignment
pub fn prompt_edit_project(store: &DataStore, project: &Project) -> Result<ProjectPatch> {
    println!("Editing project: {}", project.title);
    println!("Leave field empty to keep current value");

    let title = edit_text("Title", &project.title, Field::Required)?;

    let mut clients = client_choices(store);
    ensure_current(&mut clients, Some(&project.client_id), "(missing client)");
    let client_id = select_record("Client:", clients, Some(&project.client_id))?
        .filter(|id| *id != project.client_id);

    let mut contractors = contractor_choices(store);
    ensure_current(
        &mut contractors,
        project.contractor_id.as_deref(),
        "(missing contractor)",
    );
    let contractor_id =
        select_record("Contractor:", contractors, project.contractor_id.as_deref())?;
    let contractor_id = (contractor_id != project.contractor_id).then_some(contractor_id);

    let city = edit_text("City", &project.city, Field::Clearable(""))?;
    let scope = edit_text("Scope", &project.scope, Field::Required)?;
    let status = select_variant("Status:", &ProjectStatus::ALL, project.status)?;
    let progress = prompt_progress(project.progress)?;
    let total_value = edit_optional_text("Total value", project.total_value.as_deref())?;
    let start_date = edit_optional_date("Start date", project.start_date)?;
    let expected_completion =
        edit_optional_date("Expected completion", project.expected_completion)?;

    let mut patch = ProjectPatch {
        title,
        client_id,
        contractor_id,
        city,
        scope,
        status: (status != project.status).then_some(status),
        progress: (progress != project.progress).then_some(progress),
        total_value,
        start_date,
        expected_completion,
        last_updated: None,
    };
    if has_changes(&patch) {
        patch.last_updated = Some(String::from("Just now"));
    }

    Ok(patch)
}

fn has_changes(patch: &ProjectPatch) -> bool {
    patch.title.is_some()
        || patch.client_id.is_some()
        || patch.contractor_id.is_some()
        || patch.city.is_some()
        || patch.scope.is_some()
        || patch.status.is_some()
        || patch.progress.is_some()
        || patch.total_value.is_some()
        || patch.start_date.is_some()
        || patch.expected_completion.is_some()
}

/// Prompts for changes to a document
pub fn prompt_edit_document(store: &DataStore, document: &Document) -> Result<DocumentPatch> {
    println!("Editing document: {}", document.name);
    println!("Leave field empty to keep current value");

    let mut projects = project_choices(store);
    ensure_current(&mut projects, Some(&document.project_id), "(missing project)");
    let project_id = select_record("Project:", projects, Some(&document.project_id))?
        .filter(|id| *id != document.project_id);
    let doc_type = select_variant("Type:", &DocumentType::ALL, document.doc_type)?;
    let name = edit_text("Name", &document.name, Field::Required)?;
    let upload_date = match edit_text(
        "Upload date",
        &document.upload_date.format(DATE_FORMAT).to_string(),
        Field::Required,
    )? {
        Some(text) => Some(parse_date(&text)?),
        None => None,
    };

    let size = edit_text("Size", &document.size, Field::Clearable(""))?;
    let format = edit_text("Format", &document.format, Field::Clearable(""))?;
    let url = edit_optional_text("URL", document.url.as_deref())?;

    Ok(DocumentPatch {
        project_id,
        doc_type: (doc_type != document.doc_type).then_some(doc_type),
        name,
        upload_date,
        size,
        format,
        url,
    })
}

/// Prompts the user for a new payment against a project
pub fn prompt_new_payment(store: &DataStore) -> Result<NewPayment> {
    let projects = project_choices(store);
    if projects.is_empty() {
        anyhow::bail!("Add a project before recording payments");
    }

    let project_id = select_record("Project:", projects, None)?
        .context("A payment needs a project")?;
    let party = Select::new("Party:", PaymentParty::ALL.to_vec()).prompt()?;
    let total_amount = prompt_amount("Total amount:", 0)?;
    let paid_amount = prompt_amount("Paid so far:", 0)?;
    let due_date = prompt_optional_date("Due date")?;
    let status = Select::new("Status:", PaymentStatus::ALL.to_vec()).prompt()?;
    let last_payment = prompt_optional_date("Last payment")?;

    Ok(NewPayment {
        paid_amount,
        due_date,
        status,
        last_payment,
        ..NewPayment::new(project_id, party, total_amount)
    })
}

/// Prompts the user for a new marketing lead
pub fn prompt_new_lead() -> Result<NewLead> {
    let name = required_text("Name:")?;
    let email = Text::new("Email:").prompt()?;
    let phone = Text::new("Phone:").prompt()?;
    let source = Text::new("Source:").prompt()?;
    let status = select_variant("Status:", &LeadStatus::ALL, LeadStatus::default())?;
    let project = Text::new("Interested in:").prompt()?;
    let value = prompt_amount("Estimated value:", 0)?;

    Ok(NewLead {
        name,
        email: email.trim().to_string(),
        phone: phone.trim().to_string(),
        source: source.trim().to_string(),
        status,
        project: project.trim().to_string(),
        value,
    })
}

pub fn prompt_edit_payment(store: &DataStore, payment: &Payment) -> Result<PaymentPatch> {
    println!("Editing payment: {}", payment.id);
    println!("Leave field empty to keep current value");

    let mut projects = project_choices(store);
    ensure_current(&mut projects, Some(&payment.project_id), "(missing project)");
    let project_id = select_record("Project:", projects, Some(&payment.project_id))?
        .filter(|id| *id != payment.project_id);
    let party = select_variant("Party:", &PaymentParty::ALL, payment.party)?;
    let total_amount = prompt_amount("Total amount:", payment.total_amount)?;
    let paid_amount = prompt_amount("Paid so far:", payment.paid_amount)?;
    let due_date = edit_optional_date("Due date", payment.due_date)?;
    let status = select_variant("Status:", &PaymentStatus::ALL, payment.status)?;
    let last_payment = edit_optional_date("Last payment", payment.last_payment)?;

    Ok(PaymentPatch {
        project_id,
        party: (party != payment.party).then_some(party),
        total_amount: (total_amount != payment.total_amount).then_some(total_amount),
        paid_amount: (paid_amount != payment.paid_amount).then_some(paid_amount),
        due_date,
        status: (status != payment.status).then_some(status),
        last_payment,
    })
}

pub fn prompt_edit_lead(lead: &Lead) -> Result<LeadPatch> {
    println!("Editing lead: {}", lead.name);
    println!("Leave field empty to keep current value");

    let name = edit_text("Name", &lead.name, Field::Required)?;
    let email = edit_text("Email", &lead.email, Field::Clearable(""))?;
    let phone = edit_text("Phone", &lead.phone, Field::Clearable(""))?;
    let source = edit_text("Source", &lead.source, Field::Clearable(""))?;
    let status = select_variant("Status:", &LeadStatus::ALL, lead.status)?;
    let project = edit_text("Interested in", &lead.project, Field::Clearable(""))?;
    let value = prompt_amount("Estimated value:", lead.value)?;

    Ok(LeadPatch {
        name,
        email,
        phone,
        source,
        status: (status != lead.status).then_some(status),
        project,
        value: (value != lead.value).then_some(value),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn choice(id: &str, label: &str) -> Choice {
        Choice {
            id: Some(id.to_string()),
            label: label.to_string(),
        }
    }

    #[test]
    fn test_not_blank_rejects_whitespace() {
        assert!(matches!(not_blank("   "), Ok(Validation::Invalid(_))));
        assert!(matches!(not_blank(""), Ok(Validation::Invalid(_))));
        assert!(matches!(not_blank("Rajesh"), Ok(Validation::Valid)));
    }

    #[test]
    fn test_text_change_keeps_sets_and_clears() {
        assert_eq!(text_change("", "Mumbai", Field::Required), Ok(None));
        assert_eq!(text_change(" Mumbai ", "Mumbai", Field::Required), Ok(None));
        assert_eq!(
            text_change("Pune", "Mumbai", Field::Required),
            Ok(Some("Pune".to_string()))
        );

        assert_eq!(
            text_change("-", "Mumbai", Field::Clearable("")),
            Ok(Some(String::new()))
        );
        assert_eq!(text_change("-", "", Field::Clearable("")), Ok(None));
        assert_eq!(
            text_change(" - ", "₹8,25,000", Field::Clearable(ZERO_VALUE)),
            Ok(Some("₹0".to_string()))
        );
    }

    #[test]
    fn test_text_change_refuses_to_clear_required_field() {
        assert!(text_change("-", "Rajesh Sharma", Field::Required).is_err());
    }

    #[test]
    fn test_dangling_reference_stays_selected() {
        let mut projects = vec![choice("AQ001", "Luxury Villa Pool")];
        ensure_current(&mut projects, Some("AQ404"), "(missing project)");

        assert_eq!(projects.len(), 2);
        let cursor = cursor_for(&projects, Some("AQ404"));
        assert_eq!(projects[cursor].id.as_deref(), Some("AQ404"));
        assert_eq!(projects[cursor].label, "(missing project)");
    }

    #[test]
    fn test_existing_reference_is_not_duplicated() {
        let mut contractors = vec![
            Choice {
                id: None,
                label: UNASSIGNED.to_string(),
            },
            choice("CT001", "AquaTech Solutions"),
            choice("CT002", "Pool Masters Inc"),
        ];
        ensure_current(&mut contractors, Some("CT002"), "(missing contractor)");
        assert_eq!(contractors.len(), 3);
        assert_eq!(cursor_for(&contractors, Some("CT002")), 2);

        ensure_current(&mut contractors, None, "(missing contractor)");
        assert_eq!(contractors.len(), 3);
        assert_eq!(cursor_for(&contractors, None), 0);
    }

    #[test]
    fn test_dangling_contractor_is_offered_first() {
        let store = DataStore::seeded();
        let mut contractors = contractor_choices(&store);
        ensure_current(&mut contractors, Some("CT099"), "(missing contractor)");

        assert_eq!(contractors[0].id.as_deref(), Some("CT099"));
        assert_eq!(cursor_for(&contractors, Some("CT099")), 0);
        assert_eq!(contractors.len(), store.list_contractors().len() + 2);
    }
}
