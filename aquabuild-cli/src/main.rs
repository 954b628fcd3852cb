mod cli;
mod prompts;

use anyhow::{Context, Result};
use clap::Parser;
use colored::{ColoredString, Colorize};
use inquire::InquireError;
use log::{debug, info};
use std::path::{Path, PathBuf};

use aquabuild_core::{
    export_to_json, format_inr, get_config_path, import_from_json, ClientQuery, ClientStatus,
    Config, ContractorQuery, ContractorStatus, DataStore, DeletePolicy, DocumentQuery,
    DocumentType, LeadQuery, LeadStatus, PaymentQuery, PaymentStatus, ProjectQuery,
    ProjectStatus, Query, Summary, CLIENT_PREFIX, CONTRACTOR_PREFIX, DOCUMENT_PREFIX,
    LEAD_PREFIX, PAYMENT_PREFIX, PROJECT_PREFIX,
};

use crate::cli::{split_line, Cli, ConfigCommand, Kind, ListFilters, ShellCommand, ShellLine};

/// State of one shell session
struct Session {
    store: DataStore,
    policy: DeletePolicy,
    export_path: PathBuf,
    seed: bool,
    config_path: PathBuf,
}

impl Session {
    /// The settings in effect, as they would be written to the config file
    fn config(&self) -> Config {
        Config {
            delete_policy: self.policy,
            seed: self.seed,
            default_export_path: self.export_path.clone(),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => get_config_path()?,
    };
    let config = Config::load_or_default(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    debug!("Configuration from {}: {:?}", config_path.display(), config);

    let seed = config.seed && !cli.empty;
    let store = if seed {
        DataStore::seeded()
    } else {
        DataStore::new()
    };

    let mut session = Session {
        store,
        policy: cli.policy.unwrap_or(config.delete_policy),
        export_path: config.default_export_path,
        seed,
        config_path,
    };

    if let Some(path) = &cli.import {
        import_snapshot(&mut session.store, path)?;
    }

    run_shell(&mut session)
}

fn run_shell(session: &mut Session) -> Result<()> {
    println!(
        "{} (delete policy: {}). Type 'help' for commands.",
        "AquaBuild Pro back office".bold(),
        session.policy
    );

    loop {
        let line = match inquire::Text::new("aqua>").prompt() {
            Ok(line) => line,
            Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => {
                break;
            }
            Err(e) => return Err(e).context("Failed to read command"),
        };

        let words = split_line(&line);
        if words.is_empty() {
            continue;
        }

        let command = match ShellLine::try_parse_from(words) {
            Ok(parsed) => parsed.command,
            Err(e) => {
                e.print()?;
                continue;
            }
        };

        if matches!(command, ShellCommand::Exit) {
            break;
        }

        if let Err(e) = execute(session, command) {
            eprintln!("{} {:#}", "Error:".red(), e);
        }
    }

    Ok(())
}

fn execute(session: &mut Session, command: ShellCommand) -> Result<()> {
    match command {
        ShellCommand::List {
            kind,
            search,
            filters,
        } => list_records(&session.store, kind, &search.join(" "), filters),
        ShellCommand::Show { id } => show_record(&session.store, &id),
        ShellCommand::Add { kind } => add_record(&mut session.store, kind),
        ShellCommand::Edit { id } => edit_record(&mut session.store, &id),
        ShellCommand::Del { id, yes, policy } => delete_record(
            &mut session.store,
            &id,
            yes,
            policy.unwrap_or(session.policy),
        ),
        ShellCommand::Summary => {
            print_summary(&Summary::from_store(&session.store));
            Ok(())
        }
        ShellCommand::Export { path } => {
            let path = path.unwrap_or_else(|| session.export_path.clone());
            let count = export_to_json(&session.store, &path)
                .with_context(|| format!("Failed to export to {}", path.display()))?;
            println!(
                "{} Exported {} record(s) to {}",
                "✓".green(),
                count,
                path.display()
            );
            Ok(())
        }
        ShellCommand::Import { path } => import_snapshot(&mut session.store, &path),
        ShellCommand::Config(cmd) => handle_config_command(session, &cmd),
        ShellCommand::Exit => Ok(()),
    }
}

fn handle_config_command(session: &Session, cmd: &ConfigCommand) -> Result<()> {
    let config = session.config();

    match cmd {
        ConfigCommand::Show => {
            println!("{}", "Configuration:".blue().bold());
            println!("{}: {}", "File".cyan(), session.config_path.display());
            println!("{}: {}", "Delete policy".cyan(), config.delete_policy);
            println!("{}: {}", "Seed demo data".cyan(), config.seed);
            println!(
                "{}: {}",
                "Export path".cyan(),
                config.default_export_path.display()
            );
        }
        ConfigCommand::Init { force } => {
            let path = &session.config_path;
            if path.exists() && !force {
                anyhow::bail!(
                    "{} already exists. Use --force to overwrite it",
                    path.display()
                );
            }
            config
                .save(path)
                .with_context(|| format!("Failed to write config to {}", path.display()))?;
            info!("Wrote configuration to {}", path.display());
            println!("{} Wrote {}", "✓".green(), path.display());
        }
    }

    Ok(())
}

fn import_snapshot(store: &mut DataStore, path: &Path) -> Result<()> {
    let snapshot = import_from_json(path)
        .with_context(|| format!("Failed to import from {}", path.display()))?;
    let summary = store.import_snapshot(snapshot);
    info!("Imported snapshot from {}", path.display());
    println!(
        "{} Imported {} record(s) across {} collection(s)",
        "✓".green(),
        summary.records,
        summary.collections
    );
    Ok(())
}

/// Works out which collection an ID belongs to from its prefix
fn parse_record_id(id_str: &str) -> Result<(Kind, String)> {
    let id = id_str.trim().to_uppercase();
    // Three-letter prefixes first
    let kind = if id.starts_with(PAYMENT_PREFIX) {
        Kind::Payments
    } else if id.starts_with(DOCUMENT_PREFIX) {
        Kind::Documents
    } else if id.starts_with(LEAD_PREFIX) {
        Kind::Leads
    } else if id.starts_with(CLIENT_PREFIX) {
        Kind::Clients
    } else if id.starts_with(CONTRACTOR_PREFIX) {
        Kind::Contractors
    } else if id.starts_with(PROJECT_PREFIX) {
        Kind::Projects
    } else {
        anyhow::bail!(
            "Invalid record ID: '{}'. Expected a CL, CT, AQ, DOC, PAY or LD identifier (e.g., AQ001)",
            id_str
        );
    };
    Ok((kind, id))
}

fn client_status_colored(status: ClientStatus) -> ColoredString {
    let text = format!("{:<10}", status);
    match status {
        ClientStatus::Premium => text.purple(),
        ClientStatus::Active => text.green(),
        ClientStatus::Inactive => text.dimmed(),
    }
}

fn contractor_status_colored(status: ContractorStatus) -> ColoredString {
    let text = format!("{:<10}", status);
    match status {
        ContractorStatus::Premium => text.purple(),
        ContractorStatus::Verified => text.green(),
        ContractorStatus::Active => text.blue(),
        ContractorStatus::Inactive => text.dimmed(),
    }
}

/// Renders a project status in its status color
fn project_status_colored(status: ProjectStatus) -> ColoredString {
    let text = format!("{:<18}", status);
    match status {
        ProjectStatus::QuotationSent => text.blue(),
        ProjectStatus::UnderConstruction => text.green(),
        ProjectStatus::Completed => text.purple(),
        ProjectStatus::OnHold => text.yellow(),
    }
}

fn payment_status_colored(status: PaymentStatus) -> ColoredString {
    let text = format!("{:<8}", status);
    match status {
        PaymentStatus::Paid => text.green(),
        PaymentStatus::Partial => text.yellow(),
        PaymentStatus::Pending => text.blue(),
        PaymentStatus::Overdue => text.red(),
    }
}

fn lead_status_colored(status: LeadStatus) -> ColoredString {
    let text = format!("{:<5}", status);
    match status {
        LeadStatus::Hot => text.red(),
        LeadStatus::Warm => text.yellow(),
        LeadStatus::Cold => text.blue(),
    }
}

fn list_records(store: &DataStore, kind: Kind, search: &str, filters: ListFilters) -> Result<()> {
    let status = filters.status.as_deref();

    match kind {
        Kind::Clients => {
            let query = ClientQuery {
                search: search.to_string(),
                status: status.map(str::parse).transpose()?,
            };
            let clients = query.filter(store.list_clients());
            if clients.is_empty() {
                println!("{}", "No clients found.".yellow());
                return Ok(());
            }

            println!(
                "{:<6} | {:<22} | {:<12} | {:<10} | {:>8} | {:>14}",
                "ID", "Name", "City", "Status", "Projects", "Total Value"
            );
            println!("{}", "-".repeat(89));
            for client in clients {
                println!(
                    "{:<6} | {:<22} | {:<12} | {} | {:>8} | {:>14}",
                    client.id,
                    client.name,
                    client.city,
                    client_status_colored(client.status),
                    client.projects_count,
                    client.total_value
                );
            }
        }
        Kind::Contractors => {
            let query = ContractorQuery {
                search: search.to_string(),
                status: status.map(str::parse).transpose()?,
            };
            let contractors = query.filter(store.list_contractors());
            if contractors.is_empty() {
                println!("{}", "No contractors found.".yellow());
                return Ok(());
            }

            println!(
                "{:<6} | {:<20} | {:<18} | {:<10} | {:>6} | {:>8}",
                "ID", "Name", "Specialization", "Status", "Rating", "Projects"
            );
            println!("{}", "-".repeat(83));
            for contractor in contractors {
                println!(
                    "{:<6} | {:<20} | {:<18} | {} | {:>6.1} | {:>8}",
                    contractor.id,
                    contractor.name,
                    contractor.specialization,
                    contractor_status_colored(contractor.status),
                    contractor.rating,
                    contractor.projects_count
                );
            }
        }
        Kind::Projects => {
            let query = ProjectQuery {
                search: search.to_string(),
                status: status.map(str::parse).transpose()?,
                city: filters.city,
            };
            let projects = query.filter(store.list_project_views());
            if projects.is_empty() {
                println!("{}", "No projects found.".yellow());
                return Ok(());
            }

            println!(
                "{:<6} | {:<24} | {:<20} | {:<20} | {:<18} | {:>8}",
                "ID", "Title", "Client", "Contractor", "Status", "Progress"
            );
            println!("{}", "-".repeat(110));
            for view in projects {
                println!(
                    "{:<6} | {:<24} | {:<20} | {:<20} | {} | {:>7}%",
                    view.project.id,
                    view.project.title,
                    view.client_name,
                    view.contractor_name,
                    project_status_colored(view.project.status),
                    view.project.progress
                );
            }
        }
        Kind::Documents => {
            let query = DocumentQuery {
                search: search.to_string(),
                doc_type: filters
                    .doc_type
                    .as_deref()
                    .map(str::parse::<DocumentType>)
                    .transpose()?,
                project_id: filters.project.map(|p| p.to_uppercase()),
            };
            let documents = query.filter(store.list_document_views());
            if documents.is_empty() {
                println!("{}", "No documents found.".yellow());
                return Ok(());
            }

            println!(
                "{:<7} | {:<38} | {:<15} | {:<22} | {:<10} | {:>6}",
                "ID", "Name", "Type", "Project", "Uploaded", "Size"
            );
            println!("{}", "-".repeat(113));
            for view in documents {
                println!(
                    "{:<7} | {:<38} | {:<15} | {:<22} | {:<10} | {:>6}",
                    view.document.id,
                    view.document.name,
                    view.document.doc_type.to_string(),
                    view.project_name,
                    view.document.upload_date,
                    view.document.size
                );
            }
        }
        Kind::Payments => {
            let query = PaymentQuery {
                search: search.to_string(),
                status: status.map(str::parse).transpose()?,
                party: filters.party.as_deref().map(str::parse).transpose()?,
            };
            let payments = query.filter(store.list_payment_views());
            if payments.is_empty() {
                println!("{}", "No payments found.".yellow());
                return Ok(());
            }

            println!(
                "{:<6} | {:<24} | {:<20} | {:<10} | {:>12} | {:>12} | {:<8} | {:<10}",
                "ID", "Project", "Party", "Side", "Total", "Due", "Status", "Due date"
            );
            println!("{}", "-".repeat(121));
            for view in payments {
                println!(
                    "{:<6} | {:<24} | {:<20} | {:<10} | {:>12} | {:>12} | {} | {:<10}",
                    view.payment.id,
                    view.project_name,
                    view.party_name,
                    view.payment.party.to_string(),
                    format_inr(view.payment.total_amount),
                    format_inr(view.due_amount),
                    payment_status_colored(view.payment.status),
                    view.payment
                        .due_date
                        .map_or_else(|| "-".to_string(), |d| d.to_string())
                );
            }
        }
        Kind::Leads => {
            let query = LeadQuery {
                search: search.to_string(),
                status: status.map(str::parse).transpose()?,
                source: filters.source,
            };
            let leads = query.filter(store.list_leads());
            if leads.is_empty() {
                println!("{}", "No leads found.".yellow());
                return Ok(());
            }

            println!(
                "{:<6} | {:<22} | {:<12} | {:<5} | {:<18} | {:>12}",
                "ID", "Name", "Source", "Status", "Interested in", "Value"
            );
            println!("{}", "-".repeat(92));
            for lead in leads {
                println!(
                    "{:<6} | {:<22} | {:<12} | {} | {:<18} | {:>12}",
                    lead.id,
                    lead.name,
                    lead.source,
                    lead_status_colored(lead.status),
                    lead.project,
                    format_inr(lead.value)
                );
            }
        }
    }

    Ok(())
}

fn show_record(store: &DataStore, id_str: &str) -> Result<()> {
    let (kind, id) = parse_record_id(id_str)?;

    match kind {
        Kind::Clients => {
            let client = store.get_client(&id).context("Client not found")?;
            println!("{} {}", client.id.bold(), client.name.bold());
            println!("Status: {}", client_status_colored(client.status));
            println!("Email: {}", client.email);
            println!("Phone: {}", client.phone);
            println!("City: {}", client.city);
            println!("Address: {}", client.address);
            println!("Total value: {}", client.total_value);

            let projects = store.projects_for_client(&client.id);
            println!("\n{} ({}):", "Projects".green(), client.projects_count);
            for project in projects {
                println!(
                    "  {} {} [{}]",
                    project.id,
                    project.title,
                    project_status_colored(project.status)
                );
            }
        }
        Kind::Contractors => {
            let contractor = store.get_contractor(&id).context("Contractor not found")?;
            println!("{} {}", contractor.id.bold(), contractor.name.bold());
            println!("Status: {}", contractor_status_colored(contractor.status));
            println!("Email: {}", contractor.email);
            println!("Phone: {}", contractor.phone);
            println!("GST number: {}", contractor.gst_number);
            println!("Specialization: {}", contractor.specialization);
            println!("Rating: {:.1}", contractor.rating);

            let projects = store.projects_for_contractor(&contractor.id);
            println!("\n{} ({}):", "Projects".green(), contractor.projects_count);
            for project in projects {
                println!(
                    "  {} {} [{}]",
                    project.id,
                    project.title,
                    project_status_colored(project.status)
                );
            }
        }
        Kind::Projects => {
            let view = store.project_view(&id).context("Project not found")?;
            let project = &view.project;
            println!("{} {}", project.id.bold(), project.title.bold());
            println!("Status: {}", project_status_colored(project.status));
            println!("Progress: {}%", project.progress);
            println!("Client: {} ({})", view.client_name, project.client_id);
            match &project.contractor_id {
                Some(contractor_id) => {
                    println!("Contractor: {} ({})", view.contractor_name, contractor_id)
                }
                None => println!("Contractor: {}", view.contractor_name.yellow()),
            }
            println!("City: {}", project.city);
            println!("Scope: {}", project.scope);
            println!(
                "Total value: {}",
                project.total_value.as_deref().unwrap_or("-")
            );
            if let Some(date) = project.start_date {
                println!("Start date: {}", date);
            }
            if let Some(date) = project.expected_completion {
                println!("Expected completion: {}", date);
            }
            println!("Last updated: {}", project.last_updated);

            let documents = store.documents_for_project(&project.id);
            if !documents.is_empty() {
                println!("\n{}:", "Documents".green());
                for document in documents {
                    println!(
                        "  {} {} ({}, {})",
                        document.id, document.name, document.doc_type, document.upload_date
                    );
                }
            }

            let payments = store.payments_for_project(&project.id);
            if !payments.is_empty() {
                println!("\n{}:", "Payments".green());
                for payment in payments {
                    println!(
                        "  {} {} {} of {} due [{}]",
                        payment.id,
                        payment.party,
                        format_inr(payment.due_amount()),
                        format_inr(payment.total_amount),
                        payment_status_colored(payment.status)
                    );
                }
            }
        }
        Kind::Documents => {
            let view = store.document_view(&id).context("Document not found")?;
            let document = &view.document;
            println!("{} {}", document.id.bold(), document.name.bold());
            println!("Type: {}", document.doc_type);
            println!("Project: {} ({})", view.project_name, document.project_id);
            println!("Client: {}", view.client_name);
            println!("Uploaded: {}", document.upload_date);
            println!("Size: {}", document.size);
            println!("Format: {}", document.format);
            if let Some(url) = &document.url {
                println!("URL: {}", url);
            }
        }
        Kind::Payments => {
            let view = store.payment_view(&id).context("Payment not found")?;
            let payment = &view.payment;
            println!(
                "{} {} payment",
                payment.id.bold(),
                payment.party.to_string().bold()
            );
            println!("Status: {}", payment_status_colored(payment.status));
            println!("Project: {} ({})", view.project_name, payment.project_id);
            println!("{}: {}", payment.party, view.party_name);
            println!("Total: {}", format_inr(payment.total_amount));
            println!("Paid: {}", format_inr(payment.paid_amount));
            println!("Due: {}", format_inr(view.due_amount));
            if let Some(date) = payment.due_date {
                println!("Due date: {}", date);
            }
            if let Some(date) = payment.last_payment {
                println!("Last payment: {}", date);
            }
        }
        Kind::Leads => {
            let lead = store.get_lead(&id).context("Lead not found")?;
            println!("{} {}", lead.id.bold(), lead.name.bold());
            println!("Status: {}", lead_status_colored(lead.status));
            println!("Email: {}", lead.email);
            println!("Phone: {}", lead.phone);
            println!("Source: {}", lead.source);
            println!("Interested in: {}", lead.project);
            println!("Estimated value: {}", format_inr(lead.value));
        }
    }

    Ok(())
}

fn add_record(store: &mut DataStore, kind: Kind) -> Result<()> {
    let id = match kind {
        Kind::Clients => store.add_client(prompts::prompt_new_client()?).id,
        Kind::Contractors => store.add_contractor(prompts::prompt_new_contractor()?).id,
        Kind::Projects => {
            let new = prompts::prompt_new_project(store)?;
            store.add_project(new).id
        }
        Kind::Documents => {
            let new = prompts::prompt_new_document(store)?;
            store.add_document(new).id
        }
        Kind::Payments => {
            let new = prompts::prompt_new_payment(store)?;
            store.add_payment(new).id
        }
        Kind::Leads => store.add_lead(prompts::prompt_new_lead()?).id,
    };

    println!("{} Added {}", "✓".green(), id.green());
    Ok(())
}

fn edit_record(store: &mut DataStore, id_str: &str) -> Result<()> {
    let (kind, id) = parse_record_id(id_str)?;

    let updated = match kind {
        Kind::Clients => {
            let client = store.get_client(&id).context("Client not found")?;
            let patch = prompts::prompt_edit_client(&client)?;
            store.update_client(&id, patch).is_some()
        }
        Kind::Contractors => {
            let contractor = store.get_contractor(&id).context("Contractor not found")?;
            let patch = prompts::prompt_edit_contractor(&contractor)?;
            store.update_contractor(&id, patch).is_some()
        }
        Kind::Projects => {
            let project = store.get_project(&id).context("Project not found")?;
            let patch = prompts::prompt_edit_project(store, &project)?;
            store.update_project(&id, patch).is_some()
        }
        Kind::Documents => {
            let document = store.get_document(&id).context("Document not found")?;
            let patch = prompts::prompt_edit_document(store, &document)?;
            store.update_document(&id, patch).is_some()
        }
        Kind::Payments => {
            let payment = store.get_payment(&id).context("Payment not found")?;
            let patch = prompts::prompt_edit_payment(store, &payment)?;
            store.update_payment(&id, patch).is_some()
        }
        Kind::Leads => {
            let lead = store.get_lead(&id).context("Lead not found")?;
            let patch = prompts::prompt_edit_lead(&lead)?;
            store.update_lead(&id, patch).is_some()
        }
    };

    if !updated {
        anyhow::bail!("{} no longer exists", id);
    }
    println!("{} Updated {}", "✓".green(), id.green());
    Ok(())
}

fn delete_record(
    store: &mut DataStore,
    id_str: &str,
    skip_confirm: bool,
    policy: DeletePolicy,
) -> Result<()> {
    let (kind, id) = parse_record_id(id_str)?;

    // Describe what is about to go
    let (label, dependents) = match kind {
        Kind::Clients => {
            let client = store.get_client(&id).context("Client not found")?;
            (client.name, store.projects_for_client(&id).len())
        }
        Kind::Contractors => {
            let contractor = store.get_contractor(&id).context("Contractor not found")?;
            (contractor.name, store.projects_for_contractor(&id).len())
        }
        Kind::Projects => {
            let project = store.get_project(&id).context("Project not found")?;
            let dependents =
                store.documents_for_project(&id).len() + store.payments_for_project(&id).len();
            (project.title, dependents)
        }
        Kind::Documents => {
            let document = store.get_document(&id).context("Document not found")?;
            (document.name, 0)
        }
        Kind::Payments => {
            let view = store.payment_view(&id).context("Payment not found")?;
            (format!("{} payment for {}", view.payment.party, view.project_name), 0)
        }
        Kind::Leads => {
            let lead = store.get_lead(&id).context("Lead not found")?;
            (lead.name, 0)
        }
    };

    println!("{}", "Record to delete:".yellow());
    println!("  ID: {}", id);
    println!("  Name: {}", label);
    if dependents > 0 {
        println!(
            "  Dependents: {} (policy: {})",
            dependents,
            policy.to_string().bold()
        );
    }

    if !skip_confirm {
        let confirm = inquire::Confirm::new("Are you sure you want to delete this record?")
            .with_default(false)
            .prompt()?;

        if !confirm {
            println!("{}", "Deletion cancelled.".yellow());
            return Ok(());
        }
    }

    let deleted = match kind {
        Kind::Clients => store.delete_client_with(&id, policy)?,
        Kind::Contractors => store.delete_contractor_with(&id, policy)?,
        Kind::Projects => store.delete_project_with(&id, policy)?,
        Kind::Documents => store.delete_document(&id),
        Kind::Payments => store.delete_payment(&id),
        Kind::Leads => store.delete_lead(&id),
    };

    if deleted {
        println!("{} Deleted {}", "✓".green(), id);
    } else {
        println!("{}", "Nothing was deleted.".yellow());
    }
    Ok(())
}

fn print_summary(summary: &Summary) {
    println!("{}", "Dashboard".bold());
    println!(
        "  Clients: {} ({} active)",
        summary.client_count, summary.active_clients
    );
    println!(
        "  Contractors: {} ({} verified, average rating {:.1})",
        summary.contractor_count, summary.verified_contractors, summary.average_rating
    );
    println!(
        "  Projects: {} (average progress {:.0}%)",
        summary.project_count, summary.average_progress
    );
    for (status, count) in &summary.projects_by_status {
        println!("    {} {}", project_status_colored(*status), count);
    }
    println!(
        "  Pipeline value: {}",
        summary.pipeline_value_display().green()
    );
    println!(
        "  Receivables: {}  Payables: {}  Overdue payments: {}",
        format_inr(summary.receivables).green(),
        format_inr(summary.payables).yellow(),
        summary.overdue_payments
    );
    println!(
        "  Leads: {} ({} hot, worth {})",
        summary.lead_count,
        summary.hot_leads,
        format_inr(summary.lead_value)
    );
}
