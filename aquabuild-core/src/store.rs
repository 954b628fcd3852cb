//! In-memory data store for clients, contractors, projects, documents,
//! payments and marketing leads
//!
//! The store owns identifier assignment and keeps every client's and
//! contractor's `projects_count` equal to the number of projects that
//! reference it. Reads hand out owned copies; all mutation goes through
//! `&mut self` methods, so each operation and its count maintenance is a
//! single step from the caller's point of view.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, StoreError};
use crate::export::{ImportSummary, Snapshot};
use crate::models::{
    blank_to_none, Client, ClientPatch, Contractor, ContractorPatch, Document, DocumentPatch,
    Lead, LeadPatch, NewClient, NewContractor, NewDocument, NewLead, NewPayment, NewProject,
    Payment, PaymentParty, PaymentPatch, Project, ProjectPatch, CLIENT_PREFIX,
    CONTRACTOR_PREFIX, DOCUMENT_PREFIX, LEAD_PREFIX, PAYMENT_PREFIX, PROJECT_PREFIX,
    UNASSIGNED, UNKNOWN_CLIENT, UNKNOWN_PROJECT, ZERO_VALUE,
};
use crate::sequence::IdSequence;

/// What happens to dependent records when a client, contractor or project
/// is deleted
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DeletePolicy {
    /// Leave dependents pointing at the deleted record
    #[default]
    Orphan,
    /// Client: remove its projects with their documents and payments.
    /// Contractor: unassign its projects.
    /// Project: remove its documents and payments.
    Cascade,
    /// Refuse to delete while dependents exist
    Restrict,
}

impl fmt::Display for DeletePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeletePolicy::Orphan => write!(f, "orphan"),
            DeletePolicy::Cascade => write!(f, "cascade"),
            DeletePolicy::Restrict => write!(f, "restrict"),
        }
    }
}

impl FromStr for DeletePolicy {
    type Err = StoreError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "orphan" => Ok(DeletePolicy::Orphan),
            "cascade" => Ok(DeletePolicy::Cascade),
            "restrict" => Ok(DeletePolicy::Restrict),
            _ => Err(StoreError::UnknownVariant {
                kind: "delete policy",
                value: s.to_string(),
            }),
        }
    }
}

/// A project joined with the display names of the records it references
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectView {
    #[serde(flatten)]
    pub project: Project,
    pub client_name: String,
    pub contractor_name: String,
    pub status_color: &'static str,
}

/// A document joined with its project's title and client name
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DocumentView {
    #[serde(flatten)]
    pub document: Document,
    pub project_name: String,
    pub client_name: String,
}

/// A payment joined with its project's title and the name of the party on
/// the other side (the project's client or contractor)
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentView {
    #[serde(flatten)]
    pub payment: Payment,
    pub project_name: String,
    pub party_name: String,
    pub due_amount: u64,
}

/// Single source of truth for all business records
#[derive(Debug, Clone)]
pub struct DataStore {
    clients: Vec<Client>,
    contractors: Vec<Contractor>,
    projects: Vec<Project>,
    documents: Vec<Document>,
    payments: Vec<Payment>,
    leads: Vec<Lead>,
    client_ids: IdSequence,
    contractor_ids: IdSequence,
    project_ids: IdSequence,
    document_ids: IdSequence,
    payment_ids: IdSequence,
    lead_ids: IdSequence,
}

impl Default for DataStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DataStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self {
            clients: Vec::new(),
            contractors: Vec::new(),
            projects: Vec::new(),
            documents: Vec::new(),
            payments: Vec::new(),
            leads: Vec::new(),
            client_ids: IdSequence::new(CLIENT_PREFIX),
            contractor_ids: IdSequence::new(CONTRACTOR_PREFIX),
            project_ids: IdSequence::new(PROJECT_PREFIX),
            document_ids: IdSequence::new(DOCUMENT_PREFIX),
            payment_ids: IdSequence::new(PAYMENT_PREFIX),
            lead_ids: IdSequence::new(LEAD_PREFIX),
        }
    }

    // =========================================================================
    // Clients
    // =========================================================================

    pub fn list_clients(&self) -> Vec<Client> {
        self.clients.clone()
    }

    pub fn get_client(&self, id: &str) -> Option<Client> {
        self.clients.iter().find(|c| c.id == id).cloned()
    }

    pub fn add_client(&mut self, new: NewClient) -> Client {
        let client = Client {
            id: self.client_ids.next_id(),
            name: new.name,
            email: new.email,
            phone: new.phone,
            city: new.city,
            address: new.address,
            status: new.status,
            projects_count: 0,
            total_value: new.total_value.unwrap_or_else(|| ZERO_VALUE.to_string()),
        };
        debug!("Added client {} ({})", client.id, client.name);
        self.clients.push(client.clone());
        client
    }

    /// Renaming a client is visible on its projects immediately, because
    /// project views resolve names at read time.
    pub fn update_client(&mut self, id: &str, patch: ClientPatch) -> Option<Client> {
        let client = self.clients.iter_mut().find(|c| c.id == id)?;
        patch.apply(client);
        debug!("Updated client {}", id);
        Some(client.clone())
    }

    /// Deletes a client, leaving its projects in place
    pub fn delete_client(&mut self, id: &str) -> bool {
        self.remove_client(id)
    }

    pub fn delete_client_with(&mut self, id: &str, policy: DeletePolicy) -> Result<bool> {
        if !self.clients.iter().any(|c| c.id == id) {
            return Ok(false);
        }

        match policy {
            DeletePolicy::Orphan => {}
            DeletePolicy::Restrict => {
                let count = self.projects.iter().filter(|p| p.client_id == id).count();
                if count > 0 {
                    return Err(StoreError::HasDependents {
                        kind: "Client",
                        id: id.to_string(),
                        count,
                    });
                }
            }
            DeletePolicy::Cascade => {
                let removed: Vec<String> = self
                    .projects
                    .iter()
                    .filter(|p| p.client_id == id)
                    .map(|p| p.id.clone())
                    .collect();
                self.projects.retain(|p| p.client_id != id);
                self.documents.retain(|d| !removed.contains(&d.project_id));
                self.payments.retain(|p| !removed.contains(&p.project_id));
                debug!(
                    "Cascaded delete of client {} to {} project(s)",
                    id,
                    removed.len()
                );
                self.recount_projects();
            }
        }

        Ok(self.remove_client(id))
    }

    fn remove_client(&mut self, id: &str) -> bool {
        let original_len = self.clients.len();
        self.clients.retain(|c| c.id != id);
        let removed = self.clients.len() != original_len;
        if removed {
            debug!("Deleted client {}", id);
        }
        removed
    }

    // =========================================================================
    // Contractors
    // =========================================================================

    pub fn list_contractors(&self) -> Vec<Contractor> {
        self.contractors.clone()
    }

    pub fn get_contractor(&self, id: &str) -> Option<Contractor> {
        self.contractors.iter().find(|c| c.id == id).cloned()
    }

    /// New contractors start with a rating of 0; set it with
    /// [`update_contractor`](Self::update_contractor).
    pub fn add_contractor(&mut self, new: NewContractor) -> Contractor {
        let contractor = Contractor {
            id: self.contractor_ids.next_id(),
            name: new.name,
            email: new.email,
            phone: new.phone,
            gst_number: new.gst_number,
            specialization: new.specialization,
            status: new.status,
            projects_count: 0,
            rating: 0.0,
        };
        debug!("Added contractor {} ({})", contractor.id, contractor.name);
        self.contractors.push(contractor.clone());
        contractor
    }

    pub fn update_contractor(&mut self, id: &str, patch: ContractorPatch) -> Option<Contractor> {
        let contractor = self.contractors.iter_mut().find(|c| c.id == id)?;
        patch.apply(contractor);
        debug!("Updated contractor {}", id);
        Some(contractor.clone())
    }

    /// Deletes a contractor, leaving its projects pointing at it
    pub fn delete_contractor(&mut self, id: &str) -> bool {
        self.remove_contractor(id)
    }

    pub fn delete_contractor_with(&mut self, id: &str, policy: DeletePolicy) -> Result<bool> {
        if !self.contractors.iter().any(|c| c.id == id) {
            return Ok(false);
        }

        match policy {
            DeletePolicy::Orphan => {}
            DeletePolicy::Restrict => {
                let count = self
                    .projects
                    .iter()
                    .filter(|p| p.contractor_id.as_deref() == Some(id))
                    .count();
                if count > 0 {
                    return Err(StoreError::HasDependents {
                        kind: "Contractor",
                        id: id.to_string(),
                        count,
                    });
                }
            }
            DeletePolicy::Cascade => {
                let mut unassigned = 0;
                for project in self
                    .projects
                    .iter_mut()
                    .filter(|p| p.contractor_id.as_deref() == Some(id))
                {
                    project.contractor_id = None;
                    unassigned += 1;
                }
                debug!(
                    "Unassigned contractor {} from {} project(s)",
                    id, unassigned
                );
            }
        }

        Ok(self.remove_contractor(id))
    }

    fn remove_contractor(&mut self, id: &str) -> bool {
        let original_len = self.contractors.len();
        self.contractors.retain(|c| c.id != id);
        let removed = self.contractors.len() != original_len;
        if removed {
            debug!("Deleted contractor {}", id);
        }
        removed
    }

    // =========================================================================
    // Projects
    // =========================================================================

    pub fn list_projects(&self) -> Vec<Project> {
        self.projects.clone()
    }

    pub fn get_project(&self, id: &str) -> Option<Project> {
        self.projects.iter().find(|p| p.id == id).cloned()
    }

    /// Adds a project. The referenced client and contractor need not exist.
    pub fn add_project(&mut self, new: NewProject) -> Project {
        let project = Project {
            id: self.project_ids.next_id(),
            title: new.title,
            client_id: new.client_id,
            contractor_id: blank_to_none(new.contractor_id),
            city: new.city,
            scope: new.scope,
            status: new.status,
            progress: new.progress,
            total_value: new.total_value,
            start_date: new.start_date,
            expected_completion: new.expected_completion,
            last_updated: new.last_updated,
        };
        debug!(
            "Added project {} for client {}",
            project.id, project.client_id
        );
        self.projects.push(project.clone());
        self.recount_projects();
        project
    }

    pub fn update_project(&mut self, id: &str, patch: ProjectPatch) -> Option<Project> {
        let project = self.projects.iter_mut().find(|p| p.id == id)?;
        let reassigns = patch.reassigns(project);
        patch.apply(project);
        let updated = project.clone();

        if reassigns {
            self.recount_projects();
        }
        debug!("Updated project {}", id);
        Some(updated)
    }

    /// Deletes a project, leaving its documents and payments in place
    pub fn delete_project(&mut self, id: &str) -> bool {
        self.remove_project(id)
    }

    pub fn delete_project_with(&mut self, id: &str, policy: DeletePolicy) -> Result<bool> {
        if !self.projects.iter().any(|p| p.id == id) {
            return Ok(false);
        }

        match policy {
            DeletePolicy::Orphan => {}
            DeletePolicy::Restrict => {
                let count = self.documents.iter().filter(|d| d.project_id == id).count()
                    + self.payments.iter().filter(|p| p.project_id == id).count();
                if count > 0 {
                    return Err(StoreError::HasDependents {
                        kind: "Project",
                        id: id.to_string(),
                        count,
                    });
                }
            }
            DeletePolicy::Cascade => {
                self.documents.retain(|d| d.project_id != id);
                self.payments.retain(|p| p.project_id != id);
            }
        }

        Ok(self.remove_project(id))
    }

    fn remove_project(&mut self, id: &str) -> bool {
        let original_len = self.projects.len();
        self.projects.retain(|p| p.id != id);
        if self.projects.len() == original_len {
            return false;
        }
        debug!("Deleted project {}", id);
        self.recount_projects();
        true
    }

    pub fn projects_for_client(&self, client_id: &str) -> Vec<Project> {
        self.projects
            .iter()
            .filter(|p| p.client_id == client_id)
            .cloned()
            .collect()
    }

    pub fn projects_for_contractor(&self, contractor_id: &str) -> Vec<Project> {
        self.projects
            .iter()
            .filter(|p| p.contractor_id.as_deref() == Some(contractor_id))
            .cloned()
            .collect()
    }

    // =========================================================================
    // Documents
    // =========================================================================

    pub fn list_documents(&self) -> Vec<Document> {
        self.documents.clone()
    }

    pub fn get_document(&self, id: &str) -> Option<Document> {
        self.documents.iter().find(|d| d.id == id).cloned()
    }

    pub fn add_document(&mut self, new: NewDocument) -> Document {
        let document = Document {
            id: self.document_ids.next_id(),
            project_id: new.project_id,
            doc_type: new.doc_type,
            name: new.name,
            upload_date: new.upload_date,
            size: new.size,
            format: new.format,
            url: new.url,
        };
        debug!(
            "Added document {} to project {}",
            document.id, document.project_id
        );
        self.documents.push(document.clone());
        document
    }

    pub fn update_document(&mut self, id: &str, patch: DocumentPatch) -> Option<Document> {
        let document = self.documents.iter_mut().find(|d| d.id == id)?;
        patch.apply(document);
        debug!("Updated document {}", id);
        Some(document.clone())
    }

    pub fn delete_document(&mut self, id: &str) -> bool {
        let original_len = self.documents.len();
        self.documents.retain(|d| d.id != id);
        let removed = self.documents.len() != original_len;
        if removed {
            debug!("Deleted document {}", id);
        }
        removed
    }

    pub fn documents_for_project(&self, project_id: &str) -> Vec<Document> {
        self.documents
            .iter()
            .filter(|d| d.project_id == project_id)
            .cloned()
            .collect()
    }

    // =========================================================================
    // Payments
    // =========================================================================

    pub fn list_payments(&self) -> Vec<Payment> {
        self.payments.clone()
    }

    pub fn get_payment(&self, id: &str) -> Option<Payment> {
        self.payments.iter().find(|p| p.id == id).cloned()
    }

    /// Adds a payment record. The referenced project need not exist.
    pub fn add_payment(&mut self, new: NewPayment) -> Payment {
        let payment = Payment {
            id: self.payment_ids.next_id(),
            project_id: new.project_id,
            party: new.party,
            total_amount: new.total_amount,
            paid_amount: new.paid_amount,
            due_date: new.due_date,
            status: new.status,
            last_payment: new.last_payment,
        };
        debug!(
            "Added {} payment {} to project {}",
            payment.party, payment.id, payment.project_id
        );
        self.payments.push(payment.clone());
        payment
    }

    pub fn update_payment(&mut self, id: &str, patch: PaymentPatch) -> Option<Payment> {
        let payment = self.payments.iter_mut().find(|p| p.id == id)?;
        patch.apply(payment);
        debug!("Updated payment {}", id);
        Some(payment.clone())
    }

    pub fn delete_payment(&mut self, id: &str) -> bool {
        let original_len = self.payments.len();
        self.payments.retain(|p| p.id != id);
        let removed = self.payments.len() != original_len;
        if removed {
            debug!("Deleted payment {}", id);
        }
        removed
    }

    pub fn payments_for_project(&self, project_id: &str) -> Vec<Payment> {
        self.payments
            .iter()
            .filter(|p| p.project_id == project_id)
            .cloned()
            .collect()
    }

    // =========================================================================
    // Leads
    // =========================================================================

    pub fn list_leads(&self) -> Vec<Lead> {
        self.leads.clone()
    }

    pub fn get_lead(&self, id: &str) -> Option<Lead> {
        self.leads.iter().find(|l| l.id == id).cloned()
    }

    pub fn add_lead(&mut self, new: NewLead) -> Lead {
        let lead = Lead {
            id: self.lead_ids.next_id(),
            name: new.name,
            email: new.email,
            phone: new.phone,
            source: new.source,
            status: new.status,
            project: new.project,
            value: new.value,
        };
        debug!("Added lead {} ({})", lead.id, lead.name);
        self.leads.push(lead.clone());
        lead
    }

    pub fn update_lead(&mut self, id: &str, patch: LeadPatch) -> Option<Lead> {
        let lead = self.leads.iter_mut().find(|l| l.id == id)?;
        patch.apply(lead);
        debug!("Updated lead {}", id);
        Some(lead.clone())
    }

    pub fn delete_lead(&mut self, id: &str) -> bool {
        let original_len = self.leads.len();
        self.leads.retain(|l| l.id != id);
        let removed = self.leads.len() != original_len;
        if removed {
            debug!("Deleted lead {}", id);
        }
        removed
    }

    // =========================================================================
    // Read-time joins
    // =========================================================================

    fn client_name(&self, client_id: &str) -> String {
        self.clients
            .iter()
            .find(|c| c.id == client_id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
    }

    fn contractor_name(&self, contractor_id: Option<&str>) -> String {
        contractor_id
            .and_then(|id| self.contractors.iter().find(|c| c.id == id))
            .map(|c| c.name.clone())
            .unwrap_or_else(|| UNASSIGNED.to_string())
    }

    fn view_of(&self, project: &Project) -> ProjectView {
        ProjectView {
            client_name: self.client_name(&project.client_id),
            contractor_name: self.contractor_name(project.contractor_id.as_deref()),
            status_color: project.status_color(),
            project: project.clone(),
        }
    }

    fn document_view_of(&self, document: &Document) -> DocumentView {
        let project = self.projects.iter().find(|p| p.id == document.project_id);
        DocumentView {
            project_name: project
                .map(|p| p.title.clone())
                .unwrap_or_else(|| UNKNOWN_PROJECT.to_string()),
            client_name: project
                .map(|p| self.client_name(&p.client_id))
                .unwrap_or_else(|| UNKNOWN_CLIENT.to_string()),
            document: document.clone(),
        }
    }

    fn payment_view_of(&self, payment: &Payment) -> PaymentView {
        let project = self.projects.iter().find(|p| p.id == payment.project_id);
        let party_name = match (project, payment.party) {
            (Some(p), PaymentParty::Client) => self.client_name(&p.client_id),
            (Some(p), PaymentParty::Contractor) => {
                self.contractor_name(p.contractor_id.as_deref())
            }
            (None, PaymentParty::Client) => UNKNOWN_CLIENT.to_string(),
            (None, PaymentParty::Contractor) => UNASSIGNED.to_string(),
        };
        PaymentView {
            project_name: project
                .map(|p| p.title.clone())
                .unwrap_or_else(|| UNKNOWN_PROJECT.to_string()),
            party_name,
            due_amount: payment.due_amount(),
            payment: payment.clone(),
        }
    }

    pub fn project_view(&self, id: &str) -> Option<ProjectView> {
        self.projects
            .iter()
            .find(|p| p.id == id)
            .map(|p| self.view_of(p))
    }

    pub fn list_project_views(&self) -> Vec<ProjectView> {
        self.projects.iter().map(|p| self.view_of(p)).collect()
    }

    pub fn document_view(&self, id: &str) -> Option<DocumentView> {
        self.documents
            .iter()
            .find(|d| d.id == id)
            .map(|d| self.document_view_of(d))
    }

    pub fn list_document_views(&self) -> Vec<DocumentView> {
        self.documents
            .iter()
            .map(|d| self.document_view_of(d))
            .collect()
    }

    pub fn payment_view(&self, id: &str) -> Option<PaymentView> {
        self.payments
            .iter()
            .find(|p| p.id == id)
            .map(|p| self.payment_view_of(p))
    }

    pub fn list_payment_views(&self) -> Vec<PaymentView> {
        self.payments
            .iter()
            .map(|p| self.payment_view_of(p))
            .collect()
    }

    // =========================================================================
    // Snapshot export/import
    // =========================================================================

    /// Captures every collection as a plain structured object
    pub fn export_snapshot(&self) -> Snapshot {
        Snapshot {
            exported_at: Some(chrono::Utc::now()),
            clients: Some(self.list_clients()),
            contractors: Some(self.list_contractors()),
            projects: Some(self.list_projects()),
            documents: Some(self.list_documents()),
            payments: Some(self.list_payments()),
            leads: Some(self.list_leads()),
        }
    }

    /// Replaces each collection present in the snapshot; absent collections
    /// are left untouched. Identifier counters move past the imported ids
    /// and project counts are recomputed.
    pub fn import_snapshot(&mut self, snapshot: Snapshot) -> ImportSummary {
        let mut summary = ImportSummary::default();

        if let Some(clients) = snapshot.clients {
            summary.record(clients.len());
            self.clients = clients;
            self.client_ids
                .advance_past(self.clients.iter().map(|c| c.id.as_str()));
        }
        if let Some(contractors) = snapshot.contractors {
            summary.record(contractors.len());
            self.contractors = contractors;
            self.contractor_ids
                .advance_past(self.contractors.iter().map(|c| c.id.as_str()));
        }
        if let Some(projects) = snapshot.projects {
            summary.record(projects.len());
            self.projects = projects;
            self.project_ids
                .advance_past(self.projects.iter().map(|p| p.id.as_str()));
        }
        if let Some(documents) = snapshot.documents {
            summary.record(documents.len());
            self.documents = documents;
            self.document_ids
                .advance_past(self.documents.iter().map(|d| d.id.as_str()));
        }
        if let Some(payments) = snapshot.payments {
            summary.record(payments.len());
            self.payments = payments;
            self.payment_ids
                .advance_past(self.payments.iter().map(|p| p.id.as_str()));
        }
        if let Some(leads) = snapshot.leads {
            summary.record(leads.len());
            self.leads = leads;
            self.lead_ids
                .advance_past(self.leads.iter().map(|l| l.id.as_str()));
        }

        self.recount_projects();
        info!(
            "Imported {} record(s) across {} collection(s)",
            summary.records, summary.collections
        );
        summary
    }

    // =========================================================================
    // Derived fields
    // =========================================================================

    /// Recomputes `projects_count` for every client and contractor
    fn recount_projects(&mut self) {
        let mut by_client: HashMap<&str, u32> = HashMap::new();
        let mut by_contractor: HashMap<&str, u32> = HashMap::new();

        for project in &self.projects {
            *by_client.entry(project.client_id.as_str()).or_default() += 1;
            if let Some(contractor_id) = project.contractor_id.as_deref() {
                *by_contractor.entry(contractor_id).or_default() += 1;
            }
        }

        for client in &mut self.clients {
            client.projects_count = by_client.get(client.id.as_str()).copied().unwrap_or(0);
        }
        for contractor in &mut self.contractors {
            contractor.projects_count = by_contractor
                .get(contractor.id.as_str())
                .copied()
                .unwrap_or(0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClientStatus, DocumentType, LeadStatus, PaymentStatus, ProjectStatus};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// A store with client CL001 and contractor CT001 and nothing else
    fn store_with_parties() -> DataStore {
        let mut store = DataStore::new();
        store.add_client(NewClient::new("Rajesh Sharma"));
        store.add_contractor(NewContractor::new("AquaTech Solutions"));
        store
    }

    fn project_for(client: &str, contractor: Option<&str>) -> NewProject {
        NewProject {
            contractor_id: contractor.map(String::from),
            ..NewProject::new("Test Pool", client)
        }
    }

    fn count_for_client(store: &DataStore, id: &str) -> u32 {
        store.get_client(id).unwrap().projects_count
    }

    fn count_for_contractor(store: &DataStore, id: &str) -> u32 {
        store.get_contractor(id).unwrap().projects_count
    }

    #[test]
    fn test_add_assigns_prefixed_ids_and_defaults() {
        let mut store = DataStore::new();

        let client = store.add_client(NewClient::new("Priya Patel"));
        assert_eq!(client.id, "CL001");
        assert_eq!(client.projects_count, 0);
        assert_eq!(client.total_value, "₹0");
        assert_eq!(client.status, ClientStatus::Active);

        let contractor = store.add_contractor(NewContractor::new("Elite Pools"));
        assert_eq!(contractor.id, "CT001");
        assert_eq!(contractor.rating, 0.0);

        let project = store.add_project(project_for("CL001", None));
        assert_eq!(project.id, "AQ001");

        let document = store.add_document(NewDocument::new(
            "AQ001",
            DocumentType::Quotation,
            "Initial Quotation",
            date(2024, 5, 15),
        ));
        assert_eq!(document.id, "DOC001");
    }

    #[test]
    fn test_add_and_delete_project_maintains_counts() {
        let mut store = store_with_parties();

        let project = store.add_project(project_for("CL001", Some("CT001")));
        assert_eq!(project.id, "AQ001");
        assert_eq!(count_for_client(&store, "CL001"), 1);
        assert_eq!(count_for_contractor(&store, "CT001"), 1);

        assert!(store.delete_project("AQ001"));
        assert_eq!(count_for_client(&store, "CL001"), 0);
        assert_eq!(count_for_contractor(&store, "CT001"), 0);
        assert!(store.get_project("AQ001").is_none());
    }

    #[test]
    fn test_client_count_matches_projects_after_each_add() {
        let mut store = store_with_parties();
        store.add_client(NewClient::new("Other"));

        for i in 0..5 {
            let client = if i % 2 == 0 { "CL001" } else { "CL002" };
            store.add_project(project_for(client, None));

            for c in store.list_clients() {
                let expected = store
                    .list_projects()
                    .iter()
                    .filter(|p| p.client_id == c.id)
                    .count() as u32;
                assert_eq!(c.projects_count, expected);
            }
        }
        assert_eq!(count_for_client(&store, "CL001"), 3);
        assert_eq!(count_for_client(&store, "CL002"), 2);
    }

    #[test]
    fn test_delete_project_leaves_unrelated_counts_alone() {
        let mut store = store_with_parties();
        store.add_client(NewClient::new("Green Valley Resort"));
        store.add_contractor(NewContractor::new("Pool Masters Inc"));

        store.add_project(project_for("CL001", Some("CT001")));
        store.add_project(project_for("CL001", Some("CT001")));
        store.add_project(project_for("CL002", Some("CT002")));

        assert!(store.delete_project("AQ001"));
        assert_eq!(count_for_client(&store, "CL001"), 1);
        assert_eq!(count_for_contractor(&store, "CT001"), 1);
        assert_eq!(count_for_client(&store, "CL002"), 1);
        assert_eq!(count_for_contractor(&store, "CT002"), 1);
    }

    #[test]
    fn test_ids_are_not_reused_after_delete() {
        let mut store = store_with_parties();
        store.add_project(project_for("CL001", None));
        store.add_project(project_for("CL001", None));

        assert!(store.delete_project("AQ001"));
        let third = store.add_project(project_for("CL001", None));
        assert_eq!(third.id, "AQ003");

        let fourth = store.add_project(project_for("CL001", None));
        assert_eq!(fourth.id, "AQ004");

        let ids: std::collections::HashSet<_> =
            store.list_projects().into_iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn test_update_changes_only_patched_fields() {
        let mut store = store_with_parties();
        let before = store.add_project(NewProject {
            scope: "Infinity Pool + Deck".into(),
            progress: 65,
            status: ProjectStatus::UnderConstruction,
            start_date: Some(date(2024, 4, 15)),
            ..project_for("CL001", Some("CT001"))
        });

        let after = store
            .update_project(
                "AQ001",
                ProjectPatch {
                    status: Some(ProjectStatus::Completed),
                    progress: Some(100),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(after.status, ProjectStatus::Completed);
        assert_eq!(after.progress, 100);
        assert_eq!(after.status_color(), "bg-purple-500");
        assert_eq!(after.title, before.title);
        assert_eq!(after.scope, before.scope);
        assert_eq!(after.client_id, before.client_id);
        assert_eq!(after.contractor_id, before.contractor_id);
        assert_eq!(after.start_date, before.start_date);
        assert_eq!(after.id, before.id);
    }

    #[test]
    fn test_update_unknown_id_returns_none() {
        let mut store = store_with_parties();
        assert!(store
            .update_client("CL999", ClientPatch::default())
            .is_none());
        assert!(store
            .update_project("AQ999", ProjectPatch::default())
            .is_none());
        assert!(!store.delete_document("DOC999"));
    }

    #[test]
    fn test_reassigning_project_moves_counts() {
        let mut store = store_with_parties();
        store.add_client(NewClient::new("Amit Kumar"));
        store.add_contractor(NewContractor::new("Elite Pools"));
        store.add_project(project_for("CL001", Some("CT001")));

        store.update_project(
            "AQ001",
            ProjectPatch {
                client_id: Some("CL002".into()),
                contractor_id: Some(Some("CT002".into())),
                ..Default::default()
            },
        );
        assert_eq!(count_for_client(&store, "CL001"), 0);
        assert_eq!(count_for_client(&store, "CL002"), 1);
        assert_eq!(count_for_contractor(&store, "CT001"), 0);
        assert_eq!(count_for_contractor(&store, "CT002"), 1);

        store.update_project(
            "AQ001",
            ProjectPatch {
                contractor_id: Some(None),
                ..Default::default()
            },
        );
        assert_eq!(count_for_contractor(&store, "CT002"), 0);
        assert_eq!(
            store.project_view("AQ001").unwrap().contractor_name,
            UNASSIGNED
        );
    }

    #[test]
    fn test_list_returns_a_copy() {
        let mut store = store_with_parties();
        let mut clients = store.list_clients();
        clients[0].name = "Mutated".into();
        clients.clear();

        let fresh = store.list_clients();
        assert_eq!(fresh.len(), 1);
        assert_eq!(fresh[0].name, "Rajesh Sharma");

        let mut one = store.get_client("CL001").unwrap();
        one.projects_count = 42;
        assert_eq!(count_for_client(&store, "CL001"), 0);

        store.add_project(project_for("CL001", None));
        assert_eq!(count_for_client(&store, "CL001"), 1);
    }

    #[test]
    fn test_views_resolve_names_at_read_time() {
        let mut store = store_with_parties();
        store.add_project(project_for("CL001", Some("CT001")));

        let view = store.project_view("AQ001").unwrap();
        assert_eq!(view.client_name, "Rajesh Sharma");
        assert_eq!(view.contractor_name, "AquaTech Solutions");
        assert_eq!(view.status_color, "bg-blue-500");

        store.update_client(
            "CL001",
            ClientPatch {
                name: Some("Rajesh K. Sharma".into()),
                ..Default::default()
            },
        );
        assert_eq!(
            store.project_view("AQ001").unwrap().client_name,
            "Rajesh K. Sharma"
        );
    }

    #[test]
    fn test_orphan_delete_leaves_dangling_references() {
        let mut store = store_with_parties();
        store.add_project(project_for("CL001", Some("CT001")));

        assert!(store.delete_client("CL001"));
        assert!(store.delete_contractor("CT001"));

        let project = store.get_project("AQ001").unwrap();
        assert_eq!(project.client_id, "CL001");
        assert_eq!(project.contractor_id.as_deref(), Some("CT001"));

        let view = store.project_view("AQ001").unwrap();
        assert_eq!(view.client_name, UNKNOWN_CLIENT);
        assert_eq!(view.contractor_name, UNASSIGNED);
    }

    #[test]
    fn test_cascade_delete_client_removes_projects_and_documents() {
        let mut store = store_with_parties();
        store.add_client(NewClient::new("Priya Patel"));
        store.add_project(project_for("CL001", Some("CT001")));
        store.add_project(project_for("CL002", Some("CT001")));
        store.add_document(NewDocument::new(
            "AQ001",
            DocumentType::WorkOrder,
            "Work Order",
            date(2024, 5, 18),
        ));
        store.add_document(NewDocument::new(
            "AQ002",
            DocumentType::Quotation,
            "Quotation",
            date(2024, 5, 19),
        ));

        assert!(store
            .delete_client_with("CL001", DeletePolicy::Cascade)
            .unwrap());
        assert!(store.get_client("CL001").is_none());
        assert!(store.get_project("AQ001").is_none());
        assert_eq!(store.list_documents().len(), 1);
        assert_eq!(store.list_documents()[0].project_id, "AQ002");
        assert_eq!(count_for_contractor(&store, "CT001"), 1);
    }

    #[test]
    fn test_cascade_delete_contractor_unassigns_projects() {
        let mut store = store_with_parties();
        store.add_project(project_for("CL001", Some("CT001")));

        assert!(store
            .delete_contractor_with("CT001", DeletePolicy::Cascade)
            .unwrap());
        let view = store.project_view("AQ001").unwrap();
        assert_eq!(view.project.contractor_id, None);
        assert_eq!(view.contractor_name, UNASSIGNED);
        assert_eq!(count_for_client(&store, "CL001"), 1);
    }

    #[test]
    fn test_restrict_delete_refuses_and_keeps_state() {
        let mut store = store_with_parties();
        store.add_project(project_for("CL001", Some("CT001")));
        store.add_document(NewDocument::new(
            "AQ001",
            DocumentType::MeetingMinutes,
            "Site Discussion",
            date(2024, 5, 20),
        ));

        let err = store
            .delete_client_with("CL001", DeletePolicy::Restrict)
            .unwrap_err();
        assert!(matches!(err, StoreError::HasDependents { count: 1, .. }));
        assert!(store.get_client("CL001").is_some());

        assert!(store
            .delete_contractor_with("CT001", DeletePolicy::Restrict)
            .is_err());
        assert!(store
            .delete_project_with("AQ001", DeletePolicy::Restrict)
            .is_err());
        assert_eq!(store.list_projects().len(), 1);

        assert!(store.delete_document("DOC001"));
        assert!(store
            .delete_project_with("AQ001", DeletePolicy::Restrict)
            .unwrap());
        assert_eq!(count_for_client(&store, "CL001"), 0);
    }

    #[test]
    fn test_delete_with_policy_unknown_id_is_not_an_error() {
        let mut store = DataStore::new();
        assert!(!store
            .delete_client_with("CL001", DeletePolicy::Restrict)
            .unwrap());
        assert!(!store
            .delete_project_with("AQ001", DeletePolicy::Cascade)
            .unwrap());
    }

    #[test]
    fn test_document_view_joins_project_and_client() {
        let mut store = store_with_parties();
        store.add_project(project_for("CL001", None));
        store.add_document(NewDocument::new(
            "AQ001",
            DocumentType::PaymentReceipt,
            "Advance Payment",
            date(2024, 5, 22),
        ));
        store.add_document(NewDocument::new(
            "AQ404",
            DocumentType::Quotation,
            "Lost",
            date(2024, 5, 23),
        ));

        let views = store.list_document_views();
        assert_eq!(views[0].project_name, "Test Pool");
        assert_eq!(views[0].client_name, "Rajesh Sharma");
        assert_eq!(views[1].project_name, UNKNOWN_PROJECT);
        assert_eq!(views[1].client_name, UNKNOWN_CLIENT);
        assert_eq!(store.documents_for_project("AQ001").len(), 1);
    }

    #[test]
    fn test_import_replaces_present_collections_only() {
        let mut store = store_with_parties();
        store.add_project(project_for("CL001", Some("CT001")));

        let mut source = DataStore::new();
        source.add_client(NewClient::new("A"));
        source.add_client(NewClient::new("B"));
        let mut snapshot = source.export_snapshot();
        snapshot.contractors = None;
        snapshot.projects = None;
        snapshot.documents = None;
        snapshot.payments = None;
        snapshot.leads = None;

        let summary = store.import_snapshot(snapshot);
        assert_eq!(summary.collections, 1);
        assert_eq!(summary.records, 2);

        let names: Vec<_> = store.list_clients().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(store.list_contractors().len(), 1);
        assert_eq!(store.list_projects().len(), 1);
        // AQ001 still references CL001, which is now client "A"
        assert_eq!(count_for_client(&store, "CL001"), 1);
    }

    #[test]
    fn test_import_advances_counters_and_recounts() {
        let mut source = store_with_parties();
        for _ in 0..3 {
            source.add_project(project_for("CL001", Some("CT001")));
        }
        let mut snapshot = source.export_snapshot();
        if let Some(clients) = snapshot.clients.as_mut() {
            clients[0].projects_count = 99;
        }

        let mut store = DataStore::new();
        store.import_snapshot(snapshot);
        assert_eq!(count_for_client(&store, "CL001"), 3);

        let next = store.add_project(project_for("CL001", None));
        assert_eq!(next.id, "AQ004");
        assert_eq!(store.add_client(NewClient::new("New")).id, "CL002");
    }

    #[test]
    fn test_cascade_delete_project_removes_documents_and_payments() {
        let mut store = DataStore::seeded();
        assert_eq!(store.documents_for_project("AQ001").len(), 2);
        assert_eq!(store.payments_for_project("AQ001").len(), 2);

        assert!(store
            .delete_project_with("AQ001", DeletePolicy::Cascade)
            .unwrap());
        assert!(store.documents_for_project("AQ001").is_empty());
        assert!(store.payments_for_project("AQ001").is_empty());
        assert_eq!(store.list_documents().len(), 2);
        assert_eq!(store.list_payments().len(), 4);
        assert_eq!(count_for_client(&store, "CL001"), 0);
        assert_eq!(count_for_contractor(&store, "CT001"), 0);
    }

    #[test]
    fn test_restrict_delete_project_counts_payments() {
        let mut store = store_with_parties();
        store.add_project(project_for("CL001", None));
        store.add_payment(NewPayment::new("AQ001", PaymentParty::Client, 100_000));

        let err = store
            .delete_project_with("AQ001", DeletePolicy::Restrict)
            .unwrap_err();
        assert!(matches!(err, StoreError::HasDependents { count: 1, .. }));

        assert!(store.delete_payment("PAY001"));
        assert!(store
            .delete_project_with("AQ001", DeletePolicy::Restrict)
            .unwrap());
    }

    #[test]
    fn test_update_document_patches_fields_and_clears_url() {
        let mut store = store_with_parties();
        store.add_project(project_for("CL001", None));
        store.add_document(NewDocument {
            url: Some("https://files.example.com/quote.pdf".into()),
            ..NewDocument::new(
                "AQ001",
                DocumentType::Quotation,
                "Initial Quotation",
                date(2024, 5, 15),
            )
        });

        let updated = store
            .update_document(
                "DOC001",
                DocumentPatch {
                    name: Some("Revised Quotation".into()),
                    size: Some("2.6 MB".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.name, "Revised Quotation");
        assert_eq!(updated.size, "2.6 MB");
        assert_eq!(updated.doc_type, DocumentType::Quotation);
        assert!(updated.url.is_some());

        let cleared = store
            .update_document(
                "DOC001",
                DocumentPatch {
                    url: Some(None),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(cleared.url, None);
        assert_eq!(cleared.name, "Revised Quotation");
        assert_eq!(store.get_document("DOC001").unwrap().url, None);

        assert!(store
            .update_document("DOC404", DocumentPatch::default())
            .is_none());
    }

    #[test]
    fn test_update_contractor_sets_rating_only() {
        let mut store = store_with_parties();
        store.add_project(project_for("CL001", Some("CT001")));

        let updated = store
            .update_contractor(
                "CT001",
                ContractorPatch {
                    rating: Some(4.8),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.rating, 4.8);
        assert_eq!(updated.name, "AquaTech Solutions");
        assert_eq!(updated.projects_count, 1);
        assert_eq!(store.get_contractor("CT001").unwrap().rating, 4.8);
    }

    #[test]
    fn test_blank_contractor_id_is_unassigned() {
        let mut store = store_with_parties();
        let project = store.add_project(project_for("CL001", Some("")));
        assert_eq!(project.contractor_id, None);

        let snapshot = Snapshot::from_json(
            r#"{
                "projects": [{
                    "id": "AQ010",
                    "title": "Garden Pool",
                    "clientId": "CL001",
                    "contractorId": "",
                    "city": "Pune",
                    "scope": "Plunge Pool",
                    "status": "Quotation Sent",
                    "progress": 0
                }]
            }"#,
        )
        .unwrap();
        store.import_snapshot(snapshot);

        let view = store.project_view("AQ010").unwrap();
        assert_eq!(view.project.contractor_id, None);
        assert_eq!(view.contractor_name, UNASSIGNED);
        assert_eq!(count_for_contractor(&store, "CT001"), 0);
        assert_eq!(count_for_client(&store, "CL001"), 1);
    }

    #[test]
    fn test_payment_crud_and_view() {
        let mut store = store_with_parties();
        store.add_project(project_for("CL001", Some("CT001")));

        let payment = store.add_payment(NewPayment {
            paid_amount: 400_000,
            status: PaymentStatus::Partial,
            due_date: Some(date(2024, 12, 10)),
            ..NewPayment::new("AQ001", PaymentParty::Contractor, 1_200_000)
        });
        assert_eq!(payment.id, "PAY001");

        let view = store.payment_view("PAY001").unwrap();
        assert_eq!(view.project_name, "Test Pool");
        assert_eq!(view.party_name, "AquaTech Solutions");
        assert_eq!(view.due_amount, 800_000);

        let updated = store
            .update_payment(
                "PAY001",
                PaymentPatch {
                    paid_amount: Some(1_200_000),
                    status: Some(PaymentStatus::Paid),
                    due_date: Some(None),
                    last_payment: Some(Some(date(2024, 12, 9))),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.due_amount(), 0);
        assert_eq!(updated.due_date, None);
        assert_eq!(updated.last_payment, Some(date(2024, 12, 9)));

        store.add_payment(NewPayment::new("AQ404", PaymentParty::Client, 50_000));
        let views = store.list_payment_views();
        assert_eq!(views[1].project_name, UNKNOWN_PROJECT);
        assert_eq!(views[1].party_name, UNKNOWN_CLIENT);

        assert!(store.delete_payment("PAY001"));
        assert!(!store.delete_payment("PAY001"));
        assert_eq!(store.add_payment(NewPayment::default()).id, "PAY003");
    }

    #[test]
    fn test_lead_crud() {
        let mut store = DataStore::new();
        let lead = store.add_lead(NewLead {
            source: "Website".into(),
            value: 850_000,
            ..NewLead::new("Amit Sharma")
        });
        assert_eq!(lead.id, "LD001");
        assert_eq!(lead.status, LeadStatus::Warm);

        let updated = store
            .update_lead(
                "LD001",
                LeadPatch {
                    status: Some(LeadStatus::Hot),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.status, LeadStatus::Hot);
        assert_eq!(updated.value, 850_000);
        assert!(store.update_lead("LD404", LeadPatch::default()).is_none());

        assert!(store.delete_lead("LD001"));
        assert!(store.list_leads().is_empty());
        assert_eq!(store.add_lead(NewLead::new("Next")).id, "LD002");
    }

    #[test]
    fn test_delete_policy_from_str() {
        assert_eq!("Cascade".parse::<DeletePolicy>().unwrap(), DeletePolicy::Cascade);
        assert_eq!(" restrict ".parse::<DeletePolicy>().unwrap(), DeletePolicy::Restrict);
        assert!("nuke".parse::<DeletePolicy>().is_err());
        assert_eq!(DeletePolicy::default(), DeletePolicy::Orphan);
    }
}
