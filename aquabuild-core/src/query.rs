//! Search and filter predicates for the list screens
//!
//! Each query matches a case-insensitive substring against a fixed set of
//! text fields and then applies exact-match filters. An empty search
//! matches everything.

use crate::models::{
    Client, ClientStatus, Contractor, ContractorStatus, DocumentType, Lead, LeadStatus,
    PaymentParty, PaymentStatus, ProjectStatus,
};
use crate::store::{DocumentView, PaymentView, ProjectView};

/// A predicate over list items
pub trait Query<T> {
    fn matches(&self, item: &T) -> bool;

    /// Keeps the matching items, preserving order
    fn filter(&self, items: Vec<T>) -> Vec<T> {
        items.into_iter().filter(|item| self.matches(item)).collect()
    }
}

fn search_hit(search: &str, fields: &[&str]) -> bool {
    let needle = search.trim().to_lowercase();
    needle.is_empty()
        || fields
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
}

/// Searches name, email and city
#[derive(Debug, Clone, Default)]
pub struct ClientQuery {
    pub search: String,
    pub status: Option<ClientStatus>,
}

impl Query<Client> for ClientQuery {
    fn matches(&self, client: &Client) -> bool {
        search_hit(
            &self.search,
            &[
                client.name.as_str(),
                client.email.as_str(),
                client.city.as_str(),
            ],
        ) && self.status.map_or(true, |s| client.status == s)
    }
}

/// Searches name, email and specialization
#[derive(Debug, Clone, Default)]
pub struct ContractorQuery {
    pub search: String,
    pub status: Option<ContractorStatus>,
}

impl Query<Contractor> for ContractorQuery {
    fn matches(&self, contractor: &Contractor) -> bool {
        search_hit(
            &self.search,
            &[
                contractor.name.as_str(),
                contractor.email.as_str(),
                contractor.specialization.as_str(),
            ],
        ) && self.status.map_or(true, |s| contractor.status == s)
    }
}

/// Searches title, client name and contractor name; filters on status and
/// city
#[derive(Debug, Clone, Default)]
pub struct ProjectQuery {
    pub search: String,
    pub status: Option<ProjectStatus>,
    pub city: Option<String>,
}

impl Query<ProjectView> for ProjectQuery {
    fn matches(&self, view: &ProjectView) -> bool {
        search_hit(
            &self.search,
            &[
                view.project.title.as_str(),
                view.client_name.as_str(),
                view.contractor_name.as_str(),
            ],
        ) && self.status.map_or(true, |s| view.project.status == s)
            && self
                .city
                .as_deref()
                .map_or(true, |city| view.project.city == city)
    }
}

/// Searches document name, project name and client name; filters on type
/// and project id
#[derive(Debug, Clone, Default)]
pub struct DocumentQuery {
    pub search: String,
    pub doc_type: Option<DocumentType>,
    pub project_id: Option<String>,
}

impl Query<DocumentView> for DocumentQuery {
    fn matches(&self, view: &DocumentView) -> bool {
        search_hit(
            &self.search,
            &[
                view.document.name.as_str(),
                view.project_name.as_str(),
                view.client_name.as_str(),
            ],
        ) && self.doc_type.map_or(true, |t| view.document.doc_type == t)
            && self
                .project_id
                .as_deref()
                .map_or(true, |id| view.document.project_id == id)
    }
}

/// Searches project name and party name; filters on status and party
#[derive(Debug, Clone, Default)]
pub struct PaymentQuery {
    pub search: String,
    pub status: Option<PaymentStatus>,
    pub party: Option<PaymentParty>,
}

impl Query<PaymentView> for PaymentQuery {
    fn matches(&self, view: &PaymentView) -> bool {
        search_hit(
            &self.search,
            &[view.project_name.as_str(), view.party_name.as_str()],
        ) && self.status.map_or(true, |s| view.payment.status == s)
            && self.party.map_or(true, |p| view.payment.party == p)
    }
}

/// Searches name, email, source and project of interest. The source filter
/// ignores case.
#[derive(Debug, Clone, Default)]
pub struct LeadQuery {
    pub search: String,
    pub status: Option<LeadStatus>,
    pub source: Option<String>,
}

impl Query<Lead> for LeadQuery {
    fn matches(&self, lead: &Lead) -> bool {
        search_hit(
            &self.search,
            &[
                lead.name.as_str(),
                lead.email.as_str(),
                lead.source.as_str(),
                lead.project.as_str(),
            ],
        ) && self.status.map_or(true, |s| lead.status == s)
            && self
                .source
                .as_deref()
                .map_or(true, |source| lead.source.eq_ignore_ascii_case(source.trim()))
    }
}
