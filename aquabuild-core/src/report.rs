use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{
    ClientStatus, ContractorStatus, LeadStatus, PaymentParty, PaymentStatus, ProjectStatus,
};
use crate::money::{format_inr, parse_inr};
use crate::store::DataStore;

/// Headline numbers for the dashboard and reports screens
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub client_count: usize,
    /// Clients whose status is Active or Premium
    pub active_clients: usize,
    pub contractor_count: usize,
    pub verified_contractors: usize,
    /// Mean contractor rating, 0 when there are no contractors
    pub average_rating: f64,
    pub project_count: usize,
    /// Every status is present, with 0 for unused ones
    pub projects_by_status: BTreeMap<ProjectStatus, usize>,
    pub average_progress: f64,
    /// Sum of every project value that parses as a rupee amount
    pub pipeline_value: u64,
    /// Still due from clients
    pub receivables: u64,
    /// Still due to contractors
    pub payables: u64,
    pub overdue_payments: usize,
    pub lead_count: usize,
    pub hot_leads: usize,
    pub lead_value: u64,
}

impl Summary {
    pub fn from_store(store: &DataStore) -> Self {
        let clients = store.list_clients();
        let contractors = store.list_contractors();
        let projects = store.list_projects();
        let payments = store.list_payments();
        let leads = store.list_leads();

        let mut projects_by_status: BTreeMap<ProjectStatus, usize> =
            ProjectStatus::ALL.iter().map(|s| (*s, 0)).collect();
        for project in &projects {
            *projects_by_status.entry(project.status).or_default() += 1;
        }

        let average_rating = if contractors.is_empty() {
            0.0
        } else {
            contractors.iter().map(|c| c.rating).sum::<f64>() / contractors.len() as f64
        };

        let average_progress = if projects.is_empty() {
            0.0
        } else {
            projects.iter().map(|p| f64::from(p.progress)).sum::<f64>() / projects.len() as f64
        };

        let pipeline_value = projects
            .iter()
            .filter_map(|p| p.total_value.as_deref().and_then(parse_inr))
            .fold(0u64, u64::saturating_add);

        let due_for = |party: PaymentParty| {
            payments
                .iter()
                .filter(|p| p.party == party)
                .map(|p| p.due_amount())
                .fold(0u64, u64::saturating_add)
        };

        Self {
            client_count: clients.len(),
            active_clients: clients
                .iter()
                .filter(|c| matches!(c.status, ClientStatus::Active | ClientStatus::Premium))
                .count(),
            contractor_count: contractors.len(),
            verified_contractors: contractors
                .iter()
                .filter(|c| c.status == ContractorStatus::Verified)
                .count(),
            average_rating,
            project_count: projects.len(),
            projects_by_status,
            average_progress,
            pipeline_value,
            receivables: due_for(PaymentParty::Client),
            payables: due_for(PaymentParty::Contractor),
            overdue_payments: payments
                .iter()
                .filter(|p| p.status == PaymentStatus::Overdue)
                .count(),
            lead_count: leads.len(),
            hot_leads: leads.iter().filter(|l| l.status == LeadStatus::Hot).count(),
            lead_value: leads
                .iter()
                .map(|l| l.value)
                .fold(0u64, u64::saturating_add),
        }
    }

    pub fn pipeline_value_display(&self) -> String {
        format_inr(self.pipeline_value)
    }
}
