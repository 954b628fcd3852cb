//! Snapshot export/import
//!
//! A snapshot is the whole store as a plain object:
//! `{clients, contractors, projects, documents, payments, leads}`. Importing replaces each
//! collection whose key is present. There is no versioning and no schema
//! validation beyond what deserialization enforces.

use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Result, StoreError};
use crate::models::{Client, Contractor, Document, Lead, Payment, Project};
use crate::store::DataStore;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clients: Option<Vec<Client>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contractors: Option<Vec<Contractor>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projects: Option<Vec<Project>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documents: Option<Vec<Document>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payments: Option<Vec<Payment>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leads: Option<Vec<Lead>>,
}

impl Snapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// What an import replaced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Number of collections replaced
    pub collections: usize,
    /// Number of records across the replaced collections
    pub records: usize,
}

impl ImportSummary {
    pub(crate) fn record(&mut self, records: usize) {
        self.collections += 1;
        self.records += records;
    }
}

/// Exports the store to a JSON file
///
/// # Returns
/// The number of records written
pub fn export_to_json<P: AsRef<Path>>(store: &DataStore, json_path: P) -> Result<usize> {
    let path = json_path.as_ref();
    let snapshot = store.export_snapshot();
    let count: usize = [
        snapshot.clients.as_ref().map_or(0, Vec::len),
        snapshot.contractors.as_ref().map_or(0, Vec::len),
        snapshot.projects.as_ref().map_or(0, Vec::len),
        snapshot.documents.as_ref().map_or(0, Vec::len),
        snapshot.payments.as_ref().map_or(0, Vec::len),
        snapshot.leads.as_ref().map_or(0, Vec::len),
    ]
    .iter()
    .sum();

    fs::write(path, snapshot.to_json()?).map_err(|source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    info!("Exported {} record(s) to {}", count, path.display());
    Ok(count)
}

/// Reads a snapshot from a JSON file
pub fn import_from_json<P: AsRef<Path>>(json_path: P) -> Result<Snapshot> {
    let path = json_path.as_ref();
    let json = fs::read_to_string(path).map_err(|source| StoreError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Snapshot::from_json(&json)
}
