use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::StoreError;

/// Identifier prefix for clients (e.g. "CL001")
pub const CLIENT_PREFIX: &str = "CL";
/// Identifier prefix for contractors (e.g. "CT001")
pub const CONTRACTOR_PREFIX: &str = "CT";
/// Identifier prefix for projects (e.g. "AQ001")
pub const PROJECT_PREFIX: &str = "AQ";
/// Identifier prefix for documents (e.g. "DOC001")
pub const DOCUMENT_PREFIX: &str = "DOC";
/// Identifier prefix for payments (e.g. "PAY001")
pub const PAYMENT_PREFIX: &str = "PAY";
/// Identifier prefix for marketing leads (e.g. "LD001")
pub const LEAD_PREFIX: &str = "LD";

/// Label shown for a project without a (resolvable) contractor
pub const UNASSIGNED: &str = "Unassigned";
/// Label shown for a project whose client no longer exists
pub const UNKNOWN_CLIENT: &str = "Unknown client";
/// Label shown for a document whose project no longer exists
pub const UNKNOWN_PROJECT: &str = "Unknown project";

/// Zero-value for a client's total value
pub const ZERO_VALUE: &str = "₹0";

/// Lowercases and folds '-' / '_' to spaces so "under-construction",
/// "Under_Construction" and "under construction" all compare equal.
fn normalize(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == '-' || c == '_' { ' ' } else { c })
        .collect()
}

/// Status of a client account
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ClientStatus {
    #[default]
    Active,
    Premium,
    Inactive,
}

impl ClientStatus {
    pub const ALL: [ClientStatus; 3] = [
        ClientStatus::Active,
        ClientStatus::Premium,
        ClientStatus::Inactive,
    ];
}

impl fmt::Display for ClientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientStatus::Active => write!(f, "Active"),
            ClientStatus::Premium => write!(f, "Premium"),
            ClientStatus::Inactive => write!(f, "Inactive"),
        }
    }
}

impl FromStr for ClientStatus {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "active" => Ok(ClientStatus::Active),
            "premium" => Ok(ClientStatus::Premium),
            "inactive" => Ok(ClientStatus::Inactive),
            _ => Err(StoreError::UnknownVariant {
                kind: "client status",
                value: s.to_string(),
            }),
        }
    }
}

/// Status of a contractor
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ContractorStatus {
    #[default]
    Active,
    Inactive,
    Verified,
    Premium,
}

impl ContractorStatus {
    pub const ALL: [ContractorStatus; 4] = [
        ContractorStatus::Active,
        ContractorStatus::Inactive,
        ContractorStatus::Verified,
        ContractorStatus::Premium,
    ];
}

impl fmt::Display for ContractorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContractorStatus::Active => write!(f, "Active"),
            ContractorStatus::Inactive => write!(f, "Inactive"),
            ContractorStatus::Verified => write!(f, "Verified"),
            ContractorStatus::Premium => write!(f, "Premium"),
        }
    }
}

impl FromStr for ContractorStatus {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "active" => Ok(ContractorStatus::Active),
            "inactive" => Ok(ContractorStatus::Inactive),
            "verified" => Ok(ContractorStatus::Verified),
            "premium" => Ok(ContractorStatus::Premium),
            _ => Err(StoreError::UnknownVariant {
                kind: "contractor status",
                value: s.to_string(),
            }),
        }
    }
}

/// Lifecycle status of a project. Any status may follow any other.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
pub enum ProjectStatus {
    #[default]
    #[serde(rename = "Quotation Sent")]
    QuotationSent,
    #[serde(rename = "Under Construction")]
    UnderConstruction,
    Completed,
    #[serde(rename = "On Hold")]
    OnHold,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 4] = [
        ProjectStatus::QuotationSent,
        ProjectStatus::UnderConstruction,
        ProjectStatus::Completed,
        ProjectStatus::OnHold,
    ];

    /// Presentation color tag. This is the only source of a project's
    /// status color; it is never stored.
    pub fn color(&self) -> &'static str {
        match self {
            ProjectStatus::QuotationSent => "bg-blue-500",
            ProjectStatus::UnderConstruction => "bg-green-500",
            ProjectStatus::Completed => "bg-purple-500",
            ProjectStatus::OnHold => "bg-yellow-500",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectStatus::QuotationSent => write!(f, "Quotation Sent"),
            ProjectStatus::UnderConstruction => write!(f, "Under Construction"),
            ProjectStatus::Completed => write!(f, "Completed"),
            ProjectStatus::OnHold => write!(f, "On Hold"),
        }
    }
}

impl FromStr for ProjectStatus {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "quotation sent" | "quotation" => Ok(ProjectStatus::QuotationSent),
            "under construction" | "construction" => Ok(ProjectStatus::UnderConstruction),
            "completed" | "done" => Ok(ProjectStatus::Completed),
            "on hold" | "hold" => Ok(ProjectStatus::OnHold),
            _ => Err(StoreError::UnknownVariant {
                kind: "project status",
                value: s.to_string(),
            }),
        }
    }
}

/// Category of a project document
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DocumentType {
    Quotation,
    #[serde(rename = "Work Order")]
    WorkOrder,
    #[serde(rename = "Meeting Minutes")]
    MeetingMinutes,
    #[serde(rename = "Payment Receipt")]
    PaymentReceipt,
}

impl DocumentType {
    pub const ALL: [DocumentType; 4] = [
        DocumentType::Quotation,
        DocumentType::WorkOrder,
        DocumentType::MeetingMinutes,
        DocumentType::PaymentReceipt,
    ];
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentType::Quotation => write!(f, "Quotation"),
            DocumentType::WorkOrder => write!(f, "Work Order"),
            DocumentType::MeetingMinutes => write!(f, "Meeting Minutes"),
            DocumentType::PaymentReceipt => write!(f, "Payment Receipt"),
        }
    }
}

impl FromStr for DocumentType {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "quotation" => Ok(DocumentType::Quotation),
            "work order" => Ok(DocumentType::WorkOrder),
            "meeting minutes" | "minutes" => Ok(DocumentType::MeetingMinutes),
            "payment receipt" | "receipt" => Ok(DocumentType::PaymentReceipt),
            _ => Err(StoreError::UnknownVariant {
                kind: "document type",
                value: s.to_string(),
            }),
        }
    }
}

/// Which side of a project a payment is with
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PaymentParty {
    /// Money owed by the project's client
    #[default]
    Client,
    /// Money owed to the project's contractor
    Contractor,
}

impl PaymentParty {
    pub const ALL: [PaymentParty; 2] = [PaymentParty::Client, PaymentParty::Contractor];
}

impl fmt::Display for PaymentParty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentParty::Client => write!(f, "Client"),
            PaymentParty::Contractor => write!(f, "Contractor"),
        }
    }
}

impl FromStr for PaymentParty {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "client" => Ok(PaymentParty::Client),
            "contractor" => Ok(PaymentParty::Contractor),
            _ => Err(StoreError::UnknownVariant {
                kind: "payment party",
                value: s.to_string(),
            }),
        }
    }
}

/// Settlement state of a payment, as recorded by the office
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PaymentStatus {
    #[default]
    Pending,
    Partial,
    Paid,
    Overdue,
}

impl PaymentStatus {
    pub const ALL: [PaymentStatus; 4] = [
        PaymentStatus::Pending,
        PaymentStatus::Partial,
        PaymentStatus::Paid,
        PaymentStatus::Overdue,
    ];
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentStatus::Pending => write!(f, "Pending"),
            PaymentStatus::Partial => write!(f, "Partial"),
            PaymentStatus::Paid => write!(f, "Paid"),
            PaymentStatus::Overdue => write!(f, "Overdue"),
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "pending" => Ok(PaymentStatus::Pending),
            "partial" => Ok(PaymentStatus::Partial),
            "paid" => Ok(PaymentStatus::Paid),
            "overdue" => Ok(PaymentStatus::Overdue),
            _ => Err(StoreError::UnknownVariant {
                kind: "payment status",
                value: s.to_string(),
            }),
        }
    }
}

/// Temperature of a marketing lead
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum LeadStatus {
    Hot,
    #[default]
    Warm,
    Cold,
}

impl LeadStatus {
    pub const ALL: [LeadStatus; 3] = [LeadStatus::Hot, LeadStatus::Warm, LeadStatus::Cold];
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeadStatus::Hot => write!(f, "Hot"),
            LeadStatus::Warm => write!(f, "Warm"),
            LeadStatus::Cold => write!(f, "Cold"),
        }
    }
}

impl FromStr for LeadStatus {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "hot" => Ok(LeadStatus::Hot),
            "warm" => Ok(LeadStatus::Warm),
            "cold" => Ok(LeadStatus::Cold),
            _ => Err(StoreError::UnknownVariant {
                kind: "lead status",
                value: s.to_string(),
            }),
        }
    }
}

/// Blank identifiers are the legacy way of saying "none"
pub(crate) fn blank_to_none(id: Option<String>) -> Option<String> {
    id.filter(|id| !id.trim().is_empty())
}

fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(blank_to_none)
}

/// A customer commissioning a pool-construction project
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub city: String,
    pub address: String,
    pub status: ClientStatus,
    /// Number of projects referencing this client (maintained by the store)
    #[serde(default)]
    pub projects_count: u32,
    /// Display string, e.g. "₹15,50,000"
    pub total_value: String,
}

/// A vendor executing construction work
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Contractor {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// GST (tax registration) number
    pub gst_number: String,
    pub specialization: String,
    pub status: ContractorStatus,
    #[serde(default)]
    pub projects_count: u32,
    /// 0-5, supplied by the caller
    #[serde(default)]
    pub rating: f64,
}

/// A unit of work linking a client and, optionally, a contractor.
///
/// Client and contractor names are not stored here; see
/// [`ProjectView`](crate::store::ProjectView).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    pub client_id: String,
    /// Absent, or an empty string in older snapshots, means unassigned
    #[serde(
        default,
        deserialize_with = "deserialize_optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub contractor_id: Option<String>,
    pub city: String,
    pub scope: String,
    pub status: ProjectStatus,
    /// 0-100
    pub progress: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_completion: Option<NaiveDate>,
    /// Free-text recency label such as "2 days ago"
    #[serde(default)]
    pub last_updated: String,
}

impl Project {
    pub fn status_color(&self) -> &'static str {
        self.status.color()
    }
}

/// A file attached to a project
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub project_id: String,
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    pub name: String,
    pub upload_date: NaiveDate,
    /// Display string, e.g. "2.4 MB"
    pub size: String,
    #[serde(default)]
    pub format: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Money owed by a project's client or owed to its contractor.
///
/// The outstanding amount is derived, never stored; see
/// [`due_amount`](Self::due_amount).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: String,
    pub project_id: String,
    pub party: PaymentParty,
    /// Whole rupees
    pub total_amount: u64,
    #[serde(default)]
    pub paid_amount: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub status: PaymentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_payment: Option<NaiveDate>,
}

impl Payment {
    /// Amount still outstanding; never negative
    pub fn due_amount(&self) -> u64 {
        self.total_amount.saturating_sub(self.paid_amount)
    }
}

/// A prospective customer from a marketing channel
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    /// Channel, e.g. "Website" or "Google Ads"
    #[serde(default)]
    pub source: String,
    pub status: LeadStatus,
    /// What the lead is interested in, e.g. "Residential Pool"
    #[serde(default)]
    pub project: String,
    /// Estimated value in whole rupees
    #[serde(default)]
    pub value: u64,
}

// =========================================================================
// Creation inputs (everything except identifiers and derived fields)
// =========================================================================

#[derive(Debug, Clone, Default)]
pub struct NewClient {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub city: String,
    pub address: String,
    pub status: ClientStatus,
    /// Defaults to "₹0" when absent
    pub total_value: Option<String>,
}

impl NewClient {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NewContractor {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub gst_number: String,
    pub specialization: String,
    pub status: ContractorStatus,
}

impl NewContractor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NewProject {
    pub title: String,
    pub client_id: String,
    pub contractor_id: Option<String>,
    pub city: String,
    pub scope: String,
    pub status: ProjectStatus,
    pub progress: u8,
    pub total_value: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub expected_completion: Option<NaiveDate>,
    pub last_updated: String,
}

impl NewProject {
    /// Creates a quotation-stage project for the given client
    pub fn new(title: impl Into<String>, client_id: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            client_id: client_id.into(),
            last_updated: String::from("Just now"),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewDocument {
    pub project_id: String,
    pub doc_type: DocumentType,
    pub name: String,
    pub upload_date: NaiveDate,
    pub size: String,
    pub format: String,
    pub url: Option<String>,
}

impl NewDocument {
    pub fn new(
        project_id: impl Into<String>,
        doc_type: DocumentType,
        name: impl Into<String>,
        upload_date: NaiveDate,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            doc_type,
            name: name.into(),
            upload_date,
            size: String::new(),
            format: String::from("PDF"),
            url: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NewPayment {
    pub project_id: String,
    pub party: PaymentParty,
    pub total_amount: u64,
    pub paid_amount: u64,
    pub due_date: Option<NaiveDate>,
    pub status: PaymentStatus,
    pub last_payment: Option<NaiveDate>,
}

impl NewPayment {
    pub fn new(project_id: impl Into<String>, party: PaymentParty, total_amount: u64) -> Self {
        Self {
            project_id: project_id.into(),
            party,
            total_amount,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NewLead {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub source: String,
    pub status: LeadStatus,
    pub project: String,
    pub value: u64,
}

impl NewLead {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

// =========================================================================
// Partial updates: `None` keeps the current value. Nullable fields use
// `Option<Option<_>>` so they can be cleared with `Some(None)`.
// =========================================================================

#[derive(Debug, Clone, Default)]
pub struct ClientPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub status: Option<ClientStatus>,
    pub total_value: Option<String>,
}

impl ClientPatch {
    pub(crate) fn apply(self, client: &mut Client) {
        if let Some(v) = self.name {
            client.name = v;
        }
        if let Some(v) = self.email {
            client.email = v;
        }
        if let Some(v) = self.phone {
            client.phone = v;
        }
        if let Some(v) = self.city {
            client.city = v;
        }
        if let Some(v) = self.address {
            client.address = v;
        }
        if let Some(v) = self.status {
            client.status = v;
        }
        if let Some(v) = self.total_value {
            client.total_value = v;
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ContractorPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub gst_number: Option<String>,
    pub specialization: Option<String>,
    pub status: Option<ContractorStatus>,
    pub rating: Option<f64>,
}

impl ContractorPatch {
    pub(crate) fn apply(self, contractor: &mut Contractor) {
        if let Some(v) = self.name {
            contractor.name = v;
        }
        if let Some(v) = self.email {
            contractor.email = v;
        }
        if let Some(v) = self.phone {
            contractor.phone = v;
        }
        if let Some(v) = self.gst_number {
            contractor.gst_number = v;
        }
        if let Some(v) = self.specialization {
            contractor.specialization = v;
        }
        if let Some(v) = self.status {
            contractor.status = v;
        }
        if let Some(v) = self.rating {
            contractor.rating = v;
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProjectPatch {
    pub title: Option<String>,
    pub client_id: Option<String>,
    pub contractor_id: Option<Option<String>>,
    pub city: Option<String>,
    pub scope: Option<String>,
    pub status: Option<ProjectStatus>,
    pub progress: Option<u8>,
    pub total_value: Option<Option<String>>,
    pub start_date: Option<Option<NaiveDate>>,
    pub expected_completion: Option<Option<NaiveDate>>,
    pub last_updated: Option<String>,
}

impl ProjectPatch {
    /// Returns true if applying this patch would move the project to a
    /// different client or contractor.
    pub(crate) fn reassigns(&self, project: &Project) -> bool {
        let client_changed = self
            .client_id
            .as_ref()
            .is_some_and(|id| *id != project.client_id);
        let contractor_changed = self
            .contractor_id
            .as_ref()
            .is_some_and(|id| blank_to_none(id.clone()) != project.contractor_id);
        client_changed || contractor_changed
    }

    pub(crate) fn apply(self, project: &mut Project) {
        if let Some(v) = self.title {
            project.title = v;
        }
        if let Some(v) = self.client_id {
            project.client_id = v;
        }
        if let Some(v) = self.contractor_id {
            project.contractor_id = blank_to_none(v);
        }
        if let Some(v) = self.city {
            project.city = v;
        }
        if let Some(v) = self.scope {
            project.scope = v;
        }
        if let Some(v) = self.status {
            project.status = v;
        }
        if let Some(v) = self.progress {
            project.progress = v;
        }
        if let Some(v) = self.total_value {
            project.total_value = v;
        }
        if let Some(v) = self.start_date {
            project.start_date = v;
        }
        if let Some(v) = self.expected_completion {
            project.expected_completion = v;
        }
        if let Some(v) = self.last_updated {
            project.last_updated = v;
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DocumentPatch {
    pub project_id: Option<String>,
    pub doc_type: Option<DocumentType>,
    pub name: Option<String>,
    pub upload_date: Option<NaiveDate>,
    pub size: Option<String>,
    pub format: Option<String>,
    pub url: Option<Option<String>>,
}

impl DocumentPatch {
    pub(crate) fn apply(self, document: &mut Document) {
        if let Some(v) = self.project_id {
            document.project_id = v;
        }
        if let Some(v) = self.doc_type {
            document.doc_type = v;
        }
        if let Some(v) = self.name {
            document.name = v;
        }
        if let Some(v) = self.upload_date {
            document.upload_date = v;
        }
        if let Some(v) = self.size {
            document.size = v;
        }
        if let Some(v) = self.format {
            document.format = v;
        }
        if let Some(v) = self.url {
            document.url = v;
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PaymentPatch {
    pub project_id: Option<String>,
    pub party: Option<PaymentParty>,
    pub total_amount: Option<u64>,
    pub paid_amount: Option<u64>,
    pub due_date: Option<Option<NaiveDate>>,
    pub status: Option<PaymentStatus>,
    pub last_payment: Option<Option<NaiveDate>>,
}

impl PaymentPatch {
    pub(crate) fn apply(self, payment: &mut Payment) {
        if let Some(v) = self.project_id {
            payment.project_id = v;
        }
        if let Some(v) = self.party {
            payment.party = v;
        }
        if let Some(v) = self.total_amount {
            payment.total_amount = v;
        }
        if let Some(v) = self.paid_amount {
            payment.paid_amount = v;
        }
        if let Some(v) = self.due_date {
            payment.due_date = v;
        }
        if let Some(v) = self.status {
            payment.status = v;
        }
        if let Some(v) = self.last_payment {
            payment.last_payment = v;
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LeadPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub source: Option<String>,
    pub status: Option<LeadStatus>,
    pub project: Option<String>,
    pub value: Option<u64>,
}

impl LeadPatch {
    pub(crate) fn apply(self, lead: &mut Lead) {
        if let Some(v) = self.name {
            lead.name = v;
        }
        if let Some(v) = self.email {
            lead.email = v;
        }
        if let Some(v) = self.phone {
            lead.phone = v;
        }
        if let Some(v) = self.source {
            lead.source = v;
        }
        if let Some(v) = self.status {
            lead.status = v;
        }
        if let Some(v) = self.project {
            lead.project = v;
        }
        if let Some(v) = self.value {
            lead.value = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_status_colors_are_distinct() {
        let colors: std::collections::HashSet<_> =
            ProjectStatus::ALL.iter().map(|s| s.color()).collect();
        assert_eq!(colors.len(), ProjectStatus::ALL.len());
        assert_eq!(ProjectStatus::UnderConstruction.color(), "bg-green-500");
    }

    #[test]
    fn test_project_status_from_str() {
        assert_eq!(
            "under-construction".parse::<ProjectStatus>().unwrap(),
            ProjectStatus::UnderConstruction
        );
        assert_eq!(
            "Quotation Sent".parse::<ProjectStatus>().unwrap(),
            ProjectStatus::QuotationSent
        );
        assert_eq!("on_hold".parse::<ProjectStatus>().unwrap(), ProjectStatus::OnHold);

        let err = "paused".parse::<ProjectStatus>().unwrap_err();
        assert!(err.to_string().contains("project status"));
    }

    #[test]
    fn test_status_display_round_trips_through_from_str() {
        for status in ProjectStatus::ALL {
            assert_eq!(status.to_string().parse::<ProjectStatus>().unwrap(), status);
        }
        for status in ContractorStatus::ALL {
            assert_eq!(status.to_string().parse::<ContractorStatus>().unwrap(), status);
        }
        for doc_type in DocumentType::ALL {
            assert_eq!(doc_type.to_string().parse::<DocumentType>().unwrap(), doc_type);
        }
    }

    #[test]
    fn test_project_status_serializes_with_spaces() {
        let json = serde_json::to_string(&ProjectStatus::OnHold).unwrap();
        assert_eq!(json, "\"On Hold\"");
        let json = serde_json::to_string(&DocumentType::WorkOrder).unwrap();
        assert_eq!(json, "\"Work Order\"");
    }

    #[test]
    fn test_empty_contractor_id_reads_as_unassigned() {
        let json = r#"{
            "id": "AQ001",
            "title": "Pool",
            "clientId": "CL001",
            "contractorId": "",
            "city": "Mumbai",
            "scope": "",
            "status": "On Hold",
            "progress": 5
        }"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.contractor_id, None);

        let json = json.replace(r#""contractorId": """#, r#""contractorId": "CT002""#);
        let project: Project = serde_json::from_str(&json).unwrap();
        assert_eq!(project.contractor_id.as_deref(), Some("CT002"));
    }

    #[test]
    fn test_payment_due_amount_is_floored_at_zero() {
        let mut payment = Payment {
            id: "PAY001".into(),
            project_id: "AQ001".into(),
            party: PaymentParty::Client,
            total_amount: 1_550_000,
            paid_amount: 1_200_000,
            due_date: None,
            status: PaymentStatus::Partial,
            last_payment: None,
        };
        assert_eq!(payment.due_amount(), 350_000);

        payment.paid_amount = 2_000_000;
        assert_eq!(payment.due_amount(), 0);
    }

    #[test]
    fn test_payment_and_lead_enums_parse() {
        assert_eq!("Overdue".parse::<PaymentStatus>().unwrap(), PaymentStatus::Overdue);
        assert_eq!("CONTRACTOR".parse::<PaymentParty>().unwrap(), PaymentParty::Contractor);
        assert_eq!("hot".parse::<LeadStatus>().unwrap(), LeadStatus::Hot);
        assert!("lukewarm".parse::<LeadStatus>().is_err());
        assert_eq!(
            serde_json::to_string(&PaymentParty::Contractor).unwrap(),
            "\"contractor\""
        );
    }

    #[test]
    fn test_project_patch_reassigns() {
        let project = Project {
            id: "AQ001".into(),
            title: "Pool".into(),
            client_id: "CL001".into(),
            contractor_id: Some("CT001".into()),
            city: String::new(),
            scope: String::new(),
            status: ProjectStatus::QuotationSent,
            progress: 0,
            total_value: None,
            start_date: None,
            expected_completion: None,
            last_updated: String::new(),
        };

        let same = ProjectPatch {
            client_id: Some("CL001".into()),
            ..Default::default()
        };
        assert!(!same.reassigns(&project));

        let unassign = ProjectPatch {
            contractor_id: Some(None),
            ..Default::default()
        };
        assert!(unassign.reassigns(&project));

        let blank = ProjectPatch {
            contractor_id: Some(Some(String::new())),
            ..Default::default()
        };
        assert!(blank.reassigns(&project));
        let mut applied = project.clone();
        blank.apply(&mut applied);
        assert_eq!(applied.contractor_id, None);

        let status_only = ProjectPatch {
            status: Some(ProjectStatus::Completed),
            ..Default::default()
        };
        assert!(!status_only.reassigns(&project));
    }
}
