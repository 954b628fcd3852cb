pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod money;
pub mod query;
pub mod report;
pub mod seed;
pub mod sequence;
pub mod store;

// Re-export commonly used types
pub use config::{get_config_path, Config, CONFIG_ENV_VAR};
pub use error::{Result, StoreError};
pub use export::{export_to_json, import_from_json, ImportSummary, Snapshot};
pub use models::{
    Client, ClientPatch, ClientStatus, Contractor, ContractorPatch, ContractorStatus, Document,
    DocumentPatch, DocumentType, Lead, LeadPatch, LeadStatus, NewClient, NewContractor,
    NewDocument, NewLead, NewPayment, NewProject, Payment, PaymentParty, PaymentPatch,
    PaymentStatus, Project, ProjectPatch, ProjectStatus, CLIENT_PREFIX, CONTRACTOR_PREFIX,
    DOCUMENT_PREFIX, LEAD_PREFIX, PAYMENT_PREFIX, PROJECT_PREFIX, UNASSIGNED, ZERO_VALUE,
};
pub use money::{format_inr, parse_inr};
pub use query::{
    ClientQuery, ContractorQuery, DocumentQuery, LeadQuery, PaymentQuery, ProjectQuery, Query,
};
pub use report::Summary;
pub use store::{DataStore, DeletePolicy, DocumentView, PaymentView, ProjectView};
