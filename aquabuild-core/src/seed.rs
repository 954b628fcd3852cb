//! Fixed initial data loaded at startup

use chrono::NaiveDate;

use crate::models::{
    ClientStatus, ContractorPatch, ContractorStatus, DocumentType, LeadStatus, NewClient,
    NewContractor, NewDocument, NewLead, NewPayment, NewProject, PaymentParty, PaymentStatus,
    ProjectStatus,
};
use crate::store::DataStore;

fn seed_date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

impl DataStore {
    /// Creates a store holding the standard demo data: four clients,
    /// four contractors, four projects, four documents, six payments and
    /// two leads.
    pub fn seeded() -> Self {
        let mut store = Self::new();
        populate(&mut store);
        store
    }
}

/// Adds the demo records through the public API, so identifiers and
/// project counts are assigned exactly as for user-entered data.
pub fn populate(store: &mut DataStore) {
    let clients = [
        (
            "Rajesh Sharma",
            "rajesh.sharma@email.com",
            "+91 98765 43210",
            "Mumbai",
            "Bandra West, Mumbai",
            ClientStatus::Active,
            "₹15,50,000",
        ),
        (
            "Priya Patel",
            "priya.patel@email.com",
            "+91 87654 32109",
            "Pune",
            "Koregaon Park, Pune",
            ClientStatus::Active,
            "₹8,25,000",
        ),
        (
            "Green Valley Resort",
            "info@greenvalley.com",
            "+91 76543 21098",
            "Nashik",
            "Nashik-Pune Highway",
            ClientStatus::Premium,
            "₹45,80,000",
        ),
        (
            "Amit Kumar",
            "amit.kumar@email.com",
            "+91 65432 10987",
            "Aurangabad",
            "CIDCO Area, Aurangabad",
            ClientStatus::Active,
            "₹12,30,000",
        ),
    ];
    let client_ids: Vec<String> = clients
        .into_iter()
        .map(|(name, email, phone, city, address, status, value)| {
            store
                .add_client(NewClient {
                    name: name.into(),
                    email: email.into(),
                    phone: phone.into(),
                    city: city.into(),
                    address: address.into(),
                    status,
                    total_value: Some(value.into()),
                })
                .id
        })
        .collect();

    let contractors = [
        (
            "AquaTech Solutions",
            "contact@aquatech.com",
            "+91 98765 43210",
            "27ABCDE1234F1Z5",
            "Infinity Pools",
            ContractorStatus::Verified,
            4.8,
        ),
        (
            "Pool Masters Inc",
            "info@poolmasters.com",
            "+91 87654 32109",
            "27FGHIJ5678K2Y4",
            "Commercial Pools",
            ContractorStatus::Verified,
            4.6,
        ),
        (
            "Elite Pools",
            "hello@elitepools.com",
            "+91 76543 21098",
            "27LMNOP9012M3X7",
            "Luxury Resorts",
            ContractorStatus::Premium,
            4.9,
        ),
        (
            "AquaBuild Pro",
            "team@aquabuild.com",
            "+91 65432 10987",
            "27QRSTU3456N4W8",
            "Residential Pools",
            ContractorStatus::Active,
            4.4,
        ),
    ];
    let mut contractor_ids = Vec::with_capacity(contractors.len());
    for (name, email, phone, gst, specialization, status, rating) in contractors {
        let contractor = store.add_contractor(NewContractor {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            gst_number: gst.into(),
            specialization: specialization.into(),
            status,
        });
        store.update_contractor(
            &contractor.id,
            ContractorPatch {
                rating: Some(rating),
                ..Default::default()
            },
        );
        contractor_ids.push(contractor.id);
    }

    let projects = [
        NewProject {
            title: "Luxury Villa Pool".into(),
            client_id: client_ids[0].clone(),
            contractor_id: Some(contractor_ids[0].clone()),
            city: "Mumbai".into(),
            scope: "Infinity Pool + Deck".into(),
            status: ProjectStatus::UnderConstruction,
            progress: 65,
            total_value: Some("₹15,50,000".into()),
            start_date: Some(seed_date(2024, 4, 15)),
            expected_completion: Some(seed_date(2024, 6, 30)),
            last_updated: "2 days ago".into(),
        },
        NewProject {
            title: "Commercial Resort Pool".into(),
            client_id: client_ids[2].clone(),
            contractor_id: Some(contractor_ids[1].clone()),
            city: "Pune".into(),
            scope: "Olympic Size Pool".into(),
            status: ProjectStatus::QuotationSent,
            progress: 10,
            total_value: Some("₹45,80,000".into()),
            start_date: None,
            expected_completion: None,
            last_updated: "1 week ago".into(),
        },
        NewProject {
            title: "Residential Pool Project".into(),
            client_id: client_ids[1].clone(),
            contractor_id: Some(contractor_ids[3].clone()),
            city: "Nashik".into(),
            scope: "Standard Pool + Jacuzzi".into(),
            status: ProjectStatus::Completed,
            progress: 100,
            total_value: Some("₹8,25,000".into()),
            start_date: Some(seed_date(2024, 3, 1)),
            expected_completion: Some(seed_date(2024, 5, 15)),
            last_updated: "3 days ago".into(),
        },
        NewProject {
            title: "Hotel Chain Pool".into(),
            client_id: client_ids[3].clone(),
            contractor_id: Some(contractor_ids[2].clone()),
            city: "Aurangabad".into(),
            scope: "Rooftop Pool + Bar".into(),
            status: ProjectStatus::OnHold,
            progress: 25,
            total_value: Some("₹12,30,000".into()),
            start_date: None,
            expected_completion: None,
            last_updated: "5 days ago".into(),
        },
    ];
    let project_ids: Vec<String> = projects
        .into_iter()
        .map(|p| store.add_project(p).id)
        .collect();

    let documents = [
        (
            0,
            DocumentType::Quotation,
            "Initial Quotation - Luxury Villa Pool",
            seed_date(2024, 5, 15),
            "2.4 MB",
            "PDF",
        ),
        (
            1,
            DocumentType::WorkOrder,
            "Work Order - Resort Pool Construction",
            seed_date(2024, 5, 18),
            "1.8 MB",
            "PDF",
        ),
        (
            0,
            DocumentType::MeetingMinutes,
            "Meeting Minutes - Site Discussion",
            seed_date(2024, 5, 20),
            "0.5 MB",
            "DOC",
        ),
        (
            2,
            DocumentType::PaymentReceipt,
            "Payment Receipt - Advance Payment",
            seed_date(2024, 5, 22),
            "0.3 MB",
            "PDF",
        ),
    ];
    for (project, doc_type, name, uploaded, size, format) in documents {
        store.add_document(NewDocument {
            size: size.into(),
            format: format.into(),
            ..NewDocument::new(project_ids[project].clone(), doc_type, name, uploaded)
        });
    }

    let payments = [
        (
            0,
            PaymentParty::Client,
            1_550_000,
            1_200_000,
            (2024, 12, 15),
            PaymentStatus::Partial,
            (2024, 11, 20),
        ),
        (
            1,
            PaymentParty::Client,
            4_580_000,
            4_580_000,
            (2024, 11, 30),
            PaymentStatus::Paid,
            (2024, 11, 25),
        ),
        (
            2,
            PaymentParty::Client,
            825_000,
            575_000,
            (2024, 12, 5),
            PaymentStatus::Overdue,
            (2024, 10, 15),
        ),
        (
            0,
            PaymentParty::Contractor,
            1_200_000,
            800_000,
            (2024, 12, 10),
            PaymentStatus::Pending,
            (2024, 11, 15),
        ),
        (
            1,
            PaymentParty::Contractor,
            3_500_000,
            3_500_000,
            (2024, 11, 28),
            PaymentStatus::Paid,
            (2024, 11, 28),
        ),
        (
            3,
            PaymentParty::Contractor,
            2_800_000,
            2_100_000,
            (2024, 12, 1),
            PaymentStatus::Overdue,
            (2024, 10, 20),
        ),
    ];
    for (project, party, total, paid, (dy, dm, dd), status, (ly, lm, ld)) in payments {
        store.add_payment(NewPayment {
            paid_amount: paid,
            due_date: Some(seed_date(dy, dm, dd)),
            status,
            last_payment: Some(seed_date(ly, lm, ld)),
            ..NewPayment::new(project_ids[project].clone(), party, total)
        });
    }

    let leads = [
        (
            "Amit Sharma",
            "amit@example.com",
            "+91-9876543210",
            "Website",
            LeadStatus::Hot,
            "Residential Pool",
            850_000,
        ),
        (
            "Green Valley Hotels",
            "info@greenvalley.com",
            "+91-9876543211",
            "Google Ads",
            LeadStatus::Warm,
            "Commercial Pool",
            2_500_000,
        ),
    ];
    for (name, email, phone, source, status, project, value) in leads {
        store.add_lead(NewLead {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            source: source.into(),
            status,
            project: project.into(),
            value,
        });
    }
}
