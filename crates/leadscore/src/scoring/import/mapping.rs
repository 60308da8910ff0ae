use super::parser::{parse_amount, parse_bool, parse_count, CsvLeadRow};
use crate::scoring::domain::{
    BuyerContact, Financial, LeadContext, LeadSubmission, Requirements,
};

/// Source tag stamped on every imported submission.
pub const CSV_IMPORT_SOURCE: &str = "csv_import";

/// Map one validated export row onto the submission shape the engine scores.
/// `lead_id` presence has already been checked by the importer.
pub(crate) fn submission_from_row(external_id: String, row: CsvLeadRow) -> LeadSubmission {
    LeadSubmission {
        external_id,
        external_source: CSV_IMPORT_SOURCE.to_string(),
        buyer: BuyerContact {
            country: row.country,
            region: row.region,
            name: row.name,
            email: row.email,
            phone: row.phone,
        },
        requirements: Requirements {
            budget_min: parse_amount(row.budget_min.as_deref()),
            budget_max: parse_amount(row.budget_max.as_deref()),
            bedrooms: parse_count(row.bedrooms.as_deref()),
            preferred_location: row.preferred_location,
            purchase_purpose: row.purpose,
            timeline: row.timeline,
        },
        financial: Financial {
            payment_method: row.payment_method,
            connect_to_broker: parse_bool(row.connect_to_broker.as_deref()),
            buying_within_28_days: parse_bool(row.buying_within_28_days.as_deref()),
            proof_of_funds: None,
            mortgage_status: None,
        },
        context: LeadContext {
            development_id: None,
            development_name: row.development,
            channel: row.channel,
            source_campaign: row.campaign,
        },
    }
}
