mod mapping;
mod parser;

pub use mapping::CSV_IMPORT_SOURCE;

use crate::scoring::domain::LeadSubmission;
use std::io::Read;
use std::path::Path;

#[derive(Debug)]
pub enum LeadImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    MissingLeadId { row: usize },
}

impl std::fmt::Display for LeadImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeadImportError::Io(err) => write!(f, "failed to read lead export: {}", err),
            LeadImportError::Csv(err) => write!(f, "invalid lead CSV data: {}", err),
            LeadImportError::MissingLeadId { row } => {
                write!(f, "row {} is missing a lead id", row)
            }
        }
    }
}

impl std::error::Error for LeadImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LeadImportError::Io(err) => Some(err),
            LeadImportError::Csv(err) => Some(err),
            LeadImportError::MissingLeadId { .. } => None,
        }
    }
}

impl From<std::io::Error> for LeadImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for LeadImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Bulk intake from a CRM lead-table CSV export. Rows become submissions
/// tagged `csv_import`; a row without a lead id fails the import with its
/// row number rather than silently dropping data.
pub struct CsvLeadImporter;

impl CsvLeadImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<LeadSubmission>, LeadImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<LeadSubmission>, LeadImportError> {
        let rows = parser::parse_rows(reader)?;
        let mut submissions = Vec::with_capacity(rows.len());

        for (index, row) in rows.into_iter().enumerate() {
            // Header occupies line 1; data starts on line 2.
            let line = index + 2;
            let external_id = row
                .lead_id
                .clone()
                .ok_or(LeadImportError::MissingLeadId { row: line })?;
            submissions.push(mapping::submission_from_row(external_id, row));
        }

        Ok(submissions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const HEADER: &str = "Lead ID,Name,Email,Budget Min,Budget Max,Bedrooms,Purpose,Payment Method,Connect To Broker,Buying Within 28 Days,Timeline,Development,Channel,Campaign";

    #[test]
    fn importer_maps_rows_to_submissions() {
        let csv = format!(
            "{HEADER}\n\
             L-100,Amira Hassan,amira@example.com,\u{a3}450000,\u{a3}520000,2,primary_residence,mortgage,yes,no,1-3 months,Marina Heights,form,spring_launch\n"
        );

        let leads = CsvLeadImporter::from_reader(Cursor::new(csv)).expect("import succeeds");
        assert_eq!(leads.len(), 1);

        let lead = &leads[0];
        assert_eq!(lead.external_id, "L-100");
        assert_eq!(lead.external_source, CSV_IMPORT_SOURCE);
        assert_eq!(lead.requirements.budget_min, Some(450_000));
        assert_eq!(lead.requirements.budget_max, Some(520_000));
        assert_eq!(lead.requirements.bedrooms, Some(2));
        assert_eq!(lead.financial.connect_to_broker, Some(true));
        assert_eq!(lead.financial.buying_within_28_days, Some(false));
        assert_eq!(lead.context.development_name.as_deref(), Some("Marina Heights"));
        assert_eq!(lead.context.source_campaign.as_deref(), Some("spring_launch"));
    }

    #[test]
    fn importer_tolerates_sparse_rows() {
        let csv = format!("{HEADER}\nL-101,,,,,,,,,,,,,\n");

        let leads = CsvLeadImporter::from_reader(Cursor::new(csv)).expect("import succeeds");
        assert_eq!(leads.len(), 1);
        assert_eq!(leads[0].requirements.budget(), 0);
        assert_eq!(leads[0].financial.payment_method, None);
    }

    #[test]
    fn importer_rejects_rows_without_lead_id() {
        let csv = format!(
            "{HEADER}\n\
             L-102,,,,,,,,,,,,,\n\
             ,,,,,,,,,,,,,\n"
        );

        let error = CsvLeadImporter::from_reader(Cursor::new(csv)).expect_err("missing id");
        match error {
            LeadImportError::MissingLeadId { row } => assert_eq!(row, 3),
            other => panic!("expected missing lead id, got {other:?}"),
        }
    }

    #[test]
    fn importer_treats_unparseable_cells_as_absent() {
        let csv = format!(
            "{HEADER}\nL-103,,,loads,not-a-number,studio,investment,cash,maybe,definitely,,,whatsapp,\n"
        );

        let leads = CsvLeadImporter::from_reader(Cursor::new(csv)).expect("import succeeds");
        let lead = &leads[0];
        assert_eq!(lead.requirements.budget_min, None);
        assert_eq!(lead.requirements.budget_max, None);
        assert_eq!(lead.requirements.bedrooms, None);
        assert_eq!(lead.financial.connect_to_broker, None);
        assert_eq!(lead.financial.buying_within_28_days, None);
    }

    #[test]
    fn importer_from_path_propagates_io_errors() {
        let error =
            CsvLeadImporter::from_path("./does-not-exist.csv").expect_err("expected io error");
        match error {
            LeadImportError::Io(_) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
