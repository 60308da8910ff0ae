use crate::infra::InMemoryLeadRepository;
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

use leadscore::error::AppError;
use leadscore::scoring::{
    BatchScoreSummary, CsvLeadImporter, LeadScoringService, LeadSubmission, ScoreResponse,
    ScoringConfig, DEFAULT_MAX_BATCH_SIZE,
};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Print the stored record for each demo lead as JSON
    #[arg(long)]
    pub(crate) dump_records: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ScoreFileArgs {
    /// CRM lead-table CSV export to score
    #[arg(long)]
    pub(crate) csv: PathBuf,
}

fn build_service() -> LeadScoringService<InMemoryLeadRepository> {
    LeadScoringService::new(
        Arc::new(InMemoryLeadRepository::default()),
        ScoringConfig::default(),
    )
}

/// Score every row of a CSV export through the batch pipeline and print the
/// resulting triage queue.
pub(crate) fn run_score_file(args: ScoreFileArgs) -> Result<(), AppError> {
    let leads = CsvLeadImporter::from_path(&args.csv)?;
    let total = leads.len();
    let service = build_service();

    println!("Scoring {} lead(s) from {}", total, args.csv.display());

    let mut processed = 0;
    let mut errors = Vec::new();
    for chunk in leads.chunks(DEFAULT_MAX_BATCH_SIZE) {
        let summary = service
            .score_batch(chunk.to_vec())
            .expect("chunks never exceed the batch limit");
        processed += summary.processed;
        render_batch(&summary);
        errors.extend(summary.errors);
    }

    println!("\nProcessed {processed}/{total}");
    if !errors.is_empty() {
        println!("Errors");
        for error in &errors {
            let id = if error.external_id.is_empty() {
                "(blank id)"
            } else {
                error.external_id.as_str()
            };
            println!("- {}: {}", id, error.error);
        }
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let service = build_service();

    println!("Lead scoring demo");
    let summary = service
        .score_batch(demo_leads())
        .expect("demo batch is under the limit");
    render_batch(&summary);

    println!("\nMost recent queue entries");
    for record in service.recent(10).expect("in-memory repository") {
        println!(
            "- #{} {} ({}) -> {}",
            record.id,
            record.scored.submission.external_id,
            record.scored.score.priority.label(),
            record.scored.score.summary
        );
        if args.dump_records {
            println!(
                "{}",
                serde_json::to_string_pretty(&record).expect("record serializes")
            );
        }
    }

    Ok(())
}

fn render_batch(summary: &BatchScoreSummary) {
    for result in &summary.results {
        render_response(result);
    }
}

fn render_response(response: &ScoreResponse) {
    println!(
        "- {} | {} | {} | Q{} I{} C{} | {}",
        response.external_id,
        response.classification.label(),
        response.priority.label(),
        response.scores.quality_score,
        response.scores.intent_score,
        response.scores.confidence_score,
        response.next_action
    );
    if !response.risk_flags.is_empty() {
        let flags: Vec<_> = response
            .risk_flags
            .iter()
            .map(|flag| flag.label())
            .collect();
        println!("  flags: {}", flags.join(", "));
    }
}

fn demo_leads() -> Vec<LeadSubmission> {
    let mut hot = LeadSubmission {
        external_id: "demo-hot".to_string(),
        ..LeadSubmission::default()
    };
    hot.requirements.budget_min = Some(500_000);
    hot.requirements.budget_max = Some(600_000);
    hot.requirements.bedrooms = Some(2);
    hot.requirements.purchase_purpose = Some("primary_residence".to_string());
    hot.financial.payment_method = Some("cash".to_string());
    hot.financial.buying_within_28_days = Some(true);
    hot.context.channel = Some("form".to_string());

    let mut fake = LeadSubmission {
        external_id: "demo-fake".to_string(),
        ..LeadSubmission::default()
    };
    fake.requirements.budget_max = Some(2_500_000);
    fake.requirements.bedrooms = Some(1);
    fake.financial.payment_method = Some("cash".to_string());

    let mut sparse = LeadSubmission {
        external_id: "demo-sparse".to_string(),
        ..LeadSubmission::default()
    };
    sparse.financial.payment_method = Some("mortgage".to_string());
    sparse.financial.connect_to_broker = Some(false);

    vec![hot, fake, sparse]
}
