//! Command implementations.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info, warn};

use ivr_aggregate::{SourceBundle, build_record};
use ivr_cli::logging::redact_value;
use ivr_engine::{map_record, to_output_fields};
use ivr_map::{MatchCandidate, MatchEngine, MatchThresholds, MappingStore};
use ivr_model::{
    DocumentType, FieldMapping, FieldValue, MappingResult, OutputField,
};
use ivr_registry::Registry;

use crate::cli::{ManufacturersArgs, MapArgs, MatchArgs, ThresholdsArg};
use crate::summary::{print_candidates, print_manufacturers, print_mapping_summary};

/// Payload handed to the submission collaborator.
#[derive(Serialize)]
struct SubmissionPrefill<'a> {
    template_id: &'a str,
    fields: &'a [OutputField],
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read {what} from {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse {what} from {}", path.display()))
}

pub fn run_map(args: &MapArgs) -> Result<MappingResult> {
    let registry = Registry::load_dir(&args.definitions).context("load manufacturer registry")?;

    let mut bundle = SourceBundle {
        payload: read_json(&args.payload, "payload")?,
        ..SourceBundle::default()
    };
    if let Some(path) = &args.profile {
        bundle.profile = Some(read_json(path, "provider profile")?);
    }
    if let Some(path) = &args.facility {
        bundle.facility = Some(read_json(path, "facility record")?);
    }
    if let Some(path) = &args.organization {
        bundle.organization = Some(read_json(path, "organization record")?);
    }
    if let Some(path) = &args.workflow {
        bundle.workflow = read_json(path, "workflow metadata")?;
    }
    if let Some(manufacturer) = &args.manufacturer {
        // Explicit CLI choice outranks every stored source.
        bundle.workflow.insert(
            "order.manufacturer".to_string(),
            FieldValue::Text(manufacturer.clone()),
        );
    }
    bundle.today = Some(resolve_today(args.today.as_deref())?);

    let record = build_record(&bundle).context("aggregate canonical record")?;
    let manufacturer = record
        .get("order.manufacturer")
        .map(FieldValue::to_text)
        .unwrap_or_default();
    let document_type: DocumentType = args
        .document_type
        .parse()
        .map_err(|message: String| anyhow::anyhow!(message))?;
    debug!(
        manufacturer = redact_value(&manufacturer),
        keys = record.len(),
        "canonical record ready"
    );

    let config = if args.generic_fallback {
        registry.get_config_or_generic(&manufacturer, document_type)?
    } else {
        registry.get_config(&manufacturer, document_type)?
    };

    let known_mappings = load_known_mappings(args, config.id, &config.template_id)?;
    let result = map_record(&record, config, &known_mappings)?;
    let (fields, _) = to_output_fields(&result.data, config);

    if let Some(path) = &args.output {
        let prefill = SubmissionPrefill {
            template_id: &config.template_id,
            fields: &fields,
        };
        let json = serde_json::to_string_pretty(&prefill).context("serialize output fields")?;
        fs::write(path, json)
            .with_context(|| format!("failed to write output fields to {}", path.display()))?;
        info!(path = %path.display(), fields = fields.len(), "output fields written");
    }

    print_mapping_summary(&result, &fields);
    Ok(result)
}

fn load_known_mappings(
    args: &MapArgs,
    manufacturer_id: u32,
    template_id: &str,
) -> Result<Vec<FieldMapping>> {
    let Some(dir) = &args.mappings_dir else {
        return Ok(Vec::new());
    };
    let store = MappingStore::new(dir)?;
    store.load(manufacturer_id, template_id)
}

fn resolve_today(raw: Option<&str>) -> Result<NaiveDate> {
    match raw {
        Some(text) => NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .with_context(|| format!("invalid --today value: {text}")),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

pub fn run_match(args: &MatchArgs) -> Result<()> {
    let contents = fs::read_to_string(&args.fields_file).with_context(|| {
        format!("failed to read field names from {}", args.fields_file.display())
    })?;
    let fields: Vec<&str> = contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let thresholds = match args.thresholds {
        ThresholdsArg::Default => MatchThresholds::default(),
        ThresholdsArg::Strict => MatchThresholds::strict(),
        ThresholdsArg::Relaxed => MatchThresholds::relaxed(),
    };
    let engine = MatchEngine::new(ivr_map::CanonicalCatalog::builtin(), thresholds);

    let mut proposals: Vec<(String, Vec<MatchCandidate>)> = Vec::new();
    for field in fields {
        let candidates = engine.candidates(field);
        if candidates.is_empty() {
            warn!(field, "no candidates above the floor");
        }
        proposals.push((field.to_string(), candidates));
    }
    print_candidates(&proposals, args.top);

    if args.accept {
        let accepted = accept_candidates(args, &proposals)?;
        println!(
            "Accepted {accepted} new mapping(s) into {}",
            args.mappings_dir
                .as_deref()
                .unwrap_or_else(|| Path::new("."))
                .display()
        );
    }
    Ok(())
}

/// Persists the best auto-acceptable candidate per field. Fuzzy-tier
/// proposals are never accepted automatically.
fn accept_candidates(
    args: &MatchArgs,
    proposals: &[(String, Vec<MatchCandidate>)],
) -> Result<usize> {
    let dir = args
        .mappings_dir
        .as_deref()
        .context("--accept requires --mappings-dir")?;
    let store = MappingStore::new(dir)?;
    let mut rows = Vec::new();
    for (field, candidates) in proposals {
        let Some(best) = candidates.iter().find(|c| c.auto_acceptable()) else {
            continue;
        };
        rows.push(FieldMapping::new(
            args.manufacturer_id,
            args.template_id.as_str(),
            field.as_str(),
            best.path.as_str(),
            best.confidence,
            best.match_type,
            args.created_by.as_str(),
        ));
    }
    let inserted = store.insert_all(&rows)?;
    info!(
        proposed = proposals.len(),
        accepted = inserted,
        "curation batch persisted"
    );
    Ok(inserted)
}

pub fn run_manufacturers(args: &ManufacturersArgs) -> Result<()> {
    let registry = Registry::load_dir(&args.definitions).context("load manufacturer registry")?;
    print_manufacturers(&registry.list());
    Ok(())
}
