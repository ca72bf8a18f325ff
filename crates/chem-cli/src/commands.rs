use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{debug, info, info_span, warn};

use chem_cli::output::write_entities;
use chem_cli::report::write_report_file;
use chem_ingest::{XlsxReader, expand_inputs};
use chem_model::{Chemical, ParserProfile};
use chem_standards::{load_default_profile, load_profile, profile_to_toml, validate_profile};
use chem_transform::{BatchPipeline, BatchReport};

use crate::cli::{ConvertArgs, ProfileArgs};
use crate::summary::apply_table_style;

/// Everything the summary needs after a conversion.
pub struct ConvertResult {
    pub report: BatchReport,
    pub output: Option<PathBuf>,
    pub report_path: Option<PathBuf>,
    pub dry_run: bool,
}

impl ConvertResult {
    pub fn has_errors(&self) -> bool {
        self.report.has_errors()
    }
}

/// Profile from `--profile`, or the default lookup.
fn effective_profile(path: Option<&Path>) -> Result<ParserProfile> {
    match path {
        Some(path) => {
            load_profile(path).with_context(|| format!("load profile {}", path.display()))
        }
        None => load_default_profile().context("load default profile"),
    }
}

pub fn run_convert(args: &ConvertArgs) -> Result<ConvertResult> {
    let convert_span = info_span!("convert", input_count = args.inputs.len());
    let _convert_guard = convert_span.enter();
    let start = Instant::now();

    let mut profile = effective_profile(args.profile.as_deref())?;
    if let Some(source) = args.responsible_source {
        profile = profile.with_responsible_source(source.into());
    }
    if let Some(width) = args.pad_width {
        profile = profile.with_pad_width(width);
    }
    validate_profile(&profile).context("validate profile")?;

    let files = expand_inputs(&args.inputs, &profile.files).context("collect input files")?;
    if files.is_empty() {
        warn!("no input files found");
    }
    debug!(file_count = files.len(), "inputs expanded");

    let pipeline = BatchPipeline::new(&profile, XlsxReader);
    let mut chemicals: Vec<Chemical> = Vec::new();
    let report = pipeline.run(&files, &mut chemicals);

    if !args.dry_run {
        write_entities(&chemicals, args.output.as_deref())?;
    }
    if let Some(path) = &args.report {
        write_report_file(path, &report.diagnostics())
            .with_context(|| format!("write report {}", path.display()))?;
    }
    info!(
        entities = chemicals.len(),
        dry_run = args.dry_run,
        duration_ms = start.elapsed().as_millis(),
        "convert complete"
    );

    Ok(ConvertResult {
        report,
        output: args.output.clone(),
        report_path: args.report.clone(),
        dry_run: args.dry_run,
    })
}

pub fn run_profile(args: &ProfileArgs) -> Result<()> {
    let profile = effective_profile(args.profile.as_deref())?;
    if args.toml {
        print!("{}", profile_to_toml(&profile).context("render profile")?);
        return Ok(());
    }

    let mut settings = Table::new();
    settings.set_header(vec!["Setting", "Value"]);
    apply_table_style(&mut settings);
    settings.add_row(vec!["Handling id column", profile.columns.handling_id.as_str()]);
    settings.add_row(vec![
        "Organizational unit column",
        profile.columns.organizational_unit.as_str(),
    ]);
    settings.add_row(vec![
        "Product category column",
        profile.columns.product_category.as_str(),
    ]);
    settings.add_row(vec!["Responsible column", profile.responsible_column()]);
    settings.add_row(vec!["Code prefix", profile.code.prefix.as_str()]);
    settings.add_row(vec!["Pad width".to_string(), profile.code.pad_width.to_string()]);
    settings.add_row(vec![
        "Allowed categories".to_string(),
        profile.product_category.allowed.join(", "),
    ]);
    settings.add_row(vec!["Hazard columns".to_string(), profile.hazard.columns.join(", ")]);
    settings.add_row(vec!["Location columns".to_string(), profile.location.columns.join(", ")]);
    settings.add_row(vec!["Note columns".to_string(), profile.notes.columns.join(", ")]);
    println!("{settings}");

    let mut mapping = Table::new();
    mapping.set_header(vec!["Source column", "Field", "Numeric"]);
    apply_table_style(&mut mapping);
    for entry in &profile.mapping {
        let numeric = match profile.numeric_kind(&entry.target) {
            Some(kind) => format!("{kind:?}").to_lowercase(),
            None => "-".to_string(),
        };
        mapping.add_row(vec![entry.source.clone(), entry.target.clone(), numeric]);
    }
    println!("{mapping}");
    Ok(())
}
