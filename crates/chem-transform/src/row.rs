//! Per-row transformation into a `Chemical`.
//!
//! A row moves through `Start -> Validated -> Mapped -> Enriched -> Done`, or
//! stops at `Aborted` when the handling identifier is empty. Each stage takes
//! the previous stage's value and returns a new one with its diagnostics;
//! the entity itself is only assembled once, at the end.

use std::collections::BTreeMap;
use std::fmt;

use chem_model::{
    Chemical, Diagnostic, DiagnosticCode, FieldValue, NameFormat, ParserProfile, RawRow,
};
use tracing::trace;

use crate::category::CodeExtractor;
use crate::coerce::{coerce, coerce_cell};
use crate::composite::{build_composite, build_notes};
use crate::hazard::aggregate_hazard;
use crate::identity::resolve_username;
use crate::numeric::clean_field;
use crate::staged::Staged;

/// Position of a row in the transformation state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStage {
    Start,
    Validated,
    Mapped,
    Enriched,
    Done,
    Aborted,
}

impl fmt::Display for RowStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Start => "start",
            Self::Validated => "validated",
            Self::Mapped => "mapped",
            Self::Enriched => "enriched",
            Self::Done => "done",
            Self::Aborted => "aborted",
        };
        f.write_str(label)
    }
}

/// Result of transforming one row.
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Done {
        chemical: Chemical,
        diagnostics: Vec<Diagnostic>,
    },
    Aborted {
        diagnostics: Vec<Diagnostic>,
    },
}

impl RowOutcome {
    pub fn stage(&self) -> RowStage {
        match self {
            Self::Done { .. } => RowStage::Done,
            Self::Aborted { .. } => RowStage::Aborted,
        }
    }

    pub fn chemical(&self) -> Option<&Chemical> {
        match self {
            Self::Done { chemical, .. } => Some(chemical),
            Self::Aborted { .. } => None,
        }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            Self::Done { diagnostics, .. } | Self::Aborted { diagnostics } => diagnostics,
        }
    }

    pub fn into_parts(self) -> (Option<Chemical>, Vec<Diagnostic>) {
        match self {
            Self::Done {
                chemical,
                diagnostics,
            } => (Some(chemical), diagnostics),
            Self::Aborted { diagnostics } => (None, diagnostics),
        }
    }
}

/// Left-pad a handling identifier with zeros to at least `width` characters.
///
/// Idempotent: padding an already padded identifier returns it unchanged.
pub fn pad_identifier(id: &str, width: usize) -> String {
    format!("{id:0>width$}")
}

fn expected_form(format: NameFormat) -> &'static str {
    match format {
        NameFormat::LastCommaFirst => "'Last, First'",
        NameFormat::FirstLast => "'First Last'",
    }
}

/// Row after the mandatory identifier check.
#[derive(Debug, Clone, PartialEq)]
struct ValidatedRow {
    handling_id: String,
}

/// Row after the static mapping table was applied.
#[derive(Debug, Clone, PartialEq)]
struct MappedRow {
    handling_id: String,
    attributes: BTreeMap<String, FieldValue>,
}

/// Applies a [`ParserProfile`] to raw rows.
#[derive(Debug, Clone)]
pub struct RowTransformer<'a> {
    profile: &'a ParserProfile,
    categories: CodeExtractor,
}

impl<'a> RowTransformer<'a> {
    pub fn new(profile: &'a ParserProfile) -> Self {
        Self {
            profile,
            categories: CodeExtractor::from_options(&profile.product_category),
        }
    }

    pub fn profile(&self) -> &ParserProfile {
        self.profile
    }

    /// Transform one row. Never fails; problems become diagnostics.
    pub fn transform(&self, row: &RawRow) -> RowOutcome {
        trace!(line = row.line, stage = %RowStage::Start);
        let validated = match self.validate(row) {
            Ok(validated) => validated,
            Err(diagnostic) => {
                trace!(line = row.line, stage = %RowStage::Aborted, "row dropped");
                return RowOutcome::Aborted {
                    diagnostics: vec![diagnostic],
                };
            }
        };
        let handling_id = validated.handling_id.clone();
        trace!(line = row.line, handling_id = %handling_id, stage = %RowStage::Validated);

        let (chemical, diagnostics) = self
            .map(row, validated)
            .and_then(|mapped| self.enrich(row, mapped))
            .map_diagnostics(|diagnostic| {
                diagnostic
                    .with_handling_id(&handling_id)
                    .with_row(row.line)
            })
            .into_parts();
        trace!(line = row.line, handling_id = %handling_id, stage = %RowStage::Done);
        RowOutcome::Done {
            chemical,
            diagnostics,
        }
    }

    fn validate(&self, row: &RawRow) -> Result<ValidatedRow, Diagnostic> {
        let column = &self.profile.columns.handling_id;
        let raw = coerce_cell(row, column);
        if raw.is_empty() {
            return Err(Diagnostic::new(
                DiagnosticCode::MissingIdentifier,
                format!("missing mandatory identifier '{column}'"),
            )
            .with_column(column.as_str())
            .with_row(row.line));
        }
        Ok(ValidatedRow {
            handling_id: pad_identifier(&raw, self.profile.code.pad_width),
        })
    }

    fn map(&self, row: &RawRow, validated: ValidatedRow) -> Staged<MappedRow> {
        let mut attributes = BTreeMap::new();
        let mut diagnostics = Vec::new();
        for mapping in &self.profile.mapping {
            let Some(kind) = self.profile.numeric_kind(&mapping.target) else {
                let value = coerce_cell(row, &mapping.source);
                attributes.insert(mapping.target.clone(), FieldValue::Text(value));
                continue;
            };
            let text = coerce_cell(row, &mapping.source);
            if text.is_empty() {
                continue;
            }
            let cleaned = clean_field(Some(&text), kind);
            if let Some(value) = cleaned.value {
                attributes.insert(mapping.target.clone(), FieldValue::Number(value));
            }
            if let Some(diagnostic) = cleaned.diagnostic {
                diagnostics.push(diagnostic.with_column(mapping.source.as_str()));
            }
        }
        trace!(line = row.line, stage = %RowStage::Mapped, fields = attributes.len());
        Staged::new(
            MappedRow {
                handling_id: validated.handling_id,
                attributes,
            },
            diagnostics,
        )
    }

    fn enrich(&self, row: &RawRow, mapped: MappedRow) -> Staged<Chemical> {
        let profile = self.profile;
        let unit = coerce_cell(row, &profile.columns.organizational_unit);
        let unit = (!unit.is_empty()).then_some(unit);

        let code = unit
            .as_deref()
            .map(|unit| self.entity_code(unit, &mapped.handling_id));
        let bam_oe = unit
            .as_deref()
            .map(|unit| format!("{}{unit}", profile.code.division_prefix));

        let person = self.responsible_person(row);
        let category = self.product_category(row);
        let location = build_composite(
            row,
            &profile.location.columns,
            &profile.location.separator,
        );

        let mut diagnostics = person.diagnostics;
        diagnostics.extend(category.diagnostics);
        diagnostics.extend(location.diagnostics);

        let chemical = Chemical {
            code,
            handling_id: mapped.handling_id,
            attributes: mapped.attributes,
            responsible_person: person.value,
            bam_oe,
            hazardous_substance: aggregate_hazard(row, &profile.hazard.columns),
            notes: build_notes(row, &profile.notes),
            product_category: category.value,
            bam_location_complete: location.value,
        };
        trace!(line = row.line, stage = %RowStage::Enriched);
        Staged::new(chemical, diagnostics)
    }

    fn entity_code(&self, unit: &str, handling_id: &str) -> String {
        let prefix = &self.profile.code.prefix;
        if prefix.is_empty() {
            format!("{unit}-{handling_id}")
        } else {
            format!("{prefix}-{unit}-{handling_id}")
        }
    }

    fn responsible_person(&self, row: &RawRow) -> Staged<Option<String>> {
        let identity = &self.profile.identity;
        let column = self.profile.responsible_column();
        let name = coerce(row.get(column));
        if name.is_empty() {
            return Staged::clean(None);
        }
        match resolve_username(&name, identity.name_format, identity.uppercase) {
            Some(username) => Staged::clean(Some(format!(
                "{}{username}",
                identity.person_path_prefix
            ))),
            None => Staged::with_diagnostic(
                None,
                Diagnostic::new(
                    DiagnosticCode::UnresolvedPerson,
                    format!(
                        "could not derive a username: name does not have the {} form",
                        expected_form(identity.name_format)
                    ),
                )
                .with_column(column),
            ),
        }
    }

    fn product_category(&self, row: &RawRow) -> Staged<Option<String>> {
        let column = &self.profile.columns.product_category;
        self.categories
            .extract(&coerce_cell(row, column))
            .map_diagnostics(|diagnostic| diagnostic.with_column(column.as_str()))
    }
}
