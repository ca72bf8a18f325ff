//! Parser profile: the static tables that drive row transformation.
//!
//! Column names, the column-to-field mapping, the category allow-list and the
//! column groupings are data, not code. Every section has defaults matching
//! the SigmaBAM inventory export so a partial TOML file is enough.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Source column of the responsible person, chosen once per deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponsibleSource {
    /// `identity.applicant_column`
    #[default]
    Applicant,
    /// `identity.coordinator_column`
    Coordinator,
}

/// How person names are written in the responsible column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameFormat {
    /// `Last, First`
    #[default]
    LastCommaFirst,
    /// `First Last`, exactly two whitespace-separated tokens
    FirstLast,
}

/// Parsing mode of a designated numeric field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericKind {
    /// Percentage, flagged when outside `[0, 100]`.
    Percentage,
    /// Any parseable number.
    Plain,
}

impl NumericKind {
    /// Closed range the value is expected to fall in, if any.
    pub fn expected_range(&self) -> Option<(f64, f64)> {
        match self {
            Self::Percentage => Some((0.0, 100.0)),
            Self::Plain => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyColumns {
    /// Mandatory per-row business key.
    pub handling_id: String,
    pub organizational_unit: String,
    pub product_category: String,
}

impl Default for KeyColumns {
    fn default() -> Self {
        Self {
            handling_id: "Umgang-Id".to_string(),
            organizational_unit: "Organisationseinheit".to_string(),
            product_category: "Produktkategorie".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeOptions {
    /// Leading segment of the entity code; empty means none.
    pub prefix: String,
    /// Minimum width of the zero-padded handling identifier.
    pub pad_width: usize,
    /// Prefix turning an organizational unit into a division vocabulary term.
    pub division_prefix: String,
}

impl Default for CodeOptions {
    fn default() -> Self {
        Self {
            prefix: "CHEM".to_string(),
            pad_width: 4,
            division_prefix: "OE_".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityOptions {
    pub responsible_source: ResponsibleSource,
    pub applicant_column: String,
    /// Hazardous substance coordinator column.
    pub coordinator_column: String,
    pub name_format: NameFormat,
    pub uppercase: bool,
    pub person_path_prefix: String,
}

impl IdentityOptions {
    /// Column the responsible person is read from.
    pub fn responsible_column(&self) -> &str {
        match self.responsible_source {
            ResponsibleSource::Applicant => &self.applicant_column,
            ResponsibleSource::Coordinator => &self.coordinator_column,
        }
    }
}

impl Default for IdentityOptions {
    fn default() -> Self {
        Self {
            responsible_source: ResponsibleSource::default(),
            applicant_column: "AntragstellerIn".to_string(),
            coordinator_column: "Gefahrstoffkoordinator*in".to_string(),
            name_format: NameFormat::default(),
            uppercase: true,
            person_path_prefix: "/BAM_GLOBAL/BAM_DATA/".to_string(),
        }
    }
}

/// One direct column-to-field mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub source: String,
    pub target: String,
}

impl ColumnMapping {
    pub fn new(source: &str, target: &str) -> Self {
        Self {
            source: source.to_string(),
            target: target.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryOptions {
    /// Allowed product category codes.
    pub allowed: Vec<String>,
}

impl Default for CategoryOptions {
    fn default() -> Self {
        let mut allowed: Vec<String> = ["PC0", "PC1", "PC2", "PC3", "PC4", "PC7", "PC8"]
            .iter()
            .map(ToString::to_string)
            .collect();
        allowed.extend(["PC9A", "PC9B", "PC9C"].iter().map(ToString::to_string));
        allowed.extend((11..=40).filter(|n| *n != 22).map(|n| format!("PC{n}")));
        Self { allowed }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoteOptions {
    pub columns: Vec<String>,
    pub separator: String,
    /// Rendered in place of an empty note cell.
    pub missing_marker: String,
}

impl Default for NoteOptions {
    fn default() -> Self {
        Self {
            columns: [
                "Bemerkung",
                "Verwendungszweck",
                "Gefahrstoffkoordinator*in",
                "Lagerbedingungen",
                "Gebindegröße",
            ]
            .iter()
            .map(ToString::to_string)
            .collect(),
            separator: " | ".to_string(),
            missing_marker: "None".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HazardOptions {
    pub columns: Vec<String>,
}

impl Default for HazardOptions {
    fn default() -> Self {
        Self {
            columns: ["H-Sätze", "EUH-Sätze", "P-Sätze", "CMR"]
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationOptions {
    /// Columns joined in this order.
    pub columns: Vec<String>,
    pub separator: String,
}

impl Default for LocationOptions {
    fn default() -> Self {
        Self {
            columns: ["Liegenschaft", "Haus", "Etage", "Raum-Nr"]
                .iter()
                .map(ToString::to_string)
                .collect(),
            separator: "_".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOptions {
    /// Accepted file extensions, compared case-insensitively.
    pub extensions: Vec<String>,
}

impl Default for FileOptions {
    fn default() -> Self {
        Self {
            extensions: vec!["xlsx".to_string()],
        }
    }
}

impl FileOptions {
    pub fn accepts(&self, extension: &str) -> bool {
        self.extensions
            .iter()
            .any(|accepted| accepted.eq_ignore_ascii_case(extension))
    }
}

/// Complete set of static tables for one deployment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserProfile {
    pub columns: KeyColumns,
    pub code: CodeOptions,
    pub identity: IdentityOptions,
    pub mapping: Vec<ColumnMapping>,
    /// Designated numeric fields, keyed by mapping target.
    pub numeric: BTreeMap<String, NumericKind>,
    pub product_category: CategoryOptions,
    pub notes: NoteOptions,
    pub hazard: HazardOptions,
    pub location: LocationOptions,
    pub files: FileOptions,
}

impl Default for ParserProfile {
    fn default() -> Self {
        Self {
            columns: KeyColumns::default(),
            code: CodeOptions::default(),
            identity: IdentityOptions::default(),
            mapping: vec![
                ColumnMapping::new("Produktname", "name"),
                ColumnMapping::new("CAS-Nr.", "cas_number"),
                ColumnMapping::new("Hersteller", "company"),
                ColumnMapping::new("Artikelnummer", "product_number"),
                ColumnMapping::new("Lagerklasse", "storage_class"),
                ColumnMapping::new("Konzentration", "concentration"),
                ColumnMapping::new("Dichte", "density"),
            ],
            numeric: BTreeMap::from([
                ("concentration".to_string(), NumericKind::Percentage),
                ("density".to_string(), NumericKind::Plain),
            ]),
            product_category: CategoryOptions::default(),
            notes: NoteOptions::default(),
            hazard: HazardOptions::default(),
            location: LocationOptions::default(),
            files: FileOptions::default(),
        }
    }
}

impl ParserProfile {
    /// Field names assigned by derivation rather than the mapping table.
    pub const DERIVED_FIELDS: [&'static str; 7] = [
        "code",
        "responsible_person",
        "bam_oe",
        "hazardous_substance",
        "notes",
        "product_category",
        "bam_location_complete",
    ];

    pub fn responsible_column(&self) -> &str {
        self.identity.responsible_column()
    }

    pub fn numeric_kind(&self, target: &str) -> Option<NumericKind> {
        self.numeric.get(target).copied()
    }

    #[must_use]
    pub fn with_responsible_source(mut self, source: ResponsibleSource) -> Self {
        self.identity.responsible_source = source;
        self
    }

    #[must_use]
    pub fn with_pad_width(mut self, width: usize) -> Self {
        self.code.pad_width = width;
        self
    }
}
