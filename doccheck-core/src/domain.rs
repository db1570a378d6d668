use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

pub type PackageName = String;
pub type DataStreamName = String;
pub type InputType = String;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Severity {
    Critical,
    Major,
    Minor,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Critical => "CRITICAL",
            Self::Major => "MAJOR",
            Self::Minor => "MINOR",
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Dimension {
    Structure,
    Completeness,
    Accuracy,
    VendorSetup,
    Scaling,
    Accessibility,
    Style,
}

impl Dimension {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Structure => "structure",
            Self::Completeness => "completeness",
            Self::Accuracy => "accuracy",
            Self::VendorSetup => "vendor_setup",
            Self::Scaling => "scaling",
            Self::Accessibility => "accessibility",
            Self::Style => "style",
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum IssueSource {
    Static,
    Semantic,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub category: Dimension,
    pub location: String,
    pub message: String,
    pub suggestion: String,
    pub source: IssueSource,
}

impl ValidationIssue {
    pub fn new(
        severity: Severity,
        category: Dimension,
        location: impl Into<String>,
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            category,
            location: location.into(),
            message: message.into(),
            suggestion: suggestion.into(),
            source: IssueSource::Static,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StagedValidationResult {
    pub dimension: Dimension,
    pub valid: bool,
    pub score: u8,
    pub issues: Vec<ValidationIssue>,
    pub warnings: Vec<String>,
    pub suggestions: Vec<String>,
}

impl StagedValidationResult {
    // Validity is derived from issue severities: minor issues alone never
    // invalidate a dimension.
    pub fn from_issues(dimension: Dimension, issues: Vec<ValidationIssue>) -> Self {
        let valid = !issues
            .iter()
            .any(|i| matches!(i.severity, Severity::Critical | Severity::Major));
        Self {
            dimension,
            valid,
            score: 100,
            issues,
            warnings: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    pub fn passing(dimension: Dimension) -> Self {
        Self::from_issues(dimension, Vec::new())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataStreamInfo {
    pub name: DataStreamName,
    pub stream_type: String,
    pub title: String,
    pub description: String,
    pub dataset: String,
    pub has_sample_event: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FieldInfo {
    pub name: String,
    pub field_type: String,
    pub description: String,
    pub unit: Option<String>,
    pub metric_type: Option<String>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum AdvancedSettingGotcha {
    Security,
    Debug,
    Ssl,
    Sensitive,
    Complex,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AdvancedSetting {
    pub name: String,
    pub title: String,
    pub description: String,
    pub var_type: String,
    pub secret: bool,
    pub show_user: bool,
    pub gotchas: BTreeSet<AdvancedSettingGotcha>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServiceInfoLink {
    pub text: String,
    pub url: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct VendorSetupContent {
    pub has_prerequisites: bool,
    pub has_vendor_steps: bool,
    pub has_onboarding_steps: bool,
    pub has_validation_steps: bool,
    pub has_troubleshooting: bool,
    pub prerequisites_text: String,
    pub vendor_steps_text: String,
    pub onboarding_steps_text: String,
    pub validation_steps_text: String,
    pub troubleshooting_text: String,
    pub documentation_links: Vec<ServiceInfoLink>,
}

impl VendorSetupContent {
    pub fn has_setup_content(&self) -> bool {
        self.has_prerequisites
            || self.has_vendor_steps
            || self.has_onboarding_steps
            || self.has_validation_steps
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PackageContext {
    pub name: PackageName,
    pub title: String,
    pub version: String,
    pub data_streams: Vec<DataStreamInfo>,
    pub fields: HashMap<DataStreamName, Vec<FieldInfo>>,
    pub input_types: BTreeSet<InputType>,
    pub advanced_settings: Vec<AdvancedSetting>,
    pub knowledge_base: Option<String>,
    pub service_info_links: Vec<ServiceInfoLink>,
    pub vendor_setup: VendorSetupContent,
    pub existing_readme: Option<String>,
}

impl PackageContext {
    pub fn all_fields(&self) -> impl Iterator<Item = &FieldInfo> {
        self.fields.values().flatten()
    }
}
