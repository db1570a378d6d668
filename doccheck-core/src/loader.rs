use crate::domain::{
    AdvancedSetting, AdvancedSettingGotcha, DataStreamInfo, FieldInfo, PackageContext,
    ServiceInfoLink, VendorSetupContent,
};
use crate::sections;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::collections::{BTreeSet, HashMap};
use std::path::Path;

pub const KNOWLEDGE_BASE_PATH: &str = "docs/knowledge_base.md";
pub const EXISTING_README_PATH: &str = "docs/README.md";

#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("package manifest unreadable: {0}")]
    ManifestRead(std::io::Error),
    #[error("package manifest invalid: {0}")]
    ManifestParse(serde_yaml::Error),
}

#[derive(Debug, Deserialize)]
struct PackageManifest {
    name: String,
    #[serde(default)]
    title: Option<String>,
    version: String,
    #[serde(default)]
    vars: Vec<VarDef>,
    #[serde(default)]
    policy_templates: Vec<PolicyTemplate>,
}

#[derive(Debug, Deserialize)]
struct PolicyTemplate {
    #[serde(default)]
    inputs: Vec<PolicyInput>,
}

#[derive(Debug, Deserialize)]
struct PolicyInput {
    #[serde(rename = "type")]
    input_type: String,
    #[serde(default)]
    vars: Vec<VarDef>,
}

#[derive(Debug, Deserialize)]
struct VarDef {
    name: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(rename = "type", default)]
    var_type: Option<String>,
    #[serde(default)]
    secret: bool,
    #[serde(default = "default_show_user")]
    show_user: bool,
    #[serde(default)]
    default: Option<serde_yaml::Value>,
}

fn default_show_user() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct DataStreamManifest {
    #[serde(default)]
    title: Option<String>,
    #[serde(rename = "type", default)]
    stream_type: Option<String>,
    #[serde(default)]
    dataset: Option<String>,
    #[serde(default)]
    streams: Vec<StreamDef>,
}

#[derive(Debug, Deserialize)]
struct StreamDef {
    #[serde(default)]
    input: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    vars: Vec<VarDef>,
}

#[derive(Debug, Deserialize)]
struct FieldDef {
    name: String,
    #[serde(rename = "type", default)]
    field_type: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    unit: Option<String>,
    #[serde(default)]
    metric_type: Option<String>,
    #[serde(default)]
    fields: Vec<FieldDef>,
}

// Only the root manifest is fatal. Every secondary source degrades to an
// empty or absent value on any read or parse failure.
pub fn load_package_context(root: &Path) -> Result<PackageContext, LoadError> {
    let manifest_text =
        std::fs::read_to_string(root.join("manifest.yml")).map_err(LoadError::ManifestRead)?;
    let manifest: PackageManifest =
        serde_yaml::from_str(&manifest_text).map_err(LoadError::ManifestParse)?;

    let mut data_streams = Vec::new();
    let mut fields: HashMap<String, Vec<FieldInfo>> = HashMap::new();
    let mut input_types: BTreeSet<String> = BTreeSet::new();
    let mut vars: Vec<VarDef> = Vec::new();

    vars.extend(manifest.vars);
    for template in manifest.policy_templates {
        for input in template.inputs {
            input_types.insert(input.input_type.clone());
            vars.extend(input.vars);
        }
    }

    for entry in list_dirs(&root.join("data_stream")) {
        let name = entry.clone();
        let ds_root = root.join("data_stream").join(&name);
        let Some(ds_manifest) = read_yaml::<DataStreamManifest>(&ds_root.join("manifest.yml"))
        else {
            continue;
        };

        let description = ds_manifest
            .streams
            .iter()
            .find_map(|s| s.description.clone())
            .unwrap_or_default();

        for stream in ds_manifest.streams {
            if let Some(input) = stream.input {
                input_types.insert(input);
            }
            vars.extend(stream.vars);
        }

        data_streams.push(DataStreamInfo {
            name: name.clone(),
            stream_type: ds_manifest.stream_type.unwrap_or_else(|| "logs".to_string()),
            title: ds_manifest.title.unwrap_or_else(|| name.clone()),
            description,
            dataset: ds_manifest
                .dataset
                .unwrap_or_else(|| format!("{}.{}", manifest.name, name)),
            has_sample_event: ds_root.join("sample_event.json").is_file(),
        });

        fields.insert(name.clone(), load_fields(&ds_root.join("fields")));
    }

    data_streams.sort_by(|a, b| a.name.cmp(&b.name));

    let knowledge_base = std::fs::read_to_string(root.join(KNOWLEDGE_BASE_PATH)).ok();
    let existing_readme = std::fs::read_to_string(root.join(EXISTING_README_PATH)).ok();

    let (service_info_links, vendor_setup) = knowledge_base
        .as_deref()
        .map(parse_knowledge_base)
        .unwrap_or_default();

    Ok(PackageContext {
        name: manifest.name.clone(),
        title: manifest.title.unwrap_or(manifest.name),
        version: manifest.version,
        data_streams,
        fields,
        input_types,
        advanced_settings: extract_advanced_settings(vars),
        knowledge_base,
        service_info_links,
        vendor_setup,
        existing_readme,
    })
}

fn list_dirs(path: &Path) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(path) else {
        return Vec::new();
    };
    let mut names: Vec<String> = entries
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_dir())
        .filter_map(|e| e.file_name().into_string().ok())
        .collect();
    names.sort();
    names
}

fn read_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> Option<T> {
    let text = std::fs::read_to_string(path).ok()?;
    serde_yaml::from_str(&text).ok()
}

fn load_fields(fields_dir: &Path) -> Vec<FieldInfo> {
    let Ok(entries) = std::fs::read_dir(fields_dir) else {
        return Vec::new();
    };
    let mut paths: Vec<_> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|e| e == "yml" || e == "yaml"))
        .collect();
    paths.sort();

    let mut out = Vec::new();
    for path in paths {
        let Some(defs) = read_yaml::<Vec<FieldDef>>(&path) else {
            continue;
        };
        for def in defs {
            flatten_field(&def, "", &mut out);
        }
    }
    out
}

// Depth-first flattening; dotted names read exactly as a human would write
// them in documentation.
fn flatten_field(def: &FieldDef, prefix: &str, out: &mut Vec<FieldInfo>) {
    let full_name = if prefix.is_empty() {
        def.name.clone()
    } else {
        format!("{}.{}", prefix, def.name)
    };

    if !def.fields.is_empty() {
        for child in &def.fields {
            flatten_field(child, &full_name, out);
        }
        return;
    }

    out.push(FieldInfo {
        name: full_name,
        field_type: def.field_type.clone().unwrap_or_else(|| "keyword".to_string()),
        description: def.description.clone().unwrap_or_default(),
        unit: def.unit.clone(),
        metric_type: def.metric_type.clone(),
    });
}

const SECURITY_HINTS: &[&str] = &["security", "auth", "certificate", "credential"];
const DEBUG_HINTS: &[&str] = &["debug", "verbose", "trace"];
const SSL_HINTS: &[&str] = &["ssl", "tls"];
const SENSITIVE_HINTS: &[&str] = &["password", "token", "secret", "api_key", "apikey"];

fn extract_advanced_settings(vars: Vec<VarDef>) -> Vec<AdvancedSetting> {
    let mut seen: BTreeSet<String> = BTreeSet::new();
    let mut out = Vec::new();

    for var in vars {
        if !seen.insert(var.name.clone()) {
            continue;
        }
        let haystack = format!(
            "{} {} {}",
            var.name,
            var.title.as_deref().unwrap_or(""),
            var.description.as_deref().unwrap_or("")
        )
        .to_lowercase();

        let mut gotchas = BTreeSet::new();
        if SECURITY_HINTS.iter().any(|h| haystack.contains(h)) {
            gotchas.insert(AdvancedSettingGotcha::Security);
        }
        if DEBUG_HINTS.iter().any(|h| haystack.contains(h)) {
            gotchas.insert(AdvancedSettingGotcha::Debug);
        }
        if SSL_HINTS.iter().any(|h| haystack.contains(h)) {
            gotchas.insert(AdvancedSettingGotcha::Ssl);
        }
        if var.secret || SENSITIVE_HINTS.iter().any(|h| haystack.contains(h)) {
            gotchas.insert(AdvancedSettingGotcha::Sensitive);
        }
        let var_type = var.var_type.clone().unwrap_or_else(|| "text".to_string());
        let multiline_default = var
            .default
            .as_ref()
            .and_then(|v| v.as_str())
            .is_some_and(|s| s.contains('\n'));
        if var_type == "yaml" || multiline_default {
            gotchas.insert(AdvancedSettingGotcha::Complex);
        }

        if gotchas.is_empty() {
            continue;
        }
        out.push(AdvancedSetting {
            title: var.title.unwrap_or_else(|| var.name.clone()),
            description: var.description.unwrap_or_default(),
            name: var.name,
            var_type,
            secret: var.secret,
            show_user: var.show_user,
            gotchas,
        });
    }
    out
}

static MARKDOWN_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\((https?://[^)\s]+)\)").unwrap());

fn parse_knowledge_base(text: &str) -> (Vec<ServiceInfoLink>, VendorSetupContent) {
    let links: Vec<ServiceInfoLink> = MARKDOWN_LINK
        .captures_iter(text)
        .map(|c| ServiceInfoLink {
            text: c[1].to_string(),
            url: c[2].to_string(),
        })
        .collect();

    let mut content = VendorSetupContent {
        documentation_links: links.clone(),
        ..VendorSetupContent::default()
    };

    for heading in sections::headings(text) {
        let lower = heading.text.to_lowercase();
        let body = sections::extract_section(text, &[&heading.text])
            .map(|s| s.body)
            .unwrap_or_default();

        if lower.contains("prerequisite")
            || lower.contains("before you begin")
            || lower.contains("requirements")
        {
            content.has_prerequisites = true;
            content.prerequisites_text.push_str(&body);
        } else if lower.contains("troubleshoot") {
            content.has_troubleshooting = true;
            content.troubleshooting_text.push_str(&body);
        } else if lower.contains("validat") || lower.contains("verify") {
            content.has_validation_steps = true;
            content.validation_steps_text.push_str(&body);
        } else if lower.contains("onboard")
            || lower.contains("add the integration")
            || lower.contains("agent")
        {
            content.has_onboarding_steps = true;
            content.onboarding_steps_text.push_str(&body);
        } else if lower.contains("setup")
            || lower.contains("set up")
            || lower.contains("configur")
            || lower.contains("enable")
        {
            content.has_vendor_steps = true;
            content.vendor_steps_text.push_str(&body);
        }
    }

    (links, content)
}
