//! SARIF (Static Analysis Results Interchange Format) output formatter.
//!
//! Implements SARIF 2.1.0 format for integration with GitHub code scanning
//! and other CI/CD tools. All three linters are reported as one run whose
//! rule ids are prefixed with the tool id.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use yamlsentry_diagnostic::{Diagnostic, Severity};

use crate::CheckResult;

/// SARIF version constant
const SARIF_VERSION: &str = "2.1.0";

const SARIF_SCHEMA: &str =
    "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/master/Schemata/sarif-schema-2.1.0.json";

/// Tool information for SARIF
const TOOL_NAME: &str = "yamlsentry";

/// Generates SARIF output from check results
pub fn generate_sarif(results: &[CheckResult]) -> Result<String, serde_json::Error> {
    let sarif_log = SarifLog::from_results(results);
    serde_json::to_string_pretty(&sarif_log)
}

/// Root SARIF log structure
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifLog {
    #[serde(rename = "$schema")]
    schema: &'static str,
    version: &'static str,
    runs: Vec<Run>,
}

impl SarifLog {
    fn from_results(results: &[CheckResult]) -> Self {
        Self {
            schema: SARIF_SCHEMA,
            version: SARIF_VERSION,
            runs: vec![Run::from_results(results)],
        }
    }
}

/// A single run of the tool
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct Run {
    tool: Tool,
    results: Vec<SarifResult>,
}

impl Run {
    fn from_results(check_results: &[CheckResult]) -> Self {
        let mut results = Vec::new();
        let mut rules: BTreeMap<String, ReportingDescriptor> = BTreeMap::new();

        for check_result in check_results {
            for diagnostic in &check_result.diagnostics {
                let rule_id = rule_id(diagnostic);
                rules
                    .entry(rule_id.clone())
                    .or_insert_with(|| ReportingDescriptor::new(&rule_id, diagnostic));
                results.push(SarifResult::from_diagnostic(rule_id, diagnostic, &check_result.path));
            }
        }

        Self {
            tool: Tool {
                driver: ToolComponent {
                    name: TOOL_NAME,
                    version: option_env!("CARGO_PKG_VERSION"),
                    rules: rules.into_values().collect(),
                },
            },
            results,
        }
    }
}

fn rule_id(diagnostic: &Diagnostic) -> String {
    format!("{}/{}", diagnostic.source.id(), diagnostic.rule)
}

/// Tool information
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct Tool {
    driver: ToolComponent,
}

/// Tool component (driver)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct ToolComponent {
    name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    rules: Vec<ReportingDescriptor>,
}

/// Rule descriptor
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReportingDescriptor {
    id: String,
    name: String,
    short_description: Message,
    #[serde(skip_serializing_if = "Option::is_none")]
    help_uri: Option<String>,
}

impl ReportingDescriptor {
    fn new(id: &str, diagnostic: &Diagnostic) -> Self {
        Self {
            id: id.to_string(),
            name: diagnostic.rule.clone(),
            short_description: Message::text(&diagnostic.message),
            help_uri: diagnostic.documentation_url.clone(),
        }
    }
}

/// A message
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct Message {
    text: String,
}

impl Message {
    fn text(s: impl Into<String>) -> Self {
        Self { text: s.into() }
    }
}

/// A single result (diagnostic)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifResult {
    rule_id: String,
    level: &'static str,
    message: Message,
    locations: Vec<Location>,
}

impl SarifResult {
    fn from_diagnostic(rule_id: String, diagnostic: &Diagnostic, path: &Path) -> Self {
        let level = match diagnostic.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "note",
        };

        Self {
            rule_id,
            level,
            message: Message::text(&diagnostic.message),
            locations: vec![Location {
                physical_location: PhysicalLocation {
                    artifact_location: ArtifactLocation {
                        uri: path.to_string_lossy().replace('\\', "/"),
                    },
                    region: Region {
                        start_line: diagnostic.line,
                        start_column: diagnostic.column,
                    },
                },
            }],
        }
    }
}

/// Location information
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct Location {
    physical_location: PhysicalLocation,
}

/// Physical location
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct PhysicalLocation {
    artifact_location: ArtifactLocation,
    region: Region,
}

/// Artifact location (file path)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct ArtifactLocation {
    uri: String,
}

/// Region (line/column information)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct Region {
    start_line: u32,
    start_column: u32,
}
