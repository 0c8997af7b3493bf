//! Explain command implementation

use miette::{IntoDiagnostic, Result};
use yamlsentry_core::{RuleInfo, Source};

pub fn run_explain(rule: &str, tool: Source, json: bool) -> Result<()> {
    let info = RuleInfo::resolve(rule, tool);

    if json {
        println!("{}", serde_json::to_string_pretty(&info).into_diagnostic()?);
        return Ok(());
    }

    println!("rule:     {}", info.rule);
    println!("tool:     {}", info.source.display_name());
    println!("fixable:  {}", if info.fixable { "yes" } else { "no" });
    if let Some(url) = &info.documentation_url {
        println!("docs:     {}", url);
    }
    if let Some(hint) = info.hint {
        println!("\n{}", hint);
    }
    Ok(())
}
