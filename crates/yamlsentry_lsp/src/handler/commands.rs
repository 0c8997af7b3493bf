//! Workspace commands offered through code actions.

use serde_json::Value;
use tower_lsp::lsp_types::{Command, ExecuteCommandParams, Url};
use tracing::debug;

use yamlsentry_core::Source;

/// Adds a rule to the ignore file. Arguments: `[uri, rule]`.
pub const IGNORE_RULE_COMMAND: &str = "yamlsentry.ignoreRule";

/// Runs a tool's fix mode. Arguments: `[uri, tool]`.
pub const FIX_COMMAND: &str = "yamlsentry.fix";

/// A parsed `workspace/executeCommand` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkspaceCommand {
    IgnoreRule { uri: Url, rule: String },
    Fix { uri: Url, tool: Source },
}

impl WorkspaceCommand {
    /// Parses an execute-command request; unknown commands and malformed
    /// arguments yield `None`.
    pub fn parse(params: &ExecuteCommandParams) -> Option<Self> {
        let [uri, second] = params.arguments.as_slice() else {
            debug!("Unexpected arguments for {}", params.command);
            return None;
        };
        let uri = Url::parse(uri.as_str()?).ok()?;
        let second = second.as_str()?;

        match params.command.as_str() {
            IGNORE_RULE_COMMAND => Some(Self::IgnoreRule {
                uri,
                rule: second.to_string(),
            }),
            FIX_COMMAND => Some(Self::Fix {
                uri,
                tool: second.parse().ok()?,
            }),
            _ => None,
        }
    }

    /// Returns the document the command applies to.
    pub fn uri(&self) -> &Url {
        match self {
            Self::IgnoreRule { uri, .. } | Self::Fix { uri, .. } => uri,
        }
    }

    /// Builds the client-side command.
    pub fn to_command(&self, title: impl Into<String>) -> Command {
        let (command, argument) = match self {
            Self::IgnoreRule { rule, .. } => (IGNORE_RULE_COMMAND, rule.as_str()),
            Self::Fix { tool, .. } => (FIX_COMMAND, tool.id()),
        };
        Command {
            title: title.into(),
            command: command.to_string(),
            arguments: Some(vec![
                Value::String(self.uri().to_string()),
                Value::String(argument.to_string()),
            ]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn params(command: &str, arguments: Vec<Value>) -> ExecuteCommandParams {
        ExecuteCommandParams {
            command: command.to_string(),
            arguments,
            work_done_progress_params: Default::default(),
        }
    }

    #[test]
    fn test_command_round_trip() {
        let uri = Url::parse("file:///w/site.yml").unwrap();
        let original = WorkspaceCommand::Fix {
            uri,
            tool: Source::AnsibleLint,
        };
        let command = original.to_command("Fix with ansible-lint");

        let parsed = WorkspaceCommand::parse(&params(
            &command.command,
            command.arguments.unwrap_or_default(),
        ));

        assert_eq!(parsed, Some(original));
    }

    #[test]
    fn test_parse_ignore_rule() {
        let parsed = WorkspaceCommand::parse(&params(
            IGNORE_RULE_COMMAND,
            vec![json!("file:///w/site.yml"), json!("name[missing]")],
        ));

        assert_eq!(
            parsed,
            Some(WorkspaceCommand::IgnoreRule {
                uri: Url::parse("file:///w/site.yml").unwrap(),
                rule: "name[missing]".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!(
            WorkspaceCommand::parse(&params("other.command", vec![json!("file:///a"), json!("x")])),
            None
        );
        assert_eq!(
            WorkspaceCommand::parse(&params(FIX_COMMAND, vec![json!("file:///a"), json!("flake8")])),
            None
        );
        assert_eq!(WorkspaceCommand::parse(&params(FIX_COMMAND, vec![])), None);
    }
}
