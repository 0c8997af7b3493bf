//! End-to-end parsing of captured linter output.

use std::path::PathBuf;

use pretty_assertions::assert_eq;
use yamlsentry_diagnostic::{Severity, Source};
use yamlsentry_parser::{Dialect, PathResolver, classify, parse, parse_with, sanitize};

const CODECLIMATE: &str = include_str!("fixtures/ansible_lint_codeclimate.json");
const PEP8: &str = include_str!("fixtures/ansible_lint_pep8.txt");
const PARSABLE: &str = include_str!("fixtures/yamllint_parsable.txt");
const TRANSCRIPT: &str = include_str!("fixtures/pre_commit_transcript.txt");
const COLORED_TRANSCRIPT: &str = include_str!("fixtures/pre_commit_colored.txt");

fn resolver() -> PathResolver {
    PathResolver::new("/work")
}

mod ansible_lint {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_codeclimate_report() {
        assert_eq!(classify(CODECLIMATE), Some(Dialect::Structured));

        let diagnostics = parse(CODECLIMATE, &resolver(), Source::AnsibleLint);
        assert_eq!(diagnostics.len(), 3);

        let truthy = &diagnostics[0];
        assert_eq!(truthy.file, PathBuf::from("/work/roles/web/tasks/main.yml"));
        assert_eq!(truthy.rule, "yaml[truthy]");
        assert_eq!(truthy.severity, Severity::Warning);
        assert_eq!((truthy.line, truthy.column), (5, 1));
        assert!(truthy.fixable);

        let name = &diagnostics[1];
        assert_eq!(name.severity, Severity::Error);
        assert_eq!((name.line, name.column), (12, 7));

        let risky = &diagnostics[2];
        assert_eq!(risky.severity, Severity::Info);
        assert_eq!((risky.line, risky.column), (20, 3));
        assert!(!risky.fixable);
        assert_eq!(
            risky.documentation_url.as_deref(),
            Some("https://ansible.readthedocs.io/projects/lint/rules/risky-file-permissions/")
        );
    }

    #[test]
    fn test_pep8_report() {
        let diagnostics = parse_with(
            PEP8,
            &resolver(),
            Source::AnsibleLint,
            Some(Dialect::ColumnBased),
        );

        let rules: Vec<&str> = diagnostics.iter().map(|d| d.rule.as_str()).collect();
        assert_eq!(
            rules,
            vec!["yaml[trailing-spaces]", "load-failure[yaml]", "fqcn[action-core]"]
        );

        let load_failure = &diagnostics[1];
        assert_eq!(
            load_failure.file,
            PathBuf::from("/work/roles/db/tasks/main.yml")
        );
        assert_eq!((load_failure.line, load_failure.column), (19, 5));
        assert_eq!(
            load_failure.message,
            "Failed to load YAML file: did not find expected '-' indicator"
        );
        assert!(diagnostics.iter().all(|d| d.severity == Severity::Warning));
    }

    #[test]
    fn test_pep8_report_mentioning_failed_is_classified_as_transcript() {
        // Column output that happens to contain a hook status word.
        assert_eq!(classify(PEP8), Some(Dialect::HookTranscript));
    }
}

mod yamllint {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parsable_report() {
        assert_eq!(classify(PARSABLE), Some(Dialect::ColumnBased));

        let diagnostics = parse(PARSABLE, &resolver(), Source::Yamllint);
        assert_eq!(diagnostics.len(), 3);

        assert_eq!(diagnostics[0].rule, "document-start");
        assert_eq!(diagnostics[0].message, "missing document start \"---\"");
        assert_eq!(diagnostics[0].severity, Severity::Warning);

        assert_eq!(diagnostics[1].rule, "line-length");
        assert_eq!(diagnostics[1].message, "line too long (97 > 80 characters)");
        assert_eq!(diagnostics[1].severity, Severity::Error);
        assert_eq!(diagnostics[1].column, 81);

        assert_eq!(diagnostics[2].rule, "truthy");
        assert_eq!(
            diagnostics[2].documentation_url.as_deref(),
            Some("https://yamllint.readthedocs.io/en/stable/rules.html#module-yamllint.rules.truthy")
        );
    }
}

mod pre_commit {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_transcript() {
        assert_eq!(classify(TRANSCRIPT), Some(Dialect::HookTranscript));

        let diagnostics = parse(TRANSCRIPT, &resolver(), Source::PreCommit);
        assert_eq!(diagnostics.len(), 3);

        let syntax = &diagnostics[0];
        assert_eq!(syntax.rule, "check-yaml");
        assert_eq!(syntax.severity, Severity::Error);
        assert_eq!(syntax.message, "mapping values are not allowed here");
        assert_eq!(
            syntax.file,
            PathBuf::from("/work/roles/web/defaults/main.yml")
        );
        assert_eq!((syntax.line, syntax.column), (3, 9));

        for fixed in &diagnostics[1..] {
            assert_eq!(fixed.rule, "end-of-file-fixer");
            assert_eq!(fixed.severity, Severity::Info);
            assert_eq!(fixed.message, "Newline appended at end of file");
            assert!(fixed.fixable);
        }
        assert_eq!(diagnostics[1].file, PathBuf::from("/work/site.yml"));
    }

    #[test]
    fn test_colored_transcript() {
        assert!(!sanitize(COLORED_TRANSCRIPT).contains('\x1b'));

        let diagnostics = parse(COLORED_TRANSCRIPT, &resolver(), Source::PreCommit);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].rule, "trailing-whitespace");
        assert_eq!(diagnostics[0].message, "Trailing whitespace removed");
    }
}

#[test]
fn test_parsing_is_idempotent() {
    for (text, source) in [
        (CODECLIMATE, Source::AnsibleLint),
        (PARSABLE, Source::Yamllint),
        (TRANSCRIPT, Source::PreCommit),
    ] {
        assert_eq!(
            parse(text, &resolver(), source),
            parse(text, &resolver(), source)
        );
    }
}

#[test]
fn test_fixable_is_a_function_of_rule() {
    let mut all = parse(CODECLIMATE, &resolver(), Source::AnsibleLint);
    all.extend(parse(PARSABLE, &resolver(), Source::Yamllint));
    all.extend(parse(TRANSCRIPT, &resolver(), Source::PreCommit));

    for a in &all {
        for b in all.iter().filter(|b| b.rule == a.rule) {
            assert_eq!(a.fixable, b.fixable, "rule {}", a.rule);
        }
    }
}
