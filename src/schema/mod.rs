//! Structural validation of project and tool documents.
//!
//! Documents are first read as a `serde_yaml::Value` and walked field by
//! field: plain YAML scalars such as `123` or `true` would otherwise
//! deserialize into a `String` without complaint. Only a tree that passes
//! the walk is converted into the model types. Every function reports only
//! the first violation it finds, in document order.

use crate::core::FolioError;
use crate::models::{Projects, Tool, Tools};
use serde::de::DeserializeOwned;
use serde_yaml::{Mapping, Value};
use std::collections::HashSet;

/// Label used in errors when validating text that did not come from a file.
const INLINE_SOURCE: &str = "<input>";

#[derive(Debug, Clone, Copy)]
enum FieldKind {
    /// Present, a string, and not blank
    Required,
    /// Absent, null, or a string
    Optional,
    /// Absent, or a sequence of strings
    StringList,
}

struct FieldRule {
    name: &'static str,
    alias: Option<&'static str>,
    kind: FieldKind,
}

const fn rule(name: &'static str, alias: Option<&'static str>, kind: FieldKind) -> FieldRule {
    FieldRule {
        name,
        alias,
        kind,
    }
}

const PROJECT_FIELDS: &[FieldRule] = &[
    rule("name", None, FieldKind::Required),
    rule("date", None, FieldKind::Optional),
    rule("description", None, FieldKind::Required),
    rule("tools", None, FieldKind::StringList),
    rule("project_link", Some("project-link"), FieldKind::Optional),
    rule("github_link", Some("github-link"), FieldKind::Optional),
    rule("image", None, FieldKind::Optional),
];

const TOOL_FIELDS: &[FieldRule] = &[
    rule("id", None, FieldKind::Required),
    rule("name", None, FieldKind::Required),
    rule("icon", None, FieldKind::Required),
    rule("color", None, FieldKind::Required),
    rule("icon_color", Some("icon-color"), FieldKind::Optional),
];

/// Validate raw project-list YAML.
///
/// Returns `Ok(true)` when the document matches the project collection
/// shape, otherwise a [`FolioError::Validation`] describing the first
/// violation.
///
/// # Examples
///
/// ```rust
/// use folio_cli::schema::validate;
///
/// assert!(validate("projects:\n  - name: A\n    description: B\n").unwrap());
/// assert!(validate("projects: [").is_err());
/// assert!(validate("projects:\n  - name: 123\n    description: B\n").is_err());
/// ```
pub fn validate(raw: &str) -> Result<bool, FolioError> {
    parse_projects(raw, INLINE_SOURCE).map(|_| true)
}

/// Validate raw tool-catalog YAML with the same contract as [`validate`].
pub fn validate_tools(raw: &str) -> Result<bool, FolioError> {
    parse_tools(raw, INLINE_SOURCE).map(|_| true)
}

/// Parse and check a project document. `file` names the source in errors.
pub fn parse_projects(raw: &str, file: &str) -> Result<Projects, FolioError> {
    parse_document(raw, file, "projects", PROJECT_FIELDS)
}

/// Parse and check a tool catalog document. `file` names the source in errors.
pub fn parse_tools(raw: &str, file: &str) -> Result<Tools, FolioError> {
    parse_document(raw, file, "tools", TOOL_FIELDS)
}

fn parse_document<T: DeserializeOwned>(
    raw: &str,
    file: &str,
    key: &str,
    fields: &[FieldRule],
) -> Result<T, FolioError> {
    let invalid = |reason: String| FolioError::Validation {
        file: file.to_string(),
        reason,
    };

    if raw.trim().is_empty() {
        return Err(invalid("document is empty".to_string()));
    }

    let document: Value = serde_yaml::from_str(raw).map_err(|e| invalid(e.to_string()))?;
    let root = match &document {
        Value::Null => return Err(invalid("document is empty".to_string())),
        Value::Mapping(root) => root,
        _ => return Err(invalid("document must be a mapping".to_string())),
    };

    match root.get(key) {
        // An absent list means an empty collection.
        None => {}
        Some(Value::Sequence(items)) => {
            for (index, item) in items.iter().enumerate() {
                check_entry(item, &format!("{key}[{index}]"), fields).map_err(&invalid)?;
            }
        }
        Some(_) => return Err(invalid(format!("{key}: expected a list"))),
    }

    serde_yaml::from_value(document).map_err(|e| invalid(e.to_string()))
}

fn check_entry(entry: &Value, at: &str, fields: &[FieldRule]) -> Result<(), String> {
    let Value::Mapping(entry) = entry else {
        return Err(format!("{at}: expected a mapping"));
    };

    for field in fields {
        let path = format!("{at}.{}", field.name);
        match (field.kind, lookup(entry, field)) {
            (FieldKind::Required, None) => return Err(format!("{path}: missing field")),
            (FieldKind::Required, Some(Value::String(value))) => {
                if value.trim().is_empty() {
                    return Err(format!("{path} must not be empty"));
                }
            }
            (FieldKind::Optional, None | Some(Value::Null | Value::String(_))) => {}
            (FieldKind::StringList, None) => {}
            (FieldKind::StringList, Some(Value::Sequence(items))) => {
                if let Some(index) = items.iter().position(|item| !item.is_string()) {
                    return Err(format!("{path}[{index}]: expected a string"));
                }
            }
            (FieldKind::StringList, Some(_)) => return Err(format!("{path}: expected a list")),
            (FieldKind::Required | FieldKind::Optional, Some(_)) => {
                return Err(format!("{path}: expected a string"));
            }
        }
    }

    Ok(())
}

fn lookup<'a>(entry: &'a Mapping, field: &FieldRule) -> Option<&'a Value> {
    entry.get(field.name).or_else(|| field.alias.and_then(|alias| entry.get(alias)))
}

/// Ids that appear more than once, each reported once in first-seen order.
pub fn duplicate_tool_ids(tools: &[Tool]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut duplicates = Vec::new();

    for tool in tools {
        if !seen.insert(tool.id.as_str()) && reported.insert(tool.id.as_str()) {
            duplicates.push(tool.id.clone());
        }
    }

    duplicates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::ProjectsFixture;

    fn reason(err: FolioError) -> String {
        match err {
            FolioError::Validation {
                reason,
                ..
            } => reason,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_accepts_minimal_document() {
        let yaml = "projects:\n  - name: Site\n    description: A site\n";
        assert!(validate(yaml).unwrap());
    }

    #[test]
    fn test_validate_accepts_null_optionals() {
        let yaml = r#"
projects:
  - name: Site
    description: A site
    date: null
    image: ~
    project-link: null
"#;
        assert!(validate(yaml).unwrap());
    }

    #[test]
    fn test_validate_missing_projects_key_is_empty_collection() {
        let projects = parse_projects("title: nothing here\n", "projects.yaml").unwrap();
        assert!(projects.is_empty());
    }

    #[test]
    fn test_validate_rejects_malformed_yaml() {
        let err = validate("projects: [\n  - name: oops").unwrap_err();
        assert!(matches!(err, FolioError::Validation { .. }));
    }

    #[test]
    fn test_validate_rejects_missing_description() {
        let err = validate("projects:\n  - name: Site\n").unwrap_err();
        assert!(reason(err).contains("description"));
    }

    #[test]
    fn test_validate_rejects_wrong_type() {
        let err = validate("projects:\n  - name: Site\n    description: d\n    tools: rust\n")
            .unwrap_err();
        assert_eq!(reason(err), "projects[0].tools: expected a list");
    }

    #[test]
    fn test_validate_rejects_non_string_scalars() {
        let cases = [
            ("projects:\n  - name: 123\n    description: d\n", "projects[0].name: expected a string"),
            (
                "projects:\n  - name: Site\n    description: true\n",
                "projects[0].description: expected a string",
            ),
            (
                "projects:\n  - name: Site\n    description: d\n    date: 2025.10\n",
                "projects[0].date: expected a string",
            ),
            (
                "projects:\n  - name: Site\n    description: d\n    tools: [py, 2]\n",
                "projects[0].tools[1]: expected a string",
            ),
            (
                "projects:\n  - name: Site\n    description: d\n    github-link: 42\n",
                "projects[0].github_link: expected a string",
            ),
        ];

        for (yaml, expected) in cases {
            assert_eq!(reason(validate(yaml).unwrap_err()), expected, "input: {yaml}");
        }
    }

    #[test]
    fn test_validate_accepts_quoted_numbers() {
        let yaml = "projects:\n  - name: \"123\"\n    description: d\n    date: \"2025\"\n";
        assert!(validate(yaml).unwrap());
    }

    #[test]
    fn test_validate_tools_rejects_non_string_scalars() {
        let err = validate_tools("tools:\n  - {id: 5, name: N, icon: i, color: c}").unwrap_err();
        assert_eq!(reason(err), "tools[0].id: expected a string");

        let err = validate_tools("tools:\n  - {id: py, name: N, icon: i, color: 255}").unwrap_err();
        assert_eq!(reason(err), "tools[0].color: expected a string");

        let err =
            validate_tools("tools:\n  - {id: py, name: N, icon: i, color: c, icon-color: false}")
                .unwrap_err();
        assert_eq!(reason(err), "tools[0].icon_color: expected a string");
    }

    #[test]
    fn test_validate_rejects_non_mapping_entries() {
        let err = validate("projects:\n  - just a string\n").unwrap_err();
        assert_eq!(reason(err), "projects[0]: expected a mapping");

        let err = validate("projects: null\n").unwrap_err();
        assert_eq!(reason(err), "projects: expected a list");

        let err = validate("- name: Site\n").unwrap_err();
        assert_eq!(reason(err), "document must be a mapping");
    }

    #[test]
    fn test_validate_rejects_empty_document() {
        for raw in ["", "   \n\n"] {
            assert_eq!(reason(validate(raw).unwrap_err()), "document is empty");
            assert_eq!(reason(validate_tools(raw).unwrap_err()), "document is empty");
        }
        assert!(matches!(validate("# nothing yet\n"), Err(FolioError::Validation { .. })));
    }

    #[test]
    fn test_fixture_documents_are_rejected() {
        let err = validate(&ProjectsFixture::malformed().content).unwrap_err();
        assert!(matches!(err, FolioError::Validation { .. }));

        let err = validate(&ProjectsFixture::missing_description().content).unwrap_err();
        assert_eq!(reason(err), "projects[0].description: missing field");

        assert!(validate(&ProjectsFixture::portfolio().content).unwrap());
    }

    #[test]
    fn test_validate_rejects_empty_name() {
        let err = validate("projects:\n  - name: \"\"\n    description: d\n").unwrap_err();
        assert_eq!(reason(err), "projects[0].name must not be empty");
    }

    #[test]
    fn test_validate_reports_first_violation_only() {
        let yaml = "projects:\n  - name: ok\n    description: \"  \"\n  - name: \"\"\n    description: d\n";
        assert_eq!(reason(validate(yaml).unwrap_err()), "projects[0].description must not be empty");
    }

    #[test]
    fn test_validate_tools() {
        let yaml = "tools:\n  - id: py\n    name: Python\n    icon: python\n    color: blue\n";
        assert!(validate_tools(yaml).unwrap());

        let err = validate_tools("tools:\n  - id: py\n    name: Python\n    color: blue\n").unwrap_err();
        assert!(reason(err).contains("icon"));
    }

    #[test]
    fn test_error_names_source_file() {
        let err = parse_tools("tools: {", "data/tools.yaml").unwrap_err();
        match err {
            FolioError::Validation {
                file,
                ..
            } => assert_eq!(file, "data/tools.yaml"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_tool_ids() {
        let yaml = r#"
tools:
  - {id: py, name: Python, icon: p, color: c}
  - {id: ts, name: TypeScript, icon: t, color: c}
  - {id: py, name: Python 3, icon: p, color: c}
  - {id: py, name: Python 3.12, icon: p, color: c}
  - {id: ts, name: TS, icon: t, color: c}
"#;
        let tools = parse_tools(yaml, "tools.yaml").unwrap();
        assert_eq!(duplicate_tool_ids(&tools.tools), ["py", "ts"]);
    }
}
