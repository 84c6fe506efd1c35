//! Artifact validation: the single structural gate between model text and an [`Artifact`].

use serde_json::{Map, Value};
use siteforge_core::{Artifact, RequiredFile};

/// Why a repaired candidate could not become an artifact.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecoveryError {
    #[error("response is not valid JSON: {0}")]
    Parse(String),
    #[error("missing or malformed required files: {}", .missing_files.join(", "))]
    Schema { missing_files: Vec<String> },
    #[error("required file {path} has empty content")]
    EmptyContent { path: String },
}

/// Shape of one value in the file map.
#[derive(Debug, PartialEq, Eq)]
pub enum FileShape<'a> {
    /// `{"code": "<string>"}`, possibly with other keys.
    File(&'a str),
    NotAnObject,
    MissingCode,
    CodeNotString,
}

/// Classify a file-map value. A bare string is not a file.
pub fn file_shape(value: &Value) -> FileShape<'_> {
    let Some(object) = value.as_object() else {
        return FileShape::NotAnObject;
    };
    match object.get("code") {
        None => FileShape::MissingCode,
        Some(Value::String(code)) => FileShape::File(code),
        Some(_) => FileShape::CodeNotString,
    }
}

/// Parse `text` and enforce the required-file contract.
pub fn validate(text: &str) -> Result<Artifact, RecoveryError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| RecoveryError::Parse(e.to_string()))?;

    let Value::Object(root) = value else {
        return Err(RecoveryError::Schema {
            missing_files: RequiredFile::paths().map(String::from).collect(),
        });
    };
    let files = unwrap_files_wrapper(&root);

    let missing_files: Vec<String> = RequiredFile::paths()
        .filter(|path| !matches!(files.get(*path).map(file_shape), Some(FileShape::File(_))))
        .map(String::from)
        .collect();
    if !missing_files.is_empty() {
        return Err(RecoveryError::Schema { missing_files });
    }

    let mut artifact = Artifact::new();
    for (path, value) in files {
        match file_shape(value) {
            FileShape::File(code) => artifact.insert(path.clone(), code),
            shape => tracing::debug!(path = %path, ?shape, "dropping ill-shaped extra file"),
        }
    }

    if let Some(file) = RequiredFile::ALL
        .into_iter()
        .find(|file| artifact.required(*file).is_none_or(|code| code.trim().is_empty()))
    {
        return Err(RecoveryError::EmptyContent {
            path: file.path().to_string(),
        });
    }

    Ok(artifact)
}

/// Use the inner map of `{"files": {...}}` when the top level carries no
/// required path itself.
fn unwrap_files_wrapper(root: &Map<String, Value>) -> &Map<String, Value> {
    let has_required = RequiredFile::paths().any(|path| root.contains_key(path));
    match root.get("files") {
        Some(Value::Object(inner)) if !has_required => inner,
        _ => root,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn complete_json() -> Value {
        json!({
            "/src/App.js": {"code": "export default function App() { return null; }"},
            "/src/index.js": {"code": "import App from './App';"},
            "/src/styles.css": {"code": "body { margin: 0; }"},
            "/public/index.html": {"code": "<div id=\"root\"></div>"},
            "/package.json": {"code": "{\"name\": \"site\"}"}
        })
    }

    #[test]
    fn test_valid_artifact() {
        let artifact = validate(&complete_json().to_string()).unwrap();
        assert_eq!(artifact.len(), 5);
        assert_eq!(
            artifact.required(RequiredFile::Stylesheet),
            Some("body { margin: 0; }")
        );
    }

    #[test]
    fn test_parse_error() {
        let err = validate("Sorry, here is a description instead.").unwrap_err();
        assert!(matches!(err, RecoveryError::Parse(_)));
    }

    #[test]
    fn test_non_object_reports_every_required_file() {
        let err = validate("[1, 2, 3]").unwrap_err();
        assert_eq!(
            err,
            RecoveryError::Schema {
                missing_files: RequiredFile::paths().map(String::from).collect()
            }
        );
    }

    #[test]
    fn test_missing_files_in_canonical_order() {
        let mut value = complete_json();
        let map = value.as_object_mut().unwrap();
        map.remove("/package.json");
        map.remove("/src/index.js");
        let err = validate(&value.to_string()).unwrap_err();
        assert_eq!(
            err,
            RecoveryError::Schema {
                missing_files: vec!["/src/index.js".into(), "/package.json".into()]
            }
        );
    }

    #[test]
    fn test_bare_string_is_not_a_file() {
        let mut value = complete_json();
        value["/src/App.js"] = json!("export default 1;");
        let err = validate(&value.to_string()).unwrap_err();
        assert_eq!(
            err,
            RecoveryError::Schema {
                missing_files: vec!["/src/App.js".into()]
            }
        );
    }

    #[test]
    fn test_code_must_be_string() {
        let mut value = complete_json();
        value["/src/styles.css"] = json!({"code": 42});
        assert!(matches!(
            validate(&value.to_string()),
            Err(RecoveryError::Schema { .. })
        ));
    }

    #[test]
    fn test_empty_content() {
        let mut value = complete_json();
        value["/public/index.html"] = json!({"code": "  \n "});
        let err = validate(&value.to_string()).unwrap_err();
        assert_eq!(
            err,
            RecoveryError::EmptyContent {
                path: "/public/index.html".into()
            }
        );
    }

    #[test]
    fn test_files_wrapper_unwrapped() {
        let wrapped = json!({ "files": complete_json(), "notes": "enjoy" });
        let artifact = validate(&wrapped.to_string()).unwrap();
        assert_eq!(artifact.len(), 5);
    }

    #[test]
    fn test_extras_kept_or_dropped_by_shape() {
        let mut value = complete_json();
        value["/src/components/Nav.js"] = json!({"code": "export const Nav = () => null;"});
        value["/README.md"] = json!("just a string");
        value["/src/broken.js"] = json!({"language": "js"});
        let artifact = validate(&value.to_string()).unwrap();
        assert_eq!(artifact.extra_paths(), vec!["/src/components/Nav.js"]);
    }

    #[test]
    fn test_file_shape() {
        assert_eq!(file_shape(&json!({"code": "x"})), FileShape::File("x"));
        assert_eq!(file_shape(&json!("x")), FileShape::NotAnObject);
        assert_eq!(file_shape(&json!({})), FileShape::MissingCode);
        assert_eq!(file_shape(&json!({"code": null})), FileShape::CodeNotString);
    }

    #[test]
    fn test_error_display() {
        let err = RecoveryError::Schema {
            missing_files: vec!["/src/App.js".into(), "/package.json".into()],
        };
        assert_eq!(
            err.to_string(),
            "missing or malformed required files: /src/App.js, /package.json"
        );
    }
}
