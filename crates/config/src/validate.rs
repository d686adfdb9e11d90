//! Configuration validation.
//!
//! Checks a TOML config for syntax errors, unknown or misspelled fields,
//! type errors, and settings that will not work at runtime.

use std::path::{Path, PathBuf};

use crate::{
    loader::find_config_file,
    schema::{ScribeConfig, StoreBackend},
};

/// Severity level for a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Info => write!(f, "info"),
        }
    }
}

/// A single validation diagnostic.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Category: "syntax", "unknown-field", "type-error", "semantic", "file"
    pub category: &'static str,
    /// Dotted path, e.g. "store.backend"
    pub path: String,
    pub message: String,
}

/// Result of validating a configuration file.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub diagnostics: Vec<Diagnostic>,
    pub config_path: Option<PathBuf>,
}

impl ValidationResult {
    /// Returns `true` if any diagnostic is an error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Count diagnostics by severity.
    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }
}

/// Known keys per table.
const SECTIONS: &[(&str, &[&str])] = &[
    ("server", &["bind", "port", "graphiql"]),
    ("store", &["backend", "database_url", "max_connections"]),
];

/// Validate the config at `path`, or the discovered config file when `None`.
///
/// Only TOML files are checked field by field; other formats are checked for
/// type errors only.
pub fn validate(path: Option<&Path>) -> ValidationResult {
    let Some(path) = path.map(Path::to_path_buf).or_else(find_config_file) else {
        return ValidationResult {
            diagnostics: vec![Diagnostic {
                severity: Severity::Info,
                category: "file",
                path: String::new(),
                message: "no config file found, defaults apply".into(),
            }],
            config_path: None,
        };
    };

    let raw = match std::fs::read_to_string(&path) {
        Ok(raw) => crate::env_subst::substitute_env(&raw),
        Err(e) => {
            return ValidationResult {
                diagnostics: vec![Diagnostic {
                    severity: Severity::Error,
                    category: "file",
                    path: String::new(),
                    message: format!("failed to read {}: {e}", path.display()),
                }],
                config_path: Some(path),
            };
        },
    };

    let is_toml = path
        .extension()
        .and_then(|e| e.to_str())
        .is_none_or(|e| e == "toml");

    let mut result = if is_toml {
        validate_toml_str(&raw)
    } else {
        let mut diagnostics = Vec::new();
        match crate::loader::parse_config(&raw, &path) {
            Ok(config) => check_semantics(&config, &mut diagnostics),
            Err(e) => diagnostics.push(Diagnostic {
                severity: Severity::Error,
                category: "type-error",
                path: String::new(),
                message: e.to_string(),
            }),
        }
        ValidationResult {
            diagnostics,
            config_path: None,
        }
    };
    result.config_path = Some(path);
    result
}

/// Validate a TOML config string.
pub fn validate_toml_str(toml_str: &str) -> ValidationResult {
    let mut diagnostics = Vec::new();

    let value: toml::Value = match toml::from_str(toml_str) {
        Ok(v) => v,
        Err(e) => {
            diagnostics.push(Diagnostic {
                severity: Severity::Error,
                category: "syntax",
                path: String::new(),
                message: format!("TOML syntax error: {e}"),
            });
            return ValidationResult {
                diagnostics,
                config_path: None,
            };
        },
    };

    if let Some(table) = value.as_table() {
        check_unknown_fields(table, &mut diagnostics);
    }

    match toml::from_str::<ScribeConfig>(toml_str) {
        Ok(config) => check_semantics(&config, &mut diagnostics),
        Err(e) => diagnostics.push(Diagnostic {
            severity: Severity::Error,
            category: "type-error",
            path: String::new(),
            message: format!("type error: {e}"),
        }),
    }

    ValidationResult {
        diagnostics,
        config_path: None,
    }
}

fn check_unknown_fields(root: &toml::Table, diagnostics: &mut Vec<Diagnostic>) {
    let section_names: Vec<&str> = SECTIONS.iter().map(|(name, _)| *name).collect();

    for (key, value) in root {
        let Some((_, fields)) = SECTIONS.iter().find(|(name, _)| name == key) else {
            diagnostics.push(unknown_field(key, key, &section_names));
            continue;
        };
        let Some(table) = value.as_table() else {
            continue;
        };
        for field in table.keys() {
            if !fields.contains(&field.as_str()) {
                diagnostics.push(unknown_field(&format!("{key}.{field}"), field, fields));
            }
        }
    }
}

fn unknown_field(path: &str, key: &str, candidates: &[&str]) -> Diagnostic {
    let message = match suggest(key, candidates, 3) {
        Some(hint) => format!("unknown field `{key}`, did you mean `{hint}`?"),
        None => format!("unknown field `{key}`"),
    };
    Diagnostic {
        severity: Severity::Warning,
        category: "unknown-field",
        path: path.into(),
        message,
    }
}

fn check_semantics(config: &ScribeConfig, diagnostics: &mut Vec<Diagnostic>) {
    if config.server.port == 0 {
        diagnostics.push(Diagnostic {
            severity: Severity::Warning,
            category: "semantic",
            path: "server.port".into(),
            message: "port 0 binds a random port on every start".into(),
        });
    }

    match config.store.backend {
        StoreBackend::Memory => diagnostics.push(Diagnostic {
            severity: Severity::Info,
            category: "semantic",
            path: "store.backend".into(),
            message: "memory backend keeps documents only until the process exits".into(),
        }),
        StoreBackend::Sqlite => {
            if !config.store.database_url.starts_with("sqlite:") {
                diagnostics.push(Diagnostic {
                    severity: Severity::Error,
                    category: "semantic",
                    path: "store.database_url".into(),
                    message: format!(
                        "sqlite backend needs a `sqlite:` URL, got `{}`",
                        config.store.database_url
                    ),
                });
            }
            if config.store.max_connections == 0 {
                diagnostics.push(Diagnostic {
                    severity: Severity::Error,
                    category: "semantic",
                    path: "store.max_connections".into(),
                    message: "max_connections must be at least 1".into(),
                });
            }
        },
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut cur = vec![0; b.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        cur[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != *cb);
            cur[j + 1] = (prev[j] + cost).min(prev[j + 1] + 1).min(cur[j] + 1);
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    prev[b.len()]
}

fn suggest<'a>(needle: &str, candidates: &[&'a str], max_distance: usize) -> Option<&'a str> {
    candidates
        .iter()
        .map(|c| (levenshtein(needle, c), *c))
        .filter(|(d, _)| *d <= max_distance)
        .min_by_key(|(d, _)| *d)
        .map(|(_, c)| c)
}
