//! Response documents and their text rendering.

use indexmap::IndexMap;
use psp_mapping::{MapperRegistry, TargetLogic, TranslationOutcome};
use psp_model::{PatternKind, ScopeKind};
use serde::Serialize;

/// `{seg, mapping}` on success, `{error, seg}` when the combination is not
/// supported by the target logic.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub(crate) enum TranslateResponse {
    Mapped {
        seg: String,
        mapping: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        mapping_error: Option<String>,
    },
    Unsupported {
        error: String,
        seg: String,
    },
}

impl From<TranslationOutcome> for TranslateResponse {
    fn from(outcome: TranslationOutcome) -> Self {
        match outcome {
            TranslationOutcome::Mapped {
                seg,
                mapping,
                mapping_error,
            } => TranslateResponse::Mapped {
                seg,
                mapping,
                mapping_error,
            },
            TranslationOutcome::Unsupported { seg, error } => {
                TranslateResponse::Unsupported { error, seg }
            }
        }
    }
}

impl TranslateResponse {
    pub(crate) fn render_text(&self) -> String {
        match self {
            TranslateResponse::Mapped {
                seg,
                mapping,
                mapping_error,
            } => {
                let mut out = format!("SEG:     {seg}\nMapping: {mapping}\n");
                if let Some(err) = mapping_error {
                    out.push_str(&format!("Warning: {err}\n"));
                }
                out
            }
            TranslateResponse::Unsupported { error, seg } => {
                format!("SEG:     {seg}\nError:   {error}\n")
            }
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct TargetEntry {
    pub(crate) key: &'static str,
    pub(crate) name: &'static str,
}

pub(crate) fn target_entries(registry: &MapperRegistry) -> Vec<TargetEntry> {
    registry
        .targets()
        .filter_map(|target| {
            registry.mapper(target).ok().map(|m| TargetEntry {
                key: target.key(),
                name: m.name(),
            })
        })
        .collect()
}

pub(crate) fn render_targets_text(entries: &[TargetEntry]) -> String {
    entries
        .iter()
        .map(|e| format!("{:<18} {}\n", e.key, e.name))
        .collect()
}

pub(crate) fn render_matrix_text(
    target: TargetLogic,
    matrix: &IndexMap<PatternKind, Vec<ScopeKind>>,
) -> String {
    let mut out = format!("Supported scopes per pattern in {target}:\n");
    for (pattern, scopes) in matrix {
        let list = if scopes.is_empty() {
            "-".to_string()
        } else {
            scopes
                .iter()
                .map(|s| s.tag())
                .collect::<Vec<_>>()
                .join(", ")
        };
        out.push_str(&format!("  {:<20} {list}\n", pattern.tag()));
    }
    out
}
