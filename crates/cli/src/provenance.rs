//! Provenance sidecars: which build, parameters, and threshold produced a
//! placement file.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Provenance document; `report` prints it bare, `solve` writes it next to
/// the placement with the callsite and `α̃` filled in.
#[derive(Debug, Serialize)]
pub struct Provenance {
    pub code_rev: String,
    pub engine_version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callsite: Option<Callsite>,
    pub params: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alpha_tilde: Option<f64>,
    pub outputs: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct Callsite {
    pub file: &'static str,
    pub line: u32,
}

impl Provenance {
    pub fn new(params: Value) -> Self {
        Self {
            code_rev: code_rev(),
            engine_version: ringroad::VERSION,
            callsite: None,
            params,
            alpha_tilde: None,
            outputs: Vec::new(),
        }
    }
}

/// Write `<stem>.provenance.json` beside `artifact` and return its path.
#[track_caller]
pub fn write_sidecar(artifact: &Path, params: Value, alpha_tilde: f64) -> Result<PathBuf> {
    let at = Location::caller();
    let doc = Provenance {
        callsite: Some(Callsite {
            file: at.file(),
            line: at.line(),
        }),
        alpha_tilde: Some(alpha_tilde),
        outputs: vec![artifact.display().to_string()],
        ..Provenance::new(params)
    };
    let path = artifact.with_extension("provenance.json");
    fs::write(&path, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

/// `GIT_COMMIT` (build time, then run time), else `git rev-parse HEAD`.
pub fn code_rev() -> String {
    let from_env = [
        option_env!("GIT_COMMIT").map(str::to_owned),
        std::env::var("GIT_COMMIT").ok(),
    ];
    from_env
        .into_iter()
        .flatten()
        .find(|rev| !rev.is_empty())
        .or_else(git_head)
        .unwrap_or_else(|| "unknown".to_owned())
}

fn git_head() -> Option<String> {
    let out = Command::new("git").args(["rev-parse", "HEAD"]).output().ok()?;
    out.status
        .success()
        .then(|| String::from_utf8_lossy(&out.stdout).trim().to_owned())
}
