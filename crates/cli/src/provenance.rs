use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::ffi::OsString;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// What produced an artifact: the subcommand and its resolved parameters.
pub struct Payload {
    pub command: &'static str,
    pub params: Value,
}

impl Payload {
    pub fn new(command: &'static str, params: Value) -> Self {
        Self { command, params }
    }
}

/// Write `doc` as pretty JSON to `artifact`, creating parent directories, then
/// its provenance sidecar. Returns the sidecar path.
#[track_caller]
pub fn write_artifact<P: AsRef<Path>>(
    artifact: P,
    doc: &Value,
    payload: Payload,
) -> Result<PathBuf> {
    let artifact = artifact.as_ref();
    ensure_parent(artifact)?;
    fs::write(artifact, serde_json::to_vec_pretty(doc)?)
        .with_context(|| format!("writing {}", artifact.display()))?;
    write_sidecar(artifact, payload)
}

/// Write `<stem>.provenance.json` next to `artifact` with the code revision,
/// library version, callsite, params and outputs.
#[track_caller]
pub fn write_sidecar<P: AsRef<Path>>(artifact: P, payload: Payload) -> Result<PathBuf> {
    let artifact = artifact.as_ref();
    let sidecar = provenance_path(artifact);
    ensure_parent(&sidecar)?;

    let callsite = Location::caller();
    let doc = json!({
        "code_rev": current_git_rev(),
        "lib_version": lightscene::VERSION,
        "command": payload.command,
        "callsite": {
            "file": callsite.file(),
            "line": callsite.line()
        },
        "params": payload.params,
        "outputs": [artifact.to_string_lossy()]
    });
    fs::write(&sidecar, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", sidecar.display()))?;
    Ok(sidecar)
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    Ok(())
}

fn provenance_path(artifact: &Path) -> PathBuf {
    let mut name = artifact
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| OsString::from("artifact"));
    name.push(".provenance.json");
    artifact.with_file_name(name)
}

pub fn current_git_rev() -> String {
    if let Some(baked) = option_env!("GIT_COMMIT").filter(|s| !s.is_empty()) {
        return baked.to_string();
    }
    if let Ok(from_env) = std::env::var("GIT_COMMIT") {
        if !from_env.is_empty() {
            return from_env;
        }
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn sidecar_sits_next_to_artifact() {
        let derived = provenance_path(Path::new("/tmp/frames/spot.json"));
        assert_eq!(derived, Path::new("/tmp/frames/spot.provenance.json"));
    }

    #[test]
    fn write_artifact_creates_dirs_and_sidecar() {
        let dir = tempdir().unwrap();
        let artifact = dir.path().join("nested").join("ambient.json");
        let doc = json!({"annuli": []});
        let payload = Payload::new("ambient", json!({"levels": 3}));
        let sidecar = write_artifact(&artifact, &doc, payload).unwrap();
        assert!(artifact.exists());
        let parsed: Value = serde_json::from_slice(&fs::read(&sidecar).unwrap()).unwrap();
        assert_eq!(parsed["command"], "ambient");
        assert_eq!(parsed["params"]["levels"], 3);
        assert_eq!(parsed["lib_version"], lightscene::VERSION);
        assert_eq!(parsed["outputs"][0], artifact.to_string_lossy().as_ref());
        assert!(parsed["callsite"]["file"].as_str().unwrap().ends_with(".rs"));
    }
}
