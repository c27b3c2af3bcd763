//! Native open dialog for pre-parsed model JSON.
//!
//! The file-choose path loads a real file: the chosen JSON is parsed into a
//! `ModelGraph` and dispatched like any other model arrival. ONNX files go
//! through the upload path instead - this dialog is for already-parsed
//! output saved from the parse server.

use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use crate::model::ModelGraph;

/// Pop the native picker; None when the user cancels.
pub fn pick_model_file() -> Option<std::path::PathBuf> {
    rfd::FileDialog::new()
        .add_filter("model json", &["json"])
        .pick_file()
}

/// Load and parse a model JSON from disk.
pub fn load_model_file(path: &Path) -> Result<ModelGraph> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let graph = ModelGraph::from_json(&bytes)
        .with_context(|| format!("parsing {}", path.display()))?;
    info!(
        "loaded model {} ({} operators)",
        path.display(),
        graph.senario.len()
    );
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_model_file() {
        let dir = std::env::temp_dir();
        let path = dir.join("netlens_test_model.json");
        std::fs::write(
            &path,
            br#"{"senario":[0],"symbol_map":[{"op_name":"Conv","output_shape":[1,3,8,8]}]}"#,
        )
        .unwrap();
        let graph = load_model_file(&path).unwrap();
        assert_eq!(graph.senario, vec![0]);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_missing_file_errors() {
        let err = load_model_file(Path::new("/nonexistent/model.json"));
        assert!(err.is_err());
    }
}
