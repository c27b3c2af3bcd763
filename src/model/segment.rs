//! Model segmentation - splits the execution sequence into display groups.
//!
//! A group is a contiguous run of layers terminated by a boundary operator
//! (pooling, clipping, sigmoid) or by the end of the sequence. Exactly one
//! boundary decision is made per layer, in segmentation order.

use log::warn;

use super::graph::{GroupRecord, LayerRecord, ModelGraph};

/// Operator-kind substrings that close the current group. Matched
/// case-insensitively against the full operator name.
const BOUNDARY_KINDS: &[&str] = &["pool", "clip", "sigmoid"];

/// True if this operator kind ends a group.
pub fn is_boundary(op_kind: &str) -> bool {
    let lower = op_kind.to_ascii_lowercase();
    BOUNDARY_KINDS.iter().any(|b| lower.contains(b))
}

/// Split the model's execution sequence into groups.
///
/// Walks `senario` in order, resolving each index against the symbol table.
/// Indices missing from the table are skipped with a warning - the scene
/// degrades rather than the whole render failing. The last resolved layer
/// always closes its group even when it is not itself a boundary operator.
///
/// An empty sequence yields an empty group list, never a single empty group:
/// every emitted group contains at least one layer and group indices are
/// dense from zero.
pub fn segment(model: &ModelGraph) -> Vec<GroupRecord> {
    let mut groups: Vec<GroupRecord> = Vec::new();
    let mut pending: Vec<LayerRecord> = Vec::new();
    let mut layer_counter = 0usize;

    let last = model.senario.len().saturating_sub(1);
    for (seq_pos, &symbol_idx) in model.senario.iter().enumerate() {
        let Some(entry) = model.entry(symbol_idx) else {
            warn!(
                "senario[{}] references missing symbol {} - layer omitted",
                seq_pos, symbol_idx
            );
            // The boundary decision for a dropped layer is still consumed:
            // end-of-sequence must close whatever has accumulated.
            if seq_pos == last && !pending.is_empty() {
                groups.push(GroupRecord {
                    group_index: groups.len(),
                    layers: std::mem::take(&mut pending),
                });
            }
            continue;
        };

        pending.push(LayerRecord::from_entry(layer_counter, symbol_idx, entry));
        layer_counter += 1;

        if is_boundary(&entry.op_name) || seq_pos == last {
            groups.push(GroupRecord {
                group_index: groups.len(),
                layers: std::mem::take(&mut pending),
            });
            layer_counter = 0;
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::graph::SymbolEntry;

    fn entry(op: &str) -> SymbolEntry {
        SymbolEntry {
            op_name: op.to_string(),
            output_shape: vec![1, 3, 8, 8],
            ..Default::default()
        }
    }

    fn model(ops: &[&str]) -> ModelGraph {
        ModelGraph {
            senario: (0..ops.len()).collect(),
            symbol_map: ops.iter().map(|o| entry(o)).collect(),
        }
    }

    #[test]
    fn test_boundary_kinds() {
        assert!(is_boundary("MaxPool"));
        assert!(is_boundary("sum_pool"));
        assert!(is_boundary("Clip"));
        assert!(is_boundary("Sigmoid"));
        assert!(!is_boundary("Conv"));
        assert!(!is_boundary("Gemm"));
    }

    #[test]
    fn test_six_entry_scenario() {
        // MaxPool at index 2 splits six layers into [0,1,2] and [3,4,5]
        let m = model(&["Conv", "Relu", "MaxPool", "Conv", "Relu", "Gemm"]);
        let groups = segment(&m);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].group_index, 0);
        assert_eq!(groups[0].layers.len(), 3);
        assert_eq!(groups[1].group_index, 1);
        assert_eq!(groups[1].layers.len(), 3);
        // Layer indices are dense per group
        assert_eq!(
            groups[1].layers.iter().map(|l| l.index).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
    }

    #[test]
    fn test_layer_count_preserved() {
        let m = model(&["Conv", "MaxPool", "Conv", "Sigmoid", "Gemm", "Clip", "Conv"]);
        let groups = segment(&m);
        let total: usize = groups.iter().map(|g| g.layers.len()).sum();
        assert_eq!(total, 7);
        // Boundaries exactly at pool/sigmoid/clip plus the final layer
        assert_eq!(groups.len(), 4);
    }

    #[test]
    fn test_trailing_boundary_makes_no_empty_group() {
        let m = model(&["Conv", "MaxPool"]);
        let groups = segment(&m);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].layers.len(), 2);
    }

    #[test]
    fn test_empty_sequence_yields_no_groups() {
        let m = ModelGraph::default();
        assert!(segment(&m).is_empty());
    }

    #[test]
    fn test_missing_symbol_is_skipped() {
        let mut m = model(&["Conv", "Relu"]);
        m.senario = vec![0, 7, 1]; // 7 does not exist
        let groups = segment(&m);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].layers.len(), 2);
    }

    #[test]
    fn test_missing_symbol_at_end_still_closes_group() {
        let mut m = model(&["Conv", "Relu"]);
        m.senario = vec![0, 1, 9];
        let groups = segment(&m);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].layers.len(), 2);
    }

    #[test]
    fn test_group_indices_dense() {
        let m = model(&["MaxPool", "MaxPool", "MaxPool"]);
        let groups = segment(&m);
        let idx: Vec<usize> = groups.iter().map(|g| g.group_index).collect();
        assert_eq!(idx, vec![0, 1, 2]);
    }
}
