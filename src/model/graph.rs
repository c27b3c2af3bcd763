//! Model data - parsed network description as delivered by the parse server.
//!
//! The wire format is JSON with two fields:
//! - `senario`: execution order, a list of indices into the symbol table
//! - `symbol_map`: the symbol table, one entry per operator
//!
//! Entries are immutable once parsed. Lookups are fail-safe: a dangling
//! index yields None, never a panic (a malformed model degrades to a
//! visually incomplete scene, see error taxonomy in the crate docs).

use serde::{Deserialize, Serialize};

/// One operator entry in the symbol table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SymbolEntry {
    /// Operator kind, e.g. "Conv", "MaxPool", "Sigmoid"
    pub op_name: String,
    /// Output tensor shape, outermost dimension first (may include batch)
    pub output_shape: Vec<u32>,
    /// Indices of producing entries in the symbol table
    pub inputs: Vec<usize>,
    /// Indices of consuming entries in the symbol table
    pub outputs: Vec<usize>,
    /// LaTeX symbol naming this operator's result
    pub symbol: String,
    /// Forward-pass symbolic expression (LaTeX source)
    pub forward_value: String,
}

/// Parsed model: execution order plus symbol table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelGraph {
    /// Execution order as indices into `symbol_map`
    pub senario: Vec<usize>,
    /// Symbol table indexed by position
    pub symbol_map: Vec<SymbolEntry>,
}

impl ModelGraph {
    /// Parse from JSON bytes.
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// Fail-safe symbol lookup.
    pub fn entry(&self, idx: usize) -> Option<&SymbolEntry> {
        self.symbol_map.get(idx)
    }

    pub fn is_empty(&self) -> bool {
        self.senario.is_empty()
    }
}

/// One layer as placed within a group: a symbol entry tagged with its
/// position in the group (dense 0..M-1, execution order).
#[derive(Debug, Clone)]
pub struct LayerRecord {
    /// Position within the owning group
    pub index: usize,
    /// Index into the flat symbol table (for side-panel lookups)
    pub symbol_idx: usize,
    pub op_kind: String,
    pub output_shape: Vec<u32>,
    pub inputs: Vec<usize>,
    pub outputs: Vec<usize>,
    pub symbol: String,
    pub forward: String,
}

impl LayerRecord {
    pub fn from_entry(index: usize, symbol_idx: usize, entry: &SymbolEntry) -> Self {
        Self {
            index,
            symbol_idx,
            op_kind: entry.op_name.clone(),
            output_shape: entry.output_shape.clone(),
            inputs: entry.inputs.clone(),
            outputs: entry.outputs.clone(),
            symbol: entry.symbol.clone(),
            forward: entry.forward_value.clone(),
        }
    }
}

/// A contiguous run of layers in execution order, terminated by a boundary
/// operator or end-of-sequence.
#[derive(Debug, Clone)]
pub struct GroupRecord {
    /// Dense group index, 0..N-1 with no gaps
    pub group_index: usize,
    /// Layers in execution order, indices dense 0..M-1
    pub layers: Vec<LayerRecord>,
}

impl GroupRecord {
    /// Fail-safe layer lookup for side-panel population.
    pub fn layer(&self, idx: usize) -> Option<&LayerRecord> {
        self.layers.get(idx)
    }
}

/// Format a shape as "64x32x28x28" for display.
pub fn shape_string(shape: &[u32]) -> String {
    shape
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join("x")
}
