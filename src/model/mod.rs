//! Model domain - parsed network data, classification, segmentation.

pub mod classify;
pub mod graph;
pub mod segment;

pub use classify::{rank_class, visual_config, LayerColor, RankClass, VisualConfig};
pub use graph::{shape_string, GroupRecord, LayerRecord, ModelGraph, SymbolEntry};
pub use segment::segment;
