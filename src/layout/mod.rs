//! Layout - maps segmented model groups into world-space geometry.

pub mod circle;
pub mod group;
pub mod scene;
pub mod width;

pub use circle::{circle_layout, CircleLayout, Placeholder, MAX_MARKERS};
pub use group::{layout_group, GroupLayout, LayerGeometry, LayerPlacement};
pub use scene::{build_scene, Arrow, Scene, SceneGroup, CONN_RATE, GROUP_GAP};
pub use width::{layer_width, LayoutError, Ratio, MARKER_DIAMETER, NAME_TERM};
