use serde::{Deserialize, Serialize};

use super::vertex::VertexId;

slotmap::new_key_type! {
    /// Unique identifier for a face in the mesh.
    ///
    /// Handles are generational: once an operator consumes a face, its old
    /// handle stops resolving even if the slot is reused.
    pub struct FaceId;
}

/// Per-face classification consumed by an external shading system.
///
/// The kernel never interprets these; it only carries them through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaterialTag {
    /// Plain spaceship hull.
    #[default]
    Hull,
    /// Hull with emissive windows.
    HullLights,
    /// Plain hull, darkened.
    HullDark,
    /// Emissive engine burn.
    ExhaustBurn,
    /// Emissive landing pad disc.
    GlowDisc,
}

/// Data associated with a mesh face.
///
/// A face is a closed loop of at least three vertices, wound
/// counter-clockwise when seen from outside. Its normal is derived from
/// the current vertex positions on demand, so it never goes stale.
#[derive(Debug, Clone)]
pub struct FaceData {
    /// The boundary loop.
    pub vertices: Vec<VertexId>,
    /// Shading classification.
    pub material: MaterialTag,
}
