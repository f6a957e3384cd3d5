use serde::{Deserialize, Serialize};

use crate::operations::query::aspect_ratio;
use crate::topology::{FaceId, Mesh};

use super::config::DetailThresholds;
use super::rng::RngStream;

/// Faces longer than this (relative to their width) get no detail.
const MAX_DETAIL_ASPECT: f64 = 3.0;

/// Which way a face points, as far as detailing is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    /// Normal X below -0.95: behind the ship.
    Rear,
    /// Normal X above 0.9.
    Front,
    /// Normal Z above 0.9.
    Top,
    /// Normal Z below -0.9.
    Bottom,
    /// Absolute normal Y above 0.9.
    Side,
}

impl Facing {
    /// Classifies a face by its normal. Faces at odd angles return `None`.
    #[must_use]
    pub fn of(mesh: &Mesh, face: FaceId) -> Option<Self> {
        let n = mesh.face_normal(face)?;
        if n.x < -0.95 {
            Some(Facing::Rear)
        } else if n.x > 0.9 {
            Some(Facing::Front)
        } else if n.z > 0.9 {
            Some(Facing::Top)
        } else if n.z < -0.9 {
            Some(Facing::Bottom)
        } else if n.y.abs() > 0.9 {
            Some(Facing::Side)
        } else {
            None
        }
    }
}

/// The seven detail generators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DetailKind {
    Engine,
    Grid,
    Antenna,
    Weapons,
    Sphere,
    Disc,
    Cylinders,
}

impl DetailKind {
    /// The order buckets are dispatched in.
    pub const DISPATCH_ORDER: [DetailKind; 7] = [
        DetailKind::Engine,
        DetailKind::Grid,
        DetailKind::Antenna,
        DetailKind::Weapons,
        DetailKind::Sphere,
        DetailKind::Disc,
        DetailKind::Cylinders,
    ];
}

/// Result of face categorization: one bucket per detail generator plus
/// the faces to tag with lit windows directly.
#[derive(Debug, Clone, Default)]
pub struct DetailPlan {
    pub engine: Vec<FaceId>,
    pub grid: Vec<FaceId>,
    pub antenna: Vec<FaceId>,
    pub weapons: Vec<FaceId>,
    pub sphere: Vec<FaceId>,
    pub disc: Vec<FaceId>,
    pub cylinders: Vec<FaceId>,
    /// Faces that become `HullLights` without further detail. Front
    /// antenna faces appear both here and in `antenna`.
    pub lit: Vec<FaceId>,
    /// Rear faces that passed the aspect filter.
    pub rear_faces: usize,
}

impl DetailPlan {
    /// Faces assigned to `kind`, in categorization order.
    #[must_use]
    pub fn faces(&self, kind: DetailKind) -> &[FaceId] {
        match kind {
            DetailKind::Engine => &self.engine,
            DetailKind::Grid => &self.grid,
            DetailKind::Antenna => &self.antenna,
            DetailKind::Weapons => &self.weapons,
            DetailKind::Sphere => &self.sphere,
            DetailKind::Disc => &self.disc,
            DetailKind::Cylinders => &self.cylinders,
        }
    }

    /// Total number of bucketed faces.
    #[must_use]
    pub fn bucketed(&self) -> usize {
        DetailKind::DISPATCH_ORDER
            .iter()
            .map(|&k| self.faces(k).len())
            .sum()
    }

    /// Handle-free counts, for reporting after the mesh is frozen.
    #[must_use]
    pub fn summary(&self) -> DetailSummary {
        DetailSummary {
            buckets: DetailKind::DISPATCH_ORDER
                .iter()
                .map(|&k| (k, self.faces(k).len()))
                .collect(),
            lit: self.lit.len(),
            rear_faces: self.rear_faces,
        }
    }
}

/// Bucket sizes of a categorization pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailSummary {
    /// Faces per detail kind, in dispatch order.
    pub buckets: Vec<(DetailKind, usize)>,
    /// Faces tagged as lit windows.
    pub lit: usize,
    /// Rear faces that passed the aspect filter.
    pub rear_faces: usize,
}

impl DetailSummary {
    /// Number of faces bucketed as `kind`.
    #[must_use]
    pub fn count(&self, kind: DetailKind) -> usize {
        self.buckets
            .iter()
            .find(|(k, _)| *k == kind)
            .map_or(0, |&(_, n)| n)
    }
}

/// Assigns every live face to at most one detail bucket.
///
/// Faces with an aspect ratio above 3 are skipped without drawing. Every
/// other face consumes exactly one draw, which is compared against its
/// facing's thresholds. The first qualifying rear face always becomes an
/// engine and the first qualifying side face always gets weapons, so a
/// ship with a rear face is never without an engine.
#[must_use]
pub fn categorize_faces(mesh: &Mesh, rng: &mut RngStream, t: &DetailThresholds) -> DetailPlan {
    let mut plan = DetailPlan::default();

    for face in mesh.face_ids() {
        if aspect_ratio(mesh, face) > MAX_DETAIL_ASPECT {
            continue;
        }
        let val = rng.unit();
        let Some(facing) = Facing::of(mesh, face) else {
            continue;
        };
        let outward = || match (mesh.face_normal(face), mesh.face_center(face)) {
            (Some(n), Some(c)) => n.dot(&c.coords) > 0.0,
            _ => false,
        };

        match facing {
            Facing::Rear => {
                plan.rear_faces += 1;
                if plan.engine.is_empty() || val > t.rear_engine {
                    plan.engine.push(face);
                } else if val > t.rear_cylinders {
                    plan.cylinders.push(face);
                } else if val > t.rear_grid {
                    plan.grid.push(face);
                } else {
                    plan.lit.push(face);
                }
            }
            Facing::Front => {
                if outward() && val > t.front_antenna {
                    plan.antenna.push(face);
                    plan.lit.push(face);
                } else if val > t.front_grid {
                    plan.grid.push(face);
                } else {
                    plan.lit.push(face);
                }
            }
            Facing::Top => {
                if outward() && val > t.top_antenna {
                    plan.antenna.push(face);
                } else if val > t.top_grid {
                    plan.grid.push(face);
                } else if val > t.top_cylinders {
                    plan.cylinders.push(face);
                }
            }
            Facing::Bottom => {
                if val > t.bottom_disc {
                    plan.disc.push(face);
                } else if val > t.bottom_grid {
                    plan.grid.push(face);
                } else if val > t.bottom_weapons {
                    plan.weapons.push(face);
                }
            }
            Facing::Side => {
                if plan.weapons.is_empty() || val > t.side_weapons {
                    plan.weapons.push(face);
                } else if val > t.side_grid {
                    plan.grid.push(face);
                } else if val > t.side_sphere {
                    plan.sphere.push(face);
                } else {
                    plan.lit.push(face);
                }
            }
        }
    }

    plan
}
