use crate::operations::query::aspect_ratio;
use crate::operations::shaping::{extrude_cap, Extrude, SubdivideGrid};
use crate::operations::transform::ScaleLocal;
use crate::topology::{FaceId, MaterialTag, Mesh};

use super::super::categorize::Facing;
use super::super::rng::RngStream;

/// Turns a rear face into a bank of engine nozzles.
///
/// The face is cut into a grid; every rear-facing cell is pushed out as a
/// dark housing, narrowed, then hollowed back in. The hollow's walls and
/// floor are tagged `ExhaustBurn`.
pub fn add_exhaust(mesh: &mut Mesh, face: FaceId, rng: &mut RngStream) -> bool {
    if !mesh.contains_face(face) {
        return false;
    }

    // long faces get fewer, wider nozzles
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let max_cuts = (4.0 - aspect_ratio(mesh, face)).max(1.0) as usize;
    let cuts = rng.int_inclusive(1, max_cuts);
    let cells = SubdivideGrid::new(face, cuts).jitter(0.02).execute(mesh, rng);
    if cells.is_empty() {
        return false;
    }

    let length = rng.uniform(0.1, 0.2);
    let outer = 1.0 / rng.uniform(1.3, 1.6);
    let inner = 1.0 / rng.uniform(1.05, 1.1);

    for cell in cells {
        if Facing::of(mesh, cell) != Some(Facing::Rear) {
            continue;
        }
        mesh.set_material(cell, MaterialTag::HullDark);
        let Some(housing) = extrude_cap(mesh, cell, length) else {
            continue;
        };
        ScaleLocal::uniform(housing, outer).execute(mesh);

        let Some(nozzle) = Extrude::new(housing, -length * 0.9).execute(mesh) else {
            continue;
        };
        for &wall in &nozzle.sides {
            mesh.set_material(wall, MaterialTag::ExhaustBurn);
        }
        mesh.set_material(nozzle.face, MaterialTag::ExhaustBurn);
        ScaleLocal::uniform(nozzle.face, inner).execute(mesh);
    }
    true
}
