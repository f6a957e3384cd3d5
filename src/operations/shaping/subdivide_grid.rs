use rand::Rng;

use crate::math::{self, Point3};
use crate::topology::{FaceId, Mesh, VertexId};

/// Parameter distance under which a grid division reuses a vertex that
/// already sits on the side.
const SIDE_EPSILON: f64 = 1e-9;

/// Splits a quad face into a `(cuts + 1) x (cuts + 1)` grid of quads.
///
/// The face only has to be a quad geometrically: vertices spliced into its
/// sides by an earlier subdivision next door stay in place, and the border
/// cells that span them keep them in their loops. New vertices on the
/// boundary are inserted into the neighbouring faces, so the mesh stays
/// closed. Interior vertices can be jittered along the face normal by up
/// to `jitter` times the mean cell edge, drawing from the caller's RNG.
///
/// With `fill` off, only the boundary edges are split and the face keeps
/// its handle as a single n-gon.
pub struct SubdivideGrid {
    face: FaceId,
    cuts: usize,
    jitter: f64,
    fill: bool,
}

impl SubdivideGrid {
    /// Creates a new `SubdivideGrid` operation without jitter.
    #[must_use]
    pub fn new(face: FaceId, cuts: usize) -> Self {
        Self {
            face,
            cuts,
            jitter: 0.0,
            fill: true,
        }
    }

    /// Sets the jitter fraction applied to interior vertices.
    #[must_use]
    pub fn jitter(mut self, jitter: f64) -> Self {
        self.jitter = jitter;
        self
    }

    /// Sets whether interior grid faces are created.
    #[must_use]
    pub fn fill(mut self, fill: bool) -> Self {
        self.fill = fill;
        self
    }

    /// Executes the subdivision and returns the resulting faces in
    /// row-major order along the quad's first side.
    ///
    /// Stale or degenerate faces, and faces without exactly four geometric
    /// corners, are skipped and yield an empty list. Zero cuts return the
    /// face unchanged.
    #[allow(clippy::cast_precision_loss, clippy::too_many_lines)]
    pub fn execute<R: Rng>(&self, mesh: &mut Mesh, rng: &mut R) -> Vec<FaceId> {
        let Some(normal) = mesh.face_normal(self.face) else {
            tracing::trace!(face = ?self.face, "skipping subdivision of stale or degenerate face");
            return Vec::new();
        };
        let (Ok(data), Some(points)) = (mesh.face(self.face), mesh.face_points(self.face)) else {
            return Vec::new();
        };
        let corner_at = math::corner_indices(&points);
        if corner_at.len() != 4 {
            tracing::trace!(face = ?self.face, corners = corner_at.len(), "skipping subdivision of non-quad");
            return Vec::new();
        }
        if self.cuts == 0 {
            return vec![self.face];
        }

        let loop_vertices = data.vertices.clone();
        let material = data.material;
        let len = loop_vertices.len();
        let corners = [0, 1, 2, 3].map(|k| points[corner_at[k]]);

        // Vertices on each side in loop order, from its start corner to its
        // end corner, keyed by their parameter along the side.
        let mut existing: [Vec<(f64, VertexId)>; 4] = Default::default();
        for (side, run) in existing.iter_mut().enumerate() {
            let origin = corners[side];
            let along = corners[(side + 1) % 4] - origin;
            let mut k = corner_at[side];
            loop {
                let t = (points[k] - origin).dot(&along) / along.norm_squared();
                run.push((t.clamp(0.0, 1.0), loop_vertices[k]));
                if k == corner_at[(side + 1) % 4] {
                    break;
                }
                k = (k + 1) % len;
            }
        }

        let n = self.cuts + 1;
        let mut added: [Vec<(f64, VertexId)>; 4] = Default::default();
        let mut divisions: [Vec<VertexId>; 4] = Default::default();
        for side in 0..4 {
            let origin = corners[side];
            let along = corners[(side + 1) % 4] - origin;
            for k in 1..n {
                let t = k as f64 / n as f64;
                let reused = existing[side]
                    .iter()
                    .find(|(at, _)| (at - t).abs() < SIDE_EPSILON)
                    .map(|&(_, v)| v);
                let v = reused.unwrap_or_else(|| {
                    let v = mesh.add_vertex(origin + along * t);
                    added[side].push((t, v));
                    v
                });
                divisions[side].push(v);
            }
        }

        for (side, run) in existing.iter().enumerate() {
            for pair in run.windows(2) {
                let ((ta, a), (tb, b)) = (pair[0], pair[1]);
                let between: Vec<VertexId> = added[side]
                    .iter()
                    .filter(|(t, _)| *t > ta && *t < tb)
                    .map(|&(_, v)| v)
                    .collect();
                if between.is_empty() {
                    continue;
                }
                for neighbour in mesh.faces_around_edge(a, b, self.face) {
                    insert_along_edge(mesh, neighbour, a, b, &between);
                }
            }
        }

        let sides: [Vec<(f64, VertexId)>; 4] = [0, 1, 2, 3].map(|side| {
            let mut merged = existing[side].clone();
            merged.extend_from_slice(&added[side]);
            merged.sort_by(|x, y| x.0.total_cmp(&y.0));
            merged
        });

        if !self.fill {
            let perimeter: Vec<VertexId> = sides
                .iter()
                .flat_map(|side| side[..side.len() - 1].iter().map(|&(_, v)| v))
                .collect();
            mesh.replace_face_vertices(self.face, perimeter);
            return vec![self.face];
        }

        let at = |i: usize, j: usize| -> Point3 {
            let u = i as f64 / n as f64;
            let v = j as f64 / n as f64;
            let near = corners[0] + (corners[1] - corners[0]) * u;
            let far = corners[3] + (corners[2] - corners[3]) * u;
            near + (far - near) * v
        };

        // Grid of handles indexed [i][j]; i runs along corner 0 -> 1, j along 0 -> 3.
        let mut grid: Vec<Vec<Option<VertexId>>> = vec![vec![None; n + 1]; n + 1];
        grid[0][0] = Some(loop_vertices[corner_at[0]]);
        grid[n][0] = Some(loop_vertices[corner_at[1]]);
        grid[n][n] = Some(loop_vertices[corner_at[2]]);
        grid[0][n] = Some(loop_vertices[corner_at[3]]);
        for k in 1..n {
            grid[k][0] = Some(divisions[0][k - 1]);
            grid[n][k] = Some(divisions[1][k - 1]);
            grid[n - k][n] = Some(divisions[2][k - 1]);
            grid[0][n - k] = Some(divisions[3][k - 1]);
        }

        let cell = (0..4)
            .map(|k| (corners[(k + 1) % 4] - corners[k]).norm())
            .sum::<f64>()
            / (4 * n) as f64;
        for i in 1..n {
            for j in 1..n {
                let mut p = at(i, j);
                if self.jitter > 0.0 {
                    p += normal * (rng.random_range(-1.0_f64..=1.0) * self.jitter * cell);
                }
                grid[i][j] = Some(mesh.add_vertex(p));
            }
        }

        // Side vertices strictly inside the parameter window `(t0, t1)`.
        let inside = |side: usize, t0: f64, t1: f64| -> Vec<VertexId> {
            sides[side]
                .iter()
                .filter(|(t, _)| *t > t0 + SIDE_EPSILON && *t < t1 - SIDE_EPSILON)
                .map(|&(_, v)| v)
                .collect()
        };
        let step = |k: usize| k as f64 / n as f64;

        mesh.remove_face(self.face);
        let mut faces = Vec::with_capacity(n * n);
        for j in 0..n {
            for i in 0..n {
                let mut cell_loop = Vec::with_capacity(4);
                cell_loop.push(grid[i][j]);
                if j == 0 {
                    cell_loop.extend(inside(0, step(i), step(i + 1)).into_iter().map(Some));
                }
                cell_loop.push(grid[i + 1][j]);
                if i + 1 == n {
                    cell_loop.extend(inside(1, step(j), step(j + 1)).into_iter().map(Some));
                }
                cell_loop.push(grid[i + 1][j + 1]);
                if j + 1 == n {
                    cell_loop.extend(inside(2, step(n - i - 1), step(n - i)).into_iter().map(Some));
                }
                cell_loop.push(grid[i][j + 1]);
                if i == 0 {
                    cell_loop.extend(inside(3, step(n - j - 1), step(n - j)).into_iter().map(Some));
                }
                let cell_loop: Option<Vec<VertexId>> = cell_loop.into_iter().collect();
                if let Some(f) = cell_loop.and_then(|l| mesh.add_face(l, material)) {
                    faces.push(f);
                }
            }
        }
        faces
    }
}

/// Splices `run` (ordered from `a` to `b`) into `face` between the
/// adjacent corners `a` and `b`, in whichever direction the face walks
/// that edge.
fn insert_along_edge(mesh: &mut Mesh, face: FaceId, a: VertexId, b: VertexId, run: &[VertexId]) {
    let Ok(data) = mesh.face(face) else {
        return;
    };
    let loop_vertices = &data.vertices;
    let len = loop_vertices.len();
    let Some(k) = (0..len).find(|&k| {
        let (p, q) = (loop_vertices[k], loop_vertices[(k + 1) % len]);
        (p == a && q == b) || (p == b && q == a)
    }) else {
        return;
    };

    let mut spliced = Vec::with_capacity(len + run.len());
    spliced.extend_from_slice(&loop_vertices[..=k]);
    if loop_vertices[k] == a {
        spliced.extend_from_slice(run);
    } else {
        spliced.extend(run.iter().rev());
    }
    spliced.extend_from_slice(&loop_vertices[k + 1..]);
    mesh.replace_face_vertices(face, spliced);
}
