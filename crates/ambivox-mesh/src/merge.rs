use std::collections::BTreeMap;
use std::time::Instant;

use hashbrown::HashSet;

use ambivox_geom::{Triangle, Vec3};
use ambivox_voxel::ViewAxis;

use crate::assemble::check_volume;
use crate::error::MeshError;
use crate::face::Face;
use crate::mesh::Mesh;

// One unit square of the boundary, located by its lowest corner.
struct Cell {
    axis: ViewAxis,
    plane: i32,
    positive: bool,
    uv: [i32; 2],
}

#[inline]
fn plane_dims(dim: usize) -> (usize, usize) {
    ((dim + 1) % 3, (dim + 2) % 3)
}

fn grid_cell(tri: &Triangle) -> Option<Cell> {
    let n = tri.normal().to_grid();
    let dim = n.iter().position(|&c| c != 0)?;
    if n.iter().filter(|&&c| c != 0).count() != 1 || n[dim].abs() != 1 {
        return None;
    }
    let verts = tri.vertices.map(Vec3::to_grid);
    let plane = verts[0][dim];
    if verts.iter().any(|v| v[dim] != plane) {
        return None;
    }
    let (u_dim, v_dim) = plane_dims(dim);
    let u = verts.iter().map(|v| v[u_dim]).min()?;
    let v = verts.iter().map(|v| v[v_dim]).min()?;
    if verts.iter().any(|p| p[u_dim] - u > 1 || p[v_dim] - v > 1) {
        return None;
    }
    Some(Cell {
        axis: ViewAxis::ALL.into_iter().find(|a| a.plane_normal_dim() == dim)?,
        plane,
        positive: n[dim] > 0,
        uv: [u, v],
    })
}

// A merged run of cells on one plane, `w` by `h` cells from `uv`.
#[derive(Clone, Copy, Debug)]
struct Rect {
    face: Face,
    plane: i32,
    uv: [i32; 2],
    w: usize,
    h: usize,
}

impl Rect {
    fn corner(&self, du: usize, dv: usize) -> [i32; 3] {
        let dim = self.face.dim();
        let (u_dim, v_dim) = plane_dims(dim);
        let mut p = [0i32; 3];
        p[dim] = self.plane;
        p[u_dim] = self.uv[0] + du as i32;
        p[v_dim] = self.uv[1] + dv as i32;
        p
    }

    fn corners(&self) -> [[i32; 3]; 4] {
        [
            self.corner(0, 0),
            self.corner(self.w, 0),
            self.corner(self.w, self.h),
            self.corner(0, self.h),
        ]
    }

    // Boundary loop a -> b -> c -> d including every vertex of `vertices`
    // that lies inside one of the sides.
    fn boundary(&self, vertices: &HashSet<[i32; 3]>) -> Vec<[i32; 3]> {
        let (w, h) = (self.w, self.h);
        let mut out = Vec::with_capacity(4);
        let mut side = |from: [i32; 3], steps: usize, at: &dyn Fn(usize) -> [i32; 3]| {
            out.push(from);
            for i in 1..steps {
                let p = at(i);
                if vertices.contains(&p) {
                    out.push(p);
                }
            }
        };
        let [a, b, c, d] = self.corners();
        side(a, w, &|i| self.corner(i, 0));
        side(b, h, &|i| self.corner(w, i));
        side(c, w, &|i| self.corner(w - i, h));
        side(d, h, &|i| self.corner(0, h - i));
        out
    }
}

// Two triangles per plain rectangle; a fan from the center once its sides
// carry extra vertices, so that neighbors share every edge.
fn push_rect(out: &mut Vec<Triangle>, rect: &Rect, vertices: &HashSet<[i32; 3]>) {
    let [a, b, c, d] = rect.corners().map(Vec3::from_grid);
    let flip = Triangle::new(a, b, c).normal().dot(rect.face.normal()) < 0.0;
    let orient = |t: Triangle| if flip { t.flipped() } else { t };

    let ring = rect.boundary(vertices);
    if ring.len() == 4 {
        out.extend([Triangle::new(a, b, c), Triangle::new(a, c, d)].map(orient));
        return;
    }
    let center = (a + c) * 0.5;
    for (i, p) in ring.iter().enumerate() {
        let q = ring[(i + 1) % ring.len()];
        out.push(orient(Triangle::new(center, Vec3::from_grid(*p), Vec3::from_grid(q))));
    }
}

// Greedy rectangles over one plane: grow along u, then extend whole rows along v.
fn emit_plane(out: &mut Vec<Rect>, face: Face, plane: i32, cells: &mut Vec<[i32; 2]>) {
    cells.sort_unstable();
    cells.dedup();
    let Some(u0) = cells.iter().map(|c| c[0]).min() else {
        return;
    };
    let v0 = cells.iter().map(|c| c[1]).min().unwrap_or_default();
    let width = cells.iter().map(|c| (c[0] - u0) as usize).max().unwrap_or(0) + 1;
    let height = cells.iter().map(|c| (c[1] - v0) as usize).max().unwrap_or(0) + 1;

    let idx2d = |u: usize, v: usize| v * width + u;
    let mut filled = vec![false; width * height];
    for c in cells.iter() {
        filled[idx2d((c[0] - u0) as usize, (c[1] - v0) as usize)] = true;
    }
    let mut visited = vec![false; width * height];

    for v in 0..height {
        let mut u = 0usize;
        while u < width {
            let vi = idx2d(u, v);
            if visited[vi] || !filled[vi] {
                u += 1;
                continue;
            }
            let mut run_w = 1usize;
            while u + run_w < width {
                let ni = idx2d(u + run_w, v);
                if visited[ni] || !filled[ni] {
                    break;
                }
                run_w += 1;
            }
            let mut run_h = 1usize;
            'outer: while v + run_h < height {
                for uu in u..(u + run_w) {
                    let ni = idx2d(uu, v + run_h);
                    if visited[ni] || !filled[ni] {
                        break 'outer;
                    }
                }
                run_h += 1;
            }
            for dv in 0..run_h {
                for du in 0..run_w {
                    visited[idx2d(u + du, v + dv)] = true;
                }
            }
            out.push(Rect {
                face,
                plane,
                uv: [u0 + u as i32, v0 + v as i32],
                w: run_w,
                h: run_h,
            });
            u += run_w;
        }
    }
}

/// Replaces runs of coplanar unit squares with maximal rectangles.
///
/// Expects a voxel boundary mesh (every triangle half of a unit square on
/// an integer plane). A rectangle whose sides pass through corners of other
/// rectangles is fanned from its center so no T-junction is left; the result
/// is checked for closure and volume.
pub fn merge_coplanar(mesh: &Mesh) -> Result<Mesh, MeshError> {
    let t0 = Instant::now();
    let mut planes: BTreeMap<(usize, i32, bool), Vec<[i32; 2]>> = BTreeMap::new();
    for (index, tri) in mesh.triangles().iter().enumerate() {
        let cell = grid_cell(tri).ok_or(MeshError::NotGridAligned { index })?;
        planes
            .entry((cell.axis.index(), cell.plane, cell.positive))
            .or_default()
            .push(cell.uv);
    }

    let mut rects: Vec<Vec<Rect>> = vec![Vec::new(); ViewAxis::ALL.len()];
    for ((axis_index, plane, positive), mut cells) in planes {
        let Some(axis) = ViewAxis::from_index(axis_index) else {
            continue;
        };
        let face = Face::from_dim(axis.plane_normal_dim(), positive);
        emit_plane(&mut rects[axis_index], face, plane, &mut cells);
    }
    let vertices: HashSet<[i32; 3]> = rects.iter().flatten().flat_map(Rect::corners).collect();

    let mut fanned = 0;
    let parts: Vec<Vec<Triangle>> = rects
        .iter()
        .map(|axis_rects| {
            let mut tris = Vec::with_capacity(axis_rects.len() * 2);
            for rect in axis_rects {
                let before = tris.len();
                push_rect(&mut tris, rect, &vertices);
                fanned += usize::from(tris.len() - before > 2);
            }
            tris
        })
        .collect();

    let merged = Mesh::from_axis_parts(parts).with_name(mesh.name());
    merged.check_closed()?;
    check_volume(&merged, mesh.signed_volume())?;
    let ms: u32 = t0.elapsed().as_millis().min(u128::from(u32::MAX)) as u32;
    log::info!(
        target: "perf",
        "ms={} mesh_merge_coplanar tris_in={} rects={} fanned={} tris_out={}",
        ms,
        mesh.len(),
        rects.iter().map(Vec::len).sum::<usize>(),
        fanned,
        merged.len()
    );
    Ok(merged)
}
