use ambivox_mesh::{Face, Mesh, MeshError, assemble_voxels, check_closed, merge_coplanar};
use ambivox_voxel::{ViewAxis, VoxelGrid};
use proptest::prelude::*;

fn arb_grid() -> impl Strategy<Value = VoxelGrid> {
    (1usize..7).prop_flat_map(|size| {
        proptest::collection::vec(any::<bool>(), size * size * size).prop_map(move |cells| {
            let mut g = VoxelGrid::new(size);
            for (i, on) in cells.into_iter().enumerate() {
                if on {
                    g.set_at(g.coord(i), true);
                }
            }
            g
        })
    })
}

fn arb_box() -> impl Strategy<Value = VoxelGrid> {
    (2usize..9).prop_flat_map(|size| {
        let span = move || (0..size).prop_flat_map(move |lo| (Just(lo), lo + 1..=size));
        (Just(size), span(), span(), span()).prop_map(|(size, (x0, x1), (y0, y1), (z0, z1))| {
            let mut g = VoxelGrid::new(size);
            for x in x0..x1 {
                for y in y0..y1 {
                    for z in z0..z1 {
                        g.set(x, y, z, true);
                    }
                }
            }
            g
        })
    })
}

// Voxel on the outer side of a boundary triangle must be empty and the one
// on the inner side occupied.
fn faces_separate_inside_from_outside(grid: &VoxelGrid, mesh: &Mesh) -> bool {
    mesh.triangles().iter().all(|t| {
        let n = t.unit_normal();
        let c = (t.vertices[0] + t.vertices[1] + t.vertices[2]) / 3.0;
        let inside = (c - n * 0.5).to_array().map(|v| v.floor() as i32);
        let outside = (c + n * 0.5).to_array().map(|v| v.floor() as i32);
        grid.get_i32(inside[0], inside[1], inside[2])
            && !grid.get_i32(outside[0], outside[1], outside[2])
    })
}

proptest! {
    #[test]
    fn random_solids_give_closed_meshes(grid in arb_grid()) {
        let mesh = assemble_voxels(&grid).unwrap();
        prop_assert!(mesh.check_closed().is_ok());
        prop_assert!((mesh.signed_volume() - grid.count() as f64).abs() < 1e-6);
        prop_assert!(faces_separate_inside_from_outside(&grid, &mesh));
    }

    #[test]
    fn every_triangle_is_axis_aligned_and_unit(grid in arb_grid()) {
        let mesh = assemble_voxels(&grid).unwrap();
        for axis in ViewAxis::ALL {
            let dim = axis.plane_normal_dim();
            for t in mesh.axis_triangles(axis).unwrap() {
                let n = t.normal();
                prop_assert_eq!(n.get(dim).abs(), 1.0);
                prop_assert_eq!(n.get((dim + 1) % 3), 0.0);
                prop_assert_eq!(n.get((dim + 2) % 3), 0.0);
            }
        }
    }

    #[test]
    fn assembly_is_deterministic(grid in arb_grid()) {
        prop_assert_eq!(assemble_voxels(&grid).unwrap(), assemble_voxels(&grid).unwrap());
    }

    #[test]
    fn boxes_are_two_manifold_and_merge_to_twelve(grid in arb_box()) {
        let mesh = assemble_voxels(&grid).unwrap();
        let stats = mesh.check_closed().unwrap();
        prop_assert_eq!(stats.non_manifold, 0);
        let merged = merge_coplanar(&mesh).unwrap();
        prop_assert_eq!(merged.len(), 12);
        prop_assert!(merged.check_closed().is_ok());
        prop_assert!((merged.signed_volume() - grid.count() as f64).abs() < 1e-6);
    }

    #[test]
    fn merging_keeps_the_mesh_closed(grid in arb_grid()) {
        let mesh = assemble_voxels(&grid).unwrap();
        let merged = merge_coplanar(&mesh).unwrap();
        prop_assert!(merged.check_closed().is_ok());
        prop_assert!((merged.signed_volume() - mesh.signed_volume()).abs() < 1e-6);
        prop_assert!((merged.surface_area() - mesh.surface_area()).abs() < 1e-4);
        prop_assert_eq!(merged.bounds(), mesh.bounds());
    }
}

#[test]
fn diagonal_contact_is_closed_but_not_manifold() {
    let mut g = VoxelGrid::new(2);
    g.set(0, 0, 0, true);
    g.set(1, 1, 0, true);
    let mesh = assemble_voxels(&g).unwrap();
    assert_eq!(mesh.len(), 24);
    let stats = check_closed(mesh.triangles()).unwrap();
    assert_eq!(stats.non_manifold, 1);
}

#[test]
fn merged_l_shape_has_no_t_junctions() {
    let mut g = VoxelGrid::new(2);
    g.set(0, 0, 0, true);
    g.set(1, 0, 0, true);
    g.set(0, 1, 0, true);
    let mesh = assemble_voxels(&g).unwrap();
    let merged = merge_coplanar(&mesh).unwrap();
    let stats = check_closed(merged.triangles()).unwrap();
    assert_eq!(stats.non_manifold, 0);
    assert!((merged.signed_volume() - 3.0).abs() < 1e-6);
    // Both caps and the x = 0 side pass through the inner corner line and
    // are fanned: 2 * (5 + 2) + 6 + 5 * 2.
    assert_eq!(merged.len(), 30);
}

#[test]
fn truncated_mesh_reports_open_edges() {
    let mut g = VoxelGrid::new(3);
    g.set(1, 1, 1, true);
    let mut tris = assemble_voxels(&g).unwrap().into_triangles();
    tris.truncate(11);
    match check_closed(&tris) {
        Err(MeshError::OpenEdges { count, edges }) => {
            assert_eq!(count, 3);
            assert_eq!(edges.len(), 3);
        }
        other => panic!("expected open edges, got {other:?}"),
    }
}

#[test]
fn shared_face_is_removed_between_neighbors() {
    let mut g = VoxelGrid::new(3);
    g.set(0, 1, 1, true);
    g.set(1, 1, 1, true);
    let mesh = assemble_voxels(&g).unwrap();
    // 2 * 12 minus the two triangles on each side of x = 1
    assert_eq!(mesh.len(), 20);
    let right = mesh.axis_triangles(ViewAxis::Right).unwrap();
    assert!(right.iter().all(|t| t.vertices.iter().all(|v| v.x != 1.0)));
    for t in right {
        let face = Face::from_dim(0, t.vertices[0].x == 2.0);
        assert!(t.normal().dot(face.normal()) > 0.0);
    }
}
