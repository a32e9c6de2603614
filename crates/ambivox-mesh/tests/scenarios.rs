use ambivox_mesh::{assemble, merge_coplanar};
use ambivox_voxel::{Carver, SilhouetteMask, ViewAxis, Views};

fn centered_square(n: usize, side: usize) -> SilhouetteMask {
    let lo = (n - side) / 2;
    SilhouetteMask::from_fn(n, |row, col| (lo..lo + side).contains(&row) && (lo..lo + side).contains(&col))
}

#[test]
fn centered_square_prism_is_a_box() {
    for axis in ViewAxis::ALL {
        let views = Views::new().with(axis, centered_square(4, 2));
        let solid = Carver::new(4).unwrap().build(&views).unwrap().solid;
        assert_eq!(solid.voxel_count(), 16);

        let mesh = assemble(&solid).unwrap();
        assert!(mesh.check_closed().is_ok());
        let merged = merge_coplanar(&mesh).unwrap();
        assert_eq!(merged.len(), 12, "{axis}");
        assert!((merged.signed_volume() - 16.0).abs() < 1e-9);
        let extent = merged.bounds().unwrap().extent().to_array();
        let mut sorted = extent;
        sorted.sort_by(f32::total_cmp);
        assert_eq!(sorted, [2.0, 2.0, 4.0]);
    }
}

#[test]
fn unconstrained_views_give_the_outer_cube() {
    for n in [1usize, 2, 5, 16] {
        let full = SilhouetteMask::full(n);
        let solid = Carver::new(n)
            .unwrap()
            .build_masks(Some(&full), None, Some(&full))
            .unwrap()
            .solid;
        assert_eq!(solid.voxel_count(), n * n * n);
        let mesh = merge_coplanar(&assemble(&solid).unwrap()).unwrap();
        assert_eq!(mesh.len(), 12, "n={n}");
        assert!(mesh.check_closed().is_ok());
        let extent = mesh.bounds().unwrap().extent();
        assert_eq!(extent.to_array(), [n as f32; 3]);
    }
}

#[test]
fn center_dots_meet_in_one_voxel() {
    let dot = |n: usize| SilhouetteMask::from_fn(n, |r, c| r == n / 2 && c == n / 2);
    let odd = Carver::new(5)
        .unwrap()
        .build_masks(Some(&dot(5)), Some(&dot(5)), Some(&dot(5)))
        .unwrap()
        .solid;
    let mesh = assemble(&odd).unwrap();
    assert_eq!(odd.voxel_count(), 1);
    assert_eq!(mesh.len(), 12);
    let bounds = mesh.bounds().unwrap();
    assert_eq!(bounds.min.to_array(), [2.0, 2.0, 2.0]);

    let even = Carver::new(4)
        .unwrap()
        .build_masks(Some(&dot(4)), Some(&dot(4)), Some(&dot(4)))
        .unwrap()
        .solid;
    assert!(assemble(&even).unwrap().is_empty());
}

#[test]
fn unmerged_mesh_keeps_unit_faces() {
    let full = SilhouetteMask::full(3);
    let solid = Carver::new(3).unwrap().build_masks(Some(&full), Some(&full), Some(&full)).unwrap().solid;
    let mesh = assemble(&solid).unwrap().with_name("cube");
    // 6 faces of 3x3 unit squares, two triangles each
    assert_eq!(mesh.len(), 108);
    assert_eq!(mesh.name(), "cube");
    assert_eq!(merge_coplanar(&mesh).unwrap().name(), "cube");
}
