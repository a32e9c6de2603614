use ambivox_voxel::{Carver, SilhouetteMask, ViewAxis, Views, VoxelGrid, extrude, project};
use proptest::prelude::*;

fn arb_mask(size: usize) -> impl Strategy<Value = SilhouetteMask> {
    proptest::collection::vec(any::<bool>(), size * size).prop_map(move |cells| {
        SilhouetteMask::from_fn(size, |row, col| cells[row * size + col])
    })
}

// Upside-down copy of `mask`.
fn flipped_rows(mask: &SilhouetteMask) -> SilhouetteMask {
    let n = mask.size();
    SilhouetteMask::from_fn(n, |row, col| mask.get(n - 1 - row, col))
}

fn arb_views() -> impl Strategy<Value = (usize, [Option<SilhouetteMask>; 3])> {
    (1usize..7).prop_flat_map(|size| {
        (
            Just(size),
            proptest::option::of(arb_mask(size)),
            proptest::option::of(arb_mask(size)),
            proptest::option::of(arb_mask(size)),
        )
            .prop_map(|(size, a, b, c)| (size, [a, b, c]))
    })
}

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

fn views_of(masks: &[Option<SilhouetteMask>; 3]) -> Views {
    let mut views = Views::new();
    for axis in ViewAxis::ALL {
        views.set(axis, masks[axis.index()].clone());
    }
    views
}

fn is_submask(a: &SilhouetteMask, b: &SilhouetteMask) -> bool {
    (0..a.size()).all(|r| (0..a.size()).all(|c| !a.get(r, c) || b.get(r, c)))
}

proptest! {
    // Adding a constraining view never adds voxels.
    #[test]
    fn adding_a_view_only_removes_voxels(
        (size, masks) in arb_views(),
        mirror in any::<bool>(),
    ) {
        let carver = Carver::new(size).unwrap().with_mirror(mirror);
        let all = carver.build(&views_of(&masks)).unwrap().solid;
        for axis in ViewAxis::ALL {
            let mut fewer = masks.clone();
            fewer[axis.index()] = None;
            let less = carver.build(&views_of(&fewer)).unwrap().solid;
            prop_assert!(all.voxels().is_subset_of(less.voxels()));
        }
        for v in all.volumes() {
            prop_assert!(all.voxels().is_subset_of(&v.volume));
        }
    }

    // A single view is reproduced exactly by its projection.
    #[test]
    fn single_view_projection_is_exact(
        (size, masks) in arb_views(),
        mirror in any::<bool>(),
    ) {
        let carver = Carver::new(size).unwrap().with_mirror(mirror);
        for axis in ViewAxis::ALL {
            let Some(mask) = masks[axis.index()].clone() else { continue };
            let solid = carver.build(&Views::new().with(axis, mask.clone())).unwrap().solid;
            prop_assert_eq!(solid.proof_view(axis), mask);
        }
    }

    // With several views, each projection stays inside its mask.
    #[test]
    fn projection_never_exceeds_mask(
        (size, masks) in arb_views(),
        mirror in any::<bool>(),
    ) {
        let solid = Carver::new(size).unwrap().with_mirror(mirror).build(&views_of(&masks)).unwrap().solid;
        for axis in ViewAxis::ALL {
            if let Some(mask) = &masks[axis.index()] {
                prop_assert!(is_submask(&solid.proof_view(axis), mask));
            }
        }
    }

    // Carving the silhouettes of any solid contains that solid and reproduces
    // every silhouette exactly.
    #[test]
    fn carving_consistent_silhouettes_is_exact(grid in arb_grid(), mirror in any::<bool>()) {
        let size = grid.size();
        let masks = ViewAxis::ALL.map(|axis| project(&grid, axis, mirror));
        let solid = Carver::new(size)
            .unwrap()
            .with_mirror(mirror)
            .build_masks(Some(&masks[0]), Some(&masks[1]), Some(&masks[2]))
            .unwrap()
            .solid;
        prop_assert!(grid.is_subset_of(solid.voxels()));
        for axis in ViewAxis::ALL {
            prop_assert_eq!(&solid.proof_view(axis), &masks[axis.index()]);
        }
    }

    // Mirroring the Top view reflects its volume across the middle y plane,
    // and mirroring twice is the identity.
    #[test]
    fn mirror_reflects_top_volume(size in 1usize..7, seed in any::<u64>()) {
        let mask = SilhouetteMask::from_fn(size, |r, c| (seed >> ((r * 7 + c * 3) % 64)) & 1 == 1);
        let direct = extrude(size, Some(&mask), ViewAxis::Top, false).unwrap();
        let mirrored = extrude(size, Some(&mask), ViewAxis::Top, true).unwrap();
        for x in 0..size {
            for y in 0..size {
                for z in 0..size {
                    prop_assert_eq!(direct.get(x, y, z), mirrored.get(x, size - 1 - y, z));
                }
            }
        }
        // Mirrored embedding of a flipped mask equals the direct embedding.
        prop_assert_eq!(extrude(size, Some(&flipped_rows(&mask)), ViewAxis::Top, true).unwrap(), direct);
        // Other axes ignore the flag.
        for axis in [ViewAxis::Left, ViewAxis::Right] {
            prop_assert_eq!(
                extrude(size, Some(&mask), axis, true).unwrap(),
                extrude(size, Some(&mask), axis, false).unwrap()
            );
        }
    }
}

fn center_dot(size: usize) -> SilhouetteMask {
    let mut m = SilhouetteMask::new(size);
    m.set(size / 2, size / 2, true);
    m
}

#[test]
fn three_center_dots_odd_size_meet_in_one_voxel() {
    let m = center_dot(5);
    let solid = Carver::new(5)
        .unwrap()
        .build_masks(Some(&m), Some(&m), Some(&m))
        .unwrap()
        .solid;
    assert_eq!(solid.voxel_count(), 1);
    assert!(solid.voxels().get(2, 2, 2));
}

#[test]
fn three_center_dots_even_size_do_not_meet() {
    // Row 2 of 4 maps to height 1 while column 2 maps to 2, so Top and Right
    // disagree on y.
    let m = center_dot(4);
    let solid = Carver::new(4)
        .unwrap()
        .build_masks(Some(&m), Some(&m), Some(&m))
        .unwrap()
        .solid;
    assert!(solid.voxel_count() <= 1);
    assert!(solid.is_empty());
}

#[test]
fn centered_square_top_view_is_a_prism() {
    let mask = SilhouetteMask::from_fn(4, |r, c| (1..3).contains(&r) && (1..3).contains(&c));
    let solid = Carver::new(4)
        .unwrap()
        .build(&Views::new().with(ViewAxis::Top, mask))
        .unwrap()
        .solid;
    assert_eq!(solid.voxel_count(), 2 * 2 * 4);
    for p in solid.voxels().iter_occupied() {
        assert!((1..3).contains(&p[0]) && (1..3).contains(&p[1]));
    }
}

#[test]
fn two_full_views_fill_the_cube() {
    let full = SilhouetteMask::full(6);
    let solid = Carver::new(6)
        .unwrap()
        .build_masks(Some(&full), None, Some(&full))
        .unwrap()
        .solid;
    assert_eq!(solid.voxel_count(), 216);
}
