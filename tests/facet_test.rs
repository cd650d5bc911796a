use after_dark::{
    config::POINTS_PER_UNIT,
    data_structures::mesh::Topology,
    facet::{BoxDims, Face, build_face, build_facets, sample_face},
};

#[test]
fn every_face_of_a_unit_box_has_a_grid() {
    let dims = BoxDims::new(1.0, 1.0, 1.0);
    for face in Face::ALL {
        let grid = sample_face(dims, face, POINTS_PER_UNIT);
        assert!(grid.points.len() >= 4, "{:?} has {} points", face, grid.points.len());
        assert_eq!(grid.points.len(), grid.plane.len());
    }
}

#[test]
fn grid_density_follows_the_in_plane_extent() {
    let dims = BoxDims::new(21.0, 52.0, 11.0);
    let front = sample_face(dims, Face::Front, POINTS_PER_UNIT);
    assert_eq!((front.columns, front.rows), (7, 16));
    assert_eq!(front.points.len(), 8 * 17);

    let side = sample_face(dims, Face::Left, POINTS_PER_UNIT);
    assert_eq!((side.columns, side.rows), (4, 16));

    let top = sample_face(dims, Face::Top, POINTS_PER_UNIT);
    assert_eq!((top.columns, top.rows), (7, 4));
}

#[test]
fn samples_lie_on_the_face_plane_within_the_box() {
    let dims = BoxDims::new(12.0, 33.0, 17.0);
    let [hw, hh, hd] = dims.half_extents();
    for face in Face::ALL {
        let (axis, coord) = face.plane(dims);
        for p in sample_face(dims, face, POINTS_PER_UNIT).points {
            assert!((p[axis] - coord).abs() < 1e-4, "{:?}: {:?}", face, p);
            assert!(p[0].abs() <= hw + 1e-4);
            assert!(p[1].abs() <= hh + 1e-4);
            assert!(p[2].abs() <= hd + 1e-4);
        }
    }
}

#[test]
fn triangulated_faces_index_their_own_samples() {
    let dims = BoxDims::new(7.5, 41.0, 13.0);
    for facet in build_facets(dims, POINTS_PER_UNIT) {
        let mesh = &facet.mesh;
        assert_eq!(mesh.topology, Topology::Triangles);
        assert!(!mesh.is_empty(), "{:?} is empty", facet.grid.face);
        assert_eq!(mesh.indices.len() % 3, 0);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.positions.len()));
        // The triangles tile the whole face.
        let (u, v) = facet.grid.face.in_plane(dims);
        let covered = area(&mesh.positions, &mesh.indices);
        assert!((covered - u * v).abs() < 1e-2 * u * v, "{:?}", facet.grid.face);
    }
}

fn area(positions: &[[f32; 3]], indices: &[u32]) -> f32 {
    indices
        .chunks_exact(3)
        .map(|t| {
            let [a, b, c] = [0, 1, 2].map(|k| positions[t[k] as usize]);
            let ab = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
            let ac = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
            let cross = [
                ab[1] * ac[2] - ab[2] * ac[1],
                ab[2] * ac[0] - ab[0] * ac[2],
                ab[0] * ac[1] - ab[1] * ac[0],
            ];
            0.5 * (cross[0] * cross[0] + cross[1] * cross[1] + cross[2] * cross[2]).sqrt()
        })
        .sum()
}

#[test]
fn degenerate_face_is_empty_not_an_error() {
    let flat = BoxDims::new(0.0, 30.0, 10.0);
    let front = build_face(flat, Face::Front, POINTS_PER_UNIT);
    assert_eq!(front.grid.columns, 0);
    assert!(front.mesh.is_empty());

    // The side faces do not depend on the width and stay visible.
    let side = build_face(flat, Face::Right, POINTS_PER_UNIT);
    assert!(!side.mesh.is_empty());
}
