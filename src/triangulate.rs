//! Planar triangulation of facet sample grids.
//!
//! A thin wrapper around `delaunator`: point set in, triangle index triples
//! out. Collinear or too-small inputs come back empty, which callers accept as
//! an invisible face.

use delaunator::Point;

pub fn triangulate(points: &[[f64; 2]]) -> Vec<[u32; 3]> {
    if points.len() < 3 {
        return Vec::new();
    }
    let points: Vec<Point> = points.iter().map(|&[x, y]| Point { x, y }).collect();
    delaunator::triangulate(&points)
        .triangles
        .chunks_exact(3)
        .map(|t| [t[0] as u32, t[1] as u32, t[2] as u32])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_square_is_two_triangles() {
        let triangles = triangulate(&[[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]]);
        assert_eq!(triangles.len(), 2);
        assert!(triangles.iter().flatten().all(|&i| i < 4));
    }

    #[test]
    fn collinear_points_yield_nothing() {
        let triangles = triangulate(&[[0.0, 0.0], [0.0, 1.0], [0.0, 2.0], [0.0, 3.0]]);
        assert!(triangles.is_empty());
    }

    #[test]
    fn fewer_than_three_points_yield_nothing() {
        assert!(triangulate(&[]).is_empty());
        assert!(triangulate(&[[0.0, 0.0], [1.0, 1.0]]).is_empty());
    }
}
