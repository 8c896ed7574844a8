mod common;

use cadview_core::error::GeometryError;
use cadview_core::geom::{Vec2, ViewBounds};
use cadview_core::model::{Mesh, ViewMetadata};
use cadview_core::pipeline::{isometric, orthographic};
use cadview_core::PipelineConfig;
use common::{cube_mesh, FakeKernel};
use nalgebra::Point3;

fn mesh_form(meta: &ViewMetadata) -> &cadview_core::model::MeshViewMetadata {
    match meta {
        ViewMetadata::Mesh(m) => m,
        other => panic!("expected mesh form, got {other:?}"),
    }
}

#[test]
fn empty_mesh_is_rejected() {
    let mesh = Mesh::new(vec![Point3::new(0.0, 0.0, 0.0)], Vec::new());
    let err = orthographic::from_mesh(&mesh, &PipelineConfig::default()).unwrap_err();
    assert!(matches!(err, GeometryError::EmptyGeometry(_)), "{err}");

    let kernel = FakeKernel::default();
    let err = orthographic::generate(&kernel, &(), &PipelineConfig::default()).unwrap_err();
    assert!(err.is_empty_geometry());
}

#[test]
fn out_of_range_triangle_is_rejected() {
    let mesh = Mesh::new(vec![Point3::new(0.0, 0.0, 0.0)], vec![[0, 1, 2]]);
    let err = orthographic::from_mesh(&mesh, &PipelineConfig::default()).unwrap_err();
    assert!(matches!(err, GeometryError::InvalidMesh(_)));
}

#[test]
fn cube_top_view_spans_unit_square() {
    let out = orthographic::from_mesh(&cube_mesh(), &PipelineConfig::default()).unwrap();
    assert_eq!(
        vec!["top", "bottom", "left", "right"],
        out.views.names().collect::<Vec<_>>()
    );

    let top = mesh_form(out.views.get("top").unwrap());
    assert_eq!(ViewBounds::new(0.0, 1.0, 0.0, 1.0), top.bounds);

    let mut corners: Vec<(u64, u64)> = top
        .projected_vertices
        .iter()
        .map(|p| (p.x.to_bits(), p.y.to_bits()))
        .collect();
    corners.sort();
    corners.dedup();
    let mut expected: Vec<(u64, u64)> = [(0.0, 0.0), (0.0, 1.0), (1.0, 0.0), (1.0, 1.0)]
        .iter()
        .map(|&(x, y): &(f64, f64)| (x.to_bits(), y.to_bits()))
        .collect();
    expected.sort();
    assert_eq!(expected, corners);
}

#[test]
fn triangle_edges_share_vertex_coordinates() {
    let mesh = cube_mesh();
    let out = orthographic::from_mesh(&mesh, &PipelineConfig::default()).unwrap();
    for view in out.views.iter() {
        let m = mesh_form(&view.metadata);
        assert_eq!(mesh.vertices.len(), m.projected_vertices.len());
        assert_eq!(mesh.triangles.len() * 3, m.edges.len());
        view.metadata.check_invariants(1e-9).unwrap();

        // Every segment endpoint is exactly the shared vertex entry.
        let segs = view.metadata.segments_2d();
        for (seg, [i, j]) in segs.iter().zip(&m.edges) {
            let a = m.projected_vertices[*i as usize];
            let b = m.projected_vertices[*j as usize];
            assert_eq!(a.x.to_bits(), seg.p0.x.to_bits());
            assert_eq!(a.y.to_bits(), seg.p0.y.to_bits());
            assert_eq!(b.x.to_bits(), seg.p1.x.to_bits());
            assert_eq!(b.y.to_bits(), seg.p1.y.to_bits());
        }
    }
}

#[test]
fn inverted_views_mirror_coordinates() {
    let mesh = Mesh::new(
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(0.0, 4.0, 8.0),
        ],
        vec![[0, 1, 2]],
    );
    let out = orthographic::from_mesh(&mesh, &PipelineConfig::default()).unwrap();

    let bottom = mesh_form(out.views.get("bottom").unwrap());
    assert_eq!(ViewBounds::new(0.0, 2.0, -4.0, 0.0), bottom.bounds);
    assert_eq!(Vec2::new(0.0, 0.0), bottom.projected_vertices[2]);

    let left = mesh_form(out.views.get("left").unwrap());
    assert_eq!(ViewBounds::new(-8.0, 0.0, 0.0, 4.0), left.bounds);
    assert_eq!(Vec2::new(0.0, 1.0), left.projected_vertices[2]);

    let right = mesh_form(out.views.get("right").unwrap());
    assert_eq!(Vec2::new(1.0, 1.0), right.projected_vertices[2]);
}

#[test]
fn shared_edges_are_kept_unless_dedup_requested() {
    let mesh = cube_mesh();
    let cfg = PipelineConfig::default();
    let out = orthographic::from_mesh(&mesh, &cfg).unwrap();
    assert_eq!(36, out.views.get("top").unwrap().segment_count());

    let cfg = PipelineConfig {
        dedup_triangle_edges: true,
        ..PipelineConfig::default()
    };
    let out = orthographic::from_mesh(&mesh, &cfg).unwrap();
    // 12 cube edges + 6 face diagonals
    assert_eq!(18, out.views.get("top").unwrap().segment_count());
}

#[test]
fn isometric_mesh_view_uses_fixed_basis() {
    let kernel = FakeKernel {
        mesh: cube_mesh(),
        ..FakeKernel::default()
    };
    let out = isometric::tessellated(&kernel, &(), &PipelineConfig::default()).unwrap();
    assert_eq!(vec!["isometric_matplotlib"], out.views.names().collect::<Vec<_>>());

    let m = mesh_form(out.views.get("isometric_matplotlib").unwrap());
    // x spans (1,-1,0)/√2 over the cube: [-1/√2, 1/√2]
    let s2 = 2f64.sqrt();
    assert!((m.bounds.min_x + 1.0 / s2).abs() < 1e-12);
    assert!((m.bounds.max_x - 1.0 / s2).abs() < 1e-12);
    // y spans (1,1,-2)/√6: [-2/√6, 2/√6]
    let s6 = 6f64.sqrt();
    assert!((m.bounds.min_y + 2.0 / s6).abs() < 1e-12);
    assert!((m.bounds.max_y - 2.0 / s6).abs() < 1e-12);
    out.views
        .get("isometric_matplotlib")
        .unwrap()
        .check_invariants(1e-9)
        .unwrap();
}
