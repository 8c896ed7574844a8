mod common;

use cadview_core::geom::{Plane, Vec2};
use cadview_core::kernel::CadKernel;
use cadview_core::model::Mesh;
use cadview_core::pipeline::section;
use cadview_core::{Generator, Pipeline, PipelineConfig, ViewMetadata};
use cadview_mesh::frame::ViewFrame;
use cadview_mesh::{EdgeKind, LineEdge, MeshKernel, MeshShape};
use common::cube_mesh;
use nalgebra::{Point3, Vector3};

fn cube() -> (MeshKernel, MeshShape) {
    let kernel = MeshKernel::default();
    let shape = kernel.shape_from_mesh(cube_mesh()).unwrap();
    (kernel, shape)
}

#[test]
fn cube_edges_split_into_sharp_and_smooth() {
    let (_, shape) = cube();
    let count = |kind: EdgeKind| shape.edges().iter().filter(|e| e.kind == kind).count();
    assert_eq!(12, count(EdgeKind::Sharp));
    assert_eq!(6, count(EdgeKind::Smooth));
    assert_eq!(12, shape.drawing_edges(&Vector3::z()).count());
}

#[test]
fn open_mesh_has_boundary_edges() {
    let mesh = Mesh::new(
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ],
        vec![[0, 1, 2]],
    );
    let shape = MeshShape::new(mesh, 30.0).unwrap();
    assert!(shape.edges().iter().all(|e| e.kind == EdgeKind::Boundary));
}

#[test]
fn invalid_indices_are_rejected() {
    let mesh = Mesh::new(vec![Point3::origin()], vec![[0, 1, 2]]);
    assert!(MeshShape::new(mesh, 30.0).is_err());
}

#[test]
fn view_frame_is_orthonormal() {
    for d in [
        Vector3::z(),
        -Vector3::z(),
        Vector3::x(),
        Vector3::new(1.0, 1.0, 1.0),
    ] {
        let f = ViewFrame::looking_along(d).unwrap();
        assert!(f.right.dot(&f.up).abs() < 1e-12);
        assert!(f.right.dot(&f.direction).abs() < 1e-12);
        assert!((f.right.norm() - 1.0).abs() < 1e-12);
        assert!((f.up.norm() - 1.0).abs() < 1e-12);
    }
    assert!(ViewFrame::looking_along(Vector3::zeros()).is_none());
}

#[test]
fn top_view_outline_skips_vertical_edges() {
    let (kernel, shape) = cube();
    let edges = kernel.shape_view(&shape, Vector3::z()).unwrap();
    assert_eq!(8, edges.len());
    assert!(kernel.shape_view(&shape, Vector3::zeros()).is_err());
}

#[test]
fn hidden_lines_from_above_keep_only_top_face() {
    let (kernel, shape) = cube();
    let visible = kernel.visible_edges(&shape, Vector3::z()).unwrap();
    assert_eq!(4, visible.len());
    for e in &visible {
        assert_eq!(1.0, e.start.z);
        assert_eq!(1.0, e.end.z);
        assert!((e.length() - 1.0).abs() < 1e-12);
    }
}

#[test]
fn hidden_lines_from_the_side_keep_only_right_face() {
    let (kernel, shape) = cube();
    let visible = kernel.visible_edges(&shape, Vector3::x()).unwrap();
    assert_eq!(4, visible.len());
    assert!(visible.iter().all(|e| e.start.x == 1.0 && e.end.x == 1.0));
}

#[test]
fn section_through_cube_middle() {
    let (kernel, shape) = cube();
    let plane = Plane::new(Point3::new(0.5, 0.5, 0.5), Vector3::z());
    let cut = kernel.section(&shape, &plane).unwrap();
    // two triangles on each of the four side faces
    assert_eq!(8, cut.len());
    assert!(cut
        .iter()
        .all(|e| (e.start.z - 0.5).abs() < 1e-12 && (e.end.z - 0.5).abs() < 1e-12));

    let outside = Plane::new(Point3::new(0.0, 0.0, 5.0), Vector3::z());
    assert!(kernel.section(&shape, &outside).unwrap().is_empty());
}

#[test]
fn section_views_lie_on_the_cube_outline() {
    let (kernel, shape) = cube();
    let out = section::generate(&kernel, &shape, &PipelineConfig::default()).unwrap();
    assert_eq!(vec!["x", "y", "z"], out.views.names().collect::<Vec<_>>());

    for view in out.views.iter() {
        let ViewMetadata::Segments(meta) = &view.metadata else {
            panic!("section view {} is not segment-form", view.name);
        };
        assert_eq!(0.0, meta.bounds.min_x);
        assert_eq!(1.0, meta.bounds.max_y);
        let on_outline = |p: &Vec2| {
            [p.x, p.y]
                .iter()
                .any(|c| c.abs() < 1e-9 || (c - 1.0).abs() < 1e-9)
        };
        assert!(meta
            .segments
            .iter()
            .all(|s| on_outline(&s.world_start) && on_outline(&s.world_end)));
    }
}

#[test]
fn sampling_rejects_degenerate_requests() {
    let kernel = MeshKernel::default();
    let edge = LineEdge::new(Point3::origin(), Point3::new(2.0, 0.0, 0.0));
    let pts = kernel.sample_edge(&edge, 5).unwrap();
    assert_eq!(5, pts.len());
    assert_eq!(Point3::new(0.5, 0.0, 0.0), pts[1]);
    assert!(kernel.sample_edge(&edge, 1).is_err());

    let point = LineEdge::new(Point3::origin(), Point3::origin());
    assert!(kernel.sample_edge(&point, 5).is_err());
}

#[test]
fn every_pipeline_runs_on_a_cube() {
    let (kernel, shape) = cube();
    let generation =
        Generator::new(PipelineConfig::default()).generate(&kernel, &shape, &Pipeline::ALL);

    let ok: Vec<Pipeline> = generation.succeeded().map(|(p, _)| p).collect();
    assert_eq!(Pipeline::ALL.to_vec(), ok);
    assert!(generation.report.warnings.is_empty());
    assert_eq!(0, generation.report.diagnostics.sampling_fallbacks);

    for (_, out) in generation.succeeded() {
        for view in out.views.iter() {
            view.metadata.check_invariants(1e-9).unwrap();
        }
    }
}

#[test]
fn non_positive_deflection_fails_mesh_pipelines_only() {
    let (kernel, shape) = cube();
    let cfg = PipelineConfig {
        linear_deflection: 0.0,
        ..PipelineConfig::default()
    };
    let generation = Generator::new(cfg).generate(
        &kernel,
        &shape,
        &[Pipeline::Orthographic, Pipeline::Outline],
    );
    let ok: Vec<Pipeline> = generation.succeeded().map(|(p, _)| p).collect();
    assert_eq!(vec![Pipeline::Outline], ok);
    assert_eq!("pipeline_failed", generation.report.warnings[0].code);
}
