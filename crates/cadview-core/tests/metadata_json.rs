mod common;

use cadview_core::pipeline::{hidden_line, orthographic};
use cadview_core::{PipelineConfig, ViewMetadata};
use common::{cube_mesh, FakeEdge, FakeKernel};

#[test]
fn mesh_form_survives_json() {
    let out = orthographic::from_mesh(&cube_mesh(), &PipelineConfig::default()).unwrap();
    let top = out.views.get("top").unwrap();

    let json = serde_json::to_value(top).unwrap();
    assert!(json.get("projected_vertices").is_some());
    assert!(json.get("edges").is_some());
    assert!(json.get("segments").is_none());

    let back: ViewMetadata = serde_json::from_value(json).unwrap();
    assert_eq!(top, &back);
}

#[test]
fn segment_form_survives_json() {
    let kernel = FakeKernel {
        visible: vec![FakeEdge::line([0.0, 0.0, 0.0], [2.0, 1.0, 3.0])],
        ..FakeKernel::default()
    };
    let out = hidden_line::generate(&kernel, &(), &PipelineConfig::default()).unwrap();
    let z = out.views.get("z").unwrap();

    let text = serde_json::to_string(z).unwrap();
    let back: ViewMetadata = serde_json::from_str(&text).unwrap();
    assert!(matches!(back, ViewMetadata::Segments(_)));
    assert_eq!(z, &back);
}

#[test]
fn config_sections_default_when_missing() {
    let cfg: PipelineConfig = serde_json::from_str(r#"{ "outline_samples": 10 }"#).unwrap();
    assert_eq!(10, cfg.outline_samples);
    assert_eq!(PipelineConfig::default().curve_samples, cfg.curve_samples);
    assert_eq!(3, cfg.outline_directions.len());
}
