use tracery::render::StyleTarget;
use tracery::{HeadlessError, HeadlessRenderer};

const HOME: &str = include_str!("../../../fixtures/snapshots/home.json");

#[test]
fn renders_snapshot_to_svg_overlay() {
    let svg = HeadlessRenderer::new()
        .render_svg_snapshot_json(HOME)
        .expect("render ok");
    assert_eq!(svg.matches("<path ").count(), 6);
    assert!(svg.contains(r#"d="M 40 0 L 40 4475 L 945.25341796875 4475""#));
}

#[test]
fn resolves_snapshot_geometry_in_registry_order() {
    let geometries = HeadlessRenderer::new()
        .resolve_snapshot_json(HOME)
        .expect("resolve ok");
    let ids: Vec<_> = geometries.iter().map(|g| g.section_id.as_str()).collect();
    assert_eq!(
        ids,
        [
            "statistics",
            "about",
            "services",
            "border-services",
            "faq",
            "contact-form"
        ]
    );
    assert!(matches!(
        geometries[0].target,
        StyleTarget::CrossThrough { grid: Some(_) }
    ));
}

#[test]
fn config_overrides_change_routing() {
    let renderer = HeadlessRenderer::new()
        .with_config_json(r#"{"center_turn_offset": 0}"#)
        .unwrap();
    let overlay = renderer.layout_snapshot_json(HOME).unwrap();
    assert_eq!(
        overlay.path("about").unwrap().d,
        "M 64 0 L 64 1384 L 1028 1384 L 1028 2235.5 L 1060 2235.5"
    );
}

#[test]
fn invalid_inputs_surface_as_errors() {
    let renderer = HeadlessRenderer::new();
    assert!(matches!(
        renderer.layout_snapshot_json("{not json"),
        Err(HeadlessError::Render(_))
    ));
    assert!(matches!(
        HeadlessRenderer::new().with_registry_json(r#"[{"section_id": "a", "anchor_x": 1, "style": "sideways"}]"#),
        Err(HeadlessError::Core(_))
    ));
}
