use crate::model::OverlayLayout;
use std::fmt::Write as _;
use tracery_core::EngineConfig;

#[derive(Debug, Clone, Default)]
pub struct SvgRenderOptions {
    /// Root `<svg id>`; defaults to the configured overlay id.
    pub overlay_id: Option<String>,
}

/// Serializes an overlay as a standalone `<svg>` element.
///
/// The element is absolutely positioned at the document origin, sized to the full document and
/// ignores pointer events. Hidden overlays render as an empty `display: none` element.
pub fn render_overlay_svg(
    overlay: &OverlayLayout,
    config: &EngineConfig,
    options: &SvgRenderOptions,
) -> String {
    let id = options.overlay_id.as_deref().unwrap_or(&config.overlay_id);
    let width = fmt(overlay.width);
    let height = fmt(overlay.height);
    let display = if overlay.visible { "block" } else { "none" };

    let mut out = String::new();
    let _ = write!(
        &mut out,
        r#"<svg id="{id}" xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}" preserveAspectRatio="none" aria-hidden="true" style="position: absolute; left: 0; top: 0; z-index: 1; pointer-events: none; display: {display};">"#,
        id = escape_xml(id),
    );

    if overlay.visible {
        let stroke_width = fmt(config.stroke_width);
        let opacity = fmt(config.opacity);
        for (i, p) in overlay.paths.iter().enumerate() {
            let _ = write!(
                &mut out,
                r#"<path id="line-{i}" data-section="{section}" d="{d}" stroke="{stroke}" stroke-width="{stroke_width}" fill="none" stroke-linecap="round" opacity="{opacity}"/>"#,
                section = escape_xml(&p.section_id),
                d = escape_xml(&p.d),
                stroke = escape_xml(&p.color),
            );
        }
    }

    out.push_str("</svg>\n");
    out
}

fn fmt(v: f64) -> String {
    let mut out = String::new();
    crate::path::push_number(&mut out, &mut ryu_js::Buffer::new(), v);
    out
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ConnectorPath;

    fn overlay(visible: bool) -> OverlayLayout {
        OverlayLayout {
            width: 2056.0,
            height: 6706.0,
            visible,
            paths: vec![ConnectorPath {
                section_id: "faq".to_string(),
                color: "#F2CA50".to_string(),
                d: "M 40 0 L 40 2040 L 300 2040".to_string(),
                highlight: vec!["faq-heading".to_string()],
            }],
            skipped: Vec::new(),
        }
    }

    #[test]
    fn writes_one_path_per_connection() {
        let svg = render_overlay_svg(
            &overlay(true),
            &EngineConfig::default(),
            &SvgRenderOptions::default(),
        );
        assert!(svg.starts_with(r#"<svg id="decorative-lines""#), "{svg}");
        assert!(svg.contains(r#"viewBox="0 0 2056 6706""#), "{svg}");
        assert!(svg.contains("pointer-events: none"), "{svg}");
        assert!(
            svg.contains(r##"<path id="line-0" data-section="faq" d="M 40 0 L 40 2040 L 300 2040" stroke="#F2CA50" stroke-width="2" fill="none" stroke-linecap="round" opacity="0.6"/>"##),
            "{svg}"
        );
    }

    #[test]
    fn hidden_overlay_has_no_paths() {
        let svg = render_overlay_svg(
            &overlay(false),
            &EngineConfig::default(),
            &SvgRenderOptions {
                overlay_id: Some("lines".to_string()),
            },
        );
        assert!(svg.starts_with(r#"<svg id="lines""#), "{svg}");
        assert!(svg.contains("display: none"), "{svg}");
        assert!(!svg.contains("<path"), "{svg}");
    }
}
