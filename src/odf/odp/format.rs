//! Part layout of an OpenDocument Presentation package.
use super::{chart, content, meta, style};
use crate::common::{Error, Result};
use crate::model::presentation::Presentation;
use crate::model::shape::ShapeKind;
use crate::odf::constants::{
    MANIFEST_ENTRY, MIMETYPE_ENTRY, ODF_CHART, ODF_PRESENTATION, TEXT_XML,
};
use crate::odf::manifest::Manifest;
use crate::package::content_types::ContentTypeRegistry;
use crate::package::format::{
    IndexContext, LinkKind, LinkTarget, PackageFormat, Reference, RenderContext,
};
use crate::package::part::{PackagePart, PartName, RenderedPart};
use crate::package::resource::{ResourceEntry, ResourceKind};
use crate::package::sink::PackageSink;

const CONTENT: &str = "/content.xml";
const STYLES: &str = "/styles.xml";
const META: &str = "/meta.xml";
const OBJECT_PREFIX: &str = "Object ";

/// The OpenDocument Presentation package format.
///
/// All slides live in `content.xml`. Links are hrefs: pictures point into
/// `Pictures/`, charts at their `Object N` sub-document and slide jumps at
/// `#pageN`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Odp;

impl Odp {
    pub fn new() -> Self {
        Self
    }

    fn render_charts(
        &self,
        ctx: &RenderContext<'_>,
        presentation: &Presentation,
        parts: &mut Vec<RenderedPart>,
    ) -> Result<()> {
        for (ordinal, shape) in presentation.chart_shapes() {
            let ShapeKind::Chart(chart) = &shape.kind else {
                continue;
            };
            let entry = ctx.resources.by_ordinal(ordinal).ok_or_else(|| {
                Error::InvalidState(format!("chart resource {ordinal} is not registered"))
            })?;
            let xml = chart::chart_object_xml(chart, &shape.frame)?;
            parts.push(RenderedPart::new(self.resource_part(entry)?, TEXT_XML, xml));
        }
        Ok(())
    }

    /// Manifest listing every declared part, with a directory entry ahead of
    /// each chart sub-document.
    fn manifest(content_types: &ContentTypeRegistry) -> Manifest {
        let mut manifest = Manifest::new(ODF_PRESENTATION);
        for (name, content_type) in content_types.snapshot().overrides {
            let path = name.trim_start_matches('/');
            if let Some((dir, _)) = path.split_once('/')
                && dir.starts_with(OBJECT_PREFIX)
            {
                manifest.add_directory(&format!("{dir}/"), ODF_CHART);
            }
            manifest.add_file(path, &content_type);
        }
        manifest
    }
}

impl PackageFormat for Odp {
    fn name(&self) -> &'static str {
        "odp"
    }

    fn slide_part(&self, _index: usize) -> Result<PartName> {
        PartName::new(CONTENT)
    }

    fn resource_part(&self, entry: &ResourceEntry) -> Result<PartName> {
        match entry.kind {
            ResourceKind::Chart => {
                PartName::new(format!("/{OBJECT_PREFIX}{}/content.xml", entry.ordinal))
            }
            _ => PartName::new(format!("/Pictures/{}", entry.filename)),
        }
    }

    fn index_package(&self, _ctx: &mut IndexContext<'_>, _presentation: &Presentation) -> Result<()> {
        Ok(())
    }

    fn index_slide(
        &self,
        _ctx: &mut IndexContext<'_>,
        _index: usize,
        _part: &PartName,
    ) -> Result<Option<Reference>> {
        Ok(None)
    }

    fn link(
        &self,
        ctx: &mut IndexContext<'_>,
        _owner: &PartName,
        kind: LinkKind,
        target: &LinkTarget,
    ) -> Result<Reference> {
        let href = match target {
            // Objects are referenced by their directory
            LinkTarget::Part(part) if kind == LinkKind::Chart => format!(".{}", part.base_uri()),
            LinkTarget::Part(part) => part.membername().to_string(),
            LinkTarget::External(url) => url.clone(),
            LinkTarget::Slide(index) => {
                if *index >= ctx.slide_count() {
                    return Err(Error::InvalidTarget(format!(
                        "slide {index} does not exist ({} slides)",
                        ctx.slide_count()
                    )));
                }
                format!("#{}", content::page_name(*index))
            }
        };
        Ok(Reference::Href(href))
    }

    fn render(&self, ctx: &RenderContext<'_>, presentation: &Presentation) -> Result<Vec<RenderedPart>> {
        let mut parts = vec![
            RenderedPart::new(
                PartName::new(CONTENT)?,
                TEXT_XML,
                content::content_xml(ctx, presentation)?,
            ),
            RenderedPart::new(
                PartName::new(STYLES)?,
                TEXT_XML,
                style::styles_xml(ctx.styles, presentation.slide_size)?,
            ),
            RenderedPart::new(
                PartName::new(META)?,
                TEXT_XML,
                meta::meta_xml(presentation, ctx.options)?,
            ),
        ];
        self.render_charts(ctx, presentation, &mut parts)?;
        Ok(parts)
    }

    fn declare_content_type(
        &self,
        registry: &mut ContentTypeRegistry,
        part: &PartName,
        content_type: &str,
    ) -> Result<()> {
        registry.add_override(part.as_str(), content_type)
    }

    fn seal(
        &self,
        content_types: &ContentTypeRegistry,
        parts: &[PackagePart],
        sink: &mut dyn PackageSink,
    ) -> Result<()> {
        sink.add_stored_part(MIMETYPE_ENTRY, ODF_PRESENTATION.as_bytes())?;
        for part in parts {
            sink.add_part(part.name.membername(), &part.data)?;
        }
        let manifest = Self::manifest(content_types).to_xml()?;
        sink.add_part(MANIFEST_ENTRY, manifest.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::chart::{Chart, ChartSeries, ChartType};
    use crate::model::presentation::Slide;
    use crate::model::shape::{Frame, Geometry, MediaSource, Shape};
    use crate::model::style::{Bullet, Color, Fill, Font, GraphicStyle};
    use crate::model::text::{Hyperlink, Paragraph, TextBody, TextRun};
    use crate::package::assembler::PackageAssembler;
    use crate::package::sink::MemorySink;
    use std::sync::Arc;

    const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
    const FRAME: Frame = Frame::new(0, 0, 914_400, 914_400);

    fn sample() -> Presentation {
        let logo: Arc<[u8]> = Arc::from(PNG);
        let chart = Chart::new(
            ChartType::Line,
            vec!["Q1".to_string(), "Q2".to_string()],
            vec![ChartSeries::new("Sales", vec![1.0, 2.0])],
        );

        let mut presentation = Presentation::new().with_title("Sample");
        presentation.add_slide(
            Slide::new(vec![
                Shape::text_box("Title", FRAME, TextBody::plain("Hello", Font::default())),
                Shape::picture("Logo", FRAME, MediaSource::Bytes(logo.clone()))
                    .with_hyperlink(Hyperlink::slide(1).with_tooltip("Next")),
                Shape::chart("Chart", FRAME, chart.clone()),
            ])
            .with_background(Fill::Gradient {
                start: Color::WHITE,
                end: Color::rgb(0x20, 0x40, 0x60),
                angle: 0,
            }),
        );

        let run = TextRun::new("docs", Font::default().bold(true))
            .with_hyperlink(Hyperlink::url("https://example.com/?a=1&b=2"));
        let mut ellipse = Shape::auto_shape(
            "Badge",
            FRAME,
            Geometry::Ellipse,
            GraphicStyle {
                fill: Fill::Solid(Color::rgb(0xFF, 0xC0, 0x00)),
                border: None,
            },
        );
        if let ShapeKind::AutoShape { body, .. } = &mut ellipse.kind {
            *body = Some(TextBody::new(vec![
                Paragraph::new(vec![run]).with_bullet(Bullet::char('•')),
            ]));
        }
        presentation.add_slide(Slide::new(vec![
            ellipse,
            Shape::picture("Logo again", FRAME, MediaSource::Bytes(logo)),
            Shape::chart("Chart again", FRAME, chart),
        ]));
        presentation
    }

    fn assemble(presentation: &mut Presentation) -> MemorySink {
        let mut sink = MemorySink::new();
        PackageAssembler::new(Odp::new())
            .assemble(presentation, &mut sink)
            .unwrap();
        sink
    }

    #[test]
    fn test_package_layout() {
        let sink = assemble(&mut sample());
        assert_eq!(
            sink.paths(),
            vec![
                "mimetype",
                "content.xml",
                "styles.xml",
                "meta.xml",
                "Object 2/content.xml",
                "Pictures/image1.png",
                "META-INF/manifest.xml",
            ]
        );
        assert!(sink.entries()[0].stored);
        assert_eq!(sink.get_str("mimetype"), Some(ODF_PRESENTATION));
        assert!(sink.paths().iter().all(|p| !p.ends_with(".rels")));
    }

    #[test]
    fn test_content_hrefs() {
        let sink = assemble(&mut sample());
        let content = sink.get_str("content.xml").unwrap();

        assert!(content.contains(
            r#"<draw:page draw:name="page1" draw:style-name="dp1" draw:master-page-name="Default">"#
        ));
        assert!(content.contains(
            r##"<draw:a xlink:type="simple" xlink:href="#page2" office:title="Next"><draw:frame draw:name="Logo" draw:id="id3""##
        ));
        assert_eq!(content.matches(r#"<draw:image xlink:href="Pictures/image1.png""#).count(), 2);
        assert_eq!(content.matches(r#"<draw:object xlink:href="./Object 2""#).count(), 2);
        assert!(content.contains(
            r#"<text:list text:style-name="L1"><text:list-item><text:p text:style-name="P1"><text:a xlink:type="simple" xlink:href="https://example.com/?a=1&amp;b=2"><text:span text:style-name="T2">docs</text:span></text:a>"#
        ));
        assert!(content.contains(r#"<draw:custom-shape draw:style-name="gr1""#));
        assert!(content.contains(r#"draw:type="ellipse"/></draw:custom-shape>"#));
    }

    #[test]
    fn test_styles_and_manifest() {
        let sink = assemble(&mut sample());

        let styles = sink.get_str("styles.xml").unwrap();
        assert!(styles.contains(r#"<draw:gradient draw:name="Gradient_dp1""#));
        let content = sink.get_str("content.xml").unwrap();
        assert!(content.contains(r#"draw:fill-gradient-name="Gradient_dp1""#));

        let manifest = sink.get_str("META-INF/manifest.xml").unwrap();
        assert!(manifest.contains(&format!(
            r#"<manifest:file-entry manifest:full-path="Object 2/" manifest:version="1.3" manifest:media-type="{ODF_CHART}"/>"#
        )));
        assert!(manifest.contains(
            r#"<manifest:file-entry manifest:full-path="Object 2/content.xml" manifest:media-type="text/xml"/>"#
        ));
        assert!(manifest.contains(
            r#"<manifest:file-entry manifest:full-path="Pictures/image1.png" manifest:media-type="image/png"/>"#
        ));
        assert!(!manifest.contains("mimetype"));

        let object = sink.get_str("Object 2/content.xml").unwrap();
        assert!(object.contains(r#"chart:class="chart:line""#));
    }

    #[test]
    fn test_shared_font_declared_once() {
        let paragraphs = (0..10)
            .map(|i| Paragraph::new(vec![TextRun::new(format!("Item {i}"), Font::new("Arial", 20.0))]))
            .collect();
        let mut presentation = Presentation::new();
        presentation.add_slide(Slide::new(vec![Shape::text_box(
            "List",
            FRAME,
            TextBody::new(paragraphs),
        )]));

        let sink = assemble(&mut presentation);
        let content = sink.get_str("content.xml").unwrap();
        assert_eq!(content.matches(r#"style:name="T1""#).count(), 1);
        assert_eq!(content.matches(r#"text:style-name="T1""#).count(), 10);
        assert!(!content.contains(r#"style:name="T2""#));
        assert_eq!(content.matches(r#"style:name="P1""#).count(), 1);
    }

    #[test]
    fn test_slide_jump_out_of_range() {
        let mut presentation = Presentation::new();
        presentation.add_slide(Slide::new(vec![
            Shape::text_box("Link", FRAME, TextBody::plain("x", Font::default()))
                .with_hyperlink(Hyperlink::slide(4)),
        ]));

        let mut sink = MemorySink::new();
        let err = PackageAssembler::new(Odp::new())
            .assemble(&mut presentation, &mut sink)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidTarget(_)));
        assert!(sink.is_empty());
    }
}
