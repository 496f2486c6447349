//! Part layout and relationship wiring of a PresentationML package.
use super::{template, writer};
use crate::common::{Error, Result};
use crate::model::chart::Chart;
use crate::model::presentation::Presentation;
use crate::model::shape::ShapeKind;
use crate::ooxml::constants::{content_type as ct, relationship_type as rt};
use crate::package::content_types::ContentTypeRegistry;
use crate::package::fingerprint::fingerprint_bytes;
use crate::package::format::{
    IndexContext, LinkKind, LinkTarget, PackageFormat, Reference, RenderContext,
};
use crate::package::part::{PackagePart, PartName, RenderedPart};
use crate::package::resource::{ContentKey, PayloadSource, ResourceEntry, ResourceKind};
use crate::package::sink::PackageSink;

const PRESENTATION: &str = "/ppt/presentation.xml";
const SLIDE_MASTER: &str = "/ppt/slideMasters/slideMaster1.xml";
const SLIDE_LAYOUT: &str = "/ppt/slideLayouts/slideLayout1.xml";
const THEME: &str = "/ppt/theme/theme1.xml";
const PRES_PROPS: &str = "/ppt/presProps.xml";
const VIEW_PROPS: &str = "/ppt/viewProps.xml";
const TABLE_STYLES: &str = "/ppt/tableStyles.xml";
const CORE_PROPS: &str = "/docProps/core.xml";
const APP_PROPS: &str = "/docProps/app.xml";
const CONTENT_TYPES_ENTRY: &str = "[Content_Types].xml";

/// The PresentationML package format.
///
/// One slide master with a single blank layout and one theme are always
/// written; every slide uses that layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pptx;

impl Pptx {
    pub fn new() -> Self {
        Self
    }

    fn reltype(kind: LinkKind) -> &'static str {
        match kind {
            LinkKind::Image => rt::IMAGE,
            LinkKind::Chart => rt::CHART,
            LinkKind::Hyperlink => rt::HYPERLINK,
            LinkKind::SlideJump | LinkKind::Slide => rt::SLIDE,
            LinkKind::SlideLayout => rt::SLIDE_LAYOUT,
            LinkKind::SlideMaster => rt::SLIDE_MASTER,
            LinkKind::Theme => rt::THEME,
            LinkKind::Package => rt::PACKAGE,
            LinkKind::OfficeDocument => rt::OFFICE_DOCUMENT,
            LinkKind::CoreProperties => rt::CORE_PROPERTIES,
            LinkKind::ExtendedProperties => rt::EXTENDED_PROPERTIES,
            LinkKind::PresentationProperties => rt::PRES_PROPS,
            LinkKind::ViewProperties => rt::VIEW_PROPS,
            LinkKind::TableStyles => rt::TABLE_STYLES,
        }
    }

    fn relate(
        &self,
        ctx: &mut IndexContext<'_>,
        owner: &PartName,
        kind: LinkKind,
        target: &PartName,
    ) -> Result<Reference> {
        self.link(ctx, owner, kind, &LinkTarget::Part(target.clone()))
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
            let name = self.resource_part(entry)?;
            let workbook = ctx.relationships(&name).and_then(|rels| {
                rels.manifest()
                    .iter()
                    .find(|record| record.reltype == rt::PACKAGE)
                    .map(|record| record.id)
            });
            let xml = writer::chart::chart_xml(chart, workbook)?;
            parts.push(RenderedPart::new(name, entry.mime_type.clone(), xml));
        }
        Ok(())
    }
}

fn part(uri: &str) -> Result<PartName> {
    PartName::new(uri)
}

impl PackageFormat for Pptx {
    fn name(&self) -> &'static str {
        "pptx"
    }

    fn slide_part(&self, index: usize) -> Result<PartName> {
        PartName::new(format!("/ppt/slides/slide{}.xml", index + 1))
    }

    fn resource_part(&self, entry: &ResourceEntry) -> Result<PartName> {
        let dir = match entry.kind {
            ResourceKind::Image | ResourceKind::Other => "media",
            ResourceKind::Chart => "charts",
            ResourceKind::Workbook => "embeddings",
        };
        PartName::new(format!("/ppt/{dir}/{}", entry.filename))
    }

    fn index_package(&self, ctx: &mut IndexContext<'_>, _presentation: &Presentation) -> Result<()> {
        let package = PartName::package();
        let presentation = part(PRESENTATION)?;
        let master = part(SLIDE_MASTER)?;
        let layout = part(SLIDE_LAYOUT)?;
        let theme = part(THEME)?;

        self.relate(ctx, &package, LinkKind::OfficeDocument, &presentation)?;
        self.relate(ctx, &package, LinkKind::CoreProperties, &part(CORE_PROPS)?)?;
        self.relate(ctx, &package, LinkKind::ExtendedProperties, &part(APP_PROPS)?)?;

        self.relate(ctx, &presentation, LinkKind::SlideMaster, &master)?;
        self.relate(ctx, &presentation, LinkKind::PresentationProperties, &part(PRES_PROPS)?)?;
        self.relate(ctx, &presentation, LinkKind::ViewProperties, &part(VIEW_PROPS)?)?;
        self.relate(ctx, &presentation, LinkKind::Theme, &theme)?;
        self.relate(ctx, &presentation, LinkKind::TableStyles, &part(TABLE_STYLES)?)?;

        self.relate(ctx, &master, LinkKind::SlideLayout, &layout)?;
        self.relate(ctx, &master, LinkKind::Theme, &theme)?;
        self.relate(ctx, &layout, LinkKind::SlideMaster, &master)?;
        Ok(())
    }

    fn index_slide(
        &self,
        ctx: &mut IndexContext<'_>,
        _index: usize,
        slide: &PartName,
    ) -> Result<Option<Reference>> {
        self.relate(ctx, slide, LinkKind::SlideLayout, &part(SLIDE_LAYOUT)?)?;
        let reference = self.relate(ctx, &part(PRESENTATION)?, LinkKind::Slide, slide)?;
        Ok(Some(reference))
    }

    /// Embed the chart's data as a workbook and link it from the chart part.
    fn index_chart(
        &self,
        ctx: &mut IndexContext<'_>,
        chart: &Chart,
        entry: &ResourceEntry,
    ) -> Result<()> {
        let workbook = writer::excel_embed::generate_chart_workbook(chart)?;
        let key = ContentKey::Digest(fingerprint_bytes(&workbook));
        let workbook = ctx.register_resource(
            key,
            PayloadSource::Bytes(workbook.into()),
            Some(ct::SML_SHEET),
        )?;
        let chart_part = self.resource_part(entry)?;
        self.relate(ctx, &chart_part, LinkKind::Package, &self.resource_part(&workbook)?)?;
        Ok(())
    }

    fn link(
        &self,
        ctx: &mut IndexContext<'_>,
        owner: &PartName,
        kind: LinkKind,
        target: &LinkTarget,
    ) -> Result<Reference> {
        let reltype = Self::reltype(kind);
        let id = match target {
            LinkTarget::Part(target) => ctx.relate(owner, reltype, target)?,
            LinkTarget::External(url) => ctx.relate_external(owner, reltype, url)?,
            LinkTarget::Slide(index) => {
                if *index >= ctx.slide_count() {
                    return Err(Error::InvalidTarget(format!(
                        "slide {index} does not exist ({} slides)",
                        ctx.slide_count()
                    )));
                }
                ctx.relate(owner, rt::SLIDE, &self.slide_part(*index)?)?
            }
        };
        Ok(Reference::Relationship(id))
    }

    fn render(&self, ctx: &RenderContext<'_>, presentation: &Presentation) -> Result<Vec<RenderedPart>> {
        let master = part(SLIDE_MASTER)?;
        let layout = part(SLIDE_LAYOUT)?;
        let master_ref = ctx
            .relationship_to(&part(PRESENTATION)?, &master)
            .ok_or_else(|| Error::InvalidState("presentation has no slide master".to_string()))?;
        let layout_ref = ctx
            .relationship_to(&master, &layout)
            .ok_or_else(|| Error::InvalidState("slide master has no layout".to_string()))?;

        let mut parts = vec![
            RenderedPart::new(
                part(PRESENTATION)?,
                ct::PML_PRESENTATION_MAIN,
                writer::pres::presentation_xml(presentation, master_ref)?,
            ),
            RenderedPart::new(
                master,
                ct::PML_SLIDE_MASTER,
                template::slide_master_xml(layout_ref)?,
            ),
            RenderedPart::new(layout, ct::PML_SLIDE_LAYOUT, template::slide_layout_xml()?),
            RenderedPart::new(part(THEME)?, ct::OFC_THEME, template::theme_xml()?),
            RenderedPart::new(part(PRES_PROPS)?, ct::PML_PRES_PROPS, template::pres_props_xml()?),
            RenderedPart::new(part(VIEW_PROPS)?, ct::PML_VIEW_PROPS, template::view_props_xml()?),
            RenderedPart::new(
                part(TABLE_STYLES)?,
                ct::PML_TABLE_STYLES,
                template::table_styles_xml()?,
            ),
            RenderedPart::new(
                part(CORE_PROPS)?,
                ct::OPC_CORE_PROPERTIES,
                writer::props::core_props_xml(presentation, ctx.options)?,
            ),
            RenderedPart::new(
                part(APP_PROPS)?,
                ct::OFC_EXTENDED_PROPERTIES,
                writer::props::app_props_xml(presentation, ctx.options)?,
            ),
        ];

        for slide in &presentation.slides {
            let name = slide
                .resolved
                .part
                .clone()
                .ok_or_else(|| Error::InvalidState("slide was never indexed".to_string()))?;
            let xml = writer::slide::slide_xml(ctx, slide)?;
            parts.push(RenderedPart::new(name, ct::PML_SLIDE, xml));
        }

        self.render_charts(ctx, presentation, &mut parts)?;
        Ok(parts)
    }

    fn declare_content_type(
        &self,
        registry: &mut ContentTypeRegistry,
        part: &PartName,
        content_type: &str,
    ) -> Result<()> {
        if ContentTypeRegistry::is_standard_default(part.ext(), content_type) {
            registry.add_default(part.ext(), content_type)
        } else {
            registry.add_override(part.as_str(), content_type)
        }
    }

    fn seal(
        &self,
        content_types: &ContentTypeRegistry,
        parts: &[PackagePart],
        sink: &mut dyn PackageSink,
    ) -> Result<()> {
        sink.add_part(CONTENT_TYPES_ENTRY, content_types.to_xml().as_bytes())?;
        for part in parts {
            sink.add_part(part.name.membername(), &part.data)?;
        }
        Ok(())
    }
}
