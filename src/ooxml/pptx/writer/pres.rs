//! `ppt/presentation.xml`.
use std::fmt::Write as FmtWrite;

use super::rel_id;
use crate::common::Result;
use crate::common::xml::XML_DECLARATION;
use crate::model::presentation::Presentation;
use crate::ooxml::pptx::template::PML_NAMESPACES;
use crate::package::rel::RelId;

/// First id of the slide id list; lower values are reserved.
const FIRST_SLIDE_ID: usize = 256;
const MASTER_ID: u32 = 2_147_483_648;

/// Generate the presentation part. `master` is the presentation's
/// relationship to its slide master; slide ids come from the indexed slides.
pub fn presentation_xml(presentation: &Presentation, master: RelId) -> Result<String> {
    let mut xml = String::with_capacity(1024 + presentation.slides.len() * 48);

    xml.push_str(XML_DECLARATION);
    write!(xml, r#"<p:presentation {PML_NAMESPACES} saveSubsetFonts="1">"#)?;

    write!(
        xml,
        r#"<p:sldMasterIdLst><p:sldMasterId id="{MASTER_ID}" r:id="{master}"/></p:sldMasterIdLst>"#
    )?;

    if !presentation.slides.is_empty() {
        xml.push_str("<p:sldIdLst>");
        for (index, slide) in presentation.slides.iter().enumerate() {
            let id = rel_id(slide.resolved.presentation_ref.as_ref(), "slide")?;
            write!(
                xml,
                r#"<p:sldId id="{}" r:id="{}"/>"#,
                FIRST_SLIDE_ID + index,
                id
            )?;
        }
        xml.push_str("</p:sldIdLst>");
    }

    write!(
        xml,
        r#"<p:sldSz cx="{}" cy="{}"/>"#,
        presentation.slide_size.cx, presentation.slide_size.cy
    )?;
    xml.push_str(r#"<p:notesSz cx="6858000" cy="9144000"/>"#);
    xml.push_str("<p:defaultTextStyle><a:lvl1pPr><a:defRPr lang=\"en-US\"/></a:lvl1pPr></p:defaultTextStyle>");
    xml.push_str("</p:presentation>");

    Ok(xml)
}
