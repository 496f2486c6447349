//! DrawingML chart parts (`ppt/charts/chartN.xml`).
use std::fmt::Write as FmtWrite;

use super::excel_embed::SHEET_NAME;
use crate::common::Result;
use crate::common::xml::{XML_DECLARATION, bool_attr, escape_xml};
use crate::model::chart::{Chart, ChartSeries, ChartType, column_letter};
use crate::ooxml::constants::namespace;
use crate::package::rel::RelId;

const CATEGORY_AXIS_ID: u32 = 1;
const VALUE_AXIS_ID: u32 = 2;

/// Generate a chart part. `workbook` is the chart's relationship to its
/// embedded workbook, if it has one.
pub fn chart_xml(chart: &Chart, workbook: Option<RelId>) -> Result<String> {
    let mut xml = String::with_capacity(4096);

    xml.push_str(XML_DECLARATION);
    write!(
        xml,
        r#"<c:chartSpace xmlns:c="{}" xmlns:a="{}" xmlns:r="{}">"#,
        namespace::DML_CHART,
        namespace::DML,
        namespace::OFC_RELATIONSHIPS
    )?;
    xml.push_str(r#"<c:date1904 val="0"/><c:lang val="en-US"/><c:roundedCorners val="0"/>"#);

    xml.push_str("<c:chart>");
    match &chart.title {
        Some(title) => {
            write_title(&mut xml, title)?;
            xml.push_str(r#"<c:autoTitleDeleted val="0"/>"#);
        }
        None => xml.push_str(r#"<c:autoTitleDeleted val="1"/>"#),
    }

    xml.push_str("<c:plotArea><c:layout/>");
    write_type_group(&mut xml, chart)?;
    if chart.chart_type != ChartType::Pie {
        write_axes(&mut xml, chart.chart_type)?;
    }
    xml.push_str("</c:plotArea>");

    if chart.show_legend {
        xml.push_str(r#"<c:legend><c:legendPos val="r"/><c:overlay val="0"/></c:legend>"#);
    }
    xml.push_str(r#"<c:plotVisOnly val="1"/><c:dispBlanksAs val="gap"/></c:chart>"#);

    if let Some(id) = workbook {
        write!(
            xml,
            r#"<c:externalData r:id="{id}"><c:autoUpdate val="0"/></c:externalData>"#
        )?;
    }
    xml.push_str("</c:chartSpace>");
    Ok(xml)
}

fn write_title(xml: &mut String, title: &str) -> Result<()> {
    xml.push_str("<c:title><c:tx><c:rich><a:bodyPr/><a:lstStyle/><a:p><a:pPr><a:defRPr/></a:pPr>");
    write!(
        xml,
        r#"<a:r><a:rPr lang="en-US"/><a:t>{}</a:t></a:r>"#,
        escape_xml(title)
    )?;
    xml.push_str(r#"</a:p></c:rich></c:tx><c:overlay val="0"/></c:title>"#);
    Ok(())
}

fn write_type_group(xml: &mut String, chart: &Chart) -> Result<()> {
    let (tag, pie) = match chart.chart_type {
        ChartType::Bar | ChartType::Column => ("c:barChart", false),
        ChartType::Line => ("c:lineChart", false),
        ChartType::Pie => ("c:pieChart", true),
    };

    write!(xml, "<{tag}>")?;
    match chart.chart_type {
        ChartType::Bar => xml.push_str(r#"<c:barDir val="bar"/><c:grouping val="clustered"/>"#),
        ChartType::Column => xml.push_str(r#"<c:barDir val="col"/><c:grouping val="clustered"/>"#),
        ChartType::Line => xml.push_str(r#"<c:grouping val="standard"/>"#),
        ChartType::Pie => {}
    }
    write!(xml, r#"<c:varyColors val="{}"/>"#, bool_attr(pie))?;

    for (index, series) in chart.series.iter().enumerate() {
        write_series(xml, chart, index, series)?;
    }

    match chart.chart_type {
        ChartType::Bar | ChartType::Column => xml.push_str(r#"<c:gapWidth val="150"/>"#),
        ChartType::Line => xml.push_str(r#"<c:marker val="1"/>"#),
        ChartType::Pie => xml.push_str(r#"<c:firstSliceAng val="0"/>"#),
    }
    if !pie {
        write!(
            xml,
            r#"<c:axId val="{CATEGORY_AXIS_ID}"/><c:axId val="{VALUE_AXIS_ID}"/>"#
        )?;
    }
    write!(xml, "</{tag}>")?;
    Ok(())
}

/// One series, with formulas pointing into the embedded sheet and cached values.
fn write_series(xml: &mut String, chart: &Chart, index: usize, series: &ChartSeries) -> Result<()> {
    let col = column_letter(index + 1);
    let last_row = chart.point_count() + 1;

    write!(xml, r#"<c:ser><c:idx val="{index}"/><c:order val="{index}"/>"#)?;
    write!(
        xml,
        r#"<c:tx><c:strRef><c:f>{SHEET_NAME}!${col}$1</c:f><c:strCache><c:ptCount val="1"/><c:pt idx="0"><c:v>{}</c:v></c:pt></c:strCache></c:strRef></c:tx>"#,
        escape_xml(&series.name)
    )?;

    if !chart.categories.is_empty() {
        write!(
            xml,
            r#"<c:cat><c:strRef><c:f>{SHEET_NAME}!$A$2:$A${last_row}</c:f><c:strCache><c:ptCount val="{}"/>"#,
            chart.categories.len()
        )?;
        for (i, category) in chart.categories.iter().enumerate() {
            write!(xml, r#"<c:pt idx="{i}"><c:v>{}</c:v></c:pt>"#, escape_xml(category))?;
        }
        xml.push_str("</c:strCache></c:strRef></c:cat>");
    }

    write!(
        xml,
        r#"<c:val><c:numRef><c:f>{SHEET_NAME}!${col}$2:${col}${last_row}</c:f><c:numCache><c:formatCode>General</c:formatCode><c:ptCount val="{}"/>"#,
        series.values.len()
    )?;
    for (i, value) in series.values.iter().enumerate() {
        write!(xml, r#"<c:pt idx="{i}"><c:v>{value}</c:v></c:pt>"#)?;
    }
    xml.push_str("</c:numCache></c:numRef></c:val>");

    if chart.chart_type == ChartType::Line {
        xml.push_str(r#"<c:smooth val="0"/>"#);
    }
    xml.push_str("</c:ser>");
    Ok(())
}

fn write_axes(xml: &mut String, chart_type: ChartType) -> Result<()> {
    // Bar charts run horizontally: categories on the left, values at the bottom
    let (cat_pos, val_pos) = if chart_type == ChartType::Bar {
        ("l", "b")
    } else {
        ("b", "l")
    };

    write!(
        xml,
        r#"<c:catAx><c:axId val="{CATEGORY_AXIS_ID}"/><c:scaling><c:orientation val="minMax"/></c:scaling><c:delete val="0"/><c:axPos val="{cat_pos}"/>"#
    )?;
    write!(
        xml,
        r#"<c:majorTickMark val="out"/><c:minorTickMark val="none"/><c:tickLblPos val="nextTo"/><c:crossAx val="{VALUE_AXIS_ID}"/><c:crosses val="autoZero"/>"#
    )?;
    xml.push_str(r#"<c:auto val="1"/><c:lblAlgn val="ctr"/><c:lblOffset val="100"/><c:noMultiLvlLbl val="0"/></c:catAx>"#);

    write!(
        xml,
        r#"<c:valAx><c:axId val="{VALUE_AXIS_ID}"/><c:scaling><c:orientation val="minMax"/></c:scaling><c:delete val="0"/><c:axPos val="{val_pos}"/><c:majorGridlines/>"#
    )?;
    write!(
        xml,
        r#"<c:numFmt formatCode="General" sourceLinked="1"/><c:majorTickMark val="out"/><c:minorTickMark val="none"/><c:tickLblPos val="nextTo"/><c:crossAx val="{CATEGORY_AXIS_ID}"/><c:crosses val="autoZero"/>"#
    )?;
    xml.push_str(r#"<c:crossBetween val="between"/></c:valAx>"#);
    Ok(())
}
