//! Embedded chart objects (`Object N/content.xml`).
//!
//! Each chart carries its own data as a `local-table` laid out like the
//! worksheet behind a PresentationML chart: categories in column A, one
//! column per series from B on, series names in row 1.
use std::fmt::Write as FmtWrite;

use crate::common::Result;
use crate::common::unit::format_cm;
use crate::common::xml::{XML_DECLARATION, escape_xml};
use crate::model::chart::{Chart, ChartType, column_letter};
use crate::model::shape::Frame;
use crate::odf::constants::{OFFICE_VERSION, write_namespaces};

const TABLE: &str = "local-table";
const PLOT_STYLE: &str = "ch1";

fn cell(column: usize, row: usize) -> String {
    format!("{TABLE}.${}${row}", column_letter(column))
}

fn span(first_column: usize, first_row: usize, last_column: usize, last_row: usize) -> String {
    format!(
        "{}:.${}${last_row}",
        cell(first_column, first_row),
        column_letter(last_column)
    )
}

fn range(column: usize, first_row: usize, last_row: usize) -> String {
    span(column, first_row, column, last_row)
}

/// Generate the chart sub-document, sized to `frame`.
pub fn chart_object_xml(chart: &Chart, frame: &Frame) -> Result<String> {
    let last_row = chart.point_count() + 1;
    let class = chart.chart_type.odf_class();
    let mut xml = String::with_capacity(2048 + chart.point_count() * chart.series.len() * 96);

    xml.push_str(XML_DECLARATION);
    xml.push_str("<office:document-content");
    write_namespaces(
        &mut xml,
        &["office", "style", "text", "table", "draw", "fo", "xlink", "svg", "chart"],
    );
    write!(xml, r#" office:version="{OFFICE_VERSION}">"#)?;

    xml.push_str("<office:automatic-styles>");
    if chart.chart_type == ChartType::Bar {
        write!(
            xml,
            r#"<style:style style:name="{PLOT_STYLE}" style:family="chart"><style:chart-properties chart:vertical="true"/></style:style>"#
        )?;
    }
    xml.push_str("</office:automatic-styles>");

    write!(
        xml,
        r#"<office:body><office:chart><chart:chart svg:width="{}" svg:height="{}" chart:class="{class}">"#,
        format_cm(frame.cx),
        format_cm(frame.cy)
    )?;
    if let Some(title) = &chart.title {
        write!(
            xml,
            "<chart:title><text:p>{}</text:p></chart:title>",
            escape_xml(title)
        )?;
    }
    if chart.show_legend {
        xml.push_str(r#"<chart:legend chart:legend-position="end"/>"#);
    }

    xml.push_str("<chart:plot-area");
    if chart.chart_type == ChartType::Bar {
        write!(xml, r#" chart:style-name="{PLOT_STYLE}""#)?;
    }
    write!(
        xml,
        r#" table:cell-range-address="{}" chart:data-source-has-labels="both">"#,
        span(0, 1, chart.series.len(), last_row)
    )?;

    if chart.chart_type != ChartType::Pie {
        write!(
            xml,
            r#"<chart:axis chart:dimension="x" chart:name="primary-x"><chart:categories table:cell-range-address="{}"/></chart:axis>"#,
            range(0, 2, last_row)
        )?;
        xml.push_str(r#"<chart:axis chart:dimension="y" chart:name="primary-y"><chart:grid chart:class="major"/></chart:axis>"#);
    }

    for column in 1..=chart.series.len() {
        write!(
            xml,
            r#"<chart:series chart:class="{class}" chart:values-cell-range-address="{}" chart:label-cell-address="{}"/>"#,
            range(column, 2, last_row),
            cell(column, 1)
        )?;
    }
    xml.push_str("</chart:plot-area>");

    write_local_table(&mut xml, chart)?;
    xml.push_str("</chart:chart></office:chart></office:body></office:document-content>");
    Ok(xml)
}

fn write_string_cell(xml: &mut String, text: &str) -> Result<()> {
    write!(
        xml,
        r#"<table:table-cell office:value-type="string"><text:p>{}</text:p></table:table-cell>"#,
        escape_xml(text)
    )?;
    Ok(())
}

fn write_local_table(xml: &mut String, chart: &Chart) -> Result<()> {
    write!(xml, r#"<table:table table:name="{TABLE}">"#)?;
    xml.push_str("<table:table-header-columns><table:table-column/></table:table-header-columns>");
    write!(
        xml,
        r#"<table:table-columns><table:table-column table:number-columns-repeated="{}"/></table:table-columns>"#,
        chart.series.len().max(1)
    )?;

    xml.push_str("<table:table-header-rows><table:table-row><table:table-cell/>");
    for series in &chart.series {
        write_string_cell(xml, &series.name)?;
    }
    xml.push_str("</table:table-row></table:table-header-rows>");

    xml.push_str("<table:table-rows>");
    for point in 0..chart.point_count() {
        xml.push_str("<table:table-row>");
        match chart.categories.get(point) {
            Some(category) => write_string_cell(xml, category)?,
            None => xml.push_str("<table:table-cell/>"),
        }
        for series in &chart.series {
            match series.values.get(point) {
                Some(value) => write!(
                    xml,
                    r#"<table:table-cell office:value-type="float" office:value="{value}"><text:p>{value}</text:p></table:table-cell>"#
                )?,
                None => xml.push_str("<table:table-cell/>"),
            }
        }
        xml.push_str("</table:table-row>");
    }
    xml.push_str("</table:table-rows></table:table>");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::chart::ChartSeries;

    fn chart(chart_type: ChartType) -> Chart {
        Chart::new(
            chart_type,
            vec!["North".to_string(), "South".to_string()],
            vec![
                ChartSeries::new("2023", vec![3.0, 4.5]),
                ChartSeries::new("2024", vec![5.0]),
            ],
        )
    }

    const FRAME: Frame = Frame::new(0, 0, 3_600_000, 1_800_000);

    #[test]
    fn test_bar_chart_object() {
        let xml = chart_object_xml(&chart(ChartType::Bar).with_title("Regions"), &FRAME).unwrap();
        assert!(xml.contains(r#"<chart:chart svg:width="10.000cm" svg:height="5.000cm" chart:class="chart:bar">"#));
        assert!(xml.contains(r#"<style:chart-properties chart:vertical="true"/>"#));
        assert!(xml.contains("<chart:title><text:p>Regions</text:p></chart:title>"));
        assert!(xml.contains(r#"table:cell-range-address="local-table.$A$1:.$C$3""#));
        assert!(xml.contains(r#"<chart:categories table:cell-range-address="local-table.$A$2:.$A$3"/>"#));
        assert!(xml.contains(r#"chart:values-cell-range-address="local-table.$C$2:.$C$3" chart:label-cell-address="local-table.$C$1""#));
    }

    #[test]
    fn test_local_table_fills_gaps() {
        let xml = chart_object_xml(&chart(ChartType::Column), &FRAME).unwrap();
        assert!(!xml.contains("chart:vertical"));
        assert!(xml.contains(r#"<table:table-cell office:value-type="float" office:value="4.5"><text:p>4.5</text:p></table:table-cell><table:table-cell/></table:table-row>"#));
        assert!(xml.contains(r#"<table:table-header-rows><table:table-row><table:table-cell/><table:table-cell office:value-type="string"><text:p>2023</text:p>"#));
    }

    #[test]
    fn test_pie_chart_has_no_axes() {
        let xml = chart_object_xml(&chart(ChartType::Pie), &FRAME).unwrap();
        assert!(xml.contains(r#"chart:class="chart:circle""#));
        assert!(!xml.contains("<chart:axis"));
    }
}
