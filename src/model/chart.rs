//! Chart data attached to chart shapes.

/// Supported chart kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChartType {
    #[default]
    Bar,
    Column,
    Line,
    Pie,
}

impl ChartType {
    /// ODF `chart:class` value.
    pub fn odf_class(&self) -> &'static str {
        match self {
            Self::Bar | Self::Column => "chart:bar",
            Self::Line => "chart:line",
            Self::Pie => "chart:circle",
        }
    }
}

/// One named series of values, aligned with the chart categories.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub name: String,
    pub values: Vec<f64>,
}

impl ChartSeries {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Chart {
    pub chart_type: ChartType,
    pub title: Option<String>,
    pub categories: Vec<String>,
    pub series: Vec<ChartSeries>,
    pub show_legend: bool,
}

impl Chart {
    pub fn new(chart_type: ChartType, categories: Vec<String>, series: Vec<ChartSeries>) -> Self {
        Self {
            chart_type,
            title: None,
            categories,
            series,
            show_legend: true,
        }
    }

    /// Builder method: set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Number of data points, the longest of the category and series lengths.
    pub fn point_count(&self) -> usize {
        self.series
            .iter()
            .map(|s| s.values.len())
            .chain(std::iter::once(self.categories.len()))
            .max()
            .unwrap_or(0)
    }
}

/// Spreadsheet column name of a 0-based column index (0 = A, 25 = Z, 26 = AA).
///
/// Chart data is laid out as a sheet: categories in column A, one column per
/// series from B on, series names in row 1.
pub fn column_letter(col: usize) -> String {
    let mut result = String::new();
    let mut n = col;
    loop {
        result.insert(0, (b'A' + (n % 26) as u8) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_letter() {
        assert_eq!(column_letter(0), "A");
        assert_eq!(column_letter(1), "B");
        assert_eq!(column_letter(25), "Z");
        assert_eq!(column_letter(26), "AA");
        assert_eq!(column_letter(27), "AB");
    }

    #[test]
    fn test_point_count() {
        let chart = Chart::new(
            ChartType::Column,
            vec!["Q1".into(), "Q2".into()],
            vec![ChartSeries::new("Sales", vec![1.0, 2.0, 3.0])],
        );
        assert_eq!(chart.point_count(), 3);
        assert_eq!(Chart::default().point_count(), 0);
    }
}
