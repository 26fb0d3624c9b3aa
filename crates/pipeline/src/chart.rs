//! Chart-ready payloads.
//!
//! A query returns rows keyed by year; a line chart wants one series per
//! genre with counts aligned to a shared x axis. This module does that pivot
//! and also describes the year-range control (bounds, default value, ticks).

use crate::aggregate::GenreYearTable;
use crate::query::{GenreSelection, YearCounts};
use data_loader::Genre;
use serde::Serialize;

pub const X_AXIS_LABEL: &str = "Year";
pub const Y_AXIS_LABEL: &str = "Number of Movies Released Per Year";
pub const CHART_TITLE: &str = "Number of Movies Released Each Year in Different Genres";

/// Plot mode for every series: lines with a marker at each year
pub const LINE_MODE: &str = "lines+markers";

/// Spacing of labelled ticks on the year-range control
pub const RANGE_MARK_STEP: u16 = 5;

/// One line of the chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSeries {
    pub genre: Genre,
    /// Aligned with [`ChartFigure::years`]
    pub counts: Vec<u32>,
}

/// Everything a line chart renderer needs to draw a query result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartFigure {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub mode: &'static str,
    pub years: Vec<u16>,
    pub series: Vec<ChartSeries>,
}

impl ChartFigure {
    /// Pivot query rows into one series per selected genre
    pub fn from_slice(rows: &[YearCounts], selection: &GenreSelection) -> Self {
        let years = rows.iter().map(|row| row.year).collect();
        let series = selection
            .genres()
            .iter()
            .map(|&genre| ChartSeries {
                genre,
                counts: rows
                    .iter()
                    .map(|row| row.get(genre).unwrap_or(0))
                    .collect(),
            })
            .collect();

        Self {
            title: CHART_TITLE,
            x_label: X_AXIS_LABEL,
            y_label: Y_AXIS_LABEL,
            mode: LINE_MODE,
            years,
            series,
        }
    }
}

/// The year-range control: its bounds, initial value, and labelled ticks
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RangeControl {
    pub min: u16,
    pub max: u16,
    /// Initially the full span
    pub value: [u16; 2],
    pub step: u16,
    /// Every fifth year starting at `min`
    pub marks: Vec<u16>,
}

impl RangeControl {
    /// `None` when the table has no rows to bound the control
    pub fn for_table(table: &GenreYearTable) -> Option<Self> {
        let (min, max) = table.year_span()?;
        let marks = (min..=max).step_by(usize::from(RANGE_MARK_STEP)).collect();
        Some(Self {
            min,
            max,
            value: [min, max],
            step: 1,
            marks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<YearCounts> {
        vec![
            YearCounts { year: 1994, counts: vec![(Genre::Comedy, 4), (Genre::Drama, 9)] },
            YearCounts { year: 1995, counts: vec![(Genre::Comedy, 6), (Genre::Drama, 11)] },
        ]
    }

    #[test]
    fn test_figure_has_one_series_per_genre() {
        let selection = GenreSelection::new([Genre::Comedy, Genre::Drama]).unwrap();
        let figure = ChartFigure::from_slice(&rows(), &selection);

        assert_eq!(figure.years, vec![1994, 1995]);
        assert_eq!(figure.mode, "lines+markers");
        assert_eq!(figure.series.len(), 2);
        assert_eq!(figure.series[0], ChartSeries { genre: Genre::Comedy, counts: vec![4, 6] });
        assert_eq!(figure.series[1], ChartSeries { genre: Genre::Drama, counts: vec![9, 11] });
    }

    #[test]
    fn test_figure_from_empty_slice() {
        let figure = ChartFigure::from_slice(&[], &GenreSelection::default());
        assert!(figure.years.is_empty());
        assert_eq!(figure.series.len(), 1);
        assert!(figure.series[0].counts.is_empty());
    }

    #[test]
    fn test_figure_json_uses_genre_names() {
        let selection = GenreSelection::new([Genre::FilmNoir]).unwrap();
        let figure = ChartFigure::from_slice(&[], &selection);
        let json = serde_json::to_value(&figure).unwrap();
        assert_eq!(json["series"][0]["genre"], "Film-Noir");
        assert_eq!(json["x_label"], "Year");
    }
}
