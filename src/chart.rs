//! SVG charts drawn with `plotters`. These only plot what the engine already
//! computed; each function writes one file into the output directory and
//! returns its path.

use crate::error::{ChartError, ChartResult};
use crate::types::MonthlyAverage;
use log::info;
use plotters::coord::ranged1d::SegmentValue;
use plotters::prelude::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const SIZE: (u32, u32) = (1000, 600);
const WIDE: (u32, u32) = (1200, 600);

fn slice_colors(n: usize) -> Vec<RGBColor> {
    (0..n)
        .map(|i| {
            let (r, g, b) = Palette99::COLORS[i % Palette99::COLORS.len()];
            RGBColor(r, g, b)
        })
        .collect()
}

/// Pie chart of `slices`, labelled with names and percentages.
pub fn render_pie(path: &Path, title: &str, slices: &BTreeMap<String, usize>) -> ChartResult<()> {
    let total: usize = slices.values().sum();
    if total == 0 {
        return Err(ChartError::NoData);
    }
    let labels: Vec<String> = slices.keys().cloned().collect();
    let sizes: Vec<f64> = slices.values().map(|c| *c as f64).collect();
    let colors = slice_colors(sizes.len());

    let root = SVGBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled(title, ("sans-serif", 28))?;
    let (w, h) = root.dim_in_pixel();
    let center = (w as i32 / 2, h as i32 / 2);
    let radius = f64::from(w.min(h)) * 0.38;

    let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
    pie.label_style(("sans-serif", 16).into_font().color(&BLACK));
    pie.percentages(("sans-serif", 14).into_font().color(&WHITE));
    root.draw(&pie)?;
    root.present()?;
    Ok(())
}

/// Vertical bar chart, one bar per item in the given order.
pub fn render_bars(
    path: &Path,
    size: (u32, u32),
    title: &str,
    y_label: &str,
    items: &[(String, f64)],
) -> ChartResult<()> {
    if items.is_empty() {
        return Err(ChartError::NoData);
    }
    let max = items.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max);
    let y_top = if max > 0.0 { max * 1.1 } else { 1.0 };
    let labels: Vec<&str> = items.iter().map(|(l, _)| l.as_str()).collect();

    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 28))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d((0..items.len() as i32).into_segmented(), 0f64..y_top)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(items.len())
        .x_label_formatter(&|v| match v {
            SegmentValue::CenterOf(i) => labels.get(*i as usize).map(|l| l.to_string()).unwrap_or_default(),
            _ => String::new(),
        })
        .y_desc(y_label)
        .draw()?;

    chart.draw_series(
        Histogram::vertical(&chart)
            .style(BLUE.mix(0.7).filled())
            .margin(8)
            .data(items.iter().enumerate().map(|(i, (_, v))| (i as i32, *v))),
    )?;
    root.present()?;
    Ok(())
}

fn chart_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}.svg", name))
}

fn finish(path: PathBuf) -> PathBuf {
    info!("Chart written to {}", path.display());
    path
}

pub fn pie_reviews_per_park(counts: &BTreeMap<String, usize>, dir: &Path) -> ChartResult<PathBuf> {
    let path = chart_path(dir, "reviews_per_park");
    render_pie(&path, "Number of Reviews by Park", counts)?;
    Ok(finish(path))
}

pub fn bar_avg_rating_per_park(avgs: &BTreeMap<String, f64>, dir: &Path) -> ChartResult<PathBuf> {
    let items: Vec<(String, f64)> = avgs.iter().map(|(k, v)| (k.clone(), *v)).collect();
    let path = chart_path(dir, "avg_rating_per_park");
    render_bars(&path, SIZE, "Average Rating by Park", "Average Rating", &items)?;
    Ok(finish(path))
}

pub fn bar_top_locations(data: &[(String, f64)], park: &str, dir: &Path) -> ChartResult<PathBuf> {
    let path = chart_path(dir, "top_locations");
    render_bars(
        &path,
        WIDE,
        &format!("Top 10 Locations by Average Rating - {}", park),
        "Average Rating",
        data,
    )?;
    Ok(finish(path))
}

pub fn bar_monthly_rating(data: &[MonthlyAverage], park: &str, dir: &Path) -> ChartResult<PathBuf> {
    let items: Vec<(String, f64)> = data
        .iter()
        .map(|m| (m.month.to_string(), m.average))
        .collect();
    let path = chart_path(dir, "monthly_rating");
    render_bars(
        &path,
        SIZE,
        &format!("Monthly Rating Average - {}", park),
        "Average Rating",
        &items,
    )?;
    Ok(finish(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(path: &Path) -> String {
        std::fs::read_to_string(path).unwrap()
    }

    #[test]
    fn test_pie_chart_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut counts = BTreeMap::new();
        counts.insert("Orlando".to_string(), 1);
        counts.insert("Paris".to_string(), 3);
        let path = pie_reviews_per_park(&counts, dir.path()).unwrap();
        assert_eq!(path, dir.path().join("reviews_per_park.svg"));
        let svg = read(&path);
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Number of Reviews by Park"));
        assert!(svg.contains("Orlando"));
        assert!(svg.contains("Paris"));
    }

    #[test]
    fn test_bar_charts_label_categories() {
        let dir = tempfile::tempdir().unwrap();
        let mut avgs = BTreeMap::new();
        avgs.insert("Disneyland_Paris".to_string(), 4.0);
        avgs.insert("Disneyland_HongKong".to_string(), 4.2);
        let svg = read(&bar_avg_rating_per_park(&avgs, dir.path()).unwrap());
        assert!(svg.contains("Average Rating by Park"));
        assert!(svg.contains("Disneyland_Paris"));
        assert!(svg.contains("Disneyland_HongKong"));

        let top = vec![("東京".to_string(), 5.0), ("Brazil".to_string(), 4.5)];
        let svg = read(&bar_top_locations(&top, "Paris", dir.path()).unwrap());
        assert!(svg.contains("Top 10 Locations by Average Rating - Paris"));
        assert!(svg.contains("東京"));
    }

    #[test]
    fn test_monthly_chart_all_zero() {
        let dir = tempfile::tempdir().unwrap();
        let data: Vec<MonthlyAverage> = ["Jan", "Feb", "Mar"]
            .iter()
            .map(|m| MonthlyAverage { month: *m, average: 0.0 })
            .collect();
        let svg = read(&bar_monthly_rating(&data, "Paris", dir.path()).unwrap());
        assert!(svg.contains("Monthly Rating Average - Paris"));
        assert!(svg.contains("Feb"));
    }

    #[test]
    fn test_empty_data_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            pie_reviews_per_park(&BTreeMap::new(), dir.path()),
            Err(ChartError::NoData)
        ));
        assert!(matches!(bar_top_locations(&[], "Paris", dir.path()), Err(ChartError::NoData)));
    }

    #[test]
    fn test_unwritable_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut counts = BTreeMap::new();
        counts.insert("Paris".to_string(), 1);
        let missing = dir.path().join("missing");
        assert!(pie_reviews_per_park(&counts, &missing).is_err());
    }
}
