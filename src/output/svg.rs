//! Static SVG rendering of every series on one set of axes.

use anyhow::Result;
use plotters::prelude::*;
use std::path::Path;
use tracing::debug;

use crate::analyzers::types::SurveyAggregate;
use crate::output::chart::{OVERVIEW_TITLE, X_AXIS_TITLE};

const SIZE: (u32, u32) = (1280, 720);

/// Draws the overall score and the six field averages as line series.
pub fn write_svg(path: &Path, aggregate: &SurveyAggregate) -> Result<()> {
    let labels = &aggregate.age_groups;
    let x_max = labels.len().saturating_sub(1).max(1) as f64;
    let y_max = aggregate
        .series
        .iter()
        .flat_map(|s| s.averages.iter())
        .chain(aggregate.composite_scores.iter())
        .fold(1.0_f64, |m, v| m.max(*v))
        * 1.1;

    let mut lines = vec![("Overall Score".to_string(), &aggregate.composite_scores, BLACK)];
    for s in &aggregate.series {
        let (r, g, b) = s.field.color();
        lines.push((s.label.clone(), &s.averages, RGBColor(r, g, b)));
    }

    let root = SVGBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(OVERVIEW_TITLE, ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..x_max, 0f64..y_max)?;

    chart
        .configure_mesh()
        .x_labels(labels.len())
        .x_label_formatter(&|x: &f64| {
            labels.get(x.round() as usize).cloned().unwrap_or_default()
        })
        .x_desc(X_AXIS_TITLE)
        .y_desc("Calculated averages")
        .draw()?;

    for (name, values, color) in lines {
        chart
            .draw_series(LineSeries::new(
                values.iter().enumerate().map(|(i, v)| (i as f64, *v)),
                color.stroke_width(2),
            ))?
            .label(name)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    debug!(path = %path.display(), "SVG chart written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::tests::{sample_aggregate, temp_path};
    use std::fs;

    #[test]
    fn test_write_svg_creates_file() {
        let path = temp_path("anxiety_survey_test_chart.svg");
        let _ = fs::remove_file(&path);

        write_svg(&path, &sample_aggregate()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("<svg"));
        assert!(content.trim_end().ends_with("</svg>"));

        fs::remove_file(&path).unwrap();
    }
}
