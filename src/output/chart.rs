//! Interactive line chart rendered by plotly.js.
//!
//! The figure is built as plain serde structs and embedded in a standalone
//! HTML page. A button bar switches between showing every trace and showing
//! a single one, retitling the axes as it goes.

use anyhow::Result;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::analyzers::types::{FieldSeries, SurveyAggregate};
use crate::field::Field;

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

pub const OVERVIEW_TITLE: &str = "Specific Attributes Across Different Age Groups";
pub const X_AXIS_TITLE: &str = "Age groups";
const OVERVIEW_Y_TITLE: &str = "Calculated averages";

#[derive(Debug, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

#[derive(Debug, Serialize)]
pub struct Trace {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub mode: &'static str,
    pub name: String,
    pub x: Vec<String>,
    pub y: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<Line>,
}

#[derive(Debug, Serialize)]
pub struct Line {
    pub color: String,
}

#[derive(Debug, Serialize)]
pub struct Title {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct Axis {
    pub title: Title,
}

#[derive(Debug, Serialize)]
pub struct Layout {
    pub title: Title,
    pub xaxis: Axis,
    pub yaxis: Axis,
    pub updatemenus: Vec<UpdateMenu>,
}

#[derive(Debug, Serialize)]
pub struct UpdateMenu {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub direction: &'static str,
    pub x: f64,
    pub y: f64,
    pub showactive: bool,
    pub buttons: Vec<Button>,
}

/// A menu button; `args` is the `[trace update, layout update]` pair
/// passed to `Plotly.update`.
#[derive(Debug, Serialize)]
pub struct Button {
    pub label: String,
    pub method: &'static str,
    pub args: (Visibility, LayoutUpdate),
}

#[derive(Debug, Serialize)]
pub struct Visibility {
    pub visible: Vec<bool>,
}

#[derive(Debug, Serialize)]
pub struct LayoutUpdate {
    #[serde(rename = "title.text")]
    pub title: String,
    #[serde(rename = "xaxis.title.text")]
    pub xaxis_title: String,
    #[serde(rename = "yaxis.title.text")]
    pub yaxis_title: String,
}

/// Builds the figure: the overall score trace first, then one trace per
/// field in [`Field::ALL`] order.
pub fn build_figure(aggregate: &SurveyAggregate) -> Figure {
    let x = aggregate.age_groups.clone();

    let mut data = Vec::with_capacity(aggregate.series.len() + 1);
    data.push(Trace {
        kind: "scatter",
        mode: "lines+markers",
        name: "Overall Score".to_string(),
        x: x.clone(),
        y: aggregate.composite_scores.clone(),
        line: None,
    });
    for series in &aggregate.series {
        data.push(Trace {
            kind: "scatter",
            mode: "lines+markers",
            name: series.label.clone(),
            x: x.clone(),
            y: series.averages.clone(),
            line: Some(Line {
                color: series.field.color_hex(),
            }),
        });
    }

    let n = data.len();
    let mut buttons = vec![button(
        "All Graphs",
        vec![true; n],
        OVERVIEW_TITLE,
        OVERVIEW_Y_TITLE.to_string(),
    )];
    buttons.push(button(
        "Overall Anxiety Score",
        only(0, n),
        "Relationship between Overall Anxiety Score and Different Age Groups",
        "Calculated overall anxiety score (ranging from 0 to 1)".to_string(),
    ));
    for (i, series) in aggregate.series.iter().enumerate() {
        buttons.push(button(
            button_label(series.field),
            only(i + 1, n),
            chart_title(series.field),
            y_title(series),
        ));
    }

    Figure {
        data,
        layout: Layout {
            title: title(OVERVIEW_TITLE),
            xaxis: Axis {
                title: title(X_AXIS_TITLE),
            },
            yaxis: Axis {
                title: title(OVERVIEW_Y_TITLE),
            },
            updatemenus: vec![UpdateMenu {
                kind: "buttons",
                direction: "down",
                x: -0.1,
                y: 0.9,
                showactive: true,
                buttons,
            }],
        },
    }
}

/// Writes `figure` as a standalone HTML page that loads plotly.js from its CDN.
pub fn write_html(path: &Path, figure: &Figure) -> Result<()> {
    fs::write(path, render_html(figure)?)?;
    debug!(path = %path.display(), traces = figure.data.len(), "Chart written");
    Ok(())
}

pub fn render_html(figure: &Figure) -> Result<String> {
    // keep a literal "</script>" inside a string value from closing the tag
    let json = serde_json::to_string(figure)?.replace("</", "<\\/");
    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{OVERVIEW_TITLE}</title>
<script src="{PLOTLY_CDN}"></script>
</head>
<body>
<div id="chart" style="width:100%;height:95vh;"></div>
<script>
const figure = {json};
Plotly.newPlot("chart", figure.data, figure.layout);
</script>
</body>
</html>
"#
    ))
}

fn title(text: &str) -> Title {
    Title {
        text: text.to_string(),
    }
}

fn only(index: usize, n: usize) -> Vec<bool> {
    (0..n).map(|i| i == index).collect()
}

fn button(label: &str, visible: Vec<bool>, chart_title: &str, y_title: String) -> Button {
    Button {
        label: label.to_string(),
        method: "update",
        args: (
            Visibility { visible },
            LayoutUpdate {
                title: chart_title.to_string(),
                xaxis_title: X_AXIS_TITLE.to_string(),
                yaxis_title: y_title,
            },
        ),
    }
}

fn button_label(field: Field) -> &'static str {
    match field {
        Field::AnxietyScore => "Anxiety Level",
        Field::ConcernSocial => "Concern for Impact on Social Life",
        other => other.label(),
    }
}

fn chart_title(field: Field) -> &'static str {
    match field {
        Field::AnxietyScore => {
            "Relationship between Generalized Anxiety Severity Score and Different Age Groups"
        }
        Field::BeforeDistancing => {
            "Relationship between Mental Health Levels before Distancing and Different Age Groups"
        }
        Field::ConcernCanada => {
            "Relationship between Concern of Impact of COVID-19 on Canadian Population Health \
             and Different Age Groups"
        }
        Field::ConcernSocial => {
            "Relationship between Concern of Impact of COVID-19 on Maintaining Social Ties \
             and Different Age Groups"
        }
        Field::PerceivedHealth => {
            "Relationship between Perceived Mental Health Level and Different Age Groups"
        }
        Field::FinancialImpact => {
            "Relationship between Impact of COVID-19 on Person's Ability to Meet Financial \
             Obligations or Essential Needs and Different Age Groups"
        }
    }
}

fn y_title(series: &FieldSeries) -> String {
    let stem = match series.field {
        Field::AnxietyScore => "generalized anxiety score",
        Field::BeforeDistancing => "before distancing score",
        Field::ConcernCanada => "concern for Canadians score",
        Field::ConcernSocial => "concern for social impact score",
        Field::PerceivedHealth => "perceived mental health score",
        Field::FinancialImpact => "financial impact score",
    };
    format!(
        "Calculated {stem} average (ranging from {} to {})",
        series.range.min, series.range.max
    )
}
