//! Figure model: marks, axes and scales owned by a graph instance.
//!
//! A [`Figure`] is plain data. It is mutated by the owning graph and turned
//! into pixels by [`crate::render`]; it can also be serialized to JSON for
//! embedding in another front end.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Linear y scale. `None` bounds are derived from the data at render time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl LinearScale {
    /// Scale following the data of the figure it is attached to.
    pub fn auto() -> Self {
        Self::default()
    }

    /// Scale with fixed bounds, e.g. shared between several charts.
    pub fn fixed(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn from_range((min, max): (f64, f64)) -> Self {
        Self::fixed(min, max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Scale {
    /// Discrete categories, in mark order.
    Ordinal,
    Linear(LinearScale),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub scale: Scale,
    pub orientation: Orientation,
    pub label: String,
    pub label_offset_px: u32,
    /// `"0.Nf"` style format for tick labels.
    pub tick_format: Option<String>,
}

/// A grouped bar set: one group per `x` category, one bar per `y` series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bars {
    pub x: Vec<String>,
    pub y: Vec<Vec<f64>>,
    pub colors: Vec<String>,
    pub opacities: Vec<f64>,
    pub labels: Vec<String>,
    pub display_legend: bool,
    /// Fraction of each category slot left empty.
    pub padding: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fill {
    None,
    /// Fill between the line and the zero baseline.
    Bottom,
}

/// A set of polylines sharing the same `x`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lines {
    pub x: Vec<f64>,
    pub y: Vec<Vec<f64>>,
    pub colors: Vec<String>,
    pub opacities: Vec<f64>,
    pub labels: Vec<String>,
    pub fill: Fill,
    pub stroke_width: u32,
    pub display_legend: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Mark {
    Bars(Bars),
    Lines(Lines),
}

impl Mark {
    fn y_values(&self) -> impl Iterator<Item = f64> + '_ {
        let y = match self {
            Mark::Bars(b) => &b.y,
            Mark::Lines(l) => &l.y,
        };
        y.iter().flatten().copied()
    }

    fn legend_elements(&self) -> LegendElements {
        let (colors, labels, opacities) = match self {
            Mark::Bars(b) => (&b.colors, &b.labels, &b.opacities),
            Mark::Lines(l) => (&l.colors, &l.labels, &l.opacities),
        };
        LegendElements {
            colors: colors.clone(),
            labels: labels.clone(),
            opacities: opacities.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LegendLocation {
    TopRight,
    TopLeft,
    BottomRight,
    BottomLeft,
}

/// Parallel legend sequences (colors, labels, opacities) for external composition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LegendElements {
    pub colors: Vec<String>,
    pub labels: Vec<String>,
    pub opacities: Vec<f64>,
}

impl LegendElements {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Append `other`, skipping labels already present (charts often share series names).
    pub fn merge(&mut self, other: &LegendElements) {
        for (color, label, opacity) in other.iter() {
            if !self.labels.iter().any(|l| l == label) {
                self.colors.push(color.to_string());
                self.labels.push(label.to_string());
                self.opacities.push(opacity);
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, f64)> + '_ {
        self.colors
            .iter()
            .zip(&self.labels)
            .zip(&self.opacities)
            .map(|((c, l), o)| (c.as_str(), l.as_str(), *o))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub title: String,
    pub marks: Vec<Mark>,
    pub axes: Vec<Axis>,
    pub legend_location: LegendLocation,
    /// Transition length hint for interactive front ends; the static renderer ignores it.
    pub animation_duration_ms: u32,
    revision: u64,
}

impl Figure {
    pub fn new(title: impl Into<String>, marks: Vec<Mark>, axes: Vec<Axis>) -> Self {
        Self {
            title: title.into(),
            marks,
            axes,
            legend_location: LegendLocation::TopRight,
            animation_duration_ms: 1000,
            revision: 0,
        }
    }

    /// Number of visual refreshes since the figure was created.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Apply several mark changes as one visual refresh.
    ///
    /// The revision only advances when `f` succeeds.
    pub fn hold_sync<R>(&mut self, f: impl FnOnce(&mut [Mark]) -> Result<R>) -> Result<R> {
        let out = f(&mut self.marks)?;
        self.revision += 1;
        Ok(out)
    }

    pub fn bars(&self) -> impl Iterator<Item = &Bars> + '_ {
        self.marks.iter().filter_map(|m| match m {
            Mark::Bars(b) => Some(b),
            _ => None,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = &Lines> + '_ {
        self.marks.iter().filter_map(|m| match m {
            Mark::Lines(l) => Some(l),
            _ => None,
        })
    }

    pub fn axis(&self, orientation: Orientation) -> Option<&Axis> {
        self.axes.iter().find(|a| a.orientation == orientation)
    }

    /// The scale of the vertical axis, or an autoscale when there is none.
    pub fn y_scale(&self) -> LinearScale {
        match self.axis(Orientation::Vertical).map(|a| a.scale) {
            Some(Scale::Linear(s)) => s,
            _ => LinearScale::auto(),
        }
    }

    /// Min and max over every y value of every mark, `None` without finite data.
    pub fn y_extent(&self) -> Option<(f64, f64)> {
        min_max(self.marks.iter().flat_map(Mark::y_values))
    }

    /// Legend elements of all marks, in mark order.
    pub fn legend_elements(&self) -> LegendElements {
        let mut out = LegendElements::default();
        for mark in &self.marks {
            let e = mark.legend_elements();
            out.colors.extend(e.colors);
            out.labels.extend(e.labels);
            out.opacities.extend(e.opacities);
        }
        out
    }
}

/// Min and max of the finite values, `None` when there are none.
pub fn min_max<I: IntoIterator<Item = f64>>(values: I) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}
