//! Correlations and scatter series between claim measures.
//!
//! Only rows where both measures are present take part (pairwise-complete
//! observations).

use std::collections::BTreeMap;

use serde::Serialize;

use crate::filter::FilteredClaims;
use crate::models::{ClaimRecord, ClaimType, FraudFlag};

/// Pearson correlation coefficient
///
/// `None` for fewer than two points or when either variable is constant.
pub fn pearson<I>(pairs: I) -> Option<f64>
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let moments = Moments::of(pairs)?;
    let denominator = (moments.sxx * moments.syy).sqrt();
    (denominator > 0.0).then(|| (moments.sxy / denominator).clamp(-1.0, 1.0))
}

/// Straight line fitted by ordinary least squares
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    #[must_use]
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Least-squares fit of `y` on `x`
///
/// `None` for fewer than two points or when `x` is constant.
pub fn ols_fit<I>(pairs: I) -> Option<LinearFit>
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let moments = Moments::of(pairs)?;
    if moments.sxx <= 0.0 {
        return None;
    }
    let slope = moments.sxy / moments.sxx;
    Some(LinearFit {
        slope,
        intercept: moments.mean_y - slope * moments.mean_x,
    })
}

/// Centred second moments of a set of points
struct Moments {
    mean_x: f64,
    mean_y: f64,
    sxx: f64,
    syy: f64,
    sxy: f64,
}

impl Moments {
    fn of<I>(pairs: I) -> Option<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let points: Vec<(f64, f64)> = pairs.into_iter().collect();
        if points.len() < 2 {
            return None;
        }
        let n = points.len() as f64;
        let mean_x = points.iter().map(|(x, _)| x).sum::<f64>() / n;
        let mean_y = points.iter().map(|(_, y)| y).sum::<f64>() / n;

        let (sxx, syy, sxy) = points.iter().fold((0.0, 0.0, 0.0), |(sxx, syy, sxy), (x, y)| {
            let dx = x - mean_x;
            let dy = y - mean_y;
            (sxx + dx * dx, syy + dy * dy, sxy + dx * dy)
        });

        Some(Self {
            mean_x,
            mean_y,
            sxx,
            syy,
            sxy,
        })
    }
}

fn length_of_stay_point(claim: &ClaimRecord) -> Option<(f64, f64)> {
    if claim.claim_type != ClaimType::Inpatient {
        return None;
    }
    Some((f64::from(claim.length_of_stay?), claim.reimbursed_amount?))
}

fn condition_count_point(claim: &ClaimRecord) -> Option<(f64, f64)> {
    Some((f64::from(claim.condition_count()?), claim.reimbursed_amount?))
}

/// Correlation of length of stay with reimbursed amount, inpatient claims only
#[must_use]
pub fn length_of_stay_vs_amount(filtered: &FilteredClaims<'_>) -> Option<f64> {
    pearson(filtered.iter().filter_map(length_of_stay_point))
}

/// Correlation of chronic condition count with reimbursed amount
#[must_use]
pub fn condition_count_vs_amount(filtered: &FilteredClaims<'_>) -> Option<f64> {
    pearson(filtered.iter().filter_map(condition_count_point))
}

/// One point of a scatter chart, coloured by fraud flag
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    pub fraud: FraudFlag,
}

/// Trend line of the points sharing one fraud flag
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendLine {
    pub fraud: FraudFlag,
    pub fit: LinearFit,
}

/// Scatter chart data with its correlation
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScatterSeries {
    pub points: Vec<ScatterPoint>,
    pub correlation: Option<f64>,
    /// Per fraud flag, `No` first; flags with too few points have none
    pub trend_lines: Vec<TrendLine>,
}

impl ScatterSeries {
    fn build<F>(filtered: &FilteredClaims<'_>, point: F, with_trend_lines: bool) -> Self
    where
        F: Fn(&ClaimRecord) -> Option<(f64, f64)>,
    {
        let points: Vec<ScatterPoint> = filtered
            .iter()
            .filter_map(|claim| {
                point(claim).map(|(x, y)| ScatterPoint {
                    x,
                    y,
                    fraud: claim.fraud,
                })
            })
            .collect();
        let correlation = pearson(points.iter().map(|p| (p.x, p.y)));

        let trend_lines = if with_trend_lines {
            let mut groups: BTreeMap<FraudFlag, Vec<(f64, f64)>> = BTreeMap::new();
            for p in &points {
                groups.entry(p.fraud).or_default().push((p.x, p.y));
            }
            groups
                .into_iter()
                .filter_map(|(fraud, pairs)| ols_fit(pairs).map(|fit| TrendLine { fraud, fit }))
                .collect()
        } else {
            Vec::new()
        };

        Self {
            points,
            correlation,
            trend_lines,
        }
    }
}

/// Length of stay against amount for inpatient claims
#[must_use]
pub fn length_of_stay_scatter(filtered: &FilteredClaims<'_>) -> ScatterSeries {
    ScatterSeries::build(filtered, length_of_stay_point, false)
}

/// Chronic condition count against amount, with per-flag trend lines
#[must_use]
pub fn condition_count_scatter(filtered: &FilteredClaims<'_>) -> ScatterSeries {
    ScatterSeries::build(filtered, condition_count_point, true)
}
