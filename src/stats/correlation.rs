//! Correlation Matrix Module
//! Pairwise-complete Pearson correlation across numeric columns.

use polars::prelude::*;
use rayon::prelude::*;
use serde::Serialize;
use statrs::statistics::Statistics;

/// Square, symmetric correlation matrix.
///
/// `values[i][j]` is NaN when the pair has fewer than two complete rows or
/// one side is constant over those rows. Diagonal entries are always 1.0.
#[derive(Debug, Clone, Serialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn size(&self) -> usize {
        self.columns.len()
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i][j]
    }

    /// Range of the finite off-diagonal and diagonal values, for color scaling.
    pub fn value_range(&self) -> (f64, f64) {
        let (min, max) = self
            .values
            .iter()
            .flatten()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        if min.is_finite() && max.is_finite() {
            (min, max)
        } else {
            (-1.0, 1.0)
        }
    }
}

pub struct CorrelationCalculator;

impl CorrelationCalculator {
    /// Compute the matrix over `columns`; values that do not cast to a float
    /// count as missing.
    pub fn compute(df: &DataFrame, columns: &[&str]) -> PolarsResult<CorrelationMatrix> {
        let series: Vec<Vec<Option<f64>>> = columns
            .iter()
            .map(|&name| {
                let values = df.column(name)?.cast(&DataType::Float64)?;
                Ok(values
                    .f64()?
                    .into_iter()
                    .map(|v| v.filter(|x| x.is_finite()))
                    .collect())
            })
            .collect::<PolarsResult<_>>()?;

        let n = columns.len();
        let pairs: Vec<(usize, usize)> = (0..n)
            .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
            .collect();

        let coefficients: Vec<(usize, usize, f64)> = pairs
            .par_iter()
            .map(|&(i, j)| (i, j, Self::pearson_pairwise(&series[i], &series[j])))
            .collect();

        let mut values = vec![vec![f64::NAN; n]; n];
        for (i, row) in values.iter_mut().enumerate() {
            row[i] = 1.0;
        }
        for (i, j, r) in coefficients {
            values[i][j] = r;
            values[j][i] = r;
        }

        Ok(CorrelationMatrix {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            values,
        })
    }

    /// Pearson correlation over the rows where both sides are present.
    pub fn pearson_pairwise(x: &[Option<f64>], y: &[Option<f64>]) -> f64 {
        let (xs, ys): (Vec<f64>, Vec<f64>) = x
            .iter()
            .zip(y)
            .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
            .unzip();

        if xs.len() < 2 {
            return f64::NAN;
        }

        let sx = xs.iter().std_dev();
        let sy = ys.iter().std_dev();
        if !(sx > 0.0 && sy > 0.0) {
            return f64::NAN;
        }

        let cov = xs.iter().covariance(ys.iter());
        (cov / (sx * sy)).clamp(-1.0, 1.0)
    }
}
