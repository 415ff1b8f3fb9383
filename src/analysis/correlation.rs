use crate::data::model::{ObservationTable, SpectralIndex};

/// Pearson correlation between two equally long series.
///
/// Returns `NaN` when either series has zero variance, like pandas.
pub fn pearson(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len().min(b.len());
    if n < 2 {
        return f64::NAN;
    }
    let (a, b) = (&a[..n], &b[..n]);
    // A constant column such as [0.1; 3] leaves rounding noise in the
    // deviations from its mean, so test the values themselves.
    if is_constant(a) || is_constant(b) {
        return f64::NAN;
    }
    let mean_a = a.iter().sum::<f64>() / n as f64;
    let mean_b = b.iter().sum::<f64>() / n as f64;

    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (x, y) in a.iter().zip(b) {
        let (dx, dy) = (x - mean_a, y - mean_b);
        cov += dx * dy;
        var_a += dx * dx;
        var_b += dy * dy;
    }
    if var_a == 0.0 || var_b == 0.0 {
        return f64::NAN;
    }
    (cov / (var_a * var_b).sqrt()).clamp(-1.0, 1.0)
}

fn is_constant(series: &[f64]) -> bool {
    series.iter().all(|&v| v == series[0])
}

/// Square matrix of pairwise correlations between index columns.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    pub labels: Vec<SpectralIndex>,
    /// Row-major, `labels.len()` × `labels.len()`.
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Correlate every index column of `table` against every other.
    pub fn from_table(table: &ObservationTable) -> Self {
        let labels = SpectralIndex::ALL.to_vec();
        let columns: Vec<Vec<f64>> = labels.iter().map(|&idx| table.column(idx)).collect();
        let n = labels.len();

        let mut values = vec![vec![f64::NAN; n]; n];
        for i in 0..n {
            for j in i..n {
                let r = if i == j {
                    // Exactly 1 unless the column is constant.
                    if pearson(&columns[i], &columns[i]).is_nan() { f64::NAN } else { 1.0 }
                } else {
                    pearson(&columns[i], &columns[j])
                };
                values[i][j] = r;
                values[j][i] = r;
            }
        }
        Self { labels, values }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Observation;

    #[test]
    fn site_matrix_is_symmetric_with_unit_diagonal() {
        let m = CorrelationMatrix::from_table(&ObservationTable::peatland_site());
        assert_eq!(m.labels, SpectralIndex::ALL.to_vec());
        for i in 0..3 {
            assert_eq!(m.values[i][i], 1.0);
            for j in 0..3 {
                assert_eq!(m.values[i][j].to_bits(), m.values[j][i].to_bits());
                assert!((-1.0..=1.0).contains(&m.values[i][j]));
            }
        }
    }

    #[test]
    fn site_ndwi_and_ndmi_move_together() {
        let m = CorrelationMatrix::from_table(&ObservationTable::peatland_site());
        assert_eq!(&m.labels[1..], &[SpectralIndex::Ndwi, SpectralIndex::Ndmi]);
        let r = m.values[1][2];
        assert!(r > 0.5, "r = {r}");
    }

    #[test]
    fn pearson_of_linear_relationships() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let up = [3.0, 5.0, 7.0, 9.0];
        let down = [8.0, 6.0, 4.0, 2.0];
        assert!((pearson(&a, &up) - 1.0).abs() < 1e-12);
        assert!((pearson(&a, &down) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn constant_column_gives_nan_row_and_column() {
        let table = ObservationTable::new(vec![
            Observation::new(2020, 0.5, 0.1, 0.2),
            Observation::new(2021, 0.5, 0.3, 0.1),
            Observation::new(2022, 0.5, 0.2, 0.4),
        ])
        .unwrap();
        let m = CorrelationMatrix::from_table(&table);
        for j in 0..3 {
            assert!(m.values[0][j].is_nan());
            assert!(m.values[j][0].is_nan());
        }
        assert_eq!(m.values[1][1], 1.0);
    }

    #[test]
    fn inexact_constant_column_is_still_nan() {
        // 0.1 has no exact binary form, so its mean drifts by an ulp.
        let table = ObservationTable::new(vec![
            Observation::new(2020, 0.1, 0.1, 0.2),
            Observation::new(2021, 0.1, 0.3, 0.1),
            Observation::new(2022, 0.1, 0.2, 0.4),
        ])
        .unwrap();
        let m = CorrelationMatrix::from_table(&table);
        for j in 0..3 {
            assert!(m.values[0][j].is_nan(), "row 0: {:?}", m.values[0]);
            assert!(m.values[j][0].is_nan(), "column 0 at {j}");
        }
        assert_eq!(m.values[1][1], 1.0);
        assert!(pearson(&[0.1; 3], &[0.1, 0.3, 0.2]).is_nan());
        assert!(pearson(&[0.1, 0.3, 0.2], &[0.7; 3]).is_nan());
    }
}
