/// Apply first differencing `d` times.
///
/// The result is `d` elements shorter than the input (empty if the input
/// is not long enough).
pub fn difference(series: &[f64], d: usize) -> Vec<f64> {
    let mut out = series.to_vec();
    for _ in 0..d {
        if out.len() < 2 {
            return Vec::new();
        }
        out = out.windows(2).map(|w| w[1] - w[0]).collect();
    }
    out
}

/// Undo `d` rounds of differencing for values that continue `history`.
///
/// `diffs` are values on the `d`-times differenced scale that follow the
/// end of `history`; the return value is those same points on the
/// original scale.
pub fn integrate(diffs: &[f64], history: &[f64], d: usize) -> Vec<f64> {
    let mut out = diffs.to_vec();
    for level in (0..d).rev() {
        let anchor = difference(history, level).last().copied().unwrap_or(0.0);
        out = out
            .iter()
            .scan(anchor, |acc, &x| {
                *acc += x;
                Some(*acc)
            })
            .collect();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_difference() {
        assert_eq!(difference(&[1.0, 4.0, 9.0, 16.0], 1), vec![3.0, 5.0, 7.0]);
        assert_eq!(difference(&[1.0, 4.0, 9.0, 16.0], 2), vec![2.0, 2.0]);
        assert_eq!(difference(&[1.0, 4.0], 0), vec![1.0, 4.0]);
        assert!(difference(&[1.0], 1).is_empty());
    }

    #[test]
    fn integrate_continues_history() {
        // Squares: next two are 25, 36.
        let history = [1.0, 4.0, 9.0, 16.0];
        assert_eq!(integrate(&[9.0, 11.0], &history, 1), vec![25.0, 36.0]);
        assert_eq!(integrate(&[2.0, 2.0], &history, 2), vec![25.0, 36.0]);
        assert_eq!(integrate(&[5.0], &history, 0), vec![5.0]);
    }

    #[test]
    fn integrating_tail_differences_reconstructs_series() {
        let series = [0.3, 0.25, 0.4, 0.1, 0.35, 0.5];
        let (head, tail) = series.split_at(3);
        let tail_diffs = &difference(&series, 1)[2..];
        let rebuilt = integrate(tail_diffs, head, 1);
        for (a, b) in rebuilt.iter().zip(tail) {
            assert!((a - b).abs() < 1e-12);
        }
    }
}
