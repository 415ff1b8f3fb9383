//! Derivative-free minimisation used for ARMA parameter estimation.

/// Outcome of a minimisation run.
#[derive(Debug, Clone, PartialEq)]
pub struct Minimum {
    pub point: Vec<f64>,
    pub value: f64,
    pub iterations: usize,
    pub converged: bool,
}

/// Stopping rules for [`nelder_mead`].
#[derive(Debug, Clone, Copy)]
pub struct NelderMeadOptions {
    /// Edge length of the initial simplex around the start point.
    pub initial_step: f64,
    /// Stop once the spread of objective values across the simplex is below this.
    pub tolerance: f64,
    pub max_iterations: usize,
}

impl Default for NelderMeadOptions {
    fn default() -> Self {
        Self {
            initial_step: 0.1,
            tolerance: 1e-12,
            max_iterations: 2000,
        }
    }
}

const REFLECT: f64 = 1.0;
const EXPAND: f64 = 2.0;
const CONTRACT: f64 = 0.5;
const SHRINK: f64 = 0.5;

/// Minimise `f` starting from `start` with the Nelder-Mead simplex method.
///
/// Fully deterministic: the same `f`, start point and options always walk
/// the same simplex sequence.  Non-finite objective values are treated as
/// `+inf` so the simplex moves away from them.
pub fn nelder_mead<F>(f: F, start: &[f64], opts: NelderMeadOptions) -> Minimum
where
    F: Fn(&[f64]) -> f64,
{
    let n = start.len();
    let eval = |x: &[f64]| {
        let v = f(x);
        if v.is_finite() { v } else { f64::INFINITY }
    };

    if n == 0 {
        return Minimum {
            point: Vec::new(),
            value: eval(start),
            iterations: 0,
            converged: true,
        };
    }

    let mut simplex: Vec<(Vec<f64>, f64)> = Vec::with_capacity(n + 1);
    simplex.push((start.to_vec(), eval(start)));
    for i in 0..n {
        let mut vertex = start.to_vec();
        vertex[i] += opts.initial_step;
        let value = eval(&vertex);
        simplex.push((vertex, value));
    }

    let mut iterations = 0;
    let mut converged = false;

    while iterations < opts.max_iterations {
        simplex.sort_by(|a, b| a.1.total_cmp(&b.1));

        let best = simplex[0].1;
        let worst = simplex[n].1;
        if (worst - best).abs() <= opts.tolerance * (1.0 + best.abs()) {
            converged = true;
            break;
        }
        iterations += 1;

        // Centroid of all but the worst vertex.
        let mut centroid = vec![0.0; n];
        for (vertex, _) in &simplex[..n] {
            for (c, v) in centroid.iter_mut().zip(vertex) {
                *c += v / n as f64;
            }
        }

        let along = |t: f64| -> Vec<f64> {
            centroid
                .iter()
                .zip(&simplex[n].0)
                .map(|(c, w)| c + t * (c - w))
                .collect()
        };

        let reflected = along(REFLECT);
        let f_reflected = eval(&reflected);

        if f_reflected < simplex[0].1 {
            let expanded = along(EXPAND);
            let f_expanded = eval(&expanded);
            simplex[n] = if f_expanded < f_reflected {
                (expanded, f_expanded)
            } else {
                (reflected, f_reflected)
            };
            continue;
        }

        if f_reflected < simplex[n - 1].1 {
            simplex[n] = (reflected, f_reflected);
            continue;
        }

        // Outside contraction if the reflection beat the worst point, inside otherwise.
        let (contracted, f_contracted) = if f_reflected < simplex[n].1 {
            let p = along(CONTRACT * REFLECT);
            let v = eval(&p);
            (p, v)
        } else {
            let p = along(-CONTRACT);
            let v = eval(&p);
            (p, v)
        };

        if f_contracted < simplex[n].1.min(f_reflected) {
            simplex[n] = (contracted, f_contracted);
            continue;
        }

        let best_point = simplex[0].0.clone();
        for (vertex, value) in simplex.iter_mut().skip(1) {
            for (x, b) in vertex.iter_mut().zip(&best_point) {
                *x = b + SHRINK * (*x - b);
            }
            *value = eval(vertex);
        }
    }

    simplex.sort_by(|a, b| a.1.total_cmp(&b.1));
    let (point, value) = simplex.swap_remove(0);
    Minimum {
        point,
        value,
        iterations,
        converged,
    }
}
