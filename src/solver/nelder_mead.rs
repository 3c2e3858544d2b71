// Derivative-free simplex search used to tune the QAOA angles

use thiserror::Error;

const REFLECTION: f64 = 1.0;
const EXPANSION: f64 = 2.0;
const CONTRACTION: f64 = 0.5;
const SHRINK: f64 = 0.5;

/// Configuration for the Nelder–Mead search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    max_iters: usize,
    initial_step: f64,
    f_tol: f64,
}

/// Errors that can occur when validating a Nelder–Mead config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("initial_step must be finite and positive")]
    Step,

    #[error("f_tol must be finite and non-negative")]
    FTol,
}

/// Errors that can occur during the search.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("starting point must have at least one coordinate")]
    EmptyStart,

    #[error("objective returned a non-finite value at {0:?}")]
    NonFinite(Vec<f64>),
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_iters: 100,
            initial_step: 0.25,
            f_tol: 1e-6,
        }
    }
}

impl Config {
    /// Creates a new config with validated step and tolerance.
    ///
    /// # Errors
    ///
    /// Returns an error if the step is not positive or the tolerance is negative.
    pub fn new(max_iters: usize, initial_step: f64, f_tol: f64) -> Result<Self, ConfigError> {
        if !initial_step.is_finite() || initial_step <= 0.0 {
            return Err(ConfigError::Step);
        }
        if !f_tol.is_finite() || f_tol < 0.0 {
            return Err(ConfigError::FTol);
        }

        Ok(Self {
            max_iters,
            initial_step,
            f_tol,
        })
    }

    #[must_use]
    pub fn max_iters(&self) -> usize {
        self.max_iters
    }
}

/// Why the search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Simplex values collapsed within `f_tol`.
    Converged,
    /// Iteration budget exhausted.
    MaxIters,
}

/// Best point found by the search.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub x: Vec<f64>,
    pub fx: f64,
    pub iters: usize,
    pub evaluations: usize,
    pub status: Status,
}

/// Minimizes `f` starting from `x0`.
///
/// # Errors
///
/// Returns an error if `x0` is empty or `f` yields a non-finite value.
pub fn minimize<F>(mut f: F, x0: &[f64], config: &Config) -> Result<Solution, Error>
where
    F: FnMut(&[f64]) -> f64,
{
    if x0.is_empty() {
        return Err(Error::EmptyStart);
    }

    let mut evaluations = 0;
    let mut eval = |x: &[f64]| -> Result<f64, Error> {
        evaluations += 1;
        let fx = f(x);
        if fx.is_finite() {
            Ok(fx)
        } else {
            Err(Error::NonFinite(x.to_vec()))
        }
    };

    let dim = x0.len();
    let mut simplex: Vec<(Vec<f64>, f64)> = Vec::with_capacity(dim + 1);
    simplex.push((x0.to_vec(), eval(x0)?));
    for i in 0..dim {
        let mut x = x0.to_vec();
        x[i] += config.initial_step;
        let fx = eval(&x)?;
        simplex.push((x, fx));
    }

    let mut iters = 0;
    let mut status = Status::MaxIters;

    while iters < config.max_iters {
        simplex.sort_by(|a, b| a.1.total_cmp(&b.1));

        let best = simplex[0].1;
        let worst = simplex[dim].1;
        if (worst - best).abs() <= config.f_tol {
            status = Status::Converged;
            break;
        }
        iters += 1;

        let centroid: Vec<f64> = (0..dim)
            .map(|k| simplex[..dim].iter().map(|(x, _)| x[k]).sum::<f64>() / dim as f64)
            .collect();
        let along = |scale: f64| -> Vec<f64> {
            centroid
                .iter()
                .zip(&simplex[dim].0)
                .map(|(c, w)| c + scale * (c - w))
                .collect()
        };

        let reflected = along(REFLECTION);
        let f_reflected = eval(&reflected)?;

        if f_reflected < best {
            let expanded = along(EXPANSION);
            let f_expanded = eval(&expanded)?;
            simplex[dim] = if f_expanded < f_reflected {
                (expanded, f_expanded)
            } else {
                (reflected, f_reflected)
            };
            continue;
        }

        if f_reflected < simplex[dim - 1].1 {
            simplex[dim] = (reflected, f_reflected);
            continue;
        }

        let contracted = if f_reflected < worst {
            along(CONTRACTION)
        } else {
            along(-CONTRACTION)
        };
        let f_contracted = eval(&contracted)?;
        if f_contracted < worst.min(f_reflected) {
            simplex[dim] = (contracted, f_contracted);
            continue;
        }

        let anchor = simplex[0].0.clone();
        for vertex in simplex.iter_mut().skip(1) {
            let shrunk: Vec<f64> = anchor
                .iter()
                .zip(&vertex.0)
                .map(|(a, x)| a + SHRINK * (x - a))
                .collect();
            let f_shrunk = eval(&shrunk)?;
            *vertex = (shrunk, f_shrunk);
        }
    }

    simplex.sort_by(|a, b| a.1.total_cmp(&b.1));
    let (x, fx) = simplex.swap_remove(0);

    Ok(Solution {
        x,
        fx,
        iters,
        evaluations,
        status,
    })
}
