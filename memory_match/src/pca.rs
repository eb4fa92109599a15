//! Principal-component projection for a handful of rows.
//!
//! There are far fewer rows (cards) than features, so the decomposition runs
//! on the `n × n` Gram matrix of the centered rows instead of the feature
//! covariance matrix. The projection of row `i` onto component `c` is then
//! `sqrt(λ_c) * u_c[i]`.

const MAX_SWEEPS: usize = 64;
const OFF_DIAGONAL_EPS: f64 = 1e-24;

/// Projects `rows` onto their first `dims` principal components.
///
/// `dims` is clamped to the number of rows and the number of features, so two
/// rows never ask for more components than exist. All rows must have the same
/// length; the caller checks this.
pub fn project(rows: &[&[f32]], dims: usize) -> Vec<Vec<f64>> {
    let n = rows.len();
    if n == 0 {
        return Vec::new();
    }
    let num_features = rows[0].len();
    let dims = dims.min(n).min(num_features);

    let mut means = vec![0f64; num_features];
    for row in rows {
        for (m, &x) in means.iter_mut().zip(row.iter()) {
            *m += f64::from(x);
        }
    }
    for m in means.iter_mut() {
        *m /= n as f64;
    }
    let centered: Vec<Vec<f64>> = rows
        .iter()
        .map(|row| {
            row.iter()
                .zip(&means)
                .map(|(&x, m)| f64::from(x) - m)
                .collect()
        })
        .collect();

    let mut gram = vec![vec![0f64; n]; n];
    for i in 0..n {
        for j in i..n {
            let dot: f64 = centered[i].iter().zip(&centered[j]).map(|(a, b)| a * b).sum();
            gram[i][j] = dot;
            gram[j][i] = dot;
        }
    }

    let (eigenvalues, eigenvectors) = symmetric_eigen(gram);
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| eigenvalues[b].total_cmp(&eigenvalues[a]));

    (0..n)
        .map(|i| {
            order
                .iter()
                .take(dims)
                .map(|&c| eigenvalues[c].max(0.0).sqrt() * eigenvectors[i][c])
                .collect()
        })
        .collect()
}

/// Cyclic Jacobi eigenvalue decomposition of a symmetric matrix.
///
/// Returns the eigenvalues and a matrix whose columns are the eigenvectors.
fn symmetric_eigen(mut a: Vec<Vec<f64>>) -> (Vec<f64>, Vec<Vec<f64>>) {
    let n = a.len();
    let mut v: Vec<Vec<f64>> = (0..n)
        .map(|i| (0..n).map(|j| if i == j { 1.0 } else { 0.0 }).collect())
        .collect();

    for _ in 0..MAX_SWEEPS {
        let mut off_diagonal = 0.0;
        for p in 0..n {
            for q in (p + 1)..n {
                off_diagonal += a[p][q] * a[p][q];
            }
        }
        if off_diagonal < OFF_DIAGONAL_EPS {
            break;
        }

        for p in 0..n {
            for q in (p + 1)..n {
                if a[p][q] == 0.0 {
                    continue;
                }
                let theta = (a[q][q] - a[p][p]) / (2.0 * a[p][q]);
                let t = theta.signum() / (theta.abs() + (theta * theta + 1.0).sqrt());
                let c = 1.0 / (t * t + 1.0).sqrt();
                let s = t * c;
                for k in 0..n {
                    let (akp, akq) = (a[k][p], a[k][q]);
                    a[k][p] = c * akp - s * akq;
                    a[k][q] = s * akp + c * akq;
                }
                for k in 0..n {
                    let (apk, aqk) = (a[p][k], a[q][k]);
                    a[p][k] = c * apk - s * aqk;
                    a[q][k] = s * apk + c * aqk;
                }
                for row in v.iter_mut() {
                    let (vkp, vkq) = (row[p], row[q]);
                    row[p] = c * vkp - s * vkq;
                    row[q] = s * vkp + c * vkq;
                }
            }
        }
    }

    let eigenvalues = (0..n).map(|i| a[i][i]).collect();
    (eigenvalues, v)
}

pub(crate) fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}
