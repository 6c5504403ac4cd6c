use super::parameters::MultiFluidParameters;
use multifluid_core::{CompositionConvention, ReducingFunction};
use ndarray::{Array1, Array2};

/// Mixing rule of a single reducing parameter $Y$ (GERG-2008):
/// $$Y=\sum_ix_i^2Y_{\mathrm{c},i}+\sum_{i\neq j}\beta_{ij}\gamma_{ij}Y_{\mathrm{c},ij}x_ix_j\frac{x_i+x_j}{\beta_{ij}^2x_i+x_j}$$
///
/// With $\beta_{ji}=1/\beta_{ij}$ the terms $(i,j)$ and $(j,i)$ are identical,
/// which is equivalent to twice the sum over $i<j$.
#[derive(Clone, Debug)]
struct MixingRule {
    yc: Array1<f64>,
    /// $\beta_{ij}\gamma_{ij}Y_{\mathrm{c},ij}$
    c: Array2<f64>,
    beta: Array2<f64>,
}

impl MixingRule {
    fn new(yc: Array1<f64>, yc_ij: Array2<f64>, beta: &Array2<f64>, gamma: &Array2<f64>) -> Self {
        Self {
            yc,
            c: yc_ij * beta * gamma,
            beta: beta.clone(),
        }
    }

    fn components(&self) -> usize {
        self.yc.len()
    }

    fn y(&self, x: &Array1<f64>) -> f64 {
        let n = self.components();
        let mut y = 0.0;
        for i in 0..n {
            y += x[i] * x[i] * self.yc[i];
            for k in (0..n).filter(|&k| k != i) {
                y += self.c[[i, k]] * f(self.beta[[i, k]], x[i], x[k]);
            }
        }
        y
    }

    fn dy_dxi(&self, x: &Array1<f64>, i: usize) -> f64 {
        let n = self.components();
        (0..n).filter(|&k| k != i).fold(2.0 * x[i] * self.yc[i], |acc, k| {
            acc + 2.0 * self.c[[i, k]] * df_dxi(self.beta[[i, k]], x[i], x[k])
        })
    }

    fn d2y_dxi_dxj(&self, x: &Array1<f64>, i: usize, j: usize) -> f64 {
        if i == j {
            let n = self.components();
            (0..n).filter(|&k| k != i).fold(2.0 * self.yc[i], |acc, k| {
                acc + 2.0 * self.c[[i, k]] * d2f_dxi2(self.beta[[i, k]], x[i], x[k])
            })
        } else {
            2.0 * self.c[[i, j]] * d2f_dxi_dxj(self.beta[[i, j]], x[i], x[j])
        }
    }

    fn dy(&self, x: &Array1<f64>, i: usize, convention: CompositionConvention) -> f64 {
        let n = self.components();
        match convention {
            CompositionConvention::Independent => self.dy_dxi(x, i),
            _ if convention.is_dependent_index(i, n) => 0.0,
            CompositionConvention::Dependent => self.dy_dxi(x, i) - self.dy_dxi(x, n - 1),
        }
    }

    fn d2y(&self, x: &Array1<f64>, i: usize, j: usize, convention: CompositionConvention) -> f64 {
        let n = self.components();
        let last = n - 1;
        match convention {
            CompositionConvention::Independent => self.d2y_dxi_dxj(x, i, j),
            _ if convention.is_dependent_index(i, n) || convention.is_dependent_index(j, n) => 0.0,
            CompositionConvention::Dependent => {
                self.d2y_dxi_dxj(x, i, j) - self.d2y_dxi_dxj(x, i, last)
                    - self.d2y_dxi_dxj(x, j, last)
                    + self.d2y_dxi_dxj(x, last, last)
            }
        }
    }
}

// Pair function $f=x_ix_j\frac{x_i+x_j}{\beta^2x_i+x_j}$ and its partial
// derivatives. For $x_i=x_j=0$ the pair does not contribute.

fn f(beta: f64, xi: f64, xj: f64) -> f64 {
    let d = beta * beta * xi + xj;
    if d == 0.0 {
        return 0.0;
    }
    xi * xj * (xi + xj) / d
}

fn df_dxi(beta: f64, xi: f64, xj: f64) -> f64 {
    let b2 = beta * beta;
    let d = b2 * xi + xj;
    if d == 0.0 {
        return 0.0;
    }
    xj * (2.0 * xi + xj) / d - b2 * xi * xj * (xi + xj) / (d * d)
}

fn d2f_dxi2(beta: f64, xi: f64, xj: f64) -> f64 {
    let b2 = beta * beta;
    let d = b2 * xi + xj;
    if d == 0.0 {
        return 0.0;
    }
    2.0 * xj / d - 2.0 * b2 * xj * (2.0 * xi + xj) / (d * d)
        + 2.0 * b2 * b2 * xi * xj * (xi + xj) / (d * d * d)
}

fn d2f_dxi_dxj(beta: f64, xi: f64, xj: f64) -> f64 {
    let b2 = beta * beta;
    let d = b2 * xi + xj;
    if d == 0.0 {
        return 0.0;
    }
    let s = xi + xj;
    2.0 * s / d - (xj * (2.0 * xi + xj) + b2 * xi * (xi + 2.0 * xj)) / (d * d)
        + 2.0 * b2 * xi * xj * s / (d * d * d)
}

/// GERG-2008 reducing function.
///
/// The reducing temperature follows the mixing rule with
/// $T_{\mathrm{c},ij}=\sqrt{T_{\mathrm{c},i}T_{\mathrm{c},j}}$, the inverse
/// reducing density with
/// $v_{\mathrm{c},ij}=\frac{1}{8}\left(\rho_{\mathrm{c},i}^{-1/3}+\rho_{\mathrm{c},j}^{-1/3}\right)^3$.
#[derive(Clone, Debug)]
pub struct GergReducing {
    temperature: MixingRule,
    volume: MixingRule,
}

impl GergReducing {
    /// Reducing function from critical parameters and binary interaction
    /// parameters. `beta_t` and `beta_v` have to satisfy $\beta_{ji}=1/\beta_{ij}$.
    pub fn new(
        tc: &Array1<f64>,
        rhoc: &Array1<f64>,
        beta_t: &Array2<f64>,
        gamma_t: &Array2<f64>,
        beta_v: &Array2<f64>,
        gamma_v: &Array2<f64>,
    ) -> Self {
        let n = tc.len();
        let tc_ij = Array2::from_shape_fn((n, n), |(i, j)| (tc[i] * tc[j]).sqrt());
        let vc = rhoc.mapv(f64::recip);
        let vc_ij = Array2::from_shape_fn((n, n), |(i, j)| {
            0.125 * (rhoc[i].cbrt().recip() + rhoc[j].cbrt().recip()).powi(3)
        });
        Self {
            temperature: MixingRule::new(tc.clone(), tc_ij, beta_t, gamma_t),
            volume: MixingRule::new(vc, vc_ij, beta_v, gamma_v),
        }
    }

    pub fn from_parameters(parameters: &MultiFluidParameters) -> Self {
        Self::new(
            &parameters.tc,
            &parameters.rhoc,
            &parameters.beta_t,
            &parameters.gamma_t,
            &parameters.beta_v,
            &parameters.gamma_v,
        )
    }

    /// Reducing molar volume $v_\mathrm{r}=1/\rho_\mathrm{r}$
    pub fn vr(&self, x: &Array1<f64>) -> f64 {
        self.volume.y(x)
    }
}

impl ReducingFunction for GergReducing {
    fn tr(&self, x: &Array1<f64>) -> f64 {
        self.temperature.y(x)
    }

    fn rhor(&self, x: &Array1<f64>) -> f64 {
        self.vr(x).recip()
    }

    fn dtr_dxi(&self, x: &Array1<f64>, i: usize, convention: CompositionConvention) -> f64 {
        self.temperature.dy(x, i, convention)
    }

    fn drhor_dxi(&self, x: &Array1<f64>, i: usize, convention: CompositionConvention) -> f64 {
        let rhor = self.rhor(x);
        -rhor * rhor * self.volume.dy(x, i, convention)
    }

    fn d2tr_dxi_dxj(
        &self,
        x: &Array1<f64>,
        i: usize,
        j: usize,
        convention: CompositionConvention,
    ) -> f64 {
        self.temperature.d2y(x, i, j, convention)
    }

    fn d2rhor_dxi_dxj(
        &self,
        x: &Array1<f64>,
        i: usize,
        j: usize,
        convention: CompositionConvention,
    ) -> f64 {
        let rhor = self.rhor(x);
        let dvr_dxi = self.volume.dy(x, i, convention);
        let dvr_dxj = self.volume.dy(x, j, convention);
        2.0 * rhor.powi(3) * dvr_dxi * dvr_dxj
            - rhor * rhor * self.volume.d2y(x, i, j, convention)
    }
}
