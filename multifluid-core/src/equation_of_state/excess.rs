use super::{AlpharDerivatives, DepartureFunction, ResidualHelmholtz};
use crate::errors::{EosError, EosResult};
use ndarray::{Array1, Array2};

/// Excess part of the reduced residual Helmholtz energy of a mixture:
/// $\Delta\alpha^\mathrm{r}=\sum_{i<j}x_ix_jF_{ij}\alpha^\mathrm{r}_{ij}(\tau,\delta)$
///
/// Every pair is stored once and shared by the entries $(i,j)$ and $(j,i)$.
/// Pairs without a departure function do not contribute.
///
/// All composition derivatives are taken with all mole fractions as
/// independent variables.
#[derive(Clone, Debug)]
pub struct ExcessTerm {
    f: Array2<f64>,
    departure: Vec<DepartureFunction>,
    index: Array2<Option<usize>>,
}

impl ExcessTerm {
    /// Excess term without any departure functions.
    pub fn new(components: usize) -> Self {
        Self {
            f: Array2::zeros((components, components)),
            departure: Vec::new(),
            index: Array2::from_elem((components, components), None),
        }
    }

    pub fn components(&self) -> usize {
        self.f.nrows()
    }

    /// Register the departure function of the pair $(i,j)$ with weight $F_{ij}$.
    ///
    /// An existing departure function of the pair is replaced.
    pub fn add_pair(
        &mut self,
        i: usize,
        j: usize,
        f: f64,
        departure: DepartureFunction,
    ) -> EosResult<()> {
        let n = self.components();
        if i >= n || j >= n {
            return Err(EosError::IncompatibleComponents(n, i.max(j) + 1));
        }
        if i == j {
            return Err(EosError::Error(format!(
                "A departure function needs two distinct components, got ({i}, {j})."
            )));
        }
        tracing::trace!(i, j, f, terms = departure.len(), "add departure function");
        let k = match self.index[[i, j]] {
            Some(k) => {
                self.departure[k] = departure;
                k
            }
            None => {
                self.departure.push(departure);
                self.departure.len() - 1
            }
        };
        self.index[[i, j]] = Some(k);
        self.index[[j, i]] = Some(k);
        self.f[[i, j]] = f;
        self.f[[j, i]] = f;
        Ok(())
    }

    /// Weight $F_{ij}$ and departure function of the pair $(i,j)$, if present.
    pub fn pair(&self, i: usize, j: usize) -> Option<(f64, &DepartureFunction)> {
        self.index[[i, j]].map(|k| (self.f[[i, j]], &self.departure[k]))
    }

    /// Number of pairs with a departure function.
    pub fn pairs(&self) -> usize {
        self.departure.len()
    }

    /// $F_{ij}\alpha^\mathrm{r}_{ij}$ and its derivatives; zero for $i=j$ and
    /// for pairs without departure function.
    pub fn pair_contribution(&self, i: usize, j: usize, tau: f64, delta: f64) -> AlpharDerivatives {
        match self.pair(i, j) {
            Some((f, departure)) if i != j && f != 0.0 => {
                departure.alphar_derivatives(tau, delta) * f
            }
            _ => AlpharDerivatives::default(),
        }
    }

    /// Matrix of all pair contributions $F_{ij}\alpha^\mathrm{r}_{ij}$ at a
    /// reduced state. The matrix is symmetric with zero diagonal.
    pub fn pair_matrix(&self, tau: f64, delta: f64) -> Array2<AlpharDerivatives> {
        let n = self.components();
        let mut a = Array2::from_elem((n, n), AlpharDerivatives::default());
        for i in 0..n {
            for j in i + 1..n {
                let aij = self.pair_contribution(i, j, tau, delta);
                a[[i, j]] = aij;
                a[[j, i]] = aij;
            }
        }
        a
    }

    /// $\Delta\alpha^\mathrm{r}$ and all its derivatives w.r.t. $\tau$ and $\delta$.
    pub fn alphar_derivatives(&self, tau: f64, delta: f64, x: &Array1<f64>) -> AlpharDerivatives {
        mix_pairs(&self.pair_matrix(tau, delta), x)
    }

    pub fn alphar(&self, tau: f64, delta: f64, x: &Array1<f64>) -> f64 {
        self.alphar_derivatives(tau, delta, x).alphar
    }

    pub fn dalphar_ddelta(&self, tau: f64, delta: f64, x: &Array1<f64>) -> f64 {
        self.alphar_derivatives(tau, delta, x).dalphar_ddelta
    }

    pub fn dalphar_dtau(&self, tau: f64, delta: f64, x: &Array1<f64>) -> f64 {
        self.alphar_derivatives(tau, delta, x).dalphar_dtau
    }

    pub fn d2alphar_ddelta2(&self, tau: f64, delta: f64, x: &Array1<f64>) -> f64 {
        self.alphar_derivatives(tau, delta, x).d2alphar_ddelta2
    }

    pub fn d2alphar_ddelta_dtau(&self, tau: f64, delta: f64, x: &Array1<f64>) -> f64 {
        self.alphar_derivatives(tau, delta, x).d2alphar_ddelta_dtau
    }

    pub fn d2alphar_dtau2(&self, tau: f64, delta: f64, x: &Array1<f64>) -> f64 {
        self.alphar_derivatives(tau, delta, x).d2alphar_dtau2
    }

    /// $\sum_{j\neq i}x_jF_{ij}\alpha^\mathrm{r}_{ij}$ together with its $\tau$ and $\delta$ derivatives.
    fn composition_derivative(
        &self,
        tau: f64,
        delta: f64,
        x: &Array1<f64>,
        i: usize,
    ) -> AlpharDerivatives {
        (0..self.components())
            .filter(|&j| j != i)
            .map(|j| self.pair_contribution(i, j, tau, delta) * x[j])
            .sum()
    }

    /// $\left(\frac{\partial\Delta\alpha^\mathrm{r}}{\partial x_i}\right)_{\tau,\delta,x_j}$
    pub fn dalphar_dxi(&self, tau: f64, delta: f64, x: &Array1<f64>, i: usize) -> f64 {
        self.composition_derivative(tau, delta, x, i).alphar
    }

    /// $\frac{\partial^2\Delta\alpha^\mathrm{r}}{\partial x_i\partial\tau}$
    pub fn d2alphar_dxi_dtau(&self, tau: f64, delta: f64, x: &Array1<f64>, i: usize) -> f64 {
        self.composition_derivative(tau, delta, x, i).dalphar_dtau
    }

    /// $\frac{\partial^2\Delta\alpha^\mathrm{r}}{\partial x_i\partial\delta}$
    pub fn d2alphar_dxi_ddelta(&self, tau: f64, delta: f64, x: &Array1<f64>, i: usize) -> f64 {
        self.composition_derivative(tau, delta, x, i).dalphar_ddelta
    }

    /// $\frac{\partial^2\Delta\alpha^\mathrm{r}}{\partial x_i\partial x_j}$
    ///
    /// The excess term is bilinear in the mole fractions, so the result does
    /// not depend on composition and vanishes for $i=j$.
    pub fn d2alphar_dxi_dxj(&self, tau: f64, delta: f64, i: usize, j: usize) -> f64 {
        if i == j {
            0.0
        } else {
            self.pair_contribution(i, j, tau, delta).alphar
        }
    }
}

/// $\sum_{i<j}x_ix_jA_{ij}$ for a symmetric matrix of pair contributions.
pub(crate) fn mix_pairs(pairs: &Array2<AlpharDerivatives>, x: &Array1<f64>) -> AlpharDerivatives {
    let n = x.len();
    (0..n)
        .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
        .map(|(i, j)| pairs[[i, j]] * (x[i] * x[j]))
        .sum()
}

/// $\sum_{j\neq i}x_jA_{ij}$ for a symmetric matrix of pair contributions.
pub(crate) fn pair_row_sum(
    pairs: &Array2<AlpharDerivatives>,
    x: &Array1<f64>,
    i: usize,
) -> AlpharDerivatives {
    (0..x.len())
        .filter(|&j| j != i)
        .map(|j| pairs[[i, j]] * x[j])
        .sum()
}
