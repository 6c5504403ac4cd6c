use super::State;
use crate::equation_of_state::{pair_row_sum, AlpharDerivatives, CompositionConvention, MixtureModel};

/// # Composition derivatives
///
/// Derivatives of $\alpha^\mathrm{r}$ w.r.t. the mole fractions at constant
/// $\tau$ and $\delta$.
impl<E: MixtureModel> State<E> {
    /// $\frac{\partial\alpha^\mathrm{r}}{\partial x_i}$ together with its $\tau$ and $\delta$ derivatives.
    ///
    /// With $A_{ij}=F_{ij}\alpha^\mathrm{r}_{ij}$ and $x_N=1-\sum_{k<N}x_k$, the
    /// dependent formulation reads
    /// $$\frac{\partial\alpha^\mathrm{r}}{\partial x_i}=\alpha^\mathrm{r}_{0i}-\alpha^\mathrm{r}_{0N}+(1-2x_i)A_{iN}+\sum_{k<N,k\neq i}x_k\left(A_{ik}-A_{iN}-A_{kN}\right)$$
    fn composition_derivative(
        &self,
        i: usize,
        convention: CompositionConvention,
    ) -> AlpharDerivatives {
        let x = &self.molefracs;
        match convention {
            CompositionConvention::Independent => self.pure[i] + pair_row_sum(&self.pairs, x, i),
            CompositionConvention::Dependent => {
                let last = self.components() - 1;
                if convention.is_dependent_index(i, self.components()) {
                    return AlpharDerivatives::default();
                }
                let a_in = self.pairs[[i, last]];
                (0..last).filter(|&k| k != i).fold(
                    self.pure[i] - self.pure[last] + a_in * (1.0 - 2.0 * x[i]),
                    |acc, k| acc + (self.pairs[[i, k]] - a_in - self.pairs[[k, last]]) * x[k],
                )
            }
        }
    }

    /// $\left(\frac{\partial\alpha^\mathrm{r}}{\partial x_i}\right)_{\tau,\delta,x_j}$
    pub fn dalphar_dxi(&self, i: usize, convention: CompositionConvention) -> f64 {
        self.composition_derivative(i, convention).alphar
    }

    /// $\frac{\partial^2\alpha^\mathrm{r}}{\partial x_i\partial\tau}$
    pub fn d2alphar_dxi_dtau(&self, i: usize, convention: CompositionConvention) -> f64 {
        self.composition_derivative(i, convention).dalphar_dtau
    }

    /// $\frac{\partial^2\alpha^\mathrm{r}}{\partial x_i\partial\delta}$
    pub fn d2alphar_dxi_ddelta(&self, i: usize, convention: CompositionConvention) -> f64 {
        self.composition_derivative(i, convention).dalphar_ddelta
    }

    /// $\left(\frac{\partial^2\alpha^\mathrm{r}}{\partial x_i\partial x_j}\right)_{\tau,\delta}$
    ///
    /// The pure fluid contributions are linear in composition and do not contribute.
    pub fn d2alphar_dxi_dxj(&self, i: usize, j: usize, convention: CompositionConvention) -> f64 {
        match convention {
            CompositionConvention::Independent => {
                if i == j {
                    0.0
                } else {
                    self.pairs[[i, j]].alphar
                }
            }
            CompositionConvention::Dependent => {
                let n = self.components();
                if convention.is_dependent_index(i, n) || convention.is_dependent_index(j, n) {
                    return 0.0;
                }
                let last = n - 1;
                let a_in = self.pairs[[i, last]].alphar;
                if i == j {
                    -2.0 * a_in
                } else {
                    self.pairs[[i, j]].alphar - a_in - self.pairs[[j, last]].alphar
                }
            }
        }
    }
}
