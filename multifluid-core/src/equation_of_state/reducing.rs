use super::CompositionConvention;
use ndarray::Array1;

/// Composition dependence of the reducing temperature $T_\mathrm{r}$ and
/// the reducing density $\rho_\mathrm{r}$.
///
/// Implementors provide the reducing parameters and their first and second
/// mole fraction derivatives for both composition conventions. Under
/// [CompositionConvention::Dependent], derivatives w.r.t. the last mole
/// fraction have to be exactly zero. The derivatives w.r.t. mole numbers
/// follow generically.
pub trait ReducingFunction: Send + Sync {
    /// Reducing temperature $T_\mathrm{r}$ in K.
    fn tr(&self, x: &Array1<f64>) -> f64;

    /// Reducing density $\rho_\mathrm{r}$ in mol/m³.
    fn rhor(&self, x: &Array1<f64>) -> f64;

    /// $\left(\frac{\partial T_\mathrm{r}}{\partial x_i}\right)_{x_j}$
    fn dtr_dxi(&self, x: &Array1<f64>, i: usize, convention: CompositionConvention) -> f64;

    /// $\left(\frac{\partial\rho_\mathrm{r}}{\partial x_i}\right)_{x_j}$
    fn drhor_dxi(&self, x: &Array1<f64>, i: usize, convention: CompositionConvention) -> f64;

    /// $\frac{\partial^2T_\mathrm{r}}{\partial x_i\partial x_j}$
    fn d2tr_dxi_dxj(
        &self,
        x: &Array1<f64>,
        i: usize,
        j: usize,
        convention: CompositionConvention,
    ) -> f64;

    /// $\frac{\partial^2\rho_\mathrm{r}}{\partial x_i\partial x_j}$
    fn d2rhor_dxi_dxj(
        &self,
        x: &Array1<f64>,
        i: usize,
        j: usize,
        convention: CompositionConvention,
    ) -> f64;

    /// $n\left(\frac{\partial T_\mathrm{r}}{\partial n_i}\right)_{n_j}=\frac{\partial T_\mathrm{r}}{\partial x_i}-\sum_kx_k\frac{\partial T_\mathrm{r}}{\partial x_k}$
    fn ndtr_dni(&self, x: &Array1<f64>, i: usize, convention: CompositionConvention) -> f64 {
        n_derivative(x, i, convention, |k| self.dtr_dxi(x, k, convention))
    }

    /// $n\left(\frac{\partial\rho_\mathrm{r}}{\partial n_i}\right)_{n_j}=\frac{\partial\rho_\mathrm{r}}{\partial x_i}-\sum_kx_k\frac{\partial\rho_\mathrm{r}}{\partial x_k}$
    fn ndrhor_dni(&self, x: &Array1<f64>, i: usize, convention: CompositionConvention) -> f64 {
        n_derivative(x, i, convention, |k| self.drhor_dxi(x, k, convention))
    }

    /// $\frac{\partial}{\partial x_j}\left[n\left(\frac{\partial T_\mathrm{r}}{\partial n_i}\right)_{n_j}\right]_{x_k}$
    fn d_ndtr_dni_dxj(
        &self,
        x: &Array1<f64>,
        i: usize,
        j: usize,
        convention: CompositionConvention,
    ) -> f64 {
        d_n_derivative_dxj(
            x,
            i,
            j,
            convention,
            |k| self.dtr_dxi(x, k, convention),
            |k, l| self.d2tr_dxi_dxj(x, k, l, convention),
        )
    }

    /// $\frac{\partial}{\partial x_j}\left[n\left(\frac{\partial\rho_\mathrm{r}}{\partial n_i}\right)_{n_j}\right]_{x_k}$
    fn d_ndrhor_dni_dxj(
        &self,
        x: &Array1<f64>,
        i: usize,
        j: usize,
        convention: CompositionConvention,
    ) -> f64 {
        d_n_derivative_dxj(
            x,
            i,
            j,
            convention,
            |k| self.drhor_dxi(x, k, convention),
            |k, l| self.d2rhor_dxi_dxj(x, k, l, convention),
        )
    }
}

fn n_derivative<F: Fn(usize) -> f64>(
    x: &Array1<f64>,
    i: usize,
    convention: CompositionConvention,
    dy_dx: F,
) -> f64 {
    let nk = convention.independent_components(x.len());
    dy_dx(i) - (0..nk).map(|k| x[k] * dy_dx(k)).sum::<f64>()
}

fn d_n_derivative_dxj<F, G>(
    x: &Array1<f64>,
    i: usize,
    j: usize,
    convention: CompositionConvention,
    dy_dx: F,
    d2y_dx2: G,
) -> f64
where
    F: Fn(usize) -> f64,
    G: Fn(usize, usize) -> f64,
{
    let nk = convention.independent_components(x.len());
    d2y_dx2(j, i) - dy_dx(j) - (0..nk).map(|k| x[k] * d2y_dx2(j, k)).sum::<f64>()
}
