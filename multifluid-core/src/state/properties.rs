use super::State;
use crate::equation_of_state::{CompositionConvention, MixtureModel};
use ndarray::{Array1, Array2};

// reducing function shorthands
impl<E: MixtureModel> State<E> {
    fn ndtr_dni(&self, i: usize, convention: CompositionConvention) -> f64 {
        self.eos
            .reducing_function()
            .ndtr_dni(&self.molefracs, i, convention)
    }

    fn ndrhor_dni(&self, i: usize, convention: CompositionConvention) -> f64 {
        self.eos
            .reducing_function()
            .ndrhor_dni(&self.molefracs, i, convention)
    }

    fn dtr_dxj(&self, j: usize, convention: CompositionConvention) -> f64 {
        self.eos
            .reducing_function()
            .dtr_dxi(&self.molefracs, j, convention)
    }

    fn drhor_dxj(&self, j: usize, convention: CompositionConvention) -> f64 {
        self.eos
            .reducing_function()
            .drhor_dxi(&self.molefracs, j, convention)
    }

    /// $\sum_kx_kf(k)$ over all mole fractions that are independent variables.
    fn composition_sum<F: Fn(usize) -> f64>(&self, convention: CompositionConvention, f: F) -> f64 {
        let nk = convention.independent_components(self.components());
        (0..nk).map(|k| self.molefracs[k] * f(k)).sum()
    }
}

/// # Mole number derivatives
impl<E: MixtureModel> State<E> {
    /// $n\left(\frac{\partial\alpha^\mathrm{r}}{\partial n_i}\right)_{T,V,n_j}=\delta\alpha^\mathrm{r}_\delta\left(1-\frac{1}{\rho_\mathrm{r}}n\frac{\partial\rho_\mathrm{r}}{\partial n_i}\right)+\tau\alpha^\mathrm{r}_\tau\frac{1}{T_\mathrm{r}}n\frac{\partial T_\mathrm{r}}{\partial n_i}+\frac{\partial\alpha^\mathrm{r}}{\partial x_i}-\sum_kx_k\frac{\partial\alpha^\mathrm{r}}{\partial x_k}$
    pub fn ndalphar_dni(&self, i: usize, convention: CompositionConvention) -> f64 {
        let term1 = self.delta
            * self.dalphar_ddelta()
            * (1.0 - self.ndrhor_dni(i, convention) / self.reducing_density);
        let term2 = self.tau * self.dalphar_dtau() * self.ndtr_dni(i, convention)
            / self.reducing_temperature;
        let s = self.composition_sum(convention, |k| self.dalphar_dxi(k, convention));
        term1 + term2 + self.dalphar_dxi(i, convention) - s
    }

    /// $\left(\frac{\partial n\alpha^\mathrm{r}}{\partial n_i}\right)_{T,V,n_j}=\alpha^\mathrm{r}+n\left(\frac{\partial\alpha^\mathrm{r}}{\partial n_i}\right)_{T,V,n_j}$
    pub fn dnalphar_dni(&self, i: usize, convention: CompositionConvention) -> f64 {
        self.alphar() + self.ndalphar_dni(i, convention)
    }

    /// $\left(\frac{\partial}{\partial\delta}\left[n\left(\frac{\partial\alpha^\mathrm{r}}{\partial n_i}\right)_{T,V,n_j}\right]\right)_{\tau,\mathbf{x}}$
    pub fn d_ndalphardni_ddelta(&self, i: usize, convention: CompositionConvention) -> f64 {
        let term1 = (self.delta * self.d2alphar_ddelta2() + self.dalphar_ddelta())
            * (1.0 - self.ndrhor_dni(i, convention) / self.reducing_density);
        let term2 = self.tau * self.d2alphar_ddelta_dtau() * self.ndtr_dni(i, convention)
            / self.reducing_temperature;
        let s = self.composition_sum(convention, |k| self.d2alphar_dxi_ddelta(k, convention));
        term1 + term2 + self.d2alphar_dxi_ddelta(i, convention) - s
    }

    /// $\left(\frac{\partial}{\partial\tau}\left[n\left(\frac{\partial\alpha^\mathrm{r}}{\partial n_i}\right)_{T,V,n_j}\right]\right)_{\delta,\mathbf{x}}$
    pub fn d_ndalphardni_dtau(&self, i: usize, convention: CompositionConvention) -> f64 {
        let term1 = self.delta
            * self.d2alphar_ddelta_dtau()
            * (1.0 - self.ndrhor_dni(i, convention) / self.reducing_density);
        let term2 = (self.tau * self.d2alphar_dtau2() + self.dalphar_dtau())
            * self.ndtr_dni(i, convention)
            / self.reducing_temperature;
        let s = self.composition_sum(convention, |k| self.d2alphar_dxi_dtau(k, convention));
        term1 + term2 + self.d2alphar_dxi_dtau(i, convention) - s
    }

    /// $n\left(\frac{\partial\delta}{\partial n_i}\right)_{T,V,n_j}=\delta-\frac{\delta}{\rho_\mathrm{r}}n\frac{\partial\rho_\mathrm{r}}{\partial n_i}$
    pub fn nddelta_dni(&self, i: usize, convention: CompositionConvention) -> f64 {
        self.delta - self.delta / self.reducing_density * self.ndrhor_dni(i, convention)
    }

    /// $n\left(\frac{\partial\tau}{\partial n_i}\right)_{T,V,n_j}=\frac{\tau}{T_\mathrm{r}}n\frac{\partial T_\mathrm{r}}{\partial n_i}$
    pub fn ndtau_dni(&self, i: usize, convention: CompositionConvention) -> f64 {
        self.tau / self.reducing_temperature * self.ndtr_dni(i, convention)
    }

    /// $\left(\frac{\partial}{\partial x_j}\left[n\left(\frac{\partial\alpha^\mathrm{r}}{\partial n_i}\right)_{T,V,n_j}\right]\right)_{\tau,\delta,x_i}$
    pub fn d_ndalphardni_dxj_const_delta_tau(
        &self,
        i: usize,
        j: usize,
        convention: CompositionConvention,
    ) -> f64 {
        let reducing = self.eos.reducing_function();
        let x = &self.molefracs;
        let (rhor, tr) = (self.reducing_density, self.reducing_temperature);
        let ndrhor_dni = self.ndrhor_dni(i, convention);
        let ndtr_dni = self.ndtr_dni(i, convention);

        let line1 =
            self.delta * self.d2alphar_dxi_ddelta(j, convention) * (1.0 - ndrhor_dni / rhor);
        let line2 = -self.delta * self.dalphar_ddelta() / rhor
            * (reducing.d_ndrhor_dni_dxj(x, i, j, convention)
                - self.drhor_dxj(j, convention) * ndrhor_dni / rhor);
        let line3 = self.tau * self.d2alphar_dxi_dtau(j, convention) * ndtr_dni / tr;
        let line4 = self.tau * self.dalphar_dtau() / tr
            * (reducing.d_ndtr_dni_dxj(x, i, j, convention)
                - self.dtr_dxj(j, convention) * ndtr_dni / tr);
        let s = self.composition_sum(convention, |k| self.d2alphar_dxi_dxj(j, k, convention));
        let line5 = self.d2alphar_dxi_dxj(i, j, convention) - self.dalphar_dxi(j, convention) - s;
        line1 + line2 + line3 + line4 + line5
    }

    /// $\left(\frac{\partial}{\partial x_j}\left[n\left(\frac{\partial\alpha^\mathrm{r}}{\partial n_i}\right)_{T,V,n_j}\right]\right)_{T,V,x_i}$
    pub fn d_ndalphardni_dxj_const_t_v(
        &self,
        i: usize,
        j: usize,
        convention: CompositionConvention,
    ) -> f64 {
        self.d_ndalphardni_dxj_const_delta_tau(i, j, convention)
            + self.ddelta_dxj_const_t_v(j, convention) * self.d_ndalphardni_ddelta(i, convention)
            + self.dtau_dxj_const_t_v(j, convention) * self.d_ndalphardni_dtau(i, convention)
    }

    /// $n\left(\frac{\partial^2n\alpha^\mathrm{r}}{\partial n_i\partial n_j}\right)_{T,V}$
    pub fn nd2nalphar_dni_dnj(&self, i: usize, j: usize, convention: CompositionConvention) -> f64 {
        let line0 = self.ndalphar_dni(j, convention);
        let line1 = self.d_ndalphardni_ddelta(i, convention) * self.nddelta_dni(j, convention);
        let line2 = self.d_ndalphardni_dtau(i, convention) * self.ndtau_dni(j, convention);
        let s = self.composition_sum(convention, |k| {
            self.d_ndalphardni_dxj_const_delta_tau(i, k, convention)
        });
        let line3 = self.d_ndalphardni_dxj_const_delta_tau(i, j, convention) - s;
        line0 + line1 + line2 + line3
    }

    /// $\left(\frac{\partial^2n\alpha^\mathrm{r}}{\partial n_i\partial T}\right)_{V,n_j}=-\frac{\tau}{T}\left(\alpha^\mathrm{r}_\tau+\frac{\partial}{\partial\tau}\left[n\frac{\partial\alpha^\mathrm{r}}{\partial n_i}\right]\right)$
    pub fn d2nalphar_dni_dt(&self, i: usize, convention: CompositionConvention) -> f64 {
        -self.tau / self.temperature
            * (self.dalphar_dtau() + self.d_ndalphardni_dtau(i, convention))
    }

    /// $\left(\frac{\partial\delta}{\partial x_j}\right)_{T,V,x_i}=-\frac{\delta}{\rho_\mathrm{r}}\frac{\partial\rho_\mathrm{r}}{\partial x_j}$
    pub fn ddelta_dxj_const_t_v(&self, j: usize, convention: CompositionConvention) -> f64 {
        -self.delta / self.reducing_density * self.drhor_dxj(j, convention)
    }

    /// $\left(\frac{\partial\tau}{\partial x_j}\right)_{T,V,x_i}=\frac{1}{T}\frac{\partial T_\mathrm{r}}{\partial x_j}$
    pub fn dtau_dxj_const_t_v(&self, j: usize, convention: CompositionConvention) -> f64 {
        self.dtr_dxj(j, convention) / self.temperature
    }

    /// $\left(\frac{\partial\alpha^\mathrm{r}}{\partial x_j}\right)_{T,V,x_i}$
    pub fn dalphar_dxj_const_t_v(&self, j: usize, convention: CompositionConvention) -> f64 {
        self.dalphar_ddelta() * self.ddelta_dxj_const_t_v(j, convention)
            + self.dalphar_dtau() * self.dtau_dxj_const_t_v(j, convention)
            + self.dalphar_dxi(j, convention)
    }

    /// $\left(\frac{\partial\alpha^\mathrm{r}_\delta}{\partial x_j}\right)_{T,V,x_i}$
    pub fn d_dalphar_ddelta_dxj_const_t_v(
        &self,
        j: usize,
        convention: CompositionConvention,
    ) -> f64 {
        self.d2alphar_ddelta2() * self.ddelta_dxj_const_t_v(j, convention)
            + self.d2alphar_ddelta_dtau() * self.dtau_dxj_const_t_v(j, convention)
            + self.d2alphar_dxi_ddelta(j, convention)
    }

    /// $\left(\frac{\partial}{\partial x_j}\left[\frac{\partial n\alpha^\mathrm{r}}{\partial n_i}\right]\right)_{T,V,x_i}$
    pub fn d2nalphar_dxj_dni_const_t_v(
        &self,
        j: usize,
        i: usize,
        convention: CompositionConvention,
    ) -> f64 {
        self.dalphar_dxj_const_t_v(j, convention)
            + self.d_ndalphardni_dxj_const_t_v(i, j, convention)
    }
}

/// # Pressure and partial molar volume
impl<E: MixtureModel> State<E> {
    /// Pressure: $p=\rho RT\left(1+\delta\alpha^\mathrm{r}_\delta\right)$
    pub fn pressure(&self) -> f64 {
        self.density
            * self.gas_constant()
            * self.temperature
            * (1.0 + self.delta * self.dalphar_ddelta())
    }

    /// Compressibility factor: $Z=\frac{p}{\rho RT}$
    pub fn compressibility(&self) -> f64 {
        1.0 + self.delta * self.dalphar_ddelta()
    }

    /// Partial derivative of pressure w.r.t. temperature: $\left(\frac{\partial p}{\partial T}\right)_{V,n_i}$
    pub fn dp_dt_const_v_n(&self) -> f64 {
        self.density
            * self.gas_constant()
            * (1.0 + self.delta * self.dalphar_ddelta()
                - self.delta * self.tau * self.d2alphar_ddelta_dtau())
    }

    /// Partial derivative of pressure w.r.t. density: $\left(\frac{\partial p}{\partial\rho}\right)_{T,n_i}$
    pub fn dp_drho_const_t_n(&self) -> f64 {
        self.gas_constant()
            * self.temperature
            * (1.0
                + 2.0 * self.delta * self.dalphar_ddelta()
                + self.delta * self.delta * self.d2alphar_ddelta2())
    }

    /// Partial derivative of pressure w.r.t. volume: $n\left(\frac{\partial p}{\partial V}\right)_{T,n_i}=-\rho^2\left(\frac{\partial p}{\partial\rho}\right)_{T,n_i}$
    pub fn ndp_dv_const_t_n(&self) -> f64 {
        -self.density * self.density * self.dp_drho_const_t_n()
    }

    /// Partial derivative of pressure w.r.t. moles: $n\left(\frac{\partial p}{\partial n_i}\right)_{T,V,n_j}$
    pub fn ndp_dni_const_t_v(&self, i: usize, convention: CompositionConvention) -> f64 {
        self.density
            * self.gas_constant()
            * self.temperature
            * (1.0
                + self.delta * self.dalphar_ddelta()
                + self.delta * self.d_ndalphardni_ddelta(i, convention))
    }

    /// Partial derivative of pressure w.r.t. mole fraction: $\left(\frac{\partial p}{\partial x_j}\right)_{T,V,x_i}$
    pub fn dp_dxj_const_t_v(&self, j: usize, convention: CompositionConvention) -> f64 {
        self.density
            * self.gas_constant()
            * self.temperature
            * (self.ddelta_dxj_const_t_v(j, convention) * self.dalphar_ddelta()
                + self.delta * self.d_dalphar_ddelta_dxj_const_t_v(j, convention))
    }

    /// Partial molar volume: $v_i=\left(\frac{\partial V}{\partial n_i}\right)_{T,p,n_j}=-\frac{\left(\frac{\partial p}{\partial n_i}\right)_{T,V,n_j}}{\left(\frac{\partial p}{\partial V}\right)_{T,n_k}}$
    pub fn partial_molar_volume(&self, i: usize, convention: CompositionConvention) -> f64 {
        -self.ndp_dni_const_t_v(i, convention) / self.ndp_dv_const_t_n()
    }

    /// Partial molar volumes of all components.
    pub fn partial_molar_volumes(&self, convention: CompositionConvention) -> Array1<f64> {
        Array1::from_shape_fn(self.components(), |i| {
            self.partial_molar_volume(i, convention)
        })
    }
}

/// # Fugacity
impl<E: MixtureModel> State<E> {
    /// Fugacity: $f_i=x_i\rho RT\exp\left(\frac{\partial n\alpha^\mathrm{r}}{\partial n_i}\right)$
    pub fn fugacity(&self, i: usize, convention: CompositionConvention) -> f64 {
        self.molefracs[i]
            * self.density
            * self.gas_constant()
            * self.temperature
            * self.dnalphar_dni(i, convention).exp()
    }

    /// Logarithm of the fugacity coefficient: $\ln\varphi_i=\frac{\partial n\alpha^\mathrm{r}}{\partial n_i}-\ln Z$
    pub fn ln_fugacity_coefficient(&self, i: usize, convention: CompositionConvention) -> f64 {
        self.alphar() + self.ndalphar_dni(i, convention) - self.compressibility().ln()
    }

    /// Logarithms of the fugacity coefficients of all components.
    pub fn ln_phi(&self, convention: CompositionConvention) -> Array1<f64> {
        Array1::from_shape_fn(self.components(), |i| {
            self.ln_fugacity_coefficient(i, convention)
        })
    }

    /// $\left(\frac{\partial\ln f_i}{\partial T}\right)_{\rho,n}$
    pub fn dln_fugacity_dt_const_rho_n(&self, i: usize, convention: CompositionConvention) -> f64 {
        (1.0 - self.tau * self.dalphar_dtau() - self.tau * self.d_ndalphardni_dtau(i, convention))
            / self.temperature
    }

    /// $\left(\frac{\partial\ln f_i}{\partial\rho}\right)_{T,n}$
    pub fn dln_fugacity_drho_const_t_n(&self, i: usize, convention: CompositionConvention) -> f64 {
        (1.0 + self.delta * self.dalphar_ddelta()
            + self.delta * self.d_ndalphardni_ddelta(i, convention))
            / self.density
    }

    /// $\left(\frac{\partial\ln f_i}{\partial\tau}\right)_{\delta,\mathbf{x}}$
    pub fn dln_fugacity_dtau_const_delta_x(
        &self,
        i: usize,
        convention: CompositionConvention,
    ) -> f64 {
        -1.0 / self.tau + self.dalphar_dtau() + self.d_ndalphardni_dtau(i, convention)
    }

    /// $\delta\left(\frac{\partial\ln f_i}{\partial\delta}\right)_{\tau,\mathbf{x}}$
    ///
    /// Note the factor $\delta$ in the result.
    pub fn dln_fugacity_ddelta_const_tau_x(
        &self,
        i: usize,
        convention: CompositionConvention,
    ) -> f64 {
        1.0 + self.delta * self.dalphar_ddelta()
            + self.delta * self.d_ndalphardni_ddelta(i, convention)
    }

    /// $\left(\frac{\partial\ln f_i}{\partial x_j}\right)_{T,\rho,x_i}$
    pub fn dln_fugacity_dxj_const_t_rho(
        &self,
        i: usize,
        j: usize,
        convention: CompositionConvention,
    ) -> f64 {
        let (rhor, tr) = (self.reducing_density, self.reducing_temperature);
        let dtr_dxj = self.dtr_dxj(j, convention);
        let drhor_dxj = self.drhor_dxj(j, convention);
        let line1 = self.dln_fugacity_dtau_const_delta_x(i, convention) * dtr_dxj / self.temperature;
        let line2 = -self.dln_fugacity_ddelta_const_tau_x(i, convention) * drhor_dxj / rhor;
        let line3 = drhor_dxj / rhor + dtr_dxj / tr + self.dln_xi_dxj(i, j, convention);
        let line4 = self.dalphar_dxi(j, convention)
            + self.d_ndalphardni_dxj_const_delta_tau(i, j, convention);
        line1 + line2 + line3 + line4
    }

    /// $\frac{\partial\ln x_i}{\partial x_j}$
    fn dln_xi_dxj(&self, i: usize, j: usize, convention: CompositionConvention) -> f64 {
        let n = self.components();
        if convention.is_dependent_index(j, n) {
            0.0
        } else if convention.is_dependent_index(i, n) {
            -1.0 / self.molefracs[i]
        } else if i == j {
            1.0 / self.molefracs[i]
        } else {
            0.0
        }
    }

    /// $\left(\frac{\partial\ln\varphi_i}{\partial T}\right)_{p,n}$
    pub fn dln_fugacity_coefficient_dt_const_p_n(
        &self,
        i: usize,
        convention: CompositionConvention,
    ) -> f64 {
        let rt = self.gas_constant() * self.temperature;
        self.d2nalphar_dni_dt(i, convention) + 1.0 / self.temperature
            - self.partial_molar_volume(i, convention) / rt * self.dp_dt_const_v_n()
    }

    /// $\left(\frac{\partial\ln\varphi_i}{\partial p}\right)_{T,n}=\frac{v_i}{RT}-\frac{1}{p}$
    pub fn dln_fugacity_coefficient_dp_const_t_n(
        &self,
        i: usize,
        convention: CompositionConvention,
    ) -> f64 {
        let rt = self.gas_constant() * self.temperature;
        self.partial_molar_volume(i, convention) / rt - 1.0 / self.pressure()
    }

    /// $\left(\frac{\partial\ln\varphi_i}{\partial x_j}\right)_{T,p,x_i}$
    pub fn dln_fugacity_coefficient_dxj_const_t_p(
        &self,
        i: usize,
        j: usize,
        convention: CompositionConvention,
    ) -> f64 {
        let rt = self.gas_constant() * self.temperature;
        self.d2nalphar_dxj_dni_const_t_v(j, i, convention)
            - self.partial_molar_volume(i, convention) / rt
                * self.dp_dxj_const_t_v(j, convention)
    }

    /// $n\left(\frac{\partial\ln\varphi_i}{\partial n_j}\right)_{T,p}$
    pub fn ndln_fugacity_coefficient_dnj_const_t_p(
        &self,
        i: usize,
        j: usize,
        convention: CompositionConvention,
    ) -> f64 {
        let rt = self.gas_constant() * self.temperature;
        self.nd2nalphar_dni_dnj(j, i, convention) + 1.0
            - self.partial_molar_volume(j, convention) / rt
                * self.ndp_dni_const_t_v(i, convention)
    }

    /// Matrix of $n\left(\frac{\partial\ln\varphi_i}{\partial n_j}\right)_{T,p}$ as used in
    /// Jacobians of phase equilibrium problems.
    pub fn dln_phi_dnj(&self, convention: CompositionConvention) -> Array2<f64> {
        let n = self.components();
        Array2::from_shape_fn((n, n), |(i, j)| {
            self.ndln_fugacity_coefficient_dnj_const_t_p(i, j, convention)
        })
    }
}
