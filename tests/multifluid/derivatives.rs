use approx::assert_relative_eq;
use multifluid::multifluid::{MultiFluid, MultiFluidParameters};
use multifluid::{CompositionConvention::*, State};
use multifluid_core::parameter::{IdentifierOption, Parameter};
use ndarray::arr1;
use std::error::Error;
use std::sync::Arc;

const T: f64 = 300.0;
const RHO: f64 = 300.0;
const Z0: f64 = 0.25;

fn mixture(substances: Vec<&str>) -> Result<Arc<MultiFluid>, Box<dyn Error>> {
    let params = MultiFluidParameters::from_json(
        substances,
        "tests/multifluid/test_parameters.json",
        Some("tests/multifluid/test_binary_parameters.json"),
        IdentifierOption::Cas,
    )?;
    Ok(Arc::new(MultiFluid::new(Arc::new(params))?))
}

fn ethane_propane() -> Result<Arc<MultiFluid>, Box<dyn Error>> {
    mixture(vec!["74-84-0", "74-98-6"])
}

fn state(eos: &Arc<MultiFluid>, t: f64, rho: f64, z0: f64) -> State<MultiFluid> {
    State::new(eos, t, rho, &arr1(&[z0, 1.0 - z0])).unwrap()
}

fn central<F: Fn(f64) -> f64>(f: F, x: f64, h: f64) -> f64 {
    (f(x + h) - f(x - h)) / (2.0 * h)
}

#[test]
fn dln_fugacity_dt() -> Result<(), Box<dyn Error>> {
    let eos = ethane_propane()?;
    let s = state(&eos, T, RHO, Z0);
    for i in 0..2 {
        let numeric = central(|t| state(&eos, t, RHO, Z0).fugacity(i, Dependent).ln(), T, 1e-3);
        assert_relative_eq!(
            s.dln_fugacity_dt_const_rho_n(i, Dependent),
            numeric,
            max_relative = 1e-8
        );
    }
    Ok(())
}

#[test]
fn dln_fugacity_drho() -> Result<(), Box<dyn Error>> {
    let eos = ethane_propane()?;
    let s = state(&eos, T, RHO, Z0);
    for i in 0..2 {
        let numeric = central(|rho| state(&eos, T, rho, Z0).fugacity(i, Dependent).ln(), RHO, 1e-3);
        assert_relative_eq!(
            s.dln_fugacity_drho_const_t_n(i, Dependent),
            numeric,
            max_relative = 1e-8
        );
    }
    Ok(())
}

#[test]
fn dln_fugacity_coefficient_dp() -> Result<(), Box<dyn Error>> {
    let eos = ethane_propane()?;
    let s = state(&eos, T, RHO, Z0);
    for i in 0..2 {
        let (s1, s2) = (state(&eos, T, RHO + 1e-4, Z0), state(&eos, T, RHO - 1e-4, Z0));
        let numeric = (s1.ln_fugacity_coefficient(i, Dependent)
            - s2.ln_fugacity_coefficient(i, Dependent))
            / (s1.pressure() - s2.pressure());
        assert_relative_eq!(
            s.dln_fugacity_coefficient_dp_const_t_n(i, Dependent),
            numeric,
            max_relative = 1e-6
        );
    }
    Ok(())
}

#[test]
fn derivatives_of_n_dalphar_dni() -> Result<(), Box<dyn Error>> {
    let eos = ethane_propane()?;
    let s = state(&eos, T, RHO, Z0);
    let x = arr1(&[Z0, 1.0 - Z0]);
    let reduced = |tau, delta| State::new_reduced(&eos, tau, delta, &x).unwrap();
    for i in 0..2 {
        let nd = |tau, delta| reduced(tau, delta).ndalphar_dni(i, Dependent);
        let ddelta = central(|d| nd(s.tau, d), s.delta, 1e-6 * s.delta);
        let dtau = central(|t| nd(t, s.delta), s.tau, 1e-6);
        assert_relative_eq!(s.d_ndalphardni_ddelta(i, Dependent), ddelta, max_relative = 1e-6);
        assert_relative_eq!(s.d_ndalphardni_dtau(i, Dependent), dtau, max_relative = 1e-6);

        let dxj = central(
            |z0| {
                State::new_reduced(&eos, s.tau, s.delta, &arr1(&[z0, 1.0 - z0]))
                    .unwrap()
                    .ndalphar_dni(i, Dependent)
            },
            Z0,
            1e-6,
        );
        assert_relative_eq!(
            s.d_ndalphardni_dxj_const_delta_tau(i, 0, Dependent),
            dxj,
            max_relative = 1e-6
        );
        assert_eq!(s.d_ndalphardni_dxj_const_delta_tau(i, 1, Dependent), 0.0);
    }
    Ok(())
}

#[test]
fn composition_derivatives() -> Result<(), Box<dyn Error>> {
    let eos = ethane_propane()?;
    let s = state(&eos, T, RHO, Z0);
    let dz = 1e-6;
    let dp = central(|z0| state(&eos, T, RHO, z0).pressure(), Z0, dz);
    let dalphar_ddelta = central(|z0| state(&eos, T, RHO, z0).dalphar_ddelta(), Z0, dz);
    assert_relative_eq!(s.dp_dxj_const_t_v(0, Dependent), dp, max_relative = 1e-6);
    assert_relative_eq!(
        s.d_dalphar_ddelta_dxj_const_t_v(0, Dependent),
        dalphar_ddelta,
        max_relative = 1e-6
    );
    for i in 0..2 {
        let ln_f = central(|z0| state(&eos, T, RHO, z0).fugacity(i, Dependent).ln(), Z0, dz);
        let dnalphar = central(|z0| state(&eos, T, RHO, z0).dnalphar_dni(i, Dependent), Z0, dz);
        assert_relative_eq!(s.dln_fugacity_dxj_const_t_rho(i, 0, Dependent), ln_f, max_relative = 1e-6);
        assert_relative_eq!(
            s.d2nalphar_dxj_dni_const_t_v(0, i, Dependent),
            dnalphar,
            max_relative = 1e-6
        );
    }
    Ok(())
}

#[test]
fn dln_fugacity_coefficient_dxj() -> Result<(), Box<dyn Error>> {
    let eos = ethane_propane()?;
    let s = state(&eos, T, RHO, Z0);
    let p = s.pressure();
    let density = |z0: f64| {
        let mut rho = RHO;
        for _ in 0..50 {
            let s = state(&eos, T, rho, z0);
            let step = (s.pressure() - p) / s.dp_drho_const_t_n();
            rho -= step;
            if step.abs() < 1e-14 * rho {
                break;
            }
        }
        rho
    };
    for i in 0..2 {
        let numeric = central(
            |z0| state(&eos, T, density(z0), z0).ln_fugacity_coefficient(i, Dependent),
            Z0,
            1e-5,
        );
        assert_relative_eq!(
            s.dln_fugacity_coefficient_dxj_const_t_p(i, 0, Dependent),
            numeric,
            max_relative = 1e-5
        );
    }
    Ok(())
}

#[test]
fn round_trip_fugacity_coefficient() -> Result<(), Box<dyn Error>> {
    let eos = ethane_propane()?;
    let s = state(&eos, T, RHO, Z0);
    let p = s.pressure();
    for (i, x) in [Z0, 1.0 - Z0].into_iter().enumerate() {
        for c in [Independent, Dependent] {
            assert_relative_eq!(
                s.ln_fugacity_coefficient(i, c),
                (s.fugacity(i, c) / (x * p)).ln(),
                max_relative = 1e-12
            );
        }
    }
    Ok(())
}

#[test]
fn ternary_invariance() -> Result<(), Box<dyn Error>> {
    let eos = mixture(vec!["74-84-0", "74-98-6", "106-97-8"])?;
    let x = arr1(&[0.2, 0.3, 0.5]);
    let s = State::new(&eos, 320.0, 800.0, &x)?;
    let (a, b) = (s.ln_phi(Independent), s.ln_phi(Dependent));
    let (va, vb) = (
        s.partial_molar_volumes(Independent),
        s.partial_molar_volumes(Dependent),
    );
    for i in 0..3 {
        assert_relative_eq!(a[i], b[i], max_relative = 1e-10);
        assert_relative_eq!(va[i], vb[i], max_relative = 1e-10);
        assert_relative_eq!(
            s.ndp_dni_const_t_v(i, Independent),
            s.ndp_dni_const_t_v(i, Dependent),
            max_relative = 1e-10
        );
    }
    assert_relative_eq!(x.dot(&va), 1.0 / 800.0, max_relative = 1e-12);

    let dln_phi = s.dln_phi_dnj(Dependent);
    for j in 0..3 {
        let gibbs_duhem: f64 = (0..3).map(|i| x[i] * dln_phi[[i, j]]).sum();
        assert!(gibbs_duhem.abs() < 1e-10);
    }
    Ok(())
}

#[test]
fn dependent_last_component() -> Result<(), Box<dyn Error>> {
    let eos = mixture(vec!["74-84-0", "74-98-6", "106-97-8"])?;
    let s = State::new(&eos, 320.0, 800.0, &arr1(&[0.2, 0.3, 0.5]))?;
    assert_eq!(s.dalphar_dxi(2, Dependent), 0.0);
    assert_eq!(s.dtau_dxj_const_t_v(2, Dependent), 0.0);
    for i in 0..3 {
        assert_eq!(s.d2alphar_dxi_dxj(i, 2, Dependent), 0.0);
        assert_eq!(s.d_ndalphardni_dxj_const_delta_tau(i, 2, Dependent), 0.0);
    }
    Ok(())
}
