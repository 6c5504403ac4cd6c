use multifluid::multifluid::{MultiFluid, MultiFluidParameters};
use multifluid::{CompositionConvention, State};
use multifluid_core::parameter::{IdentifierOption, Parameter, ParameterError};
use multifluid_core::MixtureModel;
use ndarray::arr1;
use std::error::Error;
use std::sync::Arc;

const PURE: &str = "tests/multifluid/test_parameters.json";
const BINARY: &str = "tests/multifluid/test_binary_parameters.json";

#[test]
fn from_json() -> Result<(), Box<dyn Error>> {
    // binary records are given by CAS numbers only
    let params = MultiFluidParameters::from_json(
        vec!["ethane", "propane", "butane"],
        PURE,
        Some(BINARY),
        IdentifierOption::Name,
    )?;
    assert!(params.departures.is_empty());
    assert_eq!(params.beta_t[[0, 1]], 1.0);

    let params = MultiFluidParameters::from_json(
        vec!["106-97-8", "74-84-0", "74-98-6"],
        PURE,
        Some(BINARY),
        IdentifierOption::Cas,
    )?;
    assert_eq!(params.components(), 3);
    assert_eq!(params.tc[0], 425.125);
    // butane-ethane is stored in this order, ethane-propane is not affected
    assert_eq!(params.beta_t[[0, 1]], 1.002);
    assert_eq!(params.beta_t[[1, 0]], 1.0 / 1.002);
    assert_eq!(params.beta_v[[1, 2]], 0.997607277);
    assert_eq!(params.gamma_t[[2, 0]], 1.002);
    assert_eq!(params.departures.len(), 2);

    let eos = MultiFluid::new(Arc::new(params))?;
    assert_eq!(eos.components(), 3);
    assert_eq!(eos.excess().pairs(), 2);
    assert!(eos.excess().pair(0, 2).is_none());
    Ok(())
}

#[test]
fn from_json_by_alias() -> Result<(), Box<dyn Error>> {
    let params =
        MultiFluidParameters::from_json(vec!["butane", "ethane"], PURE, None, IdentifierOption::Name)?;
    assert_eq!(params.pure_records[0].identifier.name, Some("n-butane".into()));
    assert!(params.departures.is_empty());
    Ok(())
}

#[test]
fn subset() -> Result<(), Box<dyn Error>> {
    let params = MultiFluidParameters::from_json(
        vec!["74-84-0", "74-98-6", "106-97-8"],
        PURE,
        Some(BINARY),
        IdentifierOption::Cas,
    )?;
    let binary = params.subset(&[1, 0])?;
    assert_eq!(binary.tc[0], 369.825);
    assert_eq!(binary.beta_t[[1, 0]], 0.996199694);
    assert_eq!(binary.departures.len(), 1);

    // the subset is the same mixture as the corresponding ternary
    let x = arr1(&[0.25, 0.75]);
    let ternary = Arc::new(MultiFluid::new(Arc::new(params))?);
    let binary = Arc::new(MultiFluid::new(Arc::new(binary))?);
    let s3 = State::new(&ternary, 300.0, 300.0, &arr1(&[0.75, 0.25, 0.0]))?;
    let s2 = State::new(&binary, 300.0, 300.0, &x)?;
    assert!((s2.reducing_temperature - s3.reducing_temperature).abs() < 1e-11);
    assert!((s2.alphar() - s3.alphar()).abs() < 1e-14);
    let c = CompositionConvention::Independent;
    assert!((s2.ln_fugacity_coefficient(0, c) - s3.ln_fugacity_coefficient(1, c)).abs() < 1e-12);
    Ok(())
}

#[test]
fn missing_component() {
    let params = MultiFluidParameters::from_json(
        vec!["ethane", "water"],
        PURE,
        None,
        IdentifierOption::Name,
    );
    assert!(matches!(params, Err(ParameterError::ComponentsNotFound(_))));
}
