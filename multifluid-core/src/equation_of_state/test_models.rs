//! Simple mixture models for unit tests.
use super::{
    CompositionConvention, DepartureFunction, ExcessTerm, MixtureModel, ReducingFunction,
    ResidualHelmholtz,
};
use ndarray::{arr1, arr2, Array1, Array2};
use std::sync::Arc;

const D: [i32; 12] = [1, 1, 1, 2, 3, 7, 2, 5, 1, 4, 3, 4];
const T: [f64; 12] = [
    0.25, 1.125, 1.5, 1.375, 0.25, 0.875, 0.625, 1.75, 3.625, 3.625, 14.5, 12.0,
];
const L: [i32; 12] = [0, 0, 0, 0, 0, 0, 1, 1, 2, 2, 3, 3];

fn span_wagner(n: &[f64]) -> DepartureFunction {
    DepartureFunction::exponential_power(n, &D, &T, &L).unwrap()
}

fn ethane() -> DepartureFunction {
    span_wagner(&[
        0.97628068, -2.6905251, 0.73498222, -0.035366206, 0.084692031, 0.00024154594,
        0.23964954, -0.042780093, -0.22308832, -0.051799954, -0.027178426, 0.011246305,
    ])
}

fn propane() -> DepartureFunction {
    span_wagner(&[
        1.0403973, -2.8318404, 0.84393809, -0.076559592, 0.094697373, 0.00024796475,
        0.2774376, -0.043846001, -0.2699106, -0.06931341, -0.029632145, 0.01404012,
    ])
}

fn butane() -> DepartureFunction {
    span_wagner(&[
        1.0626277, -2.862095, 0.88738233, -0.012570326, 0.10201416, 0.0001243296,
        0.15763395, -0.011679366, -0.24044043, -0.04969262, -0.028749815, 0.014052103,
    ])
}

/// $Y=\sum_i\sum_jx_ix_jY_{ij}$ with a symmetric matrix $Y_{ij}$.
pub(crate) struct QuadraticReducing {
    tr: Array2<f64>,
    rhor: Array2<f64>,
}

impl QuadraticReducing {
    fn y(m: &Array2<f64>, x: &Array1<f64>) -> f64 {
        x.dot(&m.dot(x))
    }

    fn dy(m: &Array2<f64>, x: &Array1<f64>, i: usize, c: CompositionConvention) -> f64 {
        let n = x.len();
        let d = |k: usize| 2.0 * m.row(k).dot(x);
        match c {
            CompositionConvention::Independent => d(i),
            CompositionConvention::Dependent if i == n - 1 => 0.0,
            CompositionConvention::Dependent => d(i) - d(n - 1),
        }
    }

    fn d2y(m: &Array2<f64>, x: &Array1<f64>, i: usize, j: usize, c: CompositionConvention) -> f64 {
        let l = x.len() - 1;
        match c {
            CompositionConvention::Independent => 2.0 * m[[i, j]],
            CompositionConvention::Dependent if i == l || j == l => 0.0,
            CompositionConvention::Dependent => {
                2.0 * (m[[i, j]] - m[[i, l]] - m[[j, l]] + m[[l, l]])
            }
        }
    }
}

impl ReducingFunction for QuadraticReducing {
    fn tr(&self, x: &Array1<f64>) -> f64 {
        Self::y(&self.tr, x)
    }

    fn rhor(&self, x: &Array1<f64>) -> f64 {
        Self::y(&self.rhor, x)
    }

    fn dtr_dxi(&self, x: &Array1<f64>, i: usize, c: CompositionConvention) -> f64 {
        Self::dy(&self.tr, x, i, c)
    }

    fn drhor_dxi(&self, x: &Array1<f64>, i: usize, c: CompositionConvention) -> f64 {
        Self::dy(&self.rhor, x, i, c)
    }

    fn d2tr_dxi_dxj(&self, x: &Array1<f64>, i: usize, j: usize, c: CompositionConvention) -> f64 {
        Self::d2y(&self.tr, x, i, j, c)
    }

    fn d2rhor_dxi_dxj(
        &self,
        x: &Array1<f64>,
        i: usize,
        j: usize,
        c: CompositionConvention,
    ) -> f64 {
        Self::d2y(&self.rhor, x, i, j, c)
    }
}

pub(crate) struct TestMixture {
    pure: Vec<DepartureFunction>,
    excess: ExcessTerm,
    reducing: QuadraticReducing,
}

impl MixtureModel for TestMixture {
    fn components(&self) -> usize {
        self.pure.len()
    }

    fn pure_fluid(&self, i: usize) -> &dyn ResidualHelmholtz {
        &self.pure[i]
    }

    fn excess(&self) -> &ExcessTerm {
        &self.excess
    }

    fn reducing_function(&self) -> &dyn ReducingFunction {
        &self.reducing
    }
}

fn ethane_propane_departure() -> DepartureFunction {
    DepartureFunction::exponential_power(
        &[
            2.5574776844118, -7.9846357136353, 4.7859131465806, -0.73265392369587,
            1.3805471345312, 0.28349603476365, -0.49087385940425, -0.10291888921447,
            0.11836314681968, 5.5527385721943e-05,
        ],
        &[1, 1, 1, 2, 2, 3, 3, 4, 4, 4],
        &[1.0, 1.55, 1.7, 0.25, 1.35, 0.0, 1.25, 0.0, 0.7, 5.4],
        &[0; 10],
    )
    .unwrap()
}

/// Ethane and propane.
pub(crate) fn binary() -> Arc<TestMixture> {
    let mut excess = ExcessTerm::new(2);
    excess
        .add_pair(0, 1, 0.130424765150, ethane_propane_departure())
        .unwrap();
    let reducing = QuadraticReducing {
        tr: arr2(&[[305.322, 340.0], [340.0, 369.825]]),
        rhor: arr2(&[[6870.854, 5800.0], [5800.0, 5000.043]]),
    };
    Arc::new(TestMixture {
        pure: vec![ethane(), propane()],
        excess,
        reducing,
    })
}

/// Ethane, propane and n-butane.
pub(crate) fn ternary() -> Arc<TestMixture> {
    let mut excess = ExcessTerm::new(3);
    excess
        .add_pair(0, 1, 0.130424765150, ethane_propane_departure())
        .unwrap();
    excess
        .add_pair(
            2,
            0,
            0.28,
            DepartureFunction::generalized_exponential(
                &[-0.8, 0.35, 0.12],
                &[1, 2, 3],
                &[1.2, 0.5, 2.0],
                &[0.0, 1.0, 0.25],
                &[0.0, 0.5, 0.5],
                &[0.0, 1.0, 2.5],
                &[0.0, 0.5, 0.5],
            )
            .unwrap(),
        )
        .unwrap();
    excess
        .add_pair(1, 2, -0.05, ethane_propane_departure())
        .unwrap();
    let reducing = QuadraticReducing {
        tr: arr2(&[
            [305.322, 340.0, 362.0],
            [340.0, 369.825, 398.0],
            [362.0, 398.0, 425.125],
        ]),
        rhor: arr2(&[
            [6870.854, 5800.0, 5100.0],
            [5800.0, 5000.043, 4400.0],
            [5100.0, 4400.0, 3920.016],
        ]),
    };
    Arc::new(TestMixture {
        pure: vec![ethane(), propane(), butane()],
        excess,
        reducing,
    })
}

#[test]
fn quadratic_reducing_pure_limit() {
    let r = &ternary().reducing;
    assert_eq!(r.tr(&arr1(&[0.0, 1.0, 0.0])), 369.825);
    assert_eq!(r.rhor(&arr1(&[0.0, 0.0, 1.0])), 3920.016);
}
