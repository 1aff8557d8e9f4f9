//! Integration test: bootstrap a forward curve end to end.
//!
//! Covers the full pipeline — instruments into the bootstrapper, one knot
//! per instrument, every instrument repricing to its target on the
//! finished curve — including the overlap cases where a later
//! instrument's effective date falls before or after the current curve
//! end.

use approx::assert_relative_eq;
use pwflat_curves::bootstrap::{build, build2, extend, present_value};
use pwflat_curves::instruments::{
    CashDeposit, CashFlows, ForwardRateAgreement, Instrument,
};
use pwflat_curves::Curve;

const LN_2: f64 = std::f64::consts::LN_2;

#[test]
fn test_cash_deposit_from_empty_curve() {
    // Deposit maturing at 1 with rate ln 2: growth factor exp(ln 2) = 2,
    // so the curve must carry a single knot at (1, ln 2)
    let deposit = CashDeposit::new(1.0, LN_2).unwrap();

    let mut curve = Curve::new();
    extend(&deposit, &mut curve, 0.0, 0.0).unwrap();

    assert_eq!(curve.len(), 1);
    assert_eq!(curve.back(), Some((1.0, LN_2)));
    assert_relative_eq!(curve.value(0.0), LN_2, epsilon = f64::EPSILON);
    assert_relative_eq!(curve.discount(1.0), 0.5, epsilon = 1e-15);
}

#[test]
fn test_adjacent_fras_at_common_rate_give_flat_curve() {
    let i0 = ForwardRateAgreement::new(0.0, 1.0, LN_2).unwrap();
    let i1 = ForwardRateAgreement::new(1.0, 2.0, LN_2).unwrap();

    let curve = build(&[&i0, &i1]).unwrap();

    assert_eq!(curve.len(), 2);
    assert_eq!(curve.back().unwrap().0, 2.0);
    assert_relative_eq!(curve.value(0.5), LN_2, epsilon = f64::EPSILON);
    assert_relative_eq!(curve.value(1.5), LN_2, epsilon = f64::EPSILON);
    assert_relative_eq!(curve.value(0.5), curve.value(1.5), epsilon = f64::EPSILON);
}

#[test]
fn test_fra_effective_before_curve_end() {
    // Second FRA starts at 0.9, inside the existing curve
    let i0 = ForwardRateAgreement::new(0.0, 1.0, LN_2).unwrap();
    let i1 = ForwardRateAgreement::new(0.9, 1.9, LN_2).unwrap();

    let mut curve = Curve::new();
    extend(&i0, &mut curve, 0.0, 0.0).unwrap();
    extend(&i1, &mut curve, 0.0, 0.0).unwrap();

    assert_eq!(curve.len(), 2);
    assert_eq!(curve.back().unwrap().0, 1.9);
    assert_relative_eq!(curve.value(0.5), LN_2, epsilon = 1e-9);
    assert_relative_eq!(curve.value(1.5), LN_2, epsilon = 1e-9);
}

#[test]
fn test_fra_effective_after_curve_end() {
    // Second FRA starts at 1.1, past the existing curve end
    let i0 = ForwardRateAgreement::new(0.0, 1.0, LN_2).unwrap();
    let i1 = ForwardRateAgreement::new(1.1, 2.1, LN_2).unwrap();

    let mut curve = Curve::new();
    extend(&i0, &mut curve, 0.0, 0.0).unwrap();
    extend(&i1, &mut curve, 0.0, 0.0).unwrap();

    assert_eq!(curve.len(), 2);
    assert_eq!(curve.back().unwrap().0, 2.1);
    assert_relative_eq!(curve.value(0.5), LN_2, epsilon = 1e-9);
    assert_relative_eq!(curve.value(1.5), LN_2, epsilon = 1e-9);
}

#[test]
fn test_multi_flow_instrument_through_the_solver() {
    let i0 = ForwardRateAgreement::new(0.0, 1.0, LN_2).unwrap();
    let i1 = ForwardRateAgreement::new(1.1, 2.1, LN_2).unwrap();
    let i2 = CashFlows::from_flows(vec![0.0, 1.0, 2.0, 3.0], vec![-1.0, 1.0, 1.0, 2.0]).unwrap();

    let mut curve = Curve::new();
    extend(&i0, &mut curve, 0.0, 0.0).unwrap();
    extend(&i1, &mut curve, 0.0, 0.0).unwrap();
    extend(&i2, &mut curve, 0.0, 0.0).unwrap();

    assert_eq!(curve.len(), 3);
    assert_eq!(curve.back().unwrap().0, 3.0);
    // The last instrument reprices to zero on the finished curve
    assert_relative_eq!(present_value(&i2, &curve), 0.0, epsilon = 1e-9);
}

#[test]
fn test_bootstrap_round_trip() {
    // Every bootstrapped instrument reprices to its target price
    let deposit = CashDeposit::new(0.5, 0.045).unwrap();
    let fra_1 = ForwardRateAgreement::new(0.5, 1.0, 0.050).unwrap();
    let fra_2 = ForwardRateAgreement::new(1.0, 2.0, 0.052).unwrap();
    let bond = CashFlows::from_flows(
        vec![0.0, 1.0, 2.0, 3.0, 4.0],
        vec![-1.0, 0.05, 0.05, 0.05, 1.05],
    )
    .unwrap();

    let instruments: Vec<&dyn Instrument> = vec![&deposit, &fra_1, &fra_2, &bond];
    let curve = build(&instruments).unwrap();

    assert_eq!(curve.len(), 4);
    for instrument in &instruments {
        assert_relative_eq!(present_value(*instrument, &curve), 0.0, epsilon = 1e-9);
    }
}

#[test]
fn test_build2_concatenates_terminations() {
    // Primary: deposits out to 1Y. Secondary: FRAs from 1Y out.
    let d_3m = CashDeposit::new(0.25, 0.040).unwrap();
    let d_6m = CashDeposit::new(0.5, 0.042).unwrap();
    let d_1y = CashDeposit::new(1.0, 0.044).unwrap();
    let d_18m = CashDeposit::new(1.5, 0.045).unwrap(); // past the cutoff, skipped

    let f_2y = ForwardRateAgreement::new(1.0, 2.0, 0.048).unwrap();
    let f_3y = ForwardRateAgreement::new(2.0, 3.0, 0.050).unwrap();

    let primary: Vec<&dyn Instrument> = vec![&d_3m, &d_6m, &d_1y, &d_18m];
    let secondary: Vec<&dyn Instrument> = vec![&f_2y, &f_3y];

    let curve = build2(&primary, &secondary).unwrap();

    // d_1y terminates at 1.0, not strictly before the secondary's first
    // effective date 1.0, so the primary stops after the 6M deposit
    assert_eq!(curve.times(), &[0.25, 0.5, 2.0, 3.0]);

    for instrument in [&primary[0], &primary[1], &secondary[0], &secondary[1]] {
        assert_relative_eq!(present_value(*instrument, &curve), 0.0, epsilon = 1e-9);
    }
}

#[test]
fn test_build2_empty_secondary_consumes_all_primary() {
    let d_3m = CashDeposit::new(0.25, 0.040).unwrap();
    let d_6m = CashDeposit::new(0.5, 0.042).unwrap();

    let primary: Vec<&dyn Instrument> = vec![&d_3m, &d_6m];

    let curve = build2(&primary, &[]).unwrap();

    assert_eq!(curve.times(), &[0.25, 0.5]);
}

#[test]
fn test_build_aborts_on_bad_ordering() {
    // Second instrument terminates before the curve end
    let d_1y = CashDeposit::new(1.0, 0.044).unwrap();
    let d_6m = CashDeposit::new(0.5, 0.042).unwrap();

    let result = build(&[&d_1y, &d_6m]);

    assert!(result.is_err());
}

#[test]
fn test_deposit_rates_recovered_as_spot() {
    // For deposits from time 0, the bootstrapped spot equals the rate
    let d_1y = CashDeposit::new(1.0, 0.04).unwrap();
    let d_2y = CashDeposit::new(2.0, 0.05).unwrap();

    let curve = build(&[&d_1y, &d_2y]).unwrap();

    assert_relative_eq!(curve.spot(1.0), 0.04, epsilon = 1e-9);
    assert_relative_eq!(curve.spot(2.0), 0.05, epsilon = 1e-9);
}
