use lscan_arith::{l_function, l_vec_hurwitz, point, DirichletGroup, HurwitzTable};
use lscan_core::Precision;

const CATALAN: f64 = 0.915_965_594_177_219_0;
const FIRST_ZETA_ZERO: f64 = 14.134_725_141_734_694;

fn precision(bits: u32) -> Precision {
    Precision::new(bits).expect("precision")
}

#[test]
fn l_two_of_the_mod_four_character_is_catalan() {
    let group = DirichletGroup::new(4).expect("group");
    let chi = group.character(1).expect("character");
    let value = l_function(point(2.0, 0.0), &chi, precision(64)).expect("value");
    assert!((value.re - CATALAN).abs() < 1e-12, "got {value}");
    assert!(value.im.abs() < 1e-12);
}

#[test]
fn riemann_zeta_vanishes_at_first_zero() {
    let group = DirichletGroup::new(1).expect("group");
    let chi = group.character(0).expect("principal");
    let value = l_function(point(0.5, FIRST_ZETA_ZERO), &chi, precision(64)).expect("value");
    assert!(value.norm() < 1e-10, "got {value}");

    let nearby = l_function(point(0.5, 14.134725), &chi, precision(64)).expect("value");
    assert!(nearby.norm() < 1e-6);
    assert!(nearby.norm() > 0.0);
}

#[test]
fn first_zero_residual_shrinks_with_precision() {
    let group = DirichletGroup::new(1).expect("group");
    let chi = group.character(0).expect("principal");
    let residual = |bits| {
        l_function(point(0.5, FIRST_ZETA_ZERO), &chi, precision(bits))
            .expect("value")
            .norm()
    };
    let (coarse, low, high) = (residual(8), residual(16), residual(53));
    assert!(high < low, "53 bits: {high:e}, 16 bits: {low:e}");
    assert!(high < coarse, "53 bits: {high:e}, 8 bits: {coarse:e}");
    assert!(high < 1e-10);
}

#[test]
fn table_extraction_matches_single_evaluation() {
    let group = DirichletGroup::new(12).expect("group");
    let s = point(0.5, 37.5);
    let table = HurwitzTable::build(s, &group, precision(64)).expect("table");
    let batch = l_vec_hurwitz(&table, &group).expect("batch");
    assert_eq!(batch.len() as u64, group.size());
    for chi in group.characters() {
        let single = l_function(s, &chi, precision(64)).expect("single");
        assert!((single - batch[chi.index() as usize]).norm() < 1e-12);
    }
}

#[test]
fn table_rejects_foreign_group() {
    let seven = DirichletGroup::new(7).expect("group");
    let five = DirichletGroup::new(5).expect("group");
    let table = HurwitzTable::build(point(0.5, 3.0), &seven, precision(32)).expect("table");
    let err = l_vec_hurwitz(&table, &five).unwrap_err();
    assert_eq!(err.info().code, "table_group_mismatch");
}
