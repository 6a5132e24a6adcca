use lscan_core::{LogMagnitude, Precision};
use lscan_eval::{
    evaluate_all_characters, evaluate_point, scan_grid, scan_grid_parallel, scan_grid_parallel_in,
    CharacterGroup, Dispatcher, GridSpec,
};

fn precision(bits: u32) -> Precision {
    Precision::new(bits).expect("precision")
}

#[test]
fn modulus_one_is_riemann_zeta() {
    let values = evaluate_all_characters(14.134_725_141_734_694, 1, precision(64)).expect("batch");
    assert_eq!(values.len(), 1);
    assert!(values[0].magnitude() < 1e-10);

    let bump = evaluate_point(10.0, 1, 0, precision(64)).expect("point");
    assert!(bump.magnitude() > 1.0);
}

#[test]
fn batch_matches_point_for_every_character() {
    for modulus in [3u64, 7, 8, 12, 15] {
        for t in [0.0, 6.5, 41.25] {
            let batch = evaluate_all_characters(t, modulus, precision(64)).expect("batch");
            for (index, value) in batch.iter().enumerate() {
                let single = evaluate_point(t, modulus, index as u64, precision(64)).expect("point");
                let scale = single.magnitude().max(1.0);
                assert!(
                    (value.real - single.real).abs() <= 1e-12 * scale
                        && (value.imag - single.imag).abs() <= 1e-12 * scale,
                    "q={modulus} t={t} index={index}: {value:?} vs {single:?}"
                );
                assert_eq!(value.t, t);
            }
        }
    }
}

#[test]
fn out_of_range_character_is_rejected() {
    let err = evaluate_point(1.0, 5, 4, precision(64)).expect_err("index 4 mod 5");
    assert_eq!(err.family(), "InvalidCharacterIndex");
    let err = evaluate_all_characters(1.0, 0, precision(64)).expect_err("modulus 0");
    assert_eq!(err.family(), "InvalidModulus");
}

#[test]
fn parallel_scan_matches_sequential_scan() {
    let grid = GridSpec::new(0.0, 20.0, 0.5).expect("grid");
    let sequential = scan_grid(5, &grid, precision(64)).expect("sequential");
    let dispatcher = Dispatcher::new(3).expect("pool");
    let parallel = scan_grid_parallel(5, &grid, precision(64), &dispatcher).expect("parallel");
    assert_eq!(sequential, parallel);
    assert_eq!(sequential.len(), 41 * 4);
}

#[test]
fn scan_output_is_ordered_by_height_then_character() {
    let grid = GridSpec::new(2.0, 4.0, 1.0).expect("grid");
    let samples = scan_grid(7, &grid, precision(32)).expect("scan");
    let keys: Vec<(f64, u64)> = samples.iter().map(|s| (s.t, s.character_index)).collect();
    let expected: Vec<(f64, u64)> = [2.0, 3.0, 4.0]
        .iter()
        .flat_map(|&t| (0..6).map(move |i| (t, i)))
        .collect();
    assert_eq!(keys, expected);
    assert!(samples
        .iter()
        .all(|s| matches!(s.log_magnitude, LogMagnitude::Finite(v) if v.is_finite())));
}

#[test]
fn repeated_scans_are_bit_identical() {
    let grid = GridSpec::with_points(10.0, 30.0, 40).expect("grid");
    let dispatcher = Dispatcher::new(0).expect("pool");
    let first = scan_grid_parallel(11, &grid, precision(64), &dispatcher).expect("first");
    let second = scan_grid_parallel(11, &grid, precision(64), &dispatcher).expect("second");
    let bits = |samples: &[lscan_core::LogMagnitudeSample]| {
        samples
            .iter()
            .map(|s| (s.t.to_bits(), s.character_index, s.log_magnitude.as_f64().to_bits()))
            .collect::<Vec<_>>()
    };
    assert_eq!(bits(&first), bits(&second));
}

#[test]
fn reversed_grid_fails_before_evaluation() {
    let grid = GridSpec {
        t_start: 5.0,
        t_end: 1.0,
        t_step: 0.5,
    };
    let err = scan_grid(0, &grid, precision(64)).expect_err("reversed");
    assert_eq!(err.family(), "InvalidRange");
}

#[test]
fn single_character_scan_matches_point_evaluation() {
    let grid = GridSpec::with_points(0.0, 30.0, 100).expect("grid");
    let dispatcher = Dispatcher::new(2).expect("pool");
    let values = lscan_eval::scan_character(1, 0, &grid, precision(64), &dispatcher).expect("scan");
    assert_eq!(values.len(), 101);
    for (k, value) in values.iter().enumerate() {
        assert_eq!(value.t, grid.height(k));
    }
    let spot = evaluate_point(grid.height(37), 1, 0, precision(64)).expect("point");
    assert_eq!(values[37], spot);
}

#[test]
fn scan_over_held_group_matches_scan_by_modulus() {
    let grid = GridSpec::new(1.0, 9.0, 0.5).expect("grid");
    let dispatcher = Dispatcher::new(2).expect("pool");
    let group = CharacterGroup::new(12).expect("group");
    let held = scan_grid_parallel_in(&group, &grid, precision(64), &dispatcher).expect("held");
    let fresh = scan_grid_parallel(12, &grid, precision(64), &dispatcher).expect("fresh");
    assert_eq!(held, fresh);
    assert_eq!(held.len(), grid.len() * group.size() as usize);
}
