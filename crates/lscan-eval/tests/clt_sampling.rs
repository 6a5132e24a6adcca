use lscan_core::{CharacterSelection, Precision};
use lscan_eval::{sample_clt, sample_clt_in, CharacterGroup, Dispatcher, SampleWindow};

fn precision() -> Precision {
    Precision::new(53).expect("precision")
}

fn moments(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    (mean, variance)
}

#[test]
fn normalized_zeta_is_roughly_standard_normal() {
    let dispatcher = Dispatcher::new(0).expect("pool");
    let window = SampleWindow::new(1000.0, 2000.0, 1000).expect("window");
    let samples = sample_clt(
        1,
        CharacterSelection::Single(0),
        &window,
        precision(),
        20_240_601,
        &dispatcher,
    )
    .expect("samples");
    assert_eq!(samples.len(), 1000);
    assert!(samples.iter().all(|s| !s.sigma_clamped));
    let values: Vec<f64> = samples.iter().filter_map(|s| s.normalized.value()).collect();
    let (mean, variance) = moments(&values);
    assert!(mean.abs() < 0.35, "mean {mean}");
    assert!((0.3..2.5).contains(&variance), "variance {variance}");
}

#[test]
fn fixed_seed_reproduces_across_pool_sizes() {
    let window = SampleWindow::new(100.0, 200.0, 24).expect("window");
    let run = |threads| {
        let dispatcher = Dispatcher::new(threads).expect("pool");
        sample_clt(5, CharacterSelection::All, &window, precision(), 7, &dispatcher)
            .expect("samples")
    };
    assert_eq!(run(1), run(4));
}

#[test]
fn different_seeds_draw_different_heights() {
    let dispatcher = Dispatcher::new(2).expect("pool");
    let window = SampleWindow::new(100.0, 200.0, 16).expect("window");
    let draw = |seed| {
        sample_clt(1, CharacterSelection::Single(0), &window, precision(), seed, &dispatcher)
            .expect("samples")
            .iter()
            .map(|s| s.t)
            .collect::<Vec<_>>()
    };
    assert_ne!(draw(1), draw(2));
}

#[test]
fn all_characters_fan_out_draw_major() {
    let dispatcher = Dispatcher::new(2).expect("pool");
    let window = SampleWindow::new(50.0, 60.0, 5).expect("window");
    let samples = sample_clt(7, CharacterSelection::All, &window, precision(), 3, &dispatcher)
        .expect("samples");
    assert_eq!(samples.len(), 5 * 6);
    for (draw, chunk) in samples.chunks(6).enumerate() {
        let t = chunk[0].t;
        assert!((50.0..60.0).contains(&t), "draw {draw}");
        for (index, sample) in chunk.iter().enumerate() {
            assert_eq!(sample.t, t);
            assert_eq!(sample.character_index, index as u64);
        }
    }
}

#[test]
fn low_window_clamps_sigma_without_failing() {
    let dispatcher = Dispatcher::new(1).expect("pool");
    let window = SampleWindow::new(0.5, 2.5, 8).expect("window");
    let samples = sample_clt(1, CharacterSelection::Single(0), &window, precision(), 11, &dispatcher)
        .expect("samples");
    assert!(samples.iter().all(|s| s.sigma_clamped && s.sigma == 1.0));
    assert!(samples.iter().all(|s| s.normalized == s.raw));
}

#[test]
fn invalid_requests_fail_before_sampling() {
    let dispatcher = Dispatcher::new(1).expect("pool");
    let window = SampleWindow::new(1000.0, 2000.0, 10).expect("window");
    let err = sample_clt(7, CharacterSelection::Single(6), &window, precision(), 1, &dispatcher)
        .expect_err("index out of range");
    assert_eq!(err.family(), "InvalidCharacterIndex");

    let reversed = SampleWindow {
        t_start: 10.0,
        t_end: 10.0,
        sample_count: 3,
    };
    let err = sample_clt(7, CharacterSelection::All, &reversed, precision(), 1, &dispatcher)
        .expect_err("empty window");
    assert_eq!(err.family(), "InvalidRange");
}

#[test]
fn zero_draws_give_empty_output() {
    let dispatcher = Dispatcher::new(1).expect("pool");
    let window = SampleWindow::new(10.0, 20.0, 0).expect("window");
    let samples = sample_clt(3, CharacterSelection::All, &window, precision(), 1, &dispatcher)
        .expect("samples");
    assert!(samples.is_empty());
}

#[test]
fn sampling_over_held_group_matches_sampling_by_modulus() {
    let dispatcher = Dispatcher::new(2).expect("pool");
    let window = SampleWindow::doubling(80.0, 12).expect("window");
    let group = CharacterGroup::new(8).expect("group");
    let held = sample_clt_in(&group, CharacterSelection::All, &window, precision(), 17, &dispatcher)
        .expect("held");
    let fresh = sample_clt(8, CharacterSelection::All, &window, precision(), 17, &dispatcher)
        .expect("fresh");
    assert_eq!(held, fresh);

    let err = sample_clt_in(
        &group,
        CharacterSelection::Single(4),
        &window,
        precision(),
        1,
        &dispatcher,
    )
    .expect_err("index out of range");
    assert_eq!(err.family(), "InvalidCharacterIndex");
}
