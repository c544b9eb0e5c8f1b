use std::{
    cell::{Cell, RefCell},
    rc::Rc,
    time::Duration,
};

use portfolio_core::{Lifecycle, SamplePoint, Termination};
use portfolio_sequence::{LoadingSequence, Preset, SequenceConfig, ValidatedConfig};

const FRAME: Duration = Duration::from_millis(50);

fn scenario_a() -> ValidatedConfig {
    SequenceConfig {
        progress_interval: Duration::from_millis(50),
        progress_increment: 2.0,
        grace_delay: Duration::from_millis(250),
        step_labels: ["Connecting...", "Loading...", "Processing...", "Building..."]
            .iter()
            .map(|label| (*label).to_owned())
            .collect(),
        step_interval: Duration::from_millis(1200),
        ..SequenceConfig::default()
    }
    .validate()
    .expect("scenario configuration is valid")
}

type Fired = Rc<RefCell<Vec<Duration>>>;

/// Mounts a sequence whose callback records the clock time it fired at.
fn mount_recording(config: &ValidatedConfig) -> (LoadingSequence, Fired, Rc<Cell<Duration>>) {
    let clock = Rc::new(Cell::new(Duration::ZERO));
    let fired = Rc::new(RefCell::new(Vec::new()));
    let sequence = {
        let clock = Rc::clone(&clock);
        let fired = Rc::clone(&fired);
        LoadingSequence::mount(config, move || fired.borrow_mut().push(clock.get()))
    };
    (sequence, fired, clock)
}

fn step(sequence: &mut LoadingSequence, clock: &Cell<Duration>, dt: Duration) {
    clock.set(clock.get() + dt);
    sequence.advance(dt);
}

#[test]
fn scenario_a_completes_after_grace() {
    let config = scenario_a();
    let (mut sequence, fired, clock) = mount_recording(&config);

    for _ in 0..49 {
        step(&mut sequence, &clock, FRAME);
    }
    assert_eq!(sequence.progress_percent(), 98);

    step(&mut sequence, &clock, FRAME);
    assert_eq!(clock.get(), Duration::from_millis(2500));
    assert_eq!(sequence.progress_percent(), 100);
    assert!(sequence.is_active(), "grace delay still pending");

    for _ in 0..4 {
        step(&mut sequence, &clock, FRAME);
        assert!(fired.borrow().is_empty());
    }
    step(&mut sequence, &clock, FRAME);

    assert_eq!(*fired.borrow(), vec![Duration::from_millis(2750)]);
    assert_eq!(
        sequence.lifecycle(),
        Lifecycle::Terminated(Termination::Completed)
    );

    for _ in 0..100 {
        step(&mut sequence, &clock, FRAME);
    }
    sequence.teardown();
    drop(sequence);
    assert_eq!(fired.borrow().len(), 1, "completion fires exactly once");
}

#[test]
fn scenario_a_labels_cycle_every_rotation_interval() {
    let config = scenario_a();
    let (mut sequence, _fired, clock) = mount_recording(&config);
    let labels = ["Connecting...", "Loading...", "Processing...", "Building..."];

    assert_eq!(sequence.step_label(), labels[0]);
    for rotation in 1..=2 {
        for _ in 0..24 {
            step(&mut sequence, &clock, FRAME);
        }
        assert_eq!(sequence.step_label(), labels[rotation % labels.len()]);
    }
}

#[test]
fn scenario_b_teardown_before_completion_never_fires() {
    let config = scenario_a();
    let (mut sequence, fired, clock) = mount_recording(&config);

    for _ in 0..20 {
        step(&mut sequence, &clock, FRAME);
    }
    assert_eq!(clock.get(), Duration::from_millis(1000));
    assert_eq!(sequence.progress_percent(), 40);

    sequence.teardown();
    assert_eq!(
        sequence.lifecycle(),
        Lifecycle::Terminated(Termination::TornDown)
    );

    let label = sequence.step_label().to_owned();
    let samples = sequence.samples().clone();
    for _ in 0..200 {
        step(&mut sequence, &clock, FRAME);
    }
    sequence.teardown();

    assert!(fired.borrow().is_empty());
    assert_eq!(sequence.progress_percent(), 40, "post-teardown ticks are no-ops");
    assert_eq!(sequence.step_label(), label);
    assert_eq!(sequence.samples(), &samples);
    assert_eq!(sequence.elapsed(), Duration::from_millis(1000));
}

#[test]
fn teardown_during_grace_delay_suppresses_callback() {
    let config = scenario_a();
    let (mut sequence, fired, clock) = mount_recording(&config);

    for _ in 0..52 {
        step(&mut sequence, &clock, FRAME);
    }
    assert_eq!(sequence.progress_percent(), 100);

    sequence.teardown();
    for _ in 0..20 {
        step(&mut sequence, &clock, FRAME);
    }

    assert!(fired.borrow().is_empty());
}

#[test]
fn dropping_sequence_suppresses_callback() {
    let config = scenario_a();
    let (mut sequence, fired, clock) = mount_recording(&config);

    for _ in 0..51 {
        step(&mut sequence, &clock, FRAME);
    }
    drop(sequence);

    assert!(fired.borrow().is_empty());
}

#[test]
fn scenario_c_single_label_stays_at_zero() {
    let config = SequenceConfig {
        step_labels: vec!["Loading...".to_owned()],
        ..SequenceConfig::default()
    }
    .validate()
    .expect("single label is valid");
    let mut sequence = LoadingSequence::mount(&config, || {});

    for _ in 0..200 {
        sequence.advance(FRAME);
        assert_eq!(sequence.snapshot().step.get(), 0);
        assert_eq!(sequence.step_label(), "Loading...");
    }
}

#[test]
fn scenario_d_sample_sets_keep_cardinality() {
    let config = SequenceConfig::preset(Preset::Pipeline)
        .validate()
        .expect("valid preset");
    let mut sequence = LoadingSequence::mount(&config, || {});

    assert_eq!(sequence.samples().len(), 20, "first frame is never empty");

    let mut previous = sequence.samples().clone();
    for _ in 0..5 {
        sequence.advance(Duration::from_millis(2000));
        let current = sequence.samples().clone();
        assert_eq!(current.len(), 20);
        assert!(current.iter().all(SamplePoint::is_in_range));
        assert_eq!(current.len(), previous.len());
        previous = current;
    }
}

#[test]
fn completion_time_bounded_by_one_tick_of_jitter() {
    for preset in [Preset::Pipeline, Preset::Compact] {
        let config = SequenceConfig::preset(preset)
            .validate()
            .expect("valid preset");
        let earliest = config.expected_completion();
        let latest = earliest + config.progress_interval();

        // Includes frames longer than the 50 ms progress interval.
        for frame_ms in [5, 10, 16, 25, 50, 60, 75, 80, 100] {
            let (mut sequence, fired, clock) = mount_recording(&config);
            let frame = Duration::from_millis(frame_ms);

            while fired.borrow().is_empty() {
                assert!(clock.get() < earliest * 2, "sequence never completed");
                step(&mut sequence, &clock, frame);
            }

            let at = fired.borrow()[0];
            assert!(at >= earliest, "{preset:?} @ {frame_ms}ms fired early at {at:?}");
            assert!(at <= latest, "{preset:?} @ {frame_ms}ms fired late at {at:?}");
        }
    }
}

#[test]
fn mounting_twice_starts_from_zero() {
    let config = scenario_a();
    let mut first = LoadingSequence::mount(&config, || {});
    for _ in 0..30 {
        first.advance(FRAME);
    }
    first.teardown();

    let second = LoadingSequence::mount(&config, || {});
    assert_eq!(second.progress_percent(), 0);
    assert_eq!(second.snapshot().step.get(), 0);
    assert!(second.is_active());
}

#[test]
fn frame_spanning_the_deadline_completes_within_it() {
    let config = scenario_a();
    let (mut sequence, fired, clock) = mount_recording(&config);

    step(&mut sequence, &clock, Duration::from_secs(10));

    assert_eq!(sequence.progress_percent(), 100);
    assert_eq!(*fired.borrow(), vec![Duration::from_secs(10)]);
    assert_eq!(
        sequence.lifecycle(),
        Lifecycle::Terminated(Termination::Completed)
    );
}

#[test]
fn grace_counts_time_left_over_in_the_saturating_frame() {
    let config = scenario_a();
    let (mut sequence, fired, clock) = mount_recording(&config);

    // 2500 ms saturates with 100 ms of the 2600 ms frame left over.
    step(&mut sequence, &clock, Duration::from_millis(2600));
    assert!(fired.borrow().is_empty());

    step(&mut sequence, &clock, Duration::from_millis(100));
    assert!(fired.borrow().is_empty());

    step(&mut sequence, &clock, Duration::from_millis(50));
    assert_eq!(*fired.borrow(), vec![Duration::from_millis(2750)]);
}

#[test]
fn inexact_increment_completes_on_schedule() {
    let config = SequenceConfig {
        progress_increment: 0.8,
        grace_delay: Duration::from_millis(250),
        ..SequenceConfig::default()
    }
    .validate()
    .expect("valid configuration");
    assert_eq!(config.ticks_to_complete(), 125);
    let (mut sequence, fired, clock) = mount_recording(&config);

    while fired.borrow().is_empty() {
        assert!(clock.get() < Duration::from_secs(20), "sequence never completed");
        step(&mut sequence, &clock, FRAME);
    }

    assert_eq!(fired.borrow()[0], config.expected_completion());
    assert_eq!(config.expected_completion(), Duration::from_millis(125 * 50 + 250));
}
