//! Tests for the rollover application service.
//!
//! Drives `RolloverController`, `scale_up` and `scale_down` through the
//! recording mocks and checks the exact sequence of control-plane calls.

#![allow(clippy::expect_used)]

use std::time::Duration;

use scaleover_cli::application::services::rollover::{
    RolloverController, RolloverOutcome, scale_down, scale_up,
};
use scaleover_cli::domain::{ApplicationSnapshot, GatewayError, LifecycleState};

use crate::mocks::{Call, RecordingGateway, RecordingReporter, RecordingSleeper};

fn snapshot(state: LifecycleState, requested: u32) -> ApplicationSnapshot {
    ApplicationSnapshot::new("foo", state, requested, requested)
}

// ── scale_up ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn scale_up_starts_a_stopped_app() {
    let gw = RecordingGateway::new();
    let mut app = snapshot(LifecycleState::Stopped, 1);

    scale_up(&gw, &mut app).await.expect("scale up");

    assert_eq!(app.state, LifecycleState::Started);
    assert_eq!(app.requested_instances, 2);
    assert_eq!(gw.calls(), vec![Call::start("foo"), Call::scale("foo", 2)]);
}

#[tokio::test]
async fn scale_up_leaves_a_started_app_started() {
    let gw = RecordingGateway::new();
    let mut app = snapshot(LifecycleState::Started, 1);

    scale_up(&gw, &mut app).await.expect("scale up");

    assert_eq!(app.state, LifecycleState::Started);
    assert_eq!(app.requested_instances, 2);
    assert_eq!(gw.calls(), vec![Call::scale("foo", 2)]);
}

#[tokio::test]
async fn scale_up_starts_an_unknown_app() {
    let gw = RecordingGateway::new();
    let mut app = snapshot(LifecycleState::Unknown, 0);

    scale_up(&gw, &mut app).await.expect("scale up");

    assert_eq!(gw.calls(), vec![Call::start("foo"), Call::scale("foo", 1)]);
}

#[tokio::test]
async fn scale_up_start_failure_issues_no_scale() {
    let gw = RecordingGateway::new().failing_on(Call::start("foo"));
    let mut app = snapshot(LifecycleState::Stopped, 0);

    assert!(scale_up(&gw, &mut app).await.is_err());
    assert_eq!(gw.calls(), vec![Call::start("foo")]);
    assert_eq!(app.state, LifecycleState::Stopped);
}

#[tokio::test]
async fn scale_up_at_the_instance_limit_issues_nothing() {
    let gw = RecordingGateway::new();
    let mut app = snapshot(LifecycleState::Stopped, u32::MAX);

    let err = scale_up(&gw, &mut app).await.expect_err("overflow");

    assert!(err.to_string().contains("above"));
    assert!(gw.calls().is_empty());
    assert_eq!(app.requested_instances, u32::MAX);
    assert_eq!(app.state, LifecycleState::Stopped);
}

// ── scale_down ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn scale_down_to_zero_stops_the_app() {
    let gw = RecordingGateway::new();
    let mut app = snapshot(LifecycleState::Started, 1);

    scale_down(&gw, &mut app).await.expect("scale down");

    assert_eq!(app.state, LifecycleState::Stopped);
    assert_eq!(app.requested_instances, 0);
    assert_eq!(gw.calls(), vec![Call::stop("foo")]);
}

#[tokio::test]
async fn scale_down_decrements_requested() {
    let gw = RecordingGateway::new();
    let mut app = snapshot(LifecycleState::Started, 3);

    scale_down(&gw, &mut app).await.expect("scale down");

    assert_eq!(app.state, LifecycleState::Started);
    assert_eq!(app.requested_instances, 2);
    assert_eq!(gw.calls(), vec![Call::scale("foo", 2)]);
}

#[tokio::test]
async fn scale_down_below_zero_is_an_error() {
    let gw = RecordingGateway::new();
    let mut app = snapshot(LifecycleState::Stopped, 0);

    let err = scale_down(&gw, &mut app).await.expect_err("underflow");
    assert!(err.to_string().contains("below zero"));
    assert!(gw.calls().is_empty());
}

// ── RolloverController ────────────────────────────────────────────────────────

#[tokio::test]
async fn end_to_end_four_instances_over_four_seconds() {
    let gw = RecordingGateway::new()
        .with_app("old", LifecycleState::Started, 4, 4)
        .with_app("new", LifecycleState::Stopped, 0, 0);
    let reporter = RecordingReporter::default();
    let sleeper = RecordingSleeper::default();

    let outcome = RolloverController::new(&gw, &reporter, &sleeper)
        .run("old", "new", Duration::from_secs(4))
        .await
        .expect("rollover");

    let RolloverOutcome::Completed { steps, source, target } = outcome else {
        panic!("expected a completed rollover");
    };
    assert_eq!(steps, 4);
    assert_eq!(source.state, LifecycleState::Stopped);
    assert_eq!(source.requested_instances, 0);
    assert_eq!(target.state, LifecycleState::Started);
    assert_eq!(target.requested_instances, 4);

    assert_eq!(
        gw.calls(),
        vec![
            Call::fetch("old"),
            Call::fetch("new"),
            Call::start("new"),
            Call::scale("new", 1),
            Call::scale("old", 3),
            Call::scale("new", 2),
            Call::scale("old", 2),
            Call::scale("new", 3),
            Call::scale("old", 1),
            Call::scale("new", 4),
            Call::stop("old"),
        ]
    );

    // one pause between each pair of steps, none after the last
    assert_eq!(sleeper.pauses(), vec![Duration::from_secs(1); 3]);
    // initial line plus one per step
    assert_eq!(reporter.lines().len(), 5);
    assert_eq!(reporter.finish_count(), 1);
}

#[tokio::test]
async fn status_lines_track_each_step() {
    let gw = RecordingGateway::new()
        .with_app("old", LifecycleState::Started, 2, 2)
        .with_app("new", LifecycleState::Started, 1, 1);
    let reporter = RecordingReporter::default();
    let sleeper = RecordingSleeper::default();

    RolloverController::new(&gw, &reporter, &sleeper)
        .run("old", "new", Duration::from_secs(10))
        .await
        .expect("rollover");

    let counts: Vec<(u32, u32)> = reporter
        .lines()
        .iter()
        .map(|(s, t)| (s.requested_instances, t.requested_instances))
        .collect();
    assert_eq!(counts, vec![(2, 1), (1, 2), (0, 3)]);
    assert_eq!(sleeper.pauses(), vec![Duration::from_secs(5)]);
}

#[tokio::test]
async fn every_step_scales_target_before_source() {
    let gw = RecordingGateway::new()
        .with_app("old", LifecycleState::Started, 6, 6)
        .with_app("new", LifecycleState::Started, 2, 2);
    let reporter = RecordingReporter::default();
    let sleeper = RecordingSleeper::default();

    RolloverController::new(&gw, &reporter, &sleeper)
        .run("old", "new", Duration::ZERO)
        .await
        .expect("rollover");

    let mutations = gw.mutations();
    assert_eq!(mutations.len(), 12);
    for (i, pair) in mutations.chunks(2).enumerate() {
        let step = u32::try_from(i).expect("small") + 1;
        assert_eq!(pair[0], Call::scale("new", 2 + step), "step {step} target first");
        let source_call = if step == 6 {
            Call::stop("old")
        } else {
            Call::scale("old", 6 - step)
        };
        assert_eq!(pair[1], source_call, "step {step} source second");
    }
}

#[tokio::test]
async fn zero_duration_pauses_for_nothing() {
    let gw = RecordingGateway::new()
        .with_app("old", LifecycleState::Started, 3, 3)
        .with_app("new", LifecycleState::Stopped, 0, 0);
    let reporter = RecordingReporter::default();
    let sleeper = RecordingSleeper::default();

    RolloverController::new(&gw, &reporter, &sleeper)
        .run("old", "new", Duration::ZERO)
        .await
        .expect("rollover");

    assert!(sleeper.pauses().iter().all(Duration::is_zero));
}

#[tokio::test]
async fn uneven_interval_is_truncated() {
    let gw = RecordingGateway::new()
        .with_app("old", LifecycleState::Started, 3, 3)
        .with_app("new", LifecycleState::Started, 0, 0);
    let reporter = RecordingReporter::default();
    let sleeper = RecordingSleeper::default();

    RolloverController::new(&gw, &reporter, &sleeper)
        .run("old", "new", Duration::from_secs(10))
        .await
        .expect("rollover");

    assert_eq!(
        sleeper.pauses(),
        vec![Duration::from_nanos(3_333_333_333); 2]
    );
}

#[tokio::test]
async fn stopped_source_is_nothing_to_roll_over() {
    // Cloud Foundry reports a stale instance count on stopped apps.
    let gw = RecordingGateway::new()
        .with_app("old", LifecycleState::Stopped, 0, 5)
        .with_app("new", LifecycleState::Started, 2, 2);
    let reporter = RecordingReporter::default();
    let sleeper = RecordingSleeper::default();

    let outcome = RolloverController::new(&gw, &reporter, &sleeper)
        .run("old", "new", Duration::from_secs(60))
        .await
        .expect("no-op rollover");

    assert!(matches!(outcome, RolloverOutcome::NothingToRollOver { .. }));
    assert!(gw.mutations().is_empty());
    assert!(sleeper.pauses().is_empty());
    assert_eq!(reporter.lines().len(), 1);
    assert_eq!(reporter.lines()[0].0.requested_instances, 0);
    assert_eq!(reporter.finish_count(), 1);
}

#[tokio::test]
async fn stopped_target_starts_from_zero() {
    let gw = RecordingGateway::new()
        .with_app("old", LifecycleState::Started, 1, 1)
        .with_app("new", LifecycleState::Stopped, 0, 7);
    let reporter = RecordingReporter::default();
    let sleeper = RecordingSleeper::default();

    RolloverController::new(&gw, &reporter, &sleeper)
        .run("old", "new", Duration::from_secs(1))
        .await
        .expect("rollover");

    assert_eq!(
        gw.mutations(),
        vec![Call::start("new"), Call::scale("new", 1), Call::stop("old")]
    );
}

#[tokio::test]
async fn missing_source_aborts_before_any_mutation() {
    let gw = RecordingGateway::new().with_app("new", LifecycleState::Started, 1, 1);
    let reporter = RecordingReporter::default();
    let sleeper = RecordingSleeper::default();

    let err = RolloverController::new(&gw, &reporter, &sleeper)
        .run("old", "new", Duration::from_secs(1))
        .await
        .expect_err("source missing");

    assert_eq!(err.to_string(), "App old not found");
    assert_eq!(
        err.downcast_ref::<GatewayError>(),
        Some(&GatewayError::NotFound("old".to_string()))
    );
    assert_eq!(gw.calls(), vec![Call::fetch("old")]);
    assert!(reporter.lines().is_empty());
}

#[tokio::test]
async fn missing_target_aborts_before_any_mutation() {
    let gw = RecordingGateway::new().with_app("old", LifecycleState::Started, 2, 2);
    let reporter = RecordingReporter::default();
    let sleeper = RecordingSleeper::default();

    let err = RolloverController::new(&gw, &reporter, &sleeper)
        .run("old", "new", Duration::from_secs(1))
        .await
        .expect_err("target missing");

    assert_eq!(err.to_string(), "App new not found");
    assert!(gw.mutations().is_empty());
}

#[tokio::test]
async fn gateway_failure_mid_rollover_stops_without_rollback() {
    let gw = RecordingGateway::new()
        .with_app("old", LifecycleState::Started, 3, 3)
        .with_app("new", LifecycleState::Started, 0, 0)
        .failing_on(Call::scale("new", 2));
    let reporter = RecordingReporter::default();
    let sleeper = RecordingSleeper::default();

    let err = RolloverController::new(&gw, &reporter, &sleeper)
        .run("old", "new", Duration::from_secs(3))
        .await
        .expect_err("injected failure");

    assert!(matches!(
        err.downcast_ref::<GatewayError>(),
        Some(GatewayError::Transport(_))
    ));
    assert_eq!(
        gw.mutations(),
        vec![
            Call::scale("new", 1),
            Call::scale("old", 2),
            Call::scale("new", 2),
        ]
    );
    assert_eq!(sleeper.pauses().len(), 1);
    assert_eq!(reporter.finish_count(), 0);
}
