use super::*;
use std::time::Duration;

fn controller() -> Arc<GlitchController> {
    Arc::new(GlitchController::new(Arc::new(Clock::new())))
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-3
}

#[tokio::test(start_paused = true)]
async fn corrupt_runs_full_duration() {
    let g = controller();
    let out = g
        .corrupt(0, 10, 0.5, &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(out, EffectOutcome::Completed);
    assert!(approx(g.clock.unscaled_secs(), 0.5));
    assert_eq!(g.in_flight(), 0);
}

#[tokio::test(start_paused = true)]
async fn invalid_ranges_fail_without_subscribing() {
    let g = controller();
    let token = CancellationToken::new();
    assert!(matches!(
        g.corrupt(-1, 5, 1.0, &token).await,
        Err(NovelKitError::InvalidArgument(_))
    ));
    assert!(matches!(
        g.distort(5, 2, DistortionKind::Melt, &token).await,
        Err(NovelKitError::InvalidArgument(_))
    ));
    assert_eq!(g.in_flight(), 0);
    assert_eq!(g.clock.unscaled_secs(), 0.0);
}

#[tokio::test(start_paused = true)]
async fn stop_all_interrupts_every_operation_in_flight() {
    let g = controller();
    let corrupt = {
        let g = Arc::clone(&g);
        tokio::spawn(async move { g.corrupt(0, 10, 5.0, &CancellationToken::new()).await })
    };
    let noise = {
        let g = Arc::clone(&g);
        tokio::spawn(async move { g.screen_noise(0.6, 5.0, &CancellationToken::new()).await })
    };

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(g.in_flight(), 2);
    g.stop_all();

    assert_eq!(corrupt.await.unwrap().unwrap(), EffectOutcome::Interrupted);
    assert_eq!(noise.await.unwrap(), EffectOutcome::Interrupted);
    assert!(approx(g.clock.unscaled_secs(), 0.1));
}

#[tokio::test(start_paused = true)]
async fn operations_after_stop_all_are_unaffected() {
    let g = controller();
    g.stop_all();
    g.stop_all();
    let out = g
        .corrupt(0, 3, 0.2, &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(out, EffectOutcome::Completed);
}

#[tokio::test(start_paused = true)]
async fn caller_cancellation_is_not_an_interrupt() {
    let g = controller();
    let mine = CancellationToken::new();
    let cancelled = {
        let g = Arc::clone(&g);
        let mine = mine.clone();
        tokio::spawn(async move { g.screen_noise(1.0, 5.0, &mine).await })
    };
    let other = {
        let g = Arc::clone(&g);
        tokio::spawn(async move { g.corrupt(0, 1, 0.3, &CancellationToken::new()).await })
    };

    tokio::time::sleep(Duration::from_millis(50)).await;
    mine.cancel();

    assert_eq!(cancelled.await.unwrap(), EffectOutcome::Cancelled);
    assert_eq!(other.await.unwrap().unwrap(), EffectOutcome::Completed);
}

#[tokio::test(start_paused = true)]
async fn distort_lasts_one_frame() {
    let config = GlitchConfig {
        frame_interval_seconds: 0.05,
    };
    let g = GlitchController::with_config(Arc::new(Clock::new()), config).unwrap();
    let out = g
        .distort(0, 0, DistortionKind::Shatter, &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(out, EffectOutcome::Completed);
    assert!(approx(g.clock.unscaled_secs(), 0.05));
}

#[tokio::test(start_paused = true)]
async fn zero_and_negative_durations_complete_immediately() {
    let g = controller();
    let token = CancellationToken::new();
    assert_eq!(
        g.corrupt(0, 0, -3.0, &token).await.unwrap(),
        EffectOutcome::Completed
    );
    assert_eq!(g.screen_noise(0.5, 0.0, &token).await, EffectOutcome::Completed);
    assert_eq!(g.clock.unscaled_secs(), 0.0);
}

#[test]
fn intensity_and_duration_are_clamped() {
    assert_eq!(clamp_intensity(1.7), 1.0);
    assert_eq!(clamp_intensity(-0.2), 0.0);
    assert_eq!(clamp_intensity(f64::NAN), 0.0);
    assert_eq!(clamp_intensity(0.4), 0.4);
    assert_eq!(clamp_duration(-1.0), 0.0);
    assert_eq!(clamp_duration(f64::NAN), 0.0);
}

#[test]
fn config_defaults_and_validation() {
    let c = GlitchConfig::from_json("{}").unwrap();
    assert!(approx(c.frame_interval_seconds, 1.0 / 60.0));
    let bad = GlitchConfig {
        frame_interval_seconds: -1.0,
    };
    assert!(matches!(
        bad.validate(),
        Err(NovelKitError::InvalidArgument(_))
    ));
}

#[tokio::test(start_paused = true)]
async fn huge_duration_runs_until_stopped() {
    let g = controller();
    let burst = {
        let g = Arc::clone(&g);
        tokio::spawn(async move { g.corrupt(0, 5, 1e30, &CancellationToken::new()).await })
    };
    tokio::time::sleep(Duration::from_secs(60)).await;
    assert!(!burst.is_finished());

    g.stop_all();
    assert_eq!(burst.await.unwrap().unwrap(), EffectOutcome::Interrupted);
}
