use curtain_core::{CurtainConfig, HeadlessView, OverlayController, OverlayState};
use std::rc::Rc;
use std::time::Duration;
use tokio::task::LocalSet;
use tokio::time::sleep;

fn setup() -> (Rc<HeadlessView>, OverlayController) {
    let config = CurtainConfig::default();
    let view = Rc::new(HeadlessView::new(&config));
    let controller = OverlayController::with_config(view.clone(), config);
    (view, controller)
}

#[tokio::test(start_paused = true)]
async fn test_fade_in_reaches_full_opacity() {
    LocalSet::new()
        .run_until(async {
            let (view, controller) = setup();
            let handle = controller.show("Loading library");
            let surface = handle.surface().unwrap();

            let initial = view.snapshot(surface).unwrap();
            assert_eq!(initial.opacity, 0.0);
            assert_eq!(initial.message, "Loading library");

            sleep(Duration::from_millis(400)).await;

            assert_eq!(handle.state(), OverlayState::Shown);
            assert_eq!(view.snapshot(surface).unwrap().opacity, 1.0);
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn test_dispose_fades_out_then_closes() {
    LocalSet::new()
        .run_until(async {
            let (view, controller) = setup();
            let handle = controller.show("Working");
            let surface = handle.surface().unwrap();
            sleep(Duration::from_millis(400)).await;

            handle.dispose_scoped();
            assert_eq!(handle.state(), OverlayState::Exiting);

            sleep(Duration::from_millis(50)).await;
            let opacity = view.snapshot(surface).unwrap().opacity;
            assert!(opacity > 0.0 && opacity < 1.0, "opacity {opacity}");

            sleep(Duration::from_millis(150)).await;
            assert_eq!(handle.state(), OverlayState::Dismissed);
            assert!(view.snapshot(surface).is_none());
            assert!(!controller.has_active());
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn test_replacement_mid_fade() {
    LocalSet::new()
        .run_until(async {
            let (view, controller) = setup();
            let first = controller.show("first");
            let first_surface = first.surface().unwrap();
            sleep(Duration::from_millis(100)).await;

            let second = controller.show("second");
            let second_surface = second.surface().unwrap();
            assert!(view.snapshot(first_surface).is_none());
            assert_eq!(view.live_surfaces(), vec![second_surface]);

            sleep(Duration::from_millis(400)).await;

            assert_eq!(first.state(), OverlayState::Dismissed);
            assert_eq!(second.state(), OverlayState::Shown);
            assert_eq!(controller.current_generation(), Some(second.generation()));
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn test_host_detached_surface_still_dismisses() {
    LocalSet::new()
        .run_until(async {
            let (view, controller) = setup();
            let handle = controller.show("Working");
            let surface = handle.surface().unwrap();
            sleep(Duration::from_millis(400)).await;

            assert!(view.detach(surface));
            handle.update_progress("still going");
            assert_eq!(handle.message(), "still going");

            handle.dismiss();
            assert_eq!(handle.state(), OverlayState::Dismissed);
            assert_eq!(handle.surface(), None);
            assert!(!controller.has_active());
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn test_scoped_overlay_reports_progress_and_fades_out() {
    LocalSet::new()
        .run_until(async {
            let (view, controller) = setup();
            {
                let overlay = controller.show("Saving");
                let surface = overlay.surface().unwrap();
                for step in 1..=3 {
                    sleep(Duration::from_millis(120)).await;
                    overlay.update_progress_value(format!("Saving {step}/3"), step, 3);
                }
                assert_eq!(view.snapshot(surface).unwrap().message, "Saving 3/3");
                assert_eq!(overlay.state(), OverlayState::Shown);
            }

            assert!(controller.has_active());
            sleep(Duration::from_millis(200)).await;
            assert!(!controller.has_active());
            assert!(view.live_surfaces().is_empty());
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn test_prepared_overlay_waits_for_first_update() {
    LocalSet::new()
        .run_until(async {
            let (view, controller) = setup();
            let handle = controller.prepare("Queued");
            let surface = handle.surface().unwrap();

            sleep(Duration::from_millis(400)).await;
            assert_eq!(handle.state(), OverlayState::Created);
            assert_eq!(view.snapshot(surface).unwrap().opacity, 0.0);

            handle.update_progress("Starting");
            sleep(Duration::from_millis(400)).await;

            assert_eq!(handle.state(), OverlayState::Shown);
            let snapshot = view.snapshot(surface).unwrap();
            assert_eq!(snapshot.opacity, 1.0);
            assert_eq!(snapshot.message, "Starting");
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn test_extreme_frame_rate_still_fades() {
    LocalSet::new()
        .run_until(async {
            let config = CurtainConfig::from_yaml("animation_fps: 4000000000").unwrap();
            let view = Rc::new(HeadlessView::new(&config));
            let controller = OverlayController::with_config(view.clone(), config);

            let handle = controller.show("x");
            let surface = handle.surface().unwrap();
            sleep(Duration::from_millis(400)).await;

            assert_eq!(handle.state(), OverlayState::Shown);
            assert_eq!(view.snapshot(surface).unwrap().opacity, 1.0);
        })
        .await;
}
