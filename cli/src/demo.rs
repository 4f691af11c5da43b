use crate::cli::Args;
use crate::error::CurtainResult;
use curtain_core::view::MAX_ANIMATION_FPS;
use curtain_core::{CurtainConfig, HeadlessView, OverlayController, OverlayHandle};
use log::{debug, info, warn};
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

/// Runs a fake long operation behind a blocking overlay.
///
/// Must be polled inside a `LocalSet`; the headless view animates on local tasks.
pub async fn run(
    args: &Args,
    config: CurtainConfig,
    shutdown: Arc<AtomicBool>,
) -> CurtainResult<()> {
    let view = Rc::new(HeadlessView::new(&config));
    let controller = OverlayController::with_config(view.clone(), config.clone());
    let step_delay = Duration::from_millis(args.step_ms);
    let restart_at = (args.steps + 1) / 2;

    {
        let mut overlay = controller.show(args.message.clone());
        report(&view, &overlay);

        for step in 1..=args.steps {
            sleep(step_delay).await;

            if shutdown.load(Ordering::SeqCst) {
                warn!("Interrupted at step {step}/{}", args.steps);
                break;
            }

            if args.replace && step == restart_at {
                info!("Starting a replacement overlay");
                // The old handle is already dismissed by the time it drops here.
                overlay = controller.show(format!("{} (restarted)", args.message));
            }

            overlay.update_progress_value(
                format!("{} ({}/{})", args.message, step, args.steps),
                step,
                args.steps,
            );
            report(&view, &overlay);
        }

        info!("Operation finished, releasing overlay");
    }

    let fps = config.animation_fps.clamp(1, MAX_ANIMATION_FPS);
    let frame = Duration::from_secs_f64(1.0 / fps as f64);
    while controller.has_active() {
        sleep(frame).await;
    }

    if !view.live_surfaces().is_empty() {
        return Err(format!("Surfaces left open: {:?}", view.live_surfaces()).into());
    }

    info!("Overlay released");
    Ok(())
}

fn report(view: &HeadlessView, overlay: &OverlayHandle) {
    match overlay.surface().and_then(|surface| view.snapshot(surface)) {
        Some(snapshot) => info!(
            "[{:?}] {:>3.0}% - {}",
            overlay.state(),
            snapshot.opacity * 100.0,
            snapshot.message
        ),
        None => debug!("Overlay {} has no surface", overlay.generation()),
    }
}
