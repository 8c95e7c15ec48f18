//! Process shutdown signal.

use std::future::{pending, Future};

/// Resolves on the first SIGINT (Ctrl-C) or SIGTERM.
///
/// On Unix both hooks are installed before this returns, so a signal that
/// arrives before the future is first polled is not lost. A hook that cannot
/// be installed is logged and never fires; the other one keeps working.
/// Must be called from inside a tokio runtime.
#[cfg(unix)]
pub fn signal() -> impl Future<Output = ()> + Send + 'static {
    use tokio::signal::unix::{signal, SignalKind};

    let interrupt = signal(SignalKind::interrupt())
        .map_err(|e| log::error!("unable to listen for SIGINT: {e}"))
        .ok();
    let terminate = signal(SignalKind::terminate())
        .map_err(|e| log::error!("unable to listen for SIGTERM: {e}"))
        .ok();

    async move {
        let on_interrupt = async {
            match interrupt {
                Some(mut stream) => {
                    stream.recv().await;
                    log::info!("received SIGINT");
                }
                None => pending::<()>().await,
            }
        };
        let on_terminate = async {
            match terminate {
                Some(mut stream) => {
                    stream.recv().await;
                    log::info!("received SIGTERM");
                }
                None => pending::<()>().await,
            }
        };

        tokio::select! {
            () = on_interrupt => {}
            () = on_terminate => {}
        }
    }
}

#[cfg(not(unix))]
pub fn signal() -> impl Future<Output = ()> + Send + 'static {
    async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => log::info!("received interrupt"),
            Err(e) => {
                log::error!("unable to listen for Ctrl-C: {e}");
                pending::<()>().await;
            }
        }
    }
}
