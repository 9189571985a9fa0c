use bookshelf::{BookRepo, Config, connect, router};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() {
	let filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new("info,bookshelf=debug,tower_http=debug"));
	fmt()
		.with_env_filter(filter)
		.with_target(true)
		.init();

	let config = Config::load();

	let pool = match connect(&config.database).await {
		Ok(pool) => pool,
		Err(e) => {
			tracing::error!(error = %e, "could not start");
			std::process::exit(1);
		},
	};

	let app = router(BookRepo::new(pool.clone()));

	let listener = match tokio::net::TcpListener::bind(&config.listen).await {
		Ok(listener) => listener,
		Err(e) => {
			tracing::error!(addr = %config.listen, error = %e, "could not bind");
			pool.close().await;
			std::process::exit(1);
		},
	};
	tracing::info!(addr = %config.listen, "listening");

	if let Err(e) = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await {
		tracing::error!(error = %e, "server error");
	}

	pool.close().await;
	tracing::info!("stopped");
}

async fn shutdown_signal() {
	let ctrl_c = async {
		if let Err(e) = tokio::signal::ctrl_c().await {
			tracing::warn!(error = %e, "could not listen for ctrl-c");
			std::future::pending::<()>().await;
		}
	};

	#[cfg(unix)]
	let terminate = async {
		match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
			Ok(mut sig) => { sig.recv().await; },
			Err(e) => {
				tracing::warn!(error = %e, "could not listen for SIGTERM");
				std::future::pending::<()>().await;
			},
		}
	};

	#[cfg(not(unix))]
	let terminate = std::future::pending::<()>();

	tokio::select! {
		_ = ctrl_c => {},
		_ = terminate => {},
	}
	tracing::info!("shutting down");
}
