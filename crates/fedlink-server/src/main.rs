// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! fedlink server binary.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use fedlink_server::{create_router, version, AppState, Providers};
use fedlink_server_provisioning::MemoryStore;
use tower_http::{
	cors::{Any, CorsLayer},
	trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// fedlink server - federated Odoo and OpenID Connect logins.
#[derive(Parser, Debug)]
#[command(name = "fedlink-server", about = "Federated login server", version)]
struct Args {
	/// Config file to load instead of /etc/fedlink/server.toml
	#[arg(long, env = "FEDLINK_SERVER_CONFIG")]
	config: Option<PathBuf>,

	#[command(subcommand)]
	command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Show version and build information
	Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	// Load .env before clap so env-backed flags see it
	dotenvy::dotenv().ok();

	let args = Args::parse();

	if let Some(Command::Version) = args.command {
		println!("{}", version::format_version_info());
		return Ok(());
	}

	let config = match &args.config {
		Some(path) => fedlink_server_config::load_config_with_file(path),
		None => fedlink_server_config::load_config(),
	}
	.context("failed to load configuration")?;

	tracing_subscriber::registry()
		.with(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| config.logging.level.clone().into()),
		)
		.with(tracing_subscriber::fmt::layer())
		.init();

	tracing::info!(
		host = %config.http.host,
		port = config.http.port,
		"starting fedlink-server"
	);

	let providers = Providers::from_config(&config).resolve_oidc().await;
	let store = Arc::new(MemoryStore::new());
	let state = AppState::new(providers, store, &config);

	let app = create_router(state)
		.layer(TraceLayer::new_for_http())
		.layer(
			CorsLayer::new()
				.allow_origin(Any)
				.allow_methods(Any)
				.allow_headers(Any),
		);

	let addr = config.socket_addr();
	let listener = tokio::net::TcpListener::bind(&addr)
		.await
		.with_context(|| format!("failed to bind {addr}"))?;
	tracing::info!(%addr, "listening");

	tokio::select! {
		result = axum::serve(listener, app) => {
			if let Err(e) = result {
				tracing::error!(error = %e, "Server error");
			}
		}
		_ = tokio::signal::ctrl_c() => {
			tracing::info!("Received shutdown signal");
		}
	}

	Ok(())
}
