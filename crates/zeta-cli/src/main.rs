// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! zeta CLI - operator tooling for the console's translation and session
//! services.
//!
//! This binary is the composition root: it loads the layered configuration,
//! initialises logging and constructs the services each command needs.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use zeta_config::{load_config, load_config_with_file, LogFormat, LoggingConfig, ZetaConfig};

mod locale;
mod rights;
mod session;
mod translate;

/// zeta - console translation and session tooling
#[derive(Parser, Debug)]
#[command(name = "zeta", version, about, long_about = None)]
struct Args {
	/// Path to custom configuration file
	#[arg(short, long)]
	config: Option<PathBuf>,

	/// Log level (overrides config)
	#[arg(short, long)]
	log_level: Option<String>,

	/// Output logs as JSON (overrides config)
	#[arg(long)]
	json_logs: bool,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Resolve a translation key
	Translate {
		/// Translation file (`{"translations": [...]}`)
		#[arg(long, short)]
		file: Option<PathBuf>,
		/// Language to resolve in (defaults to the detected locale)
		#[arg(long)]
		language: Option<String>,
		/// Substitution parameter (repeatable: -p '$0=World')
		#[arg(long, short, value_name = "KEY=VALUE")]
		param: Vec<String>,
		/// Lookup key, e.g. `tooltip:xmom.dataflow.remove`
		key: String,
	},
	/// Translate a server message carrying an `EC-...` error code
	TranslateError {
		/// Translation file (`{"translations": [...]}`)
		#[arg(long, short)]
		file: Option<PathBuf>,
		/// Language to resolve in (defaults to the detected locale)
		#[arg(long)]
		language: Option<String>,
		/// Server message
		message: String,
	},
	/// Evaluate rights offline
	Rights {
		#[command(subcommand)]
		command: RightsCommand,
	},
	/// Talk to the server's session endpoints
	Session {
		#[command(subcommand)]
		command: SessionCommand,
	},
	/// List supported console locales
	Locales,
}

#[derive(Subcommand, Debug)]
enum RightsCommand {
	/// Check whether a rights list may start an order type
	Check {
		/// Right string (repeatable)
		#[arg(long = "right", required = true)]
		rights: Vec<String>,
		/// Workspace the order is started in
		#[arg(long, conflicts_with = "application")]
		workspace: Option<String>,
		/// Application the order is started in
		#[arg(long, requires = "version")]
		application: Option<String>,
		/// Application version
		#[arg(long, requires = "application")]
		version: Option<String>,
		/// Order type, e.g. `xact.device.get`
		order_type: String,
	},
}

#[derive(Subcommand, Debug)]
enum SessionCommand {
	/// Show the current session info
	Info,
	/// Log in (password from ZETA_PASSWORD)
	Login {
		#[arg(long, short)]
		username: String,
		/// Take over an existing session of the same user
		#[arg(long)]
		force: bool,
	},
	/// Log out
	Logout,
}

fn init_tracing(logging: &LoggingConfig) {
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

	match logging.format {
		LogFormat::Json => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().json().with_writer(std::io::stderr))
				.init();
		}
		LogFormat::Compact => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().compact().with_writer(std::io::stderr))
				.init();
		}
		LogFormat::Pretty => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().pretty().with_writer(std::io::stderr))
				.init();
		}
	}
}

fn load(args: &Args) -> Result<ZetaConfig> {
	let mut config = match &args.config {
		Some(path) => load_config_with_file(path),
		None => load_config(),
	}
	.context("failed to load configuration")?;

	if let Some(level) = &args.log_level {
		config.logging.level = level.clone();
	}
	if args.json_logs {
		config.logging.format = LogFormat::Json;
	}
	Ok(config)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
	let args = Args::parse();
	let config = load(&args)?;

	init_tracing(&config.logging);
	debug!(command = ?args.command, "starting zeta");

	match args.command {
		Command::Translate {
			file,
			language,
			param,
			key,
		} => {
			let language =
				language.unwrap_or_else(|| locale::detect_language(&config.i18n.default_language));
			let service = translate::load_service(&config.i18n, file.as_deref(), &language).await?;
			println!("{}", translate::translate(&service, &key, &param)?);
		}
		Command::TranslateError {
			file,
			language,
			message,
		} => {
			let language =
				language.unwrap_or_else(|| locale::detect_language(&config.i18n.default_language));
			let service = translate::load_service(&config.i18n, file.as_deref(), &language).await?;
			println!("{}", translate::translate_error(&service, &message)?);
		}
		Command::Rights {
			command:
				RightsCommand::Check {
					rights,
					workspace,
					application,
					version,
					order_type,
				},
		} => {
			let scope = rights::scope_from_args(workspace, application, version);
			let decision = rights::check(&rights, &order_type, scope.as_ref());
			println!("{}", decision.describe(&order_type));
			if !decision.is_allowed() {
				return Ok(ExitCode::FAILURE);
			}
		}
		Command::Session { command } => {
			let client = session::client(&config.auth)?;
			let output = match command {
				SessionCommand::Info => session::info(&client).await?,
				SessionCommand::Login { username, force } => {
					session::login(&client, &username, force).await?
				}
				SessionCommand::Logout => session::logout(&client).await?,
			};
			println!("{output}");
		}
		Command::Locales => {
			for line in locale::describe_locales() {
				println!("{line}");
			}
		}
	}

	info!("done");
	Ok(ExitCode::SUCCESS)
}
