//! ZTF ToO queue command-line entry point.
//!
//! # Flow
//! 1. Loads `.env` and applies logging flags to the environment
//! 2. Reads Kowalski settings once and builds a queue client
//! 3. Runs one query, deletion or submission and prints the result

use anyhow::{anyhow, Context};
use clap::{Args, Parser, Subcommand};
use dotenvy::dotenv_override;
use std::env::{set_var, var};
use tracing::{error, info, warn};

use ztf_too_queue::{
	bootstrap::{connect, initialize_client},
	models::{TooTarget, ValidityWindow},
	services::queue::TriggerBuilder,
	utils::{
		is_icecube_name, is_ztf_name, isotime_to_mjd, logging::setup_logging, mjd_to_isotime,
		too_trigger_name,
	},
};

#[derive(Parser)]
#[command(
	name = "ztf-too-queue",
	about = "Submit, list and delete ZTF Target-of-Opportunity triggers through Kowalski.",
	version
)]
struct Cli {
	/// Write logs to file instead of stdout
	#[arg(long, global = true)]
	log_file: bool,

	/// Set log level (trace, debug, info, warn, error)
	#[arg(long, value_name = "LEVEL", global = true)]
	log_level: Option<String>,

	/// Path to store log files (default: logs/)
	#[arg(long, value_name = "PATH", global = true)]
	log_path: Option<String>,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand)]
enum Command {
	/// Inspect or modify queues on Kowalski
	Queue {
		#[command(subcommand)]
		action: QueueCommand,
	},
	/// Validate and submit one trigger
	Submit(SubmitArgs),
}

#[derive(Subcommand)]
enum QueueCommand {
	/// List active ToO queues with a one-line summary each
	Too { user: String },
	/// List the names of every queue
	All { user: String },
	/// Delete one queue by name
	Delete { user: String, trigger: String },
}

#[derive(Args)]
struct SubmitArgs {
	user: String,

	/// Queue name, starting with ToO_ or TEST_
	#[arg(long, required_unless_present = "alert", conflicts_with = "alert")]
	name: Option<String>,

	/// Alert to follow up (e.g. IC220513A); submits one ToO_{alert}_{field} trigger per field
	#[arg(long)]
	alert: Option<String>,

	/// Window start as MJD or "YYYY-MM-DD HH:MM:SS" (UTC)
	#[arg(long)]
	start: String,

	/// Window end; defaults to one day after the start
	#[arg(long)]
	end: Option<String>,

	/// Field ids, observed in the order given
	#[arg(long, required = true, num_args = 1..)]
	field: Vec<u32>,

	/// Filter id: 1 (r), 2 (g) or 3 (i)
	#[arg(long, default_value_t = 1)]
	filter: u8,

	/// Exposure time per field in seconds
	#[arg(long, default_value_t = 300)]
	exposure: u32,

	/// Print the request payload without sending it
	#[arg(long)]
	dry_run: bool,
}

impl Cli {
	/// Apply CLI options to environment variables, overriding any existing values
	fn apply_to_env(&self) {
		dotenv_override().ok();

		if self.log_file {
			set_var("LOG_MODE", "file");
		}

		if let Ok(level) = var("RUST_LOG") {
			set_var("LOG_LEVEL", level);
		}

		if let Some(level) = &self.log_level {
			set_var("LOG_LEVEL", level);
			set_var("RUST_LOG", level);
		}

		if let Some(path) = &self.log_path {
			set_var("LOG_DATA_DIR", path);
		}
	}
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();

	cli.apply_to_env();

	setup_logging().unwrap_or_else(|e| {
		error!("Failed to setup logging: {}", e);
	});

	match cli.command {
		Command::Queue { action } => run_queue(action).await,
		Command::Submit(args) => run_submit(args).await,
	}
}

async fn run_queue(action: QueueCommand) -> anyhow::Result<()> {
	match action {
		QueueCommand::Too { user } => {
			let client = connect(&user).await?;
			let summaries = client.get_too_queue_summaries().await?;
			if summaries.is_empty() {
				info!("No active ToO queues");
			}
			for line in summaries {
				println!("{}", line);
			}
		}
		QueueCommand::All { user } => {
			let client = connect(&user).await?;
			for name in client.get_all_queue_names().await? {
				println!("{}", name);
			}
		}
		QueueCommand::Delete { user, trigger } => {
			let mut client = initialize_client(&user)?;
			client.delete_trigger(&trigger).await?;
			println!("Deleted {}", trigger);
		}
	}
	Ok(())
}

async fn run_submit(args: SubmitArgs) -> anyhow::Result<()> {
	let start = parse_mjd(&args.start)?;
	let window = match &args.end {
		Some(end) => ValidityWindow::new(start, parse_mjd(end)?),
		None => ValidityWindow::starting_at(start),
	};
	let targets: Vec<TooTarget> = args
		.field
		.iter()
		.map(|field| TooTarget::new(*field, args.filter, args.exposure))
		.collect();

	let triggers: Vec<(String, Vec<TooTarget>)> = match (&args.alert, &args.name) {
		(Some(alert), _) => {
			if !is_icecube_name(alert) && !is_ztf_name(alert) {
				warn!(%alert, "Alert is neither an IceCube nor a ZTF name");
			}
			targets
				.into_iter()
				.map(|target| (too_trigger_name(alert, target.field_id), vec![target]))
				.collect()
		}
		(None, Some(name)) => vec![(name.clone(), targets)],
		(None, None) => return Err(anyhow!("either --name or --alert is required")),
	};

	if args.dry_run {
		info!(
			start = %mjd_to_isotime(window.start_mjd).unwrap_or_else(|| window.start_mjd.to_string()),
			end = %mjd_to_isotime(window.end_mjd).unwrap_or_else(|| window.end_mjd.to_string()),
			"Dry run, nothing sent"
		);
		for (name, targets) in triggers {
			let trigger = TriggerBuilder::new(args.user.as_str())
				.name(name)
				.window(window)
				.targets(targets)
				.build()?;
			println!("{}", serde_json::to_string_pretty(&trigger.to_request())?);
		}
		return Ok(());
	}

	let mut client = initialize_client(&args.user)?;
	for (name, targets) in triggers {
		client.add_trigger_with_window(name, window, targets)?;
	}
	let report = client.submit_queue().await;

	for name in &report.accepted {
		println!("Submitted {}", name);
	}
	for rejected in &report.rejected {
		warn!("{}", rejected);
	}
	if let Some(err) = report.aborted {
		for name in &report.unsent {
			warn!(trigger = %name, "Not sent");
		}
		return Err(err.into());
	}
	if report.rejected.is_empty() {
		Ok(())
	} else {
		Err(anyhow!("{} trigger(s) rejected", report.rejected.len()))
	}
}

/// Accepts an MJD number or a UTC timestamp.
fn parse_mjd(value: &str) -> anyhow::Result<f64> {
	if let Ok(mjd) = value.trim().parse::<f64>() {
		return Ok(mjd);
	}
	isotime_to_mjd(value).with_context(|| format!("'{}' is neither an MJD nor a UTC time", value))
}
