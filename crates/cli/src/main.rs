//! Quire command line.
//!
//! Drives one editing session over the headless engine from a script file or
//! standard input, one command per line. Run `help` for the command list.

mod repl;
mod script;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use quire_engine::memory::MemoryEngine;
use quire_session::{MemoryClipboard, Session, SessionConfig};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use crate::repl::{Flow, Repl};

#[derive(Parser, Debug)]
#[command(name = "quire")]
#[command(about = "Ink document session driver")]
#[command(version)]
struct Args {
	/// Script to run; reads standard input when omitted
	script: Option<PathBuf>,

	/// Session config file (defaults to the user config if present)
	#[arg(short, long, value_name = "PATH")]
	config: Option<PathBuf>,

	/// Directory packages are created in and opened from
	#[arg(short, long, value_name = "DIR")]
	dir: Option<PathBuf>,

	/// Verbose logging
	#[arg(short, long)]
	verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
	let args = Args::parse();
	setup_tracing(args.verbose);

	let mut config = SessionConfig::load_or_default(args.config.as_deref()).context("failed to load session config")?;
	if let Some(dir) = args.dir {
		config.packages_dir = Some(dir);
	}
	let packages = config.packages_root();
	std::fs::create_dir_all(&packages).with_context(|| format!("failed to create {}", packages.display()))?;
	info!(packages = %packages.display(), "starting session");

	let session = Session::new(MemoryEngine::default(), MemoryClipboard::new(), config)?;
	let mut repl = Repl::new(session);
	let mut stdout = std::io::stdout();
	let mut stderr = std::io::stderr();

	let failed = match &args.script {
		Some(path) => {
			let script = std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
			let mut failed = 0usize;
			for line in script.lines() {
				let (ok, flow) = repl.run_line(line, &mut stdout, &mut stderr).await;
				failed += usize::from(!ok);
				if flow == Flow::Quit {
					break;
				}
			}
			failed
		}
		None => {
			let mut lines = BufReader::new(tokio::io::stdin()).lines();
			while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
				if repl.run_line(&line, &mut stdout, &mut stderr).await.1 == Flow::Quit {
					break;
				}
			}
			0
		}
	};

	info!(title = %repl.session().title(), failed, "session finished");
	if failed > 0 {
		anyhow::bail!("{failed} command(s) failed");
	}
	Ok(())
}

fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
		if verbose {
			EnvFilter::new("quire=debug,info")
		} else {
			EnvFilter::new("quire=info,warn")
		}
	});

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.init();
}
