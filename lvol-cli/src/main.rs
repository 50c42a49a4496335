// SPDX-License-Identifier: GPL-3.0-only

//! aix-lvol - converge an AIX logical volume to a desired state
//!
//! Queries `lsvg`/`lslv`, runs at most one of `mklv`, `rmlv`, `chlv` or
//! `extendlv`, and prints a JSON result on stdout.

use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;
use lvol_sys::{Reconciler, SystemRunner};

mod cli;
mod config;
mod logging;
mod report;

use cli::Args;
use config::Settings;
use report::Report;

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => return emit(&Report::from(&e)),
    };

    let settings = match Settings::from_args(&args) {
        Ok(settings) => settings,
        Err(e) => return emit(&Report::failure(format!("{e:#}"))),
    };

    logging::init(settings.log_level);

    let desired = &settings.desired;
    tracing::info!(
        "Reconciling {}/{} towards {}{}",
        desired.group,
        desired.name,
        desired.state,
        if settings.check_mode { " (check mode)" } else { "" }
    );

    let report = match Reconciler::new(SystemRunner)
        .with_check_mode(settings.check_mode)
        .apply(desired)
    {
        Ok(outcome) => {
            tracing::info!("{}", outcome.message);
            Report::from(outcome)
        }
        Err(e) => {
            tracing::error!("{}", e);
            Report::from(&e)
        }
    };

    emit(&report)
}

fn emit(report: &Report) -> ExitCode {
    match serde_json::to_string(report) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("aix-lvol: failed to serialize result: {e}");
            return ExitCode::FAILURE;
        }
    }

    if report.is_failure() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
