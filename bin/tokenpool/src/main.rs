//! `tokenpool` CLI tool for assembling token pool deployment and administration transactions
//!
//! Nothing is signed or submitted: the output is call data or a batch document for a multisig.

use std::process::ExitCode;

use clap::Parser;
use tokenpool_cli::MainCmd;

fn main() -> ExitCode {
    let cmd = MainCmd::parse();
    match cmd.log.init().and_then(|()| cmd.run()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
