use std::{env, ffi::OsString, io, path::Path, process::ExitCode};

use bst_balance::Error;

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<OsString> = env::args_os().collect();

    match try_main(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::debug!("exiting with {err:?}");
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}

fn try_main(args: &[OsString]) -> Result<(), Error> {
    let [_, path] = args else {
        let program = args
            .first()
            .map(|arg| arg.to_string_lossy().into_owned())
            .unwrap_or_else(|| env!("CARGO_BIN_NAME").to_owned());

        return Err(Error::Usage { program });
    };

    bst_balance::run(Path::new(path), io::stdout().lock())
}
