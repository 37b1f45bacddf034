use std::{error::Error, io::Write, process::ExitCode};

use crate::cli::{CompareArgs, load_json};

pub fn handle_compare_command(args: CompareArgs) -> Result<ExitCode, Box<dyn Error>> {
    if args.expected.as_os_str() == "-" && args.actual.as_os_str() == "-" {
        return Err("only one of the documents can be read from stdin".into());
    }
    let expected = load_json(&args.expected)?;
    let actual = load_json(&args.actual)?;

    let output = jsontrail::trace(&expected, &actual)?;

    match output {
        Some(trace) => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            out.write_all(trace.as_bytes())?;
            out.flush()?;
            Ok(ExitCode::FAILURE)
        }
        None => Ok(ExitCode::SUCCESS),
    }
}
