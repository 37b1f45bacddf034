use std::{error::Error, process::ExitCode};

use jsontrail::fixture::{FixtureOutcome, load_fixtures};

use crate::cli::FixturesArgs;

pub fn handle_fixtures_command(args: FixturesArgs) -> Result<ExitCode, Box<dyn Error>> {
    let fixtures = load_fixtures(&args.dir)?;
    println!("Running {} tests.", fixtures.len());

    let mut failed = 0;
    for fixture in &fixtures {
        print!("Test: '{}' ... ", fixture.name);
        match fixture.run()? {
            FixtureOutcome::Passed => println!("Ok!"),
            FixtureOutcome::Failed {
                expected_output,
                actual_output,
            } => {
                failed += 1;
                println!("FAILED");
                println!("--- expected\n{}\n--- actual\n{}", expected_output, actual_output);
            }
        }
    }

    if failed > 0 {
        eprintln!("Error: {} of {} fixture(s) failed", failed, fixtures.len());
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
