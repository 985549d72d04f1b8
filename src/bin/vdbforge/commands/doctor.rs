//! `vdbforge doctor` command

use anyhow::Result;

use crate::cli::DoctorArgs;
use vdbforge::ops::doctor::{run_doctor, DoctorOptions, DoctorReport};
use vdbforge::ops::Environment;
use vdbforge::util::Shell;

pub fn execute(args: DoctorArgs, shell: &Shell) -> Result<()> {
    let env = Environment::capture()?;
    let options = DoctorOptions {
        cmake: args.cmake,
        toolchain: args.toolchain,
    };

    let report = run_doctor(&env, &options);
    print!("{}", format_report(&report, shell.is_verbose()));

    // Exit with error code if required checks failed
    if !report.is_healthy() {
        std::process::exit(1);
    }

    Ok(())
}

fn format_report(report: &DoctorReport, verbose: bool) -> String {
    let mut out = String::new();
    for check in &report.checks {
        let mark = match (check.passed, check.required) {
            (true, _) => "ok",
            (false, true) => "FAIL",
            (false, false) => "warn",
        };
        out.push_str(&format!("[{:>4}] {}: {}", mark, check.name, check.message));
        if let Some(path) = &check.path {
            if verbose || !check.passed {
                out.push_str(&format!(" ({})", path.display()));
            }
        }
        out.push('\n');
    }

    let failed = report.failures().count();
    if failed == 0 {
        out.push_str("\nAll required checks passed.\n");
    } else {
        out.push_str(&format!("\n{} required check(s) failed.\n", failed));
    }
    out
}
