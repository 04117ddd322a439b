use crate::app::AppContext;
use crate::cli::CheckArgs;
use crate::errors::CliError;
use crate::output::{print_report, report_json};

pub fn handle_check(ctx: &AppContext, args: &CheckArgs) -> anyhow::Result<()> {
    let catalog = ctx.open_catalog()?;
    let report = catalog.check_integrity()?;

    let ui_ctx = ctx.ui(args.json)?;
    if ui_ctx.mode.is_json() {
        println!("{}", serde_json::to_string_pretty(&report_json(&report))?);
    } else if !ctx.quiet() || !report.is_ok() {
        print_report(&ui_ctx, &report);
    }

    if report.is_ok() {
        Ok(())
    } else {
        Err(CliError::IntegrityFailed {
            issues: report.issues.len(),
        }
        .into())
    }
}
