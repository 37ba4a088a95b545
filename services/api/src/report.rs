use clap::Args;
use credit_impact::error::AppError;
use credit_impact::report::render_credit_report;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// Name printed on the report
    #[arg(long)]
    pub(crate) name: String,
    /// Destination PDF file
    #[arg(long, default_value = "Credit-Improvement-Report.pdf")]
    pub(crate) out: PathBuf,
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let bytes = render_credit_report(&args.name)?;
    std::fs::write(&args.out, &bytes)?;
    println!(
        "Credit improvement report for {} written to {} ({} bytes)",
        args.name.trim(),
        args.out.display(),
        bytes.len()
    );
    Ok(())
}
