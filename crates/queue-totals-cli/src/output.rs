//! Rendering of reports for the terminal.

use std::io::Write;

use queue_totals::ReportEntry;

/// Writes the whole report as a pretty-printed JSON array.
pub fn write_json(report: &[ReportEntry], out: &mut impl Write) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)?;
    Ok(())
}

/// Writes two lines per successful entry to `out` and one `ERROR` line per
/// failed entry to `err`.
pub fn write_text(
    report: &[ReportEntry],
    out: &mut impl Write,
    err: &mut impl Write,
) -> anyhow::Result<()> {
    for entry in report {
        match entry {
            ReportEntry::Totals {
                queue,
                main_counts,
                dlq,
                dlq_counts,
            } => {
                writeln!(out, "{queue}: {main_counts}")?;
                writeln!(out, "  {dlq}: {dlq_counts}")?;
            }
            ReportEntry::Failed { queue, error } => {
                writeln!(err, "ERROR {queue}: {error}")?;
            }
        }
    }

    Ok(())
}
