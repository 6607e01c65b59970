use std::io::Write;

use artbrowse_core::SelectionSet;

/// How the selection is written to stdout on exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SelectionFormat {
    /// One record id per line.
    Ids,
    /// One JSON object per line.
    Json,
}

/// Write the selected records in selection order.
pub fn write_selection<W: Write>(
    out: &mut W,
    selection: &SelectionSet,
    format: SelectionFormat,
) -> anyhow::Result<()> {
    for record in selection.iter() {
        match format {
            SelectionFormat::Ids => writeln!(out, "{}", record.id)?,
            SelectionFormat::Json => {
                serde_json::to_writer(&mut *out, record)?;
                writeln!(out)?;
            }
        }
    }
    out.flush()?;
    Ok(())
}
