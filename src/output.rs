//! Output of computed tables and of the cleaned batch.
//!
//! Tables go out as pretty JSON; the cleaned batch is written back as CSV in
//! the input file's layout.

use anyhow::Result;
use csv::WriterBuilder;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

use crate::cleaning::Order;
use crate::parser::RawOrder;

/// Writes `value` as pretty-printed JSON followed by a newline.
pub fn write_json<W: Write>(mut writer: W, value: &impl Serialize) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    Ok(())
}

/// Prints `value` as pretty-printed JSON on stdout.
pub fn print_json(value: &impl Serialize) -> Result<()> {
    write_json(std::io::stdout().lock(), value)
}

/// Writes cleaned orders to `path` as CSV with the input file's headers,
/// replacing any existing file.
pub fn write_cleaned(path: impl AsRef<Path>, orders: &[Order]) -> Result<()> {
    let path = path.as_ref();
    debug!(path = %path.display(), rows = orders.len(), "Writing cleaned CSV");

    let mut writer = WriterBuilder::new().has_headers(true).from_path(path)?;
    for order in orders {
        writer.serialize(RawOrder::from(order))?;
    }
    writer.flush()?;

    info!(path = %path.display(), rows = orders.len(), "Cleaned CSV written");
    Ok(())
}
