use crate::models::Record;
use anyhow::Result;
use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Save observations as CSV with header.
pub fn save_csv<P: AsRef<Path>>(records: &[Record], path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.serialize(("Country", "Year", "Value"))?;
    for r in records {
        wtr.serialize((&r.country, r.year, r.value))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save observations as pretty JSON array.
pub fn save_json<P: AsRef<Path>>(records: &[Record], path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(records)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}
