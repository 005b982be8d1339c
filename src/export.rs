//! CSV export of a group table.

use crate::logic::Standing;

/// One header row, then one row per standing in rank order. An empty table gives an empty string.
pub fn standings_csv(standings: &[Standing]) -> Result<String, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in standings {
        writer.serialize(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
