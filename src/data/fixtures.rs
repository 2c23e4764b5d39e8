//! In-memory CSV fixtures shared by the unit tests.

use super::loader::load_csv;
use super::model::IncidentDataset;

pub const HEADER: &str = "Session_Connection_Time,Bytes_Transferred,Kali_Trace_Used,\
Servers_Corrupted,Pages_Corrupted,Location,WPM_Typing_Speed,bytes_per_min,pages_per_min,cluster,PC1,PC2";

/// One CSV line where every feature column holds `value`.
pub fn row(cluster: &str, location: &str, value: f64) -> String {
    format!(
        "{value},{value},0,{value},{value},{location},{value},{value},{value},{cluster},{value},-{value}"
    )
}

/// Parse a header plus the given lines.
pub fn dataset(lines: &[String]) -> IncidentDataset {
    let mut csv = String::from(HEADER);
    for line in lines {
        csv.push('\n');
        csv.push_str(line);
    }
    csv.push('\n');
    load_csv(csv.as_bytes()).unwrap()
}

/// `per_cluster` rows of cluster "0" and "1", interleaved.
pub fn balanced_dataset(per_cluster: usize) -> IncidentDataset {
    let lines: Vec<String> = (0..per_cluster * 2)
        .map(|i| {
            let cluster = if i % 2 == 0 { "0" } else { "1" };
            row(cluster, "Chad", i as f64)
        })
        .collect();
    dataset(&lines)
}
