//! WiGLE CSV dialect: a vendor descriptor line, a column header line, then one
//! line per sighting.

use crate::error::{AppError, Result};
use crate::repositories::NetworkSighting;

/// Descriptor for the `/wigle_data` download.
pub const EXPORT_HEADER: &str = r#"WigleWifi-1.6,appRelease=2.78,model=X-37B,release=11.0.0,device=felgercarb,display=OPSPLS1.76-1-S,board=snodgrass,"brand=Moog, LLC",star=Sol,body=3,subBody=0"#;

/// Descriptor for files pushed to the WiGLE upload API.
pub const UPLOAD_HEADER: &str = r#"WigleWifi-1.6,appRelease=2.78,model=X-37B,release=11.0.0,device=felgercarb,display=OPSPLS1.76-1-S,board=RF_TRAIL_CAM,"brand=Lozaning",star=Sol,body=3,subBody=0"#;

pub const CSV_FILE_NAME: &str = "wigle_data.csv";

pub const COLUMNS: [&str; 11] = [
    "MAC",
    "SSID",
    "AuthMode",
    "FirstSeen",
    "Channel",
    "RSSI",
    "CurrentLatitude",
    "CurrentLongitude",
    "AltitudeMeters",
    "AccuracyMeters",
    "Type",
];

const FIRST_SEEN_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Renders `rows` in the given order. `header_line` is written verbatim.
pub fn render_csv(rows: &[NetworkSighting], header_line: &str) -> Result<String> {
    let mut buf = Vec::with_capacity(256 + rows.len() * 96);
    buf.extend_from_slice(header_line.as_bytes());
    buf.push(b'\n');

    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(buf);

    writer.write_record(COLUMNS)?;
    for row in rows {
        writer.write_record(record_for(row))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::Internal(format!("failed to flush CSV buffer: {}", e.error())))?;
    String::from_utf8(bytes).map_err(|e| AppError::Internal(format!("CSV is not UTF-8: {}", e)))
}

fn record_for(row: &NetworkSighting) -> [String; 11] {
    [
        row.mac.clone(),
        row.ssid.clone(),
        format!("[{}]", row.auth_mode),
        row.first_seen.format(FIRST_SEEN_FORMAT).to_string(),
        row.channel.to_string(),
        row.rssi.to_string(),
        optional(row.latitude),
        optional(row.longitude),
        optional(row.altitude),
        optional(row.accuracy),
        "WIFI".to_string(),
    ]
}

fn optional(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
