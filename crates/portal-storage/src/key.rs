//! Blob key construction.
//!
//! Keys are namespaced by client (and folder id, when filing into a
//! folder) with a millisecond timestamp prefix on the file name to
//! avoid collisions between same-named uploads.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Build the storage key for an uploaded document:
/// `{client}/{folder_id?}/{unix_millis}_{file_name}`.
pub fn build_blob_key(
    client_name: &str,
    folder_id: Option<Uuid>,
    uploaded_at: DateTime<Utc>,
    file_name: &str,
) -> String {
    let millis = uploaded_at.timestamp_millis();
    match folder_id {
        Some(folder) => format!("{client_name}/{folder}/{millis}_{file_name}"),
        None => format!("{client_name}/{millis}_{file_name}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_key_with_folder() {
        let folder = Uuid::nil();
        let at = Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap();
        let key = build_blob_key("Acme C.A.", Some(folder), at, "balance.pdf");
        assert_eq!(
            key,
            format!("Acme C.A./{folder}/{}_balance.pdf", at.timestamp_millis())
        );
    }

    #[test]
    fn test_key_unfiled() {
        let at = Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap();
        let key = build_blob_key("Acme", None, at, "iva.xlsx");
        assert_eq!(key, format!("Acme/{}_iva.xlsx", at.timestamp_millis()));
    }

    #[test]
    fn test_same_name_different_instant_distinct() {
        let a = Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap();
        let b = a + chrono::Duration::milliseconds(1);
        assert_ne!(
            build_blob_key("Acme", None, a, "f.pdf"),
            build_blob_key("Acme", None, b, "f.pdf")
        );
    }
}
