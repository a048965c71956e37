//! Shared contract types between the catalog runtime and the backend host
//! services.
//!
//! The crate owns the persisted [`AppRecord`] shape, the insert/patch
//! payloads derived from it, and the pure presentation helpers (display size,
//! download-count formatting, upload-field validation) that both the UI and
//! the service fakes rely on.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Placeholder stored when an upload omits the description field.
pub const DESCRIPTION_PLACEHOLDER: &str = "No description";

/// Bytes per mebibyte, the divisor behind every displayed size string.
pub const BYTES_PER_MB: u64 = 1_048_576;

/// One published application package as the record store returns it.
///
/// The client never mutates a record in place: snapshots are replaced
/// wholesale on every fetch, and writes go through [`NewAppRecord`] or
/// [`AppRecordPatch`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppRecord {
    /// Backend-assigned opaque identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Free-form version label; no semantic-version policy is enforced.
    pub version: String,
    /// Free-form description.
    pub description: String,
    /// Pre-formatted display size ("2.00 MB"), computed once at upload time.
    pub size: String,
    /// Download counter; maintained outside this client, rendered read-only.
    #[serde(default, deserialize_with = "downloads_from_nullable")]
    pub downloads: i64,
    /// Public URL of the uploaded package blob.
    pub apk_url: String,
    /// Public URL of the uploaded icon blob, when one was provided.
    #[serde(default)]
    pub icon_url: Option<String>,
    /// Backend-assigned creation timestamp (opaque RFC 3339 text).
    #[serde(default)]
    pub created_at: String,
}

// The counter column stays `null` until the backend's counter job first
// writes one; normalize to zero at the boundary.
fn downloads_from_nullable<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<i64>::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

/// Insert payload for one new [`AppRecord`].
///
/// Identifier, download counter, and creation timestamp are backend-assigned
/// and therefore absent here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAppRecord {
    /// Display name.
    pub name: String,
    /// Free-form version label.
    pub version: String,
    /// Description, already defaulted when the form left it blank.
    pub description: String,
    /// Pre-formatted display size string.
    pub size: String,
    /// Public URL of the uploaded package blob.
    pub apk_url: String,
    /// Public URL of the uploaded icon blob, when one was uploaded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

impl NewAppRecord {
    /// Builds the insert payload from collected upload-form fields.
    ///
    /// Applies the [`DESCRIPTION_PLACEHOLDER`] when the description is blank
    /// and computes the display size from the package byte length. The blob
    /// URLs must already point at successfully stored blobs.
    pub fn from_upload(
        fields: &UploadFields,
        package_byte_len: u64,
        apk_url: impl Into<String>,
        icon_url: Option<String>,
    ) -> Self {
        let description = fields.description.trim();
        Self {
            name: fields.name.trim().to_string(),
            version: fields.version.trim().to_string(),
            description: if description.is_empty() {
                DESCRIPTION_PLACEHOLDER.to_string()
            } else {
                description.to_string()
            },
            size: display_size_mb(package_byte_len),
            apk_url: apk_url.into(),
            icon_url,
        }
    }
}

/// Partial update for one record's mutable fields.
///
/// The edit path can only express name/version/description changes; blob
/// URLs, size, downloads, and the identifier are structurally unreachable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppRecordPatch {
    /// Replacement display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Replacement version label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Replacement description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl AppRecordPatch {
    /// Patch replacing all three mutable fields at once, as the edit dialog
    /// submits them.
    pub fn edit(
        name: impl Into<String>,
        version: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            version: Some(version.into()),
            description: Some(description.into()),
        }
    }

    /// Returns whether the patch carries no field at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.version.is_none() && self.description.is_none()
    }
}

/// Text fields collected by the upload form before any network call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadFields {
    /// App name input value.
    pub name: String,
    /// Version input value.
    pub version: String,
    /// Description input value; may be blank.
    pub description: String,
}

/// Upload-form validation failure, raised before any network call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UploadValidationError {
    /// One or more required fields are missing or blank.
    #[error("{0} required")]
    MissingFields(String),
}

/// Validates the upload form's required fields.
///
/// Name, version, and the package file are required; a field containing only
/// whitespace counts as missing. The error message names every missing field
/// so one notice covers the whole form.
///
/// # Errors
///
/// Returns [`UploadValidationError::MissingFields`] listing the offending
/// fields in form order.
pub fn validate_upload(
    fields: &UploadFields,
    has_package_file: bool,
) -> Result<(), UploadValidationError> {
    let mut missing = Vec::new();
    if fields.name.trim().is_empty() {
        missing.push("name");
    }
    if fields.version.trim().is_empty() {
        missing.push("version");
    }
    if !has_package_file {
        missing.push("APK file");
    }
    if missing.is_empty() {
        Ok(())
    } else {
        Err(UploadValidationError::MissingFields(missing.join(", ")))
    }
}

/// Formats a byte length as the catalog's display size string.
///
/// The value is the byte length divided by 1,048,576, rendered with exactly
/// two decimal places and a ` MB` suffix: 2,097,152 bytes becomes `2.00 MB`.
pub fn display_size_mb(byte_len: u64) -> String {
    format!("{:.2} MB", byte_len as f64 / BYTES_PER_MB as f64)
}

/// Formats a download counter with thousands separators ("50,000").
pub fn format_count(count: i64) -> String {
    let digits = count.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        let remaining = digits.len() - index;
        if index > 0 && remaining % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if count < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn fields(name: &str, version: &str, description: &str) -> UploadFields {
        UploadFields {
            name: name.to_string(),
            version: version.to_string(),
            description: description.to_string(),
        }
    }

    #[test]
    fn display_size_uses_two_decimals() {
        assert_eq!(display_size_mb(2_097_152), "2.00 MB");
        assert_eq!(display_size_mb(12_897_484), "12.30 MB");
        assert_eq!(display_size_mb(0), "0.00 MB");
    }

    #[test]
    fn format_count_groups_thousands() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(950), "950");
        assert_eq!(format_count(50_000), "50,000");
        assert_eq!(format_count(1_234_567), "1,234,567");
        assert_eq!(format_count(-4200), "-4,200");
    }

    #[test]
    fn upload_validation_names_every_missing_field() {
        assert_eq!(validate_upload(&fields("Notes", "1.0.0", ""), true), Ok(()));

        let err = validate_upload(&fields("  ", "", ""), false).expect_err("invalid");
        assert_eq!(
            err,
            UploadValidationError::MissingFields("name, version, APK file".to_string())
        );

        let err = validate_upload(&fields("Notes", "1.0.0", ""), false).expect_err("no file");
        assert_eq!(err.to_string(), "APK file required");
    }

    #[test]
    fn new_record_defaults_blank_description_and_computes_size() {
        let record = NewAppRecord::from_upload(
            &fields("Notes", "1.0.0", "   "),
            2_097_152,
            "https://blobs.example/apk/notes.apk",
            None,
        );
        assert_eq!(record.name, "Notes");
        assert_eq!(record.version, "1.0.0");
        assert_eq!(record.description, DESCRIPTION_PLACEHOLDER);
        assert_eq!(record.size, "2.00 MB");
        assert_eq!(record.icon_url, None);
    }

    #[test]
    fn new_record_serializes_without_absent_icon() {
        let record = NewAppRecord::from_upload(
            &fields("Notes", "1.0.0", "Sync your notes"),
            1_048_576,
            "https://blobs.example/apk/notes.apk",
            None,
        );
        let json = serde_json::to_value(&record).expect("serialize");
        assert!(json.get("icon_url").is_none());
        assert_eq!(json["size"], "1.00 MB");
    }

    #[test]
    fn patch_edit_carries_exactly_the_mutable_fields() {
        let patch = AppRecordPatch::edit("Notes", "1.0.1", "Updated");
        let json = serde_json::to_value(&patch).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "name": "Notes",
                "version": "1.0.1",
                "description": "Updated",
            })
        );
        assert!(!patch.is_empty());
        assert!(AppRecordPatch::default().is_empty());
    }

    #[test]
    fn record_deserializes_with_defaulted_optional_columns() {
        let record: AppRecord = serde_json::from_str(
            r#"{
                "id": "f4c1",
                "name": "Notes",
                "version": "1.0.0",
                "description": "No description",
                "size": "2.00 MB",
                "apk_url": "https://blobs.example/apk/notes.apk"
            }"#,
        )
        .expect("deserialize");
        assert_eq!(record.downloads, 0);
        assert_eq!(record.icon_url, None);
        assert_eq!(record.created_at, "");
    }

    #[test]
    fn record_normalizes_null_download_counters() {
        let record: AppRecord = serde_json::from_str(
            r#"{
                "id": "f4c1",
                "name": "Notes",
                "version": "1.0.0",
                "description": "No description",
                "size": "2.00 MB",
                "downloads": null,
                "apk_url": "https://blobs.example/apk/notes.apk",
                "icon_url": null,
                "created_at": "2026-08-01T10:00:00+00:00"
            }"#,
        )
        .expect("deserialize");
        assert_eq!(record.downloads, 0);
    }
}
