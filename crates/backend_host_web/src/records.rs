//! REST adapter for the published-app record table.

use backend_host::{BackendConfig, RecordStore, RecordStoreFuture};
use catalog_contract::{AppRecord, AppRecordPatch, NewAppRecord};

use crate::http::{authorized_headers, send, RequestBody};

#[derive(Debug, Clone)]
/// Browser record store speaking the hosted backend's table REST dialect.
pub struct WebRecordStore {
    config: BackendConfig,
}

impl WebRecordStore {
    /// Adapter for one configured backend project.
    pub fn new(config: BackendConfig) -> Self {
        Self { config }
    }

    fn table_url(&self, query: &str) -> String {
        format!(
            "{}{query}",
            self.config.rest_url(&self.config.records_table)
        )
    }

    fn write_headers(&self) -> Vec<(String, String)> {
        let mut headers = authorized_headers(&self.config);
        headers.push(("Content-Type".to_string(), "application/json".to_string()));
        headers.push(("Prefer".to_string(), "return=representation".to_string()));
        headers
    }
}

impl RecordStore for WebRecordStore {
    fn list_records<'a>(&'a self) -> RecordStoreFuture<'a, Result<Vec<AppRecord>, String>> {
        Box::pin(async move {
            let url = self.table_url("?select=*&order=created_at.desc");
            let response = send("GET", &url, &authorized_headers(&self.config), None).await?;
            parse_record_rows(&response.into_body("record list")?)
        })
    }

    fn insert_record<'a>(
        &'a self,
        record: &'a NewAppRecord,
    ) -> RecordStoreFuture<'a, Result<AppRecord, String>> {
        Box::pin(async move {
            let payload =
                serde_json::to_string(record).map_err(|err| format!("encode record: {err}"))?;
            let response = send(
                "POST",
                &self.table_url(""),
                &self.write_headers(),
                Some(RequestBody::Json(payload)),
            )
            .await?;
            let rows = parse_record_rows(&response.into_body("record insert")?)?;
            rows.into_iter()
                .next()
                .ok_or_else(|| "record insert returned no representation".to_string())
        })
    }

    fn update_record<'a>(
        &'a self,
        id: &'a str,
        patch: &'a AppRecordPatch,
    ) -> RecordStoreFuture<'a, Result<Option<AppRecord>, String>> {
        Box::pin(async move {
            let payload =
                serde_json::to_string(patch).map_err(|err| format!("encode patch: {err}"))?;
            let response = send(
                "PATCH",
                &self.table_url(&id_filter(id)),
                &self.write_headers(),
                Some(RequestBody::Json(payload)),
            )
            .await?;
            let rows = parse_record_rows(&response.into_body("record update")?)?;
            Ok(rows.into_iter().next())
        })
    }

    fn delete_record<'a>(&'a self, id: &'a str) -> RecordStoreFuture<'a, Result<(), String>> {
        Box::pin(async move {
            let response = send(
                "DELETE",
                &self.table_url(&id_filter(id)),
                &authorized_headers(&self.config),
                None,
            )
            .await?;
            response.into_body("record delete")?;
            Ok(())
        })
    }
}

fn id_filter(id: &str) -> String {
    format!("?id=eq.{id}")
}

fn parse_record_rows(body: &str) -> Result<Vec<AppRecord>, String> {
    serde_json::from_str(body).map_err(|err| format!("unexpected record payload: {err}"))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn id_filter_targets_one_row() {
        assert_eq!(
            id_filter("2b1d6a0e-0000-4000-8000-1234567890ab"),
            "?id=eq.2b1d6a0e-0000-4000-8000-1234567890ab"
        );
    }

    #[test]
    fn record_rows_parse_with_defaulted_columns() {
        let rows = parse_record_rows(
            r#"[
                {
                    "id": "a1",
                    "name": "Notes",
                    "version": "1.0.0",
                    "description": "No description",
                    "size": "2.00 MB",
                    "downloads": null,
                    "apk_url": "https://blobs.example/apk/notes.apk",
                    "icon_url": null,
                    "created_at": "2026-08-01T10:00:00+00:00"
                }
            ]"#,
        )
        .expect("parse");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Notes");
        assert_eq!(rows[0].icon_url, None);
    }

    #[test]
    fn record_rows_reject_non_array_payloads() {
        assert!(parse_record_rows(r#"{"message":"permission denied"}"#).is_err());
    }
}
