//! JSON envelope decoder
//!
//! Translates the `fileEvents` wire shape into canonical [`FileEvent`]s.

use super::fields;
use super::record::FileEvent;
use super::types::PageDecoder;
use crate::error::{DecodeError, Error, Result};
use crate::pagination::{PageResponse, QueryProblem};
use crate::schema::{SchemaVersion, TimestampFormat};
use crate::types::ExportFormat;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;

/// Response envelope of a JSON search page
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileEventsEnvelope {
    #[serde(default)]
    file_events: Option<Vec<Value>>,
    #[serde(default)]
    next_pg_token: Option<String>,
    #[serde(default)]
    problems: Option<Vec<QueryProblem>>,
    #[serde(default)]
    total_count: Option<i64>,
}

/// A file event as the JSON API emits it
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct JsonFileEvent {
    event_id: Option<String>,
    event_type: Option<String>,
    event_timestamp: Option<String>,
    insertion_timestamp: Option<String>,
    file_path: Option<String>,
    file_name: Option<String>,
    file_type: Option<String>,
    file_category: Option<String>,
    file_category_by_bytes: Option<String>,
    file_category_by_extension: Option<String>,
    file_size: Option<i64>,
    file_owner: Option<String>,
    md5_checksum: Option<String>,
    sha256_checksum: Option<String>,
    create_timestamp: Option<String>,
    modify_timestamp: Option<String>,
    file_id: Option<String>,
    mime_type_by_bytes: Option<String>,
    mime_type_by_extension: Option<String>,
    mime_type_mismatch: Option<bool>,
    device_user_name: Option<String>,
    device_uid: Option<String>,
    user_uid: Option<String>,
    os_host_name: Option<String>,
    domain_name: Option<String>,
    public_ip_address: Option<String>,
    private_ip_addresses: Option<Vec<String>>,
    operating_system_user: Option<String>,
    outside_active_hours: Option<bool>,
    remote_activity: Option<String>,
    trusted: Option<bool>,
    actor: Option<String>,
    directory_id: Option<Vec<String>>,
    source: Option<String>,
    url: Option<String>,
    shared: Option<String>,
    shared_with: Option<Vec<SharedWith>>,
    sharing_type_added: Option<Vec<String>>,
    cloud_drive_id: Option<String>,
    detection_source_alias: Option<String>,
    exposure: Option<Vec<String>>,
    process_owner: Option<String>,
    process_name: Option<String>,
    window_title: Option<Vec<String>>,
    tab_url: Option<String>,
    tabs: Option<Vec<Tab>>,
    removable_media_vendor: Option<String>,
    removable_media_name: Option<String>,
    removable_media_serial_number: Option<String>,
    removable_media_capacity: Option<i64>,
    removable_media_bus_type: Option<String>,
    removable_media_media_name: Option<String>,
    removable_media_volume_name: Option<Vec<String>>,
    removable_media_partition_id: Option<Vec<String>>,
    sync_destination: Option<String>,
    sync_destination_username: Option<Vec<String>>,
    email_dlp_policy_names: Option<Vec<String>>,
    email_subject: Option<String>,
    email_sender: Option<String>,
    email_from: Option<String>,
    email_recipients: Option<Vec<String>>,
    print_job_name: Option<String>,
    printer_name: Option<String>,
    destination_category: Option<String>,
    destination_name: Option<String>,
    field_errors: Option<Vec<FieldError>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SharedWith {
    #[serde(default)]
    cloud_username: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Tab {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

/// Per-record field problem reported by the service
#[derive(Debug, Serialize, Deserialize)]
struct FieldError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    field: Option<String>,
}

/// Decoder for the JSON search envelope
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonPageDecoder;

impl JsonPageDecoder {
    /// Create a new JSON page decoder
    pub fn new() -> Self {
        Self
    }
}

impl PageDecoder for JsonPageDecoder {
    fn format(&self) -> ExportFormat {
        ExportFormat::Json
    }

    fn decode_page(&self, body: &[u8]) -> Result<PageResponse> {
        let envelope: FileEventsEnvelope = serde_json::from_slice(body)?;
        let problems = envelope.problems.unwrap_or_default();

        // A rejected query carries no trustworthy records
        if !problems.is_empty() {
            return Ok(PageResponse {
                events: Vec::new(),
                next_cursor: envelope.next_pg_token,
                problems,
                total_count: envelope.total_count,
            });
        }

        let raw_events = envelope.file_events.unwrap_or_default();
        let decoded: Vec<Result<FileEvent>> = raw_events
            .par_iter()
            .enumerate()
            .map(|(index, value)| decode_event(value, index + 1))
            .collect();
        let events = decoded.into_iter().collect::<Result<Vec<_>>>()?;

        Ok(PageResponse {
            events,
            next_cursor: envelope.next_pg_token,
            problems,
            total_count: envelope.total_count,
        })
    }
}

/// First key of `value` whose value alone fails to deserialize.
///
/// `serde_json` reports type mismatches without a path, so each key is
/// retried in isolation to name the offending field.
fn mistyped_key(value: &Value) -> Option<String> {
    value.as_object()?.iter().find_map(|(key, item)| {
        let single = Value::Object(std::iter::once((key.clone(), item.clone())).collect());
        JsonFileEvent::deserialize(&single)
            .is_err()
            .then(|| key.clone())
    })
}

/// Decode one JSON object; `index` is 1-based within the page
fn decode_event(value: &Value, index: usize) -> Result<FileEvent> {
    let raw = || value.to_string();
    let wire: JsonFileEvent = JsonFileEvent::deserialize(value).map_err(|e| DecodeError {
        row: index,
        column: None,
        field: mistyped_key(value).map_or(Cow::Borrowed("record"), Cow::Owned),
        reason: e.to_string(),
        raw: raw(),
    })?;

    if let Some(errors) = wire.field_errors.as_ref().filter(|e| !e.is_empty()) {
        return Err(Error::RecordFieldErrors {
            event_id: wire.event_id.clone().unwrap_or_default(),
            errors: serde_json::to_string(errors)?,
        });
    }

    let timestamp = |field: &'static str, value: Option<&str>| {
        fields::timestamp(value.unwrap_or_default(), TimestampFormat::Rfc3339).map_err(|reason| {
            DecodeError {
                row: index,
                column: None,
                field: field.into(),
                reason,
                raw: raw(),
            }
        })
    };
    let shared = fields::boolean(wire.shared.as_deref().unwrap_or_default()).map_err(|reason| {
        DecodeError {
            row: index,
            column: None,
            field: "shared".into(),
            reason,
            raw: raw(),
        }
    })?;

    let (tab_titles, tab_urls) = split_tabs(wire.tabs);

    Ok(FileEvent {
        schema_version: SchemaVersion::JsonV1,
        event_timestamp: timestamp("event_timestamp", wire.event_timestamp.as_deref())?,
        insertion_timestamp: timestamp("insertion_timestamp", wire.insertion_timestamp.as_deref())?,
        created_timestamp: timestamp("created_timestamp", wire.create_timestamp.as_deref())?,
        modify_timestamp: timestamp("modify_timestamp", wire.modify_timestamp.as_deref())?,
        event_id: text(wire.event_id),
        event_type: text(wire.event_type),
        file_path: text(wire.file_path),
        file_name: text(wire.file_name),
        file_type: text(wire.file_type),
        file_category: text(wire.file_category),
        identified_extension_category: text(wire.file_category_by_bytes),
        current_extension_category: text(wire.file_category_by_extension),
        file_size: wire.file_size,
        file_owner: wire.file_owner.and_then(|o| fields::list(&o).unwrap_or_default()),
        md5_checksum: text(wire.md5_checksum),
        sha256_checksum: text(wire.sha256_checksum),
        file_id: text(wire.file_id),
        identified_extension_mime_type: text(wire.mime_type_by_bytes),
        current_extension_mime_type: text(wire.mime_type_by_extension),
        suspicious_file_type_mismatch: wire.mime_type_mismatch,
        device_username: text(wire.device_user_name),
        device_uid: text(wire.device_uid),
        user_uid: text(wire.user_uid),
        os_hostname: text(wire.os_host_name),
        domain_name: text(wire.domain_name),
        public_ip_address: wire
            .public_ip_address
            .and_then(|ip| fields::public_ip(&ip).unwrap_or_default()),
        private_ip_addresses: list(wire.private_ip_addresses),
        logged_in_operating_system_user: text(wire.operating_system_user),
        outside_active_hours: wire.outside_active_hours,
        remote_activity: text(wire.remote_activity),
        trusted: wire.trusted,
        actor: text(wire.actor),
        directory_id: list(wire.directory_id),
        source: text(wire.source),
        url: text(wire.url),
        shared,
        shared_with: list(wire.shared_with.map(|users| {
            users
                .into_iter()
                .filter_map(|user| user.cloud_username)
                .collect()
        })),
        sharing_type_added: list(wire.sharing_type_added),
        cloud_drive_id: text(wire.cloud_drive_id),
        detection_source_alias: text(wire.detection_source_alias),
        exposure: list(wire.exposure),
        process_owner: text(wire.process_owner),
        process_name: text(wire.process_name),
        tab_window_title: wire
            .window_title
            .filter(|titles| !titles.is_empty())
            .map(|titles| titles.join(",")),
        tab_url: text(wire.tab_url),
        tab_titles,
        tab_urls,
        removable_media_vendor: text(wire.removable_media_vendor),
        removable_media_name: text(wire.removable_media_name),
        removable_media_serial_number: text(wire.removable_media_serial_number),
        removable_media_capacity: wire.removable_media_capacity,
        removable_media_bus_type: text(wire.removable_media_bus_type),
        removable_media_media_name: text(wire.removable_media_media_name),
        removable_media_volume_name: list(wire.removable_media_volume_name),
        removable_media_partition_id: list(wire.removable_media_partition_id),
        sync_destination: text(wire.sync_destination),
        sync_destination_username: list(wire.sync_destination_username),
        email_dlp_policy_names: list(wire.email_dlp_policy_names),
        email_dlp_subject: text(wire.email_subject),
        email_dlp_sender: text(wire.email_sender),
        email_dlp_from: text(wire.email_from),
        email_dlp_recipients: list(wire.email_recipients),
        print_job_name: text(wire.print_job_name),
        printer_name: text(wire.printer_name),
        printed_files_backup_path: None,
        destination_category: text(wire.destination_category),
        destination_name: text(wire.destination_name),
    })
}

fn text(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// An empty array is absent, like an empty CSV cell
fn list(value: Option<Vec<String>>) -> Option<Vec<String>> {
    value.filter(|v| !v.is_empty())
}

fn split_tabs(tabs: Option<Vec<Tab>>) -> (Option<Vec<String>>, Option<Vec<String>>) {
    let Some(tabs) = tabs.filter(|t| !t.is_empty()) else {
        return (None, None);
    };
    let (titles, urls): (Vec<String>, Vec<String>) = tabs
        .into_iter()
        .map(|tab| (tab.title.unwrap_or_default(), tab.url.unwrap_or_default()))
        .unzip();
    (Some(titles), Some(urls))
}
