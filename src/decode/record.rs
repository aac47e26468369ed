//! Canonical file-event record

use crate::schema::SchemaVersion;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One file event, normalized from any wire variant.
///
/// Every field is optional: the upstream schema evolves and most fields only
/// apply to specific event types. An empty value on the wire is always
/// absent here, never a zero or default value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEvent {
    /// Wire variant this record was translated from
    pub schema_version: SchemaVersion,

    // Identity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_timestamp: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insertion_timestamp: Option<DateTime<Utc>>,

    // File metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identified_extension_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_extension_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_owner: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub md5_checksum: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha256_checksum: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_timestamp: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modify_timestamp: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identified_extension_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_extension_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suspicious_file_type_mismatch: Option<bool>,

    // Device and network context
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_uid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_uid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os_hostname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_ip_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_ip_addresses: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logged_in_operating_system_user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outside_active_hours: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_activity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trusted: Option<bool>,

    // Cloud and sharing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory_id: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shared: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shared_with: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sharing_type_added: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_drive_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detection_source_alias: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exposure: Option<Vec<String>>,

    // Process and browser context
    #[serde(skip_serializing_if = "Option::is_none")]
    pub process_owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub process_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tab_window_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tab_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tab_titles: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tab_urls: Option<Vec<String>>,

    // Removable media
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removable_media_vendor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removable_media_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removable_media_serial_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removable_media_capacity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removable_media_bus_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removable_media_media_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removable_media_volume_name: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removable_media_partition_id: Option<Vec<String>>,

    // Sync applications
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sync_destination: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sync_destination_username: Option<Vec<String>>,

    // Email DLP
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_dlp_policy_names: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_dlp_subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_dlp_sender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_dlp_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_dlp_recipients: Option<Vec<String>>,

    // Print
    #[serde(skip_serializing_if = "Option::is_none")]
    pub print_job_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub printer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub printed_files_backup_path: Option<String>,

    // Destination
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_name: Option<String>,
}

impl FileEvent {
    /// Create an empty record tagged with its wire variant
    pub fn new(schema_version: SchemaVersion) -> Self {
        Self {
            schema_version,
            ..Default::default()
        }
    }
}
