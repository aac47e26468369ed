//! Positional column table for the tabular export
//!
//! One line per column: header cell, record field, coercion rule. The same
//! table produces both the expected header list used for drift detection
//! and the row decoder, so adding or removing a column is a one-line edit.

use super::fields;
use super::record::FileEvent;
use crate::error::DecodeError;
use crate::schema::{Column, FieldKind, SchemaVersion, TimestampFormat};

macro_rules! export_columns {
    (@kind text) => { FieldKind::Text };
    (@kind integer) => { FieldKind::Integer };
    (@kind boolean) => { FieldKind::Boolean };
    (@kind list) => { FieldKind::List };
    (@kind single) => { FieldKind::Single };
    (@kind public_ip) => { FieldKind::PublicIp };
    (@kind timestamp($format:ident)) => { FieldKind::Timestamp(TimestampFormat::$format) };

    (@parse $raw:expr, timestamp($format:ident)) => { fields::timestamp($raw, TimestampFormat::$format) };
    (@parse $raw:expr, $kind:ident) => { fields::$kind($raw) };

    ($($header:literal => $field:ident: $kind:ident $(($format:ident))?,)+) => {
        /// Columns of the current tabular export, in positional order
        pub static CSV_EXPORT_COLUMNS: &[Column] = &[
            $(Column {
                header: $header,
                field: stringify!($field),
                kind: export_columns!(@kind $kind $(($format))?),
            },)+
        ];

        /// Decode one data row whose header has already been validated.
        ///
        /// `row` is the 1-based data row number used in error messages.
        #[allow(unused_assignments)]
        pub(crate) fn decode_csv_row(cells: &[&str], row: usize) -> Result<FileEvent, DecodeError> {
            if cells.len() != CSV_EXPORT_COLUMNS.len() {
                return Err(DecodeError {
                    row,
                    column: None,
                    field: "row".into(),
                    reason: format!(
                        "expected {} fields, found {}",
                        CSV_EXPORT_COLUMNS.len(),
                        cells.len()
                    ),
                    raw: cells.join(","),
                });
            }

            let mut event = FileEvent::new(SchemaVersion::CsvExportV2);
            let mut column = 0usize;
            $(
                event.$field = export_columns!(@parse cells[column], $kind $(($format))?)
                    .map_err(|reason| DecodeError {
                        row,
                        column: Some(column),
                        field: stringify!($field).into(),
                        reason,
                        raw: cells.join(","),
                    })?;
                column += 1;
            )+
            Ok(event)
        }
    };
}

export_columns! {
    "Event ID" => event_id: text,
    "Event type" => event_type: text,
    "Date Observed (UTC)" => event_timestamp: timestamp(Rfc3339),
    "Date Inserted (UTC)" => insertion_timestamp: timestamp(Rfc3339),
    "File path" => file_path: text,
    "Filename" => file_name: text,
    "File type" => file_type: text,
    "File Category" => file_category: text,
    "Identified Extension Category" => identified_extension_category: text,
    "Current Extension Category" => current_extension_category: text,
    "File size (bytes)" => file_size: integer,
    "File Owner" => file_owner: list,
    "MD5 Hash" => md5_checksum: text,
    "SHA-256 Hash" => sha256_checksum: text,
    "Create Date" => created_timestamp: timestamp(SpaceSeparated),
    "Modified Date" => modify_timestamp: timestamp(SpaceSeparated),
    "Username" => device_username: text,
    "Device ID" => device_uid: text,
    "User UID" => user_uid: text,
    "Hostname" => os_hostname: text,
    "Fully Qualified Domain Name" => domain_name: text,
    "IP address (public)" => public_ip_address: public_ip,
    "IP address (private)" => private_ip_addresses: list,
    "Actor" => actor: text,
    "Directory ID" => directory_id: list,
    "Source" => source: text,
    "URL" => url: text,
    "Shared" => shared: boolean,
    "Shared With Users" => shared_with: list,
    "File exposure changed to" => sharing_type_added: list,
    "Cloud drive ID" => cloud_drive_id: text,
    "Detection Source Alias" => detection_source_alias: text,
    "File Id" => file_id: text,
    "Exposure Type" => exposure: list,
    "Process Owner" => process_owner: text,
    "Process Name" => process_name: text,
    "Tab/Window Title" => tab_window_title: text,
    "Tab URL" => tab_url: text,
    // Upstream spells this header "Table Titles"
    "Table Titles" => tab_titles: list,
    "Tab URLs" => tab_urls: list,
    "Removable Media Vendor" => removable_media_vendor: text,
    "Removable Media Name" => removable_media_name: text,
    "Removable Media Serial Number" => removable_media_serial_number: text,
    "Removable Media Capacity" => removable_media_capacity: integer,
    "Removable Media Bus Type" => removable_media_bus_type: text,
    "Removable Media Media Name" => removable_media_media_name: text,
    "Removable Media Volume Name" => removable_media_volume_name: single,
    "Removable Media Partition Id" => removable_media_partition_id: single,
    "Sync Destination" => sync_destination: text,
    "Sync Destination Username" => sync_destination_username: single,
    "Email DLP Policy Names" => email_dlp_policy_names: list,
    "Email DLP Subject" => email_dlp_subject: text,
    "Email DLP Sender" => email_dlp_sender: text,
    "Email DLP From" => email_dlp_from: text,
    "Email DLP Recipients" => email_dlp_recipients: list,
    "Outside Active Hours" => outside_active_hours: boolean,
    "Identified Extension MIME Type" => identified_extension_mime_type: text,
    "Current Extension MIME Type" => current_extension_mime_type: text,
    "Suspicious File Type Mismatch" => suspicious_file_type_mismatch: boolean,
    "Print Job Name" => print_job_name: text,
    "Printer Name" => printer_name: text,
    "Printed Files Backup Path" => printed_files_backup_path: text,
    "Remote Activity" => remote_activity: text,
    "Trusted" => trusted: boolean,
    "Logged in Operating System User" => logged_in_operating_system_user: text,
    "Destination Category" => destination_category: text,
    "Destination Name" => destination_name: text,
}
