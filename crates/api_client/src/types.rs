//! Record types for The Cloud API.
//!
//! Fields mirror the wire payloads one-to-one. Deserialization is
//! permissive: missing fields default, unknown fields are ignored —
//! the server owns the schema, the console only displays it.

use serde::{Deserialize, Serialize};

/// A compute instance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Instance {
    pub id: String,
    pub name: String,
    pub image: String,
    pub status: String,
    pub ports: Option<String>,
    pub created_at: String,
}

/// An object stored in a bucket.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageObject {
    pub id: String,
    pub bucket: String,
    pub key: String,
    pub size_bytes: u64,
    pub content_type: String,
    pub created_at: String,
}

/// A virtual private cloud.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Vpc {
    pub id: String,
    pub name: String,
    pub network_id: String,
    pub created_at: String,
}

/// An audit event. Resource IDs are untyped strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Event {
    pub id: String,
    pub action: String,
    pub resource_id: String,
    pub resource_type: String,
    pub user_id: String,
    pub created_at: String,
}

/// Aggregate counts for the overview cards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Summary {
    pub total_instances: u64,
    pub running_instances: u64,
    pub stopped_instances: u64,
    pub total_volumes: u64,
    pub attached_volumes: u64,
    pub total_vpcs: u64,
    pub total_storage_mb: u64,
}

/// Payload of /api/dashboard/stats.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardStats {
    pub summary: Summary,
    pub recent_events: Vec<Event>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_missing_optional_fields() {
        let json = r#"{"id":"i-1","name":"web","status":"RUNNING"}"#;
        let parsed: Instance = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.id, "i-1");
        assert_eq!(parsed.image, "");
        assert!(parsed.ports.is_none());
    }

    #[test]
    fn test_instance_unknown_fields_ignored() {
        let json = r#"{"id":"i-1","container_id":"deadbeef","version":3}"#;
        let parsed: Instance = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.id, "i-1");
    }

    #[test]
    fn test_dashboard_stats_empty_object() {
        let parsed: DashboardStats = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.summary.total_instances, 0);
        assert!(parsed.recent_events.is_empty());
    }

    #[test]
    fn test_summary_full_payload() {
        let json = r#"{
            "total_instances": 10,
            "running_instances": 7,
            "stopped_instances": 3,
            "total_volumes": 4,
            "attached_volumes": 2,
            "total_vpcs": 2,
            "total_storage_mb": 2048
        }"#;
        let parsed: Summary = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.running_instances, 7);
        assert_eq!(parsed.total_storage_mb, 2048);
    }
}
