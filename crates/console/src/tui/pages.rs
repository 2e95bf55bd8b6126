//! Generic page controller and per-page table layouts.
//!
//! Every dashboard page owns the same view state: fetched records, a
//! loading flag, and an error message. The controller is written once;
//! pages differ only in what they fetch and which columns they show.

use thecloud_api_client::{ApiError, DashboardStats, Event, Instance, StorageObject, Vpc};

use crate::format::{format_date_time, format_short_id, format_size, status_indicator, Indicator};

// ── Page state ──────────────────────────────────────────────────────

/// View state for one page: `idle → loading → (success | error)`,
/// re-entrant on manual refresh.
pub struct PageState<T> {
    pub data: T,
    pub loading: bool,
    pub error: Option<String>,
    seq: u64,
}

impl<T: Default> PageState<T> {
    pub fn new() -> Self {
        Self {
            data: T::default(),
            loading: false,
            error: None,
            seq: 0,
        }
    }

    /// True until the first fetch has been started.
    pub fn untouched(&self) -> bool {
        self.seq == 0
    }

    /// Start a fetch: clear the previous error, raise the loading flag,
    /// and hand out the sequence number the completion must echo back.
    pub fn begin(&mut self) -> u64 {
        self.error = None;
        self.loading = true;
        self.seq += 1;
        self.seq
    }

    /// Apply a fetch completion. Out-of-sequence completions are dropped,
    /// so a slow stale response can never overwrite a newer one. On
    /// failure the previously loaded data stays in place.
    pub fn finish(&mut self, seq: u64, result: Result<T, ApiError>) {
        if seq != self.seq {
            return;
        }
        self.loading = false;
        match result {
            Ok(data) => self.data = data,
            Err(e) => self.error = Some(e.to_string()),
        }
    }
}

/// A fetch completion routed back to the event loop.
pub enum FetchOutcome {
    Stats(u64, Result<DashboardStats, ApiError>),
    Instances(u64, Result<Vec<Instance>, ApiError>),
    Vpcs(u64, Result<Vec<Vpc>, ApiError>),
    Objects(u64, Result<Vec<StorageObject>, ApiError>),
    Events(u64, Result<Vec<Event>, ApiError>),
}

// ── Table layouts ───────────────────────────────────────────────────

/// Column layout over fetched records, ready for width computation.
pub struct TableSpec {
    pub headers: &'static [&'static str],
    pub rows: Vec<Vec<String>>,
    /// Column rendered with a status accent, if any.
    pub accent_col: Option<usize>,
    /// Per-row accent, parallel to `rows` when `accent_col` is set.
    pub accents: Vec<Indicator>,
}

pub fn instances_table(instances: &[Instance]) -> TableSpec {
    TableSpec {
        headers: &["NAME", "ID", "IMAGE", "STATUS", "PORTS", "CREATED"],
        rows: instances
            .iter()
            .map(|i| {
                vec![
                    i.name.clone(),
                    format_short_id(&i.id),
                    i.image.clone(),
                    i.status.to_lowercase(),
                    i.ports
                        .clone()
                        .filter(|p| !p.is_empty())
                        .unwrap_or_else(|| "-".into()),
                    format_date_time(&i.created_at),
                ]
            })
            .collect(),
        accent_col: Some(3),
        accents: instances.iter().map(|i| status_indicator(&i.status)).collect(),
    }
}

pub fn vpcs_table(vpcs: &[Vpc]) -> TableSpec {
    TableSpec {
        headers: &["NAME", "VPC ID", "NETWORK ID", "CREATED"],
        rows: vpcs
            .iter()
            .map(|v| {
                vec![
                    v.name.clone(),
                    format_short_id(&v.id),
                    format_short_id(&v.network_id),
                    format_date_time(&v.created_at),
                ]
            })
            .collect(),
        accent_col: None,
        accents: Vec::new(),
    }
}

pub fn objects_table(objects: &[StorageObject]) -> TableSpec {
    TableSpec {
        headers: &["KEY", "SIZE", "TYPE", "CREATED"],
        rows: objects
            .iter()
            .map(|o| {
                vec![
                    o.key.clone(),
                    format_size(o.size_bytes),
                    o.content_type.clone(),
                    format_date_time(&o.created_at),
                ]
            })
            .collect(),
        accent_col: None,
        accents: Vec::new(),
    }
}

pub fn events_table(events: &[Event]) -> TableSpec {
    TableSpec {
        headers: &["ACTION", "RESOURCE", "USER", "TIMESTAMP"],
        rows: events
            .iter()
            .map(|e| {
                vec![
                    e.action.clone(),
                    format!("{} {}", e.resource_type, format_short_id(&e.resource_id)),
                    format_short_id(&e.user_id),
                    format_date_time(&e.created_at),
                ]
            })
            .collect(),
        accent_col: None,
        accents: Vec::new(),
    }
}
