//! Advising Timeline
//!
//! SQLite-backed append-only log of planner activity. Every planning
//! request (generation, repair, blocked swap) appends an event here so
//! advising sessions stay auditable. The engine itself never touches
//! this store; recording happens in the API layer and failures there
//! are logged, never surfaced to the client.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Result as SqlResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Kinds of events recorded in the timeline
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HistoryEventType {
    PlanGenerated,
    PlanRepaired,
    SwapBlocked,
    CatalogLoaded,
}

impl HistoryEventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryEventType::PlanGenerated => "plan_generated",
            HistoryEventType::PlanRepaired => "plan_repaired",
            HistoryEventType::SwapBlocked => "swap_blocked",
            HistoryEventType::CatalogLoaded => "catalog_loaded",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "plan_generated" => Some(HistoryEventType::PlanGenerated),
            "plan_repaired" => Some(HistoryEventType::PlanRepaired),
            "swap_blocked" => Some(HistoryEventType::SwapBlocked),
            "catalog_loaded" => Some(HistoryEventType::CatalogLoaded),
            _ => None,
        }
    }
}

/// A single event in the advising timeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEvent {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub event_type: HistoryEventType,
    pub description: String,
    /// Optional structured metadata (JSON)
    pub metadata: Option<serde_json::Value>,
}

impl HistoryEvent {
    pub fn new(event_type: HistoryEventType, description: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            event_type,
            description: description.to_string(),
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// SQLite-backed timeline store
pub struct HistoryStore {
    conn: Arc<Mutex<Connection>>,
}

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS history_events (
    id TEXT PRIMARY KEY,
    timestamp TEXT NOT NULL,
    event_type TEXT NOT NULL,
    description TEXT NOT NULL,
    metadata TEXT
)";

impl HistoryStore {
    /// Open (or create) a file-backed store
    pub fn open(db_path: Option<PathBuf>) -> SqlResult<Self> {
        let path = db_path.unwrap_or_else(|| PathBuf::from("advising_history.db"));
        let conn = Connection::open(path)?;
        conn.execute(SCHEMA, [])?;
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_history_timestamp ON history_events(timestamp)",
            [],
        )?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// In-memory store, used when no HISTORY_DB path is configured and
    /// in tests
    pub fn in_memory() -> SqlResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute(SCHEMA, [])?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Append an event to the timeline
    pub fn record_event(&self, event: &HistoryEvent) -> SqlResult<()> {
        let conn = self.conn.lock().unwrap();
        let metadata_json = event.metadata.as_ref().map(|m| m.to_string());

        conn.execute(
            "INSERT INTO history_events (id, timestamp, event_type, description, metadata)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                event.id,
                event.timestamp.to_rfc3339(),
                event.event_type.as_str(),
                event.description,
                metadata_json,
            ],
        )?;

        Ok(())
    }

    /// Most recent events, newest first
    pub fn recent_events(&self, limit: usize) -> SqlResult<Vec<HistoryEvent>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, timestamp, event_type, description, metadata
             FROM history_events
             ORDER BY timestamp DESC
             LIMIT ?1",
        )?;

        let events = stmt.query_map([limit as i64], |row| {
            let timestamp_str: String = row.get(1)?;
            let event_type_str: String = row.get(2)?;
            let metadata_str: Option<String> = row.get(4)?;

            Ok(HistoryEvent {
                id: row.get(0)?,
                timestamp: DateTime::parse_from_rfc3339(&timestamp_str)
                    .map(|dt| dt.with_timezone(&Utc))
                    .unwrap_or_else(|_| Utc::now()),
                event_type: HistoryEventType::parse(&event_type_str)
                    .unwrap_or(HistoryEventType::PlanGenerated),
                description: row.get(3)?,
                metadata: metadata_str.and_then(|s| serde_json::from_str(&s).ok()),
            })
        })?;

        Ok(events.filter_map(|e| e.ok()).collect())
    }
}

/// Record a plan generation event
pub fn record_plan_generated(
    store: &HistoryStore,
    course_count: usize,
    note_count: usize,
) -> SqlResult<()> {
    let event = HistoryEvent::new(
        HistoryEventType::PlanGenerated,
        &format!("Generated plan with {} courses", course_count),
    )
    .with_metadata(serde_json::json!({ "notes": note_count }));
    store.record_event(&event)
}

/// Record a plan repair event
pub fn record_plan_repaired(store: &HistoryStore, note_count: usize) -> SqlResult<()> {
    let event = HistoryEvent::new(
        HistoryEventType::PlanRepaired,
        &format!("Repaired plan ({} notes)", note_count),
    );
    store.record_event(&event)
}

/// Record a blocked swap attempt
pub fn record_swap_blocked(store: &HistoryStore, course: &str) -> SqlResult<()> {
    let event = HistoryEvent::new(
        HistoryEventType::SwapBlocked,
        &format!("Swap blocked: {} is locked", course),
    );
    store.record_event(&event)
}
