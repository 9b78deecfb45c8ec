//! SQLite-based storage for appointments, time blocks, and the business
//! catalog (services, clients, leads, portfolio).

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

use super::data_dir;
use super::migrations;
use crate::appointment::{Appointment, AppointmentStatus};
use crate::booking::{BusyInterval, BusySource};
use crate::catalog::{PortfolioItem, Service};
use crate::crm::{Client, Lead, LeadStatus};
use crate::error::DatabaseError;
use crate::timeblock::{BlockKind, TimeBlock};

// === Helper Functions ===

/// Parse appointment status from database string
fn parse_appointment_status(status_str: &str) -> AppointmentStatus {
    match status_str {
        "completed" => AppointmentStatus::Completed,
        "cancelled" => AppointmentStatus::Cancelled,
        "no_show" => AppointmentStatus::NoShow,
        _ => AppointmentStatus::Confirmed,
    }
}

/// Format appointment status for database storage
fn format_appointment_status(status: AppointmentStatus) -> &'static str {
    match status {
        AppointmentStatus::Confirmed => "confirmed",
        AppointmentStatus::Completed => "completed",
        AppointmentStatus::Cancelled => "cancelled",
        AppointmentStatus::NoShow => "no_show",
    }
}

/// Parse block kind from database string
fn parse_block_kind(kind_str: &str) -> BlockKind {
    match kind_str {
        "vacation" => BlockKind::Vacation,
        "break" => BlockKind::Break,
        _ => BlockKind::Unavailable,
    }
}

/// Format block kind for database storage
fn format_block_kind(kind: BlockKind) -> &'static str {
    match kind {
        BlockKind::Vacation => "vacation",
        BlockKind::Break => "break",
        BlockKind::Unavailable => "unavailable",
    }
}

/// Parse lead status from database string
fn parse_lead_status(status_str: &str) -> LeadStatus {
    match status_str {
        "contacted" => LeadStatus::Contacted,
        "converted" => LeadStatus::Converted,
        "lost" => LeadStatus::Lost,
        _ => LeadStatus::New,
    }
}

/// Format lead status for database storage
fn format_lead_status(status: LeadStatus) -> &'static str {
    match status {
        LeadStatus::New => "new",
        LeadStatus::Contacted => "contacted",
        LeadStatus::Converted => "converted",
        LeadStatus::Lost => "lost",
    }
}

/// Parse datetime from RFC3339 string with fallback to current time
fn parse_datetime_fallback(dt_str: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(dt_str)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

/// Build an Appointment from a database row
fn row_to_appointment(row: &rusqlite::Row) -> Result<Appointment, rusqlite::Error> {
    let status_str: String = row.get(6)?;
    let start_time_str: String = row.get(4)?;
    let end_time_str: String = row.get(5)?;
    let created_at_str: String = row.get(8)?;
    let updated_at_str: String = row.get(9)?;

    Ok(Appointment {
        id: row.get(0)?,
        professional_id: row.get(1)?,
        service_id: row.get(2)?,
        client_id: row.get(3)?,
        start_time: parse_datetime_fallback(&start_time_str),
        end_time: parse_datetime_fallback(&end_time_str),
        status: parse_appointment_status(&status_str),
        note: row.get(7)?,
        created_at: parse_datetime_fallback(&created_at_str),
        updated_at: parse_datetime_fallback(&updated_at_str),
        deposit_minor: row.get(10)?,
    })
}

const APPOINTMENT_COLUMNS: &str = "id, professional_id, service_id, client_id, start_time, \
                                   end_time, status, note, created_at, updated_at, deposit_minor";

/// Build a TimeBlock from a database row
fn row_to_time_block(row: &rusqlite::Row) -> Result<TimeBlock, rusqlite::Error> {
    let kind_str: String = row.get(2)?;
    let start_time_str: String = row.get(3)?;
    let end_time_str: String = row.get(4)?;
    let created_at_str: String = row.get(6)?;

    Ok(TimeBlock {
        id: row.get(0)?,
        professional_id: row.get(1)?,
        kind: parse_block_kind(&kind_str),
        start_time: parse_datetime_fallback(&start_time_str),
        end_time: parse_datetime_fallback(&end_time_str),
        label: row.get(5)?,
        created_at: parse_datetime_fallback(&created_at_str),
    })
}

/// Build a Service from a database row
fn row_to_service(row: &rusqlite::Row) -> Result<Service, rusqlite::Error> {
    let created_at_str: String = row.get(8)?;

    Ok(Service {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        duration_min: row.get(3)?,
        price_minor: row.get(4)?,
        currency: row.get(5)?,
        deposit_required: row.get(6)?,
        active: row.get(7)?,
        created_at: parse_datetime_fallback(&created_at_str),
    })
}

/// Build a Client from a database row
fn row_to_client(row: &rusqlite::Row) -> Result<Client, rusqlite::Error> {
    let created_at_str: String = row.get(5)?;

    Ok(Client {
        id: row.get(0)?,
        name: row.get(1)?,
        phone: row.get(2)?,
        email: row.get(3)?,
        notes: row.get(4)?,
        created_at: parse_datetime_fallback(&created_at_str),
    })
}

/// Build a Lead from a database row
fn row_to_lead(row: &rusqlite::Row) -> Result<Lead, rusqlite::Error> {
    let status_str: String = row.get(4)?;
    let created_at_str: String = row.get(6)?;
    let updated_at_str: String = row.get(7)?;

    Ok(Lead {
        id: row.get(0)?,
        name: row.get(1)?,
        contact: row.get(2)?,
        message: row.get(3)?,
        status: parse_lead_status(&status_str),
        client_id: row.get(5)?,
        created_at: parse_datetime_fallback(&created_at_str),
        updated_at: parse_datetime_fallback(&updated_at_str),
        source: row.get(8)?,
    })
}

const LEAD_COLUMNS: &str =
    "id, name, contact, message, status, client_id, created_at, updated_at, source";

/// Build a PortfolioItem from a database row
fn row_to_portfolio_item(row: &rusqlite::Row) -> Result<PortfolioItem, rusqlite::Error> {
    let created_at_str: String = row.get(4)?;

    Ok(PortfolioItem {
        id: row.get(0)?,
        title: row.get(1)?,
        caption: row.get(2)?,
        image_ref: row.get(3)?,
        created_at: parse_datetime_fallback(&created_at_str),
        service_id: row.get(5)?,
    })
}

/// SQLite database for salon storage.
///
/// Stores appointments, time blocks, services, clients, leads, and
/// portfolio items.
pub struct SalonDb {
    conn: Connection,
}

impl SalonDb {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `~/.config/chairside/chairside.db`.
    ///
    /// Creates tables if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, Box<dyn std::error::Error>> {
        let path = data_dir()?.join("chairside.db");
        Ok(Self::open_at(&path)?)
    }

    /// Open the database at an explicit path.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: &Path) -> Result<Self, DatabaseError> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory().map_err(DatabaseError::from)?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), DatabaseError> {
        // Create base tables (v1 schema) first
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS appointments (
                    id              TEXT PRIMARY KEY,
                    professional_id TEXT NOT NULL,
                    service_id      TEXT NOT NULL,
                    client_id       TEXT NOT NULL,
                    start_time      TEXT NOT NULL,
                    end_time        TEXT NOT NULL,
                    status          TEXT NOT NULL DEFAULT 'confirmed',
                    note            TEXT,
                    created_at      TEXT NOT NULL,
                    updated_at      TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS time_blocks (
                    id              TEXT PRIMARY KEY,
                    professional_id TEXT NOT NULL,
                    kind            TEXT NOT NULL DEFAULT 'unavailable',
                    start_time      TEXT NOT NULL,
                    end_time        TEXT NOT NULL,
                    label           TEXT,
                    created_at      TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS services (
                    id               TEXT PRIMARY KEY,
                    name             TEXT NOT NULL,
                    description      TEXT,
                    duration_min     INTEGER NOT NULL,
                    price_minor      INTEGER NOT NULL DEFAULT 0,
                    currency         TEXT NOT NULL DEFAULT 'USD',
                    deposit_required INTEGER NOT NULL DEFAULT 0,
                    active           INTEGER NOT NULL DEFAULT 1,
                    created_at       TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS clients (
                    id         TEXT PRIMARY KEY,
                    name       TEXT NOT NULL,
                    phone      TEXT NOT NULL,
                    email      TEXT,
                    notes      TEXT,
                    created_at TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS leads (
                    id         TEXT PRIMARY KEY,
                    name       TEXT NOT NULL,
                    contact    TEXT NOT NULL,
                    message    TEXT,
                    status     TEXT NOT NULL DEFAULT 'new',
                    client_id  TEXT,
                    created_at TEXT NOT NULL,
                    updated_at TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS portfolio_items (
                    id         TEXT PRIMARY KEY,
                    title      TEXT NOT NULL,
                    caption    TEXT,
                    image_ref  TEXT NOT NULL,
                    created_at TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS kv (
                    key   TEXT PRIMARY KEY,
                    value TEXT NOT NULL
                );",
            )
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;

        // Run incremental migrations (v1 -> v2 -> v3, etc.)
        migrations::migrate(&self.conn)
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;

        // Create indexes for common query patterns (idempotent, runs after
        // migrations add the columns)
        self.conn
            .execute_batch(
                "CREATE INDEX IF NOT EXISTS idx_appointments_professional_start
                     ON appointments(professional_id, start_time);
                 CREATE INDEX IF NOT EXISTS idx_appointments_status ON appointments(status);
                 CREATE INDEX IF NOT EXISTS idx_time_blocks_professional_start
                     ON time_blocks(professional_id, start_time);",
            )
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;

        Ok(())
    }

    // === Appointments ===

    /// Insert a new appointment.
    pub fn create_appointment(&self, appointment: &Appointment) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT INTO appointments (id, professional_id, service_id, client_id, start_time,
                                       end_time, status, note, created_at, updated_at, deposit_minor)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                appointment.id,
                appointment.professional_id,
                appointment.service_id,
                appointment.client_id,
                appointment.start_time.to_rfc3339(),
                appointment.end_time.to_rfc3339(),
                format_appointment_status(appointment.status),
                appointment.note,
                appointment.created_at.to_rfc3339(),
                appointment.updated_at.to_rfc3339(),
                appointment.deposit_minor,
            ],
        )?;
        Ok(())
    }

    /// Get an appointment by id.
    pub fn get_appointment(&self, id: &str) -> Result<Option<Appointment>, rusqlite::Error> {
        self.conn
            .query_row(
                &format!("SELECT {APPOINTMENT_COLUMNS} FROM appointments WHERE id = ?1"),
                params![id],
                row_to_appointment,
            )
            .optional()
    }

    /// Update an existing appointment row in full.
    pub fn update_appointment(&self, appointment: &Appointment) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "UPDATE appointments
             SET professional_id = ?2, service_id = ?3, client_id = ?4, start_time = ?5,
                 end_time = ?6, status = ?7, note = ?8, updated_at = ?9, deposit_minor = ?10
             WHERE id = ?1",
            params![
                appointment.id,
                appointment.professional_id,
                appointment.service_id,
                appointment.client_id,
                appointment.start_time.to_rfc3339(),
                appointment.end_time.to_rfc3339(),
                format_appointment_status(appointment.status),
                appointment.note,
                appointment.updated_at.to_rfc3339(),
                appointment.deposit_minor,
            ],
        )?;
        Ok(())
    }

    /// List all appointments ordered by start time.
    pub fn list_appointments(&self) -> Result<Vec<Appointment>, rusqlite::Error> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {APPOINTMENT_COLUMNS} FROM appointments ORDER BY start_time ASC"
        ))?;
        let rows = stmt.query_map([], row_to_appointment)?;
        rows.collect()
    }

    /// Appointments for one professional overlapping `[range_start, range_end)`,
    /// any status, ordered by start time.
    pub fn appointments_between(
        &self,
        professional_id: &str,
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
    ) -> Result<Vec<Appointment>, rusqlite::Error> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {APPOINTMENT_COLUMNS} FROM appointments
             WHERE professional_id = ?1 AND start_time < ?3 AND end_time > ?2
             ORDER BY start_time ASC"
        ))?;
        let rows = stmt.query_map(
            params![
                professional_id,
                range_start.to_rfc3339(),
                range_end.to_rfc3339()
            ],
            row_to_appointment,
        )?;
        rows.collect()
    }

    // === Time blocks ===

    /// Insert a new time block.
    pub fn create_time_block(&self, block: &TimeBlock) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT INTO time_blocks (id, professional_id, kind, start_time, end_time, label, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                block.id,
                block.professional_id,
                format_block_kind(block.kind),
                block.start_time.to_rfc3339(),
                block.end_time.to_rfc3339(),
                block.label,
                block.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// List all time blocks, optionally filtered by professional.
    pub fn list_time_blocks(
        &self,
        professional_id: Option<&str>,
    ) -> Result<Vec<TimeBlock>, rusqlite::Error> {
        match professional_id {
            Some(pid) => {
                let mut stmt = self.conn.prepare(
                    "SELECT id, professional_id, kind, start_time, end_time, label, created_at
                     FROM time_blocks WHERE professional_id = ?1 ORDER BY start_time ASC",
                )?;
                let rows = stmt.query_map(params![pid], row_to_time_block)?;
                rows.collect()
            }
            None => {
                let mut stmt = self.conn.prepare(
                    "SELECT id, professional_id, kind, start_time, end_time, label, created_at
                     FROM time_blocks ORDER BY start_time ASC",
                )?;
                let rows = stmt.query_map([], row_to_time_block)?;
                rows.collect()
            }
        }
    }

    /// Time blocks for one professional overlapping `[range_start, range_end)`.
    pub fn time_blocks_between(
        &self,
        professional_id: &str,
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
    ) -> Result<Vec<TimeBlock>, rusqlite::Error> {
        let mut stmt = self.conn.prepare(
            "SELECT id, professional_id, kind, start_time, end_time, label, created_at
             FROM time_blocks
             WHERE professional_id = ?1 AND start_time < ?3 AND end_time > ?2
             ORDER BY start_time ASC",
        )?;
        let rows = stmt.query_map(
            params![
                professional_id,
                range_start.to_rfc3339(),
                range_end.to_rfc3339()
            ],
            row_to_time_block,
        )?;
        rows.collect()
    }

    /// Delete a time block by id.
    pub fn delete_time_block(&self, id: &str) -> Result<(), rusqlite::Error> {
        self.conn
            .execute("DELETE FROM time_blocks WHERE id = ?1", params![id])?;
        Ok(())
    }

    /// Occupied intervals for one professional overlapping
    /// `[range_start, range_end)`: confirmed appointments plus all time
    /// blocks. This is the set the conflict detector runs against.
    pub fn busy_intervals(
        &self,
        professional_id: &str,
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
    ) -> Result<Vec<BusyInterval>, rusqlite::Error> {
        let mut busy = Vec::new();

        for appointment in self.appointments_between(professional_id, range_start, range_end)? {
            if appointment.status.occupies_interval() {
                busy.push(BusyInterval::from_appointment(&appointment));
            }
        }
        for block in self.time_blocks_between(professional_id, range_start, range_end)? {
            busy.push(BusyInterval::from_block(&block));
        }

        busy.sort_by_key(|interval| interval.start_time);
        Ok(busy)
    }

    // === Services ===

    /// Insert a new service.
    pub fn create_service(&self, service: &Service) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT INTO services (id, name, description, duration_min, price_minor, currency,
                                   deposit_required, active, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                service.id,
                service.name,
                service.description,
                service.duration_min,
                service.price_minor,
                service.currency,
                service.deposit_required,
                service.active,
                service.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Get a service by id.
    pub fn get_service(&self, id: &str) -> Result<Option<Service>, rusqlite::Error> {
        self.conn
            .query_row(
                "SELECT id, name, description, duration_min, price_minor, currency,
                        deposit_required, active, created_at
                 FROM services WHERE id = ?1",
                params![id],
                row_to_service,
            )
            .optional()
    }

    /// Update an existing service row in full.
    pub fn update_service(&self, service: &Service) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "UPDATE services
             SET name = ?2, description = ?3, duration_min = ?4, price_minor = ?5,
                 currency = ?6, deposit_required = ?7, active = ?8
             WHERE id = ?1",
            params![
                service.id,
                service.name,
                service.description,
                service.duration_min,
                service.price_minor,
                service.currency,
                service.deposit_required,
                service.active,
            ],
        )?;
        Ok(())
    }

    /// List all services ordered by name.
    pub fn list_services(&self) -> Result<Vec<Service>, rusqlite::Error> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, description, duration_min, price_minor, currency,
                    deposit_required, active, created_at
             FROM services ORDER BY name ASC",
        )?;
        let rows = stmt.query_map([], row_to_service)?;
        rows.collect()
    }

    // === Clients ===

    /// Insert a new client.
    pub fn create_client(&self, client: &Client) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT INTO clients (id, name, phone, email, notes, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                client.id,
                client.name,
                client.phone,
                client.email,
                client.notes,
                client.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Get a client by id.
    pub fn get_client(&self, id: &str) -> Result<Option<Client>, rusqlite::Error> {
        self.conn
            .query_row(
                "SELECT id, name, phone, email, notes, created_at FROM clients WHERE id = ?1",
                params![id],
                row_to_client,
            )
            .optional()
    }

    /// Update an existing client row in full.
    pub fn update_client(&self, client: &Client) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "UPDATE clients SET name = ?2, phone = ?3, email = ?4, notes = ?5 WHERE id = ?1",
            params![
                client.id,
                client.name,
                client.phone,
                client.email,
                client.notes,
            ],
        )?;
        Ok(())
    }

    /// List all clients ordered by name.
    pub fn list_clients(&self) -> Result<Vec<Client>, rusqlite::Error> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, phone, email, notes, created_at FROM clients ORDER BY name ASC")?;
        let rows = stmt.query_map([], row_to_client)?;
        rows.collect()
    }

    // === Leads ===

    /// Insert a new lead.
    pub fn create_lead(&self, lead: &Lead) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT INTO leads (id, name, contact, message, status, client_id, created_at,
                                updated_at, source)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                lead.id,
                lead.name,
                lead.contact,
                lead.message,
                format_lead_status(lead.status),
                lead.client_id,
                lead.created_at.to_rfc3339(),
                lead.updated_at.to_rfc3339(),
                lead.source,
            ],
        )?;
        Ok(())
    }

    /// Get a lead by id.
    pub fn get_lead(&self, id: &str) -> Result<Option<Lead>, rusqlite::Error> {
        self.conn
            .query_row(
                &format!("SELECT {LEAD_COLUMNS} FROM leads WHERE id = ?1"),
                params![id],
                row_to_lead,
            )
            .optional()
    }

    /// Update an existing lead row in full.
    pub fn update_lead(&self, lead: &Lead) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "UPDATE leads
             SET name = ?2, contact = ?3, message = ?4, status = ?5, client_id = ?6,
                 updated_at = ?7, source = ?8
             WHERE id = ?1",
            params![
                lead.id,
                lead.name,
                lead.contact,
                lead.message,
                format_lead_status(lead.status),
                lead.client_id,
                lead.updated_at.to_rfc3339(),
                lead.source,
            ],
        )?;
        Ok(())
    }

    /// List all leads, newest first.
    pub fn list_leads(&self) -> Result<Vec<Lead>, rusqlite::Error> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {LEAD_COLUMNS} FROM leads ORDER BY created_at DESC"
        ))?;
        let rows = stmt.query_map([], row_to_lead)?;
        rows.collect()
    }

    // === Portfolio ===

    /// Insert a new portfolio item.
    pub fn create_portfolio_item(&self, item: &PortfolioItem) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT INTO portfolio_items (id, title, caption, image_ref, created_at, service_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                item.id,
                item.title,
                item.caption,
                item.image_ref,
                item.created_at.to_rfc3339(),
                item.service_id,
            ],
        )?;
        Ok(())
    }

    /// List all portfolio items, newest first.
    pub fn list_portfolio_items(&self) -> Result<Vec<PortfolioItem>, rusqlite::Error> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, caption, image_ref, created_at, service_id
             FROM portfolio_items ORDER BY created_at DESC",
        )?;
        let rows = stmt.query_map([], row_to_portfolio_item)?;
        rows.collect()
    }

    /// Delete a portfolio item by id.
    pub fn delete_portfolio_item(&self, id: &str) -> Result<(), rusqlite::Error> {
        self.conn
            .execute("DELETE FROM portfolio_items WHERE id = ?1", params![id])?;
        Ok(())
    }

    // === KV store ===

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, rusqlite::Error> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeblock::BlockKind;
    use chrono::{Duration, TimeZone};

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 3, hour, minute, 0).unwrap()
    }

    fn seed_appointment(db: &SalonDb, start: DateTime<Utc>, minutes: i64) -> Appointment {
        let appt = Appointment::new("pro-1", "svc-1", "client-1", start, start + Duration::minutes(minutes));
        db.create_appointment(&appt).unwrap();
        appt
    }

    #[test]
    fn appointment_roundtrip() {
        let db = SalonDb::open_memory().unwrap();
        let appt = seed_appointment(&db, at(10, 0), 45);

        let loaded = db.get_appointment(&appt.id).unwrap().unwrap();
        assert_eq!(loaded.id, appt.id);
        assert_eq!(loaded.status, AppointmentStatus::Confirmed);
        assert_eq!(loaded.start_time, appt.start_time);
        assert_eq!(loaded.duration_minutes(), 45);
    }

    #[test]
    fn appointment_update_persists_status() {
        let db = SalonDb::open_memory().unwrap();
        let mut appt = seed_appointment(&db, at(10, 0), 45);

        appt.transition_to(AppointmentStatus::Completed).unwrap();
        db.update_appointment(&appt).unwrap();

        let loaded = db.get_appointment(&appt.id).unwrap().unwrap();
        assert_eq!(loaded.status, AppointmentStatus::Completed);
    }

    #[test]
    fn appointments_between_uses_half_open_range() {
        let db = SalonDb::open_memory().unwrap();
        seed_appointment(&db, at(9, 0), 60);
        seed_appointment(&db, at(10, 0), 30);
        seed_appointment(&db, at(12, 0), 30);

        // Range [10:00, 12:00) excludes the appointment ending at 10:00
        // and the one starting at 12:00.
        let within = db
            .appointments_between("pro-1", at(10, 0), at(12, 0))
            .unwrap();
        assert_eq!(within.len(), 1);
        assert_eq!(within[0].start_time, at(10, 0));
    }

    #[test]
    fn busy_intervals_exclude_cancelled() {
        let db = SalonDb::open_memory().unwrap();
        let mut cancelled = seed_appointment(&db, at(10, 0), 30);
        cancelled.transition_to(AppointmentStatus::Cancelled).unwrap();
        db.update_appointment(&cancelled).unwrap();
        seed_appointment(&db, at(11, 0), 30);

        let busy = db.busy_intervals("pro-1", at(8, 0), at(18, 0)).unwrap();
        assert_eq!(busy.len(), 1);
        assert_eq!(busy[0].start_time, at(11, 0));
    }

    #[test]
    fn busy_intervals_include_blocks_sorted() {
        let db = SalonDb::open_memory().unwrap();
        seed_appointment(&db, at(14, 0), 30);
        let block =
            TimeBlock::new("pro-1", BlockKind::Break, at(12, 0), at(13, 0), None).unwrap();
        db.create_time_block(&block).unwrap();

        let busy = db.busy_intervals("pro-1", at(8, 0), at(18, 0)).unwrap();
        assert_eq!(busy.len(), 2);
        assert_eq!(busy[0].start_time, at(12, 0));
        assert!(matches!(busy[0].source, BusySource::Block { .. }));
        assert!(matches!(busy[1].source, BusySource::Appointment { .. }));
    }

    #[test]
    fn busy_intervals_scoped_to_professional() {
        let db = SalonDb::open_memory().unwrap();
        seed_appointment(&db, at(10, 0), 30);
        let other = Appointment::new("pro-2", "svc-1", "client-1", at(10, 0), at(10, 30));
        db.create_appointment(&other).unwrap();

        let busy = db.busy_intervals("pro-2", at(8, 0), at(18, 0)).unwrap();
        assert_eq!(busy.len(), 1);
    }

    #[test]
    fn time_block_crud() {
        let db = SalonDb::open_memory().unwrap();
        let block = TimeBlock::new(
            "pro-1",
            BlockKind::Vacation,
            at(8, 0),
            at(18, 0),
            Some("Away".to_string()),
        )
        .unwrap();
        db.create_time_block(&block).unwrap();

        let all = db.list_time_blocks(None).unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].kind, BlockKind::Vacation);
        assert_eq!(all[0].label.as_deref(), Some("Away"));

        db.delete_time_block(&block.id).unwrap();
        assert!(db.list_time_blocks(None).unwrap().is_empty());
    }

    #[test]
    fn service_roundtrip() {
        let db = SalonDb::open_memory().unwrap();
        let svc = Service::new("Balayage", 90, 18000, "USD")
            .unwrap()
            .with_deposit_required(true);
        db.create_service(&svc).unwrap();

        let loaded = db.get_service(&svc.id).unwrap().unwrap();
        assert_eq!(loaded.name, "Balayage");
        assert_eq!(loaded.duration_min, 90);
        assert!(loaded.deposit_required);
        assert!(loaded.active);
    }

    #[test]
    fn service_deactivation() {
        let db = SalonDb::open_memory().unwrap();
        let mut svc = Service::new("Perm", 120, 15000, "USD").unwrap();
        db.create_service(&svc).unwrap();

        svc.active = false;
        db.update_service(&svc).unwrap();

        let loaded = db.get_service(&svc.id).unwrap().unwrap();
        assert!(!loaded.active);
    }

    #[test]
    fn client_roundtrip() {
        let db = SalonDb::open_memory().unwrap();
        let client = Client::new("Dana", "+1 555 0101");
        db.create_client(&client).unwrap();

        let loaded = db.get_client(&client.id).unwrap().unwrap();
        assert_eq!(loaded.name, "Dana");
        assert!(loaded.email.is_none());
    }

    #[test]
    fn lead_roundtrip_with_source() {
        let db = SalonDb::open_memory().unwrap();
        let mut lead = Lead::new("Sam", "sam@example.com");
        lead.source = Some("instagram".to_string());
        db.create_lead(&lead).unwrap();

        let loaded = db.get_lead(&lead.id).unwrap().unwrap();
        assert_eq!(loaded.status, LeadStatus::New);
        assert_eq!(loaded.source.as_deref(), Some("instagram"));
    }

    #[test]
    fn lead_conversion_persists() {
        let db = SalonDb::open_memory().unwrap();
        let mut lead = Lead::new("Sam", "sam@example.com");
        db.create_lead(&lead).unwrap();

        let client = lead.convert().unwrap();
        db.create_client(&client).unwrap();
        db.update_lead(&lead).unwrap();

        let loaded = db.get_lead(&lead.id).unwrap().unwrap();
        assert_eq!(loaded.status, LeadStatus::Converted);
        assert_eq!(loaded.client_id.as_deref(), Some(client.id.as_str()));
        assert!(db.get_client(&client.id).unwrap().is_some());
    }

    #[test]
    fn portfolio_crud() {
        let db = SalonDb::open_memory().unwrap();
        let mut item = PortfolioItem::new("Bridal updo", "portfolio/bridal-01.jpg");
        item.service_id = Some("svc-1".to_string());
        db.create_portfolio_item(&item).unwrap();

        let all = db.list_portfolio_items().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].service_id.as_deref(), Some("svc-1"));

        db.delete_portfolio_item(&item.id).unwrap();
        assert!(db.list_portfolio_items().unwrap().is_empty());
    }

    #[test]
    fn kv_store() {
        let db = SalonDb::open_memory().unwrap();
        assert!(db.kv_get("test").unwrap().is_none());
        db.kv_set("test", "hello").unwrap();
        assert_eq!(db.kv_get("test").unwrap().unwrap(), "hello");
    }
}
