//! SQL schema for the Plantilla SQLite store.
//!
//! Executed once at connection startup. Table and column names must stay in
//! step with the `Table` descriptors in `plantilla-core`; future migrations
//! will be gated on `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- Every table carries `status`: 1 = active, 0 = soft-deleted.
-- No DELETE is ever issued against any table.

CREATE TABLE IF NOT EXISTS roles (
    id_role      INTEGER PRIMARY KEY AUTOINCREMENT,
    name         TEXT NOT NULL,
    description  TEXT,
    status       INTEGER NOT NULL DEFAULT 1
);

CREATE TABLE IF NOT EXISTS users (
    id_user        INTEGER PRIMARY KEY AUTOINCREMENT,
    name           TEXT NOT NULL,
    email          TEXT NOT NULL UNIQUE,
    password_hash  TEXT NOT NULL,
    id_role        INTEGER REFERENCES roles(id_role),
    status         INTEGER NOT NULL DEFAULT 1
);

CREATE TABLE IF NOT EXISTS employees (
    id_employee   TEXT PRIMARY KEY,   -- document id of the mirrored profile
    name          TEXT NOT NULL,
    last_name     TEXT NOT NULL,
    position      TEXT NOT NULL,
    department    TEXT,
    phone         TEXT,
    email         TEXT,
    hire_date     TEXT,               -- YYYY-MM-DD
    daily_salary  REAL,
    status        INTEGER NOT NULL DEFAULT 1
);

CREATE TABLE IF NOT EXISTS attendances (
    id_attendance  INTEGER PRIMARY KEY AUTOINCREMENT,
    id_employee    TEXT NOT NULL REFERENCES employees(id_employee),
    date           TEXT,
    check_in       TEXT,              -- HH:MM:SS
    check_out      TEXT,
    status         INTEGER NOT NULL DEFAULT 1
);

CREATE TABLE IF NOT EXISTS labor_events (
    id_labor_event  INTEGER PRIMARY KEY AUTOINCREMENT,
    id_employee     TEXT NOT NULL REFERENCES employees(id_employee),
    event_name      TEXT NOT NULL,
    description     TEXT,
    event_date      TEXT,
    status          INTEGER NOT NULL DEFAULT 1
);

CREATE TABLE IF NOT EXISTS terminations (
    id_termination    INTEGER PRIMARY KEY AUTOINCREMENT,
    id_employee       TEXT NOT NULL REFERENCES employees(id_employee),
    reason            TEXT NOT NULL,
    termination_date  TEXT,
    comments          TEXT,
    document_url      TEXT,
    status            INTEGER NOT NULL DEFAULT 1
);

CREATE TABLE IF NOT EXISTS employee_documents (
    id_document  INTEGER PRIMARY KEY AUTOINCREMENT,
    id_employee  TEXT NOT NULL REFERENCES employees(id_employee),
    name         TEXT NOT NULL,
    url          TEXT,
    uploaded_at  TEXT,                -- RFC 3339 UTC
    status       INTEGER NOT NULL DEFAULT 1
);

CREATE TABLE IF NOT EXISTS disabilities (
    id_disability  INTEGER PRIMARY KEY AUTOINCREMENT,
    id_employee    TEXT NOT NULL REFERENCES employees(id_employee),
    kind           TEXT NOT NULL,
    start_date     TEXT,
    end_date       TEXT,
    description    TEXT,
    status         INTEGER NOT NULL DEFAULT 1
);

CREATE TABLE IF NOT EXISTS absence_requests (
    id_absence_request  INTEGER PRIMARY KEY AUTOINCREMENT,
    id_employee         TEXT NOT NULL REFERENCES employees(id_employee),
    start_date          TEXT,
    end_date            TEXT,
    reason              TEXT,
    approved            INTEGER NOT NULL DEFAULT 0,
    status              INTEGER NOT NULL DEFAULT 1
);

CREATE TABLE IF NOT EXISTS job_descriptions (
    id_job_description  INTEGER PRIMARY KEY AUTOINCREMENT,
    position            TEXT NOT NULL,
    description         TEXT,
    requirements        TEXT,
    status              INTEGER NOT NULL DEFAULT 1
);

CREATE TABLE IF NOT EXISTS salary_tabulators (
    id_salary_tabulator  INTEGER PRIMARY KEY AUTOINCREMENT,
    position             TEXT NOT NULL,
    daily_salary         REAL NOT NULL,
    weekly_salary        REAL NOT NULL,
    status               INTEGER NOT NULL DEFAULT 1
);

-- Catalogs: ids are document ids from the mirror collections.
CREATE TABLE IF NOT EXISTS categories (
    id_category  TEXT PRIMARY KEY,
    name         TEXT NOT NULL,
    status       INTEGER NOT NULL DEFAULT 1
);

CREATE TABLE IF NOT EXISTS subcategories (
    id_subcategory  TEXT PRIMARY KEY,
    id_category     TEXT NOT NULL REFERENCES categories(id_category),
    name            TEXT NOT NULL,
    status          INTEGER NOT NULL DEFAULT 1
);

CREATE TABLE IF NOT EXISTS materials_catalog (
    id_material     TEXT PRIMARY KEY,
    name            TEXT NOT NULL,
    description     TEXT,
    unit            TEXT,
    id_category     TEXT,
    id_subcategory  TEXT,
    price           REAL,
    status          INTEGER NOT NULL DEFAULT 1
);

CREATE TABLE IF NOT EXISTS tools_catalog (
    id_tool      TEXT PRIMARY KEY,
    name         TEXT NOT NULL,
    description  TEXT,
    brand        TEXT,
    id_category  TEXT,
    status       INTEGER NOT NULL DEFAULT 1
);

CREATE TABLE IF NOT EXISTS projects (
    id_project   TEXT PRIMARY KEY,
    name         TEXT NOT NULL,
    description  TEXT,
    location     TEXT,
    start_date   TEXT,
    end_date     TEXT,
    status       INTEGER NOT NULL DEFAULT 1
);

-- Purchase requests. Folios come from counters in the mirror.
CREATE TABLE IF NOT EXISTS request_headers (
    id_request_header  INTEGER PRIMARY KEY AUTOINCREMENT,
    folio              INTEGER,
    id_project         TEXT,
    id_employee        TEXT,
    request_date       TEXT,
    comments           TEXT,
    status             INTEGER NOT NULL DEFAULT 1
);

CREATE TABLE IF NOT EXISTS request_details (
    id_request_detail  INTEGER PRIMARY KEY AUTOINCREMENT,
    id_detail          TEXT NOT NULL,   -- shared by the lines of one batch
    folio              INTEGER,
    id_material        TEXT,
    quantity           REAL NOT NULL,
    unit               TEXT,
    comments           TEXT,
    status             INTEGER NOT NULL DEFAULT 1
);

CREATE TABLE IF NOT EXISTS requests_additional (
    id_request_additional  INTEGER PRIMARY KEY AUTOINCREMENT,
    folio                  INTEGER,
    id_project             TEXT,
    description            TEXT NOT NULL,
    quantity               REAL NOT NULL,
    unit                   TEXT,
    status                 INTEGER NOT NULL DEFAULT 1
);

CREATE INDEX IF NOT EXISTS labor_events_employee_idx ON labor_events(id_employee);
CREATE INDEX IF NOT EXISTS attendances_employee_idx  ON attendances(id_employee);
CREATE INDEX IF NOT EXISTS request_details_batch_idx ON request_details(id_detail);

PRAGMA user_version = 1;
";
