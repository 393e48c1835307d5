//! Database initialization SQL.
//!
//! Executed once at startup via `Connection::execute_batch`. Every
//! statement uses `IF NOT EXISTS` / `OR IGNORE` so re-running on each boot
//! is safe.

/// All four public forms share one table; `kind` is the discriminator.
/// `synced_at` is the sync marker: NULL means "not yet exported to the
/// spreadsheet" and it is set exactly once by the sync flow.
pub const INIT_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS submissions (
    id                TEXT PRIMARY KEY,
    kind              TEXT NOT NULL,
    full_name         TEXT NOT NULL,
    email             TEXT NOT NULL,
    newsletter_opt_in INTEGER NOT NULL DEFAULT 0,
    metadata          TEXT NOT NULL DEFAULT '{}',
    created_at        TEXT NOT NULL,
    synced_at         TEXT
);

CREATE INDEX IF NOT EXISTS idx_submissions_kind_created
    ON submissions (kind, created_at);
CREATE INDEX IF NOT EXISTS idx_submissions_unsynced
    ON submissions (created_at) WHERE synced_at IS NULL;

CREATE TABLE IF NOT EXISTS petitions (
    id              TEXT PRIMARY KEY,
    title           TEXT NOT NULL,
    story           TEXT NOT NULL,
    goal            INTEGER NOT NULL,
    -- Cached signature total, refreshed on every signature insert. The
    -- live COUNT(*) over signatures is the canonical value.
    signature_count INTEGER NOT NULL DEFAULT 0,
    created_at      TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS signatures (
    id                TEXT PRIMARY KEY,
    petition_id       TEXT NOT NULL,
    full_name         TEXT NOT NULL,
    email             TEXT NOT NULL,
    newsletter_opt_in INTEGER NOT NULL DEFAULT 0,
    metadata          TEXT NOT NULL DEFAULT '{}',
    created_at        TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_signatures_petition
    ON signatures (petition_id, created_at);

-- Auxiliary side effects (emails, CRM contact, sheet sync nudge) persist
-- here and are drained by the background worker.
CREATE TABLE IF NOT EXISTS outbox (
    id         TEXT PRIMARY KEY,
    task       TEXT NOT NULL,
    payload    TEXT NOT NULL,
    attempts   INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    sent_at    TEXT,
    last_error TEXT
);

CREATE INDEX IF NOT EXISTS idx_outbox_pending
    ON outbox (created_at) WHERE sent_at IS NULL;

CREATE TABLE IF NOT EXISTS audit_log (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    action     TEXT NOT NULL,
    detail     TEXT NOT NULL,
    created_at TEXT NOT NULL
);
"#;

/// The campaign the site ships with. Seeded only when missing so operator
/// edits survive restarts.
pub const SEED_PETITION_SQL: &str = r#"
INSERT OR IGNORE INTO petitions (id, title, story, goal, signature_count, created_at)
VALUES (
    'end-exit-scams',
    'Demand Protection From Timeshare Exit Scams',
    'Every year, families already trapped in timeshare contracts are targeted a second time by fraudulent "exit" companies. Sign to demand real oversight and restitution for victims.',
    10000,
    0,
    '2025-01-06T00:00:00+00:00'
);
"#;
