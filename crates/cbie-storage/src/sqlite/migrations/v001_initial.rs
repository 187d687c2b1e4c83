//! v001: prompts, profiles, legacy behaviors, vectors.

pub const MIGRATION_SQL: &str = "
CREATE TABLE IF NOT EXISTS prompts (
    prompt_id   TEXT PRIMARY KEY,
    user_id     TEXT,
    timestamp   INTEGER NOT NULL,
    body        TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS profiles (
    user_id      TEXT PRIMARY KEY,
    generated_at TEXT NOT NULL,
    body         TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS legacy_behaviors (
    behavior_id TEXT PRIMARY KEY,
    user_id     TEXT,
    body        TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS vectors (
    user_id     TEXT NOT NULL,
    id          TEXT NOT NULL,
    dimensions  INTEGER NOT NULL,
    vector      BLOB NOT NULL,
    metadata    TEXT NOT NULL,
    PRIMARY KEY (user_id, id)
);
";
