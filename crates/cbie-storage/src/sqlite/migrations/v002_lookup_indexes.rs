//! v002: per-user lookup indexes.

pub const MIGRATION_SQL: &str = "
CREATE INDEX IF NOT EXISTS idx_prompts_user_ts ON prompts(user_id, timestamp);
CREATE INDEX IF NOT EXISTS idx_legacy_user ON legacy_behaviors(user_id);
";
