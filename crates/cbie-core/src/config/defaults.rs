// Single source of truth for all default values.

// --- Scoring ---
pub const DEFAULT_ALPHA: f64 = 0.35;
pub const DEFAULT_BETA: f64 = 0.40;
pub const DEFAULT_GAMMA: f64 = 0.25;
pub const DEFAULT_REINFORCEMENT_MULTIPLIER: f64 = 0.01;
pub const DEFAULT_RECENCY_DECAY_CONSTANT: f64 = 0.01;
pub const DEFAULT_OBSERVATION_DECAY_RATE: f64 = 0.01;
pub const DEFAULT_PRIMARY_THRESHOLD: f64 = 0.8;
pub const DEFAULT_SECONDARY_THRESHOLD: f64 = 0.4;
pub const DEFAULT_CLARITY_TREND_BOOST: f64 = 0.1;

// --- Clustering ---
pub const DEFAULT_MIN_CLUSTER_SIZE: usize = 2;
pub const DEFAULT_MIN_SAMPLES: usize = 1;
pub const DEFAULT_CLUSTER_SELECTION_EPSILON: f64 = 0.15;
pub const DEFAULT_RECONCILE_MIN_SIMILARITY: f64 = 0.85;

// --- Labeling ---
pub const DEFAULT_MAX_LABEL_WORDS: usize = 8;
pub const DEFAULT_MAX_LABEL_SAMPLES: usize = 10;
pub const DEFAULT_MAX_NAME_WORDS: usize = 12;
pub const DEFAULT_MAX_NAME_SAMPLES: usize = 5;
pub const DEFAULT_LABEL_MAX_TOKENS: u32 = 30;
pub const DEFAULT_NAME_MAX_TOKENS: u32 = 40;
pub const DEFAULT_ARCHETYPE_MAX_TOKENS: u32 = 50;
pub const DEFAULT_LABEL_TEMPERATURE: f32 = 0.3;

// --- Embeddings ---
pub const DEFAULT_EMBEDDING_PROVIDER: &str = "tfidf";
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-large";
pub const DEFAULT_EMBEDDING_ENDPOINT: &str = "https://api.openai.com/v1/embeddings";
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 3072;
pub const DEFAULT_EMBEDDING_BATCH_SIZE: usize = 100;
pub const DEFAULT_EMBEDDING_CACHE_SIZE: u64 = 10_000;

// --- Generation ---
pub const DEFAULT_GENERATION_PROVIDER: &str = "none";
pub const DEFAULT_GENERATION_MODEL: &str = "gpt-4";
pub const DEFAULT_GENERATION_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// --- Storage ---
pub const DEFAULT_DB_FILENAME: &str = "cbie.db";
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5_000;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;
