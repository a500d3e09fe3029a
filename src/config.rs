use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDB API key
    pub tmdb_api_key: String,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_base_url")]
    pub tmdb_base_url: String,

    /// OpenAI-compatible chat completions endpoint
    #[serde(default = "default_huggingface_api_url")]
    pub huggingface_api_url: String,

    /// Bearer token for the completions endpoint; empty means unauthenticated
    #[serde(default)]
    pub huggingface_api_key: String,

    /// Model identifier sent with every completion request
    #[serde(default = "default_huggingface_model")]
    pub huggingface_model: String,

    /// Deadline for a single completion request
    #[serde(default = "default_model_timeout_secs")]
    pub model_timeout_secs: u64,

    #[serde(default = "default_model_max_tokens")]
    pub model_max_tokens: u32,

    #[serde(default = "default_model_temperature")]
    pub model_temperature: f32,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_tmdb_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_huggingface_api_url() -> String {
    "https://router.huggingface.co/v1/chat/completions".to_string()
}

fn default_huggingface_model() -> String {
    "meta-llama/Llama-3.2-3B-Instruct:novita".to_string()
}

fn default_model_timeout_secs() -> u64 {
    60
}

fn default_model_max_tokens() -> u32 {
    2000
}

fn default_model_temperature() -> f32 {
    0.7
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from an explicit set of key/value pairs
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Config>(vars).map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Socket address the server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
