use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_http_port")]
    pub http_port: u16,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// CORS allowed origins; empty allows all origins (development mode).
    #[serde(default)]
    pub cors_allowed_origins: Vec<String>,

    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub weather: WeatherConfig,
    #[serde(default)]
    pub alert_poll: AlertPollConfig,
    #[serde(default)]
    pub assistant: AssistantConfig,
    #[serde(default)]
    pub sms: SmsConfig,
    #[serde(default)]
    pub notify: NotifyConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: default_http_port(),
            data_dir: default_data_dir(),
            cors_allowed_origins: Vec::new(),
            database: DatabaseConfig::default(),
            weather: WeatherConfig::default(),
            alert_poll: AlertPollConfig::default(),
            assistant: AssistantConfig::default(),
            sms: SmsConfig::default(),
            notify: NotifyConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }
}

fn default_http_port() -> u16 {
    8080
}

fn default_data_dir() -> String {
    "data".to_string()
}

/// Reads a secret from config first, then the named environment variable.
/// Empty strings count as absent so a blank template line never masks the
/// environment.
fn resolve_secret(configured: &Option<String>, env_var: &str) -> Option<String> {
    configured
        .clone()
        .filter(|v| !v.is_empty())
        .or_else(|| std::env::var(env_var).ok().filter(|v| !v.is_empty()))
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Connection URL for the hosted database. Falls back to DATABASE_URL,
    /// then to a local SQLite file under the data directory.
    #[serde(default)]
    pub url: Option<String>,
}

impl DatabaseConfig {
    pub fn connection_url(&self, data_dir: &str) -> String {
        resolve_secret(&self.url, "DATABASE_URL")
            .unwrap_or_else(|| format!("sqlite://{data_dir}/floodwatch.db?mode=rwc"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Provider API key; falls back to OPENWEATHER_API_KEY.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
    /// Default query coordinate (Oshakati).
    #[serde(default = "default_weather_lat")]
    pub default_lat: f64,
    #[serde(default = "default_weather_lon")]
    pub default_lon: f64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            default_lat: default_weather_lat(),
            default_lon: default_weather_lon(),
        }
    }
}

impl WeatherConfig {
    pub fn resolved_api_key(&self) -> Option<String> {
        resolve_secret(&self.api_key, "OPENWEATHER_API_KEY")
    }
}

fn default_weather_lat() -> f64 {
    -17.788
}

fn default_weather_lon() -> f64 {
    15.699
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertPollConfig {
    #[serde(default = "default_alert_poll_enabled")]
    pub enabled: bool,
    /// Seconds between poll cycles.
    #[serde(default = "default_alert_poll_tick_secs")]
    pub tick_secs: u64,
    /// Basin coordinate for the discharge forecast (Cuvelai).
    #[serde(default = "default_basin_lat")]
    pub latitude: f64,
    #[serde(default = "default_basin_lon")]
    pub longitude: f64,
    /// Discharge (m³/s) above which the forecast alert is synthesized.
    #[serde(default = "default_discharge_threshold")]
    pub discharge_threshold: f64,
    #[serde(default = "default_region_keywords")]
    pub region_keywords: Vec<String>,
    /// Recent-list cap for the merged feed.
    #[serde(default = "default_max_recent")]
    pub max_recent: usize,
    #[serde(default)]
    pub gdacs_url: Option<String>,
    #[serde(default)]
    pub flood_api_base_url: Option<String>,
}

impl Default for AlertPollConfig {
    fn default() -> Self {
        Self {
            enabled: default_alert_poll_enabled(),
            tick_secs: default_alert_poll_tick_secs(),
            latitude: default_basin_lat(),
            longitude: default_basin_lon(),
            discharge_threshold: default_discharge_threshold(),
            region_keywords: default_region_keywords(),
            max_recent: default_max_recent(),
            gdacs_url: None,
            flood_api_base_url: None,
        }
    }
}

fn default_alert_poll_enabled() -> bool {
    true
}

fn default_alert_poll_tick_secs() -> u64 {
    600 // Every 10 minutes
}

fn default_basin_lat() -> f64 {
    -17.78
}

fn default_basin_lon() -> f64 {
    15.7
}

fn default_discharge_threshold() -> f64 {
    400.0
}

fn default_region_keywords() -> Vec<String> {
    vec!["namibia".to_string()]
}

fn default_max_recent() -> usize {
    20
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    #[serde(default = "default_assistant_enabled")]
    pub enabled: bool,
    /// Provider API key; falls back to XAI_API_KEY.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub max_tokens: Option<usize>,
    #[serde(default)]
    pub temperature: Option<f32>,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            enabled: default_assistant_enabled(),
            api_key: None,
            model: None,
            base_url: None,
            timeout_secs: None,
            max_tokens: None,
            temperature: None,
        }
    }
}

impl AssistantConfig {
    pub fn resolved_api_key(&self) -> Option<String> {
        resolve_secret(&self.api_key, "XAI_API_KEY")
    }
}

fn default_assistant_enabled() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmsConfig {
    #[serde(default = "default_sms_enabled")]
    pub enabled: bool,
    /// Gateway account; falls back to AFRICASTALKING_USERNAME.
    #[serde(default)]
    pub username: Option<String>,
    /// Gateway key; falls back to AFRICASTALKING_API_KEY.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_sms_sender_id")]
    pub sender_id: String,
    #[serde(default)]
    pub gateway_url: Option<String>,
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            enabled: default_sms_enabled(),
            username: None,
            api_key: None,
            sender_id: default_sms_sender_id(),
            gateway_url: None,
        }
    }
}

impl SmsConfig {
    pub fn resolved_username(&self) -> Option<String> {
        resolve_secret(&self.username, "AFRICASTALKING_USERNAME")
    }

    pub fn resolved_api_key(&self) -> Option<String> {
        resolve_secret(&self.api_key, "AFRICASTALKING_API_KEY")
    }
}

fn default_sms_enabled() -> bool {
    true
}

fn default_sms_sender_id() -> String {
    "FloodGIS".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyConfig {
    /// Push-relay endpoints receiving every new alert item.
    #[serde(default)]
    pub webhook_urls: Vec<String>,
    /// Minimum severity for the webhook route.
    #[serde(default = "default_webhook_min_severity")]
    pub webhook_min_severity: String,
    /// Static SMS recipients for scheduler-driven notifications; empty
    /// disables the route (broadcasts use the subscriber table instead).
    #[serde(default)]
    pub sms_recipients: Vec<String>,
    /// Minimum severity for the scheduler SMS route.
    #[serde(default = "default_sms_min_severity")]
    pub sms_min_severity: String,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            webhook_urls: Vec::new(),
            webhook_min_severity: default_webhook_min_severity(),
            sms_recipients: Vec::new(),
            sms_min_severity: default_sms_min_severity(),
        }
    }
}

fn default_webhook_min_severity() -> String {
    "low".to_string()
}

fn default_sms_min_severity() -> String {
    "high".to_string()
}
