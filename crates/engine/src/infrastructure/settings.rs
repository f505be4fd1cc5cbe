//! Engine settings, loaded from the environment.
//!
//! Defaults match the production constants; every knob is overridable via
//! `BONDLING_*` environment variables for operational tuning.

/// Operational settings for the generation pipeline.
#[derive(Debug, Clone)]
pub struct EngineSettings {
    /// External image generation endpoint; empty disables hatching
    pub image_endpoint: String,
    /// External video generation endpoint; empty disables video jobs
    pub video_endpoint: String,
    /// Bearer token for the generation services
    pub api_key: Option<String>,
    /// Linear backoff base: wait `backoff_base_ms * attempt` between retries
    pub backoff_base_ms: u64,
    /// Per-call timeout race for video generation
    pub video_timeout_secs: u64,
    /// Pause between sequential video-state jobs (upstream rate limits)
    pub video_cooldown_secs: u64,
    /// Attempt budget for initial hatch images
    pub hatch_image_attempts: u32,
    /// Attempt budget for evolution/customize/video paths
    pub evolution_attempts: u32,
    /// Tokens seeded into a brand-new pet
    pub seed_tokens: u32,
    /// Explicit token-enforcement bypass. Never silent: logged at load and
    /// at every bypassed check.
    pub skip_token_checks: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            image_endpoint: String::new(),
            video_endpoint: String::new(),
            api_key: None,
            backoff_base_ms: 1_000,
            video_timeout_secs: 300,
            video_cooldown_secs: 10,
            hatch_image_attempts: 3,
            evolution_attempts: 2,
            seed_tokens: 3,
            skip_token_checks: false,
        }
    }
}

impl EngineSettings {
    /// Load settings from the environment, picking up `.env` if present.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        let defaults = Self::default();

        let settings = Self {
            image_endpoint: env_string("BONDLING_IMAGE_ENDPOINT")
                .unwrap_or(defaults.image_endpoint),
            video_endpoint: env_string("BONDLING_VIDEO_ENDPOINT")
                .unwrap_or(defaults.video_endpoint),
            api_key: env_string("BONDLING_API_KEY"),
            backoff_base_ms: env_parsed("BONDLING_BACKOFF_BASE_MS", defaults.backoff_base_ms),
            video_timeout_secs: env_parsed(
                "BONDLING_VIDEO_TIMEOUT_SECS",
                defaults.video_timeout_secs,
            ),
            video_cooldown_secs: env_parsed(
                "BONDLING_VIDEO_COOLDOWN_SECS",
                defaults.video_cooldown_secs,
            ),
            hatch_image_attempts: env_parsed(
                "BONDLING_HATCH_IMAGE_ATTEMPTS",
                defaults.hatch_image_attempts,
            ),
            evolution_attempts: env_parsed(
                "BONDLING_EVOLUTION_ATTEMPTS",
                defaults.evolution_attempts,
            ),
            seed_tokens: env_parsed("BONDLING_SEED_TOKENS", defaults.seed_tokens),
            skip_token_checks: env_flag("BONDLING_SKIP_TOKEN_CHECKS"),
        };

        if settings.skip_token_checks {
            tracing::warn!(
                "Evolution token enforcement is DISABLED via BONDLING_SKIP_TOKEN_CHECKS"
            );
        }

        settings
    }

    /// Whether the image generation service is configured. Hatching is
    /// skipped entirely when it is not.
    pub fn image_service_configured(&self) -> bool {
        !self.image_endpoint.is_empty()
    }

    pub fn video_service_configured(&self) -> bool {
        !self.video_endpoint.is_empty()
    }
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

fn env_parsed<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_flag(key: &str) -> bool {
    std::env::var(key)
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}
