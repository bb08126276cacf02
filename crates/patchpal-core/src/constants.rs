//! patchpal: centralized constants.
//! Model names, endpoints, markers and canned conversation text live here.

// ─── Models ───────────────────────────────────────────────────────────────────

pub mod models {
    /// Primary model used for the conversation by default.
    pub const GPT_4: &str = "gpt-4";
    /// Cheaper tier: selectable as the primary model, always used for the
    /// whole-file rewrite fallback.
    pub const GPT_3_5_TURBO: &str = "gpt-3.5-turbo";

    pub const DEFAULT_MAIN_MODEL: &str = GPT_4;
    pub const DEFAULT_WEAK_MODEL: &str = GPT_3_5_TURBO;
}

// ─── API Endpoints ────────────────────────────────────────────────────────────

pub mod endpoints {
    pub const OPENAI_BASE_URL: &str = "https://api.openai.com";
    pub const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";
    pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";
}

// ─── Edit block markers ───────────────────────────────────────────────────────

pub mod markers {
    pub const ORIGINAL: &str = "<<<<<<< ORIGINAL";
    pub const DIVIDER: &str = "=======";
    pub const UPDATED: &str = ">>>>>>> UPDATED";
    pub const FENCE: &str = "```";
}

// ─── Conversation ─────────────────────────────────────────────────────────────

pub mod conversation {
    /// Assistant acknowledgement injected after every synthetic user notice.
    pub const ACK: &str = "Ok.";
}

// ─── Config Paths ─────────────────────────────────────────────────────────────

pub mod paths {
    pub const CONFIG_DIR: &str = "patchpal";
    pub const CONFIG_FILE: &str = "config.toml";
}
