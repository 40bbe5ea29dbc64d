use shared::ClientConfig;

/// Client configuration; `AGENDA_API_BASE_URL` at build time overrides the backend URL
pub fn client_config() -> ClientConfig {
    ClientConfig::from_override(option_env!("AGENDA_API_BASE_URL"))
}
