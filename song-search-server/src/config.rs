use eyre::WrapErr;

#[derive(Debug, Clone)]
pub(crate) struct Config {
    pub(crate) port: u16,
    pub(crate) sheet_url: String,
    pub(crate) cache_ttl_secs: u64,
    pub(crate) fetch_timeout_secs: u64,
}

impl Config {
    pub(crate) fn from_env() -> eyre::Result<Self> {
        let port = std::env::var("SEARCH_SERVER_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .wrap_err("SEARCH_SERVER_PORT must be a valid u16")?;
        let sheet_url = std::env::var("SHEET_URL").wrap_err("missing env var: SHEET_URL")?;
        let cache_ttl_secs = std::env::var("SHEET_CACHE_TTL_SECS")
            .unwrap_or_else(|_| "3600".to_string())
            .parse::<u64>()
            .wrap_err("SHEET_CACHE_TTL_SECS must be a number of seconds")?;
        let fetch_timeout_secs = std::env::var("SHEET_FETCH_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u64>()
            .wrap_err("SHEET_FETCH_TIMEOUT_SECS must be a number of seconds")?;

        Ok(Self {
            port,
            sheet_url,
            cache_ttl_secs,
            fetch_timeout_secs,
        })
    }
}
