pub mod schema;

pub use schema::{AnalyticsConfig, ChatConfig, Config};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reexported_config_default_is_constructible() {
        let config = Config::default();

        assert!(config.chat.reply_delay_ms > 0);
        assert!(config.analytics.page_size > 0);
        assert!(!config.teams.is_empty());
    }
}
