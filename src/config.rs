use serde::Deserialize;

use crate::services::{
    features::{
        FeatureWeights, DEFAULT_AUDIO_WEIGHT, DEFAULT_GENRE_WEIGHT, DEFAULT_KEY_WEIGHT,
        DEFAULT_MODE_WEIGHT, DEFAULT_OPINION_WEIGHT, DEFAULT_POLARIZATION_WEIGHT,
        DEFAULT_POPULARITY_WEIGHT,
    },
    sorting::{SortMethod, DEFAULT_TOP_K},
};

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Path of the reference catalog CSV
    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,

    /// Sort strategy used when a request does not name one ("heap" or "merge")
    #[serde(default = "default_sort_method")]
    pub default_sort_method: String,

    /// Number of recommendations returned when a request does not set a limit
    #[serde(default = "default_recommendation_limit")]
    pub recommendation_limit: usize,

    #[serde(default = "default_weight_opinion")]
    pub weight_opinion: f64,

    #[serde(default = "default_weight_polarization")]
    pub weight_polarization: f64,

    #[serde(default = "default_weight_key")]
    pub weight_key: f64,

    #[serde(default = "default_weight_mode")]
    pub weight_mode: f64,

    #[serde(default = "default_weight_genre")]
    pub weight_genre: f64,

    #[serde(default = "default_weight_popularity")]
    pub weight_popularity: f64,

    /// Weight of each audio descriptor column
    #[serde(default = "default_weight_audio")]
    pub weight_audio: f64,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_catalog_path() -> String {
    "data/small_data.csv".to_string()
}

fn default_sort_method() -> String {
    SortMethod::default().to_string()
}

fn default_recommendation_limit() -> usize {
    DEFAULT_TOP_K
}

fn default_weight_opinion() -> f64 {
    DEFAULT_OPINION_WEIGHT
}

fn default_weight_polarization() -> f64 {
    DEFAULT_POLARIZATION_WEIGHT
}

fn default_weight_key() -> f64 {
    DEFAULT_KEY_WEIGHT
}

fn default_weight_mode() -> f64 {
    DEFAULT_MODE_WEIGHT
}

fn default_weight_genre() -> f64 {
    DEFAULT_GENRE_WEIGHT
}

fn default_weight_popularity() -> f64 {
    DEFAULT_POPULARITY_WEIGHT
}

fn default_weight_audio() -> f64 {
    DEFAULT_AUDIO_WEIGHT
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = envy::from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        self.sort_method()?;

        let weights = self.feature_weights();
        let all = [
            ("WEIGHT_OPINION", weights.opinion),
            ("WEIGHT_POLARIZATION", weights.polarization),
            ("WEIGHT_KEY", weights.key),
            ("WEIGHT_MODE", weights.mode),
            ("WEIGHT_GENRE", weights.genre),
            ("WEIGHT_POPULARITY", weights.popularity),
            ("WEIGHT_AUDIO", weights.audio),
        ];
        for (name, value) in all {
            if !value.is_finite() || value < 0.0 {
                anyhow::bail!("{} must be a non-negative number, got {}", name, value);
            }
        }

        Ok(())
    }

    /// Default sort strategy
    pub fn sort_method(&self) -> anyhow::Result<SortMethod> {
        self.default_sort_method
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid DEFAULT_SORT_METHOD: {}", e))
    }

    pub fn feature_weights(&self) -> FeatureWeights {
        FeatureWeights {
            opinion: self.weight_opinion,
            polarization: self.weight_polarization,
            key: self.weight_key,
            mode: self.weight_mode,
            genre: self.weight_genre,
            popularity: self.weight_popularity,
            audio: self.weight_audio,
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
