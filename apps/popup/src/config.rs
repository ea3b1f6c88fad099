use std::path::PathBuf;

const DEFAULT_API_BASE: &str = "https://salary-predictor-seven.vercel.app";
const STORE_DIR_NAME: &str = ".salary-predictor";

/// Popup configuration loaded from environment variables. Command-line flags
/// override it via [`Config::with_overrides`].
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base: String,
    pub store_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        Config {
            api_base: var("API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            store_dir: var("POPUP_STORE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(default_store_dir),
        }
    }

    pub fn with_overrides(mut self, api_base: Option<String>, store_dir: Option<PathBuf>) -> Self {
        if let Some(api_base) = api_base {
            self.api_base = api_base;
        }
        if let Some(store_dir) = store_dir {
            self.store_dir = store_dir;
        }
        self
    }
}

/// `$HOME/.salary-predictor`, or a relative `.salary-predictor` when no home
/// directory is known.
fn default_store_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(STORE_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(STORE_DIR_NAME))
}
