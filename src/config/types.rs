use serde::Deserialize;

/// Browser identification sent with every page request.
///
/// The target site rejects default HTTP client identifiers, so this mimics a
/// desktop Chrome build.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Main configuration structure for Coinafrique Harvest
///
/// Every section has defaults, so an empty file (or no file at all) yields a
/// configuration that scrapes the four built-in animal categories.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scraper: ScraperConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub selectors: SelectorConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub datasets: DatasetsConfig,
    #[serde(rename = "category", default = "default_categories")]
    pub categories: Vec<CategoryEntry>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scraper: ScraperConfig::default(),
            user_agent: UserAgentConfig::default(),
            selectors: SelectorConfig::default(),
            output: OutputConfig::default(),
            datasets: DatasetsConfig::default(),
            categories: default_categories(),
        }
    }
}

/// Scrape loop behaviour
#[derive(Debug, Clone, Deserialize)]
pub struct ScraperConfig {
    /// Pause between two successive page fetches (milliseconds)
    #[serde(rename = "politeness-delay-ms", default = "default_politeness_delay_ms")]
    pub politeness_delay_ms: u64,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout-secs", default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Upper bound on pages per run
    #[serde(rename = "max-pages", default = "default_max_pages")]
    pub max_pages: u32,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            politeness_delay_ms: default_politeness_delay_ms(),
            request_timeout_secs: default_request_timeout_secs(),
            max_pages: default_max_pages(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    #[serde(default = "default_user_agent")]
    pub value: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            value: default_user_agent(),
        }
    }
}

/// CSS selectors locating a listing card and its fields
///
/// These are coupled to the site's current markup. When the layout changes,
/// patch them here rather than in the extractor.
#[derive(Debug, Clone, Deserialize)]
pub struct SelectorConfig {
    #[serde(default = "default_card_selector")]
    pub card: String,
    #[serde(default = "default_name_selector")]
    pub name: String,
    #[serde(default = "default_price_selector")]
    pub price: String,
    #[serde(default = "default_address_selector")]
    pub address: String,
    #[serde(default = "default_image_selector")]
    pub image: String,
    #[serde(rename = "image-attribute", default = "default_image_attribute")]
    pub image_attribute: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            card: default_card_selector(),
            name: default_name_selector(),
            price: default_price_selector(),
            address: default_address_selector(),
            image: default_image_selector(),
            image_attribute: default_image_attribute(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory the CSV exports are written to
    #[serde(rename = "export-dir", default = "default_export_dir")]
    pub export_dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            export_dir: default_export_dir(),
        }
    }
}

/// Previously stored datasets
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetsConfig {
    /// Cleaned aggregate file used by the dashboard
    #[serde(rename = "clean-path", default = "default_clean_path")]
    pub clean_path: String,

    /// Raw per-category files collected with an external scraper
    #[serde(default = "default_raw_datasets")]
    pub raw: Vec<DatasetEntry>,
}

impl Default for DatasetsConfig {
    fn default() -> Self {
        Self {
            clean_path: default_clean_path(),
            raw: default_raw_datasets(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatasetEntry {
    pub label: String,
    pub path: String,
}

/// A listing category on the site
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryEntry {
    pub label: String,
    pub url: String,
    #[serde(rename = "type")]
    pub type_tag: String,
}

fn default_politeness_delay_ms() -> u64 {
    1000
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_max_pages() -> u32 {
    10
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_card_selector() -> String {
    "div.col.s6.m4.l3".to_string()
}

fn default_name_selector() -> String {
    "p.ad__card-description".to_string()
}

fn default_price_selector() -> String {
    "p.ad__card-price".to_string()
}

fn default_address_selector() -> String {
    "p.ad__card-location".to_string()
}

fn default_image_selector() -> String {
    "img.ad__card-img".to_string()
}

fn default_image_attribute() -> String {
    "src".to_string()
}

fn default_export_dir() -> String {
    ".".to_string()
}

fn default_clean_path() -> String {
    "data/animaux_clean.csv".to_string()
}

fn default_raw_datasets() -> Vec<DatasetEntry> {
    [
        ("Les Moutons", "data/Mouton.csv"),
        ("Les Chiens", "data/Chien.csv"),
        ("Les Poules, Lapins et Pigeons", "data/Poules.csv"),
        ("Autres Animaux", "data/Autres.csv"),
    ]
    .into_iter()
    .map(|(label, path)| DatasetEntry {
        label: label.to_string(),
        path: path.to_string(),
    })
    .collect()
}

fn default_categories() -> Vec<CategoryEntry> {
    [
        (
            "Les Moutons",
            "https://sn.coinafrique.com/categorie/moutons",
            "mouton",
        ),
        (
            "Les Chiens",
            "https://sn.coinafrique.com/categorie/chiens",
            "chien",
        ),
        (
            "Les Poules, Lapins et Pigeons",
            "https://sn.coinafrique.com/categorie/poules-lapins-et-pigeons",
            "volaille",
        ),
        (
            "Autres Animaux",
            "https://sn.coinafrique.com/categorie/autres-animaux",
            "autre",
        ),
    ]
    .into_iter()
    .map(|(label, url, type_tag)| CategoryEntry {
        label: label.to_string(),
        url: url.to_string(),
        type_tag: type_tag.to_string(),
    })
    .collect()
}
