use std::path::Path;

use envconfig::Envconfig;

#[derive(Envconfig, Debug, Clone)]
pub struct Config {
    /// JSON snapshot of prescriptions read by the CLI and written by `seed`.
    #[envconfig(from = "CLINIC_DATA_PATH", default = "prescriptions.json")]
    pub data_path: String,

    /// Number of records listed under "recent" on the dashboard.
    #[envconfig(from = "CLINIC_RECENT_LIMIT", default = "5")]
    pub recent_limit: usize,

    #[envconfig(from = "CLINIC_SEED_COUNT", default = "25")]
    pub seed_count: usize,
}

impl Config {
    pub fn data_path(&self) -> &Path {
        Path::new(&self.data_path)
    }
}
