use crate::common::*;

#[doc = "Where uploads are staged and chart documents are written, and how long they live"]
#[derive(Debug, Clone, Deserialize, Serialize, Getters, new)]
#[getset(get = "pub")]
pub struct StorageConfig {
    #[serde(default = "default_staging_dir")]
    pub staging_dir: PathBuf,
    #[serde(default = "default_chart_output_dir")]
    pub chart_output_dir: PathBuf,
    #[serde(default)]
    pub remove_staged_on_failure: bool,
    #[serde(default = "default_retention_sec")]
    pub retention_sec: u64,
    #[serde(default = "default_sweep_interval_sec")]
    pub sweep_interval_sec: u64,
}

fn default_staging_dir() -> PathBuf {
    PathBuf::from("./uploads")
}

fn default_chart_output_dir() -> PathBuf {
    PathBuf::from("./static/charts")
}

fn default_retention_sec() -> u64 {
    3600
}

fn default_sweep_interval_sec() -> u64 {
    300
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            staging_dir: default_staging_dir(),
            chart_output_dir: default_chart_output_dir(),
            remove_staged_on_failure: false,
            retention_sec: default_retention_sec(),
            sweep_interval_sec: default_sweep_interval_sec(),
        }
    }
}
