use crate::common::*;

#[derive(Debug, Clone, Deserialize, Serialize, Getters, new)]
#[getset(get = "pub")]
pub struct ChartConfig {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default = "default_category_column")]
    pub category_column: String,
    #[serde(default = "default_value_column")]
    pub value_column: String,
    #[serde(default = "default_html_template_dir")]
    pub html_template_dir: PathBuf,
}

fn default_width() -> u32 {
    1400
}

fn default_height() -> u32 {
    700
}

fn default_category_column() -> String {
    "Category".to_string()
}

fn default_value_column() -> String {
    "Value".to_string()
}

fn default_html_template_dir() -> PathBuf {
    PathBuf::from("./html")
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            category_column: default_category_column(),
            value_column: default_value_column(),
            html_template_dir: default_html_template_dir(),
        }
    }
}
