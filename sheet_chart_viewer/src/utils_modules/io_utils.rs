use crate::common::*;

#[doc = r#"
    Reads a TOML file and deserializes it into the requested structure.

    # Type Parameters
    * `T` - any `DeserializeOwned` configuration structure

    # Arguments
    * `file_path` - absolute or relative path of the TOML file

    # Errors
    - the file does not exist or cannot be read
    - the TOML is malformed or does not match `T`
"#]
pub fn read_toml_from_file<T: DeserializeOwned>(file_path: &str) -> Result<T, anyhow::Error> {
    let toml_content: String = fs::read_to_string(file_path)
        .with_context(|| format!("[read_toml_from_file] Failed to read '{}'", file_path))?;
    let toml: T = toml::from_str(&toml_content)
        .with_context(|| format!("[read_toml_from_file] Failed to parse '{}'", file_path))?;

    Ok(toml)
}

#[doc = "Reads an HTML template from the template directory"]
pub fn read_template(template_dir: &Path, template_name: &str) -> Result<String, anyhow::Error> {
    let template_path: PathBuf = template_dir.join(template_name);

    fs::read_to_string(&template_path).map_err(|e| {
        anyhow!(
            "[read_template] Failed to read template {:?}: {:?}",
            template_path,
            e
        )
    })
}

#[doc = "Removes a directory only when it is empty; a missing or non-empty directory is left alone"]
pub async fn remove_dir_if_empty(dir: &Path) -> Result<bool, std::io::Error> {
    let mut entries: tokio::fs::ReadDir = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e),
    };

    if entries.next_entry().await?.is_some() {
        return Ok(false);
    }

    tokio::fs::remove_dir(dir).await?;
    Ok(true)
}
