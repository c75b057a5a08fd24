#[doc = "Accepted upload formats, decided by the filename extension"]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    Xlsx,
    Xls,
    Csv,
}

impl SheetFormat {
    #[doc = r#"
        Detects the format from the last `.`-separated segment of the filename,
        ignoring ASCII case. A name without an extension, or with any other
        extension, yields `None`.
    "#]
    pub fn from_filename(filename: &str) -> Option<SheetFormat> {
        let (stem, extension) = filename.trim().rsplit_once('.')?;

        if stem.is_empty() {
            return None;
        }

        match extension.to_ascii_lowercase().as_str() {
            "xlsx" => Some(SheetFormat::Xlsx),
            "xls" => Some(SheetFormat::Xls),
            "csv" => Some(SheetFormat::Csv),
            _ => None,
        }
    }
}
