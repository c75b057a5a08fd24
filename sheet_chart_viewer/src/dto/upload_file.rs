use crate::common::*;

#[derive(Debug, Clone, Getters, new)]
#[getset(get = "pub")]
pub struct UploadFile {
    pub filename: String,
    pub content: Bytes,
}
