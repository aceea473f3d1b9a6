use bytes::Bytes;
use mime::Mime;

#[derive(Debug, Clone)]
pub struct FileProperties {
    pub field_name: String,
    pub file_name: String,
    pub mime_type: Mime,
    pub data: Bytes,
}

impl FileProperties {
    pub fn is_image(&self) -> bool {
        self.mime_type.type_() == mime::IMAGE
    }
}
