/// File received in a multipart request, fully buffered in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    /// Client-supplied file name.
    pub file_name: String,
    /// Client-supplied MIME type.
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn size(&self) -> i64 {
        self.bytes.len() as i64
    }

    /// Lowercased extension of the file name, if any.
    pub fn extension(&self) -> Option<String> {
        self.file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
    }

    /// Whether the file is a JPEG or PNG image, judged by MIME type or extension.
    pub fn is_supported_image(&self) -> bool {
        matches!(
            self.content_type.as_str(),
            "image/jpeg" | "image/jpg" | "image/png"
        ) || matches!(self.extension().as_deref(), Some("jpg" | "jpeg" | "png"))
    }

    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }
}
