use bytes::Bytes;

#[derive(Debug, Clone)]
pub struct InferenceOutput {
    pub bytes: Bytes,
    pub content_type: Option<String>,
    pub attempts: u32,
}
