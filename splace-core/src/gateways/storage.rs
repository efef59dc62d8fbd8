use super::Result;

pub trait BlobStorage {
    /// Stores the object and returns its public URL.
    fn upload(&self, bucket: &str, path: &str, content_type: &str, data: Vec<u8>)
        -> Result<String>;
}
