use super::prelude::*;

const IMAGE_TYPES: &[(&str, &str)] = &[
    ("gif", "image/gif"),
    ("jpeg", "image/jpeg"),
    ("jpg", "image/jpeg"),
    ("png", "image/png"),
    ("webp", "image/webp"),
];

fn image_type(file_name: &str) -> Option<(&'static str, &'static str)> {
    let (_, ext) = file_name.rsplit_once('.')?;
    let ext = ext.to_lowercase();
    IMAGE_TYPES.iter().copied().find(|(e, _)| *e == ext)
}

/// Stores a new avatar image of the user and returns its public URL.
///
/// The profile itself is not modified.
pub fn upload_avatar<S: BlobStorage>(
    storage: &S,
    bucket: &str,
    user_id: &Id,
    file_name: &str,
    data: Vec<u8>,
) -> Result<String> {
    let (ext, content_type) = image_type(file_name).ok_or(Error::ImageFormat)?;
    if data.is_empty() {
        return Err(Error::EmptyImage);
    }
    let path = format!("{user_id}/{}.{ext}", Id::new());
    log::debug!("Uploading avatar {path} ({} bytes)", data.len());
    Ok(storage.upload(bucket, &path, content_type, data)?)
}
