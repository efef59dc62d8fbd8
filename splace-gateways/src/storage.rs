use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{header::CONTENT_TYPE, Method};
use splace_boundary::StoredObject;
use splace_core::gateways::{storage::BlobStorage, Result as GatewayResult};

use crate::{into_json, Error, HostedBackend};

const PATH_STORAGE: &str = "/storage/v1/object";

// Separators of the path segments are kept
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.');

pub fn object_path(bucket: &str, path: &str) -> String {
    let path = utf8_percent_encode(path.trim_start_matches('/'), PATH_SEGMENT);
    format!("{bucket}/{path}")
}

pub fn public_url(base_url: &str, bucket: &str, path: &str) -> String {
    format!("{base_url}{PATH_STORAGE}/public/{}", object_path(bucket, path))
}

impl BlobStorage for HostedBackend {
    fn upload(
        &self,
        bucket: &str,
        path: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> GatewayResult<String> {
        let url = format!("{}{PATH_STORAGE}/{}", self.url(), object_path(bucket, path));
        log::debug!("Uploading {} bytes to {bucket}", data.len());
        let response = self
            .request(Method::POST, &url)
            .header(CONTENT_TYPE, content_type)
            .body(data)
            .send()
            .map_err(Error::from)?;
        let stored: StoredObject = into_json(response)?;
        log::debug!("Stored object {}", stored.key);
        Ok(public_url(self.url(), bucket, path))
    }
}
