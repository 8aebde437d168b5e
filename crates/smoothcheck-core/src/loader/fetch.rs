//! Single manifest GET over libcurl.

use std::time::Duration;

use super::LoadError;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Fetches the manifest body. Follows redirects; non-2xx is an error.
pub(super) fn fetch_manifest(url: &str) -> Result<Vec<u8>, LoadError> {
    let curl_err = |source: curl::Error| LoadError::Fetch {
        url: url.to_string(),
        source,
    };

    let mut body: Vec<u8> = Vec::new();
    let mut easy = curl::easy::Easy::new();
    easy.url(url).map_err(curl_err)?;
    easy.follow_location(true).map_err(curl_err)?;
    easy.connect_timeout(CONNECT_TIMEOUT).map_err(curl_err)?;
    easy.timeout(REQUEST_TIMEOUT).map_err(curl_err)?;

    {
        let mut transfer = easy.transfer();
        transfer
            .write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })
            .map_err(curl_err)?;
        transfer.perform().map_err(curl_err)?;
    }

    let status = easy.response_code().map_err(curl_err)?;
    if !(200..300).contains(&status) {
        return Err(LoadError::Http {
            url: url.to_string(),
            status,
        });
    }

    Ok(body)
}
