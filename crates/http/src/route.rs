//! Service routes and request URL construction

use reqwest::{Method, StatusCode, Url};

use dcloud_core::{Error, Result, parse_service_url};

/// Endpoints of the storage service's HTTP API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Route {
    Upload,
    Download,
    Files,
    Cluster,
}

impl Route {
    pub(crate) fn path(self) -> &'static str {
        match self {
            Route::Upload => "/api/upload",
            Route::Download => "/api/download",
            Route::Files => "/api/files",
            Route::Cluster => "/api/cluster",
        }
    }

    pub(crate) fn method(self) -> Method {
        match self {
            Route::Upload => Method::POST,
            Route::Download | Route::Files | Route::Cluster => Method::GET,
        }
    }

    /// Operation name used in log records
    pub(crate) fn label(self) -> &'static str {
        match self {
            Route::Upload => "upload",
            Route::Download => "download",
            Route::Files => "list",
            Route::Cluster => "cluster",
        }
    }

    /// Error for a non-successful response on this route.
    ///
    /// The download endpoint only fails when the object is absent, so its
    /// failures carry the not-found framing.
    pub(crate) fn status_error(self, status: StatusCode) -> Error {
        match self {
            Route::Download => Error::NotFound(status.as_u16()),
            _ => Error::Status(status.as_u16()),
        }
    }

    /// Full request URL with percent-encoded query values
    pub(crate) fn url(self, endpoint: &str, query: &[(&str, &str)]) -> Result<Url> {
        let mut raw = format!("{}{}", endpoint.trim_end_matches('/'), self.path());

        for (i, (key, value)) in query.iter().enumerate() {
            raw.push(if i == 0 { '?' } else { '&' });
            raw.push_str(key);
            raw.push('=');
            raw.push_str(&urlencoding::encode(value));
        }

        parse_service_url(endpoint, &raw)
    }
}
