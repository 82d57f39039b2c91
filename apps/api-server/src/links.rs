//! Absolute URL construction for hypermedia fields.

use actix_web::HttpRequest;
use url::Url;

use crate::handlers::API_PREFIX;
use crate::middleware::error::AppError;

/// Builds absolute links relative to the request being served.
///
/// The origin is `PUBLIC_BASE_URL` when configured, otherwise the scheme and
/// host the client used.
#[derive(Debug, Clone)]
pub struct PageLinks {
    current: Url,
}

impl PageLinks {
    pub fn from_request(req: &HttpRequest, public_base_url: Option<&str>) -> Result<Self, AppError> {
        let origin = match public_base_url {
            Some(base) => base.trim_end_matches('/').to_string(),
            None => {
                let info = req.connection_info();
                format!("{}://{}", info.scheme(), info.host())
            }
        };
        let path_and_query = req
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/");

        let current = Url::parse(&format!("{origin}{path_and_query}"))
            .map_err(|e| AppError::Internal(format!("Cannot build absolute URL: {e}")))?;
        Ok(Self { current })
    }

    /// The current URL with `page` replaced. Page 1 drops the parameter.
    ///
    /// Remaining parameters are emitted sorted by name.
    pub fn page_url(&self, page: u64) -> String {
        let mut pairs: Vec<(String, String)> = self
            .current
            .query_pairs()
            .filter(|(key, _)| key != "page")
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();
        if page > 1 {
            pairs.push(("page".to_string(), page.to_string()));
        }
        pairs.sort_by(|a, b| a.0.cmp(&b.0));

        let mut url = self.current.clone();
        if pairs.is_empty() {
            url.set_query(None);
        } else {
            url.query_pairs_mut().clear().extend_pairs(pairs);
        }
        url.into()
    }

    /// Absolute URL of a post's detail endpoint.
    pub fn detail_url(&self, slug: &str) -> String {
        let mut url = self.current.clone();
        url.set_query(None);
        url.set_fragment(None);
        url.set_path(&format!("{API_PREFIX}/posts/{slug}/"));
        url.into()
    }
}

#[cfg(test)]
mod tests {
    use actix_web::test::TestRequest;

    use super::*;

    fn links(uri: &str, base: Option<&str>) -> PageLinks {
        let req = TestRequest::get()
            .uri(uri)
            .insert_header(("host", "blog.test"))
            .to_http_request();
        PageLinks::from_request(&req, base).unwrap()
    }

    #[test]
    fn test_page_url_replaces_page() {
        let links = links("/api/v1/posts/?search=rust&page=2", None);
        assert_eq!(
            links.page_url(3),
            "http://blog.test/api/v1/posts/?page=3&search=rust"
        );
        assert_eq!(links.page_url(1), "http://blog.test/api/v1/posts/?search=rust");
    }

    #[test]
    fn test_page_one_without_other_params() {
        let links = links("/api/v1/posts/?page=2", None);
        assert_eq!(links.page_url(1), "http://blog.test/api/v1/posts/");
    }

    #[test]
    fn test_public_base_url_wins() {
        let links = links("/api/v1/posts/", Some("https://blog.example.com/"));
        assert_eq!(links.page_url(2), "https://blog.example.com/api/v1/posts/?page=2");
        assert_eq!(
            links.detail_url("hello-world"),
            "https://blog.example.com/api/v1/posts/hello-world/"
        );
    }

    #[test]
    fn test_detail_url_from_request_host() {
        let links = links("/api/v1/posts/?ordering=title", None);
        assert_eq!(links.detail_url("a-b"), "http://blog.test/api/v1/posts/a-b/");
    }
}
