//! Offset-based walking of paginated list endpoints.

use tracing::{debug, warn};

use super::envelope::{PageEnvelope, Resource};
use super::error::{ApiError, Result};
use super::request::RequestSpec;
use super::response::{decode, GET_OK};
use super::transport::Transport;

/// The query parameter carrying the index of the first item of a page.
const OFFSET_PARAM: &str = "offset";

/// Fetch every page of a list endpoint and concatenate the items.
///
/// Before each request the `offset` parameter is set to the number of items
/// collected so far, overriding any configured offset. Pages are fetched one
/// after another until the server's `total_count` is reached. At least one
/// request is made. A failing page discards everything collected before it.
///
/// A page with no items before `total_count` is reached fails with
/// [`ApiError::IncompletePage`] instead of looping.
pub fn fetch_all<T: Resource>(transport: &dyn Transport, mut request: RequestSpec) -> Result<Vec<T>> {
    let mut items: Vec<T> = Vec::new();

    loop {
        request.set_query_param(OFFSET_PARAM, &items.len().to_string());

        let response = transport.execute(&request)?;
        let page: PageEnvelope<T> = decode(response, GET_OK, None)?;
        let received = page.items.len();
        items.extend(page.items);

        debug!(
            kind = T::KIND,
            received,
            collected = items.len(),
            total_count = page.total_count,
            "Fetched page"
        );

        if items.len() as u64 >= page.total_count {
            break;
        }
        if received == 0 {
            warn!(
                kind = T::KIND,
                collected = items.len(),
                total_count = page.total_count,
                "Empty page before total_count was reached"
            );
            return Err(ApiError::IncompletePage {
                kind: T::KIND.to_string(),
                collected: items.len(),
                total_count: page.total_count,
            });
        }
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::transport::testing::ScriptedTransport;
    use reqwest::{Method, StatusCode};
    use serde::Deserialize;
    use url::Url;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Widget {
        id: u64,
    }

    impl Resource for Widget {
        const KIND: &'static str = "widget";
        const SINGULAR: &'static str = "widget";
        const PLURAL: &'static str = "widgets";
    }

    fn page(ids: &[u64], total_count: u64) -> String {
        let widgets: Vec<String> = ids.iter().map(|id| format!(r#"{{"id":{}}}"#, id)).collect();
        format!(
            r#"{{"widgets":[{}],"total_count":{},"limit":2}}"#,
            widgets.join(","),
            total_count
        )
    }

    fn list_request(query: &str) -> RequestSpec {
        let url = format!("http://localhost/widgets.json{}", query);
        RequestSpec::new(Method::GET, Url::parse(&url).unwrap())
    }

    fn offsets(transport: &ScriptedTransport) -> Vec<String> {
        transport
            .requests()
            .iter()
            .map(|r| r.query_param("offset").unwrap_or_default())
            .collect()
    }

    #[test]
    fn test_single_page() {
        let transport = ScriptedTransport::new().respond(StatusCode::OK, page(&[1, 2], 2));

        let widgets: Vec<Widget> = fetch_all(&transport, list_request("?limit=2")).unwrap();

        assert_eq!(widgets, vec![Widget { id: 1 }, Widget { id: 2 }]);
        assert_eq!(offsets(&transport), vec!["0"]);
    }

    #[test]
    fn test_empty_collection_makes_one_request() {
        let transport = ScriptedTransport::new().respond(StatusCode::OK, page(&[], 0));

        let widgets: Vec<Widget> = fetch_all(&transport, list_request("")).unwrap();

        assert!(widgets.is_empty());
        assert_eq!(transport.request_count(), 1);
    }

    #[test]
    fn test_uneven_pages_in_order() {
        let transport = ScriptedTransport::new()
            .respond(StatusCode::OK, page(&[1, 2], 5))
            .respond(StatusCode::OK, page(&[3, 4], 5))
            .respond(StatusCode::OK, page(&[5], 5));

        let widgets: Vec<Widget> = fetch_all(&transport, list_request("?limit=2")).unwrap();

        let ids: Vec<u64> = widgets.iter().map(|w| w.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert_eq!(offsets(&transport), vec!["0", "2", "4"]);
    }

    #[test]
    fn test_configured_offset_is_overridden() {
        let transport = ScriptedTransport::new()
            .respond(StatusCode::OK, page(&[1, 2], 3))
            .respond(StatusCode::OK, page(&[3], 3));

        let _: Vec<Widget> =
            fetch_all(&transport, list_request("?limit=2&offset=10&key=tok")).unwrap();

        let requests = transport.requests();
        assert_eq!(
            requests[0].url.as_str(),
            "http://localhost/widgets.json?limit=2&offset=0&key=tok"
        );
        assert_eq!(
            requests[1].url.as_str(),
            "http://localhost/widgets.json?limit=2&offset=2&key=tok"
        );
    }

    #[test]
    fn test_failing_page_discards_partial_results() {
        let transport = ScriptedTransport::new()
            .respond(StatusCode::OK, page(&[1, 2], 4))
            .respond(StatusCode::SERVICE_UNAVAILABLE, "");

        let err = fetch_all::<Widget>(&transport, list_request("?limit=2")).unwrap_err();

        assert!(matches!(
            err,
            ApiError::Status { status } if status == StatusCode::SERVICE_UNAVAILABLE
        ));
        assert_eq!(transport.request_count(), 2);
    }

    #[test]
    fn test_empty_page_before_total_is_error() {
        let transport = ScriptedTransport::new()
            .respond(StatusCode::OK, page(&[1], 3))
            .respond(StatusCode::OK, page(&[], 3));

        let err = fetch_all::<Widget>(&transport, list_request("")).unwrap_err();

        assert!(matches!(
            err,
            ApiError::IncompletePage { collected: 1, total_count: 3, .. }
        ));
        assert_eq!(err.to_string(), "incomplete listing of widget: got 1 of 3 items");
        assert_eq!(transport.request_count(), 2);
    }

    #[test]
    fn test_shrinking_total_count_stops_walk() {
        let transport = ScriptedTransport::new()
            .respond(StatusCode::OK, page(&[1, 2], 5))
            .respond(StatusCode::OK, page(&[3], 3));

        let widgets: Vec<Widget> = fetch_all(&transport, list_request("?limit=2")).unwrap();

        let ids: Vec<u64> = widgets.iter().map(|w| w.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(transport.request_count(), 2);
    }

    #[test]
    fn test_malformed_page_is_decode_error() {
        let transport = ScriptedTransport::new().respond(StatusCode::OK, r#"{"widgets":[]}"#);

        let err = fetch_all::<Widget>(&transport, list_request("")).unwrap_err();

        assert!(matches!(err, ApiError::Decode(_)));
    }
}
