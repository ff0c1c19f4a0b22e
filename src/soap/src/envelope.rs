// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! SOAP 1.1 envelope rendering.

use crate::xml::Element;
use google_ads_auth::credentials::offline::Api;
use google_ads_gax::session::Session;

const SOAP_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// The user agent reported in every request header.
pub const LIBRARY_IDENTIFIER: &str = concat!("google-ads-rust/", env!("CARGO_PKG_VERSION"));

/// Builds the per-request SOAP header element for a session.
///
/// AdWords and Ad Manager use differently shaped `RequestHeader` elements;
/// both carry the library identifier so the services can attribute traffic.
/// `namespace` is the service's versioned namespace, which the header element
/// declares as its default.
pub fn request_header(session: &Session, namespace: &str) -> Element {
    let mut header = Element::new("RequestHeader").attr("xmlns", namespace);
    match session.api() {
        Api::AdWords => {
            if let Some(id) = session.client_customer_id() {
                header = header.leaf("clientCustomerId", id);
            }
            if let Some(token) = session.developer_token() {
                header = header.leaf("developerToken", token);
            }
            header = header.leaf("userAgent", LIBRARY_IDENTIFIER);
            header = header.leaf("validateOnly", session.validate_only().to_string());
            header = header.leaf("partialFailure", session.partial_failure().to_string());
        }
        Api::AdManager => {
            if let Some(code) = session.network_code() {
                header = header.leaf("networkCode", code);
            }
            let application_name = session
                .application_name()
                .map_or_else(|| LIBRARY_IDENTIFIER.to_string(), str::to_string);
            header = header.leaf(
                "applicationName",
                format!("{application_name} ({LIBRARY_IDENTIFIER})"),
            );
        }
    }
    header
}

/// Wraps a header and a body element in a SOAP 1.1 envelope.
pub fn envelope(header: &Element, body: &Element) -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8"?>"#,
            r#"<soapenv:Envelope xmlns:soapenv="{ns}">"#,
            "<soapenv:Header>{header}</soapenv:Header>",
            "<soapenv:Body>{body}</soapenv:Body>",
            "</soapenv:Envelope>"
        ),
        ns = SOAP_NS,
        header = header.render(),
        body = body.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use google_ads_auth::credentials::anonymous;

    type Result = anyhow::Result<()>;

    const TEST_NS: &str = "https://adwords.google.com/api/adwords/cm/v201809";

    #[test]
    fn adwords_header_fields() -> Result {
        let session = Session::builder(Api::AdWords)
            .with_credentials(anonymous::Builder::new().build())
            .with_client_customer_id("123-456-7890")
            .with_developer_token("test-developer-token")
            .with_partial_failure(true)
            .build()?;
        let header = request_header(&session, TEST_NS);
        assert_eq!(header.get_attr("xmlns"), Some(TEST_NS));
        assert_eq!(header.child_text("clientCustomerId"), "123-456-7890");
        assert_eq!(header.child_text("developerToken"), "test-developer-token");
        assert_eq!(header.child_text("userAgent"), LIBRARY_IDENTIFIER);
        assert_eq!(header.child_text("validateOnly"), "false");
        assert_eq!(header.child_text("partialFailure"), "true");
        Ok(())
    }

    #[test]
    fn admanager_header_fields() -> Result {
        let session = Session::builder(Api::AdManager)
            .with_credentials(anonymous::Builder::new().build())
            .with_network_code("12345678")
            .with_application_name("test-application")
            .build()?;
        let header = request_header(&session, TEST_NS);
        assert_eq!(header.child_text("networkCode"), "12345678");
        assert_eq!(
            header.child_text("applicationName"),
            format!("test-application ({LIBRARY_IDENTIFIER})")
        );
        assert!(header.get_child("developerToken").is_none());
        Ok(())
    }

    #[test]
    fn envelope_structure_round_trips() -> Result {
        let header = Element::new("RequestHeader").leaf("networkCode", "1");
        let body = Element::new("getPlacementsByStatement").attr("xmlns", TEST_NS);
        let xml = envelope(&header, &body);

        let root = Element::parse(&xml)?;
        assert_eq!(root.name(), "Envelope");
        assert_eq!(
            root.require_child("Header")?.child_text("RequestHeader"),
            ""
        );
        assert!(
            root.require_child("Body")?
                .get_child("getPlacementsByStatement")
                .is_some()
        );
        Ok(())
    }
}
