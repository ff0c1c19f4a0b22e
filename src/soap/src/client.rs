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

//! The HTTP side of the SOAP transport.

use crate::envelope;
use crate::xml::Element;
use google_ads_gax::error::{ApiError, ApiFault, Error};
use google_ads_gax::session::Session;
use http::header::CONTENT_TYPE;
use std::time::Duration;

/// Posts SOAP envelopes to one Ads API endpoint.
///
/// The client is cheap to clone; the underlying connection pool is shared
/// between clones. One client serves every service of its session's API, the
/// service path varies per call.
#[derive(Clone, Debug)]
pub struct SoapClient {
    session: Session,
    inner: reqwest::Client,
    timeout: Option<Duration>,
}

impl SoapClient {
    /// Creates a client for the session's endpoint.
    pub fn new(session: Session) -> Self {
        Self {
            session,
            inner: reqwest::Client::new(),
            timeout: None,
        }
    }

    /// Sets a per-request deadline. Requests past it fail with
    /// [Error::timeout]; they are never retried.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The session this client was built from.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Posts one operation to a service and returns its response element.
    ///
    /// `path` is the service path under the session endpoint, `action` the
    /// `SOAPAction` header value, and `namespace` the versioned namespace the
    /// request header and `body` are written in. On success the returned
    /// element is the operation response inside the SOAP body, e.g.
    /// `getResponse`.
    ///
    /// # Errors
    ///
    /// SOAP faults surface as [Error::service] with the parsed fault detail.
    /// Everything below that level maps onto [Error::authentication],
    /// [Error::timeout], [Error::transport], or [Error::deser].
    pub async fn call(
        &self,
        path: &str,
        action: &str,
        namespace: &str,
        body: Element,
    ) -> Result<Element, Error> {
        let url = self
            .session
            .endpoint()
            .join(path)
            .map_err(Error::configuration)?;
        let auth_headers = self
            .session
            .credentials()
            .headers()
            .await
            .map_err(Error::authentication)?;

        let header = envelope::request_header(&self.session, namespace);
        let payload = envelope::envelope(&header, &body);
        tracing::debug!(%url, action, bytes = payload.len(), "posting SOAP request");

        let mut builder = self
            .inner
            .post(url)
            .header(CONTENT_TYPE, "text/xml; charset=utf-8")
            .header("SOAPAction", format!("\"{action}\""))
            .body(payload);
        for (name, value) in auth_headers {
            builder = builder.header(name, value);
        }
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        let text = response.text().await.map_err(map_reqwest_error)?;

        // Faults arrive with a non-success status but a well-formed body, so
        // look for a fault first and fall back to the status line.
        match Element::parse(&text) {
            Ok(root) => {
                if let Some(fault) = root
                    .get_child("Body")
                    .and_then(|body| body.get_child("Fault"))
                {
                    return Err(Error::service(parse_fault(fault)));
                }
                // Non-fault XML on an error status, e.g. an XHTML page
                // served by an intermediary.
                if !status.is_success() {
                    return Err(http_status_error(status, &text));
                }
                root.require_child("Body")?
                    .all_children()
                    .first()
                    .cloned()
                    .ok_or_else(|| Error::deser("the SOAP body carries no response element"))
            }
            Err(_) if !status.is_success() => Err(http_status_error(status, &text)),
            Err(e) => Err(e),
        }
    }
}

fn http_status_error(status: reqwest::StatusCode, body: &str) -> Error {
    Error::transport(format!(
        "HTTP {status}: {}",
        body.chars().take(256).collect::<String>()
    ))
}

/// Pairs a request's XML rendering with its response parsing.
///
/// The service crates implement this once per operation shape; the client
/// then drives the whole exchange with [SoapClient::invoke].
pub trait SoapBody {
    /// The parsed result of the operation.
    type Output;

    /// The operation name, also sent as the `SOAPAction` value.
    fn action(&self) -> &'static str;

    /// Renders the operation element, declared in `namespace`.
    fn to_body(&self, namespace: &str) -> Element;

    /// Parses the operation response element, e.g. `getResponse`.
    fn from_response(&self, response: &Element) -> Result<Self::Output, Error>;
}

impl SoapClient {
    /// Posts one typed operation and parses its response.
    pub async fn invoke<B: SoapBody>(
        &self,
        path: &str,
        namespace: &str,
        request: &B,
    ) -> Result<B::Output, Error> {
        let response = self
            .call(path, request.action(), namespace, request.to_body(namespace))
            .await?;
        request.from_response(&response)
    }
}

fn map_reqwest_error(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::timeout(e)
    } else {
        Error::transport(e)
    }
}

/// Parses a `soap:Fault` element into the fault details.
fn parse_fault(fault: &Element) -> ApiFault {
    let parsed = ApiFault::new(fault.child_text("faultcode"), fault.child_text("faultstring"));
    let Some(detail) = fault.get_child("detail") else {
        return parsed;
    };
    parsed.set_errors(detail.descendants("errors").into_iter().map(api_error_from))
}

/// Parses one service error element, as found in fault details and in the
/// `partialFailureErrors` of a mutate response.
pub fn api_error_from(element: &Element) -> ApiError {
    // Some versions carry the concrete type in `ApiError.Type`, others only
    // in the `xsi:type` attribute.
    let error_type = match element.child_text("ApiError.Type") {
        "" => element.get_attr("type").unwrap_or_default(),
        t => t,
    };
    ApiError::new(error_type, element.child_text("errorString"))
        .set_field_path(element.child_text("fieldPath"))
        .set_trigger(element.child_text("trigger"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use google_ads_auth::credentials::anonymous;
    use google_ads_auth::credentials::offline::Api;
    use httptest::{Expectation, Server, matchers::*, responders::*};

    type Result = anyhow::Result<()>;

    const TEST_NS: &str = "https://adwords.google.com/api/adwords/cm/v201809";

    fn client(server: &Server) -> SoapClient {
        let session = Session::builder(Api::AdWords)
            .with_credentials(anonymous::Builder::new().build())
            .with_endpoint(server.url_str(""))
            .with_developer_token("test-developer-token")
            .build()
            .unwrap();
        SoapClient::new(session)
    }

    fn soap(inner: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
            <soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
              <soap:Header/>
              <soap:Body>{inner}</soap:Body>
            </soap:Envelope>"#
        )
    }

    #[tokio::test]
    async fn success_returns_the_response_element() -> Result {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("POST", "/api/adwords/cm/v201809/CampaignSharedSetService"),
                request::headers(contains(("soapaction", "\"get\""))),
                request::headers(contains(("content-type", "text/xml; charset=utf-8"))),
                request::body(matches("developerToken>test-developer-token<")),
                request::body(matches("serviceSelector")),
            ])
            .respond_with(status_code(200).body(soap(
                "<getResponse xmlns=\"https://adwords.google.com/api/adwords/cm/v201809\">\
                 <rval><totalNumEntries>0</totalNumEntries></rval></getResponse>",
            ))),
        );

        let body = Element::new("get")
            .attr("xmlns", TEST_NS)
            .child(Element::new("serviceSelector").leaf("fields", "Id"));
        let response = client(&server)
            .call(
                "/api/adwords/cm/v201809/CampaignSharedSetService",
                "get",
                TEST_NS,
                body,
            )
            .await?;
        assert_eq!(response.name(), "getResponse");
        assert_eq!(
            response.require_child("rval")?.child_text("totalNumEntries"),
            "0"
        );
        Ok(())
    }

    #[tokio::test]
    async fn fault_becomes_a_service_error() -> Result {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("POST", "/svc")).respond_with(
                status_code(500).body(soap(
                    r#"<soap:Fault xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
                      <faultcode>soap:Server</faultcode>
                      <faultstring>[CriterionError.INVALID @ operations[0]]</faultstring>
                      <detail>
                        <ApiExceptionFault xmlns="https://adwords.google.com/api/adwords/cm/v201809"
                            xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
                          <message>[CriterionError.INVALID @ operations[0]]</message>
                          <errors xsi:type="CriterionError">
                            <fieldPath>operations[0].operand</fieldPath>
                            <trigger>bad keyword</trigger>
                            <errorString>CriterionError.INVALID</errorString>
                          </errors>
                        </ApiExceptionFault>
                      </detail>
                    </soap:Fault>"#,
                )),
            ),
        );

        let error = client(&server)
            .call("/svc", "mutate", TEST_NS, Element::new("mutate"))
            .await
            .unwrap_err();
        let fault = error.fault().expect("expected a service fault");
        assert_eq!(fault.fault_code(), "soap:Server");
        assert_eq!(fault.errors().len(), 1);
        let detail = &fault.errors()[0];
        assert_eq!(detail.error_type(), "CriterionError");
        assert_eq!(detail.error_string(), "CriterionError.INVALID");
        assert_eq!(detail.operation_index(), Some(0));
        assert_eq!(detail.trigger(), "bad keyword");
        Ok(())
    }

    #[tokio::test]
    async fn http_error_without_xml_is_transport() -> Result {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("POST", "/svc"))
                .respond_with(status_code(502).body("bad gateway")),
        );

        let error = client(&server)
            .call("/svc", "get", TEST_NS, Element::new("get"))
            .await
            .unwrap_err();
        assert!(error.is_transport(), "{error:?}");
        let source = format!("{:?}", std::error::Error::source(&error));
        assert!(source.contains("502"), "{source}");
        Ok(())
    }

    #[tokio::test]
    async fn http_error_with_non_fault_xml_is_transport() -> Result {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("POST", "/svc")).respond_with(
                status_code(503)
                    .body("<html><head/><body>Service Temporarily Unavailable</body></html>"),
            ),
        );

        let error = client(&server)
            .call("/svc", "get", TEST_NS, Element::new("get"))
            .await
            .unwrap_err();
        assert!(error.is_transport(), "{error:?}");
        let source = format!("{:?}", std::error::Error::source(&error));
        assert!(source.contains("503"), "{source}");
        assert!(source.contains("Service Temporarily Unavailable"), "{source}");
        Ok(())
    }

    #[tokio::test]
    async fn malformed_success_body_is_deserialization() -> Result {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("POST", "/svc"))
                .respond_with(status_code(200).body("<unclosed>")),
        );

        let error = client(&server)
            .call("/svc", "get", TEST_NS, Element::new("get"))
            .await
            .unwrap_err();
        assert!(error.is_deserialization(), "{error:?}");
        Ok(())
    }

    #[tokio::test]
    async fn empty_soap_body_is_deserialization() -> Result {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("POST", "/svc"))
                .respond_with(status_code(200).body(soap(""))),
        );

        let error = client(&server)
            .call("/svc", "get", TEST_NS, Element::new("get"))
            .await
            .unwrap_err();
        assert!(error.is_deserialization(), "{error:?}");
        Ok(())
    }

    #[test]
    fn api_error_type_attribute_fallback() -> Result {
        let element = Element::parse(
            r#"<partialFailureErrors xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
                   xsi:type="DistinctError">
                 <fieldPath>operations[2].operand</fieldPath>
                 <errorString>DistinctError.DUPLICATE_ELEMENT</errorString>
               </partialFailureErrors>"#,
        )?;
        let error = api_error_from(&element);
        assert_eq!(error.error_type(), "DistinctError");
        assert_eq!(error.operation_index(), Some(2));
        assert_eq!(error.trigger(), "");
        Ok(())
    }
}
