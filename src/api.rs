use std::rc::Rc;

use log::debug;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpTransport, RequestOptions};
use crate::session_store::SessionStore;


pub struct ApiGateway {
    transport: Box<dyn HttpTransport>,
    session: Rc<SessionStore>,
}

impl ApiGateway {
    pub fn new(transport: Box<dyn HttpTransport>, session: Rc<SessionStore>) -> Self {
        ApiGateway { transport, session }
    }

    // Issues a request and parses the JSON body on success.
    //
    // If a session token is held, `Authorization: Bearer <token>` is merged in last: it replaces
    // any `Authorization` header already present in `options`.
    //
    // Any non-2xx status fails with `RequestFailed` carrying the raw body. No retries.
    pub async fn call<T: DeserializeOwned>(
        &self, url: Url, options: RequestOptions,
    ) -> Result<T, ApiError> {
        let request = self.prepare(url, options);
        debug!("{} {}", request.method.as_str(), request.url);
        let response = self.transport.send(request).await?;
        if !response.is_success() {
            return Err(ApiError::RequestFailed {
                status: response.status,
                body: response.body,
            });
        }
        serde_json::from_str(&response.body).map_err(|err| ApiError::Decode(err.to_string()))
    }

    fn prepare(&self, url: Url, options: RequestOptions) -> HttpRequest {
        let RequestOptions { method, mut headers, body } = options;
        if let Some(token) = self.session.get() {
            headers.insert("Authorization", format!("Bearer {token}"));
        }
        HttpRequest { url, method, headers, body }
    }
}
