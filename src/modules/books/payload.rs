use std::convert::Infallible;

use axum::{
    body::{Body, Bytes},
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::{HeaderMap, Method, Uri},
    Form, Json,
};
use serde::de::DeserializeOwned;

/// Request body decoded from either a JSON or an urlencoded form submission.
///
/// A body that cannot be decoded yields `T::default()`, so handlers report
/// their own missing-field errors instead of a framework rejection.
#[derive(Debug, Clone, Default)]
pub struct Payload<T>(pub T);

/// Request head plus its buffered body, replayable through more than one extractor.
struct Buffered {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
}

impl Buffered {
    fn replay(&self) -> Request {
        let mut req = Request::new(Body::from(self.body.clone()));
        *req.method_mut() = self.method.clone();
        *req.uri_mut() = self.uri.clone();
        *req.headers_mut() = self.headers.clone();
        req
    }
}

async fn decode<S, T>(req: Request, state: &S) -> Result<T, String>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    let method = req.method().clone();
    let uri = req.uri().clone();
    let headers = req.headers().clone();
    let body = Bytes::from_request(req, state)
        .await
        .map_err(|rejection| rejection.body_text())?;
    let buffered = Buffered {
        method,
        uri,
        headers,
        body,
    };

    // Json owns the media-type check; only a non-JSON content type falls through to Form.
    match Json::<T>::from_request(buffered.replay(), state).await {
        Ok(Json(value)) => Ok(value),
        Err(JsonRejection::MissingJsonContentType(_)) => {
            Form::<T>::from_request(buffered.replay(), state)
                .await
                .map(|Form(value)| value)
                .map_err(|rejection| rejection.body_text())
        }
        Err(rejection) => Err(rejection.body_text()),
    }
}

impl<S, T> FromRequest<S> for Payload<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default + Send,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let value = decode(req, state).await.unwrap_or_else(|reason| {
            tracing::debug!(%reason, "undecodable request body, treating every field as absent");
            T::default()
        });

        Ok(Payload(value))
    }
}
