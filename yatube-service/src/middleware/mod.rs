//! HTTP middleware utilities.
//!
//! Bearer-token authentication in front of the API scope, plus the
//! ownership checks the content service runs before mutating a post. Token
//! minting belongs to the external identity provider; this layer only
//! validates and exposes the principal to handlers.

pub mod permissions;

pub use permissions::*;

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::error::ResponseError;
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use futures::future::LocalBoxFuture;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

/// Claims carried by tokens the identity provider mints.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    pub username: String,
    pub exp: usize,
}

/// Extracted user identifier stored in request extensions after auth.
#[derive(Debug, Clone)]
pub struct UserId(pub Uuid);

/// Optional principal for endpoints that serve anonymous readers too.
#[derive(Debug, Clone)]
pub struct MaybeUserId(pub Option<Uuid>);

/// Actix middleware that validates a Bearer token when one is present.
///
/// Requests without an Authorization header pass through anonymously;
/// endpoints that require an author reject them via the `UserId` extractor.
/// A present-but-invalid token is always rejected.
pub struct JwtAuth {
    decoding_key: DecodingKey,
}

impl JwtAuth {
    pub fn new(secret: &str) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthService {
            service: Rc::new(service),
            decoding_key: self.decoding_key.clone(),
        }))
    }
}

pub struct JwtAuthService<S> {
    service: Rc<S>,
    decoding_key: DecodingKey,
}

/// Pull the principal out of the Authorization header, if one is present.
fn authenticate(req: &ServiceRequest, decoding_key: &DecodingKey) -> Result<Option<Uuid>, AppError> {
    let header = match req.headers().get("Authorization") {
        Some(header) => header
            .to_str()
            .map_err(|_| AppError::Unauthorized("malformed Authorization header".to_string()))?,
        None => return Ok(None),
    };

    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("invalid Authorization scheme".to_string()))?;

    let claims = decode::<Claims>(token, decoding_key, &Validation::new(Algorithm::HS256))
        .map_err(|_| AppError::Unauthorized("invalid or expired token".to_string()))?;

    let user_id = Uuid::parse_str(&claims.claims.sub)
        .map_err(|_| AppError::Unauthorized("invalid user id in token".to_string()))?;

    Ok(Some(user_id))
}

impl<S, B> Service<ServiceRequest> for JwtAuthService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let decoding_key = self.decoding_key.clone();

        Box::pin(async move {
            match authenticate(&req, &decoding_key) {
                Ok(Some(user_id)) => {
                    req.extensions_mut().insert(UserId(user_id));
                }
                Ok(None) => {}
                Err(err) => {
                    let (req, _) = req.into_parts();
                    let response = err.error_response().map_into_right_body();
                    return Ok(ServiceResponse::new(req, response));
                }
            }

            service
                .call(req)
                .await
                .map(|res| res.map_into_left_body())
        })
    }
}

impl FromRequest for UserId {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<UserId>()
                .cloned()
                .ok_or_else(|| {
                    AppError::Unauthorized("authentication required".to_string()).into()
                }),
        )
    }
}

impl FromRequest for MaybeUserId {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        ready(Ok(MaybeUserId(
            req.extensions().get::<UserId>().map(|u| u.0),
        )))
    }
}
