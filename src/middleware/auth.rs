use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};

use crate::services::token_service::{Claims, TokenService};

/// Value the browser client sends when it has no token stored
const NO_CREDENTIAL: &str = "null";

/// Verified caller identity stored in the request extensions
#[derive(Debug, Clone, Default)]
pub struct Identity(pub Option<Claims>);

/// Resolves the `Authorization` header into an identity.
///
/// Never fails: a missing credential, the `"null"` sentinel and a token that
/// does not verify all yield an anonymous (`None`) identity.
pub fn resolve_identity(header: Option<&str>, tokens: &TokenService) -> Option<Claims> {
    let raw = header.map(str::trim).unwrap_or("");
    let token = raw.strip_prefix("Bearer ").unwrap_or(raw).trim();

    if token.is_empty() || token == NO_CREDENTIAL {
        return None;
    }

    match tokens.verify(token) {
        Ok(claims) => Some(claims),
        Err(e) => {
            // Absorbed: the request continues as anonymous
            log::warn!("⚠️  Session token rejected, continuing anonymously: {}", e);
            None
        }
    }
}

/// Attaches an [`Identity`] to every request; never rejects one
pub struct SessionContext {
    tokens: TokenService,
}

impl SessionContext {
    pub fn new(tokens: TokenService) -> Self {
        Self { tokens }
    }
}

impl<S, B> Transform<S, ServiceRequest> for SessionContext
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionContextService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionContextService {
            service,
            tokens: self.tokens.clone(),
        }))
    }
}

pub struct SessionContextService<S> {
    service: S,
    tokens: TokenService,
}

impl<S, B> Service<ServiceRequest> for SessionContextService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let header = req
            .headers()
            .get(actix_web::http::header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        let identity = Identity(resolve_identity(header, &self.tokens));
        req.extensions_mut().insert(identity);

        let fut = self.service.call(req);
        Box::pin(async move {
            let res = fut.await?;
            Ok(res)
        })
    }
}
