/// HTTP middleware utilities for blog-service
///
/// JWT bearer authentication against the identity service's HS256 tokens.
/// The middleware only *annotates* the request: a valid token inserts
/// `UserId` into the request extensions, a missing header passes through
/// anonymously, and a malformed or expired token is rejected outright.
/// Handlers declare their own requirement through the extractors:
/// `UserId` for must-be-authenticated endpoints, `Option<UserId>` where
/// anonymous viewers are fine.
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{error::ErrorUnauthorized, Error, FromRequest, HttpMessage, HttpRequest};
use futures::future::LocalBoxFuture;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::future::{ready, Ready};
use std::rc::Rc;
use uuid::Uuid;

/// Extracted user identifier stored in request extensions after auth.
#[derive(Debug, Clone)]
pub struct UserId(pub Uuid);

/// Claims carried by identity-service access tokens
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

/// Actix middleware that validates a Bearer token when one is present.
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
    type Response = ServiceResponse<B>;
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

impl<S, B> Service<ServiceRequest> for JwtAuthService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let decoding_key = self.decoding_key.clone();

        Box::pin(async move {
            let auth_header = req
                .headers()
                .get("Authorization")
                .and_then(|h| h.to_str().ok())
                .map(str::to_owned);

            if let Some(header) = auth_header {
                let token = header
                    .strip_prefix("Bearer ")
                    .ok_or_else(|| ErrorUnauthorized("Invalid Authorization scheme"))?;

                let data =
                    decode::<Claims>(token, &decoding_key, &Validation::new(Algorithm::HS256))
                        .map_err(|_| ErrorUnauthorized("Invalid or expired token"))?;

                let user_id = Uuid::parse_str(&data.claims.sub)
                    .map_err(|_| ErrorUnauthorized("Invalid user ID"))?;

                req.extensions_mut().insert(UserId(user_id));
            }

            service.call(req).await
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
                .ok_or_else(|| ErrorUnauthorized("Authentication required")),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, web, App, HttpResponse};
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "test-secret";

    fn token_for(user_id: Uuid) -> String {
        let claims = Claims {
            sub: user_id.to_string(),
            exp: (chrono::Utc::now() + chrono::Duration::hours(1)).timestamp() as usize,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .expect("token encoding")
    }

    async fn whoami(user_id: Option<UserId>) -> HttpResponse {
        match user_id {
            Some(UserId(id)) => HttpResponse::Ok().body(id.to_string()),
            None => HttpResponse::Ok().body("anonymous"),
        }
    }

    async fn members_only(user_id: UserId) -> HttpResponse {
        HttpResponse::Ok().body(user_id.0.to_string())
    }

    #[actix_rt::test]
    async fn valid_token_annotates_request() {
        let app = test::init_service(
            App::new()
                .wrap(JwtAuth::new(SECRET))
                .route("/whoami", web::get().to(whoami)),
        )
        .await;

        let user_id = Uuid::new_v4();
        let req = test::TestRequest::get()
            .uri("/whoami")
            .insert_header(("Authorization", format!("Bearer {}", token_for(user_id))))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, user_id.to_string().as_bytes());
    }

    #[actix_rt::test]
    async fn missing_header_passes_through_anonymously() {
        let app = test::init_service(
            App::new()
                .wrap(JwtAuth::new(SECRET))
                .route("/whoami", web::get().to(whoami)),
        )
        .await;

        let req = test::TestRequest::get().uri("/whoami").to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, b"anonymous".as_ref());
    }

    #[actix_rt::test]
    async fn garbage_token_is_rejected() {
        let app = test::init_service(
            App::new()
                .wrap(JwtAuth::new(SECRET))
                .route("/whoami", web::get().to(whoami)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/whoami")
            .insert_header(("Authorization", "Bearer not-a-jwt"))
            .to_request();
        let status = match test::try_call_service(&app, req).await {
            Ok(resp) => resp.status(),
            Err(err) => err.as_response_error().status_code(),
        };
        assert_eq!(status, actix_web::http::StatusCode::UNAUTHORIZED);
    }

    #[actix_rt::test]
    async fn required_auth_rejects_anonymous() {
        let app = test::init_service(
            App::new()
                .wrap(JwtAuth::new(SECRET))
                .route("/private", web::get().to(members_only)),
        )
        .await;

        let req = test::TestRequest::get().uri("/private").to_request();
        let status = match test::try_call_service(&app, req).await {
            Ok(resp) => resp.status(),
            Err(err) => err.as_response_error().status_code(),
        };
        assert_eq!(status, actix_web::http::StatusCode::UNAUTHORIZED);
    }
}
