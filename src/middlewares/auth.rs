use crate::models::AuthContext;
use crate::utils::JwtService;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{
    Error, HttpMessage,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures_util::future::LocalBoxFuture;
use std::future::{Ready, ready};

/// 为每个请求附加 [`AuthContext`]
///
/// 这里从不拒绝请求：缺失或无效的令牌得到匿名上下文，由 resolver 决定是否需要登录
pub struct AuthMiddleware {
    jwt_service: JwtService,
}

impl AuthMiddleware {
    pub fn new(jwt_service: JwtService) -> Self {
        Self { jwt_service }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service,
            jwt_service: self.jwt_service.clone(),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
    jwt_service: JwtService,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
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
        let context = bearer_token(&req)
            .map(|token| resolve_context(&self.jwt_service, token))
            .unwrap_or_default();

        req.extensions_mut().insert(context);
        Box::pin(self.service.call(req))
    }
}

// 提取 Authorization: Bearer <token>
fn bearer_token(req: &ServiceRequest) -> Option<&str> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

fn resolve_context(jwt_service: &JwtService, token: &str) -> AuthContext {
    match jwt_service.verify_access_token(token) {
        Ok(user) => AuthContext::authenticated(user, token.to_string()),
        Err(e) => {
            log::warn!("Token verification failed: {e}");
            AuthContext::default()
        }
    }
}

/// 获取当前请求的认证上下文
pub fn current_auth(req: &actix_web::HttpRequest) -> AuthContext {
    req.extensions()
        .get::<AuthContext>()
        .cloned()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::jwt::issue_test_token;
    use actix_web::{App, HttpRequest, HttpResponse, test, web};

    async fn whoami(req: HttpRequest) -> HttpResponse {
        let auth = current_auth(&req);
        HttpResponse::Ok().body(auth.user.map(|u| u.id).unwrap_or_else(|| "anonymous".into()))
    }

    #[actix_web::test]
    async fn test_attaches_context() {
        let app = test::init_service(
            App::new()
                .wrap(AuthMiddleware::new(JwtService::new("secret")))
                .route("/", web::get().to(whoami)),
        )
        .await;

        let token = issue_test_token("secret", "acct-1", Some("manager"), 3600);
        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((AUTHORIZATION, format!("Bearer {token}")))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, "acct-1");

        let req = test::TestRequest::get().uri("/").to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, "anonymous");
    }

    #[actix_web::test]
    async fn test_invalid_token_is_anonymous() {
        let app = test::init_service(
            App::new()
                .wrap(AuthMiddleware::new(JwtService::new("secret")))
                .route("/", web::get().to(whoami)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((AUTHORIZATION, "Bearer not-a-jwt"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
        let body = test::read_body(resp).await;
        assert_eq!(body, "anonymous");
    }
}
