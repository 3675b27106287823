//! HTTP Basic 认证中间件
//!
//! 保护 `/api` 下除 `POST /api/timereport` 以外的所有路由。

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::{
        Method,
        header::{AUTHORIZATION, CONTENT_TYPE, WWW_AUTHENTICATE},
    },
};
use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use std::sync::Arc;
use tracing::{error, info, trace};

use crate::errors::Result;
use crate::services::AccountService;

/// 无需认证即可调用的创建接口
const OPEN_CREATE_PATH: &str = "/api/timereport";

/// 凭据校验接口
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    async fn verify(&self, username: &str, password: &str) -> Result<bool>;
}

#[async_trait]
impl CredentialVerifier for AccountService {
    async fn verify(&self, username: &str, password: &str) -> Result<bool> {
        self.authenticate(username, password).await
    }
}

/// 解析 `Authorization: Basic <base64(user:pass)>`
///
/// scheme 不区分大小写；密码中允许出现 ':'。
pub fn parse_basic_credentials(header: &str) -> Option<(String, String)> {
    let (scheme, encoded) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    if username.is_empty() {
        return None;
    }

    Some((username.to_string(), password.to_string()))
}

/// Basic 认证中间件工厂
#[derive(Clone)]
pub struct BasicAuth {
    realm: Arc<str>,
    verifier: Arc<dyn CredentialVerifier>,
}

impl BasicAuth {
    pub fn new(realm: impl AsRef<str>, verifier: Arc<dyn CredentialVerifier>) -> Self {
        Self {
            realm: Arc::from(realm.as_ref()),
            verifier,
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for BasicAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = BasicAuthMiddleware<S>;
    type Future = Ready<std::result::Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(BasicAuthMiddleware {
            service: Rc::new(service),
            realm: self.realm.clone(),
            verifier: self.verifier.clone(),
        }))
    }
}

pub struct BasicAuthMiddleware<S> {
    service: Rc<S>,
    realm: Arc<str>,
    verifier: Arc<dyn CredentialVerifier>,
}

impl<S, B> BasicAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    /// 预检请求和报告创建不需要认证
    fn is_open(req: &ServiceRequest) -> bool {
        let method = req.method();
        *method == Method::OPTIONS
            || (*method == Method::POST && req.path().trim_end_matches('/') == OPEN_CREATE_PATH)
    }

    fn handle_unauthorized(req: ServiceRequest, realm: &str) -> ServiceResponse<EitherBody<B>> {
        req.into_response(
            HttpResponse::Unauthorized()
                .insert_header((WWW_AUTHENTICATE, format!("Basic realm=\"{}\"", realm)))
                .insert_header((CONTENT_TYPE, "text/plain; charset=utf-8"))
                .body("Unauthorized")
                .map_into_right_body(),
        )
    }
}

impl<S, B> Service<ServiceRequest> for BasicAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, std::result::Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<std::result::Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let realm = self.realm.clone();
        let verifier = self.verifier.clone();

        Box::pin(async move {
            if Self::is_open(&req) {
                trace!("{} {} does not require authentication", req.method(), req.path());
                return srv.call(req).await.map(ServiceResponse::map_into_left_body);
            }

            let credentials = req
                .headers()
                .get(AUTHORIZATION)
                .and_then(|h| h.to_str().ok())
                .and_then(parse_basic_credentials);

            let Some((username, password)) = credentials else {
                info!("Missing or malformed Basic credentials");
                return Ok(Self::handle_unauthorized(req, &realm));
            };

            match verifier.verify(&username, &password).await {
                Ok(true) => {
                    trace!("Authenticated as '{}'", username);
                    srv.call(req).await.map(ServiceResponse::map_into_left_body)
                }
                Ok(false) => {
                    info!("Authentication failed for '{}'", username);
                    Ok(Self::handle_unauthorized(req, &realm))
                }
                Err(e) => {
                    error!("Credential verification error: {}", e);
                    Ok(req.error_response(e).map_into_right_body())
                }
            }
        })
    }
}
