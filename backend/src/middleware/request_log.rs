//! Request-logging middleware.
//!
//! Emits one `tracing` event per handled request carrying the method, the
//! path, the response status, and the elapsed handling time. Server errors
//! log at error level so they surface in filtered production logs; everything
//! else, including client errors, is expected traffic and logs at info.

use std::task::{Context, Poll};
use std::time::Instant;

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{error, info};

/// Middleware logging every request with its outcome.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use backend::middleware::RequestLog;
///
/// let app = App::new().wrap(RequestLog);
/// ```
#[derive(Clone)]
pub struct RequestLog;

impl<S, B> Transform<S, ServiceRequest> for RequestLog
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestLogMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestLogMiddleware { service }))
    }
}

/// Service wrapper produced by [`RequestLog`].
///
/// Applications should not use this type directly.
pub struct RequestLogMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequestLogMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let method = req.method().to_string();
        let path = req.path().to_string();
        let started = Instant::now();
        let fut = self.service.call(req);
        Box::pin(async move {
            let res = fut.await?;
            let status = res.status();
            let elapsed_ms = started.elapsed().as_millis();
            if status.is_server_error() {
                error!(%method, %path, status = status.as_u16(), elapsed_ms, "request failed");
            } else {
                info!(%method, %path, status = status.as_u16(), elapsed_ms, "request handled");
            }
            Ok(res)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};
    use rstest::rstest;

    async fn call_wrapped(status: StatusCode) -> ServiceResponse {
        let app = test::init_service(App::new().wrap(RequestLog).route(
            "/cars",
            web::get().to(move || async move { HttpResponse::build(status).body("payload") }),
        ))
        .await;
        let req = test::TestRequest::get().uri("/cars").to_request();
        test::call_service(&app, req).await
    }

    #[rstest]
    #[case::success(StatusCode::OK)]
    #[case::client_error(StatusCode::NOT_FOUND)]
    #[case::server_error(StatusCode::INTERNAL_SERVER_ERROR)]
    #[actix_rt::test]
    async fn logged_responses_pass_through_unchanged(#[case] status: StatusCode) {
        let res = call_wrapped(status).await;
        assert_eq!(res.status(), status);

        let body = test::read_body(res).await;
        assert_eq!(body, "payload");
    }

    #[actix_rt::test]
    async fn unmatched_routes_still_flow_through_the_wrap() {
        let app = test::init_service(App::new().wrap(RequestLog).route(
            "/cars",
            web::get().to(|| async { HttpResponse::Ok().finish() }),
        ))
        .await;
        let req = test::TestRequest::get().uri("/missing").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
