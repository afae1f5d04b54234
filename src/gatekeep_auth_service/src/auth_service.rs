use axum::{
    Router,
    http::{HeaderValue, Method, request},
    routing::post,
};
use gatekeep_adapters::{
    config::AllowedOrigins,
    http::routes::{AuthState, login, register, verify_token},
};
use gatekeep_application::AccountAuthService;
use gatekeep_core::{AccountRepository, PasswordHasher, TokenIssuer};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::telemetry::{make_span_with_request_id, on_request, on_response};

/// HTTP front for an [`AccountAuthService`]
pub struct AuthService {
    router: Router,
}

impl AuthService {
    /// Create a new AuthService around an account authentication service
    ///
    /// # Arguments
    /// * `service` - Register/login logic with its repository, hasher and token issuer
    /// * `cookie_name` - Name of the cookie the session token is also delivered in
    pub fn new<R, H, T>(service: AccountAuthService<R, H, T>, cookie_name: &str) -> Self
    where
        R: AccountRepository + 'static,
        H: PasswordHasher + 'static,
        T: TokenIssuer + 'static,
    {
        let router = Router::new()
            .route("/register", post(register::<R, H, T>))
            .route("/login", post(login::<R, H, T>))
            .route("/verify-token", post(verify_token::<R, H, T>))
            .with_state(AuthState::new(service, cookie_name));

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Convert the AuthService into a nested router that can be mounted on another router
    ///
    /// # Arguments
    /// * `allowed_origins` - Optional list of allowed CORS origins
    pub fn as_nested_router(mut self, allowed_origins: Option<AllowedOrigins>) -> Router {
        if let Some(allowed_origins) = allowed_origins {
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST])
                .allow_credentials(true)
                .allow_origin(AllowOrigin::predicate(
                    move |origin: &HeaderValue, _request_parts: &request::Parts| {
                        allowed_origins.contains(origin)
                    },
                ));

            self.router = self.router.layer(cors);
        }
        self.with_trace_layer().router
    }

    /// Run the auth service as a standalone server
    pub async fn run_standalone(
        self,
        listener: TcpListener,
        allowed_origins: Option<AllowedOrigins>,
    ) -> Result<(), std::io::Error> {
        let router = self.as_nested_router(allowed_origins);

        tracing::info!("Auth service listening on {}", listener.local_addr()?);

        axum::serve(listener, router).await
    }
}
