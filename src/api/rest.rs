//! REST implementation of the backend trait
//!
//! One thin adapter over reqwest. Failure classification happens here and
//! nowhere else: reqwest errors and HTTP statuses become structured
//! [`CarelineError`] kinds before anything reaches an aggregate.

use super::models::{
    CartDto, CartItemDto, CreateEmergencyBody, CreateOrderBody, EmergencyRequestDto, ErrorBody,
    OrderDto, PatientDto, RemoveItemBody, UpdateQuantityBody,
};
use super::session::SharedSession;
use super::traits::HealthApi;
use crate::config::ApiConfig;
use crate::domain::cart::{Cart, CartLineItem};
use crate::domain::emergency::{EmergencyRequest, EmergencyRequestDraft};
use crate::domain::errors::CarelineError;
use crate::domain::ids::{OrderId, RequestId, ServiceId};
use crate::domain::order::{Order, PaymentMethod};
use crate::domain::patient::Patient;
use crate::domain::result::Result;
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, RequestBuilder, Response, StatusCode};
use secrecy::ExposeSecret;
use std::time::Duration;

/// REST adapter for the healthcare backend
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use careline::api::{RestApi, StaticSession};
/// use careline::config::ApiConfig;
///
/// # fn example() -> careline::domain::Result<()> {
/// let config = ApiConfig {
///     base_url: "https://api.careline.example".to_string(),
///     timeout_seconds: 30,
/// };
/// let session = Arc::new(StaticSession::authenticated("jwt-token"));
/// let api = RestApi::new(&config, session)?;
/// # Ok(())
/// # }
/// ```
pub struct RestApi {
    /// Base URL of the backend, without trailing slash
    base_url: String,

    /// HTTP client; owns timeout handling
    client: Client,

    /// Injected session for bearer tokens
    session: SharedSession,
}

impl RestApi {
    /// Creates a new REST adapter from configuration
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if the HTTP client cannot be built.
    pub fn new(config: &ApiConfig, session: SharedSession) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                CarelineError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
            session,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Bearer header value for the active session
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` when the session holds no token.
    fn bearer(&self) -> Result<String> {
        let token = self.session.token().ok_or(CarelineError::NotAuthenticated)?;
        Ok(format!("Bearer {}", token.expose_secret().as_ref()))
    }

    /// Sends a request and classifies failures into domain error kinds
    async fn send(&self, request: RequestBuilder, context: &str) -> Result<Response> {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                CarelineError::Transport(format!("{context}: request timed out"))
            } else {
                CarelineError::Transport(format!("{context}: {e}"))
            }
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = Self::error_message(response).await;
        tracing::debug!(
            context = context,
            status = status.as_u16(),
            message = %message,
            "Backend returned error response"
        );

        Err(match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => CarelineError::NotAuthenticated,
            StatusCode::NOT_FOUND => CarelineError::NotFound(format!("{context}: {message}")),
            _ => CarelineError::Api {
                status: status.as_u16(),
                message,
            },
        })
    }

    /// Extracts the message from an error body, falling back to raw text
    async fn error_message(response: Response) -> String {
        let text = response.text().await.unwrap_or_default();
        match serde_json::from_str::<ErrorBody>(&text) {
            Ok(ErrorBody { message: Some(m) }) => m,
            _ => text,
        }
    }

    async fn json<T: serde::de::DeserializeOwned>(response: Response, context: &str) -> Result<T> {
        response
            .json::<T>()
            .await
            .map_err(|e| CarelineError::Serialization(format!("{context}: {e}")))
    }
}

#[async_trait]
impl HealthApi for RestApi {
    async fn fetch_cart(&self) -> Result<Cart> {
        let request = self
            .client
            .get(self.url("/cart"))
            .header("Authorization", self.bearer()?);

        let response = self.send(request, "fetch cart").await?;
        let dto: CartDto = Self::json(response, "fetch cart").await?;
        dto.into_domain()
    }

    async fn add_to_cart(&self, item: &CartLineItem) -> Result<()> {
        let request = self
            .client
            .post(self.url("/cart/add"))
            .header("Authorization", self.bearer()?)
            .json(&CartItemDto::from(item));

        self.send(request, "add to cart").await?;
        Ok(())
    }

    async fn update_quantity(&self, service_id: &ServiceId, quantity: u32) -> Result<()> {
        let request = self
            .client
            .put(self.url("/cart/update"))
            .header("Authorization", self.bearer()?)
            .json(&UpdateQuantityBody {
                service: service_id.as_str(),
                quantity,
            });

        self.send(request, "update quantity").await?;
        Ok(())
    }

    async fn remove_from_cart(&self, service_id: &ServiceId) -> Result<()> {
        let request = self
            .client
            .delete(self.url("/cart/remove"))
            .header("Authorization", self.bearer()?)
            .json(&RemoveItemBody {
                service: service_id.as_str(),
            });

        self.send(request, "remove from cart").await?;
        Ok(())
    }

    async fn clear_cart(&self) -> Result<()> {
        let request = self
            .client
            .delete(self.url("/cart/clear"))
            .header("Authorization", self.bearer()?);

        self.send(request, "clear cart").await?;
        Ok(())
    }

    async fn create_order(&self, payment_method: PaymentMethod) -> Result<Order> {
        let request = self
            .client
            .post(self.url("/orders"))
            .header("Authorization", self.bearer()?)
            .header("Idempotency-Key", uuid::Uuid::new_v4().to_string())
            .json(&CreateOrderBody { payment_method });

        let response = self.send(request, "create order").await?;
        let dto: OrderDto = Self::json(response, "create order").await?;
        dto.into_domain()
    }

    async fn fetch_order(&self, id: &OrderId) -> Result<Order> {
        let request = self
            .client
            .get(self.url(&format!("/orders/{id}")))
            .header("Authorization", self.bearer()?);

        let response = self.send(request, "fetch order").await?;
        let dto: OrderDto = Self::json(response, "fetch order").await?;
        dto.into_domain()
    }

    async fn cancel_order(&self, id: &OrderId) -> Result<Order> {
        let request = self
            .client
            .put(self.url(&format!("/orders/{id}/cancel")))
            .header("Authorization", self.bearer()?);

        let response = self.send(request, "cancel order").await?;
        let dto: OrderDto = Self::json(response, "cancel order").await?;
        dto.into_domain()
    }

    async fn create_emergency_request(
        &self,
        draft: &EmergencyRequestDraft,
    ) -> Result<EmergencyRequest> {
        let request = self
            .client
            .post(self.url("/emergency"))
            .header("Authorization", self.bearer()?)
            .header("Idempotency-Key", uuid::Uuid::new_v4().to_string())
            .json(&CreateEmergencyBody::from(draft));

        let response = self.send(request, "create emergency request").await?;
        let dto: EmergencyRequestDto = Self::json(response, "create emergency request").await?;
        dto.into_domain()
    }

    async fn fetch_emergency_request(&self, id: &RequestId) -> Result<EmergencyRequest> {
        let request = self
            .client
            .get(self.url(&format!("/emergency/{id}")))
            .header("Authorization", self.bearer()?);

        let response = self.send(request, "fetch emergency request").await?;
        let dto: EmergencyRequestDto = Self::json(response, "fetch emergency request").await?;
        dto.into_domain()
    }

    async fn cancel_emergency_request(&self, id: &RequestId) -> Result<EmergencyRequest> {
        let request = self
            .client
            .put(self.url(&format!("/emergency/{id}/cancel")))
            .header("Authorization", self.bearer()?);

        let response = self.send(request, "cancel emergency request").await?;
        let dto: EmergencyRequestDto = Self::json(response, "cancel emergency request").await?;
        dto.into_domain()
    }

    async fn list_relatives(&self) -> Result<Vec<Patient>> {
        let request = self
            .client
            .get(self.url("/relatives"))
            .header("Authorization", self.bearer()?);

        let response = self.send(request, "list relatives").await?;
        let dtos: Vec<PatientDto> = Self::json(response, "list relatives").await?;
        dtos.into_iter().map(PatientDto::into_domain).collect()
    }
}
