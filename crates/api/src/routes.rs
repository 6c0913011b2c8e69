// routes.rs - API routes for the token flow and the Users and Orders resources

use super::auth::Authorized;
use super::error::ApiError;
use super::utils::{non_empty_str, path_id, positive_integer, positive_number};
use actix_web::{
    get, post,
    web::{self, Data, Json, Path},
    HttpResponse,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use store::{Order, ResourceStore, TokenPair, TokenService, User};
use tracing::{debug, info, warn};

// Bodies are optional: a missing or unreadable body counts as an empty object and is
// answered by the field checks of each route.

#[derive(Debug, Default, Deserialize)]
pub struct TokenRequest {
    pub client_id: Option<Value>,
    pub client_secret: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UserRequest {
    pub name: Option<Value>,
    pub email: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub user_id: Option<Value>,
    pub amount: Option<Value>,
    pub currency: Option<Value>,
}

#[derive(Debug, Serialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    expires_in: u64,
    token_type: &'static str,
}

impl From<TokenPair> for TokenResponse {
    fn from(pair: TokenPair) -> Self {
        TokenResponse {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            expires_in: pair.ttl_seconds,
            token_type: "Bearer",
        }
    }
}

/// First failed check of an order request, in the order the checks run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrderRejection {
    InvalidUser,
    InvalidAmount,
    InvalidCurrency,
}

impl OrderRejection {
    pub fn code(self) -> &'static str {
        match self {
            OrderRejection::InvalidUser => "INVALID_USER",
            OrderRejection::InvalidAmount => "INVALID_AMOUNT",
            OrderRejection::InvalidCurrency => "INVALID_CURRENCY",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            OrderRejection::InvalidUser => "userId must be a positive number",
            OrderRejection::InvalidAmount => "amount must be positive",
            OrderRejection::InvalidCurrency => "currency required",
        }
    }
}

impl From<OrderRejection> for ApiError {
    fn from(rejection: OrderRejection) -> Self {
        ApiError::Unprocessable {
            code: rejection.code(),
            message: rejection.message(),
        }
    }
}

impl OrderRequest {
    pub fn validate(&self) -> Result<Order, OrderRejection> {
        let user_id =
            positive_integer(self.user_id.as_ref()).ok_or(OrderRejection::InvalidUser)?;
        let amount =
            positive_number(self.amount.as_ref()).ok_or(OrderRejection::InvalidAmount)?;
        let currency =
            non_empty_str(self.currency.as_ref()).ok_or(OrderRejection::InvalidCurrency)?;

        Ok(Order::new(user_id, amount, currency.to_string()))
    }
}

fn body_or_default<T: Default>(body: Option<Json<T>>) -> T {
    body.map(Json::into_inner).unwrap_or_default()
}

#[tracing::instrument(
    name = "/auth/token - Issues an access and refresh token pair",
    skip(tokens, body)
)]
#[post("/auth/token")]
pub async fn issue_token(
    tokens: Data<TokenService>,
    body: Option<Json<TokenRequest>>,
) -> Result<HttpResponse, ApiError> {
    let req = body_or_default(body);
    let client_id = non_empty_str(req.client_id.as_ref()).unwrap_or_default();
    let client_secret = non_empty_str(req.client_secret.as_ref()).unwrap_or_default();

    let pair = tokens.issue(client_id, client_secret).map_err(|e| {
        warn!("Token request rejected: {}", e);
        ApiError::from(e)
    })?;

    info!("Issued token pair for client {}", client_id);
    Ok(HttpResponse::Ok().json(TokenResponse::from(pair)))
}

#[tracing::instrument(
    name = "/auth/refresh - Replaces the access token of a known refresh token",
    skip(tokens, body)
)]
#[post("/auth/refresh")]
pub async fn refresh_token(
    tokens: Data<TokenService>,
    body: Option<Json<RefreshRequest>>,
) -> Result<HttpResponse, ApiError> {
    let req = body_or_default(body);
    let refresh_token = non_empty_str(req.refresh_token.as_ref()).unwrap_or_default();

    debug!("Looking up refresh token...");
    let pair = tokens.refresh(refresh_token).map_err(|e| {
        warn!("Refresh rejected: {}", e);
        ApiError::from(e)
    })?;

    info!("Access token refreshed.");
    Ok(HttpResponse::Ok().json(TokenResponse::from(pair)))
}

#[tracing::instrument(name = "/users - Creates a user", skip_all)]
#[post("/users")]
pub async fn create_user(
    _auth: Authorized,
    users: Data<ResourceStore<User>>,
    body: Option<Json<UserRequest>>,
) -> Result<HttpResponse, ApiError> {
    let req = body_or_default(body);
    let (name, email) = match (
        non_empty_str(req.name.as_ref()),
        non_empty_str(req.email.as_ref()),
    ) {
        (Some(name), Some(email)) => (name, email),
        _ => {
            warn!("User request missing name or email");
            return Err(ApiError::BadRequest("name and email required".to_string()));
        }
    };

    let user = users.append(User {
        name: name.to_string(),
        email: email.to_string(),
    });

    info!("Created user {}", user.id);
    Ok(HttpResponse::Created().json(user))
}

#[tracing::instrument(name = "/users/{id} - Returns a user by id", skip(_auth, users))]
#[get("/users/{id}")]
pub async fn get_user(
    _auth: Authorized,
    users: Data<ResourceStore<User>>,
    id: Path<String>,
) -> Result<HttpResponse, ApiError> {
    // An id that is not a number can never match
    let user = path_id(&id)
        .and_then(|id| users.find_by_id(id))
        .ok_or(ApiError::NotFound("User"))?;

    debug!("Found user {}", user.id);
    Ok(HttpResponse::Ok().json(user))
}

#[tracing::instrument(name = "/orders - Creates an order", skip_all)]
#[post("/orders")]
pub async fn create_order(
    _auth: Authorized,
    orders: Data<ResourceStore<Order>>,
    body: Option<Json<OrderRequest>>,
) -> Result<HttpResponse, ApiError> {
    let req = body_or_default(body);
    let order = req.validate().map_err(|rejection| {
        warn!("Order rejected: {}", rejection.code());
        ApiError::from(rejection)
    })?;

    let order = orders.append(order);

    info!("Created order {} for user {}", order.id, order.fields.user_id);
    Ok(HttpResponse::Created().json(order))
}

// Service A: expects `Data<TokenService>` and `Data<ResourceStore<User>>` app data
pub fn users_service(cfg: &mut web::ServiceConfig) {
    cfg.service(issue_token)
        .service(refresh_token)
        .service(create_user)
        .service(get_user);
}

// Service B: expects `Data<TokenService>` and `Data<ResourceStore<Order>>` app data
pub fn orders_service(cfg: &mut web::ServiceConfig) {
    cfg.service(issue_token)
        .service(refresh_token)
        .service(create_order);
}
