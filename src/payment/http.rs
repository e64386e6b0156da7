//! HTTP client for the hosted payment session API

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use super::{PaymentGateway, TokenRequest, TokenResponse};
use crate::Config;
use crate::error::GatewayError;

const GATEWAY_TIMEOUT: Duration = Duration::from_secs(30);

/// A [`PaymentGateway`] talking to the hosted snap-transaction API over
/// HTTP, authenticated with the merchant server key
#[derive(Clone, Debug)]
pub struct HttpGateway {
	client:     Client,
	token_url:  Url,
	server_key: String,
}

#[derive(Debug, Serialize)]
struct SnapTransactionDetails<'a> {
	order_id:     &'a str,
	gross_amount: i64,
}

#[derive(Debug, Serialize)]
struct SnapItemDetail<'a> {
	id:       &'a str,
	name:     &'a str,
	price:    i64,
	quantity: u32,
}

#[derive(Debug, Serialize)]
struct SnapCustomerDetails<'a> {
	first_name: &'a str,
	phone:      &'a str,
}

#[derive(Debug, Serialize)]
struct SnapTokenBody<'a> {
	transaction_details: SnapTransactionDetails<'a>,
	item_details:        Vec<SnapItemDetail<'a>>,
	customer_details:    SnapCustomerDetails<'a>,
}

#[derive(Debug, Deserialize)]
struct SnapTokenResponse {
	token:        String,
	redirect_url: String,
}

impl HttpGateway {
	/// Create a new gateway client from the configured base url and server
	/// key
	///
	/// # Panics
	/// Panics if the HTTP client cannot be constructed or the base url
	/// cannot carry the token path
	#[must_use]
	pub fn new(config: &Config) -> Self {
		let client = Client::builder()
			.timeout(GATEWAY_TIMEOUT)
			.build()
			.expect("COULD NOT BUILD GATEWAY HTTP CLIENT");

		let token_url = config
			.gateway_base_url
			.join("snap/v1/transactions")
			.expect("PAYMENT_GATEWAY_URL must be a valid base url");

		Self {
			client,
			token_url,
			server_key: config.gateway_server_key.clone(),
		}
	}
}

#[async_trait]
impl PaymentGateway for HttpGateway {
	#[instrument(skip(self, request), fields(order_id = %request.gateway_order_id))]
	async fn create_token(
		&self,
		request: TokenRequest,
	) -> Result<TokenResponse, GatewayError> {
		let body = SnapTokenBody {
			transaction_details: SnapTransactionDetails {
				order_id:     &request.gateway_order_id,
				gross_amount: request.gross_amount,
			},
			item_details:        request
				.items
				.iter()
				.map(|item| {
					SnapItemDetail {
						id:       &item.id,
						name:     &item.name,
						price:    item.price,
						quantity: item.quantity,
					}
				})
				.collect(),
			customer_details:    SnapCustomerDetails {
				first_name: &request.customer_name,
				phone:      &request.customer_contact,
			},
		};

		let response = self
			.client
			.post(self.token_url.clone())
			.basic_auth(&self.server_key, Some(""))
			.json(&body)
			.send()
			.await?;

		let status = response.status();

		if !status.is_success() {
			let body = response.text().await.unwrap_or_default();

			return Err(GatewayError::Rejected {
				status: status.as_u16(),
				body,
			});
		}

		let token: SnapTokenResponse = response
			.json()
			.await
			.map_err(|e| GatewayError::MalformedResponse(e.to_string()))?;

		debug!("acquired payment token for {}", request.gateway_order_id);

		Ok(TokenResponse {
			token:        token.token,
			redirect_url: token.redirect_url,
		})
	}
}
