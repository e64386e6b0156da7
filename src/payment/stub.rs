//! A fake payment gateway for tests

use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use super::{PaymentGateway, TokenRequest, TokenResponse};
use crate::error::GatewayError;

/// A [`PaymentGateway`] that records token requests instead of performing
/// them
///
/// The next call can be made to fail with [`StubGateway::fail_next`].
#[derive(Debug, Default)]
pub struct StubGateway {
	requests:  Mutex<Vec<TokenRequest>>,
	fail_next: Mutex<Option<String>>,
	counter:   AtomicU32,
}

impl StubGateway {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Make the next `create_token` call fail with the given reason
	pub fn fail_next(&self, reason: &str) {
		*self.fail_next.lock() = Some(reason.to_string());
	}

	/// All token requests recorded so far
	#[must_use]
	pub fn requests(&self) -> Vec<TokenRequest> {
		self.requests.lock().clone()
	}
}

#[async_trait]
impl PaymentGateway for StubGateway {
	async fn create_token(
		&self,
		request: TokenRequest,
	) -> Result<TokenResponse, GatewayError> {
		if let Some(reason) = self.fail_next.lock().take() {
			return Err(GatewayError::Rejected { status: 500, body: reason });
		}

		let n = self.counter.fetch_add(1, Ordering::SeqCst);

		info!(
			target: "[STUB_GATEWAY]",
			"issued token {n} for {}",
			request.gateway_order_id
		);

		self.requests.lock().push(request);

		Ok(TokenResponse {
			token:        format!("stub-token-{n}"),
			redirect_url: format!("https://pay.invalid/redirect/{n}"),
		})
	}
}
