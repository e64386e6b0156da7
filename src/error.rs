//! Library-wide error types and [`From`] impls

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

use crate::booking::availability::SlotConflict;
use crate::payment::order_ref::MAX_GATEWAY_ORDER_ID_LEN;

/// Top level application error, can be converted into a [`Response`]
#[derive(Debug, Error)]
pub enum Error {
	/// Duplicate resource created
	#[error("{0}")]
	Duplicate(String),
	/// Request/operation forbidden
	#[error("forbidden")]
	Forbidden,
	/// Opaque internal server error
	#[error("internal server error")]
	InternalServerError,
	/// Resource not found
	#[error("not found - {0}")]
	NotFound(String),
	/// Some data in the request was missing
	#[error("{0}")]
	MissingRequestData(String),
	/// Any error related to assembling a booking
	#[error(transparent)]
	BookingError(#[from] BookingError),
	/// Any error related to the payment gateway
	#[error(transparent)]
	PaymentError(#[from] PaymentError),
	/// Resource could not be validated
	#[error("{0}")]
	ValidationError(String),
}

impl Error {
	/// Return a unique identifying code for this error
	///
	/// When modifying this function the error code should only ever increase,
	/// an error code should never be reused once its assigned to avoid
	/// unexpectedly breaking the frontend
	fn code(&self) -> i32 {
		match self {
			Self::Duplicate(_) => 1,
			Self::Forbidden => 2,
			Self::InternalServerError => 3,
			Self::NotFound(_) => 4,
			Self::MissingRequestData(_) => 5,
			Self::ValidationError(_) => 6,
			Self::BookingError(e) => {
				match e {
					BookingError::SlotsTaken(_) => 7,
					BookingError::UnknownTimeSlot { .. } => 8,
					BookingError::BreakTime { .. } => 9,
					BookingError::UnknownProduct(_) => 10,
					BookingError::UnknownAddOn(_) => 11,
					BookingError::OverAllocation { .. } => 12,
					BookingError::UnknownSession { .. } => 13,
					BookingError::VoucherRejected(_) => 14,
				}
			},
			Self::PaymentError(e) => {
				match e {
					PaymentError::TokenAcquisition(_) => 15,
					PaymentError::MalformedOrderId(_) => 16,
					PaymentError::OrderIdTooLong(_) => 17,
				}
			},
		}
	}

	/// Return additional information about the error
	fn info(&self) -> Option<String> {
		match self {
			Self::Duplicate(m)
			| Self::NotFound(m)
			| Self::MissingRequestData(m)
			| Self::ValidationError(m) => Some(m.to_owned()),
			Self::BookingError(e) => {
				match e {
					BookingError::SlotsTaken(conflicts) => Some(
						serde_json::json!({ "conflicts": conflicts })
							.to_string(),
					),
					BookingError::UnknownTimeSlot { date, time }
					| BookingError::BreakTime { date, time } => Some(
						serde_json::json!({ "date": date, "time": time })
							.to_string(),
					),
					BookingError::UnknownProduct(id)
					| BookingError::UnknownAddOn(id) => Some(id.to_owned()),
					BookingError::OverAllocation {
						add_on,
						selected,
						allocated,
					} => Some(
						serde_json::json!({
							"addOn": add_on,
							"selected": selected,
							"allocated": allocated,
						})
						.to_string(),
					),
					BookingError::UnknownSession { add_on, time } => Some(
						serde_json::json!({ "addOn": add_on, "time": time })
							.to_string(),
					),
					BookingError::VoucherRejected(m) => Some(m.to_owned()),
				}
			},
			Self::PaymentError(
				PaymentError::MalformedOrderId(id)
				| PaymentError::OrderIdTooLong(id),
			) => Some(id.to_owned()),
			_ => None,
		}
	}
}

/// Convert an error into a [`Response`]
impl IntoResponse for Error {
	fn into_response(self) -> Response {
		error!("{self:?}");

		let message = self.to_string();

		let data = serde_json::json!({
			"message": message,
			"code": self.code(),
			"info": self.info(),
		});

		let status = match self {
			Self::Duplicate(_)
			| Self::BookingError(BookingError::SlotsTaken(_)) => {
				StatusCode::CONFLICT
			},
			Self::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
			Self::Forbidden => StatusCode::FORBIDDEN,
			Self::NotFound(_) => StatusCode::NOT_FOUND,
			Self::BookingError(_) => StatusCode::BAD_REQUEST,
			Self::PaymentError(PaymentError::TokenAcquisition(_)) => {
				StatusCode::BAD_GATEWAY
			},
			Self::PaymentError(_) => StatusCode::BAD_REQUEST,
			Self::ValidationError(_) | Self::MissingRequestData(_) => {
				StatusCode::UNPROCESSABLE_ENTITY
			},
		};

		(status, axum::Json(data)).into_response()
	}
}

/// Any error related to assembling a booking
#[derive(Debug, Error)]
pub enum BookingError {
	/// One or more requested slots overlap a paid reservation
	#[error("one or more requested slots are already taken")]
	SlotsTaken(Vec<SlotConflict>),
	/// The requested time is not part of the bookable grid
	#[error("time {time} on {date} is not a bookable slot")]
	UnknownTimeSlot { date: NaiveDate, time: NaiveTime },
	/// The requested time falls in a break
	#[error("time {time} on {date} falls in a break")]
	BreakTime { date: NaiveDate, time: NaiveTime },
	/// The referenced product does not exist
	#[error("unknown product '{0}'")]
	UnknownProduct(String),
	/// The referenced add-on does not exist
	#[error("unknown add-on '{0}'")]
	UnknownAddOn(String),
	/// Per-session allocations exceed the selected add-on quantity
	#[error("add-on '{add_on}' allocates {allocated} of {selected} selected")]
	OverAllocation { add_on: String, selected: u32, allocated: u32 },
	/// An allocation references a session that is not part of the booking
	#[error("add-on '{add_on}' allocates to unselected session {time}")]
	UnknownSession { add_on: String, time: NaiveTime },
	/// The voucher cannot be applied
	#[error("voucher rejected - {0}")]
	VoucherRejected(String),
}

/// Any error related to the payment gateway
#[derive(Debug, Error)]
pub enum PaymentError {
	/// Acquiring a payment token from the gateway failed; the inner message
	/// is recorded on the order, never shown to the caller
	#[error("could not acquire a payment token")]
	TokenAcquisition(String),
	/// A gateway order id did not match the composed format
	#[error("malformed gateway order id '{0}'")]
	MalformedOrderId(String),
	/// The composed gateway order id exceeds the gateway limit
	#[error(
		"gateway order id '{0}' exceeds {MAX_GATEWAY_ORDER_ID_LEN} characters"
	)]
	OrderIdTooLong(String),
}

/// Any error coming out of a document store implementation
#[derive(Debug, Error)]
pub enum StoreError {
	/// The record does not exist
	#[error("record not found")]
	NotFound,
	/// A single owner partition could not be read
	#[error("owner partition '{0}' unavailable")]
	PartitionUnavailable(String),
	/// The store as a whole could not be reached
	#[error("store unavailable - {0}")]
	Unavailable(String),
	/// A stored document could not be decoded
	#[error("malformed document - {0}")]
	MalformedDocument(String),
}

/// Any error coming out of a payment gateway implementation
#[derive(Debug, Error)]
pub enum GatewayError {
	/// Transport-level failure talking to the gateway
	#[error("gateway transport error - {0}")]
	Transport(#[from] reqwest::Error),
	/// The gateway rejected the request
	#[error("gateway rejected request - {status}: {body}")]
	Rejected { status: u16, body: String },
	/// The gateway response could not be decoded
	#[error("malformed gateway response - {0}")]
	MalformedResponse(String),
}

/// A list of possible internal errors
///
/// API end users should never see these details
#[derive(Debug, Error)]
pub enum InternalServerError {
	/// Error reaching the document store
	#[error("store error -- {0:?}")]
	StoreError(StoreError),
}

// Map internal server errors to application errors
impl From<InternalServerError> for Error {
	fn from(value: InternalServerError) -> Self {
		error!("internal server error -- {value}");

		Self::InternalServerError
	}
}

/// Map validation errors to application errors
impl From<validator::ValidationErrors> for Error {
	fn from(err: validator::ValidationErrors) -> Self {
		let errs = err.field_errors();
		let repr = errs
			.values()
			.map(|v| {
				v.iter()
					.map(ToString::to_string)
					.collect::<Vec<String>>()
					.join("\n")
			})
			.collect::<Vec<String>>()
			.join("\n");

		Self::ValidationError(repr)
	}
}

/// Map document store errors to application errors
impl From<StoreError> for Error {
	fn from(err: StoreError) -> Self {
		match err {
			StoreError::NotFound => {
				Self::NotFound("no context provided".to_string())
			},
			_ => InternalServerError::StoreError(err).into(),
		}
	}
}

/// Map gateway client errors to application errors
impl From<GatewayError> for Error {
	fn from(err: GatewayError) -> Self {
		PaymentError::TokenAcquisition(err.to_string()).into()
	}
}
