use chrono::{NaiveTime, TimeDelta};
use url::Url;

/// The format used for slot time labels in the environment
const TIME_LABEL_FORMAT: &str = "%H:%M";

#[derive(Clone, Debug)]
pub struct Config {
	pub studio_open_time:   NaiveTime,
	pub studio_close_time:  NaiveTime,
	pub studio_break_times: Vec<NaiveTime>,

	pub order_lifetime: TimeDelta,

	pub gateway_base_url:   Url,
	pub gateway_server_key: String,

	pub admin_api_key: String,
}

impl Config {
	fn get_env_var(var: &str) -> String {
		std::env::var(var).unwrap_or_else(|_| panic!("{var} must be set"))
	}

	fn get_time_var(var: &str) -> NaiveTime {
		let raw = Self::get_env_var(var);

		NaiveTime::parse_from_str(&raw, TIME_LABEL_FORMAT)
			.unwrap_or_else(|_| panic!("{var} must be a HH:MM time"))
	}

	/// Create a new [`Config`] from environment variables
	///
	/// # Panics
	/// Panics if an environment variable is missing or unparseable
	#[must_use]
	pub fn from_env() -> Self {
		let studio_open_time = Self::get_time_var("STUDIO_OPEN_TIME");
		let studio_close_time = Self::get_time_var("STUDIO_CLOSE_TIME");

		let studio_break_times = Self::get_env_var("STUDIO_BREAK_TIMES")
			.split(',')
			.filter(|s| !s.trim().is_empty())
			.map(|s| {
				NaiveTime::parse_from_str(s.trim(), TIME_LABEL_FORMAT)
					.unwrap_or_else(|_| {
						panic!("STUDIO_BREAK_TIMES must be HH:MM times")
					})
			})
			.collect();

		let order_lifetime = TimeDelta::minutes(
			Self::get_env_var("ORDER_LIFETIME_MINUTES")
				.parse::<i64>()
				.unwrap(),
		);

		let gateway_base_url = Self::get_env_var("PAYMENT_GATEWAY_URL")
			.parse::<Url>()
			.unwrap_or_else(|_| panic!("PAYMENT_GATEWAY_URL must be a url"));
		let gateway_server_key = Self::get_env_var("PAYMENT_SERVER_KEY");

		let admin_api_key = Self::get_env_var("ADMIN_API_KEY");

		Self {
			studio_open_time,
			studio_close_time,
			studio_break_times,
			order_lifetime,
			gateway_base_url,
			gateway_server_key,
			admin_api_key,
		}
	}
}
