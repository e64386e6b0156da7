use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepResponse {
	pub expired: usize,
	pub ok:      bool,
}
