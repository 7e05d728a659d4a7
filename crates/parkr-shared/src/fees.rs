use serde::{Deserialize, Serialize};

use crate::constants::PLATFORM_FEE_RATE;

/// How a booking total is divided between the platform and the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeSplit {
    pub platform_fee: f64,
    pub host_earnings: f64,
}

/// Split `total` into the 20% platform fee and the host's remainder.
///
/// Host earnings are computed as `total - fee` rather than `0.8 * total` so
/// the two parts always add back up to the total.
pub fn split(total: f64) -> FeeSplit {
    let platform_fee = total * PLATFORM_FEE_RATE;
    FeeSplit {
        platform_fee,
        host_earnings: total - platform_fee,
    }
}
