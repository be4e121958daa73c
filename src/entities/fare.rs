use serde::{Deserialize, Serialize};

/// Priced result of an accepted booking request. Nothing about it is stored;
/// `estimation_id` only correlates log lines and customer messages.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FareBreakdown {
    pub estimation_id: String,
    pub distance_km: f64,
    pub rate_per_km: u32,
    pub base_price: u64,
    pub driver_allowance: u64,
    pub total_price: u64,
}

/// Display strings shown on the fare card and in messages.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FareDisplay {
    pub distance: String,
    pub rate: String,
    pub base_amount: String,
    pub driver_bata: String,
    pub total: String,
}

impl FareBreakdown {
    pub fn display(&self) -> FareDisplay {
        FareDisplay {
            distance: format!("{} km", self.distance_km),
            rate: format!("{}/km", rupees(u64::from(self.rate_per_km))),
            base_amount: rupees(self.base_price),
            driver_bata: rupees(self.driver_allowance),
            total: rupees(self.total_price),
        }
    }
}

pub fn rupees(amount: u64) -> String {
    format!("₹{amount}")
}
