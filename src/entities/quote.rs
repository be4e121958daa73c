use serde::{Deserialize, Serialize};

use crate::entities::FareBreakdown;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhatsAppLinks {
    pub admin: String,
    pub customer: String,
}

/// What the engine hands back for an accepted estimate or booking.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub fare: FareBreakdown,
    pub estimated_duration: Option<String>,
    pub whatsapp_links: WhatsAppLinks,
}

impl Quote {
    pub fn new(
        fare: FareBreakdown,
        estimated_duration: Option<String>,
        whatsapp_links: WhatsAppLinks,
    ) -> Self {
        Self {
            fare,
            estimated_duration,
            whatsapp_links,
        }
    }
}
