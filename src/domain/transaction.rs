use super::cart::LineItem;
use serde::{Deserialize, Serialize};

/// Store this register belongs to.
pub const STORE_ID: &str = "30";
/// Identifier of this register.
pub const POS_ID: &str = "90";
/// Employee id sent with every record. The backend records a blank id as
/// `9999999999`.
pub const EMPLOYEE_ID: &str = "";

/// One purchase line as posted to the transaction sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    #[serde(rename = "emp_cd")]
    pub employee_id: String,
    #[serde(rename = "store_cd")]
    pub store_id: String,
    #[serde(rename = "pos_no")]
    pub pos_id: String,
    pub product_code: String,
    pub quantity: u32,
}

impl PurchaseRecord {
    pub fn for_line(item: &LineItem) -> Self {
        Self {
            employee_id: EMPLOYEE_ID.to_string(),
            store_id: STORE_ID.to_string(),
            pos_id: POS_ID.to_string(),
            product_code: item.code.clone(),
            quantity: item.quantity,
        }
    }
}
