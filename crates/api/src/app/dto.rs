use serde::Deserialize;

use sockwarehouse_inventory::StockDelta;

// -------------------------
// Request DTOs
// -------------------------

/// Body of income, outcome and update requests.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockDeltaRequest {
    pub color: String,
    pub cotton_part: i32,
    pub quantity: u32,
}

impl From<StockDeltaRequest> for StockDelta {
    fn from(value: StockDeltaRequest) -> Self {
        StockDelta::new(value.color, value.cotton_part, value.quantity)
    }
}

/// Query string of `GET /socks`. `operation` is validated by the handler so an
/// unknown operator maps to `invalid_operation` rather than a generic rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalSocksQuery {
    pub color: String,
    pub operation: String,
    pub cotton_part: i32,
}

/// Multipart field carrying the CSV file.
pub const BATCH_FILE_FIELD: &str = "file";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_request_uses_camel_case() {
        let req: StockDeltaRequest =
            serde_json::from_str(r#"{"color":"Red","cottonPart":50,"quantity":100}"#).unwrap();
        assert_eq!(StockDelta::from(req), StockDelta::new("Red", 50, 100));
    }

    #[test]
    fn negative_quantity_is_rejected() {
        let res: Result<StockDeltaRequest, _> =
            serde_json::from_str(r#"{"color":"red","cottonPart":50,"quantity":-1}"#);
        assert!(res.is_err());
    }
}
