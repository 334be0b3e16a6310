/// Tolerance for the position cost-basis consistency check.
pub const POSITION_COST_EPSILON: &str = "0.000001";

/// Maximum number of in-flight price lookups during enrichment.
pub const PRICE_FETCH_CONCURRENCY: usize = 8;

/// Column names expected in the brokerage export.
pub const COLUMN_INSTRUMENT: &str = "Instrument";
pub const COLUMN_TRANS_CODE: &str = "Trans Code";
pub const COLUMN_QUANTITY: &str = "Quantity";
pub const COLUMN_AMOUNT: &str = "Amount";
pub const COLUMN_ACTIVITY_DATE: &str = "Activity Date";
pub const COLUMN_PRICE: &str = "Price";
pub const COLUMN_FEES: &str = "Fees";

/// Date formats accepted for the activity date column.
pub const ACTIVITY_DATE_FORMATS: [&str; 2] = ["%m/%d/%Y", "%Y-%m-%d"];
