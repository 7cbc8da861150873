pub mod market_table;
pub mod tgju;
