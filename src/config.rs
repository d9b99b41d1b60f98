// src/config.rs

//! A centralized place for the app's fixed look and endpoints.

use eframe::egui::Color32;

// --- Data provider ---
pub const ALPHA_VANTAGE_BASE_URL: &str = "https://www.alphavantage.co";
/// Free-tier allowance. Each quote costs two requests (quote + overview).
pub const DEFAULT_REQUESTS_PER_MINUTE: u32 = 5;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;
pub const USER_AGENT: &str = "stock-tracker/0.1";

// --- Tickers ---
pub const MAX_TICKER_LEN: usize = 10;

// --- Main window ---
pub const APP_TITLE: &str = "My Stock Tracker";
pub const WINDOW_SIZE: [f32; 2] = [560.0, 460.0];
pub const WINDOW_SIZE_WITH_CHART: [f32; 2] = [980.0, 460.0];
pub const HOMEPAGE_URL: &str = "https://github.com/kuckikirukia?tab=repositories";

// --- Table ---
pub const TABLE_HEADINGS: [&str; 6] = ["Ticker", "Price", "Change", "Change %", "52-week", "Market Cap"];
pub const EXPORT_HEADINGS: [&str; 6] = ["Security", "Price", "Change", "Change %", "52 Week", "Market Cap"];
pub const COLUMN_WIDTHS: [f32; 6] = [60.0, 60.0, 75.0, 75.0, 60.0, 100.0];
pub const TABLE_ROW_HEIGHT: f32 = 18.0;
pub const MISSING_CELL: &str = "-";

// --- Colours ---
pub const UP_COLOR: Color32 = Color32::from_rgb(0x00, 0xc2, 0x23);
pub const DOWN_COLOR: Color32 = Color32::from_rgb(0xe8, 0x3c, 0x3c);
pub const AREA_FILL_COLOR: Color32 = Color32::from_rgb(0x53, 0x9e, 0xcd);
pub const HOVER_COLOR: Color32 = Color32::from_rgb(0xe5, 0xf3, 0xff);
pub const ENTRY_TEXT_COLOR: Color32 = Color32::from_rgb(0x34, 0x63, 0xad);

// --- Chart ---
pub const CHART_WIDTH: f32 = 400.0;
pub const CHART_HEIGHT: f32 = 300.0;
/// Candle body width in days (monthly bars).
pub const CANDLE_WIDTH_DAYS: f64 = 20.0;
