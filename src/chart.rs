// src/chart.rs

use crate::config::{
    AREA_FILL_COLOR, CANDLE_WIDTH_DAYS, CHART_HEIGHT, CHART_WIDTH, DOWN_COLOR, UP_COLOR,
};
use crate::series::PriceSeries;
use chrono::{Datelike, NaiveDate};
use eframe::egui::{self, Color32, ColorImage, Pos2, Rect, Stroke};
use egui_plot::{BoxElem, BoxPlot, BoxSpread, GridMark, Line, Plot, PlotPoints};
use std::path::Path;

/// The View menu's chart types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartKind {
    #[default]
    Line,
    Area,
    Candlestick,
}

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [ChartKind::Line, ChartKind::Area, ChartKind::Candlestick];

    pub fn label(self) -> &'static str {
        match self {
            ChartKind::Line => "Line",
            ChartKind::Area => "Area",
            ChartKind::Candlestick => "Candlesticks",
        }
    }
}

/// Plot x coordinate of a bar: its day number.
#[inline]
pub fn date_to_x(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

#[inline]
pub fn x_to_date(x: f64) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(x.round() as i32)
}

/// `[x, close]` pairs for the line and area charts.
pub fn line_points(series: &PriceSeries) -> Vec<[f64; 2]> {
    series
        .candles
        .iter()
        .map(|c| [date_to_x(c.date), c.close])
        .collect()
}

/// Geometry of one candlestick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandleShape {
    pub x: f64,
    pub low: f64,
    pub body_low: f64,
    pub body_high: f64,
    pub high: f64,
    pub rising: bool,
}

pub fn candle_shapes(series: &PriceSeries) -> Vec<CandleShape> {
    series
        .candles
        .iter()
        .map(|c| CandleShape {
            x: date_to_x(c.date),
            low: c.low,
            body_low: c.open.min(c.close),
            body_high: c.open.max(c.close),
            high: c.high,
            rising: c.is_rising(),
        })
        .collect()
}

fn candle_color(rising: bool) -> Color32 {
    if rising { UP_COLOR } else { DOWN_COLOR }
}

/// Draws the series and returns the screen rect the plot occupies.
pub fn show_chart(ui: &mut egui::Ui, kind: ChartKind, series: &PriceSeries) -> Rect {
    let response = Plot::new("price_chart")
        .width(CHART_WIDTH)
        .height(CHART_HEIGHT)
        .x_axis_label("Year")
        .y_axis_label("Price")
        .x_axis_formatter(|mark: GridMark, _chars, _range| {
            x_to_date(mark.value)
                .map(|d| d.format("%Y-%m").to_string())
                .unwrap_or_default()
        })
        .label_formatter(|_name, point| match x_to_date(point.x) {
            Some(date) => format!("{date}\n{:.2}", point.y),
            None => String::new(),
        })
        .allow_scroll(false)
        .show(ui, |plot_ui| match kind {
            ChartKind::Line => {
                let line = Line::new(PlotPoints::from(line_points(series)))
                    .stroke(Stroke::new(1.5, Color32::LIGHT_BLUE))
                    .name(&series.ticker);
                plot_ui.line(line);
            }
            ChartKind::Area => {
                let area = Line::new(PlotPoints::from(line_points(series)))
                    .color(AREA_FILL_COLOR)
                    .fill(0.0_f32)
                    .name(&series.ticker);
                plot_ui.line(area);
            }
            ChartKind::Candlestick => {
                let boxes: Vec<BoxElem> = candle_shapes(series)
                    .into_iter()
                    .map(|c| {
                        let color = candle_color(c.rising);
                        let spread = BoxSpread::new(
                            c.low,
                            c.body_low,
                            (c.body_low + c.body_high) / 2.0,
                            c.body_high,
                            c.high,
                        );
                        BoxElem::new(c.x, spread)
                            .box_width(CANDLE_WIDTH_DAYS)
                            .whisker_width(0.0)
                            .fill(color)
                            .stroke(Stroke::new(1.0, color))
                    })
                    .collect();
                plot_ui.box_plot(BoxPlot::new(boxes).name(&series.ticker));
            }
        });
    response.response.rect
}

/// Crops a viewport screenshot to `rect` (in points), clipped to the part of
/// the screenshot it overlaps. `None` when nothing of `rect` is on screen.
pub fn crop_screenshot(screenshot: &ColorImage, rect: Rect, pixels_per_point: f32) -> Option<ColorImage> {
    let [width, height] = screenshot.size;
    let screen = Rect::from_min_size(
        Pos2::ZERO,
        egui::vec2(width as f32, height as f32) / pixels_per_point,
    );
    let visible = rect.intersect(screen);
    let pixel_width = (visible.width() * pixels_per_point) as usize;
    let pixel_height = (visible.height() * pixels_per_point) as usize;
    if !visible.is_positive() || pixel_width == 0 || pixel_height == 0 {
        return None;
    }
    Some(screenshot.region(&visible, Some(pixels_per_point)))
}

pub fn save_png(image: &ColorImage, path: &Path) -> image::ImageResult<()> {
    let [width, height] = image.size;
    image::save_buffer_with_format(
        path,
        image.as_raw(),
        width as u32,
        height as u32,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
}
