//! 门票导出模块
//!
//! 三条导出路径，全部在客户端完成：
//! - [`build_ticket_pdf`]：固定模板的单页 A4 PDF（页眉、两栏详情、
//!   内嵌二维码、票根虚线、页脚），printpdf 命令式绘制
//! - [`download_bytes`]：Blob + 临时 `<a download>` 触发浏览器下载
//! - [`sanitize`]：打印截取页面票卡前的颜色兜底改写。部分渲染管线
//!   不认识宽色域颜色函数，遇到即改写为固定回退色。该兜底只在
//!   本模块内使用，不对外扩散。

use eventhub_shared::{Ticket, date, format_amount};
use printpdf::{
    BuiltinFont, Color, Image, ImageTransform, Line, LineDashPattern, Mm, PdfDocument, Point, Rgb,
};
use std::io::Cursor;
use wasm_bindgen::JsCast;

// =========================================================
// 错误类型
// =========================================================

#[derive(Debug)]
pub enum ExportError {
    Pdf(String),
    Download(String),
}

impl core::fmt::Display for ExportError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ExportError::Pdf(msg) => write!(f, "pdf build failed: {}", msg),
            ExportError::Download(msg) => write!(f, "download failed: {}", msg),
        }
    }
}

impl std::error::Error for ExportError {}

// =========================================================
// PDF 模板
// =========================================================

const PAGE_WIDTH: f64 = 210.0;
const PAGE_HEIGHT: f64 = 297.0;
const MARGIN: f64 = 15.0;
const LINE_HEIGHT: f64 = 7.0;

// 模板用色（与站内门票卡一致）
const BRAND_BLUE: (u8, u8, u8) = (38, 99, 235);
const INK: (u8, u8, u8) = (31, 41, 55);
const MUTED: (u8, u8, u8) = (107, 114, 128);
const FAINT: (u8, u8, u8) = (156, 163, 175);
const RULE: (u8, u8, u8) = (229, 231, 235);

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(Rgb::new(
        (r as f64 / 255.0) as _,
        (g as f64 / 255.0) as _,
        (b as f64 / 255.0) as _,
        None,
    ))
}

/// 毫米坐标
fn mm(v: f64) -> Mm {
    Mm(v as _)
}

/// 顶部坐标转 PDF 坐标（printpdf 原点在左下角）
fn top(y: f64) -> Mm {
    mm(PAGE_HEIGHT - y)
}

fn horizontal_rule(layer: &printpdf::PdfLayerReference, y: f64) {
    let line = Line {
        points: vec![
            (Point::new(mm(MARGIN), top(y)), false),
            (Point::new(mm(PAGE_WIDTH - MARGIN), top(y)), false),
        ],
        is_closed: false,
    };
    layer.add_line(line);
}

/// 渲染固定模板的门票 PDF 并返回字节
///
/// `qr_png` 是预先抓取的二维码 PNG 字节；抓取或解码失败时跳过
/// 二维码，其余版面照常输出。
pub fn build_ticket_pdf(
    ticket: &Ticket,
    qr_png: Option<&[u8]>,
    generated_at: &str,
) -> Result<Vec<u8>, ExportError> {
    let (doc, page, layer_index) =
        PdfDocument::new("EventHub Ticket", mm(PAGE_WIDTH), mm(PAGE_HEIGHT), "ticket");
    let layer = doc.get_page(page).get_layer(layer_index);

    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;

    // 页眉
    layer.set_fill_color(rgb(BRAND_BLUE));
    layer.use_text("EventHub", 20.0, mm(MARGIN), top(MARGIN + 10.0), &bold);
    layer.set_fill_color(rgb(MUTED));
    layer.use_text("OFFICIAL TICKET", 10.0, mm(MARGIN), top(MARGIN + 15.0), &regular);

    // 活动标题 + 分隔线
    layer.set_fill_color(rgb(INK));
    layer.use_text(
        ticket.event_title.as_str(),
        18.0,
        mm(MARGIN),
        top(MARGIN + 30.0),
        &bold,
    );
    layer.set_outline_color(rgb(RULE));
    layer.set_outline_thickness(0.4);
    horizontal_rule(&layer, MARGIN + 35.0);

    // 两栏详情
    let start_y = MARGIN + 45.0;
    let right_x = MARGIN + 100.0;

    let label = |layer: &printpdf::PdfLayerReference, text: &str, x: f64, y: f64| {
        layer.set_fill_color(rgb(MUTED));
        layer.use_text(text, 10.0, mm(x), top(y), &regular);
    };
    let value = |layer: &printpdf::PdfLayerReference, text: &str, x: f64, y: f64| {
        layer.set_fill_color(rgb(INK));
        layer.use_text(text, 12.0, mm(x), top(y + 5.0), &regular);
    };

    label(&layer, "DATE & TIME", MARGIN, start_y);
    value(&layer, &date::format_short(&ticket.event_date), MARGIN, start_y);

    label(&layer, "LOCATION", MARGIN, start_y + LINE_HEIGHT * 2.0);
    value(
        &layer,
        ticket.event_location.as_str(),
        MARGIN,
        start_y + LINE_HEIGHT * 2.0,
    );

    label(&layer, "TICKETS", MARGIN, start_y + LINE_HEIGHT * 4.0);
    let quantity_text = if ticket.quantity > 1 {
        format!("{} tickets", ticket.quantity)
    } else {
        "1 ticket".to_string()
    };
    value(&layer, &quantity_text, MARGIN, start_y + LINE_HEIGHT * 4.0);

    label(&layer, "REFERENCE", right_x, start_y);
    value(&layer, ticket.reference.as_str(), right_x, start_y);

    label(&layer, "AMOUNT", right_x, start_y + LINE_HEIGHT * 2.0);
    // 内置字体是 WinAnsi 编码，₦ 不可用，金额前缀用 NGN
    let amount_text = ticket
        .amount_paid
        .map(|a| format!("NGN {}", format_amount(a)))
        .unwrap_or_else(|| "-".to_string());
    value(&layer, &amount_text, right_x, start_y + LINE_HEIGHT * 2.0);

    // 二维码（可选）
    if let Some(bytes) = qr_png {
        if let Err(reason) = embed_qr(&doc, page, bytes, start_y) {
            // 二维码失败不致命，其余版面继续
            web_sys::console::log_1(&format!("[Export] QR embed skipped: {}", reason).into());
        }
    }

    // 票根虚线
    layer.set_outline_color(rgb(RULE));
    layer.set_line_dash_pattern(LineDashPattern {
        offset: 0,
        dash_1: Some(2),
        gap_1: Some(2),
        ..Default::default()
    });
    horizontal_rule(&layer, start_y + LINE_HEIGHT * 6.0 + 10.0);
    layer.set_line_dash_pattern(LineDashPattern::default());

    // 页脚
    let footer_y = PAGE_HEIGHT - MARGIN - 10.0;
    layer.set_fill_color(rgb(FAINT));
    layer.use_text(
        format!("Generated on {}", generated_at),
        8.0,
        mm(MARGIN),
        top(footer_y),
        &regular,
    );
    layer.use_text(
        "EventHub - Your trusted ticketing platform",
        8.0,
        mm(PAGE_WIDTH - MARGIN - 60.0),
        top(footer_y),
        &regular,
    );

    doc.save_to_bytes().map_err(|e| ExportError::Pdf(e.to_string()))
}

/// 把二维码 PNG 以 40mm 见方放到右下详情区
fn embed_qr(
    doc: &printpdf::PdfDocumentReference,
    page: printpdf::indices::PdfPageIndex,
    bytes: &[u8],
    start_y: f64,
) -> Result<(), String> {
    use printpdf::image_crate::codecs::png::PngDecoder;

    let decoder = PngDecoder::new(Cursor::new(bytes)).map_err(|e| e.to_string())?;
    let image = Image::try_from(decoder).map_err(|e| e.to_string())?;

    const QR_SIZE_MM: f64 = 40.0;
    let dpi = 300.0_f64;
    let px_w = image.image.width.0 as f64;
    let px_h = image.image.height.0 as f64;
    if px_w == 0.0 || px_h == 0.0 {
        return Err("empty image".to_string());
    }
    // px -> mm（按 DPI），再缩放到目标边长
    let natural_w_mm = px_w * 25.4 / dpi;
    let natural_h_mm = px_h * 25.4 / dpi;

    let qr_x = PAGE_WIDTH - MARGIN - QR_SIZE_MM;
    let qr_y_top = start_y + LINE_HEIGHT * 4.0 + QR_SIZE_MM;

    let layer = doc.get_page(page).add_layer("qr");
    image.add_to_layer(
        layer,
        ImageTransform {
            translate_x: Some(mm(qr_x)),
            translate_y: Some(top(qr_y_top)),
            scale_x: Some((QR_SIZE_MM / natural_w_mm) as _),
            scale_y: Some((QR_SIZE_MM / natural_h_mm) as _),
            dpi: Some(dpi as _),
            ..Default::default()
        },
    );
    Ok(())
}

// =========================================================
// 浏览器下载
// =========================================================

/// 以 Blob + 临时锚点触发下载
pub fn download_bytes(filename: &str, mime: &str, bytes: &[u8]) -> Result<(), ExportError> {
    let array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::new();
    parts.push(&array.buffer());

    let props = web_sys::BlobPropertyBag::new();
    props.set_type(mime);
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &props)
        .map_err(|e| ExportError::Download(format!("{:?}", e)))?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)
        .map_err(|e| ExportError::Download(format!("{:?}", e)))?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| ExportError::Download("no document".to_string()))?;
    let anchor: web_sys::HtmlAnchorElement = document
        .create_element("a")
        .map_err(|e| ExportError::Download(format!("{:?}", e)))?
        .dyn_into()
        .map_err(|_| ExportError::Download("anchor cast failed".to_string()))?;

    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor.click();

    let _ = web_sys::Url::revoke_object_url(&url);
    Ok(())
}

// =========================================================
// 颜色兜底改写（打印截取前）
// =========================================================

pub mod sanitize {
    use wasm_bindgen::JsCast;

    /// 渲染管线无法解析的颜色函数前缀
    /// （`lab(`/`lch(` 同时覆盖 `oklab(`/`oklch(` 的尾串，保持列表完整以便阅读）
    pub const UNSUPPORTED_COLOR_FNS: [&str; 6] =
        ["oklch(", "oklab(", "lab(", "lch(", "color-mix(", "color("];

    /// 可能携带颜色值的属性及其回退值
    const FALLBACKS: [(&str, &str); 13] = [
        ("color", "#1f2937"),
        ("background-color", "#ffffff"),
        ("border-color", "#e5e7eb"),
        ("border-top-color", "#e5e7eb"),
        ("border-right-color", "#e5e7eb"),
        ("border-bottom-color", "#e5e7eb"),
        ("border-left-color", "#e5e7eb"),
        ("outline-color", "#9ca3af"),
        ("text-decoration-color", "#1f2937"),
        ("fill", "#1f2937"),
        ("stroke", "#1f2937"),
        ("box-shadow", "none"),
        ("text-shadow", "none"),
    ];

    /// 值中是否出现不受支持的颜色函数
    pub fn has_unsupported_color(value: &str) -> bool {
        UNSUPPORTED_COLOR_FNS.iter().any(|f| value.contains(f))
    }

    /// 属性的回退值
    pub fn fallback_for(property: &str) -> &'static str {
        FALLBACKS
            .iter()
            .find(|(p, _)| *p == property)
            .map(|(_, v)| *v)
            .unwrap_or("inherit")
    }

    /// 深度遍历子树，把计算样式中不受支持的颜色改写为回退值
    pub fn rewrite_unsupported_colors(element: &web_sys::Element) {
        if let Some(window) = web_sys::window() {
            if let Ok(Some(style)) = window.get_computed_style(element) {
                for (property, _) in FALLBACKS {
                    let value = style.get_property_value(property).unwrap_or_default();
                    if has_unsupported_color(&value) {
                        if let Some(html) = element.dyn_ref::<web_sys::HtmlElement>() {
                            let _ = html.style().set_property(property, fallback_for(property));
                        }
                    }
                }
            }
        }

        let children = element.children();
        for i in 0..children.length() {
            if let Some(child) = children.item(i) {
                rewrite_unsupported_colors(&child);
            }
        }
    }

    /// 兜底路径：改写颜色后调用浏览器打印截取页面票卡
    pub fn print_card(card: &web_sys::Element) {
        rewrite_unsupported_colors(card);
        if let Some(window) = web_sys::window() {
            let _ = window.print();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn sample_ticket() -> Ticket {
        Ticket {
            reference: "EVT-2026-0001".into(),
            quantity: 2,
            amount_paid: Some(10_000.0),
            qr_code_url: None,
            event_title: "Lagos Tech Fest".into(),
            event_date: Utc.with_ymd_and_hms(2026, 9, 1, 18, 0, 0).unwrap(),
            event_location: "Landmark Centre".into(),
        }
    }

    #[test]
    fn pdf_bytes_have_header_and_content() {
        let bytes = build_ticket_pdf(&sample_ticket(), None, "Aug 5, 2026").unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 500);
    }

    #[test]
    fn single_ticket_pdf_builds_too() {
        let mut ticket = sample_ticket();
        ticket.quantity = 1;
        ticket.amount_paid = None;
        assert!(build_ticket_pdf(&ticket, None, "Aug 5, 2026").is_ok());
    }

    #[test]
    fn unsupported_color_classifier() {
        assert!(sanitize::has_unsupported_color("oklch(0.72 0.11 178)"));
        assert!(sanitize::has_unsupported_color("oklab(0.5 0.1 0.1)"));
        assert!(sanitize::has_unsupported_color(
            "color-mix(in srgb, red 40%, blue)"
        ));
        assert!(sanitize::has_unsupported_color("lab(52.2% 40.1 59.9)"));

        assert!(!sanitize::has_unsupported_color("rgb(31, 41, 55)"));
        assert!(!sanitize::has_unsupported_color("rgba(0,0,0,0.4)"));
        assert!(!sanitize::has_unsupported_color("#2563eb"));
        assert!(!sanitize::has_unsupported_color("none"));
        assert!(!sanitize::has_unsupported_color(""));
    }

    #[test]
    fn fallbacks_cover_color_properties() {
        assert_eq!(sanitize::fallback_for("color"), "#1f2937");
        assert_eq!(sanitize::fallback_for("background-color"), "#ffffff");
        assert_eq!(sanitize::fallback_for("box-shadow"), "none");
        assert_eq!(sanitize::fallback_for("unknown-prop"), "inherit");
    }
}
