use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use qrcode::{render::svg, QrCode};

const SVG_DATA: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b']')
    .add(b'{')
    .add(b'}');

pub fn svg_to_data_url(svg: &str) -> String {
    format!(
        "data:image/svg+xml;charset=utf-8,{}",
        utf8_percent_encode(svg, SVG_DATA)
    )
}

pub fn render_qr_svg(payload: &str) -> Option<String> {
    QrCode::new(payload.as_bytes())
        .map(|code| {
            code.render::<svg::Color>()
                .min_dimensions(256, 256)
                .quiet_zone(true)
                .build()
        })
        .map_err(|err| log::warn!("qr render failed: {}", err))
        .ok()
}

/// Backend QR codes usually arrive as image data URLs; raw payloads are rendered locally.
pub fn qr_image_src(qr_code: &str) -> Option<String> {
    let trimmed = qr_code.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.starts_with("data:image") || trimmed.starts_with("http") {
        return Some(trimmed.to_string());
    }
    render_qr_svg(trimmed).map(|svg| svg_to_data_url(&svg))
}

/// File extension matching the image source, for downloads.
pub fn qr_file_extension(src: &str) -> &'static str {
    if src.starts_with("data:image/svg") {
        "svg"
    } else {
        "png"
    }
}
