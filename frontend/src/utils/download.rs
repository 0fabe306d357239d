use wasm_bindgen::JsCast;

use crate::utils::qr::qr_file_extension;

pub fn qr_download_name(session_id: &str, src: &str) -> String {
    format!("qr-{}.{}", session_id, qr_file_extension(src))
}

pub fn trigger_url_download(filename: &str, url: &str) -> Result<(), String> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or("No document")?;
    let element = document
        .create_element("a")
        .map_err(|_| "Failed to create link".to_string())?;
    let a = element
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| "Failed to cast anchor".to_string())?;
    a.set_href(url);
    a.set_download(filename);
    a.style().set_property("display", "none").ok();
    document
        .body()
        .ok_or("No body")?
        .append_child(&a)
        .map_err(|_| "Append failed".to_string())?;
    a.click();
    a.remove();
    Ok(())
}

fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

pub fn print_document_html(session_name: &str, session_id: &str, pin: Option<&str>, src: &str) -> String {
    let pin_line = pin
        .map(|pin| format!("<p class=\"pin\">PIN: {}</p>", escape_html(pin)))
        .unwrap_or_default();
    format!(
        "<div style=\"text-align:center;font-family:sans-serif;padding:40px\">\
         <h1>{}</h1>\
         <img src=\"{}\" alt=\"QR\" style=\"width:320px;height:320px\" />\
         <p class=\"session-id\">ID: {}</p>{}\
         <p>Escanea este código para registrar tu asistencia 🌸</p>\
         </div>",
        escape_html(session_name),
        escape_html(src),
        escape_html(session_id),
        pin_line
    )
}

/// Opens a print window with the QR and triggers the browser print dialog.
pub fn print_qr(session_name: &str, session_id: &str, pin: Option<&str>, src: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("No window")?;
    let popup = window
        .open_with_url_and_target("", "_blank")
        .map_err(|_| "Failed to open print window".to_string())?
        .ok_or("Print window blocked")?;
    let document = popup.document().ok_or("No document")?;
    document.set_title(&format!("QR - {}", session_name));
    document
        .body()
        .ok_or("No body")?
        .set_inner_html(&print_document_html(session_name, session_id, pin, src));
    gloo_timers::callback::Timeout::new(250, move || {
        let _ = popup.print();
    })
    .forget();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn download_name_uses_session_id() {
        assert_eq!(
            qr_download_name("EMA-01", "data:image/png;base64,AA"),
            "qr-EMA-01.png"
        );
    }

    #[test]
    fn print_html_escapes_session_name() {
        let html = print_document_html("<Retiro>", "EMA-01", Some("4821"), "data:image/png;base64,AA");
        assert!(html.contains("&lt;Retiro&gt;"));
        assert!(html.contains("PIN: 4821"));
        assert!(html.contains("ID: EMA-01"));
    }
}
