//! Prefilled mail links for requests the rate card cannot answer.

use crate::l10n::Language;

const HEX: &[u8; 16] = b"0123456789ABCDEF";

/// What the visitor typed into the contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub vehicle: String,
    pub message: String,
}

/// Builds a `mailto:` link that opens a draft to the office with the form
/// contents as subject and body.
pub fn mailto_link(to: &str, message: &ContactMessage, language: Language) -> String {
    let name = message.name.trim();
    let subject = match language {
        Language::En if name.is_empty() => "Storage request".to_string(),
        Language::Fr if name.is_empty() => "Demande d'entreposage".to_string(),
        Language::En => format!("Storage request from {name}"),
        Language::Fr => format!("Demande d'entreposage de {name}"),
    };
    let body = match language {
        Language::En => format!(
            "Name: {}\nEmail: {}\nVehicle: {}\n\n{}",
            name,
            message.email.trim(),
            message.vehicle.trim(),
            message.message.trim(),
        ),
        Language::Fr => format!(
            "Nom : {}\nCourriel : {}\nV\u{e9}hicule : {}\n\n{}",
            name,
            message.email.trim(),
            message.vehicle.trim(),
            message.message.trim(),
        ),
    };
    format!(
        "mailto:{to}?subject={}&body={}",
        percent_encode(&subject),
        percent_encode(&body)
    )
}

/// RFC 3986 strict percent-encoding over UTF-8 bytes; everything outside
/// the unreserved set is escaped, including spaces.
fn percent_encode(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char);
            }
            _ => {
                out.push('%');
                out.push(HEX[(byte >> 4) as usize] as char);
                out.push(HEX[(byte & 0x0f) as usize] as char);
            }
        }
    }
    out
}
