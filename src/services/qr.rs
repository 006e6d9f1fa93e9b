use crate::errors::ServiceError;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use image::{DynamicImage, ImageFormat, Luma};
use qrcode::QrCode;
use std::io::Cursor;

/// Payload encoded into a branch QR code.
pub fn branch_qr_payload(branch_id: i32) -> String {
    format!("BRANCH_{}", branch_id)
}

/// Renders the branch QR code as a base64 PNG data URL, suitable for
/// storing on the branch row and embedding directly in an <img> tag.
pub fn generate_branch_qr(branch_id: i32) -> Result<String, ServiceError> {
    let payload = branch_qr_payload(branch_id);
    let code = QrCode::new(payload.as_bytes())
        .map_err(|e| ServiceError::InternalError(format!("QR encoding failed: {}", e)))?;

    let img = code.render::<Luma<u8>>().min_dimensions(256, 256).build();

    let mut cursor = Cursor::new(Vec::<u8>::new());
    DynamicImage::ImageLuma8(img)
        .write_to(&mut cursor, ImageFormat::Png)
        .map_err(|e| ServiceError::InternalError(format!("QR rendering failed: {}", e)))?;

    let encoded = BASE64.encode(cursor.into_inner());
    Ok(format!("data:image/png;base64,{}", encoded))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_uses_branch_prefix() {
        assert_eq!(branch_qr_payload(42), "BRANCH_42");
    }

    #[test]
    fn generated_qr_is_png_data_url() {
        let url = generate_branch_qr(1).expect("qr generation");
        assert!(url.starts_with("data:image/png;base64,"));
        let png = BASE64
            .decode(url.trim_start_matches("data:image/png;base64,"))
            .expect("valid base64");
        // PNG magic bytes
        assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n']);
    }
}
