//! Vendor markup tags
//!
//! Embedded in printable content and passed through uninterpreted to the
//! device firmware.

/// Audio alert played for a cancelled order
pub const AUDIO_CANCEL: &str = "<AUDIO-CANCEL>";

/// Audio alert played for a refund request
pub const AUDIO_REFUND: &str = "<AUDIO-REFUND>";

/// Extra line feed
pub const BREAK: &str = "<BR>";

/// Centered double-size bold text
pub fn center_bold(s: &str) -> String {
    format!("<CB>{s}</CB>")
}

/// Centered text
pub fn center(s: &str) -> String {
    format!("<C>{s}</C>")
}

/// Left-aligned text
pub fn left(s: &str) -> String {
    format!("<L>{s}</L>")
}

/// Bold emphasis
pub fn bold(s: &str) -> String {
    format!("<BOLD>{s}</BOLD>")
}

/// QR code carrying machine-readable data
pub fn qr(s: &str) -> String {
    format!("<QR>{s}</QR>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrappers() {
        assert_eq!(center_bold("新订单通知"), "<CB>新订单通知</CB>");
        assert_eq!(center("x"), "<C>x</C>");
        assert_eq!(left("x"), "<L>x</L>");
        assert_eq!(bold("x"), "<BOLD>x</BOLD>");
        assert_eq!(qr("reference=R1"), "<QR>reference=R1</QR>");
    }
}
