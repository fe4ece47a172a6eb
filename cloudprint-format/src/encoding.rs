//! GBK width-unit math for Chinese thermal printers
//!
//! The reference device prints 32 cells per physical line. A cell is one
//! GBK byte: Chinese glyphs encode to 2 bytes and occupy 2 cells, ASCII
//! occupies 1.

/// Get the GBK cell width of a string
///
/// Chinese characters are typically 2 cells wide in GBK, ASCII is 1.
pub fn gbk_width(s: &str) -> usize {
    let (cow, _, _) = encoding_rs::GBK.encode(s);
    cow.len()
}

/// Get the GBK cell width of a single glyph (1 or 2)
pub fn glyph_width(c: char) -> usize {
    let mut buf = [0u8; 4];
    let (cow, _, _) = encoding_rs::GBK.encode(c.encode_utf8(&mut buf));
    cow.len()
}
