//! WinAnsiEncoding (Windows-1252), the single-byte code page used for all
//! text in the output. Characters outside it are replaced with `?`.

const HIGH: [(u8, char); 27] = [
    (0x80, '\u{20AC}'),
    (0x82, '\u{201A}'),
    (0x83, '\u{0192}'),
    (0x84, '\u{201E}'),
    (0x85, '\u{2026}'),
    (0x86, '\u{2020}'),
    (0x87, '\u{2021}'),
    (0x88, '\u{02C6}'),
    (0x89, '\u{2030}'),
    (0x8A, '\u{0160}'),
    (0x8B, '\u{2039}'),
    (0x8C, '\u{0152}'),
    (0x8E, '\u{017D}'),
    (0x91, '\u{2018}'),
    (0x92, '\u{2019}'),
    (0x93, '\u{201C}'),
    (0x94, '\u{201D}'),
    (0x95, '\u{2022}'),
    (0x96, '\u{2013}'),
    (0x97, '\u{2014}'),
    (0x98, '\u{02DC}'),
    (0x99, '\u{2122}'),
    (0x9A, '\u{0161}'),
    (0x9B, '\u{203A}'),
    (0x9C, '\u{0153}'),
    (0x9E, '\u{017E}'),
    (0x9F, '\u{0178}'),
];

pub fn encode_char(c: char) -> u8 {
    let cp = c as u32;
    if cp < 0x80 || (0xA0..=0xFF).contains(&cp) {
        return cp as u8;
    }
    HIGH.iter()
        .find(|(_, ch)| *ch == c)
        .map(|(b, _)| *b)
        .unwrap_or(b'?')
}

pub fn decode_byte(b: u8) -> Option<char> {
    match b {
        0x00..=0x7F | 0xA0..=0xFF => Some(b as char),
        _ => HIGH.iter().find(|(code, _)| *code == b).map(|(_, c)| *c),
    }
}

pub fn encode(s: &str) -> Vec<u8> {
    s.chars().map(encode_char).collect()
}
