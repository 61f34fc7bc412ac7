//! Font-aware decoding of PDF string operands
//!
//! Character codes go through the font's `/ToUnicode` CMap when it has one,
//! otherwise through a simple font's `/Encoding` (a base encoding overlaid
//! with `/Differences`). Fonts with neither fall back to guessing from the
//! bytes themselves.

use lazy_static::lazy_static;
use lopdf::{Dictionary, Document, Object};
use regex::Regex;
use std::collections::HashMap;
use tracing::{debug, warn};

lazy_static! {
    static ref CODESPACE_SECTION: Regex =
        Regex::new(r"(?s)begincodespacerange(.*?)endcodespacerange").unwrap();
    static ref BFCHAR_SECTION: Regex = Regex::new(r"(?s)beginbfchar(.*?)endbfchar").unwrap();
    static ref BFRANGE_SECTION: Regex = Regex::new(r"(?s)beginbfrange(.*?)endbfrange").unwrap();
    static ref HEX_STRING: Regex = Regex::new(r"<([0-9A-Fa-f\s]*)>").unwrap();
    static ref BFRANGE_ENTRY: Regex = Regex::new(
        r"<([0-9A-Fa-f]+)>\s*<([0-9A-Fa-f]+)>\s*(<[0-9A-Fa-f\s]*>|\[[^\]]*\])"
    )
    .unwrap();
}

/// Upper bound on codes expanded from one `bfrange` entry
const MAX_RANGE: u32 = 0xFFFF;

/// Codes to Unicode, parsed from a `/ToUnicode` CMap stream
#[derive(Debug, Clone, Default)]
pub struct ToUnicodeMap {
    code_len: usize,
    map: HashMap<u32, String>,
}

impl ToUnicodeMap {
    /// Parse CMap source. `default_len` is the code width in bytes used when
    /// the CMap declares no codespace range.
    pub fn parse(data: &[u8], default_len: usize) -> Self {
        let content = String::from_utf8_lossy(data);
        let mut map = HashMap::new();

        let code_len = CODESPACE_SECTION
            .captures(&content)
            .and_then(|caps| {
                HEX_STRING
                    .captures(caps.get(1)?.as_str())
                    .map(|hex| hex_digits(&hex[1]).len() / 2)
            })
            .filter(|len| (1..=4).contains(len))
            .unwrap_or(default_len.max(1));

        for section in BFCHAR_SECTION.captures_iter(&content) {
            let entries: Vec<String> = HEX_STRING
                .captures_iter(&section[1])
                .map(|caps| hex_digits(&caps[1]))
                .collect();
            for pair in entries.chunks_exact(2) {
                if let (Some(code), Some(text)) = (parse_code(&pair[0]), utf16_from_hex(&pair[1])) {
                    map.insert(code, text);
                }
            }
        }

        for section in BFRANGE_SECTION.captures_iter(&content) {
            for entry in BFRANGE_ENTRY.captures_iter(&section[1]) {
                let (Some(lo), Some(hi)) = (parse_code(&entry[1]), parse_code(&entry[2])) else {
                    continue;
                };
                if hi < lo || hi - lo > MAX_RANGE {
                    warn!("Skipping bfrange <{:X}> <{:X}>", lo, hi);
                    continue;
                }
                let target = &entry[3];
                if target.starts_with('[') {
                    for (code, caps) in (lo..=hi).zip(HEX_STRING.captures_iter(target)) {
                        if let Some(text) = utf16_from_hex(&hex_digits(&caps[1])) {
                            map.insert(code, text);
                        }
                    }
                } else if let Some(units) = utf16_units(&hex_digits(target)) {
                    for (offset, code) in (lo..=hi).enumerate() {
                        let mut units = units.clone();
                        if let Some(last) = units.last_mut() {
                            *last = last.wrapping_add(offset as u16);
                        }
                        map.insert(code, String::from_utf16_lossy(&units));
                    }
                }
            }
        }

        debug!("ToUnicode CMap: {} codes, {} byte(s) wide", map.len(), code_len);
        Self { code_len, map }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Unmapped codes are dropped
    pub fn decode(&self, bytes: &[u8]) -> String {
        bytes
            .chunks(self.code_len)
            .filter_map(|chunk| {
                let code = chunk.iter().fold(0u32, |acc, b| (acc << 8) | u32::from(*b));
                self.map.get(&code).map(String::as_str)
            })
            .collect()
    }
}

/// How a page font turns string bytes into text
#[derive(Debug, Clone)]
pub enum FontDecoder {
    /// `/ToUnicode` CMap
    Unicode(ToUnicodeMap),
    /// Single-byte encoding, one entry per code
    Simple(Vec<String>),
    /// No usable encoding information
    Unknown,
}

impl FontDecoder {
    pub fn from_font(doc: &Document, font: &Dictionary) -> Self {
        let subtype = font
            .get(b"Subtype")
            .and_then(Object::as_name_str)
            .unwrap_or_default();

        if let Ok(Object::Stream(stream)) = font.get_deref(b"ToUnicode", doc) {
            let data = stream
                .decompressed_content()
                .unwrap_or_else(|_| stream.content.clone());
            let default_len = if subtype == "Type0" { 2 } else { 1 };
            let map = ToUnicodeMap::parse(&data, default_len);
            if !map.is_empty() {
                return FontDecoder::Unicode(map);
            }
        }

        if subtype == "Type0" {
            warn!("Composite font without ToUnicode map; guessing text from bytes");
            return FontDecoder::Unknown;
        }

        match font.get_deref(b"Encoding", doc) {
            Ok(Object::Name(name)) => {
                FontDecoder::Simple(base_table(Some(&String::from_utf8_lossy(name))))
            }
            Ok(Object::Dictionary(encoding)) => {
                let base = encoding
                    .get(b"BaseEncoding")
                    .and_then(Object::as_name_str)
                    .ok();
                let mut table = base_table(base);
                if let Ok(differences) = encoding.get_deref(b"Differences", doc).and_then(Object::as_array) {
                    apply_differences(&mut table, differences);
                }
                FontDecoder::Simple(table)
            }
            _ => FontDecoder::Unknown,
        }
    }

    pub fn decode(&self, bytes: &[u8]) -> String {
        match self {
            FontDecoder::Unicode(map) => map.decode(bytes),
            FontDecoder::Simple(table) => bytes.iter().map(|&b| table[b as usize].as_str()).collect(),
            FontDecoder::Unknown => decode_string(bytes),
        }
    }
}

fn base_table(encoding: Option<&str>) -> Vec<String> {
    (0..=255u8)
        .map(|b| Document::decode_text(encoding, &[b]))
        .collect()
}

/// `[code /name /name ... code /name ...]`, consecutive names take consecutive codes
fn apply_differences(table: &mut [String], differences: &[Object]) {
    let mut code = 0usize;
    for item in differences {
        match item {
            Object::Integer(n) => code = usize::try_from(*n).unwrap_or(usize::MAX),
            Object::Name(name) => {
                if let Some(slot) = table.get_mut(code) {
                    match glyph_to_char(&String::from_utf8_lossy(name)) {
                        Some(c) => *slot = c.to_string(),
                        None => debug!("Unknown glyph name /{}", String::from_utf8_lossy(name)),
                    }
                }
                code = code.saturating_add(1);
            }
            _ => {}
        }
    }
}

/// Glyph names seen in Cyrillic plan exports: `uniXXXX`, `uXXXX`, the
/// `afii100xx` Cyrillic block, and plain ASCII punctuation and digits
fn glyph_to_char(name: &str) -> Option<char> {
    if let Some(hex) = name.strip_prefix("uni").filter(|h| h.len() == 4) {
        return u32::from_str_radix(hex, 16).ok().and_then(char::from_u32);
    }
    if let Some(hex) = name.strip_prefix('u').filter(|h| (4..=6).contains(&h.len())) {
        if let Some(c) = u32::from_str_radix(hex, 16).ok().and_then(char::from_u32) {
            return Some(c);
        }
    }
    if let Some(n) = name.strip_prefix("afii").and_then(|n| n.parse::<u32>().ok()) {
        return cyrillic_afii(n);
    }

    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return c.is_ascii_alphabetic().then_some(c);
    }

    let c = match name {
        "space" => ' ',
        "period" => '.',
        "comma" => ',',
        "hyphen" => '-',
        "colon" => ':',
        "semicolon" => ';',
        "parenleft" => '(',
        "parenright" => ')',
        "slash" => '/',
        "percent" => '%',
        "zero" => '0',
        "one" => '1',
        "two" => '2',
        "three" => '3',
        "four" => '4',
        "five" => '5',
        "six" => '6',
        "seven" => '7',
        "eight" => '8',
        "nine" => '9',
        _ => return None,
    };
    Some(c)
}

fn cyrillic_afii(n: u32) -> Option<char> {
    let code = match n {
        10017..=10022 => 0x0410 + (n - 10017),
        10023 => 0x0401,
        10024..=10049 => 0x0416 + (n - 10024),
        10050 => 0x0490,
        10051..=10061 => 0x0402 + (n - 10051),
        10062 => 0x040E,
        10065..=10070 => 0x0430 + (n - 10065),
        10071 => 0x0451,
        10072..=10097 => 0x0436 + (n - 10072),
        10098 => 0x0491,
        10099..=10109 => 0x0452 + (n - 10099),
        10110 => 0x045E,
        _ => return None,
    };
    char::from_u32(code)
}

/// UTF-16BE with BOM, then UTF-8, then Latin-1
pub fn decode_string(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let units: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        if let Ok(s) = String::from_utf16(&units) {
            return s;
        }
    }
    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }
    bytes.iter().map(|&b| b as char).collect()
}

fn hex_digits(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_whitespace()).collect()
}

fn parse_code(hex: &str) -> Option<u32> {
    if hex.is_empty() || hex.len() > 8 {
        return None;
    }
    u32::from_str_radix(hex, 16).ok()
}

fn utf16_units(hex: &str) -> Option<Vec<u16>> {
    if hex.is_empty() || hex.len() % 4 != 0 {
        return None;
    }
    (0..hex.len())
        .step_by(4)
        .map(|i| u16::from_str_radix(&hex[i..i + 4], 16).ok())
        .collect()
}

fn utf16_from_hex(hex: &str) -> Option<String> {
    utf16_units(hex).map(|units| String::from_utf16_lossy(&units))
}
