//! Common regex patterns for Slovenian land-sale notices.
//!
//! OCR output of these notices regularly loses or garbles diacritics
//! (`š` read as `s`, or as the UTF-8-as-Latin-1 pair `Å¡`), so every
//! literal with a diacritic accepts those variants.

use lazy_static::lazy_static;
use regex::Regex;

/// `š` / `s` / `Å¡`
const S_CARON: &str = "(?:š|s|Å¡)";
/// `č` / `c` / `Ä` (second byte of the mojibake pair is often dropped)
const C_CARON: &str = "(?:č|c|Ä\u{8d}?)";
/// `ž` / `z` / `Å¾`
const Z_CARON: &str = "(?:ž|z|Å¾)";
/// `²` / `2` / `Â²` / unreadable `?`
const SQUARED: &str = "(?:²|2|Â²|\\?)";

fn tolerant(pattern: &str) -> Regex {
    let expanded = pattern
        .replace("{S}", S_CARON)
        .replace("{C}", C_CARON)
        .replace("{Z}", Z_CARON)
        .replace("{SQ}", SQUARED);
    Regex::new(&expanded).unwrap()
}

lazy_static! {
    // Cadastral parcel number: block/sub-number
    pub static ref PARCEL_ID: Regex = Regex::new(
        r"\b(\d{1,4}/\d{1,3})\b"
    ).unwrap();

    // Template signatures
    pub static ref ELECTRONIC_SIGNATURE: Regex = Regex::new(
        r"(?i)DOKUMENT\s+JE\s+ELEKTRONSKO\s+PODPISAN"
    ).unwrap();

    pub static ref DOCUMENT_MARK: Regex = Regex::new(
        r"(?i)Oznaka\s+dokumenta.*?\d+-\d+"
    ).unwrap();

    pub static ref SKZG_FUND_NAME: Regex = tolerant(
        r"(?i)Sklad\s+kmetijskih\s+zemlji{S}{C}"
    );

    pub static ref SKZG_OFFER_NUMBER: Regex = tolerant(
        r"(?i)PONUDBO\s+{S}t\b"
    );

    // Electronic form labelled fields
    pub static ref EFORM_PARCEL: Regex = tolerant(
        r"Parcelna\s+{S}tevilka:\s*(\d+/\d+)"
    );

    pub static ref EFORM_PRICE: Regex = Regex::new(
        r"Cena[/\s]*EUR:\s*(\d{1,3}(?:\.\d{3})+(?:,\d{2})?|\d+(?:[.,]\d{2})?)"
    ).unwrap();

    pub static ref EFORM_AREA: Regex = tolerant(
        r"Povr{S}ina\s*\(m{SQ}\):\s*(\d+)"
    );

    pub static ref EFORM_SHARE: Regex = tolerant(
        r"(?i)kak{S}en\s+dele{Z}.*?prodajate.*?(\d+/\d+)"
    );

    // Areas near a parcel number
    pub static ref STANDALONE_NUMBER: Regex = Regex::new(
        r"\b(\d{1,6})\b"
    ).unwrap();

    pub static ref AREA_WITH_UNIT: Regex = tolerant(
        r"\b(\d{2,6})\s*(?:m{SQ}?)?"
    );

    // Total price
    pub static ref TOTAL_PRICE_LABELED: Regex = Regex::new(
        r"(?i)Cena\s+skupaj:\s*(\d{1,6}(?:[.,]\d{3})*(?:[.,]\d{2})?)"
    ).unwrap();

    pub static ref AMOUNT_WITH_CURRENCY: Regex = Regex::new(
        r"(\d{1,6}[.,]\d{3}[.,]\d{2})\s*(?:EUR|€)"
    ).unwrap();

    // Buyer status
    pub static ref BUYER_KNOWN_EXPLICIT: Regex = Regex::new(
        r"(?i)KUPEC\s+(?:JE\s+)?ZNAN"
    ).unwrap();

    pub static ref BUYER_KNOWN_LOOSE: Regex = Regex::new(
        r"(?i)kupec.*?znan"
    ).unwrap();

    pub static ref BUYER_NOT_KNOWN: Regex = Regex::new(
        r"(?i)KUPEC\s+NI\s+ZNAN"
    ).unwrap();
}
