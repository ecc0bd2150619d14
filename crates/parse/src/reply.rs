use std::str::FromStr;
use std::sync::OnceLock;

use paragon_core::LineItem;
use regex::Regex;
use rust_decimal::Decimal;

/// Digits, a decimal separator (`.` or `,`), digits — the shape of a price
/// on a Polish receipt.
fn price_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+[.,]\d+").expect("invalid regex"))
}

/// Build the instruction sent to the text backend.
///
/// The wording asks for one product per group of exactly three lines
/// (name, category, price) and warns that OCR output may contain typos —
/// [`parse_reply`] depends on the model honoring that shape.
pub fn build_prompt(receipt_text: &str, categories: &[String]) -> String {
    format!(
        "Będę ci wysyłał treść paragonu. Chciałbym żebyś wypisał mi produkty zawarte w tym paragonie.\n\
         Przypisz mi każdy produkt do jednej z kategorii.\n\
         Kategorie jakie masz do wyboru to: {categories}\n\
         \n\
         Zwróć uwagę, że niektóre nazwy produktów mogą mieć literówki.\n\
         \n\
         Niech odpowiedź będzie w takiej formie:\n\
         \n\
         NazwaProdukt1\n\
         KategoriaProdukt1\n\
         CenaProdukt1\n\
         \n\
         NazwaProdukt2\n\
         KategoriaProdukt2\n\
         CenaProdukt2\n\
         \n\
         Oto treść paragonu:\n\
         {receipt}",
        categories = categories.join(", "),
        receipt = receipt_text,
    )
}

/// Parse the backend's reply into line items.
///
/// Fixed-stride walk: trim every line, drop the blank ones, then read
/// consecutive non-overlapping triplets as name / category / price. A
/// trailing partial triplet is silently discarded. There is no further
/// validation: a stray commentary or header line in the reply shifts every
/// item after it. That stride is the parser's contract and is pinned by the
/// tests below.
pub fn parse_reply(reply: &str) -> Vec<LineItem> {
    let lines: Vec<&str> = reply
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    lines
        .chunks_exact(3)
        .map(|triplet| LineItem::new(triplet[0], triplet[1], extract_price(triplet[2])))
        .collect()
}

/// First price-shaped substring of `price_text`, comma normalized to a dot.
/// No match means no recognizable price: the item keeps a zero price rather
/// than failing the whole request.
pub fn extract_price(price_text: &str) -> Decimal {
    price_pattern()
        .find(price_text)
        .and_then(|m| Decimal::from_str(&m.as_str().replace(',', ".")).ok())
        .unwrap_or(Decimal::ZERO)
}
