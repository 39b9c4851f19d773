//! Region inference from labor-union names.
//!
//! Employee datasets frequently omit a region column; the union name usually
//! carries one, either as a bare two-letter token ("... - SP") or as a
//! spelled-out state name.

/// Known region codes and the spelled-out aliases that map to them.
const REGION_ALIASES: &[(&str, &[&str])] = &[
    ("SP", &["sao paulo"]),
    ("RJ", &["rio de janeiro"]),
    ("MG", &["minas gerais"]),
    ("RS", &["rio grande do sul"]),
    ("PR", &["parana", "curitiba"]),
    ("SC", &["santa catarina"]),
    ("ES", &["espirito santo"]),
    ("BA", &["bahia"]),
    ("PE", &["pernambuco"]),
];

fn fold(text: &str) -> String {
    super::normalize_header(text).replace('_', " ")
}

/// Infers a two-letter region code from a union name.
///
/// A bare two-letter token matching a known code wins; otherwise spelled-out
/// aliases are tried. Returns `None` when nothing matches.
///
/// # Example
///
/// ```
/// use benefit_engine::adapter::infer_region;
///
/// assert_eq!(infer_region("Sindicato dos Comerciários - SP"), Some("SP"));
/// assert_eq!(infer_region("SIND. TRAB. RIO DE JANEIRO"), Some("RJ"));
/// assert_eq!(infer_region("Sindicato Nacional"), None);
/// ```
pub fn infer_region(union_name: &str) -> Option<&'static str> {
    let folded = fold(union_name);
    for token in folded.split_whitespace() {
        if token.len() == 2 {
            let upper = token.to_uppercase();
            if let Some((code, _)) = REGION_ALIASES.iter().find(|(c, _)| *c == upper) {
                return Some(code);
            }
        }
    }
    for (code, aliases) in REGION_ALIASES {
        if aliases.iter().any(|alias| folded.contains(alias)) {
            return Some(code);
        }
    }
    None
}
