//! Header normalization and keyword-based column resolution.

/// Folds a header into a canonical form: lowercase ASCII with accents
/// removed and separators collapsed to underscores.
///
/// # Example
///
/// ```
/// use benefit_engine::adapter::normalize_header;
///
/// assert_eq!(normalize_header("DATA DEMISSÃO"), "data_demissao");
/// assert_eq!(normalize_header(" Sindicato do Colaborador "), "sindicato_do_colaborador");
/// ```
pub fn normalize_header(header: &str) -> String {
    let mut out = String::with_capacity(header.len());
    let mut last_was_sep = true;
    for c in header.trim().chars() {
        let folded = fold_accent(c).unwrap_or(c);
        let lower = folded.to_ascii_lowercase();
        if lower.is_ascii_alphanumeric() {
            out.push(lower);
            last_was_sep = false;
        } else if !last_was_sep {
            out.push('_');
            last_was_sep = true;
        }
    }
    while out.ends_with('_') {
        out.pop();
    }
    out
}

/// Maps common Latin accented characters to their ASCII base.
fn fold_accent(c: char) -> Option<char> {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' | 'Á' | 'À' | 'Â' | 'Ã' | 'Ä' => Some('a'),
        'é' | 'è' | 'ê' | 'ë' | 'É' | 'È' | 'Ê' | 'Ë' => Some('e'),
        'í' | 'ì' | 'î' | 'ï' | 'Í' | 'Ì' | 'Î' | 'Ï' => Some('i'),
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' | 'Ó' | 'Ò' | 'Ô' | 'Õ' | 'Ö' => Some('o'),
        'ú' | 'ù' | 'û' | 'ü' | 'Ú' | 'Ù' | 'Û' | 'Ü' => Some('u'),
        'ç' | 'Ç' => Some('c'),
        'ñ' | 'Ñ' => Some('n'),
        _ => None,
    }
}

/// Finds the first header containing any of the keywords, in keyword order.
///
/// Headers are normalized before matching; keywords are expected in
/// normalized form already (lowercase, no accents).
pub fn find_column(headers: &[String], keywords: &[&str]) -> Option<usize> {
    let normalized: Vec<String> = headers.iter().map(|h| normalize_header(h)).collect();
    for keyword in keywords {
        for (idx, header) in normalized.iter().enumerate() {
            if header.contains(keyword) {
                return Some(idx);
            }
        }
    }
    None
}

/// Finds the first header exactly equal to one of the keywords after
/// normalization. Used for short tokens ("vr", "va") where substring
/// matching would be ambiguous.
pub fn find_column_exact(headers: &[String], keywords: &[&str]) -> Option<usize> {
    let normalized: Vec<String> = headers.iter().map(|h| normalize_header(h)).collect();
    for keyword in keywords {
        for (idx, header) in normalized.iter().enumerate() {
            if header == keyword {
                return Some(idx);
            }
        }
    }
    None
}
