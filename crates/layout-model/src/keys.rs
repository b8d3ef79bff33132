//! Canonical forms for header names and cross-table join keys.
//!
//! Spreadsheet sources spell the same column in many ways ("Nome Campo",
//! "nome_campo", "NomeCampo") and store identifiers loosely typed ("1",
//! "1.0", "01"). Every comparison in the workspace goes through one of the
//! functions here so those spellings collapse to a single key.

/// Folds accented Latin letters to their ASCII base letter.
///
/// Characters without a known folding are kept unchanged.
pub fn fold_accents(text: &str) -> String {
    text.chars().map(fold_char).collect()
}

fn fold_char(ch: char) -> char {
    match ch {
        'á' | 'à' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => 'a',
        'Á' | 'À' | 'Â' | 'Ã' | 'Ä' | 'Å' | 'Ā' | 'Ă' | 'Ą' => 'A',
        'ç' | 'ć' | 'ĉ' | 'č' => 'c',
        'Ç' | 'Ć' | 'Ĉ' | 'Č' => 'C',
        'ď' | 'đ' => 'd',
        'Ď' | 'Đ' => 'D',
        'é' | 'è' | 'ê' | 'ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => 'e',
        'É' | 'È' | 'Ê' | 'Ë' | 'Ē' | 'Ĕ' | 'Ė' | 'Ę' | 'Ě' => 'E',
        'ĝ' | 'ğ' | 'ġ' | 'ģ' => 'g',
        'Ĝ' | 'Ğ' | 'Ġ' | 'Ģ' => 'G',
        'í' | 'ì' | 'î' | 'ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' => 'i',
        'Í' | 'Ì' | 'Î' | 'Ï' | 'Ĩ' | 'Ī' | 'Ĭ' | 'Į' | 'İ' => 'I',
        'ł' | 'ĺ' | 'ļ' | 'ľ' => 'l',
        'Ł' | 'Ĺ' | 'Ļ' | 'Ľ' => 'L',
        'ñ' | 'ń' | 'ņ' | 'ň' => 'n',
        'Ñ' | 'Ń' | 'Ņ' | 'Ň' => 'N',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ŏ' | 'ő' => 'o',
        'Ó' | 'Ò' | 'Ô' | 'Õ' | 'Ö' | 'Ø' | 'Ō' | 'Ŏ' | 'Ő' => 'O',
        'ŕ' | 'ř' => 'r',
        'Ŕ' | 'Ř' => 'R',
        'ś' | 'ş' | 'š' => 's',
        'Ś' | 'Ş' | 'Š' => 'S',
        'ţ' | 'ť' => 't',
        'Ţ' | 'Ť' => 'T',
        'ú' | 'ù' | 'û' | 'ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => 'u',
        'Ú' | 'Ù' | 'Û' | 'Ü' | 'Ũ' | 'Ū' | 'Ŭ' | 'Ů' | 'Ű' | 'Ų' => 'U',
        'ý' | 'ÿ' => 'y',
        'Ý' | 'Ÿ' => 'Y',
        'ź' | 'ż' | 'ž' => 'z',
        'Ź' | 'Ż' | 'Ž' => 'Z',
        other => other,
    }
}

/// Normalizes a column header for alias matching.
///
/// Accents are folded, the text is lowercased and whitespace, `_` and `-`
/// are dropped: `"Posição Inicial"`, `"posicao_inicial"` and
/// `"PosicaoInicial"` all become `"posicaoinicial"`.
pub fn normalize_header_key(header: &str) -> String {
    fold_accents(header)
        .chars()
        .filter(|ch| !ch.is_whitespace() && *ch != '_' && *ch != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Returns true when `header` matches any of `aliases` after normalization.
pub fn header_matches(header: &str, aliases: &[&str]) -> bool {
    let key = normalize_header_key(header);
    !key.is_empty() && aliases.iter().any(|alias| normalize_header_key(alias) == key)
}

/// Canonicalizes a join identifier.
///
/// Accent- and case-insensitive; numeric literals collapse to one form so
/// `"1"`, `"1.0"`, `"01"` and `" 1 "` share a key. Non-integral numbers drop
/// trailing zeros (`"1.50"` becomes `"1.5"`).
pub fn normalize_key(raw: &str) -> String {
    let folded = fold_accents(raw.trim()).to_lowercase();
    canonical_number(&folded).unwrap_or(folded)
}

/// Canonical decimal text for a plain numeric literal, `None` for anything else.
fn canonical_number(text: &str) -> Option<String> {
    let (negative, unsigned) = match text.as_bytes().first()? {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (unsigned, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(int_part) || !all_digits(frac_part) {
        return None;
    }

    let int_trimmed = int_part.trim_start_matches('0');
    let int_text = if int_trimmed.is_empty() { "0" } else { int_trimmed };
    let frac_text = frac_part.trim_end_matches('0');

    let mut out = String::with_capacity(text.len());
    let is_zero = int_text == "0" && frac_text.is_empty();
    if negative && !is_zero {
        out.push('-');
    }
    out.push_str(int_text);
    if !frac_text.is_empty() {
        out.push('.');
        out.push_str(frac_text);
    }
    Some(out)
}

/// Display form of an identifier: numeric literals in canonical form
/// (`"1.0"` becomes `"1"`), anything else trimmed but otherwise unchanged.
pub fn canonical_id(raw: &str) -> String {
    let trimmed = raw.trim();
    canonical_number(trimmed).unwrap_or_else(|| trimmed.to_string())
}

/// Parses a loosely typed positive integer cell (`"12"`, `"12.0"`, `" 12 "`).
///
/// Anything that is not a whole non-negative number is treated as absent.
pub fn parse_cell_u32(raw: &str) -> Option<u32> {
    let canonical = canonical_number(raw.trim())?;
    if canonical.starts_with('-') || canonical.contains('.') {
        return None;
    }
    canonical.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_portuguese_accents() {
        assert_eq!(fold_accents("Posição"), "Posicao");
        assert_eq!(fold_accents("Descrição Ação"), "Descricao Acao");
        assert_eq!(fold_accents("plain"), "plain");
    }

    #[test]
    fn header_key_drops_separators() {
        assert_eq!(normalize_header_key("Posição Inicial"), "posicaoinicial");
        assert_eq!(normalize_header_key("posicao_inicial"), "posicaoinicial");
        assert_eq!(normalize_header_key("Posicao-Inicial"), "posicaoinicial");
        assert_eq!(normalize_header_key("  "), "");
    }

    #[test]
    fn header_matches_aliases() {
        assert!(header_matches("Nome Campo", &["NomeCampo", "Nome"]));
        assert!(!header_matches("Descricao", &["NomeCampo", "Nome"]));
        assert!(!header_matches("", &[""]));
    }

    #[test]
    fn numeric_keys_collapse() {
        assert_eq!(normalize_key("1"), "1");
        assert_eq!(normalize_key("1.0"), "1");
        assert_eq!(normalize_key("01"), "1");
        assert_eq!(normalize_key(" 1.000 "), "1");
        assert_eq!(normalize_key("1.50"), "1.5");
        assert_eq!(normalize_key(".5"), "0.5");
        assert_eq!(normalize_key("5."), "5");
        assert_eq!(normalize_key("-0.0"), "0");
        assert_eq!(normalize_key("+7"), "7");
        assert_eq!(normalize_key("-12.10"), "-12.1");
    }

    #[test]
    fn long_identifiers_keep_precision() {
        assert_eq!(
            normalize_key("0012345678901234567890"),
            "12345678901234567890"
        );
    }

    #[test]
    fn text_keys_fold_case_and_accents() {
        assert_eq!(normalize_key("Cartão"), "cartao");
        assert_eq!(normalize_key("CARTAO"), "cartao");
        assert_eq!(normalize_key("1e5"), "1e5");
        assert_eq!(normalize_key("nan"), "nan");
        assert_eq!(normalize_key("."), ".");
        assert_eq!(normalize_key("-"), "-");
        assert_eq!(normalize_key(""), "");
    }

    #[test]
    fn parses_integer_cells() {
        assert_eq!(parse_cell_u32("12"), Some(12));
        assert_eq!(parse_cell_u32("12.0"), Some(12));
        assert_eq!(parse_cell_u32(" 7 "), Some(7));
        assert_eq!(parse_cell_u32("0"), Some(0));
        assert_eq!(parse_cell_u32("1.5"), None);
        assert_eq!(parse_cell_u32("-3"), None);
        assert_eq!(parse_cell_u32("abc"), None);
        assert_eq!(parse_cell_u32(""), None);
    }
}
