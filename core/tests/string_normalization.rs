use lyricbridge_core::normalize_term;
use lyricbridge_core::string_normalization::terms_overlap;

#[test]
fn test_normalize_case_and_whitespace() {
    assert_eq!(normalize_term("ANITTA"), "anitta");
    assert_eq!(normalize_term("  Anitta  "), "anitta");
    assert_eq!(normalize_term("\tMarília Mendonça\n"), "marilia mendonca");
}

#[test]
fn test_normalize_strips_diacritics() {
    assert_eq!(normalize_term("Beyoncé"), "beyonce");
    assert_eq!(normalize_term("BJÖRK"), "bjork");
    assert_eq!(normalize_term("Zé Neto & Cristiano"), "ze neto & cristiano");
    assert_eq!(normalize_term("Mötley Crüe"), "motley crue");
}

#[test]
fn test_normalize_keeps_inner_spacing_and_symbols() {
    assert_eq!(normalize_term("AC/DC"), "ac/dc");
    assert_eq!(normalize_term("taylor  swift"), "taylor  swift");
}

#[test]
fn test_normalize_blank_input() {
    assert_eq!(normalize_term(""), "");
    assert_eq!(normalize_term("   "), "");
    assert_eq!(normalize_term("\u{301}"), "");
}

#[test]
fn test_normalize_is_idempotent() {
    let samples = [
        "Beyoncé",
        "  São Paulo  ",
        "a \u{301}",
        "\u{301} x",
        "İstanbul",
        "Ñengo Flow",
        "Sigur Rós",
        "",
        "ΆΛΦΑ",
    ];

    for sample in samples {
        let once = normalize_term(sample);
        assert_eq!(normalize_term(&once), once, "not idempotent for {sample:?}");
    }
}

#[test]
fn test_terms_overlap() {
    assert!(terms_overlap("anitta", "anitta"));
    assert!(terms_overlap("anitta", "anitta feat x"));
    assert!(terms_overlap("queen band", "queen"));
    assert!(!terms_overlap("queen", "madonna"));
}
