use super::*;

fn fingerprint(url: &str, modal_count: i64, body_length: i64, cart_text: &str) -> PageFingerprint {
    PageFingerprint {
        url: url.to_string(),
        modal_count,
        body_length,
        cart_text: cart_text.to_string(),
    }
}

#[test]
fn url_change_classifies_as_navigation() {
    let detector = ChangeDetector::default();
    let before = fingerprint("https://a.test/", 0, 5000, "");
    let after = fingerprint("https://a.test/checkout", 0, 5000, "");
    assert_eq!(
        detector.classify(&before, &after),
        PageEffect::Navigated { url: "https://a.test/checkout".to_string() }
    );
}

#[test]
fn navigation_outranks_every_other_signal() {
    let detector = ChangeDetector::default();
    let before = fingerprint("https://a.test/", 0, 5000, "empty");
    let after = fingerprint("https://b.test/", 3, 9000, "1 item");
    assert!(matches!(detector.classify(&before, &after), PageEffect::Navigated { .. }));
}

#[test]
fn modal_increase_classifies_as_modal() {
    let detector = ChangeDetector::default();
    let before = fingerprint("https://a.test/", 1, 5000, "");
    let after = fingerprint("https://a.test/", 2, 9000, "");
    assert_eq!(detector.classify(&before, &after), PageEffect::ModalAppeared);
}

#[test]
fn modal_decrease_is_not_a_modal_appearance() {
    let detector = ChangeDetector::default();
    let before = fingerprint("https://a.test/", 2, 5000, "");
    let after = fingerprint("https://a.test/", 1, 5000, "");
    assert_eq!(detector.classify(&before, &after), PageEffect::NoObviousChange);
}

#[test]
fn cart_text_change_classifies_as_cart_update() {
    let detector = ChangeDetector::default();
    let before = fingerprint("https://a.test/", 0, 5000, "Cart (0)");
    let after = fingerprint("https://a.test/", 0, 5050, "Cart (1)");
    assert_eq!(detector.classify(&before, &after), PageEffect::CartUpdated);
}

#[test]
fn body_growth_beyond_threshold_classifies_as_content_change() {
    let detector = ChangeDetector::default();
    let before = fingerprint("https://a.test/", 0, 5000, "");
    let after = fingerprint("https://a.test/", 0, 5250, "");
    assert_eq!(detector.classify(&before, &after), PageEffect::ContentChanged);
}

#[test]
fn body_shrink_counts_too() {
    let detector = ChangeDetector::default();
    let before = fingerprint("https://a.test/", 0, 5250, "");
    let after = fingerprint("https://a.test/", 0, 5000, "");
    assert_eq!(detector.classify(&before, &after), PageEffect::ContentChanged);
}

#[test]
fn small_delta_is_no_obvious_change() {
    let detector = ChangeDetector::default();
    let before = fingerprint("https://a.test/", 0, 5000, "");
    let after = fingerprint("https://a.test/", 0, 5100, "");
    assert_eq!(detector.classify(&before, &after), PageEffect::NoObviousChange);

    let identical = fingerprint("https://a.test/", 0, 5000, "");
    assert_eq!(detector.classify(&identical, &identical.clone()), PageEffect::NoObviousChange);
}

#[test]
fn fingerprint_deserializes_from_page_value() {
    let value = serde_json::json!({
        "url": "https://shop.test/",
        "modalCount": 2,
        "bodyLength": 14000,
    });
    let fp: PageFingerprint = serde_json::from_value(value).unwrap();
    assert_eq!(fp.url, "https://shop.test/");
    assert_eq!(fp.modal_count, 2);
    assert_eq!(fp.body_length, 14000);
    assert_eq!(fp.cart_text, "");
}

#[test]
fn effect_display_strings_are_planner_friendly() {
    assert_eq!(
        PageEffect::Navigated { url: "https://x.test".to_string() }.to_string(),
        "page navigated to https://x.test"
    );
    assert_eq!(PageEffect::ModalAppeared.to_string(), "modal or popup appeared");
    assert!(PageEffect::NoObviousChange.to_string().contains("screenshot"));
}
