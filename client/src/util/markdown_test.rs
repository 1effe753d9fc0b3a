use super::*;

// =============================================================
// Plain input
// =============================================================

#[test]
fn plain_sentence_is_unchanged() {
    let text = "Erythematous macule, ABCDE: benign pattern.";
    assert_eq!(strip_markdown(text), text);
}

#[test]
fn plain_paragraphs_and_line_breaks_are_unchanged() {
    let text = "First paragraph.\nStill the first.\n\nSecond paragraph.";
    assert_eq!(strip_markdown(text), text);
}

#[test]
fn empty_input_yields_empty_output() {
    assert_eq!(strip_markdown(""), "");
    assert_eq!(strip_markdown("   \n\n  "), "");
}

// =============================================================
// Markup removal
// =============================================================

#[test]
fn strips_bold_and_italic_markers() {
    assert_eq!(
        strip_markdown("This is **important** and *subtle* and __also bold__."),
        "This is important and subtle and also bold."
    );
}

#[test]
fn strips_heading_markers() {
    assert_eq!(strip_markdown("## Observations\nRound lesion."), "Observations\n\nRound lesion.");
}

#[test]
fn strips_inline_code_markers() {
    assert_eq!(strip_markdown("Score: `3/5`"), "Score: 3/5");
}

#[test]
fn keeps_link_text_and_drops_url() {
    assert_eq!(
        strip_markdown("See [the ABCDE rule](https://example.com/abcde)."),
        "See the ABCDE rule."
    );
}

#[test]
fn drops_inline_html() {
    assert_eq!(strip_markdown("Plain <b>bold</b> text"), "Plain bold text");
}

#[test]
fn code_block_keeps_its_lines() {
    assert_eq!(strip_markdown("Before\n\n```\nline one\nline two\n```\n\nAfter"), "Before\n\nline one\nline two\n\nAfter");
}

#[test]
fn bullets_normalize_to_dashes() {
    assert_eq!(strip_markdown("* one\n* **two**\n+ three"), "- one\n- two\n- three");
}

#[test]
fn ordered_items_keep_their_numbers() {
    assert_eq!(strip_markdown("3. third\n4. fourth"), "3. third\n4. fourth");
}

#[test]
fn paragraph_after_list_opens_new_block() {
    assert_eq!(strip_markdown("- one\n- two\n\nAfter."), "- one\n- two\n\nAfter.");
}

#[test]
fn nested_lists_flatten_onto_lines() {
    assert_eq!(strip_markdown("- parent\n  - child\n- sibling"), "- parent\n- child\n- sibling");
}

// =============================================================
// Idempotency
// =============================================================

#[test]
fn stripping_is_idempotent_on_model_style_output() {
    let raw = "# Educational Analysis\n\n**Observed features:**\n\n* Asymmetry: *mild*\n* Border: regular\n\n\
               ## Next steps\n1. Monitor for changes\n2. See a `dermatologist`\n\n---\n\n_Not a diagnosis._";
    let once = strip_markdown(raw);
    assert_eq!(strip_markdown(&once), once);
    assert!(!once.contains("**"));
    assert!(!once.contains('#'));
    assert!(!once.contains('`'));
}

#[test]
fn stripping_is_idempotent_with_nested_lists() {
    let once = strip_markdown("Intro:\n\n- a\n  1. inner\n- b\n\nOutro");
    assert_eq!(strip_markdown(&once), once);
}

#[test]
fn escaped_markers_settle_in_one_call() {
    let once = strip_markdown("\\*not emphasis\\*");
    assert_eq!(once, "not emphasis");
    assert_eq!(strip_markdown(&once), once);
}

#[test]
fn code_span_with_markup_characters_settles_in_one_call() {
    let once = strip_markdown("Call `__init__` first");
    assert_eq!(once, "Call init first");
    assert_eq!(strip_markdown(&once), once);
}

#[test]
fn entity_encoded_html_settles_in_one_call() {
    let once = strip_markdown("&lt;b&gt;bold&lt;/b&gt;");
    assert_eq!(once, "bold");
    assert_eq!(strip_markdown(&once), once);
}
