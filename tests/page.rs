//! Checks on the shipped `static/index.html` markup.

const INDEX_HTML: &str = include_str!("../static/index.html");

fn position(needle: &str) -> usize {
    INDEX_HTML
        .find(needle)
        .unwrap_or_else(|| panic!("{needle} missing from index.html"))
}

#[test]
fn canvas_lives_inside_the_scroll_content() {
    assert_eq!(INDEX_HTML.matches(r#"<canvas class="webgl">"#).count(), 1);

    let content = position(r#"class="scroll-content""#);
    let canvas = position(r#"<canvas class="webgl">"#);
    let add_button = position(r#"id="addPhoto""#);
    assert!(content < canvas, "canvas precedes the scroll content");
    assert!(canvas < position(r#"id="main""#), "canvas should sit under the collage");
    assert!(canvas < add_button);
}
