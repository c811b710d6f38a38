#![cfg(target_arch = "wasm32")]

use collage_wasm::config::PageConfig;
use collage_wasm::error::PageError;
use collage_wasm::wasm::dom;
use wasm_bindgen_test::*;
use web_sys::{HtmlElement, HtmlImageElement, HtmlInputElement, HtmlTextAreaElement};

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn built_entry_has_the_expected_parts() {
    let document = web_sys::window().unwrap().document().unwrap();
    let config = PageConfig::default();
    let root = dom::build_photo_entry(&document, &config.selectors, 3).unwrap();

    assert_eq!(root.class_name(), "photoDiv");

    let chooser: HtmlInputElement = dom::query_within(&root, config.selectors.chooser).unwrap();
    assert_eq!(chooser.type_(), "file");
    assert_eq!(chooser.accept(), "image/png, image/gif, image/jpeg");

    let image: HtmlImageElement = dom::query_within(&root, config.selectors.photo).unwrap();
    assert_eq!(image.alt(), "Photo 3");

    let _button: HtmlElement = dom::query_within(&root, config.selectors.image_button).unwrap();
    let caption: HtmlTextAreaElement = dom::query_within(&root, config.selectors.caption).unwrap();
    assert_eq!(caption.placeholder(), "...");
}

#[wasm_bindgen_test]
fn appended_entry_is_found_in_the_collage() {
    let document = web_sys::window().unwrap().document().unwrap();
    let config = PageConfig::default();
    let main = document.create_element("section").unwrap();
    main.set_id("main");
    document.body().unwrap().append_child(&main).unwrap();

    for index in 0..3 {
        let root = dom::build_photo_entry(&document, &config.selectors, index).unwrap();
        main.append_child(&root).unwrap();
    }
    let found = main.query_selector_all(config.selectors.photo_div).unwrap();
    assert_eq!(found.length(), 3);

    main.remove();
}

#[wasm_bindgen_test]
fn missing_and_mistyped_elements_are_reported() {
    let document = web_sys::window().unwrap().document().unwrap();
    let missing = dom::query::<HtmlElement>(&document, "#nothing-here");
    assert!(matches!(missing, Err(PageError::MissingElement(_))));

    let wrong = dom::query::<HtmlInputElement>(&document, "body");
    assert!(matches!(wrong, Err(PageError::WrongElementType(_))));
}
