// Browser tests: `wasm-pack test --headless --firefox`.
// No confetti script is loaded here, so bursts are skipped quietly.
#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlElement;

wasm_bindgen_test_configure!(run_in_browser);

fn find(selector: &str) -> Option<HtmlElement> {
    let doc = web_sys::window()?.document()?;
    doc.query_selector(selector).ok()??.dyn_into().ok()
}

#[wasm_bindgen_test]
fn audio_context_is_shared_for_the_session() {
    use be_mine::audio::{BrowserAudio, SessionContext};

    let ctx = SessionContext::new(BrowserAudio);
    let first = ctx.get().expect("audio context");
    let second = ctx.get().expect("audio context");
    assert!(js_sys::Object::is(&first, &second));
}

#[wasm_bindgen_test]
fn mount_click_through_to_accepted() {
    be_mine::mount(None).expect("mount");
    // Second mount is ignored.
    be_mine::mount(None).expect("remount");
    assert!(!be_mine::is_accepted());

    let no = find(".bm-no").expect("no button");
    assert_eq!(no.style().get_property_value("display").unwrap(), "none");

    find(".bm-other").expect("other button").click();
    assert!(find(".bm-other").is_none());
    assert_eq!(no.style().get_property_value("display").unwrap(), "");
    assert!(no.style().get_property_value("left").unwrap().ends_with('%'));

    find(".bm-yes").expect("yes button").click();
    assert!(be_mine::is_accepted());
    assert!(find(".bm-success").is_some());
    assert!(find(".bm-no").is_none());
}
