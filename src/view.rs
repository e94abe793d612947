//! DOM shell: builds the page, wires pointer / touch events to `Widget` and
//! mirrors its state back into element styles.
use std::cell::RefCell;
use std::rc::Rc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, window};

use crate::audio::WebAudio;
use crate::burst::{ParticleSink, Scheduler};
use crate::config::DeviceClass;
use crate::decor::{CelebrationHeart, Decorations};
use crate::error::{Error, Result};
use crate::positions::SafePosition;
use crate::web::{BrowserScheduler, ConfettiSink, performance_now, viewport_width};
use crate::widget::Widget;

const PROMPT_TEXT: &str = "Deal!!! Will you be my Valentine? ❤️";
const ACCEPTED_TEXT: &str = "Yay!!! I knew you would say yes! 💘✨";

const STYLE_SHEET: &str = r#"
.bm-app { position:fixed; inset:0; overflow:hidden; display:flex; align-items:center; justify-content:center;
  background:linear-gradient(135deg,#ffdde1 0%,#ee9ca7 50%,#ffc3e0 100%); font-family:'Poppins',system-ui,sans-serif; }
.bm-layer { position:absolute; inset:0; pointer-events:none; }
.bm-orb { position:absolute; border-radius:50%; filter:blur(40px);
  background:radial-gradient(circle,#ff6b9d 0%,rgba(255,107,157,0) 70%);
  animation-name:bm-drift; animation-iteration-count:infinite; animation-timing-function:ease-in-out; }
.bm-compact .bm-orb { animation-name:bm-pulse; }
.bm-heart { position:absolute; bottom:-60px; animation-name:bm-float; animation-iteration-count:infinite;
  animation-timing-function:linear; }
.bm-content { position:relative; z-index:10; text-align:center; padding:24px; animation:bm-pop-in 0.5s ease-out; }
.bm-title { font-size:clamp(1.8rem,5vw,3.4rem); color:#d6336c; text-shadow:0 4px 12px rgba(214,51,108,0.3);
  animation:bm-wobble 2s ease-in-out infinite; }
.bm-buttons { display:flex; gap:24px; justify-content:center; align-items:center; margin-top:32px; flex-wrap:wrap; }
.bm-button { border:none; border-radius:999px; padding:16px 36px; font-size:1.25rem; cursor:pointer; color:#fff;
  transition:transform 0.3s cubic-bezier(.34,1.56,.64,1), box-shadow 0.3s; }
.bm-yes { background:linear-gradient(135deg,#ff6b9d,#ff1493); }
.bm-other { background:linear-gradient(135deg,#a18cd1,#fbc2eb); animation:bm-rise-in 0.4s ease-out 0.3s both; }
.bm-no { position:fixed; z-index:9999; transform:translate(-50%,-50%); background:#8e8e93;
  transition:left 0.08s ease-out, top 0.08s ease-out, opacity 0.1s; }
.bm-success .bm-title { animation:bm-celebrate 2s ease-in-out infinite; }
.bm-compact .bm-success .bm-title { animation:bm-breathe 2s ease-in-out infinite; }
.bm-celebration { position:fixed; inset:0; pointer-events:none; }
.bm-cheart { position:absolute; bottom:10%; opacity:0; animation-iteration-count:infinite;
  animation-timing-function:ease-out; }
@keyframes bm-drift { 0%,100% { transform:translate(0,0) scale(1); } 25% { transform:translate(50px,-40px) scale(1.2); }
  50% { transform:translate(-30px,60px) scale(0.9); } 75% { transform:translate(40px,-30px) scale(1.1); } }
@keyframes bm-pulse { 0%,100% { transform:scale(1); } 50% { transform:scale(1.1); } }
@keyframes bm-float { 0% { transform:translateY(0) rotate(0deg); opacity:0; } 10% { opacity:0.8; }
  100% { transform:translateY(-115vh) rotate(360deg); opacity:0; } }
@keyframes bm-wobble { 0%,100% { transform:translateY(0) rotate(-1deg); } 50% { transform:translateY(-10px) rotate(1deg); } }
@keyframes bm-celebrate { 0%,100% { transform:scale(1) rotate(-2deg); } 50% { transform:scale(1.05) rotate(2deg); } }
@keyframes bm-breathe { 0%,100% { transform:scale(1); } 50% { transform:scale(1.02); } }
@keyframes bm-pop-in { 0% { transform:scale(0); opacity:0; } 70% { transform:scale(1.2); } 100% { transform:scale(1); opacity:1; } }
@keyframes bm-rise-in { from { opacity:0; transform:translateY(20px); } to { opacity:1; transform:translateY(0); } }
"#;

/// Handles to the elements event callbacks need to restyle.
struct Nodes {
    app: Element,
    prompt: Element,
    yes: HtmlElement,
    other: HtmlElement,
    no: HtmlElement,
}

struct App {
    widget: Widget,
    rng: StdRng,
    audio: WebAudio,
    particles: Rc<dyn ParticleSink>,
    scheduler: Rc<dyn Scheduler>,
    nodes: Nodes,
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

pub(crate) fn is_accepted() -> bool {
    APP.with(|cell| cell.borrow().as_ref().is_some_and(|app| app.widget.is_accepted()))
}

/// Build the widget inside `root_id` (or `<body>`). Mounting twice is a no-op.
pub(crate) fn mount(root_id: Option<&str>) -> Result<()> {
    if APP.with(|cell| cell.borrow().is_some()) {
        crate::diag::debug("widget already mounted");
        return Ok(());
    }
    let win = window().ok_or(Error::NoWindow)?;
    let doc = win.document().ok_or(Error::NoDocument)?;
    let host: Element = match root_id {
        Some(id) => doc
            .get_element_by_id(id)
            .ok_or_else(|| Error::Dom(format!("no element #{id}")))?,
        None => doc.body().ok_or(Error::NoDocument)?.into(),
    };

    // Classified once; resizing does not change budgets.
    let device = DeviceClass::from_width(viewport_width());
    let mut rng = StdRng::from_entropy();
    let widget = Widget::new(device, &mut rng);

    install_style(&doc)?;
    let app = doc.create_element("div")?;
    app.set_class_name(if device.is_compact() {
        "bm-app bm-compact"
    } else {
        "bm-app"
    });
    render_background(&doc, &app, widget.decorations())?;

    let prompt = div(&doc, "bm-content")?;
    let title = div(&doc, "bm-title")?;
    title.set_text_content(Some(PROMPT_TEXT));
    prompt.append_child(&title)?;

    let buttons = div(&doc, "bm-buttons")?;
    let yes = button(&doc, "bm-button bm-yes", "Yes 💖")?;
    let other = button(&doc, "bm-button bm-other", "Try other option 🤔")?;
    let no = button(&doc, "bm-button bm-no", "No 😅")?;
    no.style().set_property("display", "none")?;
    buttons.append_child(&yes)?;
    buttons.append_child(&other)?;
    prompt.append_child(&buttons)?;
    app.append_child(&prompt)?;
    app.append_child(&no)?;
    host.append_child(&app)?;

    listen(&yes, "click", |_evt| on_yes())?;
    listen(&other, "click", |_evt| on_try_other())?;
    for kind in ["mouseenter", "touchstart"] {
        listen(&no, kind, |evt| {
            evt.prevent_default();
            on_no_approached();
        })?;
    }
    listen(&no, "click", |evt| evt.prevent_default())?;

    APP.with(|cell| {
        cell.replace(Some(App {
            widget,
            rng,
            audio: WebAudio::new(),
            particles: Rc::new(ConfettiSink::new()),
            scheduler: Rc::new(BrowserScheduler),
            nodes: Nodes {
                app,
                prompt,
                yes,
                other,
                no,
            },
        }))
    });
    crate::diag::info(&format!("be-mine mounted ({device:?})"));
    Ok(())
}

fn install_style(doc: &Document) -> Result<()> {
    if doc.get_element_by_id("bm-style").is_some() {
        return Ok(());
    }
    let style = doc.create_element("style")?;
    style.set_id("bm-style");
    style.set_text_content(Some(STYLE_SHEET));
    let head: Element = match doc.head() {
        Some(h) => h.into(),
        None => doc.body().ok_or(Error::NoDocument)?.into(),
    };
    head.append_child(&style)?;
    Ok(())
}

fn div(doc: &Document, class: &str) -> Result<Element> {
    let el = doc.create_element("div")?;
    el.set_class_name(class);
    Ok(el)
}

fn button(doc: &Document, class: &str, label: &str) -> Result<HtmlElement> {
    let el = doc.create_element("button")?;
    el.set_class_name(class);
    el.set_attribute("type", "button")?;
    el.set_text_content(Some(label));
    el.dyn_into::<HtmlElement>()
        .map_err(|_| Error::Dom("button is not an HtmlElement".into()))
}

fn listen<F>(target: &Element, kind: &str, mut handler: F) -> Result<()>
where
    F: FnMut(web_sys::Event) + 'static,
{
    let closure =
        Closure::wrap(Box::new(move |evt: web_sys::Event| handler(evt)) as Box<dyn FnMut(_)>);
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn render_background(doc: &Document, app: &Element, deco: &Decorations) -> Result<()> {
    let orbs = div(doc, "bm-layer")?;
    for orb in &deco.orbs {
        let el = div(doc, "bm-orb")?;
        el.set_attribute(
            "style",
            &format!(
                "width:{s:.0}px; height:{s:.0}px; left:{:.2}%; top:{:.2}%; opacity:{:.3}; \
                 animation-duration:{:.2}s; animation-delay:{:.2}s;",
                orb.left_pct,
                orb.top_pct,
                orb.opacity,
                orb.duration_s,
                orb.delay_s,
                s = orb.size_px,
            ),
        )?;
        orbs.append_child(&el)?;
    }
    app.append_child(&orbs)?;

    let hearts = div(doc, "bm-layer")?;
    for heart in &deco.hearts {
        let el = div(doc, "bm-heart")?;
        el.set_text_content(Some(heart.glyph));
        el.set_attribute(
            "style",
            &format!(
                "left:{:.2}%; font-size:{:.0}px; \
                 animation-duration:{:.2}s; animation-delay:{:.2}s;",
                heart.left_pct, heart.size_px, heart.duration_s, heart.delay_s,
            ),
        )?;
        hearts.append_child(&el)?;
    }
    app.append_child(&hearts)?;
    Ok(())
}

fn place(no: &HtmlElement, pos: SafePosition) -> Result<()> {
    let style = no.style();
    style.set_property("left", &format!("{}%", pos.x_pct))?;
    style.set_property("top", &format!("{}%", pos.y_pct))?;
    Ok(())
}

fn apply_affection(yes: &HtmlElement, scale: f64) -> Result<()> {
    let style = yes.style();
    style.set_property("transform", &format!("scale({scale:.2})"))?;
    let shadow = if scale > 1.0 {
        "0 20px 40px rgba(255, 107, 157, 0.6), 0 0 80px rgba(255, 107, 157, 0.8)"
    } else {
        "0 10px 25px rgba(0, 0, 0, 0.2)"
    };
    style.set_property("box-shadow", shadow)?;
    Ok(())
}

fn report(result: Result<()>) {
    if let Err(e) = result {
        crate::diag::warn(&format!("render failed: {e}"));
    }
}

fn on_try_other() {
    APP.with(|cell| {
        let mut slot = cell.borrow_mut();
        let Some(app) = slot.as_mut() else {
            return;
        };
        let Some(pos) = app.widget.try_other_option(&mut app.rng) else {
            return;
        };
        report((|| {
            app.nodes.other.remove();
            place(&app.nodes.no, pos)?;
            app.nodes.no.style().remove_property("display")?;
            apply_affection(&app.nodes.yes, app.widget.affection())
        })());
    });
}

fn on_no_approached() {
    APP.with(|cell| {
        let mut slot = cell.borrow_mut();
        let Some(app) = slot.as_mut() else {
            return;
        };
        let now = performance_now();
        if let Some(pos) = app.widget.dismiss_approached(now, &mut app.rng, &app.audio) {
            report(place(&app.nodes.no, pos));
        }
    });
}

fn on_yes() {
    APP.with(|cell| {
        let mut slot = cell.borrow_mut();
        let Some(app) = slot.as_mut() else {
            return;
        };
        let fresh = app.widget.accept(
            &app.audio,
            app.particles.clone(),
            app.scheduler.clone(),
        );
        if fresh {
            report(show_success(app));
        }
    });
}

/// Rise, then sit invisible for the rest of the cycle.
fn heart_keyframes(heart: &CelebrationHeart, rise: i32, spin: f64) -> String {
    let end = heart.active_pct();
    let peak = end * 0.3;
    let drift = heart.drift_px;
    format!(
        "@keyframes bm-burst-up-{id} {{ \
         0% {{ transform:translate(0,0) scale(0) rotate(0deg); opacity:1; }} \
         {peak:.2}% {{ transform:translate({:.0}px,{:.0}px) scale(1.2); opacity:1; }} \
         {end:.2}%,100% {{ transform:translate({drift:.0}px,{rise}px) scale(0) \
         rotate({spin:.0}deg); opacity:0; }} }}\n",
        drift * 0.3,
        rise as f64 * 0.3,
        id = heart.id,
    )
}

fn show_success(app: &App) -> Result<()> {
    let doc = window()
        .and_then(|w| w.document())
        .ok_or(Error::NoDocument)?;
    app.nodes.prompt.remove();
    app.nodes.no.remove();

    let success = div(&doc, "bm-content bm-success")?;
    let title = div(&doc, "bm-title")?;
    title.set_text_content(Some(ACCEPTED_TEXT));
    success.append_child(&title)?;

    let compact = app.widget.device().is_compact();
    let rise = if compact { -300 } else { -400 };
    let layer = div(&doc, "bm-celebration")?;
    let mut keyframes = String::new();
    for heart in &app.widget.decorations().celebration {
        let spin = if compact { 0.0 } else { 360.0 * heart.spin };
        keyframes.push_str(&heart_keyframes(heart, rise, spin));

        let el = div(&doc, "bm-cheart")?;
        el.set_text_content(Some(heart.glyph));
        let style = format!(
            "left:{:.2}%; font-size:{:.2}rem; animation-name:bm-burst-up-{}; \
             animation-delay:{:.2}s; animation-duration:{:.2}s;",
            heart.left_pct,
            heart.size_rem,
            heart.id,
            heart.delay_s + 0.5,
            heart.cycle_s(),
        );
        el.set_attribute("style", &style)?;
        layer.append_child(&el)?;
    }
    let rules = doc.create_element("style")?;
    rules.set_text_content(Some(&keyframes));
    layer.append_child(&rules)?;
    success.append_child(&layer)?;
    app.nodes.app.append_child(&success)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heart(duration_s: f64) -> CelebrationHeart {
        CelebrationHeart {
            id: 3,
            glyph: "💖",
            left_pct: 40.0,
            size_rem: 2.0,
            delay_s: 0.24,
            duration_s,
            drift_px: 20.0,
            spin: -1.0,
        }
    }

    #[test]
    fn test_keyframes_hold_still_during_pause() {
        // 2.5 s rise in a 3.5 s cycle: motion ends at 71.43 %.
        let css = heart_keyframes(&heart(2.5), -300, 0.0);
        assert!(css.starts_with("@keyframes bm-burst-up-3 {"));
        assert!(css.contains("71.43%,100% {"));
        assert!(css.contains("21.43% {"));
        assert!(css.contains("translate(20px,-300px)"));
    }

    #[test]
    fn test_keyframes_spin_direction() {
        let css = heart_keyframes(&heart(4.0), -400, -360.0);
        assert!(css.contains("80.00%,100% {"));
        assert!(css.contains("rotate(-360deg)"));
    }
}
