//! Browser bindings. Finds each widget's elements, owns its state behind
//! `Rc<RefCell<_>>`, and forwards DOM events into the state machines.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use gloo_net::http::Request;
use gloo_timers::callback::{Interval, Timeout};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, Event, EventTarget, FormData, HtmlElement, HtmlFormElement,
    IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, KeyboardEvent,
    ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition, Window,
};

use crate::carousel::Carousel;
use crate::key::Key;
use crate::lightbox::{Lightbox, LightboxEvent};
use crate::modal::{DismissReason, Outcome, OutcomeModal};
use crate::nav::{self, ScrollNav};
use crate::slideshow::{self, Slideshow};
use crate::submit::{self, ContactPayload};

const FORM_FIELDS: [&str; 7] = [
    "name",
    "email",
    "phone",
    "subject",
    "service",
    "weddingDate",
    "message",
];
const OPEN_CLASS: &str = "active";
const DISABLED_CLASS: &str = "disabled";

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    reset_scroll(&window)?;
    bind_scroll_nav(&window, &document)?;
    bind_anchors(&document)?;
    observe_sections(&document)?;
    bind_slideshow(&document)?;
    bind_carousel(&window, &document)?;
    let lightbox = LightboxView::mount(&document)?;
    let modal = ModalView::mount(&document)?;
    bind_keys(&document, modal.clone(), lightbox)?;
    bind_contact_form(&document, modal)?;

    tracing::info!("page widgets bound");
    Ok(())
}

fn listen(
    target: &EventTarget,
    kind: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    // Listeners live as long as the page.
    closure.forget();
    Ok(())
}

fn elements(document: &Document, selector: &str) -> Result<Vec<Element>, JsValue> {
    let list = document.query_selector_all(selector)?;
    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

fn millis(delay: Duration) -> u32 {
    u32::try_from(delay.as_millis()).unwrap_or(u32::MAX)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn viewport_width(window: &Window) -> u32 {
    window
        .inner_width()
        .ok()
        .and_then(|width| width.as_f64())
        .map_or(0, |width| width.max(0.0) as u32)
}

fn on_backdrop(event: &Event, overlay: &Element) -> bool {
    event
        .target()
        .is_some_and(|target| js_sys::Object::is(&target, overlay))
}

fn reset_scroll(window: &Window) -> Result<(), JsValue> {
    for kind in ["load", "beforeunload"] {
        let w = window.clone();
        listen(window, kind, move |_| w.scroll_to_with_x_and_y(0.0, 0.0))?;
    }
    Ok(())
}

fn bind_scroll_nav(window: &Window, document: &Document) -> Result<(), JsValue> {
    let Some(navbar) = document.query_selector("nav")? else {
        return Ok(());
    };
    let mut state = ScrollNav::default();
    let w = window.clone();
    listen(window, "scroll", move |_| {
        let Ok(y) = w.scroll_y() else { return };
        if let Some(scrolled) = state.update(y) {
            let _ = navbar
                .class_list()
                .toggle_with_force(nav::SCROLLED_CLASS, scrolled);
        }
    })
}

fn bind_anchors(document: &Document) -> Result<(), JsValue> {
    for anchor in elements(document, "a[href^=\"#\"]")? {
        let href = anchor.get_attribute("href").unwrap_or_default();
        let doc = document.clone();
        listen(&anchor, "click", move |event| {
            let Some(selector) = nav::anchor_target(&href) else {
                return;
            };
            event.prevent_default();
            if let Ok(Some(target)) = doc.query_selector(selector) {
                let options = ScrollIntoViewOptions::new();
                options.set_behavior(ScrollBehavior::Smooth);
                options.set_block(ScrollLogicalPosition::Start);
                target.scroll_into_view_with_scroll_into_view_options(&options);
            }
        })?;
    }
    Ok(())
}

fn observe_sections(document: &Document) -> Result<(), JsValue> {
    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        |entries: js_sys::Array, _observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if entry.is_intersecting() {
                    let _ = entry.target().class_list().add_1(nav::REVEAL_CLASS);
                }
            }
        },
    );
    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(nav::REVEAL_THRESHOLD));
    init.set_root_margin(nav::REVEAL_ROOT_MARGIN);
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
    callback.forget();

    for section in elements(document, "section")? {
        observer.observe(&section);
    }
    Ok(())
}

fn bind_slideshow(document: &Document) -> Result<(), JsValue> {
    let slides = elements(document, ".slideshow-slide")?;
    if slides.is_empty() {
        return Ok(());
    }
    let mut show = Slideshow::new(slides.len());
    let period = millis(show.interval());
    Interval::new(period, move || {
        if let Some(step) = show.advance() {
            let _ = slides[step.from]
                .class_list()
                .remove_1(slideshow::ACTIVE_CLASS);
            let _ = slides[step.to].class_list().add_1(slideshow::ACTIVE_CLASS);
        }
    })
    .forget();
    Ok(())
}

#[derive(Clone)]
struct CarouselView {
    state: Rc<RefCell<Carousel>>,
    track: HtmlElement,
    cards: Rc<Vec<HtmlElement>>,
    prev: Option<Element>,
    next: Option<Element>,
}

impl CarouselView {
    fn render(&self) {
        let carousel = self.state.borrow();
        let _ = self.track.style().set_property(
            "transform",
            &format!("translateX({}%)", carousel.offset_percent()),
        );
        let flex = format!("0 0 calc(100% / {})", carousel.visible());
        for card in self.cards.iter() {
            let _ = card.style().set_property("flex", &flex);
        }
        if let Some(prev) = &self.prev {
            let _ = prev
                .class_list()
                .toggle_with_force(DISABLED_CLASS, !carousel.can_prev());
        }
        if let Some(next) = &self.next {
            let _ = next
                .class_list()
                .toggle_with_force(DISABLED_CLASS, !carousel.can_next());
        }
    }

    fn step(&self, forward: bool) {
        {
            let mut carousel = self.state.borrow_mut();
            if forward {
                carousel.next();
            } else {
                carousel.prev();
            }
        }
        self.render();
    }
}

fn bind_carousel(window: &Window, document: &Document) -> Result<(), JsValue> {
    let Some(track) = document.query_selector(".testimonials-track")? else {
        return Ok(());
    };
    let Ok(track) = track.dyn_into::<HtmlElement>() else {
        return Ok(());
    };
    let cards: Vec<HtmlElement> = elements(document, ".testimonial-card")?
        .into_iter()
        .filter_map(|card| card.dyn_into::<HtmlElement>().ok())
        .collect();

    let view = CarouselView {
        state: Rc::new(RefCell::new(Carousel::new(
            cards.len(),
            viewport_width(window),
        ))),
        track,
        cards: Rc::new(cards),
        prev: document.query_selector(".carousel-prev")?,
        next: document.query_selector(".carousel-next")?,
    };
    view.render();

    if let Some(prev) = &view.prev {
        let v = view.clone();
        listen(prev, "click", move |_| v.step(false))?;
    }
    if let Some(next) = &view.next {
        let v = view.clone();
        listen(next, "click", move |_| v.step(true))?;
    }
    let w = window.clone();
    listen(window, "resize", move |_| {
        view.state.borrow_mut().resize(viewport_width(&w));
        view.render();
    })
}

#[derive(Clone)]
struct LightboxView {
    state: Rc<RefCell<Lightbox>>,
    overlay: Element,
    image: Element,
    sources: Rc<Vec<(String, String)>>,
}

impl LightboxView {
    fn mount(document: &Document) -> Result<Option<Self>, JsValue> {
        let thumbnails = elements(document, ".gallery-item img")?;
        if thumbnails.is_empty() {
            return Ok(None);
        }
        let sources: Vec<(String, String)> = thumbnails
            .iter()
            .map(|img| {
                (
                    img.get_attribute("src").unwrap_or_default(),
                    img.get_attribute("alt").unwrap_or_default(),
                )
            })
            .collect();

        let overlay = document.create_element("div")?;
        overlay.set_class_name("lightbox");
        let image = document.create_element("img")?;
        image.set_class_name("lightbox-image");
        let close = button(document, "lightbox-close", "Close", "\u{00d7}")?;
        let prev = button(document, "lightbox-prev", "Previous image", "\u{2039}")?;
        let next = button(document, "lightbox-next", "Next image", "\u{203a}")?;
        for child in [&image, &close, &prev, &next] {
            overlay.append_child(child)?;
        }
        if let Some(body) = document.body() {
            body.append_child(&overlay)?;
        }

        let view = Self {
            state: Rc::new(RefCell::new(Lightbox::new(sources.len()))),
            overlay,
            image,
            sources: Rc::new(sources),
        };

        for (index, thumbnail) in thumbnails.iter().enumerate() {
            let v = view.clone();
            listen(thumbnail, "click", move |_| v.open(index))?;
        }
        let v = view.clone();
        listen(&close, "click", move |_| v.close())?;
        let v = view.clone();
        listen(&prev, "click", move |_| {
            v.handle_key(Key::ArrowLeft);
        })?;
        let v = view.clone();
        listen(&next, "click", move |_| {
            v.handle_key(Key::ArrowRight);
        })?;
        let v = view.clone();
        listen(&view.overlay, "click", move |event| {
            if on_backdrop(&event, &v.overlay) {
                v.close();
            }
        })?;
        Ok(Some(view))
    }

    fn show(&self, index: usize) {
        if let Some((src, alt)) = self.sources.get(index) {
            let _ = self.image.set_attribute("src", src);
            let _ = self.image.set_attribute("alt", alt);
        }
    }

    fn open(&self, index: usize) {
        let opened = self.state.borrow_mut().open(index);
        if opened {
            self.show(index);
            let _ = self.overlay.class_list().add_1(OPEN_CLASS);
        }
    }

    fn close(&self) {
        self.state.borrow_mut().close();
        let _ = self.overlay.class_list().remove_1(OPEN_CLASS);
    }

    fn handle_key(&self, key: Key) -> bool {
        let event = self.state.borrow_mut().handle_key(key);
        match event {
            Some(LightboxEvent::Showing(index)) => self.show(index),
            Some(LightboxEvent::Closed) => {
                let _ = self.overlay.class_list().remove_1(OPEN_CLASS);
            }
            None => return false,
        }
        true
    }
}

fn button(document: &Document, class: &str, label: &str, glyph: &str) -> Result<Element, JsValue> {
    let button = document.create_element("button")?;
    button.set_class_name(class);
    button.set_attribute("type", "button")?;
    button.set_attribute("aria-label", label)?;
    button.set_text_content(Some(glyph));
    Ok(button)
}

#[derive(Clone)]
struct ModalView {
    state: Rc<RefCell<OutcomeModal>>,
    overlay: Element,
    title: Element,
    message: Element,
}

impl ModalView {
    fn mount(document: &Document) -> Result<Self, JsValue> {
        let overlay = document.create_element("div")?;
        overlay.set_class_name("modal-overlay");
        overlay.set_attribute("role", "dialog")?;
        overlay.set_attribute("aria-modal", "true")?;
        let dialog = document.create_element("div")?;
        dialog.set_class_name("modal");
        let title = document.create_element("h3")?;
        title.set_class_name("modal-title");
        let message = document.create_element("p")?;
        message.set_class_name("modal-message");
        message.set_attribute("style", "white-space: pre-line")?;
        let close = button(document, "modal-close", "Close", "\u{00d7}")?;
        for child in [&close, &title, &message] {
            dialog.append_child(child)?;
        }
        overlay.append_child(&dialog)?;
        if let Some(body) = document.body() {
            body.append_child(&overlay)?;
        }

        let view = Self {
            state: Rc::new(RefCell::new(OutcomeModal::new())),
            overlay,
            title,
            message,
        };
        let v = view.clone();
        listen(&close, "click", move |_| {
            v.dismiss(DismissReason::CloseButton);
        })?;
        let v = view.clone();
        listen(&view.overlay, "click", move |event| {
            if on_backdrop(&event, &v.overlay) {
                v.dismiss(DismissReason::Backdrop);
            }
        })?;
        Ok(view)
    }

    fn show(&self, outcome: Outcome) {
        let delay = outcome.auto_dismiss_after();
        self.title.set_text_content(Some(outcome.title()));
        self.message.set_text_content(Some(outcome.message()));
        self.overlay.set_class_name(&format!(
            "modal-overlay {OPEN_CLASS} {}",
            outcome.class_name()
        ));
        let generation = self.state.borrow_mut().show(outcome);

        if let Some(delay) = delay {
            let view = self.clone();
            Timeout::new(millis(delay), move || {
                let expired = view.state.borrow_mut().expire(generation);
                if expired {
                    view.hide();
                }
            })
            .forget();
        }
    }

    fn dismiss(&self, reason: DismissReason) {
        let closed = self.state.borrow_mut().dismiss(reason);
        if closed {
            self.hide();
        }
    }

    fn handle_key(&self, key: Key) -> bool {
        let closed = self.state.borrow_mut().handle_key(key);
        if closed {
            self.hide();
        }
        closed
    }

    fn hide(&self) {
        self.overlay.set_class_name("modal-overlay");
    }
}

fn bind_keys(
    document: &Document,
    modal: ModalView,
    lightbox: Option<LightboxView>,
) -> Result<(), JsValue> {
    listen(document, "keydown", move |event| {
        let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        let key = Key::from_name(&event.key());
        if modal.handle_key(key) {
            return;
        }
        if let Some(lightbox) = &lightbox {
            lightbox.handle_key(key);
        }
    })
}

fn bind_contact_form(document: &Document, modal: ModalView) -> Result<(), JsValue> {
    let Some(form) = document.get_element_by_id("contact-form") else {
        return Ok(());
    };
    let Ok(form) = form.dyn_into::<HtmlFormElement>() else {
        return Ok(());
    };
    let endpoint = form
        .get_attribute("data-endpoint")
        .unwrap_or_else(|| submit::DEFAULT_ENDPOINT.to_owned());

    let target = form.clone();
    listen(&target, "submit", move |event| {
        event.prevent_default();
        let payload = match read_form(&form) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::error!(?err, "could not read contact form");
                return;
            }
        };
        let form = form.clone();
        let modal = modal.clone();
        let endpoint = endpoint.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let outcome = post_contact(&endpoint, &payload).await;
            if outcome.is_success() {
                form.reset();
            }
            modal.show(outcome);
        });
    })
}

fn read_form(form: &HtmlFormElement) -> Result<ContactPayload, JsValue> {
    let data = FormData::new_with_form(form)?;
    Ok(ContactPayload::from_fields(FORM_FIELDS.iter().filter_map(
        |&field| data.get(field).as_string().map(|value| (field, value)),
    )))
}

async fn post_contact(endpoint: &str, payload: &ContactPayload) -> Outcome {
    let request = match Request::post(endpoint)
        .header("Accept", "application/json")
        .json(payload)
    {
        Ok(request) => request,
        Err(err) => return submit::connection_failed(&err.to_string()),
    };
    match request.send().await {
        Ok(response) => {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(status, "contact response received");
            submit::outcome_for(status, &body)
        }
        Err(err) => submit::connection_failed(&err.to_string()),
    }
}
