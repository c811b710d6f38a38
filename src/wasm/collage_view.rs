use std::cell::{Ref, RefCell};
use std::rc::{Rc, Weak};

use gloo::events::EventListener;
use gloo::file::callbacks::{read_as_data_url, FileReader};
use gloo::file::FileReadError;
use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, HtmlElement, HtmlImageElement, HtmlInputElement, HtmlTextAreaElement,
    Node, Window,
};

use super::animator::Animator;
use super::dom::{self, set_style};
use crate::add_control::AddPhotoControl;
use crate::collage::{CollageState, EntryIndex, ReadTicket};
use crate::config::PageConfig;
use crate::error::PageResult;
use crate::pointer::PointerTracker;

/// DOM side of one photo entry. Listeners are bound once when the entry is
/// created and live as long as the view.
struct EntryView {
    root: HtmlElement,
    image_button: HtmlElement,
    chooser: HtmlInputElement,
    photo: HtmlImageElement,
    caption: HtmlTextAreaElement,
    listeners: Vec<EventListener>,
    /// Read in flight; replacing it aborts the old one.
    #[allow(dead_code)]
    read: Option<FileReader>,
    /// Pending button-to-image swap; replacing it clears the old timer.
    #[allow(dead_code)]
    swap: Option<Timeout>,
}

impl EntryView {
    fn from_root(root: HtmlElement, config: &PageConfig) -> PageResult<Self> {
        let selectors = &config.selectors;
        Ok(Self {
            image_button: dom::query_within(&root, selectors.image_button)?,
            chooser: dom::query_within(&root, selectors.chooser)?,
            photo: dom::query_within(&root, selectors.photo)?,
            caption: dom::query_within(&root, selectors.caption)?,
            root,
            listeners: Vec::new(),
            read: None,
            swap: None,
        })
    }
}

pub struct CollageView {
    state: RefCell<CollageState>,
    control: RefCell<AddPhotoControl>,
    /// Index-aligned with the entries of `state`.
    entries: RefCell<Vec<EntryView>>,
    container: Element,
    add_button: HtmlElement,
    window: Window,
    document: Document,
    config: PageConfig,
    pointer: Rc<RefCell<PointerTracker>>,
    animator: Rc<RefCell<Animator>>,
    listeners: RefCell<Vec<EventListener>>,
}

impl CollageView {
    /// Adopt the entries already in `#main` and wire up the add button.
    pub fn mount(
        window: &Window,
        document: &Document,
        config: &PageConfig,
        pointer: Rc<RefCell<PointerTracker>>,
        animator: Rc<RefCell<Animator>>,
    ) -> PageResult<Rc<Self>> {
        let container: Element = dom::query(document, config.selectors.collage)?;
        let add_button: HtmlElement = dom::query(document, config.selectors.add_photo)?;

        let existing = container.query_selector_all(config.selectors.photo_div)?;
        let mut roots = Vec::with_capacity(existing.length() as usize);
        for i in 0..existing.length() {
            if let Some(root) = existing.get(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) {
                roots.push(root);
            }
        }

        let view = Rc::new(Self {
            state: RefCell::new(CollageState::with_entries(roots.len())),
            control: RefCell::new(AddPhotoControl::new(config.tween_ms)),
            entries: RefCell::new(Vec::with_capacity(roots.len())),
            container,
            add_button,
            window: window.clone(),
            document: document.clone(),
            config: config.clone(),
            pointer,
            animator,
            listeners: RefCell::new(Vec::new()),
        });

        for (index, root) in roots.into_iter().enumerate() {
            let entry = EntryView::from_root(root, config)?;
            view.bind_entry(index, entry);
        }

        let add_click = {
            let weak = Rc::downgrade(&view);
            EventListener::new(&view.add_button, "click", move |_| {
                if let Some(view) = weak.upgrade() {
                    view.on_add_click();
                }
            })
        };
        view.listeners.borrow_mut().push(add_click);
        view.refresh_control();
        Ok(view)
    }

    pub fn entry_count(&self) -> usize {
        self.state.borrow().len()
    }

    pub fn state(&self) -> Ref<'_, CollageState> {
        self.state.borrow()
    }

    fn now_ms(&self) -> f64 {
        dom::now_ms(&self.window)
    }

    fn bind_entry(self: &Rc<Self>, index: EntryIndex, mut entry: EntryView) {
        let weak: Weak<Self> = Rc::downgrade(self);

        let chooser = entry.chooser.clone();
        entry.listeners.push(EventListener::new(&entry.image_button, "click", move |_| {
            chooser.click();
        }));

        let on_change = weak.clone();
        entry.listeners.push(EventListener::new(&entry.chooser, "change", move |_| {
            if let Some(view) = on_change.upgrade() {
                view.on_file_chosen(index);
            }
        }));

        let on_click = weak.clone();
        // the caption takes typing; the button and chooser open the file
        // dialog and their clicks (one synthetic) would toggle held twice
        let ignored: [Node; 3] = [
            entry.caption.clone().into(),
            entry.image_button.clone().into(),
            entry.chooser.clone().into(),
        ];
        entry.listeners.push(EventListener::new(&entry.root, "click", move |event: &Event| {
            let ignore = event
                .target()
                .and_then(|t| t.dyn_into::<Node>().ok())
                .is_some_and(|node| ignored.iter().any(|n| n.contains(Some(&node))));
            if ignore {
                return;
            }
            if let Some(view) = on_click.upgrade() {
                view.on_photo_click(index);
            }
        }));

        let on_move = weak.clone();
        entry.listeners.push(EventListener::new(&entry.root, "pointermove", move |_| {
            if let Some(view) = on_move.upgrade() {
                view.on_photo_pointer_move(index);
            }
        }));

        let on_input = weak;
        let caption = entry.caption.clone();
        entry.listeners.push(EventListener::new(&entry.caption, "input", move |_| {
            if let Some(view) = on_input.upgrade() {
                view.state.borrow_mut().set_caption(index, caption.value());
            }
        }));

        self.entries.borrow_mut().push(entry);
    }

    /// Commit the pending photo and append a fresh entry. Does nothing
    /// unless a photo is pending.
    pub fn on_add_click(self: &Rc<Self>) {
        let index = {
            let state = self.state.borrow();
            if !state.is_pending() {
                return;
            }
            state.len()
        };

        // markup first, so a failed build leaves state and view aligned
        let built = dom::build_photo_entry(&self.document, &self.config.selectors, index)
            .and_then(|root| {
                self.container.append_child(&root)?;
                EntryView::from_root(root, &self.config)
            });
        let entry = match built {
            Ok(entry) => entry,
            Err(err) => {
                gloo::console::warn!("photo entry not created", err.to_string());
                return;
            }
        };

        let Some(committed) = self.state.borrow_mut().commit_add() else {
            return;
        };
        gloo::console::log!("photo committed, new entry", committed as u32);
        self.refresh_control();
        self.bind_entry(committed, entry);
    }

    fn on_file_chosen(self: &Rc<Self>, index: EntryIndex) {
        let file = self.entries.borrow()[index]
            .chooser
            .files()
            .and_then(|files| files.get(0));
        let Some(file) = file else {
            return;
        };
        let Some(ticket) = self.begin_preview(index) else {
            return;
        };

        let weak = Rc::downgrade(self);
        let file = gloo::file::File::from(file);
        let reader = read_as_data_url(&file, move |result| {
            if let Some(view) = weak.upgrade() {
                view.on_read_done(ticket, result);
            }
        });

        self.entries.borrow_mut()[index].read = Some(reader);
    }

    /// Start a new read for `index`. Any read or swap still in flight for
    /// the entry is dropped and its ticket goes stale.
    pub fn begin_preview(&self, index: EntryIndex) -> Option<ReadTicket> {
        let ticket = self.state.borrow_mut().begin_read(index)?;
        let mut entries = self.entries.borrow_mut();
        let entry = &mut entries[ticket.entry];
        entry.read = None;
        entry.swap = None;
        Some(ticket)
    }

    pub fn on_read_done(self: &Rc<Self>, ticket: ReadTicket, result: Result<String, FileReadError>) {
        let data_url = match result {
            Ok(data_url) => data_url,
            Err(err) => {
                gloo::console::warn!("photo read failed", err.to_string());
                return;
            }
        };
        if !self.state.borrow_mut().finish_read(ticket, data_url.clone()) {
            return;
        }
        self.entries.borrow()[ticket.entry].photo.set_src(&data_url);
        self.refresh_control();

        let weak = Rc::downgrade(self);
        let swap = Timeout::new(self.config.swap_delay_ms, move || {
            if let Some(view) = weak.upgrade() {
                view.swap_in_photo(ticket);
            }
        });
        self.entries.borrow_mut()[ticket.entry].swap = Some(swap);
    }

    pub fn swap_in_photo(&self, ticket: ReadTicket) {
        if !self.state.borrow().is_current(ticket) {
            return;
        }
        let entries = self.entries.borrow();
        let entry = &entries[ticket.entry];
        set_style(&entry.photo, "display", "block");
        set_style(&entry.image_button, "display", "none");
    }

    pub fn on_photo_click(&self, index: EntryIndex) {
        let (outcome, cursor) = {
            let mut state = self.state.borrow_mut();
            let Some(outcome) = state.click(index) else {
                return;
            };
            (outcome, state.cursor())
        };
        set_style(&self.entries.borrow()[index].root, "z-index", &outcome.z_index.to_string());
        if let Some(body) = self.document.body() {
            set_style(&body, "cursor", cursor.css());
        }
    }

    fn on_photo_pointer_move(&self, index: EntryIndex) {
        let Ok(viewport) = dom::viewport(&self.window) else {
            return;
        };
        let offset = self
            .pointer
            .borrow()
            .centered_offset(viewport.width, viewport.height);
        let Some(offset) = self.state.borrow_mut().drag_to(index, offset) else {
            return;
        };
        let root = self.entries.borrow()[index].root.clone();
        self.animator.borrow_mut().translate_to(&root, offset, self.now_ms());
    }

    fn refresh_control(&self) {
        let pending = self.state.borrow().is_pending();
        let now = self.now_ms();
        let tween = self.control.borrow_mut().refresh(pending, now).clone();
        self.animator.borrow_mut().play_button(&self.add_button, tween);
    }
}
