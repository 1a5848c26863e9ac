//! The invoice form: a scrollable column of labelled comboboxes.
//!
//! The form owns the signal registry and is the only place input is routed.
//! Keys go to the focused field; pointer presses go to open menus first
//! (they float above everything) and then to the field under the pointer;
//! resize, scroll and outside presses are forwarded to subscribers only.

use std::path::Path;

use combobox::{
    Combobox, ComboboxConfig, ComboboxTheme, ConfigError, FilterMode, SelectValue, Signal,
    SignalRegistry,
};
use termgrid::{Compositor, Event, Key, Modifiers, MouseButton, Paint, Rect, Rgb};
use tokio::sync::mpsc::UnboundedSender;

use crate::catalog::Catalog;

pub const CUSTOMER: &str = "customer";
pub const CURRENCY: &str = "currency";
pub const TAGS: &str = "tags";
pub const TERMS: &str = "terms";

const TOP: u16 = 2;
const LABEL_X: u16 = 2;
const FIELD_X: u16 = 20;
const FIELD_MAX_WIDTH: u16 = 36;
const GAP: u16 = 1;
/// Preview line plus status line.
const FOOTER_ROWS: u16 = 2;

const MUTED: Rgb = Rgb::new(130, 124, 150);

/// Posted by widget callbacks and drained by the event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMessage {
    Changed { field: String, value: SelectValue },
    AddContact,
    RefreshCatalog,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    Continue,
    Quit,
}

#[derive(Debug)]
struct Field {
    label: &'static str,
    widget: Combobox,
    /// Screen row of the trigger, `None` while scrolled out of view.
    row: Option<u16>,
}

#[derive(Debug)]
pub struct InvoiceForm {
    fields: Vec<Field>,
    focus: usize,
    scroll: u16,
    viewport: Rect,
    signals: SignalRegistry,
    theme: ComboboxTheme,
    status: String,
}

fn notify(
    tx: UnboundedSender<FormMessage>,
    field: &'static str,
) -> impl Fn(&SelectValue) + Send + Sync + 'static {
    move |value| {
        let message = FormMessage::Changed {
            field: field.to_string(),
            value: value.clone(),
        };
        if tx.send(message).is_err() {
            log::warn!("{} changed after the form loop stopped", field);
        }
    }
}

fn request(
    tx: UnboundedSender<FormMessage>,
    message: FormMessage,
) -> impl Fn() + Send + Sync + 'static {
    move || {
        if tx.send(message.clone()).is_err() {
            log::warn!("{:?} requested after the form loop stopped", message);
        }
    }
}

impl InvoiceForm {
    pub fn new(catalog: &Catalog, tx: UnboundedSender<FormMessage>) -> Result<Self, ConfigError> {
        let customer = ComboboxConfig::new(CUSTOMER)
            .options(catalog.customers.clone())
            .searchable(true)
            .required(true)
            .placeholder("Choose a customer")
            .on_change(notify(tx.clone(), CUSTOMER))
            .on_add_new(request(tx.clone(), FormMessage::AddContact))
            .on_refresh(request(tx.clone(), FormMessage::RefreshCatalog));

        let currency = ComboboxConfig::new(CURRENCY)
            .options(catalog.currencies.clone())
            .required(true)
            .initial_value("eur")
            .on_change(notify(tx.clone(), CURRENCY));

        let tags = ComboboxConfig::new(TAGS)
            .options(catalog.tags.clone())
            .searchable(true)
            .multiple(true)
            .filter_mode(FilterMode::Fuzzy)
            .placeholder("Add tags")
            .on_change(notify(tx.clone(), TAGS));

        let terms = ComboboxConfig::new(TERMS)
            .options(catalog.payment_terms.clone())
            .initial_value("net-30")
            .disabled(true)
            .on_change(notify(tx, TERMS));

        let mut form = Self {
            fields: vec![
                Field::new("Customer", Combobox::new(customer)?),
                Field::new("Currency", Combobox::new(currency)?),
                Field::new("Tags", Combobox::new(tags)?),
                Field::new("Payment terms", Combobox::new(terms)?),
            ],
            focus: 0,
            scroll: 0,
            viewport: Rect::default(),
            signals: SignalRegistry::new(),
            theme: ComboboxTheme::default(),
            status: "Tab moves between fields, Ctrl+S submits, Ctrl+Q quits".to_string(),
        };
        for field in &mut form.fields {
            field.widget.mount(&mut form.signals);
        }
        Ok(form)
    }

    pub fn unmount(&mut self) {
        for field in &mut self.fields {
            field.widget.unmount(&mut self.signals);
        }
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.widget.name() == name)
    }

    pub fn focused(&self) -> &str {
        self.fields[self.focus].widget.name()
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    // -------------------------------------------------------------------------
    // Layout
    // -------------------------------------------------------------------------

    fn body(&self) -> Rect {
        Rect::new(
            0,
            TOP,
            self.viewport.width,
            self.viewport.height.saturating_sub(TOP + FOOTER_ROWS),
        )
    }

    fn content_height(&self) -> u16 {
        self.fields.iter().map(|f| f.widget.height() + GAP).sum()
    }

    /// Offset of field `index` from the top of the content.
    fn offset_of(&self, index: usize) -> u16 {
        self.fields[..index]
            .iter()
            .map(|f| f.widget.height() + GAP)
            .sum()
    }

    /// Place every field for the given viewport and current scroll offset.
    ///
    /// Fields scrolled out of the body are closed and given an empty area.
    pub fn layout(&mut self, viewport: Rect) {
        self.viewport = viewport;
        let body = self.body();
        let max_scroll = self.content_height().saturating_sub(body.height);
        self.scroll = self.scroll.min(max_scroll);

        let width = viewport
            .width
            .saturating_sub(FIELD_X + 2)
            .min(FIELD_MAX_WIDTH);
        let mut y = i32::from(body.y) - i32::from(self.scroll);

        for field in &mut self.fields {
            let height = field.widget.height();
            let visible = y >= i32::from(body.y) && y < i32::from(body.bottom());
            if visible {
                let row = y as u16;
                field.row = Some(row);
                field
                    .widget
                    .layout(Rect::new(FIELD_X, row, width, height), viewport);
            } else {
                field.row = None;
                field.widget.close(&mut self.signals);
                field.widget.layout(Rect::new(FIELD_X, 0, 0, 0), viewport);
            }
            y += i32::from(height + GAP);
        }
    }

    fn scroll_by(&mut self, delta: i16) {
        let max_scroll = self.content_height().saturating_sub(self.body().height);
        let next = (i32::from(self.scroll) + i32::from(delta)).clamp(0, i32::from(max_scroll)) as u16;
        if next == self.scroll {
            return;
        }
        log::trace!("form scroll {} -> {}", self.scroll, next);
        self.scroll = next;
        self.layout(self.viewport);
        self.dispatch_signal(Signal::Scroll, None);
        for field in &mut self.fields {
            field.widget.rehover();
        }
    }

    fn ensure_focus_visible(&mut self) {
        let body = self.body();
        let top = self.offset_of(self.focus);
        let height = self.fields[self.focus].widget.height();
        let scroll = if top < self.scroll {
            top
        } else if top + height > self.scroll + body.height {
            (top + height).saturating_sub(body.height)
        } else {
            return;
        };
        self.scroll = scroll;
        self.layout(self.viewport);
    }

    // -------------------------------------------------------------------------
    // Input
    // -------------------------------------------------------------------------

    pub fn handle_event(&mut self, event: &Event) -> FormAction {
        match *event {
            Event::Key { key, modifiers } => return self.handle_key(key, modifiers),
            Event::PointerDown { x, y, button } => self.handle_pointer_down(x, y, button),
            Event::PointerMove { .. } => {
                for field in &mut self.fields {
                    field.widget.handle_event(event, &mut self.signals);
                }
            }
            Event::Scroll { delta_y, .. } => {
                let over_menu = self
                    .fields
                    .iter_mut()
                    .filter(|f| f.widget.is_open())
                    .any(|f| f.widget.handle_event(event, &mut self.signals).is_handled());
                if !over_menu {
                    self.scroll_by(delta_y);
                }
            }
            Event::Resize { width, height } => {
                self.layout(Rect::from_size(width, height));
                self.dispatch_signal(Signal::Resize, None);
            }
        }
        FormAction::Continue
    }

    fn handle_key(&mut self, key: Key, modifiers: Modifiers) -> FormAction {
        if modifiers.ctrl {
            match key {
                Key::Char('q') | Key::Char('c') => return FormAction::Quit,
                Key::Char('s') => {
                    self.submit();
                    return FormAction::Continue;
                }
                _ => {}
            }
        }

        let result = self.fields[self.focus]
            .widget
            .handle_key(key, modifiers, &mut self.signals);
        if !result.is_handled() {
            match key {
                Key::Tab => self.cycle_focus(1),
                Key::BackTab => self.cycle_focus(-1),
                _ => {}
            }
        }
        FormAction::Continue
    }

    /// Move focus to the next enabled field in `step` direction, wrapping.
    fn cycle_focus(&mut self, step: isize) {
        let len = self.fields.len() as isize;
        let mut next = self.focus as isize;
        for _ in 0..len {
            next = (next + step).rem_euclid(len);
            if !self.fields[next as usize].widget.is_disabled() {
                break;
            }
        }
        self.focus = next as usize;
        log::debug!("focus -> {}", self.focused());
        self.ensure_focus_visible();
    }

    fn handle_pointer_down(&mut self, x: u16, y: u16, button: MouseButton) {
        // Open menus float above the form, so they see the press first.
        let mut order: Vec<usize> = (0..self.fields.len())
            .filter(|&i| self.fields[i].widget.is_open())
            .collect();
        order.extend((0..self.fields.len()).filter(|&i| !self.fields[i].widget.is_open()));

        let target = order.into_iter().find(|&i| {
            self.fields[i]
                .widget
                .handle_pointer_down(x, y, button, &mut self.signals)
                .is_handled()
        });
        if let Some(i) = target {
            self.focus = i;
        }
        self.dispatch_signal(Signal::PointerDownOutside, target);
    }

    /// Deliver `signal` to each subscribed field except `skip`.
    fn dispatch_signal(&mut self, signal: Signal, skip: Option<usize>) {
        for owner in self.signals.subscribers(signal) {
            let Some(i) = self.index_of(&owner) else {
                log::warn!("{:?} subscriber {} is not a form field", signal, owner);
                continue;
            };
            if Some(i) != skip {
                self.fields[i].widget.handle_signal(signal, &mut self.signals);
            }
        }
    }

    // -------------------------------------------------------------------------
    // Submission and messages
    // -------------------------------------------------------------------------

    /// Validate required fields, marking the missing ones.
    pub fn submit(&mut self) -> bool {
        let mut missing = Vec::new();
        for field in &mut self.fields {
            if field.widget.is_satisfied() {
                field.widget.set_error(None);
            } else {
                field
                    .widget
                    .set_error(Some(format!("{} is required", field.label)));
                missing.push(field.label);
            }
        }
        self.layout(self.viewport);

        if missing.is_empty() {
            self.status = format!("Submitted: {}", self.preview());
            log::info!("invoice submitted: {}", self.preview());
            true
        } else {
            self.status = format!("Missing: {}", missing.join(", "));
            log::warn!("submit blocked, missing {:?}", missing);
            false
        }
    }

    /// Hidden-field values as they would be posted.
    pub fn preview(&self) -> String {
        self.fields
            .iter()
            .map(|f| format!("{}={}", f.widget.name(), f.widget.hidden_value()))
            .collect::<Vec<_>>()
            .join("&")
    }

    pub fn apply(&mut self, message: FormMessage, catalog: &mut Catalog, catalog_path: Option<&Path>) {
        log::debug!("form message {:?}", message);
        match message {
            FormMessage::Changed { field, value } => {
                let shown = if value.is_empty() {
                    "(none)".to_string()
                } else {
                    value.to_field_value()
                };
                self.status = format!("{} set to {}", field, shown);
                if let Some(i) = self.index_of(&field) {
                    let widget = &mut self.fields[i].widget;
                    if widget.error().is_some() && widget.is_satisfied() {
                        widget.set_error(None);
                        self.layout(self.viewport);
                    }
                }
            }
            FormMessage::AddContact => {
                let contact = catalog.add_contact();
                let Some(i) = self.index_of(CUSTOMER) else {
                    return;
                };
                if let Err(e) = self.fields[i].widget.set_options(catalog.customers.clone()) {
                    self.status = e.to_string();
                    return;
                }
                self.fields[i]
                    .widget
                    .select_value(&contact.value, &mut self.signals);
                self.focus = i;
                self.ensure_focus_visible();
            }
            FormMessage::RefreshCatalog => match Catalog::load(catalog_path) {
                Ok(fresh) => {
                    *catalog = fresh;
                    match self.set_catalog(catalog) {
                        Ok(()) => self.status = "Catalog reloaded".to_string(),
                        Err(e) => self.status = e.to_string(),
                    }
                }
                Err(e) => {
                    log::warn!("catalog refresh failed: {}", e);
                    self.status = e.to_string();
                }
            },
        }
    }

    fn set_catalog(&mut self, catalog: &Catalog) -> Result<(), ConfigError> {
        for field in &mut self.fields {
            let options = match field.widget.name() {
                CUSTOMER => &catalog.customers,
                CURRENCY => &catalog.currencies,
                TAGS => &catalog.tags,
                TERMS => &catalog.payment_terms,
                _ => continue,
            };
            field.widget.set_options(options.clone())?;
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    pub fn render(&self, compositor: &mut Compositor) {
        let viewport = compositor.viewport();
        let base = compositor.base_mut();
        base.put_str(LABEL_X, 0, "New invoice", viewport.width, Paint::default().bold());

        for field in &self.fields {
            let Some(row) = field.row else { continue };
            let label = if field.widget.config().required {
                format!("{} *", field.label)
            } else {
                field.label.to_string()
            };
            let paint = if field.widget.is_disabled() {
                Paint::default().fg(MUTED)
            } else {
                Paint::default()
            };
            compositor
                .base_mut()
                .put_str(LABEL_X, row, &label, FIELD_X - LABEL_X - 1, paint);
        }

        for (i, field) in self.fields.iter().enumerate() {
            if field.row.is_some() {
                field.widget.render(compositor, i == self.focus, &self.theme);
            }
        }

        let preview_row = viewport.height.saturating_sub(2);
        let status_row = viewport.height.saturating_sub(1);
        let base = compositor.base_mut();
        base.fill(Rect::new(0, preview_row, viewport.width, FOOTER_ROWS), Paint::default());
        base.put_str(
            LABEL_X,
            preview_row,
            &self.preview(),
            viewport.width.saturating_sub(LABEL_X),
            Paint::default().fg(MUTED),
        );
        base.put_str(
            LABEL_X,
            status_row,
            &self.status,
            viewport.width.saturating_sub(LABEL_X),
            Paint::default(),
        );
    }
}

impl Field {
    fn new(label: &'static str, widget: Combobox) -> Self {
        Self {
            label,
            widget,
            row: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc::{self, UnboundedReceiver};

    fn form() -> (InvoiceForm, UnboundedReceiver<FormMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut form = InvoiceForm::new(&Catalog::builtin(), tx).unwrap();
        form.layout(Rect::from_size(80, 24));
        (form, rx)
    }

    fn widget<'a>(form: &'a InvoiceForm, name: &str) -> &'a Combobox {
        &form.fields[form.index_of(name).unwrap()].widget
    }

    fn press(form: &mut InvoiceForm, key: Key) -> FormAction {
        form.handle_event(&Event::key(key))
    }

    #[test]
    fn test_tab_skips_disabled_field() {
        let (mut form, _) = form();
        assert_eq!(form.focused(), CUSTOMER);
        press(&mut form, Key::Tab);
        press(&mut form, Key::Tab);
        assert_eq!(form.focused(), TAGS);
        press(&mut form, Key::Tab);
        assert_eq!(form.focused(), CUSTOMER);
        press(&mut form, Key::BackTab);
        assert_eq!(form.focused(), TAGS);
    }

    #[test]
    fn test_ctrl_q_quits() {
        let (mut form, _) = form();
        let quit = Event::Key {
            key: Key::Char('q'),
            modifiers: Modifiers::ctrl(),
        };
        assert_eq!(form.handle_event(&quit), FormAction::Quit);
    }

    #[test]
    fn test_submit_flags_missing_required_fields() {
        let (mut form, _) = form();
        assert!(!form.submit());
        assert_eq!(widget(&form, CUSTOMER).error(), Some("Customer is required"));
        assert_eq!(widget(&form, CURRENCY).error(), None);
        assert!(form.status().contains("Customer"));
    }

    #[test]
    fn test_commit_posts_change_message() {
        let (mut form, mut rx) = form();
        press(&mut form, Key::Down);
        press(&mut form, Key::Enter);

        assert_eq!(
            rx.try_recv().unwrap(),
            FormMessage::Changed {
                field: CUSTOMER.to_string(),
                value: SelectValue::Single("c-acme".to_string()),
            }
        );
        assert!(form.preview().starts_with("customer=c-acme&currency=eur"));
    }

    #[test]
    fn test_change_clears_error_once_satisfied() {
        let (mut form, mut rx) = form();
        let mut catalog = Catalog::builtin();
        form.submit();

        press(&mut form, Key::Down);
        press(&mut form, Key::Enter);
        let message = rx.try_recv().unwrap();
        form.apply(message, &mut catalog, None);

        assert_eq!(widget(&form, CUSTOMER).error(), None);
        assert_eq!(form.status(), "customer set to c-acme");
    }

    #[test]
    fn test_add_contact_selects_new_customer() {
        let (mut form, mut rx) = form();
        let mut catalog = Catalog::builtin();
        form.apply(FormMessage::AddContact, &mut catalog, None);

        let contact = catalog.customers.last().unwrap().clone();
        let customer = widget(&form, CUSTOMER);
        assert_eq!(customer.display_label(), Some(contact.label));
        assert!(matches!(rx.try_recv(), Ok(FormMessage::Changed { .. })));
    }

    #[test]
    fn test_clicking_another_trigger_closes_open_menu() {
        let (mut form, _) = form();
        let currency_row = form.fields[1].row.unwrap();
        form.handle_event(&Event::click(FIELD_X + 1, currency_row));
        assert!(widget(&form, CURRENCY).is_open());
        assert_eq!(form.focused(), CURRENCY);

        form.handle_event(&Event::click(FIELD_X + 1, TOP));
        assert!(widget(&form, CUSTOMER).is_open());
        assert!(!widget(&form, CURRENCY).is_open());
    }

    #[test]
    fn test_click_on_blank_area_closes_menu() {
        let (mut form, _) = form();
        press(&mut form, Key::Down);
        assert!(widget(&form, CUSTOMER).is_open());

        form.handle_event(&Event::click(70, 20));
        assert!(!widget(&form, CUSTOMER).is_open());
    }

    #[test]
    fn test_small_viewport_scrolls_to_focus() {
        let (mut form, _) = form();
        form.layout(Rect::from_size(80, 7));
        press(&mut form, Key::Tab);
        press(&mut form, Key::Tab);
        assert_eq!(form.focused(), TAGS);
        assert!(form.fields[2].row.is_some());
        assert!(form.fields[0].row.is_none());
    }

    fn wheel(form: &mut InvoiceForm, delta_y: i16) {
        // Over the label column, clear of every menu.
        form.handle_event(&Event::Scroll {
            x: LABEL_X,
            y: 8,
            delta_y,
        });
    }

    #[test]
    fn test_scrolling_form_closes_hidden_menu_and_moves_visible_one() {
        let (mut form, _) = form();
        form.layout(Rect::from_size(80, 9));

        press(&mut form, Key::Down);
        assert!(widget(&form, CUSTOMER).is_open());
        assert!(form.signals.is_subscribed(CUSTOMER, Signal::Scroll));

        // The customer field scrolls off the top of the body.
        wheel(&mut form, 1);
        assert_eq!(form.scroll, 1);
        assert_eq!(form.fields[0].row, None);
        assert!(!widget(&form, CUSTOMER).is_open());
        assert!(!form.signals.is_subscribed(CUSTOMER, Signal::Resize));
        assert!(!form.signals.is_subscribed(CUSTOMER, Signal::Scroll));
        assert!(form.signals.is_subscribed(CUSTOMER, Signal::PointerDownOutside));

        press(&mut form, Key::Tab);
        press(&mut form, Key::Tab);
        assert_eq!(form.focused(), TAGS);
        press(&mut form, Key::Down);
        let tags = widget(&form, TAGS);
        assert_eq!(tags.trigger_rect().y, 5);
        assert_eq!(tags.menu_position().map(|p| p.top + p.height), Some(5));

        // Scrolling back up moves the trigger down; the menu follows it.
        wheel(&mut form, -1);
        assert_eq!(form.scroll, 0);
        let tags = widget(&form, TAGS);
        assert!(tags.is_open());
        assert_eq!(tags.trigger_rect().y, 6);
        assert_eq!(tags.menu_position().map(|p| p.top + p.height), Some(6));
        assert!(form.signals.is_subscribed(TAGS, Signal::Scroll));
    }
}
