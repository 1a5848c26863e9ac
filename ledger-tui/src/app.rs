//! Main event loop.

use crossterm::event::EventStream;
use futures::StreamExt;
use log::{debug, info, trace};
use termgrid::{Compositor, Event, Terminal};
use tokio::sync::mpsc;

use crate::catalog::Catalog;
use crate::error::AppError;
use crate::form::{FormAction, InvoiceForm};
use crate::settings::Settings;

pub async fn run(settings: Settings) -> Result<(), AppError> {
    let mut catalog = Catalog::load(settings.catalog_path.as_deref())?;
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut form = InvoiceForm::new(&catalog, tx)?;

    let mut terminal = Terminal::new()?;
    let (width, height) = terminal.size()?;
    let mut compositor = Compositor::new(width, height);
    form.layout(compositor.viewport());

    let mut events = EventStream::new();
    info!("event loop started at {}x{}", width, height);

    loop {
        compositor.clear();
        form.render(&mut compositor);
        terminal.draw(&compositor.compose())?;

        tokio::select! {
            next = events.next() => {
                let Some(next) = next else {
                    info!("input stream closed");
                    break;
                };
                let raw = next?;
                trace!("crossterm event: {:?}", raw);
                let Some(event) = Event::from_crossterm(raw) else {
                    continue;
                };
                debug!("event: {:?}", event);

                if let Event::Resize { width, height } = event {
                    compositor.resize(width, height);
                }
                if form.handle_event(&event) == FormAction::Quit {
                    info!("quit requested");
                    break;
                }
            }
            Some(message) = rx.recv() => {
                form.apply(message, &mut catalog, settings.catalog_path.as_deref());
            }
        }
    }

    info!("exiting with status {:?}", form.status());
    form.unmount();
    Ok(())
}
