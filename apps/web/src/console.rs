//! # Console Session
//!
//! Drives the page from a terminal: each input line is a page event (see
//! [`crate::events`]) or one of the console's own commands. Dialogs asked
//! by an event are answered on the same terminal.
//!
//! ```text
//! > submit-product
//! Name: [] Rice
//! Price: [] 2.5
//! Quantity: [] 4
//! Unit: [unidad] kg
//! Category: [] Grains
//! Product added successfully.
//! > list
//! Products:
//!   1. Rice  2.50 x 4 kg = 10.00  [Grains]  6f1c...
//! Categories:
//!   1. Grains  0b7a...
//! > delete-product 1
//! Are you sure you want to delete this product? [y/N] y
//! > logout
//! navigate: index.html
//! ```

use std::io::{self, BufRead, Write};

use stockroom_core::view::ProductRow;
use tracing::{info, warn};

use crate::dialog::TerminalDialogs;
use crate::error::{AppError, AppResult};
use crate::events::{self, EventOutcome, PageEvent};
use crate::render::render_page;
use crate::state::InventoryApp;

const PROMPT: &str = "> ";

const HELP: &str = "Page events:
  show-inventory | show-add | show-categories
  close-modal <inventory|add_edit|categories>
  click-backdrop
  submit-product                 fill the form field by field
  edit-product <id|n>            load product n into the form
  delete-product <id|n>
  edit-category <id|n>
  delete-category <id|n>
  logout

Console:
  list    products and categories with their positions
  page    print the page HTML
  json    print the page state as JSON
  help    this text
  quit    leave without logging out";

/// Runs events from `terminal` until end of input, `quit`, or logout.
///
/// ## Returns
/// The navigation target when the session ended by logging out.
///
/// Failed events are reported on the terminal and the session goes on.
pub async fn run_console<R, W>(
    app: &mut InventoryApp,
    terminal: &mut TerminalDialogs<R, W>,
) -> AppResult<Option<String>>
where
    R: BufRead,
    W: Write,
{
    info!("Console session started");

    while let Some(line) = terminal.read_line(PROMPT).map_err(terminal_error)? {
        let line = line.trim();

        let reply = match line {
            "" => continue,
            "quit" | "exit" => break,
            "help" => HELP.to_string(),
            "list" => listing(app),
            "page" => render_page(app),
            "json" => serde_json::to_string_pretty(&app.snapshot())
                .map_err(|e| AppError::internal(e.to_string()))?,
            _ => match run_event(app, terminal, line).await {
                Ok(EventOutcome::Navigate(target)) => {
                    terminal
                        .say(&format!("navigate: {}", target))
                        .map_err(terminal_error)?;
                    return Ok(Some(target));
                }
                Ok(EventOutcome::Done) => continue,
                Ok(EventOutcome::Dismissed) => "(nothing changed)".to_string(),
                Err(err) => {
                    warn!(code = ?err.code, "{}", err.message);
                    format!("error: {}", err)
                }
            },
        };

        terminal.say(&reply).map_err(terminal_error)?;
    }

    info!("Console session ended");
    Ok(None)
}

async fn run_event<R, W>(
    app: &mut InventoryApp,
    terminal: &mut TerminalDialogs<R, W>,
    line: &str,
) -> AppResult<EventOutcome>
where
    R: BufRead,
    W: Write,
{
    let event: PageEvent = line.parse()?;
    events::dispatch(app, terminal, event).await
}

/// Numbered products and categories, in stored order.
fn listing(app: &InventoryApp) -> String {
    let mut out = String::from("Products:");
    for (n, product) in app.inventory().products().iter().enumerate() {
        let row = ProductRow::from(product);
        out.push_str(&format!(
            "\n  {}. {}  {} x {} {} = {}  [{}]  {}",
            n + 1,
            row.name,
            row.price,
            row.quantity,
            row.unit,
            row.total,
            product.category,
            row.id
        ));
    }

    out.push_str("\nCategories:");
    for (n, category) in app.inventory().categories().iter().enumerate() {
        out.push_str(&format!("\n  {}. {}  {}", n + 1, category.name, category.id));
    }
    out
}

fn terminal_error(e: io::Error) -> AppError {
    AppError::internal(format!("Terminal I/O failed: {}", e))
}
