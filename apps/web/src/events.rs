//! # Page Events
//!
//! Routes the page's `data-action` controls to their commands.
//!
//! ## Event Names
//! ```text
//! ┌──────────────────────────────┬──────────────────────────────────────────┐
//! │  data-action (+ argument)    │  command                                 │
//! ├──────────────────────────────┼──────────────────────────────────────────┤
//! │  show-inventory              │  modal::show_inventory                   │
//! │  show-add                    │  modal::show_add                         │
//! │  show-categories             │  modal::show_categories                  │
//! │  close-modal <data-modal>    │  modal::close_modal                      │
//! │  click-backdrop              │  modal::click_backdrop                   │
//! │  submit-product              │  product::submit_product_form            │
//! │  edit-product <data-id>      │  product::edit_product                   │
//! │  delete-product <data-id>    │  product::delete_product                 │
//! │  edit-category <data-id>     │  category::rename_category               │
//! │  delete-category <data-id>   │  category::delete_category               │
//! │  logout                      │  session::logout                         │
//! └──────────────────────────────┴──────────────────────────────────────────┘
//! ```
//! A `data-id` may also be given as a 1-based position in stored order.

use std::str::FromStr;

use stockroom_core::{CategoryId, FormFields, Modal, ProductId, RenameOutcome};
use tracing::debug;

use crate::commands::{category, modal, product, session};
use crate::dialog::Dialogs;
use crate::error::{AppError, AppResult};
use crate::state::InventoryApp;

/// Labels of the form prompts, in field order.
pub const FORM_PROMPTS: [&str; 5] = ["Name:", "Price:", "Quantity:", "Unit:", "Category:"];

/// A product or category reference as written in a control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target(String);

impl Target {
    fn position(&self) -> Option<usize> {
        self.0.parse::<usize>().ok().filter(|n| *n > 0).map(|n| n - 1)
    }

    fn product(&self, app: &InventoryApp) -> AppResult<ProductId> {
        ProductId::parse(&self.0)
            .or_else(|| {
                self.position()
                    .and_then(|i| app.inventory().products().get(i))
                    .map(|p| p.id)
            })
            .ok_or_else(|| AppError::not_found("Product", &self.0))
    }

    fn category(&self, app: &InventoryApp) -> AppResult<CategoryId> {
        CategoryId::parse(&self.0)
            .or_else(|| {
                self.position()
                    .and_then(|i| app.inventory().categories().get(i))
                    .map(|c| c.id)
            })
            .ok_or_else(|| AppError::not_found("Category", &self.0))
    }
}

/// One user action on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    ShowInventory,
    ShowAdd,
    ShowCategories,
    CloseModal(Modal),
    ClickBackdrop,
    SubmitProduct,
    EditProduct(Target),
    DeleteProduct(Target),
    EditCategory(Target),
    DeleteCategory(Target),
    Logout,
}

impl FromStr for PageEvent {
    type Err = AppError;

    /// Parses `"<data-action> [argument]"`.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let action = parts.next().unwrap_or_default();
        let argument = parts.next();

        if parts.next().is_some() {
            return Err(AppError::validation(format!("Too many arguments: {}", line.trim())));
        }

        let target = |name: &str| {
            argument
                .map(|a| Target(a.to_string()))
                .ok_or_else(|| AppError::validation(format!("{} needs an id", name)))
        };

        let event = match action {
            "show-inventory" => PageEvent::ShowInventory,
            "show-add" => PageEvent::ShowAdd,
            "show-categories" => PageEvent::ShowCategories,
            "close-modal" => PageEvent::CloseModal(parse_modal(argument)?),
            "click-backdrop" => PageEvent::ClickBackdrop,
            "submit-product" => PageEvent::SubmitProduct,
            "edit-product" => PageEvent::EditProduct(target(action)?),
            "delete-product" => PageEvent::DeleteProduct(target(action)?),
            "edit-category" => PageEvent::EditCategory(target(action)?),
            "delete-category" => PageEvent::DeleteCategory(target(action)?),
            "logout" => PageEvent::Logout,
            other => return Err(AppError::validation(format!("Unknown action: {}", other))),
        };

        let takes_argument = matches!(
            event,
            PageEvent::CloseModal(_)
                | PageEvent::EditProduct(_)
                | PageEvent::DeleteProduct(_)
                | PageEvent::EditCategory(_)
                | PageEvent::DeleteCategory(_)
        );
        if !takes_argument && argument.is_some() {
            return Err(AppError::validation(format!("{} takes no argument", action)));
        }

        Ok(event)
    }
}

fn parse_modal(argument: Option<&str>) -> AppResult<Modal> {
    match argument {
        Some("inventory") => Ok(Modal::Inventory),
        Some("add_edit") => Ok(Modal::AddEdit),
        Some("categories") => Ok(Modal::Categories),
        Some(other) => Err(AppError::validation(format!("Unknown panel: {}", other))),
        None => Err(AppError::validation("close-modal needs a panel")),
    }
}

/// What an event left behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    /// The event ran; re-render.
    Done,

    /// A confirm was declined or a prompt dismissed; nothing changed.
    Dismissed,

    /// The page navigates away to this location.
    Navigate(String),
}

/// Runs one event against the app.
pub async fn dispatch(
    app: &mut InventoryApp,
    dialogs: &mut dyn Dialogs,
    event: PageEvent,
) -> AppResult<EventOutcome> {
    debug!(?event, "Dispatching page event");

    let outcome = match event {
        PageEvent::ShowInventory => {
            modal::show_inventory(app);
            EventOutcome::Done
        }
        PageEvent::ShowAdd => {
            modal::show_add(app);
            EventOutcome::Done
        }
        PageEvent::ShowCategories => {
            modal::show_categories(app);
            EventOutcome::Done
        }
        PageEvent::CloseModal(panel) => {
            modal::close_modal(app, panel);
            EventOutcome::Done
        }
        PageEvent::ClickBackdrop => {
            modal::click_backdrop(app);
            EventOutcome::Done
        }
        PageEvent::SubmitProduct => {
            let filled = fill_form(app.form().fields(), dialogs);
            match filled {
                Some(fields) => {
                    product::submit_product_form(app, dialogs, fields).await?;
                    EventOutcome::Done
                }
                None => EventOutcome::Dismissed,
            }
        }
        PageEvent::EditProduct(target) => {
            let id = target.product(app)?;
            product::edit_product(app, id)?;
            EventOutcome::Done
        }
        PageEvent::DeleteProduct(target) => {
            let id = target.product(app)?;
            match product::delete_product(app, dialogs, id).await? {
                Some(_) => EventOutcome::Done,
                None => EventOutcome::Dismissed,
            }
        }
        PageEvent::EditCategory(target) => {
            let id = target.category(app)?;
            match category::rename_category(app, dialogs, id).await? {
                RenameOutcome::Renamed { .. } => EventOutcome::Done,
                RenameOutcome::Unchanged => EventOutcome::Dismissed,
            }
        }
        PageEvent::DeleteCategory(target) => {
            let id = target.category(app)?;
            match category::delete_category(app, dialogs, id).await? {
                Some(_) => EventOutcome::Done,
                None => EventOutcome::Dismissed,
            }
        }
        PageEvent::Logout => EventOutcome::Navigate(session::logout(app).await?),
    };

    Ok(outcome)
}

/// Asks for each form field, pre-filled with what the form holds.
/// `None` if any prompt is dismissed.
fn fill_form(current: &FormFields, dialogs: &mut dyn Dialogs) -> Option<FormFields> {
    let [name, price, quantity, unit, category] = FORM_PROMPTS;
    Some(FormFields {
        name: dialogs.prompt(name, &current.name)?,
        price: dialogs.prompt(price, &current.price)?,
        quantity: dialogs.prompt(quantity, &current.quantity)?,
        unit: dialogs.prompt(unit, &current.unit)?,
        category: dialogs.prompt(category, &current.category)?,
    })
}
