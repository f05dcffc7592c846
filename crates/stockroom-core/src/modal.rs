//! # Modal Manager
//!
//! Visibility of the three panels and their shared backdrop.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ░░░░░░░░░░░░░░░░░░░░░░ backdrop ░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░  │
//! │  ░░  ┌────────────┐  ┌────────────┐  ┌────────────┐               ░░  │
//! │  ░░  │ Inventory  │  │  Add/Edit  │  │ Categories │               ░░  │
//! │  ░░  │  [close]   │  │  [close]   │  │  [close]   │               ░░  │
//! │  ░░  └────────────┘  └────────────┘  └────────────┘               ░░  │
//! │  ░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░  │
//! │                                                                         │
//! │  open(any)       → panel shown, backdrop shown                          │
//! │  close(panel)    → panel hidden; backdrop hidden once nothing is open   │
//! │  click backdrop  → ALL panels hidden                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

/// One of the overlay panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Modal {
    Inventory,
    AddEdit,
    Categories,
}

impl Modal {
    pub const ALL: [Modal; 3] = [Modal::Inventory, Modal::AddEdit, Modal::Categories];

    /// Element id of the panel in the page.
    pub fn element_id(&self) -> &'static str {
        match self {
            Modal::Inventory => "inventoryModal",
            Modal::AddEdit => "agregarModal",
            Modal::Categories => "categoriesModal",
        }
    }

    fn bit(&self) -> u8 {
        match self {
            Modal::Inventory => 0b001,
            Modal::AddEdit => 0b010,
            Modal::Categories => 0b100,
        }
    }
}

impl fmt::Display for Modal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Modal::Inventory => "inventory",
            Modal::AddEdit => "add/edit",
            Modal::Categories => "categories",
        };
        f.write_str(name)
    }
}

/// Which panels are showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModalManager {
    open: u8,
    raised: Option<Modal>,
}

impl ModalManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, modal: Modal) {
        self.open |= modal.bit();
    }

    /// Opens `modal` stacked above any other open panel.
    pub fn open_raised(&mut self, modal: Modal) {
        self.open(modal);
        self.raised = Some(modal);
    }

    /// Closes one panel.
    ///
    /// ## Returns
    /// `true` if the panel was open.
    pub fn close(&mut self, modal: Modal) -> bool {
        let was_open = self.is_open(modal);
        self.open &= !modal.bit();
        if self.raised == Some(modal) {
            self.raised = None;
        }
        was_open
    }

    /// Backdrop click: closes every panel.
    ///
    /// ## Returns
    /// The panels that were open, in [`Modal::ALL`] order.
    pub fn close_all(&mut self) -> Vec<Modal> {
        let closed = self.open_modals();
        self.open = 0;
        self.raised = None;
        closed
    }

    pub fn is_open(&self, modal: Modal) -> bool {
        self.open & modal.bit() != 0
    }

    pub fn is_raised(&self, modal: Modal) -> bool {
        self.raised == Some(modal)
    }

    pub fn backdrop_visible(&self) -> bool {
        self.open != 0
    }

    pub fn open_modals(&self) -> Vec<Modal> {
        Modal::ALL.into_iter().filter(|m| self.is_open(*m)).collect()
    }
}
