//! Text rendering for menu and inventory listings.

use super::command::Command;
use crate::store::inventory::Inventory;
use std::io::{self, Write};

pub(crate) const INVENTORY_HEADER: &str = "======= The Current Inventory: =======";
pub(crate) const INVENTORY_COLUMNS: &str = "ID\tCD Title (by: Artist)\n";
pub(crate) const INVENTORY_FOOTER: &str = "======================================";

/// Writes the six-command menu.
pub fn write_menu<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "Menu\n")?;
    for command in Command::ALL {
        writeln!(out, "[{}] {}", command.key(), command.label())?;
    }
    writeln!(out)
}

/// Writes the header, one line per record in order, and the footer.
pub fn write_inventory<W: Write>(out: &mut W, inventory: &Inventory) -> io::Result<()> {
    writeln!(out, "{INVENTORY_HEADER}")?;
    writeln!(out, "{INVENTORY_COLUMNS}")?;
    for record in inventory {
        writeln!(out, "{}\t{} (by:{})", record.id, record.title, record.artist)?;
    }
    writeln!(out, "{INVENTORY_FOOTER}")
}
