//! Menu-driven interactive shell.
//!
//! # Responsibility
//! - Own the session inventory and the data file location.
//! - Validate every prompt locally and dispatch menu commands to the store
//!   and the storage layer.
//! - Decide when to display the inventory after a mutation.
//!
//! # Invariants
//! - Only one of `l a i d s x` is ever dispatched; other input re-prompts.
//! - Identifier prompts re-prompt until an integer is entered.
//! - Nothing is saved unless the user confirms a save; exit never saves.
//! - A missing file on reload is reported and the inventory is kept.
//! - Corrupt persisted data ends the session with `ShellError::Storage`.
//! - Closed input ends the session as if `x` was chosen.

use crate::model::record::{parse_cd_id, CdId};
use crate::storage::{open_inventory, read_inventory, write_inventory, OpenSource, StorageError};
use crate::store::inventory::Inventory;
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

pub mod command;
pub mod render;

pub use command::Command;

const CHOICE_PROMPT: &str = "Which operation would you like to perform? [l, a, i, d, s or x]: ";

pub type ShellResult<T> = Result<T, ShellError>;

/// Unrecoverable shell failure.
#[derive(Debug)]
pub enum ShellError {
    /// Reading from or writing to the terminal failed.
    Io(io::Error),
    /// The persisted inventory could not be used.
    Storage(StorageError),
}

impl Display for ShellError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "terminal i/o failed: {err}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ShellError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<io::Error> for ShellError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<StorageError> for ShellError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Why a session stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The user chose `x`.
    Exited,
    /// Input reached end-of-file.
    InputClosed,
}

enum Flow {
    Continue,
    End(SessionEnd),
}

/// One interactive session over a line-based input and a text output.
pub struct Shell<R, W> {
    data_file: PathBuf,
    inventory: Inventory,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    /// Loads `data_file` and returns a session ready to `run`.
    ///
    /// A missing file is created holding an empty inventory.
    ///
    /// # Errors
    /// - `ShellError::Storage` when the file exists but cannot be decoded or
    ///   the empty file cannot be written.
    pub fn open(data_file: impl Into<PathBuf>, input: R, output: W) -> ShellResult<Self> {
        let data_file = data_file.into();
        let (inventory, source) = open_inventory(&data_file).map_err(|err| {
            error!(
                "event=session_open module=shell status=error error={}",
                err
            );
            err
        })?;
        info!(
            "event=session_open module=shell status=ok source={} records={}",
            match source {
                OpenSource::Loaded => "file",
                OpenSource::Bootstrapped => "bootstrap",
            },
            inventory.len()
        );

        Ok(Self {
            data_file,
            inventory,
            input,
            output,
        })
    }

    pub fn into_inventory(self) -> Inventory {
        self.inventory
    }

    /// Runs the menu loop until the user exits or input closes.
    ///
    /// # Errors
    /// - `ShellError::Io` when the terminal fails.
    /// - `ShellError::Storage` when a reload hits corrupt data.
    pub fn run(&mut self) -> ShellResult<SessionEnd> {
        loop {
            render::write_menu(&mut self.output)?;
            let Some(command) = self.read_menu_choice()? else {
                return Ok(self.finish(SessionEnd::InputClosed));
            };
            writeln!(self.output)?;

            info!(
                "event=shell_command module=shell status=start command={}",
                command.as_str()
            );
            if let Flow::End(end) = self.dispatch(command)? {
                return Ok(self.finish(end));
            }
        }
    }

    /// Executes one command against the session.
    fn dispatch(&mut self, command: Command) -> ShellResult<Flow> {
        match command {
            Command::Load => self.load(),
            Command::Add => self.add(),
            Command::Inspect => {
                self.show_inventory()?;
                Ok(Flow::Continue)
            }
            Command::Delete => self.delete(),
            Command::Save => self.save(),
            Command::Exit => Ok(Flow::End(SessionEnd::Exited)),
        }
    }

    fn finish(&self, end: SessionEnd) -> SessionEnd {
        info!(
            "event=session_end module=shell status=ok reason={} records={}",
            match end {
                SessionEnd::Exited => "exit",
                SessionEnd::InputClosed => "input_closed",
            },
            self.inventory.len()
        );
        end
    }

    fn read_menu_choice(&mut self) -> ShellResult<Option<Command>> {
        loop {
            let Some(line) = self.prompt(CHOICE_PROMPT)? else {
                return Ok(None);
            };
            if let Some(command) = Command::parse(&line) {
                return Ok(Some(command));
            }
        }
    }

    fn load(&mut self) -> ShellResult<Flow> {
        writeln!(
            self.output,
            "WARNING: If you continue, all unsaved data will be lost and the Inventory re-loaded from file."
        )?;
        let Some(answer) =
            self.prompt("type 'yes' to continue and reload from file. otherwise reload will be canceled: ")?
        else {
            return Ok(Flow::End(SessionEnd::InputClosed));
        };

        if answer.trim().eq_ignore_ascii_case("yes") {
            writeln!(self.output, "reloading...")?;
            match read_inventory(&self.data_file) {
                Ok(inventory) => self.inventory = inventory,
                Err(StorageError::NotFound(path)) => {
                    warn!("event=shell_reload module=shell status=not_found");
                    writeln!(
                        self.output,
                        "Could not reload: {} does not exist. Inventory data NOT reloaded.",
                        path.display()
                    )?;
                }
                Err(err) => return Err(err.into()),
            }
        } else if self
            .prompt("canceling... Inventory data NOT reloaded. Press [ENTER] to continue to the menu.")?
            .is_none()
        {
            return Ok(Flow::End(SessionEnd::InputClosed));
        }

        self.show_inventory()?;
        Ok(Flow::Continue)
    }

    fn add(&mut self) -> ShellResult<Flow> {
        let Some(id) = self.prompt_id("Enter ID: ", "Please enter an integer")? else {
            return Ok(Flow::End(SessionEnd::InputClosed));
        };
        let Some(title) = self.prompt("What is the CD's title? ")? else {
            return Ok(Flow::End(SessionEnd::InputClosed));
        };
        let Some(artist) = self.prompt("What is the Artist's name? ")? else {
            return Ok(Flow::End(SessionEnd::InputClosed));
        };

        self.inventory.add(id, title.trim(), artist.trim());
        self.show_inventory()?;
        Ok(Flow::Continue)
    }

    fn delete(&mut self) -> ShellResult<Flow> {
        self.show_inventory()?;
        let Some(id) =
            self.prompt_id("Which ID would you like to delete? ", "please enter an integer")?
        else {
            return Ok(Flow::End(SessionEnd::InputClosed));
        };

        if self.inventory.delete(id).is_removed() {
            writeln!(self.output, "The CD was removed")?;
        } else {
            writeln!(self.output, "Could not find this CD!")?;
        }
        self.show_inventory()?;
        Ok(Flow::Continue)
    }

    fn save(&mut self) -> ShellResult<Flow> {
        self.show_inventory()?;
        let Some(answer) = self.prompt("Save this inventory to file? [y/n] ")? else {
            return Ok(Flow::End(SessionEnd::InputClosed));
        };

        if answer.trim().to_lowercase() == "y" {
            match write_inventory(&self.data_file, &self.inventory) {
                Ok(()) => writeln!(
                    self.output,
                    "Saved {} CD(s) to {}.",
                    self.inventory.len(),
                    self.data_file.display()
                )?,
                Err(err) => {
                    warn!(
                        "event=shell_save module=shell status=error error={}",
                        err
                    );
                    writeln!(
                        self.output,
                        "Could not save inventory: {err}. The inventory in memory is unchanged."
                    )?;
                }
            }
        } else if self
            .prompt("The inventory was NOT saved to file. Press [ENTER] to return to the menu.")?
            .is_none()
        {
            return Ok(Flow::End(SessionEnd::InputClosed));
        }

        Ok(Flow::Continue)
    }

    fn show_inventory(&mut self) -> io::Result<()> {
        render::write_inventory(&mut self.output, &self.inventory)
    }

    /// Re-prompts until the answer parses as an id. `None` means input closed.
    fn prompt_id(&mut self, text: &str, retry_message: &str) -> ShellResult<Option<CdId>> {
        loop {
            let Some(line) = self.prompt(text)? else {
                return Ok(None);
            };
            match parse_cd_id(&line) {
                Ok(id) => return Ok(Some(id)),
                Err(_) => writeln!(self.output, "{retry_message}")?,
            }
        }
    }

    fn prompt(&mut self, text: &str) -> ShellResult<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        // Undecodable bytes become U+FFFD and fail validation like any typo.
        let mut raw = Vec::new();
        if self.input.read_until(b'\n', &mut raw)? == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&raw);
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }
}
