//! Menu commands accepted by the shell.

/// One dispatchable menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `l`: replace the inventory with the persisted file after confirmation.
    Load,
    /// `a`: append a new record.
    Add,
    /// `i`: show the inventory.
    Inspect,
    /// `d`: remove the first record with a given id.
    Delete,
    /// `s`: overwrite the persisted file after confirmation.
    Save,
    /// `x`: leave the session without saving.
    Exit,
}

impl Command {
    /// Menu order.
    pub const ALL: [Command; 6] = [
        Command::Load,
        Command::Add,
        Command::Inspect,
        Command::Delete,
        Command::Save,
        Command::Exit,
    ];

    /// Parses one menu choice. Surrounding whitespace and case are ignored;
    /// anything but a single known letter is rejected.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "l" => Some(Self::Load),
            "a" => Some(Self::Add),
            "i" => Some(Self::Inspect),
            "d" => Some(Self::Delete),
            "s" => Some(Self::Save),
            "x" => Some(Self::Exit),
            _ => None,
        }
    }

    pub fn key(self) -> char {
        match self {
            Self::Load => 'l',
            Self::Add => 'a',
            Self::Inspect => 'i',
            Self::Delete => 'd',
            Self::Save => 's',
            Self::Exit => 'x',
        }
    }

    /// Menu text shown after the key.
    pub fn label(self) -> &'static str {
        match self {
            Self::Load => "load Inventory from file",
            Self::Add => "Add CD",
            Self::Inspect => "Display Current Inventory",
            Self::Delete => "delete CD from Inventory",
            Self::Save => "Save Inventory to file",
            Self::Exit => "exit",
        }
    }

    /// Stable name used in log events.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::Add => "add",
            Self::Inspect => "inspect",
            Self::Delete => "delete",
            Self::Save => "save",
            Self::Exit => "exit",
        }
    }
}
