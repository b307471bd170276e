pub mod banner;
pub mod terminal;

pub use terminal::TerminalDisplay;

/// Prints the welcome banner for `name`. Call once at startup, before the
/// display takes over the screen.
pub fn init_ui(name: &str) -> Result<(), crate::domain::DomainError> {
    banner::print_welcome(name)
}
