//! Chat command matching.

/// Literal name of the toggle chat command.
pub const TOGGLE_COMMAND: &str = "destroy";

/// Result of dispatching a chat command to the plugin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The issuer's destroy mode was flipped to `enabled`.
    Toggled { enabled: bool },
    /// The command matched but had no issuer to apply to.
    Ignored,
    /// The command is not handled by this plugin.
    Unknown,
}

/// Returns true if `name` invokes the toggle command.
///
/// Accepts the bare name or a chat-style `/destroy`, in any ASCII case.
pub(crate) fn is_toggle_command(name: &str) -> bool {
    let name = name.trim();
    let name = name.strip_prefix('/').unwrap_or(name);
    name.eq_ignore_ascii_case(TOGGLE_COMMAND)
}
