//! Help-text forwarding between command descriptors

use clap::Command;

/// Return `target` carrying `source`'s short and long help text.
///
/// Lets a shortcut command advertise exactly what the command it stands in
/// for does, without repeating the prose. Only help output changes.
pub fn documented_by(source: &Command, target: Command) -> Command {
    let target = match source.get_about() {
        Some(about) => target.about(about.clone()),
        None => target.about(None::<&'static str>),
    };
    match source.get_long_about() {
        Some(long_about) => target.long_about(long_about.clone()),
        None => target.long_about(None::<&'static str>),
    }
}
