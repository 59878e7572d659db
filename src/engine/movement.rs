use std::collections::BTreeMap;

use crate::engine::output::Output;
use crate::world::{self, WorldError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Move {
    Moved { to: String },
    Blocked,
}

/// Apply an exit code to the current location.
///
/// An unknown code is a `Blocked` move for the player to correct. A code whose
/// destination is not in the world is a broken world and comes back as
/// [`WorldError::NotFound`].
pub fn try_handle_movement(
    out: &mut Output,
    current_location: &mut String,
    world: &world::World,
    code: &str,
) -> Result<Move, WorldError> {
    let location = world.location(current_location)?;
    let all_exits = location.combined_exits();

    let Some(target) = all_exits.get(code) else {
        tracing::debug!(from = %current_location, code, "no exit for code");
        out.say("You cannot go in that direction");
        return Ok(Move::Blocked);
    };

    let destination = world.location(target)?;
    tracing::info!(from = %current_location, to = %target, code, "moved");

    out.event(format!(
        "New position = {}: Description = {}, exits = {}, named exits = {}",
        target,
        destination.desc,
        format_exits(&destination.exits),
        format_exits(&destination.named_exits),
    ));
    *current_location = target.clone();
    Ok(Move::Moved { to: target.clone() })
}

/// `{E: 3, N: 5}` style dump of an exit table.
pub fn format_exits(exits: &BTreeMap<String, String>) -> String {
    let pairs = exits
        .iter()
        .map(|(code, target)| format!("{}: {}", code, target))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{{{}}}", pairs)
}
