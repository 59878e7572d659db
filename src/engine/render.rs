use crate::engine::movement::format_exits;
use crate::engine::output::Output;
use crate::world;

/// Listed exits, position and description of the location the player is in.
pub fn render_location(out: &mut Output, id: &str, location: &world::Location) {
    let exits = location.available_exits();
    if exits.is_empty() {
        out.say("Available exits: (none)");
    } else {
        out.say(format!("Available exits: {}", exits.join(", ")));
    }

    out.say(format!("You are in position: {}", id));
    out.say(format!("Desc of your location: {}", location.desc.trim()));
}

/// Before/after dump of the exit table the next input is checked against.
pub fn render_exit_tables(out: &mut Output, location: &world::Location) {
    out.diagnostic(format!(
        "All exits before named exits: {}",
        format_exits(&location.exits)
    ));
    out.diagnostic(format!(
        "All exits after named exits: {}",
        format_exits(&location.combined_exits())
    ));
}

pub fn prompt_for(location: &world::Location) -> String {
    format!("Enter Direction: {} : ", location.available_exits().join(", "))
}
