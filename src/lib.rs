pub mod engine;
pub mod store;
pub mod world;

use std::io::{self, BufRead, Write};

use engine::{
    Output, OutputBlock, prompt_for, render_exit_tables, render_location,
    resolve_direction, try_handle_movement,
};
use world::{World, WorldError};

pub use world::{load_world_from_file, load_world_from_store, load_world_from_str};

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error(transparent)]
    World(#[from] WorldError),
    #[error("terminal IO failed: {0}")]
    Io(#[from] io::Error),
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The player reached the exit location.
    Exited,
    /// Input ran out before the exit was reached.
    InputClosed,
}

/// What to show at the top of a turn, and the prompt to show after it.
/// `prompt` is `None` once the player stands in the exit location.
pub struct Turn {
    pub output: Output,
    pub prompt: Option<String>,
}

pub struct GameState {
    pub world: World,
    pub current_location: String,
}

#[cfg(feature = "wasm")]
mod wasm_bindings {
    use super::*;
    use serde::Serialize;
    use serde_wasm_bindgen::to_value;
    use wasm_bindgen::prelude::*;

    #[derive(Serialize)]
    struct WasmStepResult {
        blocks: Vec<engine::OutputBlock>,
        prompt: Option<String>,
        quit: bool,
    }

    #[wasm_bindgen]
    pub struct WasmGame {
        state: GameState,
        initialized: bool,
    }

    #[wasm_bindgen]
    impl WasmGame {
        /// Create a new game from a TOML world string. Call `init()` to get the initial render.
        #[wasm_bindgen(constructor)]
        pub fn new(world_toml: &str) -> Result<WasmGame, JsValue> {
            let world =
                load_world_from_str(world_toml).map_err(|e| JsValue::from_str(&e.to_string()))?;
            Ok(WasmGame {
                state: GameState::new(world),
                initialized: false,
            })
        }

        /// Initialize the game and return the first turn's output and prompt.
        #[wasm_bindgen]
        pub fn init(&mut self) -> Result<JsValue, JsValue> {
            let mut out = if self.initialized {
                Output::new()
            } else {
                self.initialized = true;
                self.state.initialize()
            };
            self.finish_turn(&mut out)
        }

        /// Process a player command and return the resulting output blocks, the next prompt and quit flag.
        #[wasm_bindgen]
        pub fn step(&mut self, input: &str) -> Result<JsValue, JsValue> {
            if !self.initialized {
                return self.init();
            }
            let mut out = self
                .state
                .step(input)
                .map_err(|e| JsValue::from_str(&e.to_string()))?;
            self.finish_turn(&mut out)
        }

        fn finish_turn(&mut self, out: &mut Output) -> Result<JsValue, JsValue> {
            let turn = self
                .state
                .begin_turn()
                .map_err(|e| JsValue::from_str(&e.to_string()))?;
            out.extend(turn.output);
            to_value(&WasmStepResult {
                blocks: std::mem::take(&mut out.blocks),
                prompt: turn.prompt,
                quit: self.state.is_finished(),
            })
            .map_err(|e| JsValue::from_str(&e.to_string()))
        }
    }
}

impl GameState {
    pub fn new(world: World) -> Self {
        let current_location = world.start.clone();
        GameState {
            world,
            current_location,
        }
    }

    pub fn initialize(&mut self) -> Output {
        self.current_location = self.world.start.clone();

        let mut out = Output::new();
        out.say(format!("First position: {}", self.current_location));
        out
    }

    pub fn is_finished(&self) -> bool {
        self.world.is_terminal(&self.current_location)
    }

    /// Describe where the player is. Outside the exit location this also
    /// dumps the exit tables and returns the prompt for the next input.
    pub fn begin_turn(&self) -> Result<Turn, GameError> {
        let location = self.world.location(&self.current_location)?;

        let mut output = Output::new();
        render_location(&mut output, &self.current_location, location);

        if self.is_finished() {
            return Ok(Turn {
                output,
                prompt: None,
            });
        }

        render_exit_tables(&mut output, location);
        Ok(Turn {
            output,
            prompt: Some(prompt_for(location)),
        })
    }

    /// Process a single line of player input.
    ///
    /// An input that matches no exit leaves the player where they are. Errors
    /// only come from broken world data.
    pub fn step(&mut self, input: &str) -> Result<Output, GameError> {
        let mut out = Output::new();

        if self.is_finished() {
            out.say("You have already left.");
            return Ok(out);
        }

        let resolution = resolve_direction(input, &self.world.vocabulary);
        if !resolution.words.is_empty() {
            out.diagnostic(format!("Split words are: [{}]", resolution.words.join(", ")));
        }

        try_handle_movement(
            &mut out,
            &mut self.current_location,
            &self.world,
            &resolution.code,
        )?;

        Ok(out)
    }
}

/// Run a whole session: render, prompt, read, step, until the exit location
/// is reached or `input` is exhausted.
pub fn play<R: BufRead, W: Write>(
    state: &mut GameState,
    mut input: R,
    mut output: W,
) -> Result<Outcome, GameError> {
    let first = state.initialize();
    write_output(&mut output, &first)?;

    loop {
        let turn = state.begin_turn()?;
        write_output(&mut output, &turn.output)?;

        let Some(prompt) = turn.prompt else {
            tracing::info!(location = %state.current_location, "reached the exit");
            return Ok(Outcome::Exited);
        };

        write!(output, "{}", prompt)?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(output, "\nGoodbye.")?;
            tracing::info!(location = %state.current_location, "input closed");
            return Ok(Outcome::InputClosed);
        }
        writeln!(output)?;

        let out = state.step(&line)?;
        write_output(&mut output, &out)?;
    }
}

/// Logs go to stderr so they never interleave with the game text on stdout.
/// `RUST_LOG` overrides the default `warn` filter.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
}

pub fn write_output<W: Write>(w: &mut W, out: &Output) -> io::Result<()> {
    let mut printed_anything = false;
    let mut started_events = false;

    for block in &out.blocks {
        match block {
            OutputBlock::Text(line) | OutputBlock::Diagnostic(line) => {
                writeln!(w, "{}", line)?;
            }
            OutputBlock::Event(ev) => {
                if !started_events && printed_anything {
                    writeln!(w)?; // visual separation before first event
                }
                started_events = true;
                writeln!(w, "{}", ev)?;
            }
        }
        printed_anything = true;
    }

    Ok(())
}
