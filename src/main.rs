//! Wayscene - headless scene graph demo
//!
//! Builds a small scene on a virtual output, runs a focus update through the
//! event loop, clicks into the terminal, feeds the key combos given on the
//! command line and prints the resulting view list as JSON.

use log::info;
use wayscene::compositor::{CompositorState, Output, OutputMode};
use wayscene::event_loop::EventLoop;
use wayscene::geometry::{Geometry, PointF};
use wayscene::input::{ButtonMode, KeyEvent, KeyState, KeyboardAction, KeyboardInteraction};
use wayscene::introspect::list_views_json;
use wayscene::scene::{Layer, Node, NodeFlags, ViewInfo};

/// Logs every key it receives and consumes it
struct LoggingKeyboard {
    title: String,
}

impl KeyboardInteraction for LoggingKeyboard {
    fn handle_keyboard_enter(&self) {
        info!("{} gained keyboard focus", self.title);
    }

    fn handle_keyboard_leave(&self) {
        info!("{} lost keyboard focus", self.title);
    }

    fn handle_keyboard_key(&self, event: KeyEvent) -> KeyboardAction {
        if event.state == KeyState::Pressed {
            info!("{} got key {}", self.title, event.keycode);
        }
        KeyboardAction::Consume
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut state = CompositorState::new();
    let mut event_loop = EventLoop::new()?;

    let output = Output::new("HEADLESS-1".to_string()).with_mode(OutputMode {
        width: 1920,
        height: 1080,
        refresh: 60000,
    });
    let output_id = state.add_output(output)?;

    let mut terminal = ViewInfo::new("Terminal", "foot");
    terminal.geometry = Geometry::new(0, 30, 960, 1050);
    let terminal = Node::new_view(terminal);
    terminal.set_keyboard_interaction(LoggingKeyboard {
        title: "Terminal".to_string(),
    });
    terminal.set_flag(NodeFlags::ACTIVE_KEYBOARD, true);

    let mut panel = ViewInfo::new("Panel", "waybar");
    panel.geometry = Geometry::new(0, 0, 1920, 30);
    let panel = Node::new_view(panel);

    if let Some(output) = state.outputs.get(output_id) {
        output.scene().dynamic_node().add_back(terminal)?;
    }
    state.scene().layer(Layer::Top).add_back(panel)?;

    // One update, then leave the loop
    event_loop.request_update();
    event_loop.handle().insert_idle(|state| state.stop());
    event_loop.run(&mut state)?;

    let hit = state.pointer_motion(PointF::new(480.0, 500.0));
    info!("Pointer over {:?} on {}", hit.new_focus, state.seat.name());
    state.feed_button("BTN_LEFT", ButtonMode::Full)?;

    let combos: Vec<String> = std::env::args().skip(1).collect();
    let combos = if combos.is_empty() {
        vec!["KEY_A".to_string()]
    } else {
        combos
    };
    for combo in &combos {
        state.feed_key(combo)?;
    }

    println!("{}", serde_json::to_string_pretty(&list_views_json(state.scene())?)?);
    Ok(())
}
