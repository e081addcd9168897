use crate::app::{process_action, Action, AppState, Services};
use crate::auth;
use crate::config::keybindings::{load_keybindings, KeybindingConfig};
use crate::config::AppConfig;
use crate::tui;
use crate::tui::event::EventHandler;
use anyhow::Result;
use tokio::sync::mpsc;

pub async fn run_tui(config: AppConfig, token: Option<String>) -> Result<()> {
    let keybindings = load_keybindings();

    // Initialize terminal
    let mut terminal = tui::init()?;

    let mut state = AppState::from_config(&config);

    let mut events = EventHandler::new(keybindings.clone());
    let action_tx = events.action_sender();

    // Resolve the session off the UI loop so the loading screen can draw
    {
        let tx = action_tx.clone();
        let token_file = config.token_path();
        let identity = config.identity.clone();
        tokio::spawn(async move {
            let session = auth::resolve_session(token, token_file.as_deref(), &identity).await;
            let _ = tx.send(Action::AuthResolved(session));
        });
    }

    let mut services = Services::new(config);

    let result = run_main_loop(&mut terminal, &mut state, &mut events, &mut services, action_tx, &keybindings).await;

    // Stop polling before the terminal is handed back
    services.disconnect();
    tui::restore()?;

    result
}

async fn run_main_loop(
    terminal: &mut tui::Terminal,
    state: &mut AppState,
    events: &mut EventHandler,
    services: &mut Services,
    action_tx: mpsc::UnboundedSender<Action>,
    keybindings: &KeybindingConfig,
) -> Result<()> {
    let size = terminal.size()?;
    state.system.terminal_size = (size.width, size.height);

    loop {
        terminal.draw(|frame| tui::ui::draw(frame, state, &services.config, keybindings))?;

        let action = events.next(state).await?;
        process_action(state, action, services, &action_tx)?;

        if state.system.should_quit {
            break;
        }
    }

    Ok(())
}
