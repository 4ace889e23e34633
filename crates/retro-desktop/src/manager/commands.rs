//! Applying requests queued by application code

use tracing::warn;
use crate::app::WindowCommand;
use super::WindowManager;

/// Upper bound on requests applied per operation; stops hook feedback loops
const MAX_COMMANDS_PER_DRAIN: usize = 256;

impl WindowManager {
    /// Apply every queued request, in order
    ///
    /// Each request runs as its own operation with its own notification.
    /// Requests queued while draining are picked up by the same loop.
    pub(crate) fn drain_commands(&mut self) {
        if self.draining {
            return;
        }
        self.draining = true;

        let mut applied = 0;
        while let Some(command) = self.commands.pop() {
            if applied == MAX_COMMANDS_PER_DRAIN {
                warn!(dropped = self.commands.len() + 1, "too many queued window requests, dropping the rest");
                self.commands.clear();
                break;
            }
            self.apply_command(command);
            applied += 1;
        }

        self.draining = false;
    }

    fn apply_command(&mut self, command: WindowCommand) {
        match command {
            WindowCommand::Focus(id) => self.focus_window(&id),
            WindowCommand::Close(id) => self.close_window(&id),
            WindowCommand::Minimize(id) => self.minimize_window(&id),
            WindowCommand::Restore(id) => self.restore_window(&id),
            WindowCommand::ToggleMaximize(id) => self.toggle_maximize_window(&id),
            WindowCommand::SetAppState { window_id, patch } => self.set_window_app_state(&window_id, patch),
            WindowCommand::RefreshStatus(id) => {
                if let Some(entry) = self.entry_mut(&id) {
                    let text = entry.status.borrow().clone();
                    entry.surface.set_status(&text);
                }
            }
            WindowCommand::Launch { app_id, options } => {
                self.launch(&app_id, options);
            }
        }
    }
}
