use yume_admin_core::auth::{Destination, Navigator};

/// Navigator for a one-shot command: there are no screens to switch, so a
/// redirect is reported as the next command to run.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn redirect(&self, destination: Destination) {
        match destination {
            Destination::Login => {
                eprintln!("Signed out. Run `yume-admin login` to sign in.");
            }
            Destination::Dashboard => {
                eprintln!("Signed in. Run `yume-admin orders list` to see the queue.");
            }
        }
    }
}
