use std::sync::mpsc::{Receiver, Sender};
use std::thread;

use crate::fetch::{self, Endpoints};
use crate::state::{Delta, ProviderCommand};

/// Background worker that performs the blocking retrievals. Commands are
/// handled one at a time, so at most one request is outstanding; staleness is
/// decided by the token carried on each delta, not here.
pub fn spawn_provider(endpoints: Endpoints, tx: Sender<Delta>, cmd_rx: Receiver<ProviderCommand>) {
    thread::spawn(move || {
        while let Ok(cmd) = cmd_rx.recv() {
            match cmd {
                ProviderCommand::FetchTeamList { token } => {
                    match fetch::fetch_team_list(&endpoints) {
                        Ok(teams) => {
                            let _ = tx.send(Delta::TeamListLoaded { token, teams });
                        }
                        Err(err) => {
                            let _ = tx.send(Delta::FetchFailed {
                                token,
                                kind: err.kind(),
                                message: err.to_string(),
                            });
                        }
                    }
                }
                ProviderCommand::FetchTeamMatches { token, team_id } => {
                    match fetch::fetch_team_detail(&endpoints, &team_id) {
                        Ok(detail) => {
                            let _ = tx.send(Delta::TeamMatchesLoaded { token, detail });
                        }
                        Err(err) => {
                            let _ = tx.send(Delta::FetchFailed {
                                token,
                                kind: err.kind(),
                                message: err.to_string(),
                            });
                        }
                    }
                }
            }
        }
    });
}
