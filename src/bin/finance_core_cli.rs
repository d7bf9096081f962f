use std::env;
use std::process::ExitCode;

use finance_core::cli::{output, Session};
use finance_core::storage::JsonUserStore;

fn main() -> ExitCode {
    finance_core::init();

    let store = match env::args().nth(1) {
        Some(path) => JsonUserStore::new(path),
        None => JsonUserStore::new_default(),
    };
    tracing::info!(path = %store.path().display(), "using user store");

    let mut session = match Session::open(store) {
        Ok(session) => session,
        Err(err) => {
            output::error(err);
            return ExitCode::FAILURE;
        }
    };
    if let Err(err) = session.run() {
        output::error(err);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
