//! The line-oriented shell loop: read a line, dispatch it, print the
//! documented output, repeat.
use std::io::{self, BufRead};
use std::process;
use tracing::error;

use crate::console;
use crate::echo;
use crate::errors::Error;
use crate::executor;
use crate::session::Session;
use crate::sql;
use crate::storage::Table;

/// Runs the shell against `session` until `.exit` or a fatal error.
/// Never returns on either path: both end the process.
pub fn run(mut session: Session) -> ! {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        console::print_prompt();
        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(e)) => fatal(&mut session, Error::Io(e)),
            None => fatal(&mut session, Error::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "reading input failed",
            ))),
        };

        if let Some(command) = line.strip_prefix('.') {
            handle_meta_command(&mut session, command, &line);
            continue;
        }

        match sql::prepare_statement(&line) {
            Ok(statement) => match executor::execute(session.table_mut(), statement) {
                Ok(()) => {}
                Err(e) if e.is_fatal() => fatal(&mut session, e),
                Err(e) => echo!("{}\n", e),
            },
            Err(e) => echo!("{}\n", e),
        }
    }
}

fn handle_meta_command(session: &mut Session, command: &str, raw: &str) {
    match command {
        "exit" => match session.close() {
            Ok(()) => process::exit(0),
            Err(e) => fatal(session, e),
        },
        "btree" => match session.table_mut().describe_btree() {
            Ok(lines) => {
                for line in lines {
                    echo!("{}\n", line);
                }
            }
            Err(e) if e.is_fatal() => fatal(session, e),
            Err(e) => echo!("{}\n", e),
        },
        "constants" => {
            echo!("Constants:\n");
            for (name, value) in Table::describe_constants() {
                echo!("{} = {}\n", name, value);
            }
        }
        _ => echo!("Unrecognized command '{}'\n", raw),
    }
}

fn fatal(session: &mut Session, err: Error) -> ! {
    error!(error = %err, "fatal error, terminating");
    echo!("{}\n", err);
    let _ = session.close();
    process::exit(1);
}
